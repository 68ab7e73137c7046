use crate::model_service::ModelService;
use classifier_proto::{ClassifyRequest, ClassifyResponse};
use tonic::{async_trait, Status};

pub const STATIC_LABEL: &str = "Golden Retriever";
pub const STATIC_CONFIDENCE: f32 = 0.98;

/// Placeholder model: answers every request with the same classification,
/// whatever the image bytes or requested model version.
#[derive(Debug, Clone, Default)]
pub struct StaticModelService;

impl StaticModelService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ModelService for StaticModelService {
    async fn predict(&self, _request: ClassifyRequest) -> Result<ClassifyResponse, Status> {
        Ok(ClassifyResponse {
            label: STATIC_LABEL.to_string(),
            confidence: STATIC_CONFIDENCE,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_predict_ignores_input() -> Result<(), Status> {
        let service = StaticModelService::new();
        let requests = [
            ClassifyRequest {
                image_data: vec![],
                model_version: String::new(),
            },
            ClassifyRequest {
                image_data: vec![0xff; 4096],
                model_version: "v2".to_string(),
            },
            ClassifyRequest {
                image_data: b"not an image".to_vec(),
                model_version: "resnet50-2024-01".to_string(),
            },
        ];

        for request in requests {
            let response = service.predict(request).await?;
            assert_eq!(response.label, "Golden Retriever");
            assert_eq!(response.confidence, 0.98);
        }

        Ok(())
    }
}
