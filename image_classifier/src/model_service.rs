use classifier_proto::{ClassifyRequest, ClassifyResponse};
use tonic::{async_trait, Status};

#[async_trait]
pub trait ModelService: Send + Sync + Clone + 'static {
    async fn predict(&self, request: ClassifyRequest) -> Result<ClassifyResponse, Status>;
}
