use crate::{
    model_service::ModelService,
    trace::{resolve_trace_id, TRACE_ID_HEADER},
    worker_pool::WorkerPool,
};
use classifier_proto::{
    image_classifier_server::{ImageClassifier, SERVICE_NAME},
    ClassifyRequest, ClassifyResponse,
};
use std::sync::Arc;
use tonic::{async_trait, Request, Response, Status};
use tracing::Instrument;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct InferenceService<M: ModelService> {
    model_service: Arc<M>,
    worker_pool: WorkerPool,
}

impl<M: ModelService> InferenceService<M> {
    pub fn new(model_service: M, max_workers: usize) -> Self {
        Self {
            model_service: Arc::new(model_service),
            worker_pool: WorkerPool::new(max_workers),
        }
    }
}

#[async_trait]
impl<M: ModelService> ImageClassifier for InferenceService<M> {
    async fn predict(
        &self,
        request: Request<ClassifyRequest>,
    ) -> Result<Response<ClassifyResponse>, Status> {
        let trace_id = resolve_trace_id(request.metadata());
        let classify_request = request.into_inner();
        let span = tracing::info_span!(
            "predict",
            trace_id = %trace_id.as_str(),
            span_id = %Uuid::new_v4(),
            service = SERVICE_NAME,
            operation = "Predict",
            model_version = %classify_request.model_version,
            status = tracing::field::Empty,
        );

        let model_service = self.model_service.clone();
        let worker_pool = &self.worker_pool;
        let result = async move {
            tracing::info!(
                "Running inference for version: {}",
                classify_request.model_version
            );
            tracing::debug!(
                "Received {} bytes of image data",
                classify_request.image_data.len()
            );

            let classification = worker_pool
                .run(model_service.predict(classify_request))
                .await??;

            tracing::debug!(
                "Returning label={}, confidence={:.3}",
                classification.label,
                classification.confidence
            );
            Ok::<_, Status>(classification)
        }
        .instrument(span.clone())
        .await;

        match &result {
            Ok(_) => span.record("status", "ok"),
            Err(status) => span.record("status", format!("{:?}", status.code()).as_str()),
        };
        let classification = result?;

        let mut response = Response::new(classification);
        response
            .metadata_mut()
            .insert(TRACE_ID_HEADER, trace_id.header().clone());

        Ok(response)
    }
}
