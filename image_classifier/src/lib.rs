mod error;
mod inference_service;
mod model_service;
mod server;
mod static_service;
mod trace;
mod worker_pool;

pub mod config;
pub mod telemetry;

pub use error::ClassifierError;
pub use inference_service::InferenceService;
pub use model_service::ModelService;
pub use server::{start_server, GrpcServer};
pub use static_service::StaticModelService;
pub use trace::TRACE_ID_HEADER;
