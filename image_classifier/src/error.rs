use thiserror::Error;
use tonic::Status;

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Invalid trace ID: {0}")]
    InvalidTraceId(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Failed to load configuration: {0}")]
    ConfigLoad(#[from] config::ConfigError),
    #[error("Failed to parse address: {0}")]
    AddrParse(#[from] std::net::AddrParseError),
    #[error("gRPC transport error: {0}")]
    Transport(#[from] tonic::transport::Error),
    #[error("Failed to build reflection service: {0}")]
    Reflection(#[from] tonic_reflection::server::Error),
}

impl From<ClassifierError> for Status {
    fn from(err: ClassifierError) -> Self {
        match err {
            ClassifierError::InvalidTraceId(reason) => {
                Status::invalid_argument(format!("Invalid trace ID: {}", reason))
            }
            other => Status::internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonic::Code;

    #[test]
    fn test_trace_id_error_maps_to_invalid_argument() {
        let status: Status = ClassifierError::InvalidTraceId("empty".to_string()).into();
        assert_eq!(status.code(), Code::InvalidArgument);
        assert!(status.message().contains("empty"));
    }

    #[test]
    fn test_startup_errors_map_to_internal() {
        let status: Status = ClassifierError::InvalidConfig("bad".to_string()).into();
        assert_eq!(status.code(), Code::Internal);
    }
}
