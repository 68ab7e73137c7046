use crate::error::ClassifierError;
use tonic::metadata::{Ascii, MetadataMap, MetadataValue};
use uuid::Uuid;

pub const TRACE_ID_HEADER: &str = "x-trace-id";

pub fn parse_trace_id(raw: &str) -> Result<String, ClassifierError> {
    if raw.is_empty() {
        return Err(ClassifierError::InvalidTraceId(
            "trace ID must not be empty".to_string(),
        ));
    }
    Ok(raw.to_string())
}

/// Trace identifier of one call, kept alongside the metadata value that is
/// echoed back to the caller.
#[derive(Debug, Clone)]
pub struct TraceId {
    id: String,
    header: MetadataValue<Ascii>,
}

impl TraceId {
    pub fn generate() -> Self {
        let id = Uuid::new_v4().to_string();
        let header = MetadataValue::try_from(id.as_str())
            .expect("hyphenated UUIDs are visible ASCII");
        Self { id, header }
    }

    pub fn as_str(&self) -> &str {
        &self.id
    }

    pub fn header(&self) -> &MetadataValue<Ascii> {
        &self.header
    }
}

/// Picks the caller's `x-trace-id` when it is usable. A missing or unusable
/// value gets a freshly generated id, so resolution never fails the call.
pub fn resolve_trace_id(metadata: &MetadataMap) -> TraceId {
    let Some(value) = metadata.get(TRACE_ID_HEADER) else {
        return TraceId::generate();
    };

    let parsed = value
        .to_str()
        .map_err(|e| ClassifierError::InvalidTraceId(e.to_string()))
        .and_then(parse_trace_id);

    match parsed {
        Ok(id) => TraceId {
            id,
            header: value.clone(),
        },
        Err(e) => {
            let trace_id = TraceId::generate();
            tracing::warn!("{}, using generated trace ID {}", e, trace_id.as_str());
            trace_id
        }
    }
}
