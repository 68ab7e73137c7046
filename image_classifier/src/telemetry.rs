use crate::config::LogLevel;
use tracing::Subscriber;
use tracing_subscriber::{
    fmt::{
        self,
        format::{FmtSpan, Format, Json, JsonFields},
        MakeWriter,
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

pub fn default_filter(log_level: &LogLevel) -> String {
    format!("{},h2=info,tower=info", log_level.as_str())
}

/// JSON formatter shared by the binary and tests. Closing a span emits one
/// event carrying its fields and `time.busy`/`time.idle`.
pub fn json_layer<S, W>(make_writer: W) -> fmt::Layer<S, JsonFields, Format<Json>, W>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + 'static,
{
    fmt::layer()
        .json()
        .with_level(true)
        .with_thread_names(true)
        .with_thread_ids(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(make_writer)
}

pub fn init_tracing(log_level: &LogLevel) {
    let filter = default_filter(log_level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(json_layer(std::io::stdout))
        .init();
}
