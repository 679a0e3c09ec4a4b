use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Install the global subscriber: compact events on stderr, filtered
/// by `RUST_LOG` with `level` as the default directive.
///
/// The returned guard flushes pending events when dropped and must be
/// kept alive until the program is done logging.
pub fn init_logging(level: tracing::Level) -> WorkerGuard {
    let (stderr_writer, guard) = tracing_appender::non_blocking(std::io::stderr());

    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let stderr_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_target(false)
        .with_writer(stderr_writer)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(stderr_layer).init();

    guard
}
