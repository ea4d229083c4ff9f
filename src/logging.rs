use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber, honouring `RUST_LOG` when set.
pub fn init(default_filter: &str) {
    let env =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
}

#[cfg(test)]
pub(crate) fn init_test_logging() {
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,scriptcat=debug")),
        )
        .with_test_writer()
        .finish();
    // ignore "already set" from other tests
    let _ = tracing::subscriber::set_global_default(subscriber);
}
