use tracing_subscriber::{EnvFilter, fmt};

/// Initializes tracing from `RUST_LOG`, defaulting to `info`.
///
/// Logs go to stderr so command output on stdout stays clean.
pub fn init_tracing(json: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false);

    if json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
