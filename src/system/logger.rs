use tracing_subscriber::{EnvFilter, FmtSubscriber};

use kurl::args::defaults::LOG_ENV_VARS;

pub(crate) fn init_logging(verbose: bool, no_color: bool) {
    let filter = LOG_ENV_VARS
        .iter()
        .find_map(|name| std::env::var(name).ok())
        .map_or_else(
            || {
                if verbose {
                    EnvFilter::new("debug")
                } else {
                    EnvFilter::new("info")
                }
            },
            |value| EnvFilter::try_new(value).unwrap_or_else(|_| EnvFilter::new("info")),
        );

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}
