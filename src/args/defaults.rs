/// Config filenames checked when `--config` is not given.
pub const DEFAULT_CONFIG_FILES: [&str; 2] = ["kurl.toml", "kurl.json"];
/// Environment variables consulted for the log filter, in order.
pub const LOG_ENV_VARS: [&str; 2] = ["KURL_LOG", "RUST_LOG"];
