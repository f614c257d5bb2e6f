use clap::Parser;
use std::time::Duration;

use super::parsers::{parse_duration_arg, parse_header, parse_positive_usize};
use super::types::{HttpMethod, OutputFormat, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Kurl: load test HTTP traffic on one or more endpoints with barrier-released parallel workers."
)]
pub struct KurlArgs {
    /// Target endpoint (repeatable; workers are assigned to URLs round-robin)
    #[arg(long = "url", short = 'u')]
    pub urls: Vec<String>,

    /// HTTP method to use
    #[arg(long, short = 'X', default_value = "get", ignore_case = true)]
    pub method: HttpMethod,

    /// Use HTTP POST (shortcut for --method post)
    #[arg(long)]
    pub post: bool,

    /// HTTP headers in 'Key: Value' or 'key=value' format (repeatable)
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Path to a file containing the HTTP request body
    #[arg(long, short = 'b')]
    pub body: Option<String>,

    /// Number of parallel workers
    #[arg(long = "threads", short = 't', alias = "thread", default_value = "10", value_parser = parse_positive_usize)]
    pub threads: PositiveUsize,

    /// Number of HTTP requests per worker
    #[arg(long = "requests", short = 'n', alias = "request", default_value = "10", value_parser = parse_positive_usize)]
    pub requests: PositiveUsize,

    /// How long to wait between requests on each worker (supports ms/s/m/h)
    #[arg(long, short = 'w', default_value = "0", value_parser = parse_duration_arg)]
    pub wait: Duration,

    /// HTTP client timeout per request (supports ms/s/m/h; 0 disables)
    #[arg(long, value_parser = parse_duration_arg)]
    pub timeout: Option<Duration>,

    /// Warm up with one HTTP request (not included in the result)
    #[arg(long)]
    pub warm: bool,

    /// Print space-separated millisecond-rounded latencies to stdout
    #[arg(long = "print-latencies", alias = "pl")]
    pub print_latencies: bool,

    /// Output format for the run summary
    #[arg(long = "output-format", value_enum, default_value = "text")]
    pub output_format: OutputFormat,

    /// Compute latency statistics over successful requests only
    #[arg(long = "skip-errors")]
    pub skip_errors: bool,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,

    /// Disable colored log output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Path to a TOML or JSON config file (defaults to ./kurl.toml or ./kurl.json)
    #[arg(long, short = 'c')]
    pub config: Option<String>,
}

impl KurlArgs {
    /// Output format after folding in the `--print-latencies` shortcut.
    #[must_use]
    pub const fn effective_output_format(&self) -> OutputFormat {
        if self.print_latencies {
            OutputFormat::Latencies
        } else {
            self.output_format
        }
    }

    /// Timeout handed to the HTTP clients; a zero timeout means none.
    #[must_use]
    pub fn effective_timeout(&self) -> Option<Duration> {
        self.timeout.filter(|timeout| !timeout.is_zero())
    }
}
