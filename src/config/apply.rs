use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{KurlArgs, PositiveUsize, parse_header};
use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

/// Applies configuration values to CLI arguments. Options given explicitly on
/// the command line always win.
///
/// # Errors
///
/// Returns an error when a config value is invalid.
pub fn apply_config(args: &mut KurlArgs, matches: &ArgMatches, config: ConfigFile) -> AppResult<()> {
    if !is_cli(matches, "urls")
        && let Some(urls) = config.url
    {
        args.urls = urls.into_vec();
    }

    if !is_cli(matches, "method")
        && let Some(method) = config.method
    {
        args.method = method;
    }

    if !is_cli(matches, "post")
        && let Some(post) = config.post
    {
        args.post = post;
    }

    if !is_cli(matches, "headers")
        && let Some(headers) = config.headers.as_ref()
    {
        let mut parsed = Vec::with_capacity(headers.len());
        for header in headers {
            parsed.push(
                parse_header(header)
                    .map_err(|err| AppError::config(ConfigError::InvalidHeader { source: err }))?,
            );
        }
        args.headers = parsed;
    }

    if !is_cli(matches, "body")
        && let Some(body) = config.body
    {
        args.body = Some(body);
    }

    if !is_cli(matches, "threads")
        && let Some(threads) = config.threads
    {
        args.threads = ensure_positive(threads, "threads")?;
    }

    if !is_cli(matches, "requests")
        && let Some(requests) = config.requests
    {
        args.requests = ensure_positive(requests, "requests")?;
    }

    if !is_cli(matches, "wait")
        && let Some(wait) = config.wait.as_ref()
    {
        args.wait = wait.to_duration().map_err(|err| {
            AppError::config(ConfigError::InvalidDuration {
                field: "wait",
                source: err,
            })
        })?;
    }

    if !is_cli(matches, "timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        args.timeout = Some(timeout.to_duration().map_err(|err| {
            AppError::config(ConfigError::InvalidDuration {
                field: "timeout",
                source: err,
            })
        })?);
    }

    if !is_cli(matches, "warm")
        && let Some(warm) = config.warm
    {
        args.warm = warm;
    }

    if !is_cli(matches, "print_latencies")
        && let Some(print_latencies) = config.print_latencies
    {
        args.print_latencies = print_latencies;
    }

    if !is_cli(matches, "output_format")
        && let Some(output_format) = config.output_format
    {
        args.output_format = output_format;
    }

    if !is_cli(matches, "skip_errors")
        && let Some(skip_errors) = config.skip_errors
    {
        args.skip_errors = skip_errors;
    }

    if !is_cli(matches, "verbose")
        && let Some(verbose) = config.verbose
    {
        args.verbose = verbose;
    }

    if !is_cli(matches, "no_color")
        && let Some(no_color) = config.no_color
    {
        args.no_color = no_color;
    }

    Ok(())
}

fn ensure_positive(value: usize, field: &'static str) -> AppResult<PositiveUsize> {
    PositiveUsize::try_from(value)
        .map_err(|err| AppError::config(ConfigError::FieldMustBePositive { field, source: err }))
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}
