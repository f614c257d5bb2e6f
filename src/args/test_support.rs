use clap::Parser;

use crate::error::{AppError, AppResult};

use super::KurlArgs;

pub(crate) fn parse_test_args<I, T>(args: I) -> AppResult<KurlArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    KurlArgs::try_parse_from(args).map_err(AppError::from)
}
