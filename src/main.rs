mod app;
mod entry;
mod system;

use kurl::error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
