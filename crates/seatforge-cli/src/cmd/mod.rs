pub mod optimize;
pub mod report;
pub mod seed;
pub mod stats;

use seatforge_core::config::Config;
use seatforge_core::SfResult;
use std::path::Path;
use tracing::info;

pub(crate) fn rng_for(config: &Config) -> fastrand::Rng {
    match config.search.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    }
}

/// Writes to `path`, or to stdout when no path is given.
pub(crate) fn emit(text: &str, path: Option<&Path>) -> SfResult<()> {
    match path {
        Some(path) => {
            std::fs::write(path, text)?;
            info!("💾 Wrote {:?}", path);
        }
        None => print!("{}", text),
    }
    Ok(())
}
