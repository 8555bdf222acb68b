//! Command implementations.

mod analytics;
mod demo;
mod ingest;
mod registry;
mod security;
mod validate;

pub use analytics::run_analytics;
pub use demo::run_demo;
pub use ingest::run_ingest;
pub use registry::run_registry;
pub use security::run_security;
pub use validate::run_validate;

use std::path::Path;
use std::sync::Arc;

use config_loader::{ConfigLoader, GridConfig};
use tracing::info;

use crate::error::{CliError, Result};

/// Defaults, overlaid with the `--config` file when one is given
pub(crate) fn load_grid_config(path: Option<&Path>) -> Result<Arc<GridConfig>> {
    let Some(path) = path else {
        return Ok(Arc::new(GridConfig::new()));
    };

    if !path.exists() {
        return Err(CliError::config_not_found(path));
    }

    let config =
        ConfigLoader::load_from_path(path).map_err(|e| CliError::config(path, e))?;
    info!(config = %path.display(), "Grid configuration loaded");
    Ok(Arc::new(config))
}
