use anyhow::Result;
use surrealctl_config::PartialConfiguration;
use surrealctl_core::Report;

use super::Context;

pub fn configure(context: &Context, update: PartialConfiguration) -> Result<Vec<Report>> {
    let store = context.config_store();
    let config = store.save(update)?;
    tracing::debug!("Data directory is now {}", config.data_dir);

    Ok(vec![Report::success("Configuration updated")])
}
