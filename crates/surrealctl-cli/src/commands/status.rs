use anyhow::Result;
use surrealctl_core::Report;

use super::Context;

pub async fn status(context: &Context) -> Result<Vec<Report>> {
    Ok(context.supervisor().status().await?)
}
