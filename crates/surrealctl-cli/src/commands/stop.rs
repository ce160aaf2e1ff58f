use anyhow::Result;
use surrealctl_core::Report;

use super::Context;

pub async fn stop(context: &Context) -> Result<Vec<Report>> {
    let mut supervisor = context.supervisor();
    Ok(supervisor.stop().await?)
}
