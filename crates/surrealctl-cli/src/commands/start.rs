use anyhow::Result;
use surrealctl_core::Report;

use super::Context;

pub async fn start(context: &Context, force: bool) -> Result<Vec<Report>> {
    let mut supervisor = context.supervisor();
    Ok(supervisor.start(force).await?)
}
