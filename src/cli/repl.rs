use std::path::PathBuf;

use tracing::info;

use crate::config;
use crate::errors::DashError;
use crate::repl::ReplSession;

pub async fn handle_repl(config_path: Option<&str>) -> Result<(), DashError> {
    let path = config_path.map(PathBuf::from);
    let settings = config::load_settings(path.as_deref()).await?;
    info!(phases = settings.table.len(), "Opening dashboard");
    ReplSession::new(settings).run().await
}
