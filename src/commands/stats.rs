//! Stats command: CSV import and export without the HTTP server.

use std::sync::Arc;

use crate::cli::args::{StatsAction, StatsArgs};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, Persistence};
use crate::services::{StatsManager, StatsService};

pub async fn execute(args: StatsArgs, config: Config) -> AppResult<()> {
    let db = Database::connect(&config).await?;
    let stats = StatsManager::new(Arc::new(Persistence::new(db.get_connection())));

    match args.action {
        StatsAction::Import { match_id, file } => {
            let data = tokio::fs::read(&file).await.map_err(|e| {
                AppError::bad_request(format!("Cannot read {}: {}", file.display(), e))
            })?;

            let imported = stats.import_csv(match_id, &data).await?;
            println!("Imported {} stat lines into match {}", imported, match_id);
        }
        StatsAction::Export { match_id, output } => {
            let csv = stats.export_csv(match_id).await?;

            match output {
                Some(path) => {
                    tokio::fs::write(&path, csv).await.map_err(|e| {
                        AppError::internal(format!("Cannot write {}: {}", path.display(), e))
                    })?;
                    tracing::info!(match_id, path = %path.display(), "Stats exported");
                }
                None => print!("{}", csv),
            }
        }
    }

    Ok(())
}
