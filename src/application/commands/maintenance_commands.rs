// src/application/commands/maintenance_commands.rs

use crate::application::{dto::HealthDto, state::AppState};
use crate::db::{
    get_connection, get_database_stats, initialize_database, reset_database,
    verify_database_integrity,
};
use crate::error::{AppError, AppResult};

/// Integrity check plus storage and library counters
pub fn health_check(state: &AppState) -> AppResult<HealthDto> {
    let conn = get_connection(&state.pool)?;

    let integrity_ok = match verify_database_integrity(&conn) {
        Ok(()) => true,
        Err(AppError::Other(detail)) => {
            log::error!("{}", detail);
            false
        }
        Err(e) => return Err(e),
    };
    let database = get_database_stats(&conn)?;
    drop(conn);

    let library = state.watch_service.library_statistics()?;

    Ok(HealthDto {
        integrity_ok,
        database,
        library,
    })
}

/// Drop every title and episode, then recreate empty tables
pub fn reset_library(state: &AppState) -> AppResult<()> {
    let conn = get_connection(&state.pool)?;
    reset_database(&conn)?;
    initialize_database(&conn)?;
    log::info!("Library reset");
    Ok(())
}
