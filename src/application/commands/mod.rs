// src/application/commands/mod.rs
//
// Command Handlers
//
// ARCHITECTURE:
// - Commands are thin adapters between the command line and the services
// - Commands accept plain arguments, return DTOs
// - Commands NEVER contain business logic

pub mod episode_commands;
pub mod maintenance_commands;
pub mod title_commands;

pub use episode_commands::*;
pub use maintenance_commands::*;
pub use title_commands::*;

#[cfg(test)]
pub(crate) mod test_support {
    use tempfile::TempDir;

    use crate::application::AppState;
    use crate::db::test_support::setup_test_pool;

    pub fn setup_state() -> (AppState, TempDir) {
        let (pool, temp) = setup_test_pool();
        (AppState::new(pool), temp)
    }
}
