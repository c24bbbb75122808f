// src/config.rs
//
// Runtime configuration
//
// Database location, in order of precedence:
//   1. explicit path (--database flag or ANIMESHELF_DB, resolved by clap)
//   2. {data_dir}/animeshelf/animeshelf.db

use std::path::PathBuf;

use crate::error::{AppError, AppResult};

pub const APP_DIR: &str = "animeshelf";
pub const DB_FILE: &str = "animeshelf.db";

/// Single user, mostly sequential access; a few connections are plenty.
pub const DEFAULT_POOL_SIZE: u32 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_path: PathBuf,
    pub pool_size: u32,
}

impl Config {
    pub fn resolve(database: Option<PathBuf>) -> AppResult<Self> {
        let database_path = match database {
            Some(path) => path,
            None => default_database_path()?,
        };

        Ok(Self {
            database_path,
            pool_size: DEFAULT_POOL_SIZE,
        })
    }
}

pub fn default_database_path() -> AppResult<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| AppError::Other("Could not determine a data directory".to_string()))?;
    Ok(data_dir.join(APP_DIR).join(DB_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_path_wins() {
        let config = Config::resolve(Some(PathBuf::from("/tmp/shelf.db"))).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/tmp/shelf.db"));
        assert_eq!(config.pool_size, DEFAULT_POOL_SIZE);
    }

    #[test]
    fn test_default_path_layout() {
        if let Ok(path) = default_database_path() {
            assert!(path.ends_with("animeshelf/animeshelf.db"));
        }
    }
}
