//! Command implementations for the dotoday CLI

pub mod init_db;
pub mod serve;

pub use init_db::run_init_db;
pub use serve::run_serve;

use clap::Args;

/// Database used when neither DATABASE_URL nor DB_PATH is set.
pub const DEFAULT_DB_PATH: &str = "dotoday.db";

/// Database selection shared by every command that opens the store
#[derive(Args, Debug, Clone)]
pub struct DatabaseArgs {
    /// SQLite connection URL, e.g. sqlite://dotoday.db or sqlite::memory:
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Path to the SQLite file, used when no URL is given
    #[arg(long, env = "DB_PATH")]
    pub db_path: Option<String>,
}

impl DatabaseArgs {
    /// URL wins over path; the path falls back to ./dotoday.db.
    pub fn resolve_url(&self) -> String {
        if let Some(url) = &self.database_url {
            return url.clone();
        }
        let path = self.db_path.as_deref().unwrap_or(DEFAULT_DB_PATH);
        format!("sqlite://{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(url: Option<&str>, path: Option<&str>) -> DatabaseArgs {
        DatabaseArgs {
            database_url: url.map(String::from),
            db_path: path.map(String::from),
        }
    }

    #[test]
    fn url_takes_precedence() {
        let db = args(Some("sqlite::memory:"), Some("ignored.db"));
        assert_eq!(db.resolve_url(), "sqlite::memory:");
    }

    #[test]
    fn path_becomes_sqlite_url() {
        assert_eq!(args(None, Some("/var/lib/todo.db")).resolve_url(), "sqlite:///var/lib/todo.db");
    }

    #[test]
    fn defaults_to_local_file() {
        assert_eq!(args(None, None).resolve_url(), "sqlite://dotoday.db");
    }
}
