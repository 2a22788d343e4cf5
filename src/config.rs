use chrono::Local;
use std::env;
use std::path::PathBuf;

/// File name the web application gives its SQLite database.
pub const DB_FILE_NAME: &str = "webui.db";

/// Resolved paths the tool operates on. Built once in `main` and passed
/// into every operation; nothing else reads the environment.
#[derive(Debug, Clone)]
pub struct ToolConfig {
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
}

impl ToolConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        let db_path = data_dir.join(DB_FILE_NAME);
        Self { data_dir, db_path }
    }

    // DATA_DIR is the same variable the web application itself reads, so
    // both sides resolve to the same database file.
    pub fn from_env() -> Self {
        let data_dir = env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string());
        Self::new(PathBuf::from(data_dir))
    }

    pub fn database_exists(&self) -> bool {
        self.db_path.exists()
    }

    /// Backup file name for a mutation happening right now:
    /// `webui_backup_YYYYMMDD_HHMMSS.db`, next to the live database.
    pub fn next_backup_path(&self) -> PathBuf {
        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        self.data_dir.join(format!("webui_backup_{stamp}.db"))
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join("maintenance.log")
    }
}
