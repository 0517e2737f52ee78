use std::path::PathBuf;

/// Default database location: next to the running executable, so it is
/// stable regardless of the working directory the process was started from.
pub fn default_database_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(std::path::Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("chatdb.db")
}
