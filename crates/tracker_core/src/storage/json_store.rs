use crate::error::AppError;
use crate::model::Task;
use std::path::{Path, PathBuf};

const STORE_FILE_NAME: &str = "tasks.json";
pub const STORE_ENV_VAR: &str = "TASKS_STORE_PATH";

/// Resolves the store file: `TASKS_STORE_PATH`, then the configured path,
/// then `tasks.json` in the working directory.
pub fn store_path(configured: Option<&Path>) -> PathBuf {
    if let Ok(path) = std::env::var(STORE_ENV_VAR)
        && !path.trim().is_empty()
    {
        return PathBuf::from(path);
    }

    match configured {
        Some(path) if !path.as_os_str().is_empty() => path.to_path_buf(),
        _ => PathBuf::from(STORE_FILE_NAME),
    }
}

/// Reads the task array. A missing file is an empty store.
pub fn load_tasks(path: &Path) -> Result<Vec<Task>, AppError> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|err| AppError::storage_unreadable(format!("{}: {}", path.display(), err)))?;
    serde_json::from_str(&content).map_err(|err| {
        AppError::storage_unreadable(format!("invalid JSON in {}: {}", path.display(), err))
    })
}

/// Writes the task array through a sibling temp file that replaces the
/// store on success.
pub fn save_tasks(path: &Path, tasks: &[Task]) -> Result<(), AppError> {
    let unwritable =
        |err: std::io::Error| AppError::storage_unwritable(format!("{}: {}", path.display(), err));

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(unwritable)?;
    }

    let content = serde_json::to_string_pretty(tasks)
        .map_err(|err| AppError::storage_unwritable(err.to_string()))?;

    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);
    std::fs::write(&temp_path, content).map_err(unwritable)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let permissions = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(&temp_path, permissions).map_err(unwritable)?;
    }

    std::fs::rename(&temp_path, path).map_err(|err| {
        std::fs::remove_file(&temp_path).ok();
        unwritable(err)
    })
}
