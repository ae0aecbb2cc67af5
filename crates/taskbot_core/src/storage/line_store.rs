use crate::dispatch::TaskSink;
use crate::error::{AppError, DecodeError};
use crate::model::TaskList;
use crate::storage::codec;
use std::path::{Path, PathBuf};

const STORE_FILE_NAME: &str = "tasks.txt";
pub const STORE_ENV_VAR: &str = "TASKBOT_STORE_PATH";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    pub line_number: usize,
    pub error: DecodeError,
}

/// Everything recovered from the store file, plus the lines that could not be.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub tasks: TaskList,
    pub skipped: Vec<SkippedLine>,
}

impl LoadReport {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

pub fn store_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var(STORE_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| AppError::invalid_data("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata).join("taskbot").join(STORE_FILE_NAME))
    } else {
        let home = std::env::var("HOME").map_err(|_| AppError::invalid_data("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("taskbot")
            .join(STORE_FILE_NAME))
    }
}

/// Loads every decodable line. A corrupt line is recorded and skipped, never
/// fatal; a missing file is an empty list.
pub fn load(path: &Path) -> Result<LoadReport, AppError> {
    if !path.exists() {
        return Ok(LoadReport::default());
    }

    let bytes = std::fs::read(path)
        .map_err(|err| AppError::io(format!("{}: {}", path.display(), err)))?;
    let content = String::from_utf8_lossy(&bytes);

    let mut report = LoadReport::default();
    for (offset, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match codec::decode(line) {
            Ok(task) => report.tasks.push(task),
            Err(error) => report.skipped.push(SkippedLine {
                line_number: offset + 1,
                error,
            }),
        }
    }

    if !report.skipped.is_empty() {
        tracing::warn!(
            path = %path.display(),
            skipped = report.skipped.len(),
            "skipped malformed task lines"
        );
    }
    tracing::debug!(path = %path.display(), tasks = report.tasks.len(), "loaded tasks");

    Ok(report)
}

/// Rewrites the whole file from `tasks`.
pub fn save(path: &Path, tasks: &TaskList) -> Result<(), AppError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|err| AppError::io(err.to_string()))?;
    }

    let mut content = String::new();
    for task in tasks {
        content.push_str(&codec::encode(task));
        content.push('\n');
    }
    std::fs::write(path, content).map_err(|err| AppError::io(err.to_string()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let permissions = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(path, permissions).map_err(|err| AppError::io(err.to_string()))?;
    }

    tracing::debug!(path = %path.display(), tasks = tasks.len(), "saved tasks");
    Ok(())
}

/// File-backed [`TaskSink`].
#[derive(Debug, Clone)]
pub struct LineStore {
    path: PathBuf,
}

impl LineStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<LoadReport, AppError> {
        load(&self.path)
    }
}

impl TaskSink for LineStore {
    fn save(&self, tasks: &TaskList) -> Result<(), AppError> {
        save(&self.path, tasks)
    }
}
