use std::path::PathBuf;
use thiserror::Error;

/// Core library errors
///
/// 仅扫描根目录相关的失败是致命的,其余文件系统错误在内部吞掉。
#[derive(Error, Debug)]
pub enum ReclaimError {
    #[error("Directory does not exist: {0}")]
    RootNotFound(PathBuf),

    #[error("Not a directory: {0}")]
    RootNotADirectory(PathBuf),

    #[error("Failed to access '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to build worker pool: {0}")]
    WorkerPool(String),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ReclaimError>;
