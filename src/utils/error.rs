use std::path::PathBuf;
use thiserror::Error;

/// 사용자에게 보여줄 에러 분류
///
/// 모든 분류는 복구 가능하며, 실패한 작업은 현재 디렉토리와 목록을 바꾸지 않습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 목록 조회 이후 파일/디렉토리가 사라짐
    NotFound,
    /// 권한 없음
    PermissionDenied,
    /// 생성/이름 변경 대상이 이미 존재
    NameConflict,
    /// 빈 이름 또는 사용할 수 없는 이름
    InvalidName,
    /// 파일을 열 수 있는 프로그램이 없음
    NoHandler,
    /// 그 외
    Other,
}

impl ErrorCategory {
    /// 에러 다이얼로그 하단 힌트
    pub fn hint(&self) -> &'static str {
        match self {
            ErrorCategory::NotFound => "The item may have been moved or deleted. Press Ctrl+R to refresh.",
            ErrorCategory::PermissionDenied => "Check read/write permission on the folder.",
            ErrorCategory::NameConflict => "Choose a name that is not already used in this folder.",
            ErrorCategory::InvalidName => "Names cannot be empty, '.', '..' or contain '/'.",
            ErrorCategory::NoHandler => "Set [open] text/generic in the config file.",
            ErrorCategory::Other => "Check available disk space and try again.",
        }
    }
}

#[derive(Error, Debug)]
pub enum PocketDirError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Path not found: {}", path.display())]
    PathNotFound { path: PathBuf },

    #[error("Not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("Not a file: {}", path.display())]
    NotAFile { path: PathBuf },

    #[error("Permission denied: {}", path.display())]
    PermissionDenied { path: PathBuf },

    #[error("Already exists: {}", path.display())]
    FileExists { path: PathBuf },

    #[error("Invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("No application can open {}: {reason}", path.display())]
    NoHandler { path: PathBuf, reason: String },

    #[error("Copy failed ({} -> {}): {reason}", src.display(), dest.display())]
    CopyFailed {
        src: PathBuf,
        dest: PathBuf,
        reason: String,
    },

    #[error("Cannot copy {} into itself", path.display())]
    RecursiveCopy { path: PathBuf },

    #[error("Destination is the source or contains it: {}", path.display())]
    SameSourceAndDest { path: PathBuf },

    #[error("Rename failed ({} -> {}): {reason}", src.display(), dest.display())]
    RenameFailed {
        src: PathBuf,
        dest: PathBuf,
        reason: String,
    },

    #[error("Delete failed ({}): {reason}", path.display())]
    DeleteFailed { path: PathBuf, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Background worker error: {0}")]
    Worker(String),
}

impl PocketDirError {
    /// 에러 분류 반환
    pub fn category(&self) -> ErrorCategory {
        match self {
            PocketDirError::PathNotFound { .. } => ErrorCategory::NotFound,
            PocketDirError::PermissionDenied { .. } => ErrorCategory::PermissionDenied,
            PocketDirError::FileExists { .. } | PocketDirError::SameSourceAndDest { .. } => {
                ErrorCategory::NameConflict
            }
            PocketDirError::InvalidName { .. } | PocketDirError::RecursiveCopy { .. } => {
                ErrorCategory::InvalidName
            }
            PocketDirError::NoHandler { .. } => ErrorCategory::NoHandler,
            PocketDirError::Io(e) => match e.kind() {
                std::io::ErrorKind::NotFound => ErrorCategory::NotFound,
                std::io::ErrorKind::PermissionDenied => ErrorCategory::PermissionDenied,
                std::io::ErrorKind::AlreadyExists => ErrorCategory::NameConflict,
                _ => ErrorCategory::Other,
            },
            _ => ErrorCategory::Other,
        }
    }

    /// io::Error를 경로 정보가 있는 에러로 변환
    ///
    /// NotFound / PermissionDenied / AlreadyExists는 분류가 드러나는 변형으로,
    /// 나머지는 `fallback`이 만든 변형으로 바꿉니다.
    pub fn from_io(
        e: std::io::Error,
        path: &std::path::Path,
        fallback: impl FnOnce(std::io::Error) -> PocketDirError,
    ) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => PocketDirError::PathNotFound {
                path: path.to_path_buf(),
            },
            std::io::ErrorKind::PermissionDenied => PocketDirError::PermissionDenied {
                path: path.to_path_buf(),
            },
            std::io::ErrorKind::AlreadyExists => PocketDirError::FileExists {
                path: path.to_path_buf(),
            },
            _ => fallback(e),
        }
    }
}

pub type Result<T> = std::result::Result<T, PocketDirError>;
