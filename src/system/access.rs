//! 저장소 접근 권한 확인

use std::fs;
use std::path::Path;

/// 권한 확인 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessStatus {
    Granted,
    Denied { reason: String },
}

impl AccessStatus {
    pub fn is_granted(&self) -> bool {
        matches!(self, AccessStatus::Granted)
    }
}

/// 첫 목록 조회 전에 호출되는 권한 위임 대상
pub trait StorageAccess {
    fn check(&self, root: &Path) -> AccessStatus;

    /// 사용자가 권한을 고칠 수 있는 방법 안내
    fn settings_hint(&self, root: &Path) -> String;
}

/// 로컬 파일 시스템 권한 확인
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageAccess;

impl StorageAccess for LocalStorageAccess {
    fn check(&self, root: &Path) -> AccessStatus {
        let metadata = match fs::metadata(root) {
            Ok(metadata) => metadata,
            Err(e) => {
                return AccessStatus::Denied {
                    reason: format!("{}: {}", root.display(), e),
                }
            }
        };

        if !metadata.is_dir() {
            return AccessStatus::Denied {
                reason: format!("{} is not a directory", root.display()),
            };
        }

        if let Err(e) = fs::read_dir(root) {
            return AccessStatus::Denied {
                reason: format!("cannot list {}: {}", root.display(), e),
            };
        }

        if metadata.permissions().readonly() {
            return AccessStatus::Denied {
                reason: format!("{} is read-only", root.display()),
            };
        }

        AccessStatus::Granted
    }

    fn settings_hint(&self, root: &Path) -> String {
        if cfg!(windows) {
            format!(
                "Grant access in the folder's Properties > Security tab: {}",
                root.display()
            )
        } else if cfg!(target_os = "macos") {
            format!(
                "Allow Files and Folders access for this terminal in System Settings > Privacy & Security, or run: chmod u+rwx \"{}\"",
                root.display()
            )
        } else {
            format!(
                "Run: chmod u+rwx \"{}\" (or set `root` in the config file)",
                root.display()
            )
        }
    }
}
