use crate::models::file_entry::{FileEntry, FileType};
use crate::utils::error::{PocketDirError, Result};
use std::fs::{self, Metadata, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use tempfile::{Builder, NamedTempFile, TempDir};
use tracing::{debug, warn};

/// 복사 스테이징 임시 이름 접두어
const STAGING_PREFIX: &str = ".pocketdir-copy-";
/// 덮어쓸 기존 엔트리를 잠시 옮겨두는 임시 이름 접두어
const ASIDE_PREFIX: &str = ".pocketdir-old-";

/// 파일 시스템 모듈
///
/// 호스트 파일 시스템 호출을 감싸고 io::Error를 경로가 담긴 에러로 바꿉니다.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileSystem;

impl FileSystem {
    /// 새 파일 시스템 인스턴스 생성
    pub fn new() -> Self {
        Self
    }

    /// 디렉토리 읽기
    ///
    /// 읽을 수 없는 자식 엔트리는 건너뜁니다. 순서는 OS가 돌려준 그대로입니다.
    pub fn read_directory(&self, path: &Path) -> Result<Vec<FileEntry>> {
        let metadata =
            fs::metadata(path).map_err(|e| PocketDirError::from_io(e, path, PocketDirError::Io))?;
        if !metadata.is_dir() {
            return Err(PocketDirError::NotADirectory {
                path: path.to_path_buf(),
            });
        }

        let read_dir =
            fs::read_dir(path).map_err(|e| PocketDirError::from_io(e, path, PocketDirError::Io))?;

        let mut entries = Vec::new();
        for entry in read_dir {
            let Ok(entry) = entry else { continue };
            let entry_path = entry.path();

            // 링크 자체 메타데이터
            let Ok(link_metadata) = fs::symlink_metadata(&entry_path) else {
                continue;
            };
            let is_symlink = link_metadata.file_type().is_symlink();

            // 디렉토리 여부는 링크 대상 기준 (깨진 링크는 파일)
            let metadata = if is_symlink {
                fs::metadata(&entry_path).unwrap_or(link_metadata)
            } else {
                link_metadata
            };

            let name = entry.file_name().to_string_lossy().to_string();
            entries.push(build_entry(name, entry_path, &metadata).symlink(is_symlink));
        }

        Ok(entries)
    }

    /// 읽을 수 있는 디렉토리인지 확인
    #[allow(clippy::unused_self)]
    pub fn is_readable_dir(&self, path: &Path) -> bool {
        fs::read_dir(path).is_ok()
    }

    /// 새 디렉토리 생성
    #[allow(clippy::unused_self)]
    pub fn create_directory(&self, path: &Path) -> Result<()> {
        fs::create_dir(path).map_err(|e| PocketDirError::from_io(e, path, PocketDirError::Io))
    }

    /// 빈 파일 생성 (이미 있으면 FileExists)
    #[allow(clippy::unused_self)]
    pub fn create_file(&self, path: &Path) -> Result<()> {
        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map(|_| ())
            .map_err(|e| PocketDirError::from_io(e, path, PocketDirError::Io))
    }

    /// 파일/디렉토리 이름 변경
    #[allow(clippy::unused_self)]
    pub fn rename_path(&self, src: &Path, dest: &Path) -> Result<()> {
        let src_metadata = fs::symlink_metadata(src)
            .map_err(|e| PocketDirError::from_io(e, src, PocketDirError::Io))?;

        // 대소문자만 바뀌는 경우 대소문자 무시 파일 시스템에서는 dest가 src 자신
        if let Ok(dest_metadata) = fs::symlink_metadata(dest) {
            if !is_same_file(&src_metadata, &dest_metadata) {
                return Err(PocketDirError::FileExists {
                    path: dest.to_path_buf(),
                });
            }
        }

        fs::rename(src, dest).map_err(|e| {
            PocketDirError::from_io(e, src, |e| PocketDirError::RenameFailed {
                src: src.to_path_buf(),
                dest: dest.to_path_buf(),
                reason: e.to_string(),
            })
        })
    }

    /// 파일 또는 디렉토리 트리를 `dest`로 복사 (기존 엔트리는 교체)
    ///
    /// 대상 디렉토리 안의 임시 형제에 먼저 전부 복사한 뒤 제자리로 옮깁니다.
    /// 실패하면 스테이징은 지워지고 `dest`는 건드리지 않습니다.
    /// 반환값: 복사된 바이트 수
    pub fn copy_entry(&self, src: &Path, dest: &Path) -> Result<u64> {
        // 대상이 원본이거나 원본을 품고 있으면 교체가 원본을 지움
        if src.starts_with(dest) {
            return Err(PocketDirError::SameSourceAndDest {
                path: dest.to_path_buf(),
            });
        }

        let src_metadata = fs::symlink_metadata(src)
            .map_err(|e| PocketDirError::from_io(e, src, PocketDirError::Io))?;

        if src_metadata.is_dir() && dest.starts_with(src) {
            return Err(PocketDirError::RecursiveCopy {
                path: src.to_path_buf(),
            });
        }

        let dest_dir = dest.parent().ok_or_else(|| PocketDirError::CopyFailed {
            src: src.to_path_buf(),
            dest: dest.to_path_buf(),
            reason: "destination has no parent directory".to_string(),
        })?;
        let dest_dir_metadata = fs::metadata(dest_dir)
            .map_err(|e| PocketDirError::from_io(e, dest_dir, PocketDirError::Io))?;
        if !dest_dir_metadata.is_dir() {
            return Err(PocketDirError::NotADirectory {
                path: dest_dir.to_path_buf(),
            });
        }

        let copy_failed = |e: io::Error| PocketDirError::CopyFailed {
            src: src.to_path_buf(),
            dest: dest.to_path_buf(),
            reason: e.to_string(),
        };

        if src_metadata.file_type().is_symlink() {
            let staging = staging_dir(dest_dir, copy_failed)?;
            let staged = staging.path().join("link");
            let result = copy_symlink(src, &staged)
                .map_err(|e| PocketDirError::from_io(e, src, copy_failed))
                .and_then(|()| {
                    install(&staged, dest)
                        .map_err(|e| PocketDirError::from_io(e, dest, copy_failed))
                });
            if result.is_err() {
                remove_tree(staging.path());
            }
            return result.map(|()| 0);
        }

        if src_metadata.is_dir() {
            let staging = staging_dir(dest_dir, copy_failed)?;
            let staged = staging.path();
            // 권한은 트리를 다 복사한 뒤에 적용 (읽기 전용 디렉토리도 끝까지 채움)
            let mut permissions = Vec::new();
            let result = copy_tree(src, staged, &mut permissions)
                .map_err(|(path, e)| PocketDirError::from_io(e, &path, copy_failed))
                .and_then(|bytes| {
                    permissions.push((staged.to_path_buf(), src_metadata.permissions()));
                    apply_permissions(&permissions)
                        .map_err(|(path, e)| PocketDirError::from_io(e, &path, copy_failed))?;
                    install(staged, dest)
                        .map_err(|e| PocketDirError::from_io(e, dest, copy_failed))?;
                    Ok(bytes)
                });

            return match result {
                Ok(bytes) => {
                    debug!(src = %src.display(), dest = %dest.display(), bytes, "directory copied");
                    Ok(bytes)
                }
                Err(e) => {
                    remove_tree(staged);
                    Err(e)
                }
            };
        }

        let staged = NamedTempFile::new_in(dest_dir)
            .map_err(|e| PocketDirError::from_io(e, dest_dir, copy_failed))?
            .into_temp_path();
        let bytes =
            fs::copy(src, &staged).map_err(|e| PocketDirError::from_io(e, src, copy_failed))?;
        install(&staged, dest).map_err(|e| PocketDirError::from_io(e, dest, copy_failed))?;
        Ok(bytes)
    }

    /// 파일 삭제, 디렉토리는 재귀 삭제 (휴지통 없음)
    #[allow(clippy::unused_self)]
    pub fn delete_entry(&self, path: &Path) -> Result<()> {
        let metadata = fs::symlink_metadata(path)
            .map_err(|e| PocketDirError::from_io(e, path, PocketDirError::Io))?;

        let result = if metadata.is_dir() {
            fs::remove_dir_all(path)
        } else {
            fs::remove_file(path)
        };

        result.map_err(|e| {
            PocketDirError::from_io(e, path, |e| PocketDirError::DeleteFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
        })
    }

    /// 경로를 열기 요청용 절대 경로로 정규화
    #[allow(clippy::unused_self)]
    pub fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        fs::canonicalize(path).map_err(|e| PocketDirError::from_io(e, path, PocketDirError::Io))
    }
}

/// 새 이름 검증 (앞뒤 공백 제거 후 반환)
pub fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    let reason = if trimmed.is_empty() {
        Some("name is empty")
    } else if trimmed == "." || trimmed == ".." {
        Some("'.' and '..' are reserved")
    } else if trimmed.contains('/') || trimmed.contains(std::path::MAIN_SEPARATOR) {
        Some("name contains a path separator")
    } else if trimmed.contains('\0') {
        Some("name contains a NUL character")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(PocketDirError::InvalidName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(trimmed.to_string()),
    }
}

/// 텍스트 파일 이름 (`todo` -> `todo.txt`, `todo.TXT`는 그대로)
pub fn with_extension(name: &str, extension: &str) -> String {
    let extension = extension.trim_start_matches('.');
    if extension.is_empty() {
        return name.to_string();
    }

    let suffix = format!(".{}", extension);
    let has_suffix = name.len() > suffix.len()
        && name
            .get(name.len() - suffix.len()..)
            .is_some_and(|tail| tail.eq_ignore_ascii_case(&suffix));

    if has_suffix {
        name.to_string()
    } else {
        format!("{}{}", name, suffix)
    }
}

fn build_entry(name: String, path: PathBuf, metadata: &Metadata) -> FileEntry {
    let file_type = if metadata.is_dir() {
        FileType::Directory
    } else {
        FileType::File
    };
    let size = if metadata.is_dir() { 0 } else { metadata.len() };
    let modified = metadata
        .modified()
        .unwrap_or_else(|_| std::time::SystemTime::now());

    FileEntry::new(name, path, file_type, size, modified)
}

#[cfg(unix)]
fn is_same_file(a: &Metadata, b: &Metadata) -> bool {
    use std::os::unix::fs::MetadataExt;
    a.dev() == b.dev() && a.ino() == b.ino()
}

#[cfg(not(unix))]
fn is_same_file(_a: &Metadata, _b: &Metadata) -> bool {
    false
}

fn staging_dir(
    dest_dir: &Path,
    copy_failed: impl FnOnce(io::Error) -> PocketDirError,
) -> Result<TempDir> {
    Builder::new()
        .prefix(STAGING_PREFIX)
        .tempdir_in(dest_dir)
        .map_err(|e| PocketDirError::from_io(e, dest_dir, copy_failed))
}

/// 디렉토리 내용을 재귀 복사 (실패 시 실패한 경로와 에러 반환)
///
/// 복사한 하위 디렉토리의 원래 권한은 자식이 부모보다 먼저 오도록 `permissions`에 쌓입니다.
fn copy_tree(
    src: &Path,
    dst: &Path,
    permissions: &mut Vec<(PathBuf, fs::Permissions)>,
) -> std::result::Result<u64, (PathBuf, io::Error)> {
    let mut total = 0u64;
    let read_dir = fs::read_dir(src).map_err(|e| (src.to_path_buf(), e))?;

    for entry in read_dir {
        let entry = entry.map_err(|e| (src.to_path_buf(), e))?;
        let from = entry.path();
        let to = dst.join(entry.file_name());
        let metadata = fs::symlink_metadata(&from).map_err(|e| (from.clone(), e))?;

        if metadata.file_type().is_symlink() {
            copy_symlink(&from, &to).map_err(|e| (from.clone(), e))?;
        } else if metadata.is_dir() {
            fs::create_dir(&to).map_err(|e| (to.clone(), e))?;
            total += copy_tree(&from, &to, permissions)?;
            permissions.push((to, metadata.permissions()));
        } else {
            total += fs::copy(&from, &to).map_err(|e| (from.clone(), e))?;
        }
    }

    Ok(total)
}

#[cfg(unix)]
fn copy_symlink(src: &Path, dst: &Path) -> io::Result<()> {
    let target = fs::read_link(src)?;
    std::os::unix::fs::symlink(target, dst)
}

#[cfg(not(unix))]
fn copy_symlink(src: &Path, dst: &Path) -> io::Result<()> {
    if fs::metadata(src)?.is_dir() {
        fs::create_dir(dst)?;
        let mut permissions = Vec::new();
        copy_tree(src, dst, &mut permissions).map_err(|(_, e)| e)?;
        apply_permissions(&permissions).map_err(|(_, e)| e)
    } else {
        fs::copy(src, dst).map(|_| ())
    }
}

/// 쌓아 둔 디렉토리 권한을 순서대로 적용
fn apply_permissions(
    permissions: &[(PathBuf, fs::Permissions)],
) -> std::result::Result<(), (PathBuf, io::Error)> {
    for (path, mode) in permissions {
        fs::set_permissions(path, mode.clone()).map_err(|e| (path.clone(), e))?;
    }
    Ok(())
}

/// 임시 트리 삭제 (읽기 전용 디렉토리가 있어도)
///
/// 실패하면 경고만 남깁니다.
fn remove_tree(path: &Path) {
    make_writable(path);
    match fs::remove_dir_all(path) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!(path = %path.display(), error = %e, "failed to remove temporary copy"),
    }
}

/// 삭제할 수 있도록 트리 전체에 소유자 쓰기 권한 부여 (심볼릭 링크는 따라가지 않음)
fn make_writable(path: &Path) {
    let Ok(metadata) = fs::symlink_metadata(path) else {
        return;
    };
    if metadata.file_type().is_symlink() {
        return;
    }

    if let Err(e) = fs::set_permissions(path, writable(metadata.permissions())) {
        debug!(path = %path.display(), error = %e, "cannot make writable");
    }
    if metadata.is_dir() {
        if let Ok(read_dir) = fs::read_dir(path) {
            for entry in read_dir.flatten() {
                make_writable(&entry.path());
            }
        }
    }
}

#[cfg(unix)]
fn writable(mut permissions: fs::Permissions) -> fs::Permissions {
    use std::os::unix::fs::PermissionsExt;
    permissions.set_mode(permissions.mode() | 0o700);
    permissions
}

#[cfg(not(unix))]
#[allow(clippy::permissions_set_readonly_false)]
fn writable(mut permissions: fs::Permissions) -> fs::Permissions {
    permissions.set_readonly(false);
    permissions
}

/// 스테이징 결과를 제자리로 옮김
///
/// 파일을 파일 위로 옮길 때는 rename 한 번으로 교체합니다.
/// 디렉토리가 끼면 기존 엔트리를 임시 위치로 옮긴 뒤 교체하고,
/// 교체가 실패하면 기존 엔트리를 되돌립니다.
fn install(staged: &Path, dest: &Path) -> io::Result<()> {
    let existing = match fs::symlink_metadata(dest) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return fs::rename(staged, dest),
        Err(e) => return Err(e),
    };

    let staged_is_dir = fs::symlink_metadata(staged)?.is_dir();
    if !existing.is_dir() && !staged_is_dir {
        return fs::rename(staged, dest);
    }

    let dest_dir = dest.parent().unwrap_or_else(|| Path::new("."));
    // 자동 삭제하지 않음: 되돌리기에 실패하면 기존 엔트리를 남겨야 함
    let aside = Builder::new()
        .prefix(ASIDE_PREFIX)
        .keep(true)
        .tempdir_in(dest_dir)?;
    let old = aside.path().join("old");
    if let Err(e) = fs::rename(dest, &old) {
        remove_tree(aside.path());
        return Err(e);
    }

    if let Err(e) = fs::rename(staged, dest) {
        match fs::rename(&old, dest) {
            Ok(()) => remove_tree(aside.path()),
            Err(restore) => warn!(
                dest = %dest.display(),
                kept = %old.display(),
                error = %restore,
                "failed to restore replaced entry"
            ),
        }
        return Err(e);
    }

    remove_tree(aside.path());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(path: &Path, content: &str) {
        let mut file = File::create(path).unwrap();
        write!(file, "{}", content).unwrap();
    }

    fn leftovers(dir: &Path) -> Vec<String> {
        fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().to_string())
            .filter(|n| n.starts_with(STAGING_PREFIX) || n.starts_with(ASIDE_PREFIX))
            .collect()
    }

    #[test]
    fn test_read_directory_lists_all_children() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("Pics")).unwrap();
        write_file(&temp.path().join("notes.txt"), "hello");
        write_file(&temp.path().join(".hidden"), "");

        let fs_instance = FileSystem::new();
        let mut entries = fs_instance.read_directory(temp.path()).unwrap();
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec![".hidden", "Pics", "notes.txt"]);
        assert!(entries[0].is_hidden);
        assert!(entries[1].is_directory());
        assert_eq!(entries[2].size, 5);
    }

    #[test]
    fn test_read_nonexistent_directory() {
        let temp = TempDir::new().unwrap();
        let result = FileSystem::new().read_directory(&temp.path().join("missing"));
        match result {
            Err(PocketDirError::PathNotFound { .. }) => {}
            other => panic!("Expected PathNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_read_file_as_directory() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a.txt");
        write_file(&file, "");
        assert!(matches!(
            FileSystem::new().read_directory(&file),
            Err(PocketDirError::NotADirectory { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_read_directory_follows_symlinks_for_type() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("real")).unwrap();
        std::os::unix::fs::symlink(temp.path().join("real"), temp.path().join("link")).unwrap();
        std::os::unix::fs::symlink(temp.path().join("gone"), temp.path().join("broken")).unwrap();

        let entries = FileSystem::new().read_directory(temp.path()).unwrap();
        let link = entries.iter().find(|e| e.name == "link").unwrap();
        assert!(link.is_directory());
        assert!(link.is_symlink);

        let broken = entries.iter().find(|e| e.name == "broken").unwrap();
        assert!(!broken.is_directory());
        assert!(broken.is_symlink);
    }

    #[test]
    fn test_create_directory_and_conflict() {
        let temp = TempDir::new().unwrap();
        let fs_instance = FileSystem::new();
        let new_dir = temp.path().join("new_folder");

        fs_instance.create_directory(&new_dir).unwrap();
        assert!(new_dir.is_dir());

        match fs_instance.create_directory(&new_dir) {
            Err(PocketDirError::FileExists { .. }) => {}
            other => panic!("Expected FileExists error, got {:?}", other),
        }
    }

    #[test]
    fn test_create_file_is_exclusive() {
        let temp = TempDir::new().unwrap();
        let fs_instance = FileSystem::new();
        let path = temp.path().join("todo.txt");

        fs_instance.create_file(&path).unwrap();
        assert!(path.is_file());
        assert_eq!(fs::metadata(&path).unwrap().len(), 0);

        write_file(&path, "keep me");
        assert!(matches!(
            fs_instance.create_file(&path),
            Err(PocketDirError::FileExists { .. })
        ));
        assert_eq!(fs::read_to_string(&path).unwrap(), "keep me");
    }

    #[test]
    fn test_rename_path() {
        let temp = TempDir::new().unwrap();
        let fs_instance = FileSystem::new();
        let src = temp.path().join("old.txt");
        let dest = temp.path().join("new.txt");
        write_file(&src, "test");

        fs_instance.rename_path(&src, &dest).unwrap();
        assert!(!src.exists());
        assert_eq!(fs::read_to_string(&dest).unwrap(), "test");

        let other = temp.path().join("another.txt");
        write_file(&other, "");
        match fs_instance.rename_path(&other, &dest) {
            Err(PocketDirError::FileExists { .. }) => {}
            other => panic!("Expected FileExists error, got {:?}", other),
        }

        match fs_instance.rename_path(&temp.path().join("missing"), &temp.path().join("x")) {
            Err(PocketDirError::PathNotFound { .. }) => {}
            other => panic!("Expected PathNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_copy_file_replaces_existing() {
        let temp = TempDir::new().unwrap();
        let fs_instance = FileSystem::new();
        let src = temp.path().join("a.txt");
        let dest = temp.path().join("b.txt");
        write_file(&src, "new content");
        write_file(&dest, "old");

        let bytes = fs_instance.copy_entry(&src, &dest).unwrap();
        assert_eq!(bytes, 11);
        assert_eq!(fs::read_to_string(&dest).unwrap(), "new content");
        assert_eq!(fs::read_to_string(&src).unwrap(), "new content");
        assert!(leftovers(temp.path()).is_empty());
    }

    #[test]
    fn test_copy_directory_tree() {
        let temp = TempDir::new().unwrap();
        let fs_instance = FileSystem::new();
        let src = temp.path().join("src");
        fs::create_dir_all(src.join("nested/deeper")).unwrap();
        fs::create_dir(src.join("empty")).unwrap();
        write_file(&src.join("top.txt"), "top");
        write_file(&src.join("nested/deeper/leaf.txt"), "leaf");

        let dest = temp.path().join("copy");
        fs_instance.copy_entry(&src, &dest).unwrap();

        assert_eq!(fs::read_to_string(dest.join("top.txt")).unwrap(), "top");
        assert_eq!(
            fs::read_to_string(dest.join("nested/deeper/leaf.txt")).unwrap(),
            "leaf"
        );
        assert!(dest.join("empty").is_dir());
        assert!(src.join("top.txt").exists());
        assert!(leftovers(temp.path()).is_empty());
    }

    #[test]
    fn test_copy_directory_replaces_existing_directory() {
        let temp = TempDir::new().unwrap();
        let fs_instance = FileSystem::new();
        let src = temp.path().join("src");
        fs::create_dir(&src).unwrap();
        write_file(&src.join("fresh.txt"), "fresh");

        let dest = temp.path().join("dest");
        fs::create_dir(&dest).unwrap();
        write_file(&dest.join("stale.txt"), "stale");

        fs_instance.copy_entry(&src, &dest).unwrap();
        assert!(dest.join("fresh.txt").exists());
        assert!(!dest.join("stale.txt").exists());
        assert!(leftovers(temp.path()).is_empty());
    }

    #[test]
    fn test_copy_into_itself_is_rejected() {
        let temp = TempDir::new().unwrap();
        let fs_instance = FileSystem::new();
        let src = temp.path().join("src");
        fs::create_dir(&src).unwrap();

        assert!(matches!(
            fs_instance.copy_entry(&src, &src.join("inner")),
            Err(PocketDirError::RecursiveCopy { .. })
        ));
        assert!(matches!(
            fs_instance.copy_entry(&src, &src),
            Err(PocketDirError::SameSourceAndDest { .. })
        ));
        assert!(!src.join("inner").exists());
    }

    #[test]
    fn test_copy_missing_source() {
        let temp = TempDir::new().unwrap();
        let result = FileSystem::new()
            .copy_entry(&temp.path().join("gone"), &temp.path().join("copy"));
        assert!(matches!(result, Err(PocketDirError::PathNotFound { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_directory_copy_leaves_nothing_behind() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        fs::create_dir(&src).unwrap();
        write_file(&src.join("ok.txt"), "ok");
        // 소켓 파일은 열 수 없으므로 복사가 중간에 실패
        let _listener = std::os::unix::net::UnixListener::bind(src.join("sock")).unwrap();

        let dest = temp.path().join("copy");
        let result = FileSystem::new().copy_entry(&src, &dest);

        assert!(result.is_err());
        assert!(!dest.exists());
        assert!(leftovers(temp.path()).is_empty());
    }

    #[test]
    fn test_copy_onto_ancestor_of_source_is_rejected() {
        let temp = TempDir::new().unwrap();
        let parent = temp.path().join("a");
        let src = parent.join("b");
        fs::create_dir_all(&src).unwrap();
        write_file(&src.join("data.txt"), "data");
        write_file(&parent.join("sibling.txt"), "sibling");

        let result = FileSystem::new().copy_entry(&src, &parent);
        assert!(matches!(
            result,
            Err(PocketDirError::SameSourceAndDest { .. })
        ));
        assert_eq!(fs::read_to_string(src.join("data.txt")).unwrap(), "data");
        assert!(parent.join("sibling.txt").exists());
        assert!(leftovers(temp.path()).is_empty());
    }

    #[cfg(unix)]
    fn set_mode(path: &Path, mode: u32) {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(mode)).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_copy_with_read_only_folders_leaves_nothing_behind() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        fs::create_dir_all(src.join("locked/deeper")).unwrap();
        fs::create_dir(src.join("open")).unwrap();
        write_file(&src.join("locked/deeper/a.txt"), "a");
        write_file(&src.join("locked/b.txt"), "b");
        let _listener = std::os::unix::net::UnixListener::bind(src.join("open/sock")).unwrap();
        set_mode(&src.join("locked/deeper"), 0o555);
        set_mode(&src.join("locked"), 0o555);

        let dest = temp.path().join("copy");
        let result = FileSystem::new().copy_entry(&src, &dest);

        set_mode(&src.join("locked"), 0o755);
        set_mode(&src.join("locked/deeper"), 0o755);
        assert!(result.is_err());
        assert!(!dest.exists());
        assert!(leftovers(temp.path()).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_keeps_read_only_folders_and_replaces_them() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let fs_instance = FileSystem::new();
        let src = temp.path().join("src");
        fs::create_dir_all(src.join("locked")).unwrap();
        write_file(&src.join("locked/a.txt"), "a");
        set_mode(&src.join("locked"), 0o555);

        let dest = temp.path().join("copy");
        fs_instance.copy_entry(&src, &dest).unwrap();
        let mode = fs::metadata(dest.join("locked")).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o555);
        assert_eq!(fs::read_to_string(dest.join("locked/a.txt")).unwrap(), "a");

        // 읽기 전용 폴더가 있는 기존 사본을 다시 덮어써도 임시 폴더가 남지 않음
        set_mode(&src.join("locked"), 0o755);
        write_file(&src.join("fresh.txt"), "fresh");
        fs_instance.copy_entry(&src, &dest).unwrap();

        assert!(dest.join("fresh.txt").exists());
        assert!(leftovers(temp.path()).is_empty());
        set_mode(&dest.join("locked"), 0o755);
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_recreates_symlinks() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        fs::create_dir(&src).unwrap();
        write_file(&src.join("target.txt"), "t");
        std::os::unix::fs::symlink("target.txt", src.join("link.txt")).unwrap();

        let dest = temp.path().join("copy");
        FileSystem::new().copy_entry(&src, &dest).unwrap();

        let link = dest.join("link.txt");
        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_link(&link).unwrap(), PathBuf::from("target.txt"));
    }

    #[test]
    fn test_delete_entry() {
        let temp = TempDir::new().unwrap();
        let fs_instance = FileSystem::new();
        let dir = temp.path().join("dir");
        fs::create_dir_all(dir.join("a/b")).unwrap();
        write_file(&dir.join("a/b/c.txt"), "c");
        let file = temp.path().join("f.txt");
        write_file(&file, "");

        fs_instance.delete_entry(&dir).unwrap();
        fs_instance.delete_entry(&file).unwrap();
        assert!(!dir.exists());
        assert!(!file.exists());

        assert!(matches!(
            fs_instance.delete_entry(&file),
            Err(PocketDirError::PathNotFound { .. })
        ));
    }

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("  Pics ").unwrap(), "Pics");
        for bad in ["", "   ", ".", "..", "a/b", "nul\0"] {
            assert!(
                matches!(validate_name(bad), Err(PocketDirError::InvalidName { .. })),
                "{:?} should be rejected",
                bad
            );
        }
        assert_eq!(validate_name(".hidden").unwrap(), ".hidden");
    }

    #[test]
    fn test_with_extension() {
        assert_eq!(with_extension("todo", "txt"), "todo.txt");
        assert_eq!(with_extension("todo.txt", "txt"), "todo.txt");
        assert_eq!(with_extension("TODO.TXT", "txt"), "TODO.TXT");
        assert_eq!(with_extension("notes.md", ".txt"), "notes.md.txt");
        assert_eq!(with_extension(".txt", "txt"), ".txt.txt");
        assert_eq!(with_extension("raw", ""), "raw");
    }
}
