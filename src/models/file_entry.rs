use std::path::PathBuf;
use std::time::SystemTime;

/// 엔트리 종류 (심볼릭 링크는 대상 기준으로 판단)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    /// 디렉토리
    Directory,
    /// 디렉토리가 아닌 모든 것
    File,
}

/// 디렉토리의 자식 한 개
#[derive(Debug, Clone, PartialEq)]
pub struct FileEntry {
    /// 파일/디렉토리 이름
    pub name: String,
    /// 전체 경로
    pub path: PathBuf,
    /// 종류
    pub file_type: FileType,
    /// 심볼릭 링크 여부
    pub is_symlink: bool,
    /// 바이트 단위 크기 (디렉토리는 0)
    pub size: u64,
    /// 수정 시간
    pub modified: SystemTime,
    /// 숨김 파일 여부
    pub is_hidden: bool,
}

impl FileEntry {
    pub fn new(
        name: String,
        path: PathBuf,
        file_type: FileType,
        size: u64,
        modified: SystemTime,
    ) -> Self {
        let is_hidden = name.starts_with('.');
        Self {
            name,
            path,
            file_type,
            is_symlink: false,
            size,
            modified,
            is_hidden,
        }
    }

    /// 심볼릭 링크 표시
    pub fn symlink(mut self, is_symlink: bool) -> Self {
        self.is_symlink = is_symlink;
        self
    }

    /// 디렉토리 여부 확인
    pub fn is_directory(&self) -> bool {
        self.file_type == FileType::Directory
    }

    /// 확장자 (소문자)
    pub fn extension(&self) -> Option<String> {
        self.path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
    }
}
