use super::file_entry::FileEntry;
use std::cmp::Ordering;

/// 한 디렉토리의 전체 자식 목록
///
/// 매 조회마다 새로 만들어지며 순서는 항상 같습니다:
/// 디렉토리 먼저, 그 다음 대소문자 무시 이름 오름차순, 같으면 원래 이름 순.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryList {
    entries: Vec<FileEntry>,
}

impl EntryList {
    /// 정렬된 목록 생성
    pub fn from_entries(mut entries: Vec<FileEntry>) -> Self {
        entries.sort_by(compare_entries);
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&FileEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FileEntry> {
        self.entries.iter()
    }

    /// 이름으로 찾기
    #[cfg(test)]
    pub fn find(&self, name: &str) -> Option<&FileEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// 이름의 인덱스
    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name)
    }

    /// 이름 목록 (목록 순서)
    #[cfg(test)]
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    /// (디렉토리 수, 파일 수)
    pub fn counts(&self) -> (usize, usize) {
        let dirs = self.entries.iter().filter(|e| e.is_directory()).count();
        (dirs, self.entries.len() - dirs)
    }
}

fn compare_entries(a: &FileEntry, b: &FileEntry) -> Ordering {
    b.is_directory()
        .cmp(&a.is_directory())
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        .then_with(|| a.name.cmp(&b.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::file_entry::FileType;
    use std::path::PathBuf;
    use std::time::SystemTime;

    fn entry(name: &str, file_type: FileType) -> FileEntry {
        FileEntry::new(
            name.to_string(),
            PathBuf::from("/tmp").join(name),
            file_type,
            0,
            SystemTime::now(),
        )
    }

    #[test]
    fn test_directories_first_then_case_insensitive() {
        let list = EntryList::from_entries(vec![
            entry("notes.txt", FileType::File),
            entry("b_dir", FileType::Directory),
            entry("Apple.txt", FileType::File),
            entry("A_dir", FileType::Directory),
            entry("apple.txt", FileType::File),
        ]);

        assert_eq!(
            list.names(),
            vec!["A_dir", "b_dir", "Apple.txt", "apple.txt", "notes.txt"]
        );
        assert_eq!(list.counts(), (2, 3));
        assert_eq!(list.position("notes.txt"), Some(4));
        assert!(list.find("missing").is_none());
    }

    #[test]
    fn test_empty_list() {
        let list = EntryList::default();
        assert!(list.is_empty());
        assert_eq!(list.counts(), (0, 0));
        assert!(list.get(0).is_none());
    }
}
