use std::path::{Component, Path, PathBuf};

/// 현재 디렉토리와 그 상한(Root)
///
/// App이 값으로 소유하며 모든 Browser 작업에 명시적으로 전달됩니다.
/// `current`는 마지막으로 성공한 목록 조회 시점에 읽을 수 있던 디렉토리입니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryState {
    root: PathBuf,
    current: PathBuf,
}

impl DirectoryState {
    /// Root에서 시작하는 상태
    pub fn new(root: PathBuf) -> Self {
        Self {
            current: root.clone(),
            root,
        }
    }

    /// 저장된 디렉토리에서 시작 (Root 밖이면 Root)
    pub fn starting_at(root: PathBuf, current: PathBuf) -> Self {
        let mut state = Self::new(root);
        if state.contains(&current) {
            state.current = current;
        }
        state
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn current(&self) -> &Path {
        &self.current
    }

    /// Root에 있는지 여부
    pub fn is_at_root(&self) -> bool {
        self.current == self.root
    }

    /// 경로가 Root 안(또는 Root 자신)인지 여부
    ///
    /// `..` 구간이 있는 경로는 Root 밖으로 간주합니다.
    pub fn contains(&self, path: &Path) -> bool {
        if path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::CurDir))
        {
            return false;
        }
        path.starts_with(&self.root)
    }

    /// 같은 Root에서 다른 디렉토리를 가리키는 상태
    ///
    /// Root 밖의 경로는 Root로 고정됩니다.
    pub fn with_current(&self, current: PathBuf) -> Self {
        Self::starting_at(self.root.clone(), current)
    }

    /// 현재 디렉토리의 부모 (Root이거나 Root 밖이면 None)
    pub fn parent(&self) -> Option<PathBuf> {
        if self.is_at_root() {
            return None;
        }
        self.current
            .parent()
            .filter(|p| self.contains(p))
            .map(Path::to_path_buf)
    }

    /// 현재 디렉토리에서 Root까지의 조상 목록 (가까운 순, Root 포함)
    pub fn ancestors(&self) -> Vec<PathBuf> {
        self.current
            .ancestors()
            .skip(1)
            .take_while(|p| self.contains(p))
            .map(Path::to_path_buf)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_starts_at_root() {
        let state = DirectoryState::new(PathBuf::from("/data/root"));
        assert!(state.is_at_root());
        assert_eq!(state.current(), Path::new("/data/root"));
        assert_eq!(state.parent(), None);
    }

    #[test]
    fn test_with_current_clamps_outside_root() {
        let state = DirectoryState::new(PathBuf::from("/data/root"));

        let inside = state.with_current(PathBuf::from("/data/root/pics"));
        assert_eq!(inside.current(), Path::new("/data/root/pics"));
        assert_eq!(inside.parent(), Some(PathBuf::from("/data/root")));

        let outside = state.with_current(PathBuf::from("/data"));
        assert!(outside.is_at_root());

        let sneaky = state.with_current(PathBuf::from("/data/root/../other"));
        assert!(sneaky.is_at_root());
    }

    #[test]
    fn test_contains_is_component_based() {
        let state = DirectoryState::new(PathBuf::from("/data/root"));
        assert!(state.contains(Path::new("/data/root")));
        assert!(state.contains(Path::new("/data/root/a/b")));
        assert!(!state.contains(Path::new("/data/rootless")));
    }

    #[test]
    fn test_ancestors_stop_at_root() {
        let state = DirectoryState::new(PathBuf::from("/data/root"))
            .with_current(PathBuf::from("/data/root/a/b"));
        assert_eq!(
            state.ancestors(),
            vec![PathBuf::from("/data/root/a"), PathBuf::from("/data/root")]
        );
    }
}
