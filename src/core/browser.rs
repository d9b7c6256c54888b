//! 디렉토리 브라우저
//!
//! 현재 디렉토리 상태를 값으로 받아 파일 시스템 작업을 수행하고,
//! 성공하면 현재 디렉토리를 다시 조회한 결과를 돌려줍니다.
//! 실패한 작업은 상태를 바꾸지 않습니다.

use crate::models::{
    ContentClass, DirectoryState, EntryList, FileEntry, Job, JobOutput, Listing, ListingNotice,
    Mutation, Navigation, OpenRequest,
};
use crate::system::filesystem::{validate_name, with_extension};
use crate::system::{FileSystem, Opener};
use crate::utils::error::{PocketDirError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub struct Browser {
    filesystem: FileSystem,
    opener: Box<dyn Opener>,
    text_extension: String,
}

impl Browser {
    pub fn new(opener: Box<dyn Opener>, text_extension: impl Into<String>) -> Self {
        Self {
            filesystem: FileSystem::new(),
            opener,
            text_extension: text_extension.into(),
        }
    }

    // === 조회/이동 ===

    /// 디렉토리의 자식 목록
    ///
    /// 없거나 읽을 수 없으면 빈 목록입니다. 에러를 내지 않습니다.
    pub fn list(&self, directory: &Path) -> EntryList {
        match self.filesystem.read_directory(directory) {
            Ok(entries) => EntryList::from_entries(entries),
            Err(e) => {
                warn!(path = %directory.display(), error = %e, "listing failed");
                EntryList::default()
            }
        }
    }

    /// 엔트리로 들어가기 (파일이면 열기)
    pub fn navigate_into(&self, state: &DirectoryState, entry: &FileEntry) -> Result<Navigation> {
        if !entry.is_directory() {
            return self.open(entry).map(Navigation::Opened);
        }

        if !state.contains(&entry.path) {
            return Err(PocketDirError::PermissionDenied {
                path: entry.path.clone(),
            });
        }

        let entries = self.filesystem.read_directory(&entry.path)?;
        info!(path = %entry.path.display(), "entered directory");

        Ok(Navigation::Entered(Listing {
            state: state.with_current(entry.path.clone()),
            entries: EntryList::from_entries(entries),
            notice: None,
        }))
    }

    /// 상위 디렉토리로 이동 (Root에서는 고정)
    pub fn navigate_up(&self, state: &DirectoryState) -> Listing {
        let Some(parent) = state.parent() else {
            debug!(path = %state.current().display(), "navigate up clamped at root");
            return Listing {
                state: state.clone(),
                entries: self.list(state.current()),
                notice: Some(ListingNotice::AtRoot),
            };
        };

        if self.filesystem.is_readable_dir(&parent) {
            info!(path = %parent.display(), "moved up");
            return self.listing(state.with_current(parent), None);
        }

        warn!(path = %parent.display(), "parent is not readable, falling back");
        let target = self.nearest_readable_ancestor(&state.with_current(parent.clone()));
        self.listing(
            state.with_current(target),
            Some(ListingNotice::Recovered { from: parent }),
        )
    }

    /// 현재 디렉토리 다시 조회
    ///
    /// 현재 디렉토리가 사라졌거나 읽을 수 없으면 가장 가까운 읽을 수 있는 조상으로 복구합니다.
    pub fn refresh(&self, state: &DirectoryState) -> Listing {
        if self.filesystem.is_readable_dir(state.current()) {
            return self.listing(state.clone(), None);
        }

        let from = state.current().to_path_buf();
        let target = self.nearest_readable_ancestor(state);
        warn!(from = %from.display(), to = %target.display(), "current directory lost, recovered");
        self.listing(
            state.with_current(target),
            Some(ListingNotice::Recovered { from }),
        )
    }

    // === 변경 작업 ===

    /// 새 폴더
    pub fn create_directory(&self, state: &DirectoryState, name: &str) -> Result<Listing> {
        let name = validate_name(name)?;
        let path = state.current().join(&name);
        self.filesystem.create_directory(&path)?;
        info!(path = %path.display(), "directory created");
        Ok(self.refresh(state))
    }

    /// 새 빈 텍스트 파일 (확장자 자동 추가)
    pub fn create_file(&self, state: &DirectoryState, name: &str) -> Result<Listing> {
        let file_name = self.text_file_name(name)?;
        let path = state.current().join(&file_name);
        self.filesystem.create_file(&path)?;
        info!(path = %path.display(), "file created");
        Ok(self.refresh(state))
    }

    /// 같은 부모 디렉토리 안에서 이름 변경
    pub fn rename(
        &self,
        state: &DirectoryState,
        entry: &FileEntry,
        new_name: &str,
    ) -> Result<Listing> {
        let new_name = validate_name(new_name)?;
        if new_name == entry.name {
            return Err(PocketDirError::FileExists {
                path: entry.path.clone(),
            });
        }

        let parent = entry
            .path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| state.current().to_path_buf());
        let dest = parent.join(&new_name);

        self.filesystem.rename_path(&entry.path, &dest)?;
        info!(from = %entry.path.display(), to = %dest.display(), "renamed");
        Ok(self.refresh(state))
    }

    /// 파일/디렉토리를 `dest_dir/new_name`으로 복사 (같은 이름은 교체)
    pub fn copy(
        &self,
        state: &DirectoryState,
        entry: &FileEntry,
        dest_dir: &Path,
        new_name: &str,
    ) -> Result<Listing> {
        let new_name = validate_name(new_name)?;
        if !state.contains(dest_dir) {
            return Err(PocketDirError::InvalidName {
                name: dest_dir.display().to_string(),
                reason: "destination is outside the root folder",
            });
        }

        let dest = dest_dir.join(&new_name);
        let bytes = self.filesystem.copy_entry(&entry.path, &dest)?;
        info!(from = %entry.path.display(), to = %dest.display(), bytes, "copied");
        Ok(self.refresh(state))
    }

    /// 삭제 (디렉토리는 재귀)
    pub fn delete(&self, state: &DirectoryState, entry: &FileEntry) -> Result<Listing> {
        self.filesystem.delete_entry(&entry.path)?;
        info!(path = %entry.path.display(), "deleted");
        Ok(self.refresh(state))
    }

    /// 변경 작업 실행
    pub fn apply(&self, state: &DirectoryState, mutation: &Mutation) -> Result<Listing> {
        match mutation {
            Mutation::CreateDirectory { name } => self.create_directory(state, name),
            Mutation::CreateFile { name } => self.create_file(state, name),
            Mutation::Rename { target, new_name } => self.rename(state, target, new_name),
            Mutation::Copy {
                source,
                dest_dir,
                new_name,
            } => self.copy(state, source, dest_dir, new_name),
            Mutation::Delete { target } => self.delete(state, target),
        }
    }

    // === 열기 ===

    /// 파일을 외부 프로그램에 넘김
    pub fn open(&self, entry: &FileEntry) -> Result<OpenRequest> {
        if entry.is_directory() {
            return Err(PocketDirError::NotAFile {
                path: entry.path.clone(),
            });
        }

        let path = self.filesystem.canonicalize(&entry.path)?;
        let class = ContentClass::from_extension(entry.extension().as_deref());
        let request = OpenRequest { path, class };

        self.opener.open(&request)?;
        info!(path = %request.path.display(), mime = request.mime(), "opened");
        Ok(request)
    }

    // === 워커 진입점 ===

    /// 워커 작업 하나 실행
    pub fn execute(&self, job: Job) -> Result<JobOutput> {
        debug!(kind = ?job.kind(), "executing job");
        match job {
            Job::Refresh(state) => Ok(JobOutput::Listing(self.refresh(&state))),
            Job::NavigateInto { state, entry } => match self.navigate_into(&state, &entry)? {
                Navigation::Entered(listing) => Ok(JobOutput::Listing(listing)),
                Navigation::Opened(request) => Ok(JobOutput::Opened(request)),
            },
            Job::NavigateUp(state) => Ok(JobOutput::Listing(self.navigate_up(&state))),
            Job::Mutate { state, mutation } => {
                let listing = self.apply(&state, &mutation)?;
                let affected = self.affected_name(&state, &mutation);
                Ok(JobOutput::Mutated { listing, affected })
            }
            Job::Open(entry) => self.open(&entry).map(JobOutput::Opened),
        }
    }

    /// 새 텍스트 파일의 최종 이름
    pub fn text_file_name(&self, name: &str) -> Result<String> {
        let name = validate_name(name)?;
        Ok(with_extension(&name, &self.text_extension))
    }

    /// 변경 후 현재 디렉토리에 보이는 이름 (포커스용)
    fn affected_name(&self, state: &DirectoryState, mutation: &Mutation) -> Option<String> {
        match mutation {
            Mutation::CreateDirectory { name } => Some(name.trim().to_string()),
            Mutation::CreateFile { name } => self.text_file_name(name).ok(),
            Mutation::Rename { new_name, .. } => Some(new_name.trim().to_string()),
            Mutation::Copy {
                dest_dir, new_name, ..
            } => (dest_dir.as_path() == state.current()).then(|| new_name.trim().to_string()),
            Mutation::Delete { .. } => None,
        }
    }

    fn listing(&self, state: DirectoryState, notice: Option<ListingNotice>) -> Listing {
        let entries = self.list(state.current());
        Listing {
            state,
            entries,
            notice,
        }
    }

    /// 현재 디렉토리의 조상 중 가장 가까운 읽을 수 있는 것 (없으면 Root)
    fn nearest_readable_ancestor(&self, state: &DirectoryState) -> PathBuf {
        state
            .ancestors()
            .into_iter()
            .find(|dir| self.filesystem.is_readable_dir(dir))
            .unwrap_or_else(|| state.root().to_path_buf())
    }
}
