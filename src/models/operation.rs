//! 디렉토리 작업 모델
//!
//! Browser 작업의 입력(Mutation, Job)과 결과(Listing, Navigation, JobResult) 정의

use super::directory_state::DirectoryState;
use super::entry_list::EntryList;
use super::file_entry::FileEntry;
use crate::utils::error::PocketDirError;
use std::path::PathBuf;

/// 목록과 함께 전달되는 안내
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingNotice {
    /// 상위 이동이 Root에서 막힘
    AtRoot,
    /// 현재 디렉토리를 읽을 수 없어 조상으로 복구함
    Recovered { from: PathBuf },
}

/// 목록을 만드는 모든 작업의 결과
#[derive(Debug, Clone)]
pub struct Listing {
    pub state: DirectoryState,
    pub entries: EntryList,
    pub notice: Option<ListingNotice>,
}

/// 파일 내용 분류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentClass {
    /// `.txt`
    Text,
    /// 그 외 전부
    Generic,
}

impl ContentClass {
    /// 확장자로 분류 (대소문자 무시)
    pub fn from_extension(ext: Option<&str>) -> Self {
        match ext {
            Some(ext) if ext.eq_ignore_ascii_case("txt") => ContentClass::Text,
            _ => ContentClass::Generic,
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            ContentClass::Text => "text/plain",
            ContentClass::Generic => "image/*",
        }
    }
}

/// 외부 프로그램으로 넘길 열기 요청
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenRequest {
    /// 정규화된 절대 경로
    pub path: PathBuf,
    pub class: ContentClass,
}

impl OpenRequest {
    pub fn mime(&self) -> &'static str {
        self.class.mime()
    }
}

/// navigate_into 결과
#[derive(Debug, Clone)]
pub enum Navigation {
    /// 디렉토리로 들어감
    Entered(Listing),
    /// 파일을 열기 프로그램에 넘김 (상태 변화 없음)
    Opened(OpenRequest),
}

/// 파일 시스템 변경 작업
#[derive(Debug, Clone)]
pub enum Mutation {
    CreateDirectory { name: String },
    CreateFile { name: String },
    Rename { target: FileEntry, new_name: String },
    Copy {
        source: FileEntry,
        dest_dir: PathBuf,
        new_name: String,
    },
    Delete { target: FileEntry },
}

impl Mutation {
    pub fn action(&self) -> MutationAction {
        match self {
            Mutation::CreateDirectory { .. } => MutationAction::CreateDirectory,
            Mutation::CreateFile { .. } => MutationAction::CreateFile,
            Mutation::Rename { .. } => MutationAction::Rename,
            Mutation::Copy { .. } => MutationAction::Copy,
            Mutation::Delete { .. } => MutationAction::Delete,
        }
    }
}

/// 변경 작업 종류 (결과 메시지용)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationAction {
    CreateDirectory,
    CreateFile,
    Rename,
    Copy,
    Delete,
}

impl MutationAction {
    /// 에러 다이얼로그 제목에 쓰는 이름
    pub fn name(&self) -> &'static str {
        match self {
            MutationAction::CreateDirectory => "New folder",
            MutationAction::CreateFile => "New file",
            MutationAction::Rename => "Rename",
            MutationAction::Copy => "Copy",
            MutationAction::Delete => "Delete",
        }
    }

    /// 완료 토스트 동사
    pub fn past_tense(&self) -> &'static str {
        match self {
            MutationAction::CreateDirectory | MutationAction::CreateFile => "Created",
            MutationAction::Rename => "Renamed to",
            MutationAction::Copy => "Copied to",
            MutationAction::Delete => "Deleted",
        }
    }
}

/// 백그라운드 작업 단위
#[derive(Debug, Clone)]
pub enum Job {
    Refresh(DirectoryState),
    NavigateInto {
        state: DirectoryState,
        entry: FileEntry,
    },
    NavigateUp(DirectoryState),
    Mutate {
        state: DirectoryState,
        mutation: Mutation,
    },
    Open(FileEntry),
}

impl Job {
    pub fn kind(&self) -> JobKind {
        match self {
            Job::Refresh(_) => JobKind::Refresh,
            Job::NavigateInto { .. } => JobKind::NavigateInto,
            Job::NavigateUp(state) => JobKind::NavigateUp {
                from: state.current().to_path_buf(),
            },
            Job::Mutate { mutation, .. } => JobKind::Mutate(mutation.action()),
            Job::Open(_) => JobKind::Open,
        }
    }
}

/// 작업 종류 (결과 처리 분기용)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobKind {
    Refresh,
    NavigateInto,
    /// 떠나온 디렉토리 (결과 목록에서 포커스 대상)
    NavigateUp { from: PathBuf },
    Mutate(MutationAction),
    Open,
}

/// 작업 성공 결과
#[derive(Debug, Clone)]
pub enum JobOutput {
    Listing(Listing),
    /// 변경 후 새 목록과 영향 받은 이름 (현재 디렉토리에 생긴 경우)
    Mutated {
        listing: Listing,
        affected: Option<String>,
    },
    Opened(OpenRequest),
}

/// 워커가 UI로 돌려보내는 결과
#[derive(Debug)]
pub struct JobResult {
    /// 제출 순번
    pub ticket: u64,
    pub kind: JobKind,
    pub outcome: Result<JobOutput, PocketDirError>,
}
