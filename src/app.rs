use crate::config::{PersistedState, StateStore};
use crate::core::actions::{generate_command_bar_items, Action};
use crate::core::Worker;
use crate::models::{DirectoryState, EntryList, FileEntry, Job};
use crate::ui::components::CommandItem;
use crate::ui::{DialogKind, LayoutManager, Theme};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

mod dialogs;
mod navigation;
mod operations;

#[cfg(test)]
mod tests;

/// 토스트 표시 시간
const TOAST_DURATION: Duration = Duration::from_secs(3);
/// `g` 다음 키를 기다리는 시간
const PENDING_KEY_TIMEOUT: Duration = Duration::from_millis(800);

/// 진행 중인 변경 작업
#[derive(Debug, Clone)]
struct PendingMutation {
    ticket: u64,
    /// 완료 토스트에 쓸 이름 (삭제 대상 등)
    subject: String,
}

/// 앱 상태
pub struct App {
    /// 종료 플래그
    pub should_quit: bool,
    /// 레이아웃 매니저
    pub layout: LayoutManager,
    pub theme: Theme,
    /// Root와 현재 디렉토리
    state: DirectoryState,
    /// 현재 디렉토리 목록 (마지막으로 적용된 결과)
    entries: EntryList,
    pub selected_index: usize,
    pub scroll_offset: usize,
    worker: Worker,
    /// 현재 표시 중인 다이얼로그
    pub dialog: Option<DialogKind>,
    /// 대기 중인 키 (예: 'g' for 'gg')
    pub pending_key: Option<char>,
    pending_key_time: Option<Instant>,
    /// 토스트 메시지 (3초 후 자동 소멸)
    toast_message: Option<(String, Instant)>,
    /// 가장 최근에 제출한 목록 작업 번호 (이보다 오래된 목록은 버림)
    latest_listing_ticket: u64,
    pending_mutation: Option<PendingMutation>,
    /// 스피너 프레임
    tick: usize,
    state_store: StateStore,
}

impl App {
    /// 워커에 첫 목록 조회를 맡기고 시작
    pub fn new(worker: Worker, state: DirectoryState, theme: Theme, state_store: StateStore) -> Self {
        let mut app = Self {
            should_quit: false,
            layout: LayoutManager::new(),
            theme,
            state,
            entries: EntryList::default(),
            selected_index: 0,
            scroll_offset: 0,
            worker,
            dialog: None,
            pending_key: None,
            pending_key_time: None,
            toast_message: None,
            latest_listing_ticket: 0,
            pending_mutation: None,
            tick: 0,
            state_store,
        };
        app.refresh();
        app
    }

    #[cfg(test)]
    pub(crate) fn new_for_test(root: &std::path::Path, state_file: std::path::PathBuf) -> Self {
        use crate::core::Browser;
        use crate::system::SystemOpener;

        let opener = SystemOpener::new(Some("true".to_string()), Some("true".to_string()));
        let browser = Browser::new(Box::new(opener), "txt");
        let worker = Worker::spawn(browser).expect("worker should start");
        Self::new(
            worker,
            DirectoryState::new(root.to_path_buf()),
            Theme::default(),
            StateStore::at(state_file),
        )
    }

    // === 조회 ===

    pub fn state(&self) -> &DirectoryState {
        &self.state
    }

    pub fn entries(&self) -> &EntryList {
        &self.entries
    }

    pub fn selected_entry(&self) -> Option<&FileEntry> {
        self.entries.get(self.selected_index)
    }

    /// 결과를 기다리는 작업이 있는지
    pub fn is_busy(&self) -> bool {
        self.worker.is_busy()
    }

    pub fn is_mutation_pending(&self) -> bool {
        self.pending_mutation.is_some()
    }

    pub fn is_dialog_active(&self) -> bool {
        self.dialog.is_some()
    }

    /// 작업 중 표시 프레임
    pub fn busy_frame(&self) -> Option<usize> {
        self.is_busy().then_some(self.tick)
    }

    /// 커서 위치 (1부터, 전체)
    pub fn position(&self) -> Option<(usize, usize)> {
        (!self.entries.is_empty()).then(|| (self.selected_index + 1, self.entries.len()))
    }

    /// 커맨드바 항목 (변경 작업 중에는 파일 작업 키 비활성)
    pub fn command_items(&self) -> Vec<CommandItem> {
        let busy = self.is_mutation_pending();
        generate_command_bar_items(|action| !(busy && action.is_mutation()))
    }

    // === 액션 ===

    /// 액션 실행 (단일 진실 원천)
    pub fn execute_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.quit(),
            Action::MoveDown => self.move_selection_down(),
            Action::MoveUp => self.move_selection_up(),
            Action::GoToParent => self.go_to_parent(),
            Action::EnterSelected => self.enter_selected(),
            Action::GoToTop => self.go_to_top(),
            Action::GoToBottom => self.go_to_bottom(),
            Action::PageUp => self.move_selection_page_up(),
            Action::PageDown => self.move_selection_page_down(),
            Action::MakeDirectory => self.show_new_folder_dialog(),
            Action::NewTextFile => self.show_new_file_dialog(),
            Action::Rename => self.show_rename_dialog(),
            Action::Copy => self.show_copy_dialog(),
            Action::Delete => self.show_delete_dialog(),
            Action::Refresh => self.refresh(),
            Action::ShowHelp => self.dialog = Some(DialogKind::help()),
        }
    }

    /// 현재 디렉토리 다시 조회
    pub fn refresh(&mut self) {
        self.submit_listing(Job::Refresh(self.state.clone()));
    }

    /// 종료 (마지막 디렉토리 저장)
    pub fn quit(&mut self) {
        let persisted = PersistedState::new(Some(self.state.current().to_path_buf()));
        if let Err(e) = self.state_store.save(&persisted) {
            warn!(error = %e, "failed to save state");
        }
        self.should_quit = true;
    }

    // === 메인 루프 보조 ===

    /// 도착한 워커 결과를 모두 적용 (블로킹하지 않음)
    pub fn poll_worker(&mut self) {
        while let Some(result) = self.worker.try_recv() {
            self.apply_result(result);
        }
    }

    /// 틱마다 호출: 스피너, 토스트/대기 키 만료
    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);

        if self
            .toast_message
            .as_ref()
            .is_some_and(|(_, at)| at.elapsed() >= TOAST_DURATION)
        {
            self.toast_message = None;
        }

        if self
            .pending_key_time
            .is_some_and(|at| at.elapsed() >= PENDING_KEY_TIMEOUT)
        {
            self.clear_pending_key();
        }
    }

    /// 보이는 토스트 메시지
    pub fn toast(&self) -> Option<&str> {
        self.toast_message
            .as_ref()
            .filter(|(_, at)| at.elapsed() < TOAST_DURATION)
            .map(|(message, _)| message.as_str())
    }

    pub fn set_toast(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!(toast = %message, "toast");
        self.toast_message = Some((message, Instant::now()));
    }

    pub fn set_pending_key(&mut self, key: char) {
        self.pending_key = Some(key);
        self.pending_key_time = Some(Instant::now());
    }

    pub fn clear_pending_key(&mut self) {
        self.pending_key = None;
        self.pending_key_time = None;
    }

    pub fn close_dialog(&mut self) {
        self.dialog = None;
    }

    /// 다이얼로그 없이 워커 결과만 기다림 (테스트용)
    #[cfg(test)]
    pub(crate) fn wait_idle(&mut self) {
        let deadline = Instant::now() + Duration::from_secs(10);
        while self.is_busy() && Instant::now() < deadline {
            if let Some(result) = self.worker.recv_timeout(Duration::from_millis(100)) {
                self.apply_result(result);
            }
        }
    }
}
