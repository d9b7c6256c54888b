mod app;
mod config;
mod core;
mod logging;
mod models;
mod system;
mod ui;
mod utils;

use anyhow::{Context, Result};
use app::App;
use config::{Config, StateStore};
use core::actions::{find_action, find_sequence_action, is_sequence_prefix};
use core::{Browser, Worker};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use models::DirectoryState;
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use std::io;
use std::path::Path;
use std::time::Duration;
use system::{AccessStatus, FileSystem, LocalStorageAccess, StorageAccess, SystemOpener};
use tracing::{info, warn};
use ui::{CommandBar, Dialog, DialogKind, LayoutMode, Panel, StatusBar, Theme, WarningScreen};

fn main() -> Result<()> {
    // 설정 오류는 기본값으로 시작한 뒤 다이얼로그로 알림
    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(format!("{:#}", e))),
    };

    let _log_guard = logging::init_tracing(&config.log_level);
    info!(version = env!("CARGO_PKG_VERSION"), "pocketdir starting");

    let theme = Theme::by_name(&config.theme).unwrap_or_else(|e| {
        warn!(error = %e, "falling back to dark theme");
        Theme::default()
    });

    let root = config.resolve_root();
    let access = LocalStorageAccess;
    let access_status = access.check(&root);
    let state_store = StateStore::from_env();
    let state = initial_state(&config, &root, &state_store, &access_status);
    info!(
        root = %root.display(),
        current = %state.current().display(),
        theme = theme.name,
        "resolved root"
    );

    let opener = SystemOpener::new(config.open.text.clone(), config.open.generic.clone());
    let browser = Browser::new(Box::new(opener), config.new_file_extension.clone());
    let worker = Worker::spawn(browser).context("failed to start background worker")?;

    let mut app = App::new(worker, state, theme, state_store);
    if let AccessStatus::Denied { reason } = &access_status {
        warn!(root = %root.display(), reason = %reason, "storage access denied");
        app.dialog = Some(DialogKind::message(
            "Storage access needed",
            format!("{}\n{}", reason, access.settings_hint(&root)),
        ));
    } else if let Some(error) = config_error {
        warn!(error = %error, "config ignored");
        app.dialog = Some(DialogKind::error(
            "Config file ignored",
            error,
            Some("Defaults are in use. Fix the file and restart.".to_string()),
        ));
    }

    // Setup terminal
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let mut terminal =
        Terminal::new(CrosstermBackend::new(stdout)).context("failed to create terminal")?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to show cursor")?;

    info!("pocketdir stopped");
    res
}

/// 시작 디렉토리: 저장된 마지막 디렉토리가 Root 안에서 읽을 수 있으면 그곳, 아니면 Root
fn initial_state(
    config: &Config,
    root: &Path,
    store: &StateStore,
    access: &AccessStatus,
) -> DirectoryState {
    let root_state = DirectoryState::new(root.to_path_buf());
    if !config.restore_last_directory || !access.is_granted() {
        return root_state;
    }

    let filesystem = FileSystem::new();
    match store.load().and_then(|saved| saved.last_directory) {
        Some(last) if root_state.contains(&last) && filesystem.is_readable_dir(&last) => {
            DirectoryState::starting_at(root.to_path_buf(), last)
        }
        Some(last) => {
            warn!(path = %last.display(), "saved directory unavailable, starting at root");
            root_state
        }
        None => root_state,
    }
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal
            .draw(|f| {
                let size = f.area();
                app.layout.update(size);

                match app.layout.mode() {
                    LayoutMode::TooSmall => {
                        let (width, height) = app.layout.terminal_size();
                        let warning = WarningScreen::new()
                            .current_size(width, height)
                            .theme(&app.theme);
                        f.render_widget(warning, size);
                    }
                    LayoutMode::Normal => render_main_ui(f, app),
                }
            })
            .context("failed to draw")?;

        // 작업 중에는 스피너를 위해 짧게
        let poll_timeout = if app.is_busy() || app.pending_key.is_some() {
            Duration::from_millis(50)
        } else {
            Duration::from_millis(200)
        };

        if event::poll(poll_timeout).context("failed to poll events")? {
            if let Event::Key(key) = event::read().context("failed to read event")? {
                if key.kind == KeyEventKind::Press {
                    if app.is_dialog_active() {
                        app.handle_dialog_key(key.modifiers, key.code);
                    } else {
                        handle_normal_keys(app, key.modifiers, key.code);
                    }
                }
            }
        }

        app.poll_worker();
        app.on_tick();

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// 일반 모드 키 처리 (액션 레지스트리 기반)
fn handle_normal_keys(app: &mut App, modifiers: KeyModifiers, code: KeyCode) {
    // 1) pending 키 시퀀스 처리 (gg)
    if let Some(pending) = app.pending_key {
        app.clear_pending_key();
        if let KeyCode::Char(c) = code {
            if let Some(action) = find_sequence_action(pending, c) {
                app.execute_action(action);
                return;
            }
        }
    }

    // 2) 시퀀스 시작 키
    if let (KeyModifiers::NONE, KeyCode::Char(c)) = (modifiers, code) {
        if is_sequence_prefix(c) {
            app.set_pending_key(c);
            return;
        }
    }

    // 3) 테이블 조회 → 액션 실행
    if let Some(action) = find_action(modifiers, code) {
        app.execute_action(action);
    }
}

fn render_main_ui(f: &mut Frame<'_>, app: &mut App) {
    let areas = *app.layout.areas();
    app.adjust_scroll();

    let panel = Panel::new(app.state().current(), app.entries())
        .selected_index(app.selected_index)
        .scroll_offset(app.scroll_offset)
        .theme(&app.theme);
    f.render_widget(panel, areas.panel);

    let (dirs, files) = app.entries().counts();
    let status = StatusBar::new()
        .counts(dirs, files)
        .position(app.position())
        .busy(app.busy_frame())
        .toast(app.toast())
        .theme(&app.theme);
    f.render_widget(status, areas.status_bar);

    let command_bar = CommandBar::new()
        .commands(app.command_items())
        .theme(&app.theme);
    f.render_widget(command_bar, areas.command_bar);

    if let Some(dialog) = &app.dialog {
        f.render_widget(Dialog::new(dialog).theme(&app.theme), f.area());
    }
}
