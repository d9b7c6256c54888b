use super::*;
use crate::core::actions::find_action;
use crossterm::event::{KeyCode, KeyModifiers};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// `Pics/`, `notes.txt`가 있는 Root로 앱 시작
fn make_test_app() -> (TempDir, App) {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("root");
    fs::create_dir_all(root.join("Pics")).unwrap();
    fs::write(root.join("notes.txt"), "hello").unwrap();

    let mut app = App::new_for_test(&root, temp.path().join("state.toml"));
    app.wait_idle();
    (temp, app)
}

fn root_of(temp: &TempDir) -> std::path::PathBuf {
    temp.path().join("root")
}

/// 일반 모드 키 입력
fn press(app: &mut App, code: KeyCode) {
    if let Some(action) = find_action(KeyModifiers::NONE, code) {
        app.execute_action(action);
    }
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.handle_dialog_key(KeyModifiers::NONE, KeyCode::Char(c));
    }
}

fn clear_input(app: &mut App) {
    app.handle_dialog_key(KeyModifiers::CONTROL, KeyCode::Char('u'));
}

fn select(app: &mut App, name: &str) {
    app.selected_index = app
        .entries()
        .position(name)
        .unwrap_or_else(|| panic!("{name} is not listed"));
}

fn error_hint(app: &App) -> Option<String> {
    match &app.dialog {
        Some(DialogKind::Error { hint, .. }) => hint.clone(),
        _ => None,
    }
}

#[test]
fn test_initial_listing_directories_first() {
    let (_temp, app) = make_test_app();
    assert_eq!(app.entries().names(), vec!["Pics", "notes.txt"]);
    assert!(app.state().is_at_root());
    assert!(!app.is_busy());
    assert_eq!(app.position(), Some((1, 2)));
}

#[test]
fn test_enter_and_go_back_focuses_left_directory() {
    let (temp, mut app) = make_test_app();
    let root = root_of(&temp);

    select(&mut app, "Pics");
    press(&mut app, KeyCode::Enter);
    app.wait_idle();
    assert_eq!(app.state().current(), root.join("Pics"));
    assert!(app.entries().is_empty());

    press(&mut app, KeyCode::Backspace);
    app.wait_idle();
    assert_eq!(app.state().current(), root);
    assert_eq!(app.selected_entry().map(|e| e.name.as_str()), Some("Pics"));
}

#[test]
fn test_go_up_at_root_is_clamped() {
    let (temp, mut app) = make_test_app();

    press(&mut app, KeyCode::Char('h'));
    app.wait_idle();
    assert_eq!(app.state().current(), root_of(&temp));
    assert_eq!(app.toast(), Some("Already at the root folder"));
}

#[test]
fn test_create_text_file_and_conflict() {
    let (temp, mut app) = make_test_app();

    press(&mut app, KeyCode::Char('n'));
    type_text(&mut app, "todo");
    app.handle_dialog_key(KeyModifiers::NONE, KeyCode::Enter);
    assert!(app.dialog.is_none());
    app.wait_idle();

    assert!(root_of(&temp).join("todo.txt").is_file());
    assert_eq!(app.selected_entry().map(|e| e.name.as_str()), Some("todo.txt"));
    assert_eq!(app.toast(), Some("Created todo.txt"));

    // 같은 이름 다시 만들기
    press(&mut app, KeyCode::Char('n'));
    type_text(&mut app, "todo");
    app.handle_dialog_key(KeyModifiers::NONE, KeyCode::Enter);
    app.wait_idle();

    assert!(matches!(
        &app.dialog,
        Some(DialogKind::Error { title, .. }) if title == "New file failed"
    ));
    assert_eq!(
        error_hint(&app).as_deref(),
        Some(crate::utils::error::ErrorCategory::NameConflict.hint())
    );
    assert_eq!(app.entries().len(), 3);
}

#[test]
fn test_create_folder() {
    let (temp, mut app) = make_test_app();

    press(&mut app, KeyCode::Char('a'));
    type_text(&mut app, "Backup");
    app.handle_dialog_key(KeyModifiers::NONE, KeyCode::Enter);
    app.wait_idle();

    assert!(root_of(&temp).join("Backup").is_dir());
    assert_eq!(app.entries().names(), vec!["Backup", "Pics", "notes.txt"]);
    assert_eq!(app.selected_entry().map(|e| e.name.as_str()), Some("Backup"));
}

#[test]
fn test_rename_and_invalid_name() {
    let (temp, mut app) = make_test_app();
    let root = root_of(&temp);

    select(&mut app, "notes.txt");
    press(&mut app, KeyCode::Char('r'));
    clear_input(&mut app);
    type_text(&mut app, "journal.txt");
    app.handle_dialog_key(KeyModifiers::NONE, KeyCode::Enter);
    app.wait_idle();

    assert!(root.join("journal.txt").is_file());
    assert!(!root.join("notes.txt").exists());
    assert_eq!(app.toast(), Some("Renamed to journal.txt"));

    select(&mut app, "journal.txt");
    press(&mut app, KeyCode::Char('r'));
    clear_input(&mut app);
    app.handle_dialog_key(KeyModifiers::NONE, KeyCode::Enter);
    app.wait_idle();

    assert_eq!(
        error_hint(&app).as_deref(),
        Some(crate::utils::error::ErrorCategory::InvalidName.hint())
    );
    assert!(root.join("journal.txt").is_file());
}

#[test]
fn test_copy_into_subfolder_keeps_current_directory() {
    let (temp, mut app) = make_test_app();
    let root = root_of(&temp);

    select(&mut app, "notes.txt");
    press(&mut app, KeyCode::Char('y'));
    clear_input(&mut app);
    type_text(&mut app, "Pics/notes.txt");
    app.handle_dialog_key(KeyModifiers::NONE, KeyCode::Enter);
    app.wait_idle();

    assert_eq!(fs::read_to_string(root.join("Pics/notes.txt")).unwrap(), "hello");
    assert_eq!(app.state().current(), root);
    assert_eq!(app.toast(), Some("Copied to Pics/notes.txt"));
    assert_eq!(app.entries().len(), 2);
}

#[test]
fn test_copy_rejects_parent_escape() {
    let (temp, mut app) = make_test_app();

    select(&mut app, "notes.txt");
    press(&mut app, KeyCode::Char('y'));
    clear_input(&mut app);
    type_text(&mut app, "../outside.txt");
    app.handle_dialog_key(KeyModifiers::NONE, KeyCode::Enter);

    assert!(matches!(app.dialog, Some(DialogKind::Error { .. })));
    assert!(!app.is_busy());
    assert!(!temp.path().join("outside.txt").exists());
}

#[test]
fn test_delete_requires_confirmation() {
    let (temp, mut app) = make_test_app();
    let root = root_of(&temp);

    select(&mut app, "Pics");
    press(&mut app, KeyCode::Char('d'));
    // 기본 선택은 Cancel
    app.handle_dialog_key(KeyModifiers::NONE, KeyCode::Enter);
    assert!(app.dialog.is_none());
    assert!(!app.is_busy());
    assert!(root.join("Pics").is_dir());

    press(&mut app, KeyCode::Char('d'));
    app.handle_dialog_key(KeyModifiers::NONE, KeyCode::Char('y'));
    app.wait_idle();

    assert!(!root.join("Pics").exists());
    assert_eq!(app.entries().names(), vec!["notes.txt"]);
    assert_eq!(app.toast(), Some("Deleted Pics"));
}

#[test]
fn test_second_change_blocked_while_pending() {
    let (_temp, mut app) = make_test_app();

    press(&mut app, KeyCode::Char('a'));
    type_text(&mut app, "One");
    app.handle_dialog_key(KeyModifiers::NONE, KeyCode::Enter);
    assert!(app.is_mutation_pending());

    // 결과를 받기 전에는 새 변경 다이얼로그가 열리지 않음
    press(&mut app, KeyCode::Char('n'));
    assert!(app.dialog.is_none());
    assert!(app
        .command_items()
        .iter()
        .any(|item| item.key == "d" && !item.enabled));

    app.wait_idle();
    assert!(!app.is_mutation_pending());
    press(&mut app, KeyCode::Char('n'));
    assert!(app.dialog.is_some());
}

#[test]
fn test_stale_listing_is_dropped() {
    let (temp, mut app) = make_test_app();

    // 들어가기 결과보다 나중에 제출한 새로고침이 이김
    select(&mut app, "Pics");
    press(&mut app, KeyCode::Enter);
    app.refresh();
    app.wait_idle();

    assert_eq!(app.state().current(), root_of(&temp));
    assert_eq!(app.entries().len(), 2);
}

#[test]
fn test_refresh_recovers_when_current_directory_vanishes() {
    let (temp, mut app) = make_test_app();
    let root = root_of(&temp);

    select(&mut app, "Pics");
    press(&mut app, KeyCode::Enter);
    app.wait_idle();
    fs::remove_dir(root.join("Pics")).unwrap();

    app.refresh();
    app.wait_idle();
    assert_eq!(app.state().current(), root);
    assert_eq!(app.toast(), Some("'Pics' is unavailable, moved up"));
}

#[cfg(unix)]
#[test]
fn test_open_file_reports_mime() {
    let (_temp, mut app) = make_test_app();

    select(&mut app, "notes.txt");
    press(&mut app, KeyCode::Enter);
    app.wait_idle();

    assert!(app.dialog.is_none());
    assert_eq!(app.toast(), Some("Opened notes.txt (text/plain)"));
}

#[test]
fn test_quit_saves_last_directory() {
    let (temp, mut app) = make_test_app();
    let root = root_of(&temp);

    select(&mut app, "Pics");
    press(&mut app, KeyCode::Enter);
    app.wait_idle();
    press(&mut app, KeyCode::Char('q'));
    assert!(app.should_quit);

    let saved = StateStore::at(temp.path().join("state.toml")).load().unwrap();
    assert_eq!(saved.last_directory.as_deref(), Some(Path::new(&root.join("Pics"))));
}

#[test]
fn test_cursor_moves_are_clamped() {
    let (_temp, mut app) = make_test_app();

    press(&mut app, KeyCode::Up);
    assert_eq!(app.selected_index, 0);
    press(&mut app, KeyCode::End);
    assert_eq!(app.selected_index, 1);
    press(&mut app, KeyCode::Down);
    assert_eq!(app.selected_index, 1);
    press(&mut app, KeyCode::PageUp);
    assert_eq!(app.selected_index, 0);
}

#[test]
fn test_help_dialog_scrolls_and_closes() {
    let (_temp, mut app) = make_test_app();

    press(&mut app, KeyCode::Char('?'));
    app.handle_dialog_key(KeyModifiers::NONE, KeyCode::Char('j'));
    assert!(matches!(
        app.dialog,
        Some(DialogKind::Help { scroll_offset: 1 })
    ));
    app.handle_dialog_key(KeyModifiers::NONE, KeyCode::Esc);
    assert!(app.dialog.is_none());
}
