use super::*;
use crate::models::Mutation;
use crate::ui::InputPurpose;
use crate::utils::error::{PocketDirError, Result};
use crossterm::event::{KeyCode, KeyModifiers};
use std::path::{Component, Path, PathBuf};

impl App {
    // === 다이얼로그 열기 ===

    pub fn show_new_folder_dialog(&mut self) {
        if self.block_if_mutation_pending() {
            return;
        }
        self.dialog = Some(DialogKind::input(InputPurpose::NewFolder, ""));
    }

    pub fn show_new_file_dialog(&mut self) {
        if self.block_if_mutation_pending() {
            return;
        }
        self.dialog = Some(DialogKind::input(InputPurpose::NewTextFile, ""));
    }

    pub fn show_rename_dialog(&mut self) {
        if self.block_if_mutation_pending() {
            return;
        }
        if let Some(entry) = self.selected_entry().cloned() {
            self.dialog = Some(DialogKind::rename(entry));
        }
    }

    pub fn show_copy_dialog(&mut self) {
        if self.block_if_mutation_pending() {
            return;
        }
        if let Some(entry) = self.selected_entry().cloned() {
            let name = entry.name.clone();
            self.dialog = Some(DialogKind::input(InputPurpose::Copy { source: entry }, name));
        }
    }

    pub fn show_delete_dialog(&mut self) {
        if self.block_if_mutation_pending() {
            return;
        }
        if let Some(entry) = self.selected_entry().cloned() {
            self.dialog = Some(DialogKind::delete_confirm(entry));
        }
    }

    fn block_if_mutation_pending(&mut self) -> bool {
        if self.is_mutation_pending() {
            self.set_toast("Please wait for the current change to finish");
        }
        self.is_mutation_pending()
    }

    // === 키 처리 ===

    /// 다이얼로그 모드 키 처리
    pub fn handle_dialog_key(&mut self, modifiers: KeyModifiers, code: KeyCode) {
        let Some(dialog) = self.dialog.as_mut() else {
            return;
        };

        match dialog {
            DialogKind::Input {
                input,
                selected_button,
                ..
            } => match (modifiers, code) {
                (_, KeyCode::Esc) => self.close_dialog(),
                (_, KeyCode::Enter) => {
                    if *selected_button == 0 {
                        self.confirm_input_dialog();
                    } else {
                        self.close_dialog();
                    }
                }
                (_, KeyCode::Tab) | (_, KeyCode::BackTab) => {
                    *selected_button = 1 - (*selected_button).min(1);
                }
                (KeyModifiers::CONTROL, KeyCode::Char('w')) => input.delete_prev_word(),
                (KeyModifiers::CONTROL, KeyCode::Char('u')) => input.clear(),
                (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => input.insert(c),
                (_, KeyCode::Backspace) => input.backspace(),
                (_, KeyCode::Delete) => input.delete(),
                (_, KeyCode::Left) => input.left(),
                (_, KeyCode::Right) => input.right(),
                (_, KeyCode::Home) => input.home(),
                (_, KeyCode::End) => input.end(),
                _ => {}
            },
            DialogKind::DeleteConfirm {
                selected_button, ..
            } => match code {
                KeyCode::Esc | KeyCode::Char('n') => self.close_dialog(),
                KeyCode::Char('y') => self.confirm_delete(),
                KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => {
                    *selected_button = 1 - (*selected_button).min(1);
                }
                KeyCode::Enter => {
                    if *selected_button == 0 {
                        self.confirm_delete();
                    } else {
                        self.close_dialog();
                    }
                }
                _ => {}
            },
            DialogKind::Error { .. } | DialogKind::Message { .. } => {
                if matches!(code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q')) {
                    self.close_dialog();
                }
            }
            DialogKind::Help { scroll_offset } => match code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Enter => {
                    self.close_dialog()
                }
                KeyCode::Char('j') | KeyCode::Down => *scroll_offset += 1,
                KeyCode::Char('k') | KeyCode::Up => {
                    *scroll_offset = scroll_offset.saturating_sub(1)
                }
                _ => {}
            },
        }
    }

    // === 확인 ===

    /// 입력 다이얼로그 확인: 목적에 맞는 변경 작업 제출
    fn confirm_input_dialog(&mut self) {
        let Some(DialogKind::Input { purpose, input, .. }) = self.dialog.take() else {
            return;
        };
        let value = input.value().to_string();

        let (mutation, subject) = match purpose {
            InputPurpose::NewFolder => (
                Mutation::CreateDirectory {
                    name: value.clone(),
                },
                value,
            ),
            InputPurpose::NewTextFile => (
                Mutation::CreateFile {
                    name: value.clone(),
                },
                value,
            ),
            InputPurpose::Rename { target } => (
                Mutation::Rename {
                    target,
                    new_name: value.clone(),
                },
                value,
            ),
            InputPurpose::Copy { source } => {
                match parse_copy_target(self.state.current(), &value) {
                    Ok((dest_dir, new_name)) => (
                        Mutation::Copy {
                            source,
                            dest_dir,
                            new_name,
                        },
                        value.trim().to_string(),
                    ),
                    Err(e) => {
                        self.show_error("Copy failed", &e);
                        return;
                    }
                }
            }
        };

        self.submit_mutation(mutation, subject);
    }

    fn confirm_delete(&mut self) {
        let Some(DialogKind::DeleteConfirm { target, .. }) = self.dialog.take() else {
            return;
        };
        let subject = target.name.clone();
        self.submit_mutation(Mutation::Delete { target }, subject);
    }
}

/// 복사 대상 해석: `name` 또는 `folder/sub/name` (현재 디렉토리 기준)
///
/// 절대 경로와 `..`은 허용하지 않습니다.
pub(crate) fn parse_copy_target(current: &Path, value: &str) -> Result<(PathBuf, String)> {
    let value = value.trim();
    let invalid = |reason: &'static str| PocketDirError::InvalidName {
        name: value.to_string(),
        reason,
    };

    if value.is_empty() {
        return Err(invalid("name is empty"));
    }

    let relative = Path::new(value);
    let mut dest_dir = current.to_path_buf();
    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::CurDir => {}
            Component::ParentDir => return Err(invalid("'..' is not allowed")),
            Component::RootDir | Component::Prefix(_) => {
                return Err(invalid("use a path relative to the current folder"))
            }
        }
    }

    let Some(name) = parts.pop() else {
        return Err(invalid("name is empty"));
    };
    for part in parts {
        dest_dir.push(part);
    }
    Ok((dest_dir, name))
}
