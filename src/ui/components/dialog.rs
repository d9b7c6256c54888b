//! 다이얼로그 시스템
//!
//! 이름 입력, 삭제 확인, 오류/메시지, 단축키 도움말 팝업

use crate::core::actions::generate_help_entries;
use crate::models::FileEntry;
use crate::ui::components::text_input::TextInput;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// 다이얼로그 내부 좌우 패딩 (border 안쪽 여백)
const DIALOG_H_PADDING: u16 = 2;
/// 다이얼로그 내부 상단 패딩 (border 아래 여백)
const DIALOG_V_PADDING: u16 = 1;

/// 입력 다이얼로그 목적
#[derive(Debug, Clone, PartialEq)]
pub enum InputPurpose {
    NewFolder,
    NewTextFile,
    Rename { target: FileEntry },
    /// 복사본 이름 (`name` 또는 `folder/name`)
    Copy { source: FileEntry },
}

impl InputPurpose {
    pub fn title(&self) -> &'static str {
        match self {
            InputPurpose::NewFolder => "New Folder",
            InputPurpose::NewTextFile => "New Text File",
            InputPurpose::Rename { .. } => "Rename",
            InputPurpose::Copy { .. } => "Copy",
        }
    }

    pub fn prompt(&self) -> String {
        match self {
            InputPurpose::NewFolder => "Folder name:".to_string(),
            InputPurpose::NewTextFile => "File name (.txt is added):".to_string(),
            InputPurpose::Rename { target } => format!("Rename '{}' to:", target.name),
            InputPurpose::Copy { source } => {
                format!("Copy '{}' as (name or folder/name):", source.name)
            }
        }
    }
}

/// 다이얼로그 종류
#[derive(Debug, Clone, PartialEq)]
pub enum DialogKind {
    /// 이름 입력
    Input {
        purpose: InputPurpose,
        input: TextInput,
        selected_button: usize, // 0: OK, 1: Cancel
    },
    /// 삭제 확인
    DeleteConfirm {
        target: FileEntry,
        selected_button: usize, // 0: Yes, 1: No
    },
    /// 오류 (카테고리별 안내 포함)
    Error {
        title: String,
        message: String,
        hint: Option<String>,
    },
    /// 정보 메시지
    Message { title: String, message: String },
    /// 단축키 도움말
    Help { scroll_offset: usize },
}

impl DialogKind {
    pub fn input(purpose: InputPurpose, initial: impl Into<String>) -> Self {
        DialogKind::Input {
            purpose,
            input: TextInput::new(initial),
            selected_button: 0,
        }
    }

    /// 이름 변경: 기존 이름으로 채우고 커서는 확장자 앞
    pub fn rename(target: FileEntry) -> Self {
        let input = TextInput::new(target.name.clone()).with_cursor_before_extension();
        DialogKind::Input {
            purpose: InputPurpose::Rename { target },
            input,
            selected_button: 0,
        }
    }

    /// 삭제 확인 (기본 선택은 No)
    pub fn delete_confirm(target: FileEntry) -> Self {
        DialogKind::DeleteConfirm {
            target,
            selected_button: 1,
        }
    }

    pub fn error(
        title: impl Into<String>,
        message: impl Into<String>,
        hint: Option<String>,
    ) -> Self {
        DialogKind::Error {
            title: title.into(),
            message: message.into(),
            hint,
        }
    }

    pub fn message(title: impl Into<String>, message: impl Into<String>) -> Self {
        DialogKind::Message {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn help() -> Self {
        DialogKind::Help { scroll_offset: 0 }
    }
}

/// 다이얼로그 위젯
pub struct Dialog<'a> {
    kind: &'a DialogKind,
    bg_color: Color,
    fg_color: Color,
    border_color: Color,
    title_color: Color,
    key_color: Color,
    hint_color: Color,
    error_color: Color,
    button_bg: Color,
    button_fg: Color,
    button_selected_bg: Color,
    button_selected_fg: Color,
    input_bg: Color,
}

impl<'a> Dialog<'a> {
    pub fn new(kind: &'a DialogKind) -> Self {
        Self {
            kind,
            bg_color: Color::Reset,
            fg_color: Color::Reset,
            border_color: Color::Reset,
            title_color: Color::Reset,
            key_color: Color::Reset,
            hint_color: Color::Reset,
            error_color: Color::Reset,
            button_bg: Color::Reset,
            button_fg: Color::Reset,
            button_selected_bg: Color::Reset,
            button_selected_fg: Color::Reset,
            input_bg: Color::Reset,
        }
        .theme(&Theme::default())
    }

    /// 테마 적용
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.bg_color = theme.command_bar_bg.to_color();
        self.fg_color = theme.fg.to_color();
        self.border_color = theme.border.to_color();
        self.title_color = theme.accent.to_color();
        self.key_color = theme.directory.to_color();
        self.hint_color = theme.meta.to_color();
        self.error_color = theme.error.to_color();
        self.button_bg = theme.bg.to_color();
        self.button_fg = theme.fg.to_color();
        self.button_selected_bg = theme.selected_bg.to_color();
        self.button_selected_fg = theme.selected_fg.to_color();
        self.input_bg = theme.bg.to_color();
        self
    }

    /// 다이얼로그 영역 계산 (화면 중앙)
    fn calculate_area(&self, screen: Rect) -> Rect {
        let sw = screen.width;
        let sh = screen.height;

        let (width, height) = match self.kind {
            DialogKind::Input { .. } => (50u16, 7u16),
            DialogKind::DeleteConfirm { .. } => (46, 7),
            DialogKind::Error { message, hint, .. } => {
                let lines = message.lines().count().max(1) + usize::from(hint.is_some()) * 2;
                (50, 5 + lines as u16)
            }
            DialogKind::Message { message, .. } => {
                (50, 5 + message.lines().count().max(1) as u16)
            }
            DialogKind::Help { .. } => (56, sh.saturating_sub(2)),
        };

        let width = width.min(sw.saturating_sub(2));
        let height = height.min(sh.saturating_sub(2));

        Rect {
            x: screen.x + (sw.saturating_sub(width)) / 2,
            y: screen.y + (sh.saturating_sub(height)) / 2,
            width,
            height,
        }
    }

    fn inner(area: Rect) -> Rect {
        Rect {
            x: area.x + DIALOG_H_PADDING,
            y: area.y + DIALOG_V_PADDING,
            width: area.width.saturating_sub(DIALOG_H_PADDING * 2),
            height: area.height.saturating_sub(DIALOG_V_PADDING * 2),
        }
    }

    fn render_frame(&self, buf: &mut Buffer, area: Rect, title: &str, color: Color) {
        Clear.render(area, buf);
        Block::default()
            .title(format!(" {} ", title))
            .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .style(Style::default().bg(self.bg_color))
            .render(area, buf);
    }

    /// 버튼 렌더링 헬퍼 (렌더링된 너비 반환)
    fn render_button(
        &self,
        buf: &mut Buffer,
        x: u16,
        y: u16,
        label: &str,
        is_selected: bool,
    ) -> u16 {
        let (bg, fg) = if is_selected {
            (self.button_selected_bg, self.button_selected_fg)
        } else {
            (self.button_bg, self.button_fg)
        };

        let padded = format!(" {} ", label);
        let width = padded.width() as u16;
        buf.set_string(x, y, &padded, Style::default().fg(fg).bg(bg));
        width
    }

    fn render_buttons(&self, buf: &mut Buffer, area: Rect, labels: &[&str], selected: usize) {
        let total: u16 = labels
            .iter()
            .map(|l| l.width() as u16 + 2)
            .sum::<u16>()
            + 2 * labels.len().saturating_sub(1) as u16;
        let mut x = area.x + area.width.saturating_sub(total) / 2;
        let y = area.y + area.height.saturating_sub(2);
        for (i, label) in labels.iter().enumerate() {
            x += self.render_button(buf, x, y, label, i == selected) + 2;
        }
    }

    fn render_input(
        &self,
        buf: &mut Buffer,
        area: Rect,
        purpose: &InputPurpose,
        input: &TextInput,
        selected_button: usize,
    ) {
        self.render_frame(buf, area, purpose.title(), self.title_color);
        let inner = Self::inner(area);

        buf.set_stringn(
            inner.x,
            inner.y,
            purpose.prompt(),
            inner.width as usize,
            Style::default().fg(self.fg_color),
        );

        // 입력 필드
        let field_y = inner.y + 1;
        let field_width = inner.width as usize;
        buf.set_style(
            Rect::new(inner.x, field_y, inner.width, 1),
            Style::default().bg(self.input_bg),
        );

        // 커서가 보이도록 앞쪽을 잘라냄
        let value = input.value();
        let cursor = input.cursor();
        let max_display = field_width.saturating_sub(2);
        let mut start = 0;
        while value[start..cursor].width() > max_display {
            start += value[start..]
                .chars()
                .next()
                .map(char::len_utf8)
                .unwrap_or(1);
        }
        let visible = &value[start..];
        buf.set_stringn(
            inner.x + 1,
            field_y,
            visible,
            max_display,
            Style::default().fg(self.fg_color).bg(self.input_bg),
        );

        let cursor_col: usize = value[start..cursor]
            .chars()
            .map(|c| c.width().unwrap_or(0))
            .sum();
        let cursor_x = inner.x + 1 + cursor_col as u16;
        if let Some(cell) = buf.cell_mut((cursor_x, field_y)) {
            if cursor < value.len() {
                cell.set_style(Style::default().fg(self.input_bg).bg(self.fg_color));
            } else {
                cell.set_char('▏');
                cell.set_style(Style::default().fg(self.fg_color).bg(self.input_bg));
            }
        }

        self.render_buttons(buf, area, &["OK", "Cancel"], selected_button);
    }

    fn render_delete_confirm(
        &self,
        buf: &mut Buffer,
        area: Rect,
        target: &FileEntry,
        selected_button: usize,
    ) {
        self.render_frame(buf, area, "Delete", self.error_color);
        let inner = Self::inner(area);

        let what = if target.is_directory() {
            "folder and everything in it"
        } else {
            "file"
        };
        let message = format!("Delete {} '{}'?", what, target.name);
        Paragraph::new(message)
            .style(Style::default().fg(self.fg_color))
            .wrap(Wrap { trim: true })
            .render(
                Rect::new(inner.x, inner.y, inner.width, inner.height.saturating_sub(2)),
                buf,
            );

        self.render_buttons(buf, area, &["Yes", "No"], selected_button);
    }

    fn render_message(
        &self,
        buf: &mut Buffer,
        area: Rect,
        title: &str,
        message: &str,
        hint: Option<&str>,
        is_error: bool,
    ) {
        let color = if is_error {
            self.error_color
        } else {
            self.title_color
        };
        self.render_frame(buf, area, title, color);
        let inner = Self::inner(area);

        let message_lines = message.lines().count().max(1) as u16;
        Paragraph::new(message)
            .style(Style::default().fg(self.fg_color))
            .wrap(Wrap { trim: true })
            .render(
                Rect::new(inner.x, inner.y, inner.width, message_lines),
                buf,
            );

        if let Some(hint) = hint {
            buf.set_stringn(
                inner.x,
                inner.y + message_lines + 1,
                hint,
                inner.width as usize,
                Style::default()
                    .fg(self.hint_color)
                    .add_modifier(Modifier::ITALIC),
            );
        }

        self.render_buttons(buf, area, &["OK"], 0);
    }

    fn render_help(&self, buf: &mut Buffer, area: Rect, scroll_offset: usize) {
        self.render_frame(buf, area, "Keyboard Shortcuts", self.title_color);
        let inner = Rect {
            height: area.height.saturating_sub(3),
            ..Self::inner(area)
        };

        // (헤더 여부, 키, 설명)
        let mut rows: Vec<(bool, &str, &str)> = Vec::new();
        for (category, items) in generate_help_entries() {
            rows.push((true, category, ""));
            rows.extend(items.into_iter().map(|(key, desc)| (false, key, desc)));
            rows.push((false, "", ""));
        }

        let visible = inner.height as usize;
        let offset = scroll_offset.min(rows.len().saturating_sub(visible));
        let key_col = 14u16;

        for (i, (is_header, key, desc)) in rows.iter().skip(offset).take(visible).enumerate() {
            let y = inner.y + i as u16;
            if *is_header {
                buf.set_string(
                    inner.x,
                    y,
                    key,
                    Style::default()
                        .fg(self.title_color)
                        .add_modifier(Modifier::BOLD),
                );
            } else if !key.is_empty() {
                buf.set_string(inner.x + 2, y, key, Style::default().fg(self.key_color));
                buf.set_stringn(
                    inner.x + key_col,
                    y,
                    desc,
                    inner.width.saturating_sub(key_col) as usize,
                    Style::default().fg(self.fg_color),
                );
            }
        }

        let hint = "Esc/?:Close  j/k:Scroll";
        buf.set_string(
            area.x + area.width.saturating_sub(hint.width() as u16) / 2,
            area.y + area.height.saturating_sub(2),
            hint,
            Style::default().fg(self.hint_color),
        );
    }
}

impl Widget for Dialog<'_> {
    fn render(self, screen: Rect, buf: &mut Buffer) {
        let area = self.calculate_area(screen);
        if area.width < 10 || area.height < 4 {
            return;
        }

        match self.kind {
            DialogKind::Input {
                purpose,
                input,
                selected_button,
            } => self.render_input(buf, area, purpose, input, *selected_button),
            DialogKind::DeleteConfirm {
                target,
                selected_button,
            } => self.render_delete_confirm(buf, area, target, *selected_button),
            DialogKind::Error {
                title,
                message,
                hint,
            } => self.render_message(buf, area, title, message, hint.as_deref(), true),
            DialogKind::Message { title, message } => {
                self.render_message(buf, area, title, message, None, false)
            }
            DialogKind::Help { scroll_offset } => self.render_help(buf, area, *scroll_offset),
        }
    }
}
