// Panel component - 디렉토리 목록
//
// 현재 경로 제목, 엔트리 행(아이콘, 이름, 크기, 수정 시각), 빈 폴더 표시

use crate::models::{EntryList, FileEntry};
use crate::ui::Theme;
use crate::utils::formatter::{format_date, format_file_size};
use crate::utils::path_display::{display_path, truncate_name};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// 빈 디렉토리 표시 문구
pub const EMPTY_FOLDER_TEXT: &str = "(Empty folder)";

const SIZE_WIDTH: usize = 9;
const DATE_WIDTH: usize = 16;

/// 목록 패널
pub struct Panel<'a> {
    path: &'a Path,
    entries: &'a EntryList,
    selected_index: usize,
    scroll_offset: usize,
    border_color: Color,
    title_color: Color,
    bg_color: Color,
    fg_color: Color,
    directory_color: Color,
    symlink_color: Color,
    hidden_color: Color,
    selected_fg: Color,
    selected_bg: Color,
    meta_color: Color,
}

impl<'a> Panel<'a> {
    pub fn new(path: &'a Path, entries: &'a EntryList) -> Self {
        let theme = Theme::default();
        Self {
            path,
            entries,
            selected_index: 0,
            scroll_offset: 0,
            border_color: theme.border.to_color(),
            title_color: theme.title.to_color(),
            bg_color: theme.bg.to_color(),
            fg_color: theme.fg.to_color(),
            directory_color: theme.directory.to_color(),
            symlink_color: theme.symlink.to_color(),
            hidden_color: theme.hidden.to_color(),
            selected_fg: theme.selected_fg.to_color(),
            selected_bg: theme.selected_bg.to_color(),
            meta_color: theme.meta.to_color(),
        }
    }

    /// 커서 위치
    pub fn selected_index(mut self, index: usize) -> Self {
        self.selected_index = index;
        self
    }

    /// 스크롤 오프셋
    pub fn scroll_offset(mut self, offset: usize) -> Self {
        self.scroll_offset = offset;
        self
    }

    /// 테마 적용
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.border_color = theme.border.to_color();
        self.title_color = theme.title.to_color();
        self.bg_color = theme.bg.to_color();
        self.fg_color = theme.fg.to_color();
        self.directory_color = theme.directory.to_color();
        self.symlink_color = theme.symlink.to_color();
        self.hidden_color = theme.hidden.to_color();
        self.selected_fg = theme.selected_fg.to_color();
        self.selected_bg = theme.selected_bg.to_color();
        self.meta_color = theme.meta.to_color();
        self
    }

    fn entry_color(&self, entry: &FileEntry) -> Color {
        if entry.is_symlink {
            self.symlink_color
        } else if entry.is_directory() {
            self.directory_color
        } else if entry.is_hidden {
            self.hidden_color
        } else {
            self.fg_color
        }
    }

    fn render_entry(&self, entry: &FileEntry, selected: bool, area: Rect, buf: &mut Buffer) {
        let width = area.width as usize;
        let show_date = width >= 60;
        let show_size = width >= 36;

        let meta_width = if show_size { SIZE_WIDTH + 1 } else { 0 }
            + if show_date { DATE_WIDTH + 1 } else { 0 };
        // 앞 공백 1 + 아이콘 2 + 공백 1
        let name_width = width.saturating_sub(meta_width + 4);

        let (name_style, meta_style) = if selected {
            let style = Style::default()
                .fg(self.selected_fg)
                .bg(self.selected_bg)
                .add_modifier(Modifier::BOLD);
            (style, style)
        } else {
            (
                Style::default().fg(self.entry_color(entry)),
                Style::default().fg(self.meta_color),
            )
        };

        let icon = if entry.is_directory() { "📁" } else { "📄" };
        let mut name = truncate_name(&entry.name, name_width);
        if entry.is_symlink && name.width() < name_width {
            name.push('@');
        }
        let padding = name_width.saturating_sub(name.width());

        let mut spans = vec![
            Span::styled(" ", name_style),
            Span::styled(icon, name_style),
            Span::styled(" ", name_style),
            Span::styled(name, name_style),
            Span::styled(" ".repeat(padding), name_style),
        ];

        if show_size {
            let size = if entry.is_directory() {
                "-".to_string()
            } else {
                format_file_size(entry.size)
            };
            spans.push(Span::styled(
                format!(" {:>width$}", size, width = SIZE_WIDTH),
                meta_style,
            ));
        }
        if show_date {
            spans.push(Span::styled(
                format!(" {}", format_date(entry.modified)),
                meta_style,
            ));
        }

        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}

impl Widget for Panel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let title = display_path(self.path, (area.width as usize).saturating_sub(4));
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.border_color))
            .title(Span::styled(
                format!(" {} ", title),
                Style::default()
                    .fg(self.title_color)
                    .add_modifier(Modifier::BOLD),
            ))
            .style(Style::default().bg(self.bg_color));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        if self.entries.is_empty() {
            let text = EMPTY_FOLDER_TEXT;
            let x = inner.x + (inner.width.saturating_sub(text.width() as u16)) / 2;
            let y = inner.y + inner.height / 2;
            buf.set_string(x, y, text, Style::default().fg(self.meta_color));
            return;
        }

        let rows = inner.height as usize;
        for (row, (index, entry)) in self
            .entries
            .iter()
            .enumerate()
            .skip(self.scroll_offset)
            .take(rows)
            .enumerate()
        {
            let line_area = Rect::new(inner.x, inner.y + row as u16, inner.width, 1);
            self.render_entry(entry, index == self.selected_index, line_area, buf);
        }
    }
}
