// Status bar component - 상태바 컴포넌트
//
// 폴더/파일 개수, 커서 위치, 작업 중 표시, 토스트 메시지

use crate::ui::Theme;
use crate::utils::formatter::format_counts;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// 작업 중 표시 (틱마다 한 칸씩)
const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// 상태바 컴포넌트
pub struct StatusBar<'a> {
    dir_count: usize,
    file_count: usize,
    /// (커서 위치 1부터, 전체 개수)
    position: Option<(usize, usize)>,
    /// 작업 중이면 스피너 프레임
    busy_frame: Option<usize>,
    toast: Option<&'a str>,
    bg_color: Color,
    fg_color: Color,
    toast_color: Color,
}

impl<'a> Default for StatusBar<'a> {
    fn default() -> Self {
        let theme = Theme::default();
        Self {
            dir_count: 0,
            file_count: 0,
            position: None,
            busy_frame: None,
            toast: None,
            bg_color: theme.status_bar_bg.to_color(),
            fg_color: theme.status_bar_fg.to_color(),
            toast_color: theme.warning.to_color(),
        }
    }
}

impl<'a> StatusBar<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counts(mut self, dirs: usize, files: usize) -> Self {
        self.dir_count = dirs;
        self.file_count = files;
        self
    }

    pub fn position(mut self, position: Option<(usize, usize)>) -> Self {
        self.position = position;
        self
    }

    /// 작업 중 표시 (None이면 숨김)
    pub fn busy(mut self, frame: Option<usize>) -> Self {
        self.busy_frame = frame;
        self
    }

    pub fn toast(mut self, message: Option<&'a str>) -> Self {
        self.toast = message;
        self
    }

    /// 테마 적용
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.bg_color = theme.status_bar_bg.to_color();
        self.fg_color = theme.status_bar_fg.to_color();
        self.toast_color = theme.warning.to_color();
        self
    }

    fn left_text(&self) -> String {
        let mut text = format!(" {}", format_counts(self.dir_count, self.file_count));
        if let Some(frame) = self.busy_frame {
            text.push_str(&format!("  {} working", SPINNER[frame % SPINNER.len()]));
        }
        text
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.bg_color));

        let left = self.left_text();
        let right = match (self.toast, self.position) {
            (Some(toast), _) => format!("{} ", toast),
            (None, Some((current, total))) => format!("{}/{} ", current, total),
            (None, None) => String::new(),
        };
        let right_style = if self.toast.is_some() {
            Style::default()
                .fg(self.toast_color)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.fg_color)
        };

        let padding = (area.width as usize).saturating_sub(left.width() + right.width());
        let line = Line::from(vec![
            Span::styled(left, Style::default().fg(self.fg_color)),
            Span::raw(" ".repeat(padding)),
            Span::styled(right, right_style),
        ]);
        Paragraph::new(line).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_text(bar: StatusBar<'_>, width: u16) -> String {
        let area = Rect::new(0, 0, width, 1);
        let mut buf = Buffer::empty(area);
        bar.render(area, &mut buf);
        (0..width).map(|x| buf[(x, 0)].symbol().to_string()).collect()
    }

    #[test]
    fn test_counts_and_position() {
        let text = render_text(
            StatusBar::new().counts(2, 1).position(Some((3, 3))),
            60,
        );
        assert!(text.contains("2 folders, 1 file"));
        assert!(text.trim_end().ends_with("3/3"));
    }

    #[test]
    fn test_busy_and_toast() {
        let text = render_text(
            StatusBar::new()
                .counts(0, 0)
                .busy(Some(1))
                .toast(Some("Created todo.txt"))
                .position(Some((1, 1))),
            70,
        );
        assert!(text.contains("/ working"));
        assert!(text.contains("Created todo.txt"));
        assert!(!text.contains("1/1"));
    }
}
