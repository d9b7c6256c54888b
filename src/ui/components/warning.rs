// Warning screen component - 터미널이 최소 크기보다 작을 때 표시

use crate::ui::layout::{MIN_HEIGHT, MIN_WIDTH};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

/// 경고 화면 컴포넌트
pub struct WarningScreen {
    current_size: (u16, u16),
    warning_color: Color,
    bg_color: Color,
    fg_color: Color,
}

impl Default for WarningScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl WarningScreen {
    pub fn new() -> Self {
        let theme = Theme::default();
        Self {
            current_size: (0, 0),
            warning_color: theme.warning.to_color(),
            bg_color: theme.bg.to_color(),
            fg_color: theme.fg.to_color(),
        }
    }

    /// 현재 터미널 크기 설정
    pub fn current_size(mut self, width: u16, height: u16) -> Self {
        self.current_size = (width, height);
        self
    }

    /// 테마 적용
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.warning_color = theme.warning.to_color();
        self.bg_color = theme.bg.to_color();
        self.fg_color = theme.fg.to_color();
        self
    }
}

impl Widget for WarningScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.bg_color));

        let bold_warning = Style::default()
            .fg(self.warning_color)
            .add_modifier(Modifier::BOLD);

        let lines = vec![
            Line::from(Span::styled("Terminal too small", bold_warning)),
            Line::from(Span::styled(
                format!(
                    "{}x{} (need {}x{})",
                    self.current_size.0, self.current_size.1, MIN_WIDTH, MIN_HEIGHT
                ),
                Style::default().fg(self.fg_color),
            )),
            Line::from(Span::styled(
                "Resize, or press q to quit",
                Style::default()
                    .fg(self.fg_color)
                    .add_modifier(Modifier::DIM),
            )),
        ];

        // 세로 가운데 정렬
        let top = area.height.saturating_sub(lines.len() as u16) / 2;
        let inner = Rect::new(
            area.x,
            area.y + top,
            area.width,
            area.height.saturating_sub(top),
        );

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}
