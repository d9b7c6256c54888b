use crate::utils::error::{PocketDirError, Result};
use ratatui::style::Color;

/// 색상 테마
///
/// 내장 테마는 `dark`, `light` 두 가지입니다. 색은 hex 문자열로 정의합니다.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,

    // 목록
    pub bg: ColorDef,
    pub fg: ColorDef,
    pub border: ColorDef,
    pub title: ColorDef,
    pub directory: ColorDef,
    pub symlink: ColorDef,
    pub hidden: ColorDef,
    pub selected_fg: ColorDef,
    pub selected_bg: ColorDef,
    pub meta: ColorDef,

    // 하단 바
    pub status_bar_bg: ColorDef,
    pub status_bar_fg: ColorDef,
    pub command_bar_bg: ColorDef,
    pub command_bar_fg: ColorDef,

    // 강조
    pub accent: ColorDef,
    pub warning: ColorDef,
    pub error: ColorDef,
}

/// hex 색상 (`#rrggbb`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorDef(String);

impl ColorDef {
    /// ratatui 색으로 변환 (잘못된 값은 터미널 기본색)
    pub fn to_color(&self) -> Color {
        parse_hex_color(&self.0).unwrap_or(Color::Reset)
    }
}

impl From<&str> for ColorDef {
    fn from(s: &str) -> Self {
        ColorDef(s.to_string())
    }
}

fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

impl Theme {
    /// 이름으로 내장 테마 조회
    pub fn by_name(name: &str) -> Result<Self> {
        match name.trim().to_lowercase().as_str() {
            "dark" => Ok(Self::dark()),
            "light" => Ok(Self::light()),
            other => Err(PocketDirError::Config(format!(
                "unknown theme '{}' (expected dark or light)",
                other
            ))),
        }
    }

    /// Dark 테마 (기본)
    pub fn dark() -> Self {
        Theme {
            name: "dark",
            bg: "#1e1e1e".into(),
            fg: "#d4d4d4".into(),
            border: "#0078d4".into(),
            title: "#ffffff".into(),
            directory: "#569cd6".into(),
            symlink: "#ce9178".into(),
            hidden: "#808080".into(),
            selected_fg: "#ffffff".into(),
            selected_bg: "#0078d4".into(),
            meta: "#858585".into(),
            status_bar_bg: "#007acc".into(),
            status_bar_fg: "#ffffff".into(),
            command_bar_bg: "#252526".into(),
            command_bar_fg: "#cccccc".into(),
            accent: "#3794ff".into(),
            warning: "#cca700".into(),
            error: "#f14c4c".into(),
        }
    }

    /// Light 테마
    pub fn light() -> Self {
        Theme {
            name: "light",
            bg: "#ffffff".into(),
            fg: "#333333".into(),
            border: "#005fb8".into(),
            title: "#000000".into(),
            directory: "#0451a5".into(),
            symlink: "#a31515".into(),
            hidden: "#8a8a8a".into(),
            selected_fg: "#ffffff".into(),
            selected_bg: "#005fb8".into(),
            meta: "#6e6e6e".into(),
            status_bar_bg: "#005fb8".into(),
            status_bar_fg: "#ffffff".into(),
            command_bar_bg: "#f3f3f3".into(),
            command_bar_fg: "#333333".into(),
            accent: "#005fb8".into(),
            warning: "#bf8803".into(),
            error: "#e51400".into(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
