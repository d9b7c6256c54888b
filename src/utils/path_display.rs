//! 경로/파일명 표시 문자열 축약

use std::path::Path;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "...";
const PATH_ELLIPSIS: &str = "/...";

/// 제목 표시줄용 경로 문자열
///
/// 홈 디렉토리는 `~`로 줄이고, 너비를 넘으면 `첫 구간/.../끝 구간들` 형태로 생략한다.
pub fn display_path(path: &Path, max_width: usize) -> String {
    let home = dirs::home_dir();
    let text = shorten_home(&path.to_string_lossy(), home.as_deref());
    fit_path(&text, max_width)
}

/// 파일명을 최대 너비로 잘라냄 (확장자 보존)
///
/// `very_long_fi....txt`처럼 확장자를 남기고, 확장자가 없거나 숨김 파일이면 끝을 자른다.
pub fn truncate_name(name: &str, max_width: usize) -> String {
    if name.width() <= max_width {
        return name.to_string();
    }

    let (stem, ext) = match name.rfind('.') {
        Some(dot) if dot > 0 => name.split_at(dot),
        _ => (name, ""),
    };

    if ext.is_empty() || ELLIPSIS.width() + ext.width() >= max_width {
        let keep = max_width.saturating_sub(ELLIPSIS.width());
        return format!("{}{}", take_prefix_by_width(name, keep), ELLIPSIS);
    }

    let stem_width = max_width - ELLIPSIS.width() - ext.width();
    format!("{}{}{}", take_prefix_by_width(stem, stem_width), ELLIPSIS, ext)
}

fn shorten_home(path: &str, home: Option<&Path>) -> String {
    let Some(home) = home.map(|h| h.to_string_lossy().to_string()) else {
        return path.to_string();
    };
    if home.is_empty() || home == "/" {
        return path.to_string();
    }

    match path.strip_prefix(&home) {
        Some("") => "~".to_string(),
        Some(rest) if rest.starts_with(std::path::MAIN_SEPARATOR) => format!("~{}", rest),
        _ => path.to_string(),
    }
}

fn fit_path(path: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if path.width() <= max_width {
        return path.to_string();
    }

    let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if parts.len() <= 2 {
        return keep_tail(path, max_width);
    }

    let head = if path.starts_with('~') {
        "~".to_string()
    } else if path.starts_with('/') {
        format!("/{}", parts[0])
    } else {
        parts[0].to_string()
    };

    let budget = max_width.saturating_sub(head.width() + PATH_ELLIPSIS.width());
    let mut tail: Vec<&str> = Vec::new();
    let mut used = 0;
    for part in parts.iter().skip(1).rev() {
        let w = part.width() + 1;
        if used + w > budget {
            break;
        }
        tail.insert(0, part);
        used += w;
    }

    if tail.is_empty() {
        return keep_tail(path, max_width);
    }

    format!("{}{}/{}", head, PATH_ELLIPSIS, tail.join("/"))
}

fn keep_tail(text: &str, max_width: usize) -> String {
    if max_width <= ELLIPSIS.width() {
        return take_prefix_by_width(text, max_width);
    }

    let mut kept: Vec<char> = Vec::new();
    let mut width = 0;
    for ch in text.chars().rev() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(1);
        if width + w > max_width - ELLIPSIS.width() {
            break;
        }
        kept.push(ch);
        width += w;
    }
    kept.reverse();
    format!("{}{}", ELLIPSIS, kept.into_iter().collect::<String>())
}

fn take_prefix_by_width(text: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(1);
        if width + w > max_width {
            break;
        }
        result.push(ch);
        width += w;
    }
    result
}
