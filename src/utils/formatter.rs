// Formatters - 목록 컬럼과 상태바 문자열

use chrono::{DateTime, Local};
use std::time::SystemTime;

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// 파일 크기를 사람이 읽기 쉬운 단위로 표시 (`0 B`, `1.5 KB`, `3.0 MB`)
pub fn format_file_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

/// 수정 시각 컬럼 (항상 `YYYY-MM-DD HH:MM`, 16자)
pub fn format_date(time: SystemTime) -> String {
    let datetime: DateTime<Local> = time.into();
    datetime.format("%Y-%m-%d %H:%M").to_string()
}

/// `1 file` / `3 files`
pub fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    let word = if count == 1 { singular } else { plural };
    format!("{} {}", count, word)
}

/// 상태바 개수 요약 (`2 folders, 1 file`)
pub fn format_counts(dirs: usize, files: usize) -> String {
    format!(
        "{}, {}",
        pluralize(dirs, "folder", "folders"),
        pluralize(files, "file", "files")
    )
}
