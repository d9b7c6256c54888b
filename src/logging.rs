//! 파일 로그 설정
//!
//! 터미널은 TUI가 쓰므로 로그는 항상 파일로만 보냅니다.

use std::env;
use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LOG_FILE: &str = "pocketdir.log";

/// 로그 디렉토리 (`POCKETDIR_LOG_DIR` 우선)
pub fn log_dir() -> Option<PathBuf> {
    env::var("POCKETDIR_LOG_DIR")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| dirs::data_local_dir().map(|dir| dir.join("pocketdir")))
}

/// tracing 초기화
///
/// `RUST_LOG`이 있으면 `default_level`보다 우선합니다.
/// 디렉토리를 만들 수 없으면 로그 없이 None을 반환합니다.
/// 반환된 guard는 프로그램이 끝날 때까지 살아 있어야 합니다.
pub fn init_tracing(default_level: &str) -> Option<WorkerGuard> {
    let dir = log_dir()?;
    fs::create_dir_all(&dir).ok()?;

    let appender = tracing_appender::rolling::never(&dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false),
        )
        .try_init()
        .ok()?;

    Some(guard)
}
