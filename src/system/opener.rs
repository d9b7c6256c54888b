//! 외부 프로그램으로 파일 열기

use crate::models::operation::{ContentClass, OpenRequest};
use crate::utils::error::{PocketDirError, Result};
use std::process::{Command, Stdio};
use tracing::{debug, warn};

/// 파일 열기 위임 대상
pub trait Opener: Send + Sync {
    fn open(&self, request: &OpenRequest) -> Result<()>;
}

/// 설정된 명령(없으면 플랫폼 기본 명령)으로 파일을 여는 Opener
#[derive(Debug, Clone, Default)]
pub struct SystemOpener {
    text_command: Option<String>,
    generic_command: Option<String>,
}

impl SystemOpener {
    pub fn new(text_command: Option<String>, generic_command: Option<String>) -> Self {
        Self {
            text_command: text_command.filter(|c| !c.trim().is_empty()),
            generic_command: generic_command.filter(|c| !c.trim().is_empty()),
        }
    }

    /// 분류에 맞는 명령 (프로그램, 인자)
    fn command_for(&self, class: ContentClass) -> (String, Vec<String>) {
        let configured = match class {
            ContentClass::Text => self.text_command.as_deref(),
            ContentClass::Generic => self.generic_command.as_deref(),
        };

        if let Some(line) = configured {
            let mut parts = line.split_whitespace().map(str::to_string);
            if let Some(program) = parts.next() {
                return (program, parts.collect());
            }
        }

        platform_default()
    }
}

impl Opener for SystemOpener {
    fn open(&self, request: &OpenRequest) -> Result<()> {
        let (program, args) = self.command_for(request.class);
        debug!(program = %program, path = %request.path.display(), mime = request.mime(), "opening file");

        let status = Command::new(&program)
            .args(&args)
            .arg(&request.path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| {
                warn!(program = %program, error = %e, "open command could not be started");
                PocketDirError::NoHandler {
                    path: request.path.clone(),
                    reason: format!("{}: {}", program, e),
                }
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(PocketDirError::NoHandler {
                path: request.path.clone(),
                reason: format!("{} exited with {}", program, status),
            })
        }
    }
}

fn platform_default() -> (String, Vec<String>) {
    if cfg!(target_os = "macos") {
        ("open".to_string(), Vec::new())
    } else if cfg!(windows) {
        ("explorer".to_string(), Vec::new())
    } else {
        ("xdg-open".to_string(), Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn request(class: ContentClass) -> OpenRequest {
        OpenRequest {
            path: PathBuf::from("/tmp/file"),
            class,
        }
    }

    #[test]
    fn test_command_for_uses_configured_command() {
        let opener = SystemOpener::new(Some("less -R".to_string()), None);
        let (program, args) = opener.command_for(ContentClass::Text);
        assert_eq!(program, "less");
        assert_eq!(args, vec!["-R".to_string()]);

        let (program, _) = opener.command_for(ContentClass::Generic);
        assert_eq!(program, platform_default().0);
    }

    #[test]
    fn test_blank_command_falls_back_to_default() {
        let opener = SystemOpener::new(Some("   ".to_string()), None);
        assert_eq!(opener.command_for(ContentClass::Text), platform_default());
    }

    #[test]
    fn test_missing_program_is_no_handler() {
        let opener = SystemOpener::new(
            Some("pocketdir-definitely-not-installed".to_string()),
            None,
        );
        match opener.open(&request(ContentClass::Text)) {
            Err(PocketDirError::NoHandler { .. }) => {}
            other => panic!("Expected NoHandler, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_program_is_no_handler() {
        let opener = SystemOpener::new(None, Some("false".to_string()));
        assert!(matches!(
            opener.open(&request(ContentClass::Generic)),
            Err(PocketDirError::NoHandler { .. })
        ));

        let opener = SystemOpener::new(None, Some("true".to_string()));
        assert!(opener.open(&request(ContentClass::Generic)).is_ok());
    }
}
