//! 설정 파일과 종료 시 저장되는 상태

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "pocketdir";
const STATE_VERSION: u32 = 1;

/// `[open]` 섹션: 분류별 열기 명령
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenConfig {
    /// `.txt` 파일을 여는 명령 (예: `"less"`)
    pub text: Option<String>,
    /// 그 외 파일을 여는 명령
    pub generic: Option<String>,
}

/// 사용자 설정 (`config.toml`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 시작 디렉토리이자 상위 이동 한계
    pub root: Option<PathBuf>,
    /// `dark` | `light`
    pub theme: String,
    /// 새 텍스트 파일에 붙일 확장자
    pub new_file_extension: String,
    /// 마지막 디렉토리에서 다시 시작
    pub restore_last_directory: bool,
    /// `RUST_LOG`가 없을 때의 로그 레벨
    pub log_level: String,
    pub open: OpenConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: None,
            theme: "dark".to_string(),
            new_file_extension: "txt".to_string(),
            restore_last_directory: true,
            log_level: "info".to_string(),
            open: OpenConfig::default(),
        }
    }
}

impl Config {
    /// 설정 파일 경로 (`POCKETDIR_CONFIG` 우선)
    pub fn path() -> Option<PathBuf> {
        env_path("POCKETDIR_CONFIG")
            .or_else(|| dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml")))
    }

    /// 기본 위치에서 설정 읽기 (파일이 없으면 기본값)
    pub fn load() -> Result<Self> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read {}", path.display()))
            }
        };

        toml::from_str(&data).with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Root 결정: `POCKETDIR_ROOT`, 설정의 `root`, 홈 디렉토리, `/` 순
    pub fn resolve_root(&self) -> PathBuf {
        self.resolve_root_with(env_path("POCKETDIR_ROOT"), dirs::home_dir())
    }

    fn resolve_root_with(&self, env_root: Option<PathBuf>, home: Option<PathBuf>) -> PathBuf {
        let root = env_root
            .or_else(|| self.root.clone())
            .map(|p| expand_home(&p, home.as_deref()))
            .or(home)
            .unwrap_or_else(|| PathBuf::from("/"));

        // 심볼릭 링크/상대 경로 정리 (없는 경로는 그대로 두고 권한 확인에서 보고)
        fs::canonicalize(&root).unwrap_or(root)
    }
}

/// 종료 시 저장하는 상태
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    pub version: u32,
    pub last_directory: Option<PathBuf>,
}

impl PersistedState {
    pub fn new(last_directory: Option<PathBuf>) -> Self {
        Self {
            version: STATE_VERSION,
            last_directory,
        }
    }
}

/// 상태 파일 저장소
#[derive(Debug, Clone)]
pub struct StateStore {
    path: Option<PathBuf>,
}

impl StateStore {
    /// `POCKETDIR_STATE_FILE` 또는 `<data_dir>/pocketdir/state.toml`
    pub fn from_env() -> Self {
        let path = env_path("POCKETDIR_STATE_FILE")
            .or_else(|| dirs::data_dir().map(|dir| dir.join(APP_DIR).join("state.toml")));
        Self { path }
    }

    #[cfg(test)]
    pub fn at(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    /// 버전이 다르거나 읽을 수 없으면 None
    pub fn load(&self) -> Option<PersistedState> {
        let data = fs::read_to_string(self.path.as_ref()?).ok()?;
        let state: PersistedState = toml::from_str(&data).ok()?;
        (state.version == STATE_VERSION).then_some(state)
    }

    pub fn save(&self, state: &PersistedState) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let data = toml::to_string_pretty(state).context("failed to encode state")?;
        fs::write(path, data).with_context(|| format!("failed to write {}", path.display()))
    }
}

fn env_path(key: &str) -> Option<PathBuf> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn expand_home(path: &Path, home: Option<&Path>) -> PathBuf {
    match (path.strip_prefix("~"), home) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = Config::load_from(&temp.path().join("none.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.new_file_extension, "txt");
        assert!(config.restore_last_directory);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "theme = \"light\"\n\n[open]\ntext = \"less\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.theme, "light");
        assert_eq!(config.open.text.as_deref(), Some("less"));
        assert_eq!(config.open.generic, None);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_malformed_file_is_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "theme = [").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("invalid config file"));
    }

    #[test]
    fn test_resolve_root_order() {
        let temp = TempDir::new().unwrap();
        let env_root = temp.path().join("env");
        let config_root = temp.path().join("config");
        fs::create_dir(&env_root).unwrap();
        fs::create_dir(&config_root).unwrap();
        let canonical = |p: &Path| fs::canonicalize(p).unwrap();

        let config = Config {
            root: Some(config_root.clone()),
            ..Config::default()
        };
        assert_eq!(
            config.resolve_root_with(Some(env_root.clone()), None),
            canonical(&env_root)
        );
        assert_eq!(
            config.resolve_root_with(None, None),
            canonical(&config_root)
        );

        let home_config = Config::default();
        assert_eq!(
            home_config.resolve_root_with(None, Some(temp.path().to_path_buf())),
            canonical(temp.path())
        );
        assert_eq!(home_config.resolve_root_with(None, None), canonical(Path::new("/")));
    }

    #[test]
    fn test_root_with_tilde() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("docs")).unwrap();
        let config = Config {
            root: Some(PathBuf::from("~/docs")),
            ..Config::default()
        };
        assert_eq!(
            config.resolve_root_with(None, Some(temp.path().to_path_buf())),
            fs::canonicalize(temp.path().join("docs")).unwrap()
        );
    }

    #[test]
    fn test_state_store_round_trip_and_version() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("state.toml");
        let store = StateStore::at(path.clone());
        assert!(store.load().is_none());

        let state = PersistedState::new(Some(PathBuf::from("/data/pics")));
        store.save(&state).unwrap();
        assert_eq!(store.load(), Some(state));

        fs::write(&path, "version = 99\nlast_directory = \"/x\"\n").unwrap();
        assert!(store.load().is_none());

        let unset = StateStore { path: None };
        unset.save(&PersistedState::new(None)).unwrap();
        assert!(unset.load().is_none());
    }
}
