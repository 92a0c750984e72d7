//! 설정 파일 관리.
//!
//! 플랫폼 설정 디렉토리의 `config.json`을 읽고 쓴다. 파일이 없으면 기본값으로 만든다.
//! 저장은 같은 디렉토리의 임시 파일에 쓴 뒤 rename 한다.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use parking_lot::RwLock;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::error::CoreError;

const CONFIG_FILE_NAME: &str = "config.json";

/// JSON 설정 파일 + 메모리 사본
#[derive(Debug)]
pub struct ConfigManager {
    path: PathBuf,
    current: RwLock<AppConfig>,
}

impl ConfigManager {
    /// 플랫폼 기본 경로 (`config_dir()/config.json`)
    pub fn new() -> Result<Self, CoreError> {
        Self::with_path(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// 지정 경로의 설정 파일 열기. 없으면 기본 설정으로 생성.
    pub fn with_path(path: PathBuf) -> Result<Self, CoreError> {
        let config = if path.is_file() {
            read_config(&path)?
        } else {
            let defaults = AppConfig::default_config();
            write_config(&path, &defaults)?;
            info!("기본 설정 파일 생성: {}", path.display());
            defaults
        };
        config.validate()?;

        Ok(Self {
            path,
            current: RwLock::new(config),
        })
    }

    /// 현재 설정 복제본
    pub fn get(&self) -> AppConfig {
        self.current.read().clone()
    }

    /// 검증 → 파일 저장 → 메모리 반영. 검증/저장에 실패하면 아무것도 바뀌지 않는다.
    pub fn update(&self, config: AppConfig) -> Result<(), CoreError> {
        config.validate()?;
        write_config(&self.path, &config)?;
        *self.current.write() = config;
        debug!("설정 저장: {}", self.path.display());
        Ok(())
    }

    /// 현재 설정 일부 수정 후 저장
    pub fn update_with<F>(&self, edit: F) -> Result<AppConfig, CoreError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = self.get();
        edit(&mut config);
        self.update(config.clone())?;
        Ok(config)
    }

    pub fn config_path(&self) -> &Path {
        &self.path
    }

    /// 파일에서 다시 읽기 (외부 편집 반영)
    pub fn reload(&self) -> Result<(), CoreError> {
        let config = read_config(&self.path)?;
        config.validate()?;
        *self.current.write() = config;
        info!("설정 다시 로드: {}", self.path.display());
        Ok(())
    }

    /// 플랫폼별 설정 디렉토리 (`directories::ProjectDirs`)
    ///
    /// - macOS: `~/Library/Application Support/dev.iotbm.dashboard/`
    /// - Windows: `%APPDATA%\iotbm\dashboard\config\`
    /// - Linux: `~/.config/dashboard/`
    pub fn config_dir() -> Result<PathBuf, CoreError> {
        ProjectDirs::from("dev", "iotbm", "dashboard")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or_else(|| CoreError::Config("cannot determine home directory".to_string()))
    }
}

fn read_config(path: &Path) -> Result<AppConfig, CoreError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| CoreError::Config(format!("cannot read {}: {e}", path.display())))?;
    let config = serde_json::from_str(&raw)
        .map_err(|e| CoreError::Config(format!("cannot parse {}: {e}", path.display())))?;
    debug!("설정 파일 로드: {}", path.display());
    Ok(config)
}

fn write_config(path: &Path, config: &AppConfig) -> Result<(), CoreError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| {
                CoreError::Config(format!("cannot create {}: {e}", dir.display()))
            })?;
            info!("설정 디렉토리 생성: {}", dir.display());
        }
    }

    let body = serde_json::to_string_pretty(config)?;
    let staging = path.with_extension("json.tmp");
    fs::write(&staging, body)
        .and_then(|()| fs::rename(&staging, path))
        .map_err(|e| CoreError::Config(format!("cannot write {}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_file(dir: &TempDir) -> PathBuf {
        dir.path().join("config.json")
    }

    #[test]
    fn first_open_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a").join("b").join("config.json");

        let manager = ConfigManager::with_path(path.clone()).unwrap();
        assert!(path.is_file());
        assert!(!path.with_extension("json.tmp").exists());

        let on_disk: AppConfig = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert!(on_disk.api.dev_mode);
        assert_eq!(manager.get().dashboard.status_poll_interval_secs, 30);
    }

    #[test]
    fn update_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_path(config_file(&dir)).unwrap();
        manager
            .update_with(|c| {
                c.api.base_url = Some("http://backup.local/api".to_string());
                c.dashboard.backup_history_limit = Some(5);
            })
            .unwrap();

        let reopened = ConfigManager::with_path(config_file(&dir)).unwrap().get();
        assert_eq!(reopened.api.base_url.as_deref(), Some("http://backup.local/api"));
        assert_eq!(reopened.dashboard.backup_history_limit, Some(5));
    }

    #[test]
    fn reload_picks_up_external_edit() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_path(config_file(&dir)).unwrap();

        fs::write(
            config_file(&dir),
            r#"{"api":{"mock_latency_ms":5},"dashboard":{}}"#,
        )
        .unwrap();
        manager.reload().unwrap();

        let config = manager.get();
        assert_eq!(config.api.mock_latency_ms, 5);
        assert_eq!(config.api.mock_restore_latency_ms, 2_000);
    }

    #[test]
    fn rejected_update_keeps_file_and_memory() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_path(config_file(&dir)).unwrap();

        assert!(manager.update_with(|c| c.api.request_timeout_ms = 0).is_err());
        assert_eq!(manager.get().api.request_timeout_ms, 10_000);

        let reopened = ConfigManager::with_path(config_file(&dir)).unwrap();
        assert_eq!(reopened.get().api.request_timeout_ms, 10_000);
    }

    #[test]
    fn malformed_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        fs::write(config_file(&dir), "{ not json").unwrap();

        let err = ConfigManager::with_path(config_file(&dir)).unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn invalid_values_on_disk_are_rejected() {
        let dir = TempDir::new().unwrap();
        fs::write(
            config_file(&dir),
            r#"{"dashboard":{"status_poll_interval_secs":0}}"#,
        )
        .unwrap();

        let err = ConfigManager::with_path(config_file(&dir)).unwrap_err();
        assert!(matches!(err, CoreError::Validation { .. }));
    }
}
