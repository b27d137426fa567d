use crate::error::{AppError, Result};
use crate::types::config::AppConfig;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "launchscore.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".launchscore/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/launchscore/config.toml";
pub const API_KEY_VAR: &str = "ANTHROPIC_API_KEY";

pub fn load_config(root: &Path) -> Result<Option<AppConfig>> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(root, global.as_deref())
}

pub(crate) fn load_config_with_global(
    root: &Path,
    global_path: Option<&Path>,
) -> Result<Option<AppConfig>> {
    let repo_path = root.join(DEFAULT_CONFIG_FILE);
    if !repo_path.exists() {
        return Ok(None);
    }

    let mut merged = Value::Table(Map::new());
    if let Some(path) = global_path {
        merge_file_if_exists(&mut merged, path)?;
    }
    merge_file_if_exists(&mut merged, &repo_path)?;
    merge_file_if_exists(&mut merged, &root.join(DEFAULT_LOCAL_FILE))?;

    let cfg: AppConfig = merged
        .try_into()
        .map_err(|e: toml::de::Error| AppError::ConfigParse(e.to_string()))?;
    cfg.validate()?;
    Ok(Some(cfg))
}

/// Loads `.env` from `root` without overriding variables already set.
pub fn load_env_file(root: &Path) {
    let path = root.join(".env");
    if !path.exists() {
        return;
    }
    match dotenvy::from_path(&path) {
        Ok(()) => debug!(path = %path.display(), "loaded environment file"),
        Err(e) => debug!(path = %path.display(), error = %e, "skipping unreadable environment file"),
    }
}

/// The reasoning-service credential; blank values count as unset.
pub fn api_key() -> Option<String> {
    std::env::var(API_KEY_VAR)
        .ok()
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
}

fn merge_file_if_exists(merged: &mut Value, path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    let value = read_toml_value(path)?;
    merge_toml(merged, value);
    Ok(())
}

fn read_toml_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| AppError::ConfigParse(format!("{}: {}", path.display(), e)))
}

fn merge_toml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => {
            *slot = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn load_config_returns_none_when_project_file_missing() {
        let dir = TempDir::new().expect("temp dir should be created");
        let cfg = load_config_with_global(dir.path(), None).expect("load should not fail");
        assert!(cfg.is_none());
    }

    #[test]
    fn load_config_merges_global_project_and_local_in_order() {
        let root = TempDir::new().expect("root temp dir should be created");
        let global_root = TempDir::new().expect("global temp dir should be created");
        let global_path = global_root.path().join("config.toml");

        fs::write(
            &global_path,
            r#"
[service]
model = "global-model"
timeout_secs = 45

[proxy]
bind = "127.0.0.1:9999"
"#,
        )
        .expect("global config should write");

        fs::write(
            root.path().join(DEFAULT_CONFIG_FILE),
            r#"
[service]
model = "project-model"
endpoint = "http://127.0.0.1:8787/api/claude"
"#,
        )
        .expect("project config should write");

        fs::create_dir_all(root.path().join(".launchscore"))
            .expect("local config dir should create");
        fs::write(
            root.path().join(DEFAULT_LOCAL_FILE),
            r#"
[service]
max_tokens = 1500
"#,
        )
        .expect("local override should write");

        let cfg = load_config_with_global(root.path(), Some(&global_path))
            .expect("load should succeed")
            .expect("merged config should exist");

        let service = cfg.service();
        assert_eq!(service.model, "project-model");
        assert_eq!(service.endpoint, "http://127.0.0.1:8787/api/claude");
        assert_eq!(service.timeout_secs, 45);
        assert_eq!(service.max_tokens, 1500);
        assert_eq!(cfg.proxy().bind, "127.0.0.1:9999");
    }

    #[test]
    fn load_config_rejects_invalid_weights() {
        let root = TempDir::new().expect("root temp dir should be created");
        fs::write(
            root.path().join(DEFAULT_CONFIG_FILE),
            r#"
[blend]
heuristic = 0.9
pass_1 = 0.9
pass_2 = 0.9
"#,
        )
        .expect("project config should write");

        let result = load_config_with_global(root.path(), None);
        assert!(matches!(result, Err(AppError::ConfigParse(_))));
    }

    #[test]
    fn load_config_reports_malformed_toml_with_path() {
        let root = TempDir::new().expect("root temp dir should be created");
        fs::write(root.path().join(DEFAULT_CONFIG_FILE), "[service\nmodel = 1")
            .expect("project config should write");

        let err = load_config_with_global(root.path(), None).expect_err("parse should fail");
        assert!(err.to_string().contains(DEFAULT_CONFIG_FILE));
    }
}
