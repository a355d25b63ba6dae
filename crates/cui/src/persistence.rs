use lotto_core::LottoConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const SAVE_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SavedAction {
    pub action: String,
    #[serde(default)]
    pub number: Option<u8>,
}

impl SavedAction {
    pub fn add(number: u8) -> Self {
        Self {
            action: "add".to_string(),
            number: Some(number),
        }
    }

    pub fn draw() -> Self {
        Self {
            action: "draw".to_string(),
            number: None,
        }
    }

    pub fn reset() -> Self {
        Self {
            action: "reset".to_string(),
            number: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedSession {
    pub version: u32,
    pub locale: String,
    pub seed: u64,
    #[serde(default)]
    pub config: LottoConfig,
    pub actions: Vec<SavedAction>,
}

#[derive(Debug, Clone)]
pub struct AutoPerformScript {
    pub locale: Option<String>,
    pub seed: Option<u64>,
    pub config: Option<LottoConfig>,
    pub actions: Vec<SavedAction>,
}

#[derive(Debug, Clone, Deserialize)]
struct AutoPerformScriptFile {
    #[serde(default)]
    locale: Option<String>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    config: Option<LottoConfig>,
    #[serde(default)]
    actions: Vec<SavedAction>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum AutoPerformPayload {
    SavedSession(SavedSession),
    Script(AutoPerformScriptFile),
    Actions(Vec<SavedAction>),
}

pub fn default_state_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("LOTTO_SAVE") {
        return Some(PathBuf::from(path));
    }
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".lotto_cui_state.json"))
}

pub fn save_state_file(
    locale_code: &str,
    seed: u64,
    config: &LottoConfig,
    actions: &[SavedAction],
    path: &Path,
) -> Result<(), String> {
    let payload = SavedSession {
        version: SAVE_SCHEMA_VERSION,
        locale: locale_code.to_string(),
        seed,
        config: config.clone(),
        actions: actions.to_vec(),
    };
    let body = serde_json::to_string_pretty(&payload).map_err(|err| err.to_string())?;
    fs::write(path, body).map_err(|err| err.to_string())
}

pub fn load_state_file(path: &Path) -> Result<SavedSession, String> {
    let body = fs::read_to_string(path).map_err(|err| err.to_string())?;
    let payload: SavedSession = serde_json::from_str(&body).map_err(|err| err.to_string())?;
    check_version(payload.version)?;
    Ok(payload)
}

pub fn load_auto_perform_file(path: &Path) -> Result<AutoPerformScript, String> {
    let body = fs::read_to_string(path).map_err(|err| err.to_string())?;
    let payload: AutoPerformPayload = serde_json::from_str(&body).map_err(|err| err.to_string())?;
    let script = match payload {
        AutoPerformPayload::SavedSession(saved) => {
            check_version(saved.version)?;
            AutoPerformScript {
                locale: Some(saved.locale),
                seed: Some(saved.seed),
                config: Some(saved.config),
                actions: saved.actions,
            }
        }
        AutoPerformPayload::Script(script) => AutoPerformScript {
            locale: script.locale,
            seed: script.seed,
            config: script.config,
            actions: script.actions,
        },
        AutoPerformPayload::Actions(actions) => AutoPerformScript {
            locale: None,
            seed: None,
            config: None,
            actions,
        },
    };
    Ok(script)
}

fn check_version(version: u32) -> Result<(), String> {
    if version != SAVE_SCHEMA_VERSION {
        return Err(format!(
            "unsupported save version {} (expected {})",
            version, SAVE_SCHEMA_VERSION
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn save_load_roundtrip() {
        let file = unique_temp_file();
        let actions = vec![SavedAction::add(7), SavedAction::add(22), SavedAction::draw()];
        let config = LottoConfig::default();
        save_state_file("ko_KR", 42, &config, &actions, &file).expect("save");
        let loaded = load_state_file(&file).expect("load");
        assert_eq!(loaded.version, SAVE_SCHEMA_VERSION);
        assert_eq!(loaded.locale, "ko_KR");
        assert_eq!(loaded.seed, 42);
        assert_eq!(loaded.config, config);
        assert_eq!(loaded.actions, actions);
        let _ = std::fs::remove_file(file);
    }

    #[test]
    fn load_rejects_other_schema_versions() {
        let file = unique_temp_file();
        let body = r#"{"version":9,"locale":"en_US","seed":1,"actions":[]}"#;
        std::fs::write(&file, body).expect("write");
        let err = load_state_file(&file).unwrap_err();
        assert!(err.contains("unsupported save version 9"));
        let _ = std::fs::remove_file(file);
    }

    #[test]
    fn load_auto_perform_from_actions_array() {
        let file = unique_temp_file();
        let body = r#"
[
  {"action":"add","number":3},
  {"action":"draw"}
]
"#;
        std::fs::write(&file, body).expect("write");
        let loaded = load_auto_perform_file(&file).expect("load auto");
        assert_eq!(loaded.seed, None);
        assert_eq!(loaded.locale, None);
        assert_eq!(loaded.actions, vec![SavedAction::add(3), SavedAction::draw()]);
        let _ = std::fs::remove_file(file);
    }

    #[test]
    fn load_auto_perform_from_script_object() {
        let file = unique_temp_file();
        let body = r#"
{
  "locale":"ko_KR",
  "seed":99,
  "actions":[{"action":"reset"}]
}
"#;
        std::fs::write(&file, body).expect("write");
        let loaded = load_auto_perform_file(&file).expect("load auto");
        assert_eq!(loaded.seed, Some(99));
        assert_eq!(loaded.locale.as_deref(), Some("ko_KR"));
        assert_eq!(loaded.actions, vec![SavedAction::reset()]);
        assert_eq!(loaded.config, None);
        let _ = std::fs::remove_file(file);
    }

    #[test]
    fn auto_perform_from_saved_session_keeps_its_config() {
        let file = unique_temp_file();
        let config = LottoConfig {
            max_number: 49,
            ..LottoConfig::default()
        };
        let actions = vec![SavedAction::add(49), SavedAction::draw()];
        save_state_file("en_US", 11, &config, &actions, &file).expect("save");
        let loaded = load_auto_perform_file(&file).expect("load auto");
        assert_eq!(loaded.seed, Some(11));
        assert_eq!(loaded.config, Some(config));
        assert_eq!(loaded.actions, actions);
        let _ = std::fs::remove_file(file);
    }

    fn unique_temp_file() -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "lotto_cui_persistence_test_{}_{}.json",
            std::process::id(),
            nanos
        ))
    }
}
