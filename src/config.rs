use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    pub root: Root,
    pub server: Server,
    pub auth: Auth,
    #[serde(default)]
    pub limits: Limits,
    #[serde(default)]
    pub manager: Manager,
    #[serde(default)]
    pub permissions: Permissions,
    #[serde(default)]
    pub logging: Logging,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Root { pub root_dir: PathBuf }

impl Default for Root {
    fn default() -> Self { Self { root_dir: PathBuf::from(".") } }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Server {
    pub bind_addr: String,
    pub port: u16,
    #[serde(default = "default_base_path")]
    pub base_path: String,
}
fn default_base_path() -> String { "/fm".to_string() }

impl Default for Server {
    fn default() -> Self {
        Self { bind_addr: "127.0.0.1".to_string(), port: 8787, base_path: default_base_path() }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Auth {
    pub bearer_token: String,
    pub allowed_origins: Vec<String>,
}

impl Default for Auth {
    /// A fresh token is minted for every generated config file.
    fn default() -> Self {
        Self {
            bearer_token: uuid::Uuid::new_v4().simple().to_string(),
            allowed_origins: vec!["http://localhost".to_string()],
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Limits {
    pub max_request_kb: usize,
}

impl Default for Limits {
    fn default() -> Self { Self { max_request_kb: 64 } }
}

/// Browsing and editing knobs shared by every operation.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct Manager {
    pub allowed_identities: BTreeSet<String>,
    pub max_preview_lines: usize,
    pub items_per_page: usize,
    /// Highest line number `edit` accepts.
    pub max_edit_line: usize,
    pub protected_files: BTreeSet<String>,
}

impl Default for Manager {
    fn default() -> Self {
        Self {
            allowed_identities: BTreeSet::new(),
            max_preview_lines: 15,
            items_per_page: 10,
            max_edit_line: 100_000,
            protected_files: ["server.properties", "whitelist.json", "ops.json"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Privilege levels as assigned by the host; identities absent from `levels` sit at 0.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct Permissions {
    pub min_level: u8,
    pub levels: BTreeMap<String, u8>,
}

impl Default for Permissions {
    fn default() -> Self { Self { min_level: 3, levels: BTreeMap::new() } }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct Logging {
    pub level: String,
}

impl Default for Logging {
    fn default() -> Self { Self { level: "info".to_string() } }
}

/// Whether [`Config::load_or_init`] read an existing file or wrote the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource { Loaded, Initialized }

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)?;
        if is_json(path) {
            Ok(serde_json::from_str(&raw)?)
        } else {
            Ok(toml::from_str(&raw)?)
        }
    }

    /// Reads `path`, or persists `Config::default()` there when it does not exist yet.
    pub fn load_or_init(path: &Path) -> anyhow::Result<(Self, ConfigSource)> {
        if path.exists() {
            return Ok((Self::load(path)?, ConfigSource::Loaded));
        }
        let cfg = Self::default();
        cfg.save(path)?;
        Ok((cfg, ConfigSource::Initialized))
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let raw = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, raw)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.root.root_dir.is_dir() {
            anyhow::bail!("root_dir does not exist or is not a directory: {}", self.root.root_dir.display());
        }
        if self.auth.bearer_token.trim().is_empty() { anyhow::bail!("bearer_token must not be empty"); }
        if self.auth.allowed_origins.is_empty() { anyhow::bail!("allowed_origins must not be empty"); }
        if self.limits.max_request_kb == 0 { anyhow::bail!("max_request_kb must be > 0"); }
        if self.manager.items_per_page == 0 { anyhow::bail!("items_per_page must be > 0"); }
        if self.manager.max_preview_lines == 0 { anyhow::bail!("max_preview_lines must be > 0"); }
        if self.manager.max_edit_line == 0 { anyhow::bail!("max_edit_line must be > 0"); }
        Ok(())
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().map(|e| e == "json").unwrap_or(false)
}
