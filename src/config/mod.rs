#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};
use std::collections::HashMap;
use toml_config::TomlConfig;

pub const DEFAULT_BASE_URL: &str = "https://swapi.dev/api";

/// 合併 TOML 檔與命令列後的最終設定
#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: String,
    pub headers: HashMap<String, String>,
    pub output_path: Option<String>,
    pub pretty: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            headers: HashMap::new(),
            output_path: None,
            pretty: false,
        }
    }
}

impl Settings {
    pub fn from_toml(config: TomlConfig) -> Self {
        let defaults = Self::default();
        Self {
            base_url: config.source.base_url.unwrap_or(defaults.base_url),
            headers: config.source.headers.unwrap_or_default(),
            output_path: config.output.path,
            pretty: config.output.pretty.unwrap_or(defaults.pretty),
        }
    }

    /// 命令列有指定的值覆蓋檔案設定
    pub fn apply_overrides(
        mut self,
        base_url: Option<String>,
        headers: Vec<(String, String)>,
        output_path: Option<String>,
        pretty: bool,
    ) -> Self {
        if let Some(base_url) = base_url {
            self.base_url = base_url;
        }
        self.headers.extend(headers);
        if output_path.is_some() {
            self.output_path = output_path;
        }
        self.pretty |= pretty;
        self
    }
}

impl ConfigProvider for Settings {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    fn output_path(&self) -> Option<&str> {
        self.output_path.as_deref()
    }

    fn pretty(&self) -> bool {
        self.pretty
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", &self.base_url)?;
        if let Some(path) = &self.output_path {
            validate_non_empty_string("output_path", path)?;
        }
        Ok(())
    }
}
