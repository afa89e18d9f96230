use std::{fs, io, path::Path};

use anyhow::Context;
use serde::Deserialize;
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "gallery.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:5000".into(),
            log_filter: "info".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    api_url: Option<String>,
    log_filter: Option<String>,
}

/// Command-line values, applied last.
#[derive(Debug, Default)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub log_filter: Option<String>,
}

/// Defaults, then the config file, then the environment, then the command line.
///
/// An explicitly named config file must exist; the default `gallery.toml` is optional.
pub fn load_settings(config_path: Option<&Path>, overrides: Overrides) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let (path, required) = match config_path {
        Some(path) => (path, true),
        None => (Path::new(DEFAULT_CONFIG_FILE), false),
    };
    match fs::read_to_string(path) {
        Ok(raw) => apply_file(&mut settings, &raw)
            .with_context(|| format!("invalid config file '{}'", path.display()))?,
        Err(err) if err.kind() == io::ErrorKind::NotFound && !required => {}
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read '{}'", path.display()));
        }
    }

    apply_env(&mut settings, |key| std::env::var(key).ok());

    if let Some(v) = overrides.api_url {
        settings.api_url = v;
    }
    if let Some(v) = overrides.log_filter {
        settings.log_filter = v;
    }

    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file_cfg.api_url {
        settings.api_url = v;
    }
    if let Some(v) = file_cfg.log_filter {
        settings.log_filter = v;
    }
    Ok(())
}

/// `APP__*` names win over the short `GALLERY_*` ones when both are set.
fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("GALLERY_API_URL") {
        settings.api_url = v;
    }
    if let Some(v) = var("APP__API_URL") {
        settings.api_url = v;
    }

    if let Some(v) = var("GALLERY_LOG") {
        settings.log_filter = v;
    }
    if let Some(v) = var("APP__LOG_FILTER") {
        settings.log_filter = v;
    }
}

impl Settings {
    pub fn api_base_url(&self) -> anyhow::Result<Url> {
        let raw = self.api_url.trim();
        let url = Url::parse(raw).with_context(|| format!("invalid api url '{raw}'"))?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!("api url '{raw}' must use http or https");
        }
        Ok(url)
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
