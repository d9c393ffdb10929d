use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::card::layout::CompanyProfile;

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "namecard.toml";
pub const DEFAULT_DIRECTORY_FILE: &str = "employees.json";

/// Font files used for measuring and drawing text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Latin face for names, titles, phone numbers and email.
    pub latin: Option<PathBuf>,
    /// CJK face; falls back to `latin` when unset.
    pub cjk: Option<PathBuf>,
}

/// Optional raster assets for the two faces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub background: Option<PathBuf>,
    pub back: Option<PathBuf>,
    /// Directory holding `mobile.png`, `phone.png`, `map.png`, `email.png`, `vat.png`, `line.png`.
    pub icons_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output pixels per layout unit.
    pub pixel_ratio: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { pixel_ratio: 2 }
    }
}

/// Main configuration for namecard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Employee directory snapshot (JSON array).
    pub directory: PathBuf,
    pub fonts: FontConfig,
    pub assets: AssetConfig,
    pub company: CompanyProfile,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_DIRECTORY_FILE),
            fonts: FontConfig::default(),
            assets: AssetConfig::default(),
            company: CompanyProfile::default(),
            render: RenderConfig::default(),
        }
    }
}

impl Config {
    /// Load an explicit config file, or `namecard.toml` if present, or defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.exists() {
                    Self::load_from(fallback)
                } else {
                    log::debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load from a specific path. Relative paths inside are resolved against its directory.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        if let Some(base) = path.parent() {
            config.rebase(base);
        }
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    fn rebase(&mut self, base: &Path) {
        let join = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        join(&mut self.directory);
        for slot in [
            &mut self.fonts.latin,
            &mut self.fonts.cjk,
            &mut self.assets.background,
            &mut self.assets.back,
            &mut self.assets.icons_dir,
        ] {
            if let Some(p) = slot.as_mut() {
                join(p);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_file_yields_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.render.pixel_ratio, 2);
        assert_eq!(config.company.tax_id, "56153007");
    }

    #[test]
    fn partial_company_keeps_other_constants() {
        let config: Config = toml::from_str(
            r#"
            directory = "staff.json"
            [company]
            tax_id = "12345678"
            [fonts]
            latin = "fonts/Inter.ttf"
            "#,
        )
        .unwrap();
        assert_eq!(config.directory, PathBuf::from("staff.json"));
        assert_eq!(config.company.tax_id, "12345678");
        assert_eq!(config.company.taipei_phone, "02-7709-2525");
        assert_eq!(config.fonts.latin, Some(PathBuf::from("fonts/Inter.ttf")));
        assert_eq!(config.fonts.cjk, None);
    }

    #[test]
    fn load_from_rebases_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("namecard.toml");
        fs::write(&path, "directory = \"data/staff.json\"\n[assets]\nicons_dir = \"icons\"\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.directory, dir.path().join("data/staff.json"));
        assert_eq!(config.assets.icons_dir, Some(dir.path().join("icons")));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load(Some(&dir.path().join("nope.toml"))).is_err());
    }
}
