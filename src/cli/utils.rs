//! Convenience helpers shared across command handlers.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use namecard::{
    ApproximateMeasure, CardFonts, CardSession, Config, Directory, EmployeeRecord, FrontFace,
    TextMeasure, load_directory,
};

use crate::cli::GlobalArgs;

/// Config plus the directory snapshot it points at.
pub struct AppContext {
    pub config: Config,
    pub directory: Directory,
}

/// Resolve config and load the directory, honouring `--directory`.
pub fn load_context(global: &GlobalArgs) -> Result<AppContext> {
    let mut config = load_config(global)?;
    if let Some(path) = &global.directory {
        config.directory = path.clone();
    }
    let directory = load_directory(&config)?;
    log::debug!(
        "directory {} ({} records, sha256 {})",
        config.directory.display(),
        directory.len(),
        directory.fingerprint()
    );
    Ok(AppContext { config, directory })
}

pub fn load_config(global: &GlobalArgs) -> Result<Config> {
    Config::load(global.config.as_deref())
}

/// Fonts when configured, otherwise a metric-free estimate.
pub fn measurer(config: &Config) -> Result<Box<dyn TextMeasure>> {
    if config.fonts.latin.is_none() {
        log::warn!("no fonts configured; title wrapping uses estimated widths");
        return Ok(Box::new(ApproximateMeasure));
    }
    let fonts = CardFonts::load(&config.fonts).context("failed to load card fonts")?;
    Ok(Box::new(fonts))
}

/// Select `query` in a fresh session, turning a lookup miss into an error.
pub fn select(directory: &Directory, query: &str) -> Result<CardSession> {
    let mut session = CardSession::new();
    session
        .search(directory, query)
        .with_context(|| format!("no employee for '{}'", query.trim()))?;
    Ok(session)
}

pub fn print_record(record: &EmployeeRecord) {
    let rows = [
        ("員工編號", &record.id),
        ("員工姓名(中)", &record.name_zh),
        ("員工姓名(英)", &record.name_en),
        ("部門(中)", &record.department_zh),
        ("部門(英)", &record.department_en),
        ("職位(中)", &record.title_zh),
        ("職位(英)", &record.title_en),
        ("信箱", &record.email),
        ("分機(苗栗)", &record.miaoli_extension),
        ("分機(台北)", &record.taipei_extension),
    ];
    for (label, value) in rows {
        if !value.is_empty() {
            println!("{}: {}", label, value);
        }
    }
}

/// Plain-text rendering of a composed front face.
pub fn describe_front(face: &FrontFace) -> String {
    let mut out = String::new();
    for line in face.header_lines() {
        if line.text.is_empty() {
            continue;
        }
        out.push_str(&format!("{:>7.2}  {}\n", line.y, line.text));
    }
    out.push('\n');
    for row in &face.rows {
        out.push_str(&format!(
            "{:>7.2}  [{}] {}\n",
            row.y,
            row.icon.asset_name(),
            row.text
        ));
    }
    out
}

/// Persist a string either to a file or stdout when `-` is provided.
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    if path.as_os_str() == "-" {
        io::stdout().write_all(content.as_bytes())?;
        return Ok(());
    }
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}

/// Final PNG path: `output` itself when it names a `.png`, else `output/<default_name>`.
pub fn resolve_png_target(output: &Path, default_name: &str) -> Result<PathBuf> {
    let is_file_target = output
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("png"))
        .unwrap_or(false);
    if is_file_target {
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create output directory {}", parent.display())
                })?;
            }
        }
        return Ok(output.to_path_buf());
    }
    fs::create_dir_all(output)
        .with_context(|| format!("failed to create output directory {}", output.display()))?;
    Ok(output.join(default_name))
}

/// `王小明.png` → `王小明-back.png`.
pub fn suffixed(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{}-{}.png", stem, suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_target_is_used_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out").join("x.png");
        assert_eq!(resolve_png_target(&target, "card.png").unwrap(), target);
        assert!(dir.path().join("out").is_dir());
    }

    #[test]
    fn directory_target_gets_default_name() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("cards");
        assert_eq!(
            resolve_png_target(&target, "王小明.png").unwrap(),
            target.join("王小明.png")
        );
    }

    #[test]
    fn suffix_keeps_directory() {
        assert_eq!(
            suffixed(Path::new("/tmp/王小明.png"), "back"),
            PathBuf::from("/tmp/王小明-back.png")
        );
    }
}
