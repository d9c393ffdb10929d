use std::collections::HashSet;
use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::card::employee::EmployeeRecord;

/// Maximum number of entries returned by [`Directory::suggest`] by default.
pub const SUGGESTION_LIMIT: usize = 20;

/// Failure to resolve a search token to a single employee.
///
/// The messages are shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("請輸入員工編號")]
    EmptyQuery,
    #[error("員工編號錯誤或尚未建檔，請確認員工編號或聯繫資安課")]
    NotFound(String),
}

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("failed to read directory {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse directory: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate employee id '{0}'")]
    DuplicateId(String),
}

/// Read-only employee snapshot, loaded once.
#[derive(Debug, Clone)]
pub struct Directory {
    records: Vec<EmployeeRecord>,
    fingerprint: String,
}

impl Directory {
    pub fn load(path: &Path) -> Result<Self, DirectoryError> {
        let raw = fs::read_to_string(path).map_err(|source| DirectoryError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let directory = Self::from_json(&raw)?;
        log::debug!(
            "loaded {} employees from {} (sha256 {})",
            directory.len(),
            path.display(),
            directory.fingerprint()
        );
        Ok(directory)
    }

    pub fn from_json(raw: &str) -> Result<Self, DirectoryError> {
        let records: Vec<EmployeeRecord> = serde_json::from_str(raw)?;
        let mut hasher = Sha256::new();
        hasher.update(raw.as_bytes());
        let fingerprint = format!("{:x}", hasher.finalize());
        Self::with_fingerprint(records, fingerprint)
    }

    fn with_fingerprint(
        records: Vec<EmployeeRecord>,
        fingerprint: String,
    ) -> Result<Self, DirectoryError> {
        let mut seen = HashSet::new();
        for record in &records {
            if !seen.insert(normalize_id(&record.id)) {
                return Err(DirectoryError::DuplicateId(record.id.clone()));
            }
        }
        Ok(Self {
            records,
            fingerprint,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[EmployeeRecord] {
        &self.records
    }

    /// SHA-256 of the snapshot the directory was built from.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Exact lookup on the normalized identifier.
    pub fn resolve(&self, query: &str) -> Result<&EmployeeRecord, LookupError> {
        let wanted = normalize_id(query);
        if wanted.is_empty() {
            return Err(LookupError::EmptyQuery);
        }
        self.records
            .iter()
            .find(|record| normalize_id(&record.id) == wanted)
            .ok_or_else(|| LookupError::NotFound(query.trim().to_string()))
    }

    /// Case-insensitive substring match on id and both names, in directory order.
    ///
    /// A blank query lists the first `limit` records.
    pub fn suggest(&self, query: &str, limit: usize) -> Vec<&EmployeeRecord> {
        let keyword = query.trim().to_lowercase();
        self.records
            .iter()
            .filter(|record| {
                keyword.is_empty()
                    || [&record.id, &record.name_zh, &record.name_en]
                        .iter()
                        .any(|field| field.to_lowercase().contains(&keyword))
            })
            .take(limit)
            .collect()
    }
}

/// Trim, drop one leading `E`/`e`, and lowercase.
pub fn normalize_id(raw: &str) -> String {
    let trimmed = raw.trim();
    let stripped = trimmed
        .strip_prefix('E')
        .or_else(|| trimmed.strip_prefix('e'))
        .unwrap_or(trimmed);
    stripped.to_lowercase()
}

/// Pull the identifier out of a full suggestion line such as `E0007 王小明 Ming`.
///
/// Returns the input unchanged unless it starts with `E` and at least four digits.
pub fn extract_id(input: &str) -> String {
    let trimmed = input.trim();
    let mut chars = trimmed.char_indices();
    match chars.next() {
        Some((_, 'E' | 'e')) => {}
        _ => return input.to_string(),
    }
    let end = chars
        .find(|(_, ch)| !ch.is_ascii_digit())
        .map(|(idx, _)| idx)
        .unwrap_or(trimmed.len());
    if end - 1 >= 4 {
        trimmed[..end].to_ascii_uppercase()
    } else {
        input.to_string()
    }
}
