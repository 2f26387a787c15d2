use crate::entity::Endpoint;
use crate::error::{RestError, Result};
use crate::rest::RequestOptions;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Filename used for an export when the server suggests none.
pub const DEFAULT_EXPORT_FILENAME: &str = "export.zip";

/// Strategy applied server-side when an imported entity already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OnConflict {
    /// Keep the existing entity (204)
    Ignore,
    /// Report a conflict (409)
    Fail,
    /// Overwrite the existing entity (200)
    Update,
}

impl OnConflict {
    /// Wire value of the strategy
    pub fn as_str(&self) -> &'static str {
        match self {
            OnConflict::Ignore => "IGNORE",
            OnConflict::Fail => "FAIL",
            OnConflict::Update => "UPDATE",
        }
    }
}

impl fmt::Display for OnConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OnConflict {
    type Err = RestError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "IGNORE" => Ok(OnConflict::Ignore),
            "FAIL" => Ok(OnConflict::Fail),
            "UPDATE" => Ok(OnConflict::Update),
            _ => Err(RestError::InvalidArgument(format!(
                "unknown conflict strategy {:?}, expected IGNORE, FAIL or UPDATE",
                s
            ))),
        }
    }
}

/// Outcome of importing a single entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportStatus {
    pub id: String,
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
    /// Any other field, passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ImportStatus {
    /// 200 (updated), 201 (created) and 204 (ignored) count as success
    pub fn is_success(&self) -> bool {
        matches!(self.status, 200 | 201 | 204)
    }
}

/// Import report keyed by entity type name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImportReport(pub BTreeMap<String, Vec<ImportStatus>>);

impl ImportReport {
    /// Statuses for one entity type
    pub fn entity_type(&self, name: &str) -> &[ImportStatus] {
        self.0.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every status with its entity type
    pub fn statuses(&self) -> impl Iterator<Item = (&str, &ImportStatus)> {
        self.0
            .iter()
            .flat_map(|(kind, list)| list.iter().map(move |s| (kind.as_str(), s)))
    }

    /// Find the status reported for an entity id
    pub fn find(&self, id: &str) -> Option<&ImportStatus> {
        self.statuses().map(|(_, s)| s).find(|s| s.id == id)
    }

    /// Check whether every entity was imported successfully
    pub fn all_succeeded(&self) -> bool {
        self.statuses().all(|(_, s)| s.is_success())
    }

    /// Check whether the report is empty
    pub fn is_empty(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }
}

/// Archive downloaded by an export.
#[derive(Debug, Clone)]
pub struct Export {
    /// Opaque archive bytes
    pub bytes: Vec<u8>,
    /// Filename suggested by the server
    pub filename: Option<String>,
}

impl Export {
    /// Suggested filename, or [`DEFAULT_EXPORT_FILENAME`]
    pub fn filename(&self) -> &str {
        self.filename.as_deref().unwrap_or(DEFAULT_EXPORT_FILENAME)
    }

    /// Write the archive into `dir` under its suggested filename
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        // only the last component of the suggestion is trusted
        let name = Path::new(self.filename())
            .file_name()
            .map(|n| n.to_owned())
            .unwrap_or_else(|| DEFAULT_EXPORT_FILENAME.into());
        let path = dir.join(name);
        fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// Bulk export/import, bound to a product's base URL.
///
/// The archive is opaque and never decoded here.
pub trait BackupRestore: Endpoint {
    /// `GET {base}/export`
    fn export(&self) -> Result<Export> {
        let response = self
            .client()
            .execute_transfer(Method::GET, "export", RequestOptions::new())?;
        debug!(bytes = response.body.len(), filename = ?response.filename, "export downloaded");
        Ok(Export {
            filename: response.filename.clone(),
            bytes: response.into_bytes(),
        })
    }

    /// `POST {base}/import?onConflict=...` with the file as multipart field `file`
    ///
    /// A missing or unreadable file fails before any request is sent. Any 2xx response,
    /// including 207 Multi-Status, is decoded as the report.
    fn import(&self, on_conflict: OnConflict, file: &Path) -> Result<ImportReport> {
        if file.is_dir() {
            return Err(RestError::FileNotFound(file.to_path_buf()));
        }
        let content = fs::read(file).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => RestError::FileNotFound(file.to_path_buf()),
            _ => RestError::FileUnreadable {
                path: file.to_path_buf(),
                source: e,
            },
        })?;
        let file_name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_EXPORT_FILENAME.to_string());

        let options = RequestOptions::new()
            .query("onConflict", on_conflict.as_str())
            .file("file", file_name, content);
        let response = self
            .client()
            .execute_transfer(Method::POST, "import", options)?;

        if response.is_no_content() {
            return Ok(ImportReport::default());
        }
        response.apply()
    }
}
