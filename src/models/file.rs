//! File storage models: stored file metadata, the backend directory tree,
//! and the normalized shape the tree synthesizer consumes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A thumbnail extracted from an uploaded file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThumbnailInfo {
    pub index: u32,
    pub width: u32,
    pub height: u32,
    pub format: String,
    pub size: u64,
}

/// Backend-owned metadata for one stored file.
///
/// The client holds read-only copies and never mutates them except by
/// re-fetching after the backend confirms a change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub file_storage_id: String,
    pub file_name: String,
    pub file_format: String,
    pub file_size: u64,
    pub file_hash: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub thumbnails: Vec<ThumbnailInfo>,
    /// Dynamic analysis bag; may carry a virtual folder path under
    /// historical field names
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

/// Response shape of the file listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilesListResponse {
    pub files: Vec<FileRecord>,
    pub total_count: u64,
}

/// PATCH body for updating a file's name, virtual path, or metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

/// Request body for reserving an empty virtual directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDirectoryRequest {
    pub path: String,
}

/// Response of directory reservation: the marker id that makes the empty
/// directory addressable and deletable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDirectoryResponse {
    pub empty_directory_id: String,
}

/// Node kind tag in the backend directory tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    File,
    Directory,
}

/// One node of the backend-provided pre-nested directory tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryEntry {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    #[serde(default)]
    pub children: Vec<DirectoryEntry>,
    /// Marker id for a directory that exists only as an empty placeholder
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_directory_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<FileRecord>,
}

/// Root of the backend directory tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryTree {
    #[serde(default)]
    pub children: Vec<DirectoryEntry>,
}

/// A file record normalized to one canonical virtual-path shape.
///
/// Historical metadata field names (`path`, `_path`, `_originalFileName`) are
/// probed once here, at the ingestion boundary, so the tree synthesizer only
/// ever sees a resolved folder and leaf name.
#[derive(Debug, Clone)]
pub struct VirtualFile {
    /// Virtual folder path, `""` for the root
    pub folder: String,
    /// Leaf file name
    pub name: String,
    pub record: FileRecord,
}

impl VirtualFile {
    /// Normalize one record. Returns `None` for a record whose derived leaf
    /// name is empty (malformed metadata); such records are rejected rather
    /// than given a placeholder name.
    pub fn from_record(record: FileRecord) -> Option<Self> {
        let raw = resolve_raw_path(&record);

        let (folder, name) = match raw.rfind('/') {
            Some(pos) => (raw[..pos].to_string(), raw[pos + 1..].to_string()),
            None => (String::new(), raw),
        };

        if name.is_empty() {
            tracing::warn!(
                file_storage_id = %record.file_storage_id,
                "Rejecting file record with empty derived name"
            );
            return None;
        }

        Some(Self {
            folder,
            name,
            record,
        })
    }

    /// Normalize a whole listing, dropping rejected records.
    pub fn from_records(records: Vec<FileRecord>) -> Vec<Self> {
        records.into_iter().filter_map(Self::from_record).collect()
    }

    /// Full virtual path of this file.
    pub fn path(&self) -> String {
        if self.folder.is_empty() {
            self.name.clone()
        } else {
            format!("{}/{}", self.folder, self.name)
        }
    }
}

/// Probe the historical metadata field names in their fallback order,
/// defaulting to the display name.
fn resolve_raw_path(record: &FileRecord) -> String {
    for key in ["path", "_path", "_originalFileName"] {
        if let Some(Value::String(value)) = record.metadata.get(key) {
            if !value.is_empty() {
                return value.clone();
            }
        }
    }
    record.file_name.clone()
}
