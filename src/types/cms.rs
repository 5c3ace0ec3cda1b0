//! Data exchanged between the CMS and a content backend.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A file in the content repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImplementationFile {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Raw entry content as read from the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImplementationEntry {
    pub data: String,
    pub file: ImplementationFile,
}

/// Entry about to be written, with its data file and attached media.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub data_files: Vec<DataFile>,
    #[serde(default)]
    pub assets: Vec<AssetProxy>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataFile {
    pub path: String,
    pub slug: String,
    pub raw: String,
    #[serde(default, rename = "newPath", skip_serializing_if = "Option::is_none")]
    pub new_path: Option<String>,
}

/// An uploaded media file on its way into the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetProxy {
    pub path: String,
    /// Base64-encoded file body.
    pub file_content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistOptions {
    pub commit_message: String,
    #[serde(default)]
    pub new_entry: bool,
    #[serde(default)]
    pub use_workflow: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaFile {
    pub name: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_url: Option<String>,
}

/// Either a plain URL or a media id resolved later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DisplayUrl {
    Url(String),
    Object { id: String, path: String },
}

/// Selects one editorial-workflow entry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UnpublishedLookup {
    pub id: Option<String>,
    pub collection: Option<String>,
    pub slug: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnpublishedEntry {
    pub slug: String,
    pub collection: String,
    pub status: String,
    pub diffs: Vec<UnpublishedDiff>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnpublishedDiff {
    pub id: String,
    pub path: String,
    pub new_file: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployPreview {
    pub url: String,
    pub status: String,
}

/// Opaque pagination state handed back by list operations.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Cursor {
    #[serde(default)]
    pub actions: Vec<String>,
    #[serde(default)]
    pub data: Map<String, Value>,
    #[serde(default)]
    pub meta: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CursorPage {
    pub entries: Vec<ImplementationEntry>,
    pub cursor: Cursor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendStatus {
    pub auth: bool,
    pub api: bool,
}

/// Whatever the login form (or our auto-login) hands to `authenticate`.
pub type Credentials = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub backend_name: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Credential fields passed through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
