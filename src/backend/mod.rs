//! Content backend seam for the CMS.
//!
//! [`CmsBackend`] is the capability set the CMS drives for reading and
//! writing content. [`LuvaBackend`] forwards all of it to a GitHub backend
//! and takes authentication from an [`AuthPolicy`] instead of a login flow.

pub mod adapter;
pub mod auth;
pub mod options;

use crate::error::NexusError;
use crate::types::cms::{
    AssetProxy, BackendStatus, Cursor, CursorPage, DeployPreview, DisplayUrl, Entry,
    ImplementationEntry, ImplementationFile, MediaFile, PersistOptions, UnpublishedEntry,
    UnpublishedLookup,
};
use async_trait::async_trait;

pub use adapter::LuvaBackend;
pub use auth::{AuthComponent, AuthPolicy, EmbeddedTokenAuth, LogoutAction};
pub use options::GitHubApiOptions;

#[async_trait]
pub trait CmsBackend: Send + Sync {
    fn is_git_backend(&self) -> bool {
        true
    }

    // === Entries ===

    async fn get_entry(&self, path: &str) -> Result<ImplementationEntry, NexusError>;

    async fn entries_by_folder(
        &self,
        folder: &str,
        extension: &str,
        depth: u32,
    ) -> Result<Vec<ImplementationEntry>, NexusError>;

    /// Every entry below `folder`, optionally filtered by a path pattern.
    async fn all_entries_by_folder(
        &self,
        folder: &str,
        extension: &str,
        depth: u32,
        path_pattern: Option<&str>,
    ) -> Result<Vec<ImplementationEntry>, NexusError>;

    async fn entries_by_files(
        &self,
        files: &[ImplementationFile],
    ) -> Result<Vec<ImplementationEntry>, NexusError>;

    async fn persist_entry(&self, entry: &Entry, opts: &PersistOptions) -> Result<(), NexusError>;

    async fn delete_files(&self, paths: &[String], commit_message: &str)
    -> Result<(), NexusError>;

    // === Media ===

    async fn get_media_display_url(&self, display_url: &DisplayUrl)
    -> Result<String, NexusError>;

    /// Media below `folder`, or below the backend's default media folder.
    async fn get_media(&self, folder: Option<&str>) -> Result<Vec<MediaFile>, NexusError>;

    async fn get_media_file(&self, path: &str) -> Result<MediaFile, NexusError>;

    async fn persist_media(
        &self,
        file: &AssetProxy,
        opts: &PersistOptions,
    ) -> Result<MediaFile, NexusError>;

    // === Editorial workflow ===

    /// Ids of every entry awaiting publication.
    async fn unpublished_entries(&self) -> Result<Vec<String>, NexusError>;

    async fn unpublished_entry(
        &self,
        lookup: &UnpublishedLookup,
    ) -> Result<UnpublishedEntry, NexusError>;

    async fn unpublished_entry_data_file(
        &self,
        collection: &str,
        slug: &str,
        path: &str,
        id: &str,
    ) -> Result<String, NexusError>;

    async fn unpublished_entry_media_file(
        &self,
        collection: &str,
        slug: &str,
        path: &str,
        id: &str,
    ) -> Result<MediaFile, NexusError>;

    async fn update_unpublished_entry_status(
        &self,
        collection: &str,
        slug: &str,
        new_status: &str,
    ) -> Result<(), NexusError>;

    async fn publish_unpublished_entry(&self, collection: &str, slug: &str)
    -> Result<(), NexusError>;

    async fn delete_unpublished_entry(&self, collection: &str, slug: &str)
    -> Result<(), NexusError>;

    async fn get_deploy_preview(
        &self,
        collection: &str,
        slug: &str,
    ) -> Result<Option<DeployPreview>, NexusError>;

    // === Misc ===

    async fn traverse_cursor(&self, cursor: &Cursor, action: &str)
    -> Result<CursorPage, NexusError>;

    async fn status(&self) -> Result<BackendStatus, NexusError>;
}
