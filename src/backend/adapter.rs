use super::{AuthComponent, AuthPolicy, CmsBackend, EmbeddedTokenAuth, GitHubApiOptions, LogoutAction};
use crate::error::NexusError;
use crate::types::CmsManifest;
use crate::types::cms::{
    AssetProxy, BackendStatus, Credentials, Cursor, CursorPage, DeployPreview, DisplayUrl, Entry,
    ImplementationEntry, ImplementationFile, MediaFile, PersistOptions, UnpublishedEntry,
    UnpublishedLookup, User,
};
use async_trait::async_trait;

/// GitHub backend with authentication swapped for an [`AuthPolicy`].
///
/// Holds nothing besides the wrapped backend, the policy and the manifest it
/// was built from.
pub struct LuvaBackend<B, A = EmbeddedTokenAuth> {
    inner: B,
    auth: A,
    manifest: CmsManifest,
}

impl<B: CmsBackend> LuvaBackend<B, EmbeddedTokenAuth> {
    /// Build the inner backend from the manifest and authenticate with the
    /// token embedded in it.
    pub fn from_manifest<F>(manifest: CmsManifest, build: F) -> Result<Self, NexusError>
    where
        F: FnOnce(GitHubApiOptions) -> B,
    {
        let options = GitHubApiOptions::from_manifest(&manifest)?;
        let auth = EmbeddedTokenAuth::new(options.token.clone());
        Ok(Self::new(build(options), auth, manifest))
    }
}

impl<B: CmsBackend, A: AuthPolicy> LuvaBackend<B, A> {
    pub fn new(inner: B, auth: A, manifest: CmsManifest) -> Self {
        Self {
            inner,
            auth,
            manifest,
        }
    }

    pub fn manifest(&self) -> &CmsManifest {
        &self.manifest
    }

    pub fn inner(&self) -> &B {
        &self.inner
    }

    pub fn auth_component(&self) -> AuthComponent {
        self.auth.auth_component()
    }

    pub fn authenticate(&self, credentials: Credentials) -> Result<User, NexusError> {
        self.auth.authenticate(credentials)
    }

    pub fn restore_user(&self, user: User) -> Result<User, NexusError> {
        self.auth.restore_user(user)
    }

    pub fn get_token(&self) -> Result<String, NexusError> {
        self.auth.get_token()
    }

    pub fn logout(&self) -> LogoutAction {
        self.auth.logout()
    }
}

#[async_trait]
impl<B: CmsBackend, A: AuthPolicy> CmsBackend for LuvaBackend<B, A> {
    fn is_git_backend(&self) -> bool {
        true
    }

    async fn get_entry(&self, path: &str) -> Result<ImplementationEntry, NexusError> {
        self.inner.get_entry(path).await
    }

    async fn entries_by_folder(
        &self,
        folder: &str,
        extension: &str,
        depth: u32,
    ) -> Result<Vec<ImplementationEntry>, NexusError> {
        self.inner.entries_by_folder(folder, extension, depth).await
    }

    async fn all_entries_by_folder(
        &self,
        folder: &str,
        extension: &str,
        depth: u32,
        path_pattern: Option<&str>,
    ) -> Result<Vec<ImplementationEntry>, NexusError> {
        self.inner
            .all_entries_by_folder(folder, extension, depth, path_pattern)
            .await
    }

    async fn entries_by_files(
        &self,
        files: &[ImplementationFile],
    ) -> Result<Vec<ImplementationEntry>, NexusError> {
        self.inner.entries_by_files(files).await
    }

    async fn persist_entry(&self, entry: &Entry, opts: &PersistOptions) -> Result<(), NexusError> {
        self.inner.persist_entry(entry, opts).await
    }

    async fn delete_files(
        &self,
        paths: &[String],
        commit_message: &str,
    ) -> Result<(), NexusError> {
        self.inner.delete_files(paths, commit_message).await
    }

    async fn get_media_display_url(
        &self,
        display_url: &DisplayUrl,
    ) -> Result<String, NexusError> {
        self.inner.get_media_display_url(display_url).await
    }

    async fn get_media(&self, folder: Option<&str>) -> Result<Vec<MediaFile>, NexusError> {
        let folder = folder.or_else(|| self.manifest.str_field("media_folder"));
        self.inner.get_media(folder).await
    }

    async fn get_media_file(&self, path: &str) -> Result<MediaFile, NexusError> {
        self.inner.get_media_file(path).await
    }

    async fn persist_media(
        &self,
        file: &AssetProxy,
        opts: &PersistOptions,
    ) -> Result<MediaFile, NexusError> {
        self.inner.persist_media(file, opts).await
    }

    async fn unpublished_entries(&self) -> Result<Vec<String>, NexusError> {
        self.inner.unpublished_entries().await
    }

    async fn unpublished_entry(
        &self,
        lookup: &UnpublishedLookup,
    ) -> Result<UnpublishedEntry, NexusError> {
        self.inner.unpublished_entry(lookup).await
    }

    async fn unpublished_entry_data_file(
        &self,
        collection: &str,
        slug: &str,
        path: &str,
        id: &str,
    ) -> Result<String, NexusError> {
        self.inner
            .unpublished_entry_data_file(collection, slug, path, id)
            .await
    }

    async fn unpublished_entry_media_file(
        &self,
        collection: &str,
        slug: &str,
        path: &str,
        id: &str,
    ) -> Result<MediaFile, NexusError> {
        self.inner
            .unpublished_entry_media_file(collection, slug, path, id)
            .await
    }

    async fn update_unpublished_entry_status(
        &self,
        collection: &str,
        slug: &str,
        new_status: &str,
    ) -> Result<(), NexusError> {
        self.inner
            .update_unpublished_entry_status(collection, slug, new_status)
            .await
    }

    async fn publish_unpublished_entry(
        &self,
        collection: &str,
        slug: &str,
    ) -> Result<(), NexusError> {
        self.inner.publish_unpublished_entry(collection, slug).await
    }

    async fn delete_unpublished_entry(
        &self,
        collection: &str,
        slug: &str,
    ) -> Result<(), NexusError> {
        self.inner.delete_unpublished_entry(collection, slug).await
    }

    async fn get_deploy_preview(
        &self,
        collection: &str,
        slug: &str,
    ) -> Result<Option<DeployPreview>, NexusError> {
        self.inner.get_deploy_preview(collection, slug).await
    }

    async fn traverse_cursor(
        &self,
        cursor: &Cursor,
        action: &str,
    ) -> Result<CursorPage, NexusError> {
        self.inner.traverse_cursor(cursor, action).await
    }

    async fn status(&self) -> Result<BackendStatus, NexusError> {
        self.inner.status().await
    }
}
