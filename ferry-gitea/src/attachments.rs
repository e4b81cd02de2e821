//! Attachment listing and download
//!
//! Downloaded files land under the attachments root as
//! `issue_<n>/<name>` for issue attachments and
//! `issue_<n>/comment_<id>/<name>` for comment attachments. The recorded
//! `local_path` is relative to that root, so the archive stays portable as
//! long as the directory travels with it.

use std::path::Path;

use crate::models::{Attachment, DownloadedAttachment};
use crate::{GiteaClient, Result};
use tracing::{debug, info, warn};

impl GiteaClient {
    /// List the attachments of one issue
    ///
    /// 404 means the assets endpoint does not exist here; any other error is
    /// logged and degrades to an empty list.
    pub async fn issue_attachments(&self, issue_number: u64) -> Result<Vec<Attachment>> {
        debug!(issue_number, "Fetching issue attachments");

        let url = format!("{}/issues/{}/assets", self.repo_url(), issue_number);
        match self.get_json(&url, &[]).await {
            Ok(attachments) => Ok(attachments),
            Err(e) if e.is_not_found() => Ok(Vec::new()),
            Err(e) => {
                warn!(issue_number, error = %e, "Failed to fetch issue attachments");
                Ok(Vec::new())
            }
        }
    }

    /// List the attachments of one comment; same failure policy as
    /// [`issue_attachments`](Self::issue_attachments)
    pub async fn comment_attachments(&self, comment_id: u64) -> Result<Vec<Attachment>> {
        debug!(comment_id, "Fetching comment attachments");

        let url = format!("{}/issues/comments/{}/assets", self.repo_url(), comment_id);
        match self.get_json(&url, &[]).await {
            Ok(attachments) => Ok(attachments),
            Err(e) if e.is_not_found() => Ok(Vec::new()),
            Err(e) => {
                warn!(comment_id, error = %e, "Failed to fetch comment attachments");
                Ok(Vec::new())
            }
        }
    }

    /// Download all attachments of an issue into
    /// `<attachments_dir>/issue_<n>/`
    ///
    /// A failing attachment is logged and skipped; it contributes no record.
    pub async fn save_issue_attachments(
        &self,
        issue_number: u64,
        attachments: &[Attachment],
        attachments_dir: &Path,
    ) -> Vec<DownloadedAttachment> {
        let mut saved = Vec::new();
        let subdir = format!("issue_{}", issue_number);

        for attachment in attachments {
            info!(
                issue_number,
                name = attachment.name.as_deref().unwrap_or("<unnamed>"),
                "Downloading issue attachment"
            );
            let meta_url = format!(
                "{}/issues/{}/assets/{}",
                self.repo_url(),
                issue_number,
                attachment.id
            );
            if let Some(record) = self
                .download_attachment(&meta_url, attachments_dir, &subdir)
                .await
            {
                saved.push(record);
            }
        }

        saved
    }

    /// Download all attachments of a comment into
    /// `<attachments_dir>/issue_<n>/comment_<id>/`
    pub async fn save_comment_attachments(
        &self,
        issue_number: u64,
        comment_id: u64,
        attachments: &[Attachment],
        attachments_dir: &Path,
    ) -> Vec<DownloadedAttachment> {
        let mut saved = Vec::new();
        let subdir = format!("issue_{}/comment_{}", issue_number, comment_id);

        for attachment in attachments {
            info!(
                comment_id,
                name = attachment.name.as_deref().unwrap_or("<unnamed>"),
                "Downloading comment attachment"
            );
            let meta_url = format!(
                "{}/issues/comments/{}/assets/{}",
                self.repo_url(),
                comment_id,
                attachment.id
            );
            if let Some(record) = self
                .download_attachment(&meta_url, attachments_dir, &subdir)
                .await
            {
                saved.push(record);
            }
        }

        saved
    }

    /// Download one attachment, returning `None` (after logging) on any
    /// failure so a single bad attachment never aborts an export
    async fn download_attachment(
        &self,
        meta_url: &str,
        attachments_dir: &Path,
        subdir: &str,
    ) -> Option<DownloadedAttachment> {
        match self
            .try_download_attachment(meta_url, attachments_dir, subdir)
            .await
        {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(url = meta_url, error = %e, "Error downloading attachment");
                None
            }
        }
    }

    async fn try_download_attachment(
        &self,
        meta_url: &str,
        attachments_dir: &Path,
        subdir: &str,
    ) -> Result<DownloadedAttachment> {
        let info: Attachment = self.get_json(meta_url, &[]).await?;

        // Prefer the server-provided direct URL; older instances omit it and
        // serve the bytes under <metadata-url>/raw
        let download_url = match info.browser_download_url {
            Some(ref url) => url.clone(),
            None => {
                let url = format!("{}/raw", meta_url);
                debug!(url, "No browser_download_url, using constructed URL");
                url
            }
        };

        let bytes = self.get_bytes(&download_url).await?;

        let filename = match info.name {
            Some(ref name) if !name.is_empty() => name.clone(),
            _ => format!("attachment_{}", info.id),
        };

        let dir = attachments_dir.join(subdir);
        std::fs::create_dir_all(&dir)?;
        let filepath = dir.join(&filename);
        std::fs::write(&filepath, &bytes)?;

        debug!(path = %filepath.display(), size = bytes.len(), "Wrote attachment");

        Ok(DownloadedAttachment {
            local_path: format!("{}/{}", subdir, filename),
            attachment_info: info,
        })
    }
}
