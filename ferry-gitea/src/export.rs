//! Export orchestration
//!
//! Walks every issue of the source repository, enriches it with comments,
//! reactions, dependencies, and optionally attachments, and assembles the
//! ordered list of [`IssueArchive`] aggregates.

use std::path::PathBuf;

use tracing::info;

use crate::archive::IssueArchive;
use crate::{GiteaClient, Result};

/// Options for one export run
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Directory to download attachments into; `None` skips attachments
    pub attachments_dir: Option<PathBuf>,
}

impl GiteaClient {
    /// Export every issue of the repository, all states, in server order
    pub async fn export_issues(&self, options: &ExportOptions) -> Result<Vec<IssueArchive>> {
        let issues = self.list_all_issues().await?;
        let mut archives = Vec::with_capacity(issues.len());

        for mut issue in issues {
            let number = issue.number;
            info!(number, title = %issue.title, "Processing issue");

            let mut comments = self.list_comments(number).await?;
            let reactions = self.issue_reactions(number).await?;
            let dependencies = self.issue_dependencies(number).await?;

            if let Some(ref dir) = options.attachments_dir {
                let attachments = self.issue_attachments(number).await?;
                if !attachments.is_empty() {
                    info!(number, count = attachments.len(), "Found issue attachments");
                }
                let downloaded = self.save_issue_attachments(number, &attachments, dir).await;
                issue.attachments = Some(attachments);
                issue.downloaded_attachments = Some(downloaded);
            }

            for comment in &mut comments {
                comment.reactions = Some(self.comment_reactions(comment.id).await?);

                if let Some(ref dir) = options.attachments_dir {
                    let attachments = self.comment_attachments(comment.id).await?;
                    if !attachments.is_empty() {
                        info!(
                            comment_id = comment.id,
                            count = attachments.len(),
                            "Found comment attachments"
                        );
                    }
                    let downloaded = self
                        .save_comment_attachments(number, comment.id, &attachments, dir)
                        .await;
                    comment.attachments = Some(attachments);
                    comment.downloaded_attachments = Some(downloaded);
                }
            }

            archives.push(IssueArchive {
                issue,
                comments,
                reactions,
                dependencies,
            });
        }

        info!(count = archives.len(), "Export complete");

        Ok(archives)
    }
}
