//! Reaction listing for issues and comments

use crate::models::Reaction;
use crate::{GiteaClient, Result};
use tracing::debug;

impl GiteaClient {
    /// List the reactions on one issue
    ///
    /// Paginated; a 404 means the instance or issue predates reactions and
    /// yields an empty list.
    pub async fn issue_reactions(&self, issue_number: u64) -> Result<Vec<Reaction>> {
        debug!(issue_number, "Fetching issue reactions");

        let url = format!("{}/issues/{}/reactions", self.repo_url(), issue_number);
        self.get_paginated_or_empty(&url, &[]).await
    }

    /// List the reactions on one comment
    ///
    /// A single request; 404 yields an empty list.
    pub async fn comment_reactions(&self, comment_id: u64) -> Result<Vec<Reaction>> {
        debug!(comment_id, "Fetching comment reactions");

        let url = format!(
            "{}/issues/comments/{}/reactions",
            self.repo_url(),
            comment_id
        );
        match self.get_json(&url, &[]).await {
            Ok(reactions) => Ok(reactions),
            Err(e) if e.is_not_found() => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }
}
