//! Issue listing and creation

use crate::models::{CreateIssueRequest, Issue};
use crate::{GiteaClient, Result};
use tracing::{debug, info};

impl GiteaClient {
    /// List every issue in the repository, open and closed, in server order
    pub async fn list_all_issues(&self) -> Result<Vec<Issue>> {
        debug!("Listing all issues");

        let url = format!("{}/issues", self.repo_url());
        let issues: Vec<Issue> = self
            .get_paginated(&url, &[("state", "all".to_string())])
            .await?;

        info!(count = issues.len(), "Fetched issues");

        Ok(issues)
    }

    /// Create an issue on this repository
    ///
    /// Label and milestone ids must already be valid on this instance; see
    /// the import orchestration for how they are resolved from natural keys.
    pub async fn create_issue(&self, request: &CreateIssueRequest) -> Result<Issue> {
        debug!(title = %request.title, "Creating issue");

        let url = format!("{}/issues", self.repo_url());
        let issue: Issue = self.post_json(&url, request).await?;

        info!(number = issue.number, title = %issue.title, "Created issue");

        Ok(issue)
    }
}
