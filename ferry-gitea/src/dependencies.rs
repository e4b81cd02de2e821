//! Cross-issue dependency listing
//!
//! Dependencies are captured into the archive but never replayed on import,
//! since issue numbers differ between instances.

use crate::models::Dependency;
use crate::{GiteaClient, Result};
use tracing::{debug, warn};

impl GiteaClient {
    /// List the issues this issue depends on
    ///
    /// The dependencies endpoint only exists on instances with issue
    /// dependencies enabled, so a 404 is an empty list. Any other error is
    /// logged and also degrades to an empty list rather than aborting the
    /// export of the issue.
    pub async fn issue_dependencies(&self, issue_number: u64) -> Result<Vec<Dependency>> {
        debug!(issue_number, "Fetching issue dependencies");

        let url = format!("{}/issues/{}/dependencies", self.repo_url(), issue_number);
        match self.get_json(&url, &[]).await {
            Ok(deps) => Ok(deps),
            Err(e) if e.is_not_found() => Ok(Vec::new()),
            Err(e) => {
                warn!(issue_number, error = %e, "Failed to fetch issue dependencies");
                Ok(Vec::new())
            }
        }
    }
}
