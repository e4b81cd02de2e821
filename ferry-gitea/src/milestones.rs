//! Milestone listing and creation

use crate::models::{CreateMilestoneRequest, Milestone};
use crate::{GiteaClient, Result};
use tracing::{debug, info};

impl GiteaClient {
    /// List every milestone defined on the repository
    pub async fn list_milestones(&self) -> Result<Vec<Milestone>> {
        debug!("Listing milestones");

        let url = format!("{}/milestones", self.repo_url());
        self.get_paginated(&url, &[("state", "all".to_string())]).await
    }

    /// Create a milestone, returning its new id
    ///
    /// Returns `Ok(None)` on a 409, meaning the title already exists.
    pub async fn create_milestone(&self, request: &CreateMilestoneRequest) -> Result<Option<u64>> {
        debug!(title = %request.title, "Creating milestone");

        let url = format!("{}/milestones", self.repo_url());
        match self.post_json::<Milestone, _>(&url, request).await {
            Ok(milestone) => {
                info!(title = %milestone.title, id = milestone.id, "Created milestone");
                Ok(Some(milestone.id))
            }
            Err(e) if e.is_conflict() => {
                info!(title = %request.title, "Milestone already exists");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::client::testutil::test_client;
    use crate::models::CreateMilestoneRequest;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_create_milestone_returns_id() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/repos/owner/repo/milestones"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": 7, "title": "v1"
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let id = client
            .create_milestone(&CreateMilestoneRequest {
                title: "v1".to_string(),
                description: String::new(),
            })
            .await
            .unwrap();
        assert_eq!(id, Some(7));
    }
}
