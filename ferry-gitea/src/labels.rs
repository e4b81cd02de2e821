//! Label listing and creation

use crate::models::{CreateLabelRequest, Label};
use crate::{GiteaClient, Result};
use tracing::{debug, info};

impl GiteaClient {
    /// List every label defined on the repository
    pub async fn list_labels(&self) -> Result<Vec<Label>> {
        debug!("Listing labels");

        let url = format!("{}/labels", self.repo_url());
        self.get_paginated(&url, &[]).await
    }

    /// Create a label, returning its new id
    ///
    /// Returns `Ok(None)` when the server reports the name already exists
    /// (409), which callers treat as "reuse whatever is there".
    pub async fn create_label(&self, request: &CreateLabelRequest) -> Result<Option<u64>> {
        debug!(name = %request.name, "Creating label");

        let url = format!("{}/labels", self.repo_url());
        match self.post_json::<Label, _>(&url, request).await {
            Ok(label) => {
                info!(name = %label.name, id = label.id, "Created label");
                Ok(Some(label.id))
            }
            Err(e) if e.is_conflict() => {
                info!(name = %request.name, "Label already exists");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::client::testutil::test_client;
    use crate::models::CreateLabelRequest;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn bug_label() -> CreateLabelRequest {
        CreateLabelRequest {
            name: "bug".to_string(),
            color: "ee0701".to_string(),
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn test_create_label_returns_id() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/repos/owner/repo/labels"))
            .and(body_partial_json(serde_json::json!({"name": "bug"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": 42, "name": "bug", "color": "ee0701"
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let id = client.create_label(&bug_label()).await.unwrap();
        assert_eq!(id, Some(42));
    }

    #[tokio::test]
    async fn test_create_label_conflict_is_none() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(409).set_body_string("label already exists"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let id = client.create_label(&bug_label()).await.unwrap();
        assert_eq!(id, None);
    }
}
