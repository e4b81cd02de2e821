//! Comment listing

use crate::models::Comment;
use crate::{GiteaClient, Result};
use tracing::debug;

impl GiteaClient {
    /// List the comments of one issue
    ///
    /// A single request; the comments endpoint is not walked page by page.
    /// Errors propagate, comments are core data the export cannot do without.
    pub async fn list_comments(&self, issue_number: u64) -> Result<Vec<Comment>> {
        debug!(issue_number, "Fetching comments");

        let url = format!("{}/issues/{}/comments", self.repo_url(), issue_number);
        self.get_json(&url, &[]).await
    }
}

#[cfg(test)]
mod tests {
    use crate::client::testutil::test_client;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_list_comments() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/repos/owner/repo/issues/3/comments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 10, "body": "first"},
                {"id": 11, "body": "second"}
            ])))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let comments = client.list_comments(3).await.unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].id, 10);
        assert_eq!(comments[1].body.as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_list_comments_propagates_errors() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        assert!(client.list_comments(3).await.is_err());
    }
}
