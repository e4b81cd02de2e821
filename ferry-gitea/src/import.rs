//! Import orchestration
//!
//! Replays an archive against the target repository: labels and milestones
//! are resolved by natural key (name, title) and created when absent, then
//! each issue is created with the resolved ids. Comments, reactions,
//! dependencies, and attachments are read from the archive but intentionally
//! not replayed; this is an issues-only migration.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{info, warn};

use crate::archive::IssueArchive;
use crate::models::{CreateIssueRequest, CreateLabelRequest, CreateMilestoneRequest};
use crate::{GiteaClient, Result};

/// Counters for one import run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportReport {
    /// Issues created on the target
    pub issues_created: usize,
    /// Issues whose creation failed (logged, run continued)
    pub issues_failed: usize,
    /// Labels created on the target
    pub labels_created: usize,
    /// Milestones created on the target
    pub milestones_created: usize,
}

/// Name-to-id mappings on the target instance, seeded once per run
struct TargetRefs {
    labels: HashMap<String, u64>,
    milestones: HashMap<String, u64>,
}

impl GiteaClient {
    /// Import every archive entry, in file order
    ///
    /// Only the initial label/milestone listing can fail the run as a whole;
    /// per-issue failures are logged and counted.
    pub async fn import_archives(&self, archives: &[IssueArchive]) -> Result<ImportReport> {
        let mut report = ImportReport::default();

        let mut refs = TargetRefs {
            labels: self
                .list_labels()
                .await?
                .into_iter()
                .map(|l| (l.name, l.id))
                .collect(),
            milestones: self
                .list_milestones()
                .await?
                .into_iter()
                .map(|m| (m.title, m.id))
                .collect(),
        };

        info!(
            labels = refs.labels.len(),
            milestones = refs.milestones.len(),
            "Seeded target mappings"
        );

        for archive in archives {
            let issue = &archive.issue;

            let label_ids = self.resolve_labels(archive, &mut refs, &mut report).await;
            let milestone_id = self.resolve_milestone(archive, &mut refs, &mut report).await;

            let request = CreateIssueRequest {
                title: issue.title.clone(),
                body: issue.body.clone().unwrap_or_default(),
                labels: label_ids,
                milestone: milestone_id,
            };

            match self.create_issue(&request).await {
                Ok(created) => {
                    report.issues_created += 1;
                    info!(
                        source_number = issue.number,
                        target_number = created.number,
                        "Imported issue"
                    );
                }
                Err(e) => {
                    report.issues_failed += 1;
                    warn!(title = %issue.title, error = %e, "Failed to create issue");
                }
            }
        }

        info!(
            created = report.issues_created,
            failed = report.issues_failed,
            "Import complete"
        );

        Ok(report)
    }

    /// Map the issue's labels to target ids, creating missing labels
    ///
    /// A label that cannot be created (409 from a stale listing, or any
    /// other error) is skipped for this issue rather than failing the run.
    async fn resolve_labels(
        &self,
        archive: &IssueArchive,
        refs: &mut TargetRefs,
        report: &mut ImportReport,
    ) -> Vec<u64> {
        let mut ids = Vec::new();

        for label in &archive.issue.labels {
            if let Some(&id) = refs.labels.get(&label.name) {
                ids.push(id);
                continue;
            }

            match self.create_label(&CreateLabelRequest::from_label(label)).await {
                Ok(Some(id)) => {
                    refs.labels.insert(label.name.clone(), id);
                    ids.push(id);
                    report.labels_created += 1;
                }
                Ok(None) => {
                    // Already exists but was not in the seed listing; no id
                    // to attach, so this association is dropped
                }
                Err(e) => {
                    warn!(name = %label.name, error = %e, "Failed to create label");
                }
            }
        }

        ids
    }

    /// Map the issue's milestone to a target id, creating it if missing
    async fn resolve_milestone(
        &self,
        archive: &IssueArchive,
        refs: &mut TargetRefs,
        report: &mut ImportReport,
    ) -> Option<u64> {
        let milestone = archive.issue.milestone.as_ref()?;

        if let Some(&id) = refs.milestones.get(&milestone.title) {
            return Some(id);
        }

        match self
            .create_milestone(&CreateMilestoneRequest::from_milestone(milestone))
            .await
        {
            Ok(Some(id)) => {
                refs.milestones.insert(milestone.title.clone(), id);
                report.milestones_created += 1;
                Some(id)
            }
            Ok(None) => None,
            Err(e) => {
                warn!(title = %milestone.title, error = %e, "Failed to create milestone");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testutil::test_client;
    use crate::models::{Issue, Label, Milestone};
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn archive_with_label(title: &str, label: &str) -> IssueArchive {
        IssueArchive {
            issue: Issue {
                number: 1,
                title: title.to_string(),
                body: Some("body".to_string()),
                labels: vec![Label {
                    id: 99,
                    name: label.to_string(),
                    ..Default::default()
                }],
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Empty label and milestone listings on the target
    async fn mount_empty_seed(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/api/v1/repos/owner/repo/labels"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/repos/owner/repo/milestones"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_shared_label_created_once() {
        let server = MockServer::start().await;
        mount_empty_seed(&server).await;

        // The second issue must reuse the cached id, so exactly one create
        Mock::given(method("POST"))
            .and(path("/api/v1/repos/owner/repo/labels"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": 12, "name": "bug"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/v1/repos/owner/repo/issues"))
            .and(body_partial_json(serde_json::json!({"labels": [12]})))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "number": 1, "title": "t"
            })))
            .expect(2)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let archives = vec![
            archive_with_label("first", "bug"),
            archive_with_label("second", "bug"),
        ];
        let report = client.import_archives(&archives).await.unwrap();

        assert_eq!(report.issues_created, 2);
        assert_eq!(report.labels_created, 1);
    }

    #[tokio::test]
    async fn test_label_conflict_does_not_fail_issue() {
        let server = MockServer::start().await;
        mount_empty_seed(&server).await;

        Mock::given(method("POST"))
            .and(path("/api/v1/repos/owner/repo/labels"))
            .respond_with(ResponseTemplate::new(409).set_body_string("label already exists"))
            .mount(&server)
            .await;
        // No id could be resolved, so the issue is created without labels
        Mock::given(method("POST"))
            .and(path("/api/v1/repos/owner/repo/issues"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "number": 1, "title": "first"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let report = client
            .import_archives(&[archive_with_label("first", "bug")])
            .await
            .unwrap();

        assert_eq!(report.issues_created, 1);
        assert_eq!(report.labels_created, 0);
    }

    #[tokio::test]
    async fn test_existing_label_reused_from_seed() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/repos/owner/repo/labels"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 5, "name": "bug"}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/repos/owner/repo/labels"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/repos/owner/repo/milestones"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/v1/repos/owner/repo/issues"))
            .and(body_partial_json(serde_json::json!({"labels": [5]})))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "number": 1, "title": "first"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let report = client
            .import_archives(&[archive_with_label("first", "bug")])
            .await
            .unwrap();

        // Seeded from the listing, nothing created
        assert_eq!(report.labels_created, 0);
        assert_eq!(report.issues_created, 1);
    }

    #[tokio::test]
    async fn test_milestone_resolved_by_title() {
        let server = MockServer::start().await;
        mount_empty_seed(&server).await;

        Mock::given(method("POST"))
            .and(path("/api/v1/repos/owner/repo/milestones"))
            .and(body_partial_json(serde_json::json!({"title": "v1"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": 4, "title": "v1"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/v1/repos/owner/repo/issues"))
            .and(body_partial_json(serde_json::json!({"milestone": 4})))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "number": 1, "title": "first"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let mut archive = IssueArchive {
            issue: Issue {
                number: 1,
                title: "first".to_string(),
                milestone: Some(Milestone {
                    id: 77,
                    title: "v1".to_string(),
                    ..Default::default()
                }),
                ..Default::default()
            },
            ..Default::default()
        };
        archive.issue.body = Some("b".to_string());

        let report = client.import_archives(&[archive]).await.unwrap();
        assert_eq!(report.milestones_created, 1);
        assert_eq!(report.issues_created, 1);
    }

    #[tokio::test]
    async fn test_failed_issue_creation_continues() {
        let server = MockServer::start().await;
        mount_empty_seed(&server).await;

        Mock::given(method("POST"))
            .and(path("/api/v1/repos/owner/repo/issues"))
            .and(body_partial_json(serde_json::json!({"title": "first"})))
            .respond_with(ResponseTemplate::new(422).set_body_string("rejected"))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/v1/repos/owner/repo/issues"))
            .and(body_partial_json(serde_json::json!({"title": "second"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "number": 2, "title": "second"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let first = IssueArchive {
            issue: Issue {
                number: 1,
                title: "first".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let second = IssueArchive {
            issue: Issue {
                number: 2,
                title: "second".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        let report = client.import_archives(&[first, second]).await.unwrap();
        assert_eq!(report.issues_failed, 1);
        assert_eq!(report.issues_created, 1);
    }
}
