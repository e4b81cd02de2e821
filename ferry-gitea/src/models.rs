//! Typed records for the Gitea resources ferry moves around
//!
//! Every response record keeps a flattened residual map so fields this tool
//! does not model (assignees, due dates, future API additions) survive the
//! trip through the archive file unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A Gitea user, as embedded in issues, comments, and reactions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Numeric user id on its instance
    #[serde(default)]
    pub id: Option<u64>,
    /// Login name
    #[serde(default)]
    pub login: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A label; `name` is the natural key used to match labels across instances
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Label {
    /// Per-instance numeric id
    pub id: u64,
    /// Label name
    pub name: String,
    /// Hex color, without leading `#`
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A milestone; `title` is the natural key across instances
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    /// Per-instance numeric id
    pub id: u64,
    /// Milestone title
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A reaction on an issue or comment; captured on export, never replayed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    /// Who reacted
    #[serde(default)]
    pub user: Option<User>,
    /// Reaction kind, e.g. `+1`, `laugh`
    #[serde(default)]
    pub content: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An issue this issue depends on
///
/// The Gitea dependencies endpoint returns full issue records; only the
/// number is meaningful here since target instances renumber issues, so the
/// rest rides along in the residual map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dependency {
    /// Issue number of the dependency on the source instance
    pub number: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Attachment metadata as returned by the assets endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    /// Attachment id within its parent issue or comment
    pub id: u64,
    /// Original filename
    #[serde(default)]
    pub name: Option<String>,
    /// Size in bytes
    #[serde(default)]
    pub size: Option<u64>,
    /// Direct download URL for the binary content
    #[serde(default)]
    pub browser_download_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An attachment that was downloaded to disk during export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadedAttachment {
    /// Path of the written file, relative to the attachments root
    pub local_path: String,
    /// The attachment metadata the file was downloaded from
    pub attachment_info: Attachment,
}

/// An issue, plus the sub-resources the exporter attaches to it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Issue number, unique within its repository
    pub number: u64,
    /// Issue title
    #[serde(default)]
    pub title: String,
    /// Issue body
    #[serde(default)]
    pub body: Option<String>,
    /// `open` or `closed`
    #[serde(default)]
    pub state: Option<String>,
    /// Labels attached to the issue
    #[serde(default)]
    pub labels: Vec<Label>,
    /// Milestone, if any
    #[serde(default)]
    pub milestone: Option<Milestone>,
    /// Author
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Attachment metadata; only present when attachment export was requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
    /// Attachments written to disk; only present when attachment export was
    /// requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub downloaded_attachments: Option<Vec<DownloadedAttachment>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A comment, plus the sub-resources the exporter attaches to it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Comment id, unique within its repository
    pub id: u64,
    /// Comment body
    #[serde(default)]
    pub body: Option<String>,
    /// Author
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Reactions on this comment; filled in by the exporter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reactions: Option<Vec<Reaction>>,
    /// Attachment metadata; only present when attachment export was requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
    /// Attachments written to disk; only present when attachment export was
    /// requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub downloaded_attachments: Option<Vec<DownloadedAttachment>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload for creating a label on the target instance
#[derive(Debug, Clone, Serialize)]
pub struct CreateLabelRequest {
    /// Label name
    pub name: String,
    /// Hex color without leading `#`
    pub color: String,
    /// Description
    pub description: String,
}

impl CreateLabelRequest {
    /// Build a create request from an exported label, defaulting the color
    /// to white when the source did not carry one
    pub fn from_label(label: &Label) -> Self {
        Self {
            name: label.name.clone(),
            color: label
                .color
                .clone()
                .unwrap_or_else(|| "ffffff".to_string())
                .trim_start_matches('#')
                .to_string(),
            description: label.description.clone().unwrap_or_default(),
        }
    }
}

/// Payload for creating a milestone on the target instance
#[derive(Debug, Clone, Serialize)]
pub struct CreateMilestoneRequest {
    /// Milestone title
    pub title: String,
    /// Description
    pub description: String,
}

impl CreateMilestoneRequest {
    /// Build a create request from an exported milestone
    pub fn from_milestone(milestone: &Milestone) -> Self {
        Self {
            title: milestone.title.clone(),
            description: milestone.description.clone().unwrap_or_default(),
        }
    }
}

/// Payload for creating an issue on the target instance
#[derive(Debug, Clone, Serialize)]
pub struct CreateIssueRequest {
    /// Issue title
    pub title: String,
    /// Issue body
    pub body: String,
    /// Resolved label ids on the target instance
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<u64>,
    /// Resolved milestone id on the target instance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone: Option<u64>,
}
