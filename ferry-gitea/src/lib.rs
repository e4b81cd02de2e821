//! Ferry Gitea - Gitea API access for issue migration
//!
//! This crate provides a thin client over the Gitea REST API (`/api/v1`)
//! plus the export and import orchestration built on top of it. The export
//! side walks every issue in a repository with its comments, reactions,
//! dependencies, and (optionally) attachments, producing a single JSON
//! archive; the import side replays that archive against another repository,
//! re-creating labels and milestones before the issues that reference them.

mod archive;
mod attachments;
mod client;
mod comments;
mod dependencies;
mod error;
mod export;
mod import;
mod issues;
mod labels;
mod milestones;
mod models;
mod reactions;

pub use archive::{read_archives, write_archives, IssueArchive};
pub use client::GiteaClient;
pub use error::{Error, Result};
pub use export::ExportOptions;
pub use import::ImportReport;
pub use models::{
    Attachment, Comment, CreateIssueRequest, CreateLabelRequest, CreateMilestoneRequest,
    Dependency, DownloadedAttachment, Issue, Label, Milestone, Reaction, User,
};
