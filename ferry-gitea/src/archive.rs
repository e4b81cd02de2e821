//! The archive file shared by export and import
//!
//! A single pretty-printed JSON array of per-issue aggregates, in source
//! pagination order. This file is the only coupling between the two
//! commands.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::models::{Comment, Dependency, Issue, Reaction};
use crate::Result;

/// One issue together with everything fetched for it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssueArchive {
    /// The issue itself, including attachment records when requested
    pub issue: Issue,
    /// Comments in server order, each with its reactions filled in
    pub comments: Vec<Comment>,
    /// Reactions on the issue
    pub reactions: Vec<Reaction>,
    /// Issues this issue depends on; informational only, never replayed
    pub dependencies: Vec<Dependency>,
}

/// Write archives to `path` as pretty-printed JSON
pub fn write_archives(path: &Path, archives: &[IssueArchive]) -> Result<()> {
    let json = serde_json::to_string_pretty(archives)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Read archives back from `path`
pub fn read_archives(path: &Path) -> Result<Vec<IssueArchive>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Label;

    fn sample_archive() -> IssueArchive {
        IssueArchive {
            issue: Issue {
                number: 1,
                title: "Broken build".to_string(),
                body: Some("Fails on main".to_string()),
                labels: vec![Label {
                    id: 3,
                    name: "bug".to_string(),
                    ..Default::default()
                }],
                ..Default::default()
            },
            comments: vec![Comment {
                id: 10,
                body: Some("me too".to_string()),
                reactions: Some(vec![]),
                ..Default::default()
            }],
            reactions: vec![],
            dependencies: vec![],
        }
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");

        let archives = vec![sample_archive()];
        write_archives(&path, &archives).unwrap();
        let restored = read_archives(&path).unwrap();

        assert_eq!(restored, archives);
    }

    #[test]
    fn test_file_is_a_pretty_printed_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");

        write_archives(&path, &[sample_archive()]).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();

        assert!(contents.starts_with("[\n"));
        assert!(contents.contains("\"issue\""));
        assert!(contents.contains("\"comments\""));
        assert!(contents.contains("\"reactions\""));
        assert!(contents.contains("\"dependencies\""));
    }

    #[test]
    fn test_read_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_archives(&dir.path().join("nope.json")).is_err());
    }
}
