//! Import command - replay a JSON archive against a repository
//!
//! Only issues, labels, and milestones are recreated; comments, reactions,
//! dependencies, and attachments in the archive are left alone.

use std::path::PathBuf;

use clap::Args;
use ferry_core::Config;
use ferry_gitea::{read_archives, GiteaClient};

/// Import issues from a JSON archive, creating referenced labels and
/// milestones as needed
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Archive file produced by `ferry export`
    #[arg(default_value = "all_issues_export.json")]
    input: PathBuf,
}

impl ImportArgs {
    /// Execute the import command
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let token = crate::load_token()?;
        let client = GiteaClient::new(config, token)?;

        let archives = read_archives(&self.input)?;
        println!(
            "Importing {} issues from {}",
            archives.len(),
            self.input.display()
        );

        let report = client.import_archives(&archives).await?;

        println!(
            "Created {} issues ({} failed), {} labels, {} milestones",
            report.issues_created,
            report.issues_failed,
            report.labels_created,
            report.milestones_created
        );

        if report.issues_failed > 0 {
            anyhow::bail!("{} issues failed to import", report.issues_failed);
        }

        Ok(())
    }
}
