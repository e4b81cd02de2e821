//! Export command - dump all issues of a repository to a JSON archive

use std::path::PathBuf;

use clap::Args;
use ferry_core::Config;
use ferry_gitea::{write_archives, ExportOptions, GiteaClient};

/// Export all issues with comments, reactions, dependencies, and optionally
/// attachments
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output JSON file path
    #[arg(short, long, default_value = "all_issues_export.json")]
    output: PathBuf,

    /// Directory to save attachments (default: no attachments downloaded)
    #[arg(short = 'a', long)]
    attachments_dir: Option<PathBuf>,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let token = crate::load_token()?;
        let client = GiteaClient::new(config, token)?;

        if let Some(ref dir) = self.attachments_dir {
            std::fs::create_dir_all(dir)?;
            println!("Attachments will be saved to: {}", dir.display());
        }

        let options = ExportOptions {
            attachments_dir: self.attachments_dir.clone(),
        };

        let archives = client.export_issues(&options).await?;
        write_archives(&self.output, &archives)?;

        println!(
            "Exported {} issues to {}",
            archives.len(),
            self.output.display()
        );

        Ok(())
    }
}
