use std::path::{Path, PathBuf};

use clap::Args;
use s3viewer::{S3ViewerError, client::ListingClientBuilder, types::list::ListingResult};
use tracing::info;
use url::Url;

use crate::{
    AppInstance,
    commands::{CommandExec, CommandExecError},
    config::Config,
    output,
};
#[derive(Debug, Clone, Args)]
pub struct ListCommand {
    /// Bucket endpoint, such as http://bucket.s3.amazonaws.com/
    #[arg(short = 'u', long, required_unless_present = "file", conflicts_with = "file")]
    pub url: Option<Url>,
    /// Read a saved listing instead of fetching one
    ///
    /// The file may be the XML document or an HTML page with the document inside.
    #[arg(short = 'f', long)]
    pub file: Option<PathBuf>,
    /// Save the listing as CSV instead of printing a table
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,
    /// Maximum number of pages to fetch. 0 or less fetches a single page
    ///
    /// Defaults to `max_pages` from the config file, or 1.
    #[arg(short = 'p', long, allow_negative_numbers = true)]
    pub max_pages: Option<i64>,
}
impl ListCommand {
    /// Negative budgets collapse to 0, which the client treats as one page.
    pub fn page_budget(&self, config: &Config) -> usize {
        let max_pages = self.max_pages.or(config.max_pages).unwrap_or(1);
        usize::try_from(max_pages).unwrap_or(0)
    }
}
impl CommandExec for ListCommand {
    async fn exec(self, app_instance: AppInstance) -> Result<(), CommandExecError> {
        let result = if let Some(path) = &self.file {
            load_file(path)?
        } else if let Some(url) = &self.url {
            let client = ListingClientBuilder::from_settings(&app_instance.config.transport)
                .build()
                .map_err(S3ViewerError::from)?;
            client
                .fetch_all(url, self.page_budget(&app_instance.config))
                .await?
        } else {
            return Err(CommandExecError::MissingSource);
        };
        info!(entries = result.len(), total_bytes = result.total_size(), "Listing ready");
        match &self.output {
            Some(path) => {
                output::save_csv(path, &result)?;
                info!(path = %path.display(), entries = result.len(), "Saved listing");
            }
            None => output::print_table(std::io::stdout().lock(), &result)?,
        }
        Ok(())
    }
}
/// Runs the same extraction and decoding as a fetched page on a file from disk.
pub fn load_file(path: &Path) -> Result<ListingResult, CommandExecError> {
    let content = std::fs::read(path).map_err(|source| CommandExecError::ReadFile {
        path: path.display().to_string(),
        source,
    })?;
    let body = String::from_utf8_lossy(&content);
    let result = ListingResult::from_body(path.display().to_string(), &body)
        .map_err(S3ViewerError::from)?;
    info!(path = %path.display(), entries = result.len(), "Loaded listing from file");
    Ok(result)
}
