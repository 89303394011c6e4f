pub mod list;

use s3viewer::S3ViewerError;
use thiserror::Error;

use crate::{AppInstance, error::OutputError};
#[derive(Debug, Error)]
pub enum CommandExecError {
    #[error("Failed to load listing: {0}")]
    Listing(#[from] S3ViewerError),
    #[error(transparent)]
    Output(#[from] OutputError),
    #[error("Either a URL or a file is required")]
    MissingSource,
    #[error("Failed to read {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub(crate) trait CommandExec {
    async fn exec(self, app_instance: AppInstance) -> Result<(), CommandExecError>;
}
