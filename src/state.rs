use std::sync::Arc;

use crate::config::Config;
use crate::processor::FileProcessor;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub processor: Arc<FileProcessor>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let processor = Arc::new(FileProcessor::new(&config)?);
        Ok(Self { config, processor })
    }
}
