use std::path::Path;

use crate::config::Config;
use crate::error::Result;
use crate::extract::ExtractorRegistry;
use crate::translate::TranslationClient;
use crate::validate::Validator;

/// The processing pipeline: validate the uploaded file, extract its text, and
/// translate it. Stateless per request; components are built once from the
/// immutable configuration.
pub struct FileProcessor {
    validator: Validator,
    extractors: ExtractorRegistry,
    translator: TranslationClient,
}

impl FileProcessor {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            validator: Validator::new(&config.rules.file_types),
            extractors: ExtractorRegistry::new(),
            translator: TranslationClient::new(config)?,
        })
    }

    pub fn validate_file(&self, path: &Path) -> Result<()> {
        self.validator.validate(path)
    }

    pub fn extract_text(&self, path: &Path) -> Result<String> {
        self.extractors.extract(path)
    }

    pub async fn translate_text(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String> {
        self.translator.translate(text, source_lang, target_lang).await
    }
}
