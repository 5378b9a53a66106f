use std::path::Path;

use reqwest::Client;
use tracing::info;

use quiz_core::model::{BankDocument, QuestionBank};

use crate::error::BankLoadError;

/// One-time acquisition of the question bank.
///
/// The bank is fetched (or read) exactly once at startup; on any failure the
/// caller stays idle with no sections selectable until a retry is triggered
/// from outside.
#[derive(Clone, Default)]
pub struct BankLoader {
    client: Client,
}

impl BankLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Fetch the bank document over HTTP.
    ///
    /// # Errors
    ///
    /// Returns `BankLoadError` on network failure, a non-success status,
    /// a malformed document, or a schema violation.
    pub async fn fetch(&self, url: &str) -> Result<QuestionBank, BankLoadError> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(BankLoadError::HttpStatus(response.status()));
        }

        let raw = response.text().await?;
        let bank = Self::parse(&raw)?;
        info!(sections = bank.len(), url, "question bank loaded");
        Ok(bank)
    }

    /// Read the bank document from a local file.
    ///
    /// # Errors
    ///
    /// Returns `BankLoadError` if the file is unreadable, malformed, or
    /// violates the bank schema.
    pub fn read(path: &Path) -> Result<QuestionBank, BankLoadError> {
        let raw = std::fs::read_to_string(path)?;
        let bank = Self::parse(&raw)?;
        info!(sections = bank.len(), path = %path.display(), "question bank loaded");
        Ok(bank)
    }

    /// Decode and validate a raw bank document.
    ///
    /// # Errors
    ///
    /// Returns `BankLoadError::Parse` for malformed JSON and
    /// `BankLoadError::Invalid` for schema violations.
    pub fn parse(raw: &str) -> Result<QuestionBank, BankLoadError> {
        let document: BankDocument = serde_json::from_str(raw)?;
        Ok(document.into_bank()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_wire_document() {
        let raw = r#"
            {
              "sections": [
                {
                  "sectionTitle": "Science",
                  "questions": [
                    {
                      "questionType": "text",
                      "question": "Capital of France?",
                      "answer": "Paris",
                      "timeToAnswer": 8
                    }
                  ]
                }
              ]
            }"#;

        let bank = BankLoader::parse(raw).unwrap();
        assert_eq!(bank.len(), 1);
        assert_eq!(bank.section(0).unwrap().title(), "Science");
    }

    #[test]
    fn parse_rejects_malformed_json() {
        let err = BankLoader::parse("{ not json").unwrap_err();
        assert!(matches!(err, BankLoadError::Parse(_)));
    }

    #[test]
    fn parse_rejects_schema_violations() {
        let raw = r#"
            {
              "sections": [
                {
                  "sectionTitle": "Science",
                  "questions": [
                    {
                      "questionType": "mcq",
                      "question": "Which gas do we breathe in?",
                      "options": [],
                      "answer": "O2"
                    }
                  ]
                }
              ]
            }"#;

        let err = BankLoader::parse(raw).unwrap_err();
        assert!(matches!(err, BankLoadError::Invalid(_)));
    }
}
