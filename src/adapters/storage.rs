use crate::domain::ports::LeadSink;
use crate::domain::quote::LeadSubmission;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Writes each quote request as `lead_<timestamp>.json` into a directory.
#[derive(Debug, Clone)]
pub struct LocalLeadStore {
    base_path: PathBuf,
}

impl LocalLeadStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn file_stem(lead: &LeadSubmission) -> String {
        format!("lead_{}", lead.submitted_at.format("%Y%m%dT%H%M%S%3fZ"))
    }
}

#[async_trait]
impl LeadSink for LocalLeadStore {
    async fn submit(&self, lead: &LeadSubmission) -> Result<String> {
        fs::create_dir_all(&self.base_path)?;
        let data = serde_json::to_vec_pretty(lead)?;
        let stem = Self::file_stem(lead);

        let mut attempt = 0u32;
        loop {
            let file_name = match attempt {
                0 => format!("{}.json", stem),
                n => format!("{}_{}.json", stem, n),
            };
            let full_path = self.base_path.join(file_name);

            match OpenOptions::new().write(true).create_new(true).open(&full_path) {
                Ok(mut file) => {
                    file.write_all(&data)?;
                    tracing::debug!("Lead saved to: {}", full_path.display());
                    return Ok(full_path.display().to_string());
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => attempt += 1,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::FormState;
    use tempfile::TempDir;

    #[test]
    fn test_writes_lead_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalLeadStore::new(temp_dir.path().join("leads"));
        let lead = LeadSubmission::new(FormState::new(), None, "quote-calculator");

        let receipt = tokio_test::block_on(store.submit(&lead)).unwrap();

        let path = PathBuf::from(&receipt);
        let file_name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(file_name.starts_with("lead_"));
        assert!(file_name.ends_with(".json"));

        let saved: LeadSubmission = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(saved, lead);
    }

    #[test]
    fn test_same_timestamp_does_not_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalLeadStore::new(temp_dir.path());
        let lead = LeadSubmission::new(FormState::new(), None, "quote-calculator");

        let first = tokio_test::block_on(store.submit(&lead)).unwrap();
        let second = tokio_test::block_on(store.submit(&lead)).unwrap();

        assert_ne!(first, second);
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 2);
    }
}
