use crate::domain::model::DistanceAnnotation;
use crate::domain::quote::LeadSubmission;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Receives a completed quote request. Storage, status workflow and
/// notification all live behind this trait.
#[async_trait]
pub trait LeadSink: Send + Sync {
    /// Returns a receipt identifying the stored lead (an id, a path, ...).
    async fn submit(&self, lead: &LeadSubmission) -> Result<String>;
}

/// Resolves a postal code to a distance from the service area.
/// `Ok(None)` means the code is unknown to the lookup.
#[async_trait]
pub trait DistanceLookup: Send + Sync {
    async fn lookup(&self, postal_code: &str) -> Result<Option<DistanceAnnotation>>;
}

pub trait ConfigProvider: Send + Sync {
    fn lead_endpoint(&self) -> Option<&str>;
    fn lead_output_dir(&self) -> Option<&str>;
    fn lead_source(&self) -> &str;
    fn geocoding_endpoint(&self) -> Option<&str>;
}
