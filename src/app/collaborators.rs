//! Builds the lead sink and distance lookup a run talks to from configuration.

use crate::adapters::{FallbackLookup, HttpLeadSink, LocalLeadStore, NominatimLookup};
use crate::config::toml_config::QuoteConfig;
use crate::domain::ports::{ConfigProvider, DistanceLookup, LeadSink};
use std::path::Path;
use std::sync::Arc;

/// `submit_dir` wins over the `[leads]` section; an endpoint wins over an output directory.
pub fn lead_sink(config: &QuoteConfig, submit_dir: Option<&Path>) -> Option<Box<dyn LeadSink>> {
    if let Some(dir) = submit_dir {
        tracing::debug!("Leads go to directory: {}", dir.display());
        return Some(Box::new(LocalLeadStore::new(dir)));
    }
    if let Some(endpoint) = config.lead_endpoint() {
        tracing::debug!("Leads go to endpoint: {}", endpoint);
        return Some(Box::new(HttpLeadSink::new(endpoint)));
    }
    config.lead_output_dir().map(|dir| {
        tracing::debug!("Leads go to directory: {}", dir);
        Box::new(LocalLeadStore::new(dir)) as Box<dyn LeadSink>
    })
}

/// Geocoding with the prefix estimate as fallback, if `[geocoding]` is configured.
pub fn distance_lookup(config: &QuoteConfig) -> Option<Arc<dyn DistanceLookup>> {
    let endpoint = config.geocoding_endpoint()?;
    let geocoding = config.geocoding.as_ref()?;
    tracing::debug!("Distance lookups via: {}", endpoint);

    let lookup = FallbackLookup::new(NominatimLookup::new(geocoding, config.service_area()));
    Some(Arc::new(lookup))
}
