// Concrete collaborators behind the domain ports: lead sinks and distance lookups.

pub mod geo;
pub mod http;
pub mod storage;

pub use geo::{haversine_km, FallbackLookup, NominatimLookup, PrefixEstimateLookup};
pub use http::HttpLeadSink;
pub use storage::LocalLeadStore;
