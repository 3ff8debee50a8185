pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::{
    FallbackLookup, HttpLeadSink, LocalLeadStore, NominatimLookup, PrefixEstimateLookup,
};
pub use crate::config::{PricingConfig, QuoteConfig};
pub use crate::core::{FlowPosition, FormAction, PricingEngine, QuoteSession, QuoteView, StepId};
pub use crate::domain::model::{FormState, ServiceCode};
pub use crate::domain::quote::{Estimate, LeadSubmission};
pub use crate::utils::error::{QuoteError, Result};
