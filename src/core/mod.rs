pub mod debounce;
pub mod flow;
pub mod gate;
pub mod pricing;
pub mod reducer;
pub mod session;
pub mod steps;

pub use crate::domain::ports::{ConfigProvider, DistanceLookup, LeadSink};
pub use crate::utils::error::Result;
pub use flow::FlowPosition;
pub use gate::ValidationFailure;
pub use pricing::PricingEngine;
pub use reducer::{reduce, FormAction, NumericField};
pub use session::{QuoteSession, QuoteView};
pub use steps::StepId;
