pub mod collaborators;
pub mod replay;
pub mod report;

pub use collaborators::{distance_lookup, lead_sink};
pub use replay::{annotate_distance, replay, submit_if_complete, ReplayCommand, ReplayStep};
pub use report::EstimateReport;
