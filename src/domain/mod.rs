// Domain layer: form model, derived quote data and the ports to external collaborators.
// Nothing in here performs I/O.

pub mod model;
pub mod ports;
pub mod quote;
pub mod services;
