//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `stencil-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `TemplateSet`: loaded, mutually referenceable templates
//!
//! - **Driving (Input) Ports**: Called by the host pipeline, implemented by services
//!   - `Streamer`: the chunked stage protocol

pub mod input;
pub mod output;

pub use input::{Emission, StreamFailure, StreamResult, Streamer};
pub use output::TemplateSet;

#[cfg(test)]
pub use output::MockTemplateSet;
