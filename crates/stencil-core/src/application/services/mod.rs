//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish the two
//! high-level use cases: "render one complete file" and "drive a file
//! through the chunked pipeline protocol".

pub mod render_service;
pub mod stream_service;

pub use render_service::StreamRenderer;
pub use stream_service::{STREAMER_NAME, TemplateStreamer};
