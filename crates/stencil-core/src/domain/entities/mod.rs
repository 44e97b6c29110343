pub mod context;
pub mod file_info;
pub mod file_stream;
pub mod render_data;

pub use crate::domain::DomainError;
pub use context::Context;
pub use file_info::FileInfo;
pub use file_stream::FileStream;
pub use render_data::RenderData;
