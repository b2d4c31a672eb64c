//! Subsystem configuration structs.

mod index_config;
mod pipeline_config;
mod server_config;

pub use index_config::IndexConfig;
pub use pipeline_config::PipelineConfig;
pub use server_config::ServerConfig;
