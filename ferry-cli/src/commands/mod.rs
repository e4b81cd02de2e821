//! CLI command implementations

pub mod export;
pub mod import;

pub use export::ExportArgs;
pub use import::ImportArgs;
