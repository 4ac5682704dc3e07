pub mod class_metadata;
pub mod registry;

// Re-exports
pub use class_metadata::*;
pub use registry::*;
