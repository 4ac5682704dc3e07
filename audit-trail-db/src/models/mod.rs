pub mod entry;
pub mod group;
pub mod identifiable;
pub mod value;

// Re-exports
pub use entry::*;
pub use group::*;
pub use identifiable::*;
pub use value::*;
