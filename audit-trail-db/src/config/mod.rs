pub mod resolver;
pub mod warmer;

// Re-exports
pub use resolver::*;
pub use warmer::*;
