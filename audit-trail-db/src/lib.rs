pub mod config;
pub mod engine;
pub mod metadata;
pub mod models;
pub mod normalize;
pub mod repository;
pub mod session;
pub mod store;
