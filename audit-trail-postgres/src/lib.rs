pub mod executor;
pub mod platform;
pub mod postgres_repositories;
pub mod repository;

#[cfg(test)]
mod test_helper;

pub use executor::Executor;
pub use platform::PostgresPlatform;
pub use postgres_repositories::PostgresRepositories;
