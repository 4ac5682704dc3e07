use thiserror::Error;

/// Errors raised by the audit subsystem.
///
/// `InvalidMapping` and `NoSessionFound` are fatal configuration or caller
/// defects and are expected to fail the surrounding commit; losing audit
/// coverage silently is worse than aborting the transaction.
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Invalid auditable mapping: {0}")]
    InvalidMapping(String),

    #[error("No session found: {0}")]
    NoSessionFound(String),

    #[error("Metadata cache error: {0}")]
    Cache(String),

    #[error("Persistence error: {0}")]
    Persistence(String),
}

pub type AuditResult<T> = Result<T, AuditError>;
