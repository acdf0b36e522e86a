//! Error types for the kernel.

use thiserror::Error;

/// Fatal errors raised before any sweep begins.
///
/// A run that exhausts its budget with a non-zero cost is not an error;
/// it is reported through [`crate::Termination`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KernelError {
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Invalid graph: {0}")]
    InvalidGraph(String),
}

pub type Result<T> = std::result::Result<T, KernelError>;
