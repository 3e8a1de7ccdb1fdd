use crate::fields::field2_128::Backend;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A field element or key was not exactly one block long. This is a bug in the caller.
    #[error("expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// The requested multiplier backend cannot run on this machine.
    #[error("GF(2^128) multiplier backend {backend} is not available")]
    BackendUnavailable { backend: Backend },
}
