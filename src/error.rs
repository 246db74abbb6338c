use thiserror::Error;

/// Error returned when a pool cannot be resized.
///
/// A failed resize never changes the capacity of the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResizeError {
    /// Another resize of the same pool was in flight.
    #[error("another resize of this pool is in progress")]
    Conflict,
}
