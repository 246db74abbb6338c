use crate::{Config, ResourcePool};

/// A builder for creating a [`ResourcePool`] with custom configuration.
///
/// # Example
///
/// ```rust
/// use codec_pool::Builder;
///
/// let mut builder = Builder::<String>::new();
/// let pool = builder.capacity(10).build();
/// assert_eq!(pool.capacity(), Some(10));
/// ```
pub struct Builder<T> {
    /// Configuration of the pool.
    config: Config,
    /// Function releasing instances the pool discards.
    close_func: Option<fn(T)>,
}

impl<T> Default for Builder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Builder<T> {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            close_func: None,
        }
    }

    /// Replace the whole configuration.
    pub fn config(&mut self, config: Config) -> &mut Self {
        self.config = config;
        self
    }

    /// Set the maximum number of idle instances kept by the pool.
    pub fn capacity(&mut self, capacity: usize) -> &mut Self {
        self.config.capacity = Some(capacity);
        self
    }

    /// Set the function called on every instance the pool discards, either
    /// because it is full, because it shrank, or because it is dropped.
    /// Without one, discarded instances are simply dropped.
    pub fn close_func(&mut self, func: fn(T)) -> &mut Self {
        self.close_func = Some(func);
        self
    }

    /// Build the pool with the current configuration.
    pub fn build(&mut self) -> ResourcePool<T> {
        let config = std::mem::take(&mut self.config);
        ResourcePool::with_close_func(config, self.close_func.take())
    }
}
