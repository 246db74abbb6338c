use std::fmt::{self, Debug};
use std::ops::{Deref, DerefMut};

use crate::ResourcePool;

/// A checked-out instance that goes back to its pool when dropped.
///
/// `Pooled` owns the instance and borrows the [`ResourcePool`] it came from.
/// Dropping it is the same as calling [`ResourcePool::put`].
///
/// # Example
///
/// ```rust
/// use codec_pool::ResourcePool;
/// use std::convert::Infallible;
///
/// let pool: ResourcePool<String> = ResourcePool::with_capacity(2);
/// let mut s = pool.get_pooled((), |_| Ok::<_, Infallible>(String::new())).unwrap();
/// s.push_str("hello");
/// let s = s.into_inner();
/// assert_eq!(s, "hello");
/// assert_eq!(pool.available(), 0);
/// ```
pub struct Pooled<'a, T> {
    // `item` is always `Some` until the guard is dropped or consumed.
    item: Option<T>,
    pool: &'a ResourcePool<T>,
}

impl<'a, T> Pooled<'a, T> {
    pub(crate) fn new(item: T, pool: &'a ResourcePool<T>) -> Self {
        Self {
            item: Some(item),
            pool,
        }
    }

    /// Detach the instance from the guard. It will not be put back.
    pub fn into_inner(mut self) -> T {
        self.item.take().expect("pooled item already taken")
    }

    /// Get the pool the instance will be returned to.
    pub fn pool(&self) -> &'a ResourcePool<T> {
        self.pool
    }
}

impl<T> Deref for Pooled<'_, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        self.item.as_ref().expect("pooled item already taken")
    }
}

impl<T> DerefMut for Pooled<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.item.as_mut().expect("pooled item already taken")
    }
}

impl<T: Debug> Debug for Pooled<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pooled").field(&self.item).finish()
    }
}

impl<T> Drop for Pooled<'_, T> {
    fn drop(&mut self) {
        self.pool.put(self.item.take());
    }
}
