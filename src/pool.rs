use std::fmt::{self, Debug};
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering::*;

use crossbeam_queue::SegQueue;
use parking_lot::{Mutex, RwLock};
use tracing::{debug, trace};

use crate::{Pooled, ResizeError};

/// A resizable concurrent pool of idle, reusable instances.
///
/// The pool starts empty. Instances are built lazily by [`get`](Self::get)
/// when no idle one is left and are kept for reuse when handed back with
/// [`put`](Self::put), up to [`capacity`](Self::capacity) of them.
///
/// # Examples
///
/// ```rust
/// use codec_pool::ResourcePool;
/// use std::convert::Infallible;
/// use std::sync::{Arc, mpsc};
///
/// let pool: Arc<ResourcePool<Vec<u8>>> = Arc::new(ResourcePool::with_capacity(10));
///
/// let (tx, rx) = mpsc::channel();
/// let mut senders = Vec::new();
/// for id in 0..2u8 {
///     let pool = pool.clone();
///     let tx = tx.clone();
///     senders.push(std::thread::spawn(move || {
///         let mut buf = pool.get(64, |n| Ok::<_, Infallible>(Vec::with_capacity(n))).unwrap();
///         buf.push(id);
///         tx.send(buf).unwrap();
///     }));
/// }
/// drop(tx);
///
/// for handle in senders {
///     handle.join().unwrap();
/// }
/// while let Ok(buf) = rx.recv() {
///     assert_eq!(buf.len(), 1);
///     pool.put(buf);
/// }
/// assert_eq!(pool.available(), 2);
/// ```
pub struct ResourcePool<T> {
    /// Idle instances.
    idle: SegQueue<T>,
    /// Number of idle instances, including slots reserved by `put` whose
    /// push has not landed yet.
    available: AtomicUsize,
    /// Bound on `available`, `None` while unbounded. The write side is held
    /// only by `resize` while it swaps the bound and drains the excess.
    capacity: RwLock<Option<usize>>,
    /// Serializes resizes against each other.
    resize_lock: Mutex<()>,
    /// Releases an instance the pool will not keep.
    close_func: Option<fn(T)>,
}

impl<T> Debug for ResourcePool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourcePool")
            .field("capacity", &self.capacity())
            .field("available", &self.available())
            .finish()
    }
}

impl<T> Default for ResourcePool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for ResourcePool<T> {
    fn drop(&mut self) {
        while let Some(item) = self.idle.pop() {
            self.close(item);
        }
    }
}

impl<T> ResourcePool<T> {
    /// Create an empty, unbounded pool.
    ///
    /// An unbounded pool keeps every instance put back. Its first
    /// [`resize`](Self::resize) starts from the number of idle instances.
    ///
    /// # Example
    ///
    /// ```rust
    /// use codec_pool::ResourcePool;
    ///
    /// let pool: ResourcePool<String> = ResourcePool::new();
    /// assert_eq!(pool.capacity(), None);
    /// assert_eq!(pool.available(), 0);
    /// ```
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create an empty pool keeping at most `capacity` idle instances.
    ///
    /// # Example
    ///
    /// ```rust
    /// use codec_pool::ResourcePool;
    ///
    /// let pool: ResourcePool<String> = ResourcePool::with_capacity(8);
    /// assert_eq!(pool.capacity(), Some(8));
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(Config::bounded(capacity))
    }

    /// Create an empty pool with the given configuration.
    pub fn with_config(config: Config) -> Self {
        Self::with_close_func(config, None)
    }

    pub(crate) fn with_close_func(config: Config, close_func: Option<fn(T)>) -> Self {
        Self {
            idle: SegQueue::new(),
            available: AtomicUsize::new(0),
            capacity: RwLock::new(config.capacity),
            resize_lock: Mutex::new(()),
            close_func,
        }
    }

    /// Get the maximum number of idle instances the pool keeps, `None` if
    /// it is unbounded.
    pub fn capacity(&self) -> Option<usize> {
        *self.capacity.read()
    }

    /// Get the number of idle instances currently held.
    ///
    /// # Example
    ///
    /// ```rust
    /// use codec_pool::ResourcePool;
    ///
    /// let pool: ResourcePool<String> = ResourcePool::with_capacity(4);
    /// assert_eq!(pool.available(), 0);
    /// pool.put(String::from("idle"));
    /// assert_eq!(pool.available(), 1);
    /// ```
    pub fn available(&self) -> usize {
        self.available.load(Acquire)
    }

    /// Check if the pool holds no idle instance.
    pub fn is_empty(&self) -> bool {
        self.available() == 0
    }

    /// Take an idle instance, or build one with `new` if none is left.
    ///
    /// An idle instance is returned as-is and `arg` is dropped. An error
    /// from `new` is returned unchanged and leaves the pool untouched.
    ///
    /// # Example
    ///
    /// ```rust
    /// use codec_pool::ResourcePool;
    /// use std::convert::Infallible;
    ///
    /// let pool: ResourcePool<Vec<u8>> = ResourcePool::with_capacity(2);
    /// let buf = pool.get(16, |n| Ok::<_, Infallible>(Vec::with_capacity(n))).unwrap();
    /// assert!(buf.capacity() >= 16);
    /// assert_eq!(pool.available(), 0);
    /// ```
    pub fn get<A, E, F>(&self, arg: A, new: F) -> Result<T, E>
    where
        F: FnOnce(A) -> Result<T, E>,
    {
        self.get_with(arg, new, |_, _| Ok(()))
    }

    /// Take an idle instance and prepare it with `reuse`, or build one with
    /// `new` if none is left.
    ///
    /// If `reuse` fails the idle instance is closed and the error returned.
    ///
    /// # Example
    ///
    /// ```rust
    /// use codec_pool::ResourcePool;
    /// use std::convert::Infallible;
    ///
    /// let pool: ResourcePool<String> = ResourcePool::with_capacity(2);
    /// pool.put(String::from("stale"));
    ///
    /// let s = pool
    ///     .get_with(
    ///         "fresh",
    ///         |init| Ok::<_, Infallible>(init.to_string()),
    ///         |s, init| {
    ///             s.clear();
    ///             s.push_str(init);
    ///             Ok(())
    ///         },
    ///     )
    ///     .unwrap();
    /// assert_eq!(s, "fresh");
    /// ```
    pub fn get_with<A, E, F, R>(&self, arg: A, new: F, reuse: R) -> Result<T, E>
    where
        F: FnOnce(A) -> Result<T, E>,
        R: FnOnce(&mut T, A) -> Result<(), E>,
    {
        let idle = {
            let _capacity = self.capacity.read();
            let item = self.idle.pop();
            if item.is_some() {
                self.available.fetch_sub(1, AcqRel);
            }
            item
        };
        match idle {
            Some(mut item) => {
                trace!("reusing idle instance");
                match reuse(&mut item, arg) {
                    Ok(()) => Ok(item),
                    Err(err) => {
                        debug!("failed to prepare idle instance for reuse, closing it");
                        self.close(item);
                        Err(err)
                    }
                }
            }
            None => {
                trace!("no idle instance left, constructing a new one");
                new(arg)
            }
        }
    }

    /// Like [`get`](Self::get), but wrap the instance in a [`Pooled`] guard
    /// that puts it back when dropped.
    ///
    /// # Example
    ///
    /// ```rust
    /// use codec_pool::ResourcePool;
    /// use std::convert::Infallible;
    ///
    /// let pool: ResourcePool<Vec<u8>> = ResourcePool::with_capacity(2);
    /// {
    ///     let mut buf = pool.get_pooled((), |_| Ok::<_, Infallible>(Vec::new())).unwrap();
    ///     buf.push(1);
    ///     assert_eq!(pool.available(), 0);
    /// }
    /// assert_eq!(pool.available(), 1);
    /// ```
    pub fn get_pooled<A, E, F>(&self, arg: A, new: F) -> Result<Pooled<'_, T>, E>
    where
        F: FnOnce(A) -> Result<T, E>,
    {
        self.get(arg, new).map(|item| Pooled::new(item, self))
    }

    /// Hand an instance back to the pool.
    ///
    /// `None` is ignored. When the pool already holds `capacity` idle
    /// instances the returned one is closed instead of kept; the pool never
    /// grows past its capacity.
    ///
    /// # Example
    ///
    /// ```rust
    /// use codec_pool::ResourcePool;
    ///
    /// let pool: ResourcePool<String> = ResourcePool::with_capacity(1);
    /// pool.put(String::from("a"));
    /// pool.put(String::from("b"));
    /// pool.put(None::<String>);
    /// assert_eq!(pool.available(), 1);
    /// ```
    pub fn put<I>(&self, item: I)
    where
        I: Into<Option<T>>,
    {
        let Some(item) = item.into() else {
            return;
        };
        let rejected = {
            let capacity = self.capacity.read();
            let reserved = self
                .available
                .fetch_update(AcqRel, Acquire, |n| match *capacity {
                    Some(cap) if n >= cap => None,
                    _ => Some(n + 1),
                })
                .is_ok();
            if reserved {
                self.idle.push(item);
                None
            } else {
                Some(item)
            }
        };
        if let Some(item) = rejected {
            debug!("idle store is full, closing returned instance");
            self.close(item);
        }
    }

    /// Change the capacity of the pool to `f(capacity)`.
    ///
    /// Returns the capacity before and after the change. An unbounded pool
    /// passes its number of idle instances to `f` and becomes bounded. When
    /// the new capacity is below the number of idle instances the surplus is
    /// closed. Checked-out instances are subject to the new capacity once
    /// they are put back. Concurrent resizes wait for each other.
    ///
    /// `f` runs while `get` and `put` are held off, so it should be cheap.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use codec_pool::ResourcePool;
    ///
    /// let pool: ResourcePool<String> = ResourcePool::with_capacity(4);
    /// for _ in 0..4 {
    ///     pool.put(String::new());
    /// }
    /// let (old, new) = pool.resize(|cap| cap / 2).unwrap();
    /// assert_eq!((old, new), (4, 2));
    /// assert_eq!(pool.available(), 2);
    /// ```
    ///
    /// ```rust
    /// use codec_pool::ResourcePool;
    ///
    /// let pool: ResourcePool<String> = ResourcePool::new();
    /// for _ in 0..3 {
    ///     pool.put(String::new());
    /// }
    /// assert_eq!(pool.resize(|idle| idle - 1), Ok((3, 2)));
    /// assert_eq!(pool.capacity(), Some(2));
    /// ```
    pub fn resize<F>(&self, f: F) -> Result<(usize, usize), ResizeError>
    where
        F: FnOnce(usize) -> usize,
    {
        let _guard = self.resize_lock.lock();
        Ok(self.resize_locked(f))
    }

    /// Like [`resize`](Self::resize), but fail with
    /// [`ResizeError::Conflict`] instead of waiting when another resize is in
    /// progress. `f` is not called in that case.
    pub fn try_resize<F>(&self, f: F) -> Result<(usize, usize), ResizeError>
    where
        F: FnOnce(usize) -> usize,
    {
        let Some(_guard) = self.resize_lock.try_lock() else {
            debug!("resize rejected, another resize is in progress");
            return Err(ResizeError::Conflict);
        };
        Ok(self.resize_locked(f))
    }

    /// Apply the new bound and drain the excess. Must be called with
    /// `resize_lock` held.
    fn resize_locked<F>(&self, f: F) -> (usize, usize)
    where
        F: FnOnce(usize) -> usize,
    {
        let (old, new, excess) = {
            let mut capacity = self.capacity.write();
            let old = capacity.unwrap_or_else(|| self.available.load(Acquire));
            let new = f(old);
            *capacity = Some(new);

            let mut excess = Vec::new();
            while self.available.load(Acquire) > new {
                // No `get` or `put` runs while the write side is held, so the
                // count matches the queue.
                let Some(item) = self.idle.pop() else {
                    break;
                };
                self.available.fetch_sub(1, AcqRel);
                excess.push(item);
            }
            (old, new, excess)
        };

        debug!(old, new, closed = excess.len(), "resized pool");
        for item in excess {
            self.close(item);
        }
        (old, new)
    }

    fn close(&self, item: T) {
        match self.close_func {
            Some(func) => func(item),
            None => drop(item),
        }
    }
}

/// Configuration for the pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Maximum number of idle instances kept, `None` for no limit.
    pub capacity: Option<usize>,
}

impl Config {
    /// Configuration of a pool keeping at most `capacity` idle instances.
    pub fn bounded(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
        }
    }
}
