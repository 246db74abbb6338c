//! Pools specialised for stream decoders and encoders.
//!
//! The codec itself is a collaborator described by the [`Decoder`] and
//! [`Encoder`] traits. The pools only decide when an instance is built,
//! reset, kept or closed.

use std::fmt::{self, Debug};

use crate::{Config, Pooled, ResizeError, ResourcePool};

/// A decoder reading compressed data from a source.
pub trait Decoder: Sized {
    /// Stream the decoder reads from.
    type Source;
    /// Error raised when building or resetting a decoder.
    type Error;

    /// Build a new decoder reading from `source`.
    fn new_decoder(source: Self::Source) -> Result<Self, Self::Error>;

    /// Prepare a used decoder to read a new stream from `source`.
    fn reset(&mut self, source: Self::Source) -> Result<(), Self::Error>;

    /// Release the resources of a decoder the pool will not reuse.
    fn close(self) {
        drop(self)
    }
}

/// An encoder writing compressed data to a sink.
pub trait Encoder: Sized {
    /// Stream the encoder writes to.
    type Sink;
    /// Error raised when building or resetting an encoder.
    type Error;

    /// Build a new encoder writing to `sink`.
    fn new_encoder(sink: Self::Sink) -> Result<Self, Self::Error>;

    /// Prepare a used encoder to write a new stream to `sink`.
    ///
    /// Called on an idle encoder, so whatever the previous stream still has
    /// buffered may be flushed into the previous sink. Callers should finish
    /// their stream before putting the encoder back.
    fn reset(&mut self, sink: Self::Sink) -> Result<(), Self::Error>;

    /// Release the resources of an encoder the pool will not reuse.
    fn close(self) {
        drop(self)
    }
}

/// A concurrent pool of reusable decoders.
///
/// On a miss [`get`](Self::get) builds a decoder with
/// [`Decoder::new_decoder`]; on a hit it resets an idle one with
/// [`Decoder::reset`]. Decoders the pool cannot keep are released with
/// [`Decoder::close`].
pub struct DecoderPool<D: Decoder> {
    pool: ResourcePool<D>,
}

impl<D: Decoder> DecoderPool<D> {
    /// Create an empty, unbounded pool.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create an empty pool keeping at most `capacity` idle decoders.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(Config::bounded(capacity))
    }

    /// Create an empty pool with the given configuration.
    pub fn with_config(config: Config) -> Self {
        Self {
            pool: ResourcePool::with_close_func(config, Some(D::close as fn(D))),
        }
    }

    /// Get a decoder reading from `source`.
    pub fn get(&self, source: D::Source) -> Result<D, D::Error> {
        self.pool.get_with(source, D::new_decoder, D::reset)
    }

    /// Get a decoder reading from `source`, put back when the guard drops.
    pub fn get_pooled(&self, source: D::Source) -> Result<Pooled<'_, D>, D::Error> {
        self.get(source).map(|decoder| Pooled::new(decoder, &self.pool))
    }

    /// Hand a decoder back. See [`ResourcePool::put`].
    pub fn put<I>(&self, decoder: I)
    where
        I: Into<Option<D>>,
    {
        self.pool.put(decoder)
    }

    /// Change the capacity. See [`ResourcePool::resize`].
    pub fn resize<F>(&self, f: F) -> Result<(usize, usize), ResizeError>
    where
        F: FnOnce(usize) -> usize,
    {
        self.pool.resize(f)
    }

    /// Change the capacity without waiting. See [`ResourcePool::try_resize`].
    pub fn try_resize<F>(&self, f: F) -> Result<(usize, usize), ResizeError>
    where
        F: FnOnce(usize) -> usize,
    {
        self.pool.try_resize(f)
    }

    /// Get the maximum number of idle instances kept, `None` if unbounded.
    pub fn capacity(&self) -> Option<usize> {
        self.pool.capacity()
    }

    /// Get the number of idle instances currently held.
    pub fn available(&self) -> usize {
        self.pool.available()
    }

    /// Check if the pool holds no idle instance.
    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }
}

impl<D: Decoder> Default for DecoderPool<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Decoder> Debug for DecoderPool<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DecoderPool").field(&self.pool).finish()
    }
}

/// A concurrent pool of reusable encoders.
///
/// The encoder counterpart of [`DecoderPool`].
pub struct EncoderPool<E: Encoder> {
    pool: ResourcePool<E>,
}

impl<E: Encoder> EncoderPool<E> {
    /// Create an empty, unbounded pool.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create an empty pool keeping at most `capacity` idle encoders.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(Config::bounded(capacity))
    }

    /// Create an empty pool with the given configuration.
    pub fn with_config(config: Config) -> Self {
        Self {
            pool: ResourcePool::with_close_func(config, Some(E::close as fn(E))),
        }
    }

    /// Get an encoder writing to `sink`.
    pub fn get(&self, sink: E::Sink) -> Result<E, E::Error> {
        self.pool.get_with(sink, E::new_encoder, E::reset)
    }

    /// Get an encoder writing to `sink`, put back when the guard drops.
    pub fn get_pooled(&self, sink: E::Sink) -> Result<Pooled<'_, E>, E::Error> {
        self.get(sink).map(|encoder| Pooled::new(encoder, &self.pool))
    }

    /// Hand an encoder back. See [`ResourcePool::put`].
    pub fn put<I>(&self, encoder: I)
    where
        I: Into<Option<E>>,
    {
        self.pool.put(encoder)
    }

    /// Change the capacity. See [`ResourcePool::resize`].
    pub fn resize<F>(&self, f: F) -> Result<(usize, usize), ResizeError>
    where
        F: FnOnce(usize) -> usize,
    {
        self.pool.resize(f)
    }

    /// Change the capacity without waiting. See [`ResourcePool::try_resize`].
    pub fn try_resize<F>(&self, f: F) -> Result<(usize, usize), ResizeError>
    where
        F: FnOnce(usize) -> usize,
    {
        self.pool.try_resize(f)
    }

    /// Get the maximum number of idle instances kept, `None` if unbounded.
    pub fn capacity(&self) -> Option<usize> {
        self.pool.capacity()
    }

    /// Get the number of idle instances currently held.
    pub fn available(&self) -> usize {
        self.pool.available()
    }

    /// Check if the pool holds no idle instance.
    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }
}

impl<E: Encoder> Default for EncoderPool<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Encoder> Debug for EncoderPool<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EncoderPool").field(&self.pool).finish()
    }
}
