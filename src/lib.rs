//! A resizable concurrent pool for reusing stream decoders and encoders.
//!
//! Building a compression codec allocates window buffers and tables, so
//! paying that cost once per stream is wasteful when many short streams are
//! processed. The pools in this crate keep idle codecs around and hand them
//! out again, resetting them onto the caller's stream.
//!
//! # Features
//!
//! - Lazy construction: instances are built only when no idle one is left.
//! - Thread-safe: `get` and `put` run concurrently and never wait on each other.
//! - Bounded on demand: at most `capacity` idle instances are kept, extra ones
//!   are closed. Pools start unbounded unless configured otherwise.
//! - Live resizing: the capacity can be changed while the pool is in use.
//! - Codec-agnostic core ([`ResourcePool`]) with decoder and encoder facades
//!   ([`DecoderPool`], [`EncoderPool`]) and a bundled zlib binding.
//!
//! # Examples
//!
//! ## Generic pool
//!
//! ```rust
//! use codec_pool::ResourcePool;
//! use std::convert::Infallible;
//!
//! let pool: ResourcePool<Vec<u8>> = ResourcePool::with_capacity(10);
//! let buf = pool.get(1024, |n| Ok::<_, Infallible>(Vec::with_capacity(n))).unwrap();
//! assert_eq!(pool.available(), 0);
//! pool.put(buf);
//! assert_eq!(pool.available(), 1);
//!
//! let (old, new) = pool.resize(|_| 0).unwrap();
//! assert_eq!((old, new), (10, 0));
//! assert_eq!(pool.available(), 0);
//! ```
//!
//! ## Custom codec
//!
//! ```rust
//! use codec_pool::{Decoder, DecoderPool};
//!
//! struct Upper {
//!     input: String,
//! }
//!
//! impl Decoder for Upper {
//!     type Source = String;
//!     type Error = std::convert::Infallible;
//!
//!     fn new_decoder(input: String) -> Result<Self, Self::Error> {
//!         Ok(Upper { input })
//!     }
//!
//!     fn reset(&mut self, input: String) -> Result<(), Self::Error> {
//!         self.input = input;
//!         Ok(())
//!     }
//! }
//!
//! let pool: DecoderPool<Upper> = DecoderPool::new();
//! let first = pool.get("a".to_string()).unwrap();
//! pool.put(first);
//! let second = pool.get("b".to_string()).unwrap();
//! assert_eq!(second.input, "b");
//! ```

mod builder;
mod codec;
mod error;
mod pool;
mod pooled;
#[cfg(feature = "flate2")]
mod zlib;

pub use builder::Builder;
pub use codec::{Decoder, DecoderPool, Encoder, EncoderPool};
pub use error::ResizeError;
pub use pool::{Config, ResourcePool};
pub use pooled::Pooled;
#[cfg(feature = "flate2")]
pub use zlib::{ZlibDecoderPool, ZlibEncoderPool};

#[cfg(feature = "flate2")]
pub use flate2;
