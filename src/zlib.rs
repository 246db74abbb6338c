//! Pooled zlib codecs backed by [`flate2`].
//!
//! # Example
//!
//! ```rust
//! use codec_pool::{ZlibDecoderPool, ZlibEncoderPool};
//! use std::io::{Cursor, Read, Write};
//!
//! let encoders: ZlibEncoderPool<Vec<u8>> = ZlibEncoderPool::with_capacity(4);
//! let decoders: ZlibDecoderPool<Cursor<Vec<u8>>> = ZlibDecoderPool::with_capacity(4);
//!
//! let mut encoder = encoders.get(Vec::new()).unwrap();
//! encoder.write_all(b"hello pool").unwrap();
//! encoder.try_finish().unwrap();
//! let compressed = std::mem::take(encoder.get_mut());
//! encoders.put(encoder);
//!
//! let mut decoder = decoders.get(Cursor::new(compressed)).unwrap();
//! let mut plain = String::new();
//! decoder.read_to_string(&mut plain).unwrap();
//! decoders.put(decoder);
//!
//! assert_eq!(plain, "hello pool");
//! assert_eq!(encoders.available(), 1);
//! assert_eq!(decoders.available(), 1);
//! ```

use std::io::{self, Read, Write};

use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use tracing::debug;

use crate::{Decoder, DecoderPool, Encoder, EncoderPool};

/// A pool of zlib decoders reading from `R`.
pub type ZlibDecoderPool<R> = DecoderPool<ZlibDecoder<R>>;

/// A pool of zlib encoders writing to `W`.
pub type ZlibEncoderPool<W> = EncoderPool<ZlibEncoder<W>>;

impl<R: Read> Decoder for ZlibDecoder<R> {
    type Source = R;
    type Error = io::Error;

    fn new_decoder(source: R) -> io::Result<Self> {
        Ok(ZlibDecoder::new(source))
    }

    fn reset(&mut self, source: R) -> io::Result<()> {
        // The previous source is dropped.
        ZlibDecoder::<R>::reset(self, source);
        Ok(())
    }
}

impl<W: Write> Encoder for ZlibEncoder<W> {
    type Sink = W;
    type Error = io::Error;

    fn new_encoder(sink: W) -> io::Result<Self> {
        Ok(ZlibEncoder::new(sink, Compression::default()))
    }

    /// Finish the current stream into the previous sink, then write to
    /// `sink`. Nothing reaches the previous sink if its stream was already
    /// finished with `try_finish` before the encoder was put back. An error
    /// leaves the encoder unusable.
    fn reset(&mut self, sink: W) -> io::Result<()> {
        ZlibEncoder::<W>::reset(self, sink).map(drop)
    }

    fn close(self) {
        if let Err(err) = self.finish() {
            debug!(%err, "failed to finish zlib stream while closing encoder");
        }
    }
}
