use std::convert::Infallible;
use std::hint::black_box;
use std::io::{Cursor, Read, Write};

use codec_pool::flate2::Compression;
use codec_pool::flate2::read::ZlibDecoder;
use codec_pool::flate2::write::ZlibEncoder;
use codec_pool::{ResourcePool, ZlibDecoderPool, ZlibEncoderPool};
use criterion::{Criterion, criterion_group, criterion_main};

fn get_put(c: &mut Criterion) {
    let pool: ResourcePool<Vec<u8>> = ResourcePool::with_capacity(64);
    c.bench_function("resource_pool_get_put", |b| {
        b.iter(|| {
            let buf = pool
                .get(4096, |n| Ok::<_, Infallible>(Vec::with_capacity(n)))
                .unwrap();
            pool.put(black_box(buf));
        })
    });
}

fn zlib_round_trip(c: &mut Criterion) {
    let data = b"the quick brown fox jumps over the lazy dog ".repeat(64);

    let encoders = ZlibEncoderPool::<Vec<u8>>::with_capacity(4);
    let decoders = ZlibDecoderPool::<Cursor<Vec<u8>>>::with_capacity(4);
    c.bench_function("zlib_pooled", |b| {
        b.iter(|| {
            let mut encoder = encoders.get(Vec::new()).unwrap();
            encoder.write_all(&data).unwrap();
            encoder.try_finish().unwrap();
            let compressed = std::mem::take(encoder.get_mut());
            encoders.put(encoder);

            let mut decoder = decoders.get(Cursor::new(compressed)).unwrap();
            let mut plain = Vec::with_capacity(data.len());
            decoder.read_to_end(&mut plain).unwrap();
            decoders.put(decoder);
            black_box(plain)
        })
    });

    c.bench_function("zlib_unpooled", |b| {
        b.iter(|| {
            let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(&data).unwrap();
            let compressed = encoder.finish().unwrap();

            let mut decoder = ZlibDecoder::new(Cursor::new(compressed));
            let mut plain = Vec::with_capacity(data.len());
            decoder.read_to_end(&mut plain).unwrap();
            black_box(plain)
        })
    });
}

criterion_group!(benches, get_put, zlib_round_trip);
criterion_main!(benches);
