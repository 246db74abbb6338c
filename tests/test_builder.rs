use std::convert::Infallible;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering::SeqCst;

use codec_pool::{Builder, Config};

#[test]
fn build_pool() {
    let mut builder = Builder::<String>::new();
    let pool = builder.capacity(10).build();
    assert_eq!(pool.capacity(), Some(10));
    assert_eq!(pool.available(), 0);
}

#[test]
fn build_with_default_config() {
    let pool = Builder::<String>::default().build();
    assert_eq!(pool.capacity(), None);
}

#[test]
fn build_with_config() {
    let mut builder = Builder::<String>::new();
    let pool = builder.config(Config::bounded(3)).build();
    assert_eq!(pool.capacity(), Some(3));
}

#[test]
fn build_with_close_func() {
    static CLOSED: AtomicUsize = AtomicUsize::new(0);
    fn close_func(_item: String) {
        CLOSED.fetch_add(1, SeqCst);
    }

    let mut builder: Builder<String> = Builder::new();
    builder.close_func(close_func);
    builder.capacity(1);
    let pool = builder.build();

    let item1 = pool
        .get("hello", |s| Ok::<_, Infallible>(s.to_string()))
        .unwrap();
    let item2 = pool
        .get("world", |s| Ok::<_, Infallible>(s.to_string()))
        .unwrap();
    pool.put(item1);
    assert_eq!(CLOSED.load(SeqCst), 0);
    pool.put(item2);
    assert_eq!(CLOSED.load(SeqCst), 1);
    assert_eq!(pool.available(), 1);

    drop(pool);
    assert_eq!(CLOSED.load(SeqCst), 2);
}

#[cfg(feature = "serde")]
#[test]
fn config_from_json() {
    let config: Config = serde_json::from_str(r#"{ "capacity": 32 }"#).unwrap();
    assert_eq!(config.capacity, Some(32));

    let config: Config = serde_json::from_str("{}").unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.capacity, None);

    let json = format!(r#"{{ "capacity": {} }}"#, usize::MAX);
    let config: Config = serde_json::from_str(&json).unwrap();
    let pool = Builder::<String>::new().config(config).build();
    assert_eq!(pool.capacity(), Some(usize::MAX));

    let json = serde_json::to_string(&Config::bounded(5)).unwrap();
    assert_eq!(json, r#"{"capacity":5}"#);
}
