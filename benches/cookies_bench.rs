use cookiestore::cookies::jar::CookieJar;
use cookiestore::store::{CookieOptions, CookieStore, StoreConfig};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;

fn benchmark_store_set(c: &mut Criterion) {
    let jar = CookieJar::new("https://example.com/").unwrap();
    let store = CookieStore::with_config(jar, StoreConfig::new().path("/"));
    let value = json!({"user": "ada", "roles": ["admin", "ops"]});

    c.bench_function("store_set", |b| {
        b.iter(|| {
            store
                .set(black_box("session"), black_box(&value), CookieOptions::new().expires(7))
                .unwrap();
        })
    });
}

fn benchmark_store_get(c: &mut Criterion) {
    let jar = CookieJar::new("https://example.com/").unwrap();
    let store = CookieStore::with_config(jar, StoreConfig::new().path("/"));
    // Pre-populate
    for i in 0..40 {
        store
            .set(&format!("key{}", i), &json!({"n": i}), CookieOptions::new())
            .unwrap();
    }

    c.bench_function("store_get", |b| {
        b.iter(|| {
            black_box(store.get(black_box("key20")).unwrap());
        })
    });
}

fn benchmark_jar_cookie_string(c: &mut Criterion) {
    let jar = CookieJar::new("https://example.com/foo/bar").unwrap();
    for i in 0..40 {
        jar.set_cookie_string(&format!("cookie{}=val; Path=/foo", i));
    }

    c.bench_function("jar_cookie_string", |b| {
        b.iter(|| {
            black_box(jar.cookie_string());
        })
    });
}

criterion_group!(
    benches,
    benchmark_store_set,
    benchmark_store_get,
    benchmark_jar_cookie_string
);
criterion_main!(benches);
