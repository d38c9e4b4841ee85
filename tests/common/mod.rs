#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::ConnectInfo;
use sqlx::PgPool;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::Layer;

use keylink::infrastructure::cache::{CacheResult, CacheService, NullCache};
use keylink::infrastructure::persistence::PgUrlRepository;
use keylink::state::AppState;

pub const BASE_URL: &str = "http://short.test";

/// Inserts a record directly, bypassing key generation.
pub async fn create_test_url(pool: &PgPool, key: &str, target_url: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO urls (key, secret_key, target_url) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(key)
    .bind(format!("{key}_testsecret"))
    .bind(target_url)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Inserts a record that is switched off.
pub async fn create_inactive_url(pool: &PgPool, key: &str, target_url: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO urls (key, secret_key, target_url, is_active) VALUES ($1, $2, $3, FALSE) RETURNING id",
    )
    .bind(key)
    .bind(format!("{key}_testsecret"))
    .bind(target_url)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn clicks_for(pool: &PgPool, key: &str) -> i64 {
    sqlx::query_scalar("SELECT clicks FROM urls WHERE key = $1")
        .bind(key)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn create_test_state(pool: PgPool) -> AppState {
    create_test_state_with_cache(pool, Arc::new(NullCache))
}

pub fn create_test_state_with_cache(pool: PgPool, cache: Arc<dyn CacheService>) -> AppState {
    let url_repository = Arc::new(PgUrlRepository::new(Arc::new(pool)));
    AppState::new(url_repository, cache, BASE_URL)
}

/// In-process cache that records how it is used.
#[derive(Default)]
pub struct RecordingCache {
    entries: Mutex<HashMap<String, String>>,
    pub gets: AtomicUsize,
    pub sets: AtomicUsize,
}

impl RecordingCache {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn insert(&self, key: &str, target_url: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), target_url.to_string());
    }

    pub fn entry(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    pub fn set_count(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CacheService for RecordingCache {
    async fn get_url(&self, key: &str) -> CacheResult<Option<String>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        Ok(self.entry(key))
    }

    async fn set_url(&self, key: &str, target_url: &str) -> CacheResult<()> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.insert(key, target_url);
        Ok(())
    }

    async fn invalidate(&self, key: &str) -> CacheResult<()> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

/// Supplies a fixed peer address, as `into_make_service_with_connect_info` would.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
