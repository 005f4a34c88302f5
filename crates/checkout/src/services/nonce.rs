//! Single-use request nonces for the final-cost endpoint.
//!
//! A nonce is issued alongside the shipping-methods listing and must
//! accompany the final-cost request. Nonces are random 128-bit values,
//! held in a TTL cache and consumed on first use.

use std::time::Duration;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use moka::future::Cache;
use rand::RngCore;

/// Issues and validates single-use nonces.
#[derive(Clone)]
pub struct NonceService {
    cache: Cache<String, ()>,
}

impl NonceService {
    /// Create a service whose nonces expire after `ttl`.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: Cache::builder()
                .max_capacity(100_000)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Issue a fresh nonce.
    pub async fn issue(&self) -> String {
        let mut bytes = [0u8; 16];
        rand::rng().fill_bytes(&mut bytes);
        let token = URL_SAFE_NO_PAD.encode(bytes);
        self.cache.insert(token.clone(), ()).await;
        token
    }

    /// Consume a nonce, returning whether it was valid.
    ///
    /// A nonce is valid exactly once; expired, unknown and already-used
    /// tokens all fail.
    pub async fn consume(&self, token: &str) -> bool {
        self.cache.remove(token).await.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_nonce_is_single_use() {
        let nonces = NonceService::new(Duration::from_secs(60));
        let token = nonces.issue().await;

        assert!(nonces.consume(&token).await);
        assert!(!nonces.consume(&token).await);
    }

    #[tokio::test]
    async fn test_unknown_nonce_rejected() {
        let nonces = NonceService::new(Duration::from_secs(60));
        assert!(!nonces.consume("made-up-token").await);
    }

    #[tokio::test]
    async fn test_nonces_are_unique() {
        let nonces = NonceService::new(Duration::from_secs(60));
        let a = nonces.issue().await;
        let b = nonces.issue().await;
        assert_ne!(a, b);
    }
}
