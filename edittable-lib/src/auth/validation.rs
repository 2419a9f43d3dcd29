//! ValidationKeyProvider trait and implementations

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use tokio::sync::RwLock;

/// A wiki anti-forgery key, as sent in the `validation_key` form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationKey {
    /// The key value.
    pub value: String,
    /// When this key was handed to us.
    pub issued_at: DateTime<Utc>,
}

impl ValidationKey {
    /// Creates a key issued now.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            issued_at: Utc::now(),
        }
    }
}

/// Supplies the validation key for each save request.
///
/// The client asks for a key before every request and reports the key the
/// server hands back, if any. Wikis with strict validation issue a fresh
/// key with every response and reject a key that has been used once.
#[async_trait]
pub trait ValidationKeyProvider: Send + Sync {
    /// Returns the key to send with the next request, if one is known.
    async fn validation_key(&self) -> Option<ValidationKey>;

    /// Adopts the key the server sent back with a response.
    ///
    /// The default implementation ignores it.
    async fn rotate(&self, _next: String) {}
}

/// A fixed validation key, e.g. one scraped from the page at load.
#[derive(Debug, Clone)]
pub struct StaticValidationKey {
    key: Option<ValidationKey>,
}

impl StaticValidationKey {
    /// Creates a provider that always returns the given key.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: Some(ValidationKey::new(key)),
        }
    }

    /// Creates a provider for wikis with validation switched off.
    pub fn none() -> Self {
        Self { key: None }
    }
}

#[async_trait]
impl ValidationKeyProvider for StaticValidationKey {
    async fn validation_key(&self) -> Option<ValidationKey> {
        self.key.clone()
    }
}

/// A validation key that follows the one the server returns.
#[derive(Debug, Default)]
pub struct RotatingValidationKey {
    current: RwLock<Option<ValidationKey>>,
}

impl RotatingValidationKey {
    /// Creates a provider seeded with the page's initial key.
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            current: RwLock::new(Some(ValidationKey::new(initial))),
        }
    }

    /// Creates a provider with no key until the server sends one.
    pub fn empty() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ValidationKeyProvider for RotatingValidationKey {
    async fn validation_key(&self) -> Option<ValidationKey> {
        self.current.read().await.clone()
    }

    async fn rotate(&self, next: String) {
        log::debug!("adopting rotated validation key");
        *self.current.write().await = Some(ValidationKey::new(next));
    }
}
