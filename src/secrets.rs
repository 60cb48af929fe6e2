use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("cannot resolve secret {name}: {message}")]
pub struct SecretError {
    pub name: String,
    pub message: String,
}

/// Looks up a secret value by its logical name within a region.
///
/// Vendor backends (a cloud secrets manager, a vault, ...) live behind this trait so
/// the configuration layer never talks to them directly.
#[async_trait]
pub trait SecretResolver: Send + Sync {
    async fn resolve(&self, name: &str, region: &str) -> Result<String, SecretError>;
}

/// Resolver used when no secrets backend is wired in.
pub struct UnconfiguredSecretStore;

#[async_trait]
impl SecretResolver for UnconfiguredSecretStore {
    async fn resolve(&self, name: &str, region: &str) -> Result<String, SecretError> {
        Err(SecretError {
            name: name.to_owned(),
            message: format!("no secret store configured for region '{}'", region),
        })
    }
}
