//! Service factory: one named, UUID-identified bundle of a key service and a
//! string service sharing a provider.

use std::sync::Arc;

use anyhow::Result;
use uuid::Uuid;

use crate::config::{Config, ServiceDefaults};
use crate::crypto::{CipherProvider, KeyProvider, RustCryptoProvider};
use crate::key_service::KeyService;
use crate::string_service::StringService;

/// Hands out services backed by one provider implementation.
pub trait EncryptionServiceFactory {
    type Provider: KeyProvider + CipherProvider;

    /// Stable identifier of this provider extension.
    fn extension_uuid(&self) -> Uuid;

    /// Human-readable extension name.
    fn extension_name(&self) -> &str;

    fn key_service(&self) -> KeyService<Self::Provider>;

    fn string_service(&self) -> StringService<Self::Provider>;
}

/// Factory for services backed by [`RustCryptoProvider`].
#[derive(Debug, Clone)]
pub struct RustCryptoServiceFactory {
    provider: Arc<RustCryptoProvider>,
    defaults: ServiceDefaults,
}

impl RustCryptoServiceFactory {
    pub const EXTENSION_UUID: Uuid = Uuid::from_u128(0x5d6f_3c1e_8a2b_4f07_9e41_b7c0_2d18_a6f3);

    pub fn new(defaults: ServiceDefaults) -> Self {
        Self {
            provider: Arc::new(RustCryptoProvider::new()),
            defaults,
        }
    }

    /// Build a factory whose key service uses the defaults in `cfg`.
    ///
    /// # Errors
    ///
    /// Returns an error if `cfg` names an unknown algorithm, sets zero PBKDF
    /// iterations, or gives a key size that is not a positive multiple of 8.
    pub fn from_config(cfg: &Config) -> Result<Self> {
        Ok(Self::new(cfg.service_defaults()?))
    }
}

impl Default for RustCryptoServiceFactory {
    fn default() -> Self {
        Self::new(ServiceDefaults::default())
    }
}

impl EncryptionServiceFactory for RustCryptoServiceFactory {
    type Provider = RustCryptoProvider;

    fn extension_uuid(&self) -> Uuid {
        Self::EXTENSION_UUID
    }

    fn extension_name(&self) -> &str {
        RustCryptoProvider::NAME
    }

    fn key_service(&self) -> KeyService<RustCryptoProvider> {
        KeyService::new(Arc::clone(&self.provider), self.defaults)
    }

    fn string_service(&self) -> StringService<RustCryptoProvider> {
        StringService::new(Arc::clone(&self.provider))
    }
}
