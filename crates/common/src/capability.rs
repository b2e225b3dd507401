//! Capabilities a service exposes, so callers can check before they call.

use std::fmt;

/// A single operation family a service may or may not implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    PasswordKeyDerivation,
    SymmetricKeyGeneration,
    AsymmetricKeyGeneration,
    SymmetricEncryption,
    AsymmetricEncryption,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Capability::PasswordKeyDerivation => "password-based key derivation",
            Capability::SymmetricKeyGeneration => "symmetric key generation",
            Capability::AsymmetricKeyGeneration => "asymmetric key generation",
            Capability::SymmetricEncryption => "symmetric encryption",
            Capability::AsymmetricEncryption => "asymmetric encryption",
        };
        f.write_str(s)
    }
}

/// The fixed set of capabilities a service implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilitySet(&'static [Capability]);

impl CapabilitySet {
    pub const fn new(capabilities: &'static [Capability]) -> Self {
        Self(capabilities)
    }

    pub fn contains(&self, capability: Capability) -> bool {
        self.0.contains(&capability)
    }

    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        self.0.iter().copied()
    }
}
