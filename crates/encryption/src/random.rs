//! Random source selection.

use rand_core::{CryptoRngCore, OsRng, RngCore};

/// Caller-supplied cryptographically secure random source.
pub type RandomSource<'a> = &'a mut dyn CryptoRngCore;

/// Run `f` with the caller's random source, or the OS CSPRNG if none was given.
pub(crate) fn with_rng<R>(
    rng: Option<RandomSource<'_>>,
    f: impl FnOnce(&mut dyn RngCore) -> R,
) -> R {
    match rng {
        Some(rng) => f(rng.as_rngcore()),
        None => f(&mut OsRng),
    }
}
