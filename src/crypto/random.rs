use crate::error::{CryptoError, Result};
use getrandom::fill;

/// A source of cryptographically secure random bytes.
///
/// The engine draws every salt and IV from this trait so tests can substitute a
/// fixed source. Production code uses [`OsRandom`].
pub trait RandomSource {
    /// Fill `buf` entirely with random bytes.
    fn fill(&self, buf: &mut [u8]) -> Result<()>;

    /// Return `n` random bytes.
    fn generate(&self, n: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; n];
        self.fill(&mut buf)?;
        Ok(buf)
    }
}

/// The operating system's secure random generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill(&self, buf: &mut [u8]) -> Result<()> {
        fill(buf).map_err(|_| CryptoError::RandomnessUnavailable)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &R {
    fn fill(&self, buf: &mut [u8]) -> Result<()> {
        (**self).fill(buf)
    }
}
