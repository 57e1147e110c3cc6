//! Operating-system CSPRNG reader.

use rand::rngs::OsRng;
use rand::RngCore;

/// Bytes read per secure operation.
pub const SECURE_READ_LEN: usize = 8;

/// Reads cryptographically secure bytes from the operating system.
///
/// Stateless and freely shareable; every call goes to the OS.
#[derive(Clone, Copy, Debug, Default)]
pub struct SecureSource;

impl SecureSource {
    /// Creates a source handle.
    #[inline]
    pub fn new() -> Self {
        Self
    }

    /// Fills `buf` with secure random bytes.
    ///
    /// # Errors
    ///
    /// Returns `rand::Error` if the operating system cannot supply randomness.
    #[inline]
    pub fn fill(&self, buf: &mut [u8]) -> Result<(), rand::Error> {
        OsRng.try_fill_bytes(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_changes_buffer() {
        let source = SecureSource::new();
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];

        source.fill(&mut a).unwrap();
        source.fill(&mut b).unwrap();

        assert_ne!(a, [0u8; 32]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_fill_empty_buffer() {
        let mut empty: [u8; 0] = [];
        assert!(SecureSource::new().fill(&mut empty).is_ok());
    }
}
