//! Chain-agnostic 160-bit token identifier.

use core::fmt;

/// An opaque 160-bit identifier for a token.
///
/// Wraps a fixed-size `[u8; 20]` byte array. All 20-byte sequences are
/// considered valid addresses, so construction is infallible. The
/// all-zero address is reserved as the native-token sentinel.
///
/// Addresses are `Ord` so token pairs can be canonically sorted.
///
/// # Examples
///
/// ```
/// use manifold_amm::domain::TokenAddress;
///
/// let addr = TokenAddress::from_bytes([1u8; 20]);
/// assert_eq!(addr.as_bytes(), [1u8; 20]);
/// assert!(TokenAddress::NATIVE < addr);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TokenAddress([u8; 20]);

impl TokenAddress {
    /// The all-zero address, conventionally the chain's native token.
    pub const NATIVE: Self = Self([0u8; 20]);

    /// Creates a `TokenAddress` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 20-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 20] {
        self.0
    }

    /// Returns `true` if this is the all-zero native-token sentinel.
    #[must_use]
    pub const fn is_native(&self) -> bool {
        let mut i = 0;
        while i < 20 {
            if self.0[i] != 0 {
                return false;
            }
            i += 1;
        }
        true
    }
}

impl fmt::Display for TokenAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}
