//! Hash160 (RIPEMD160 of SHA256), the digest behind P2PKH and P2SH addresses.

use bitcoin_hashes::{hash160 as bh_hash160, Hash as BHHash};
use std::fmt;

/// 20-byte public key or script hash.
#[derive(Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hash160(pub [u8; 20]);

impl Hash160 {
    /// Copies a hash out of a slice.
    ///
    /// Returns `None` unless the slice is exactly 20 bytes.
    #[must_use]
    pub fn from_slice(bytes: &[u8]) -> Option<Hash160> {
        let array: [u8; 20] = bytes.try_into().ok()?;
        Some(Hash160(array))
    }
}

/// Computes Hash160 (RIPEMD160(SHA256(data))).
#[must_use]
#[inline]
pub fn hash160(data: &[u8]) -> Hash160 {
    Hash160(bh_hash160::Hash::hash(data).to_byte_array())
}

impl From<[u8; 20]> for Hash160 {
    fn from(bytes: [u8; 20]) -> Self {
        Hash160(bytes)
    }
}

impl fmt::Debug for Hash160 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}
