//! Double-SHA256 digests for txids and signature hashes.
//!
//! Displayed as a little-endian number, the way txids are printed.
use crate::util::{Error, Result, Serializable};
use bitcoin_hashes::{sha256d as bh_sha256d, Hash as BHHash};
use std::fmt;
use std::io;
use std::io::{Read, Write};

/// 256-bit hash for transactions and signature digests.
#[derive(Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hash256(pub [u8; 32]);

impl Hash256 {
    /// Converts the hash into a byte-reversed hex string.
    #[must_use]
    pub fn encode(&self) -> String {
        let mut r = self.0;
        r.reverse();
        hex::encode(r)
    }

    /// Parses a byte-reversed hex string of 64 characters.
    pub fn decode(s: &str) -> Result<Hash256> {
        let decoded = hex::decode(s)?;
        if decoded.len() != 32 {
            return Err(Error::BadArgument(format!("Length {} of decoded bytes", decoded.len())));
        }
        let mut bytes = [0; 32];
        bytes.copy_from_slice(&decoded);
        bytes.reverse();
        Ok(Hash256(bytes))
    }
}

impl Serializable<Hash256> for Hash256 {
    fn read(reader: &mut dyn Read) -> Result<Hash256> {
        let mut bytes = [0; 32];
        reader.read_exact(&mut bytes)?;
        Ok(Hash256(bytes))
    }

    fn write(&self, writer: &mut dyn Write) -> io::Result<()> {
        writer.write_all(&self.0)
    }
}

/// Hashes a data array twice using SHA256.
#[must_use]
#[inline]
pub fn sha256d(data: &[u8]) -> Hash256 {
    Hash256(bh_sha256d::Hash::hash(data).to_byte_array())
}

impl fmt::Debug for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.encode())
    }
}
