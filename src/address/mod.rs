//! Base58check addresses for P2PKH and P2SH outputs.
//!
//! An address is a version byte (chosen by network and kind), a 20-byte hash and a
//! four byte double-SHA256 checksum, base58 encoded. The encoded string is also the
//! key under which signing lookups store their entries.

use crate::network::Network;
use crate::script::Script;
use crate::transaction::p2pkh;
use crate::transaction::p2sh;
use crate::util::{hash160, sha256d, Error, Hash160, Result};
use base58::{FromBase58, ToBase58};
use std::fmt;

/// What an address commits to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressKind {
    /// Hash of a public key.
    P2PKH,
    /// Hash of a redeem script.
    P2SH,
}

/// A decoded address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address {
    /// Pubkey-hash or script-hash.
    pub kind: AddressKind,
    /// Network whose version bytes encode this address.
    pub network: Network,
    /// The committed hash.
    pub hash: Hash160,
}

impl Address {
    /// Builds a P2PKH address from a public key hash.
    ///
    /// # Errors
    /// `Error::BadArgument` if the hash is not 20 bytes.
    pub fn p2pkh(pubkey_hash: &[u8], network: Network) -> Result<Address> {
        Ok(Address {
            kind: AddressKind::P2PKH,
            network,
            hash: hash_from_payload(pubkey_hash)?,
        })
    }

    /// Builds a P2SH address from a script hash.
    ///
    /// # Errors
    /// `Error::BadArgument` if the hash is not 20 bytes.
    pub fn p2sh(script_hash: &[u8], network: Network) -> Result<Address> {
        Ok(Address {
            kind: AddressKind::P2SH,
            network,
            hash: hash_from_payload(script_hash)?,
        })
    }

    /// P2SH address committing to `redeem_script`.
    #[must_use]
    pub fn from_redeem_script(redeem_script: &Script, network: Network) -> Address {
        Address {
            kind: AddressKind::P2SH,
            network,
            hash: hash160(&redeem_script.0),
        }
    }

    /// Decodes a base58check address and checks its version against `network`.
    ///
    /// # Errors
    /// `Error::FromBase58Error` or `Error::BadData` for malformed input or a
    /// version byte that does not belong to `network`.
    pub fn decode(input: &str, network: Network) -> Result<Address> {
        let (version, payload) = decode_address(input)?;
        if version == network.p2pkh_version() {
            Address::p2pkh(&payload, network)
        } else if version == network.p2sh_version() {
            Address::p2sh(&payload, network)
        } else {
            Err(Error::BadData(format!("Invalid address version {:#04x} for {}", version, network)))
        }
    }

    /// Canonical base58check string.
    #[must_use]
    pub fn encode(&self) -> String {
        let version = match self.kind {
            AddressKind::P2PKH => self.network.p2pkh_version(),
            AddressKind::P2SH => self.network.p2sh_version(),
        };
        base58check(version, &self.hash.0)
    }

    /// Standard locking script paying to this address.
    ///
    /// # Errors
    /// Propagates script building failures.
    pub fn lock_script(&self) -> Result<Script> {
        match self.kind {
            AddressKind::P2PKH => p2pkh::create_lock_script(&self.hash),
            AddressKind::P2SH => p2sh::create_lock_script(&self.hash),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

fn hash_from_payload(payload: &[u8]) -> Result<Hash160> {
    Hash160::from_slice(payload).ok_or_else(|| {
        Error::BadArgument(format!("Payload must be 20 bytes, got {}", payload.len()))
    })
}

fn base58check(version: u8, payload: &[u8; 20]) -> String {
    let mut v = [0u8; 25];
    v[0] = version;
    v[1..21].copy_from_slice(payload);
    let checksum = sha256d(&v[..21]);
    v[21..25].copy_from_slice(&checksum.0[..4]);
    v.to_base58()
}

/// Decodes a base58check address into version and payload.
///
/// # Errors
/// `Error::FromBase58Error` on decode failure, `Error::BadData` on invalid length or checksum.
pub fn decode_address(input: &str) -> Result<(u8, Vec<u8>)> {
    let bytes = input.from_base58()?;
    if bytes.len() != 25 {
        return Err(Error::BadData("Invalid address length".to_string()));
    }
    let checksum = sha256d(&bytes[..21]);
    if checksum.0[..4] != bytes[21..] {
        return Err(Error::BadData("Invalid checksum".to_string()));
    }
    Ok((bytes[0], bytes[1..21].to_vec()))
}
