//! Key and redeem script lookups consulted while signing.
use crate::address::Address;
use crate::script::Script;
use crate::util::{Error, Result};
use secp256k1::SecretKey;
use std::collections::HashMap;

/// A private key and the public key encoding its address was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEntry {
    /// Signing key.
    pub key: SecretKey,
    /// Whether the unlock script carries the 33 byte compressed public key.
    pub compressed: bool,
}

/// Maps addresses to signing keys.
#[derive(Debug, Clone, Default)]
pub enum KeyLookup {
    /// Fails every lookup.
    #[default]
    Empty,
    /// Entries keyed by the address's base58check string.
    Backed(HashMap<String, KeyEntry>),
}

impl KeyLookup {
    /// Lookup holding exactly one entry for `address`.
    #[must_use]
    pub fn single(address: &Address, key: SecretKey, compressed: bool) -> KeyLookup {
        let mut map = HashMap::with_capacity(1);
        map.insert(address.encode(), KeyEntry { key, compressed });
        KeyLookup::Backed(map)
    }

    /// Finds the key for `address`.
    ///
    /// # Errors
    /// `Error::KeyNotFound` naming the address when there is no entry.
    pub fn get_key(&self, address: &Address) -> Result<&KeyEntry> {
        let encoded = address.encode();
        match self {
            KeyLookup::Backed(map) => map.get(&encoded),
            KeyLookup::Empty => None,
        }
        .ok_or(Error::KeyNotFound(encoded))
    }
}

/// Maps P2SH addresses to their redeem scripts.
#[derive(Debug, Clone, Default)]
pub enum ScriptLookup {
    /// Fails every lookup.
    #[default]
    Empty,
    /// Redeem scripts keyed by the P2SH address's base58check string.
    Backed(HashMap<String, Script>),
}

impl ScriptLookup {
    /// Finds the redeem script for `address`.
    ///
    /// # Errors
    /// `Error::ScriptNotFound` naming the address when there is no entry.
    pub fn get_script(&self, address: &Address) -> Result<&Script> {
        let encoded = address.encode();
        match self {
            ScriptLookup::Backed(map) => map.get(&encoded),
            ScriptLookup::Empty => None,
        }
        .ok_or(Error::ScriptNotFound(encoded))
    }
}
