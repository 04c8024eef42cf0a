//! Pay-to-public-key-hash scripts.
//!
//! Lock: `OP_DUP OP_HASH160 <hash160(pubkey)> OP_EQUALVERIFY OP_CHECKSIG`.
//! Unlock: `<sig> <pubkey>`.
use crate::script::op_codes::{OP_CHECKSIG, OP_DUP, OP_EQUALVERIFY, OP_HASH160, OP_PUSH};
use crate::script::{next_op, Script};
use crate::util::{Error, Hash160, Result};

/// Creates the P2PKH lock script for a public key hash.
pub fn create_lock_script(pubkey_hash: &Hash160) -> Result<Script> {
    let mut script = Script::new();
    script.append(OP_DUP);
    script.append(OP_HASH160);
    script.append_data(&pubkey_hash.0)?;
    script.append(OP_EQUALVERIFY);
    script.append(OP_CHECKSIG);
    Ok(script)
}

/// Creates the P2PKH unlock script pushing `sig` then `public_key`.
pub fn create_unlock_script(sig: &[u8], public_key: &[u8]) -> Result<Script> {
    let mut script = Script::new();
    script.append_data(sig)?;
    script.append_data(public_key)?;
    Ok(script)
}

/// Checks if script is a P2PKH lock.
#[must_use]
#[inline]
pub fn check_lock_script(lock_script: &[u8]) -> bool {
    lock_script.len() == 25
        && lock_script[0] == OP_DUP
        && lock_script[1] == OP_HASH160
        && lock_script[2] == OP_PUSH + 20
        && lock_script[23] == OP_EQUALVERIFY
        && lock_script[24] == OP_CHECKSIG
}

/// Checks if script has the P2PKH unlock shape: a signature push then a 33 or 65 byte key push.
#[must_use]
pub fn check_unlock_script(unlock_script: &[u8]) -> bool {
    let Some(&sig_len) = unlock_script.first() else {
        return false;
    };
    if !(OP_PUSH + 9..=OP_PUSH + 73).contains(&sig_len) {
        return false;
    }
    let i = next_op(0, unlock_script);
    if i >= unlock_script.len() {
        return false;
    }
    let pk_len = unlock_script[i];
    if pk_len != OP_PUSH + 33 && pk_len != OP_PUSH + 65 {
        return false;
    }
    next_op(i, unlock_script) == unlock_script.len()
}

/// Extracts the public key from a P2PKH unlock script.
pub fn extract_pubkey(unlock_script: &[u8]) -> Result<Vec<u8>> {
    if !check_unlock_script(unlock_script) {
        return Err(Error::BadData("Not P2PKH unlock".to_string()));
    }
    let i = next_op(0, unlock_script);
    Ok(unlock_script[i + 1..].to_vec())
}

/// Extracts the public key hash from a P2PKH lock script.
pub fn extract_pubkeyhash(lock_script: &[u8]) -> Result<Hash160> {
    if !check_lock_script(lock_script) {
        return Err(Error::BadData("Not P2PKH lock".to_string()));
    }
    let mut hash160 = Hash160([0; 20]);
    hash160.0.copy_from_slice(&lock_script[3..23]);
    Ok(hash160)
}
