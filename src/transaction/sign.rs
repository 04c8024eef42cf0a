use crate::address::Address;
use crate::messages::Tx;
use crate::network::Network;
use crate::script::Script;
use crate::signer::{KeyEntry, KeyLookup, ScriptLookup};
use crate::transaction::sighash::sighash;
use crate::transaction::{generate_signature, p2pkh, p2sh};
use crate::util::{Error, Result};
use log::{debug, trace};
use secp256k1::{PublicKey, Secp256k1};

/// Produces the unlock script for input `index` of `tx` spending an output locked by `lock_script`.
///
/// P2PKH lock scripts are signed with the key `keys` holds for the committed address.
/// P2SH lock scripts must redeem to a P2PKH script found in `scripts`; the redeem
/// script is signed the same way and pushed after the public key. The transaction
/// itself is not modified.
///
/// # Errors
/// * `Error::BadArgument` if `index` is out of range.
/// * `Error::KeyNotFound` / `Error::ScriptNotFound` on lookup misses.
/// * `Error::Unsupported` for any other lock script template.
pub fn sign_tx_output(
    network: Network,
    tx: &Tx,
    index: usize,
    lock_script: &Script,
    sighash_type: u8,
    keys: &KeyLookup,
    scripts: &ScriptLookup,
) -> Result<Script> {
    if index >= tx.inputs.len() {
        return Err(Error::BadArgument(format!(
            "Input {} out of range for {} inputs",
            index,
            tx.inputs.len()
        )));
    }

    if p2pkh::check_lock_script(&lock_script.0) {
        let address = Address::p2pkh(&lock_script.0[3..23], network)?;
        trace!("input {}: p2pkh spend for {}", index, address);
        let entry = keys.get_key(&address)?;
        return sign_p2pkh(tx, index, lock_script, sighash_type, entry);
    }

    if p2sh::check_lock_script(&lock_script.0) {
        let address = Address::p2sh(&lock_script.0[2..22], network)?;
        trace!("input {}: p2sh spend for {}", index, address);
        let redeem_script = scripts.get_script(&address)?;
        let pubkey_hash = p2pkh::extract_pubkeyhash(&redeem_script.0)
            .map_err(|_| Error::Unsupported("P2SH redeem script is not P2PKH".to_string()))?;
        let key_address = Address::p2pkh(&pubkey_hash.0, network)?;
        let entry = keys.get_key(&key_address)?;
        let mut unlock_script = sign_p2pkh(tx, index, redeem_script, sighash_type, entry)?;
        unlock_script.append_data(&redeem_script.0)?;
        return Ok(unlock_script);
    }

    debug!("input {}: unsupported lock script {:?}", index, lock_script);
    Err(Error::Unsupported("Lock script is neither P2PKH nor P2SH".to_string()))
}

fn sign_p2pkh(
    tx: &Tx,
    index: usize,
    script_code: &Script,
    sighash_type: u8,
    entry: &KeyEntry,
) -> Result<Script> {
    let sig_hash = sighash(tx, index, &script_code.0, sighash_type)?;
    let signature = generate_signature(&entry.key, &sig_hash, sighash_type);
    let public_key = PublicKey::from_secret_key(&Secp256k1::signing_only(), &entry.key);
    if entry.compressed {
        p2pkh::create_unlock_script(&signature, &public_key.serialize())
    } else {
        p2pkh::create_unlock_script(&signature, &public_key.serialize_uncompressed())
    }
}
