//! Legacy transaction signing.
//!
//! Computes pre-segwit signature hashes, produces DER signatures, builds the
//! P2PKH and P2SH script templates and unlocks inputs against them.
//!
//! # Examples
//!
//! Sign a P2PKH input by hand and verify it:
//!
//! ```
//! use secp256k1::{PublicKey, Secp256k1, SecretKey};
//! use txsign::messages::{OutPoint, Tx, TxIn};
//! use txsign::transaction::{generate_signature, p2pkh, sighash::{sighash, SIGHASH_ALL}};
//! use txsign::util::hash160;
//!
//! let secp = Secp256k1::new();
//! let private_key = SecretKey::from_slice(&[1; 32]).unwrap();
//! let public_key = PublicKey::from_secret_key(&secp, &private_key).serialize();
//!
//! let mut tx = Tx {
//!     version: 1,
//!     inputs: vec![TxIn::from(OutPoint::default())],
//!     outputs: vec![],
//!     lock_time: 0,
//! };
//! let lock_script = p2pkh::create_lock_script(&hash160(&public_key)).unwrap();
//! let sighash_val = sighash(&tx, 0, &lock_script.0, SIGHASH_ALL).unwrap();
//! let signature = generate_signature(&private_key, &sighash_val, SIGHASH_ALL);
//! tx.inputs[0].unlock_script = p2pkh::create_unlock_script(&signature, &public_key).unwrap();
//! assert!(tx.verify_input(0, &lock_script).is_ok());
//! ```
pub mod p2pkh;
pub mod p2sh;
pub mod sighash;
mod sign;

pub use self::sign::sign_tx_output;

use crate::util::Hash256;
use secp256k1::{Message, Secp256k1, SecretKey};

/// Generates a DER-encoded ECDSA signature over `sighash` with the sighash type byte appended.
///
/// Nonces are RFC 6979 deterministic and S is normalized low, so the same key and
/// hash always produce the same bytes.
#[must_use]
pub fn generate_signature(private_key: &SecretKey, sighash: &Hash256, sighash_type: u8) -> Vec<u8> {
    let secp = Secp256k1::signing_only();
    let message = Message::from_digest(sighash.0);
    let mut signature = secp.sign_ecdsa(&message, private_key);
    signature.normalize_s();
    let mut der = signature.serialize_der().to_vec();
    der.push(sighash_type);
    der
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::sighash::SIGHASH_ALL;
    use pretty_assertions::assert_eq;
    use secp256k1::ecdsa::Signature;

    #[test]
    fn signature_is_deterministic_and_low_s() {
        let key = SecretKey::from_slice(&[7; 32]).unwrap();
        let hash = Hash256([3; 32]);
        let a = generate_signature(&key, &hash, SIGHASH_ALL);
        let b = generate_signature(&key, &hash, SIGHASH_ALL);
        assert_eq!(a, b);
        assert_eq!(*a.last().unwrap(), SIGHASH_ALL);

        let mut sig = Signature::from_der(&a[..a.len() - 1]).unwrap();
        let before = sig;
        sig.normalize_s();
        assert_eq!(sig, before);
    }
}
