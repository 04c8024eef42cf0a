//! Signature checkers the interpreter calls back into.
use crate::messages::Tx;
use crate::transaction::sighash::sighash;
use crate::util::{Error, Result};
use secp256k1::{ecdsa::Signature, Message, PublicKey, Secp256k1};

/// Answers signature checks during evaluation.
pub trait Checker {
    /// Verifies `sig` (DER plus sighash type byte) by `pubkey` over `script`.
    ///
    /// Malformed signatures and public keys fail the check rather than erroring.
    ///
    /// # Errors
    /// When the check cannot be made at all, such as a missing transaction context.
    fn check_sig(&mut self, sig: &[u8], pubkey: &[u8], script: &[u8]) -> Result<bool>;
}

/// Checker for scripts evaluated outside any transaction. Fails every signature check.
#[derive(Default, Clone, Debug)]
pub struct TransactionlessChecker;

impl Checker for TransactionlessChecker {
    fn check_sig(&mut self, _sig: &[u8], _pubkey: &[u8], _script: &[u8]) -> Result<bool> {
        Err(Error::ScriptError("No transaction context".to_string()))
    }
}

/// Checks signatures against one input of a transaction.
#[derive(Debug)]
pub struct TransactionChecker<'a> {
    /// The transaction being validated.
    pub tx: &'a Tx,
    /// Input index being checked.
    pub input: usize,
}

impl<'a> TransactionChecker<'a> {
    /// Creates a new transaction checker.
    #[must_use]
    pub fn new(tx: &'a Tx, input: usize) -> Self {
        Self { tx, input }
    }
}

impl Checker for TransactionChecker<'_> {
    fn check_sig(&mut self, sig: &[u8], pubkey: &[u8], script: &[u8]) -> Result<bool> {
        let Some((sighash_type, der_sig)) = sig.split_last() else {
            return Ok(false);
        };
        let Ok(signature) = Signature::from_der(der_sig) else {
            return Ok(false);
        };
        let Ok(public_key) = PublicKey::from_slice(pubkey) else {
            return Ok(false);
        };
        let sig_hash = sighash(self.tx, self.input, script, *sighash_type)?;
        let secp = Secp256k1::verification_only();
        let message = Message::from_digest(sig_hash.0);
        Ok(secp.verify_ecdsa(&message, &signature, &public_key).is_ok())
    }
}
