//! Signs every input of a transaction with a single private key.
//!
//! The signer derives the key's P2PKH address on its network, builds the lock
//! script paying to it, and asks [`sign_tx_output`] for an unlock script for
//! each input in order. The first failure aborts; inputs signed before it keep
//! their new unlock scripts.
//!
//! # Examples
//!
//! ```
//! use secp256k1::SecretKey;
//! use txsign::messages::{OutPoint, Tx, TxIn};
//! use txsign::script::Script;
//! use txsign::signer::TransactionSigner;
//!
//! let key = SecretKey::from_slice(&[1; 32]).unwrap();
//! let mut tx = Tx {
//!     version: 1,
//!     inputs: vec![TxIn::from(OutPoint::default())],
//!     outputs: vec![],
//!     lock_time: 0,
//! };
//! let signer = TransactionSigner::default();
//! signer.sign_and_check(&mut tx, &key, true, &Script::new()).unwrap();
//!
//! let lock_script = signer.lock_script(&key).unwrap();
//! assert!(tx.verify_input(0, &lock_script).is_ok());
//! ```
use crate::address::Address;
use crate::messages::Tx;
use crate::network::Network;
use crate::script::Script;
use crate::transaction::sighash::SIGHASH_ALL;
use crate::transaction::sign_tx_output;
use crate::util::{hash160, Error, Result};
use log::{debug, trace, warn};
use secp256k1::{PublicKey, Secp256k1, SecretKey};

mod lookup;

pub use self::lookup::{KeyEntry, KeyLookup, ScriptLookup};

/// P2PKH address of `key`, always hashed from the compressed public key.
///
/// # Errors
/// `Error::AddressDerivation` if the address cannot be built.
pub fn p2pkh_address(key: &SecretKey, network: Network) -> Result<Address> {
    let public_key = PublicKey::from_secret_key(&Secp256k1::signing_only(), key);
    let pubkey_hash = hash160(&public_key.serialize());
    Address::p2pkh(&pubkey_hash.0, network).map_err(|e| Error::AddressDerivation(e.to_string()))
}

/// Signs transactions for addresses on one network with `SIGHASH_ALL`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TransactionSigner {
    network: Network,
}

impl TransactionSigner {
    /// Creates a signer deriving addresses on `network`.
    #[must_use]
    pub fn new(network: Network) -> TransactionSigner {
        TransactionSigner { network }
    }

    /// Network addresses are derived on.
    #[must_use]
    pub fn network(&self) -> Network {
        self.network
    }

    /// Lock script paying to the P2PKH address of `key`.
    ///
    /// # Errors
    /// `Error::AddressDerivation` or `Error::ScriptDerivation`.
    pub fn lock_script(&self, key: &SecretKey) -> Result<Script> {
        let address = p2pkh_address(key, self.network)?;
        address.lock_script().map_err(|e| Error::ScriptDerivation(e.to_string()))
    }

    /// Signs every input of `tx` against the P2PKH lock script of `private_key`.
    ///
    /// The address is always derived from the compressed public key. `compressed`
    /// only selects which public key encoding goes into the unlock scripts, so
    /// with `false` the result will not satisfy the derived lock script.
    ///
    /// `previous_script` is not used to choose what to sign; every input is signed
    /// against the same derived lock script. Use [`TransactionSigner::sign_inputs`]
    /// to sign inputs against their own lock scripts.
    ///
    /// # Errors
    /// * `Error::AddressDerivation` if the key's address cannot be built.
    /// * `Error::ScriptDerivation` if its lock script cannot be built.
    /// * `Error::Signing` naming the first input that failed. Earlier inputs stay signed.
    pub fn sign_and_check(
        &self,
        tx: &mut Tx,
        private_key: &SecretKey,
        compressed: bool,
        previous_script: &Script,
    ) -> Result<()> {
        let address = p2pkh_address(private_key, self.network)?;
        let lock_script = address
            .lock_script()
            .map_err(|e| Error::ScriptDerivation(e.to_string()))?;
        trace!("ignoring previous script {:?}, signing for {}", previous_script, address);

        let keys = KeyLookup::single(&address, *private_key, compressed);
        self.sign_inputs(tx, &keys, &ScriptLookup::Empty, |_| lock_script.clone())
    }

    /// Signs each input `i` of `tx` against `lock_script_for(i)` using `keys` and `scripts`.
    ///
    /// Inputs are signed in order and each unlock script is written as soon as it is
    /// produced.
    ///
    /// # Errors
    /// `Error::Signing` with the index of the first input that failed and the cause.
    pub fn sign_inputs<F>(
        &self,
        tx: &mut Tx,
        keys: &KeyLookup,
        scripts: &ScriptLookup,
        lock_script_for: F,
    ) -> Result<()>
    where
        F: Fn(usize) -> Script,
    {
        debug!("signing {} inputs on {}", tx.inputs.len(), self.network);
        for input in 0..tx.inputs.len() {
            let lock_script = lock_script_for(input);
            match sign_tx_output(self.network, tx, input, &lock_script, SIGHASH_ALL, keys, scripts) {
                Ok(unlock_script) => {
                    trace!("input {} signed: {:?}", input, unlock_script);
                    tx.inputs[input].unlock_script = unlock_script;
                }
                Err(e) => {
                    warn!("failed to sign input {}: {}", input, e);
                    return Err(Error::Signing { input, cause: Box::new(e) });
                }
            }
        }
        Ok(())
    }
}

/// Signs every input of `tx` with a [`TransactionSigner`] on the default network.
///
/// # Errors
/// See [`TransactionSigner::sign_and_check`].
pub fn sign_and_check(
    tx: &mut Tx,
    private_key: &SecretKey,
    compressed: bool,
    previous_script: &Script,
) -> Result<()> {
    TransactionSigner::default().sign_and_check(tx, private_key, compressed, previous_script)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::{OutPoint, TxIn, TxOut};
    use crate::script::op_codes::OP_1;
    use crate::util::Hash256;
    use pretty_assertions::assert_eq;

    fn key() -> SecretKey {
        SecretKey::from_slice(&hex::decode("0c28fca386c7a227600b2fe50b7cae11ec86d3bf1fbe471be89827e19d72aa1d").unwrap()).unwrap()
    }

    fn tx(n: usize) -> Tx {
        Tx {
            version: 1,
            inputs: (0..n)
                .map(|i| TxIn::from(OutPoint { hash: Hash256([0xab; 32]), index: i as u32 }))
                .collect(),
            outputs: vec![TxOut { satoshis: 50_000, lock_script: Script(vec![OP_1]) }],
            lock_time: 0,
        }
    }

    #[test]
    fn defaults_to_simnet() {
        assert_eq!(TransactionSigner::default().network(), Network::Simnet);
        assert_eq!(TransactionSigner::new(Network::Testnet).network(), Network::Testnet);
    }

    #[test]
    fn address_uses_compressed_key() {
        let pk = PublicKey::from_secret_key(&Secp256k1::new(), &key());
        let addr = p2pkh_address(&key(), Network::Mainnet).unwrap();
        assert_eq!(addr.hash, hash160(&pk.serialize()));
        assert!(p2pkh_address(&key(), Network::Simnet).unwrap().encode().starts_with('S'));
    }

    #[test]
    fn signs_all_inputs() {
        let signer = TransactionSigner::default();
        let mut t = tx(3);
        signer.sign_and_check(&mut t, &key(), true, &Script::new()).unwrap();
        let lock = signer.lock_script(&key()).unwrap();
        for i in 0..3 {
            assert!(t.inputs[i].is_signed());
            t.verify_input(i, &lock).unwrap();
        }
    }

    #[test]
    fn previous_script_is_ignored() {
        let mut a = tx(2);
        let mut b = tx(2);
        sign_and_check(&mut a, &key(), true, &Script::new()).unwrap();
        sign_and_check(&mut b, &key(), true, &Script(vec![OP_1])).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn stops_at_first_failure() {
        let signer = TransactionSigner::default();
        let addr = p2pkh_address(&key(), Network::Simnet).unwrap();
        let lock = addr.lock_script().unwrap();
        let keys = KeyLookup::single(&addr, key(), true);
        let mut t = tx(4);
        let err = signer
            .sign_inputs(&mut t, &keys, &ScriptLookup::Empty, |i| if i == 2 { Script(vec![OP_1]) } else { lock.clone() })
            .unwrap_err();
        match err {
            Error::Signing { input, cause } => {
                assert_eq!(input, 2);
                assert!(matches!(*cause, Error::Unsupported(_)));
            }
            e => panic!("unexpected error: {}", e),
        }
        assert!(t.inputs[0].is_signed());
        assert!(t.inputs[1].is_signed());
        assert!(!t.inputs[2].is_signed());
        assert!(!t.inputs[3].is_signed());
    }
}
