//! End-to-end signing of multi-input transactions.

use pretty_assertions::assert_eq;
use secp256k1::{PublicKey, Secp256k1, SecretKey};
use std::collections::HashMap;
use txsign::address::Address;
use txsign::messages::{OutPoint, Tx, TxIn, TxOut};
use txsign::network::Network;
use txsign::script::{op_codes, Script};
use txsign::signer::{p2pkh_address, sign_and_check, KeyLookup, ScriptLookup, TransactionSigner};
use txsign::util::{hash160, Error, Hash256};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn key(byte: u8) -> SecretKey {
    SecretKey::from_slice(&[byte; 32]).unwrap()
}

fn unsigned_tx(n: usize) -> Tx {
    Tx {
        version: 1,
        inputs: (0..n)
            .map(|i| TxIn::from(OutPoint { hash: Hash256([i as u8 + 1; 32]), index: i as u32 }))
            .collect(),
        outputs: vec![
            TxOut { satoshis: 70_000, lock_script: Script(vec![op_codes::OP_1]) },
            TxOut { satoshis: 29_000, lock_script: Script(vec![op_codes::OP_1]) },
        ],
        lock_time: 0,
    }
}

#[test]
fn single_input_verifies_against_derived_lock_script() {
    init();
    let signer = TransactionSigner::default();
    let lock = signer.lock_script(&key(1)).unwrap();
    let mut tx = unsigned_tx(1);
    signer.sign_and_check(&mut tx, &key(1), true, &lock).unwrap();
    tx.verify_input(0, &lock).unwrap();
}

#[test]
fn every_input_uses_the_same_lock_script() {
    init();
    let signer = TransactionSigner::new(Network::Testnet);
    let lock = signer.lock_script(&key(2)).unwrap();
    let mut tx = unsigned_tx(5);
    signer.sign_and_check(&mut tx, &key(2), true, &Script::new()).unwrap();

    let pubkeys: Vec<Vec<u8>> = tx
        .inputs
        .iter()
        .map(|input| input.unlock_script.pushes().unwrap()[1].clone())
        .collect();
    for (i, pubkey) in pubkeys.iter().enumerate() {
        assert_eq!(pubkey, &pubkeys[0]);
        tx.verify_input(i, &lock).unwrap();
    }
    // Signatures commit to their own input index.
    assert!(tx.inputs[0].unlock_script != tx.inputs[1].unlock_script);
}

#[test]
fn failure_keeps_earlier_inputs_signed() {
    init();
    let signer = TransactionSigner::default();
    let good = p2pkh_address(&key(3), Network::Simnet).unwrap();
    let missing = p2pkh_address(&key(4), Network::Simnet).unwrap();
    let good_lock = good.lock_script().unwrap();
    let missing_lock = missing.lock_script().unwrap();
    let keys = KeyLookup::single(&good, key(3), true);

    let mut tx = unsigned_tx(5);
    let err = signer
        .sign_inputs(&mut tx, &keys, &ScriptLookup::Empty, |i| {
            if i == 3 {
                missing_lock.clone()
            } else {
                good_lock.clone()
            }
        })
        .unwrap_err();

    assert_eq!(err.to_string(), format!("Failed to sign input 3: No key for address {}", missing));
    match err {
        Error::Signing { input, cause } => {
            assert_eq!(input, 3);
            assert!(matches!(*cause, Error::KeyNotFound(_)));
        }
        e => panic!("unexpected error: {}", e),
    }
    for i in 0..3 {
        tx.verify_input(i, &good_lock).unwrap();
    }
    assert!(!tx.inputs[3].is_signed());
    assert!(!tx.inputs[4].is_signed());
}

#[test]
fn signing_twice_gives_the_same_bytes() {
    init();
    let mut tx = unsigned_tx(3);
    sign_and_check(&mut tx, &key(5), true, &Script::new()).unwrap();
    let first = tx.clone();
    sign_and_check(&mut tx, &key(5), true, &Script::new()).unwrap();
    assert_eq!(tx, first);
}

#[test]
fn no_inputs_is_a_no_op() {
    init();
    let mut tx = unsigned_tx(0);
    let before = tx.clone();
    sign_and_check(&mut tx, &key(6), false, &Script::new()).unwrap();
    assert_eq!(tx, before);
}

#[test]
fn uncompressed_flag_signs_but_does_not_verify() {
    init();
    let signer = TransactionSigner::default();
    let mut tx = unsigned_tx(2);
    signer.sign_and_check(&mut tx, &key(7), false, &Script::new()).unwrap();

    let pushes = tx.inputs[0].unlock_script.pushes().unwrap();
    assert_eq!(pushes[1].len(), 65);

    // The derived lock script commits to the compressed key.
    let derived = signer.lock_script(&key(7)).unwrap();
    assert!(tx.verify_input(0, &derived).is_err());

    // The pushed key hashes to the uncompressed address, not the derived one.
    let pk = PublicKey::from_secret_key(&Secp256k1::new(), &key(7));
    assert_eq!(pushes[1], pk.serialize_uncompressed().to_vec());
    let uncompressed = Address::p2pkh(&hash160(&pushes[1]).0, Network::Simnet).unwrap();
    let derived_address = p2pkh_address(&key(7), Network::Simnet).unwrap();
    assert!(uncompressed != derived_address);
}

#[test]
fn p2sh_needs_a_backed_script_lookup() {
    init();
    let signer = TransactionSigner::new(Network::Regtest);
    let inner = p2pkh_address(&key(8), Network::Regtest).unwrap();
    let redeem = inner.lock_script().unwrap();
    let outer = Address::from_redeem_script(&redeem, Network::Regtest);
    let lock = outer.lock_script().unwrap();
    let keys = KeyLookup::single(&inner, key(8), true);

    let mut tx = unsigned_tx(2);
    let err = signer.sign_inputs(&mut tx, &keys, &ScriptLookup::Empty, |_| lock.clone()).unwrap_err();
    assert_eq!(err.to_string(), format!("Failed to sign input 0: No redeem script for address {}", outer));
    assert!(!tx.inputs[0].is_signed());

    let scripts = ScriptLookup::Backed(HashMap::from([(outer.encode(), redeem)]));
    signer.sign_inputs(&mut tx, &keys, &scripts, |_| lock.clone()).unwrap();
    tx.verify_input(0, &lock).unwrap();
    tx.verify_input(1, &lock).unwrap();
}

#[test]
fn non_standard_lock_script_is_unsupported() {
    init();
    let keys = KeyLookup::single(&p2pkh_address(&key(9), Network::Simnet).unwrap(), key(9), true);
    let mut tx = unsigned_tx(2);
    let err = TransactionSigner::default()
        .sign_inputs(&mut tx, &keys, &ScriptLookup::Empty, |_| Script(vec![op_codes::OP_1]))
        .unwrap_err();
    assert!(matches!(err, Error::Signing { input: 0, ref cause } if matches!(**cause, Error::Unsupported(_))));
    assert!(!tx.inputs[0].is_signed());
}

#[test]
fn tampering_after_signing_breaks_verification() {
    init();
    let signer = TransactionSigner::default();
    let lock = signer.lock_script(&key(10)).unwrap();
    let mut tx = unsigned_tx(2);
    signer.sign_and_check(&mut tx, &key(10), true, &Script::new()).unwrap();
    tx.outputs[0].satoshis -= 1;
    assert!(tx.verify_input(0, &lock).is_err());
    assert!(tx.verify_input(1, &lock).is_err());
}

#[test]
fn unsigned_unlock_script_cannot_hide_the_lock_script() {
    init();
    let lock = TransactionSigner::default().lock_script(&key(11)).unwrap();
    let mut tx = unsigned_tx(1);
    tx.inputs[0].unlock_script = Script(vec![op_codes::OP_1, op_codes::OP_PUSHDATA1, lock.0.len() as u8 + 1]);
    assert!(tx.verify_input(0, &lock).is_err());
}
