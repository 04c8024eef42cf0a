//! Property-based tests for transaction signing.

use proptest::prelude::*;
use secp256k1::SecretKey;
use txsign::messages::{OutPoint, Tx, TxIn, TxOut};
use txsign::network::Network;
use txsign::script::Script;
use txsign::signer::{p2pkh_address, KeyLookup, ScriptLookup, TransactionSigner};
use txsign::util::{Error, Hash256};

fn make_key(seed: u8) -> SecretKey {
    let mut secret_bytes = [0u8; 32];
    secret_bytes[0] = 0x01;
    secret_bytes[31] = seed;
    SecretKey::from_slice(&secret_bytes).unwrap()
}

fn make_tx(n: usize, satoshis: i64) -> Tx {
    Tx {
        version: 2,
        inputs: (0..n)
            .map(|i| TxIn::from(OutPoint { hash: Hash256([0x5a; 32]), index: i as u32 }))
            .collect(),
        outputs: vec![TxOut { satoshis, lock_script: Script(vec![0x51]) }],
        lock_time: 0,
    }
}

fn network() -> impl Strategy<Value = Network> {
    prop::sample::select(Network::ALL.to_vec())
}

proptest! {
    /// Every input signed with a compressed key satisfies the derived lock script.
    #[test]
    fn signed_inputs_verify(
        seed in any::<u8>(),
        n in 1usize..=4,
        satoshis in 1i64..=1_000_000,
        network in network(),
    ) {
        let key = make_key(seed);
        let signer = TransactionSigner::new(network);
        let lock = signer.lock_script(&key).unwrap();
        let mut tx = make_tx(n, satoshis);

        signer.sign_and_check(&mut tx, &key, true, &lock).unwrap();

        for i in 0..n {
            prop_assert!(tx.verify_input(i, &lock).is_ok());
        }
    }

    /// A failing input leaves earlier inputs signed and later ones untouched.
    #[test]
    fn abort_point_splits_signed_and_unsigned(
        seed in 1u8..=200,
        n in 1usize..=5,
        fail_at in 0usize..5,
    ) {
        let fail_at = fail_at % n;
        let key = make_key(seed);
        let address = p2pkh_address(&key, Network::Simnet).unwrap();
        let lock = address.lock_script().unwrap();
        let other = p2pkh_address(&make_key(seed.wrapping_add(1)), Network::Simnet)
            .unwrap()
            .lock_script()
            .unwrap();
        let keys = KeyLookup::single(&address, key, true);
        let mut tx = make_tx(n, 10_000);

        let err = TransactionSigner::default()
            .sign_inputs(&mut tx, &keys, &ScriptLookup::Empty, |i| {
                if i == fail_at { other.clone() } else { lock.clone() }
            })
            .unwrap_err();

        let failed = matches!(err, Error::Signing { input, .. } if input == fail_at);
        prop_assert!(failed);
        for i in 0..fail_at {
            prop_assert!(tx.verify_input(i, &lock).is_ok());
        }
        for i in fail_at..n {
            prop_assert!(!tx.inputs[i].is_signed());
        }
    }

    /// Signing is deterministic.
    #[test]
    fn resigning_is_idempotent(seed in any::<u8>(), compressed in any::<bool>()) {
        let key = make_key(seed);
        let signer = TransactionSigner::default();
        let mut tx = make_tx(2, 5_000);
        signer.sign_and_check(&mut tx, &key, compressed, &Script::new()).unwrap();
        let first = tx.clone();
        signer.sign_and_check(&mut tx, &key, compressed, &Script::new()).unwrap();
        prop_assert_eq!(tx, first);
    }
}
