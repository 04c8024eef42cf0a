#![warn(missing_docs)]
#![deny(unsafe_code)]

/*! # txsign

Signs the inputs of legacy Bitcoin transactions with a single private key.

The key's P2PKH address is derived from its compressed public key, the lock script
paying to that address is built, and every input is unlocked against it with a
`SIGHASH_ALL` signature. Inputs are signed in order and the first failure aborts,
leaving earlier inputs signed.

## Usage
```
use secp256k1::SecretKey;
use txsign::messages::{OutPoint, Tx, TxIn};
use txsign::script::Script;
use txsign::signer::sign_and_check;

let key = SecretKey::from_slice(&[3; 32]).unwrap();
let mut tx = Tx {
    version: 1,
    inputs: vec![TxIn::from(OutPoint::default()), TxIn::from(OutPoint::default())],
    outputs: vec![],
    lock_time: 0,
};
sign_and_check(&mut tx, &key, true, &Script::new()).unwrap();
assert!(tx.inputs.iter().all(|input| input.is_signed()));
```

## Modules
- [`signer`]: key and script lookups and the transaction signer.
- [`transaction`]: sighash, signatures, script templates and per-input signing.
- [`script`]: scripts and the interpreter used to verify signed inputs.
- [`address`], [`network`]: base58check addresses and network version bytes.
- [`messages`]: transaction wire types.
*/

pub mod address;
pub mod messages;
pub mod network;
pub mod script;
pub mod signer;
pub mod transaction;
pub mod util;
