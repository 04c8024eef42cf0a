//! Legacy (pre-segwit) signature hash.
//!
//! The digest a signature commits to is the double-SHA256 of a modified copy of
//! the transaction: the input being signed carries the previous output's script,
//! the others carry empty scripts, and the sighash type decides which inputs and
//! outputs are kept.
use crate::messages::{Tx, TxOut};
use crate::script::{next_op, op_codes::OP_CODESEPARATOR, Script};
use crate::util::{sha256d, var_int, Error, Hash256, Result, Serializable};
use byteorder::{LittleEndian, WriteBytesExt};

/// Signs all outputs.
pub const SIGHASH_ALL: u8 = 0x01;
/// Signs no outputs.
pub const SIGHASH_NONE: u8 = 0x02;
/// Signs only the output at the same index as the input.
pub const SIGHASH_SINGLE: u8 = 0x03;
/// Signs only this input; others may be added freely.
pub const SIGHASH_ANYONECANPAY: u8 = 0x80;

/// Computes the digest input `n_input` signs over `script_code`.
///
/// `SIGHASH_SINGLE` without a matching output yields the historical digest
/// of one (0x01 followed by zeros).
///
/// # Errors
/// `Error::BadArgument` if `n_input` is out of range.
///
/// # Examples
/// ```
/// use txsign::messages::{OutPoint, Tx, TxIn};
/// use txsign::transaction::sighash::{sighash, SIGHASH_ALL};
///
/// let tx = Tx {
///     version: 1,
///     inputs: vec![TxIn::from(OutPoint::default())],
///     outputs: vec![],
///     lock_time: 0,
/// };
/// let digest = sighash(&tx, 0, &[0x51], SIGHASH_ALL).unwrap();
/// assert_ne!(digest.0, [0; 32]);
/// ```
pub fn sighash(tx: &Tx, n_input: usize, script_code: &[u8], sighash_type: u8) -> Result<Hash256> {
    if n_input >= tx.inputs.len() {
        return Err(Error::BadArgument("Input index out of range".to_string()));
    }
    let base_type = sighash_type & 0x1f;
    let anyone_can_pay = sighash_type & SIGHASH_ANYONECANPAY != 0;
    if base_type == SIGHASH_SINGLE && n_input >= tx.outputs.len() {
        let mut one = [0u8; 32];
        one[0] = 1;
        return Ok(Hash256(one));
    }

    let sub_script = strip_code_separators(script_code);
    let mut s = Vec::with_capacity(tx.size() + sub_script.len());
    s.write_u32::<LittleEndian>(tx.version)?;

    let signed_inputs: Vec<usize> = if anyone_can_pay {
        vec![n_input]
    } else {
        (0..tx.inputs.len()).collect()
    };
    var_int::write(signed_inputs.len() as u64, &mut s)?;
    for i in signed_inputs {
        let mut tx_in = tx.inputs[i].clone();
        if i == n_input {
            tx_in.unlock_script = Script(sub_script.clone());
        } else {
            tx_in.unlock_script = Script::new();
            if base_type == SIGHASH_NONE || base_type == SIGHASH_SINGLE {
                tx_in.sequence = 0;
            }
        }
        tx_in.write(&mut s)?;
    }

    match base_type {
        SIGHASH_NONE => var_int::write(0, &mut s)?,
        SIGHASH_SINGLE => {
            var_int::write(n_input as u64 + 1, &mut s)?;
            let blank = TxOut {
                satoshis: -1,
                lock_script: Script::new(),
            };
            for _ in 0..n_input {
                blank.write(&mut s)?;
            }
            tx.outputs[n_input].write(&mut s)?;
        }
        _ => {
            var_int::write(tx.outputs.len() as u64, &mut s)?;
            for tx_out in &tx.outputs {
                tx_out.write(&mut s)?;
            }
        }
    }

    s.write_u32::<LittleEndian>(tx.lock_time)?;
    s.write_u32::<LittleEndian>(sighash_type as u32)?;
    Ok(sha256d(&s))
}

fn strip_code_separators(script_code: &[u8]) -> Vec<u8> {
    let mut sub_script = Vec::with_capacity(script_code.len());
    let mut i = 0;
    while i < script_code.len() {
        let next = next_op(i, script_code).min(script_code.len());
        if script_code[i] != OP_CODESEPARATOR {
            sub_script.extend_from_slice(&script_code[i..next]);
        }
        i = next;
    }
    sub_script
}
