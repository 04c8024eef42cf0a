//! Transaction and per-input script verification.

use crate::messages::{TxIn, TxOut};
use crate::script::{op_codes, Script, TransactionChecker};
use crate::transaction::p2sh;
use crate::util::{hash160, sha256d, var_int, Error, Hash256, Result, Serializable};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::fmt;
use std::io;
use std::io::{Read, Write};

/// Maximum number of satoshis possible (21M coins).
pub const MAX_SATOSHIS: i64 = 21_000_000 * 100_000_000;

/// Upper bound on input and output counts accepted when reading.
const MAX_INPUTS: u64 = 1_000_000;
const MAX_OUTPUTS: u64 = 1_000_000;

/// Bitcoin transaction.
#[derive(Default, PartialEq, Eq, Hash, Clone)]
pub struct Tx {
    /// Transaction version.
    pub version: u32,
    /// Transaction inputs. Their order is the signing order.
    pub inputs: Vec<TxIn>,
    /// Transaction outputs.
    pub outputs: Vec<TxOut>,
    /// The block number or timestamp at which this transaction is unlocked.
    pub lock_time: u32,
}

impl Tx {
    /// Calculates the hash of the transaction (txid).
    #[must_use]
    pub fn hash(&self) -> Hash256 {
        let mut b = Vec::with_capacity(self.size());
        // Writing into a Vec cannot fail
        let _ = self.write(&mut b);
        sha256d(&b)
    }

    /// Serialized size in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        8 + var_int::size(self.inputs.len() as u64)
            + self.inputs.iter().map(TxIn::size).sum::<usize>()
            + var_int::size(self.outputs.len() as u64)
            + self.outputs.iter().map(TxOut::size).sum::<usize>()
    }

    /// Checks that input `input` satisfies `lock_script`.
    ///
    /// The unlock script must be push-only. Its pushes, a code separator and the
    /// lock script are then evaluated as one script. For P2SH lock scripts the
    /// last push must be the redeem script; it is then evaluated against the
    /// remaining pushes.
    ///
    /// # Errors
    /// `Error::BadArgument` for an out of range input, `Error::ScriptError` if
    /// the unlock script is not push-only or evaluation fails.
    pub fn verify_input(&self, input: usize, lock_script: &Script) -> Result<()> {
        let tx_in = self
            .inputs
            .get(input)
            .ok_or_else(|| Error::BadArgument(format!("Input {} out of range", input)))?;
        let mut pushes = tx_in
            .unlock_script
            .pushes()
            .map_err(|e| match e {
                Error::ScriptError(s) => Error::ScriptError(format!("Unlock script is not push-only: {}", s)),
                e => e,
            })?;

        evaluate(self, input, &pushes, lock_script)?;

        if !p2sh::check_lock_script(&lock_script.0) {
            return Ok(());
        }
        let redeem_script = pushes
            .pop()
            .ok_or_else(|| Error::ScriptError("Missing redeem script".to_string()))?;
        if hash160(&redeem_script).0[..] != lock_script.0[2..22] {
            return Err(Error::ScriptError("Redeem script hash mismatch".to_string()));
        }
        evaluate(self, input, &pushes, &Script(redeem_script))
    }
}

/// Evaluates `pushes`, a code separator and `lock_script` for input `input` of `tx`.
fn evaluate(tx: &Tx, input: usize, pushes: &[Vec<u8>], lock_script: &Script) -> Result<()> {
    let mut script = Script::new();
    for item in pushes {
        script.append_data(item)?;
    }
    script.append(op_codes::OP_CODESEPARATOR);
    script.append_slice(&lock_script.0);
    script.eval(&mut TransactionChecker::new(tx, input))
}

impl Serializable<Tx> for Tx {
    fn read(reader: &mut dyn Read) -> Result<Tx> {
        let version = reader.read_u32::<LittleEndian>()?;
        let n_inputs = var_int::read(reader)?;
        if n_inputs > MAX_INPUTS {
            return Err(Error::BadData(format!("Too many inputs: {}", n_inputs)));
        }
        let mut inputs = Vec::with_capacity(n_inputs as usize);
        for _ in 0..n_inputs {
            inputs.push(TxIn::read(reader)?);
        }
        let n_outputs = var_int::read(reader)?;
        if n_outputs > MAX_OUTPUTS {
            return Err(Error::BadData(format!("Too many outputs: {}", n_outputs)));
        }
        let mut outputs = Vec::with_capacity(n_outputs as usize);
        for _ in 0..n_outputs {
            outputs.push(TxOut::read(reader)?);
        }
        let lock_time = reader.read_u32::<LittleEndian>()?;
        Ok(Tx {
            version,
            inputs,
            outputs,
            lock_time,
        })
    }

    fn write(&self, writer: &mut dyn Write) -> io::Result<()> {
        writer.write_u32::<LittleEndian>(self.version)?;
        var_int::write(self.inputs.len() as u64, writer)?;
        for tx_in in &self.inputs {
            tx_in.write(writer)?;
        }
        var_int::write(self.outputs.len() as u64, writer)?;
        for tx_out in &self.outputs {
            tx_out.write(writer)?;
        }
        writer.write_u32::<LittleEndian>(self.lock_time)
    }
}

impl fmt::Debug for Tx {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let inputs_str = format!("[<{} inputs>]", self.inputs.len());
        let outputs_str = format!("[<{} outputs>]", self.outputs.len());
        f.debug_struct("Tx")
            .field("version", &self.version)
            .field("inputs", if self.inputs.len() <= 3 { &self.inputs } else { &inputs_str })
            .field("outputs", if self.outputs.len() <= 3 { &self.outputs } else { &outputs_str })
            .field("lock_time", &self.lock_time)
            .finish()
    }
}
