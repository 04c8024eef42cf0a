//! Transaction input.
use crate::messages::OutPoint;
use crate::script::Script;
use crate::util::{var_int, Error, Result, Serializable};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io;
use std::io::{Read, Write};

/// Largest unlock script accepted when reading.
const MAX_UNLOCK_SCRIPT_LEN: usize = 10_000;

/// Transaction input.
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone)]
pub struct TxIn {
    /// The output being spent.
    pub prev_output: OutPoint,
    /// Unlocking script, empty until the input is signed.
    pub unlock_script: Script,
    /// Sequence number.
    pub sequence: u32,
}

impl TxIn {
    /// Returns the size of the transaction input in bytes.
    #[must_use]
    #[inline]
    pub fn size(&self) -> usize {
        OutPoint::SIZE + var_int::size(self.unlock_script.0.len() as u64) + self.unlock_script.0.len() + 4
    }

    /// Whether an unlock script has been filled in.
    #[must_use]
    #[inline]
    pub fn is_signed(&self) -> bool {
        !self.unlock_script.0.is_empty()
    }
}

/// Spends `prev_output` with an empty unlock script and final sequence.
impl From<OutPoint> for TxIn {
    fn from(prev_output: OutPoint) -> Self {
        TxIn {
            prev_output,
            unlock_script: Script::new(),
            sequence: 0xffffffff,
        }
    }
}

impl Serializable<TxIn> for TxIn {
    fn read(reader: &mut dyn Read) -> Result<TxIn> {
        let prev_output = OutPoint::read(reader)?;
        let script_len = var_int::read(reader)? as usize;
        if script_len > MAX_UNLOCK_SCRIPT_LEN {
            return Err(Error::BadData(format!("Unlock script too long: {}", script_len)));
        }
        let mut unlock_script = vec![0; script_len];
        reader.read_exact(&mut unlock_script)?;
        let sequence = reader.read_u32::<LittleEndian>()?;
        Ok(TxIn {
            prev_output,
            unlock_script: Script(unlock_script),
            sequence,
        })
    }

    fn write(&self, writer: &mut dyn Write) -> io::Result<()> {
        self.prev_output.write(writer)?;
        var_int::write(self.unlock_script.0.len() as u64, writer)?;
        writer.write_all(&self.unlock_script.0)?;
        writer.write_u32::<LittleEndian>(self.sequence)
    }
}
