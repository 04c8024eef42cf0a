//! Script building and evaluation.
//!
//! # Examples
//!
//! Evaluate a script that needs no transaction context:
//!
//! ```
//! use txsign::script::{op_codes::*, Script, TransactionlessChecker};
//!
//! let mut script = Script::new();
//! script.append_data(&[1, 2, 3]).unwrap();
//! script.append(OP_DUP);
//! script.append(OP_EQUAL);
//! assert!(script.eval(&mut TransactionlessChecker).is_ok());
//! ```
use crate::util::{Error, Result};
use std::fmt;

mod checker;
mod interpreter;
pub mod op_codes;
mod stack;

pub use self::checker::{Checker, TransactionChecker, TransactionlessChecker};
pub use self::interpreter::{eval, next_op};

use self::op_codes::*;

/// Transaction script.
#[derive(Default, Clone, PartialEq, Eq, Hash)]
pub struct Script(pub Vec<u8>);

impl Script {
    /// Creates a new empty script.
    #[must_use]
    pub fn new() -> Script {
        Script(vec![])
    }

    /// Appends a single opcode or data byte.
    #[inline]
    pub fn append(&mut self, byte: u8) {
        self.0.push(byte);
    }

    /// Appends raw bytes without a push prefix.
    #[inline]
    pub fn append_slice(&mut self, slice: &[u8]) {
        self.0.extend_from_slice(slice);
    }

    /// Appends `data` behind the shortest push opcode able to carry it.
    ///
    /// # Errors
    /// `Error::BadArgument` when `data` is longer than a 4-byte length prefix allows.
    pub fn append_data(&mut self, data: &[u8]) -> Result<()> {
        let len = data.len();
        match len {
            0 => self.0.push(OP_0),
            1..=75 => self.0.push(OP_PUSH + len as u8),
            76..=0xff => {
                self.0.push(OP_PUSHDATA1);
                self.0.push(len as u8);
            }
            0x100..=0xffff => {
                self.0.push(OP_PUSHDATA2);
                self.0.extend_from_slice(&(len as u16).to_le_bytes());
            }
            _ => {
                let len = u32::try_from(len)
                    .map_err(|_| Error::BadArgument(format!("Data too long to push: {}", len)))?;
                self.0.push(OP_PUSHDATA4);
                self.0.extend_from_slice(&len.to_le_bytes());
            }
        }
        self.0.extend_from_slice(data);
        Ok(())
    }

    /// Splits a push-only script into the data it pushes.
    ///
    /// `OP_1NEGATE` and `OP_1` to `OP_16` yield their minimally encoded numbers.
    ///
    /// # Errors
    /// `Error::ScriptError` if the script contains a non-push opcode or is truncated.
    pub fn pushes(&self) -> Result<Vec<Vec<u8>>> {
        let script = &self.0;
        let mut items = Vec::new();
        let mut i = 0;
        while i < script.len() {
            match script[i] {
                OP_1NEGATE => {
                    items.push(vec![0x81]);
                    i += 1;
                    continue;
                }
                op @ OP_1..=OP_16 => {
                    items.push(vec![op - OP_1 + 1]);
                    i += 1;
                    continue;
                }
                _ => {}
            }
            let next = next_op(i, script);
            let start = match script[i] {
                OP_0 => i + 1,
                1..=75 => i + 1,
                OP_PUSHDATA1 => i + 2,
                OP_PUSHDATA2 => i + 3,
                OP_PUSHDATA4 => i + 5,
                op => return Err(Error::ScriptError(format!("Non-push opcode {} at {}", op, i))),
            };
            if start > next || next > script.len() {
                return Err(Error::ScriptError("Truncated push".to_string()));
            }
            items.push(script[start..next].to_vec());
            i = next;
        }
        Ok(items)
    }

    /// Evaluates the script with `checker` answering signature checks.
    ///
    /// # Errors
    /// `Error::ScriptError` if the script fails or leaves false on the stack.
    pub fn eval<T: Checker>(&self, checker: &mut T) -> Result<()> {
        eval(&self.0, checker)
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Script({})", hex::encode(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn append_data_picks_shortest_push() {
        let mut s = Script::new();
        s.append_data(&[]).unwrap();
        assert_eq!(s.0, vec![OP_0]);

        let mut s = Script::new();
        s.append_data(&[7; 75]).unwrap();
        assert_eq!(s.0[0], 75);
        assert_eq!(s.0.len(), 76);

        let mut s = Script::new();
        s.append_data(&[7; 76]).unwrap();
        assert_eq!(&s.0[..2], &[OP_PUSHDATA1, 76]);

        let mut s = Script::new();
        s.append_data(&[7; 256]).unwrap();
        assert_eq!(&s.0[..3], &[OP_PUSHDATA2, 0, 1]);
    }

    #[test]
    fn pushes_splits_push_only_scripts() {
        let mut s = Script::new();
        s.append_data(&[1; 72]).unwrap();
        s.append_data(&[2; 33]).unwrap();
        s.append_data(&[3; 100]).unwrap();
        assert_eq!(s.pushes().unwrap(), vec![vec![1; 72], vec![2; 33], vec![3; 100]]);

        s.append(OP_DUP);
        assert!(s.pushes().is_err());
        assert_eq!(Script(vec![OP_1NEGATE, OP_1, OP_16]).pushes().unwrap(), vec![vec![0x81], vec![1], vec![16]]);
        assert!(Script(vec![OP_PUSH + 5, 1, 2]).pushes().is_err());
    }
}
