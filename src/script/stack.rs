//! Stack item encodings for script numbers and booleans.
use crate::util::{Error, Result};

/// Pops the top item and interprets it as a bool.
pub fn pop_bool(stack: &mut Vec<Vec<u8>>) -> Result<bool> {
    let top = stack
        .pop()
        .ok_or_else(|| Error::ScriptError("Empty stack for bool".to_string()))?;
    Ok(decode_bool(&top))
}

/// Decodes a stack item to bool. Any non-zero byte is true, except a lone sign bit.
#[inline]
pub fn decode_bool(s: &[u8]) -> bool {
    match s.split_last() {
        None => false,
        Some((last, rest)) => rest.iter().any(|&b| b != 0) || (last & 127) != 0,
    }
}

/// Encodes a small number as a minimal stack item (little-endian, sign in MSB).
///
/// # Errors
/// `Error::ScriptError` outside [-2^31 + 1, 2^31 - 1].
pub fn encode_num(val: i64) -> Result<Vec<u8>> {
    if val.abs() > 2_147_483_647 {
        return Err(Error::ScriptError("Number out of range".to_string()));
    }
    let mut pos = val.unsigned_abs();
    let mut v = Vec::with_capacity(4);
    while pos > 0 {
        v.push((pos & 0xff) as u8);
        pos >>= 8;
    }
    if let Some(last) = v.last_mut() {
        if *last & 0x80 != 0 {
            v.push(if val < 0 { 0x80 } else { 0 });
        } else if val < 0 {
            *last |= 0x80;
        }
    }
    Ok(v)
}
