//! Stack interpreter for the standard script subset.
use crate::script::{op_codes::*, stack::*, Checker};
use crate::util::{hash160, sha256d, Error, Result};
use bitcoin_hashes::{ripemd160 as bh_ripemd160, sha256 as bh_sha256, Hash as BHHash};

/// Executes a script, failing unless it finishes with true on top of the stack.
pub fn eval<T: Checker>(script: &[u8], checker: &mut T) -> Result<()> {
    let mut stack: Vec<Vec<u8>> = Vec::with_capacity(8);
    let mut check_index = 0;
    let mut i = 0;
    while i < script.len() {
        match script[i] {
            OP_0 => stack.push(vec![]),
            len @ 1..=75 => {
                let len = len as usize;
                remains(i + 1, len, script)?;
                stack.push(script[i + 1..i + 1 + len].to_vec());
            }
            OP_PUSHDATA1 => {
                remains(i + 1, 1, script)?;
                let len = script[i + 1] as usize;
                remains(i + 2, len, script)?;
                stack.push(script[i + 2..i + 2 + len].to_vec());
            }
            OP_PUSHDATA2 => {
                remains(i + 1, 2, script)?;
                let len = u16::from_le_bytes([script[i + 1], script[i + 2]]) as usize;
                remains(i + 3, len, script)?;
                stack.push(script[i + 3..i + 3 + len].to_vec());
            }
            OP_PUSHDATA4 => {
                remains(i + 1, 4, script)?;
                let len = u32::from_le_bytes([script[i + 1], script[i + 2], script[i + 3], script[i + 4]]) as usize;
                remains(i + 5, len, script)?;
                stack.push(script[i + 5..i + 5 + len].to_vec());
            }
            OP_1NEGATE => stack.push(encode_num(-1)?),
            op @ OP_1..=OP_16 => stack.push(encode_num((op - OP_1 + 1) as i64)?),
            OP_NOP => {}
            OP_VERIFY => {
                if !pop_bool(&mut stack)? {
                    return Err(Error::ScriptError("OP_VERIFY failed".to_string()));
                }
            }
            OP_RETURN => return Err(Error::ScriptError("Hit OP_RETURN".to_string())),
            OP_DROP => {
                check_stack_size(1, &stack)?;
                stack.pop();
            }
            OP_DUP => {
                check_stack_size(1, &stack)?;
                let copy = stack[stack.len() - 1].clone();
                stack.push(copy);
            }
            OP_SWAP => {
                check_stack_size(2, &stack)?;
                let len = stack.len();
                stack.swap(len - 1, len - 2);
            }
            OP_SIZE => {
                check_stack_size(1, &stack)?;
                let len = stack[stack.len() - 1].len() as i64;
                stack.push(encode_num(len)?);
            }
            OP_EQUAL => {
                let (a, b) = pop_two(&mut stack)?;
                stack.push(encode_num((a == b) as i64)?);
            }
            OP_EQUALVERIFY => {
                let (a, b) = pop_two(&mut stack)?;
                if a != b {
                    return Err(Error::ScriptError("Operands are not equal".to_string()));
                }
            }
            OP_RIPEMD160 => {
                let v = pop(&mut stack)?;
                stack.push(bh_ripemd160::Hash::hash(&v).to_byte_array().to_vec());
            }
            OP_SHA256 => {
                let v = pop(&mut stack)?;
                stack.push(bh_sha256::Hash::hash(&v).to_byte_array().to_vec());
            }
            OP_HASH160 => {
                let v = pop(&mut stack)?;
                stack.push(hash160(&v).0.to_vec());
            }
            OP_HASH256 => {
                let v = pop(&mut stack)?;
                stack.push(sha256d(&v).0.to_vec());
            }
            OP_CODESEPARATOR => check_index = i,
            OP_CHECKSIG | OP_CHECKSIGVERIFY => {
                let (sig, pubkey) = pop_two(&mut stack)?;
                let cleaned_script = remove_sig(&sig, &script[check_index..]);
                let success = checker.check_sig(&sig, &pubkey, &cleaned_script)?;
                if script[i] == OP_CHECKSIGVERIFY {
                    if !success {
                        return Err(Error::ScriptError("OP_CHECKSIGVERIFY failed".to_string()));
                    }
                } else {
                    stack.push(encode_num(success as i64)?);
                }
            }
            op => return Err(Error::ScriptError(format!("Bad opcode: {}, index {}", op, i))),
        }
        i = next_op(i, script);
    }
    match stack.last() {
        None => Err(Error::ScriptError("Stack too small: 1".to_string())),
        Some(top) if !decode_bool(top) => Err(Error::ScriptError("Top of stack is false".to_string())),
        Some(_) => Ok(()),
    }
}

/// Index of the operation after the one at `i`.
///
/// May point past the end when a push claims more bytes than remain.
pub fn next_op(i: usize, script: &[u8]) -> usize {
    if i >= script.len() {
        return script.len();
    }
    match script[i] {
        len @ 1..=75 => i + 1 + len as usize,
        OP_PUSHDATA1 if i + 2 <= script.len() => i + 2 + script[i + 1] as usize,
        OP_PUSHDATA2 if i + 3 <= script.len() => {
            i + 3 + u16::from_le_bytes([script[i + 1], script[i + 2]]) as usize
        }
        OP_PUSHDATA4 if i + 5 <= script.len() => {
            i + 5 + u32::from_le_bytes([script[i + 1], script[i + 2], script[i + 3], script[i + 4]]) as usize
        }
        OP_PUSHDATA1 | OP_PUSHDATA2 | OP_PUSHDATA4 => script.len(),
        _ => i + 1,
    }
}

/// Drops every push of `sig` from `script`, op by op.
fn remove_sig(sig: &[u8], script: &[u8]) -> Vec<u8> {
    if sig.is_empty() {
        return script.to_vec();
    }
    let mut pushed = crate::script::Script::new();
    if pushed.append_data(sig).is_err() {
        return script.to_vec();
    }
    let pushed = pushed.0;
    let mut result = Vec::with_capacity(script.len());
    let mut i = 0;
    while i < script.len() {
        let next = next_op(i, script).min(script.len());
        if script[i..next] != pushed[..] {
            result.extend_from_slice(&script[i..next]);
        }
        i = next;
    }
    result
}

#[inline]
fn check_stack_size(minsize: usize, stack: &[Vec<u8>]) -> Result<()> {
    if stack.len() < minsize {
        let msg = format!("Stack too small: {}", minsize);
        return Err(Error::ScriptError(msg));
    }
    Ok(())
}

#[inline]
fn pop(stack: &mut Vec<Vec<u8>>) -> Result<Vec<u8>> {
    stack.pop().ok_or_else(|| Error::ScriptError("Stack too small: 1".to_string()))
}

/// Pops the top two items, returned in push order.
#[inline]
fn pop_two(stack: &mut Vec<Vec<u8>>) -> Result<(Vec<u8>, Vec<u8>)> {
    check_stack_size(2, stack)?;
    let top = pop(stack)?;
    let second = pop(stack)?;
    Ok((second, top))
}

#[inline]
fn remains(i: usize, len: usize, script: &[u8]) -> Result<()> {
    if i + len > script.len() {
        Err(Error::ScriptError("Not enough data remaining".to_string()))
    } else {
        Ok(())
    }
}
