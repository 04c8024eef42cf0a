//! Pay-to-script-hash lock scripts: `OP_HASH160 <hash160(redeem)> OP_EQUAL`.
use crate::script::op_codes::{OP_EQUAL, OP_HASH160, OP_PUSH};
use crate::script::Script;
use crate::util::{Error, Hash160, Result};

/// Creates the P2SH lock script for a redeem script hash.
pub fn create_lock_script(script_hash: &Hash160) -> Result<Script> {
    let mut script = Script::new();
    script.append(OP_HASH160);
    script.append_data(&script_hash.0)?;
    script.append(OP_EQUAL);
    Ok(script)
}

/// Checks if script is a P2SH lock.
#[must_use]
#[inline]
pub fn check_lock_script(lock_script: &[u8]) -> bool {
    lock_script.len() == 23
        && lock_script[0] == OP_HASH160
        && lock_script[1] == OP_PUSH + 20
        && lock_script[22] == OP_EQUAL
}

/// Extracts the redeem script hash from a P2SH lock script.
pub fn extract_script_hash(lock_script: &[u8]) -> Result<Hash160> {
    if !check_lock_script(lock_script) {
        return Err(Error::BadData("Not P2SH lock".to_string()));
    }
    let mut hash160 = Hash160([0; 20]);
    hash160.0.copy_from_slice(&lock_script[2..22]);
    Ok(hash160)
}
