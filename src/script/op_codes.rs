//! Script opcodes understood by the interpreter.
//!
//! Only the constants, stack, hashing and signature opcodes that standard
//! P2PKH and P2SH spends rely on are listed.

/// Pushes an empty array (0/false).
pub const OP_0: u8 = 0;
/// Alias of `OP_0`.
pub const OP_FALSE: u8 = 0;
/// Base for direct pushes: `OP_PUSH + n` pushes the next n bytes (n: 1-75).
pub const OP_PUSH: u8 = 0;
/// Next byte is push length (up to 255 bytes).
pub const OP_PUSHDATA1: u8 = 76;
/// Next two bytes are push length (up to 65535 bytes).
pub const OP_PUSHDATA2: u8 = 77;
/// Next four bytes are push length.
pub const OP_PUSHDATA4: u8 = 78;
/// Pushes -1.
pub const OP_1NEGATE: u8 = 79;
/// Pushes 1 (true).
pub const OP_1: u8 = 81;
/// Alias of `OP_1`.
pub const OP_TRUE: u8 = 81;
/// Pushes 16. `OP_2` to `OP_15` lie between `OP_1` and this.
pub const OP_16: u8 = 96;

/// Does nothing.
pub const OP_NOP: u8 = 97;
/// Fails unless the top item is true (pops it).
pub const OP_VERIFY: u8 = 105;
/// Marks the script as unspendable.
pub const OP_RETURN: u8 = 106;

/// Drops the top item.
pub const OP_DROP: u8 = 117;
/// Duplicates the top item.
pub const OP_DUP: u8 = 118;
/// Swaps the top two items.
pub const OP_SWAP: u8 = 124;
/// Pushes the byte length of the top item without popping it.
pub const OP_SIZE: u8 = 130;

/// Pushes 1 if the top two items are equal, 0 otherwise.
pub const OP_EQUAL: u8 = 135;
/// `OP_EQUAL` then `OP_VERIFY`.
pub const OP_EQUALVERIFY: u8 = 136;

/// Replaces the top item with its RIPEMD160.
pub const OP_RIPEMD160: u8 = 166;
/// Replaces the top item with its SHA256.
pub const OP_SHA256: u8 = 168;
/// Replaces the top item with RIPEMD160(SHA256(x)).
pub const OP_HASH160: u8 = 169;
/// Replaces the top item with SHA256(SHA256(x)).
pub const OP_HASH256: u8 = 170;
/// Signature checks only commit to the script after the latest separator.
pub const OP_CODESEPARATOR: u8 = 171;
/// Pops a public key and signature, pushes whether the signature is valid.
pub const OP_CHECKSIG: u8 = 172;
/// `OP_CHECKSIG` then `OP_VERIFY`.
pub const OP_CHECKSIGVERIFY: u8 = 173;
