//! Standard error and result types for the library.
use base58::FromBase58Error;
use hex::FromHexError;
use secp256k1::Error as Secp256k1Error;
use std::io;

/// Standard error type used in the library
#[derive(Debug)]
pub enum Error {
    /// An argument provided is invalid
    BadArgument(String),
    /// The data given is not valid
    BadData(String),
    /// Base58 string could not be decoded
    FromBase58Error(FromBase58Error),
    /// Hex string could not be decoded
    FromHexError(FromHexError),
    /// Standard library IO error
    IOError(io::Error),
    /// Error evaluating the script
    ScriptError(String),
    /// Error in the Secp256k1 library
    Secp256k1Error(Secp256k1Error),
    /// The data or functionality is not supported by this library
    Unsupported(String),
    /// The public key could not be turned into an address
    AddressDerivation(String),
    /// The locking script could not be built from an address
    ScriptDerivation(String),
    /// No private key is registered for the address
    KeyNotFound(String),
    /// No redeem script is registered for the address
    ScriptNotFound(String),
    /// Signing an input failed; inputs before it are already signed
    Signing {
        /// Index of the input that failed.
        input: usize,
        /// Underlying engine failure.
        cause: Box<Error>,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::BadArgument(s) => write!(f, "Bad argument: {}", s),
            Error::BadData(s) => write!(f, "Bad data: {}", s),
            Error::FromBase58Error(e) => write!(f, "Base58 decoding error: {:?}", e),
            Error::FromHexError(e) => write!(f, "Hex decoding error: {}", e),
            Error::IOError(e) => write!(f, "IO error: {}", e),
            Error::ScriptError(s) => write!(f, "Script error: {}", s),
            Error::Secp256k1Error(e) => write!(f, "Secp256k1 error: {}", e),
            Error::Unsupported(s) => write!(f, "Unsupported: {}", s),
            Error::AddressDerivation(s) => write!(f, "Failed to make address: {}", s),
            Error::ScriptDerivation(s) => write!(f, "Failed to make pkscript: {}", s),
            Error::KeyNotFound(addr) => write!(f, "No key for address {}", addr),
            Error::ScriptNotFound(addr) => write!(f, "No redeem script for address {}", addr),
            Error::Signing { input, cause } => {
                write!(f, "Failed to sign input {}: {}", input, cause)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::FromHexError(e) => Some(e),
            Error::IOError(e) => Some(e),
            Error::Secp256k1Error(e) => Some(e),
            Error::Signing { cause, .. } => Some(cause.as_ref()),
            _ => None,
        }
    }
}

impl From<FromBase58Error> for Error {
    fn from(e: FromBase58Error) -> Self {
        Error::FromBase58Error(e)
    }
}

impl From<FromHexError> for Error {
    fn from(e: FromHexError) -> Self {
        Error::FromHexError(e)
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::IOError(e)
    }
}

impl From<Secp256k1Error> for Error {
    fn from(e: Secp256k1Error) -> Self {
        Error::Secp256k1Error(e)
    }
}

/// Standard Result used in the library
pub type Result<T> = std::result::Result<T, Error>;
