//! Named network parameter sets.
//!
//! Only the parts signing needs are modelled: the base58check version bytes
//! used to encode P2PKH and P2SH addresses.

use crate::util::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Network a key or address belongs to.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Network {
    /// Production network.
    Mainnet,
    /// Public test network.
    Testnet,
    /// Local regression test network.
    Regtest,
    /// Private simulation network. Default for signing.
    #[default]
    Simnet,
}

impl Network {
    /// Every supported network.
    pub const ALL: [Network; 4] = [Network::Mainnet, Network::Testnet, Network::Regtest, Network::Simnet];

    /// Version byte prefixed to P2PKH address payloads.
    #[must_use]
    #[inline]
    pub fn p2pkh_version(self) -> u8 {
        match self {
            Network::Mainnet => 0x00,
            Network::Testnet | Network::Regtest => 0x6f,
            Network::Simnet => 0x3f,
        }
    }

    /// Version byte prefixed to P2SH address payloads.
    #[must_use]
    #[inline]
    pub fn p2sh_version(self) -> u8 {
        match self {
            Network::Mainnet => 0x05,
            Network::Testnet | Network::Regtest => 0xc4,
            Network::Simnet => 0x7b,
        }
    }

    /// Canonical lowercase name, accepted back by `FromStr`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Regtest => "regtest",
            Network::Simnet => "simnet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Network {
    type Err = Error;

    fn from_str(s: &str) -> Result<Network> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" | "main" => Ok(Network::Mainnet),
            "testnet" | "testnet3" | "test" => Ok(Network::Testnet),
            "regtest" => Ok(Network::Regtest),
            "simnet" => Ok(Network::Simnet),
            _ => Err(Error::BadArgument(format!("Unknown network: {}", s))),
        }
    }
}
