//! Structures describing the terms of a contract: its possible outcomes and
//! the payout associated with each of them.

use bitcoin::hashes::{sha256, Hash};
use bitcoin::Amount;
use secp256k1_zkp::Message;
use std::fmt;

/// The identifier of an outcome: the digest of the outcome value that the
/// oracle signs when attesting to it.
#[cfg_attr(feature = "use-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OutcomeId(
    #[cfg_attr(
        feature = "use-serde",
        serde(
            serialize_with = "crate::serde_utils::serialize_hex",
            deserialize_with = "crate::serde_utils::deserialize_hex_array"
        )
    )]
    [u8; 32],
);

impl OutcomeId {
    /// Create an outcome id from the provided digest.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Create the outcome id of an enumerated outcome value by hashing it.
    pub fn from_outcome(outcome: &str) -> Self {
        Self(sha256::Hash::hash(outcome.as_bytes()).to_byte_array())
    }

    /// Get the 32-byte array representation of the outcome id.
    pub fn inner(&self) -> [u8; 32] {
        self.0
    }

    /// The message signed by the oracle when attesting to this outcome.
    pub fn to_message(&self) -> Result<Message, secp256k1_zkp::UpstreamError> {
        Message::from_slice(&self.0)
    }
}

impl fmt::Display for OutcomeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for b in self.0.iter() {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

/// Represents a single outcome of a DLC contract and the associated offer party
/// payout.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(
    feature = "use-serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct ContractOutcome {
    /// The outcome identifier.
    pub outcome: OutcomeId,
    /// The amount paid to the offer party if this outcome is attested.
    #[cfg_attr(feature = "use-serde", serde(with = "bitcoin::amount::serde::as_sat"))]
    pub offer_payout: Amount,
}
