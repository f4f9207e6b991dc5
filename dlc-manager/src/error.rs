//! #Error
use dlc_messages::contract_msgs::OutcomeId;

/// An error code.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An operation was invoked before the negotiation messages it requires
    /// were provided.
    #[error("Invalid state: {0}")]
    InvalidState(String),
    /// A CET was requested for an outcome that is not part of the contract.
    #[error("Outcome {0} is not part of the contract")]
    InvalidOutcome(OutcomeId),
    /// The signatures of a party lack an entry for an outcome of the contract.
    #[error("Missing adaptor signature for outcome {0}")]
    MissingSignature(OutcomeId),
    /// The oracle commitment cannot produce a signature point for an outcome.
    #[error("Invalid oracle information: {0}")]
    InvalidOracleInfo(#[source] dlc::Error),
    /// Some invalid parameters were provided.
    #[error("Invalid parameters were provided: {0}")]
    InvalidParameters(String),
    /// An amount computation overflowed or went negative.
    #[error("Out of range computing {0}")]
    OutOfRange(String),
    /// An error occurred in the DLC library.
    #[error("Dlc error {0}")]
    DlcError(#[source] dlc::Error),
    /// An error occurred in the Secp library.
    #[error("Secp error {0}")]
    SecpError(#[from] secp256k1_zkp::Error),
}

impl From<dlc::Error> for Error {
    fn from(e: dlc::Error) -> Error {
        match e {
            dlc::Error::OutOfRange(s) => Error::OutOfRange(s.to_string()),
            e => Error::DlcError(e),
        }
    }
}

impl From<secp256k1_zkp::UpstreamError> for Error {
    fn from(e: secp256k1_zkp::UpstreamError) -> Error {
        Error::SecpError(secp256k1_zkp::Error::Upstream(e))
    }
}
