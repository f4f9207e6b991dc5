//! Data structures exchanged between the two parties of a DLC.
//!
//! The messages are handed to the transaction builder already validated and
//! decoded; encoding them for transport is left to the caller.

// Coding conventions
#![forbid(unsafe_code)]
#![deny(non_upper_case_globals)]
#![deny(non_camel_case_types)]
#![deny(non_snake_case)]
#![deny(unused_mut)]
#![deny(dead_code)]
#![deny(unused_imports)]
#![deny(missing_docs)]

extern crate bitcoin;
extern crate dlc;
extern crate secp256k1_zkp;
#[cfg(feature = "use-serde")]
extern crate serde;

pub mod contract_msgs;

#[cfg(feature = "use-serde")]
pub mod serde_utils;

use bitcoin::sighash::EcdsaSighashType;
use bitcoin::{ecdsa, Amount, OutPoint, ScriptBuf};
use contract_msgs::{ContractOutcome, OutcomeId};
use dlc::{OracleInfo, PartyParams, TxInputInfo};
use secp256k1_zkp::{EcdsaAdaptorSignature, PublicKey};
use std::collections::HashMap;

/// Contains information about a specific input to be used in a funding
/// transaction: the referenced on-chain output and its value.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "use-serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct FundingInput {
    /// The output being spent.
    pub outpoint: OutPoint,
    /// The value of the output being spent.
    #[cfg_attr(feature = "use-serde", serde(with = "bitcoin::amount::serde::as_sat"))]
    pub prev_tx_out_value: Amount,
}

impl From<&FundingInput> for TxInputInfo {
    fn from(funding_input: &FundingInput) -> TxInputInfo {
        TxInputInfo {
            outpoint: funding_input.outpoint,
            value: funding_input.prev_tx_out_value,
        }
    }
}

/// A plain signature over a transaction input, along with the public key it
/// claims to be made with.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "use-serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct PartialSig {
    /// The public key of the signer.
    pub pubkey: PublicKey,
    /// The signature.
    pub signature: secp256k1_zkp::ecdsa::Signature,
    /// The sighash type the signature commits to.
    pub sighash_type: EcdsaSighashType,
}

impl PartialSig {
    /// Returns the signature along with its sighash type, as placed on a
    /// witness stack.
    pub fn to_bitcoin_signature(&self) -> ecdsa::Signature {
        ecdsa::Signature {
            sig: self.signature,
            hash_ty: self.sighash_type,
        }
    }
}

/// The signatures provided by a party for the settlement transactions of a
/// contract: one adaptor signature per outcome, and one signature for the
/// refund transaction.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "use-serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct CetSignatures {
    /// Adaptor signatures (including their DLEQ proof) for each outcome CET.
    pub outcome_sigs: HashMap<OutcomeId, EcdsaAdaptorSignature>,
    /// Signature for the refund transaction.
    pub refund_sig: PartialSig,
}

impl CetSignatures {
    /// Returns the adaptor signature for the given outcome, if any.
    pub fn get_outcome_sig(&self, outcome: &OutcomeId) -> Option<&EcdsaAdaptorSignature> {
        self.outcome_sigs.get(outcome)
    }
}

/// Contains information about a party wishing to enter into a DLC with
/// another party. The contained information is sufficient for any other party
/// to create a set of transactions representing the contract and its terms.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "use-serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct OfferDlc {
    /// The public key of the offer party for the funding multisig script.
    pub funding_pubkey: PublicKey,
    /// The script pubkey receiving the offer party's payouts.
    pub payout_spk: ScriptBuf,
    /// The collateral locked by the offer party.
    #[cfg_attr(feature = "use-serde", serde(with = "bitcoin::amount::serde::as_sat"))]
    pub offer_collateral: Amount,
    /// The fee rate used by both parties, in sats per virtual byte.
    pub fee_rate_per_vb: u64,
    /// The lock time of the CETs.
    pub contract_maturity_bound: u32,
    /// The lock time of the refund transaction.
    pub contract_timeout: u32,
    /// The payout table of the contract, ordered.
    pub contract_outcomes: Vec<ContractOutcome>,
    /// The oracle commitment the outcomes are attested with.
    pub oracle_info: OracleInfo,
    /// The inputs funding the offer party's collateral.
    pub funding_inputs: Vec<FundingInput>,
    /// The script pubkey receiving the offer party's change.
    pub change_spk: ScriptBuf,
}

impl OfferDlc {
    /// Returns the offer party payout for the given outcome, if it is part of
    /// the contract.
    pub fn get_offer_payout(&self, outcome: &OutcomeId) -> Option<Amount> {
        self.contract_outcomes
            .iter()
            .find(|x| &x.outcome == outcome)
            .map(|x| x.offer_payout)
    }

    /// Returns the parameters of the offer party for building transactions.
    pub fn get_party_params(&self) -> PartyParams {
        PartyParams {
            fund_pubkey: self.funding_pubkey,
            change_script_pubkey: self.change_spk.clone(),
            payout_script_pubkey: self.payout_spk.clone(),
            inputs: self.funding_inputs.iter().map(|x| x.into()).collect(),
            collateral: self.offer_collateral,
        }
    }
}

/// Contains information about a party wishing to accept a DLC offer. The contained
/// information is sufficient for the offering party to re-build the set of
/// transactions representing the contract and its terms, and guarantees the offering
/// party that they can safely provide signatures for their funding input.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "use-serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct AcceptDlc {
    /// The public key of the accept party for the funding multisig script.
    pub funding_pubkey: PublicKey,
    /// The script pubkey receiving the accept party's payouts.
    pub payout_spk: ScriptBuf,
    /// The collateral locked by the accept party.
    #[cfg_attr(feature = "use-serde", serde(with = "bitcoin::amount::serde::as_sat"))]
    pub accept_collateral: Amount,
    /// The inputs funding the accept party's collateral.
    pub funding_inputs: Vec<FundingInput>,
    /// The script pubkey receiving the accept party's change.
    pub change_spk: ScriptBuf,
    /// The accept party's signatures for the CETs and refund transaction.
    pub cet_signatures: CetSignatures,
}

impl AcceptDlc {
    /// Returns the parameters of the accept party for building transactions.
    pub fn get_party_params(&self) -> PartyParams {
        PartyParams {
            fund_pubkey: self.funding_pubkey,
            change_script_pubkey: self.change_spk.clone(),
            payout_script_pubkey: self.payout_spk.clone(),
            inputs: self.funding_inputs.iter().map(|x| x.into()).collect(),
            collateral: self.accept_collateral,
        }
    }
}

/// Contains all the required signatures for the DLC transactions from the offering
/// party.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "use-serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct SignDlc {
    /// The offer party's signatures for the CETs and refund transaction.
    pub cet_signatures: CetSignatures,
}
