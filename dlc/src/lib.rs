//! # Rust DLC Library
//! Library for creating and verifying transactions for the Discreet Log
//! Contract protocol between two parties.
//!

#![crate_name = "dlc"]
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
extern crate log;
extern crate secp256k1_zkp;
#[cfg(feature = "use-serde")]
extern crate serde;

use bitcoin::blockdata::{opcodes, script::Builder};
use bitcoin::{
    absolute::LockTime, Amount, OutPoint, Script, ScriptBuf, Transaction, TxIn, TxOut, Witness,
};
use log::{debug, trace};
use secp256k1_zkp::{
    ecdsa::Signature, schnorr::Signature as SchnorrSignature, EcdsaAdaptorSignature, Message,
    PublicKey, Secp256k1, SecretKey, Verification, XOnlyPublicKey,
};
#[cfg(feature = "use-serde")]
use serde::{Deserialize, Serialize};

pub mod secp_utils;
pub mod util;

/// Minimum value that can be included in a transaction output. Under this value,
/// outputs are discarded
/// See: https://github.com/discreetlogcontracts/dlcspecs/blob/master/Transactions.md#change-outputs
pub const DUST_LIMIT: u64 = 1000;

/// The transaction version
/// See: https://github.com/discreetlogcontracts/dlcspecs/blob/master/Transactions.md#funding-transaction
pub const TX_VERSION: i32 = 2;

/// The base weight of a fund transaction, including the funding output.
/// See: https://github.com/discreetlogcontracts/dlcspecs/blob/master/Transactions.md#fees
pub const FUND_TX_BASE_WEIGHT: usize = 214;

/// The weight of a CET excluding payout outputs
/// See: https://github.com/discreetlogcontracts/dlcspecs/blob/master/Transactions.md#fees
pub const CET_BASE_WEIGHT: usize = 500;

/// The base weight of a transaction input computed as:
/// (outpoint(36) + sequence(4) + scriptPubKeySize(1)) * 4
/// See: https://github.com/discreetlogcontracts/dlcspecs/blob/master/Transactions.md#fees
pub const TX_INPUT_BASE_WEIGHT: usize = 164;

/// The witness size of a P2WPKH input
/// See: https://github.com/discreetlogcontracts/dlcspecs/blob/master/Transactions.md#fees
pub const P2WPKH_WITNESS_SIZE: usize = 107;

/// Size of an output excluding its script pubkey: value(8) + script length var_int(1).
const TX_OUTPUT_BASE_SIZE: usize = 9;

/// Represents the payouts for a unique contract outcome. Offer party represents
/// the initiator of the contract while accept party represents the party
/// accepting the contract.
#[derive(PartialEq, Eq, Debug, Clone)]
#[cfg_attr(feature = "use-serde", derive(Serialize, Deserialize))]
pub struct Payout {
    /// Payout for the offering party
    pub offer: u64,
    /// Payout for the accepting party
    pub accept: u64,
}

/// Contains the necessary transactions for establishing a DLC
#[derive(Clone, Debug)]
pub struct DlcTransactions {
    /// The fund transaction locking both parties collaterals
    pub fund: Transaction,
    /// The contract execution transactions for closing the contract on a
    /// certain outcome
    pub cets: Vec<Transaction>,
    /// The refund transaction for returning the collateral for each party in
    /// case of an oracle misbehavior
    pub refund: Transaction,

    /// The script pubkey of the fund output in the fund transaction
    pub funding_script_pubkey: ScriptBuf,
}

impl DlcTransactions {
    /// Get the fund output in the fund transaction
    pub fn get_fund_output(&self) -> Option<&TxOut> {
        let v0_witness_fund_script = self.funding_script_pubkey.to_v0_p2wsh();
        util::get_output_for_script_pubkey(&self.fund, &v0_witness_fund_script).map(|x| x.1)
    }
}

/// Contains info about a utxo used for funding a DLC contract
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "use-serde", derive(Serialize, Deserialize))]
pub struct TxInputInfo {
    /// The outpoint for the utxo
    pub outpoint: OutPoint,
    /// The value of the output referenced by the outpoint
    #[cfg_attr(feature = "use-serde", serde(with = "bitcoin::amount::serde::as_sat"))]
    pub value: Amount,
}

/// Structure containing the oracle commitment for a single event.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "use-serde", derive(Serialize, Deserialize))]
pub struct OracleInfo {
    /// The public key of the oracle.
    pub public_key: XOnlyPublicKey,
    /// The nonce that the oracle will use to attest to the event.
    pub nonce: XOnlyPublicKey,
}

/// An error code.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Secp256k1 error
    #[error("Secp256k1 error {0}")]
    Secp256k1(#[from] secp256k1_zkp::Error),
    /// Error while computing a signature hash
    #[error("Sighash error {0}")]
    Sighash(#[from] bitcoin::sighash::Error),
    /// An invalid argument was provided
    #[error("Invalid argument")]
    InvalidArgument,
    /// An amount computation overflowed or went negative
    #[error("Out of range computing {0}")]
    OutOfRange(&'static str),
}

impl From<secp256k1_zkp::UpstreamError> for Error {
    fn from(error: secp256k1_zkp::UpstreamError) -> Error {
        Error::Secp256k1(secp256k1_zkp::Error::Upstream(error))
    }
}

/// Contains the parameters required for creating DLC transactions for a single
/// party. Specifically these are the common fields between Offer and Accept
/// messages.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "use-serde", derive(Serialize, Deserialize))]
pub struct PartyParams {
    /// The public key for the fund multisig script
    pub fund_pubkey: PublicKey,
    /// An address to receive change
    pub change_script_pubkey: ScriptBuf,
    /// An address to receive the outcome amount
    pub payout_script_pubkey: ScriptBuf,
    /// A list of inputs to fund the contract
    pub inputs: Vec<TxInputInfo>,
    /// The collateral put in the contract by the party
    #[cfg_attr(feature = "use-serde", serde(with = "bitcoin::amount::serde::as_sat"))]
    pub collateral: Amount,
}

impl PartyParams {
    /// The sum of the values of the party's funding inputs.
    pub fn input_amount(&self) -> Result<Amount, Error> {
        util::checked_sum(self.inputs.iter().map(|x| x.value))
    }

    /// Weight contributed by this party to the fund transaction: its inputs
    /// (assumed P2WPKH) and its change output.
    pub fn fund_weight(&self) -> usize {
        let inputs_weight = self.inputs.len() * (TX_INPUT_BASE_WEIGHT + P2WPKH_WITNESS_SIZE);
        // Change size is scaled by 4 from vBytes to weight units
        let change_weight = (TX_OUTPUT_BASE_SIZE + self.change_script_pubkey.len()) * 4;
        inputs_weight + change_weight
    }

    /// Weight contributed by this party's payout output to a CET or refund
    /// transaction.
    pub fn payout_weight(&self) -> usize {
        (TX_OUTPUT_BASE_SIZE + self.payout_script_pubkey.len()) * 4
    }

    /// Returns the change output for this party given the fee it owes for the
    /// fund and settlement transactions. Fails if the inputs do not cover the
    /// collateral plus the fee.
    pub fn get_change_output(&self, fee: Amount) -> Result<TxOut, Error> {
        let value = self
            .input_amount()?
            .checked_sub(self.collateral)
            .and_then(|x| x.checked_sub(fee))
            .ok_or(Error::OutOfRange("change output"))?;

        Ok(TxOut {
            value: value.to_sat(),
            script_pubkey: self.change_script_pubkey.clone(),
        })
    }

    fn get_unsigned_tx_inputs(&self) -> Vec<TxIn> {
        self.inputs
            .iter()
            .map(|input| TxIn {
                previous_output: input.outpoint,
                script_sig: ScriptBuf::new(),
                sequence: util::ENABLE_LOCKTIME,
                witness: Witness::new(),
            })
            .collect()
    }
}

/// Split of the fees of a contract between both parties, derived from a single
/// fee rate so that both sides compute identical values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeeSplit {
    /// Estimated weight of the fund transaction.
    pub fund_weight: usize,
    /// Estimated weight of the settlement (CET or refund) transaction.
    pub settlement_weight: usize,
    /// Virtual bytes paid for by each party. Computed as the combined weight
    /// divided by 8, discarding the remainder.
    pub per_party_vbytes: usize,
    /// Fee deducted from each party's change.
    pub per_party_fee: Amount,
    /// Fee reserved in the fund output for the settlement transaction.
    pub settlement_fee: Amount,
}

impl FeeSplit {
    /// The fee actually paid by the fund transaction, i.e. what both parties
    /// contribute minus what is reserved in the fund output.
    pub fn fund_fee(&self) -> Result<Amount, Error> {
        self.per_party_fee
            .checked_mul(2)
            .and_then(|x| x.checked_sub(self.settlement_fee))
            .ok_or(Error::OutOfRange("fund fee"))
    }
}

/// Computes the fee split of a contract between the offering and accepting
/// parties.
///
/// The integer division used for the per party share rounds down and the
/// remainder is not compensated anywhere. Both parties rely on reproducing this
/// exact arithmetic to build identical transactions.
pub fn compute_fee_split(
    offer_params: &PartyParams,
    accept_params: &PartyParams,
    fee_rate_per_vb: u64,
) -> Result<FeeSplit, Error> {
    let fund_weight =
        FUND_TX_BASE_WEIGHT + offer_params.fund_weight() + accept_params.fund_weight();
    let settlement_weight =
        CET_BASE_WEIGHT + offer_params.payout_weight() + accept_params.payout_weight();
    let per_party_vbytes = (fund_weight + settlement_weight) / 8;

    let fee_split = FeeSplit {
        fund_weight,
        settlement_weight,
        per_party_vbytes,
        per_party_fee: util::vbytes_to_fee(per_party_vbytes, fee_rate_per_vb)?,
        settlement_fee: util::vbytes_to_fee(settlement_weight / 4, fee_rate_per_vb)?,
    };
    debug!("Computed fee split {:?}", fee_split);
    Ok(fee_split)
}

/// Create the fund transaction from both parties' parameters, the fund output
/// paying the sum of the collaterals plus the settlement fee to the 2-of-2
/// funding script.
pub fn create_fund_transaction_from_params(
    offer_params: &PartyParams,
    accept_params: &PartyParams,
    fee_rate_per_vb: u64,
) -> Result<Transaction, Error> {
    let fee_split = compute_fee_split(offer_params, accept_params, fee_rate_per_vb)?;

    let fund_output_value = offer_params
        .collateral
        .checked_add(accept_params.collateral)
        .and_then(|x| x.checked_add(fee_split.settlement_fee))
        .ok_or(Error::OutOfRange("fund output"))?;

    let offer_change_output = offer_params.get_change_output(fee_split.per_party_fee)?;
    let accept_change_output = accept_params.get_change_output(fee_split.per_party_fee)?;

    let funding_script_pubkey =
        make_funding_redeemscript(&offer_params.fund_pubkey, &accept_params.fund_pubkey);

    Ok(create_funding_transaction(
        &funding_script_pubkey,
        fund_output_value.to_sat(),
        &offer_params.get_unsigned_tx_inputs(),
        &accept_params.get_unsigned_tx_inputs(),
        offer_change_output,
        accept_change_output,
    ))
}

/// Create a funding transaction. The fund output is always the first output,
/// followed by the offer and accept change outputs, the latter being removed
/// if under the dust limit.
pub fn create_funding_transaction(
    funding_script_pubkey: &Script,
    output_amount: u64,
    offer_inputs: &[TxIn],
    accept_inputs: &[TxIn],
    offer_change_output: TxOut,
    accept_change_output: TxOut,
) -> Transaction {
    let fund_tx_out = TxOut {
        value: output_amount,
        script_pubkey: funding_script_pubkey.to_v0_p2wsh(),
    };

    let mut output = vec![fund_tx_out];
    output.extend(util::discard_dust(
        vec![offer_change_output, accept_change_output],
        DUST_LIMIT,
    ));

    let input = [offer_inputs, accept_inputs].concat();

    let funding_transaction = Transaction {
        version: TX_VERSION,
        lock_time: LockTime::ZERO,
        input,
        output,
    };
    trace!("Created funding transaction {}", funding_transaction.txid());
    funding_transaction
}

/// Returns the unsigned input spending the fund output (always at index 0) of
/// the given fund transaction.
pub fn get_fund_tx_in(fund_tx: &Transaction) -> TxIn {
    TxIn {
        previous_output: OutPoint {
            txid: fund_tx.txid(),
            vout: 0,
        },
        script_sig: ScriptBuf::new(),
        sequence: util::ENABLE_LOCKTIME,
        witness: Witness::new(),
    }
}

/// Create a contract execution transaction. Outputs under the dust limit are
/// removed.
pub fn create_cet(
    offer_output: TxOut,
    accept_output: TxOut,
    fund_tx_in: &TxIn,
    lock_time: u32,
) -> Transaction {
    let output = util::discard_dust(vec![offer_output, accept_output], DUST_LIMIT);

    Transaction {
        version: TX_VERSION,
        lock_time: LockTime::from_consensus(lock_time),
        input: vec![fund_tx_in.clone()],
        output,
    }
}

/// Create a set of contract execution transaction for each provided outcome
pub fn create_cets(
    fund_tx_input: &TxIn,
    offer_payout_script_pubkey: &Script,
    accept_payout_script_pubkey: &Script,
    payouts: &[Payout],
    lock_time: u32,
) -> Vec<Transaction> {
    payouts
        .iter()
        .map(|payout| {
            let offer_output = TxOut {
                value: payout.offer,
                script_pubkey: offer_payout_script_pubkey.to_owned(),
            };
            let accept_output = TxOut {
                value: payout.accept,
                script_pubkey: accept_payout_script_pubkey.to_owned(),
            };
            create_cet(offer_output, accept_output, fund_tx_input, lock_time)
        })
        .collect()
}

/// Create a refund transaction
pub fn create_refund_transaction(
    offer_output: TxOut,
    accept_output: TxOut,
    funding_input: TxIn,
    locktime: u32,
) -> Transaction {
    Transaction {
        version: TX_VERSION,
        lock_time: LockTime::from_consensus(locktime),
        input: vec![funding_input],
        output: vec![offer_output, accept_output],
    }
}

/// Create the multisig redeem script for the funding output. The keys are
/// placed in the order they are given, offer party first, so that both parties
/// derive the same script independently of their role.
pub fn make_funding_redeemscript(offer: &PublicKey, accept: &PublicKey) -> ScriptBuf {
    Builder::new()
        .push_opcode(opcodes::all::OP_PUSHNUM_2)
        .push_key(&bitcoin::PublicKey::new(*offer))
        .push_key(&bitcoin::PublicKey::new(*accept))
        .push_opcode(opcodes::all::OP_PUSHNUM_2)
        .push_opcode(opcodes::all::OP_CHECKMULTISIG)
        .into_script()
}

/// Get the adaptor point for the given outcome message: the point the oracle's
/// attestation signature scalar will be the discrete log of.
pub fn get_adaptor_point_from_oracle_info<C: Verification>(
    secp: &Secp256k1<C>,
    oracle_info: &OracleInfo,
    msg: &Message,
) -> Result<PublicKey, Error> {
    secp_utils::schnorrsig_compute_sig_point(secp, &oracle_info.public_key, &oracle_info.nonce, msg)
}

/// Extract the adaptor secret from an oracle attestation, checking that the
/// attestation is a valid signature of `msg` made with the committed nonce.
pub fn get_adaptor_secret_from_attestation<C: Verification>(
    secp: &Secp256k1<C>,
    oracle_info: &OracleInfo,
    msg: &Message,
    attestation: &SchnorrSignature,
) -> Result<SecretKey, Error> {
    let (nonce, s_value) = secp_utils::schnorrsig_decompose(attestation)?;
    if nonce != oracle_info.nonce {
        return Err(Error::InvalidArgument);
    }
    secp.verify_schnorr(attestation, msg, &oracle_info.public_key)?;
    Ok(SecretKey::from_slice(s_value)?)
}

/// Verify that a given adaptor signature for a given cet is valid with respect
/// to an adaptor point.
pub fn verify_cet_adaptor_sig_from_point<C: Verification>(
    secp: &Secp256k1<C>,
    adaptor_sig: &EcdsaAdaptorSignature,
    cet: &Transaction,
    adaptor_point: &PublicKey,
    pubkey: &PublicKey,
    funding_script_pubkey: &Script,
    fund_output_value: u64,
) -> Result<(), Error> {
    let sig_hash = util::get_sig_hash_msg(cet, 0, funding_script_pubkey, fund_output_value)?;
    adaptor_sig.verify(secp, &sig_hash, pubkey, adaptor_point)?;
    Ok(())
}

/// Verify a signature for a given transaction input.
pub fn verify_tx_input_sig<V: Verification>(
    secp: &Secp256k1<V>,
    signature: &Signature,
    tx: &Transaction,
    input_index: usize,
    script_pubkey: &Script,
    value: u64,
    pk: &PublicKey,
) -> Result<(), Error> {
    let sig_hash_msg = util::get_sig_hash_msg(tx, input_index, script_pubkey, value)?;
    secp.verify_ecdsa(&sig_hash_msg, signature, pk)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitcoin::hashes::{sha256, Hash};
    use bitcoin::{Address, Network, Txid};
    use secp256k1_zkp::{rand::thread_rng, KeyPair};
    use std::str::FromStr;

    fn get_p2wpkh_script_pubkey(secp: &Secp256k1<secp256k1_zkp::All>) -> ScriptBuf {
        let sk = SecretKey::new(&mut thread_rng());
        let pk = bitcoin::PublicKey::new(PublicKey::from_secret_key(secp, &sk));
        Address::p2wpkh(&pk, Network::Regtest)
            .unwrap()
            .script_pubkey()
    }

    fn get_party_params(input_amounts: &[u64], collateral: u64) -> (PartyParams, SecretKey) {
        let secp = Secp256k1::new();
        let fund_privkey = SecretKey::new(&mut thread_rng());
        let inputs = input_amounts
            .iter()
            .enumerate()
            .map(|(i, value)| TxInputInfo {
                outpoint: OutPoint {
                    txid: Txid::from_str(
                        "5df6e0e2761359d30a8275058e299fcc0381534545f55cf43e41983f5d4c9456",
                    )
                    .unwrap(),
                    vout: i as u32,
                },
                value: Amount::from_sat(*value),
            })
            .collect();
        (
            PartyParams {
                fund_pubkey: PublicKey::from_secret_key(&secp, &fund_privkey),
                change_script_pubkey: get_p2wpkh_script_pubkey(&secp),
                payout_script_pubkey: get_p2wpkh_script_pubkey(&secp),
                inputs,
                collateral: Amount::from_sat(collateral),
            },
            fund_privkey,
        )
    }

    fn create_test_tx_io() -> (TxOut, TxOut, TxIn) {
        let offer = TxOut {
            value: 1,
            script_pubkey: ScriptBuf::new(),
        };

        let accept = TxOut {
            value: 2,
            script_pubkey: ScriptBuf::new(),
        };

        let funding = TxIn {
            previous_output: OutPoint::default(),
            script_sig: ScriptBuf::new(),
            sequence: util::ENABLE_LOCKTIME,
            witness: Witness::new(),
        };

        (offer, accept, funding)
    }

    #[test]
    fn create_refund_transaction_test() {
        let (offer, accept, funding) = create_test_tx_io();

        let refund_transaction = create_refund_transaction(offer, accept, funding, 100);
        assert_eq!(2, refund_transaction.version);
        assert_eq!(100, refund_transaction.lock_time.to_consensus_u32());
        assert_eq!(1, refund_transaction.output[0].value);
        assert_eq!(2, refund_transaction.output[1].value);
        assert_eq!(0xfffffffe, refund_transaction.input[0].sequence.0);
    }

    #[test]
    fn funding_redeemscript_keeps_offer_key_first() {
        let secp = Secp256k1::new();
        let sk1 = SecretKey::from_slice(&[1u8; 32]).unwrap();
        let sk2 = SecretKey::from_slice(&[2u8; 32]).unwrap();
        let pk1 = PublicKey::from_secret_key(&secp, &sk1);
        let pk2 = PublicKey::from_secret_key(&secp, &sk2);

        let script = make_funding_redeemscript(&pk1, &pk2);
        let reversed = make_funding_redeemscript(&pk2, &pk1);

        assert_ne!(script, reversed);
        let bytes = script.as_bytes();
        // OP_2 <33 bytes> <33 bytes> OP_2 OP_CHECKMULTISIG
        assert_eq!(71, bytes.len());
        assert_eq!(&pk1.serialize()[..], &bytes[2..35]);
        assert_eq!(&pk2.serialize()[..], &bytes[36..69]);
    }

    #[test]
    fn create_funding_transaction_with_outputs_less_than_dust_limit_test() {
        let (offer, accept, funding) = create_test_tx_io();
        let secp = Secp256k1::new();
        let pk = PublicKey::from_secret_key(&secp, &SecretKey::from_slice(&[3u8; 32]).unwrap());
        let funding_script_pubkey = make_funding_redeemscript(&pk, &pk);

        let transaction = create_funding_transaction(
            &funding_script_pubkey,
            31415,
            &[funding.clone()],
            &[funding],
            offer,
            accept,
        );

        assert_eq!(transaction.output[0].value, 31415);
        assert_eq!(transaction.output.len(), 1);
        assert_eq!(transaction.input.len(), 2);
    }

    #[test]
    fn fee_split_discards_remainder() {
        let (offer_params, _) = get_party_params(&[1_000_000], 100_000);
        let (accept_params, _) = get_party_params(&[1_000_000], 100_000);

        let fee_split = compute_fee_split(&offer_params, &accept_params, 3).unwrap();

        // p2wpkh change and payout scripts are 22 bytes long.
        assert_eq!(214 + 2 * (271 + 124), fee_split.fund_weight);
        assert_eq!(500 + 2 * 124, fee_split.settlement_weight);
        assert_eq!((1004 + 748) / 8, fee_split.per_party_vbytes);
        assert_eq!(Amount::from_sat(219 * 3), fee_split.per_party_fee);
        assert_eq!(Amount::from_sat(187 * 3), fee_split.settlement_fee);
    }

    #[test]
    fn get_change_output_not_enough_funds() {
        // Arrange
        let (party_params, _) = get_party_params(&[100000], 100000);

        // Act
        let res = party_params.get_change_output(Amount::from_sat(1));

        // Assert
        assert!(matches!(res, Err(Error::OutOfRange(_))));
    }

    #[test]
    fn create_fund_transaction_from_params_balances() {
        let _ = env_logger::try_init();
        // Arrange
        let (offer_params, _) = get_party_params(&[700_000, 800_000], 1_000_000);
        let (accept_params, _) = get_party_params(&[600_000], 500_000);

        // Act
        let fund_tx =
            create_fund_transaction_from_params(&offer_params, &accept_params, 2).unwrap();
        let fee_split = compute_fee_split(&offer_params, &accept_params, 2).unwrap();

        // Assert
        let total_out: u64 = fund_tx.output.iter().map(|x| x.value).sum();
        assert_eq!(3, fund_tx.output.len());
        assert_eq!(3, fund_tx.input.len());
        assert_eq!(
            2_100_000 - total_out,
            fee_split.fund_fee().unwrap().to_sat()
        );
        assert_eq!(
            1_500_000 + fee_split.settlement_fee.to_sat(),
            fund_tx.output[0].value
        );
    }

    #[test]
    fn cet_adaptor_sig_is_valid_and_decrypts() {
        // Arrange
        let secp = Secp256k1::new();
        let mut rng = thread_rng();
        let (offer_params, offer_fund_sk) = get_party_params(&[1_000_000_000], 100_000_000);
        let (accept_params, _) = get_party_params(&[1_000_000_000], 100_000_000);
        let fund_tx =
            create_fund_transaction_from_params(&offer_params, &accept_params, 4).unwrap();
        let fund_output_value = fund_tx.output[0].value;
        let funding_script_pubkey =
            make_funding_redeemscript(&offer_params.fund_pubkey, &accept_params.fund_pubkey);
        let cets = create_cets(
            &get_fund_tx_in(&fund_tx),
            &offer_params.payout_script_pubkey,
            &accept_params.payout_script_pubkey,
            &[
                Payout {
                    offer: 200_000_000,
                    accept: 0,
                },
                Payout {
                    offer: 0,
                    accept: 200_000_000,
                },
            ],
            10,
        );
        assert!(cets.iter().all(|x| x.output.len() == 1));

        let oracle_kp = KeyPair::new(&secp, &mut rng);
        let nonce_sk = SecretKey::new(&mut rng);
        let oracle_info = OracleInfo {
            public_key: oracle_kp.x_only_public_key().0,
            nonce: KeyPair::from_secret_key(&secp, &nonce_sk)
                .x_only_public_key()
                .0,
        };
        let msg = Message::from_slice(sha256::Hash::hash(b"WIN").as_byte_array()).unwrap();
        let adaptor_point = get_adaptor_point_from_oracle_info(&secp, &oracle_info, &msg).unwrap();
        let sig_hash =
            util::get_sig_hash_msg(&cets[0], 0, &funding_script_pubkey, fund_output_value).unwrap();

        // Act
        let adaptor_sig =
            EcdsaAdaptorSignature::encrypt(&secp, &sig_hash, &offer_fund_sk, &adaptor_point);

        // Assert
        verify_cet_adaptor_sig_from_point(
            &secp,
            &adaptor_sig,
            &cets[0],
            &adaptor_point,
            &offer_params.fund_pubkey,
            &funding_script_pubkey,
            fund_output_value,
        )
        .expect("valid adaptor signature");
        assert!(verify_cet_adaptor_sig_from_point(
            &secp,
            &adaptor_sig,
            &cets[1],
            &adaptor_point,
            &offer_params.fund_pubkey,
            &funding_script_pubkey,
            fund_output_value,
        )
        .is_err());

        let attestation =
            secp_utils::schnorrsig_sign_with_nonce(&secp, &msg, &oracle_kp, &nonce_sk).unwrap();
        let secret =
            get_adaptor_secret_from_attestation(&secp, &oracle_info, &msg, &attestation).unwrap();
        let adapted_sig = adaptor_sig.decrypt(&secret).unwrap();
        verify_tx_input_sig(
            &secp,
            &adapted_sig,
            &cets[0],
            0,
            &funding_script_pubkey,
            fund_output_value,
            &offer_params.fund_pubkey,
        )
        .expect("Invalid decrypted adaptor signature");
    }
}
