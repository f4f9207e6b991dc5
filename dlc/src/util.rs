//! Utility functions not uniquely related to DLC

use bitcoin::hashes::Hash;
use bitcoin::sighash::{EcdsaSighashType, SighashCache};
use bitcoin::{Amount, Script, Sequence, Transaction, TxOut};
use secp256k1_zkp::Message;

use crate::Error;

// Setting the nSequence for every input of a transaction to this value disables
// RBF but enables nLockTime usage.
pub(crate) const ENABLE_LOCKTIME: Sequence = Sequence(0xfffffffe);

/// Get a BIP143 (https://github.com/bitcoin/bips/blob/master/bip-0143.mediawiki)
/// signature hash with sighash all flag for a segwit transaction input as
/// a Message instance.
///
/// This is the digest both parties sign for CETs and the refund transaction,
/// so a signer outside of this library can use it to produce signatures that
/// will verify against transactions built here.
pub fn get_sig_hash_msg(
    tx: &Transaction,
    input_index: usize,
    script_pubkey: &Script,
    value: u64,
) -> Result<Message, Error> {
    let sig_hash = SighashCache::new(tx).segwit_signature_hash(
        input_index,
        script_pubkey,
        value,
        EcdsaSighashType::All,
    )?;
    Ok(Message::from_slice(&sig_hash.to_byte_array())?)
}

/// Converts a virtual size into a fee at the given rate, failing if the result
/// does not fit in an amount.
pub(crate) fn vbytes_to_fee(vbytes: usize, fee_rate_per_vb: u64) -> Result<Amount, Error> {
    (vbytes as u64)
        .checked_mul(fee_rate_per_vb)
        .map(Amount::from_sat)
        .ok_or(Error::OutOfRange("fee"))
}

/// Sums the given amounts, failing on overflow.
pub(crate) fn checked_sum<I: IntoIterator<Item = Amount>>(amounts: I) -> Result<Amount, Error> {
    amounts
        .into_iter()
        .try_fold(Amount::ZERO, |acc, x| acc.checked_add(x))
        .ok_or(Error::OutOfRange("amount sum"))
}

/// Get the vout and TxOut of the first output with a matching `script_pubkey`
/// if any.
pub fn get_output_for_script_pubkey<'a>(
    tx: &'a Transaction,
    script_pubkey: &Script,
) -> Option<(usize, &'a TxOut)> {
    tx.output
        .iter()
        .enumerate()
        .find(|(_, x)| &x.script_pubkey == script_pubkey)
}

/// Filters the outputs that have a value lower than the given `dust_limit`.
pub(crate) fn discard_dust(txs: Vec<TxOut>, dust_limit: u64) -> Vec<TxOut> {
    txs.into_iter().filter(|x| x.value >= dust_limit).collect()
}
