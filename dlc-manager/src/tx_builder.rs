//! #DlcTxBuilder
//!
//! Derives the transactions of a contract from the negotiation messages
//! exchanged so far. Nothing is cached: every call recomputes the transactions
//! it needs, including the funding transaction, so results always reflect the
//! current messages and funding override.

use bitcoin::{Amount, ScriptBuf, Transaction, TxIn, TxOut};
use dlc::{DlcTransactions, FeeSplit, PartyParams, Payout};
use dlc_messages::contract_msgs::OutcomeId;
use dlc_messages::{AcceptDlc, CetSignatures, OfferDlc, SignDlc};
use log::{debug, trace};
use secp256k1_zkp::{All, PublicKey, Secp256k1};

use crate::error::Error;

/// View of one of the two parties of a contract: its funding public key and
/// the signatures it provided for the settlement transactions.
#[derive(Clone, Copy, Debug)]
pub struct Party<'a> {
    /// The funding public key of the party.
    pub fund_pubkey: &'a PublicKey,
    /// The CET and refund signatures of the party.
    pub cet_signatures: &'a CetSignatures,
}

/// The parts of the funding transaction that settlement transactions depend on.
pub(crate) struct FundingContext {
    pub(crate) fund_tx: Transaction,
    pub(crate) fund_tx_in: TxIn,
    pub(crate) fund_output_value: u64,
    pub(crate) funding_script_pubkey: ScriptBuf,
}

/// Builds and verifies the transactions of a contract between an initiator
/// (the offer party) and an acceptor.
///
/// The builder can be created before all messages have been received. Each
/// operation checks for the messages it needs and returns
/// [`Error::InvalidState`] if they are not available yet.
#[derive(Clone, Debug)]
pub struct DlcTxBuilder {
    is_initiator: bool,
    offer: Option<OfferDlc>,
    accept: Option<AcceptDlc>,
    sign: Option<SignDlc>,
    funding_tx_override: Option<Transaction>,
    pub(crate) secp: Secp256k1<All>,
}

impl DlcTxBuilder {
    /// Creates a new builder for the local party, which is the initiator of
    /// the contract if `is_initiator` is true and the acceptor otherwise.
    pub fn new(
        is_initiator: bool,
        offer: Option<OfferDlc>,
        accept: Option<AcceptDlc>,
        sign: Option<SignDlc>,
    ) -> Self {
        let builder = DlcTxBuilder {
            is_initiator,
            offer,
            accept,
            sign,
            funding_tx_override: None,
            secp: Secp256k1::new(),
        };
        debug!(
            "Created builder as {} (initiator resolved: {}, acceptor resolved: {})",
            if is_initiator { "initiator" } else { "acceptor" },
            builder.initiator().is_some(),
            builder.acceptor().is_some()
        );
        builder
    }

    /// Uses the given transaction as funding transaction instead of deriving
    /// it from the messages. The transaction is not validated, and its first
    /// output is assumed to be the fund output.
    pub fn with_funding_tx(mut self, funding_tx: Transaction) -> Self {
        self.funding_tx_override = Some(funding_tx);
        self
    }

    /// Sets or clears the funding transaction override.
    pub fn set_funding_tx(&mut self, funding_tx: Option<Transaction>) {
        self.funding_tx_override = funding_tx;
    }

    /// Whether the local party is the initiator of the contract.
    pub fn is_initiator(&self) -> bool {
        self.is_initiator
    }

    /// The initiator of the contract, available once both the offer and sign
    /// messages are known.
    pub fn initiator(&self) -> Option<Party<'_>> {
        match (&self.offer, &self.sign) {
            (Some(offer), Some(sign)) => Some(Party {
                fund_pubkey: &offer.funding_pubkey,
                cet_signatures: &sign.cet_signatures,
            }),
            _ => None,
        }
    }

    /// The acceptor of the contract, available once the accept message is
    /// known.
    pub fn acceptor(&self) -> Option<Party<'_>> {
        self.accept.as_ref().map(|accept| Party {
            fund_pubkey: &accept.funding_pubkey,
            cet_signatures: &accept.cet_signatures,
        })
    }

    /// The local party.
    pub fn me(&self) -> Option<Party<'_>> {
        if self.is_initiator {
            self.initiator()
        } else {
            self.acceptor()
        }
    }

    /// The counter party.
    pub fn remote(&self) -> Option<Party<'_>> {
        if self.is_initiator {
            self.acceptor()
        } else {
            self.initiator()
        }
    }

    pub(crate) fn get_offer(&self) -> Result<&OfferDlc, Error> {
        self.offer
            .as_ref()
            .ok_or_else(|| Error::InvalidState("Insufficient data: offer is missing".to_string()))
    }

    fn get_accept(&self) -> Result<&AcceptDlc, Error> {
        self.accept
            .as_ref()
            .ok_or_else(|| Error::InvalidState("Insufficient data: accept is missing".to_string()))
    }

    fn get_party_params(&self) -> Result<(PartyParams, PartyParams), Error> {
        Ok((
            self.get_offer()?.get_party_params(),
            self.get_accept()?.get_party_params(),
        ))
    }

    /// The 2-of-2 multisig script locking the fund output, with the initiator
    /// key first.
    pub fn get_funding_script_pubkey(&self) -> Result<ScriptBuf, Error> {
        Ok(dlc::make_funding_redeemscript(
            &self.get_offer()?.funding_pubkey,
            &self.get_accept()?.funding_pubkey,
        ))
    }

    /// The split of the fees between both parties at the offered fee rate.
    pub fn get_fee_split(&self) -> Result<FeeSplit, Error> {
        let (offer_params, accept_params) = self.get_party_params()?;
        Ok(dlc::compute_fee_split(
            &offer_params,
            &accept_params,
            self.get_offer()?.fee_rate_per_vb,
        )?)
    }

    /// Returns the funding transaction override if one is set, or derives the
    /// unsigned funding transaction from the offer and accept messages.
    pub fn build_funding(&self) -> Result<Transaction, Error> {
        if let Some(funding_tx) = &self.funding_tx_override {
            trace!("Using funding transaction override {}", funding_tx.txid());
            return Ok(funding_tx.clone());
        }

        let (offer_params, accept_params) = self.get_party_params()?;
        Ok(dlc::create_fund_transaction_from_params(
            &offer_params,
            &accept_params,
            self.get_offer()?.fee_rate_per_vb,
        )?)
    }

    pub(crate) fn get_funding_context(&self) -> Result<FundingContext, Error> {
        let funding_script_pubkey = self.get_funding_script_pubkey()?;
        let fund_tx = self.build_funding()?;
        let fund_output_value = fund_tx
            .output
            .first()
            .map(|x| x.value)
            .ok_or_else(|| {
                Error::InvalidParameters("Funding transaction has no output".to_string())
            })?;
        let fund_tx_in = dlc::get_fund_tx_in(&fund_tx);

        Ok(FundingContext {
            fund_tx,
            fund_tx_in,
            fund_output_value,
            funding_script_pubkey,
        })
    }

    fn get_total_collateral(&self) -> Result<Amount, Error> {
        self.get_offer()?
            .offer_collateral
            .checked_add(self.get_accept()?.accept_collateral)
            .ok_or_else(|| Error::OutOfRange("total collateral".to_string()))
    }

    /// Returns the payout of each party for the given outcome.
    pub fn get_payout(&self, outcome: &OutcomeId) -> Result<Payout, Error> {
        let offer_payout = self
            .get_offer()?
            .get_offer_payout(outcome)
            .ok_or(Error::InvalidOutcome(*outcome))?;
        self.payout_from_offer_payout(offer_payout)
    }

    /// Returns the payouts of every outcome of the contract, in the order of
    /// the contract outcomes.
    pub fn get_payouts(&self) -> Result<Vec<Payout>, Error> {
        self.get_offer()?
            .contract_outcomes
            .iter()
            .map(|x| self.payout_from_offer_payout(x.offer_payout))
            .collect()
    }

    fn payout_from_offer_payout(&self, offer_payout: Amount) -> Result<Payout, Error> {
        let accept_payout = self
            .get_total_collateral()?
            .checked_sub(offer_payout)
            .ok_or_else(|| Error::OutOfRange("accept payout".to_string()))?;
        Ok(Payout {
            offer: offer_payout.to_sat(),
            accept: accept_payout.to_sat(),
        })
    }

    /// Builds the unsigned refund transaction, returning each party's
    /// collateral after the contract timeout.
    pub fn build_refund(&self) -> Result<Transaction, Error> {
        let context = self.get_funding_context()?;
        self.build_refund_with_context(&context)
    }

    pub(crate) fn build_refund_with_context(
        &self,
        context: &FundingContext,
    ) -> Result<Transaction, Error> {
        let offer = self.get_offer()?;
        let accept = self.get_accept()?;

        let offer_refund_output = TxOut {
            value: offer.offer_collateral.to_sat(),
            script_pubkey: offer.payout_spk.clone(),
        };
        let accept_refund_output = TxOut {
            value: accept.accept_collateral.to_sat(),
            script_pubkey: accept.payout_spk.clone(),
        };

        let refund = dlc::create_refund_transaction(
            offer_refund_output,
            accept_refund_output,
            context.fund_tx_in.clone(),
            offer.contract_timeout,
        );
        trace!("Built refund transaction {}", refund.txid());
        Ok(refund)
    }

    /// Builds the unsigned CET for the given outcome. Outputs under the dust
    /// limit are not included.
    pub fn build_cet(&self, outcome: &OutcomeId) -> Result<Transaction, Error> {
        // Fail on unknown outcomes before deriving the funding transaction.
        let payout = self.get_payout(outcome)?;
        let context = self.get_funding_context()?;
        self.build_cet_from_payout(&context, outcome, &payout)
    }

    pub(crate) fn build_cet_with_context(
        &self,
        context: &FundingContext,
        outcome: &OutcomeId,
    ) -> Result<Transaction, Error> {
        let payout = self.get_payout(outcome)?;
        self.build_cet_from_payout(context, outcome, &payout)
    }

    fn build_cet_from_payout(
        &self,
        context: &FundingContext,
        outcome: &OutcomeId,
        payout: &Payout,
    ) -> Result<Transaction, Error> {
        let offer = self.get_offer()?;
        let accept = self.get_accept()?;

        let cet = dlc::create_cets(
            &context.fund_tx_in,
            &offer.payout_spk,
            &accept.payout_spk,
            std::slice::from_ref(payout),
            offer.contract_maturity_bound,
        )
        .pop()
        .ok_or_else(|| Error::InvalidState("No CET was created".to_string()))?;
        trace!("Built CET {} for outcome {}", cet.txid(), outcome);
        Ok(cet)
    }

    /// Builds the funding, refund and every CET of the contract from a single
    /// funding transaction derivation. CETs follow the order of the contract
    /// outcomes.
    pub fn build_dlc_transactions(&self) -> Result<DlcTransactions, Error> {
        let context = self.get_funding_context()?;
        let offer = self.get_offer()?;
        let accept = self.get_accept()?;

        let cets = dlc::create_cets(
            &context.fund_tx_in,
            &offer.payout_spk,
            &accept.payout_spk,
            &self.get_payouts()?,
            offer.contract_maturity_bound,
        );
        let refund = self.build_refund_with_context(&context)?;

        Ok(DlcTransactions {
            fund: context.fund_tx,
            cets,
            refund,
            funding_script_pubkey: context.funding_script_pubkey,
        })
    }
}
