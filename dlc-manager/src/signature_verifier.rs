//! Verification of the signatures provided by the counter party, and
//! completion of its adaptor signatures once an oracle attestation is known.

use bitcoin::sighash::EcdsaSighashType;
use dlc_messages::contract_msgs::OutcomeId;
use log::{debug, warn};
use secp256k1_zkp::{ecdsa::Signature, schnorr::Signature as SchnorrSignature};

use crate::error::Error;
use crate::tx_builder::{DlcTxBuilder, FundingContext, Party};

impl DlcTxBuilder {
    fn get_remote(&self) -> Result<Party<'_>, Error> {
        self.remote().ok_or_else(|| {
            Error::InvalidState("Insufficient data: remote party is not known".to_string())
        })
    }

    /// Checks the remote adaptor signature of a single outcome. Returns
    /// `Ok(false)` if the signature does not verify.
    fn verify_outcome_sig(
        &self,
        context: &FundingContext,
        remote: &Party<'_>,
        outcome: &OutcomeId,
    ) -> Result<bool, Error> {
        let adaptor_sig = remote
            .cet_signatures
            .get_outcome_sig(outcome)
            .ok_or(Error::MissingSignature(*outcome))?;

        let offer = self.get_offer()?;
        let msg = outcome
            .to_message()
            .map_err(|e| Error::InvalidOracleInfo(e.into()))?;
        let adaptor_point =
            dlc::get_adaptor_point_from_oracle_info(&self.secp, &offer.oracle_info, &msg)
                .map_err(Error::InvalidOracleInfo)?;

        let cet = self.build_cet_with_context(context, outcome)?;

        match dlc::verify_cet_adaptor_sig_from_point(
            &self.secp,
            adaptor_sig,
            &cet,
            &adaptor_point,
            remote.fund_pubkey,
            &context.funding_script_pubkey,
            context.fund_output_value,
        ) {
            Ok(()) => Ok(true),
            Err(dlc::Error::Secp256k1(e)) => {
                warn!("Invalid adaptor signature for outcome {}: {}", outcome, e);
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Verifies the adaptor signatures of the counter party for every outcome
    /// of the contract. Stops at the first invalid signature.
    ///
    /// A missing signature is an error rather than an invalid signature.
    pub fn verify_remote_cet_sigs(&self) -> Result<bool, Error> {
        let remote = self.get_remote()?;
        let context = self.get_funding_context()?;

        for contract_outcome in &self.get_offer()?.contract_outcomes {
            if !self.verify_outcome_sig(&context, &remote, &contract_outcome.outcome)? {
                return Ok(false);
            }
        }

        debug!("All remote adaptor signatures are valid");
        Ok(true)
    }

    /// Verifies the adaptor signature of the counter party for a single
    /// outcome.
    pub fn verify_remote_cet_sig(&self, outcome: &OutcomeId) -> Result<bool, Error> {
        let remote = self.get_remote()?;
        // Reject unknown outcomes before looking for their signature.
        self.get_payout(outcome)?;
        let context = self.get_funding_context()?;
        self.verify_outcome_sig(&context, &remote, outcome)
    }

    /// Verifies every remote adaptor signature and reports the result of each
    /// outcome, in the order of the contract outcomes.
    pub fn verify_remote_cet_sigs_detailed(&self) -> Result<Vec<(OutcomeId, bool)>, Error> {
        let remote = self.get_remote()?;
        let context = self.get_funding_context()?;

        self.get_offer()?
            .contract_outcomes
            .iter()
            .map(|x| {
                self.verify_outcome_sig(&context, &remote, &x.outcome)
                    .map(|valid| (x.outcome, valid))
            })
            .collect()
    }

    /// Verifies the refund signature of the counter party. The signature must
    /// be made with the remote funding key and commit to the whole
    /// transaction.
    pub fn verify_remote_refund_sig(&self) -> Result<bool, Error> {
        let remote = self.get_remote()?;
        let refund_sig = &remote.cet_signatures.refund_sig;

        if &refund_sig.pubkey != remote.fund_pubkey {
            warn!("Remote refund signature is not made with the remote funding key");
            return Ok(false);
        }

        if refund_sig.sighash_type != EcdsaSighashType::All {
            warn!(
                "Remote refund signature uses unexpected sighash type {}",
                refund_sig.sighash_type
            );
            return Ok(false);
        }

        let context = self.get_funding_context()?;
        let refund = self.build_refund_with_context(&context)?;

        match dlc::verify_tx_input_sig(
            &self.secp,
            &refund_sig.signature,
            &refund,
            0,
            &context.funding_script_pubkey,
            context.fund_output_value,
            remote.fund_pubkey,
        ) {
            Ok(()) => Ok(true),
            Err(dlc::Error::Secp256k1(e)) => {
                warn!("Invalid remote refund signature: {}", e);
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Decrypts the adaptor signature of the counter party for the given
    /// outcome using the oracle attestation, producing a signature valid for
    /// the CET of that outcome.
    pub fn decrypt_remote_cet_sig(
        &self,
        outcome: &OutcomeId,
        attestation: &SchnorrSignature,
    ) -> Result<Signature, Error> {
        let remote = self.get_remote()?;
        self.get_payout(outcome)?;
        let adaptor_sig = remote
            .cet_signatures
            .get_outcome_sig(outcome)
            .ok_or(Error::MissingSignature(*outcome))?;

        let msg = outcome.to_message()?;
        let adaptor_secret = dlc::get_adaptor_secret_from_attestation(
            &self.secp,
            &self.get_offer()?.oracle_info,
            &msg,
            attestation,
        )?;
        let signature = adaptor_sig.decrypt(&adaptor_secret)?;

        let context = self.get_funding_context()?;
        let cet = self.build_cet_with_context(&context, outcome)?;
        dlc::verify_tx_input_sig(
            &self.secp,
            &signature,
            &cet,
            0,
            &context.funding_script_pubkey,
            context.fund_output_value,
            remote.fund_pubkey,
        )?;

        Ok(signature)
    }
}
