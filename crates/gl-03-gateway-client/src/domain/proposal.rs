//! Building and signing the messages a transaction sends.

use rand::RngCore;
use shared_types::{
    Identity, Proposal, ProposalResponse, SignedProposal, Transaction, TransactionEnvelope,
    WireError,
};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::domain::Signer;

/// Length of the random nonce in each proposal.
pub const NONCE_LEN: usize = 24;

/// Build a fresh proposal with a random nonce and derived transaction id.
pub fn new_proposal(
    channel_id: &str,
    chaincode_id: &str,
    function: &str,
    args: &[&str],
    creator: &Identity,
) -> Result<Proposal, WireError> {
    let mut nonce = vec![0u8; NONCE_LEN];
    rand::thread_rng().fill_bytes(&mut nonce);
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();

    Ok(Proposal {
        tx_id: Proposal::compute_tx_id(&nonce, creator)?,
        channel_id: channel_id.to_string(),
        chaincode_id: chaincode_id.to_string(),
        function: function.to_string(),
        args: args.iter().map(|arg| arg.to_string()).collect(),
        creator: creator.clone(),
        nonce,
        timestamp,
    })
}

pub fn sign_proposal(proposal: Proposal, signer: &dyn Signer) -> Result<SignedProposal, WireError> {
    let signature = signer.sign(&proposal.signing_bytes()?);
    Ok(SignedProposal {
        proposal,
        signature,
    })
}

/// Assemble the endorsed transaction and sign it for ordering.
pub fn build_envelope(
    proposal: Proposal,
    endorsed: ProposalResponse,
    signer: &dyn Signer,
) -> Result<TransactionEnvelope, WireError> {
    let transaction = Transaction {
        proposal,
        response: endorsed.response,
        results: endorsed.results,
        endorsements: vec![endorsed.endorsement],
    };
    let signature = signer.sign(&transaction.signing_bytes()?);
    Ok(TransactionEnvelope {
        transaction,
        signature,
    })
}
