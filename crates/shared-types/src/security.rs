//! # Signature Verification
//!
//! The single implementation of signature checks applied to wire messages.
//! Both the ledger peer (proposals, envelopes) and the committer
//! (endorsements) go through these functions.
//!
//! ## Security Properties
//!
//! - **Ed25519**: credentials are raw verifying keys, signatures are 64 bytes
//! - **Creator-Bound**: proposals and envelopes are verified against the
//!   creator identity they carry
//! - **Strict Verification**: `verify_strict` rejects malleable signatures

use ed25519_dalek::{Signature as DalekSignature, VerifyingKey};

use crate::entities::{
    ChaincodeResponse, Endorsement, Identity, ProposalResponse, ReadWriteSet, Signature,
    SignedProposal, TransactionEnvelope,
};
use crate::errors::WireError;

/// Verify `signature` over `message` using the identity's credentials.
pub fn verify_signature(
    identity: &Identity,
    message: &[u8],
    signature: &Signature,
) -> Result<(), WireError> {
    let key_bytes: [u8; 32] = identity
        .credentials
        .as_slice()
        .try_into()
        .map_err(|_| WireError::InvalidCredentials {
            msp_id: identity.msp_id.clone(),
        })?;
    let verifying_key =
        VerifyingKey::from_bytes(&key_bytes).map_err(|_| WireError::InvalidCredentials {
            msp_id: identity.msp_id.clone(),
        })?;

    let sig = DalekSignature::from_bytes(signature);
    verifying_key
        .verify_strict(message, &sig)
        .map_err(|_| WireError::InvalidSignature)
}

/// Verify a signed proposal against its creator.
pub fn verify_signed_proposal(signed: &SignedProposal) -> Result<(), WireError> {
    let bytes = signed.proposal.signing_bytes()?;
    verify_signature(&signed.proposal.creator, &bytes, &signed.signature)
}

/// Verify a transaction envelope against the proposal's creator.
pub fn verify_envelope(envelope: &TransactionEnvelope) -> Result<(), WireError> {
    let bytes = envelope.transaction.signing_bytes()?;
    verify_signature(
        &envelope.transaction.proposal.creator,
        &bytes,
        &envelope.signature,
    )
}

/// Verify one endorsement over the transaction's response and results.
pub fn verify_endorsement(
    endorsement: &Endorsement,
    tx_id: &str,
    response: &ChaincodeResponse,
    results: &ReadWriteSet,
) -> Result<(), WireError> {
    let bytes = ProposalResponse::endorsed_bytes(tx_id, response, results)?;
    verify_signature(&endorsement.endorser, &bytes, &endorsement.signature)
}
