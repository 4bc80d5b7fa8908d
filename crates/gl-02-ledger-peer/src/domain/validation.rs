//! # Commit-Time Validation
//!
//! Assigns each ordered transaction its [`TxValidationCode`]. Checks run in
//! this order and the first failure wins:
//!
//! 1. Payload well-formed (consistent tx id, creator signature, successful response)
//! 2. Transaction id not already committed
//! 3. At least one trusted endorsement, and every endorsement verifies
//! 4. Every key read during endorsement still has the version observed

use shared_types::{
    verify_endorsement, verify_envelope, Identity, TransactionEnvelope, TxValidationCode,
};

use crate::domain::WorldState;

/// Validate one transaction against the current committed state.
pub fn validate_transaction(
    envelope: &TransactionEnvelope,
    state: &WorldState,
    trusted_endorsers: &[Identity],
    already_committed: bool,
) -> TxValidationCode {
    let tx = &envelope.transaction;

    if !tx.proposal.has_consistent_tx_id()
        || verify_envelope(envelope).is_err()
        || !tx.response.is_success()
    {
        return TxValidationCode::BadPayload;
    }

    if already_committed {
        return TxValidationCode::DuplicateTxId;
    }

    let all_verify = tx.endorsements.iter().all(|endorsement| {
        verify_endorsement(endorsement, tx.tx_id(), &tx.response, &tx.results).is_ok()
    });
    let trusted = tx
        .endorsements
        .iter()
        .any(|endorsement| trusted_endorsers.contains(&endorsement.endorser));
    if !all_verify || !trusted {
        return TxValidationCode::EndorsementPolicyFailure;
    }

    let stale = tx
        .results
        .reads
        .iter()
        .any(|read| state.version_of(&read.key) != read.version);
    if stale {
        return TxValidationCode::MvccReadConflict;
    }

    TxValidationCode::Valid
}
