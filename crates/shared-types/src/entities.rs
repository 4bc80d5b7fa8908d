//! # Core Wire Entities
//!
//! ## Clusters
//!
//! - **Identity**: `Identity`, `Signature`
//! - **Proposal**: `Proposal`, `SignedProposal`, `ChaincodeResponse`
//! - **Endorsement**: `ReadWriteSet`, `Endorsement`, `ProposalResponse`
//! - **Ordering & Commit**: `Transaction`, `TransactionEnvelope`,
//!   `TxValidationCode`, `CommitStatus`

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::errors::WireError;

// =============================================================================
// CLUSTER A: IDENTITY
// =============================================================================

/// A 64-byte Ed25519 signature.
pub type Signature = [u8; 64];

/// Hex-encoded transaction identifier.
pub type TxId = String;

/// Client or peer identity: the membership service provider the member
/// belongs to and its public credentials.
///
/// Credentials are the raw 32-byte Ed25519 verifying key.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    /// Membership service provider identifier (e.g. `Org1MSP`).
    pub msp_id: String,
    /// Public credentials of the member.
    #[serde_as(as = "Bytes")]
    pub credentials: Vec<u8>,
}

impl Identity {
    /// Create a new identity.
    pub fn new(msp_id: impl Into<String>, credentials: Vec<u8>) -> Self {
        Self {
            msp_id: msp_id.into(),
            credentials,
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fingerprint = hex::encode(&self.credentials);
        let short = fingerprint.get(..12).unwrap_or(&fingerprint);
        write!(f, "{}:{}", self.msp_id, short)
    }
}

// =============================================================================
// CLUSTER B: PROPOSAL
// =============================================================================

/// A request to execute one contract function.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// Transaction identifier derived from `nonce` and `creator`.
    pub tx_id: TxId,
    /// Channel the contract is deployed on.
    pub channel_id: String,
    /// Name of the deployed contract.
    pub chaincode_id: String,
    /// Wire-level function name (e.g. `CreateGarment`).
    pub function: String,
    /// Positional string arguments.
    pub args: Vec<String>,
    /// Identity of the submitting client.
    pub creator: Identity,
    /// Random nonce making the transaction id unique.
    #[serde_as(as = "Bytes")]
    pub nonce: Vec<u8>,
    /// Unix timestamp (seconds) at which the proposal was built.
    pub timestamp: u64,
}

impl Proposal {
    /// Derive a transaction id: hex SHA-256 of `nonce || creator`.
    pub fn compute_tx_id(nonce: &[u8], creator: &Identity) -> Result<TxId, WireError> {
        let creator_bytes = serde_json::to_vec(creator)?;
        let mut hasher = Sha256::new();
        hasher.update(nonce);
        hasher.update(&creator_bytes);
        Ok(hex::encode(hasher.finalize()))
    }

    /// Returns true if `tx_id` matches the nonce and creator.
    pub fn has_consistent_tx_id(&self) -> bool {
        Self::compute_tx_id(&self.nonce, &self.creator)
            .map(|expected| expected == self.tx_id)
            .unwrap_or(false)
    }

    /// Bytes covered by the client's signature.
    pub fn signing_bytes(&self) -> Result<Vec<u8>, WireError> {
        Ok(serde_json::to_vec(self)?)
    }
}

/// A proposal together with the creator's signature over its bytes.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedProposal {
    /// The signed proposal.
    pub proposal: Proposal,
    /// Creator's signature over `proposal.signing_bytes()`.
    #[serde_as(as = "Bytes")]
    pub signature: Signature,
}

/// Outcome of a single contract invocation.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChaincodeResponse {
    /// 200 on success, 500 on contract failure.
    pub status: u16,
    /// Error message (empty on success).
    pub message: String,
    /// Returned bytes (empty on failure).
    #[serde_as(as = "Bytes")]
    pub payload: Vec<u8>,
}

impl ChaincodeResponse {
    /// Status code of a successful invocation.
    pub const OK: u16 = 200;
    /// Status code of a failed invocation.
    pub const ERROR: u16 = 500;

    /// Successful response carrying `payload`.
    pub fn success(payload: Vec<u8>) -> Self {
        Self {
            status: Self::OK,
            message: String::new(),
            payload,
        }
    }

    /// Failed response carrying `message`.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Self::ERROR,
            message: message.into(),
            payload: Vec::new(),
        }
    }

    /// Returns true if the invocation succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status < 400
    }
}

// =============================================================================
// CLUSTER C: ENDORSEMENT
// =============================================================================

/// Committed version of a key: position of the transaction that last wrote it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Version {
    /// Block number.
    pub block_num: u64,
    /// Position of the transaction within the block.
    pub tx_num: u64,
}

impl Version {
    /// Create a new version.
    pub const fn new(block_num: u64, tx_num: u64) -> Self {
        Self { block_num, tx_num }
    }
}

/// A key read during simulation, with the version observed (`None` = absent).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KvRead {
    pub key: String,
    pub version: Option<Version>,
}

/// A key written (or deleted) during simulation.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KvWrite {
    pub key: String,
    #[serde_as(as = "Bytes")]
    pub value: Vec<u8>,
    pub is_delete: bool,
}

/// Read and write sets produced by simulating a proposal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadWriteSet {
    pub reads: Vec<KvRead>,
    pub writes: Vec<KvWrite>,
}

impl ReadWriteSet {
    /// Returns true if the simulation wrote nothing.
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.writes.is_empty()
    }
}

/// A peer's signature over a proposal response.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endorsement {
    /// Identity of the endorsing peer.
    pub endorser: Identity,
    /// Signature over `ProposalResponse::endorsed_bytes()`.
    #[serde_as(as = "Bytes")]
    pub signature: Signature,
}

/// A peer's answer to an endorsement request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalResponse {
    pub tx_id: TxId,
    pub response: ChaincodeResponse,
    pub results: ReadWriteSet,
    pub endorsement: Endorsement,
}

impl ProposalResponse {
    /// Bytes an endorser signs: the transaction id, response and results.
    pub fn endorsed_bytes(
        tx_id: &str,
        response: &ChaincodeResponse,
        results: &ReadWriteSet,
    ) -> Result<Vec<u8>, WireError> {
        Ok(serde_json::to_vec(&(tx_id, response, results))?)
    }
}

// =============================================================================
// CLUSTER D: ORDERING & COMMIT
// =============================================================================

/// An endorsed transaction ready for ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub proposal: Proposal,
    pub response: ChaincodeResponse,
    pub results: ReadWriteSet,
    pub endorsements: Vec<Endorsement>,
}

impl Transaction {
    /// Transaction identifier.
    pub fn tx_id(&self) -> &str {
        &self.proposal.tx_id
    }

    /// Bytes covered by the client's envelope signature.
    pub fn signing_bytes(&self) -> Result<Vec<u8>, WireError> {
        Ok(serde_json::to_vec(self)?)
    }
}

/// A transaction signed by its creator for submission to the orderer.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionEnvelope {
    pub transaction: Transaction,
    #[serde_as(as = "Bytes")]
    pub signature: Signature,
}

/// Validation result assigned to a transaction at commit time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TxValidationCode {
    /// Writes applied.
    Valid,
    /// A key read during endorsement changed before commit.
    MvccReadConflict,
    /// The transaction id was already committed.
    DuplicateTxId,
    /// Endorsements missing or not verifiable.
    EndorsementPolicyFailure,
    /// The transaction is malformed.
    BadPayload,
}

impl TxValidationCode {
    /// Returns true if the transaction's writes were applied.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, TxValidationCode::Valid)
    }

    /// Stable upper-case name, used in logs and metric labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            TxValidationCode::Valid => "VALID",
            TxValidationCode::MvccReadConflict => "MVCC_READ_CONFLICT",
            TxValidationCode::DuplicateTxId => "DUPLICATE_TXID",
            TxValidationCode::EndorsementPolicyFailure => "ENDORSEMENT_POLICY_FAILURE",
            TxValidationCode::BadPayload => "BAD_PAYLOAD",
        }
    }
}

impl fmt::Display for TxValidationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final status of a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitStatus {
    pub tx_id: TxId,
    pub code: TxValidationCode,
    pub block_number: u64,
}

impl CommitStatus {
    /// Returns true if the transaction committed successfully.
    #[must_use]
    pub fn is_successful(&self) -> bool {
        self.code.is_valid()
    }
}
