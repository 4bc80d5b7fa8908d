use serde::{Deserialize, Serialize};
use shared_types::{TxId, TxValidationCode};

/// A committed block: its transactions in order and the code each received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub number: u64,
    pub transactions: Vec<(TxId, TxValidationCode)>,
}

impl Block {
    /// Number of transactions whose writes were applied.
    pub fn valid_count(&self) -> usize {
        self.transactions
            .iter()
            .filter(|(_, code)| code.is_valid())
            .count()
    }
}
