//! # Ordering and Commit
//!
//! Submitted envelopes are queued to a single ordering task, which cuts a
//! block when `batch_size` transactions are waiting or `batch_timeout` has
//! passed since the first of them arrived. The committer validates each
//! transaction of the block in order, applies the writes of valid ones, and
//! records every status on the [`StatusBoard`].

use ledger_telemetry::{log_tx_event, BLOCK_HEIGHT, PEER_TRANSACTIONS_COMMITTED};
use parking_lot::{Mutex, RwLock};
use shared_types::{CommitStatus, Identity, TransactionEnvelope, TxId, TxValidationCode, Version};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Notify};
use tracing::info;

use crate::domain::{validate_transaction, Block, WorldState};

// =============================================================================
// STATUS BOARD
// =============================================================================

/// Final statuses by transaction id, with waiters woken on every commit.
///
/// Statuses are retained for the life of the peer and never evicted: the
/// board is also the committed tx-id set used for duplicate detection, so
/// memory grows with the number of committed transactions.
#[derive(Debug, Default)]
pub struct StatusBoard {
    statuses: Mutex<HashMap<TxId, CommitStatus>>,
    committed: Notify,
}

impl StatusBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, tx_id: &str) -> Option<CommitStatus> {
        self.statuses.lock().get(tx_id).cloned()
    }

    pub fn contains(&self, tx_id: &str) -> bool {
        self.statuses.lock().contains_key(tx_id)
    }

    fn record(&self, statuses: Vec<CommitStatus>) {
        {
            let mut board = self.statuses.lock();
            for status in statuses {
                board.entry(status.tx_id.clone()).or_insert(status);
            }
        }
        self.committed.notify_waiters();
    }

    /// Wait until a status for `tx_id` is recorded.
    ///
    /// Never resolves for a transaction that is not committed; callers bound
    /// the wait.
    pub async fn wait(&self, tx_id: &str) -> CommitStatus {
        loop {
            let notified = self.committed.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();
            if let Some(status) = self.get(tx_id) {
                return status;
            }
            notified.await;
        }
    }
}

// =============================================================================
// COMMITTER
// =============================================================================

/// Validates ordered blocks and applies them to world state.
pub struct Committer {
    state: Arc<RwLock<WorldState>>,
    statuses: Arc<StatusBoard>,
    trusted_endorsers: Vec<Identity>,
    blocks: RwLock<Vec<Block>>,
}

impl Committer {
    pub fn new(
        state: Arc<RwLock<WorldState>>,
        statuses: Arc<StatusBoard>,
        trusted_endorsers: Vec<Identity>,
    ) -> Self {
        Self {
            state,
            statuses,
            trusted_endorsers,
            blocks: RwLock::new(Vec::new()),
        }
    }

    /// Number of committed blocks. Block numbers start at 1.
    pub fn height(&self) -> u64 {
        self.blocks.read().len() as u64
    }

    pub fn block(&self, number: u64) -> Option<Block> {
        let index = usize::try_from(number.checked_sub(1)?).ok()?;
        self.blocks.read().get(index).cloned()
    }

    /// Validate and commit one block of transactions.
    pub fn commit_block(&self, envelopes: Vec<TransactionEnvelope>) -> Block {
        let number = self.height() + 1;
        let mut transactions = Vec::with_capacity(envelopes.len());
        let mut statuses = Vec::with_capacity(envelopes.len());
        let mut in_block = HashSet::new();

        {
            let mut state = self.state.write();
            for (tx_num, envelope) in envelopes.iter().enumerate() {
                let tx_id = envelope.transaction.tx_id().to_string();
                let duplicate = self.statuses.contains(&tx_id) || !in_block.insert(tx_id.clone());
                let code =
                    validate_transaction(envelope, &state, &self.trusted_endorsers, duplicate);

                if code.is_valid() {
                    state.apply(
                        &envelope.transaction.results.writes,
                        Version::new(number, tx_num as u64),
                    );
                    log_tx_event!(debug, "committer", "transaction valid", tx_id, block = number);
                } else {
                    log_tx_event!(
                        warn,
                        "committer",
                        "transaction invalidated",
                        tx_id,
                        block = number,
                        code = %code
                    );
                }

                PEER_TRANSACTIONS_COMMITTED
                    .with_label_values(&[code.as_str()])
                    .inc();
                if code != TxValidationCode::DuplicateTxId {
                    statuses.push(CommitStatus {
                        tx_id: tx_id.clone(),
                        code,
                        block_number: number,
                    });
                }
                transactions.push((tx_id, code));
            }
        }

        let block = Block {
            number,
            transactions,
        };
        self.blocks.write().push(block.clone());
        BLOCK_HEIGHT.set(number as f64);
        self.statuses.record(statuses);
        block
    }
}

// =============================================================================
// ORDERING SERVICE
// =============================================================================

/// Run the ordering loop until every queue sender is dropped.
pub async fn run_orderer(
    mut queue: mpsc::Receiver<TransactionEnvelope>,
    committer: Arc<Committer>,
    batch_size: usize,
    batch_timeout: Duration,
) {
    let batch_size = batch_size.max(1);
    while let Some(first) = queue.recv().await {
        let mut batch = vec![first];
        let deadline = tokio::time::Instant::now() + batch_timeout;
        while batch.len() < batch_size {
            tokio::select! {
                next = queue.recv() => match next {
                    Some(envelope) => batch.push(envelope),
                    None => break,
                },
                _ = tokio::time::sleep_until(deadline) => break,
            }
        }

        let block = committer.commit_block(batch);
        info!(
            block = block.number,
            transactions = block.transactions.len(),
            valid = block.valid_count(),
            "block committed"
        );
    }
    info!("ordering service stopped");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_wait_returns_recorded_status() {
        let board = Arc::new(StatusBoard::new());
        let waiter = {
            let board = Arc::clone(&board);
            tokio::spawn(async move { board.wait("tx1").await })
        };
        tokio::task::yield_now().await;

        board.record(vec![CommitStatus {
            tx_id: "tx1".into(),
            code: TxValidationCode::Valid,
            block_number: 1,
        }]);
        let status = waiter.await.unwrap();
        assert!(status.is_successful());
        assert_eq!(status.block_number, 1);
    }

    #[tokio::test]
    async fn test_first_status_wins() {
        let board = StatusBoard::new();
        let status = |code| CommitStatus {
            tx_id: "tx1".into(),
            code,
            block_number: 1,
        };
        board.record(vec![status(TxValidationCode::Valid)]);
        board.record(vec![status(TxValidationCode::BadPayload)]);
        assert_eq!(board.get("tx1").unwrap().code, TxValidationCode::Valid);
        assert_eq!(board.wait("tx1").await.code, TxValidationCode::Valid);
    }

    #[test]
    fn test_empty_block_advances_height() {
        let committer = Committer::new(
            Arc::new(RwLock::new(WorldState::new())),
            Arc::new(StatusBoard::new()),
            Vec::new(),
        );
        let block = committer.commit_block(Vec::new());
        assert_eq!(block.number, 1);
        assert_eq!(committer.height(), 1);
        assert_eq!(committer.block(1), Some(block));
        assert_eq!(committer.block(0), None);
    }
}
