//! # Gateway Service
//!
//! `Gateway` → `Network` (channel) → `Contract` (deployed chaincode).
//!
//! ## Phases
//!
//! ```text
//! evaluate_transaction:  evaluate
//! submit_transaction:    endorse ──→ submit ──→ commit_status
//! ```
//!
//! Every phase runs under its own deadline from [`DeadlineConfig`]. A phase
//! that expires fails the whole call with `DeadlineExceeded`; later phases
//! are not attempted. A transaction whose submit phase expired may still
//! commit.

use ledger_telemetry::{PhaseTimer, GATEWAY_TRANSACTIONS};
use shared_types::{verify_endorsement, Identity};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::domain::{
    build_envelope, new_proposal, sign_proposal, DeadlineConfig, GatewayConfig, Phase, Signer,
};
use crate::errors::{ConnectionError, GatewayError};
use crate::ports::GatewayConnection;

struct GatewayInner {
    config: GatewayConfig,
    connection: Arc<dyn GatewayConnection>,
    identity: Identity,
    signer: Arc<dyn Signer>,
    closed: AtomicBool,
}

impl GatewayInner {
    fn ensure_open(&self) -> Result<(), GatewayError> {
        if self.closed.load(Ordering::Acquire) {
            Err(GatewayError::Closed)
        } else {
            Ok(())
        }
    }

    fn deadlines(&self) -> &DeadlineConfig {
        &self.config.deadlines
    }
}

impl Drop for GatewayInner {
    fn drop(&mut self) {
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        let connection = Arc::clone(&self.connection);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                debug!("gateway dropped while open, closing connection");
                handle.spawn(async move { connection.close().await });
            }
            Err(_) => warn!("gateway dropped outside a runtime, connection left open"),
        }
    }
}

/// Client-side entry point to the ledger.
///
/// Cloning is cheap; all clones share one connection.
#[derive(Clone)]
pub struct Gateway {
    inner: Arc<GatewayInner>,
}

impl Gateway {
    /// Validate `config` and bind it to a connection and client identity.
    pub fn connect(
        config: GatewayConfig,
        connection: Arc<dyn GatewayConnection>,
        identity: Identity,
        signer: Arc<dyn Signer>,
    ) -> Result<Self, GatewayError> {
        config.validate()?;
        info!(
            endpoint = %config.peer_endpoint,
            host_alias = %config.peer_host_alias,
            identity = %identity,
            "gateway connected"
        );
        Ok(Self {
            inner: Arc::new(GatewayInner {
                config,
                connection,
                identity,
                signer,
                closed: AtomicBool::new(false),
            }),
        })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.inner.config
    }

    /// Identity transactions are submitted as.
    pub fn identity(&self) -> &Identity {
        &self.inner.identity
    }

    pub fn network(&self, channel: impl Into<String>) -> Network {
        Network {
            inner: Arc::clone(&self.inner),
            channel: channel.into(),
        }
    }

    /// Contract on the configured channel and chaincode.
    pub fn default_contract(&self) -> Contract {
        self.network(self.inner.config.channel_name.clone())
            .contract(self.inner.config.chaincode_name.clone())
    }

    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::Acquire)
    }

    /// Close the connection. Only the first call has any effect.
    pub async fn close(&self) {
        if self.inner.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        self.inner.connection.close().await;
        info!("gateway closed");
    }
}

/// A channel reachable through the gateway.
#[derive(Clone)]
pub struct Network {
    inner: Arc<GatewayInner>,
    channel: String,
}

impl Network {
    pub fn name(&self) -> &str {
        &self.channel
    }

    pub fn contract(&self, chaincode: impl Into<String>) -> Contract {
        Contract {
            inner: Arc::clone(&self.inner),
            channel: self.channel.clone(),
            chaincode: chaincode.into(),
        }
    }
}

/// A deployed contract on a channel.
#[derive(Clone)]
pub struct Contract {
    inner: Arc<GatewayInner>,
    channel: String,
    chaincode: String,
}

impl Contract {
    pub fn chaincode(&self) -> &str {
        &self.chaincode
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Run `function` as a query. Nothing is written to the ledger.
    #[instrument(skip(self, args), fields(channel = %self.channel, chaincode = %self.chaincode))]
    pub async fn evaluate_transaction(
        &self,
        function: &str,
        args: &[&str],
    ) -> Result<Vec<u8>, GatewayError> {
        let result = self.evaluate(function, args).await;
        record_outcome("evaluate", &result);
        result
    }

    /// Run `function` as a transaction and wait until it is committed.
    ///
    /// Returns the payload from endorsement once the commit is valid.
    ///
    /// # Retries
    ///
    /// Nothing is retried here, and callers must not resubmit blindly. A
    /// `DeadlineExceeded` in the `Submit` or `CommitStatus` phase only means
    /// the client stopped waiting: the envelope may already be ordered and
    /// may still commit. A second submission is a new transaction with a new
    /// id, so it is not caught as a duplicate and a non-idempotent function
    /// such as `TransferGarment` would be applied twice. Re-read the
    /// affected state (for garments, `ReadGarment`) and only resubmit if the
    /// first attempt is not visible. `CommitFailed` means the transaction was
    /// invalidated and changed nothing.
    #[instrument(skip(self, args), fields(channel = %self.channel, chaincode = %self.chaincode))]
    pub async fn submit_transaction(
        &self,
        function: &str,
        args: &[&str],
    ) -> Result<Vec<u8>, GatewayError> {
        let result = self.submit(function, args).await;
        record_outcome("submit", &result);
        result
    }

    async fn evaluate(&self, function: &str, args: &[&str]) -> Result<Vec<u8>, GatewayError> {
        self.inner.ensure_open()?;
        let proposal = new_proposal(
            &self.channel,
            &self.chaincode,
            function,
            args,
            &self.inner.identity,
        )?;
        let signed = sign_proposal(proposal, self.inner.signer.as_ref())?;
        debug!(tx_id = %signed.proposal.tx_id, "evaluating");

        let deadlines = self.inner.deadlines();
        with_deadline(
            Phase::Evaluate,
            deadlines,
            self.inner.connection.evaluate(&signed),
        )
        .await
    }

    async fn submit(&self, function: &str, args: &[&str]) -> Result<Vec<u8>, GatewayError> {
        self.inner.ensure_open()?;
        let deadlines = self.inner.deadlines();
        let connection = &self.inner.connection;

        let proposal = new_proposal(
            &self.channel,
            &self.chaincode,
            function,
            args,
            &self.inner.identity,
        )?;
        let tx_id = proposal.tx_id.clone();
        let signed = sign_proposal(proposal, self.inner.signer.as_ref())?;
        debug!(%tx_id, "requesting endorsement");

        let endorsed = with_deadline(Phase::Endorse, deadlines, connection.endorse(&signed)).await?;
        if endorsed.tx_id != tx_id {
            return Err(GatewayError::Endorse {
                message: format!("endorsement is for transaction {}", endorsed.tx_id),
            });
        }
        if !endorsed.response.is_success() {
            return Err(GatewayError::Endorse {
                message: endorsed.response.message,
            });
        }
        verify_endorsement(
            &endorsed.endorsement,
            &tx_id,
            &endorsed.response,
            &endorsed.results,
        )
        .map_err(|e| GatewayError::Endorse {
            message: e.to_string(),
        })?;
        let payload = endorsed.response.payload.clone();

        let envelope = build_envelope(signed.proposal, endorsed, self.inner.signer.as_ref())?;
        with_deadline(Phase::Submit, deadlines, connection.submit(envelope)).await?;
        debug!(%tx_id, "submitted for ordering");

        let status =
            with_deadline(Phase::CommitStatus, deadlines, connection.commit_status(&tx_id)).await?;
        if !status.is_successful() {
            warn!(%tx_id, code = %status.code, "transaction invalidated");
            return Err(GatewayError::CommitFailed {
                tx_id,
                code: status.code,
            });
        }
        info!(%tx_id, block = status.block_number, "transaction committed");
        Ok(payload)
    }
}

/// Await `call` for at most the deadline of `phase`.
async fn with_deadline<T, F>(
    phase: Phase,
    deadlines: &DeadlineConfig,
    call: F,
) -> Result<T, GatewayError>
where
    F: Future<Output = Result<T, ConnectionError>>,
{
    let deadline = deadlines.for_phase(phase);
    let _timer = PhaseTimer::start(phase.as_str());
    match tokio::time::timeout(deadline, call).await {
        Ok(result) => result.map_err(|e| GatewayError::from_connection(phase, e)),
        Err(_) => {
            warn!(%phase, ?deadline, "deadline exceeded");
            Err(GatewayError::DeadlineExceeded { phase, deadline })
        }
    }
}

fn record_outcome<T>(kind: &str, result: &Result<T, GatewayError>) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(e) => e.outcome(),
    };
    GATEWAY_TRANSACTIONS
        .with_label_values(&[kind, outcome])
        .inc();
}
