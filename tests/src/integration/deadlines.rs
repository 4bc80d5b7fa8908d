//! Per-phase deadlines against a slow peer.

#[cfg(test)]
mod tests {
    use crate::fixtures::{garment_client, gateway_over, start_peer, DelayedConnection};
    use garment_node::InProcessConnection;
    use gl_03_gateway_client::{GarmentInput, GatewayError, Phase};
    use std::sync::Arc;
    use std::time::Duration;

    fn g7() -> GarmentInput {
        GarmentInput {
            id: "g7".into(),
            color: "grey".into(),
            size: "L".into(),
            owner: "erin".into(),
            appraised_value: "90".into(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_evaluate_exceeds_deadline() {
        let peer = start_peer();
        let connection = DelayedConnection::new(
            Arc::clone(&peer),
            Phase::Evaluate,
            Duration::from_secs(6),
        );
        let gateway = gateway_over(Arc::new(connection));

        let err = garment_client(&gateway).read("garment1").await.unwrap_err();
        assert_eq!(
            err,
            GatewayError::DeadlineExceeded {
                phase: Phase::Evaluate,
                deadline: Duration::from_secs(5),
            }
        );
        assert_eq!(peer.height(), 0);

        gateway.close().await;
        peer.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_endorse_exceeds_deadline_without_commit() {
        let peer = start_peer();
        let connection = DelayedConnection::new(
            Arc::clone(&peer),
            Phase::Endorse,
            Duration::from_secs(16),
        );
        let gateway = gateway_over(Arc::new(connection));

        let err = garment_client(&gateway).create(&g7()).await.unwrap_err();
        assert_eq!(
            err,
            GatewayError::DeadlineExceeded {
                phase: Phase::Endorse,
                deadline: Duration::from_secs(15),
            }
        );
        assert!(peer.committed_value("g7").is_none());
        assert_eq!(peer.height(), 0);

        gateway.close().await;
        peer.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_endorse_within_deadline_commits() {
        let peer = start_peer();
        let connection = DelayedConnection::new(
            Arc::clone(&peer),
            Phase::Endorse,
            Duration::from_secs(14),
        );
        let gateway = gateway_over(Arc::new(connection));

        garment_client(&gateway).create(&g7()).await.unwrap();
        assert!(peer.committed_value("g7").is_some());

        gateway.close().await;
        peer.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_commit_status_reports_phase() {
        let peer = start_peer();
        let connection = DelayedConnection::new(
            Arc::clone(&peer),
            Phase::CommitStatus,
            Duration::from_secs(61),
        );
        let gateway = gateway_over(Arc::new(connection));

        let err = garment_client(&gateway).create(&g7()).await.unwrap_err();
        assert!(matches!(
            err,
            GatewayError::DeadlineExceeded {
                phase: Phase::CommitStatus,
                ..
            }
        ));
        assert!(peer.committed_value("g7").is_some());

        gateway.close().await;
        peer.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_transfer_after_commit_status_deadline_is_visible_on_read() {
        let peer = start_peer();
        let seeding = gateway_over(Arc::new(InProcessConnection::new(Arc::clone(&peer))));
        garment_client(&seeding).init_ledger().await.unwrap();

        let slow = gateway_over(Arc::new(DelayedConnection::new(
            Arc::clone(&peer),
            Phase::CommitStatus,
            Duration::from_secs(61),
        )));
        let err = garment_client(&slow)
            .transfer("garment1", "bob")
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::DeadlineExceeded { .. }));

        // the transfer landed; a blind retry would report "bob" as prior owner
        let current = garment_client(&seeding).read("garment1").await.unwrap();
        assert_eq!(current.owner, "bob");
        let prior = garment_client(&seeding)
            .transfer("garment1", "bob")
            .await
            .unwrap();
        assert_eq!(prior, "bob");

        slow.close().await;
        seeding.close().await;
        peer.shutdown().await;
    }
}
