//! Conflicting transactions and read-version checks at commit.

#[cfg(test)]
mod tests {
    use crate::fixtures::{garment_client, gateway_over, seeded_node, start_peer};
    use garment_node::InProcessConnection;
    use gl_03_gateway_client::GatewayError;
    use shared_types::TxValidationCode;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_conflicting_transfers_one_commits() {
        let node = seeded_node().await;
        let garments = node.garments();

        let (first, second) = tokio::join!(
            garments.transfer("garment1", "alice"),
            garments.transfer("garment1", "bob"),
        );

        let results = [first, second];
        let committed: Vec<_> = results.iter().filter(|r| r.is_ok()).collect();
        assert_eq!(committed.len(), 1);
        assert_eq!(committed[0].as_deref().unwrap(), "A");

        let failed: Vec<_> = results.iter().filter_map(|r| r.as_ref().err()).collect();
        assert!(matches!(
            failed[0],
            GatewayError::CommitFailed {
                code: TxValidationCode::MvccReadConflict,
                ..
            }
        ));

        let owner = garments.read("garment1").await.unwrap().owner;
        assert!(owner == "alice" || owner == "bob");

        node.shutdown().await;
    }

    #[tokio::test]
    async fn test_independent_keys_commit_together() {
        let node = seeded_node().await;
        let garments = node.garments();

        let (a, b) = tokio::join!(
            garments.transfer("garment2", "carol"),
            garments.transfer("garment3", "dave"),
        );
        assert_eq!(a.unwrap(), "B");
        assert_eq!(b.unwrap(), "A");

        node.shutdown().await;
    }

    #[tokio::test]
    async fn test_two_clients_share_one_ledger() {
        let peer = start_peer();
        let alice = gateway_over(Arc::new(InProcessConnection::new(Arc::clone(&peer))));
        let bob = gateway_over(Arc::new(InProcessConnection::new(Arc::clone(&peer))));

        garment_client(&alice).init_ledger().await.unwrap();
        let prior = garment_client(&bob)
            .transfer("garment6", "bob")
            .await
            .unwrap();
        assert_eq!(prior, "D");
        assert_eq!(
            garment_client(&alice).read("garment6").await.unwrap().owner,
            "bob"
        );

        alice.close().await;
        bob.close().await;
        peer.shutdown().await;
    }
}
