//! Garment lifecycle through the gateway and a live peer.

#[cfg(test)]
mod tests {
    use crate::fixtures::{seeded_node, start_node};
    use gl_03_gateway_client::{GarmentInput, GatewayError};
    use shared_types::{Garment, TxValidationCode};

    fn g100() -> GarmentInput {
        GarmentInput {
            id: "g100".into(),
            color: "red".into(),
            size: "M".into(),
            owner: "alice".into(),
            appraised_value: "250".into(),
        }
    }

    const G100_BYTES: &str =
        r#"{"AppraisedValue":"250","Color":"red","ID":"g100","Owner":"alice","Size":"M"}"#;

    #[tokio::test]
    async fn test_create_then_read_returns_canonical_bytes() {
        let node = start_node();
        let garments = node.garments();

        let created = garments.create(&g100()).await.unwrap();
        assert_eq!(created, G100_BYTES);

        let stored = node.peer().committed_value("g100").unwrap();
        assert_eq!(stored, G100_BYTES.as_bytes());

        let raw = node
            .garments()
            .contract()
            .evaluate_transaction("ReadGarment", &["g100"])
            .await
            .unwrap();
        assert_eq!(raw, G100_BYTES.as_bytes());
        assert!(garments.exists("g100").await.unwrap());

        node.shutdown().await;
    }

    #[tokio::test]
    async fn test_duplicate_create_rejected_at_endorsement() {
        let node = start_node();
        node.garments().create(&g100()).await.unwrap();
        let height = node.peer().height();

        let err = node.garments().create(&g100()).await.unwrap_err();
        assert_eq!(
            err,
            GatewayError::Endorse {
                message: "The garment g100 already exists".into()
            }
        );
        assert_eq!(node.peer().height(), height);

        node.shutdown().await;
    }

    #[tokio::test]
    async fn test_transfer_returns_prior_owner() {
        let node = start_node();
        let garments = node.garments();
        garments.create(&g100()).await.unwrap();

        let prior = garments.transfer("g100", "bob").await.unwrap();
        assert_eq!(prior, "alice");

        let garment = garments.read("g100").await.unwrap();
        assert_eq!(garment.owner, "bob");
        assert_eq!(garment.color, "red");

        node.shutdown().await;
    }

    #[tokio::test]
    async fn test_update_replaces_record() {
        let node = start_node();
        let garments = node.garments();
        garments.create(&g100()).await.unwrap();

        let mut update = g100();
        update.color = "green".into();
        update.appraised_value = "400".into();
        garments.update(&update).await.unwrap();

        assert_eq!(
            garments.read("g100").await.unwrap(),
            Garment::new("g100", "green", "M", "alice", "400")
        );

        node.shutdown().await;
    }

    #[tokio::test]
    async fn test_missing_record_operations_leave_ledger_unchanged() {
        let node = start_node();
        let garments = node.garments();
        let missing = "The garment g404 does not exist".to_string();

        assert_eq!(
            garments.read("g404").await.unwrap_err(),
            GatewayError::Evaluate {
                message: missing.clone()
            }
        );

        let mut update = g100();
        update.id = "g404".into();
        assert_eq!(
            garments.update(&update).await.unwrap_err(),
            GatewayError::Endorse {
                message: missing.clone()
            }
        );
        assert_eq!(
            garments.delete("g404").await.unwrap_err(),
            GatewayError::Endorse {
                message: missing.clone()
            }
        );
        assert_eq!(
            garments.transfer("g404", "bob").await.unwrap_err(),
            GatewayError::Endorse { message: missing }
        );

        assert!(!garments.exists("g404").await.unwrap());
        assert_eq!(node.peer().height(), 0);
        assert!(node.peer().committed_value("g404").is_none());

        node.shutdown().await;
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let node = start_node();
        let garments = node.garments();
        garments.create(&g100()).await.unwrap();

        garments.delete("g100").await.unwrap();
        assert!(!garments.exists("g100").await.unwrap());
        assert!(node.peer().committed_value("g100").is_none());

        node.shutdown().await;
    }

    #[tokio::test]
    async fn test_seeded_ledger_lists_six_tagged_records() {
        let node = seeded_node().await;

        let records = node.garments().list().await.unwrap();
        let ids: Vec<_> = records.iter().map(|r| r["ID"].as_str().unwrap()).collect();
        assert_eq!(
            ids,
            ["garment1", "garment2", "garment3", "garment4", "garment5", "garment6"]
        );
        assert!(records.iter().all(|r| r["DocType"] == "garment"));
        assert_eq!(records[0]["Size"], 5);
        assert_eq!(records[0]["AppraisedValue"], 300);

        node.shutdown().await;
    }

    #[tokio::test]
    async fn test_committed_transactions_recorded_valid() {
        let node = seeded_node().await;
        let block = node.peer().block(1).unwrap();

        assert_eq!(block.number, 1);
        assert_eq!(block.valid_count(), 1);
        let (tx_id, code) = &block.transactions[0];
        assert_eq!(*code, TxValidationCode::Valid);
        assert_eq!(node.peer().status_of(tx_id).unwrap().code, TxValidationCode::Valid);

        node.shutdown().await;
    }

    #[tokio::test]
    async fn test_closed_gateway_rejects_calls() {
        let node = start_node();
        node.gateway().close().await;

        assert_eq!(
            node.garments().exists("g100").await.unwrap_err(),
            GatewayError::Closed
        );
        node.peer().shutdown().await;
    }
}
