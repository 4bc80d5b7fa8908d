//! REST front end over a live node.

#[cfg(test)]
mod tests {
    use crate::fixtures::{seeded_node, start_node};
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn create_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/garments")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn list_request() -> Request<Body> {
        Request::builder()
            .uri("/api/garments")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_post_then_get_lists_new_garment() {
        let node = start_node();
        let app = node.router();

        let response = app
            .clone()
            .oneshot(create_request(
                r#"{"garmentId":"g100","color":"red","size":"M","owner":"alice","appraisedValue":250}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(body_text(response).await, "Garment created successfully");

        let response = app.oneshot(list_request()).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let records: Vec<Value> = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["ID"], "g100");
        assert_eq!(records[0]["AppraisedValue"], "250");

        node.shutdown().await;
    }

    #[tokio::test]
    async fn test_duplicate_post_returns_500() {
        let node = seeded_node().await;
        let response = node
            .router()
            .oneshot(create_request(
                r#"{"garmentId":"garment1","color":"red","size":"M","owner":"alice","appraisedValue":"1"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "Failed to create garment");

        node.shutdown().await;
    }

    #[tokio::test]
    async fn test_get_on_seeded_ledger() {
        let node = seeded_node().await;
        let response = node.router().oneshot(list_request()).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let records: Vec<Value> = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(records.len(), 6);

        node.shutdown().await;
    }
}
