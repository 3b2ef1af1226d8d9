// src/routes.rs

use axum::{routing::get, Router};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers};

pub fn build_router(app_state: AppState) -> Router {
    // As rotas estáticas (/analytics, /summary) têm prioridade sobre /{id}
    let sales_routes = Router::new()
        .route(
            "/",
            get(handlers::sales::list_sales).post(handlers::sales::create_sale),
        )
        .route("/analytics", get(handlers::sales::get_analytics))
        .route("/summary", get(handlers::sales::get_summary))
        .route(
            "/{id}",
            get(handlers::sales::get_sale)
                .put(handlers::sales::update_sale)
                .delete(handlers::sales::delete_sale),
        );

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/sales", sales_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt; // oneshot

    use super::*;
    use crate::db::memory_repo::InMemorySaleRepository;

    fn make_router() -> Router {
        let state = AppState::with_gateway(Arc::new(InMemorySaleRepository::new()), "en".into());
        build_router(state)
    }

    async fn call(router: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let resp = router.clone().oneshot(req).await.expect("oneshot failed");
        let status = resp.status();
        let bytes = resp
            .into_body()
            .collect()
            .await
            .expect("body collect failed")
            .to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn create(router: &Router, body: Value) -> Value {
        let (status, sale) = call(router, json_request("POST", "/api/sales", body)).await;
        assert_eq!(status, StatusCode::CREATED, "{sale}");
        sale
    }

    fn jeans(date: &str) -> Value {
        json!({
            "product": "Jeans",
            "quantity": 2,
            "salePrice": 100,
            "unitCost": 25,
            "client": "Alice",
            "paymentMethod": "card",
            "date": date
        })
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let router = make_router();
        let resp = router.oneshot(get("/api/health")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn create_returns_201_with_margin_and_defaults() {
        let router = make_router();
        let sale = create(
            &router,
            json!({
                "product": "T-Shirt",
                "quantity": 3,
                "salePrice": 59.97,
                "unitCost": 7.99,
                "customer": "Marie"
            }),
        )
        .await;

        assert_eq!(sale["client"], "Marie");
        assert_eq!(sale["status"], "Pending");
        assert_eq!(sale["paymentMethod"], "cash");
        assert_eq!(sale["margin"], 36.0);
    }

    #[tokio::test]
    async fn create_capitalizes_lowercase_payment_status() {
        let router = make_router();
        let mut body = jeans("2024-01-05T10:00:00Z");
        body["paymentStatus"] = json!("completed");
        let sale = create(&router, body).await;
        assert_eq!(sale["status"], "Completed");
    }

    #[tokio::test]
    async fn create_with_missing_fields_is_400() {
        let router = make_router();
        let (status, body) = call(
            &router,
            json_request("POST", "/api/sales", json!({ "product": "Jeans" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "One or more fields are invalid.");
        assert!(body["details"]["quantity"].is_array());
    }

    #[tokio::test]
    async fn create_with_unknown_payment_method_is_400() {
        let router = make_router();
        let mut body = jeans("2024-01-05T10:00:00Z");
        body["paymentMethod"] = json!("transfert");
        let (status, body) = call(&router, json_request("POST", "/api/sales", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid request body.");
    }

    #[tokio::test]
    async fn list_is_sorted_and_annotated() {
        let router = make_router();
        create(&router, jeans("2024-01-05T10:00:00Z")).await;
        let mut later = jeans("2024-02-10T10:00:00Z");
        later["paymentStatus"] = json!("Cancelled");
        create(&router, later).await;

        let (status, body) = call(&router, get("/api/sales")).await;
        assert_eq!(status, StatusCode::OK);
        let sales = body.as_array().unwrap();
        assert_eq!(sales.len(), 2);
        assert_eq!(sales[0]["status"], "Cancelled");
        assert_eq!(sales[0]["paymentStatus"], "cancelled");
        assert_eq!(sales[1]["paymentStatus"], "pending");
        assert_eq!(sales[1]["paymentMethod"], "card");
        assert_eq!(sales[1]["marginPercent"], "100.00");
    }

    #[tokio::test]
    async fn update_notes_only_keeps_margin() {
        let router = make_router();
        let sale = create(&router, jeans("2024-01-05T10:00:00Z")).await;
        let uri = format!("/api/sales/{}", sale["id"].as_str().unwrap());

        let (status, updated) =
            call(&router, json_request("PUT", &uri, json!({ "notes": "Livrée" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["notes"], "Livrée");
        assert_eq!(updated["margin"], sale["margin"]);
    }

    #[tokio::test]
    async fn update_recomputes_margin() {
        let router = make_router();
        let sale = create(&router, jeans("2024-01-05T10:00:00Z")).await;
        let uri = format!("/api/sales/{}", sale["id"].as_str().unwrap());

        let (status, updated) = call(
            &router,
            json_request(
                "PUT",
                &uri,
                json!({ "salePrice": 90, "unitCost": 20, "quantity": 4 }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["margin"], 10.0);
    }

    #[tokio::test]
    async fn update_unknown_id_is_404() {
        let router = make_router();
        let uri = format!("/api/sales/{}", uuid::Uuid::new_v4());
        let (status, _) = call(&router, json_request("PUT", &uri, json!({ "notes": "x" }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn malformed_id_is_400() {
        let router = make_router();
        let (status, _) = call(&router, get("/api/sales/not-a-uuid")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn delete_unknown_id_keeps_records() {
        let router = make_router();
        let sale = create(&router, jeans("2024-01-05T10:00:00Z")).await;

        let unknown = format!("/api/sales/{}", uuid::Uuid::new_v4());
        let req = Request::builder().method("DELETE").uri(unknown).body(Body::empty()).unwrap();
        let (status, _) = call(&router, req).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, body) = call(&router, get("/api/sales")).await;
        assert_eq!(body.as_array().unwrap().len(), 1);

        let uri = format!("/api/sales/{}", sale["id"].as_str().unwrap());
        let req = Request::builder()
            .method("DELETE")
            .uri(uri)
            .header(header::ACCEPT_LANGUAGE, "fr-FR,fr;q=0.9")
            .body(Body::empty())
            .unwrap();
        let (status, body) = call(&router, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Vente supprimée avec succès");

        let (_, body) = call(&router, get("/api/sales")).await;
        assert!(body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn analytics_of_empty_ledger() {
        let router = make_router();
        let (status, body) = call(&router, get("/api/sales/analytics")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "totalSales": {}, "monthlySales": [] }));
    }

    #[tokio::test]
    async fn analytics_group_by_month() {
        let router = make_router();
        let mut january = jeans("2024-01-05T10:00:00Z");
        january["salePrice"] = json!(100);
        let mut february = jeans("2024-02-10T10:00:00Z");
        february["salePrice"] = json!(200);
        create(&router, february).await;
        create(&router, january).await;

        let (status, body) = call(&router, get("/api/sales/analytics")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalSales"]["totalRevenue"], 300.0);
        assert_eq!(body["totalSales"]["totalSales"], 2);
        assert_eq!(body["monthlySales"][0]["month"], "2024-01");
        assert_eq!(body["monthlySales"][0]["monthlyRevenue"], 100.0);
        assert_eq!(body["monthlySales"][1]["month"], "2024-02");
        assert_eq!(body["monthlySales"][1]["monthlyRevenue"], 200.0);
    }

    #[tokio::test]
    async fn summary_of_empty_ledger_has_zero_percentage() {
        let router = make_router();
        let (status, body) = call(&router, get("/api/sales/summary")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalQuantity"], 0);
        assert_eq!(body["totalMarginPercentage"], "0.00");
    }

    #[tokio::test]
    async fn create_accepts_the_new_sale_form_payload() {
        // O formulário manda `customer` e também `client`
        let router = make_router();
        let sale = create(
            &router,
            json!({
                "product": "Jeans",
                "quantity": 1,
                "salePrice": 10,
                "unitCost": 2,
                "customer": "Alice",
                "paymentMethod": "cash",
                "paymentStatus": "pending",
                "notes": "",
                "client": "Alice"
            }),
        )
        .await;
        assert_eq!(sale["client"], "Alice");
        assert_eq!(sale["margin"], 8.0);
    }

    #[tokio::test]
    async fn listed_row_can_be_sent_back_as_update() {
        let router = make_router();
        create(&router, jeans("2024-01-05T10:00:00Z")).await;
        let (_, body) = call(&router, get("/api/sales")).await;
        let mut row = body[0].clone();
        row["quantity"] = json!(3);

        let uri = format!("/api/sales/{}", row["id"].as_str().unwrap());
        let (status, updated) = call(&router, json_request("PUT", &uri, row)).await;
        assert_eq!(status, StatusCode::OK, "{updated}");
        assert_eq!(updated["margin"], 25.0);
        assert_eq!(updated["status"], "Pending");
    }

    #[tokio::test]
    async fn update_with_null_notes_clears_them() {
        let router = make_router();
        let mut body = jeans("2024-01-05T10:00:00Z");
        body["notes"] = json!("à livrer");
        let sale = create(&router, body).await;
        let uri = format!("/api/sales/{}", sale["id"].as_str().unwrap());

        let (status, updated) = call(&router, json_request("PUT", &uri, json!({ "notes": null }))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(updated["notes"].is_null());
    }

    #[tokio::test]
    async fn unrepresentable_margin_is_400() {
        let router = make_router();
        let mut body = jeans("2024-01-05T10:00:00Z");
        body["unitCost"] = json!(1e28);
        body["quantity"] = json!(100);
        let (status, body) = call(&router, json_request("POST", "/api/sales", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid request body.");

        let (_, body) = call(&router, get("/api/sales")).await;
        assert!(body.as_array().unwrap().is_empty());
    }
}
