use axum::{response::IntoResponse, Json};

pub async fn health_checker_handler() -> impl IntoResponse {
    const MESSAGE: &str = "Uppye auth service is running!";

    let json_response = serde_json::json!({
        "status": "success",
        "message": MESSAGE,
        "version": env!("CARGO_PKG_VERSION"),
    });

    Json(json_response)
}
