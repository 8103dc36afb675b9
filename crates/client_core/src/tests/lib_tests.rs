use super::*;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use shared::{Embarked, PassengerClass, Sex};
use tokio::{
    net::TcpListener,
    sync::{oneshot, Mutex},
};

#[derive(Clone)]
struct ServerState {
    tx: Arc<Mutex<Option<oneshot::Sender<CapturedRequest>>>>,
    status: StatusCode,
    body: &'static str,
}

struct CapturedRequest {
    content_type: Option<String>,
    body: serde_json::Value,
}

async fn handle_predict(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> impl IntoResponse {
    if let Some(tx) = state.tx.lock().await.take() {
        let content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let _ = tx.send(CapturedRequest { content_type, body });
    }
    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body,
    )
}

async fn spawn_prediction_server(
    status: StatusCode,
    body: &'static str,
) -> Result<(String, oneshot::Receiver<CapturedRequest>)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let (tx, rx) = oneshot::channel();
    let state = ServerState {
        tx: Arc::new(Mutex::new(Some(tx))),
        status,
        body,
    };
    let app = Router::new()
        .route("/api/predict", post(handle_predict))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}"), rx))
}

fn client_for(base_url: String) -> PredictionClient {
    PredictionClient::new(&ClientSettings {
        api_base_url: base_url,
    })
    .expect("client")
}

fn sample_passenger() -> Passenger {
    Passenger {
        pclass: PassengerClass::First,
        name: "Cumings, Mrs. John Bradley".to_string(),
        sex: Sex::Female,
        age: 38.0,
        sib_sp: 1,
        parch: 0,
        fare: 71.2833,
        embarked: Embarked::Cherbourg,
    }
}

#[tokio::test]
async fn posts_passenger_json_and_decodes_prediction() {
    let (server_url, request_rx) =
        spawn_prediction_server(StatusCode::OK, r#"{"survived":1,"predicted_value":0.83}"#)
            .await
            .expect("spawn server");
    let client = client_for(server_url);

    let prediction = client
        .predict(&sample_passenger())
        .await
        .expect("prediction");
    assert_eq!(
        prediction,
        Prediction {
            survived: 1,
            predicted_value: 0.83,
        }
    );

    let captured = request_rx.await.expect("captured request");
    assert_eq!(captured.content_type.as_deref(), Some("application/json"));
    assert_eq!(
        captured.body,
        serde_json::json!({
            "Pclass": 1,
            "Name": "Cumings, Mrs. John Bradley",
            "Sex": "female",
            "Age": 38.0,
            "SibSp": 1,
            "Parch": 0,
            "Fare": 71.2833,
            "Embarked": "C",
        })
    );
}

#[tokio::test]
async fn negative_survival_label_renders_as_did_not_survive() {
    let (server_url, _request_rx) = spawn_prediction_server(
        StatusCode::OK,
        r#"{"survived":-1,"predicted_value":-0.61}"#,
    )
    .await
    .expect("spawn server");

    let prediction = client_for(server_url)
        .predict(&sample_passenger())
        .await
        .expect("prediction");
    assert_eq!(prediction.survived, -1);
    assert_eq!(prediction.outcome_label(), "Did Not Survive");
    assert_eq!(prediction.confidence_readout(), "61.0%");
}

#[tokio::test]
async fn non_success_status_is_a_request_failure() {
    let (server_url, _request_rx) = spawn_prediction_server(
        StatusCode::INTERNAL_SERVER_ERROR,
        r#"{"detail":"model exploded"}"#,
    )
    .await
    .expect("spawn server");

    let err = client_for(server_url)
        .predict(&sample_passenger())
        .await
        .expect_err("must fail");
    assert_eq!(err, PredictionError::RequestFailure { status: 500 });
    assert_eq!(err.user_message(), "Failed to get prediction");
}

#[tokio::test]
async fn undecodable_body_is_reported_with_its_cause() {
    let (server_url, _request_rx) =
        spawn_prediction_server(StatusCode::OK, r#"{"survived":"maybe"}"#)
            .await
            .expect("spawn server");

    let err = client_for(server_url)
        .predict(&sample_passenger())
        .await
        .expect_err("must fail");
    assert!(matches!(err, PredictionError::Decode { .. }));
    assert!(
        err.user_message()
            .starts_with("invalid prediction response payload"),
        "unexpected message: {}",
        err.user_message()
    );
}

#[tokio::test]
async fn unreachable_backend_surfaces_transport_message() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let err = client_for(format!("http://{addr}"))
        .predict(&sample_passenger())
        .await
        .expect_err("must fail");
    assert!(matches!(err, PredictionError::Transport { .. }));
    assert_eq!(err.user_message(), err.to_string());
    assert!(!err.user_message().is_empty());
}

#[test]
fn user_message_falls_back_for_empty_or_unknown_failures() {
    assert_eq!(PredictionError::transport("X").user_message(), "X");
    assert_eq!(
        PredictionError::transport("  ").user_message(),
        "An error occurred"
    );
    assert_eq!(PredictionError::Unknown.user_message(), "An error occurred");
}

#[test]
fn client_targets_configured_endpoint() {
    let client = client_for("http://predictor.internal:8080".to_string());
    assert_eq!(
        client.endpoint().as_str(),
        "http://predictor.internal:8080/api/predict"
    );
}
