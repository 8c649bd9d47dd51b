//! Voice platform skill endpoint
//!
//! Accepts the platform's request envelope and answers with the spoken
//! response plus the session attributes to echo back on the next turn.

use airvoice_core::{Skill, SkillRequest, TurnOutcome};
use axum::{extract::Extension, routing::post, Json, Router};
use std::sync::Arc;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

/// Handle one skill request (POST)
async fn handle_skill_request(
    Extension(skill): Extension<Arc<Skill>>,
    Json(request): Json<SkillRequest>,
) -> Json<TurnOutcome> {
    let request_id = Uuid::new_v4();
    info!(
        %request_id,
        session_id = %request.session.session_id,
        new_session = request.session.new,
        "Received skill request"
    );

    let outcome = skill
        .handle(&request)
        .instrument(info_span!("skill_request", %request_id))
        .await;

    Json(outcome)
}

/// Create skill routes
pub fn skill_routes() -> Router {
    Router::new().route("/api/v1/skill", post(handle_skill_request))
}

#[cfg(test)]
mod tests {
    use crate::server::build_router;
    use airvoice_core::{MemoryStore, Skill, SkillConfig};
    use airvoice_devices::{AirGradientClient, AirGradientConfig};
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> axum::Router {
        // Launch turns never reach the directory
        let directory = AirGradientClient::new(
            AirGradientConfig::default().with_base_url("http://127.0.0.1:1"),
        )
        .unwrap();
        let skill = Skill::new(
            SkillConfig::default(),
            Arc::new(directory),
            Arc::new(MemoryStore::new()),
        );
        build_router(Arc::new(skill))
    }

    fn post(body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/skill")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_launch_envelope() {
        let body = json!({
            "request": {"type": "LaunchRequest"},
            "session": {"sessionId": "s1", "new": true, "userId": "u1"}
        });

        let response = app().oneshot(post(body.to_string())).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();

        assert!(json["response"]["speechText"]
            .as_str()
            .unwrap()
            .starts_with("Hello, welcome!"));
        assert_eq!(json["response"]["repromptText"], "Please set up to continue. ");
        assert_eq!(json["response"]["shouldEndSession"], false);
        assert_eq!(json["sessionAttributes"], json!({"token": "", "device": -1}));
    }

    #[tokio::test]
    async fn test_stop_ends_session() {
        let body = json!({
            "request": {"type": "IntentRequest", "intent": {"name": "AMAZON.StopIntent"}},
            "session": {
                "sessionId": "s1",
                "userId": "u1",
                "attributes": {"token": "tok", "device": 1}
            }
        });

        let response = app().oneshot(post(body.to_string())).await.unwrap();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["response"]["shouldEndSession"], true);
        assert_eq!(json["sessionAttributes"]["device"], 1);
    }

    #[tokio::test]
    async fn test_unknown_request_type_gets_spoken_reply() {
        let body = json!({
            "request": {"type": "System.ExceptionEncountered"},
            "session": {
                "sessionId": "s1",
                "userId": "u1",
                "attributes": {"token": "", "device": -1}
            }
        });

        let response = app().oneshot(post(body.to_string())).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(
            json["response"]["speechText"],
            "Sorry, I didn't get that. Say help to hear what I can do. "
        );
        assert_eq!(json["response"]["shouldEndSession"], false);
    }

    #[tokio::test]
    async fn test_malformed_body_rejected() {
        let response = app()
            .oneshot(post("{\"request\": 42}".to_string()))
            .await
            .unwrap();
        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_health_route() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
