use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Form, Json, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::generate::{dispatch, PlanGenerator};
use crate::profile::{ProfileForm, UserProfile};

pub mod page;

/// Shared handler state; the generator is built once at startup
#[derive(Clone)]
pub struct AppState {
    generator: Arc<dyn PlanGenerator>,
}

impl AppState {
    pub fn new(generator: Arc<dyn PlanGenerator>) -> Self {
        Self { generator }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(show_form).post(submit_form))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Meal planner listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Meal planner shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

async fn show_form() -> Html<String> {
    Html(page::render(&UserProfile::default(), None))
}

async fn submit_form(State(state): State<AppState>, Form(form): Form<ProfileForm>) -> Response {
    let profile = match UserProfile::try_from(form) {
        Ok(profile) => profile,
        Err(e) => {
            warn!("Rejected form submission: {}", e);
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };

    let plan = dispatch(state.generator.as_ref(), &profile).await;
    Html(page::render(&profile, Some(&plan))).into_response()
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::tests::FakeGenerator;
    use crate::generate::GenerationError;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use tower::ServiceExt;

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn post_form(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_get_renders_form_without_calling_generator() {
        let generator = Arc::new(FakeGenerator::ok("unused"));
        let app = router(AppState::new(generator.clone()));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Generate Meal Plan"));
        assert!(generator.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_renders_plan() {
        let generator = Arc::new(FakeGenerator::ok("**Breakfast**: porridge"));
        let app = router(AppState::new(generator.clone()));

        let response = app
            .oneshot(post_form("age=25&weight=70&height=170&condition=None"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("<div class=\"plan\">**Breakfast**: porridge</div>"));

        let prompts = generator.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Age: 25, Weight: 70 kg, Height: 170 cm."));
    }

    #[tokio::test]
    async fn test_submit_clamps_and_keeps_symptoms_for_other() {
        let generator = Arc::new(FakeGenerator::ok("plan"));
        let app = router(AppState::new(generator.clone()));

        let response = app
            .oneshot(post_form(
                "age=400&weight=70&height=170&condition=Other&symptoms=fatigue%2C+thirst",
            ))
            .await
            .unwrap();

        let html = body_text(response).await;
        assert!(html.contains("value=\"120\""));
        assert!(html.contains("fatigue, thirst</textarea>"));

        let prompts = generator.prompts.lock().unwrap();
        assert!(prompts[0].contains("Condition: Other, Symptoms: fatigue, thirst"));
    }

    #[tokio::test]
    async fn test_submit_shows_error_without_partial_content() {
        let generator = Arc::new(FakeGenerator::failing("no candidates"));
        let app = router(AppState::new(generator));

        let response = app
            .oneshot(post_form("age=25&weight=70&height=170&condition=Diabetes"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        let expected = format!(
            "An error occurred: {}",
            GenerationError::Malformed("no candidates".to_string())
        );
        assert!(html.contains(&format!("{}</div>", page::escape_html(&expected))));
        assert!(!html.contains("class=\"plan\""));
    }

    #[tokio::test]
    async fn test_unknown_condition_is_bad_request() {
        let generator = Arc::new(FakeGenerator::ok("plan"));
        let app = router(AppState::new(generator.clone()));

        let response = app
            .oneshot(post_form("age=25&condition=Gout"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(generator.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = router(AppState::new(Arc::new(FakeGenerator::ok("plan"))));

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, r#"{"status":"healthy"}"#);
    }
}
