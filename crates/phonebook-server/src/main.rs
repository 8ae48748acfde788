//! HTTP transport for the phonebook assistant.
//!
//! Thin plumbing only: accept the utterance, hand it to the use case,
//! return the response as JSON. Startup is the one place where errors are
//! fatal (missing credentials, unreachable storage); after that, every
//! failure becomes a response body.

use std::{env, net::SocketAddr, path::Path, sync::Arc};

use axum::{
    Form, Json, Router,
    extract::State,
    http::HeaderMap,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_subscriber::EnvFilter;

use phonebook_application::QueryUseCase;
use phonebook_core::Response;
use phonebook_infrastructure::SqliteContactRepository;
use phonebook_interaction::{OpenAiInterpreter, SupportedModel};

const DEFAULT_DB_PATH: &str = "./data/contacts.db";
const DEFAULT_BIND: &str = "127.0.0.1:8080";

#[derive(Clone)]
struct AppState {
    usecase: Arc<QueryUseCase>,
    /// Base interpreter, cloned with a different model for per-request
    /// overrides.
    interpreter: OpenAiInterpreter,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let db_path = env::var("PHONEBOOK_DB_PATH").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());
    let repository = SqliteContactRepository::new(Path::new(&db_path))
        .await
        .map_err(|err| anyhow::anyhow!("failed to open contact database at {db_path}: {err}"))?;

    let interpreter = OpenAiInterpreter::try_from_env()
        .map_err(|err| anyhow::anyhow!("interpreter configuration failed: {err}"))?;

    let usecase = Arc::new(QueryUseCase::new(
        Arc::new(repository),
        Arc::new(interpreter.clone()),
    ));

    let state = AppState {
        usecase,
        interpreter,
    };

    let bind = env::var("PHONEBOOK_HTTP_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string());
    let addr: SocketAddr = bind.parse()?;

    let app = router(state);

    info!("phonebook-server listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/models", get(list_models))
        .route("/api/query", post(handle_query))
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

#[derive(Serialize)]
struct ModelsResponse {
    models: Vec<&'static str>,
}

async fn list_models() -> Json<ModelsResponse> {
    Json(ModelsResponse {
        models: SupportedModel::all().iter().map(|m| m.as_str()).collect(),
    })
}

#[derive(Deserialize)]
struct QueryForm {
    #[serde(default)]
    query_input: String,
    /// Optional model override; must be one of the supported ids.
    #[serde(default)]
    model: Option<String>,
}

async fn handle_query(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<QueryForm>,
) -> Json<Response> {
    let session_id = session_id_from_headers(&headers);

    let response = match form.model.as_deref() {
        None => {
            state
                .usecase
                .handle_query(&session_id, &form.query_input)
                .await
        }
        Some(id) => match SupportedModel::parse(id) {
            Some(model) => {
                let interpreter = state.interpreter.clone().with_model(model);
                state
                    .usecase
                    .handle_query_with(&session_id, &form.query_input, &interpreter)
                    .await
            }
            None => Response::error(
                format!("Unsupported model: {id}"),
                form.query_input.trim(),
            ),
        },
    };

    Json(response)
}

/// Session identity comes from the `x-session-id` header. Clients that do
/// not send one share the `"default"` session, so a single anonymous client
/// behaves like a single-user install.
fn session_id_from_headers(headers: &HeaderMap) -> String {
    headers
        .get("x-session-id")
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.trim().is_empty())
        .unwrap_or("default")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_defaults_when_header_missing() {
        let headers = HeaderMap::new();
        assert_eq!(session_id_from_headers(&headers), "default");
    }

    #[test]
    fn test_session_id_from_header() {
        let mut headers = HeaderMap::new();
        headers.insert("x-session-id", "alice".parse().unwrap());
        assert_eq!(session_id_from_headers(&headers), "alice");
    }

    #[test]
    fn test_blank_session_header_falls_back_to_default() {
        let mut headers = HeaderMap::new();
        headers.insert("x-session-id", "   ".parse().unwrap());
        assert_eq!(session_id_from_headers(&headers), "default");
    }

    #[tokio::test]
    async fn test_query_form_decodes_without_model() {
        let form = decode_form("query_input=Add%20John%20with%20number%20123").await;
        assert_eq!(form.query_input, "Add John with number 123");
        assert!(form.model.is_none());
    }

    #[tokio::test]
    async fn test_query_form_decodes_with_model() {
        let form = decode_form("query_input=hi&model=gpt-4o-mini").await;
        assert_eq!(form.model.as_deref(), Some("gpt-4o-mini"));
    }

    // Decode through axum's own form deserializer to stay honest about the
    // wire format.
    async fn decode_form(input: &str) -> QueryForm {
        use axum::extract::FromRequest;
        let request = axum::http::Request::builder()
            .method("POST")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(axum::body::Body::from(input.to_string()))
            .unwrap();
        let Form(form) = Form::<QueryForm>::from_request(request, &()).await.unwrap();
        form
    }
}
