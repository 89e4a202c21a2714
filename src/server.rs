use crate::{
    config::Config,
    errors::{into_response, AppError},
    manager::FileManager,
    mcp::{
        registry::{CallRequest, CallResponse, ToolRegistry},
        types::{Capabilities, ErrorObj, ToolInfo},
    },
    security,
};
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<Config>,
    pub manager: Arc<FileManager>,
    pub registry: Arc<ToolRegistry>,
}

impl AppState {
    pub fn new(cfg: Config, manager: FileManager) -> Self {
        let manager = Arc::new(manager);
        let registry = ToolRegistry::new(manager.clone());
        Self { cfg: Arc::new(cfg), manager, registry: Arc::new(registry) }
    }
}

pub async fn serve(state: AppState) -> anyhow::Result<()> {
    let addr: std::net::SocketAddr =
        format!("{}:{}", state.cfg.server.bind_addr, state.cfg.server.port).parse()?;
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(shared: AppState) -> Router {
    let base = shared.cfg.server.base_path.clone();
    use tower_http::limit::RequestBodyLimitLayer;
    let limit_bytes = shared.cfg.limits.max_request_kb * 1024;
    Router::new()
        .route("/healthz", get(health))
        .route(&format!("{base}/capabilities"), get(capabilities))
        .route(
            &format!("{base}/call"),
            post(call).layer(RequestBodyLimitLayer::new(limit_bytes)),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}

async fn health(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    match authorize(&state, &headers) {
        Ok(()) => (StatusCode::OK, Json(json!({"status":"ok"}))).into_response(),
        Err(e) => into_response(e).into_response(),
    }
}

async fn capabilities(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Err(e) = authorize(&state, &headers) {
        return into_response(e).into_response();
    }
    let tools: Vec<ToolInfo> = state
        .registry
        .list_names()
        .into_iter()
        .filter_map(|n| {
            let caps = state.registry.get(&n)?.capabilities();
            Some(ToolInfo {
                name: n,
                input_schema: caps["input"].clone(),
                output_schema: caps["output"].clone(),
            })
        })
        .collect();
    let limits = state.manager.limits();
    let caps = Capabilities {
        version: env!("CARGO_PKG_VERSION"),
        tools,
        items_per_page: limits.items_per_page,
        max_preview_lines: limits.max_preview_lines,
        protected_files: state.manager.policy().names().map(str::to_string).collect(),
    };
    (StatusCode::OK, Json(caps)).into_response()
}

async fn call(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CallRequest>,
) -> Response {
    let audit = Audit {
        sessions: state.manager.sessions().count(),
        request_id: uuid::Uuid::new_v4().to_string(),
        identity: req.identity.clone(),
        tool: req.tool.clone(),
        started: std::time::Instant::now(),
    };

    if let Err(e) = authorize(&state, &headers)
        .and_then(|()| security::content_length_ok(&headers, state.cfg.limits.max_request_kb))
    {
        audit.end("deny", e.code());
        return into_response(e).into_response();
    }

    let Some(tool) = state.registry.get(&req.tool) else {
        audit.end("deny", AppError::NotFound.code());
        return into_response(AppError::NotFound).into_response();
    };

    match tool.call(&req.identity, req.params).await {
        Ok(result) => {
            audit.end("allow", "OK");
            let body = CallResponse { id: req.id, result: Some(result), error: None };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            audit.end("error", e.code());
            let status = e.status();
            let body = CallResponse {
                id: req.id,
                result: None,
                error: Some(ErrorObj { code: e.code().to_string(), message: e.to_string() }),
            };
            (status, Json(body)).into_response()
        }
    }
}

struct Audit {
    sessions: usize,
    request_id: String,
    identity: String,
    tool: String,
    started: std::time::Instant,
}

impl Audit {
    fn end(&self, decision: &str, code: &str) {
        tracing::info!(
            request_id = %self.request_id,
            identity = %self.identity,
            tool = %self.tool,
            decision = decision,
            code = code,
            sessions = self.sessions,
            duration_ms = self.started.elapsed().as_millis() as u64,
            "audit"
        );
    }
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), AppError> {
    security::require_bearer(headers, &state.cfg.auth.bearer_token)?;
    security::check_origin(headers, &state.cfg.auth.allowed_origins)?;
    Ok(())
}
