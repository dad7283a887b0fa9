//! Chat endpoints
//!
//! `POST /api/chat` answers in one JSON document; `/api/chat/stream` (GET with query
//! parameters, or POST with a JSON body) answers as an event stream.

use crate::core::streaming::create_sse_response;
use crate::core::types::ChatInput;
use crate::server::state::AppState;
use crate::utils::truncate_string;
use actix_web::{HttpResponse, Result as ActixResult, web};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

/// Longest prompt excerpt written to the log
const LOGGED_PROMPT_CHARS: usize = 80;

/// Configure chat routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/chat")
            .route("", web::post().to(chat))
            .route("/stream", web::get().to(chat_stream_query))
            .route("/stream", web::post().to(chat_stream_json)),
    );
}

/// JSON request body; a missing or `null` prompt reads as blank
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub system: Option<String>,
    #[serde(default)]
    pub user_prompt: Option<String>,
}

impl From<ChatRequest> for ChatInput {
    fn from(request: ChatRequest) -> Self {
        ChatInput::new(request.system, request.user_prompt.unwrap_or_default())
    }
}

/// Query parameters of `GET /api/chat/stream`; the prompt may arrive under any of
/// several names
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StreamQuery {
    pub system: Option<String>,
    #[serde(rename = "userPrompt")]
    pub user_prompt: Option<String>,
    pub user: Option<String>,
    pub prompt: Option<String>,
    pub q: Option<String>,
}

impl StreamQuery {
    /// First non-blank of `userPrompt`, `user`, `prompt`, `q`
    pub fn prompt(&self) -> Option<&str> {
        [&self.user_prompt, &self.user, &self.prompt, &self.q]
            .into_iter()
            .filter_map(|value| value.as_deref())
            .find(|value| !value.trim().is_empty())
    }
}

impl From<StreamQuery> for ChatInput {
    fn from(query: StreamQuery) -> Self {
        let prompt = query.prompt().unwrap_or_default().to_string();
        ChatInput::new(query.system, prompt)
    }
}

/// Response of `POST /api/chat`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub text: String,
}

/// Whole-answer chat. A blank prompt is forwarded as-is; the backend decides what to
/// make of it.
pub async fn chat(
    state: web::Data<AppState>,
    request: web::Json<ChatRequest>,
) -> ActixResult<HttpResponse> {
    let input = ChatInput::from(request.into_inner());
    info!(
        prompt = %truncate_string(&input.user_prompt, LOGGED_PROMPT_CHARS),
        "Chat request"
    );

    let result = state.aggregator.complete(&input).await.map_err(|e| {
        error!("Chat completion error: {}", e);
        e
    })?;

    Ok(HttpResponse::Ok().json(ChatResponse { text: result.text }))
}

/// Streaming chat from query parameters
pub async fn chat_stream_query(
    state: web::Data<AppState>,
    query: web::Query<StreamQuery>,
) -> HttpResponse {
    stream_answer(&state, query.into_inner().into())
}

/// Streaming chat from a JSON body
pub async fn chat_stream_json(
    state: web::Data<AppState>,
    request: web::Json<ChatRequest>,
) -> HttpResponse {
    stream_answer(&state, request.into_inner().into())
}

/// Blank prompts still get a stream; the composer reports the problem inline.
fn stream_answer(state: &AppState, input: ChatInput) -> HttpResponse {
    info!(
        prompt = %truncate_string(&input.user_prompt, LOGGED_PROMPT_CHARS),
        "Streaming chat request"
    );
    create_sse_response(state.composer().into_sse_stream(input))
}
