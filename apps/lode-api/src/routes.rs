use axum::{
	Json, Router,
	extract::{State, rejection::JsonRejection},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::Serialize;

use crate::state::AppState;
use lode_service::{
	ConversationItem, Error, GlobalSearchResult, KnowledgeItemView, MessageItem, SearchRequest,
	SearchResultSet, SemanticSearchRequest,
};

type Payload<T> = Result<Json<T>, JsonRejection>;
type ApiResult<T> = Result<Json<T>, ApiError>;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/search/conversations", post(search_conversations))
		.route("/v1/search/messages", post(search_messages))
		.route("/v1/search/knowledge", post(search_knowledge))
		.route("/v1/search/knowledge/semantic", post(search_knowledge_semantic))
		.route("/v1/search/global", post(search_global))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn search_conversations(
	State(state): State<AppState>,
	payload: Payload<SearchRequest>,
) -> ApiResult<SearchResultSet<ConversationItem>> {
	let Json(req) = payload?;

	Ok(Json(state.service.search_conversations(req).await?))
}

async fn search_messages(
	State(state): State<AppState>,
	payload: Payload<SearchRequest>,
) -> ApiResult<SearchResultSet<MessageItem>> {
	let Json(req) = payload?;

	Ok(Json(state.service.search_messages(req).await?))
}

async fn search_knowledge(
	State(state): State<AppState>,
	payload: Payload<SearchRequest>,
) -> ApiResult<SearchResultSet<KnowledgeItemView>> {
	let Json(req) = payload?;

	Ok(Json(state.service.search_knowledge_full_text(req).await?))
}

async fn search_knowledge_semantic(
	State(state): State<AppState>,
	payload: Payload<SemanticSearchRequest>,
) -> ApiResult<SearchResultSet<KnowledgeItemView>> {
	let Json(req) = payload?;

	Ok(Json(state.service.search_knowledge_semantic(req).await?))
}

async fn search_global(
	State(state): State<AppState>,
	payload: Payload<SearchRequest>,
) -> ApiResult<GlobalSearchResult> {
	let Json(req) = payload?;

	Ok(Json(state.service.search_global(req).await?))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: &'static str,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: &'static str,
	message: String,
}
impl ApiError {
	fn new(status: StatusCode, error_code: &'static str, message: impl Into<String>) -> Self {
		Self { status, error_code, message: message.into() }
	}
}
impl From<JsonRejection> for ApiError {
	fn from(rejection: JsonRejection) -> Self {
		Self::new(StatusCode::BAD_REQUEST, "invalid_request", rejection.body_text())
	}
}
impl From<Error> for ApiError {
	fn from(err: Error) -> Self {
		match err {
			Error::Provider(err) => {
				tracing::error!(error = %err, "Embedding provider failed.");

				Self::new(StatusCode::BAD_GATEWAY, "provider_error", "Embedding provider failed.")
			},
			Error::Storage(err) => {
				tracing::error!(error = %err, "Search storage failed.");

				Self::new(
					StatusCode::INTERNAL_SERVER_ERROR,
					"storage_error",
					"Search storage is unavailable.",
				)
			},
		}
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}
