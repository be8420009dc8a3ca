//! Router for the chat API

use std::convert::Infallible;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, sse::Event, sse::KeepAlive, sse::Sse},
    routing::{get, post},
};
use tokio::sync::mpsc;
use tokio_stream::StreamExt as _;
use tokio_stream::wrappers::UnboundedReceiverStream;

use super::public;
use crate::api::state::AppState;
use crate::chat::Chat;
use crate::core::AppConfig;

type SharedState = Arc<RwLock<AppState>>;

/// Get the transcript of a single chat session by ID
async fn chat_session(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, crate::api::public::ApiError> {
    let transcript = {
        let shared_state = state.read().expect("Unable to read shared state");
        shared_state.sessions.get(&id).map(|t| t.messages())
    };

    let Some(transcript) = transcript else {
        return Ok((
            StatusCode::NOT_FOUND,
            format!("Chat session {} not found", id),
        )
            .into_response());
    };

    Ok(axum::Json(public::ChatTranscriptResponse { transcript }).into_response())
}

/// Initiate or add to a chat session and stream the response
async fn chat_handler(
    State(state): State<SharedState>,
    axum::Json(payload): axum::Json<public::ChatRequest>,
) -> Result<impl IntoResponse, crate::api::public::ApiError> {
    let public::ChatRequest {
        session_id,
        message,
    } = payload;

    // Reply fragments from the chat core
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    // Events to the client: fragments as unnamed data events, failures
    // as a named `error` event
    let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();

    let sse_stream =
        UnboundedReceiverStream::new(event_rx).map(|event| Ok::<Event, Infallible>(event));

    let fragment_tx = event_tx.clone();
    tokio::spawn(async move {
        while let Some(fragment) = rx.recv().await {
            let _ = fragment_tx.send(Event::default().data(fragment));
        }
    });

    let (transcript, openai_api_hostname, openai_api_key, openai_model) = {
        let shared_state = state.read().expect("Unable to read shared state");
        let AppConfig {
            openai_api_hostname,
            openai_api_key,
            openai_model,
        } = &shared_state.config;
        (
            shared_state
                .sessions
                .get(&session_id)
                .cloned()
                .unwrap_or_default(),
            openai_api_hostname.clone(),
            openai_api_key.clone(),
            openai_model.clone(),
        )
    };

    // Run the turn off the request handler so the response starts
    // streaming while the backend is still replying
    tokio::spawn(async move {
        let mut chat = Chat::builder(&openai_api_hostname, &openai_api_key, &openai_model)
            .transcript(transcript.messages())
            .streaming(tx)
            .build();

        let result = chat.send(&message).await;

        match result {
            Ok(Some(_)) => {
                // Store the extended transcript so the next turn in
                // this session replays it
                let mut shared_state = state.write().expect("Unable to write shared state");
                shared_state
                    .sessions
                    .insert(session_id, chat.transcript().clone());
            }
            // Blank input: nothing was sent and there is nothing to store
            Ok(None) => {}
            Err(e) => {
                tracing::error!("Chat handler error: {}", e);

                // The user message stays in the session even though no
                // reply arrived; the next input starts a fresh cycle
                {
                    let mut shared_state = state.write().expect("Unable to write shared state");
                    shared_state
                        .sessions
                        .insert(session_id, chat.transcript().clone());
                }

                let _ = event_tx.send(
                    Event::default()
                        .event("error")
                        .data(format!("Something went wrong: {}", e)),
                );
            }
        }
    });

    let resp = Sse::new(sse_stream)
        .keep_alive(
            KeepAlive::default()
                .text("keep-alive")
                .interval(Duration::from_millis(100)),
        )
        .into_response();

    Ok(resp)
}

/// Create the chat router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", post(chat_handler))
        .route("/{id}", get(chat_session))
}
