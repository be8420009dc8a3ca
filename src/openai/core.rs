//! Client for OpenAI compatible chat completion APIs. Completions are
//! always requested with temperature 0 so the same transcript produces
//! the same reply.
use std::time::Duration;

use anyhow::{Error, Result, anyhow, bail};
use futures_util::StreamExt;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::mpsc;

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub enum Role {
    #[serde(rename = "system")]
    System,
    #[serde(rename = "assistant")]
    Assistant,
    #[serde(rename = "user")]
    User,
}

/// One role-tagged message in a conversation. Role and content are
/// fixed at creation.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: &str) -> Self {
        Message {
            role,
            content: content.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct Completion {
    choices: Vec<CompletionChoice>,
}

/// Request the next completion for `messages` and return the full
/// reply text once the API has produced all of it.
pub async fn completion(
    messages: &[Message],
    api_hostname: &str,
    api_key: &str,
    model: &str,
) -> Result<String, Error> {
    let payload = json!({
        "model": model,
        "messages": messages,
        "temperature": 0,
    });
    let url = format!("{}/v1/chat/completions", api_hostname.trim_end_matches("/"));
    let response = reqwest::Client::new()
        .post(url)
        .bearer_auth(api_key)
        .header("Content-Type", "application/json")
        .timeout(Duration::from_secs(60 * 10))
        .json(&payload)
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        bail!("Completion request failed with {}: {}", status, body);
    }

    let completion: Completion = response.json().await?;
    completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| anyhow!("No message content in completion response"))
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Delta {
    Content { content: String },

    // Role announcements and the final empty delta carry no content
    Stop {},
}

#[derive(Debug, Deserialize)]
struct CompletionChunkChoice {
    delta: Delta,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CompletionChunk {
    choices: Vec<CompletionChunkChoice>,
}

/// Request the next completion for `messages` with streaming delivery.
/// Each text fragment is sent on `tx` the moment it arrives and the
/// concatenation of all fragments is returned when the stream ends.
/// The fragment sequence is consumed exactly once; a dropped receiver
/// does not interrupt the request.
pub async fn completion_stream(
    tx: mpsc::UnboundedSender<String>,
    messages: &[Message],
    api_hostname: &str,
    api_key: &str,
    model: &str,
) -> Result<String, Error> {
    let payload = json!({
        "model": model,
        "messages": messages,
        "temperature": 0,
        "stream": true,
    });
    let url = format!("{}/v1/chat/completions", api_hostname.trim_end_matches("/"));
    let response = reqwest::Client::new()
        .post(url)
        .bearer_auth(api_key)
        .header("Content-Type", "application/json")
        .timeout(Duration::from_secs(60 * 5))
        .json(&payload)
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        bail!("Completion request failed with {}: {}", status, body);
    }

    let mut stream = response.bytes_stream();

    let mut content_buf = String::new();
    let mut buffer = String::new();

    'outer: while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        let chunk_str = std::str::from_utf8(&chunk)?;

        // Append new data to buffer. This is necessary to handle SSE
        // fragmentation over HTTP/2 frames.
        buffer.push_str(chunk_str);

        // Process all complete SSE events from the buffer
        while let Some(event_end) = buffer.find("\n\n") {
            let event_data = buffer[..event_end].to_string();
            buffer = buffer[event_end + 2..].to_string();

            let event_data = event_data.trim();
            if event_data.is_empty() {
                continue;
            }

            if !event_data.starts_with("data: ") {
                continue;
            }

            // Extract the JSON payload (after "data: ")
            let data = event_data[6..].trim();
            if data.is_empty() {
                continue;
            }

            // Handle the end of the stream
            if data == "[DONE]" {
                break 'outer;
            }

            let chunk = serde_json::from_str::<CompletionChunk>(data).inspect_err(|e| {
                tracing::error!("Parsing completion chunk failed for {}\nError: {}", data, e)
            })?;
            let Some(choice) = chunk.choices.first() else {
                continue;
            };

            if let Delta::Content { content } = &choice.delta {
                content_buf += content;
                // The result is ignored here because the request should
                // run to completion even if the receiver went away
                let _ = tx.send(content.clone());
            }

            if choice.finish_reason.is_some() {
                break 'outer;
            }
        }
    }

    Ok(content_buf)
}
