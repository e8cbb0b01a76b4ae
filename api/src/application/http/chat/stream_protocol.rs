//! Line framing of the `/api/chat` data stream.
//!
//! Every line is `<type>:<json>\n`: `0` carries a text delta, `3` an error
//! message and `d` closes the stream.

use serde_json::{Value, json};

pub const DATA_STREAM_HEADER: &str = "x-vercel-ai-data-stream";
pub const DATA_STREAM_VERSION: &str = "v1";

pub fn text_part(chunk: &str) -> String {
    format!("0:{}\n", Value::String(chunk.to_string()))
}

pub fn error_part(message: &str) -> String {
    format!("3:{}\n", Value::String(message.to_string()))
}

pub fn finish_part() -> String {
    format!("d:{}\n", json!({ "finishReason": "stop" }))
}

/// Payload of one `/api/chat/sse` event.
pub fn delta_event(chunk: &str) -> String {
    json!({ "delta": chunk }).to_string()
}

pub fn error_event(message: &str) -> String {
    json!({ "error": message }).to_string()
}
