//! Wire frames of the chat-completion chunk protocol

use serde::{Deserialize, Serialize};

pub const CHUNK_OBJECT: &str = "chat.completion.chunk";
pub const MODEL_NAME: &str = "testdummy-1.0";
pub const FINISH_REASON_STOP: &str = "stop";

/// Sentinel frame closing every stream
pub const DONE_FRAME: &str = "data: [DONE]\n\n";

/// Tokens sampled for chunk content. Duplicates are intentional.
pub const VOCABULARY: [&str; 23] = [
    "Hello",
    " there",
    "!",
    " How",
    " can",
    " I",
    " assist",
    " you",
    " today",
    "?",
    " I'm",
    " here",
    " to",
    " help",
    " with",
    " your",
    " questions",
    ".",
    " Feel",
    " free",
    " to",
    " ask",
    " anything",
];

/// One `chat.completion.chunk` object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatChunk {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub model: String,
    pub choices: Vec<ChunkChoice>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkChoice {
    pub index: u32,
    pub delta: ChunkDelta,
    /// Serialized as `null` on token chunks
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChunkDelta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl ChatChunk {
    fn new(id: &str, delta: ChunkDelta, finish_reason: Option<&str>) -> Self {
        Self {
            id: id.to_string(),
            object: CHUNK_OBJECT.to_string(),
            created: chrono::Utc::now().timestamp(),
            model: MODEL_NAME.to_string(),
            choices: vec![ChunkChoice {
                index: 0,
                delta,
                finish_reason: finish_reason.map(str::to_string),
            }],
        }
    }

    /// Chunk carrying a single token
    pub fn token(id: &str, token: &str) -> Self {
        Self::new(
            id,
            ChunkDelta {
                content: Some(token.to_string()),
            },
            None,
        )
    }

    /// Closing chunk with an empty delta
    pub fn finish(id: &str) -> Self {
        Self::new(id, ChunkDelta::default(), Some(FINISH_REASON_STOP))
    }

    /// Encode as a `data: <json>\n\n` frame
    pub fn to_frame(&self) -> Result<String, serde_json::Error> {
        Ok(format!("data: {}\n\n", serde_json::to_string(self)?))
    }

    /// Decode a frame produced by [`ChatChunk::to_frame`]
    pub fn from_frame(frame: &str) -> Option<Self> {
        let payload = frame.strip_prefix("data: ")?.strip_suffix("\n\n")?;
        serde_json::from_str(payload).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_frame_shape() {
        let frame = ChatChunk::token("chatcmpl-1", " help").to_frame().unwrap();
        assert!(frame.starts_with("data: {"));
        assert!(frame.ends_with("}\n\n"));

        let value: serde_json::Value =
            serde_json::from_str(frame.trim_start_matches("data: ").trim_end()).unwrap();
        assert_eq!(value["id"], "chatcmpl-1");
        assert_eq!(value["object"], CHUNK_OBJECT);
        assert_eq!(value["model"], MODEL_NAME);
        assert_eq!(value["choices"][0]["index"], 0);
        assert_eq!(value["choices"][0]["delta"]["content"], " help");
        assert!(value["choices"][0]["finish_reason"].is_null());
        assert!(value["choices"][0].as_object().unwrap().contains_key("finish_reason"));
    }

    #[test]
    fn test_finish_frame_has_empty_delta() {
        let frame = ChatChunk::finish("chatcmpl-1").to_frame().unwrap();
        let value: serde_json::Value =
            serde_json::from_str(frame.trim_start_matches("data: ").trim_end()).unwrap();

        assert_eq!(value["choices"][0]["delta"], serde_json::json!({}));
        assert_eq!(value["choices"][0]["finish_reason"], "stop");
    }

    #[test]
    fn test_from_frame_rejects_sentinel() {
        assert!(ChatChunk::from_frame(DONE_FRAME).is_none());
        assert!(ChatChunk::from_frame("garbage").is_none());
    }

    #[test]
    fn test_vocabulary_has_no_empty_tokens() {
        assert_eq!(VOCABULARY.len(), 23);
        assert!(VOCABULARY.iter().all(|token| !token.is_empty()));
    }
}
