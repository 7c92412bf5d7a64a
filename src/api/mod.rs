use serde::{Deserialize, Serialize};

/// Request body for one inference turn. Only the current prompt is sent;
/// no conversation history travels to the server.
#[derive(Serialize)]
pub struct InferRequest<'a> {
    pub prompt: &'a str,
}

/// Expected reply payload. The `response` field is optional because the
/// backend is not trusted to honor the shape; absence is tolerated and
/// mapped to a fixed fallback by the caller.
#[derive(Deserialize)]
pub struct InferResponse {
    pub response: Option<String>,
}
