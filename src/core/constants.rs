//! Shared constants used across the application

/// Inference endpoint every turn is POSTed to. There is deliberately no
/// flag or environment override; the client speaks to exactly one backend.
pub const INFER_ENDPOINT: &str = "https://chat-bot-backend-pfvc.onrender.com/mcp/infer";

/// Bot text substituted when a 2xx reply carries no usable `response` field.
pub const NO_REPLY_FALLBACK: &str = "No response from server";

/// Bot text shown when the request fails outright (transport error or
/// non-2xx status).
pub const CONNECT_WARNING: &str = "⚠️ Could not connect to the AI server. Is it running?";

/// File name of the conversation snapshot inside the platform data dir.
pub const HISTORY_FILE: &str = "messages.json";

/// File name of the tracing log inside the platform data dir.
pub const LOG_FILE: &str = "parley.log";

/// Transcript placeholder while the conversation is empty.
pub const EMPTY_PLACEHOLDER: &str = "💬 Start a conversation...";

/// Transcript line shown while a turn is in flight.
pub const TYPING_INDICATOR: &str = "🤖 AI is typing...";

/// Input box placeholder text.
pub const INPUT_PLACEHOLDER: &str = "Type your message...";
