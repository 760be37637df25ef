//! # Shared Constants
//!
//! This module provides a centralized location for constants that are shared
//! between the `admitbot` library and the `admitbot-server`. Several of these
//! are user-visible strings that clients match on, so they live here rather
//! than inline at their call sites.

/// The default path of the pre-extracted admissions policy text.
pub const DEFAULT_DOCUMENT_PATH: &str = "pdf-content.txt";

/// The sentence the model is told to use for questions the document cannot
/// answer. It doubles as the local answer when the model returns no content.
pub const REFUSAL_SENTENCE: &str =
    "This information is not available in the GIKI admissions policy document.";

/// Sent to a WhatsApp user when their question could not be answered or
/// delivered.
pub const WHATSAPP_FALLBACK_MESSAGE: &str =
    "Sorry—having trouble replying right now. Please try again.";

/// The maximum number of characters in a single outbound WhatsApp text message.
pub const WHATSAPP_MAX_CHUNK_CHARS: usize = 4000;

// --- Completion endpoint defaults ---

/// Groq's OpenAI-compatible chat completions endpoint.
pub const DEFAULT_COMPLETION_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

pub const DEFAULT_COMPLETION_MODEL: &str = "llama-3.3-70b-versatile";

pub const COMPLETION_TEMPERATURE: f32 = 0.7;

pub const COMPLETION_MAX_TOKENS: u32 = 1000;

// --- WhatsApp Cloud API defaults ---

/// The versioned Graph API base used for outbound messages.
pub const DEFAULT_WHATSAPP_API_URL: &str = "https://graph.facebook.com/v21.0";
