//! # Admissions Policy Prompt
//!
//! The system prompt used for every question, on both the HTTP and the
//! WhatsApp surfaces. The whole policy document is interpolated verbatim.

use crate::constants::REFUSAL_SENTENCE;

/// The persona line that opens the system prompt.
pub const ADMISSIONS_PERSONA: &str = "You are a helpful assistant that answers questions based on the GIKI Undergraduate Admissions Policy document.";

/// Builds the system prompt for a question about the admissions policy.
///
/// Deterministic: the same document always yields the same prompt.
pub fn build_system_prompt(document: &str) -> String {
    format!(
        r#"{ADMISSIONS_PERSONA}

Here is the complete document content:

{document}

IMPORTANT INSTRUCTIONS:
1. Keep responses CONCISE and to the point (maximum 3-4 sentences unless specifically asked for detailed information)
2. Use clear, simple language
3. Format responses with proper line breaks and bullet points when listing multiple items
4. If the question cannot be answered from the document, say "{REFUSAL_SENTENCE}"
5. Focus on the most relevant information first
6. Use markdown formatting for better readability (use **bold** for emphasis, bullet points with - or *)

Answer the user's question based on the information provided in this document."#
    )
}
