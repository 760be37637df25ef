pub mod groq;

use crate::errors::RelayError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// A trait for interacting with an AI provider.
///
/// This trait defines a common interface for answering a user message under a
/// system prompt, so the relay does not depend on one particular vendor.
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// Generates a response from a given system and user prompt.
    ///
    /// The result is the trimmed text of the model's reply, which may be empty.
    async fn generate(&self, system_prompt: &str, user_prompt: &str)
        -> Result<String, RelayError>;
}

dyn_clone::clone_trait_object!(AiProvider);
