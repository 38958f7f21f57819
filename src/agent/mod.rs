//! Agent module - the tool-using conversational executor.
//!
//! The agent follows a "tools in a loop" pattern:
//! 1. Build context with system prompt, prior exchanges and the question
//! 2. Call LLM with available tools
//! 3. If LLM requests tool call, execute it and feed result back
//! 4. Repeat until LLM produces final response or max iterations reached

mod agent_loop;
mod memory;
mod prompt;

pub use agent_loop::ToolAgent;
pub use memory::{ConversationMemory, Exchange};
pub use prompt::build_system_prompt;

use async_trait::async_trait;
use thiserror::Error;

use crate::llm::TokenUsage;

/// Final answer produced by an agent run.
#[derive(Debug, Clone)]
pub struct AgentAnswer {
    pub content: String,
    /// Number of model round-trips used
    pub iterations: usize,
    /// Tool calls made on the way, as `name(arguments)`
    pub tool_calls: Vec<String>,
    pub usage: Option<TokenUsage>,
}

impl AgentAnswer {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            iterations: 1,
            tool_calls: Vec::new(),
            usage: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("LLM request failed: {0}")]
    Llm(anyhow::Error),

    #[error("Max iterations ({0}) reached without a final answer")]
    MaxIterations(usize),
}

/// Something that answers a prompt, possibly by calling tools first.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Run one prompt to completion with `history` as prior context.
    async fn run(
        &self,
        prompt: &str,
        history: &ConversationMemory,
    ) -> Result<AgentAnswer, AgentError>;
}
