//! Core agent loop implementation.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::config::Config;
use crate::llm::{ChatMessage, LlmClient, OpenAiClient, Role, TokenUsage, ToolCall};
use crate::tools::ToolRegistry;

use super::memory::ConversationMemory;
use super::prompt::build_system_prompt;
use super::{Agent, AgentAnswer, AgentError};

const EMPTY_REPLY_CORRECTION: &str =
    "Your previous reply was empty. Answer the question, or call a tool if you need more information.";

/// Chat-completion agent that calls tools until the model gives a final answer.
pub struct ToolAgent {
    llm: Arc<dyn LlmClient>,
    tools: ToolRegistry,
    model: String,
    max_iterations: usize,
}

impl ToolAgent {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        tools: ToolRegistry,
        model: impl Into<String>,
        max_iterations: usize,
    ) -> Self {
        Self {
            llm,
            tools,
            model: model.into(),
            max_iterations,
        }
    }

    /// Agent wired to the configured OpenAI-compatible backend and web search.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let llm = Arc::new(OpenAiClient::new(
            config.api_key.clone(),
            config.api_base.clone(),
        )?);
        let tools = ToolRegistry::with_web_search()?;
        Ok(Self::new(
            llm,
            tools,
            config.default_model.clone(),
            config.max_iterations,
        ))
    }

    /// Execute a single tool call. Malformed arguments come back as an error
    /// for the model to read rather than aborting the loop.
    async fn execute_tool_call(&self, tool_call: &ToolCall) -> anyhow::Result<String> {
        let raw = tool_call.function.arguments.trim();
        let args: serde_json::Value = if raw.is_empty() {
            serde_json::json!({})
        } else {
            serde_json::from_str(raw).map_err(|e| {
                anyhow::anyhow!(
                    "Could not parse arguments for '{}' as JSON ({}). Retry with valid JSON arguments.",
                    tool_call.function.name,
                    e
                )
            })?
        };

        self.tools.execute(&tool_call.function.name, args).await
    }
}

#[async_trait]
impl Agent for ToolAgent {
    async fn run(
        &self,
        prompt: &str,
        history: &ConversationMemory,
    ) -> Result<AgentAnswer, AgentError> {
        let system_prompt = build_system_prompt(&self.tools, Utc::now().date_naive());
        let mut messages = Vec::with_capacity(history.len() * 2 + 2);
        messages.push(ChatMessage::system(system_prompt));
        messages.extend(history.as_messages());
        messages.push(ChatMessage::user(prompt));

        let tool_schemas = self.tools.get_tool_schemas();
        let mut tool_log = Vec::new();
        let mut usage: Option<TokenUsage> = None;

        for iteration in 0..self.max_iterations {
            tracing::debug!("Agent iteration {}", iteration + 1);

            let response = self
                .llm
                .chat_completion(&self.model, &messages, Some(&tool_schemas))
                .await
                .map_err(AgentError::Llm)?;

            if let Some(u) = response.usage {
                let acc = usage.get_or_insert_with(TokenUsage::default);
                acc.prompt_tokens += u.prompt_tokens;
                acc.completion_tokens += u.completion_tokens;
            }

            if let Some(tool_calls) = response.tool_calls.filter(|c| !c.is_empty()) {
                messages.push(ChatMessage {
                    role: Role::Assistant,
                    content: response.content.clone(),
                    tool_calls: Some(tool_calls.clone()),
                    tool_call_id: None,
                });

                for tool_call in &tool_calls {
                    tool_log.push(format!(
                        "{}({})",
                        tool_call.function.name, tool_call.function.arguments
                    ));

                    let result = match self.execute_tool_call(tool_call).await {
                        Ok(output) => output,
                        Err(e) => {
                            tracing::warn!(tool = %tool_call.function.name, "Tool call failed: {}", e);
                            format!("Error: {}", e)
                        }
                    };

                    messages.push(ChatMessage::tool_result(tool_call.id.clone(), result));
                }

                continue;
            }

            // No tool calls - this is the final response
            match response.content.filter(|c| !c.trim().is_empty()) {
                Some(content) => {
                    return Ok(AgentAnswer {
                        content,
                        iterations: iteration + 1,
                        tool_calls: tool_log,
                        usage,
                    });
                }
                None => {
                    tracing::warn!("LLM returned an empty reply, asking it to answer");
                    messages.push(ChatMessage::user(EMPTY_REPLY_CORRECTION));
                }
            }
        }

        Err(AgentError::MaxIterations(self.max_iterations))
    }
}
