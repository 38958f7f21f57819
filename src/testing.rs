//! Test doubles shared by unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::agent::{Agent, AgentAnswer, AgentError, ConversationMemory};
use crate::llm::{ChatMessage, ChatResponse, FunctionCall, LlmClient, ToolCall, ToolDefinition};

pub fn text_response(content: &str) -> ChatResponse {
    ChatResponse {
        content: Some(content.to_string()),
        ..Default::default()
    }
}

pub fn tool_call_response(id: &str, name: &str, arguments: &str) -> ChatResponse {
    ChatResponse {
        content: None,
        tool_calls: Some(vec![ToolCall {
            id: id.to_string(),
            call_type: "function".to_string(),
            function: FunctionCall {
                name: name.to_string(),
                arguments: arguments.to_string(),
            },
        }]),
        usage: None,
    }
}

/// LLM that replays a fixed script of responses and records every request.
pub struct ScriptedLlm {
    script: Mutex<VecDeque<anyhow::Result<ChatResponse>>>,
    requests: Mutex<Vec<(Vec<ChatMessage>, Vec<String>)>>,
}

impl ScriptedLlm {
    pub fn new(script: Vec<anyhow::Result<ChatResponse>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Messages sent with the `n`th request.
    pub fn request(&self, n: usize) -> Vec<ChatMessage> {
        self.requests.lock().unwrap()[n].0.clone()
    }

    /// Tool names advertised with the `n`th request.
    pub fn tool_names(&self, n: usize) -> Vec<String> {
        self.requests.lock().unwrap()[n].1.clone()
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn chat_completion(
        &self,
        _model: &str,
        messages: &[ChatMessage],
        tools: Option<&[ToolDefinition]>,
    ) -> anyhow::Result<ChatResponse> {
        let names = tools
            .unwrap_or_default()
            .iter()
            .map(|t| t.function.name.clone())
            .collect();
        self.requests
            .lock()
            .unwrap()
            .push((messages.to_vec(), names));
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(anyhow::anyhow!("script exhausted")))
    }
}

/// Canned behaviour of [`StubAgent`] for one prompt.
#[derive(Debug, Clone)]
pub enum StubReply {
    Answer(String),
    Fail,
    Hang,
}

/// Agent answering by exact prompt match; unknown prompts fail.
#[derive(Default)]
pub struct StubAgent {
    replies: HashMap<String, StubReply>,
    seen: Mutex<Vec<(String, usize)>>,
}

impl StubAgent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, prompt: &str, reply: StubReply) -> Self {
        self.replies.insert(prompt.to_string(), reply);
        self
    }

    pub fn answer(self, prompt: &str, text: &str) -> Self {
        self.reply(prompt, StubReply::Answer(text.to_string()))
    }

    /// Prompts received so far with the history length seen for each.
    pub fn seen(&self) -> Vec<(String, usize)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Agent for StubAgent {
    async fn run(
        &self,
        prompt: &str,
        history: &ConversationMemory,
    ) -> Result<AgentAnswer, AgentError> {
        self.seen
            .lock()
            .unwrap()
            .push((prompt.to_string(), history.len()));

        match self.replies.get(prompt).cloned() {
            Some(StubReply::Answer(text)) => Ok(AgentAnswer::text(text)),
            Some(StubReply::Hang) => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Err(AgentError::MaxIterations(0))
            }
            Some(StubReply::Fail) | None => Err(AgentError::Llm(anyhow::anyhow!("stub failure"))),
        }
    }
}
