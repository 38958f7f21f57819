//! Runs one category question through the agent.

use std::sync::Arc;
use std::time::Duration;

use crate::agent::{Agent, ConversationMemory};

use super::category::InfoCategory;

/// Asks the agent a single category question about a company.
pub struct InfoFetcher {
    agent: Arc<dyn Agent>,
    timeout: Duration,
}

impl InfoFetcher {
    pub fn new(agent: Arc<dyn Agent>, timeout: Duration) -> Self {
        Self { agent, timeout }
    }

    /// Answer for `category`, or `None` when the agent fails, times out or
    /// produces only whitespace. Successful exchanges are added to `memory`.
    pub async fn fetch(
        &self,
        company_name: &str,
        category: InfoCategory,
        memory: &mut ConversationMemory,
    ) -> Option<String> {
        let prompt = category.prompt(company_name);

        let answer = match tokio::time::timeout(self.timeout, self.agent.run(&prompt, memory)).await
        {
            Ok(Ok(answer)) => answer,
            Ok(Err(e)) => {
                tracing::warn!(%category, "Agent produced no answer: {}", e);
                return None;
            }
            Err(_) => {
                tracing::warn!(%category, timeout = ?self.timeout, "Category lookup timed out");
                return None;
            }
        };

        if answer.content.trim().is_empty() {
            tracing::warn!(%category, "Agent answer was empty");
            return None;
        }

        tracing::debug!(
            %category,
            iterations = answer.iterations,
            tool_calls = answer.tool_calls.len(),
            prompt_tokens = answer.usage.map(|u| u.prompt_tokens),
            completion_tokens = answer.usage.map(|u| u.completion_tokens),
            "Category answered"
        );
        memory.record(prompt, answer.content.clone());
        Some(answer.content)
    }

    /// Like [`fetch`](Self::fetch), addressing the category by its label.
    ///
    /// # Panics
    ///
    /// Panics if `label` is not one of the fixed category labels.
    pub async fn fetch_by_label(
        &self,
        company_name: &str,
        label: &str,
        memory: &mut ConversationMemory,
    ) -> Option<String> {
        let category = InfoCategory::from_label(label)
            .unwrap_or_else(|| panic!("unrecognized info category label: {:?}", label));
        self.fetch(company_name, category, memory).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{StubAgent, StubReply};

    const GENERAL_PROMPT: &str = "Tell me general information about Acme Corp.";

    fn build(agent: StubAgent, timeout: Duration) -> (InfoFetcher, Arc<StubAgent>) {
        let agent = Arc::new(agent);
        (InfoFetcher::new(agent.clone(), timeout), agent)
    }

    #[tokio::test]
    async fn returns_answer_unmodified_and_records_it() {
        let (fetcher, agent) = build(
            StubAgent::new().answer(GENERAL_PROMPT, "  Acme Corp is a...\n"),
            Duration::from_secs(5),
        );
        let mut memory = ConversationMemory::new(4);

        let answer = fetcher
            .fetch("Acme Corp", InfoCategory::GeneralInformation, &mut memory)
            .await;

        assert_eq!(answer.as_deref(), Some("  Acme Corp is a...\n"));
        assert_eq!(agent.seen(), vec![(GENERAL_PROMPT.to_string(), 0)]);
        assert_eq!(memory.len(), 1);
    }

    #[tokio::test]
    async fn failure_and_blank_answers_are_absent() {
        let (fetcher, _) = build(
            StubAgent::new()
                .reply(GENERAL_PROMPT, StubReply::Fail)
                .answer("Who is the target market of Acme Corp?", " \n\t"),
            Duration::from_secs(5),
        );
        let mut memory = ConversationMemory::new(4);

        assert!(fetcher
            .fetch("Acme Corp", InfoCategory::GeneralInformation, &mut memory)
            .await
            .is_none());
        assert!(fetcher
            .fetch("Acme Corp", InfoCategory::TargetMarket, &mut memory)
            .await
            .is_none());
        assert!(memory.is_empty());
    }

    #[tokio::test]
    async fn timeout_is_absent() {
        let (fetcher, _) = build(
            StubAgent::new().reply(GENERAL_PROMPT, StubReply::Hang),
            Duration::from_millis(50),
        );
        let mut memory = ConversationMemory::new(4);

        let answer = fetcher
            .fetch("Acme Corp", InfoCategory::GeneralInformation, &mut memory)
            .await;
        assert!(answer.is_none());
    }

    #[tokio::test]
    async fn fetch_by_label_resolves_category() {
        let (fetcher, _) = build(
            StubAgent::new().answer(GENERAL_PROMPT, "info"),
            Duration::from_secs(5),
        );
        let mut memory = ConversationMemory::new(4);

        let answer = fetcher
            .fetch_by_label("Acme Corp", "General Information", &mut memory)
            .await;
        assert_eq!(answer.as_deref(), Some("info"));
    }

    #[tokio::test]
    #[should_panic(expected = "unrecognized info category label")]
    async fn fetch_by_unknown_label_panics() {
        let (fetcher, _) = build(StubAgent::new(), Duration::from_secs(5));
        let mut memory = ConversationMemory::new(4);
        fetcher
            .fetch_by_label("Acme Corp", "Stock Price", &mut memory)
            .await;
    }
}
