//! Request handler: looks up every category for one company.

use std::sync::Arc;

use thiserror::Error;
use tracing::Instrument;
use uuid::Uuid;

use crate::agent::{ConversationMemory, ToolAgent};
use crate::config::Config;

use super::category::InfoCategory;
use super::fetcher::InfoFetcher;
use super::report::CompanyReport;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("company_name must not be empty")]
    EmptyCompanyName,
}

/// Builds a [`CompanyReport`] by asking the fetcher about each category in turn.
pub struct CompanyResearcher {
    fetcher: InfoFetcher,
    memory_window: usize,
}

impl CompanyResearcher {
    pub fn new(fetcher: InfoFetcher, memory_window: usize) -> Self {
        Self {
            fetcher,
            memory_window,
        }
    }

    /// Researcher backed by the configured model and web search.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let agent = Arc::new(ToolAgent::from_config(config)?);
        let fetcher = InfoFetcher::new(agent, config.category_timeout);
        Ok(Self::new(fetcher, config.memory_window))
    }

    /// Look up all categories for `company_name`.
    ///
    /// Categories run sequentially in reporting order and share a memory
    /// scoped to this call. A category that yields nothing reports the
    /// placeholder; only an empty company name is an error.
    pub async fn research(&self, company_name: &str) -> Result<CompanyReport, LookupError> {
        let company_name = company_name.trim();
        if company_name.is_empty() {
            return Err(LookupError::EmptyCompanyName);
        }

        let span = tracing::info_span!(
            "research",
            request_id = %Uuid::new_v4(),
            company = company_name
        );

        async move {
            tracing::info!("Starting company research");

            let mut memory = ConversationMemory::new(self.memory_window);
            let mut report = CompanyReport::new(company_name);

            for category in InfoCategory::all() {
                let answer = self.fetcher.fetch(company_name, category, &mut memory).await;
                if answer.is_none() {
                    tracing::info!(%category, "No answer, using placeholder");
                }
                report.insert(category, answer);
            }

            tracing::info!(
                found = report.found_count(),
                total = report.len(),
                "Company research finished"
            );
            Ok(report)
        }
        .instrument(span)
        .await
    }
}
