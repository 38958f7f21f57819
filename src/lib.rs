//! # Company Lookup
//!
//! Answers a fixed set of questions about a company by asking a tool-using
//! LLM agent that can search the web.
//!
//! This library provides:
//! - An HTTP API that accepts a company name and returns one answer per category
//! - A tool-based agent loop over an OpenAI-compatible chat-completions backend
//! - A web search tool backed by DuckDuckGo
//!
//! ## Architecture
//!
//! For each information category, in a fixed order:
//! 1. Render the category's question for the company
//! 2. Run it through the agent, which may search before answering
//! 3. Store the answer, or a placeholder if none was produced
//!
//! Conversation memory lives for one request only, so later categories see
//! earlier answers about the same company and nothing else.
//!
//! ## Example
//!
//! ```rust,ignore
//! use company_lookup::{config::Config, research::CompanyResearcher};
//!
//! let config = Config::from_env()?;
//! let researcher = CompanyResearcher::from_config(&config)?;
//! let report = researcher.research("Acme Corp").await?;
//! ```

pub mod agent;
pub mod api;
pub mod config;
pub mod llm;
pub mod research;
pub mod tools;

#[cfg(test)]
pub(crate) mod testing;

pub use config::Config;
