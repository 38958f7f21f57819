//! Web search tool backed by DuckDuckGo's HTML endpoint.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::Tool;

const DDG_HTML_URL: &str = "https://html.duckduckgo.com/html/";
const DEFAULT_RESULTS: usize = 5;
const MAX_RESULTS: usize = 10;

/// Search the web and return result snippets as text.
pub struct WebSearch {
    client: reqwest::Client,
    endpoint: String,
}

impl WebSearch {
    pub fn new() -> anyhow::Result<Self> {
        Self::with_endpoint(DDG_HTML_URL)
    }

    /// Point the tool at a different DuckDuckGo-compatible HTML endpoint.
    pub fn with_endpoint(endpoint: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (compatible; CompanyLookup/0.1)")
            .timeout(Duration::from_secs(20))
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl Tool for WebSearch {
    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "Search the web for current information. Input is a free-text query; returns result titles, snippets and URLs. Use it for facts about companies, products, competitors, markets and social media accounts."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query"
                },
                "num_results": {
                    "type": "integer",
                    "description": "Maximum number of results to return (default: 5)"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let query = args["query"]
            .as_str()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .ok_or_else(|| anyhow::anyhow!("Missing 'query' argument"))?;
        let num_results = args["num_results"]
            .as_u64()
            .map(|n| (n as usize).clamp(1, MAX_RESULTS))
            .unwrap_or(DEFAULT_RESULTS);

        tracing::info!(query, "Searching the web");

        let url = format!("{}?q={}", self.endpoint, urlencoding::encode(query));
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(anyhow::anyhow!("Search request failed: {}", status));
        }
        let html = response.text().await?;

        let results = extract_ddg_results(&html, num_results);
        if results.is_empty() {
            Ok(format!("No results found for: {}", query))
        } else {
            Ok(results.join("\n\n"))
        }
    }
}

/// Extract up to `limit` search results from DuckDuckGo HTML.
fn extract_ddg_results(html: &str, limit: usize) -> Vec<String> {
    let mut results = Vec::new();

    for chunk in html.split("class=\"result__body\"").skip(1) {
        if results.len() >= limit {
            break;
        }

        let title = element_text(chunk, "class=\"result__a\"").unwrap_or_default();
        let snippet = element_text(chunk, "class=\"result__snippet\"").unwrap_or_default();
        let url = element_text(chunk, "class=\"result__url\"").unwrap_or_default();

        if title.is_empty() {
            continue;
        }

        results.push(format!("**{}**\n{}\nURL: {}", title, snippet, url));
    }

    results
}

/// Text content of the link carrying `marker`, with inline markup such as
/// the `<b>` around matched terms removed and entities decoded.
fn element_text(chunk: &str, marker: &str) -> Option<String> {
    let (_, body) = chunk.split(marker).nth(1)?.split_once('>')?;
    let inner = body.split("</a>").next().unwrap_or(body);
    Some(html_decode(&strip_tags(inner)))
}

/// Drop tags and collapse whitespace.
fn strip_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;

    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Basic HTML entity decoding. `&amp;` goes last so `&amp;lt;` stays `&lt;`.
fn html_decode(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}
