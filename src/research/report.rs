//! Per-request result: one answer (or placeholder) per category.

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::category::InfoCategory;

/// Text reported for a category that produced no answer.
pub const NOT_FOUND_PLACEHOLDER: &str = "We couldn't find anything.";

/// Answers keyed by category, kept in reporting order.
///
/// Serializes as a JSON object from category label to text, with the
/// placeholder in place of missing answers.
#[derive(Debug, Clone)]
pub struct CompanyReport {
    company_name: String,
    entries: Vec<(InfoCategory, Option<String>)>,
}

impl CompanyReport {
    pub fn new(company_name: impl Into<String>) -> Self {
        Self {
            company_name: company_name.into(),
            entries: Vec::new(),
        }
    }

    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    /// Store the outcome for `category`, replacing an earlier one.
    pub fn insert(&mut self, category: InfoCategory, answer: Option<String>) {
        match self.entries.iter_mut().find(|(c, _)| *c == category) {
            Some(entry) => entry.1 = answer,
            None => self.entries.push((category, answer)),
        }
    }

    /// Reported text for `category`, or `None` if it was never looked up.
    pub fn get(&self, category: InfoCategory) -> Option<&str> {
        self.entries
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, answer)| answer.as_deref().unwrap_or(NOT_FOUND_PLACEHOLDER))
    }

    /// Categories with their reported text, in reporting order.
    pub fn iter(&self) -> impl Iterator<Item = (InfoCategory, &str)> {
        self.entries
            .iter()
            .map(|(c, answer)| (*c, answer.as_deref().unwrap_or(NOT_FOUND_PLACEHOLDER)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of categories that got a real answer.
    pub fn found_count(&self) -> usize {
        self.entries.iter().filter(|(_, a)| a.is_some()).count()
    }
}

impl Serialize for CompanyReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (category, text) in self.iter() {
            map.serialize_entry(category.label(), text)?;
        }
        map.end()
    }
}
