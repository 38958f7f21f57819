//! The fixed set of information categories and their prompt templates.

use std::fmt;

use serde::{Serialize, Serializer};

/// Marker replaced by the company name in every template.
const COMPANY_MARKER: &str = "{company}";

/// One kind of information requested about a company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InfoCategory {
    GeneralInformation,
    ProductsServices,
    Competitors,
    TargetMarket,
    SocialMedia,
}

struct CategoryEntry {
    category: InfoCategory,
    label: &'static str,
    template: &'static str,
}

/// Label and question template per category, in reporting order.
/// Rows must follow the declaration order of [`InfoCategory`].
static CATEGORY_TABLE: [CategoryEntry; 5] = [
    CategoryEntry {
        category: InfoCategory::GeneralInformation,
        label: "General Information",
        template: "Tell me general information about {company}.",
    },
    CategoryEntry {
        category: InfoCategory::ProductsServices,
        label: "Main Products/Services",
        template: "What are the main products or services offered by {company}?",
    },
    CategoryEntry {
        category: InfoCategory::Competitors,
        label: "Biggest Competitors",
        template: "Who are the biggest competitors of {company}?",
    },
    CategoryEntry {
        category: InfoCategory::TargetMarket,
        label: "Target Market",
        template: "Who is the target market of {company}?",
    },
    CategoryEntry {
        category: InfoCategory::SocialMedia,
        label: "Social Media Profiles",
        template: "Provide links to {company}'s social media profiles.",
    },
];

impl InfoCategory {
    /// All categories in reporting order.
    pub fn all() -> impl Iterator<Item = InfoCategory> {
        CATEGORY_TABLE.iter().map(|e| e.category)
    }

    fn entry(self) -> &'static CategoryEntry {
        &CATEGORY_TABLE[self as usize]
    }

    pub fn label(self) -> &'static str {
        self.entry().label
    }

    pub fn template(self) -> &'static str {
        self.entry().template
    }

    pub fn from_label(label: &str) -> Option<Self> {
        CATEGORY_TABLE
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.category)
    }

    /// The question to ask the agent about `company_name`.
    pub fn prompt(self, company_name: &str) -> String {
        self.template().replace(COMPANY_MARKER, company_name)
    }
}

impl fmt::Display for InfoCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for InfoCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}
