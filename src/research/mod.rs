//! Company research: categories, per-category fetching and report assembly.
//!
//! [`CompanyResearcher`] walks the fixed category list, asking the
//! [`InfoFetcher`] one question per category, and collects the answers into
//! a [`CompanyReport`]. Individual categories fail soft into a placeholder.

mod category;
mod fetcher;
mod report;
mod researcher;

pub use category::InfoCategory;
pub use fetcher::InfoFetcher;
pub use report::{CompanyReport, NOT_FOUND_PLACEHOLDER};
pub use researcher::{CompanyResearcher, LookupError};
