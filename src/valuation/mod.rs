//! Valuation Layer
//!
//! Wealth calculation with change-detection caching.

mod calculator;
mod fingerprint;
mod price;
mod sections;
pub mod currency;

pub use calculator::{AppraisalConfig, SecondaryContainer, WealthCalculator};
pub use fingerprint::{fingerprint, Fingerprint};
pub use price::{PriceCache, PriceTable};
pub use sections::{SectionCounts, SECTION_COUNT};
