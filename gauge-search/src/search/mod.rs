//! Free-text station search.
//!
//! Answers the question: "which gauging stations match what the user
//! typed?" A term is first matched against station names. If nothing
//! matches it is treated as a postcode, and stations within a fixed radius
//! of that postcode are returned instead.

mod config;
mod orchestrator;
mod rank;
mod summary;

pub use config::SearchConfig;
pub use orchestrator::{ResultOrigin, SearchOrchestrator, SearchOutcome};
pub use rank::{Page, deduplicate, paginate, rank_by_label};
pub use summary::summarize;
