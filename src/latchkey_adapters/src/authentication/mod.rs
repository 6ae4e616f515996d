pub mod bearer_filter;

pub use bearer_filter::{BearerFilter, FilterOutcome};
