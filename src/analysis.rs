//! Aggregations run over a user's capped repository list.

/// Framework detection from dependency manifests.
pub mod frameworks;

/// Language byte counts ranked into percentages.
pub mod languages;

/// Per-repository fetch outcomes, skip reasons and fan-out.
pub mod outcome;
