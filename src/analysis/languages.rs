//! Language statistics: turns per-repository language byte counts into a
//! ranked percentage breakdown for one user.
use log::*;
use indexmap::IndexMap;
use serde::Serialize;

use crate::{
    analysis::outcome::{
        FetchOutcome, FetchSettings, RepositorySkip, fetch_each,
    },
    provider::{
        traits::Provider,
        types::{LanguageByteMap, RepositoryDescriptor},
    },
};

/// Share of one language across a user's repositories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageStat {
    pub language: String,
    /// Percentage of all bytes, two fraction digits (e.g. `"42.50"`).
    pub percentage: String,
    pub bytes: u64,
}

/// Language breakdown for one user plus the repositories left out of it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LanguageReport {
    /// Ordered by percentage descending.
    pub stats: Vec<LanguageStat>,
    pub total_bytes: u64,
    pub skipped: Vec<RepositorySkip>,
}

/// Running byte totals per language, remembering the order in which each
/// language was first seen.
#[derive(Debug, Default)]
pub struct LanguageTotals(IndexMap<String, u64>);

impl LanguageTotals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, languages: &LanguageByteMap) {
        for (language, bytes) in languages.iter() {
            *self.0.entry(language.to_string()).or_insert(0) += bytes;
        }
    }

    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    /// Percentages rounded to two decimals, highest first. Languages with
    /// the same rounded percentage keep first-seen order. A zero total yields
    /// no stats rather than NaN percentages.
    pub fn to_stats(&self) -> Vec<LanguageStat> {
        let total = self.total();

        if total == 0 {
            return vec![];
        }

        let mut ranked: Vec<(f64, &str, u64)> = self
            .0
            .iter()
            .map(|(language, bytes)| {
                let pct = *bytes as f64 / total as f64 * 100.0;
                ((pct * 100.0).round() / 100.0, language.as_str(), *bytes)
            })
            .collect();

        // sort_by is stable
        ranked.sort_by(|a, b| b.0.total_cmp(&a.0));

        ranked
            .into_iter()
            .map(|(pct, language, bytes)| LanguageStat {
                language: language.to_string(),
                percentage: format!("{pct:.2}"),
                bytes,
            })
            .collect()
    }
}

/// Fetch language byte counts for each repository owned by `username` and
/// rank the combined totals. Repositories whose lookup fails are skipped
/// and recorded in the report.
pub async fn aggregate_languages(
    provider: &dyn Provider,
    username: &str,
    repositories: &[RepositoryDescriptor],
    settings: &FetchSettings,
) -> LanguageReport {
    let outcomes = fetch_each(repositories, settings, |repo| async move {
        FetchOutcome::from(
            provider.get_language_bytes(username, &repo.name).await,
        )
    })
    .await;

    let mut totals = LanguageTotals::new();
    let mut skipped = vec![];

    for (repo, outcome) in outcomes {
        match outcome {
            FetchOutcome::Success(languages) => totals.add(&languages),
            FetchOutcome::Skipped(reason) => {
                warn!(
                    "skipping languages for {username}/{}: {reason}",
                    repo.name
                );
                skipped.push(RepositorySkip {
                    repository: repo.name.clone(),
                    reason,
                });
            }
        }
    }

    let total_bytes = totals.total();

    if total_bytes == 0 {
        info!("no language data found for {username}");
    }

    LanguageReport {
        stats: totals.to_stats(),
        total_bytes,
        skipped,
    }
}
