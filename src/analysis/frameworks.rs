//! Framework detection from repository dependency manifests.
//!
//! Detection is a coarse heuristic: an identifier counts as detected when
//! any dependency name, lowercased, contains it as a substring. `react-dom`
//! therefore counts as `react`, and so does an unrelated `reactive-utils`.
use log::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

use crate::{
    analysis::outcome::{
        FetchOutcome, FetchSettings, RepositorySkip, SkipReason, fetch_each,
    },
    provider::{traits::Provider, types::RepositoryDescriptor},
};

/// Number of repositories each framework identifier was detected in.
/// Identifiers never detected have no entry.
pub type FrameworkCounts = BTreeMap<String, u32>;

/// Framework detection result for one user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FrameworkReport {
    pub counts: FrameworkCounts,
    /// Repositories whose manifest was fetched and parsed.
    pub manifests_found: usize,
    pub skipped: Vec<RepositorySkip>,
}

/// The parts of a `package.json` that matter for detection. Dependency
/// fields that are not objects are tolerated and contribute no names.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DependencyManifest {
    #[serde(default)]
    pub dependencies: Option<Value>,
    #[serde(default, rename = "devDependencies")]
    pub dev_dependencies: Option<Value>,
}

impl DependencyManifest {
    pub fn parse(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// Production and development dependency names merged into one set.
    pub fn dependency_names(&self) -> BTreeSet<&str> {
        self.dependencies
            .iter()
            .chain(self.dev_dependencies.iter())
            .filter_map(Value::as_object)
            .flat_map(|deps| deps.keys())
            .map(String::as_str)
            .collect()
    }

    /// Identifiers from `frameworks` matched by at least one dependency.
    /// Each identifier appears at most once.
    pub fn detect<'f>(&self, frameworks: &'f [String]) -> Vec<&'f str> {
        let names: Vec<String> = self
            .dependency_names()
            .into_iter()
            .map(str::to_lowercase)
            .collect();

        frameworks
            .iter()
            .filter(|framework| {
                let framework = framework.to_lowercase();
                names.iter().any(|name| name.contains(&framework))
            })
            .map(String::as_str)
            .collect()
    }
}

async fn fetch_manifest(
    provider: &dyn Provider,
    owner: &str,
    repo: &str,
    path: &str,
) -> FetchOutcome<DependencyManifest> {
    let contents = match provider.get_file_contents(owner, repo, path).await
    {
        Ok(Some(contents)) => contents,
        Ok(None) => return FetchOutcome::Skipped(SkipReason::NotFound),
        Err(err) => return FetchOutcome::Skipped(err.into()),
    };

    let content = match contents.decode() {
        Ok(content) => content,
        Err(err) => {
            return FetchOutcome::Skipped(SkipReason::Decode(err.to_string()));
        }
    };

    match DependencyManifest::parse(&content) {
        Ok(manifest) => FetchOutcome::Success(manifest),
        Err(err) => FetchOutcome::Skipped(SkipReason::Parse(err.to_string())),
    }
}

/// Count, per framework identifier, the repositories of `username` whose
/// manifest at `manifest_path` depends on it. Repositories without a usable
/// manifest contribute nothing and are recorded as skipped.
pub async fn detect_frameworks(
    provider: &dyn Provider,
    username: &str,
    repositories: &[RepositoryDescriptor],
    frameworks: &[String],
    manifest_path: &str,
    settings: &FetchSettings,
) -> FrameworkReport {
    let outcomes = fetch_each(repositories, settings, |repo| async move {
        fetch_manifest(provider, username, &repo.name, manifest_path).await
    })
    .await;

    let mut report = FrameworkReport::default();

    for (repo, outcome) in outcomes {
        match outcome {
            FetchOutcome::Success(manifest) => {
                report.manifests_found += 1;
                for framework in manifest.detect(frameworks) {
                    *report.counts.entry(framework.to_string()).or_insert(0) +=
                        1;
                }
            }
            FetchOutcome::Skipped(reason) => {
                if reason == SkipReason::NotFound {
                    debug!(
                        "no {manifest_path} in {username}/{}: skipping",
                        repo.name
                    );
                } else {
                    warn!(
                        "skipping {manifest_path} in {username}/{}: {reason}",
                        repo.name
                    );
                }
                report.skipped.push(RepositorySkip {
                    repository: repo.name.clone(),
                    reason,
                });
            }
        }
    }

    report
}
