use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScanError};
use crate::model::Record;

/// Headcount summary of one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSummary {
    /// Team name exactly as it appeared in the records.
    pub team: String,
    /// Number of distinct collaborator names in the team.
    pub collaborator_count: usize,
    /// First whitespace-delimited token of each distinct collaborator. The
    /// order follows set iteration and is not deterministic across runs.
    pub first_names: Vec<String>,
}

/// Groups the records by team and reports distinct collaborator counts and
/// first names, one summary per team in sorted team order.
///
/// Team grouping and collaborator de-duplication are both exact string
/// comparisons; no normalization is applied. A collaborator string without a
/// single whitespace-delimited token fails the whole summary rather than
/// contributing an empty first name.
pub fn summarize(records: &[Record]) -> Result<Vec<TeamSummary>> {
    let mut teams: BTreeMap<&str, HashSet<&str>> = BTreeMap::new();
    for record in records {
        teams
            .entry(record.team.as_str())
            .or_default()
            .insert(record.collaborator.as_str());
    }

    let mut summaries = Vec::with_capacity(teams.len());
    for (team, collaborators) in teams {
        let first_names = collaborators
            .iter()
            .map(|collaborator| {
                collaborator
                    .split_whitespace()
                    .next()
                    .map(str::to_string)
                    .ok_or_else(|| ScanError::MalformedName {
                        team: team.to_string(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        summaries.push(TeamSummary {
            team: team.to_string(),
            collaborator_count: collaborators.len(),
            first_names,
        });
    }
    Ok(summaries)
}
