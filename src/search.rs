//! Ordering and incremental filtering of presets for the search list.
//!
//! [`rank`] produces the browsable order. [`RankedPresets`] keeps that order
//! together with the `{ search_text, id }` projection handed to a
//! [`SearchFilter`], and maps the filter's answer back to presets.
use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::preset::PosePreset;

/// Joins a preset's name and keywords in its search text
pub const SEARCH_SEPARATOR: &str = "|";

/// Direction in which preset priority is applied after the name sort
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityOrder {
    /// Lower priority values are listed first
    #[default]
    Ascending,
    /// Higher priority values are listed first
    Descending,
}

impl PriorityOrder {
    pub fn compare(self, a: i32, b: i32) -> Ordering {
        match self {
            PriorityOrder::Ascending => a.cmp(&b),
            PriorityOrder::Descending => b.cmp(&a),
        }
    }
}

/// Orders presets by priority, breaking ties by name.
///
/// Two stable passes: name ascending first, then priority in `order`.
pub fn rank<'a>(presets: impl IntoIterator<Item = &'a PosePreset>, order: PriorityOrder) -> Vec<&'a PosePreset> {
    let mut ranked: Vec<&PosePreset> = presets.into_iter().collect();
    ranked.sort_by(|a, b| a.name.cmp(&b.name));
    ranked.sort_by(|a, b| order.compare(a.priority, b.priority));
    ranked
}

/// One row of the search list as seen by the filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchEntry {
    /// `name|keywords`
    pub search_text: String,
    /// Position of the preset in the ranked list
    pub id: usize,
}

/// Fuzzy-match collaborator used by the search box.
///
/// Returns the ids of matching entries, most relevant first.
pub trait SearchFilter {
    fn filter(&self, entries: &[SearchEntry], query: &str) -> Vec<usize>;
}

/// Case-insensitive term matcher.
///
/// Every whitespace-separated query term has to occur in the search text.
/// Matches are scored (name prefix, then name substring, then keywords only)
/// and ties keep the ranked order. A blank query matches everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct TermFilter;

impl TermFilter {
    fn score(search_text: &str, terms: &[String]) -> Option<u8> {
        let text = search_text.to_lowercase();
        if !terms.iter().all(|term| text.contains(term.as_str())) {
            return None;
        }

        let name = text.split(SEARCH_SEPARATOR).next().unwrap_or_default();
        let first = terms.first().map(String::as_str).unwrap_or_default();
        if name.starts_with(first) {
            Some(3)
        } else if terms.iter().all(|term| name.contains(term.as_str())) {
            Some(2)
        } else {
            Some(1)
        }
    }
}

impl SearchFilter for TermFilter {
    fn filter(&self, entries: &[SearchEntry], query: &str) -> Vec<usize> {
        let terms: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
        if terms.is_empty() {
            return entries.iter().map(|entry| entry.id).collect();
        }

        let mut matches: Vec<(usize, u8)> = entries
            .iter()
            .filter_map(|entry| Self::score(&entry.search_text, &terms).map(|score| (entry.id, score)))
            .collect();

        // Stable, so equal scores stay in ranked order
        matches.sort_by(|a, b| b.1.cmp(&a.1));
        matches.into_iter().map(|(id, _)| id).collect()
    }
}

/// A ranked preset list ready for the search box
#[derive(Debug, Clone)]
pub struct RankedPresets<'a> {
    presets: Vec<&'a PosePreset>,
    entries: Vec<SearchEntry>,
}

impl<'a> RankedPresets<'a> {
    pub fn new(presets: impl IntoIterator<Item = &'a PosePreset>, order: PriorityOrder) -> Self {
        let presets = rank(presets, order);
        let entries = presets
            .iter()
            .enumerate()
            .map(|(index, preset)| SearchEntry {
                search_text: format!("{}{}{}", preset.name, SEARCH_SEPARATOR, preset.keywords),
                id: index,
            })
            .collect();
        Self { presets, entries }
    }

    pub fn presets(&self) -> &[&'a PosePreset] {
        &self.presets
    }

    pub fn entries(&self) -> &[SearchEntry] {
        &self.entries
    }

    /// Presets matching `query`, in the order the filter returned them.
    ///
    /// Ids the filter invents are skipped.
    pub fn filter(&self, query: &str, filter: &dyn SearchFilter) -> Vec<&'a PosePreset> {
        filter
            .filter(&self.entries, query)
            .into_iter()
            .filter_map(|id| self.presets.get(id).copied())
            .collect()
    }
}
