use posekit::preset::PoseState;
use posekit::search::SearchEntry;
use posekit::{PosePreset, PriorityOrder, RankedPresets, SearchFilter, TermFilter, rank};

fn preset(name: &str, priority: i32) -> PosePreset {
    PosePreset {
        id: format!("{}-id", name.to_lowercase().replace(' ', "-")),
        name: name.to_owned(),
        keywords: name.to_owned(),
        state: PoseState::default(),
        priority,
    }
}

fn create_test_presets() -> Vec<PosePreset> {
    vec![preset("Stand", 1), preset("Kneel", 2), preset("Arm Up", 1)]
}

fn names(presets: &[&PosePreset]) -> Vec<String> {
    presets.iter().map(|preset| preset.name.clone()).collect()
}

#[test]
fn test_scenario_ascending_priority() {
    let presets = create_test_presets();
    assert_eq!(names(&rank(&presets, PriorityOrder::Ascending)), vec!["Arm Up", "Stand", "Kneel"]);
}

#[test]
fn test_scenario_descending_priority() {
    let presets = create_test_presets();
    assert_eq!(names(&rank(&presets, PriorityOrder::Descending)), vec!["Kneel", "Arm Up", "Stand"]);
}

#[test]
fn test_rank_is_independent_of_input_order() {
    let mut presets = create_test_presets();
    presets.reverse();
    assert_eq!(names(&rank(&presets, PriorityOrder::Ascending)), vec!["Arm Up", "Stand", "Kneel"]);
}

#[test]
fn test_empty_query_returns_rank_order() {
    let presets = create_test_presets();
    let ranked = RankedPresets::new(&presets, PriorityOrder::Ascending);
    assert_eq!(names(&ranked.filter("", &TermFilter)), names(ranked.presets()));
}

#[test]
fn test_query_without_matches_is_empty() {
    let presets = create_test_presets();
    let ranked = RankedPresets::new(&presets, PriorityOrder::Ascending);
    assert!(ranked.filter("somersault", &TermFilter).is_empty());
}

/// Stand-in for an external fuzzy matcher: matches entries containing the
/// query and ranks later entries first.
struct BackwardsFilter;

impl SearchFilter for BackwardsFilter {
    fn filter(&self, entries: &[SearchEntry], query: &str) -> Vec<usize> {
        entries
            .iter()
            .rev()
            .filter(|entry| entry.search_text.to_lowercase().contains(&query.to_lowercase()))
            .map(|entry| entry.id)
            .collect()
    }
}

#[test]
fn test_external_filter_relevance_order_is_kept() {
    let presets = vec![preset("Sit Low", 0), preset("Sit High", 0), preset("Stand", 0)];
    let ranked = RankedPresets::new(&presets, PriorityOrder::Ascending);

    assert_eq!(names(ranked.presets()), vec!["Sit High", "Sit Low", "Stand"]);
    assert_eq!(names(&ranked.filter("sit", &BackwardsFilter)), vec!["Sit Low", "Sit High"]);
}
