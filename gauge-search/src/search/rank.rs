//! Ranking and pagination of search results.

use std::collections::HashSet;

use crate::domain::StationRecord;

/// Sort stations by label, ignoring case.
///
/// Ties are broken by the exact label and then by notation, so the order
/// is fully deterministic.
pub fn rank_by_label(mut stations: Vec<StationRecord>) -> Vec<StationRecord> {
    stations.sort_by_cached_key(|s| (s.label.to_lowercase(), s.label.clone(), s.notation.clone()));
    stations
}

/// Remove stations whose notation has already been seen.
///
/// Keeps the first occurrence, so any existing order is preserved.
pub fn deduplicate(stations: Vec<StationRecord>) -> Vec<StationRecord> {
    let mut seen = HashSet::new();
    stations
        .into_iter()
        .filter(|s| seen.insert(s.notation.clone()))
        .collect()
}

/// One page of results plus how many were left off.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub displayed: Vec<StationRecord>,
    pub remainder: usize,
}

/// Cap `stations` at `limit`, or keep everything when `limit` is `None`.
pub fn paginate(mut stations: Vec<StationRecord>, limit: Option<usize>) -> Page {
    let total = stations.len();
    let shown = limit.map_or(total, |l| l.min(total));
    stations.truncate(shown);

    Page {
        displayed: stations,
        remainder: total - shown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::station;

    fn labels(stations: &[StationRecord]) -> Vec<&str> {
        stations.iter().map(|s| s.label.as_str()).collect()
    }

    fn numbered(n: usize) -> Vec<StationRecord> {
        (1..=n)
            .map(|i| station(&format!("S{i:02}"), &format!("Weir {i:02}")))
            .collect()
    }

    #[test]
    fn rank_ignores_case() {
        let ranked = rank_by_label(vec![
            station("1", "bewdley"),
            station("2", "Avonmouth Dock"),
            station("3", "Bath Pulteney"),
            station("4", "avonmouth Portbury"),
        ]);

        assert_eq!(
            labels(&ranked),
            vec!["Avonmouth Dock", "avonmouth Portbury", "Bath Pulteney", "bewdley"]
        );
    }

    #[test]
    fn rank_breaks_ties_by_notation() {
        let ranked = rank_by_label(vec![
            station("B", "Sheepwash"),
            station("A", "Sheepwash"),
        ]);
        let ids: Vec<&str> = ranked.iter().map(|s| s.notation.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
    }

    #[test]
    fn deduplicate_keeps_first() {
        let stations = deduplicate(vec![
            station("1", "First"),
            station("2", "Second"),
            station("1", "Duplicate"),
        ]);
        assert_eq!(labels(&stations), vec!["First", "Second"]);
    }

    #[test]
    fn paginate_caps_at_limit() {
        let page = paginate(numbered(25), Some(20));
        assert_eq!(page.displayed.len(), 20);
        assert_eq!(page.remainder, 5);
        assert_eq!(page.displayed[19].label, "Weir 20");
    }

    #[test]
    fn paginate_without_limit_shows_everything() {
        let page = paginate(numbered(25), None);
        assert_eq!(page.displayed.len(), 25);
        assert_eq!(page.remainder, 0);
    }

    #[test]
    fn paginate_under_limit() {
        let page = paginate(numbered(3), Some(20));
        assert_eq!(page.displayed.len(), 3);
        assert_eq!(page.remainder, 0);
    }

    #[test]
    fn paginate_empty() {
        let page = paginate(Vec::new(), Some(20));
        assert!(page.displayed.is_empty());
        assert_eq!(page.remainder, 0);
    }
}
