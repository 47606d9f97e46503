// src/analytics/abc.rs

//! ABC revenue classification.
//!
//! A = entities making up the first 80% of cumulative revenue, B = the next
//! 15%, C = the long tail.

use serde::Serialize;
use std::fmt;

const A_THRESHOLD: f64 = 0.80;
const B_THRESHOLD: f64 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum AbcCategory {
    A,
    B,
    C,
}

impl AbcCategory {
    pub fn from_cumulative_share(share: f64) -> Self {
        if share <= A_THRESHOLD {
            AbcCategory::A
        } else if share <= B_THRESHOLD {
            AbcCategory::B
        } else {
            AbcCategory::C
        }
    }
}

impl fmt::Display for AbcCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AbcCategory::A => "A",
            AbcCategory::B => "B",
            AbcCategory::C => "C",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AbcEntry {
    pub entity: String,
    pub revenue: f64,
    pub cumulative_revenue: f64,
    pub cumulative_share: f64,
    pub category: AbcCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AbcSummary {
    pub category: AbcCategory,
    pub entity_count: usize,
    pub total_revenue: f64,
}

/// Ranks entities by revenue and assigns each one category.
///
/// Entities with non-positive (or NaN) revenue are dropped first. The sort is
/// stable, so equal revenues keep their input order.
pub fn classify<S: AsRef<str>>(revenues: &[(S, f64)]) -> Vec<AbcEntry> {
    let mut ranked: Vec<(&str, f64)> = revenues
        .iter()
        .filter(|(_, revenue)| *revenue > 0.0)
        .map(|(entity, revenue)| (entity.as_ref(), *revenue))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    let total: f64 = ranked.iter().map(|(_, revenue)| revenue).sum();
    let mut cumulative = 0.0;

    ranked
        .into_iter()
        .map(|(entity, revenue)| {
            cumulative += revenue;
            let share = cumulative / total;
            AbcEntry {
                entity: entity.to_string(),
                revenue,
                cumulative_revenue: cumulative,
                cumulative_share: share,
                category: AbcCategory::from_cumulative_share(share),
            }
        })
        .collect()
}

/// Entity count and revenue per category, in A, B, C order. Empty
/// categories are omitted.
pub fn summarize(entries: &[AbcEntry]) -> Vec<AbcSummary> {
    [AbcCategory::A, AbcCategory::B, AbcCategory::C]
        .into_iter()
        .filter_map(|category| {
            let members = entries.iter().filter(|e| e.category == category);
            let (count, revenue) = members.fold((0, 0.0), |(n, sum), e| (n + 1, sum + e.revenue));
            (count > 0).then_some(AbcSummary {
                category,
                entity_count: count,
                total_revenue: revenue,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn ties_keep_input_order() {
        let entries = classify(&[("w", 50.0), ("x", 100.0), ("y", 100.0), ("z", 50.0)]);
        let order: Vec<&str> = entries.iter().map(|e| e.entity.as_str()).collect();
        assert_eq!(order, vec!["x", "y", "w", "z"]);

        let shares: Vec<f64> = entries.iter().map(|e| e.cumulative_share).collect();
        assert_eq!(shares, vec![100.0 / 300.0, 200.0 / 300.0, 250.0 / 300.0, 1.0]);

        // Both 100-revenue entities sit below 0.80
        assert_eq!(entries[0].category, AbcCategory::A);
        assert_eq!(entries[1].category, AbcCategory::A);
        assert_eq!(entries[2].category, AbcCategory::B);
        assert_eq!(entries[3].category, AbcCategory::C);
    }

    #[test]
    fn boundaries_are_inclusive() {
        assert_eq!(AbcCategory::from_cumulative_share(0.80), AbcCategory::A);
        assert_eq!(AbcCategory::from_cumulative_share(0.8000001), AbcCategory::B);
        assert_eq!(AbcCategory::from_cumulative_share(0.95), AbcCategory::B);
        assert_eq!(AbcCategory::from_cumulative_share(0.9500001), AbcCategory::C);
    }

    #[test]
    fn non_positive_revenue_is_excluded() {
        let entries = classify(&[("a", 10.0), ("refund", -4.0), ("zero", 0.0), ("b", 5.0)]);
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.entity != "refund" && e.entity != "zero"));
    }

    #[test]
    fn empty_input_gives_empty_output() {
        let revenues: Vec<(String, f64)> = Vec::new();
        assert!(classify(&revenues).is_empty());
        assert!(summarize(&[]).is_empty());
    }

    #[test]
    fn summary_groups_by_category() {
        let entries = classify(&[("a", 700.0), ("b", 150.0), ("c", 100.0), ("d", 50.0)]);
        let summary = summarize(&entries);

        assert_eq!(summary.len(), 3);
        assert_eq!(summary[0].category, AbcCategory::A);
        assert_eq!(summary[0].entity_count, 1);
        assert_eq!(summary[0].total_revenue, 700.0);
        assert_eq!(summary[1].entity_count, 2);
        assert_eq!(summary[1].total_revenue, 250.0);
        assert_eq!(summary[2].entity_count, 1);
    }

    proptest! {
        /// Every positive-revenue entity lands in exactly one category and
        /// the running total ends at the total revenue.
        #[test]
        fn prop_classification_partitions(revenues in prop::collection::vec(-100.0f64..10_000.0, 0..60)) {
            let input: Vec<(String, f64)> = revenues
                .iter()
                .enumerate()
                .map(|(i, r)| (format!("e{i}"), *r))
                .collect();
            let entries = classify(&input);
            let positive: Vec<f64> = revenues.iter().copied().filter(|r| *r > 0.0).collect();
            prop_assert_eq!(entries.len(), positive.len());

            let summary = summarize(&entries);
            let counted: usize = summary.iter().map(|s| s.entity_count).sum();
            prop_assert_eq!(counted, entries.len());

            if let Some(last) = entries.last() {
                let total: f64 = positive.iter().sum();
                prop_assert!((last.cumulative_revenue - total).abs() <= 1e-6 * total.max(1.0));
                prop_assert!((last.cumulative_share - 1.0).abs() < 1e-9);
            }
            for pair in entries.windows(2) {
                prop_assert!(pair[0].revenue >= pair[1].revenue);
                prop_assert!(pair[0].category <= pair[1].category);
            }
        }
    }
}
