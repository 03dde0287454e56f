//! History versions and record diffs.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::{BrandTone, KnowledgeRecord, Product};

/// A history entry with its display version number
#[derive(Debug, Clone, Serialize)]
pub struct Version<'a> {
    /// 1-based, oldest entry is version 1
    pub number: usize,
    pub record: &'a KnowledgeRecord,
}

/// Number history entries. History is newest first, so the first entry gets
/// the highest version.
pub fn versions(history: &[KnowledgeRecord]) -> Vec<Version<'_>> {
    let total = history.len();
    history
        .iter()
        .enumerate()
        .map(|(index, record)| Version {
            number: total - index,
            record,
        })
        .collect()
}

/// Look up a history entry by version number
pub fn by_version(history: &[KnowledgeRecord], number: usize) -> Option<&KnowledgeRecord> {
    if number == 0 || number > history.len() {
        return None;
    }
    history.get(history.len() - number)
}

/// Format a record timestamp as `MMM d, yyyy HH:mm:ss` (UTC).
///
/// An empty timestamp reads "Date unavailable"; one that does not parse reads
/// "Invalid date".
pub fn format_timestamp(timestamp: &str) -> String {
    if timestamp.is_empty() {
        return "Date unavailable".to_string();
    }
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(at) => at
            .with_timezone(&Utc)
            .format("%b %-d, %Y %H:%M:%S")
            .to_string(),
        Err(_) => "Invalid date".to_string(),
    }
}

/// Differences between two records, `from` → `to`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordDiff {
    pub added_products: Vec<Product>,
    pub removed_products: Vec<Product>,
    pub added_categories: Vec<String>,
    pub removed_categories: Vec<String>,
    pub added_keywords: Vec<String>,
    pub removed_keywords: Vec<String>,
    /// `(from, to)` when the tone changed
    pub tone_change: Option<(BrandTone, BrandTone)>,
}

impl RecordDiff {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Compare two records. Products are matched by id.
pub fn diff(from: &KnowledgeRecord, to: &KnowledgeRecord) -> RecordDiff {
    RecordDiff {
        added_products: missing_from(&to.products, &from.products, |p| &p.id),
        removed_products: missing_from(&from.products, &to.products, |p| &p.id),
        added_categories: missing_from(&to.categories, &from.categories, |c| c),
        removed_categories: missing_from(&from.categories, &to.categories, |c| c),
        added_keywords: missing_from(&to.main_keywords, &from.main_keywords, |k| k),
        removed_keywords: missing_from(&from.main_keywords, &to.main_keywords, |k| k),
        tone_change: (from.brand_tone != to.brand_tone).then_some((from.brand_tone, to.brand_tone)),
    }
}

/// Items of `items` whose key does not appear in `other`, in `items` order
fn missing_from<T: Clone>(items: &[T], other: &[T], key: impl Fn(&T) -> &String) -> Vec<T> {
    items
        .iter()
        .filter(|item| !other.iter().any(|o| key(o) == key(item)))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            category: "General".to_string(),
        }
    }

    fn record(ts: &str, products: &[&str], keywords: &[&str], tone: BrandTone) -> KnowledgeRecord {
        KnowledgeRecord {
            brand_name: None,
            products: products.iter().map(|id| product(id)).collect(),
            categories: vec!["General".to_string()],
            main_keywords: keywords.iter().map(|k| k.to_string()).collect(),
            brand_tone: tone,
            timestamp: ts.to_string(),
        }
    }

    #[test]
    fn test_versions_number_newest_highest() {
        let history = vec![
            record("t3", &[], &[], BrandTone::Casual),
            record("t2", &[], &[], BrandTone::Casual),
            record("t1", &[], &[], BrandTone::Casual),
        ];

        let numbered: Vec<(usize, &str)> = versions(&history)
            .iter()
            .map(|v| (v.number, v.record.timestamp.as_str()))
            .collect();
        assert_eq!(numbered, vec![(3, "t3"), (2, "t2"), (1, "t1")]);

        assert_eq!(by_version(&history, 1).unwrap().timestamp, "t1");
        assert_eq!(by_version(&history, 3).unwrap().timestamp, "t3");
        assert!(by_version(&history, 0).is_none());
        assert!(by_version(&history, 4).is_none());
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(
            format_timestamp("2024-03-05T14:07:09.123Z"),
            "Mar 5, 2024 14:07:09"
        );
        assert_eq!(format_timestamp("t1"), "Invalid date");
        assert_eq!(format_timestamp(""), "Date unavailable");
    }

    #[test]
    fn test_diff_reports_changes() {
        let old = record("t1", &["a", "b"], &["fast", "cheap"], BrandTone::Casual);
        let new = record("t2", &["b", "c"], &["fast", "bold"], BrandTone::Professional);

        let d = diff(&old, &new);
        assert_eq!(d.added_products, vec![product("c")]);
        assert_eq!(d.removed_products, vec![product("a")]);
        assert_eq!(d.added_keywords, vec!["bold".to_string()]);
        assert_eq!(d.removed_keywords, vec!["cheap".to_string()]);
        assert!(d.added_categories.is_empty());
        assert_eq!(d.tone_change, Some((BrandTone::Casual, BrandTone::Professional)));
        assert!(!d.is_empty());
    }

    #[test]
    fn test_diff_identical_content_is_empty() {
        let a = record("t1", &["a"], &["x"], BrandTone::Humorous);
        let b = record("t2", &["a"], &["x"], BrandTone::Humorous);
        assert!(diff(&a, &b).is_empty());
    }
}
