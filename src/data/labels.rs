//! Label distribution tallies

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Counts of each distinct value seen for one label field
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct LabelDistribution {
    pub field: String,
    pub counts: BTreeMap<String, usize>,
    /// Records without the field
    pub missing: usize,
}

impl LabelDistribution {
    pub fn new(field: &str) -> Self {
        Self {
            field: field.to_string(),
            ..Default::default()
        }
    }

    pub fn observe(&mut self, record: &Value) {
        match lookup(record, &self.field) {
            Some(value) => *self.counts.entry(label_key(value)).or_insert(0) += 1,
            None => self.missing += 1,
        }
    }

    pub fn record_missing(&mut self) {
        self.missing += 1;
    }

    /// Number of records holding the field
    pub fn present(&self) -> usize {
        self.counts.values().sum()
    }

    /// Entries by count descending, ties by key
    pub fn sorted(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<_> = self.counts.iter().map(|(k, &v)| (k.as_str(), v)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    pub fn fraction(&self, key: &str) -> f64 {
        let present = self.present();
        if present == 0 {
            return 0.0;
        }
        self.counts.get(key).copied().unwrap_or(0) as f64 / present as f64
    }

    pub fn merge(&mut self, other: &LabelDistribution) {
        for (key, count) in &other.counts {
            *self.counts.entry(key.clone()).or_insert(0) += count;
        }
        self.missing += other.missing;
    }
}

/// Resolve `field` on a record, trying the literal key before a dotted path.
fn lookup<'a>(record: &'a Value, field: &str) -> Option<&'a Value> {
    let obj = record.as_object()?;
    if let Some(value) = obj.get(field) {
        return Some(value);
    }
    if !field.contains('.') {
        return None;
    }
    field
        .split('.')
        .try_fold(record, |current, part| current.as_object()?.get(part))
}

fn label_key(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_observe_mixed_value_types() {
        let mut dist = LabelDistribution::new("label");
        dist.observe(&json!({"label": "like"}));
        dist.observe(&json!({"label": "like"}));
        dist.observe(&json!({"label": 1}));
        dist.observe(&json!({"label": true}));
        dist.observe(&json!({"label": null}));
        dist.observe(&json!({"other": "x"}));

        assert_eq!(dist.counts["like"], 2);
        assert_eq!(dist.counts["1"], 1);
        assert_eq!(dist.counts["true"], 1);
        assert_eq!(dist.counts["null"], 1);
        assert_eq!(dist.missing, 1);
        assert_eq!(dist.present(), 5);
    }

    #[test]
    fn test_dotted_field_lookup() {
        let mut dist = LabelDistribution::new("meta.kind");
        dist.observe(&json!({"meta": {"kind": "reply"}}));
        dist.observe(&json!({"meta.kind": "literal"}));
        dist.observe(&json!({"meta": "flat"}));

        assert_eq!(dist.counts["reply"], 1);
        assert_eq!(dist.counts["literal"], 1);
        assert_eq!(dist.missing, 1);
    }

    #[test]
    fn test_sorted_by_count_then_key() {
        let mut dist = LabelDistribution::new("label");
        for label in ["b", "a", "c", "c", "b"] {
            dist.observe(&json!({ "label": label }));
        }
        assert_eq!(dist.sorted(), vec![("b", 2), ("c", 2), ("a", 1)]);
        assert!((dist.fraction("a") - 0.2).abs() < 1e-9);
        assert_eq!(dist.fraction("zzz"), 0.0);
    }
}
