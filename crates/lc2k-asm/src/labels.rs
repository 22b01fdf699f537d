use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DiagnosticKind;

/// Significant characters in a label.
pub const MAX_LABEL_LEN: usize = 6;

/// A label name cut to its first `MAX_LABEL_LEN` characters. Two spellings
/// sharing that prefix name the same label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LabelName(String);

impl LabelName {
    pub fn new(raw: &str) -> Self {
        Self(raw.chars().take(MAX_LABEL_LEN).collect())
    }

    pub fn is_truncation_of(&self, raw: &str) -> bool {
        self.0 != raw
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LabelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEntry {
    pub addr: u32,
    pub name: String,
}

/// Label name to defining address, one table per assembly run.
#[derive(Debug, Clone, Default)]
pub struct LabelTable {
    map: HashMap<LabelName, u32>,
}

impl LabelTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `address`. A second definition is rejected and the
    /// first one kept.
    pub fn define(&mut self, name: &str, address: u32) -> Result<LabelName, DiagnosticKind> {
        let key = LabelName::new(name);
        if let Some(&first) = self.map.get(&key) {
            return Err(DiagnosticKind::DuplicateLabel {
                name: name.to_string(),
                first,
            });
        }
        self.map.insert(key.clone(), address);
        Ok(key)
    }

    pub fn resolve(&self, name: &str) -> Result<u32, DiagnosticKind> {
        self.map
            .get(&LabelName::new(name))
            .copied()
            .ok_or_else(|| DiagnosticKind::UndefinedLabel(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// All labels ordered by address.
    pub fn entries(&self) -> Vec<LabelEntry> {
        let mut v: Vec<LabelEntry> = self
            .map
            .iter()
            .map(|(name, &addr)| LabelEntry { addr, name: name.to_string() })
            .collect();
        v.sort_by(|a, b| a.addr.cmp(&b.addr).then_with(|| a.name.cmp(&b.name)));
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn define_and_resolve() {
        let mut t = LabelTable::new();
        t.define("loop", 3).unwrap();
        t.define("done", 9).unwrap();
        assert_eq!(t.resolve("loop"), Ok(3));
        assert_eq!(t.resolve("done"), Ok(9));
        assert_eq!(t.resolve("nope"), Err(DiagnosticKind::UndefinedLabel("nope".into())));
    }

    #[test]
    fn names_match_on_six_characters() {
        let mut t = LabelTable::new();
        let key = t.define("counter1", 4).unwrap();
        assert_eq!(key.as_str(), "counte");
        assert!(key.is_truncation_of("counter1"));
        assert_eq!(t.resolve("counter2"), Ok(4));
        assert_eq!(t.resolve("counte"), Ok(4));
        assert!(t.resolve("count").is_err());
    }

    #[test]
    fn redefinition_keeps_first() {
        let mut t = LabelTable::new();
        t.define("start", 0).unwrap();
        assert_eq!(
            t.define("start", 5),
            Err(DiagnosticKind::DuplicateLabel { name: "start".into(), first: 0 })
        );
        assert_eq!(t.resolve("start"), Ok(0));
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn entries_in_address_order() {
        let mut t = LabelTable::new();
        t.define("b", 7).unwrap();
        t.define("a", 2).unwrap();
        let names: Vec<_> = t.entries().into_iter().map(|e| (e.addr, e.name)).collect();
        assert_eq!(names, vec![(2, "a".to_string()), (7, "b".to_string())]);
    }
}
