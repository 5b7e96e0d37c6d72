//! Loading of category and cleanup rule tables.
//!
//! Both tables are YAML mappings from a label to the substrings that identify
//! it:
//!
//! ```yaml
//! Groceries:
//!   - zehrs
//!   - no frills
//! Coffee:
//!   - tim hortons
//! ```
//!
//! Matching is first-match-wins, so the mapping is flattened into an ordered
//! list: labels in file order, then patterns in list order.

use crate::error::{Error, Result};
use crate::types::Rule;
use log::{debug, warn};
use serde_yaml::Value;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Parse a rule table from any source implementing `Read`.
pub fn parse_rules<R: Read>(reader: R) -> Result<Vec<Rule>> {
    let document: Value = serde_yaml::from_reader(reader)?;
    let mapping = match document {
        Value::Null => return Ok(Vec::new()),
        Value::Mapping(mapping) => mapping,
        _ => {
            return Err(Error::InvalidRules(
                "expected a mapping of label to patterns".to_string(),
            ))
        }
    };

    let mut rules = Vec::new();
    for (key, value) in mapping {
        let label = scalar_text(&key)
            .ok_or_else(|| Error::InvalidRules(format!("label must be text, got {:?}", key)))?;

        let patterns = match value {
            Value::Null => Vec::new(),
            Value::Sequence(items) => items,
            single => vec![single],
        };

        for item in patterns {
            let pattern = scalar_text(&item).ok_or_else(|| {
                Error::InvalidRules(format!("pattern for '{}' must be text, got {:?}", label, item))
            })?;
            if pattern.trim().is_empty() {
                warn!("Ignoring empty pattern for '{}'", label);
                continue;
            }
            rules.push(Rule::new(pattern, label.clone()));
        }
    }

    Ok(rules)
}

/// Load a rule table from a YAML file.
pub fn load_rules(path: impl AsRef<Path>) -> Result<Vec<Rule>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let rules = parse_rules(file)?;
    debug!("Loaded {} rules from {}", rules.len(), path.display());
    Ok(rules)
}

/// Text of a string, number or boolean YAML scalar.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
