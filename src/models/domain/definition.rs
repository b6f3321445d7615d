use std::collections::BTreeMap;

/// Definitions for every requested word. Words without a usable definition
/// map to an empty string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DefinitionResult {
    pub definitions: BTreeMap<String, String>,
    pub raw: String,
}

impl DefinitionResult {
    pub fn empty_for(words: &[String]) -> Self {
        Self {
            definitions: words.iter().map(|w| (w.clone(), String::new())).collect(),
            raw: String::new(),
        }
    }
}
