//! Reversible hiding of entity references.
//!
//! Exports reference entities (`&lt;`, `&nbsp;`, ...) that are not declared in any
//! DTD. Before parsing, each reference is swapped for a bracketed token that does
//! not occur in the input; after parsing the tokens are swapped back so values
//! reproduce the references exactly as written.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ENTITY_REGEX: Regex = Regex::new(r"&([A-Za-z_:#][A-Za-z0-9_:.\-#]*);").unwrap();
}

/// Map from entity name (without `&` and `;`) to its placeholder token, in order
/// of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityReplacements {
    entries: Vec<(String, String)>,
}

impl EntityReplacements {
    /// Collects every distinct entity reference in `text` and assigns it a token
    /// of the form `[N]` that does not occur anywhere in `text`.
    pub fn calculate(text: &str) -> Self {
        let mut entries: Vec<(String, String)> = Vec::new();
        let mut counter: u64 = 0;

        for caps in ENTITY_REGEX.captures_iter(text) {
            let name = &caps[1];
            if entries.iter().any(|(n, _)| n == name) {
                continue;
            }
            let token = loop {
                let candidate = format!("[{}]", counter);
                counter += 1;
                if !text.contains(&candidate) {
                    break candidate;
                }
            };
            entries.push((name.to_string(), token));
        }

        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn token_for(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, t)| t.as_str())
    }

    /// Replaces every known entity reference with its token.
    pub fn escape(&self, text: &str) -> String {
        if self.is_empty() {
            return text.to_string();
        }
        ENTITY_REGEX
            .replace_all(text, |caps: &regex::Captures| {
                self.token_for(&caps[1])
                    .map(str::to_string)
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }

    /// Replaces every token with the entity reference it stands for.
    pub fn restore(&self, text: &str) -> String {
        self.entries
            .iter()
            .fold(text.to_string(), |acc, (name, token)| {
                if acc.contains(token.as_str()) {
                    acc.replace(token.as_str(), &format!("&{};", name))
                } else {
                    acc
                }
            })
    }
}
