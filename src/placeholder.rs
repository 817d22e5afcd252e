//! Text-level rewriting of exported values.
//!
//! The localization service writes variables as `{{name}}` or `{N{name}}`; Android
//! expects positional format specifiers (`%1$s`). Values wrapped in CDATA are
//! rewritten inside the wrapper only.

use std::collections::BTreeSet;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref VARIABLE_REGEX: Regex = Regex::new(r"\{(\d*)\{(.*?)\}\}").unwrap();
    static ref CDATA_REGEX: Regex = Regex::new(r"(?s)^<!\[CDATA\[(.*)\]\]>$").unwrap();
}

/// A `{{name}}` / `{N{name}}` variable found in a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub ordinal: Option<usize>,
    pub name: String,
}

/// Variables in occurrence order.
pub fn extract_variables(input: &str) -> Vec<Variable> {
    VARIABLE_REGEX
        .captures_iter(input)
        .map(|caps| Variable {
            ordinal: caps[1].parse().ok(),
            name: caps[2].to_string(),
        })
        .collect()
}

pub fn contains_variables(input: &str) -> bool {
    VARIABLE_REGEX.is_match(input)
}

/// Rewrites variables into positional `%N$s` specifiers.
///
/// When the value holds at least one variable every literal `%` is doubled first,
/// so the `%` characters introduced by the rewrite are left alone. Values without
/// variables are returned unchanged. Variables without an ordinal become `%1$s`.
pub fn format_variables(input: &str) -> String {
    if !contains_variables(input) {
        return input.to_string();
    }

    let variables = extract_variables(input);
    let distinct_names: BTreeSet<&str> = variables.iter().map(|v| v.name.trim()).collect();
    if distinct_names.len() > 1 && variables.iter().any(|v| v.ordinal.is_none()) {
        // TODO: reject these values once translators have migrated to `{N{name}}`.
        log::warn!(
            "value {:?} has {} distinct variables but some have no ordinal, using %1$s for them",
            input,
            distinct_names.len()
        );
    }

    let escaped = input.replace('%', "%%");
    VARIABLE_REGEX
        .replace_all(&escaped, |caps: &Captures| match caps[1].parse::<usize>() {
            Ok(ordinal) => format!("%{}$s", ordinal),
            Err(_) => "%1$s".to_string(),
        })
        .into_owned()
}

/// Converts `&lt;` / `&gt;` back into `<` / `>`.
pub fn unescape_html_tags(input: &str) -> String {
    input.replace("&lt;", "<").replace("&gt;", ">")
}

/// Returns the content of a value wrapped in `<![CDATA[...]]>`, ignoring
/// surrounding whitespace.
pub fn cdata_content(input: &str) -> Option<&str> {
    CDATA_REGEX
        .captures(input.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

pub fn is_cdata(input: &str) -> bool {
    cdata_content(input).is_some()
}

/// Applies the full value rewrite: variables (inside CDATA when wrapped), then
/// optional HTML tag unescaping.
pub fn process_value(value: &str, unescape_html: bool) -> String {
    let formatted = match cdata_content(value) {
        Some(content) => format!("<![CDATA[{}]]>", format_variables(content)),
        None => format_variables(value),
    };
    if unescape_html {
        unescape_html_tags(&formatted)
    } else {
        formatted
    }
}
