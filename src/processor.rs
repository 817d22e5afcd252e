//! Post-processing of parsed exports: value formatting and splitting into
//! several documents by name pattern.

use std::collections::BTreeMap;

use crate::{
    config::CompiledOptions,
    error::Error,
    pattern::{CATCH_ALL_PATTERN, NamePattern},
    placeholder::process_value,
    traits::Parser,
    types::{Resource, ResourceDocument},
};

/// Formats a single resource for Android: rewrites variables, optionally
/// unescapes HTML tags and marks the resource untranslatable when its name
/// fully matches `untranslatable`.
pub fn format_resource(
    resource: &Resource,
    unescape_html: bool,
    untranslatable: Option<&NamePattern>,
) -> Resource {
    let formatted = resource.update_values(|value| process_value(value, unescape_html));

    match untranslatable {
        Some(pattern) if pattern.matches(formatted.name()) => formatted.update_translatable(false),
        _ => formatted,
    }
}

/// Formats every resource of `document`; comments are dropped when
/// `include_comments` is false.
pub fn format_translation_xml(
    document: &ResourceDocument,
    unescape_html: bool,
    untranslatable: Option<&NamePattern>,
    include_comments: bool,
) -> ResourceDocument {
    document.map(|resource| {
        let formatted = format_resource(resource, unescape_html, untranslatable);
        if include_comments {
            formatted
        } else {
            formatted.remove_comments()
        }
    })
}

/// Splits `document` into one document per pattern plus a catch-all.
///
/// Each pattern keeps the resources whose name fully matches it, renamed to the
/// first capture group; a match without a captured group is dropped. Patterns
/// matching nothing are left out. The catch-all, keyed by [`CATCH_ALL_PATTERN`],
/// holds every resource matched by no pattern.
pub fn split_translation_xml(
    document: &ResourceDocument,
    patterns: &[NamePattern],
) -> BTreeMap<String, ResourceDocument> {
    let mut documents = BTreeMap::new();

    for pattern in patterns {
        let matched = document.filter(pattern);
        if matched.is_empty() {
            log::debug!("split pattern `{}` matched no resources", pattern);
            continue;
        }

        let renamed = matched.filter_map(|resource| {
            pattern
                .first_group(resource.name())
                .map(|name| resource.update_name(name))
        });
        log::debug!("split pattern `{}` matched {} resources", pattern, renamed.len());
        documents.insert(pattern.as_str().to_string(), renamed);
    }

    let unmatched = patterns
        .iter()
        .fold(document.clone(), |remaining, pattern| remaining.filter_not(pattern));
    documents.insert(CATCH_ALL_PATTERN.to_string(), unmatched);

    documents
}

/// Formats `document` and splits the result according to `options`.
pub fn process_translation_xml(
    document: &ResourceDocument,
    options: &CompiledOptions,
) -> BTreeMap<String, ResourceDocument> {
    let formatted = format_translation_xml(
        document,
        options.unescape_html_tags,
        options.untranslatable_strings_regex.as_ref(),
        options.include_comments,
    );
    split_translation_xml(&formatted, &options.split_patterns)
}

/// Serializes every split document.
pub fn serialize_documents(
    documents: &BTreeMap<String, ResourceDocument>,
) -> Result<BTreeMap<String, String>, Error> {
    let mut out = BTreeMap::new();
    for (tag, document) in documents {
        out.insert(tag.clone(), document.to_xml_string()?);
    }
    Ok(out)
}
