//! Import settings.
//!
//! Options are plain serde data so they can come from any configuration source;
//! [`ImportOptions::compile`] validates the regular expressions once up front.

use std::{collections::BTreeMap, io::Read};

use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    pattern::{NamePattern, TABLET_SPLIT_PATTERN},
};

pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_RES_FILE_NAME: &str = "strings";

/// Settings for post-processing and writing one project's exports.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImportOptions {
    /// Language whose files go to the unqualified `values` folder.
    pub default_lang: String,
    /// Base name of the generated resource files.
    pub res_file_name: String,
    /// Name patterns that route resources into separate documents.
    pub split_patterns: Vec<String>,
    pub unescape_html_tags: bool,
    /// Names fully matching this pattern are written with `translatable="false"`.
    pub untranslatable_strings_regex: Option<String>,
    pub include_comments: bool,
    /// Per-language replacement of the `values-*` output folder.
    pub language_values_override_path_map: BTreeMap<String, String>,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            default_lang: DEFAULT_LANGUAGE.to_string(),
            res_file_name: DEFAULT_RES_FILE_NAME.to_string(),
            split_patterns: vec![TABLET_SPLIT_PATTERN.to_string()],
            unescape_html_tags: true,
            untranslatable_strings_regex: None,
            include_comments: true,
            language_values_override_path_map: BTreeMap::new(),
        }
    }
}

impl ImportOptions {
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, Error> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Compiles the split and untranslatable patterns.
    pub fn compile(&self) -> Result<CompiledOptions, Error> {
        Ok(CompiledOptions {
            split_patterns: NamePattern::compile_all(&self.split_patterns)?,
            unescape_html_tags: self.unescape_html_tags,
            untranslatable_strings_regex: self
                .untranslatable_strings_regex
                .as_deref()
                .map(NamePattern::new)
                .transpose()?,
            include_comments: self.include_comments,
        })
    }
}

/// Post-processing options with validated patterns.
#[derive(Debug, Clone)]
pub struct CompiledOptions {
    pub split_patterns: Vec<NamePattern>,
    pub unescape_html_tags: bool,
    pub untranslatable_strings_regex: Option<NamePattern>,
    pub include_comments: bool,
}
