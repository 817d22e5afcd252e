//! End-to-end import of translation exports.
//!
//! Fetching exports and writing resource files belong to the caller; they are
//! plugged in through [`TranslationSource`] and [`TranslationWriter`].

use std::collections::BTreeMap;

use crate::{
    config::{CompiledOptions, ImportOptions},
    error::Error,
    formats::parse_document,
    processor::{process_translation_xml, serialize_documents},
};

/// Supplies the raw `strings.xml` export for a language.
pub trait TranslationSource {
    fn fetch_export(&self, language_code: &str) -> Result<String, Error>;
}

/// Persists the serialized documents produced for one language.
///
/// `documents` maps each split pattern (or the catch-all pattern) to a complete
/// XML document. The writer decides folders from the language, the default
/// language and the optional per-language folder overrides; `res_file_name` is
/// the base name of the files it writes.
pub trait TranslationWriter {
    fn save(
        &mut self,
        documents: &BTreeMap<String, String>,
        res_file_name: &str,
        language_code: &str,
        default_language: &str,
        values_override_paths: &BTreeMap<String, String>,
    ) -> Result<(), Error>;
}

/// Parses, post-processes and serializes a single export.
pub fn process_export(xml: &str, options: &CompiledOptions) -> Result<BTreeMap<String, String>, Error> {
    let document = parse_document(xml)?;
    let split = process_translation_xml(&document, options);
    serialize_documents(&split)
}

/// Runs imports for a set of languages with one set of options.
#[derive(Debug, Clone)]
pub struct Importer {
    options: ImportOptions,
    compiled: CompiledOptions,
}

impl Importer {
    pub fn new(options: ImportOptions) -> Result<Self, Error> {
        let compiled = options.compile()?;
        Ok(Self { options, compiled })
    }

    pub fn options(&self) -> &ImportOptions {
        &self.options
    }

    pub fn import_language<S, W>(&self, source: &S, writer: &mut W, language_code: &str) -> Result<(), Error>
    where
        S: TranslationSource + ?Sized,
        W: TranslationWriter + ?Sized,
    {
        log::info!("Retrieving translation export for language code: {}", language_code);
        let xml = source.fetch_export(language_code)?;

        let documents = process_export(&xml, &self.compiled)?;
        log::info!(
            "Writing {} document(s) for language code: {}",
            documents.len(),
            language_code
        );
        writer.save(
            &documents,
            &self.options.res_file_name,
            language_code,
            &self.options.default_lang,
            &self.options.language_values_override_path_map,
        )
    }

    /// Imports every language in order, stopping at the first failure.
    pub fn import_languages<S, W>(&self, source: &S, writer: &mut W, language_codes: &[&str]) -> Result<(), Error>
    where
        S: TranslationSource + ?Sized,
        W: TranslationWriter + ?Sized,
    {
        log::info!("Importing languages: [{}]", language_codes.join(", "));
        for code in language_codes {
            self.import_language(source, writer, code).map_err(|e| {
                log::error!("Import failed for language code {}: {}", code, e);
                Error::import_error(*code, e)
            })?;
        }
        Ok(())
    }
}
