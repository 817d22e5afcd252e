#![forbid(unsafe_code)]
//! Import translation exports into Android `strings.xml` resources.
//!
//! Exports from a hosted localization service arrive as loosely structured
//! `strings.xml` files with `{{variable}}` placeholders, HTML-escaped markup,
//! comments and CDATA. This crate parses them losslessly into a
//! [`ResourceDocument`], rewrites them for Android and splits them into several
//! documents by resource name.
//!
//! # Quick Start
//!
//! ```rust
//! use strings_import::{ImportOptions, importer::process_export};
//!
//! let export = r#"<resources>
//!     <string name="greeting">Hello {{name}}, 100% ready</string>
//!     <string name="greeting_tablet">Welcome back {{name}}</string>
//! </resources>"#;
//!
//! let options = ImportOptions::default().compile()?;
//! let documents = process_export(export, &options)?;
//!
//! assert!(documents["^(.+)_tablet$"].contains(r#"<string name="greeting">Welcome back %1$s</string>"#));
//! assert!(documents["^(.+)$"].contains("Hello %1$s, 100%% ready"));
//! # Ok::<(), strings_import::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod formats;
pub mod importer;
pub mod pattern;
pub mod placeholder;
pub mod processor;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    config::{CompiledOptions, ImportOptions},
    error::Error,
    formats::{parse_document, write_document},
    importer::{Importer, TranslationSource, TranslationWriter},
    pattern::{CATCH_ALL_PATTERN, NamePattern, TABLET_SPLIT_PATTERN},
    processor::{
        format_resource, format_translation_xml, process_translation_xml, split_translation_xml,
    },
    traits::Parser,
    types::{
        ArrayItem, PluralItem, PluralsElement, Quantity, Resource, ResourceDocument,
        StringArrayElement, StringElement,
    },
};
