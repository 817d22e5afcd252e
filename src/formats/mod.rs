//! Reading and writing the Android `strings.xml` resource dialect.
//!
//! - [`entities`] hides undeclared entity references from the XML reader.
//! - [`handler`] is the parse-event state machine.
//! - [`android_strings`] drives the reader and renders documents back to XML.

pub mod android_strings;
pub mod entities;
pub mod handler;

pub use android_strings::{parse_document, write_document};
pub use entities::EntityReplacements;
pub use handler::ParserState;

pub(crate) const RESOURCES_ELEMENT: &str = "resources";
pub(crate) const STRING_ELEMENT: &str = "string";
pub(crate) const PLURALS_ELEMENT: &str = "plurals";
pub(crate) const STRING_ARRAY_ELEMENT: &str = "string-array";
pub(crate) const ITEM_ELEMENT: &str = "item";

pub(crate) const NAME_ATTRIBUTE: &str = "name";
pub(crate) const TRANSLATABLE_ATTRIBUTE: &str = "translatable";
pub(crate) const QUANTITY_ATTRIBUTE: &str = "quantity";
