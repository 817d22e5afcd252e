//! The read/write seam shared by resource documents.

use std::{
    fs,
    io::{BufWriter, Read, Write},
    path::Path,
};

use crate::error::Error;

/// A document that can be parsed from XML text and rendered back to it.
///
/// Only [`Parser::from_str`] and [`Parser::to_writer`] are required; reading
/// from files, readers and bytes goes through the text form.
///
/// # Example
///
/// ```rust,no_run
/// use strings_import::{ResourceDocument, traits::Parser};
/// let document = ResourceDocument::read_from("export.xml")?;
/// document.write_to("values/strings.xml")?;
/// Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Parser: Sized {
    /// Parse a complete document held in memory.
    fn from_str(xml: &str) -> Result<Self, Error>;

    /// Render the document into `writer`.
    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error>;

    /// Parse UTF-8 bytes.
    fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        Self::from_str(std::str::from_utf8(bytes)?)
    }

    /// Read everything from `reader` and parse it.
    fn from_reader<R: Read>(mut reader: R) -> Result<Self, Error> {
        let mut xml = String::new();
        reader.read_to_string(&mut xml)?;
        Self::from_str(&xml)
    }

    /// Read a UTF-8 file and parse it.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Self::from_str(&fs::read_to_string(path)?)
    }

    /// Write to a file, replacing its content.
    fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let mut writer = BufWriter::new(fs::File::create(path)?);
        self.to_writer(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Render into an in-memory string.
    fn to_xml_string(&self) -> Result<String, Error> {
        let mut out = Vec::new();
        self.to_writer(&mut out)?;
        String::from_utf8(out).map_err(|e| Error::Utf8(e.utf8_error()))
    }
}
