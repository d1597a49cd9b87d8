//! Minimal OOXML package writer.
//!
//! `.docx` and `.xlsx` files are zip archives of XML parts plus a
//! `[Content_Types].xml` manifest and relationship files. The exporters build
//! each part as a string and hand it to `Package`.

use std::borrow::Cow;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::AppError;

pub(crate) const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

pub(crate) const RELATIONSHIPS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
pub(crate) const OFFICE_DOCUMENT_REL: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
pub(crate) const STYLES_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";

/// A zip-backed OOXML package being written to disk.
pub(crate) struct Package {
    zip: ZipWriter<File>,
    options: SimpleFileOptions,
}

impl Package {
    pub(crate) fn create(path: &Path) -> Result<Self, AppError> {
        let file = File::create(path)
            .map_err(|e| AppError::io(format!("Failed to create '{}': {e}", path.display())))?;
        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated)
            .unix_permissions(0o644);
        Ok(Self {
            zip: ZipWriter::new(file),
            options,
        })
    }

    pub(crate) fn add_part(&mut self, name: &str, xml: &str) -> Result<(), AppError> {
        self.zip
            .start_file(name, self.options)
            .map_err(|e| AppError::io(format!("Failed to add '{name}' to package: {e}")))?;
        self.zip
            .write_all(xml.as_bytes())
            .map_err(|e| AppError::io(format!("Failed to write '{name}': {e}")))?;
        Ok(())
    }

    pub(crate) fn finish(self) -> Result<(), AppError> {
        self.zip
            .finish()
            .map_err(|e| AppError::io(format!("Failed to finalize package: {e}")))?;
        Ok(())
    }
}

/// Escape text for use in XML content and attribute values.
pub(crate) fn escape(text: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(text)
}

/// Relationship part with a single `officeDocument` entry.
pub(crate) fn root_relationships(target: &str) -> String {
    format!(
        r#"{XML_DECLARATION}<Relationships xmlns="{RELATIONSHIPS_NS}"><Relationship Id="rId1" Type="{OFFICE_DOCUMENT_REL}" Target="{target}"/></Relationships>"#
    )
}
