//! Upload payloads
//!
//! Template documents and mailing lists are uploaded as named byte buffers.
//! The file extension decides how the service interprets them.

use crate::error::{Error, Result};
use crate::types::{AddressFont, DocumentType, MailingListFormat, TemplateType};
use base64::Engine as _;
use std::fs;
use std::path::Path;

/// Delimiter used when a delimited mailing list does not set one
pub const DEFAULT_MAPPING_DELIMITER: &str = "\t";

/// Read a file, returning its name and contents
fn read_named(path: &Path) -> Result<(String, Vec<u8>)> {
    let data = fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::invalid_file(format!("File not found: {}", path.display()))
        } else {
            Error::Io(e)
        }
    })?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| Error::invalid_file(format!("No file name in {}", path.display())))?;

    Ok((name, data))
}

/// Lower-cased extension; a name without a dot is its own extension
fn extension(file_name: &str) -> String {
    file_name
        .rsplit_once('.')
        .map_or(file_name, |(_, ext)| ext)
        .to_lowercase()
}

fn encode(data: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(data)
}

// ============================================================================
// Template File
// ============================================================================

/// A template document (`.doc`, `.docx`, `.rtf` or `.pdf`)
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateFile {
    /// Service-assigned identifier, set after upload
    pub guid: Option<String>,
    pub file_name: String,
    pub file_data: Vec<u8>,
    pub template_name: String,
    pub document_type: DocumentType,
    pub address_font_code: AddressFont,
    pub template_type: TemplateType,
    pub background_name: String,
    pub protected_area_password: String,
    pub encryption_password: String,
    pub instance_page_numbers: String,
    pub addressed_document: bool,
    pub can_begin_on_back: bool,
    pub next_template_can_begin_on_back: bool,
    pub bleed_supplied: bool,
    pub copies: u32,
    pub instances: u32,
    pub cycle_instances_on_copies: bool,
}

impl TemplateFile {
    /// Load a template from disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let (name, data) = read_named(path.as_ref())?;
        Self::from_bytes(name, data)
    }

    /// Build a template from a file name and its contents
    pub fn from_bytes(file_name: impl Into<String>, data: impl Into<Vec<u8>>) -> Result<Self> {
        let file_name = file_name.into();

        let template_type = match extension(&file_name).as_str() {
            "doc" | "docx" | "rtf" => TemplateType::Document,
            "pdf" => TemplateType::PreformattedStream,
            ext => {
                return Err(Error::invalid_file(format!(
                    "Unsupported template file .{ext}, must be .doc, .docx, .rtf or .pdf"
                )))
            }
        };

        Ok(Self {
            guid: None,
            file_name,
            file_data: data.into(),
            template_name: String::new(),
            document_type: DocumentType::A4Letter,
            address_font_code: AddressFont::Arial10,
            template_type,
            background_name: String::new(),
            protected_area_password: String::new(),
            encryption_password: String::new(),
            instance_page_numbers: String::new(),
            addressed_document: true,
            can_begin_on_back: false,
            next_template_can_begin_on_back: false,
            bleed_supplied: true,
            copies: 1,
            instances: 1,
            cycle_instances_on_copies: false,
        })
    }

    /// File contents, base64-encoded for the wire
    pub fn encoded_data(&self) -> String {
        encode(&self.file_data)
    }
}

// ============================================================================
// Mailing List File
// ============================================================================

/// Options that depend on the mailing list layout
#[derive(Debug, Clone, Default)]
pub struct MailingListOptions {
    /// Worksheet to read, required for Excel files
    pub sheet_name: Option<String>,
    /// Layout of a `.txt` file; ignored for other extensions
    pub data_format: Option<MailingListFormat>,
    /// Column delimiter, required for delimited files
    pub mapping_delimiter: Option<String>,
    /// Column widths, required for fixed-width files
    pub mapping_fixed_width_chars: Option<String>,
}

impl MailingListOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the worksheet name
    #[must_use]
    pub fn sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = Some(name.into());
        self
    }

    /// Set the text file layout
    #[must_use]
    pub fn data_format(mut self, format: MailingListFormat) -> Self {
        self.data_format = Some(format);
        self
    }

    /// Set the column delimiter
    #[must_use]
    pub fn mapping_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.mapping_delimiter = Some(delimiter.into());
        self
    }

    /// Set the fixed column widths
    #[must_use]
    pub fn mapping_fixed_width_chars(mut self, chars: impl Into<String>) -> Self {
        self.mapping_fixed_width_chars = Some(chars.into());
        self
    }
}

/// A mailing list (`.csv`, `.xls`, `.xlsx` or `.txt`)
#[derive(Debug, Clone, PartialEq)]
pub struct MailingListFile {
    /// Service-assigned identifier, set after upload
    pub guid: Option<String>,
    pub file_name: String,
    pub file_data: Vec<u8>,
    pub headers: bool,
    pub mapping_name: String,
    pub data_format: MailingListFormat,
    pub mapping_delimiter: String,
    pub sheet_name: String,
    pub mapping_fixed_width_chars: String,
}

impl MailingListFile {
    /// Load a mailing list from disk
    pub fn from_path(path: impl AsRef<Path>, options: MailingListOptions) -> Result<Self> {
        let (name, data) = read_named(path.as_ref())?;
        Self::from_bytes(name, data, options)
    }

    /// Build a mailing list from a file name and its contents
    pub fn from_bytes(
        file_name: impl Into<String>,
        data: impl Into<Vec<u8>>,
        options: MailingListOptions,
    ) -> Result<Self> {
        let file_name = file_name.into();
        let ext = extension(&file_name);

        let data_format = match ext.as_str() {
            "csv" => MailingListFormat::Csv,
            "xls" | "xlsx" => {
                if options.sheet_name.as_deref().map_or(true, str::is_empty) {
                    return Err(Error::invalid_file(format!(
                        "A sheet name must be provided for .{ext} files"
                    )));
                }
                MailingListFormat::Excel
            }
            "txt" => match options.data_format {
                Some(
                    format @ (MailingListFormat::TabSeparated
                    | MailingListFormat::Delimited
                    | MailingListFormat::FixedWidth),
                ) => format,
                _ => {
                    return Err(Error::invalid_file(
                        "Text mailing lists must be \"Tab separated\", \"Delimited\" or \"Fixed width\"",
                    ))
                }
            },
            _ => {
                return Err(Error::invalid_file(format!(
                    "Unsupported mailing list file .{ext}, must be .txt, .csv, .xls or .xlsx"
                )))
            }
        };

        if data_format == MailingListFormat::Delimited && options.mapping_delimiter.is_none() {
            return Err(Error::invalid_file(
                "A mapping delimiter must be provided for delimited files",
            ));
        }
        if data_format == MailingListFormat::FixedWidth
            && options.mapping_fixed_width_chars.is_none()
        {
            return Err(Error::invalid_file(
                "Fixed column widths must be provided for fixed-width files",
            ));
        }

        Ok(Self {
            guid: None,
            file_name,
            file_data: data.into(),
            headers: true,
            mapping_name: String::new(),
            data_format,
            mapping_delimiter: options
                .mapping_delimiter
                .unwrap_or_else(|| DEFAULT_MAPPING_DELIMITER.to_string()),
            sheet_name: options.sheet_name.unwrap_or_default(),
            mapping_fixed_width_chars: options.mapping_fixed_width_chars.unwrap_or_default(),
        })
    }

    /// File contents, base64-encoded for the wire
    pub fn encoded_data(&self) -> String {
        encode(&self.file_data)
    }
}
