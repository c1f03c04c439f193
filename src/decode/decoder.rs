//! Response document decoder
//!
//! Walks the field nodes of a Docmail XML response, building a
//! [`DecodedRecord`] or stopping at the first embedded error block.

use super::label::normalize_label;
use super::types::{DecodedRecord, TargetKind};
use super::value::coerce_value;
use crate::error::{Error, Fault, Result};
use quick_xml::events::Event;
use quick_xml::Reader;

/// Canonical name of the field that marks an error block
pub const ERROR_CODE_FIELD: &str = "error_code";

/// Child positions inside a field node
const LABEL_INDEX: usize = 0;
const VALUE_INDEX: usize = 1;
const ERROR_INDEX: usize = 3;
const DESCRIPTION_INDEX: usize = 5;

/// Decoder for Docmail XML responses.
///
/// Holds no state; a single instance can be shared freely across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseDecoder;

impl ResponseDecoder {
    /// Create a new decoder
    pub fn new() -> Self {
        Self
    }

    /// Decode a response into a generic record
    pub fn decode(&self, xml: &str) -> Result<DecodedRecord> {
        self.decode_as(xml)
    }

    /// Decode a response and bind it into a target kind.
    ///
    /// Runs the kind's post-processing hook, if it has one, once every field
    /// has been decoded.
    pub fn decode_as<K: TargetKind>(&self, xml: &str) -> Result<K> {
        let root = parse_document(xml)?;

        if root.children.is_empty() {
            return Err(Error::malformed("response root has no field nodes"));
        }

        let mut record = DecodedRecord::new();
        for (index, node) in root.children.iter().enumerate() {
            decode_field(node, index, &mut record)?;
        }

        if let Some(post_process) = K::POST_PROCESS {
            post_process(&mut record);
        }

        K::from_record(record)
    }
}

/// Decode one field node into the record, or fail with the fault it carries
fn decode_field(node: &XmlNode, index: usize, record: &mut DecodedRecord) -> Result<()> {
    let (Some(label), Some(value)) = (node.child(LABEL_INDEX), node.child(VALUE_INDEX)) else {
        return Err(Error::malformed(format!(
            "field node {index} has {} child element(s), expected at least 2",
            node.children.len()
        )));
    };

    let key = normalize_label(label);
    let value = coerce_value(value)?;

    if key == ERROR_CODE_FIELD {
        let (Some(error), Some(description)) =
            (node.child(ERROR_INDEX), node.child(DESCRIPTION_INDEX))
        else {
            return Err(Error::malformed(format!(
                "error node {index} has {} child element(s), expected at least 6",
                node.children.len()
            )));
        };

        return Err(Error::Fault(Fault::new(
            value.to_string(),
            coerce_value(error)?.to_string(),
            coerce_value(description)?.to_string(),
        )));
    }

    record.insert(key, value);
    Ok(())
}

// ============================================================================
// XML Tree
// ============================================================================

/// Minimal element tree: only child elements and leaf text matter here
#[derive(Debug, Default)]
struct XmlNode {
    text: String,
    children: Vec<XmlNode>,
}

impl XmlNode {
    /// Text of the child element at `index`
    fn child(&self, index: usize) -> Option<&str> {
        self.children.get(index).map(|c| c.text.as_str())
    }
}

/// Parse an XML document into its root element
fn parse_document(xml: &str) -> Result<XmlNode> {
    let mut reader = Reader::from_str(xml);

    let mut stack: Vec<XmlNode> = Vec::new();
    let mut root: Option<XmlNode> = None;

    loop {
        let event = reader.read_event().map_err(|e| {
            Error::malformed(format!(
                "XML error at position {}: {e}",
                reader.buffer_position()
            ))
        })?;

        match event {
            Event::Start(_) => {
                if root.is_some() {
                    return Err(Error::malformed("content after the root element"));
                }
                stack.push(XmlNode::default());
            }
            Event::Empty(_) => {
                if root.is_some() {
                    return Err(Error::malformed("content after the root element"));
                }
                attach(XmlNode::default(), &mut stack, &mut root);
            }
            Event::End(_) => {
                let mut node = stack
                    .pop()
                    .ok_or_else(|| Error::malformed("unexpected closing tag"))?;
                // Only leaves carry values; text between child elements is layout
                if !node.children.is_empty() {
                    node.text.clear();
                }
                attach(node, &mut stack, &mut root);
            }
            Event::Text(e) => {
                let text = e
                    .unescape()
                    .map_err(|e| Error::malformed(format!("invalid text content: {e}")))?;
                push_text(&text, &mut stack)?;
            }
            Event::CData(e) => {
                let text = std::str::from_utf8(&e)
                    .map_err(|e| Error::malformed(format!("invalid CDATA content: {e}")))?;
                push_text(text, &mut stack)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(Error::malformed("unexpected end of document"));
    }

    root.ok_or_else(|| Error::malformed("document has no root element"))
}

/// Attach a finished element to its parent, or make it the root
fn attach(node: XmlNode, stack: &mut [XmlNode], root: &mut Option<XmlNode>) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => *root = Some(node),
    }
}

/// Append text to the open element; text outside the root is an error
fn push_text(text: &str, stack: &mut [XmlNode]) -> Result<()> {
    match stack.last_mut() {
        Some(node) => {
            node.text.push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(Error::malformed("text outside the root element")),
    }
}
