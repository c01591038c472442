//! XML document output.
//!
//! Layout:
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <Records>
//!   <Row>
//!     <Column>value</Column>
//!     <Empty/>
//!   </Row>
//! </Records>
//! ```

use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use serde::{Deserialize, Serialize};

use xmlprep_core::{PreparedTable, is_invalid_tag_char, sanitize_tag};

use crate::error::ExportError;

pub const DEFAULT_ROOT_ELEMENT: &str = "Records";
pub const DEFAULT_ROW_ELEMENT: &str = "Row";

/// Element names and formatting for the XML document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct XmlOptions {
    pub root_element: String,
    pub row_element: String,
    /// Spaces per nesting level.
    pub indent: usize,
}

impl Default for XmlOptions {
    fn default() -> Self {
        Self {
            root_element: DEFAULT_ROOT_ELEMENT.to_string(),
            row_element: DEFAULT_ROW_ELEMENT.to_string(),
            indent: 2,
        }
    }
}

/// Sanitizes a user-supplied element name, rejecting names that end up empty.
pub fn element_name(name: &str) -> Result<String, ExportError> {
    let tag = sanitize_tag(name);
    if tag.is_empty() {
        return Err(ExportError::InvalidElementName {
            name: name.to_string(),
        });
    }
    Ok(tag)
}

fn check_column_tags(table: &PreparedTable) -> Result<(), ExportError> {
    for (index, tag) in table.tags().enumerate() {
        if tag.is_empty() || tag.chars().any(|c| c.is_whitespace() || is_invalid_tag_char(c)) {
            return Err(ExportError::InvalidColumnName {
                column: index + 1,
                name: tag.to_string(),
            });
        }
    }
    Ok(())
}

/// Writes `table` as an XML document and returns the number of records written.
pub fn write_xml<W: Write>(
    writer: W,
    table: &PreparedTable,
    options: &XmlOptions,
) -> Result<usize, ExportError> {
    let root = element_name(&options.root_element)?;
    let row = element_name(&options.row_element)?;
    check_column_tags(table)?;

    let mut xml = Writer::new_with_indent(writer, b' ', options.indent);
    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(ExportError::xml)?;
    xml.write_event(Event::Start(BytesStart::new(root.as_str())))
        .map_err(ExportError::xml)?;

    for record in &table.rows {
        xml.write_event(Event::Start(BytesStart::new(row.as_str())))
            .map_err(ExportError::xml)?;
        for (column, value) in table.columns.iter().zip(record) {
            let tag = column.tag.as_str();
            if value.is_empty() {
                xml.write_event(Event::Empty(BytesStart::new(tag)))
                    .map_err(ExportError::xml)?;
                continue;
            }
            xml.write_event(Event::Start(BytesStart::new(tag)))
                .map_err(ExportError::xml)?;
            xml.write_event(Event::Text(BytesText::new(value)))
                .map_err(ExportError::xml)?;
            xml.write_event(Event::End(BytesEnd::new(tag)))
                .map_err(ExportError::xml)?;
        }
        xml.write_event(Event::End(BytesEnd::new(row.as_str())))
            .map_err(ExportError::xml)?;
    }

    xml.write_event(Event::End(BytesEnd::new(root.as_str())))
        .map_err(ExportError::xml)?;
    let mut inner = xml.into_inner();
    inner.write_all(b"\n").map_err(ExportError::xml)?;
    inner.flush().map_err(ExportError::xml)?;
    Ok(table.rows.len())
}
