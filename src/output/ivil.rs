//! IVIL XML document emission.
//!
//! IVIL is a small XML dialect for exchanging vulnerability findings
//! between scanners and vulnerability-management systems. This module owns
//! the schema; the rest of the crate only supplies an [`IvilReport`].
//!
//! The findings block is emitted as one unit after the whole input has
//! been consumed, so the document is always well formed.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;
use thiserror::Error;

use crate::model::{Finding, IvilReport};

/// Schema revision emitted in the root element.
const IVIL_VERSION: &str = "0.2";

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to write IVIL document: {0}")]
    Io(#[from] std::io::Error),
    #[error("IVIL document is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Serialize the report as a complete IVIL document.
///
/// Layout: XML declaration, `<ivil>` root, optional `<addressee>` (only
/// when the report names a destination workspace), `<sender>`, then the
/// `<findings>` block with one `<finding>` element per input finding, in
/// input order.
pub fn write_report<W: Write>(out: W, report: &IvilReport, pretty: bool) -> Result<(), OutputError> {
    let mut writer = if pretty {
        Writer::new_with_indent(out, b' ', 2)
    } else {
        Writer::new(out)
    };

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new("ivil");
    root.push_attribute(("version", IVIL_VERSION));
    writer.write_event(Event::Start(root))?;

    if let Some(addressee) = &report.addressee {
        let mut element = BytesStart::new("addressee");
        element.push_attribute(("workspace", addressee.workspace.as_str()));
        element.push_attribute(("scan", addressee.scan.as_str()));
        writer.write_event(Event::Empty(element))?;
    }

    let mut sender = BytesStart::new("sender");
    sender.push_attribute(("scanner", report.sender.scanner.as_str()));
    if let Some(version) = &report.sender.version {
        sender.push_attribute(("version", version.as_str()));
    }
    sender.push_attribute(("timestamp", report.sender.timestamp.as_str()));
    writer.write_event(Event::Empty(sender))?;

    writer.write_event(Event::Start(BytesStart::new("findings")))?;
    for finding in &report.findings {
        write_finding(&mut writer, finding)?;
    }
    writer.write_event(Event::End(BytesEnd::new("findings")))?;

    writer.write_event(Event::End(BytesEnd::new("ivil")))?;

    Ok(())
}

/// Serialize the report to a string (for tests and in-memory use).
pub fn report_to_string(report: &IvilReport, pretty: bool) -> Result<String, OutputError> {
    let mut buffer = Vec::new();
    write_report(&mut buffer, report, pretty)?;
    Ok(String::from_utf8(buffer)?)
}

fn write_finding<W: Write>(writer: &mut Writer<W>, finding: &Finding) -> Result<(), OutputError> {
    writer.write_event(Event::Start(BytesStart::new("finding")))?;

    write_text_element(writer, "ip", &finding.ip)?;
    write_text_element(writer, "port", &finding.port)?;
    write_text_element(writer, "id", &finding.id)?;
    write_text_element(writer, "severity", &finding.severity.to_string())?;
    write_text_element(writer, "finding_txt", &finding.finding)?;

    // No <references> element at all when the finding carries none.
    if !finding.references.is_empty() {
        writer.write_event(Event::Start(BytesStart::new("references")))?;
        for (kind, ids) in &finding.references {
            for id in ids {
                write_text_element(writer, kind, id)?;
            }
        }
        writer.write_event(Event::End(BytesEnd::new("references")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("finding")))?;
    Ok(())
}

fn write_text_element<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> Result<(), OutputError> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
