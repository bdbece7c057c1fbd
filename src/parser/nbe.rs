use anyhow::Result;
use regex::Regex;
use std::io::BufRead;
use std::sync::LazyLock;
use tracing::debug;

use crate::model::{severity_from_label, Finding};
use crate::references;

/// An NBE "results" line has exactly these `|`-delimited fields.
const RESULT_FIELDS: usize = 7;

/// Recognizes a well-formed port designation anywhere in the raw field.
/// The matched substring becomes the stored port, dropping trailing
/// garbage such as the service name Nessus prepends ("https (443/tcp)").
static PORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+|general)/(tcp|udp|icmp)").expect("valid regex"));

/// Path fragment nikto embeds in its finding text ("/cgi-bin/test.cgi: ...").
static NIKTO_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/[\w/-]+:").expect("valid regex"));

/// Single-pass parser turning NBE lines into normalized [`Finding`]s.
///
/// The parser is constructed once per conversion with the name of the
/// scanner that produced the input, because one normalization step (the
/// plugin-id path suffix) only applies to nikto output.
pub struct NbeParser {
    scanner: String,
}

impl NbeParser {
    pub fn new(scanner: impl Into<String>) -> Self {
        Self {
            scanner: scanner.into(),
        }
    }

    /// Read the whole input and return the findings in input order.
    ///
    /// Malformed lines and record types other than `results` are skipped;
    /// only I/O failures are errors.
    pub fn parse<R: BufRead>(&self, reader: R) -> Result<Vec<Finding>> {
        let mut findings = Vec::new();

        for line in reader.lines() {
            let line = line?;
            if let Some(finding) = self.parse_line(&line) {
                findings.push(finding);
            }
        }

        Ok(findings)
    }

    /// Convert one line, returning `None` for anything that is not a
    /// complete "results" record.
    pub fn parse_line(&self, line: &str) -> Option<Finding> {
        // Bounded split: `|` inside the free-text field stays in the text
        // instead of shifting the fields that follow.
        let fields: Vec<&str> = line.splitn(RESULT_FIELDS, '|').collect();

        if fields[0] != "results" {
            return None;
        }
        if fields.len() < RESULT_FIELDS {
            debug!(line, "skipping short results record");
            return None;
        }

        let ip = fields[2].to_string();
        let port = normalize_port(fields[3]);
        let raw_text = fields[6];

        let mut id = if fields[4].is_empty() {
            "portscan".to_string()
        } else {
            fields[4].to_string()
        };

        // Nikto reports everything under one plugin id; the path at the
        // start of the finding text disambiguates. Matched against the raw
        // text, before escape sequences are resolved.
        if self.scanner.eq_ignore_ascii_case("nikto") {
            if let Some(m) = NIKTO_PATH_RE.find(raw_text) {
                let path = m.as_str().trim_end_matches(':');
                id = format!("{id} {path}");
            }
        }

        let severity = severity_from_label(fields[5]);

        let mut finding = normalize_text(raw_text);
        if finding.is_empty() {
            finding = format!("Port {port} is open");
        }

        let references = references::extract(&finding);

        Some(Finding {
            ip,
            port,
            id,
            severity,
            finding,
            references,
        })
    }
}

/// Normalize the raw NBE port field.
///
/// A purely numeric port gets `/tcp` appended first (NBE omits the
/// protocol for plain port scans). If the result contains a recognizable
/// `<number>/<proto>` or `general/<proto>` designation, exactly that
/// substring is kept; otherwise the raw field passes through unchanged.
/// An empty field stays empty.
fn normalize_port(raw: &str) -> String {
    let port = if !raw.is_empty() && raw.chars().all(|c| c.is_ascii_digit()) {
        format!("{raw}/tcp")
    } else {
        raw.to_string()
    };

    match PORT_RE.find(&port) {
        Some(m) => m.as_str().to_string(),
        None => port,
    }
}

/// Resolve the literal escape sequences NBE uses for line breaks.
///
/// `\r\n` and bare `\r` are replaced first so a `\r\n` pair never turns
/// into two newlines.
fn normalize_text(raw: &str) -> String {
    raw.replace("\\r\\n", "\n")
        .replace("\\r", "\n")
        .replace("\\n", "\n")
}
