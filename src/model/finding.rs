use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Severity labels used by NBE "results" records, mapped to IVIL levels.
///
/// Anything outside the four known labels maps to 0 (unknown). The table
/// is fixed; there is no way to extend it at runtime.
pub fn severity_from_label(label: &str) -> u8 {
    match label {
        "Security Hole" => 1,
        "Security Warning" => 2,
        "Security Note" => 3,
        "Open port" => 4,
        _ => 0,
    }
}

/// One normalized finding extracted from a single NBE "results" line.
///
/// A finding is fully populated at construction time and never mutated
/// afterwards; the driver accumulates them in input order and hands the
/// whole sequence to the IVIL serializer once the input is exhausted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Host the finding applies to, verbatim from the input.
    pub ip: String,
    /// Normalized port, `"<number>/<proto>"` or `"general/<proto>"` where
    /// recognizable, otherwise the raw field unchanged.
    pub port: String,
    /// Scanner plugin id; `"portscan"` when the input field was empty.
    pub id: String,
    /// 0 = unknown, 1 = hole, 2 = warning, 3 = note, 4 = open port.
    pub severity: u8,
    /// Free finding text with escape sequences resolved.
    pub finding: String,
    /// Lowercase reference type (cve, bid, ...) to ordered identifiers.
    /// Empty map means the finding carries no cross references.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub references: BTreeMap<String, Vec<String>>,
}
