//! Cross-reference extraction from free finding text.
//!
//! Scanner plugin output routinely embeds identifiers for external
//! vulnerability databases (CVE, BID, OSVDB, CWE). This module pulls them
//! out so the IVIL document can carry them as structured references
//! instead of leaving them buried in prose.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Reference type name (lowercase, used as the XML element name) paired
/// with the pattern that recognizes identifiers of that type.
static REFERENCE_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    vec![
        ("cve", Regex::new(r"CVE-\d{4}-\d{4,}").expect("valid regex")),
        ("bid", Regex::new(r"BID\s*:\s*(\d+)").expect("valid regex")),
        ("osvdb", Regex::new(r"OSVDB\s*:\s*(\d+)").expect("valid regex")),
        ("cwe", Regex::new(r"CWE[:-](\d+)").expect("valid regex")),
    ]
});

/// Extract cross references from finding text.
///
/// Returns a map from lowercase reference type to the identifiers found,
/// in first-seen order with duplicates removed. Types with no matches are
/// absent from the map, so an empty map means "no references".
pub fn extract(text: &str) -> BTreeMap<String, Vec<String>> {
    let mut references = BTreeMap::new();

    for (name, pattern) in REFERENCE_PATTERNS.iter() {
        let mut ids: Vec<String> = Vec::new();
        for captures in pattern.captures_iter(text) {
            // Patterns with a capture group carry the bare number; prefix
            // it with the canonical type name. CVE ids are already whole.
            let id = match captures.get(1) {
                Some(num) => format!("{}-{}", name.to_uppercase(), num.as_str()),
                None => captures[0].to_string(),
            };
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        if !ids.is_empty() {
            references.insert((*name).to_string(), ids);
        }
    }

    references
}
