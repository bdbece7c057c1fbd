use serde::{Deserialize, Serialize};

use super::Finding;

/// Identifies the scanner that produced the input and when it ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sender {
    pub scanner: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub timestamp: String,
}

/// Names the workspace/scan the findings are destined for.
///
/// Only present when the caller asked for one; the IVIL document omits
/// the addressee block entirely otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Addressee {
    pub workspace: String,
    pub scan: String,
}

/// Complete conversion result handed to the IVIL serializer.
///
/// Findings are kept in input order; the serializer emits them as one
/// `<findings>` block after the whole input has been consumed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IvilReport {
    pub sender: Sender,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addressee: Option<Addressee>,
    pub findings: Vec<Finding>,
}

impl IvilReport {
    pub fn new(sender: Sender, addressee: Option<Addressee>, findings: Vec<Finding>) -> Self {
        Self {
            sender,
            addressee,
            findings,
        }
    }
}
