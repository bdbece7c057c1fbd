//! Core data types for findings and the IVIL report.
//!
//! This module contains the fundamental types used throughout nbe2ivil:
//!
//! - [`Finding`] - One normalized vulnerability or open-port record
//! - [`Sender`] - Which scanner produced the data and when
//! - [`Addressee`] - Optional destination workspace/scan
//! - [`IvilReport`] - Everything the IVIL serializer needs
//!
//! # Example
//!
//! ```
//! use nbe2ivil::model::{severity_from_label, Finding};
//! use std::collections::BTreeMap;
//!
//! let finding = Finding {
//!     ip: "10.0.0.5".to_string(),
//!     port: "80/tcp".to_string(),
//!     id: "12345".to_string(),
//!     severity: severity_from_label("Security Hole"),
//!     finding: "Buffer overflow".to_string(),
//!     references: BTreeMap::new(),
//! };
//!
//! assert_eq!(finding.severity, 1);
//! ```

mod finding;
mod report;

pub use finding::*;
pub use report::*;
