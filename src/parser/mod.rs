//! NBE input parsing.
//!
//! NBE is the legacy pipe-delimited report format written by Nessus-family
//! scanners. The only record type this crate cares about is `results`;
//! everything else (`timestamps`, scan metadata) is skipped.

mod nbe;

pub use nbe::NbeParser;
