mod ivil;

pub use ivil::{report_to_string, write_report, OutputError};
