//! ZIP export of a congregation's publisher records
//!
//! - [`flow`] - start, poll, download and save
//! - [`policy`] - poll interval, attempt budget, cancel signal
//! - [`filename`] - choosing the saved file name

pub mod filename;
pub mod flow;
pub mod policy;

pub use filename::{default_file_name, extract_file_name, resolve_file_name};
pub use flow::{ExportOutcome, ZipExportRequest, ZipExporter, DEFAULT_FAILURE_MESSAGE};
pub use policy::PollPolicy;
