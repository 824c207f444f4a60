pub mod date;
pub mod report;
pub mod severity;

pub use severity::Severity;
