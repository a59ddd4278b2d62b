pub mod boundary;
pub mod report;
