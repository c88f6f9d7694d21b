mod csv_file;

pub(crate) use csv_file::{export_csv, read_csv};

#[cfg(test)]
#[path = "csv_file_tests.rs"]
mod csv_file_tests;
