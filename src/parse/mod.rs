pub mod csv_reader;
pub mod csv_writer;

pub use csv_reader::{CsvError, RawTable, parse_csv};
pub use csv_writer::{serialize_record, serialize_table};
