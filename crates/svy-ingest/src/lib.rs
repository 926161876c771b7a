pub mod decode;
pub mod error;
pub mod sample;

pub use decode::{DecodedTable, decode_csv_bytes, read_csv_table, write_csv_table};
pub use error::{DecodeError, Result};
pub use sample::{DEFAULT_SAMPLE_ROWS, SAMPLE_HEADERS, generate_sample, write_sample_csv};
