pub mod dataset;
pub mod csv;

pub use dataset::Dataset;
pub use self::csv::{builtin_xor, load_labelled_csv, load_labelled_csv_path, CsvOptions};
