//! Daily bar series and their parser

pub mod bar;
pub mod parser;

pub use bar::{Bar, Series};
pub use parser::{parse_json, parse_records, parse_value};
