mod math_parser_error;

pub use math_parser_error::*;
