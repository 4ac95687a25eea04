#![deny(unused_must_use)]

#[macro_use] extern crate log;
pub mod cli;
pub mod math;
pub mod errors;
pub mod prelude;
pub mod settings;

// defaults
pub const DEFAULT_VARIABLE_SYMBOL:&str = "x";
pub const SETTINGS_FILE:&str = "math_parser.json";
