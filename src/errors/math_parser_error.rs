use std::io::Error as IOError;
use serde_json::Error as JsonError;

use crate::prelude::*;

pub type MathParserResult<T=()> = Result<T, MathParserError>;

/// errors from everything around the parser itself (files, settings, command line)
#[derive(Debug)]
pub enum MathParserError {
    IO(IOError),
    Serde(JsonError),
    ShuntingYard(ShuntingYardError),
    String(String),
}

impl Display for MathParserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IO(e) => write!(f, "{e}"),
            Self::Serde(e) => write!(f, "{e}"),
            Self::ShuntingYard(e) => write!(f, "{e}"),
            Self::String(e) => write!(f, "{e}"),
        }
    }
}
impl std::error::Error for MathParserError {}


impl From<JsonError> for MathParserError {
    fn from(e: JsonError) -> Self { Self::Serde(e) }
}
impl From<IOError> for MathParserError {
    fn from(e: IOError) -> Self { Self::IO(e) }
}
impl From<String> for MathParserError {
    fn from(e: String) -> Self { Self::String(e) }
}
impl From<ShuntingYardError> for MathParserError {
    fn from(value: ShuntingYardError) -> Self { Self::ShuntingYard(value) }
}


#[test]
fn test_display() {
    let e: MathParserError = ShuntingYardError::UnboundVariable(2).into();
    assert_eq!(e.to_string(), "[evaluator] no value bound for variable 2");

    let e: MathParserError = "bad arg".to_owned().into();
    assert_eq!(e.to_string(), "bad arg");
}
