mod rpn;
mod token;
mod error;
mod defaults;
mod operation;
mod tokenizer;
mod math_parser;
mod preprocessor;
mod symbol_table;
mod shunting_yard;
mod variable_collection;

pub use rpn::*;
pub use token::*;
pub use error::*;
pub use operation::*;
pub use tokenizer::*;
pub use math_parser::*;
pub use preprocessor::*;
pub use symbol_table::*;
pub use shunting_yard::*;
pub use variable_collection::*;
