mod eval_cli;

pub use eval_cli::*;
