use math_parser::prelude::*;

#[macro_use]
extern crate log;

// main fn
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut args = std::env::args().skip(1);
    match run_cli(&mut args) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            if let MathParserError::ShuntingYard(e) = &e {
                debug!("failed with {:?} error", e.kind());
            }
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
