use crate::prelude::*;

pub const USAGE:&str = "usage:
  math-parser eval <expression> [--var N=VALUE]... [--vars <json object>] [--settings <file>] [--json]
  math-parser vars <expression> [--settings <file>] [--json]
  math-parser rpn <expression> [--settings <file>] [--json]";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CliCommand {
    /// evaluate an expression
    Eval,
    /// list the variable ids in an expression
    Vars,
    /// print the expression in postfix order
    Rpn,
}
impl CliCommand {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "eval" => Some(Self::Eval),
            "vars" => Some(Self::Vars),
            "rpn" => Some(Self::Rpn),
            _ => None
        }
    }
}

#[derive(Default, Debug, PartialEq)]
pub struct CliArgs {
    pub expression: Option<String>,
    pub values: ValueCollection,
    pub settings: Option<String>,
    pub json: bool,
}
impl CliArgs {
    pub fn from_args(args: &mut impl Iterator<Item = String>) -> MathParserResult<Self> {
        let mut data = Self::default();

        while let Some(arg) = args.next() {
            match &*arg {
                "--var" => {
                    let var = args.next().ok_or_else(|| missing_value("--var"))?;
                    let (index, value) = parse_var(&var)?;
                    data.values.set(index, value);
                }
                "--vars" => {
                    let json = args.next().ok_or_else(|| missing_value("--vars"))?;
                    let values: ValueCollection = serde_json::from_str(&json)?;
                    data.values.set_multiple(values.into_iter());
                }
                "--settings" => data.settings = Some(args.next().ok_or_else(|| missing_value("--settings"))?),
                "--json" => data.json = true,

                other if other.starts_with("--") => warn!("ignoring unknown argument {other}"),
                _ if data.expression.is_some() => return Err(format!("unexpected argument '{arg}', is the expression quoted?").into()),
                _ => data.expression = Some(arg),
            }
        }

        Ok(data)
    }

    /// the settings file given with `--settings`, or `math_parser.json` if it exists
    pub fn load_settings(&self) -> MathParserResult<ParserSettings> {
        match &self.settings {
            Some(path) => ParserSettings::try_load(path),
            None if Path::new(SETTINGS_FILE).exists() => Ok(ParserSettings::load(SETTINGS_FILE)),
            None => Ok(ParserSettings::default()),
        }
    }
}

fn missing_value(arg: &str) -> MathParserError {
    MathParserError::String(format!("{arg} needs a value"))
}

/// parse `N=VALUE`
fn parse_var(s: &str) -> MathParserResult<(usize, f64)> {
    let bad = || MathParserError::String(format!("bad variable '{s}', expected N=VALUE"));

    let (index, value) = s.split_once('=').ok_or_else(bad)?;
    let index = index.trim().parse().map_err(|_| bad())?;
    let value = value.trim().parse().map_err(|_| bad())?;
    Ok((index, value))
}


/// run a command, returning what should be printed
pub fn run_cli(args: &mut impl Iterator<Item = String>) -> MathParserResult<String> {
    let command = args.next().ok_or_else(|| USAGE.to_owned())?;
    let Some(command) = CliCommand::from_str(&command) else {
        return Err(format!("unknown command '{command}'\n{USAGE}").into())
    };

    let args = CliArgs::from_args(args)?;
    let expression = args.expression.clone().ok_or_else(|| USAGE.to_owned())?;
    let parser = MathParser::from_settings(&args.load_settings()?);
    debug!("running {command:?} on '{expression}'");

    match command {
        CliCommand::Eval => {
            let result = parser.evaluate(&expression, &args.values)?;
            if args.json {
                Ok(serde_json::json!({ "result": result }).to_string())
            } else {
                Ok(format!("{result}"))
            }
        }

        CliCommand::Vars => {
            let ids = parser.get_variable_ids(&expression)?;
            if args.json {
                Ok(serde_json::to_string(&ids)?)
            } else {
                Ok(ids.iter().map(|i| i.to_string()).collect::<Vec<_>>().join(", "))
            }
        }

        CliCommand::Rpn => {
            let rpn = parser.to_rpn(&expression)?;
            let tokens = parser.display_tokens(&rpn);
            if args.json {
                Ok(serde_json::to_string(&tokens.to_strings())?)
            } else {
                Ok(tokens.to_string())
            }
        }
    }
}


#[allow(unused)]
mod cli_tests {
    use crate::prelude::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn parse_args() {
        let parsed = CliArgs::from_args(&mut args(&["x[0] + x[1]", "--var", "0=5", "--vars", r#"{"1": 2.5}"#, "--json"])).unwrap();
        assert_eq!(parsed.expression.as_deref(), Some("x[0] + x[1]"));
        assert_eq!(parsed.values.get(0), Ok(5.0));
        assert_eq!(parsed.values.get(1), Ok(2.5));
        assert!(parsed.json);
        assert!(parsed.settings.is_none());
    }

    #[test]
    fn bad_args() {
        assert!(CliArgs::from_args(&mut args(&["1", "--var"])).is_err());
        assert!(CliArgs::from_args(&mut args(&["1", "--var", "a=5"])).is_err());
        assert!(CliArgs::from_args(&mut args(&["1", "--var", "5"])).is_err());
        assert!(CliArgs::from_args(&mut args(&["1", "2"])).is_err());
    }

    #[test]
    fn eval_command() {
        assert_eq!(run_cli(&mut args(&["eval", "2 + 3 * x[0]", "--var", "0=4"])).unwrap(), "14");
        assert_eq!(run_cli(&mut args(&["eval", "2^3^2", "--json"])).unwrap(), r#"{"result":512.0}"#);
    }

    #[test]
    fn vars_and_rpn_commands() {
        assert_eq!(run_cli(&mut args(&["vars", "x[0]+x[2]*x[0]"])).unwrap(), "0, 2");
        assert_eq!(run_cli(&mut args(&["vars", "x[3]", "--json"])).unwrap(), "[3]");
        assert_eq!(run_cli(&mut args(&["rpn", "max(1,2)+1"])).unwrap(), "1 2 max 1 +");
    }

    #[test]
    fn rpn_uses_the_configured_variable_symbol() {
        let path = std::env::temp_dir().join(format!("math_parser_{}_cli_symbol.json", std::process::id()));
        ParserSettings { variable_symbol: "a".to_owned(), ..Default::default() }.save(&path).unwrap();
        let path = path.to_string_lossy().to_string();

        assert_eq!(run_cli(&mut args(&["rpn", "a[0]+1", "--settings", &path])).unwrap(), "a[0] 1 +");
        assert_eq!(run_cli(&mut args(&["rpn", "a[0]+1", "--settings", &path, "--json"])).unwrap(), r#"["a[0]","1","+"]"#);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn errors() {
        assert!(run_cli(&mut args(&[])).is_err());
        assert!(run_cli(&mut args(&["nope", "1"])).is_err());
        assert!(run_cli(&mut args(&["eval"])).is_err());

        let Err(MathParserError::ShuntingYard(e)) = run_cli(&mut args(&["eval", "x[1]"])) else { panic!("expected an evaluation error") };
        assert_eq!(e, ShuntingYardError::UnboundVariable(1));
    }
}
