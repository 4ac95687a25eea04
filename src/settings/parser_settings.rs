use crate::prelude::*;

/// how a [MathParser] should be set up
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserSettings {
    /// prefix for variables, ie the `x` in `x[0]`
    pub variable_symbol: String,
    /// register `+ - * / % ^`
    pub default_operators: bool,
    /// register `abs`, `sqrt`, `min`, `max` etc
    pub default_functions: bool,
}
impl ParserSettings {
    /// load settings from a json file. if the file cant be read or parsed, the defaults are used
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(settings) => {
                debug!("loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                warn!("Error reading {}, loading defaults: {e}", path.display());
                Self::default()
            }
        }
    }

    pub fn try_load(path: impl AsRef<Path>) -> MathParserResult<Self> {
        let s = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&s)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> MathParserResult {
        let path = path.as_ref();
        debug!("Saving settings to {}", path.display());

        let str = serde_json::to_string_pretty(self)?;
        std::fs::write(path, str)?;
        trace!("settings saved successfully");
        Ok(())
    }
}
impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            variable_symbol: DEFAULT_VARIABLE_SYMBOL.to_owned(),
            default_operators: true,
            default_functions: true,
        }
    }
}


#[allow(unused)]
mod parser_settings_tests {
    use crate::prelude::*;

    fn temp_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("math_parser_{}_{name}", std::process::id()))
    }

    #[test]
    fn save_and_load() {
        let path = temp_file("save_and_load.json");
        let settings = ParserSettings {
            variable_symbol: "v".to_owned(),
            default_operators: true,
            default_functions: false,
        };

        settings.save(&path).unwrap();
        assert_eq!(ParserSettings::load(&path), settings);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_fields_use_defaults() {
        let settings: ParserSettings = serde_json::from_str(r#"{"variable_symbol": "var"}"#).unwrap();
        assert_eq!(settings.variable_symbol, "var");
        assert!(settings.default_operators);
        assert!(settings.default_functions);
    }

    #[test]
    fn bad_file_loads_defaults() {
        let path = temp_file("bad_file.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(ParserSettings::try_load(&path).is_err());
        assert_eq!(ParserSettings::load(&path), ParserSettings::default());
        assert_eq!(ParserSettings::load(temp_file("doesnt_exist.json")), ParserSettings::default());
        std::fs::remove_file(&path).unwrap();
    }
}
