use crate::prelude::*;

/// a parser which can be shared between threads.
/// registering takes the write lock, evaluating only needs the read lock
pub type SharedMathParser = Arc<RwLock<MathParser>>;

/// evaluates expressions using its own set of operators and functions.
///
/// ```
/// use math_parser::prelude::*;
///
/// let parser = MathParser::new()
///     .register_operator_chained("+", |a: f64, b: f64| a + b, 1, Associativity::Left)
///     .register_operator_chained("*", |a: f64, b: f64| a * b, 2, Associativity::Left);
///
/// let values = ValueCollection::new().set_chained(0, 4.0);
/// assert_eq!(parser.evaluate("2+3*x[0]", &values), Ok(14.0));
/// ```
#[derive(Clone, Debug)]
pub struct MathParser {
    symbols: SymbolTable,
    variable_symbol: String,
}
impl MathParser {
    /// a parser with no operators or functions
    pub fn new() -> Self {
        Self {
            symbols: SymbolTable::new(),
            variable_symbol: DEFAULT_VARIABLE_SYMBOL.to_owned(),
        }
    }

    /// a parser with the default operators and functions
    pub fn with_defaults() -> Self {
        Self {
            symbols: SymbolTable::with_defaults(),
            ..Self::new()
        }
    }

    pub fn from_settings(settings: &ParserSettings) -> Self {
        let mut parser = Self::new();
        parser.set_variable_symbol(&settings.variable_symbol);
        if settings.default_operators { parser.symbols.register_default_operators() }
        if settings.default_functions { parser.symbols.register_default_functions() }
        parser
    }

    pub fn into_shared(self) -> SharedMathParser {
        Arc::new(RwLock::new(self))
    }

    pub fn variable_symbol(&self) -> &str { &self.variable_symbol }
    pub fn set_variable_symbol(&mut self, symbol: impl ToString) {
        self.variable_symbol = symbol.to_string();
    }

    pub fn symbols(&self) -> &SymbolTable { &self.symbols }
    pub fn symbols_mut(&mut self) -> &mut SymbolTable { &mut self.symbols }


    pub fn register_function<Args>(&mut self, name: impl ToString, operation: impl IntoOperation<Args>) {
        self.symbols.register_function(name, operation)
    }
    pub fn register_function_chained<Args>(mut self, name: impl ToString, operation: impl IntoOperation<Args>) -> Self {
        self.register_function(name, operation);
        self
    }

    pub fn register_operator<Args>(&mut self, name: impl ToString, operation: impl IntoOperation<Args>, precedence: i32, associativity: Associativity) {
        self.symbols.register_operator(name, operation, precedence, associativity)
    }
    /// register an operator with precedence 1 that is both left and right associative
    pub fn register_operator_default<Args>(&mut self, name: impl ToString, operation: impl IntoOperation<Args>) {
        self.register_operator(name, operation, 1, Associativity::default())
    }
    pub fn register_operator_chained<Args>(mut self, name: impl ToString, operation: impl IntoOperation<Args>, precedence: i32, associativity: Associativity) -> Self {
        self.register_operator(name, operation, precedence, associativity);
        self
    }


    /// evaluate an expression, using `values` for any `x[n]` variables
    pub fn evaluate<V: VariableSource + ?Sized>(&self, expression: &str, values: &V) -> ShuntingYardResult<f64> {
        let rpn = self.to_rpn(expression)?;
        let result = self.evaluate_rpn(&rpn, values)?;
        trace!("'{expression}' = {result}");
        Ok(result)
    }

    /// evaluate tokens which were already converted with [MathParser::to_rpn]
    pub fn evaluate_rpn<V: VariableSource + ?Sized>(&self, rpn: &[ShuntingYardToken], values: &V) -> ShuntingYardResult<f64> {
        RpnEvaluator::new(&self.symbols).evaluate(rpn, values)
    }

    pub fn tokenize(&self, expression: &str) -> ShuntingYardResult<Vec<ShuntingYardToken>> {
        let chars = Preprocessor::process(expression);
        Tokenizer::new(&self.symbols, &self.variable_symbol).tokenize(&chars)
    }

    /// convert an expression into postfix order
    pub fn to_rpn(&self, expression: &str) -> ShuntingYardResult<Vec<ShuntingYardToken>> {
        let tokens = self.tokenize(expression)?;
        ShuntingYard::new(&self.symbols).to_rpn(tokens)
    }

    /// display tokens the way this parser reads them back
    pub fn display_tokens<'a>(&'a self, tokens: &'a [ShuntingYardToken]) -> TokenList<'a> {
        TokenList::new(tokens).with_variable_symbol(&self.variable_symbol)
    }

    /// get the distinct variable indices used in an expression, in the order they first appear
    pub fn get_variable_ids(&self, expression: &str) -> ShuntingYardResult<Vec<usize>> {
        let mut ids = Vec::new();
        for id in self.tokenize(expression)?.iter().filter_map(ShuntingYardToken::as_variable) {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }

        Ok(ids)
    }
}
impl Default for MathParser {
    fn default() -> Self { Self::new() }
}


#[allow(unused)]
mod math_parser_tests {
    use crate::prelude::*;

    fn no_values() -> ValueCollection { ValueCollection::new() }

    fn basic_parser() -> MathParser {
        MathParser::new()
            .register_operator_chained("+", |a: f64, b: f64| a + b, 1, Associativity::Left)
            .register_operator_chained("-", |a: f64, b: f64| a - b, 1, Associativity::Left)
            .register_operator_chained("*", |a: f64, b: f64| a * b, 2, Associativity::Left)
            .register_operator_chained("^", f64::powf, 3, Associativity::Right)
            .register_function_chained("max", f64::max)
    }

    #[test]
    fn precedence() {
        assert_eq!(basic_parser().evaluate("2+3*4", &no_values()), Ok(14.0));
        assert_eq!(basic_parser().evaluate("(2+3)*4", &no_values()), Ok(20.0));
    }

    #[test]
    fn right_associative_power() {
        assert_eq!(basic_parser().evaluate("2^3^2", &no_values()), Ok(512.0));
    }

    #[test]
    fn unary_minus() {
        let parser = basic_parser();
        assert_eq!(parser.evaluate("-3+5", &no_values()), Ok(2.0));
        assert_eq!(parser.evaluate("4-3", &no_values()), Ok(1.0));
        assert_eq!(parser.evaluate("2*-3", &no_values()), Ok(-6.0));
        assert_eq!(parser.evaluate("max(-1,-2)", &no_values()), Ok(-1.0));
    }

    #[test]
    fn functions() {
        assert_eq!(basic_parser().evaluate("max(1,2)+1", &no_values()), Ok(3.0));
    }

    #[test]
    fn variables() {
        let parser = basic_parser();
        assert_eq!(parser.get_variable_ids("x[0]+x[2]*x[0]"), Ok(vec![0, 2]));

        let values = HashMap::from([(0usize, 5.0), (2, 7.0)]);
        assert_eq!(parser.evaluate("x[0]+x[2]", &values), Ok(12.0));

        let slice = [1.0, 2.0, 3.0];
        assert_eq!(parser.evaluate("x[2]-x[0]", &slice[..]), Ok(2.0));
    }

    #[test]
    fn custom_variable_symbol() {
        let mut parser = basic_parser();
        parser.set_variable_symbol("v");
        assert_eq!(parser.get_variable_ids("v[3]*v[1]"), Ok(vec![3, 1]));
        assert!(parser.get_variable_ids("x[3]").is_err());

        // rpn output can be read back by the same parser
        let rpn = parser.to_rpn("v[0]+1").unwrap();
        let rendered = parser.display_tokens(&rpn).to_string();
        assert_eq!(rendered, "v[0] 1 +");
        assert_eq!(parser.get_variable_ids(&rendered), Ok(vec![0]));
    }

    #[test]
    fn malformed_input() {
        let parser = basic_parser();
        assert_eq!(parser.evaluate("1 2", &no_values()).unwrap_err().kind(), ShuntingYardErrorKind::Cardinality);
        assert_eq!(parser.evaluate("(1+2", &no_values()).unwrap_err().kind(), ShuntingYardErrorKind::Structural);
        assert_eq!(parser.evaluate("1++", &no_values()).unwrap_err().kind(), ShuntingYardErrorKind::Arity);
        assert_eq!(parser.evaluate("x[1]", &no_values()), Err(ShuntingYardError::UnboundVariable(1)));
        assert_eq!(parser.evaluate("", &no_values()), Err(ShuntingYardError::Cardinality(0)));
        assert_eq!(parser.evaluate("1+y", &no_values()).unwrap_err().kind(), ShuntingYardErrorKind::Tokenization);
    }

    #[test]
    fn exponent_literals() {
        let parser = basic_parser();
        assert_eq!(parser.evaluate("1e-3*1000", &no_values()), Ok(1.0));
        assert_eq!(parser.evaluate("2E+2-1", &no_values()), Ok(199.0));
    }

    #[test]
    fn long_expressions() {
        let parser = MathParser::with_defaults();
        let sum = vec!["1"; 10_000].join("+");
        assert_eq!(parser.evaluate(&sum, &no_values()), Ok(10_000.0));

        let typo = vec!["1"; 300].join("+") + "@";
        assert_eq!(parser.evaluate(&typo, &no_values()).unwrap_err().kind(), ShuntingYardErrorKind::Tokenization);
    }

    #[test]
    fn both_associativity_acts_left_for_ties() {
        let mut parser = MathParser::new();
        parser.register_operator_default("-", |a: f64, b: f64| a - b);
        assert_eq!(parser.evaluate("10-4-3", &no_values()), Ok(3.0));
    }

    #[test]
    fn variable_ids_are_stable() {
        let parser = basic_parser();
        let first = parser.get_variable_ids("x[4]*x[1]+x[4]");
        let second = parser.get_variable_ids("x[4]*x[1]+x[4]");
        assert_eq!(first, Ok(vec![4, 1]));
        assert_eq!(first, second);
        assert_eq!(parser.symbols().operator_names().count(), 4);
    }

    #[test]
    fn defaults() {
        let parser = MathParser::with_defaults();
        assert_eq!(parser.evaluate("10/4", &no_values()), Ok(2.5));
        assert_eq!(parser.evaluate("7%4+sqrt(9)", &no_values()), Ok(6.0));
        assert_eq!(parser.evaluate("round(pi()*100)", &no_values()), Ok(314.0));
    }

    #[test]
    fn from_settings() {
        let settings = ParserSettings {
            variable_symbol: "a".to_owned(),
            default_operators: true,
            default_functions: false,
        };
        let parser = MathParser::from_settings(&settings);
        assert_eq!(parser.variable_symbol(), "a");
        assert_eq!(parser.evaluate("a[0]*2", &vec![21.0]), Ok(42.0));
        assert!(parser.evaluate("sqrt(4)", &no_values()).is_err());
    }

    #[test]
    fn shared_between_threads() {
        let parser = MathParser::with_defaults().into_shared();

        let handles = (0..4).map(|i| {
            let parser = parser.clone();
            std::thread::spawn(move || {
                let values = ValueCollection::new().set_chained(0, i as f64);
                let result = parser.read().evaluate("x[0]*2+1", &values);
                result
            })
        }).collect::<Vec<_>>();

        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), Ok(i as f64 * 2.0 + 1.0));
        }

        // registering after the fact goes through the write lock
        parser.write().register_function("double", |a: f64| a * 2.0);
        assert_eq!(parser.read().evaluate("double(4)", &no_values()), Ok(8.0));
    }
}
