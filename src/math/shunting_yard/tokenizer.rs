use crate::prelude::*;

/// splits a preprocessed expression into tokens.
///
/// every prefix length is tried until one is a complete token whose remainder can also be tokenized,
/// so symbols which share a prefix (ie `lo` and `log`) still tokenize correctly
pub struct Tokenizer<'a> {
    symbols: &'a SymbolTable,
    variable_symbol: &'a str,
    /// candidates longer than this can only be numbers or variables
    longest_symbol: usize,
}
impl<'a> Tokenizer<'a> {
    pub fn new(symbols: &'a SymbolTable, variable_symbol: &'a str) -> Self {
        let longest_symbol = symbols.function_names()
            .chain(symbols.operator_names())
            .map(str::len)
            .max()
            .unwrap_or(0)
            .max(1); // punctuation

        Self { symbols, variable_symbol, longest_symbol }
    }

    pub fn tokenize(&self, chars: &[ExpressionChar]) -> ShuntingYardResult<Vec<ShuntingYardToken>> {
        let mut furthest = 0;

        match self.search(chars, &mut furthest) {
            Some(tokens) => {
                trace!("tokens: {}", TokenList::new(&tokens));
                Ok(tokens)
            }
            None => Err(ShuntingYardError::Tokenization {
                expression: render_chars(chars),
                position: furthest,
            })
        }
    }

    /// depth first search over the possible segmentations.
    ///
    /// each frame is one token being chosen. when everything after a frame fails,
    /// the frame's candidate is grown and the rest is tried again.
    /// whether the rest can be tokenized only depends on where it starts, so failed starts are remembered
    fn search(&self, chars: &[ExpressionChar], furthest: &mut usize) -> Option<Vec<ShuntingYardToken>> {
        let mut frames: Vec<Frame> = Vec::new();
        let mut failed_starts = HashSet::new();
        let mut next_start = Some(0);

        loop {
            if let Some(mut start) = next_start.take() {
                // whitespace between tokens
                while let Some(ExpressionChar::Break) = chars.get(start) { start += 1 }
                *furthest = (*furthest).max(start);

                if start >= chars.len() {
                    return Some(frames.into_iter().filter_map(|f| f.token).collect())
                }

                if !failed_starts.contains(&start) {
                    if let Some(candidate) = Candidate::new(chars[start]) {
                        frames.push(Frame::new(start, candidate));
                    }
                }
            }

            let frame = frames.last_mut()?;
            match self.next_token(frame, chars) {
                Some(token) => {
                    frame.token = Some(token);
                    next_start = Some(frame.end);
                }
                None => {
                    failed_starts.insert(frame.start);
                    frames.pop();
                }
            }
        }
    }

    /// find the next complete token for this frame, growing its candidate as needed
    fn next_token(&self, frame: &mut Frame, chars: &[ExpressionChar]) -> Option<ShuntingYardToken> {
        loop {
            if frame.checked {
                // out of chars, or the candidate can never become a token
                if !self.can_grow(&frame.candidate) { return None }
                if !frame.candidate.grow(*chars.get(frame.end)?) { return None }
                frame.end += 1;
            }
            frame.checked = true;

            if let Some(token) = self.complete_token(&frame.candidate, chars.get(frame.end)) {
                return Some(token)
            }
        }
    }

    /// check if the candidate is a whole token
    fn complete_token(&self, candidate: &Candidate, next: Option<&ExpressionChar>) -> Option<ShuntingYardToken> {
        let text = &candidate.text;
        if text.is_empty() { return None }

        if is_numeric(text) {
            // numbers are grown as far as they stay valid.
            // a unary minus or whitespace always ends one
            let complete = match next {
                Some(ExpressionChar::Char(c)) => !is_numeric(&format!("{text}{c}")),
                _ => true,
            };
            if complete {
                if let Ok(num) = text.parse::<f64>() {
                    return Some(ShuntingYardToken::Number(if candidate.negative { -num } else { num }))
                }
            }
        }

        // unary minus only joins number literals
        if candidate.negative { return None }

        if let Some(index) = self.parse_variable(text) {
            return Some(ShuntingYardToken::Variable(index))
        }
        if self.symbols.is_function(text) {
            return Some(ShuntingYardToken::Function(text.clone()))
        }
        if text == "," {
            return Some(ShuntingYardToken::Comma)
        }
        if self.symbols.is_operator(text) {
            return Some(ShuntingYardToken::Operator(text.clone()))
        }

        match &**text {
            "(" => Some(ShuntingYardToken::LeftParenthesis),
            ")" => Some(ShuntingYardToken::RightParenthesis),
            _ => None
        }
    }

    /// could growing this candidate ever produce a token
    fn can_grow(&self, candidate: &Candidate) -> bool {
        let text = &candidate.text;
        let number_prefix = text.is_empty() || is_numeric(text) || is_numeric(&format!("{text}0"));
        if candidate.negative { return number_prefix }

        number_prefix
        || text.len() < self.longest_symbol
        || self.variable_symbol.starts_with(&**text)
        || text
            .strip_prefix(self.variable_symbol)
            .and_then(|t| t.strip_prefix('['))
            .filter(|index| index.bytes().all(|b| b.is_ascii_digit()))
            .is_some()
    }

    /// variables look like `x[123]`, where `x` is the variable symbol
    fn parse_variable(&self, text: &str) -> Option<usize> {
        let index = text
            .strip_prefix(self.variable_symbol)?
            .strip_prefix('[')?
            .strip_suffix(']')?;

        if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) { return None }
        index.parse().ok()
    }
}


/// a token being chosen during the search
struct Frame {
    start: usize,
    /// one past the last char in the candidate
    end: usize,
    candidate: Candidate,
    /// has the candidate at `end` already been offered as a token
    checked: bool,
    token: Option<ShuntingYardToken>,
}
impl Frame {
    fn new(start: usize, candidate: Candidate) -> Self {
        Self {
            start,
            end: start + 1,
            candidate,
            checked: false,
            token: None,
        }
    }
}

/// the text being grown into a token
struct Candidate {
    text: String,
    /// started with a unary minus. only a number literal can come of it
    negative: bool,
}
impl Candidate {
    fn new(c: ExpressionChar) -> Option<Self> {
        match c {
            ExpressionChar::Char(c) => Some(Self { text: c.to_string(), negative: false }),
            ExpressionChar::UnaryMinus => Some(Self { text: String::new(), negative: true }),
            ExpressionChar::Break => None,
        }
    }

    /// add the next char. returns false if it cant be added
    fn grow(&mut self, next: ExpressionChar) -> bool {
        match next {
            ExpressionChar::Char(c) => self.text.push(c),
            // the preprocessor marks the minus in `1e-3` as unary
            ExpressionChar::UnaryMinus if self.is_exponent_start() => self.text.push('-'),
            _ => return false,
        }
        true
    }

    fn is_exponent_start(&self) -> bool {
        self.text
            .strip_suffix(|c: char| c == 'e' || c == 'E')
            .filter(|mantissa| is_numeric(mantissa))
            .is_some()
    }
}

/// does this look like an unsigned number literal (digits with an optional decimal point, optional signed exponent)
pub fn is_numeric(text: &str) -> bool {
    let is_sign = |c: char| c == '+' || c == '-';
    let digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());

    let (mantissa, exponent) = match text.find(|c: char| c == 'e' || c == 'E') {
        Some(i) => (&text[..i], Some(&text[i + 1..])),
        None => (text, None),
    };

    let (int, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if int.is_empty() && frac.is_empty() { return false }
    if !digits(int) || !digits(frac) { return false }

    match exponent {
        None => true,
        Some(exp) => {
            let exp = exp.strip_prefix(is_sign).unwrap_or(exp);
            !exp.is_empty() && digits(exp)
        }
    }
}

/// turn preprocessed chars back into text, for error messages
pub fn render_chars(chars: &[ExpressionChar]) -> String {
    chars.iter().map(|c| match c {
        ExpressionChar::Char(c) => *c,
        ExpressionChar::UnaryMinus => '-',
        ExpressionChar::Break => ' ',
    }).collect()
}


#[allow(unused)]
mod tokenizer_tests {
    use crate::prelude::*;
    use crate::prelude::ShuntingYardToken::*;

    fn symbols() -> SymbolTable {
        let mut symbols = SymbolTable::new();
        symbols.register_operator("+", |a: f64, b: f64| a + b, 1, Associativity::Left);
        symbols.register_operator("-", |a: f64, b: f64| a - b, 1, Associativity::Left);
        symbols.register_operator("*", |a: f64, b: f64| a * b, 2, Associativity::Left);
        symbols.register_function("max", f64::max);
        symbols
    }

    fn tokenize(symbols: &SymbolTable, expression: &str) -> ShuntingYardResult<Vec<ShuntingYardToken>> {
        Tokenizer::new(symbols, "x").tokenize(&Preprocessor::process(expression))
    }

    fn op(name: &str) -> ShuntingYardToken { Operator(name.to_owned()) }

    #[test]
    fn empty_expression() {
        assert_eq!(tokenize(&symbols(), ""), Ok(vec![]));
    }

    #[test]
    fn numbers_are_grown_greedily() {
        let symbols = symbols();
        assert_eq!(tokenize(&symbols, "12.5+3"), Ok(vec![Number(12.5), op("+"), Number(3.0)]));
        assert_eq!(tokenize(&symbols, "1e3"), Ok(vec![Number(1000.0)]));
        assert_eq!(tokenize(&symbols, ".5"), Ok(vec![Number(0.5)]));
    }

    #[test]
    fn negative_exponents() {
        let symbols = symbols();
        assert_eq!(tokenize(&symbols, "1e-3"), Ok(vec![Number(0.001)]));
        assert_eq!(tokenize(&symbols, "-2.5E-2*2"), Ok(vec![Number(-0.025), op("*"), Number(2.0)]));
        assert_eq!(tokenize(&symbols, "1e+3-1"), Ok(vec![Number(1000.0), op("-"), Number(1.0)]));
    }

    #[test]
    fn functions_and_punctuation() {
        let tokens = tokenize(&symbols(), "max(1, 2)").unwrap();
        assert_eq!(tokens, vec![
            Function("max".to_owned()),
            LeftParenthesis,
            Number(1.0),
            Comma,
            Number(2.0),
            RightParenthesis,
        ]);
    }

    #[test]
    fn variables() {
        let symbols = symbols();
        assert_eq!(tokenize(&symbols, "x[0]*x[12]"), Ok(vec![Variable(0), op("*"), Variable(12)]));

        // custom variable symbol
        let tokens = Tokenizer::new(&symbols, "var").tokenize(&Preprocessor::process("var[3]"));
        assert_eq!(tokens, Ok(vec![Variable(3)]));

        assert!(tokenize(&symbols, "x[]").is_err());
        assert!(tokenize(&symbols, "x[a]").is_err());
        assert!(tokenize(&symbols, "y[1]").is_err());
    }

    #[test]
    fn negative_literals() {
        let symbols = symbols();
        assert_eq!(tokenize(&symbols, "-3+5"), Ok(vec![Number(-3.0), op("+"), Number(5.0)]));
        assert_eq!(tokenize(&symbols, "2*-3.5"), Ok(vec![Number(2.0), op("*"), Number(-3.5)]));
        assert_eq!(tokenize(&symbols, "4-3"), Ok(vec![Number(4.0), op("-"), Number(3.0)]));

        // unary minus only joins number literals
        assert!(tokenize(&symbols, "-x[0]").is_err());
        assert!(tokenize(&symbols, "--1").is_err());

        // a binary sign never becomes part of a literal
        assert_eq!(tokenize(&symbols, "1+2"), Ok(vec![Number(1.0), op("+"), Number(2.0)]));
        assert_eq!(tokenize(&symbols, "(+3)").unwrap().len(), 4);
    }

    #[test]
    fn failure_at_the_end_of_a_long_sum() {
        let expression = vec!["1"; 2000].join("+") + "@";
        let started = std::time::Instant::now();

        let err = tokenize(&symbols(), &expression).unwrap_err();
        assert_eq!(err, ShuntingYardError::Tokenization {
            expression: expression.clone(),
            position: expression.len() - 1,
        });
        assert!(started.elapsed().as_secs() < 5, "took {:?}", started.elapsed());
    }

    #[test]
    fn very_long_expression() {
        let expression = vec!["1"; 10_000].join("+");
        let tokens = tokenize(&symbols(), &expression).unwrap();
        assert_eq!(tokens.len(), 19_999);
        assert_eq!(tokens.last(), Some(&Number(1.0)));
    }

    #[test]
    fn backtracks_over_shared_prefixes() {
        let mut symbols = symbols();
        symbols.register_function("lo", |a: f64| a);
        symbols.register_function("log", |a: f64, b: f64| a.log(b));

        // "lo" matches first, but "g(8,2)" cant be tokenized, so "log" is used instead
        let tokens = tokenize(&symbols, "log(8,2)").unwrap();
        assert_eq!(tokens[0], Function("log".to_owned()));
        assert_eq!(tokens.len(), 6);
    }

    #[test]
    fn unknown_symbol_fails() {
        let err = tokenize(&symbols(), "1+foo(2)").unwrap_err();
        assert_eq!(err.kind(), ShuntingYardErrorKind::Tokenization);

        let ShuntingYardError::Tokenization { expression, position } = err else { unreachable!() };
        assert_eq!(expression, "1+foo(2)");
        assert_eq!(position, 2);
    }

    #[test]
    fn numeric_check() {
        for ok in ["1", "12.5", "1.", ".5", "1e5", "2.5E-3", "1e+2"] {
            assert!(is_numeric(ok), "{ok} should be numeric");
        }
        for bad in ["", ".", "-", "-3", "+3", "1e", "1.2.3", "e5", "inf", "NaN", "1-"] {
            assert!(!is_numeric(bad), "{bad} should not be numeric");
        }
    }
}
