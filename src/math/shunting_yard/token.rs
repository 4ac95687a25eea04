use crate::prelude::*;

/// a single piece of a tokenized expression
///
/// operator and function tokens only ever hold names that were registered
/// in the [SymbolTable] when the expression was tokenized
#[derive(Debug, Clone, PartialEq)]
pub enum ShuntingYardToken {
    Number(f64),
    /// index into the caller's variable binding, ie `x[3]`
    Variable(usize),
    Operator(String),
    Function(String),
    LeftParenthesis,
    RightParenthesis,
    Comma,
}
impl ShuntingYardToken {
    /// is this a symbol which is looked up in the symbol table during evaluation
    pub fn is_symbol(&self) -> bool {
        matches!(self, Self::Operator(_) | Self::Function(_))
    }

    pub fn as_variable(&self) -> Option<usize> {
        match self {
            Self::Variable(index) => Some(*index),
            _ => None
        }
    }
}

/// variables are written with [DEFAULT_VARIABLE_SYMBOL].
/// use [TokenList::with_variable_symbol] to write them the way a parser with another symbol reads them
impl Display for ShuntingYardToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_token(f, self, DEFAULT_VARIABLE_SYMBOL)
    }
}

fn write_token(f: &mut std::fmt::Formatter<'_>, token: &ShuntingYardToken, variable_symbol: &str) -> std::fmt::Result {
    match token {
        ShuntingYardToken::Number(n) => write!(f, "{n}"),
        ShuntingYardToken::Variable(index) => write!(f, "{variable_symbol}[{index}]"),
        ShuntingYardToken::Operator(name) | ShuntingYardToken::Function(name) => write!(f, "{name}"),
        ShuntingYardToken::LeftParenthesis => write!(f, "("),
        ShuntingYardToken::RightParenthesis => write!(f, ")"),
        ShuntingYardToken::Comma => write!(f, ","),
    }
}

/// helper for displaying a list of tokens separated by spaces
#[derive(Copy, Clone)]
pub struct TokenList<'a> {
    tokens: &'a [ShuntingYardToken],
    variable_symbol: &'a str,
}
impl<'a> TokenList<'a> {
    pub fn new(tokens: &'a [ShuntingYardToken]) -> Self {
        Self { tokens, variable_symbol: DEFAULT_VARIABLE_SYMBOL }
    }
    pub fn with_variable_symbol(mut self, variable_symbol: &'a str) -> Self {
        self.variable_symbol = variable_symbol;
        self
    }

    /// each token as its own string
    pub fn to_strings(&self) -> Vec<String> {
        self.tokens.chunks(1).map(|token| Self { tokens: token, ..*self }.to_string()).collect()
    }
}
impl Display for TokenList<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 { write!(f, " ")?; }
            write_token(f, token, self.variable_symbol)?;
        }
        Ok(())
    }
}


#[test]
fn test_display() {
    let tokens = vec![
        ShuntingYardToken::Number(2.5),
        ShuntingYardToken::Variable(3),
        ShuntingYardToken::Operator("+".to_owned()),
        ShuntingYardToken::Function("max".to_owned()),
    ];

    assert_eq!(TokenList::new(&tokens).to_string(), "2.5 x[3] + max");
    assert_eq!(ShuntingYardToken::Comma.to_string(), ",");
    assert!(tokens[2].is_symbol());
    assert_eq!(tokens[1].as_variable(), Some(3));
}

#[test]
fn test_display_custom_variable_symbol() {
    let tokens = vec![
        ShuntingYardToken::Variable(0),
        ShuntingYardToken::Number(1.0),
        ShuntingYardToken::Operator("+".to_owned()),
    ];

    let list = TokenList::new(&tokens).with_variable_symbol("a");
    assert_eq!(list.to_string(), "a[0] 1 +");
    assert_eq!(list.to_strings(), vec!["a[0]", "1", "+"]);
}
