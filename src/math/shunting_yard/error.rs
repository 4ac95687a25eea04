use crate::prelude::*;

pub type ShuntingYardResult<T> = Result<T, ShuntingYardError>;

#[derive(Debug, Clone, PartialEq)]
pub enum ShuntingYardError {
    /// no segmentation of the expression into known tokens exists.
    /// `position` is the furthest offset (in preprocessed characters) the search reached
    Tokenization { expression: String, position: usize },
    Structural(StructuralError),
    /// an operator or function had fewer values on the stack than its arity
    Arity { symbol: String, expected: usize, found: usize },
    /// evaluation finished with this many values on the stack instead of exactly one
    Cardinality(usize),
    UnboundVariable(usize),
}
impl ShuntingYardError {
    /// a symbol token whose name is missing from the symbol table.
    /// tokens are only made from registered names, so this is reported as a tokenization failure
    pub(crate) fn unknown_symbol(name: &str) -> Self {
        Self::Tokenization {
            expression: name.to_owned(),
            position: 0,
        }
    }

    pub fn kind(&self) -> ShuntingYardErrorKind {
        match self {
            Self::Tokenization { .. } => ShuntingYardErrorKind::Tokenization,
            Self::Structural(_) => ShuntingYardErrorKind::Structural,
            Self::Arity { .. } => ShuntingYardErrorKind::Arity,
            Self::Cardinality(_) => ShuntingYardErrorKind::Cardinality,
            Self::UnboundVariable(_) => ShuntingYardErrorKind::UnboundVariable,
        }
    }

    /// which stage of the pipeline produced this error
    pub fn stage(&self) -> &'static str {
        match self.kind() {
            ShuntingYardErrorKind::Tokenization => "tokenizer",
            ShuntingYardErrorKind::Structural => "shunting-yard",
            ShuntingYardErrorKind::Arity
            | ShuntingYardErrorKind::Cardinality
            | ShuntingYardErrorKind::UnboundVariable => "evaluator",
        }
    }
}

impl Display for ShuntingYardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] ", self.stage())?;
        match self {
            Self::Tokenization { expression, position } => write!(f, "could not tokenize '{expression}' (stuck at offset {position})"),
            Self::Structural(e) => write!(f, "{e}"),
            Self::Arity { symbol, expected, found } => write!(f, "'{symbol}' needs {expected} value(s) but only {found} available"),
            Self::Cardinality(0) => write!(f, "expression produced no value"),
            Self::Cardinality(n) => write!(f, "expression produced {n} values, expected 1"),
            Self::UnboundVariable(index) => write!(f, "no value bound for variable {index}"),
        }
    }
}
impl std::error::Error for ShuntingYardError {}

impl From<StructuralError> for ShuntingYardError {
    fn from(value: StructuralError) -> Self { Self::Structural(value) }
}


#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ShuntingYardErrorKind {
    Tokenization,
    Structural,
    Arity,
    Cardinality,
    UnboundVariable,
}


#[derive(Debug, Clone, PartialEq)]
pub enum StructuralError {
    /// a comma with no open parenthesis before it
    MisplacedSeparator,
    UnmatchedRightParenthesis,
    UnmatchedLeftParenthesis,
    /// a token which cannot appear in postfix output
    UnexpectedToken(ShuntingYardToken),
}
impl Display for StructuralError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MisplacedSeparator => write!(f, "misplaced separator or parenthesis"),
            Self::UnmatchedRightParenthesis => write!(f, "')' without matching '('"),
            Self::UnmatchedLeftParenthesis => write!(f, "'(' without matching ')'"),
            Self::UnexpectedToken(t) => write!(f, "unexpected token '{t}'"),
        }
    }
}
