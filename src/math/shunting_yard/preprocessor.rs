/// a character of a preprocessed expression.
/// unary minus gets its own variant so it can never collide with anything the user typed
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExpressionChar {
    Char(char),
    UnaryMinus,
    /// whitespace between two chars. no token can span one
    Break,
}

pub struct Preprocessor;
impl Preprocessor {
    /// strip whitespace and mark every unary minus.
    ///
    /// a minus is binary only when the previous non-whitespace char is a digit, `)` or `]`.
    /// whitespace is kept as a single [ExpressionChar::Break] when it separates two tokens, so `1 2` doesnt become `12`
    pub fn process(expression: &str) -> Vec<ExpressionChar> {
        let mut output = Vec::with_capacity(expression.len());
        let mut previous: Option<char> = None;
        let mut had_whitespace = false;

        for c in expression.chars() {
            if c.is_whitespace() {
                had_whitespace = true;
                continue;
            }

            // a unary minus is always joined to what follows it, so it doesnt need a break
            if had_whitespace && matches!(output.last(), Some(ExpressionChar::Char(_))) {
                output.push(ExpressionChar::Break);
            }
            had_whitespace = false;

            let is_binary = matches!(previous, Some('0'..='9' | ')' | ']'));
            if c == '-' && !is_binary {
                output.push(ExpressionChar::UnaryMinus);
            } else {
                output.push(ExpressionChar::Char(c));
            }
            previous = Some(c);
        }

        trace!("preprocessed '{expression}' into {} chars", output.len());
        output
    }
}


#[allow(unused)]
mod preprocessor_tests {
    use crate::prelude::*;
    use crate::prelude::ExpressionChar::*;

    #[test]
    fn whitespace() {
        assert_eq!(Preprocessor::process(" 1 +\t2 "), vec![Char('1'), Break, Char('+'), Break, Char('2')]);
        assert_eq!(Preprocessor::process("1  2"), vec![Char('1'), Break, Char('2')]);
        assert!(Preprocessor::process("   ").is_empty());
    }

    #[test]
    fn leading_minus_is_unary() {
        assert_eq!(Preprocessor::process("-3"), vec![UnaryMinus, Char('3')]);
        assert_eq!(Preprocessor::process("- 3"), vec![UnaryMinus, Char('3')]);
    }

    #[test]
    fn minus_after_operand_is_binary() {
        assert_eq!(Preprocessor::process("4-3"), vec![Char('4'), Char('-'), Char('3')]);
        assert_eq!(Preprocessor::process("(1)-2")[3], Char('-'));
        assert_eq!(Preprocessor::process("x[0]-2")[4], Char('-'));
        // whitespace doesnt count as the previous char
        assert_eq!(Preprocessor::process("4 - 3")[2], Char('-'));
    }

    #[test]
    fn minus_after_operator_is_unary() {
        assert_eq!(Preprocessor::process("2*-3"), vec![Char('2'), Char('*'), UnaryMinus, Char('3')]);
        assert_eq!(Preprocessor::process("max(1,-2)")[6], UnaryMinus);
        assert_eq!(Preprocessor::process("--1"), vec![UnaryMinus, UnaryMinus, Char('1')]);
    }
}
