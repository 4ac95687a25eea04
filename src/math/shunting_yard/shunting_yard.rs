use crate::prelude::*;

/// converts infix tokens into postfix (reverse polish) order
pub struct ShuntingYard<'a> {
    symbols: &'a SymbolTable,
}
impl<'a> ShuntingYard<'a> {
    pub fn new(symbols: &'a SymbolTable) -> Self {
        Self { symbols }
    }

    pub fn to_rpn(&self, tokens: Vec<ShuntingYardToken>) -> ShuntingYardResult<Vec<ShuntingYardToken>> {
        let mut output_queue: Vec<ShuntingYardToken> = Vec::new();
        let mut operator_stack: Vec<ShuntingYardToken> = Vec::new();

        for token in tokens {
            match token {
                ShuntingYardToken::Number(_) | ShuntingYardToken::Variable(_) => output_queue.push(token),
                ShuntingYardToken::Function(_) => operator_stack.push(token),

                ShuntingYardToken::Comma => {
                    // pop everything in this argument off, but leave the left parenthesis
                    while let Some(top) = operator_stack.pop_if_not_left_paren() {
                        output_queue.push(top);
                    }
                    if operator_stack.is_empty() {
                        return Err(StructuralError::MisplacedSeparator.into())
                    }
                }

                ShuntingYardToken::Operator(ref name) => {
                    let Some(current) = self.symbols.operator(name) else {
                        return Err(ShuntingYardError::unknown_symbol(name))
                    };

                    while operator_stack.last().filter(|top| self.should_pop(current, top)).is_some() {
                        output_queue.extend(operator_stack.pop());
                    }
                    operator_stack.push(token);
                }

                ShuntingYardToken::LeftParenthesis => operator_stack.push(token),
                ShuntingYardToken::RightParenthesis => {
                    while let Some(top) = operator_stack.pop_if_not_left_paren() {
                        output_queue.push(top);
                    }

                    // the left parenthesis
                    if operator_stack.pop().is_none() {
                        return Err(StructuralError::UnmatchedRightParenthesis.into())
                    }

                    // if this closed a function's arguments, the function goes next
                    if let Some(ShuntingYardToken::Function(_)) = operator_stack.last() {
                        output_queue.extend(operator_stack.pop());
                    }
                }
            }
        }

        while let Some(top) = operator_stack.pop() {
            if let ShuntingYardToken::LeftParenthesis = top {
                return Err(StructuralError::UnmatchedLeftParenthesis.into())
            }
            output_queue.push(top);
        }

        trace!("rpn: {}", TokenList::new(&output_queue));
        Ok(output_queue)
    }

    /// should the operator on top of the stack be popped before pushing `current`
    fn should_pop(&self, current: &OperatorEntry, top: &ShuntingYardToken) -> bool {
        let ShuntingYardToken::Operator(top) = top else { return false };
        let Some(top) = self.symbols.operator(top) else { return false };
        current.yields_to(top)
    }
}

/// helper for the "pop until a left parenthesis" loops
trait OperatorStack {
    fn pop_if_not_left_paren(&mut self) -> Option<ShuntingYardToken>;
}
impl OperatorStack for Vec<ShuntingYardToken> {
    fn pop_if_not_left_paren(&mut self) -> Option<ShuntingYardToken> {
        match self.last()? {
            ShuntingYardToken::LeftParenthesis => None,
            _ => self.pop()
        }
    }
}


#[allow(unused)]
mod shunting_yard_tests {
    use crate::prelude::*;

    fn symbols() -> SymbolTable {
        let mut symbols = SymbolTable::new();
        symbols.register_operator("+", |a: f64, b: f64| a + b, 1, Associativity::Left);
        symbols.register_operator("*", |a: f64, b: f64| a * b, 2, Associativity::Left);
        symbols.register_operator("^", f64::powf, 3, Associativity::Right);
        symbols.register_operator("#", |a: f64, b: f64| a - b, 1, Associativity::Both);
        symbols.register_function("max", f64::max);
        symbols
    }

    fn rpn(expression: &str) -> ShuntingYardResult<String> {
        let symbols = symbols();
        let tokens = Tokenizer::new(&symbols, "x").tokenize(&Preprocessor::process(expression))?;
        let rpn = ShuntingYard::new(&symbols).to_rpn(tokens)?;
        Ok(TokenList::new(&rpn).to_string())
    }

    #[test]
    fn precedence() {
        assert_eq!(rpn("2+3*4").unwrap(), "2 3 4 * +");
        assert_eq!(rpn("2*3+4").unwrap(), "2 3 * 4 +");
        assert_eq!(rpn("(2+3)*4").unwrap(), "2 3 + 4 *");
    }

    #[test]
    fn associativity() {
        assert_eq!(rpn("1+2+3").unwrap(), "1 2 + 3 +");
        assert_eq!(rpn("2^3^2").unwrap(), "2 3 2 ^ ^");
        // "both" groups like left for ties
        assert_eq!(rpn("5#2#1").unwrap(), "5 2 # 1 #");
    }

    #[test]
    fn functions() {
        assert_eq!(rpn("max(1,2)+1").unwrap(), "1 2 max 1 +");
        assert_eq!(rpn("max(1+2,x[0]*3)").unwrap(), "1 2 + x[0] 3 * max");
        assert_eq!(rpn("max(max(1,2),3)").unwrap(), "1 2 max 3 max");
    }

    #[test]
    fn structural_errors() {
        assert_eq!(rpn("(1+2"), Err(StructuralError::UnmatchedLeftParenthesis.into()));
        assert_eq!(rpn("1+2)"), Err(StructuralError::UnmatchedRightParenthesis.into()));
        assert_eq!(rpn("1,2"), Err(StructuralError::MisplacedSeparator.into()));

        let err = rpn(")(").unwrap_err();
        assert_eq!(err.kind(), ShuntingYardErrorKind::Structural);
        assert_eq!(err.stage(), "shunting-yard");
    }
}
