use crate::prelude::*;

/// evaluates postfix tokens against a set of variable values
pub struct RpnEvaluator<'a> {
    symbols: &'a SymbolTable,
}
impl<'a> RpnEvaluator<'a> {
    pub fn new(symbols: &'a SymbolTable) -> Self {
        Self { symbols }
    }

    pub fn evaluate<V: VariableSource + ?Sized>(&self, rpn: &[ShuntingYardToken], values: &V) -> ShuntingYardResult<f64> {
        let mut stack: Vec<f64> = Vec::new();

        for token in rpn {
            match token {
                ShuntingYardToken::Number(num) => stack.push(*num),
                ShuntingYardToken::Variable(index) => {
                    let value = values.get_value(*index).ok_or(ShuntingYardError::UnboundVariable(*index))?;
                    stack.push(value);
                }

                ShuntingYardToken::Operator(name) | ShuntingYardToken::Function(name) => {
                    let Some(operation) = self.symbols.operation(token) else {
                        return Err(ShuntingYardError::unknown_symbol(name))
                    };

                    let arity = operation.arity();
                    if stack.len() < arity {
                        return Err(ShuntingYardError::Arity {
                            symbol: name.clone(),
                            expected: arity,
                            found: stack.len(),
                        })
                    }

                    // split_off keeps the arguments in left to right order
                    let args = stack.split_off(stack.len() - arity);
                    let Some(result) = operation.call(&args) else {
                        return Err(ShuntingYardError::Arity { symbol: name.clone(), expected: arity, found: args.len() })
                    };
                    stack.push(result);
                }

                ShuntingYardToken::LeftParenthesis
                | ShuntingYardToken::RightParenthesis
                | ShuntingYardToken::Comma => return Err(StructuralError::UnexpectedToken(token.clone()).into()),
            }
        }

        match &*stack {
            &[result] => Ok(result),
            other => Err(ShuntingYardError::Cardinality(other.len())),
        }
    }
}


#[allow(unused)]
mod rpn_tests {
    use crate::prelude::*;
    use crate::prelude::ShuntingYardToken::*;

    fn symbols() -> SymbolTable {
        let mut symbols = SymbolTable::new();
        symbols.register_operator("-", |a: f64, b: f64| a - b, 1, Associativity::Left);
        symbols.register_function("clamp", |v: f64, min: f64, max: f64| v.clamp(min, max));
        symbols.register_function("pi", || std::f64::consts::PI);
        symbols
    }

    #[test]
    fn argument_order() {
        let symbols = symbols();
        let rpn = vec![Number(10.0), Number(4.0), Operator("-".to_owned())];
        assert_eq!(RpnEvaluator::new(&symbols).evaluate(&rpn, &ValueCollection::new()), Ok(6.0));

        let rpn = vec![Number(15.0), Number(0.0), Variable(0), Function("clamp".to_owned())];
        let values = ValueCollection::new().set_chained(0, 10.0);
        assert_eq!(RpnEvaluator::new(&symbols).evaluate(&rpn, &values), Ok(10.0));
    }

    #[test]
    fn zero_arity_function() {
        let symbols = symbols();
        let rpn = vec![Function("pi".to_owned())];
        let no_values: Vec<f64> = Vec::new();
        assert_eq!(RpnEvaluator::new(&symbols).evaluate(&rpn, &no_values), Ok(std::f64::consts::PI));
    }

    #[test]
    fn errors() {
        let symbols = symbols();
        let evaluator = RpnEvaluator::new(&symbols);
        let no_values: &[f64] = &[];

        let err = evaluator.evaluate(&[Number(1.0), Operator("-".to_owned())], no_values).unwrap_err();
        assert_eq!(err, ShuntingYardError::Arity { symbol: "-".to_owned(), expected: 2, found: 1 });

        assert_eq!(evaluator.evaluate(&[], no_values), Err(ShuntingYardError::Cardinality(0)));
        assert_eq!(evaluator.evaluate(&[Number(1.0), Number(2.0)], no_values), Err(ShuntingYardError::Cardinality(2)));
        assert_eq!(evaluator.evaluate(&[Variable(3)], no_values), Err(ShuntingYardError::UnboundVariable(3)));
        assert_eq!(evaluator.evaluate(&[Comma], no_values).unwrap_err().kind(), ShuntingYardErrorKind::Structural);
    }
}
