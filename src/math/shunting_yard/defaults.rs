use crate::prelude::*;

impl SymbolTable {
    /// the usual arithmetic operators.
    /// `+ -` bind loosest, then `* / %`, then `^` which is right associative
    pub fn register_default_operators(&mut self) {
        self.register_operator("+", |a: f64, b: f64| a + b, 1, Associativity::Left);
        self.register_operator("-", |a: f64, b: f64| a - b, 1, Associativity::Left);
        self.register_operator("*", |a: f64, b: f64| a * b, 2, Associativity::Left);
        self.register_operator("/", |a: f64, b: f64| a / b, 2, Associativity::Left);
        self.register_operator("%", |a: f64, b: f64| a % b, 2, Associativity::Left);
        self.register_operator("^", f64::powf, 3, Associativity::Right);
    }

    pub fn register_default_functions(&mut self) {
        self.register_function("abs", f64::abs);
        self.register_function("sqrt", f64::sqrt);
        self.register_function("exp", f64::exp);
        self.register_function("ln", f64::ln);
        // log(value, base)
        self.register_function("log", f64::log);
        self.register_function("sin", f64::sin);
        self.register_function("cos", f64::cos);
        self.register_function("tan", f64::tan);
        self.register_function("floor", f64::floor);
        self.register_function("ceil", f64::ceil);
        self.register_function("round", f64::round);
        self.register_function("min", f64::min);
        self.register_function("max", f64::max);
        self.register_function("pi", || std::f64::consts::PI);
    }

    pub fn register_defaults(&mut self) {
        self.register_default_operators();
        self.register_default_functions();
    }

    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        table.register_defaults();
        table
    }
}


#[allow(unused)]
mod defaults_tests {
    use crate::prelude::*;

    #[test]
    fn default_arities() {
        let table = SymbolTable::with_defaults();
        assert_eq!(table.operator("^").unwrap().operation.arity(), 2);
        assert!(table.operator("^").unwrap().right_assoc);
        assert!(!table.operator("^").unwrap().left_assoc);
        assert_eq!(table.function("log").unwrap().operation.arity(), 2);
        assert_eq!(table.function("sqrt").unwrap().operation.arity(), 1);
        assert_eq!(table.function("pi").unwrap().operation.arity(), 0);
    }

    #[test]
    fn log_takes_base_second() {
        let table = SymbolTable::with_defaults();
        let log = &table.function("log").unwrap().operation;
        assert!((log.call(&[8.0, 2.0]).unwrap() - 3.0).abs() < 1e-12);
    }
}
