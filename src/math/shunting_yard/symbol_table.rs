use crate::prelude::*;

/// the operators and functions a parser knows about
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    functions: HashMap<String, FunctionEntry>,
    operators: HashMap<String, OperatorEntry>,
}
impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// register a function. the arity is taken from the function's signature.
    /// registering an existing name replaces it
    pub fn register_function<Args>(&mut self, name: impl ToString, operation: impl IntoOperation<Args>) {
        let name = name.to_string();
        let operation = operation.into_operation();
        trace!("registering function '{name}' with arity {}", operation.arity());

        if self.functions.contains_key(&name) {
            debug!("function '{name}' was already registered, overwriting");
        }
        self.functions.insert(name.clone(), FunctionEntry { name, operation });
    }

    /// register an operator with the given precedence and associativity.
    /// registering an existing name replaces it
    pub fn register_operator<Args>(
        &mut self,
        name: impl ToString,
        operation: impl IntoOperation<Args>,
        precedence: i32,
        associativity: Associativity,
    ) {
        let name = name.to_string();
        let operation = operation.into_operation();
        trace!("registering operator '{name}' (arity {}, precedence {precedence}, {associativity:?})", operation.arity());

        if self.operators.contains_key(&name) {
            debug!("operator '{name}' was already registered, overwriting");
        }
        self.operators.insert(name.clone(), OperatorEntry {
            name,
            operation,
            precedence,
            left_assoc: associativity.is_left(),
            right_assoc: associativity.is_right(),
        });
    }

    pub fn function(&self, name: &str) -> Option<&FunctionEntry> {
        self.functions.get(name)
    }
    pub fn operator(&self, name: &str) -> Option<&OperatorEntry> {
        self.operators.get(name)
    }

    pub fn is_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }
    pub fn is_operator(&self, name: &str) -> bool {
        self.operators.contains_key(name)
    }

    /// get the operation behind a function or operator token
    pub fn operation(&self, token: &ShuntingYardToken) -> Option<&Operation> {
        match token {
            ShuntingYardToken::Function(name) => self.function(name).map(|f| &f.operation),
            ShuntingYardToken::Operator(name) => self.operator(name).map(|o| &o.operation),
            _ => None
        }
    }

    pub fn function_names(&self) -> impl Iterator<Item=&str> {
        self.functions.keys().map(|k| k.as_str())
    }
    pub fn operator_names(&self) -> impl Iterator<Item=&str> {
        self.operators.keys().map(|k| k.as_str())
    }
}


#[allow(unused)]
mod symbol_table_tests {
    use crate::prelude::*;

    #[test]
    fn register_and_lookup() {
        let mut table = SymbolTable::new();
        table.register_operator("+", |a: f64, b: f64| a + b, 1, Associativity::Left);
        table.register_function("max", f64::max);

        let plus = table.operator("+").unwrap();
        assert_eq!(plus.precedence, 1);
        assert!(plus.left_assoc && !plus.right_assoc);
        assert_eq!(plus.operation.arity(), 2);

        assert!(table.is_function("max"));
        assert!(!table.is_operator("max"));
        assert!(table.function("min").is_none());
    }

    #[test]
    fn reregistering_overwrites() {
        let mut table = SymbolTable::new();
        table.register_function("f", |a: f64| a);
        table.register_function("f", |a: f64, b: f64| a * b);

        let f = table.function("f").unwrap();
        assert_eq!(f.operation.arity(), 2);
        assert_eq!(f.operation.call(&[3.0, 4.0]), Some(12.0));
        assert_eq!(table.function_names().count(), 1);
    }

    #[test]
    fn explicit_arity() {
        let mut table = SymbolTable::new();
        table.register_function("sum3", Operation::fixed(3, |args| args.iter().sum()));

        let sum = &table.function("sum3").unwrap().operation;
        assert_eq!(sum.arity(), 3);
        assert_eq!(sum.call(&[1.0, 2.0, 3.0]), Some(6.0));
    }

    #[test]
    fn both_associativity_sets_both_flags() {
        let mut table = SymbolTable::new();
        table.register_operator("#", |a: f64, b: f64| a - b, 1, Associativity::Both);
        let op = table.operator("#").unwrap();
        assert!(op.left_assoc && op.right_assoc);
    }
}
