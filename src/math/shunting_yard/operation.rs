use crate::prelude::*;

type OperationFn = dyn Fn(&[f64]) -> f64 + Send + Sync;

/// a callable with a known number of arguments
#[derive(Clone)]
pub struct Operation {
    arity: usize,
    func: Arc<OperationFn>,
}
impl Operation {
    /// create an operation with a fixed number of arguments, which receives them as a slice of exactly `arity` values
    pub fn fixed(arity: usize, func: impl Fn(&[f64]) -> f64 + Send + Sync + 'static) -> Self {
        Self {
            arity,
            func: Arc::new(func),
        }
    }

    pub fn arity(&self) -> usize { self.arity }

    /// args are in left-to-right order. returns None if `args.len()` isnt the arity
    pub fn call(&self, args: &[f64]) -> Option<f64> {
        if args.len() != self.arity { return None }
        Some((self.func)(args))
    }
}
impl std::fmt::Debug for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Operation").field("arity", &self.arity).finish_non_exhaustive()
    }
}


/// conversion from a plain function into an [Operation].
///
/// the arity is taken from the function's signature,
/// so `|a: f64, b: f64| a + b` becomes an operation with 2 arguments.
/// `Args` is only a marker for which signature is being converted
pub trait IntoOperation<Args> {
    fn into_operation(self) -> Operation;
}

impl IntoOperation<Operation> for Operation {
    fn into_operation(self) -> Operation { self }
}

macro_rules! impl_into_operation {
    (@f64 $arg:ident) => { f64 };
    ($count:literal; $($arg:ident),*) => {
        impl<F> IntoOperation<($(impl_into_operation!(@f64 $arg),)*)> for F
        where F: Fn($(impl_into_operation!(@f64 $arg)),*) -> f64 + Send + Sync + 'static {
            #[allow(unused_variables, non_snake_case)]
            fn into_operation(self) -> Operation {
                Operation::fixed($count, move |args| {
                    // call checks the length
                    let &[$($arg),*] = args else { unreachable!("operation called with {} args", args.len()) };
                    self($($arg),*)
                })
            }
        }
    };
}

impl_into_operation!(0;);
impl_into_operation!(1; a);
impl_into_operation!(2; a, b);
impl_into_operation!(3; a, b, c);
impl_into_operation!(4; a, b, c, d);


/// how operators of equal precedence group
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Associativity {
    Left,
    Right,
    /// both left and right associative. behaves like [Associativity::Left] for ties
    #[default]
    Both,
}
impl Associativity {
    pub fn is_left(&self) -> bool {
        matches!(self, Self::Left | Self::Both)
    }
    pub fn is_right(&self) -> bool {
        matches!(self, Self::Right | Self::Both)
    }
}
impl std::str::FromStr for Associativity {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "both" => Ok(Self::Both),
            other => Err(format!("unknown associativity '{other}'")),
        }
    }
}


/// a registered function
#[derive(Clone, Debug)]
pub struct FunctionEntry {
    pub name: String,
    pub operation: Operation,
}

/// a registered binary (or otherwise) operator
#[derive(Clone, Debug)]
pub struct OperatorEntry {
    pub name: String,
    pub operation: Operation,
    pub precedence: i32,
    pub left_assoc: bool,
    pub right_assoc: bool,
}
impl OperatorEntry {
    /// should `self` (the incoming operator) pop `top` off the operator stack
    pub fn yields_to(&self, top: &OperatorEntry) -> bool {
        (self.left_assoc && self.precedence <= top.precedence)
        || (self.right_assoc && self.precedence < top.precedence)
    }
}


#[allow(unused)]
mod operation_tests {
    use crate::prelude::*;

    fn op_for<Args>(f: impl IntoOperation<Args>) -> Operation {
        f.into_operation()
    }

    #[test]
    fn arity_from_signature() {
        assert_eq!(op_for(|| 1.0).arity(), 0);
        assert_eq!(op_for(|a: f64| a.abs()).arity(), 1);
        assert_eq!(op_for(f64::max).arity(), 2);
        assert_eq!(op_for(|a: f64, b: f64, c: f64| a + b + c).arity(), 3);

        let sub = op_for(|a: f64, b: f64| a - b);
        assert_eq!(sub.call(&[5.0, 3.0]), Some(2.0));
    }

    #[test]
    fn fixed_arity() {
        let sum = Operation::fixed(4, |args| args.iter().sum());
        assert_eq!(sum.arity(), 4);
        assert_eq!(sum.call(&[1.0, 2.0, 3.0, 4.0]), Some(10.0));
    }

    #[test]
    fn wrong_argument_count() {
        let sub = op_for(|a: f64, b: f64| a - b);
        assert_eq!(sub.call(&[1.0]), None);
        assert_eq!(sub.call(&[1.0, 2.0, 3.0]), None);
        assert_eq!(Operation::fixed(1, |args| args[0]).call(&[]), None);
    }

    #[test]
    fn associativity_flags() {
        assert!(Associativity::Left.is_left() && !Associativity::Left.is_right());
        assert!(!Associativity::Right.is_left() && Associativity::Right.is_right());
        assert!(Associativity::Both.is_left() && Associativity::Both.is_right());
        assert_eq!("right".parse::<Associativity>(), Ok(Associativity::Right));
        assert!("up".parse::<Associativity>().is_err());
    }
}
