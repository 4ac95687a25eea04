mod shunting_yard;

pub use shunting_yard::*;
