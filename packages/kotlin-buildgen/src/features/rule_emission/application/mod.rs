//! Rule emission use cases

mod emit;

pub use emit::{
    binary_target_name, check_collision, emit_rules, library_target_name, test_target_name,
};
