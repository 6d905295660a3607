pub mod diagnostic;

pub use diagnostic::{codes, Diagnostic};
