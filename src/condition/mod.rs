//! Collection conditions
//!
//! This module holds the condition kinds, construction and validation of
//! reference collections, evaluation against runtime values, and the JSON
//! record format used to persist conditions.

pub mod cache;
mod codec;
mod collection;
mod evaluator;
mod kind;
pub mod value;


pub use cache::*;
pub use collection::*;
pub use evaluator::*;
pub use kind::*;
pub use value::{json_type_name, values_equal, RuntimeValue};
