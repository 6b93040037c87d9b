//! Abstract syntax tree types for the dialect-neutral expression model.

mod expression;
mod identifier;
mod record;
mod statement;

pub use expression::*;
pub use identifier::{IdentPart, Identifier};
pub use record::{Ex, ExValue, IntoExValue, Op, Record};
pub use statement::*;
