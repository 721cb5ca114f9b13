//! The Timon abstract syntax tree (§3 of the specification).

mod expr;
mod ops;
mod stmt;
mod tree;
mod unit;

pub use expr::Expr;
pub use ops::{BinaryOp, UnaryOp};
pub use stmt::{Block, Stmt};
pub use tree::program_tree;
pub use unit::UnitWord;
