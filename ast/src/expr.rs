use timon_span::Span;
use timon_value::Value;

use crate::ops::{BinaryOp, UnaryOp};
use crate::unit::UnitWord;

/// Expression AST nodes (§3). Literal expressions hold a `timon_value::Value`
/// directly — the parser only ever constructs `Number`/`String`/`Date`/
/// `Time`/`Datetime`/`Timedelta` values here, never `Bool`/`Unit`, which are
/// produced only at evaluation time.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Binary { op: BinaryOp, lhs: Box<Expr>, rhs: Box<Expr>, span: Span },
    Unary { op: UnaryOp, operand: Box<Expr>, span: Span },
    Literal { value: Value, span: Span },
    Var { name: String, span: Span },
    Call { name: String, args: Vec<Expr>, span: Span },
    FieldAccess { base: Box<Expr>, field: UnitWord, span: Span },
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Binary { span, .. }
            | Expr::Unary { span, .. }
            | Expr::Literal { span, .. }
            | Expr::Var { span, .. }
            | Expr::Call { span, .. }
            | Expr::FieldAccess { span, .. } => *span,
        }
    }
}
