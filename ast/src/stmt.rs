use timon_span::Span;

use crate::expr::Expr;
use crate::unit::UnitWord;

/// A brace-delimited sequence of statements; pushed as a fresh environment
/// frame on entry (§4.4).
#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

/// Statement AST nodes (§3).
#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    FunctionDef { name: String, params: Vec<String>, body: Block, span: Span },
    VarDef { name: String, init: Option<Expr>, span: Span },
    Assign { name: String, expr: Expr, span: Span },
    Call { name: String, args: Vec<Expr>, span: Span },
    If { cond: Expr, then_branch: Block, else_branch: Option<Block>, span: Span },
    From {
        start: Expr,
        end: Expr,
        step_unit: UnitWord,
        iter_name: String,
        body: Block,
        span: Span,
    },
    Print { expr: Expr, span: Span },
    Return { expr: Expr, span: Span },
}

impl Stmt {
    pub fn span(&self) -> Span {
        match self {
            Stmt::FunctionDef { span, .. }
            | Stmt::VarDef { span, .. }
            | Stmt::Assign { span, .. }
            | Stmt::Call { span, .. }
            | Stmt::If { span, .. }
            | Stmt::From { span, .. }
            | Stmt::Print { span, .. }
            | Stmt::Return { span, .. } => *span,
        }
    }
}
