//! A deterministic, indented s-expression rendering of the AST, used by the
//! `parser` CLI stage (§6). The exact textual form is implementation-defined
//! by the specification; this one nests children under their parent at one
//! extra level of two-space indentation per depth.

use std::fmt::Write as _;

use crate::expr::Expr;
use crate::stmt::{Block, Stmt};

pub fn program_tree(stmts: &[Stmt]) -> String {
    let mut out = String::new();
    for stmt in stmts {
        write_stmt(&mut out, stmt, 0);
    }
    out
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

fn write_block(out: &mut String, block: &Block, depth: usize) {
    for stmt in &block.stmts {
        write_stmt(out, stmt, depth);
    }
}

fn write_stmt(out: &mut String, stmt: &Stmt, depth: usize) {
    indent(out, depth);
    match stmt {
        Stmt::FunctionDef { name, params, body, .. } => {
            let _ = writeln!(out, "(FunctionDef {name} ({}))", params.join(" "));
            write_block(out, body, depth + 1);
        }
        Stmt::VarDef { name, init, .. } => {
            let _ = writeln!(out, "(VarDef {name})");
            if let Some(init) = init {
                write_expr(out, init, depth + 1);
            }
        }
        Stmt::Assign { name, expr, .. } => {
            let _ = writeln!(out, "(Assign {name})");
            write_expr(out, expr, depth + 1);
        }
        Stmt::Call { name, args, .. } => {
            let _ = writeln!(out, "(Call {name})");
            for arg in args {
                write_expr(out, arg, depth + 1);
            }
        }
        Stmt::If { cond, then_branch, else_branch, .. } => {
            let _ = writeln!(out, "(If)");
            write_expr(out, cond, depth + 1);
            write_block(out, then_branch, depth + 1);
            if let Some(else_branch) = else_branch {
                indent(out, depth);
                let _ = writeln!(out, "(Else)");
                write_block(out, else_branch, depth + 1);
            }
        }
        Stmt::From { start, end, step_unit, iter_name, body, .. } => {
            let _ = writeln!(out, "(From {iter_name} by {step_unit})");
            write_expr(out, start, depth + 1);
            write_expr(out, end, depth + 1);
            write_block(out, body, depth + 1);
        }
        Stmt::Print { expr, .. } => {
            let _ = writeln!(out, "(Print)");
            write_expr(out, expr, depth + 1);
        }
        Stmt::Return { expr, .. } => {
            let _ = writeln!(out, "(Return)");
            write_expr(out, expr, depth + 1);
        }
    }
}

fn write_expr(out: &mut String, expr: &Expr, depth: usize) {
    indent(out, depth);
    match expr {
        Expr::Binary { op, lhs, rhs, .. } => {
            let _ = writeln!(out, "(Binary {op})");
            write_expr(out, lhs, depth + 1);
            write_expr(out, rhs, depth + 1);
        }
        Expr::Unary { op, operand, .. } => {
            let _ = writeln!(out, "(Unary {op})");
            write_expr(out, operand, depth + 1);
        }
        Expr::Literal { value, .. } => {
            let _ = writeln!(out, "(Literal {value})");
        }
        Expr::Var { name, .. } => {
            let _ = writeln!(out, "(Var {name})");
        }
        Expr::Call { name, args, .. } => {
            let _ = writeln!(out, "(Call {name})");
            for arg in args {
                write_expr(out, arg, depth + 1);
            }
        }
        Expr::FieldAccess { base, field, .. } => {
            let _ = writeln!(out, "(FieldAccess .{field})");
            write_expr(out, base, depth + 1);
        }
    }
}
