//! Expression parsing: precedence-climbing over the fixed chain `or` → `and`
//! → comparison → additive → multiplicative → unary → postfix → primary
//! (§4.2). Comparison operators are non-associative (at most one per chain)
//! and unary operators do not stack, both enforced structurally below rather
//! than by a generic Pratt-parser precedence table — the grammar is small
//! and fixed enough that spelling out each level reads more clearly than a
//! binding-power table would, the same trade leo's recursive-descent
//! `expression.rs` makes for its own fixed precedence ladder.

use timon_ast::{BinaryOp, Expr, UnaryOp};
use timon_value::Value;

use super::context::ParserContext;
use crate::tokenizer::Token;

pub fn parse_expr(ctx: &mut ParserContext) -> timon_errors::Result<Expr> {
    parse_or(ctx)
}

fn parse_or(ctx: &mut ParserContext) -> timon_errors::Result<Expr> {
    let mut lhs = parse_and(ctx)?;
    while ctx.check(&Token::Or) {
        ctx.bump();
        let rhs = parse_and(ctx)?;
        let span = lhs.span().to(rhs.span());
        lhs = Expr::Binary { op: BinaryOp::Or, lhs: Box::new(lhs), rhs: Box::new(rhs), span };
    }
    Ok(lhs)
}

fn parse_and(ctx: &mut ParserContext) -> timon_errors::Result<Expr> {
    let mut lhs = parse_comparison(ctx)?;
    while ctx.check(&Token::And) {
        ctx.bump();
        let rhs = parse_comparison(ctx)?;
        let span = lhs.span().to(rhs.span());
        lhs = Expr::Binary { op: BinaryOp::And, lhs: Box::new(lhs), rhs: Box::new(rhs), span };
    }
    Ok(lhs)
}

fn comparison_op(token: &Token) -> Option<BinaryOp> {
    Some(match token {
        Token::Eq => BinaryOp::Eq,
        Token::NotEq => BinaryOp::Neq,
        Token::Lt => BinaryOp::Lt,
        Token::Le => BinaryOp::Le,
        Token::Gt => BinaryOp::Gt,
        Token::Ge => BinaryOp::Ge,
        _ => return None,
    })
}

/// At most one comparison operator per chain: `a < b < c` is a syntax error,
/// not a left-associative double comparison.
fn parse_comparison(ctx: &mut ParserContext) -> timon_errors::Result<Expr> {
    let lhs = parse_additive(ctx)?;
    let Some(op) = comparison_op(&ctx.token) else { return Ok(lhs) };
    ctx.bump();
    let rhs = parse_additive(ctx)?;
    let span = lhs.span().to(rhs.span());
    if let Some(op2) = comparison_op(&ctx.token) {
        let _ = op2;
        return ctx.unexpected("an operator other than a second comparison in the same chain");
    }
    Ok(Expr::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs), span })
}

fn parse_additive(ctx: &mut ParserContext) -> timon_errors::Result<Expr> {
    let mut lhs = parse_multiplicative(ctx)?;
    loop {
        let op = match ctx.token {
            Token::Add => BinaryOp::Add,
            Token::Minus => BinaryOp::Sub,
            _ => break,
        };
        ctx.bump();
        let rhs = parse_multiplicative(ctx)?;
        let span = lhs.span().to(rhs.span());
        lhs = Expr::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs), span };
    }
    Ok(lhs)
}

fn parse_multiplicative(ctx: &mut ParserContext) -> timon_errors::Result<Expr> {
    let mut lhs = parse_unary(ctx)?;
    loop {
        let op = match ctx.token {
            Token::Mul => BinaryOp::Mul,
            Token::Div => BinaryOp::Div,
            _ => break,
        };
        ctx.bump();
        let rhs = parse_unary(ctx)?;
        let span = lhs.span().to(rhs.span());
        lhs = Expr::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs), span };
    }
    Ok(lhs)
}

/// A single optional unary operator in front of a postfix expression; unary
/// operators do not stack (`--x`, `!!x` are syntax errors), since the operand
/// of `-`/`!` is parsed one level down rather than recursing back into
/// `parse_unary`.
fn parse_unary(ctx: &mut ParserContext) -> timon_errors::Result<Expr> {
    let op = match ctx.token {
        Token::Minus => UnaryOp::Negate,
        Token::Not => UnaryOp::Not,
        _ => return parse_postfix(ctx),
    };
    let start = ctx.span;
    ctx.bump();
    let operand = parse_postfix(ctx)?;
    let span = start.to(operand.span());
    Ok(Expr::Unary { op, operand: Box::new(operand), span })
}

fn parse_postfix(ctx: &mut ParserContext) -> timon_errors::Result<Expr> {
    let mut expr = parse_primary(ctx)?;
    while ctx.check(&Token::Dot) {
        ctx.bump();
        let field = match ctx.token {
            Token::Unit(word) => word,
            _ => return ctx.unexpected("a field name (years, months, weeks, days, hours, minutes, or seconds)"),
        };
        let end = ctx.span;
        ctx.bump();
        let span = expr.span().to(end);
        expr = Expr::FieldAccess { base: Box::new(expr), field, span };
    }
    Ok(expr)
}

fn parse_primary(ctx: &mut ParserContext) -> timon_errors::Result<Expr> {
    let span = ctx.span;
    match ctx.token.clone() {
        Token::Number(n) => {
            ctx.bump();
            Ok(Expr::Literal { value: Value::Number(n), span })
        }
        Token::Str(s) => {
            ctx.bump();
            Ok(Expr::Literal { value: Value::String(s), span })
        }
        Token::DateLit(d) => {
            ctx.bump();
            Ok(Expr::Literal { value: Value::Date(d), span })
        }
        Token::TimeLit(t) => {
            ctx.bump();
            Ok(Expr::Literal { value: Value::Time(t), span })
        }
        Token::DatetimeLit(dt) => {
            ctx.bump();
            Ok(Expr::Literal { value: Value::Datetime(dt), span })
        }
        Token::TimedeltaLit(td) => {
            ctx.bump();
            Ok(Expr::Literal { value: Value::Timedelta(td), span })
        }
        Token::Ident(name) => {
            ctx.bump();
            if ctx.check(&Token::LParen) {
                let args = parse_call_args(ctx)?;
                let end = ctx.prev_span;
                Ok(Expr::Call { name, args, span: span.to(end) })
            } else {
                Ok(Expr::Var { name, span })
            }
        }
        Token::LParen => {
            ctx.bump();
            let inner = parse_expr(ctx)?;
            ctx.expect(Token::RParen)?;
            Ok(inner)
        }
        _ => ctx.unexpected("an expression"),
    }
}

/// Parses `(arg, arg, ...)`, with the opening `(` as the current token.
pub fn parse_call_args(ctx: &mut ParserContext) -> timon_errors::Result<Vec<Expr>> {
    ctx.expect(Token::LParen)?;
    let mut args = Vec::new();
    if !ctx.check(&Token::RParen) {
        loop {
            args.push(parse_expr(ctx)?);
            if !ctx.eat(&Token::Comma) {
                break;
            }
        }
    }
    ctx.expect(Token::RParen)?;
    Ok(args)
}
