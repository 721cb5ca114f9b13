//! Statement parsing, including the identifier-first disambiguation and the
//! `from`-loop grammar (§4.2, §6).

use timon_ast::{Block, Stmt};

use super::context::ParserContext;
use super::expression::{parse_call_args, parse_expr};
use crate::tokenizer::Token;

pub fn parse_block(ctx: &mut ParserContext) -> timon_errors::Result<Block> {
    let start = ctx.expect(Token::LBrace)?;
    let mut stmts = Vec::new();
    while !ctx.check(&Token::RBrace) {
        if ctx.check(&Token::Eof) {
            return ctx.unexpected("'}' to close this block");
        }
        stmts.push(parse_stmt(ctx)?);
    }
    let end = ctx.expect(Token::RBrace)?;
    Ok(Block { stmts, span: start.to(end) })
}

pub fn parse_stmt(ctx: &mut ParserContext) -> timon_errors::Result<Stmt> {
    let stmt = match ctx.token.clone() {
        Token::Fun => parse_function_def(ctx),
        Token::Var => parse_var_def(ctx),
        Token::If => parse_if(ctx),
        Token::From => parse_from(ctx),
        Token::Print => parse_print(ctx),
        Token::Return => parse_return(ctx),
        Token::Ident(name) => parse_identifier_first(ctx, name),
        _ => ctx.unexpected("a statement"),
    }?;
    tracing::debug!(span = %stmt.span(), ?stmt, "parsed statement");
    Ok(stmt)
}

fn parse_params_decl(ctx: &mut ParserContext) -> timon_errors::Result<Vec<String>> {
    ctx.expect(Token::LParen)?;
    let mut params = Vec::new();
    if !ctx.check(&Token::RParen) {
        loop {
            let (name, _) = ctx.expect_ident()?;
            params.push(name);
            if !ctx.eat(&Token::Comma) {
                break;
            }
        }
    }
    ctx.expect(Token::RParen)?;
    Ok(params)
}

fn parse_function_def(ctx: &mut ParserContext) -> timon_errors::Result<Stmt> {
    let start = ctx.expect(Token::Fun)?;
    let (name, _) = ctx.expect_ident()?;
    let params = parse_params_decl(ctx)?;
    let body = parse_block(ctx)?;
    let span = start.to(body.span);
    Ok(Stmt::FunctionDef { name, params, body, span })
}

fn parse_var_def(ctx: &mut ParserContext) -> timon_errors::Result<Stmt> {
    let start = ctx.expect(Token::Var)?;
    let (name, name_span) = ctx.expect_ident()?;
    let mut span = start.to(name_span);
    let init = if ctx.eat(&Token::Assign) {
        let expr = parse_expr(ctx)?;
        span = start.to(expr.span());
        Some(expr)
    } else {
        None
    };
    Ok(Stmt::VarDef { name, init, span })
}

fn parse_if(ctx: &mut ParserContext) -> timon_errors::Result<Stmt> {
    let start = ctx.expect(Token::If)?;
    let cond = parse_expr(ctx)?;
    let then_branch = parse_block(ctx)?;
    let mut span = start.to(then_branch.span);
    let else_branch = if ctx.eat(&Token::Else) {
        let block = parse_block(ctx)?;
        span = start.to(block.span);
        Some(block)
    } else {
        None
    };
    Ok(Stmt::If { cond, then_branch, else_branch, span })
}

fn parse_from(ctx: &mut ParserContext) -> timon_errors::Result<Stmt> {
    let start = ctx.expect(Token::From)?;
    let range_start = parse_expr(ctx)?;
    ctx.expect(Token::To)?;
    let end = parse_expr(ctx)?;
    ctx.expect(Token::By)?;
    let step_unit = match ctx.token {
        Token::Unit(word) => word,
        _ => return ctx.unexpected("a step unit (years, months, weeks, days, hours, minutes, or seconds)"),
    };
    ctx.bump();
    ctx.expect(Token::As)?;
    let (iter_name, _) = ctx.expect_ident()?;
    let body = parse_block(ctx)?;
    let span = start.to(body.span);
    Ok(Stmt::From { start: range_start, end, step_unit, iter_name, body, span })
}

fn parse_print(ctx: &mut ParserContext) -> timon_errors::Result<Stmt> {
    let start = ctx.expect(Token::Print)?;
    let expr = parse_expr(ctx)?;
    let span = start.to(expr.span());
    Ok(Stmt::Print { expr, span })
}

fn parse_return(ctx: &mut ParserContext) -> timon_errors::Result<Stmt> {
    let start = ctx.expect(Token::Return)?;
    let expr = parse_expr(ctx)?;
    let span = start.to(expr.span());
    Ok(Stmt::Return { expr, span })
}

/// `identifier ( parameters | assignment )` (§4.2): the next token after the
/// identifier is the only thing that disambiguates a call statement from an
/// assignment; anything else is a syntax error.
fn parse_identifier_first(ctx: &mut ParserContext, name: String) -> timon_errors::Result<Stmt> {
    let start = ctx.span;
    ctx.bump();
    match ctx.token {
        Token::LParen => {
            let args = parse_call_args(ctx)?;
            let span = start.to(ctx.prev_span);
            Ok(Stmt::Call { name, args, span })
        }
        Token::Assign => {
            ctx.bump();
            let expr = parse_expr(ctx)?;
            let span = start.to(expr.span());
            Ok(Stmt::Assign { name, expr, span })
        }
        _ => ctx.unexpected("'(' to start a call or '=' to start an assignment"),
    }
}
