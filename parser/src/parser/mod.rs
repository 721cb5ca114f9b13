mod context;
mod expression;
mod statement;

use timon_ast::Stmt;

use crate::tokenizer::{tokenize_all, Token};
use context::ParserContext;

/// Parses a full program: a sequence of top-level statements up to end of
/// input (§4.2, §6's `program` production).
pub fn parse_program(source: &str) -> timon_errors::Result<Vec<Stmt>> {
    let tokens = tokenize_all(source)?;
    let mut ctx = ParserContext::new(tokens);
    let mut stmts = Vec::new();
    while !ctx.check(&Token::Eof) {
        stmts.push(statement::parse_stmt(&mut ctx)?);
    }
    Ok(stmts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use timon_ast::{program_tree, BinaryOp, Expr, Stmt};

    #[test]
    fn parses_print_of_addition() {
        let prog = parse_program("print 1+2").unwrap();
        assert_eq!(prog.len(), 1);
        match &prog[0] {
            Stmt::Print { expr: Expr::Binary { op: BinaryOp::Add, .. }, .. } => {}
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn parses_function_def_and_call() {
        let prog = parse_program("fun f(x){ return x*2 } print f(5)").unwrap();
        assert_eq!(prog.len(), 2);
        assert!(matches!(prog[0], Stmt::FunctionDef { .. }));
        assert!(matches!(prog[1], Stmt::Print { .. }));
    }

    #[test]
    fn parses_from_loop() {
        let prog = parse_program("from 01.01.2020 to 03.01.2020 by days as i { print i }").unwrap();
        assert_eq!(prog.len(), 1);
        assert!(matches!(prog[0], Stmt::From { .. }));
    }

    #[test]
    fn parses_var_def_with_and_without_init() {
        let prog = parse_program("var x var y = 1").unwrap();
        assert_eq!(prog.len(), 2);
        assert!(matches!(&prog[0], Stmt::VarDef { init: None, .. }));
        assert!(matches!(&prog[1], Stmt::VarDef { init: Some(_), .. }));
    }

    #[test]
    fn identifier_first_statement_requires_paren_or_equals() {
        assert!(parse_program("x + 1").is_err());
    }

    #[test]
    fn chained_comparison_is_a_syntax_error() {
        assert!(parse_program("print 1 < 2 < 3").is_err());
    }

    #[test]
    fn stacked_unary_is_a_syntax_error() {
        assert!(parse_program("print --1").is_err());
        assert!(parse_program("print !!x").is_err());
    }

    #[test]
    fn field_access_parses_after_dot() {
        let prog = parse_program("print '1Y'.years").unwrap();
        assert!(matches!(
            &prog[0],
            Stmt::Print { expr: Expr::FieldAccess { .. }, .. }
        ));
    }

    #[test]
    fn if_else_parses() {
        let prog = parse_program("if 1==1 { print 1 } else { print 2 }").unwrap();
        assert!(matches!(&prog[0], Stmt::If { else_branch: Some(_), .. }));
    }

    #[test]
    fn program_tree_is_deterministic_and_nonempty() {
        let prog = parse_program("print 1+2").unwrap();
        let tree = program_tree(&prog);
        assert!(tree.contains("Print"));
        assert!(tree.contains("Binary +"));
    }
}
