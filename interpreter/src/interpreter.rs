//! The tree-walking evaluator (§4.4).

use std::io::Write;

use indexmap::IndexMap;
use timon_ast::{BinaryOp, Block, Expr, Stmt, UnaryOp, UnitWord};
use timon_errors::Error;
use timon_span::Span;
use timon_value::{Timedelta, Value, ValueError};

/// A user-defined function: its parameter names and its body, captured at
/// the point its `FunctionDef` statement executes (§4.4: registration is not
/// hoisted — a call to a function defined later in program order fails with
/// a `NameError` just like any other undefined name).
struct Function {
    params: Vec<String>,
    body: Block,
}

/// How a statement sequence finished: either it ran off the end, or a
/// `Return` unwound through it carrying a value and the span of the
/// `return` statement (used to report a top-level `return` as a name error).
enum Flow {
    Normal,
    Return(Value, Span),
}

pub struct Interpreter<'out> {
    env: crate::environment::Environment,
    functions: IndexMap<String, Function>,
    out: &'out mut dyn Write,
}

/// Runs a parsed program to completion, writing `print` output to `out`.
pub fn run(program: &[Stmt], out: &mut dyn Write) -> timon_errors::Result<()> {
    let mut interp = Interpreter { env: crate::environment::Environment::new(), functions: IndexMap::new(), out };
    match interp.exec_stmts(program)? {
        Flow::Normal => Ok(()),
        Flow::Return(_, span) => Err(Error::name(span, "'return' used outside of a function")),
    }
}

impl<'out> Interpreter<'out> {
    fn exec_stmts(&mut self, stmts: &[Stmt]) -> timon_errors::Result<Flow> {
        for stmt in stmts {
            match self.exec_stmt(stmt)? {
                Flow::Normal => {}
                returned => return Ok(returned),
            }
        }
        Ok(Flow::Normal)
    }

    /// Executes a block in a fresh frame (§4.4: "each block pushes a new
    /// frame").
    fn exec_block(&mut self, block: &Block) -> timon_errors::Result<Flow> {
        self.env.push_block();
        let result = self.exec_stmts(&block.stmts);
        self.env.pop_block();
        result
    }

    fn exec_stmt(&mut self, stmt: &Stmt) -> timon_errors::Result<Flow> {
        tracing::trace!(span = %stmt.span(), "executing statement");
        match stmt {
            Stmt::FunctionDef { name, params, body, span } => {
                if self.functions.contains_key(name) {
                    return Err(Error::name(*span, format!("function '{name}' is already defined")));
                }
                self.functions.insert(name.clone(), Function { params: params.clone(), body: body.clone() });
                Ok(Flow::Normal)
            }
            Stmt::VarDef { name, init, span } => {
                let value = match init {
                    Some(expr) => self.eval(expr)?,
                    None => Value::Unit,
                };
                self.env
                    .declare(name, value)
                    .map_err(|()| Error::name(*span, format!("'{name}' is already defined in this scope")))?;
                Ok(Flow::Normal)
            }
            Stmt::Assign { name, expr, span } => {
                let value = self.eval(expr)?;
                self.env
                    .assign(name, value)
                    .map_err(|()| Error::name(*span, format!("undefined variable '{name}'")))?;
                Ok(Flow::Normal)
            }
            Stmt::Call { name, args, span } => {
                self.call(name, args, *span)?;
                Ok(Flow::Normal)
            }
            Stmt::If { cond, then_branch, else_branch, span } => {
                let cond = self.eval(cond)?;
                let Value::Bool(b) = cond else {
                    return Err(Error::type_(
                        *span,
                        format!("'if' condition must be Bool, found {}", cond.variant_name()),
                    ));
                };
                if b {
                    self.exec_block(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.exec_block(else_branch)
                } else {
                    Ok(Flow::Normal)
                }
            }
            Stmt::From { start, end, step_unit, iter_name, body, span } => self.exec_from(
                start,
                end,
                *step_unit,
                iter_name,
                body,
                *span,
            ),
            Stmt::Print { expr, .. } => {
                let value = self.eval(expr)?;
                writeln!(self.out, "{value}").expect("write to output sink");
                Ok(Flow::Normal)
            }
            Stmt::Return { expr, span } => {
                let value = self.eval(expr)?;
                Ok(Flow::Return(value, *span))
            }
        }
    }

    fn exec_from(
        &mut self,
        start: &Expr,
        end: &Expr,
        step_unit: UnitWord,
        iter_name: &str,
        body: &Block,
        span: Span,
    ) -> timon_errors::Result<Flow> {
        let start_value = self.eval(start)?;
        let end_value = self.eval(end)?;
        if start_value.variant_name() != end_value.variant_name()
            || !matches!(start_value, Value::Date(_) | Value::Time(_) | Value::Datetime(_))
        {
            return Err(Error::type_(
                span,
                format!(
                    "'from' range endpoints must be the same temporal variant (Date, Time, or Datetime), found {} and {}",
                    start_value.variant_name(),
                    end_value.variant_name()
                ),
            ));
        }
        if !step_unit_compatible(&start_value, step_unit) {
            return Err(Error::type_(
                span,
                format!("step unit '{step_unit}' is not compatible with {}", start_value.variant_name()),
            ));
        }
        let step = step_timedelta(step_unit);

        let mut cursor = start_value;
        loop {
            if cursor.compare(&end_value).map_err(|e| map_value_error(e, span))? == std::cmp::Ordering::Greater {
                break;
            }
            self.env.push_block();
            self.env.declare(iter_name, cursor.clone()).expect("fresh loop frame cannot already bind the iterator");
            let flow = self.exec_stmts(&body.stmts);
            self.env.pop_block();
            match flow? {
                Flow::Normal => {}
                returned => return Ok(returned),
            }
            cursor = cursor.add(&Value::Timedelta(step)).map_err(|e| map_value_error(e, span))?;
        }
        Ok(Flow::Normal)
    }

    /// Evaluates a call expression or statement: checks arity, evaluates
    /// arguments left to right in the caller's scope, then runs the callee
    /// in a fresh call frame (§4.4's "function call").
    fn call(&mut self, name: &str, args: &[Expr], span: Span) -> timon_errors::Result<Value> {
        let Some(function) = self.functions.get(name) else {
            return Err(Error::name(span, format!("undefined function '{name}'")));
        };
        if function.params.len() != args.len() {
            return Err(Error::arity(
                span,
                format!("'{name}' takes {} argument(s), found {}", function.params.len(), args.len()),
            ));
        }
        let params = function.params.clone();
        let body = function.body.clone();

        let mut arg_values = Vec::with_capacity(args.len());
        for arg in args {
            arg_values.push(self.eval(arg)?);
        }

        let mut bindings = IndexMap::new();
        for (param, value) in params.into_iter().zip(arg_values) {
            bindings.insert(param, value);
        }
        tracing::debug!(name, span = %span, "entering call frame");
        self.env.push_call(bindings);
        let result = self.exec_stmts(&body.stmts);
        self.env.pop_call();
        tracing::debug!(name, "exiting call frame");

        match result? {
            Flow::Normal => Ok(Value::Unit),
            Flow::Return(value, _) => Ok(value),
        }
    }

    fn eval(&mut self, expr: &Expr) -> timon_errors::Result<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(value.clone()),
            Expr::Var { name, span } => {
                self.env.get(name).cloned().ok_or_else(|| Error::name(*span, format!("undefined variable '{name}'")))
            }
            Expr::Call { name, args, span } => self.call(name, args, *span),
            Expr::Unary { op, operand, span } => {
                let value = self.eval(operand)?;
                match op {
                    UnaryOp::Negate => value.neg().map_err(|e| map_value_error(e, *span)),
                    UnaryOp::Not => value.not().map_err(|e| map_value_error(e, *span)),
                }
            }
            Expr::FieldAccess { base, field, span } => {
                let value = self.eval(base)?;
                value.field(field.as_str()).map_err(|e| map_value_error(e, *span))
            }
            Expr::Binary { op, lhs, rhs, span } => self.eval_binary(*op, lhs, rhs, *span),
        }
    }

    fn eval_binary(&mut self, op: BinaryOp, lhs: &Expr, rhs: &Expr, span: Span) -> timon_errors::Result<Value> {
        // `&`/`|` short-circuit left to right (§4.3) and require `Bool` on
        // both sides; evaluating the right operand is skipped when the
        // outcome is already determined.
        if matches!(op, BinaryOp::And | BinaryOp::Or) {
            let lhs_value = self.eval(lhs)?;
            let Value::Bool(l) = lhs_value else {
                return Err(Error::type_(
                    span,
                    format!("operands of '{op}' must be Bool, found {}", lhs_value.variant_name()),
                ));
            };
            if (op == BinaryOp::And && !l) || (op == BinaryOp::Or && l) {
                return Ok(Value::Bool(l));
            }
            let rhs_value = self.eval(rhs)?;
            let Value::Bool(r) = rhs_value else {
                return Err(Error::type_(
                    span,
                    format!("operands of '{op}' must be Bool, found {}", rhs_value.variant_name()),
                ));
            };
            return Ok(Value::Bool(r));
        }

        let lhs_value = self.eval(lhs)?;
        let rhs_value = self.eval(rhs)?;
        match op {
            BinaryOp::Add => lhs_value.add(&rhs_value).map_err(|e| map_value_error(e, span)),
            BinaryOp::Sub => lhs_value.sub(&rhs_value).map_err(|e| map_value_error(e, span)),
            BinaryOp::Mul => lhs_value.mul(&rhs_value).map_err(|e| map_value_error(e, span)),
            BinaryOp::Div => lhs_value.div(&rhs_value).map_err(|e| map_value_error(e, span)),
            BinaryOp::Eq => lhs_value.values_equal(&rhs_value).map(Value::Bool).map_err(|e| map_value_error(e, span)),
            BinaryOp::Neq => {
                lhs_value.values_equal(&rhs_value).map(|b| Value::Bool(!b)).map_err(|e| map_value_error(e, span))
            }
            BinaryOp::Lt => lhs_value
                .compare(&rhs_value)
                .map(|o| Value::Bool(o == std::cmp::Ordering::Less))
                .map_err(|e| map_value_error(e, span)),
            BinaryOp::Le => lhs_value
                .compare(&rhs_value)
                .map(|o| Value::Bool(o != std::cmp::Ordering::Greater))
                .map_err(|e| map_value_error(e, span)),
            BinaryOp::Gt => lhs_value
                .compare(&rhs_value)
                .map(|o| Value::Bool(o == std::cmp::Ordering::Greater))
                .map_err(|e| map_value_error(e, span)),
            BinaryOp::Ge => lhs_value
                .compare(&rhs_value)
                .map(|o| Value::Bool(o != std::cmp::Ordering::Less))
                .map_err(|e| map_value_error(e, span)),
            BinaryOp::And | BinaryOp::Or => unreachable!("handled above"),
        }
    }
}

/// Builds the `by <unit>` step: a timedelta with `1` in the named component
/// and zero elsewhere (§4.4).
fn step_timedelta(unit: UnitWord) -> Timedelta {
    match unit {
        UnitWord::Years => Timedelta::new(1, 0, 0, 0, 0, 0, 0),
        UnitWord::Months => Timedelta::new(0, 1, 0, 0, 0, 0, 0),
        UnitWord::Weeks => Timedelta::new(0, 0, 1, 0, 0, 0, 0),
        UnitWord::Days => Timedelta::new(0, 0, 0, 1, 0, 0, 0),
        UnitWord::Hours => Timedelta::new(0, 0, 0, 0, 1, 0, 0),
        UnitWord::Minutes => Timedelta::new(0, 0, 0, 0, 0, 1, 0),
        UnitWord::Seconds => Timedelta::new(0, 0, 0, 0, 0, 0, 1),
    }
}

/// `Time` has no calendar anchor, so a `by years`/`months`/`weeks`/`days`
/// step would be meaningless wraparound rather than a real calendar step —
/// `days`/`weeks` in particular are multiples of 86400 seconds, which
/// `apply_to_time`'s modulo-24h wraparound turns into a no-op, looping
/// forever. Reject all four at the loop header instead of silently
/// discarding the delta the way `Time + Timedelta` discards years/months
/// during arithmetic.
fn step_unit_compatible(value: &Value, unit: UnitWord) -> bool {
    match value {
        Value::Time(_) => matches!(unit, UnitWord::Hours | UnitWord::Minutes | UnitWord::Seconds),
        _ => true,
    }
}

fn map_value_error(err: ValueError, span: Span) -> Error {
    match err {
        ValueError::DivisionByZero | ValueError::OutOfRange(_) => Error::arithmetic(span, err.to_string()),
        ValueError::TypeMismatch { .. } | ValueError::UnknownField { .. } => Error::type_(span, err.to_string()),
    }
}
