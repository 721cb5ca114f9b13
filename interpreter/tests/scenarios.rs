//! End-to-end interpreter scenarios straight from the specification's
//! testable-properties section.

fn run(source: &str) -> Result<String, timon_errors::Error> {
    let program = timon_parser::parse_program(source).expect("parses");
    let mut out = Vec::new();
    timon_interpreter::run(&program, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

#[test]
fn adds_two_numbers() {
    assert_eq!(run("print 1+2").unwrap(), "3\n");
}

#[test]
fn concatenates_strings() {
    assert_eq!(run(r#"print "ab"+"cd""#).unwrap(), "abcd\n");
}

#[test]
fn leap_year_month_clamp() {
    assert_eq!(run("print 31.01.2024 + '1M'").unwrap(), "29.02.2024\n");
}

#[test]
fn non_leap_year_month_clamp() {
    assert_eq!(run("print 31.01.2023 + '1M'").unwrap(), "28.02.2023\n");
}

#[test]
fn datetime_carries_across_midnight_unlike_bare_time() {
    assert_eq!(
        run("var d = 01.01.2020~23:59:59 + '1s' print d").unwrap(),
        "02.01.2020~00:00:00\n"
    );
}

#[test]
fn from_loop_over_days_is_inclusive_on_both_ends() {
    assert_eq!(
        run("from 01.01.2020 to 03.01.2020 by days as i { print i }").unwrap(),
        "01.01.2020\n02.01.2020\n03.01.2020\n"
    );
}

#[test]
fn function_call_returns_a_value() {
    assert_eq!(run("fun f(x){ return x*2 } print f(5)").unwrap(), "10\n");
}

#[test]
fn division_by_zero_is_an_arithmetic_error() {
    let err = run("print 10/0").unwrap_err();
    assert!(err.to_string().contains("ArithmeticError"));
}

#[test]
fn empty_from_range_executes_zero_iterations() {
    assert_eq!(run("from 03.01.2020 to 01.01.2020 by days as i { print i }").unwrap(), "");
}

#[test]
fn undefined_variable_is_a_name_error() {
    let err = run("print x").unwrap_err();
    assert!(err.to_string().contains("NameError"));
}

#[test]
fn wrong_arity_is_an_arity_error() {
    let err = run("fun f(x){ return x } print f(1, 2)").unwrap_err();
    assert!(err.to_string().contains("ArityError"));
}

#[test]
fn non_bool_if_condition_is_a_type_error() {
    let err = run("if 1 { print 1 }").unwrap_err();
    assert!(err.to_string().contains("TypeError"));
}

#[test]
fn function_does_not_see_caller_locals() {
    // `secret` lives in the top-level `if` block's own frame, not the
    // global frame, so `f` (which only ever sees its own frame plus
    // global) must not be able to reach it.
    let err = run("fun f(){ return secret } if 1==1 { var secret = 1 print f() }").unwrap_err();
    assert!(err.to_string().contains("NameError"));
}

#[test]
fn function_sees_global_bindings() {
    assert_eq!(run("var g = 9 fun f(){ return g } print f()").unwrap(), "9\n");
}

#[test]
fn top_level_return_is_a_name_error() {
    let err = run("return 1").unwrap_err();
    assert!(err.to_string().contains("NameError"));
}

#[test]
fn negating_zero_is_still_zero() {
    assert_eq!(run("print -0").unwrap(), "0\n");
}

#[test]
fn and_short_circuits_before_evaluating_the_right_operand() {
    // If `&` evaluated `f()` eagerly, the undefined-function call would
    // surface as a NameError instead of stopping at the `false` left side.
    assert_eq!(run("print 1==2 & f()").unwrap(), "false\n");
}

#[test]
fn or_short_circuits_before_evaluating_the_right_operand() {
    assert_eq!(run("print 1==1 | f()").unwrap(), "true\n");
}

#[test]
fn field_access_round_trips_timedelta_component() {
    assert_eq!(run("print '3D'.days").unwrap(), "3\n");
}

#[test]
fn time_step_unit_incompatible_with_years_is_a_type_error() {
    let err = run("from 00:00:00 to 01:00:00 by years as i { print i }").unwrap_err();
    assert!(err.to_string().contains("TypeError"));
}

#[test]
fn time_step_unit_incompatible_with_days_is_a_type_error() {
    // `by days` on a `Time` would wrap modulo 24h every iteration and never
    // reach `end`, so this must be rejected up front rather than looping.
    let err = run("from 00:00:00 to 01:00:00 by days as i { print i }").unwrap_err();
    assert!(err.to_string().contains("TypeError"));
}

#[test]
fn time_step_unit_incompatible_with_weeks_is_a_type_error() {
    let err = run("from 00:00:00 to 01:00:00 by weeks as i { print i }").unwrap_err();
    assert!(err.to_string().contains("TypeError"));
}

#[test]
fn if_else_executes_the_matching_branch() {
    assert_eq!(run("if 1==2 { print 1 } else { print 2 }").unwrap(), "2\n");
}

#[test]
fn var_redeclared_in_same_scope_is_a_name_error() {
    let err = run("var x var x").unwrap_err();
    assert!(err.to_string().contains("NameError"));
}
