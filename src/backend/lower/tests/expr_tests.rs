//! Tests for expression lowering in value and condition mode

use super::{bin, call, ident, int, lines, spanned, string, unary, var};
use crate::backend::hir::{Address, StorageKind};
use crate::backend::lower::{
    BranchTargets, CallUsage, CodegenError, LoweringContext, lower_call, lower_cond, lower_expr,
};
use crate::common::ast::{BinOp, Expr, UnaryOp};
use crate::common::span::span;

/// A context inside function `main` with globals `a` and `b`
fn context() -> LoweringContext {
    let mut ctx = LoweringContext::new();
    ctx.declare(&ident("a"), StorageKind::Global).unwrap();
    ctx.declare(&ident("b"), StorageKind::Global).unwrap();
    ctx.enter_function("main");
    ctx
}

// ============================================================================
// Value mode
// ============================================================================

#[test]
fn test_constant_needs_no_code() {
    let mut ctx = context();
    let value = lower_expr(&mut ctx, &int(42)).unwrap();

    assert!(value.code.is_empty());
    assert_eq!(value.addr, Address::Const(42));
    assert_eq!(ctx.temp_count(), 0);
}

#[test]
fn test_variable_needs_no_code() {
    let mut ctx = context();
    let value = lower_expr(&mut ctx, &var("b")).unwrap();

    assert!(value.code.is_empty());
    assert_eq!(value.addr.to_string(), "$1_b");
}

#[test]
fn test_undeclared_variable_is_unknown() {
    let mut ctx = context();
    let value = lower_expr(&mut ctx, &var("nope")).unwrap();
    assert_eq!(value.addr.to_string(), "unknown");
}

#[test]
fn test_string_literal_is_pooled() {
    let mut ctx = context();
    let value = lower_expr(&mut ctx, &string("\"hi\"")).unwrap();

    assert!(value.code.is_empty());
    assert_eq!(value.addr.to_string(), "?0");
    assert_eq!(ctx.strings(), ["\"hi\""]);
}

#[test]
fn test_binary_addition() {
    let mut ctx = context();
    let value = lower_expr(&mut ctx, &bin(BinOp::Add, var("a"), int(1))).unwrap();

    assert_eq!(lines(&value.code), ["add &0, $0_a, 1"]);
    assert_eq!(value.addr, Address::Temp(0));
}

#[test]
fn test_temp_allocated_after_operands() {
    // (a * 2) - (b / 3): both operand temps come before the result temp
    let mut ctx = context();
    let expr = bin(
        BinOp::Sub,
        bin(BinOp::Mul, var("a"), int(2)),
        bin(BinOp::Div, var("b"), int(3)),
    );
    let value = lower_expr(&mut ctx, &expr).unwrap();

    assert_eq!(
        lines(&value.code),
        ["mult &0, $0_a, 2", "div &1, $1_b, 3", "sub &2, &0, &1"]
    );
    assert_eq!(value.addr, Address::Temp(2));
}

#[test]
fn test_every_binary_opcode() {
    let cases = [
        (BinOp::Mod, "mod"),
        (BinOp::Eq, "eq"),
        (BinOp::NotEq, "neq"),
        (BinOp::Lt, "lt"),
        (BinOp::Gt, "gt"),
        (BinOp::Lte, "lte"),
        (BinOp::Gte, "gte"),
    ];
    for (op, opcode) in cases {
        let mut ctx = context();
        let value = lower_expr(&mut ctx, &bin(op, var("a"), var("b"))).unwrap();
        assert_eq!(lines(&value.code), [format!("{opcode} &0, $0_a, $1_b")]);
    }
}

#[test]
fn test_logical_operators_in_value_mode_do_not_branch() {
    let mut ctx = context();
    let value = lower_expr(&mut ctx, &bin(BinOp::And, var("a"), var("b"))).unwrap();
    assert_eq!(lines(&value.code), ["and &0, $0_a, $1_b"]);

    let value = lower_expr(&mut ctx, &bin(BinOp::Or, var("a"), var("b"))).unwrap();
    assert_eq!(lines(&value.code), ["or &1, $0_a, $1_b"]);
    assert_eq!(ctx.label_count(), 0);
}

#[test]
fn test_negation() {
    let mut ctx = context();
    let value = lower_expr(&mut ctx, &unary(UnaryOp::Neg, var("a"))).unwrap();
    assert_eq!(lines(&value.code), ["sub &0, 0, $0_a"]);
}

#[test]
fn test_not_in_value_mode() {
    let mut ctx = context();
    let value = lower_expr(&mut ctx, &unary(UnaryOp::Not, var("a"))).unwrap();
    assert_eq!(lines(&value.code), ["not &0, $0_a"]);
    assert_eq!(value.addr, Address::Temp(0));
}

#[test]
fn test_call_in_value_mode() {
    let mut ctx = context();
    let expr = spanned(Expr::Call(call(
        "f",
        vec![var("a"), bin(BinOp::Add, int(1), int(2))],
    )));
    let value = lower_expr(&mut ctx, &expr).unwrap();

    assert_eq!(
        lines(&value.code),
        ["add &0, 1, 2", "arg $0_a, 0", "arg &0, 1", "callf &1, f, 2"]
    );
    assert_eq!(value.addr, Address::Temp(1));
}

#[test]
fn test_call_without_arguments_in_value_mode() {
    let mut ctx = context();
    let expr = spanned(Expr::Call(call("g", vec![])));
    let value = lower_expr(&mut ctx, &expr).unwrap();
    assert_eq!(lines(&value.code), ["callf &0, g, 0"]);
}

#[test]
fn test_io_builtins_are_plain_calls_in_value_mode() {
    let mut ctx = context();
    let expr = spanned(Expr::Call(call("printf", vec![var("a")])));
    let value = lower_expr(&mut ctx, &expr).unwrap();
    assert_eq!(lines(&value.code), ["arg $0_a, 0", "callf &0, printf, 1"]);
}

#[test]
fn test_unsupported_expressions() {
    let mut ctx = context();

    let index = spanned(Expr::Index {
        base: Box::new(var("a")),
        index: Box::new(int(0)),
    });
    let err = lower_expr(&mut ctx, &index).unwrap_err();
    assert!(matches!(
        err,
        CodegenError::Unsupported {
            feature: "array indexing",
            ..
        }
    ));

    let addr_of = unary(UnaryOp::AddrOf, var("a"));
    assert!(matches!(
        lower_expr(&mut ctx, &addr_of),
        Err(CodegenError::Unsupported { .. })
    ));

    let deref = unary(UnaryOp::Deref, var("a"));
    assert!(matches!(
        lower_expr(&mut ctx, &deref),
        Err(CodegenError::Unsupported { .. })
    ));
}

#[test]
fn test_error_node_is_malformed() {
    let mut ctx = context();
    let expr = (Expr::Error, span(3, 7));
    let err = lower_expr(&mut ctx, &expr).unwrap_err();

    assert_eq!(err, CodegenError::Malformed { span: span(3, 7) });
    assert_eq!(err.span(), span(3, 7));
}

#[test]
fn test_error_inside_operand_propagates() {
    let mut ctx = context();
    let expr = bin(BinOp::Add, var("a"), spanned(Expr::Error));
    assert!(lower_expr(&mut ctx, &expr).is_err());
}

// ============================================================================
// Condition mode
// ============================================================================

#[test]
fn test_relational_condition() {
    let mut ctx = context();
    let on_true = ctx.new_label();
    let on_false = ctx.new_label();
    let targets = BranchTargets::new(on_true, on_false);

    let code = lower_cond(&mut ctx, &bin(BinOp::Lt, var("a"), int(1)), targets).unwrap();
    assert_eq!(lines(&code), ["lt &0, $0_a, 1", "jt &0, ~0", "jump ~1"]);
}

#[test]
fn test_plain_value_as_condition() {
    let mut ctx = context();
    let on_true = ctx.new_label();
    let on_false = ctx.new_label();
    let targets = BranchTargets::new(on_true, on_false);

    let code = lower_cond(&mut ctx, &var("a"), targets).unwrap();
    assert_eq!(lines(&code), ["jt $0_a, ~0", "jump ~1"]);
}

#[test]
fn test_and_short_circuits() {
    let mut ctx = context();
    let on_true = ctx.new_label();
    let on_false = ctx.new_label();
    let cond = bin(
        BinOp::And,
        bin(BinOp::Lt, var("a"), int(1)),
        bin(BinOp::Gt, var("b"), int(2)),
    );

    let code = lower_cond(&mut ctx, &cond, BranchTargets::new(on_true, on_false)).unwrap();
    assert_eq!(
        lines(&code),
        [
            "lt &0, $0_a, 1",
            "jt &0, ~2",
            "jump ~1",
            "~2:",
            "gt &1, $1_b, 2",
            "jt &1, ~0",
            "jump ~1",
        ]
    );
}

#[test]
fn test_or_short_circuits() {
    let mut ctx = context();
    let on_true = ctx.new_label();
    let on_false = ctx.new_label();
    let cond = bin(
        BinOp::Or,
        bin(BinOp::Lt, var("a"), int(1)),
        bin(BinOp::Gt, var("b"), int(2)),
    );

    let code = lower_cond(&mut ctx, &cond, BranchTargets::new(on_true, on_false)).unwrap();
    assert_eq!(
        lines(&code),
        [
            "lt &0, $0_a, 1",
            "jt &0, ~0",
            "jump ~2",
            "~2:",
            "gt &1, $1_b, 2",
            "jt &1, ~0",
            "jump ~1",
        ]
    );
}

#[test]
fn test_not_swaps_targets() {
    let mut ctx = context();
    let on_true = ctx.new_label();
    let on_false = ctx.new_label();
    let cond = unary(UnaryOp::Not, bin(BinOp::Lt, var("a"), int(1)));

    let code = lower_cond(&mut ctx, &cond, BranchTargets::new(on_true, on_false)).unwrap();
    assert_eq!(lines(&code), ["lt &0, $0_a, 1", "jt &0, ~1", "jump ~0"]);
    // No `not` instruction and no temporary for the negation
    assert_eq!(ctx.temp_count(), 1);
}

#[test]
fn test_double_negation_is_identity() {
    let mut ctx = context();
    let on_true = ctx.new_label();
    let on_false = ctx.new_label();
    let cond = unary(UnaryOp::Not, unary(UnaryOp::Not, var("a")));

    let code = lower_cond(&mut ctx, &cond, BranchTargets::new(on_true, on_false)).unwrap();
    assert_eq!(lines(&code), ["jt $0_a, ~0", "jump ~1"]);
}

#[test]
fn test_not_distributes_into_and() {
    // !(a && b): a false -> true target, b false -> true target
    let mut ctx = context();
    let on_true = ctx.new_label();
    let on_false = ctx.new_label();
    let cond = unary(UnaryOp::Not, bin(BinOp::And, var("a"), var("b")));

    let code = lower_cond(&mut ctx, &cond, BranchTargets::new(on_true, on_false)).unwrap();
    assert_eq!(
        lines(&code),
        ["jt $0_a, ~2", "jump ~0", "~2:", "jt $1_b, ~1", "jump ~0"]
    );
}

#[test]
fn test_nested_logical_operators() {
    // a || (b && a)
    let mut ctx = context();
    let on_true = ctx.new_label();
    let on_false = ctx.new_label();
    let cond = bin(BinOp::Or, var("a"), bin(BinOp::And, var("b"), var("a")));

    let code = lower_cond(&mut ctx, &cond, BranchTargets::new(on_true, on_false)).unwrap();
    assert_eq!(
        lines(&code),
        [
            "jt $0_a, ~0",
            "jump ~2",
            "~2:",
            "jt $1_b, ~3",
            "jump ~1",
            "~3:",
            "jt $0_a, ~0",
            "jump ~1",
        ]
    );
}

// ============================================================================
// Calls as statements
// ============================================================================

#[test]
fn test_scanf_statement_reads_each_argument() {
    let mut ctx = context();
    let (code, result) =
        lower_call(&mut ctx, &call("scanf", vec![var("a"), var("b")]), CallUsage::Statement).unwrap();

    assert_eq!(lines(&code), ["read $0_a", "read $1_b"]);
    assert_eq!(result, None);
}

#[test]
fn test_printf_statement_writes_each_argument() {
    let mut ctx = context();
    let args = vec![string("\"sum = \""), bin(BinOp::Add, var("a"), var("b"))];
    let (code, _) = lower_call(&mut ctx, &call("printf", args), CallUsage::Statement).unwrap();

    assert_eq!(lines(&code), ["add &0, $0_a, $1_b", "write ?0", "write &0"]);
    assert_eq!(ctx.strings(), ["\"sum = \""]);
}

#[test]
fn test_user_call_statement_discards_result() {
    let mut ctx = context();
    let (code, result) =
        lower_call(&mut ctx, &call("f", vec![var("a"), int(5)]), CallUsage::Statement).unwrap();

    assert_eq!(lines(&code), ["arg $0_a, 0", "arg 5, 1", "call f, 2"]);
    assert_eq!(result, None);
    assert_eq!(ctx.temp_count(), 0);
}

#[test]
fn test_call_usage_value_returns_temp() {
    let mut ctx = context();
    let (code, result) = lower_call(&mut ctx, &call("f", vec![]), CallUsage::Value).unwrap();

    assert_eq!(lines(&code), ["callf &0, f, 0"]);
    assert_eq!(result, Some(Address::Temp(0)));
}
