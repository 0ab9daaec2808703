//! Expression precedence and associativity tests.
//!
//! These tests verify the Pratt parser handles the three binary precedence
//! levels, unary prefixes, parentheses and calls.
//!
//! ## Formula Operator Syntax
//!
//! - Equality is a single `=` (not `==`), inequality is `!=`
//! - Logical connectives are functions (`AND`, `OR`, `NOT`), only `!` is an operator
//! - Call arguments are separated by `;` (a `,` is accepted too)

use faktorips_fl_ast::{BinaryOp, Expr, ExprKind, Literal, Span, UnaryOp};
use faktorips_fl_parser::parse_formula;
use pretty_assertions::assert_eq;

/// Helper to parse an expression from source.
fn parse(source: &str) -> Expr {
    parse_formula(source).expect("Parse failed")
}

/// Helper to check if an expression is a binary operation.
fn is_binary(expr: &Expr, expected_op: BinaryOp) -> bool {
    matches!(&expr.kind, ExprKind::Binary { op, .. } if *op == expected_op)
}

/// Helper to get left and right operands of a binary expression.
fn get_operands(expr: &Expr) -> Option<(&Expr, &Expr)> {
    match &expr.kind {
        ExprKind::Binary { left, right, .. } => Some((left.as_ref(), right.as_ref())),
        _ => None,
    }
}

// =============================================================================
// Binary precedence levels
// =============================================================================

#[test]
fn test_comparison_vs_additive() {
    // a + b = c should parse as: (a + b) = c
    let expr = parse("a + b = c");
    assert!(is_binary(&expr, BinaryOp::Eq));
    let (left, right) = get_operands(&expr).unwrap();
    assert!(is_binary(left, BinaryOp::Add));
    assert!(matches!(right.kind, ExprKind::Identifier(_)));
}

#[test]
fn test_additive_vs_multiplicative() {
    // a + b * c should parse as: a + (b * c)
    let expr = parse("a + b * c");
    assert!(is_binary(&expr, BinaryOp::Add));
    let (_, right) = get_operands(&expr).unwrap();
    assert!(is_binary(right, BinaryOp::Mul));
}

#[test]
fn test_subtraction_left_associative() {
    // a - b - c should parse as: (a - b) - c
    let expr = parse("a - b - c");
    assert!(is_binary(&expr, BinaryOp::Sub));
    let (left, right) = get_operands(&expr).unwrap();
    assert!(is_binary(left, BinaryOp::Sub));
    assert!(matches!(&right.kind, ExprKind::Identifier(name) if name == "c"));
}

#[test]
fn test_division_left_associative() {
    let expr = parse("a / b / c");
    let (left, _) = get_operands(&expr).unwrap();
    assert!(is_binary(left, BinaryOp::Div));
}

#[test]
fn test_comparison_operators() {
    for (source, op) in [
        ("a = b", BinaryOp::Eq),
        ("a != b", BinaryOp::Ne),
        ("a < b", BinaryOp::Lt),
        ("a <= b", BinaryOp::Le),
        ("a > b", BinaryOp::Gt),
        ("a >= b", BinaryOp::Ge),
    ] {
        assert!(is_binary(&parse(source), op), "{source}");
    }
}

// =============================================================================
// Unary operators
// =============================================================================

#[test]
fn test_unary_binds_tighter_than_multiplication() {
    // -a * b should parse as: (-a) * b
    let expr = parse("-a * b");
    assert!(is_binary(&expr, BinaryOp::Mul));
    let (left, _) = get_operands(&expr).unwrap();
    assert!(matches!(
        left.kind,
        ExprKind::Unary {
            op: UnaryOp::Minus,
            ..
        }
    ));
}

#[test]
fn test_nested_unary() {
    let expr = parse("!!flag");
    let ExprKind::Unary { op, operand } = &expr.kind else {
        panic!("expected unary, got {:?}", expr.kind);
    };
    assert_eq!(*op, UnaryOp::Not);
    assert!(matches!(operand.kind, ExprKind::Unary { op: UnaryOp::Not, .. }));
}

#[test]
fn test_unary_plus() {
    assert!(matches!(
        parse("+3").kind,
        ExprKind::Unary {
            op: UnaryOp::Plus,
            ..
        }
    ));
}

#[test]
fn test_negated_int_min_is_one_literal() {
    let expr = parse("-2147483648");
    assert_eq!(expr.kind, ExprKind::Literal(Literal::Integer(i32::MIN)));
    assert_eq!(expr.span, Span::new(0, 11));

    // Smaller magnitudes keep the unary node
    assert!(matches!(
        parse("-2147483647").kind,
        ExprKind::Unary {
            op: UnaryOp::Minus,
            ..
        }
    ));
}

// =============================================================================
// Parentheses, calls, identifiers, literals
// =============================================================================

#[test]
fn test_parentheses_override_precedence() {
    // (a + b) * c
    let expr = parse("(a + b) * c");
    assert!(is_binary(&expr, BinaryOp::Mul));
    let (left, _) = get_operands(&expr).unwrap();
    let ExprKind::Parenthesized(inner) = &left.kind else {
        panic!("expected parenthesized, got {:?}", left.kind);
    };
    assert!(is_binary(inner, BinaryOp::Add));
    assert_eq!(left.span, Span::new(0, 7));
}

#[test]
fn test_call_with_both_separators() {
    let expr = parse("IF(a > 1; 2, 3)");
    let ExprKind::Call { name, args, name_span } = &expr.kind else {
        panic!("expected call, got {:?}", expr.kind);
    };
    assert_eq!(name, "IF");
    assert_eq!(*name_span, Span::new(0, 2));
    assert_eq!(args.len(), 3);
    assert!(is_binary(&args[0], BinaryOp::Gt));
}

#[test]
fn test_call_without_arguments() {
    let expr = parse("TODAY()");
    assert!(matches!(&expr.kind, ExprKind::Call { args, .. } if args.is_empty()));
}

#[test]
fn test_qualified_identifier() {
    let expr = parse("Gender.MALE");
    assert_eq!(expr.kind, ExprKind::Identifier("Gender.MALE".into()));
    assert_eq!(expr.span, Span::new(0, 11));
}

#[test]
fn test_literals() {
    let cases = [
        ("42", Literal::Integer(42)),
        ("3.5", Literal::Decimal("3.5".into())),
        ("10.50EUR", Literal::Money("10.50EUR".into())),
        ("\"abc\"", Literal::String("abc".into())),
        ("true", Literal::Boolean(true)),
        ("null", Literal::Null),
    ];
    for (source, literal) in cases {
        assert_eq!(parse(source).kind, ExprKind::Literal(literal), "{source}");
    }
}

#[test]
fn test_binary_span_covers_operands() {
    let expr = parse("3.5 + 7.45");
    assert_eq!(expr.span, Span::new(0, 10));
}

#[test]
fn test_display_is_canonical() {
    assert_eq!(parse("a+b*( c-1 )").to_string(), "a + b * (c - 1)");
    assert_eq!(parse("MAX(a,b)").to_string(), "MAX(a; b)");
    assert_eq!(parse("- x").to_string(), "-x");
}
