/**
 * Parser Tests
 *
 * Expression and type-name parsing
 */

#[cfg(test)]
mod tests {
    use template_compiler::expression_parser::{
        serialize, AssignOperator, BinaryOperator, Expr, LiteralKind, Parser, UnaryOperator,
    };
    use template_compiler::CompilerError;

    fn parse(input: &str) -> Expr {
        Parser::new()
            .parse_expression(input)
            .expect("Should parse successfully")
    }

    fn check(input: &str, expected: &str) {
        assert_eq!(serialize(&parse(input)), expected);
    }

    fn expect_error(input: &str) -> CompilerError {
        Parser::new()
            .parse_expression(input)
            .expect_err("Should fail to parse")
    }

    #[test]
    fn parses_literals() {
        assert!(matches!(parse("12"), Expr::Literal { kind: LiteralKind::Int, .. }));
        assert!(matches!(parse("12L"), Expr::Literal { kind: LiteralKind::Long, .. }));
        assert!(matches!(parse("1.5"), Expr::Literal { kind: LiteralKind::Double, .. }));
        assert!(matches!(parse("\"x\""), Expr::Literal { kind: LiteralKind::String, .. }));
        assert!(matches!(parse("'x'"), Expr::Literal { kind: LiteralKind::Char, .. }));
        assert!(matches!(parse("true"), Expr::Literal { kind: LiteralKind::Boolean, .. }));
        assert!(matches!(parse("null"), Expr::Literal { kind: LiteralKind::Null, .. }));
    }

    #[test]
    fn respects_precedence() {
        check("a || b && c", "a || b && c");
        match parse("a || b && c") {
            Expr::Binary { operator, right, .. } => {
                assert_eq!(operator, BinaryOperator::Or);
                assert!(matches!(*right, Expr::Binary { operator: BinaryOperator::And, .. }));
            }
            other => panic!("Expected binary, got {:?}", other),
        }
        match parse("1 + 2 - 3") {
            Expr::Binary { operator, left, .. } => {
                assert_eq!(operator, BinaryOperator::Minus);
                assert!(matches!(*left, Expr::Binary { operator: BinaryOperator::Plus, .. }));
            }
            other => panic!("Expected binary, got {:?}", other),
        }
    }

    #[test]
    fn parses_conditional_and_assignment() {
        assert!(matches!(parse("ok ? a : b"), Expr::Conditional { .. }));
        match parse("count += 2") {
            Expr::Assign { operator, .. } => assert_eq!(operator, AssignOperator::Plus),
            other => panic!("Expected assignment, got {:?}", other),
        }
        check("a = b = c", "a = b = c");
    }

    #[test]
    fn parses_unary_operators() {
        match parse("!done") {
            Expr::Unary { operator, .. } => assert_eq!(operator, UnaryOperator::Not),
            other => panic!("Expected unary, got {:?}", other),
        }
        match parse("i++") {
            Expr::Unary { operator, .. } => assert!(operator.is_postfix()),
            other => panic!("Expected unary, got {:?}", other),
        }
        check("-  x", "-x");
    }

    #[test]
    fn parses_calls_and_array_access() {
        check("todos.get(0).getText()", "todos.get(0).getText()");
        check("matrix[i][j]", "matrix[i][j]");
        match parse("format(a, b)") {
            Expr::MethodCall { scope, name, args, .. } => {
                assert!(scope.is_none());
                assert_eq!(name, "format");
                assert_eq!(args.len(), 2);
            }
            other => panic!("Expected method call, got {:?}", other),
        }
    }

    #[test]
    fn parses_object_creation() {
        match parse("new java.util.ArrayList<Todo>()") {
            Expr::ObjectCreation { type_ref, args, .. } => {
                assert_eq!(type_ref.to_string(), "java.util.ArrayList<Todo>");
                assert!(args.is_empty());
            }
            other => panic!("Expected object creation, got {:?}", other),
        }
    }

    #[test]
    fn distinguishes_casts_from_parentheses() {
        assert!(matches!(parse("(int) -x"), Expr::Cast { .. }));
        assert!(matches!(parse("(a) - x"), Expr::Binary { .. }));
        assert!(matches!(parse("(a + b)"), Expr::Enclosed { .. }));
        assert!(matches!(parse("(String[]) values"), Expr::Cast { .. }));
        check("(Todo)   todo", "(Todo) todo");
    }

    #[test]
    fn records_spans() {
        let expr = parse("  a + b");
        assert_eq!(expr.span().start, 2);
        assert_eq!(expr.span().end, 7);
    }

    #[test]
    fn rejects_malformed_expressions() {
        for input in ["a +", "(a", "a)", "foo(,)", "a ? b", "new int[3]", "{}", "[1]"] {
            assert!(
                Parser::new().parse_expression(input).is_err(),
                "Expected \"{}\" to fail",
                input
            );
        }
    }

    #[test]
    fn syntax_errors_carry_the_expression() {
        match expect_error("a +* b") {
            CompilerError::ExpressionSyntax { expression, .. } => assert_eq!(expression, "a +* b"),
            other => panic!("Expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn parses_type_names() {
        let parser = Parser::new();
        let type_ref = parser.parse_type("Map<String, List<Todo>>[][]").unwrap();
        assert_eq!(type_ref.to_string(), "Map<String, List<Todo>>[][]");
        assert!(matches!(
            parser.parse_type("Todo todo"),
            Err(CompilerError::InvalidType { .. })
        ));
    }
}
