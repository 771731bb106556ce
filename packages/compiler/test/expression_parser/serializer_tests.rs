/**
 * Serializer Tests
 *
 * Printing parsed expressions back as Java source
 */

#[cfg(test)]
mod tests {
    use template_compiler::expression_parser::{serialize, Expr, Parser};

    fn parse(expression: &str) -> Expr {
        Parser::new()
            .parse_expression(expression)
            .expect("Should parse successfully")
    }

    #[test]
    fn serializes_unary_operators() {
        assert_eq!(serialize(&parse(" + 1234 ")), "+1234");
        assert_eq!(serialize(&parse(" - 1234 ")), "-1234");
        assert_eq!(serialize(&parse("! done")), "!done");
        assert_eq!(serialize(&parse("count --")), "count--");
    }

    #[test]
    fn serializes_binary_operations() {
        assert_eq!(serialize(&parse(" 1234   +   4321 ")), "1234 + 4321");
        assert_eq!(serialize(&parse("a<<2")), "a << 2");
        assert_eq!(serialize(&parse("a>>>2")), "a >>> 2");
    }

    #[test]
    fn serializes_conditionals() {
        assert_eq!(serialize(&parse("ok?1:2")), "ok ? 1 : 2");
    }

    #[test]
    fn keeps_explicit_parentheses() {
        assert_eq!(serialize(&parse("( a+b ) * c")), "(a + b) * c");
    }

    #[test]
    fn serializes_casts_and_type_operators() {
        assert_eq!(serialize(&parse("(Todo)item")), "(Todo) item");
        assert_eq!(serialize(&parse("item instanceof  Todo")), "item instanceof Todo");
        assert_eq!(serialize(&parse("Todo .class")), "Todo.class");
        assert_eq!(serialize(&parse("new  Todo( \"a\" )")), "new Todo(\"a\")");
    }

    #[test]
    fn serializes_calls() {
        assert_eq!(
            serialize(&parse("todo . getText ( ) . substring( 0 ,2 )")),
            "todo.getText().substring(0, 2)"
        );
        assert_eq!(serialize(&parse("items [ 0 ]")), "items[0]");
    }

    #[test]
    fn serializes_literals_verbatim() {
        assert_eq!(serialize(&parse("0x1F + 10L + 1.5f")), "0x1F + 10L + 1.5f");
        assert_eq!(serialize(&parse(r#""tab\t""#)), r#""tab\t""#);
    }
}
