/**
 * Lexer Tests
 *
 * Token stream produced for template expressions
 */

#[cfg(test)]
mod tests {
    use template_compiler::expression_parser::lexer::{Lexer, Token, TokenType};

    fn lex(text: &str) -> Vec<Token> {
        Lexer::new().tokenize(text)
    }

    fn expect_token(token: &Token, index: usize, end: usize) {
        assert_eq!(token.index, index, "Token index mismatch");
        assert_eq!(token.end, end, "Token end mismatch");
    }

    #[test]
    fn tokenizes_simple_identifier() {
        let tokens = lex("todo");
        assert_eq!(tokens.len(), 1);
        expect_token(&tokens[0], 0, 4);
        assert!(tokens[0].is_identifier());
    }

    #[test]
    fn tokenizes_dotted_access() {
        let tokens = lex("todo.text");
        assert_eq!(tokens.len(), 3);
        assert!(tokens[0].is_identifier());
        assert!(tokens[1].is_character('.'));
        expect_token(&tokens[2], 5, 9);
        assert_eq!(tokens[2].str_value, "text");
    }

    #[test]
    fn dollar_and_underscore_start_identifiers() {
        let tokens = lex("$event _value");
        assert!(tokens[0].is_identifier());
        assert_eq!(tokens[0].str_value, "$event");
        assert!(tokens[1].is_identifier());
        assert_eq!(tokens[1].str_value, "_value");
    }

    #[test]
    fn tokenizes_multi_character_operators() {
        let tokens = lex("a == b && c != d || e <= f");
        assert!(tokens[1].is_operator("=="));
        assert!(tokens[3].is_operator("&&"));
        assert!(tokens[5].is_operator("!="));
        assert!(tokens[7].is_operator("||"));
        assert!(tokens[9].is_operator("<="));
    }

    #[test]
    fn tokenizes_increments_and_compound_assignments() {
        let tokens = lex("i++ j-- k += 2");
        assert!(tokens[1].is_operator("++"));
        assert!(tokens[3].is_operator("--"));
        assert!(tokens[5].is_operator("+="));
    }

    #[test]
    fn keeps_number_text() {
        let tokens = lex("1_000 0.5 2e3");
        assert_eq!(tokens.len(), 3);
        assert!(tokens.iter().all(|t| t.is_number()));
        assert_eq!(tokens[0].str_value, "1_000");
        assert_eq!(tokens[0].num_value, 1000.0);
        assert_eq!(tokens[1].num_value, 0.5);
        assert_eq!(tokens[2].num_value, 2000.0);
    }

    #[test]
    fn decodes_string_and_char_escapes() {
        let tokens = lex(r#""a\"b\n" 'c'"#);
        assert!(tokens[0].is_string());
        assert_eq!(tokens[0].str_value, "a\"b\n");
        assert!(tokens[1].is_char());
        assert_eq!(tokens[1].str_value, "c");
    }

    #[test]
    fn classifies_keywords() {
        let tokens = lex("new Todo() instanceof Object");
        assert!(tokens[0].is_keyword());
        assert!(tokens[0].is_keyword_named("new"));
        assert!(!tokens[1].is_keyword());
        assert_eq!(tokens[0].token_type, TokenType::Keyword);
        assert!(tokens[4].is_keyword_named("instanceof"));
        assert!(lex("boolean")[0].is_primitive_type());
        assert!(!lex("Boolean")[0].is_primitive_type());
    }

    #[test]
    fn greater_than_stays_split_for_generics() {
        let tokens = lex("List<List<String>>");
        let closing: Vec<&Token> = tokens.iter().filter(|t| t.is_operator(">")).collect();
        assert_eq!(closing.len(), 2);
        assert!(closing[1].is_adjacent_to(closing[0]));
    }

    #[test]
    fn reports_unterminated_string() {
        let tokens = lex("\"abc");
        assert!(tokens.last().map_or(false, |t| t.is_error()));
    }
}
