/**
 * Expression Parser
 *
 * Recursive descent parser for Java-like template expressions and type names
 */
use super::ast::*;
use super::lexer::{Lexer, Token, TokenType};
use crate::error::{CompilerError, Result};
use crate::types::{NamedType, TypeRef};

/// Parser for template expressions
#[derive(Debug, Default, Clone)]
pub struct Parser {
    lexer: Lexer,
}

impl Parser {
    pub fn new() -> Self {
        Parser {
            lexer: Lexer::new(),
        }
    }

    /// Parse a full expression; any leftover token is an error
    pub fn parse_expression(&self, input: &str) -> Result<Expr> {
        let tokens = self.lexer.tokenize(input);
        if let Some(error) = tokens.iter().find(|t| t.is_error()) {
            return Err(CompilerError::syntax(error.str_value.clone(), input));
        }
        if tokens.is_empty() {
            return Err(CompilerError::syntax("Empty expression", input));
        }

        let mut parse_ast = ParseAST::new(input, tokens);
        let ast = parse_ast.parse_assignment()?;

        if let Some(token) = parse_ast.current() {
            return Err(parse_ast.error(format!("Unexpected token '{}'", token.str_value)));
        }
        Ok(ast)
    }

    /// Parse a type name such as `java.util.List<Todo>[]`
    pub fn parse_type(&self, input: &str) -> Result<TypeRef> {
        let invalid = |message: String| CompilerError::InvalidType {
            type_name: input.to_string(),
            message,
        };

        let tokens = self.lexer.tokenize(input);
        if let Some(error) = tokens.iter().find(|t| t.is_error()) {
            return Err(invalid(error.str_value.clone()));
        }

        let mut parse_ast = ParseAST::new(input, tokens);
        let type_ref = parse_ast.parse_type_ref().map_err(|e| invalid(e.to_string()))?;
        if let Some(token) = parse_ast.current() {
            return Err(invalid(format!("Unexpected token '{}'", token.str_value)));
        }
        Ok(type_ref)
    }
}

/// Parser state over a token stream
struct ParseAST<'a> {
    input: &'a str,
    tokens: Vec<Token>,
    index: usize,
    last_end: usize,
}

impl<'a> ParseAST<'a> {
    fn new(input: &'a str, tokens: Vec<Token>) -> Self {
        ParseAST {
            input,
            tokens,
            index: 0,
            last_end: 0,
        }
    }

    fn error(&self, message: String) -> CompilerError {
        CompilerError::syntax(message, self.input)
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    fn peek(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.index + offset)
    }

    fn advance(&mut self) {
        if let Some(token) = self.tokens.get(self.index) {
            self.last_end = token.end;
        }
        self.index += 1;
    }

    fn advance_by(&mut self, count: usize) {
        for _ in 0..count {
            self.advance();
        }
    }

    fn consume_optional_character(&mut self, code: char) -> bool {
        if self.current().map_or(false, |t| t.is_character(code)) {
            self.advance();
            return true;
        }
        false
    }

    fn consume_optional_operator(&mut self, op: &str) -> bool {
        if self.current().map_or(false, |t| t.is_operator(op)) {
            self.advance();
            return true;
        }
        false
    }

    fn expect_character(&mut self, code: char) -> Result<()> {
        if self.consume_optional_character(code) {
            return Ok(());
        }
        Err(self.error(match self.current() {
            Some(token) => format!("Expected '{}' but found '{}'", code, token.str_value),
            None => format!("Expected '{}' at the end of the expression", code),
        }))
    }

    fn expect_identifier(&mut self) -> Result<String> {
        match self.current() {
            Some(token) if token.is_identifier() => {
                let name = token.str_value.clone();
                self.advance();
                Ok(name)
            }
            Some(token) => Err(self.error(format!("Expected identifier but found '{}'", token.str_value))),
            None => Err(self.error("Unexpected end of expression".to_string())),
        }
    }

    fn input_index(&self) -> usize {
        self.current().map_or(self.input.len(), |t| t.index)
    }

    fn span(&self, start: usize) -> ParseSpan {
        ParseSpan::new(start, self.last_end.max(start))
    }

    /// `>` tokens immediately following the current one
    fn adjacent_operator(&self, offset: usize, op: &str) -> bool {
        match (self.peek(offset - 1), self.peek(offset)) {
            (Some(prev), Some(next)) => next.is_operator(op) && next.is_adjacent_to(prev),
            _ => false,
        }
    }

    /// Shift operator at the cursor and the number of tokens spelling it
    fn peek_shift_operator(&self) -> Option<(BinaryOperator, usize)> {
        let token = self.current()?;
        if token.is_operator("<<") {
            return Some((BinaryOperator::LeftShift, 1));
        }
        if token.is_operator(">") && self.adjacent_operator(1, ">") {
            if self.adjacent_operator(2, ">") {
                return Some((BinaryOperator::UnsignedRightShift, 3));
            }
            if self.adjacent_operator(2, ">=") {
                return None;
            }
            return Some((BinaryOperator::SignedRightShift, 2));
        }
        None
    }

    fn peek_assign_operator(&self) -> Option<(AssignOperator, usize)> {
        let token = self.current()?;
        if token.token_type != TokenType::Operator {
            return None;
        }
        if token.is_operator(">") {
            if self.adjacent_operator(1, ">=") {
                return Some((AssignOperator::SignedRightShift, 2));
            }
            if self.adjacent_operator(1, ">") && self.adjacent_operator(2, ">=") {
                return Some((AssignOperator::UnsignedRightShift, 3));
            }
            return None;
        }
        AssignOperator::from_str(&token.str_value).map(|op| (op, 1))
    }

    fn parse_assignment(&mut self) -> Result<Expr> {
        let start = self.input_index();
        let target = self.parse_conditional()?;

        if let Some((operator, length)) = self.peek_assign_operator() {
            if !matches!(
                target,
                Expr::Name { .. } | Expr::FieldAccess { .. } | Expr::ArrayAccess { .. }
            ) {
                return Err(self.error("Invalid assignment target".to_string()));
            }
            self.advance_by(length);
            let value = self.parse_assignment()?;
            return Ok(Expr::Assign {
                span: self.span(start),
                operator,
                target: Box::new(target),
                value: Box::new(value),
            });
        }

        Ok(target)
    }

    fn parse_conditional(&mut self) -> Result<Expr> {
        let start = self.input_index();
        let condition = self.parse_logical_or()?;

        if self.consume_optional_operator("?") {
            let true_expr = self.parse_assignment()?;
            self.expect_character(':')?;
            let false_expr = self.parse_conditional()?;
            return Ok(Expr::Conditional {
                span: self.span(start),
                condition: Box::new(condition),
                true_expr: Box::new(true_expr),
                false_expr: Box::new(false_expr),
            });
        }

        Ok(condition)
    }

    /// Left-associative binary level driven by a table of operator spellings
    fn parse_binary_level(
        &mut self,
        operators: &[(&str, BinaryOperator)],
        next: fn(&mut Self) -> Result<Expr>,
    ) -> Result<Expr> {
        let start = self.input_index();
        let mut result = next(self)?;

        'outer: loop {
            for (spelling, operator) in operators {
                if self.consume_optional_operator(spelling) {
                    let right = next(self)?;
                    result = Expr::Binary {
                        span: self.span(start),
                        operator: *operator,
                        left: Box::new(result),
                        right: Box::new(right),
                    };
                    continue 'outer;
                }
            }
            break;
        }

        Ok(result)
    }

    fn parse_logical_or(&mut self) -> Result<Expr> {
        self.parse_binary_level(&[("||", BinaryOperator::Or)], Self::parse_logical_and)
    }

    fn parse_logical_and(&mut self) -> Result<Expr> {
        self.parse_binary_level(&[("&&", BinaryOperator::And)], Self::parse_bitwise_or)
    }

    fn parse_bitwise_or(&mut self) -> Result<Expr> {
        self.parse_binary_level(&[("|", BinaryOperator::BinOr)], Self::parse_bitwise_xor)
    }

    fn parse_bitwise_xor(&mut self) -> Result<Expr> {
        self.parse_binary_level(&[("^", BinaryOperator::Xor)], Self::parse_bitwise_and)
    }

    fn parse_bitwise_and(&mut self) -> Result<Expr> {
        self.parse_binary_level(&[("&", BinaryOperator::BinAnd)], Self::parse_equality)
    }

    fn parse_equality(&mut self) -> Result<Expr> {
        self.parse_binary_level(
            &[("==", BinaryOperator::Equals), ("!=", BinaryOperator::NotEquals)],
            Self::parse_relational,
        )
    }

    fn parse_relational(&mut self) -> Result<Expr> {
        let start = self.input_index();
        let mut result = self.parse_shift()?;

        loop {
            if self.current().map_or(false, |t| t.is_keyword_named("instanceof")) {
                self.advance();
                let type_ref = self.parse_type_ref()?;
                result = Expr::InstanceOf {
                    span: self.span(start),
                    expression: Box::new(result),
                    type_ref,
                };
                continue;
            }

            let operator = match self.current() {
                Some(t) if t.is_operator("<") => BinaryOperator::Less,
                Some(t) if t.is_operator("<=") => BinaryOperator::LessEquals,
                Some(t) if t.is_operator(">=") => BinaryOperator::GreaterEquals,
                Some(t) if t.is_operator(">") && self.peek_assign_operator().is_none() => {
                    BinaryOperator::Greater
                }
                _ => break,
            };
            self.advance();
            let right = self.parse_shift()?;
            result = Expr::Binary {
                span: self.span(start),
                operator,
                left: Box::new(result),
                right: Box::new(right),
            };
        }

        Ok(result)
    }

    fn parse_shift(&mut self) -> Result<Expr> {
        let start = self.input_index();
        let mut result = self.parse_additive()?;

        while let Some((operator, length)) = self.peek_shift_operator() {
            self.advance_by(length);
            let right = self.parse_additive()?;
            result = Expr::Binary {
                span: self.span(start),
                operator,
                left: Box::new(result),
                right: Box::new(right),
            };
        }

        Ok(result)
    }

    fn parse_additive(&mut self) -> Result<Expr> {
        self.parse_binary_level(
            &[("+", BinaryOperator::Plus), ("-", BinaryOperator::Minus)],
            Self::parse_multiplicative,
        )
    }

    fn parse_multiplicative(&mut self) -> Result<Expr> {
        self.parse_binary_level(
            &[
                ("*", BinaryOperator::Multiply),
                ("/", BinaryOperator::Divide),
                ("%", BinaryOperator::Remainder),
            ],
            Self::parse_prefix,
        )
    }

    fn parse_prefix(&mut self) -> Result<Expr> {
        let start = self.input_index();

        let operator = match self.current() {
            Some(t) if t.is_operator("+") => Some(UnaryOperator::Plus),
            Some(t) if t.is_operator("-") => Some(UnaryOperator::Minus),
            Some(t) if t.is_operator("!") => Some(UnaryOperator::Not),
            Some(t) if t.is_operator("~") => Some(UnaryOperator::BitwiseNot),
            Some(t) if t.is_operator("++") => Some(UnaryOperator::PreIncrement),
            Some(t) if t.is_operator("--") => Some(UnaryOperator::PreDecrement),
            _ => None,
        };
        if let Some(operator) = operator {
            self.advance();
            let expression = self.parse_prefix()?;
            return Ok(Expr::Unary {
                span: self.span(start),
                operator,
                expression: Box::new(expression),
            });
        }

        if let Some(type_ref) = self.try_parse_cast_prefix()? {
            let expression = self.parse_prefix()?;
            return Ok(Expr::Cast {
                span: self.span(start),
                type_ref,
                expression: Box::new(expression),
            });
        }

        self.parse_postfix()
    }

    /// Consume `(Type)` when it is a cast, otherwise leave the cursor untouched
    fn try_parse_cast_prefix(&mut self) -> Result<Option<TypeRef>> {
        if !self.current().map_or(false, |t| t.is_character('(')) {
            return Ok(None);
        }
        let is_primitive = self.peek(1).map_or(false, |t| t.is_primitive_type());
        let is_reference = self.peek(1).map_or(false, |t| t.is_identifier());
        if !is_primitive && !is_reference {
            return Ok(None);
        }

        let saved = (self.index, self.last_end);
        self.advance();
        let type_ref = match self.parse_type_ref() {
            Ok(type_ref) if self.current().map_or(false, |t| t.is_character(')')) => type_ref,
            Ok(_) | Err(_) if is_primitive => {
                return Err(self.error("Invalid cast".to_string()));
            }
            _ => {
                (self.index, self.last_end) = saved;
                return Ok(None);
            }
        };
        self.advance();

        // A parenthesized name is only a cast when an operand follows
        if !is_primitive && !self.current().map_or(false, starts_cast_operand) {
            (self.index, self.last_end) = saved;
            return Ok(None);
        }

        Ok(Some(type_ref))
    }

    fn parse_postfix(&mut self) -> Result<Expr> {
        let start = self.input_index();
        let mut result = self.parse_call_chain()?;

        loop {
            let operator = match self.current() {
                Some(t) if t.is_operator("++") => UnaryOperator::PostIncrement,
                Some(t) if t.is_operator("--") => UnaryOperator::PostDecrement,
                _ => break,
            };
            self.advance();
            result = Expr::Unary {
                span: self.span(start),
                operator,
                expression: Box::new(result),
            };
        }

        Ok(result)
    }

    fn parse_call_chain(&mut self) -> Result<Expr> {
        let start = self.input_index();
        let mut result = self.parse_primary()?;

        loop {
            if self.consume_optional_character('.') {
                if self.current().map_or(false, |t| t.is_keyword_named("class")) {
                    self.advance();
                    result = self.class_literal(start, &result, 0)?;
                    continue;
                }
                let name = self.expect_identifier()?;
                if self.current().map_or(false, |t| t.is_character('(')) {
                    let args = self.parse_call_arguments()?;
                    result = Expr::MethodCall {
                        span: self.span(start),
                        scope: Some(Box::new(result)),
                        name,
                        args,
                    };
                } else {
                    result = Expr::FieldAccess {
                        span: self.span(start),
                        scope: Box::new(result),
                        name,
                    };
                }
            } else if self.current().map_or(false, |t| t.is_character('[')) {
                if self.peek(1).map_or(false, |t| t.is_character(']')) {
                    let dims = self.parse_array_dims();
                    self.expect_character('.')?;
                    if !self.current().map_or(false, |t| t.is_keyword_named("class")) {
                        return Err(self.error("Expected 'class' after array type".to_string()));
                    }
                    self.advance();
                    result = self.class_literal(start, &result, dims)?;
                    continue;
                }
                self.advance();
                let index = self.parse_assignment()?;
                self.expect_character(']')?;
                result = Expr::ArrayAccess {
                    span: self.span(start),
                    array: Box::new(result),
                    index: Box::new(index),
                };
            } else {
                break;
            }
        }

        Ok(result)
    }

    fn class_literal(&self, start: usize, receiver: &Expr, array_dims: usize) -> Result<Expr> {
        let name = qualified_name(receiver)
            .ok_or_else(|| self.error("Expected a type before '.class'".to_string()))?;
        let mut named = NamedType::new(name);
        named.array_dims = array_dims;
        Ok(Expr::ClassLiteral {
            span: self.span(start),
            type_ref: TypeRef::Named(named),
        })
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        let start = self.input_index();
        let token = match self.current() {
            Some(token) => token.clone(),
            None => return Err(self.error("Unexpected end of expression".to_string())),
        };

        match token.token_type {
            TokenType::Number => {
                self.advance();
                Ok(Expr::Literal {
                    span: self.span(start),
                    kind: number_kind(&token.str_value),
                    value: token.str_value,
                })
            }
            TokenType::String | TokenType::Char => {
                self.advance();
                let kind = if token.is_string() {
                    LiteralKind::String
                } else {
                    LiteralKind::Char
                };
                Ok(Expr::Literal {
                    span: self.span(start),
                    kind,
                    value: token.str_value,
                })
            }
            TokenType::Identifier => {
                self.advance();
                if self.current().map_or(false, |t| t.is_character('(')) {
                    let args = self.parse_call_arguments()?;
                    return Ok(Expr::MethodCall {
                        span: self.span(start),
                        scope: None,
                        name: token.str_value,
                        args,
                    });
                }
                Ok(Expr::Name {
                    span: self.span(start),
                    name: token.str_value,
                })
            }
            TokenType::Keyword => self.parse_keyword(start, &token),
            TokenType::Character if token.is_character('(') => {
                self.advance();
                let inner = self.parse_assignment()?;
                self.expect_character(')')?;
                Ok(Expr::Enclosed {
                    span: self.span(start),
                    inner: Box::new(inner),
                })
            }
            TokenType::Character if token.is_character('{') => {
                Err(self.error("Object literals are not valid expressions".to_string()))
            }
            TokenType::Character if token.is_character('[') => {
                Err(self.error("Array literals are not valid expressions".to_string()))
            }
            _ => Err(self.error(format!("Unexpected token '{}'", token.str_value))),
        }
    }

    fn parse_keyword(&mut self, start: usize, token: &Token) -> Result<Expr> {
        match token.str_value.as_str() {
            "true" | "false" | "null" => {
                self.advance();
                let kind = if token.str_value == "null" {
                    LiteralKind::Null
                } else {
                    LiteralKind::Boolean
                };
                Ok(Expr::Literal {
                    span: self.span(start),
                    kind,
                    value: token.str_value.clone(),
                })
            }
            "this" => {
                self.advance();
                Ok(Expr::This {
                    span: self.span(start),
                })
            }
            "new" => {
                self.advance();
                let type_ref = self.parse_class_type()?;
                if self.current().map_or(false, |t| t.is_character('[')) {
                    return Err(self.error("Array creation is not supported".to_string()));
                }
                let args = self.parse_call_arguments()?;
                Ok(Expr::ObjectCreation {
                    span: self.span(start),
                    type_ref,
                    args,
                })
            }
            _ if token.is_primitive_type() => {
                // Only valid as `int.class` or `int[].class`
                let type_ref = self.parse_type_ref()?;
                self.expect_character('.')?;
                if !self.current().map_or(false, |t| t.is_keyword_named("class")) {
                    return Err(self.error(format!("Unexpected token '{}'", token.str_value)));
                }
                self.advance();
                Ok(Expr::ClassLiteral {
                    span: self.span(start),
                    type_ref,
                })
            }
            other => Err(self.error(format!("Unsupported keyword '{}'", other))),
        }
    }

    fn parse_call_arguments(&mut self) -> Result<Vec<Expr>> {
        self.expect_character('(')?;
        let mut args = Vec::new();
        if self.consume_optional_character(')') {
            return Ok(args);
        }
        loop {
            args.push(self.parse_assignment()?);
            if !self.consume_optional_character(',') {
                break;
            }
        }
        self.expect_character(')')?;
        Ok(args)
    }

    fn parse_array_dims(&mut self) -> usize {
        let mut dims = 0;
        while self.current().map_or(false, |t| t.is_character('['))
            && self.peek(1).map_or(false, |t| t.is_character(']'))
        {
            self.advance_by(2);
            dims += 1;
        }
        dims
    }

    /// Parse a full type: primitive or class type, then array dimensions
    fn parse_type_ref(&mut self) -> Result<TypeRef> {
        let mut type_ref = match self.current() {
            Some(token) if token.is_primitive_type() => {
                let named = TypeRef::named(token.str_value.clone());
                self.advance();
                named
            }
            _ => self.parse_class_type()?,
        };

        let dims = self.parse_array_dims();
        if let TypeRef::Named(named) = &mut type_ref {
            named.array_dims += dims;
        }
        Ok(type_ref)
    }

    /// Dotted class name with optional type arguments
    fn parse_class_type(&mut self) -> Result<TypeRef> {
        let mut name = self.expect_identifier()?;
        while self.current().map_or(false, |t| t.is_character('.'))
            && self.peek(1).map_or(false, |t| t.is_identifier())
        {
            self.advance();
            name.push('.');
            name.push_str(&self.expect_identifier()?);
        }

        let mut named = NamedType::new(name);
        if self.consume_optional_operator("<") {
            if !self.consume_optional_operator(">") {
                loop {
                    named.type_args.push(self.parse_type_argument()?);
                    if !self.consume_optional_character(',') {
                        break;
                    }
                }
                if !self.consume_optional_operator(">") {
                    return Err(self.error("Expected '>' to close type arguments".to_string()));
                }
            }
        }
        Ok(TypeRef::Named(named))
    }

    fn parse_type_argument(&mut self) -> Result<TypeRef> {
        if self.consume_optional_operator("?") {
            return Ok(TypeRef::named("?"));
        }
        self.parse_type_ref()
    }
}

/// Whether `token` may begin the operand of a reference-type cast
fn starts_cast_operand(token: &Token) -> bool {
    match token.token_type {
        TokenType::Identifier | TokenType::Number | TokenType::String | TokenType::Char => true,
        TokenType::Keyword => matches!(
            token.str_value.as_str(),
            "this" | "new" | "true" | "false" | "null" | "super"
        ),
        TokenType::Character => token.is_character('('),
        TokenType::Operator => token.is_operator("!") || token.is_operator("~"),
        TokenType::Error => false,
    }
}

fn number_kind(text: &str) -> LiteralKind {
    let lower = text.to_ascii_lowercase();
    if lower.starts_with("0x") {
        return if lower.ends_with('l') {
            LiteralKind::Long
        } else {
            LiteralKind::Int
        };
    }
    if lower.ends_with('l') {
        LiteralKind::Long
    } else if lower.ends_with('f') {
        LiteralKind::Float
    } else if lower.ends_with('d') || lower.contains('.') || lower.contains('e') {
        LiteralKind::Double
    } else {
        LiteralKind::Int
    }
}

/// Dotted name spelled by a chain of names and field accesses
fn qualified_name(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Name { name, .. } => Some(name.clone()),
        Expr::FieldAccess { scope, name, .. } => {
            qualified_name(scope).map(|scope| format!("{}.{}", scope, name))
        }
        _ => None,
    }
}
