/**
 * Expression Lexer
 *
 * Tokenizes Java-like template expressions into tokens for parsing
 */
use serde::{Deserialize, Serialize};

use crate::chars;

/// Token types in template expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum TokenType {
    Character = 0,
    Identifier = 1,
    Keyword = 2,
    String = 3,
    Char = 4,
    Operator = 5,
    Number = 6,
    Error = 7,
}

/// Token representation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub index: usize,
    pub end: usize,
    pub token_type: TokenType,
    pub num_value: f64,
    /// Decoded value for strings and chars, source text for everything else
    pub str_value: String,
}

impl Token {
    pub fn new(
        index: usize,
        end: usize,
        token_type: TokenType,
        num_value: f64,
        str_value: String,
    ) -> Self {
        Token {
            index,
            end,
            token_type,
            num_value,
            str_value,
        }
    }

    pub fn operator(index: usize, end: usize, str_value: &str) -> Self {
        Token::new(index, end, TokenType::Operator, 0.0, str_value.to_string())
    }

    pub fn is_character(&self, code: char) -> bool {
        self.token_type == TokenType::Character && self.str_value.chars().next() == Some(code)
    }

    pub fn is_number(&self) -> bool {
        self.token_type == TokenType::Number
    }

    pub fn is_string(&self) -> bool {
        self.token_type == TokenType::String
    }

    pub fn is_char(&self) -> bool {
        self.token_type == TokenType::Char
    }

    pub fn is_identifier(&self) -> bool {
        self.token_type == TokenType::Identifier
    }

    pub fn is_keyword(&self) -> bool {
        self.token_type == TokenType::Keyword
    }

    pub fn is_keyword_named(&self, keyword: &str) -> bool {
        self.token_type == TokenType::Keyword && self.str_value == keyword
    }

    pub fn is_primitive_type(&self) -> bool {
        self.token_type == TokenType::Keyword && PRIMITIVE_KEYWORDS.contains(&self.str_value.as_str())
    }

    pub fn is_operator(&self, operator: &str) -> bool {
        self.token_type == TokenType::Operator && self.str_value == operator
    }

    pub fn is_error(&self) -> bool {
        self.token_type == TokenType::Error
    }

    /// Whether this token starts right where `previous` ends
    pub fn is_adjacent_to(&self, previous: &Token) -> bool {
        previous.end == self.index
    }
}

/// Helper functions for creating tokens
pub fn new_character_token(index: usize, end: usize, code: char) -> Token {
    Token::new(index, end, TokenType::Character, code as u32 as f64, code.to_string())
}

pub fn new_identifier_token(index: usize, end: usize, text: String) -> Token {
    Token::new(index, end, TokenType::Identifier, 0.0, text)
}

pub fn new_keyword_token(index: usize, end: usize, text: String) -> Token {
    Token::new(index, end, TokenType::Keyword, 0.0, text)
}

pub fn new_number_token(index: usize, end: usize, n: f64, text: String) -> Token {
    Token::new(index, end, TokenType::Number, n, text)
}

pub fn new_error_token(index: usize, end: usize, message: String) -> Token {
    Token::new(index, end, TokenType::Error, 0.0, message)
}

/// Expression lexer
#[derive(Debug, Default, Clone, Copy)]
pub struct Lexer;

impl Lexer {
    pub fn new() -> Self {
        Lexer
    }

    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        Scanner::new(text).scan()
    }
}

pub const PRIMITIVE_KEYWORDS: &[&str] = &[
    "boolean", "byte", "char", "short", "int", "long", "float", "double", "void",
];

const KEYWORDS: &[&str] = &[
    "true", "false", "null", "this", "super", "new", "instanceof", "class",
    "boolean", "byte", "char", "short", "int", "long", "float", "double", "void",
];

/// Scanner for tokenizing input
struct Scanner<'a> {
    input: &'a str,
    length: usize,
    index: usize,
    peek: char,
    tokens: Vec<Token>,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        let peek = input.chars().next().unwrap_or(chars::EOF);
        Scanner {
            input,
            length: input.len(),
            index: 0,
            peek,
            tokens: Vec::new(),
        }
    }

    fn scan(mut self) -> Vec<Token> {
        while let Some(token) = self.scan_token() {
            let is_error = token.is_error();
            self.tokens.push(token);
            // Nothing after an error token is meaningful
            if is_error {
                break;
            }
        }
        self.tokens
    }

    fn advance(&mut self) {
        self.index += self.peek.len_utf8();
        self.peek = if self.index < self.length {
            self.input[self.index..].chars().next().unwrap_or(chars::EOF)
        } else {
            chars::EOF
        };
    }

    fn peek_next(&self) -> char {
        self.input[self.index..]
            .chars()
            .nth(1)
            .unwrap_or(chars::EOF)
    }

    fn error(&self, start: usize, message: &str) -> Token {
        new_error_token(
            start,
            self.index,
            format!(
                "Lexer Error: {} at column {} in expression [{}]",
                message, start, self.input
            ),
        )
    }

    fn scan_token(&mut self) -> Option<Token> {
        // Skip whitespace
        while self.index < self.length && chars::is_whitespace(self.peek) {
            self.advance();
        }

        if self.index >= self.length {
            return None;
        }

        let start = self.index;
        let ch = self.peek;

        // Handle identifiers and keywords
        if chars::is_identifier_start(ch) {
            return Some(self.scan_identifier());
        }

        // Handle numbers
        if chars::is_digit(ch) {
            return Some(self.scan_number(start));
        }

        match ch {
            chars::PERIOD => {
                if chars::is_digit(self.peek_next()) {
                    return Some(self.scan_number(start));
                }
                Some(self.scan_character(start, ch))
            }
            chars::LPAREN | chars::RPAREN | chars::LBRACKET | chars::RBRACKET | chars::LBRACE
            | chars::RBRACE | chars::COMMA | chars::COLON | chars::SEMICOLON | chars::AT => {
                Some(self.scan_character(start, ch))
            }
            chars::DQ => Some(self.scan_string(start)),
            chars::SQ => Some(self.scan_char_literal(start)),
            chars::PLUS => {
                self.advance();
                if self.peek == chars::PLUS {
                    self.advance();
                    return Some(Token::operator(start, self.index, "++"));
                }
                Some(self.finish_assignable_operator(start, "+"))
            }
            chars::MINUS => {
                self.advance();
                if self.peek == chars::MINUS {
                    self.advance();
                    return Some(Token::operator(start, self.index, "--"));
                }
                if self.peek == chars::GT {
                    self.advance();
                    return Some(self.error(start, "Lambda expressions are not supported"));
                }
                Some(self.finish_assignable_operator(start, "-"))
            }
            chars::STAR => {
                self.advance();
                Some(self.finish_assignable_operator(start, "*"))
            }
            chars::SLASH => {
                self.advance();
                Some(self.finish_assignable_operator(start, "/"))
            }
            chars::PERCENT => {
                self.advance();
                Some(self.finish_assignable_operator(start, "%"))
            }
            chars::CARET => {
                self.advance();
                Some(self.finish_assignable_operator(start, "^"))
            }
            chars::AMPERSAND => {
                self.advance();
                if self.peek == chars::AMPERSAND {
                    self.advance();
                    return Some(Token::operator(start, self.index, "&&"));
                }
                Some(self.finish_assignable_operator(start, "&"))
            }
            chars::BAR => {
                self.advance();
                if self.peek == chars::BAR {
                    self.advance();
                    return Some(Token::operator(start, self.index, "||"));
                }
                Some(self.finish_assignable_operator(start, "|"))
            }
            chars::LT => {
                self.advance();
                if self.peek == chars::LT {
                    self.advance();
                    return Some(self.finish_assignable_operator(start, "<<"));
                }
                if self.peek == chars::EQ {
                    self.advance();
                    return Some(Token::operator(start, self.index, "<="));
                }
                Some(Token::operator(start, self.index, "<"))
            }
            chars::GT => {
                // `>` is always emitted alone (or as `>=`) so that nested type
                // arguments can close one at a time; the parser joins adjacent
                // `>` tokens back into shift operators.
                self.advance();
                if self.peek == chars::EQ {
                    self.advance();
                    return Some(Token::operator(start, self.index, ">="));
                }
                Some(Token::operator(start, self.index, ">"))
            }
            chars::QUESTION => {
                self.advance();
                Some(Token::operator(start, self.index, "?"))
            }
            chars::TILDA => {
                self.advance();
                Some(Token::operator(start, self.index, "~"))
            }
            chars::BANG => {
                self.advance();
                if self.peek == chars::EQ {
                    self.advance();
                    return Some(Token::operator(start, self.index, "!="));
                }
                Some(Token::operator(start, self.index, "!"))
            }
            chars::EQ => {
                self.advance();
                if self.peek == chars::EQ {
                    self.advance();
                    return Some(Token::operator(start, self.index, "=="));
                }
                Some(Token::operator(start, self.index, "="))
            }
            _ => {
                self.advance();
                Some(self.error(start, &format!("Invalid character [{}]", ch)))
            }
        }
    }

    fn scan_character(&mut self, start: usize, ch: char) -> Token {
        self.advance();
        new_character_token(start, self.index, ch)
    }

    /// Operators that also exist in compound-assignment form (`+` / `+=`)
    fn finish_assignable_operator(&mut self, start: usize, op: &str) -> Token {
        if self.peek == chars::EQ {
            self.advance();
            return Token::operator(start, self.index, &format!("{}=", op));
        }
        Token::operator(start, self.index, op)
    }

    fn scan_identifier(&mut self) -> Token {
        let start = self.index;
        self.advance();

        while self.index < self.length && chars::is_identifier_part(self.peek) {
            self.advance();
        }

        let str_value = self.input[start..self.index].to_string();
        if KEYWORDS.contains(&str_value.as_str()) {
            new_keyword_token(start, self.index, str_value)
        } else {
            new_identifier_token(start, self.index, str_value)
        }
    }

    fn scan_number(&mut self, start: usize) -> Token {
        if self.peek == chars::ZERO && matches!(self.peek_next(), 'x' | 'X') {
            return self.scan_hex_number(start);
        }

        let mut is_integer = true;
        while self.index < self.length {
            if chars::is_digit(self.peek) {
                self.advance();
            } else if self.peek == chars::UNDERSCORE {
                let prev_is_digit = self.input[..self.index]
                    .chars()
                    .last()
                    .map_or(false, chars::is_digit);
                if !prev_is_digit || !chars::is_digit(self.peek_next()) {
                    return self.error(self.index, "Invalid numeric separator");
                }
                self.advance();
            } else if self.peek == chars::PERIOD && is_integer {
                is_integer = false;
                self.advance();
            } else if self.peek == 'e' || self.peek == 'E' {
                is_integer = false;
                self.advance();
                if self.peek == chars::PLUS || self.peek == chars::MINUS {
                    self.advance();
                }
                if !chars::is_digit(self.peek) {
                    return self.error(start, "Invalid exponent");
                }
            } else {
                break;
            }
        }

        let digits: String = self.input[start..self.index]
            .chars()
            .filter(|&c| c != chars::UNDERSCORE)
            .collect();
        let value = digits.parse::<f64>().unwrap_or(0.0);

        match self.peek {
            'l' | 'L' if is_integer => self.advance(),
            'f' | 'F' | 'd' | 'D' => self.advance(),
            _ => {}
        }
        if chars::is_identifier_part(self.peek) {
            self.advance();
            return self.error(start, "Invalid number literal");
        }

        new_number_token(start, self.index, value, self.input[start..self.index].to_string())
    }

    fn scan_hex_number(&mut self, start: usize) -> Token {
        self.advance(); // 0
        self.advance(); // x
        let digits_start = self.index;
        while chars::is_ascii_hex_digit(self.peek) || self.peek == chars::UNDERSCORE {
            self.advance();
        }
        if self.index == digits_start {
            return self.error(start, "Invalid hexadecimal literal");
        }
        let digits: String = self.input[digits_start..self.index]
            .chars()
            .filter(|&c| c != chars::UNDERSCORE)
            .collect();
        let value = u64::from_str_radix(&digits, 16).map(|v| v as f64).unwrap_or(0.0);
        if matches!(self.peek, 'l' | 'L') {
            self.advance();
        }
        new_number_token(start, self.index, value, self.input[start..self.index].to_string())
    }

    /// Scan the body of a quoted literal, decoding escapes
    fn scan_quoted(&mut self, start: usize, quote: char) -> Result<String, Token> {
        self.advance(); // opening quote
        let mut buffer = String::new();

        loop {
            if self.index >= self.length || self.peek == chars::LF || self.peek == chars::CR {
                return Err(self.error(start, "Unterminated quote"));
            }
            if self.peek == quote {
                self.advance();
                return Ok(buffer);
            }
            if self.peek == chars::BACKSLASH {
                self.advance();
                let unescaped = match self.peek {
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    'b' => '\x08',
                    'f' => '\x0C',
                    '0' => '\0',
                    '\'' => '\'',
                    '"' => '"',
                    '\\' => '\\',
                    'u' => {
                        let hex_start = self.index + 1;
                        let hex_end = hex_start + 4;
                        let hex = self.input.get(hex_start..hex_end).unwrap_or("");
                        match u32::from_str_radix(hex, 16).ok().and_then(char::from_u32) {
                            Some(c) if hex.len() == 4 => {
                                for _ in 0..4 {
                                    self.advance();
                                }
                                c
                            }
                            _ => {
                                return Err(self.error(start, &format!("Invalid unicode escape [\\u{}]", hex)))
                            }
                        }
                    }
                    other => {
                        return Err(self.error(start, &format!("Invalid escape [\\{}]", other)))
                    }
                };
                buffer.push(unescaped);
                self.advance();
                continue;
            }
            buffer.push(self.peek);
            self.advance();
        }
    }

    fn scan_string(&mut self, start: usize) -> Token {
        match self.scan_quoted(start, chars::DQ) {
            Ok(value) => Token::new(start, self.index, TokenType::String, 0.0, value),
            Err(error) => error,
        }
    }

    fn scan_char_literal(&mut self, start: usize) -> Token {
        match self.scan_quoted(start, chars::SQ) {
            Ok(value) if value.chars().count() == 1 => {
                Token::new(start, self.index, TokenType::Char, 0.0, value)
            }
            Ok(_) => self.error(start, "Character literals must hold exactly one character"),
            Err(error) => error,
        }
    }
}
