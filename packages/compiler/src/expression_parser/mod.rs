/**
 * Expression Parser Module
 *
 * Lexing, parsing and printing of Java-like template expressions
 */
pub mod ast;
pub mod lexer;
pub mod parser;
pub mod serializer;

pub use ast::*;
pub use lexer::Lexer;
pub use parser::Parser;
pub use serializer::serialize;
