//! ML (Markup Language) Parser Module
//!
//! Element tree of a template, with source spans

pub mod ast;
pub mod entities;
pub mod parser;
pub mod tags;

pub use ast::*;
pub use parser::{ParseTreeResult, Parser, TreeError};
pub use tags::*;
