/**
 * Expression AST
 *
 * Node types for Java-like template expressions
 */
use serde::{Deserialize, Serialize};

use crate::types::TypeRef;

/// Source span for error reporting, relative to the expression text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParseSpan {
    pub start: usize,
    pub end: usize,
}

impl ParseSpan {
    pub fn new(start: usize, end: usize) -> Self {
        ParseSpan { start, end }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LiteralKind {
    Int,
    Long,
    Float,
    Double,
    Char,
    String,
    Boolean,
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOperator {
    Plus,
    Minus,
    Not,
    BitwiseNot,
    PreIncrement,
    PreDecrement,
    PostIncrement,
    PostDecrement,
}

impl UnaryOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOperator::Plus => "+",
            UnaryOperator::Minus => "-",
            UnaryOperator::Not => "!",
            UnaryOperator::BitwiseNot => "~",
            UnaryOperator::PreIncrement | UnaryOperator::PostIncrement => "++",
            UnaryOperator::PreDecrement | UnaryOperator::PostDecrement => "--",
        }
    }

    pub fn is_postfix(&self) -> bool {
        matches!(self, UnaryOperator::PostIncrement | UnaryOperator::PostDecrement)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOperator {
    Or,
    And,
    BinOr,
    Xor,
    BinAnd,
    Equals,
    NotEquals,
    Less,
    Greater,
    LessEquals,
    GreaterEquals,
    LeftShift,
    SignedRightShift,
    UnsignedRightShift,
    Plus,
    Minus,
    Multiply,
    Divide,
    Remainder,
}

impl BinaryOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOperator::Or => "||",
            BinaryOperator::And => "&&",
            BinaryOperator::BinOr => "|",
            BinaryOperator::Xor => "^",
            BinaryOperator::BinAnd => "&",
            BinaryOperator::Equals => "==",
            BinaryOperator::NotEquals => "!=",
            BinaryOperator::Less => "<",
            BinaryOperator::Greater => ">",
            BinaryOperator::LessEquals => "<=",
            BinaryOperator::GreaterEquals => ">=",
            BinaryOperator::LeftShift => "<<",
            BinaryOperator::SignedRightShift => ">>",
            BinaryOperator::UnsignedRightShift => ">>>",
            BinaryOperator::Plus => "+",
            BinaryOperator::Minus => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Remainder => "%",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignOperator {
    Assign,
    Plus,
    Minus,
    Multiply,
    Divide,
    Remainder,
    BinAnd,
    BinOr,
    Xor,
    LeftShift,
    SignedRightShift,
    UnsignedRightShift,
}

impl AssignOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignOperator::Assign => "=",
            AssignOperator::Plus => "+=",
            AssignOperator::Minus => "-=",
            AssignOperator::Multiply => "*=",
            AssignOperator::Divide => "/=",
            AssignOperator::Remainder => "%=",
            AssignOperator::BinAnd => "&=",
            AssignOperator::BinOr => "|=",
            AssignOperator::Xor => "^=",
            AssignOperator::LeftShift => "<<=",
            AssignOperator::SignedRightShift => ">>=",
            AssignOperator::UnsignedRightShift => ">>>=",
        }
    }

    pub fn from_str(op: &str) -> Option<Self> {
        Some(match op {
            "=" => AssignOperator::Assign,
            "+=" => AssignOperator::Plus,
            "-=" => AssignOperator::Minus,
            "*=" => AssignOperator::Multiply,
            "/=" => AssignOperator::Divide,
            "%=" => AssignOperator::Remainder,
            "&=" => AssignOperator::BinAnd,
            "|=" => AssignOperator::BinOr,
            "^=" => AssignOperator::Xor,
            "<<=" => AssignOperator::LeftShift,
            ">>=" => AssignOperator::SignedRightShift,
            ">>>=" => AssignOperator::UnsignedRightShift,
            _ => return None,
        })
    }
}

/// Expression AST node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// Numbers keep their source text, strings and chars their decoded value
    Literal {
        span: ParseSpan,
        kind: LiteralKind,
        value: String,
    },
    Name {
        span: ParseSpan,
        name: String,
    },
    This {
        span: ParseSpan,
    },
    FieldAccess {
        span: ParseSpan,
        scope: Box<Expr>,
        name: String,
    },
    /// `name` may become a dotted path once a static import is resolved
    MethodCall {
        span: ParseSpan,
        scope: Option<Box<Expr>>,
        name: String,
        args: Vec<Expr>,
    },
    ArrayAccess {
        span: ParseSpan,
        array: Box<Expr>,
        index: Box<Expr>,
    },
    ObjectCreation {
        span: ParseSpan,
        type_ref: TypeRef,
        args: Vec<Expr>,
    },
    Cast {
        span: ParseSpan,
        type_ref: TypeRef,
        expression: Box<Expr>,
    },
    InstanceOf {
        span: ParseSpan,
        expression: Box<Expr>,
        type_ref: TypeRef,
    },
    ClassLiteral {
        span: ParseSpan,
        type_ref: TypeRef,
    },
    Unary {
        span: ParseSpan,
        operator: UnaryOperator,
        expression: Box<Expr>,
    },
    Binary {
        span: ParseSpan,
        operator: BinaryOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Conditional {
        span: ParseSpan,
        condition: Box<Expr>,
        true_expr: Box<Expr>,
        false_expr: Box<Expr>,
    },
    Assign {
        span: ParseSpan,
        operator: AssignOperator,
        target: Box<Expr>,
        value: Box<Expr>,
    },
    Enclosed {
        span: ParseSpan,
        inner: Box<Expr>,
    },
}

impl Expr {
    pub fn span(&self) -> ParseSpan {
        match self {
            Expr::Literal { span, .. }
            | Expr::Name { span, .. }
            | Expr::This { span }
            | Expr::FieldAccess { span, .. }
            | Expr::MethodCall { span, .. }
            | Expr::ArrayAccess { span, .. }
            | Expr::ObjectCreation { span, .. }
            | Expr::Cast { span, .. }
            | Expr::InstanceOf { span, .. }
            | Expr::ClassLiteral { span, .. }
            | Expr::Unary { span, .. }
            | Expr::Binary { span, .. }
            | Expr::Conditional { span, .. }
            | Expr::Assign { span, .. }
            | Expr::Enclosed { span, .. } => *span,
        }
    }

    /// Type written in the node itself (cast, instanceof, class literal, `new`)
    pub fn type_ref_mut(&mut self) -> Option<&mut TypeRef> {
        match self {
            Expr::ObjectCreation { type_ref, .. }
            | Expr::Cast { type_ref, .. }
            | Expr::InstanceOf { type_ref, .. }
            | Expr::ClassLiteral { type_ref, .. } => Some(type_ref),
            _ => None,
        }
    }

    /// Visit direct children in source order
    pub fn for_each_child<'a>(&'a self, f: &mut dyn FnMut(&'a Expr)) {
        match self {
            Expr::Literal { .. } | Expr::Name { .. } | Expr::This { .. } | Expr::ClassLiteral { .. } => {}
            Expr::FieldAccess { scope, .. } => f(scope),
            Expr::MethodCall { scope, args, .. } => {
                if let Some(scope) = scope {
                    f(scope);
                }
                args.iter().for_each(|arg| f(arg));
            }
            Expr::ArrayAccess { array, index, .. } => {
                f(array);
                f(index);
            }
            Expr::ObjectCreation { args, .. } => args.iter().for_each(|arg| f(arg)),
            Expr::Cast { expression, .. }
            | Expr::InstanceOf { expression, .. }
            | Expr::Unary { expression, .. } => f(expression),
            Expr::Binary { left, right, .. } => {
                f(left);
                f(right);
            }
            Expr::Conditional {
                condition,
                true_expr,
                false_expr,
                ..
            } => {
                f(condition);
                f(true_expr);
                f(false_expr);
            }
            Expr::Assign { target, value, .. } => {
                f(target);
                f(value);
            }
            Expr::Enclosed { inner, .. } => f(inner),
        }
    }

    pub fn for_each_child_mut(&mut self, f: &mut dyn FnMut(&mut Expr)) {
        match self {
            Expr::Literal { .. } | Expr::Name { .. } | Expr::This { .. } | Expr::ClassLiteral { .. } => {}
            Expr::FieldAccess { scope, .. } => f(scope),
            Expr::MethodCall { scope, args, .. } => {
                if let Some(scope) = scope {
                    f(scope);
                }
                args.iter_mut().for_each(|arg| f(arg));
            }
            Expr::ArrayAccess { array, index, .. } => {
                f(array);
                f(index);
            }
            Expr::ObjectCreation { args, .. } => args.iter_mut().for_each(|arg| f(arg)),
            Expr::Cast { expression, .. }
            | Expr::InstanceOf { expression, .. }
            | Expr::Unary { expression, .. } => f(expression),
            Expr::Binary { left, right, .. } => {
                f(left);
                f(right);
            }
            Expr::Conditional {
                condition,
                true_expr,
                false_expr,
                ..
            } => {
                f(condition);
                f(true_expr);
                f(false_expr);
            }
            Expr::Assign { target, value, .. } => {
                f(target);
                f(value);
            }
            Expr::Enclosed { inner, .. } => f(inner),
        }
    }

    /// Walk the tree depth-first, parents before children
    pub fn walk_mut(&mut self, f: &mut dyn FnMut(&mut Expr)) {
        f(self);
        self.for_each_child_mut(&mut |child| child.walk_mut(&mut *f));
    }
}
