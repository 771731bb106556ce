/**
 * Expression Serializer
 *
 * Prints an expression AST back as Java source
 */
use super::ast::*;

/// Serialize AST to string
pub fn serialize(ast: &Expr) -> String {
    let mut out = String::new();
    write_expr(&mut out, ast);
    out
}

fn write_expr(out: &mut String, ast: &Expr) {
    match ast {
        Expr::Literal { kind, value, .. } => match kind {
            LiteralKind::String => write_quoted(out, value, '"'),
            LiteralKind::Char => write_quoted(out, value, '\''),
            _ => out.push_str(value),
        },
        Expr::Name { name, .. } => out.push_str(name),
        Expr::This { .. } => out.push_str("this"),
        Expr::FieldAccess { scope, name, .. } => {
            write_expr(out, scope);
            out.push('.');
            out.push_str(name);
        }
        Expr::MethodCall {
            scope, name, args, ..
        } => {
            if let Some(scope) = scope {
                write_expr(out, scope);
                out.push('.');
            }
            out.push_str(name);
            write_args(out, args);
        }
        Expr::ArrayAccess { array, index, .. } => {
            write_expr(out, array);
            out.push('[');
            write_expr(out, index);
            out.push(']');
        }
        Expr::ObjectCreation { type_ref, args, .. } => {
            out.push_str("new ");
            out.push_str(&type_ref.to_string());
            write_args(out, args);
        }
        Expr::Cast {
            type_ref,
            expression,
            ..
        } => {
            out.push('(');
            out.push_str(&type_ref.to_string());
            out.push_str(") ");
            write_expr(out, expression);
        }
        Expr::InstanceOf {
            expression,
            type_ref,
            ..
        } => {
            write_expr(out, expression);
            out.push_str(" instanceof ");
            out.push_str(&type_ref.to_string());
        }
        Expr::ClassLiteral { type_ref, .. } => {
            out.push_str(&type_ref.to_string());
            out.push_str(".class");
        }
        Expr::Unary {
            operator,
            expression,
            ..
        } => {
            if operator.is_postfix() {
                write_expr(out, expression);
                out.push_str(operator.as_str());
            } else {
                out.push_str(operator.as_str());
                write_expr(out, expression);
            }
        }
        Expr::Binary {
            operator,
            left,
            right,
            ..
        } => {
            write_expr(out, left);
            out.push(' ');
            out.push_str(operator.as_str());
            out.push(' ');
            write_expr(out, right);
        }
        Expr::Conditional {
            condition,
            true_expr,
            false_expr,
            ..
        } => {
            write_expr(out, condition);
            out.push_str(" ? ");
            write_expr(out, true_expr);
            out.push_str(" : ");
            write_expr(out, false_expr);
        }
        Expr::Assign {
            operator,
            target,
            value,
            ..
        } => {
            write_expr(out, target);
            out.push(' ');
            out.push_str(operator.as_str());
            out.push(' ');
            write_expr(out, value);
        }
        Expr::Enclosed { inner, .. } => {
            out.push('(');
            write_expr(out, inner);
            out.push(')');
        }
    }
}

fn write_args(out: &mut String, args: &[Expr]) {
    out.push('(');
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_expr(out, arg);
    }
    out.push(')');
}

fn write_quoted(out: &mut String, value: &str, quote: char) {
    out.push(quote);
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\x08' => out.push_str("\\b"),
            '\x0C' => out.push_str("\\f"),
            '\0' => out.push_str("\\0"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
}
