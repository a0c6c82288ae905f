//! Canonical declaration text for every model entity.
//!
//! Pure formatting over the finished model: shapes and fields implement
//! [`std::fmt::Display`], larger entities expose `decl()` helpers, and
//! [`Module::to_source`] emits the whole package. Function bodies are
//! always rendered as the `// ...` placeholder since bodies are opaque at
//! this layer. Rendering never fails.

use std::fmt;

use crate::model::{
    Field, Function, Interface, Method, Module, Record, RecordField, ShapeKind, Signature,
    TypeShape,
};

/// Placeholder emitted in place of an opaque or absent function body.
pub const BODY_PLACEHOLDER: &str = "{\n\t// ...\n}\n";

impl TypeShape {
    /// Renders the bracketed generic-argument suffix (`[A,B]`), or nothing
    /// when there are no arguments.
    fn fmt_type_args(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut args = self.type_args.iter();
        let Some(first) = args.next() else {
            return Ok(());
        };
        write!(f, "[{first}")?;
        for arg in args {
            write!(f, ",{arg}")?;
        }
        write!(f, "]")
    }
}

impl fmt::Display for TypeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ShapeKind::Named { qualifier, name } => {
                if let Some(pkg) = qualifier {
                    write!(f, "{pkg}.")?;
                }
                write!(f, "{name}")?;
                self.fmt_type_args(f)
            }
            ShapeKind::Pointer { elem } => {
                write!(f, "*{elem}")?;
                self.fmt_type_args(f)
            }
            ShapeKind::Slice { elem } => write!(f, "[]{elem}"),
            ShapeKind::Variadic { elem } => write!(f, "...{elem}"),
            ShapeKind::Map { key, elem } => {
                write!(f, "map[{key}")?;
                self.fmt_type_args(f)?;
                write!(f, "]{elem}")
            }
            ShapeKind::Chan { elem } => write!(f, "chan {elem}"),
            // Erased composites render as their designated placeholders.
            ShapeKind::Func => write!(f, "func(...)(...)"),
            ShapeKind::Struct => write!(f, "struct{{}}"),
            ShapeKind::Interface => write!(f, "interface{{...}}"),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{}", self.shape)
        } else {
            write!(f, "{} {}", self.name, self.shape)
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.field)?;
        if !self.tag.is_empty() {
            write!(f, " `{}`", self.tag)?;
        }
        Ok(())
    }
}

/// Writes `(a int, b string)` followed, when results exist, by a space and
/// the result list (parenthesized only for more than one result).
fn write_signature(out: &mut String, signature: &Signature) {
    out.push('(');
    for (i, param) in signature.params.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(&param.to_string());
    }
    out.push(')');

    if signature.results.is_empty() {
        return;
    }
    out.push(' ');
    if signature.results.len() > 1 {
        out.push('(');
    }
    for (i, result) in signature.results.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(&result.to_string());
    }
    if signature.results.len() > 1 {
        out.push(')');
    }
}

impl Function {
    /// One-line form used inside interface bodies: `Name(params) results`.
    pub fn member_line(&self) -> String {
        let mut out = self.name.clone();
        write_signature(&mut out, &self.signature);
        out
    }

    /// Full declaration with the placeholder body.
    pub fn decl(&self) -> String {
        let mut out = String::from("func ");
        out.push_str(&self.name);
        write_signature(&mut out, &self.signature);
        out.push(' ');
        out.push_str(BODY_PLACEHOLDER);
        out
    }
}

impl Method {
    /// Full declaration with the receiver and the placeholder body.
    pub fn decl(&self) -> String {
        let mut out = String::from("func (");
        out.push_str(&self.receiver.to_string());
        out.push_str(") ");
        out.push_str(&self.func.name);
        write_signature(&mut out, &self.func.signature);
        out.push(' ');
        out.push_str(BODY_PLACEHOLDER);
        out
    }
}

impl Interface {
    /// Full `type Name interface { ... }` declaration, docs included.
    pub fn decl(&self) -> String {
        let mut out = String::new();
        for doc in &self.docs {
            out.push_str(doc);
            out.push('\n');
        }
        out.push_str("type ");
        out.push_str(&self.name);
        out.push_str(" interface {\n");
        for method in &self.methods {
            out.push('\t');
            out.push_str(&method.member_line());
            out.push('\n');
        }
        out.push_str("}\n");
        out
    }
}

impl Record {
    /// Declaration-form name, type constraints included: `Pair[K comparable,V any]`.
    pub fn decl_name(&self) -> String {
        let mut out = self.name.clone();
        let mut params = self.type_params.iter();
        if let Some(first) = params.next() {
            out.push('[');
            out.push_str(&first.field.to_string());
            for param in params {
                out.push(',');
                out.push_str(&param.field.to_string());
            }
            out.push(']');
        }
        out
    }

    /// Receiver-form name, bare parameter names only: `Pair[K,V]`.
    pub fn recv_name(&self) -> String {
        let mut out = self.name.clone();
        let mut params = self.type_params.iter();
        if let Some(first) = params.next() {
            out.push('[');
            out.push_str(&first.field.name);
            for param in params {
                out.push(',');
                out.push_str(&param.field.name);
            }
            out.push(']');
        }
        out
    }

    /// Full `type Name struct { ... }` declaration, docs included.
    pub fn decl(&self) -> String {
        let mut out = String::new();
        for doc in &self.docs {
            out.push_str(doc);
            out.push('\n');
        }
        out.push_str("type ");
        out.push_str(&self.decl_name());
        out.push_str(" struct {\n");
        for field in &self.fields {
            out.push('\t');
            out.push_str(&field.to_string());
            out.push('\n');
        }
        out.push_str("}\n");
        out
    }
}

impl Module {
    /// Renders the whole package: clause, imports, interfaces, records
    /// with their bound methods, then free functions.
    pub fn to_source(&self) -> String {
        let mut out = String::from("package ");
        out.push_str(&self.name);
        out.push_str("\n\n");

        if !self.imports.is_empty() {
            out.push_str("import (\n");
            for import in &self.imports {
                out.push('\t');
                if let Some(alias) = &import.alias {
                    out.push_str(alias);
                    out.push(' ');
                }
                out.push('"');
                out.push_str(&import.path);
                out.push_str("\"\n");
            }
            out.push_str(")\n\n");
        }

        for iface in &self.interfaces {
            out.push_str(&iface.decl());
            out.push('\n');
        }
        for record in &self.records {
            out.push_str(&record.decl());
            out.push('\n');
        }
        for record in &self.records {
            for method in &record.methods {
                out.push_str(&method.decl());
                out.push('\n');
            }
        }
        for function in &self.functions {
            out.push_str(&function.decl());
            out.push('\n');
        }
        out
    }
}
