//! Output data model: the serializable declaration tree.
//!
//! Everything here is a plain owned value produced by the builders in
//! [`crate::resolve`] and [`crate::build`]. Once a [`Module`] has been bound
//! it is immutable and can be rendered or serialized repeatedly.
//!
//! Serialization follows the `omitempty` convention: absent aliases, empty
//! name strings, and empty lists are omitted from the output.

use serde::{Deserialize, Serialize};

use crate::syntax::BlockId;

// =============================================================================
// Type Shapes
// =============================================================================

/// Semantic description of a type expression.
///
/// `type_args` is the merged-up generic argument list: the syntax tree
/// distinguishes single-argument and multi-argument instantiations as
/// different node shapes, but after resolution the arguments always sit
/// alongside the base shape they instantiate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeShape {
    /// The shape variant.
    #[serde(flatten)]
    pub kind: ShapeKind,
    /// Generic type arguments, in declaration order.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub type_args: Vec<TypeShape>,
}

impl TypeShape {
    /// A shape without type arguments.
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            type_args: Vec::new(),
        }
    }

    /// A plain unqualified named shape.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(ShapeKind::Named {
            qualifier: None,
            name: name.into(),
        })
    }
}

/// Closed set of shape variants. Exactly one payload is populated per
/// value; element shapes are exclusively owned, so the tree is acyclic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ShapeKind {
    /// Plain or package-qualified named type.
    Named {
        /// Package qualifier, if any.
        #[serde(skip_serializing_if = "Option::is_none", default)]
        qualifier: Option<String>,
        /// Type name.
        name: String,
    },
    /// Pointer (`*T`).
    Pointer {
        /// Pointee shape.
        elem: Box<TypeShape>,
    },
    /// Slice or array (`[]T`).
    Slice {
        /// Element shape.
        elem: Box<TypeShape>,
    },
    /// Trailing variadic parameter (`...T`).
    Variadic {
        /// Element shape.
        elem: Box<TypeShape>,
    },
    /// Map (`map[K]V`). The key is kept as its rendered representation
    /// only, mirroring its display-only role.
    Map {
        /// Rendered key type text.
        key: String,
        /// Value shape.
        elem: Box<TypeShape>,
    },
    /// Channel (`chan T`); direction is not retained.
    Chan {
        /// Element shape.
        elem: Box<TypeShape>,
    },
    /// Anonymous function type; the signature is intentionally erased.
    Func,
    /// Anonymous struct type; members are intentionally erased.
    Struct,
    /// Anonymous interface type; members are intentionally erased.
    Interface,
}

// =============================================================================
// Fields and Signatures
// =============================================================================

/// One named (or anonymous) slot with a resolved type shape.
///
/// Describes struct members, interface method parameters, function
/// parameters and results, and method receivers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field name; empty for anonymous/embedded fields.
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub name: String,
    /// Doc comments attached to the field, verbatim.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub docs: Vec<String>,
    /// Resolved type shape.
    pub shape: TypeShape,
}

impl Field {
    /// Whether this field carries no name.
    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty()
    }
}

/// A struct member: a [`Field`] plus its raw tag text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordField {
    /// The underlying field.
    #[serde(flatten)]
    pub field: Field,
    /// Raw tag text, opaque to this crate; empty when absent.
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub tag: String,
}

/// Ordered parameter and result lists of a function or method.
///
/// Order mirrors declaration order and is never changed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Signature {
    /// Input parameters.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub params: Vec<Field>,
    /// Result values.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub results: Vec<Field>,
}

// =============================================================================
// Declarations
// =============================================================================

/// A free function, or the function part of a method or interface member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Function {
    /// Function name.
    pub name: String,
    /// Parameters and results.
    #[serde(flatten)]
    pub signature: Signature,
    /// Opaque handle to the unparsed body; `None` for pure signatures
    /// (interface members, forward declarations).
    #[serde(skip)]
    pub body: Option<BlockId>,
}

impl Function {
    /// Whether a body block was present in the declaration.
    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }
}

/// A function bound to a receiver record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    /// The function part.
    #[serde(flatten)]
    pub func: Function,
    /// Receiver field. After binding, stripping at most one `Pointer`
    /// layer yields a `Named` shape matching a record in the module.
    pub receiver: Field,
}

/// A named method set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interface {
    /// Interface name.
    pub name: String,
    /// Declared methods, bodyless, in declaration order.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub methods: Vec<Function>,
    /// Doc comments from the declaration, verbatim.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub docs: Vec<String>,
    /// Rendered names of embedded interfaces that were skipped. Non-empty
    /// means `methods` is known-incomplete.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub skipped_embeds: Vec<String>,
}

impl Interface {
    /// Whether every declared member made it into `methods`.
    pub fn is_complete(&self) -> bool {
        self.skipped_embeds.is_empty()
    }
}

/// A struct-like record with its members and, after binding, its methods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Record name, without type parameters.
    pub name: String,
    /// Generic type parameters, in declaration order.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub type_params: Vec<RecordField>,
    /// Member fields, in declaration order.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub fields: Vec<RecordField>,
    /// Methods bound to this record. Populated only by the module
    /// assembler's binding pass, never by the record builder.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub methods: Vec<Method>,
    /// Doc comments from the declaration, verbatim.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub docs: Vec<String>,
}

/// One import entry. Deduplicated by `path` within a module; the
/// first-seen alias wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Import {
    /// Import alias, if any.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub alias: Option<String>,
    /// Import path, without quotes.
    pub path: String,
}

/// The finished declaration model of one package.
///
/// Produced by [`crate::build::ModuleBuilder`]; immutable once bound.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Module {
    /// Package name.
    pub name: String,
    /// Imports, deduplicated, in first-seen order.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub imports: Vec<Import>,
    /// Struct-like records, in declaration order.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub records: Vec<Record>,
    /// Interfaces, in declaration order.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub interfaces: Vec<Interface>,
    /// Free functions (methods live on their records), in declaration
    /// order.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub functions: Vec<Function>,
}

impl Module {
    /// Looks up a record by bare name.
    pub fn record(&self, name: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.name == name)
    }

    /// Looks up an interface by name.
    pub fn interface(&self, name: &str) -> Option<&Interface> {
        self.interfaces.iter().find(|i| i.name == name)
    }

    /// Looks up a free function by name.
    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.iter().find(|f| f.name == name)
    }
}
