//! Syntax-tree input boundary for the declaration model.
//!
//! This module defines the node shapes a collaborating parser is expected to
//! produce for one source unit (one file). Only declaration-level structure
//! is modeled: statements and expression bodies are opaque (`Block` is an
//! unparsed source range). The builders in this crate read these nodes and
//! never mutate them.
//!
//! ## Architecture
//!
//! - **Arena-based allocation**: recursive nodes live in `SyntaxArena` and
//!   are referenced via type-safe indices (IDs)
//! - **Span tracking**: arena nodes track their source location via
//!   `Spanned<T>`
//! - **Optimized collections**: `SmallVec` for per-field name lists,
//!   interned `Symbol`s for identifiers

use std::collections::HashMap;

use la_arena::{Arena, Idx};
use smallvec::SmallVec;

// =============================================================================
// Core Types, IDs and Arena
// =============================================================================

/// Interned identifier string.
pub type Ident = Symbol;

/// Type-safe index into the type-expressions arena.
pub type TypeId = Idx<Spanned<TypeExpr>>;

/// Type-safe index into the function signatures arena.
pub type SignatureId = Idx<Spanned<SignatureNode>>;

/// Type-safe index into the opaque-blocks arena.
pub type BlockId = Idx<Block>;

/// An interned string handle (compact identifier).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Symbol(u32);

impl Symbol {
    #[inline]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

/// Source code location range (byte offsets).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Start byte offset in source.
    pub start: u32,
    /// End byte offset in source (exclusive).
    pub end: u32,
}

impl Span {
    /// Creates a new span from byte offsets.
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start: start as u32,
            end: end as u32,
        }
    }
}

/// Wrapper that associates a syntax node with its source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    /// The actual syntax node.
    pub node: T,
    /// Source location of this node.
    pub span: Span,
}

/// Simple string interner (no external deps).
///
/// - `intern(&str) -> Symbol` deduplicates identifiers.
/// - `resolve(Symbol) -> &str` retrieves the original text.
#[derive(Debug, Default)]
pub struct Interner {
    map: HashMap<Box<str>, Symbol>,
    vec: Vec<Box<str>>,
}

impl Interner {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn intern(&mut self, s: &str) -> Symbol {
        if let Some(&sym) = self.map.get(s) {
            return sym;
        }
        let boxed: Box<str> = s.into();
        let sym = Symbol(self.vec.len() as u32);
        // Important: insert using the same boxed key we store.
        self.map.insert(boxed.clone(), sym);
        self.vec.push(boxed);
        sym
    }

    #[inline]
    pub fn resolve(&self, sym: Symbol) -> &str {
        &self.vec[sym.0 as usize]
    }
}

/// Central arena that owns the recursive syntax-node memory.
///
/// Type expressions and signatures nest arbitrarily, so they are flattened
/// here and referenced via typed IDs. Declaration-level nodes (`GenDecl`,
/// `FuncDecl`, fields) are shallow and stored by value.
#[derive(Default, Debug, PartialEq)]
pub struct SyntaxArena {
    /// Storage for all type-expression nodes.
    pub types: Arena<Spanned<TypeExpr>>,
    /// Storage for all function signature nodes.
    pub signatures: Arena<Spanned<SignatureNode>>,
    /// Storage for all opaque body blocks.
    pub blocks: Arena<Block>,
}

impl SyntaxArena {
    /// Creates a new empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    // --- Allocation helpers ---

    /// Allocates a type-expression node in the arena.
    #[inline]
    pub fn alloc_type(&mut self, typ: TypeExpr, span: Span) -> TypeId {
        self.types.alloc(Spanned { node: typ, span })
    }

    /// Allocates a function signature node in the arena.
    #[inline]
    pub fn alloc_signature(&mut self, sig: SignatureNode, span: Span) -> SignatureId {
        self.signatures.alloc(Spanned { node: sig, span })
    }

    /// Allocates an opaque block in the arena.
    #[inline]
    pub fn alloc_block(&mut self, block: Block) -> BlockId {
        self.blocks.alloc(block)
    }

    // --- Access helpers ---

    /// Retrieves a type-expression node by ID.
    #[inline]
    pub fn get_type(&self, id: TypeId) -> &Spanned<TypeExpr> {
        &self.types[id]
    }

    /// Gets the span of a type expression.
    #[inline]
    pub fn type_span(&self, id: TypeId) -> Span {
        self.types[id].span
    }

    /// Retrieves a signature node by ID.
    #[inline]
    pub fn get_signature(&self, id: SignatureId) -> &Spanned<SignatureNode> {
        &self.signatures[id]
    }

    /// Retrieves an opaque block by ID.
    #[inline]
    pub fn get_block(&self, id: BlockId) -> &Block {
        &self.blocks[id]
    }
}

// =============================================================================
// Root Structure and Declarations
// =============================================================================

/// Root node representing one parsed source unit (one file).
///
/// A multi-file package is a sequence of `SourceUnit`s sharing a package
/// name; the module assembler accepts them one at a time.
#[derive(Debug, Default)]
pub struct SourceUnit {
    /// Package name from the `package` clause.
    pub package_name: String,
    /// Identifier interner for this unit.
    pub interner: Interner,
    /// The arena that owns the recursive syntax nodes.
    pub arena: SyntaxArena,
    /// Top-level declarations in the unit, in source order.
    pub decls: Vec<TopLevelDecl>,
}

impl SourceUnit {
    /// Creates an empty unit for the given package name.
    pub fn new(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            ..Self::default()
        }
    }

    /// Interns an identifier.
    #[inline]
    pub fn intern(&mut self, s: &str) -> Ident {
        self.interner.intern(s)
    }

    /// Resolves an identifier back to its text.
    #[inline]
    pub fn name(&self, id: Ident) -> &str {
        self.interner.resolve(id)
    }
}

/// Top-level declaration (general declaration or function).
#[derive(Debug, Clone, PartialEq)]
pub enum TopLevelDecl {
    /// General declaration (import, const, type, var).
    Gen(GenDecl),
    /// Function or method declaration.
    Func(FuncDecl),
}

/// Generic declaration with specifications.
#[derive(Debug, Clone, PartialEq)]
pub struct GenDecl {
    /// Kind of declaration (import, const, type, var).
    pub kind: GenDeclKind,
    /// Doc comments attached to the declaration, verbatim.
    pub docs: Vec<String>,
    /// List of specifications for this declaration.
    pub specs: Vec<Spec>,
}

/// Kind of generic declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenDeclKind {
    /// Import declaration.
    Import,
    /// Constant declaration.
    Const,
    /// Type declaration.
    Type,
    /// Variable declaration.
    Var,
}

/// Specification within a generic declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum Spec {
    /// Import specification.
    Import(ImportSpec),
    /// Value specification (const or var).
    Value(ValueSpec),
    /// Type specification.
    Type(TypeSpec),
}

/// Import specification (`import "path"` or `import name "path"`).
#[derive(Debug, Clone, PartialEq)]
pub struct ImportSpec {
    /// Optional import alias.
    pub alias: Option<Ident>,
    /// Import path, without the surrounding quotes.
    pub path: String,
}

/// Value specification for const or var declarations.
///
/// Present in the input grammar but intentionally unmodeled: the assembler
/// skips these without error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueSpec {
    /// List of identifier names being declared.
    pub names: SmallVec<[Ident; 2]>,
    /// Optional type annotation.
    pub typ: Option<TypeId>,
}

/// Type specification for type declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeSpec {
    /// Name of the type being declared.
    pub name: Ident,
    /// Type parameters (empty for non-generic types).
    pub type_params: Vec<FieldNode>,
    /// The actual type definition.
    pub typ: TypeId,
}

/// Function or method declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    /// Receiver field list; empty for free functions. Valid input never
    /// carries more than one receiver field.
    pub recv: Vec<FieldNode>,
    /// Function name.
    pub name: Ident,
    /// Function signature (parameters and results).
    pub signature: SignatureNode,
    /// Optional opaque body (None for pure signatures).
    pub body: Option<BlockId>,
}

/// Function signature (parameters and results).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SignatureNode {
    /// Input parameters.
    pub params: Vec<FieldNode>,
    /// Result values.
    pub results: Vec<FieldNode>,
}

/// Single field with names and a shared type.
///
/// Used for struct members, interface members, parameters, results,
/// receivers and type parameters. Multiple names share one type
/// (`a, b int`); an empty name list is an anonymous/embedded field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldNode {
    /// Doc comments attached to the field, verbatim.
    pub docs: Vec<String>,
    /// Field names (empty for anonymous).
    pub names: SmallVec<[Ident; 2]>,
    /// Field type.
    pub typ: TypeId,
    /// Raw tag text, without the surrounding backticks.
    pub tag: Option<String>,
}

impl FieldNode {
    /// A plain `name Type` field without docs or tag.
    pub fn named(name: Ident, typ: TypeId) -> Self {
        Self {
            docs: Vec::new(),
            names: SmallVec::from_slice(&[name]),
            typ,
            tag: None,
        }
    }

    /// An anonymous field (embedded type or unnamed parameter).
    pub fn anonymous(typ: TypeId) -> Self {
        Self {
            docs: Vec::new(),
            names: SmallVec::new(),
            typ,
            tag: None,
        }
    }
}

/// Opaque, unparsed function body: a raw source range the host can re-emit
/// later. Statements are never analyzed at this layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    /// Source range of the block, braces included.
    pub span: Span,
}

// =============================================================================
// Type Expressions (Flattened)
// =============================================================================

/// Type-expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    /// Plain identifier (`T`).
    Ident(Ident),

    /// Qualified reference to another package (`pkg.Name`).
    Selector {
        /// Package qualifier.
        pkg: Ident,
        /// Referenced name.
        name: Ident,
    },

    /// Pointer type (`*T`).
    Pointer(TypeId),

    /// Array type (`[N]T` or `[...]T`); the length is irrelevant to the
    /// declaration model and not retained.
    Array(TypeId),

    /// Slice type (`[]T`).
    Slice(TypeId),

    /// Variadic parameter type (`...T`).
    Variadic(TypeId),

    /// Map type (`map[K]V`).
    Map {
        /// Key type.
        key: TypeId,
        /// Value type.
        value: TypeId,
    },

    /// Channel type (`chan T`, `chan<- T`, `<-chan T`).
    Chan {
        /// Channel direction.
        dir: ChanDir,
        /// Element type.
        elem: TypeId,
    },

    /// Anonymous function type (`func(...)`).
    Func(SignatureId),

    /// Struct type with its member fields.
    Struct(Vec<FieldNode>),

    /// Interface type with its member fields (method signatures and
    /// embedded named types).
    Interface(Vec<FieldNode>),

    /// Generic instantiation with exactly one type argument (`S[A]`).
    Index {
        /// Base expression.
        base: TypeId,
        /// The single type argument.
        index: TypeId,
    },

    /// Generic instantiation with multiple type arguments (`S[A, B]`).
    IndexList {
        /// Base expression.
        base: TypeId,
        /// Ordered type arguments.
        indices: Vec<TypeId>,
    },

    /// Parenthesized type.
    Paren(TypeId),

    /// Union of type terms in a constraint (`int | string`). Not part of
    /// the modeled subset.
    Union(Vec<TypeId>),

    /// Approximation term in a constraint (`~T`). Not part of the modeled
    /// subset.
    Tilde(TypeId),

    /// Invalid type produced by parser error recovery.
    Bad,
}

impl TypeExpr {
    /// Stable node-category name used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            TypeExpr::Ident(_) => "ident",
            TypeExpr::Selector { .. } => "selector",
            TypeExpr::Pointer(_) => "pointer",
            TypeExpr::Array(_) => "array",
            TypeExpr::Slice(_) => "slice",
            TypeExpr::Variadic(_) => "variadic",
            TypeExpr::Map { .. } => "map",
            TypeExpr::Chan { .. } => "chan",
            TypeExpr::Func(_) => "func",
            TypeExpr::Struct(_) => "struct",
            TypeExpr::Interface(_) => "interface",
            TypeExpr::Index { .. } => "index",
            TypeExpr::IndexList { .. } => "index-list",
            TypeExpr::Paren(_) => "paren",
            TypeExpr::Union(_) => "union",
            TypeExpr::Tilde(_) => "tilde",
            TypeExpr::Bad => "bad",
        }
    }
}

/// Channel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChanDir {
    /// Bidirectional channel (`chan T`).
    Both,
    /// Send-only channel (`chan<- T`).
    Send,
    /// Receive-only channel (`<-chan T`).
    Recv,
}
