//! Declaration builders and the module assembler.
//!
//! The free functions build one entity each from its declaration node;
//! [`ModuleBuilder`] drives a full pass over a unit's top-level
//! declarations and finishes with the method-binding pass.

use std::collections::{HashMap, HashSet};

use crate::error::{BuildError, Result};
use crate::model::{Function, Import, Interface, Method, Module, Record, ShapeKind};
use crate::resolve::{build_signature, resolve_fields, resolve_record_fields, resolve_type};
use crate::syntax::{
    FieldNode, FuncDecl, ImportSpec, SourceUnit, Spec, TopLevelDecl, TypeExpr, TypeSpec,
};

/// Builds a free function (or the function part of a method) from its
/// declaration.
pub fn build_function(unit: &SourceUnit, decl: &FuncDecl) -> Result<Function> {
    Ok(Function {
        name: unit.name(decl.name).to_owned(),
        signature: build_signature(unit, &decl.signature)?,
        body: decl.body,
    })
}

/// Builds a method, resolving exactly the first receiver field.
///
/// Valid input never declares more than one receiver field; an empty
/// receiver list is a structural violation.
pub fn build_method(unit: &SourceUnit, decl: &FuncDecl) -> Result<Method> {
    let func = build_function(unit, decl)?;
    let recv = decl.recv.first().ok_or_else(|| BuildError::MissingReceiver {
        method: func.name.clone(),
    })?;
    let mut receivers = resolve_fields(unit, recv)?;
    Ok(Method {
        func,
        receiver: receivers.remove(0),
    })
}

/// Builds a record from a type spec whose underlying type is a struct.
///
/// Type parameters and members go through the field resolver, so shared
/// names expand and declaration order is preserved. `methods` starts empty
/// and is only filled by the binding pass.
pub fn build_record(
    unit: &SourceUnit,
    docs: &[String],
    spec: &TypeSpec,
    members: &[FieldNode],
) -> Result<Record> {
    let mut record = Record {
        name: unit.name(spec.name).to_owned(),
        type_params: Vec::new(),
        fields: Vec::new(),
        methods: Vec::new(),
        docs: docs.to_vec(),
    };
    for param in &spec.type_params {
        record
            .type_params
            .extend(resolve_record_fields(unit, param)?);
    }
    for member in members {
        record.fields.extend(resolve_record_fields(unit, member)?);
    }
    Ok(record)
}

/// Builds an interface from a type spec whose underlying type is an
/// interface.
///
/// Method-signature members become bodyless functions. Embedded named
/// interfaces are skipped but recorded on the result, so callers can see
/// the method set is incomplete; any other member category is fatal.
pub fn build_interface(
    unit: &SourceUnit,
    docs: &[String],
    spec: &TypeSpec,
    members: &[FieldNode],
) -> Result<Interface> {
    let mut iface = Interface {
        name: unit.name(spec.name).to_owned(),
        methods: Vec::new(),
        docs: docs.to_vec(),
        skipped_embeds: Vec::new(),
    };
    for member in members {
        match &unit.arena.get_type(member.typ).node {
            TypeExpr::Func(sig) => {
                let name = member
                    .names
                    .first()
                    .map(|&n| unit.name(n).to_owned())
                    .unwrap_or_default();
                iface.methods.push(Function {
                    name,
                    signature: build_signature(unit, &unit.arena.get_signature(*sig).node)?,
                    body: None,
                });
            }
            TypeExpr::Ident(_) | TypeExpr::Selector { .. } => {
                iface
                    .skipped_embeds
                    .push(resolve_type(unit, member.typ)?.to_string());
            }
            other => {
                return Err(BuildError::UnsupportedInterfaceMember {
                    interface: iface.name,
                    kind: other.kind_name(),
                })
            }
        }
    }
    Ok(iface)
}

// =============================================================================
// Module Assembler
// =============================================================================

/// Assembles a [`Module`] from one or more source units of a package.
///
/// Lifecycle is `Empty -> Collecting -> Bound`: a fresh builder is empty,
/// each [`collect`](Self::collect) call walks one unit's top-level
/// declarations, and [`bind`](Self::bind) consumes the builder, joins every
/// staged method to its receiver record by name, and returns the finished
/// module. Ownership makes the bound module immutable from the builder's
/// point of view.
///
/// Receiver binding is a literal-name lookup within the same package only;
/// no cross-package resolution is attempted.
#[derive(Debug, Default)]
pub struct ModuleBuilder {
    module: Module,
    /// Methods collected but not yet joined to their records.
    staged: Vec<Method>,
    /// Import paths already seen, for dedup. Owned here, never global.
    seen_imports: HashSet<String>,
}

impl ModuleBuilder {
    /// Creates an empty builder for the named package.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            module: Module {
                name: name.into(),
                ..Module::default()
            },
            staged: Vec::new(),
            seen_imports: HashSet::new(),
        }
    }

    /// Walks every top-level declaration of one unit exactly once.
    ///
    /// Const/var specs and type specs with unmodeled underlying types are
    /// intentionally skipped without error.
    pub fn collect(&mut self, unit: &SourceUnit) -> Result<()> {
        for decl in &unit.decls {
            match decl {
                TopLevelDecl::Gen(gen) => {
                    for spec in &gen.specs {
                        match spec {
                            Spec::Import(import) => self.collect_import(unit, import),
                            Spec::Type(type_spec) => {
                                self.collect_type_spec(unit, &gen.docs, type_spec)?
                            }
                            Spec::Value(_) => {}
                        }
                    }
                }
                TopLevelDecl::Func(func) => self.collect_func(unit, func)?,
            }
        }
        Ok(())
    }

    /// Performs the binding pass and finishes the module.
    ///
    /// Every staged method's receiver shape, after stripping at most one
    /// pointer layer, must name a record collected in the same package;
    /// otherwise the whole assembly fails.
    pub fn bind(mut self) -> Result<Module> {
        let by_name: HashMap<String, usize> = self
            .module
            .records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.name.clone(), i))
            .collect();

        for method in self.staged.drain(..) {
            let receiver = receiver_record_name(&method.receiver.shape.kind, &method)?;
            match by_name.get(&receiver) {
                Some(&i) => self.module.records[i].methods.push(method),
                None => {
                    return Err(BuildError::UnresolvedReceiver {
                        method: method.func.name.clone(),
                        receiver,
                    })
                }
            }
        }
        Ok(self.module)
    }

    fn collect_import(&mut self, unit: &SourceUnit, import: &ImportSpec) {
        if self.seen_imports.insert(import.path.clone()) {
            self.module.imports.push(Import {
                alias: import.alias.map(|a| unit.name(a).to_owned()),
                path: import.path.clone(),
            });
        }
    }

    fn collect_type_spec(
        &mut self,
        unit: &SourceUnit,
        docs: &[String],
        spec: &TypeSpec,
    ) -> Result<()> {
        match &unit.arena.get_type(spec.typ).node {
            TypeExpr::Struct(members) => {
                let record = build_record(unit, docs, spec, members)?;
                self.module.records.push(record);
            }
            TypeExpr::Interface(members) => {
                let iface = build_interface(unit, docs, spec, members)?;
                self.module.interfaces.push(iface);
            }
            // Aliases and non-composite named types are not part of the
            // declaration model.
            _ => {}
        }
        Ok(())
    }

    fn collect_func(&mut self, unit: &SourceUnit, decl: &FuncDecl) -> Result<()> {
        if decl.recv.is_empty() {
            self.module.functions.push(build_function(unit, decl)?);
        } else {
            self.staged.push(build_method(unit, decl)?);
        }
        Ok(())
    }
}

/// Strips at most one pointer layer and returns the bare receiver name.
fn receiver_record_name(kind: &ShapeKind, method: &Method) -> Result<String> {
    let stripped = match kind {
        ShapeKind::Pointer { elem } => &elem.kind,
        other => other,
    };
    match stripped {
        ShapeKind::Named { name, .. } => Ok(name.clone()),
        _ => Err(BuildError::UnresolvedReceiver {
            method: method.func.name.clone(),
            receiver: method.receiver.shape.to_string(),
        }),
    }
}
