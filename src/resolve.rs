//! Type-expression and field resolution.
//!
//! [`resolve_type`] converts one syntax-tree type expression into a
//! [`TypeShape`]; [`resolve_fields`] expands one field node into its
//! [`Field`] values; [`build_signature`] assembles parameter and result
//! lists. All three are pure functions over the immutable input tree.

use crate::error::{BuildError, Result};
use crate::model::{Field, RecordField, ShapeKind, Signature, TypeShape};
use crate::syntax::{FieldNode, SignatureNode, SourceUnit, TypeExpr, TypeId};

/// Resolves a type expression into its semantic shape.
///
/// Dispatch is a closed match over the syntactic category. Generic
/// instantiations (`Index`/`IndexList`) are merged up: the resolved
/// argument list is attached to the resolved base shape, so one-argument
/// and many-argument forms produce structurally identical results.
///
/// Constraint-only categories (`Union`, `Tilde`) and recovery nodes are a
/// hard stop: an unrecognized shape would corrupt every declaration that
/// references it.
pub fn resolve_type(unit: &SourceUnit, id: TypeId) -> Result<TypeShape> {
    let spanned = unit.arena.get_type(id);
    match &spanned.node {
        TypeExpr::Ident(name) => Ok(TypeShape::named(unit.name(*name))),

        TypeExpr::Selector { pkg, name } => Ok(TypeShape::new(ShapeKind::Named {
            qualifier: Some(unit.name(*pkg).to_owned()),
            name: unit.name(*name).to_owned(),
        })),

        TypeExpr::Pointer(elem) => Ok(TypeShape::new(ShapeKind::Pointer {
            elem: Box::new(resolve_type(unit, *elem)?),
        })),

        // Array lengths are display-irrelevant here; both forms collapse
        // into the slice shape.
        TypeExpr::Array(elem) | TypeExpr::Slice(elem) => Ok(TypeShape::new(ShapeKind::Slice {
            elem: Box::new(resolve_type(unit, *elem)?),
        })),

        TypeExpr::Variadic(elem) => Ok(TypeShape::new(ShapeKind::Variadic {
            elem: Box::new(resolve_type(unit, *elem)?),
        })),

        // The key participates in rendering only, so it is stored as its
        // rendered text rather than a nested shape.
        TypeExpr::Map { key, value } => {
            let key = resolve_type(unit, *key)?.to_string();
            Ok(TypeShape::new(ShapeKind::Map {
                key,
                elem: Box::new(resolve_type(unit, *value)?),
            }))
        }

        TypeExpr::Chan { dir: _, elem } => Ok(TypeShape::new(ShapeKind::Chan {
            elem: Box::new(resolve_type(unit, *elem)?),
        })),

        // Anonymous composites are erased to placeholder shapes.
        TypeExpr::Func(_) => Ok(TypeShape::new(ShapeKind::Func)),
        TypeExpr::Struct(_) => Ok(TypeShape::new(ShapeKind::Struct)),
        TypeExpr::Interface(_) => Ok(TypeShape::new(ShapeKind::Interface)),

        TypeExpr::Index { base, index } => {
            let mut shape = resolve_type(unit, *base)?;
            shape.type_args = vec![resolve_type(unit, *index)?];
            Ok(shape)
        }

        TypeExpr::IndexList { base, indices } => {
            let type_args = indices
                .iter()
                .map(|&idx| resolve_type(unit, idx))
                .collect::<Result<Vec<_>>>()?;
            let mut shape = resolve_type(unit, *base)?;
            shape.type_args = type_args;
            Ok(shape)
        }

        TypeExpr::Paren(inner) => resolve_type(unit, *inner),

        expr @ (TypeExpr::Union(_) | TypeExpr::Tilde(_) | TypeExpr::Bad) => {
            Err(BuildError::UnsupportedTypeExpr {
                kind: expr.kind_name(),
                span: spanned.span,
            })
        }
    }
}

/// Expands one field node into its fields.
///
/// `a, b Type` yields two fields sharing one structurally identical shape;
/// the shape is resolved exactly once. A node with zero names yields one
/// anonymous field. Doc comments are copied verbatim into every expansion.
pub fn resolve_fields(unit: &SourceUnit, node: &FieldNode) -> Result<Vec<Field>> {
    let shape = resolve_type(unit, node.typ)?;

    if node.names.is_empty() {
        return Ok(vec![Field {
            name: String::new(),
            docs: node.docs.clone(),
            shape,
        }]);
    }

    Ok(node
        .names
        .iter()
        .map(|&name| Field {
            name: unit.name(name).to_owned(),
            docs: node.docs.clone(),
            shape: shape.clone(),
        })
        .collect())
}

/// Expands one field node into record fields, attaching the raw tag text
/// to every expansion.
pub fn resolve_record_fields(unit: &SourceUnit, node: &FieldNode) -> Result<Vec<RecordField>> {
    let tag = node.tag.clone().unwrap_or_default();
    Ok(resolve_fields(unit, node)?
        .into_iter()
        .map(|field| RecordField {
            field,
            tag: tag.clone(),
        })
        .collect())
}

/// Assembles a signature from parameter and result field nodes, preserving
/// declaration order.
pub fn build_signature(unit: &SourceUnit, node: &SignatureNode) -> Result<Signature> {
    let mut signature = Signature::default();
    for param in &node.params {
        signature.params.extend(resolve_fields(unit, param)?);
    }
    for result in &node.results {
        signature.results.extend(resolve_fields(unit, result)?);
    }
    Ok(signature)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use smallvec::smallvec;

    use super::*;
    use crate::syntax::{Span, TypeExpr};

    fn ident_type(unit: &mut SourceUnit, name: &str) -> TypeId {
        let sym = unit.intern(name);
        unit.arena.alloc_type(TypeExpr::Ident(sym), Span::default())
    }

    #[test]
    fn resolves_qualified_reference() {
        let mut unit = SourceUnit::new("p");
        let pkg = unit.intern("time");
        let name = unit.intern("Time");
        let id = unit
            .arena
            .alloc_type(TypeExpr::Selector { pkg, name }, Span::default());

        let shape = resolve_type(&unit, id).unwrap();
        assert_eq!(
            shape.kind,
            ShapeKind::Named {
                qualifier: Some("time".into()),
                name: "Time".into(),
            }
        );
    }

    #[test]
    fn resolves_nested_elements() {
        let mut unit = SourceUnit::new("p");
        let user = ident_type(&mut unit, "User");
        let ptr = unit
            .arena
            .alloc_type(TypeExpr::Pointer(user), Span::default());
        let slice = unit.arena.alloc_type(TypeExpr::Slice(ptr), Span::default());

        let shape = resolve_type(&unit, slice).unwrap();
        let ShapeKind::Slice { elem } = &shape.kind else {
            panic!("expected slice, got {shape:?}");
        };
        assert!(matches!(elem.kind, ShapeKind::Pointer { .. }));
    }

    #[test]
    fn map_key_is_rendered_text() {
        let mut unit = SourceUnit::new("p");
        let key = ident_type(&mut unit, "string");
        let value = ident_type(&mut unit, "int");
        let id = unit
            .arena
            .alloc_type(TypeExpr::Map { key, value }, Span::default());

        let shape = resolve_type(&unit, id).unwrap();
        let ShapeKind::Map { key, elem } = &shape.kind else {
            panic!("expected map, got {shape:?}");
        };
        assert_eq!(key, "string");
        assert_eq!(**elem, TypeShape::named("int"));
    }

    #[test]
    fn single_and_multi_argument_instantiations_merge_up() {
        let mut unit = SourceUnit::new("p");
        let base = ident_type(&mut unit, "S");
        let a = ident_type(&mut unit, "A");
        let single = unit
            .arena
            .alloc_type(TypeExpr::Index { base, index: a }, Span::default());

        let base2 = ident_type(&mut unit, "S");
        let a2 = ident_type(&mut unit, "A");
        let list = unit.arena.alloc_type(
            TypeExpr::IndexList {
                base: base2,
                indices: vec![a2],
            },
            Span::default(),
        );

        // One argument through either node shape must be structurally
        // identical after the merge-up.
        assert_eq!(
            resolve_type(&unit, single).unwrap(),
            resolve_type(&unit, list).unwrap()
        );
    }

    #[test]
    fn paren_unwraps_transparently() {
        let mut unit = SourceUnit::new("p");
        let inner = ident_type(&mut unit, "T");
        let paren = unit
            .arena
            .alloc_type(TypeExpr::Paren(inner), Span::default());

        assert_eq!(resolve_type(&unit, paren).unwrap(), TypeShape::named("T"));
    }

    #[test]
    fn constraint_categories_are_fatal() {
        let mut unit = SourceUnit::new("p");
        let t = ident_type(&mut unit, "int");
        let tilde = unit.arena.alloc_type(TypeExpr::Tilde(t), Span::default());

        let err = resolve_type(&unit, tilde).unwrap_err();
        assert!(matches!(
            err,
            BuildError::UnsupportedTypeExpr { kind: "tilde", .. }
        ));
    }

    #[test]
    fn shared_names_expand_to_one_field_each() {
        let mut unit = SourceUnit::new("p");
        let x = unit.intern("x");
        let y = unit.intern("y");
        let typ = ident_type(&mut unit, "string");
        let node = FieldNode {
            docs: vec!["// coordinates".to_owned()],
            names: smallvec![x, y],
            typ,
            tag: None,
        };

        let fields = resolve_fields(&unit, &node).unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].name, "x");
        assert_eq!(fields[1].name, "y");
        // One resolution, shared structurally.
        assert_eq!(fields[0].shape, fields[1].shape);
        assert_eq!(fields[0].docs, fields[1].docs);
    }

    #[test]
    fn zero_names_yield_one_anonymous_field() {
        let mut unit = SourceUnit::new("p");
        let typ = ident_type(&mut unit, "Base");
        let node = FieldNode::anonymous(typ);

        let fields = resolve_fields(&unit, &node).unwrap();
        assert_eq!(fields.len(), 1);
        assert!(fields[0].is_anonymous());
        assert_eq!(fields[0].shape, TypeShape::named("Base"));
    }

    #[test]
    fn record_fields_carry_tags_across_expansions() {
        let mut unit = SourceUnit::new("p");
        let a = unit.intern("a");
        let b = unit.intern("b");
        let typ = ident_type(&mut unit, "int");
        let node = FieldNode {
            docs: Vec::new(),
            names: smallvec![a, b],
            typ,
            tag: Some("json:\"ab\"".to_owned()),
        };

        let fields = resolve_record_fields(&unit, &node).unwrap();
        assert_eq!(fields.len(), 2);
        assert!(fields.iter().all(|f| f.tag == "json:\"ab\""));
    }

    #[test]
    fn signature_preserves_declaration_order() {
        let mut unit = SourceUnit::new("p");
        let a = unit.intern("a");
        let b = unit.intern("b");
        let int = ident_type(&mut unit, "int");
        let string = ident_type(&mut unit, "string");
        let err = ident_type(&mut unit, "error");
        let node = SignatureNode {
            params: vec![
                FieldNode {
                    docs: Vec::new(),
                    names: smallvec![a, b],
                    typ: int,
                    tag: None,
                },
                FieldNode::anonymous(string),
            ],
            results: vec![FieldNode::anonymous(err)],
        };

        let sig = build_signature(&unit, &node).unwrap();
        let params: Vec<_> = sig.params.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(params, ["a", "b", ""]);
        assert_eq!(sig.results.len(), 1);
        assert_eq!(sig.results[0].shape, TypeShape::named("error"));
    }
}
