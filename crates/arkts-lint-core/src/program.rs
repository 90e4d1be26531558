//! In-memory [`Oracle`] implementation.
//!
//! A [`Program`] is a snapshot of a type-checked compilation: the syntax of
//! every file plus the symbol, type and signature tables and the per-node
//! answers the checker gave. Hosts export it as JSON; tests assemble it with
//! [`ProgramBuilder`].

use crate::oracle::{
    ConstValue, ObjectKind, Oracle, SignatureId, SignatureInfo, SymbolFlags, SymbolId, SymbolInfo,
    TypeFlags, TypeId, TypeInfo,
};
use crate::syntax::{FileId, NodeId, NodeRef, SourceFile};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Errors loading a program snapshot.
#[derive(Debug, thiserror::Error)]
pub enum ProgramError {
    /// IO error reading the snapshot.
    #[error("Failed to read program snapshot {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Snapshot is not valid JSON for a program.
    #[error("Failed to parse program snapshot: {0}")]
    Json(#[from] serde_json::Error),

    /// A table entry refers to an id that does not exist.
    #[error("{context}: dangling {kind} id {id}")]
    DanglingId {
        /// Where the reference was found.
        context: String,
        /// Kind of id (file, node, symbol, type, signature).
        kind: &'static str,
        /// The missing id.
        id: u32,
    },
}

/// Checker answers recorded for one node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeFacts {
    /// Node the facts belong to.
    pub node: NodeRef,
    /// Symbol at the node.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<SymbolId>,
    /// Type at the node.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeId>,
    /// Contextual type at the node.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contextual_type: Option<TypeId>,
    /// Constant value of the node.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constant: Option<ConstValue>,
    /// Resolved signature of a call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<SignatureId>,
}

/// A type-checked program snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Program {
    /// Source files, indexed by [`FileId`].
    pub files: Vec<SourceFile>,
    /// Symbol table.
    #[serde(default)]
    pub symbols: Vec<SymbolInfo>,
    /// Type table.
    #[serde(default)]
    pub types: Vec<TypeInfo>,
    /// Signature table.
    #[serde(default)]
    pub signatures: Vec<SignatureInfo>,
    /// Per-node checker answers.
    #[serde(default)]
    pub facts: Vec<NodeFacts>,
    /// Explicit assignability pairs `(source, target)` beyond the structural rules.
    #[serde(default)]
    pub assignable: Vec<(TypeId, TypeId)>,
    #[serde(skip)]
    index: HashMap<NodeRef, usize>,
}

impl Program {
    /// Loads a snapshot from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self, ProgramError> {
        let content = std::fs::read_to_string(path).map_err(|e| ProgramError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&content)
    }

    /// Parses and validates a snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or refers to missing ids.
    pub fn from_json(content: &str) -> Result<Self, ProgramError> {
        let mut program: Self = serde_json::from_str(content)?;
        program.reindex();
        program.validate()?;
        debug!(
            files = program.files.len(),
            symbols = program.symbols.len(),
            types = program.types.len(),
            "Loaded program snapshot"
        );
        Ok(program)
    }

    /// Number of files.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Iterates files with their ids.
    pub fn iter_files(&self) -> impl Iterator<Item = (FileId, &SourceFile)> {
        self.files
            .iter()
            .enumerate()
            .filter_map(|(i, f)| u32::try_from(i).ok().map(|i| (FileId(i), f)))
    }

    fn reindex(&mut self) {
        self.index = self
            .facts
            .iter()
            .enumerate()
            .map(|(i, f)| (f.node, i))
            .collect();
        for file in &mut self.files {
            file.index_lines();
        }
    }

    fn facts_of(&self, node: NodeRef) -> Option<&NodeFacts> {
        self.index.get(&node).and_then(|&i| self.facts.get(i))
    }

    fn validate(&self) -> Result<(), ProgramError> {
        let dangling = |context: String, kind: &'static str, id: u32| ProgramError::DanglingId {
            context,
            kind,
            id,
        };
        let check_node = |context: &str, node: NodeRef| -> Result<(), ProgramError> {
            let file = self
                .files
                .get(node.file.0 as usize)
                .ok_or_else(|| dangling(context.to_string(), "file", node.file.0))?;
            file.get(node.node)
                .map(|_| ())
                .ok_or_else(|| dangling(context.to_string(), "node", node.node.0))
        };
        let check_symbol = |context: &str, id: SymbolId| -> Result<(), ProgramError> {
            if (id.0 as usize) < self.symbols.len() {
                Ok(())
            } else {
                Err(dangling(context.to_string(), "symbol", id.0))
            }
        };
        let check_type = |context: &str, id: TypeId| -> Result<(), ProgramError> {
            if (id.0 as usize) < self.types.len() {
                Ok(())
            } else {
                Err(dangling(context.to_string(), "type", id.0))
            }
        };

        for (i, file) in self.files.iter().enumerate() {
            let len = file.nodes.len();
            let check_local = |context: String, id: NodeId| -> Result<(), ProgramError> {
                if (id.0 as usize) < len {
                    Ok(())
                } else {
                    Err(dangling(context, "node", id.0))
                }
            };
            check_local(format!("files[{i}].root"), file.root)?;
            for (n, node) in file.nodes.iter().enumerate() {
                let ctx = format!("files[{i}].nodes[{n}]");
                if let Some(parent) = node.parent {
                    check_local(format!("{ctx}.parent"), parent)?;
                }
                for &child in &node.children {
                    check_local(format!("{ctx}.children"), child)?;
                }
                for (role, id) in node.fields.roles() {
                    check_local(format!("{ctx}.fields.{role}"), id)?;
                }
            }
        }
        for (i, s) in self.symbols.iter().enumerate() {
            let ctx = format!("symbols[{i}]");
            for d in &s.declarations {
                check_node(&format!("{ctx}.declarations"), *d)?;
            }
            if let Some(t) = s.alias_target {
                check_symbol(&format!("{ctx}.alias_target"), t)?;
            }
            if let Some(t) = s.ty {
                check_type(&format!("{ctx}.ty"), t)?;
            }
        }
        for (i, t) in self.types.iter().enumerate() {
            let ctx = format!("types[{i}]");
            for m in t.types.iter().chain(&t.type_arguments).chain(&t.base_types) {
                check_type(&ctx, *m)?;
            }
            if let Some(s) = t.symbol {
                check_symbol(&format!("{ctx}.symbol"), s)?;
            }
        }
        for (i, f) in self.facts.iter().enumerate() {
            let ctx = format!("facts[{i}]");
            check_node(&format!("{ctx}.node"), f.node)?;
            if let Some(s) = f.symbol {
                check_symbol(&format!("{ctx}.symbol"), s)?;
            }
            if let Some(t) = f.ty.or(f.contextual_type) {
                check_type(&format!("{ctx}.ty"), t)?;
            }
            if let Some(sig) = f.signature {
                if sig.0 as usize >= self.signatures.len() {
                    return Err(dangling(format!("{ctx}.signature"), "signature", sig.0));
                }
            }
        }
        Ok(())
    }

    fn derives_from(&self, source: TypeId, target: TypeId, depth: usize) -> bool {
        if source == target {
            return true;
        }
        if depth > 16 {
            return false;
        }
        self.ty(source).is_some_and(|t| {
            t.base_types
                .iter()
                .chain(t.target.iter())
                .any(|b| self.derives_from(*b, target, depth + 1))
        })
    }
}

impl Oracle for Program {
    fn file(&self, id: FileId) -> Option<&SourceFile> {
        self.files.get(id.0 as usize)
    }

    fn symbol_at(&self, node: NodeRef) -> Option<SymbolId> {
        self.facts_of(node)?.symbol
    }

    fn symbol(&self, id: SymbolId) -> Option<&SymbolInfo> {
        self.symbols.get(id.0 as usize)
    }

    fn type_at(&self, node: NodeRef) -> Option<TypeId> {
        self.facts_of(node)?.ty
    }

    fn contextual_type_at(&self, node: NodeRef) -> Option<TypeId> {
        self.facts_of(node)?.contextual_type
    }

    fn ty(&self, id: TypeId) -> Option<&TypeInfo> {
        self.types.get(id.0 as usize)
    }

    fn type_of_symbol(&self, id: SymbolId) -> Option<TypeId> {
        self.symbol(id)?.ty
    }

    fn declared_type_of_symbol(&self, id: SymbolId) -> Option<TypeId> {
        self.symbol(id)?.declared_type
    }

    fn constant_value(&self, node: NodeRef) -> Option<ConstValue> {
        self.facts_of(node)?.constant.clone()
    }

    fn resolved_signature(&self, node: NodeRef) -> Option<SignatureId> {
        self.facts_of(node)?.signature
    }

    fn signature(&self, id: SignatureId) -> Option<&SignatureInfo> {
        self.signatures.get(id.0 as usize)
    }

    fn is_assignable(&self, source: TypeId, target: TypeId) -> bool {
        if self.assignable.contains(&(source, target)) {
            return true;
        }
        let target_flags = self.type_flags(target);
        let source_flags = self.type_flags(source);
        if target_flags.intersects(TypeFlags::ANY | TypeFlags::UNKNOWN)
            || source_flags.intersects(TypeFlags::ANY | TypeFlags::NEVER)
        {
            return true;
        }
        if source_flags.contains(TypeFlags::UNION) {
            return self
                .union_members(source)
                .iter()
                .all(|s| self.is_assignable(*s, target));
        }
        if target_flags.contains(TypeFlags::UNION) {
            return self
                .union_members(target)
                .iter()
                .any(|t| self.is_assignable(source, *t));
        }
        let widened = |flags: TypeFlags| {
            [TypeFlags::NUMBER_LIKE, TypeFlags::STRING_LIKE, TypeFlags::BOOLEAN_LIKE, TypeFlags::BIGINT_LIKE]
                .into_iter()
                .find(|group| flags.intersects(*group))
        };
        if let (Some(s), Some(t)) = (widened(source_flags), widened(target_flags)) {
            if s == t && !target_flags.intersects(TypeFlags::LITERAL | TypeFlags::ENUM_LIKE) {
                return true;
            }
        }
        self.derives_from(source, target, 0)
    }
}

/// Assembles a [`Program`] programmatically.
#[derive(Debug, Default)]
pub struct ProgramBuilder {
    program: Program,
    primitives: HashMap<u32, TypeId>,
    array_target: Option<TypeId>,
}

impl ProgramBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file.
    pub fn add_file(&mut self, file: SourceFile) -> FileId {
        self.program.files.push(file);
        FileId(u32::try_from(self.program.files.len() - 1).unwrap_or(u32::MAX))
    }

    /// Read access to an added file.
    #[must_use]
    pub fn file(&self, id: FileId) -> Option<&SourceFile> {
        self.program.files.get(id.0 as usize)
    }

    /// Adds a symbol.
    pub fn symbol(&mut self, name: &str, flags: SymbolFlags) -> SymbolId {
        self.program.symbols.push(SymbolInfo::new(name, flags));
        SymbolId(u32::try_from(self.program.symbols.len() - 1).unwrap_or(u32::MAX))
    }

    /// Mutable access to a symbol.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this builder.
    pub fn symbol_mut(&mut self, id: SymbolId) -> &mut SymbolInfo {
        &mut self.program.symbols[id.0 as usize]
    }

    /// Records a declaration of `sym` and binds the declaration and its name to it.
    pub fn declare(&mut self, sym: SymbolId, decl: NodeRef) {
        let name = self
            .file(decl.file)
            .and_then(|f| f.get(decl.node))
            .and_then(|n| n.fields.name);
        let info = self.symbol_mut(sym);
        info.declarations.push(decl);
        if info.value_declaration.is_none() && !info.flags.intersects(SymbolFlags::INTERFACE | SymbolFlags::TYPE_ALIAS) {
            info.value_declaration = Some(decl);
        }
        self.bind(decl, sym);
        if let Some(name) = name {
            self.bind(NodeRef::new(decl.file, name), sym);
        }
    }

    /// Makes `alias` an import alias of `target`.
    pub fn alias(&mut self, alias: SymbolId, target: SymbolId) {
        let info = self.symbol_mut(alias);
        info.flags = info.flags | SymbolFlags::ALIAS;
        info.alias_target = Some(target);
    }

    /// Sets the value type of a symbol.
    pub fn set_symbol_type(&mut self, sym: SymbolId, ty: TypeId) {
        self.symbol_mut(sym).ty = Some(ty);
    }

    /// Sets the declared type of a symbol.
    pub fn set_declared_type(&mut self, sym: SymbolId, ty: TypeId) {
        self.symbol_mut(sym).declared_type = Some(ty);
    }

    fn facts_mut(&mut self, node: NodeRef) -> &mut NodeFacts {
        let i = *self.program.index.entry(node).or_insert_with(|| {
            self.program.facts.push(NodeFacts {
                node,
                ..NodeFacts::default()
            });
            self.program.facts.len() - 1
        });
        &mut self.program.facts[i]
    }

    /// Binds a node to a symbol.
    pub fn bind(&mut self, node: NodeRef, sym: SymbolId) {
        self.facts_mut(node).symbol = Some(sym);
    }

    /// Sets the type of a node.
    pub fn set_type(&mut self, node: NodeRef, ty: TypeId) {
        self.facts_mut(node).ty = Some(ty);
    }

    /// Sets the contextual type of a node.
    pub fn set_contextual_type(&mut self, node: NodeRef, ty: TypeId) {
        self.facts_mut(node).contextual_type = Some(ty);
    }

    /// Sets the constant value of a node.
    pub fn set_constant(&mut self, node: NodeRef, value: ConstValue) {
        self.facts_mut(node).constant = Some(value);
    }

    /// Sets the resolved signature of a call.
    pub fn set_signature(&mut self, node: NodeRef, sig: SignatureId) {
        self.facts_mut(node).signature = Some(sig);
    }

    /// Adds a type.
    pub fn add_type(&mut self, info: TypeInfo) -> TypeId {
        self.program.types.push(info);
        TypeId(u32::try_from(self.program.types.len() - 1).unwrap_or(u32::MAX))
    }

    /// Mutable access to a type.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this builder.
    pub fn type_mut(&mut self, id: TypeId) -> &mut TypeInfo {
        &mut self.program.types[id.0 as usize]
    }

    /// Adds a signature.
    pub fn add_signature(&mut self, info: SignatureInfo) -> SignatureId {
        self.program.signatures.push(info);
        SignatureId(u32::try_from(self.program.signatures.len() - 1).unwrap_or(u32::MAX))
    }

    /// Declares `source` assignable to `target`.
    pub fn assignable(&mut self, source: TypeId, target: TypeId) {
        self.program.assignable.push((source, target));
    }

    fn primitive(&mut self, flags: TypeFlags, name: &str) -> TypeId {
        if let Some(&id) = self.primitives.get(&flags.0) {
            return id;
        }
        let id = self.add_type(TypeInfo::new(flags, name));
        self.primitives.insert(flags.0, id);
        id
    }

    /// `number`
    pub fn number(&mut self) -> TypeId {
        self.primitive(TypeFlags::NUMBER, "number")
    }

    /// `string`
    pub fn string(&mut self) -> TypeId {
        self.primitive(TypeFlags::STRING, "string")
    }

    /// `boolean`
    pub fn boolean(&mut self) -> TypeId {
        self.primitive(TypeFlags::BOOLEAN, "boolean")
    }

    /// `any`
    pub fn any(&mut self) -> TypeId {
        self.primitive(TypeFlags::ANY, "any")
    }

    /// `unknown`
    pub fn unknown(&mut self) -> TypeId {
        self.primitive(TypeFlags::UNKNOWN, "unknown")
    }

    /// `void`
    pub fn void(&mut self) -> TypeId {
        self.primitive(TypeFlags::VOID, "void")
    }

    /// `undefined`
    pub fn undefined(&mut self) -> TypeId {
        self.primitive(TypeFlags::UNDEFINED, "undefined")
    }

    /// `null`
    pub fn null(&mut self) -> TypeId {
        self.primitive(TypeFlags::NULL, "null")
    }

    /// Number literal type.
    pub fn number_literal(&mut self, value: f64) -> TypeId {
        let mut info = TypeInfo::new(TypeFlags::NUMBER_LITERAL, value.to_string());
        info.literal = Some(ConstValue::Number(value));
        self.add_type(info)
    }

    fn object(&mut self, kind: ObjectKind, sym: Option<SymbolId>, name: &str) -> TypeId {
        let mut info = TypeInfo::new(TypeFlags::OBJECT, name);
        info.object_kind = Some(kind);
        info.symbol = sym;
        self.add_type(info)
    }

    /// Instance type of a class symbol; also set as its declared type.
    pub fn class_type(&mut self, sym: SymbolId, bases: &[TypeId]) -> TypeId {
        let name = self.program.symbols[sym.0 as usize].name.clone();
        let id = self.object(ObjectKind::Class, Some(sym), &name);
        self.type_mut(id).base_types = bases.to_vec();
        self.set_declared_type(sym, id);
        id
    }

    /// Interface type; also set as its declared type.
    pub fn interface_type(&mut self, sym: SymbolId, bases: &[TypeId]) -> TypeId {
        let name = self.program.symbols[sym.0 as usize].name.clone();
        let id = self.object(ObjectKind::Interface, Some(sym), &name);
        self.type_mut(id).base_types = bases.to_vec();
        self.set_declared_type(sym, id);
        id
    }

    /// Anonymous object type, e.g. an object literal or function type.
    pub fn anonymous(&mut self, sym: Option<SymbolId>, name: &str) -> TypeId {
        self.object(ObjectKind::Anonymous, sym, name)
    }

    /// Union of `members`.
    pub fn union(&mut self, members: &[TypeId]) -> TypeId {
        let mut info = TypeInfo::new(TypeFlags::UNION, "");
        info.types = members.to_vec();
        self.add_type(info)
    }

    /// Reference `target<args>`.
    pub fn reference(&mut self, target: TypeId, args: &[TypeId]) -> TypeId {
        let (sym, base) = self
            .program
            .types
            .get(target.0 as usize)
            .map(|t| (t.symbol, t.name.clone()))
            .unwrap_or_default();
        let id = self.object(ObjectKind::Reference, sym, "");
        let info = self.type_mut(id);
        info.target = Some(target);
        info.type_arguments = args.to_vec();
        if !base.is_empty() {
            info.name = format!(
                "{base}<{}>",
                args.iter().map(|a| a.0.to_string()).collect::<Vec<_>>().join(", ")
            );
        }
        id
    }

    /// `elem[]`, an instantiation of the global `Array` interface.
    pub fn array(&mut self, elem: TypeId) -> TypeId {
        let target = match self.array_target {
            Some(t) => t,
            None => {
                let sym = self.symbol("Array", SymbolFlags::INTERFACE);
                let t = self.interface_type(sym, &[]);
                self.array_target = Some(t);
                t
            }
        };
        let elem_name = self
            .program
            .types
            .get(elem.0 as usize)
            .map(|t| t.name.clone())
            .unwrap_or_default();
        let id = self.reference(target, &[elem]);
        self.type_mut(id).name = format!("{elem_name}[]");
        id
    }

    /// Tuple of `elems`.
    pub fn tuple(&mut self, elems: &[TypeId]) -> TypeId {
        let id = self.object(ObjectKind::Tuple, None, "");
        self.type_mut(id).type_arguments = elems.to_vec();
        id
    }

    /// Finishes the program.
    #[must_use]
    pub fn build(mut self) -> Program {
        self.program.reindex();
        self.program
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{NodeFlags, TreeBuilder};

    fn sample() -> (Program, NodeRef, SymbolId) {
        let mut b = TreeBuilder::new("a.ets");
        let one = b.number("1");
        let (stmt, decl) = b.variable(NodeFlags::LET, "x", None, Some(one));
        let file = b.finish([stmt]);
        let mut p = ProgramBuilder::new();
        let f = p.add_file(file);
        let x = p.symbol("x", SymbolFlags::BLOCK_SCOPED_VARIABLE);
        let decl = NodeRef::new(f, decl);
        p.declare(x, decl);
        let num = p.number();
        p.set_symbol_type(x, num);
        p.set_constant(NodeRef::new(f, one), ConstValue::Number(1.0));
        (p.build(), decl, x)
    }

    #[test]
    fn declare_binds_name_and_declaration() {
        let (program, decl, x) = sample();
        assert_eq!(program.symbol_at(decl), Some(x));
        let file = program.file(decl.file).unwrap();
        let name = file.fields(decl.node).name.unwrap();
        assert_eq!(program.symbol_at(NodeRef::new(decl.file, name)), Some(x));
        assert_eq!(program.declarations_of(x), &[decl]);
    }

    #[test]
    fn json_round_trip_keeps_answers() {
        let (program, decl, x) = sample();
        let json = serde_json::to_string(&program).unwrap();
        let loaded = Program::from_json(&json).unwrap();
        assert_eq!(loaded.symbol_at(decl), Some(x));
        assert_eq!(loaded.symbol_name(x), "x");
    }

    #[test]
    fn dangling_ids_are_rejected() {
        let (mut program, _, _) = sample();
        program.facts[0].symbol = Some(SymbolId(99));
        let json = serde_json::to_string(&program).unwrap();
        let err = Program::from_json(&json).unwrap_err();
        assert!(err.to_string().contains("dangling symbol id 99"));
    }

    #[test]
    fn dangling_child_node_is_rejected() {
        let json = r#"{"files": [{"path": "a.ets", "root": 0, "nodes": [{"kind": "SourceFile", "children": [42]}]}]}"#;
        let err = Program::from_json(json).unwrap_err();
        assert_eq!(
            err.to_string(),
            "files[0].nodes[0].children: dangling node id 42"
        );
    }

    #[test]
    fn dangling_field_and_root_are_rejected() {
        let (mut program, decl, _) = sample();
        program.files[0].nodes[decl.node.0 as usize].fields.initializer = Some(NodeId(500));
        let json = serde_json::to_string(&program).unwrap();
        let err = Program::from_json(&json).unwrap_err();
        assert!(err
            .to_string()
            .ends_with(".fields.initializer: dangling node id 500"));

        let (mut program, _, _) = sample();
        program.files[0].root = NodeId(77);
        let json = serde_json::to_string(&program).unwrap();
        let err = Program::from_json(&json).unwrap_err();
        assert_eq!(err.to_string(), "files[0].root: dangling node id 77");
    }

    #[test]
    fn alias_resolution_follows_chain() {
        let mut p = ProgramBuilder::new();
        let target = p.symbol("Foo", SymbolFlags::CLASS);
        let a = p.symbol("Foo", SymbolFlags::NONE);
        let b = p.symbol("Bar", SymbolFlags::NONE);
        p.alias(a, target);
        p.alias(b, a);
        let program = p.build();
        assert_eq!(program.resolve_alias(b), target);
    }

    #[test]
    fn assignability_rules() {
        let mut p = ProgramBuilder::new();
        let num = p.number();
        let s = p.string();
        let lit = p.number_literal(3.0);
        let u = p.union(&[num, s]);
        let base_sym = p.symbol("Base", SymbolFlags::CLASS);
        let base = p.class_type(base_sym, &[]);
        let derived_sym = p.symbol("Derived", SymbolFlags::CLASS);
        let derived = p.class_type(derived_sym, &[base]);
        let program = p.build();
        assert!(program.is_assignable(lit, num));
        assert!(program.is_assignable(num, u));
        assert!(!program.is_assignable(u, num));
        assert!(program.is_assignable(derived, base));
        assert!(!program.is_assignable(base, derived));
    }
}
