//! Module graph for generated source files.
//!
//! Every generated file is a module: a path, an exported type name, a set of
//! dependencies it imports from, and a [`ModuleSource`] that renders its
//! content. Generators assemble modules with a [`ModuleGraphBuilder`]:
//!
//! ```text
//!   add()  ──►  push_dep()  ──►  unshift()  ──►  graft()  ──►  freeze()
//!  create      record edge,     nest under      absorb a       order, check
//!  module      pick alias,      a directory     sub-tree       paths, dedupe
//!              reject cycles                                    export names
//! ```
//!
//! The frozen [`ModuleGraph`] is read-only; content is rendered from it on
//! demand, so every module sees the final paths and names of its
//! dependencies.

mod graph;
mod path;

pub use graph::{GeneratedFile, ImportRef, ModuleGraph, RenderContext};
pub use path::{relative_import, SOURCE_EXTENSION};

use std::collections::HashSet;

use tracing::trace;

use crate::codegen::ts_types::{to_identifier, to_pascal_case};
use crate::diagnostic::{CodegenError, Result};

/// Stable handle to a module inside a builder or graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId(usize);

impl ModuleId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Renders the content of a module.
pub trait ModuleSource: Send + Sync {
    /// Produces the full file content. Must be a pure function of `self`
    /// and `ctx`.
    fn render(&self, ctx: &RenderContext<'_>) -> String;
}

/// Everything needed to register a module.
pub struct ModuleDef {
    /// File name inside the module's directory, e.g. `index.ts`.
    pub file_name: String,
    /// Name the module is known by in its consumers (an entry name such as
    /// `ping`); aliases and property keys derive from it.
    pub import_name: String,
    /// Name of the type the module exports.
    pub export_name: String,
    pub source: Box<dyn ModuleSource>,
}

impl ModuleDef {
    pub fn new(
        file_name: impl Into<String>,
        import_name: impl Into<String>,
        export_name: impl Into<String>,
        source: impl ModuleSource + 'static,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            import_name: import_name.into(),
            export_name: export_name.into(),
            source: Box::new(source),
        }
    }
}

/// A dependency edge and the alias the consumer imports it under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub target: ModuleId,
    pub alias: String,
}

struct ModuleNode {
    segments: Vec<String>,
    file_name: String,
    import_name: String,
    export_name: String,
    deps: Vec<Edge>,
    source: Box<dyn ModuleSource>,
}

impl ModuleNode {
    fn path(&self) -> String {
        let mut parts: Vec<&str> = self.segments.iter().map(String::as_str).collect();
        parts.push(&self.file_name);
        parts.join("/")
    }
}

/// Mutable arena of modules. See the module docs for the build sequence.
#[derive(Default)]
pub struct ModuleGraphBuilder {
    nodes: Vec<ModuleNode>,
}

impl ModuleGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Registers a module and returns its handle.
    pub fn add(&mut self, def: ModuleDef) -> ModuleId {
        let id = ModuleId(self.nodes.len());
        self.nodes.push(ModuleNode {
            segments: Vec::new(),
            file_name: def.file_name,
            import_name: def.import_name,
            export_name: def.export_name,
            deps: Vec::new(),
            source: def.source,
        });
        id
    }

    /// Current path of a module, relative to the output root.
    pub fn path(&self, id: ModuleId) -> Result<String> {
        Ok(self.node(id)?.path())
    }

    /// Alias under which `consumer` imports `dep`, if the edge exists.
    pub fn alias(&self, consumer: ModuleId, dep: ModuleId) -> Result<Option<&str>> {
        Ok(self
            .node(consumer)?
            .deps
            .iter()
            .find(|edge| edge.target == dep)
            .map(|edge| edge.alias.as_str()))
    }

    /// Records that `consumer` imports from `dep`.
    ///
    /// Rejects self-dependencies and edges that would close a cycle. The
    /// edge gets an alias that is unique among the consumer's imports.
    /// Registering the same edge twice is a no-op.
    pub fn push_dep(&mut self, consumer: ModuleId, dep: ModuleId) -> Result<()> {
        self.node(consumer)?;
        self.node(dep)?;

        if consumer == dep {
            return Err(CodegenError::SelfDependency {
                module: self.nodes[consumer.0].path(),
            });
        }

        if let Some(path) = self.find_path(dep, consumer) {
            let mut cycle: Vec<String> = std::iter::once(consumer)
                .chain(path)
                .map(|id| self.nodes[id.0].path())
                .collect();
            cycle.dedup();
            return Err(CodegenError::DependencyCycle { cycle });
        }

        if self.nodes[consumer.0].deps.iter().any(|edge| edge.target == dep) {
            return Ok(());
        }

        let alias = self.resolve_alias(consumer, dep);
        trace!(
            consumer = %self.nodes[consumer.0].path(),
            dep = %self.nodes[dep.0].path(),
            %alias,
            "registered module dependency"
        );
        self.nodes[consumer.0].deps.push(Edge { target: dep, alias });
        Ok(())
    }

    /// Nests a module, and every module it reaches, under `segment`.
    pub fn unshift(&mut self, id: ModuleId, segment: impl Into<String>) -> Result<()> {
        self.node(id)?;
        let segment = segment.into();
        for reached in self.reachable(id) {
            self.nodes[reached.0].segments.insert(0, segment.clone());
        }
        Ok(())
    }

    /// Moves all modules of `tree` into this builder and returns the new
    /// handle of its root.
    pub fn graft(&mut self, tree: ModuleTree) -> ModuleId {
        let offset = self.nodes.len();
        for mut node in tree.builder.nodes {
            for edge in &mut node.deps {
                edge.target = ModuleId(edge.target.0 + offset);
            }
            self.nodes.push(node);
        }
        ModuleId(tree.root.0 + offset)
    }

    /// Freezes the modules reachable from `root` into a [`ModuleGraph`].
    pub fn freeze(self, root: ModuleId) -> Result<ModuleGraph> {
        self.node(root)?;
        ModuleGraph::from_builder(self, root)
    }

    fn node(&self, id: ModuleId) -> Result<&ModuleNode> {
        self.nodes
            .get(id.0)
            .ok_or(CodegenError::UnknownModule { id: id.0 })
    }

    /// Depth-first search for a dependency path `from → … → to`.
    fn find_path(&self, from: ModuleId, to: ModuleId) -> Option<Vec<ModuleId>> {
        let mut visited = HashSet::new();
        let mut stack = vec![(from, vec![from])];
        while let Some((current, path)) = stack.pop() {
            if current == to {
                return Some(path);
            }
            if !visited.insert(current) {
                continue;
            }
            for edge in self.nodes[current.0].deps.iter().rev() {
                let mut next = path.clone();
                next.push(edge.target);
                stack.push((edge.target, next));
            }
        }
        None
    }

    /// `id` and every module reachable from it, each exactly once, in
    /// depth-first pre-order.
    fn reachable(&self, id: ModuleId) -> Vec<ModuleId> {
        let mut seen = HashSet::new();
        let mut order = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if !seen.insert(current) {
                continue;
            }
            order.push(current);
            for edge in self.nodes[current.0].deps.iter().rev() {
                stack.push(edge.target);
            }
        }
        order
    }

    /// Picks the consumer-side alias for `dep`: the camelCase import name,
    /// then the name qualified with the dependency's directory, then a
    /// numeric suffix in registration order.
    fn resolve_alias(&self, consumer: ModuleId, dep: ModuleId) -> String {
        let taken: HashSet<&str> = self.nodes[consumer.0]
            .deps
            .iter()
            .map(|edge| edge.alias.as_str())
            .collect();

        let node = &self.nodes[dep.0];
        let base = to_identifier(&node.import_name);
        if !taken.contains(base.as_str()) {
            return base;
        }

        if let Some(dir) = node.segments.last() {
            let qualified = format!("{}{}", to_identifier(dir), to_pascal_case(&node.import_name));
            if !taken.contains(qualified.as_str()) {
                return qualified;
            }
        }

        (2usize..)
            .map(|n| format!("{}{}", base, n))
            .find(|candidate| !taken.contains(candidate.as_str()))
            .unwrap_or(base)
    }
}

/// An independently built sub-graph with a designated root.
///
/// Leaf generators each return one, so they can run concurrently without
/// sharing a builder.
pub struct ModuleTree {
    builder: ModuleGraphBuilder,
    root: ModuleId,
}

impl ModuleTree {
    pub fn new(builder: ModuleGraphBuilder, root: ModuleId) -> Self {
        Self { builder, root }
    }

    pub fn root(&self) -> ModuleId {
        self.root
    }

    pub fn builder(&self) -> &ModuleGraphBuilder {
        &self.builder
    }

    /// Number of modules in the tree.
    pub fn len(&self) -> usize {
        self.builder.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builder.is_empty()
    }

    /// Export name of the root module.
    pub fn export_name(&self) -> &str {
        &self.builder.nodes[self.root.0].export_name
    }

    /// Freezes the tree on its own, mostly for tests of a single facet.
    pub fn freeze(self) -> Result<ModuleGraph> {
        self.builder.freeze(self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Empty;

    impl ModuleSource for Empty {
        fn render(&self, _ctx: &RenderContext<'_>) -> String {
            String::new()
        }
    }

    fn module(builder: &mut ModuleGraphBuilder, file: &str, name: &str) -> ModuleId {
        builder.add(ModuleDef::new(file, name, to_pascal_case(name), Empty))
    }

    #[test]
    fn rejects_self_dependency() {
        let mut builder = ModuleGraphBuilder::new();
        let a = module(&mut builder, "a.ts", "a");
        assert!(matches!(
            builder.push_dep(a, a),
            Err(CodegenError::SelfDependency { .. })
        ));
    }

    #[test]
    fn rejects_cycles_when_registering() {
        let mut builder = ModuleGraphBuilder::new();
        let a = module(&mut builder, "a.ts", "a");
        let b = module(&mut builder, "b.ts", "b");
        let c = module(&mut builder, "c.ts", "c");
        builder.push_dep(a, b).unwrap();
        builder.push_dep(b, c).unwrap();

        let err = builder.push_dep(c, a).unwrap_err();
        assert!(err.is_graph_error());
        match err {
            CodegenError::DependencyCycle { cycle } => {
                assert_eq!(cycle, ["c.ts", "a.ts", "b.ts", "c.ts"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_unknown_ids() {
        let mut builder = ModuleGraphBuilder::new();
        let a = module(&mut builder, "a.ts", "a");
        assert!(matches!(
            builder.push_dep(a, ModuleId(7)),
            Err(CodegenError::UnknownModule { id: 7 })
        ));
    }

    #[test]
    fn duplicate_edge_is_a_noop() {
        let mut builder = ModuleGraphBuilder::new();
        let a = module(&mut builder, "a.ts", "a");
        let b = module(&mut builder, "b.ts", "b");
        builder.push_dep(a, b).unwrap();
        builder.push_dep(a, b).unwrap();
        assert_eq!(builder.nodes[a.0].deps.len(), 1);
    }

    #[test]
    fn unshift_moves_the_whole_subtree_once() {
        let mut builder = ModuleGraphBuilder::new();
        let root = module(&mut builder, "index.ts", "root");
        let left = module(&mut builder, "left.ts", "left");
        let right = module(&mut builder, "right.ts", "right");
        let shared = module(&mut builder, "shared.ts", "shared");
        builder.push_dep(root, left).unwrap();
        builder.push_dep(root, right).unwrap();
        builder.push_dep(left, shared).unwrap();
        builder.push_dep(right, shared).unwrap();

        builder.unshift(root, "inner").unwrap();
        builder.unshift(root, "outer").unwrap();

        assert_eq!(builder.path(root).unwrap(), "outer/inner/index.ts");
        assert_eq!(builder.path(shared).unwrap(), "outer/inner/shared.ts");
    }

    #[test]
    fn colliding_aliases_are_qualified() {
        let mut builder = ModuleGraphBuilder::new();
        let root = module(&mut builder, "index.ts", "root");
        let first = module(&mut builder, "text.ts", "text");
        let second = module(&mut builder, "text.ts", "text");
        let third = module(&mut builder, "text.ts", "text");
        builder.unshift(first, "chat").unwrap();
        builder.unshift(second, "mail").unwrap();
        builder.unshift(third, "mail").unwrap();
        builder.unshift(third, "other").unwrap();

        builder.push_dep(root, first).unwrap();
        builder.push_dep(root, second).unwrap();
        builder.push_dep(root, third).unwrap();

        assert_eq!(builder.alias(root, first).unwrap(), Some("text"));
        assert_eq!(builder.alias(root, second).unwrap(), Some("mailText"));
        assert_eq!(builder.alias(root, third).unwrap(), Some("text2"));
    }

    #[test]
    fn graft_remaps_edges() {
        let mut sub = ModuleGraphBuilder::new();
        let sub_root = module(&mut sub, "index.ts", "actions");
        let leaf = module(&mut sub, "ping.ts", "ping");
        sub.push_dep(sub_root, leaf).unwrap();
        let tree = ModuleTree::new(sub, sub_root);
        assert_eq!(tree.export_name(), "Actions");

        let mut builder = ModuleGraphBuilder::new();
        let root = module(&mut builder, "index.ts", "index");
        let grafted = builder.graft(tree);
        builder.unshift(grafted, "actions").unwrap();
        builder.push_dep(root, grafted).unwrap();

        assert_eq!(builder.path(ModuleId(2)).unwrap(), "actions/ping.ts");
        assert_eq!(builder.alias(grafted, ModuleId(2)).unwrap(), Some("ping"));
    }
}
