//! Frozen module graph and rendering.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::path::relative_import;
use super::{Edge, ModuleGraphBuilder, ModuleId, ModuleNode, ModuleSource};
use crate::codegen::ts_types::{to_pascal_case, GLOBAL_TYPES};
use crate::diagnostic::{CodegenError, Result};

/// A generated file, path relative to the output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

struct FrozenModule {
    path: String,
    import_name: String,
    export_name: String,
    deps: Vec<Edge>,
    source: Box<dyn ModuleSource>,
}

/// Read-only module graph with final paths and export names.
pub struct ModuleGraph {
    modules: Vec<FrozenModule>,
    order: Vec<ModuleId>,
    root: ModuleId,
}

impl ModuleGraph {
    pub(super) fn from_builder(builder: ModuleGraphBuilder, root: ModuleId) -> Result<Self> {
        let order = topological_order(&builder.nodes, root)?;

        let mut modules: Vec<FrozenModule> = builder
            .nodes
            .into_iter()
            .map(|node| FrozenModule {
                path: node.path(),
                import_name: node.import_name,
                export_name: node.export_name,
                deps: node.deps,
                source: node.source,
            })
            .collect();

        let mut paths = HashSet::new();
        for id in &order {
            let path = &modules[id.0].path;
            if !paths.insert(path.clone()) {
                return Err(CodegenError::PathCollision { path: path.clone() });
            }
        }

        let mut exports_by_dir: HashMap<String, HashSet<String>> = HashMap::new();
        for id in &order {
            let module = &modules[id.0];
            let dir = parent_dir(&module.path).to_string();
            let taken = exports_by_dir
                .entry(dir.clone())
                .or_insert_with(|| GLOBAL_TYPES.iter().map(|name| name.to_string()).collect());
            let name = unique_export_name(&module.export_name, &dir, taken);
            if name != module.export_name {
                debug!(
                    path = %module.path,
                    from = %module.export_name,
                    to = %name,
                    "renamed colliding export"
                );
            }
            taken.insert(name.clone());
            modules[id.0].export_name = name;
        }

        debug!(
            modules = order.len(),
            dropped = modules.len() - order.len(),
            "froze module graph"
        );

        Ok(Self {
            modules,
            order,
            root,
        })
    }

    pub fn root(&self) -> ModuleId {
        self.root
    }

    /// Number of modules that will be emitted.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Emitted modules, every dependency before its consumers.
    pub fn order(&self) -> &[ModuleId] {
        &self.order
    }

    pub fn path(&self, id: ModuleId) -> &str {
        &self.modules[id.0].path
    }

    pub fn export_name(&self, id: ModuleId) -> &str {
        &self.modules[id.0].export_name
    }

    pub fn dependencies(&self, id: ModuleId) -> &[Edge] {
        &self.modules[id.0].deps
    }

    /// Looks up an emitted module by its output path.
    pub fn find(&self, path: &str) -> Option<ModuleId> {
        self.order
            .iter()
            .copied()
            .find(|id| self.modules[id.0].path == path)
    }

    /// Import specifier `from` uses to reach `to`.
    pub fn import_path(&self, from: ModuleId, to: ModuleId) -> String {
        relative_import(self.path(from), self.path(to))
    }

    /// Renders one module.
    pub fn content(&self, id: ModuleId) -> String {
        let ctx = RenderContext { graph: self, id };
        self.modules[id.0].source.render(&ctx)
    }

    /// Renders every emitted module in dependency order.
    pub fn render(&self) -> Vec<GeneratedFile> {
        self.order
            .iter()
            .map(|&id| GeneratedFile {
                path: self.path(id).to_string(),
                content: self.content(id),
            })
            .collect()
    }
}

/// What a module sees while rendering.
pub struct RenderContext<'g> {
    graph: &'g ModuleGraph,
    id: ModuleId,
}

impl<'g> RenderContext<'g> {
    pub fn id(&self) -> ModuleId {
        self.id
    }

    pub fn path(&self) -> &'g str {
        self.graph.path(self.id)
    }

    /// Final export name of the module being rendered.
    pub fn export_name(&self) -> &'g str {
        self.graph.export_name(self.id)
    }

    /// Dependencies in registration order.
    pub fn imports(&self) -> Vec<ImportRef<'g>> {
        self.graph
            .dependencies(self.id)
            .iter()
            .map(|edge| self.import_ref(edge))
            .collect()
    }

    /// Dependency registered under `import_name`.
    pub fn import(&self, import_name: &str) -> Option<ImportRef<'g>> {
        self.graph
            .dependencies(self.id)
            .iter()
            .find(|edge| self.graph.modules[edge.target.0].import_name == import_name)
            .map(|edge| self.import_ref(edge))
    }

    fn import_ref(&self, edge: &'g Edge) -> ImportRef<'g> {
        let target = &self.graph.modules[edge.target.0];
        ImportRef {
            name: &target.import_name,
            alias: &edge.alias,
            export_name: &target.export_name,
            path: self.graph.import_path(self.id, edge.target),
        }
    }
}

/// One import of the module being rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRef<'g> {
    /// Entry name the dependency was registered with.
    pub name: &'g str,
    /// Namespace alias in the importing file.
    pub alias: &'g str,
    pub export_name: &'g str,
    /// Relative import specifier.
    pub path: String,
}

impl ImportRef<'_> {
    /// Qualified reference to the dependency's exported type.
    pub fn type_ref(&self) -> String {
        format!("{}.{}", self.alias, self.export_name)
    }
}

fn parent_dir(path: &str) -> &str {
    path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
}

fn unique_export_name(base: &str, dir: &str, taken: &HashSet<String>) -> String {
    if !taken.contains(base) {
        return base.to_string();
    }

    if let Some(segment) = dir.rsplit('/').next().filter(|segment| !segment.is_empty()) {
        let qualified = format!("{}{}", to_pascal_case(segment), base);
        if !taken.contains(&qualified) {
            return qualified;
        }
    }

    (2usize..)
        .map(|n| format!("{}{}", base, n))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or_else(|| base.to_string())
}

#[derive(Clone, Copy, PartialEq)]
enum Mark {
    Visiting,
    Done,
}

/// Post-order walk from `root`: dependencies come before consumers.
fn topological_order(nodes: &[ModuleNode], root: ModuleId) -> Result<Vec<ModuleId>> {
    fn visit(
        nodes: &[ModuleNode],
        id: ModuleId,
        marks: &mut HashMap<ModuleId, Mark>,
        stack: &mut Vec<ModuleId>,
        order: &mut Vec<ModuleId>,
    ) -> Result<()> {
        match marks.get(&id) {
            Some(Mark::Done) => return Ok(()),
            Some(Mark::Visiting) => {
                let start = stack.iter().position(|&s| s == id).unwrap_or(0);
                let cycle = stack[start..]
                    .iter()
                    .chain(std::iter::once(&id))
                    .map(|s| nodes[s.0].path())
                    .collect();
                return Err(CodegenError::DependencyCycle { cycle });
            }
            None => {}
        }

        marks.insert(id, Mark::Visiting);
        stack.push(id);
        for edge in &nodes[id.0].deps {
            visit(nodes, edge.target, marks, stack, order)?;
        }
        stack.pop();
        marks.insert(id, Mark::Done);
        order.push(id);
        Ok(())
    }

    let mut marks = HashMap::new();
    let mut order = Vec::new();
    visit(nodes, root, &mut marks, &mut Vec::new(), &mut order)?;
    Ok(order)
}
