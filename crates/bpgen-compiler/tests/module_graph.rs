//! Module graph behavior through the public API.

use bpgen_compiler::module::{ModuleDef, ModuleGraphBuilder, ModuleSource, RenderContext};
use bpgen_compiler::CodegenError;

struct Listing;

impl ModuleSource for Listing {
    fn render(&self, ctx: &RenderContext<'_>) -> String {
        ctx.imports()
            .iter()
            .map(|import| format!("{} {}\n", import.alias, import.path))
            .collect()
    }
}

#[test]
fn manual_cycles_are_rejected() {
    let mut builder = ModuleGraphBuilder::new();
    let a = builder.add(ModuleDef::new("a.ts", "a", "A", Listing));
    let b = builder.add(ModuleDef::new("b.ts", "b", "B", Listing));
    builder.push_dep(a, b).unwrap();

    let err = builder.push_dep(b, a).unwrap_err();
    assert!(matches!(err, CodegenError::DependencyCycle { ref cycle } if cycle == &["b.ts", "a.ts", "b.ts"]));

    // The rejected edge left the builder usable.
    let graph = builder.freeze(a).unwrap();
    assert_eq!(graph.len(), 2);
}

#[test]
fn imports_are_relative_to_the_consumer() {
    let mut builder = ModuleGraphBuilder::new();
    let root = builder.add(ModuleDef::new("index.ts", "index", "Root", Listing));
    let deep = builder.add(ModuleDef::new("leaf.ts", "leaf", "Leaf", Listing));
    let side = builder.add(ModuleDef::new("side.ts", "side", "Side", Listing));
    builder.push_dep(deep, side).unwrap();
    builder.unshift(deep, "inner").unwrap();
    builder.unshift(side, "other").unwrap();
    builder.push_dep(root, deep).unwrap();

    let graph = builder.freeze(root).unwrap();
    let files = graph.render();
    let paths: Vec<&str> = files.iter().map(|file| file.path.as_str()).collect();
    assert_eq!(paths, ["other/inner/side.ts", "inner/leaf.ts", "index.ts"]);
    assert_eq!(files[1].content, "side ../other/inner/side\n");
    assert_eq!(files[2].content, "leaf ./inner/leaf\n");
}
