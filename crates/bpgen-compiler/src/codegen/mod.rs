//! TypeScript code generation from canonical definitions.
//!
//! Each section of a definition has a leaf generator that builds its own
//! [`ModuleTree`](crate::module::ModuleTree). The trees are created
//! concurrently, then grafted under the root `index.ts`:
//!
//! ```text
//! index.ts                      TIntegration, Integration, Client
//! configuration/index.ts        Configuration
//! actions/index.ts              Actions
//! actions/<action>/...          Input, Output
//! channels/index.ts             Channels
//! channels/<channel>/...        Messages, <Message>
//! events/index.ts               Events
//! states/index.ts               States
//! ```

pub mod actions;
pub mod channels;
pub mod configuration;
pub mod events;
pub mod index;
pub mod sources;
pub mod states;
pub mod ts_types;

pub use index::{IndexModule, DEFAULT_SDK_PACKAGE};

use tracing::debug;

use crate::definition::Definition;
use crate::diagnostic::Result;
use crate::module::ModuleGraph;

/// Builds the complete module graph for a definition.
pub async fn build_module_graph(definition: &Definition, sdk_package: &str) -> Result<ModuleGraph> {
    let (configuration, actions, channels, events, states) = tokio::join!(
        configuration::create(&definition.configuration),
        actions::create(&definition.actions),
        channels::create(&definition.channels),
        events::create(&definition.events),
        states::create(&definition.states),
    );

    let leaves = [
        (configuration::SECTION, configuration?),
        (actions::SECTION, actions?),
        (channels::SECTION, channels?),
        (events::SECTION, events?),
        (states::SECTION, states?),
    ];
    for (section, tree) in &leaves {
        debug!(section, modules = tree.len(), "created section modules");
    }

    index::create(IndexModule::new(definition, sdk_package), leaves)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::{normalize, RawDefinition};

    #[tokio::test]
    async fn empty_definition_has_all_sections() {
        let raw: RawDefinition =
            serde_json::from_str(r#"{ "name": "empty", "version": "0.0.1" }"#).unwrap();
        let graph = build_module_graph(&normalize(&raw), DEFAULT_SDK_PACKAGE)
            .await
            .unwrap();

        let paths: Vec<&str> = graph.order().iter().map(|&id| graph.path(id)).collect();
        assert_eq!(
            paths,
            [
                "configuration/index.ts",
                "actions/index.ts",
                "channels/index.ts",
                "events/index.ts",
                "states/index.ts",
                "index.ts",
            ]
        );
    }
}
