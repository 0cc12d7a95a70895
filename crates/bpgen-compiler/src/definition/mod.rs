//! Integration definitions.
//!
//! A definition arrives as a [`RawDefinition`], where every section is
//! optional and schemas are plain JSON Schema documents. [`normalize`] turns
//! it into the canonical [`Definition`]: every section present (possibly
//! empty) and every schema translated into a [`SchemaNode`]. Generators only
//! consume the canonical form.

mod entries;
mod normalize;
mod raw;

pub use entries::Entries;
pub use normalize::normalize;
pub use raw::{
    RawAction, RawChannel, RawConversation, RawCreation, RawDefinition, RawEvent,
    RawMessageTags, RawSchemaSlot, RawState, RawTags, RawUser,
};

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::schema::SchemaNode;

/// Canonical integration definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    pub name: String,
    pub version: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub user: UserDefinition,
    pub configuration: ConfigurationDefinition,
    pub actions: Entries<ActionDefinition>,
    pub channels: Entries<ChannelDefinition>,
    pub events: Entries<EventDefinition>,
    pub states: Entries<StateDefinition>,
}

/// User tags and creation rules.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UserDefinition {
    pub tags: BTreeSet<String>,
    pub creation: CreationRule,
}

/// Whether the platform may create users or conversations on its own, and
/// which tags it must provide when it does.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CreationRule {
    pub enabled: bool,
    pub required_tags: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfigurationDefinition {
    pub schema: SchemaNode,
}

impl Default for ConfigurationDefinition {
    fn default() -> Self {
        Self {
            schema: SchemaNode::empty_object(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActionDefinition {
    pub title: Option<String>,
    pub description: Option<String>,
    pub input: SchemaNode,
    pub output: SchemaNode,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChannelDefinition {
    pub title: Option<String>,
    pub description: Option<String>,
    pub conversation: ConversationDefinition,
    pub message: MessageDefinition,
    /// Message payload schemas keyed by message type.
    pub messages: Entries<SchemaNode>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConversationDefinition {
    pub tags: BTreeSet<String>,
    pub creation: CreationRule,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MessageDefinition {
    pub tags: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventDefinition {
    pub title: Option<String>,
    pub description: Option<String>,
    pub schema: SchemaNode,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StateDefinition {
    pub kind: StateKind,
    pub schema: SchemaNode,
}

/// What a state is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateKind {
    #[default]
    Integration,
    Conversation,
    User,
}

impl StateKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StateKind::Integration => "integration",
            StateKind::Conversation => "conversation",
            StateKind::User => "user",
        }
    }
}
