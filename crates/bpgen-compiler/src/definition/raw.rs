//! Definition as written by the user.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{CreationRule, Definition, Entries, StateKind};

/// An integration definition before normalization.
///
/// Only `name` and `version` are required; the loader rejects definitions
/// where either is empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDefinition {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<RawUser>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<RawSchemaSlot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<Entries<RawAction>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channels: Option<Entries<RawChannel>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Entries<RawEvent>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub states: Option<Entries<RawState>>,
}

/// A `{ "schema": ... }` wrapper.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawSchemaSlot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
}

impl RawSchemaSlot {
    pub fn new(schema: Value) -> Self {
        Self {
            schema: Some(schema),
        }
    }
}

/// Tags are written either as a list of names or as a map of
/// `name → { title, description }`. Only the names matter for generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTags {
    Names(Vec<String>),
    Described(Entries<Value>),
}

impl RawTags {
    pub fn names(&self) -> Vec<&str> {
        match self {
            RawTags::Names(names) => names.iter().map(String::as_str).collect(),
            RawTags::Described(entries) => entries.names().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCreation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<RawTags>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation: Option<RawCreation>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawAction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<RawSchemaSlot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<RawSchemaSlot>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawChannel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<Entries<RawSchemaSlot>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<RawMessageTags>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation: Option<RawConversation>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawMessageTags {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<RawTags>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawConversation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<RawTags>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation: Option<RawCreation>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawState {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<StateKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
}

fn raw_tags<'a>(tags: impl IntoIterator<Item = &'a String>) -> RawTags {
    RawTags::Names(tags.into_iter().cloned().collect())
}

fn raw_creation(creation: &CreationRule) -> RawCreation {
    RawCreation {
        enabled: Some(creation.enabled),
        required_tags: Some(creation.required_tags.iter().cloned().collect()),
    }
}

/// Writes a canonical definition back in its raw, fully-spelled-out form.
impl From<&Definition> for RawDefinition {
    fn from(definition: &Definition) -> Self {
        RawDefinition {
            name: definition.name.clone(),
            version: definition.version.clone(),
            title: definition.title.clone(),
            description: definition.description.clone(),
            user: Some(RawUser {
                tags: Some(raw_tags(&definition.user.tags)),
                creation: Some(raw_creation(&definition.user.creation)),
            }),
            configuration: Some(RawSchemaSlot::new(
                definition.configuration.schema.to_json_schema(),
            )),
            actions: Some(definition.actions.map(|action| RawAction {
                title: action.title.clone(),
                description: action.description.clone(),
                input: Some(RawSchemaSlot::new(action.input.to_json_schema())),
                output: Some(RawSchemaSlot::new(action.output.to_json_schema())),
            })),
            channels: Some(definition.channels.map(|channel| RawChannel {
                title: channel.title.clone(),
                description: channel.description.clone(),
                messages: Some(
                    channel
                        .messages
                        .map(|schema| RawSchemaSlot::new(schema.to_json_schema())),
                ),
                message: Some(RawMessageTags {
                    tags: Some(raw_tags(&channel.message.tags)),
                }),
                conversation: Some(RawConversation {
                    tags: Some(raw_tags(&channel.conversation.tags)),
                    creation: Some(raw_creation(&channel.conversation.creation)),
                }),
            })),
            events: Some(definition.events.map(|event| RawEvent {
                title: event.title.clone(),
                description: event.description.clone(),
                schema: Some(event.schema.to_json_schema()),
            })),
            states: Some(definition.states.map(|state| RawState {
                kind: Some(state.kind),
                schema: Some(state.schema.to_json_schema()),
            })),
        }
    }
}
