//! Raw → canonical definition mapping.

use std::collections::BTreeSet;

use serde_json::Value;

use super::raw::{RawCreation, RawDefinition, RawSchemaSlot, RawTags};
use super::{
    ActionDefinition, ChannelDefinition, ConfigurationDefinition, ConversationDefinition,
    CreationRule, Definition, EventDefinition, MessageDefinition, StateDefinition,
    UserDefinition,
};
use crate::schema::{translate, SchemaKind, SchemaNode};

/// Normalizes a raw definition into its canonical form.
///
/// Absent sections become empty, absent tag sets become empty, and absent
/// creation rules become disabled with no required tags, at every level of
/// the definition. Normalizing the raw form of a canonical definition gives
/// the same definition back.
pub fn normalize(raw: &RawDefinition) -> Definition {
    let user = raw.user.as_ref();
    let configuration = raw
        .configuration
        .as_ref()
        .map(|slot| ConfigurationDefinition {
            schema: slot_schema(Some(slot)),
        })
        .unwrap_or_default();

    let actions = raw
        .actions
        .as_ref()
        .map(|actions| {
            actions.map(|action| ActionDefinition {
                title: action.title.clone(),
                description: action.description.clone(),
                input: slot_schema(action.input.as_ref()),
                output: slot_schema(action.output.as_ref()),
            })
        })
        .unwrap_or_default();

    let channels = raw
        .channels
        .as_ref()
        .map(|channels| {
            channels.map(|channel| {
                let conversation = channel.conversation.as_ref();
                ChannelDefinition {
                    title: channel.title.clone(),
                    description: channel.description.clone(),
                    conversation: ConversationDefinition {
                        tags: tag_set(conversation.and_then(|c| c.tags.as_ref())),
                        creation: creation_rule(conversation.and_then(|c| c.creation.as_ref())),
                    },
                    message: MessageDefinition {
                        tags: tag_set(channel.message.as_ref().and_then(|m| m.tags.as_ref())),
                    },
                    messages: channel
                        .messages
                        .as_ref()
                        .map(|messages| messages.map(|slot| slot_schema(Some(slot))))
                        .unwrap_or_default(),
                }
            })
        })
        .unwrap_or_default();

    let events = raw
        .events
        .as_ref()
        .map(|events| {
            events.map(|event| EventDefinition {
                title: event.title.clone(),
                description: event.description.clone(),
                schema: schema_or_empty(event.schema.as_ref()),
            })
        })
        .unwrap_or_default();

    let states = raw
        .states
        .as_ref()
        .map(|states| {
            states.map(|state| StateDefinition {
                kind: state.kind.unwrap_or_default(),
                schema: schema_or_empty(state.schema.as_ref()),
            })
        })
        .unwrap_or_default();

    Definition {
        name: raw.name.clone(),
        version: raw.version.clone(),
        title: raw.title.clone(),
        description: raw.description.clone(),
        user: UserDefinition {
            tags: tag_set(user.and_then(|u| u.tags.as_ref())),
            creation: creation_rule(user.and_then(|u| u.creation.as_ref())),
        },
        configuration,
        actions,
        channels,
        events,
        states,
    }
}

fn slot_schema(slot: Option<&RawSchemaSlot>) -> SchemaNode {
    schema_or_empty(slot.and_then(|slot| slot.schema.as_ref()))
}

/// Section schemas describe objects: a missing schema, or a bare `{}`, is an
/// empty object rather than `unknown`.
fn schema_or_empty(schema: Option<&Value>) -> SchemaNode {
    match schema {
        None => SchemaNode::empty_object(),
        Some(value) => {
            let node = translate(value);
            let bare = value.as_object().is_some_and(|obj| obj.is_empty());
            if bare && node.kind == SchemaKind::Unknown {
                SchemaNode::empty_object()
            } else {
                node
            }
        }
    }
}

fn tag_set(tags: Option<&RawTags>) -> BTreeSet<String> {
    tags.map(|tags| tags.names().into_iter().map(str::to_owned).collect())
        .unwrap_or_default()
}

fn creation_rule(creation: Option<&RawCreation>) -> CreationRule {
    let Some(creation) = creation else {
        return CreationRule::default();
    };
    CreationRule {
        enabled: creation.enabled.unwrap_or(false),
        required_tags: creation
            .required_tags
            .iter()
            .flatten()
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> RawDefinition {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn absent_sections_become_empty() {
        let definition = normalize(&parse(json!({"name": "demo", "version": "1.0.0"})));

        assert!(definition.configuration.schema.is_empty_object());
        assert!(definition.actions.is_empty());
        assert!(definition.channels.is_empty());
        assert!(definition.events.is_empty());
        assert!(definition.states.is_empty());
        assert!(definition.user.tags.is_empty());
        assert!(!definition.user.creation.enabled);
        assert!(definition.user.creation.required_tags.is_empty());
    }

    #[test]
    fn bare_schema_slots_are_empty_objects() {
        let definition = normalize(&parse(json!({
            "name": "demo",
            "version": "1.0.0",
            "actions": {
                "ping": {
                    "input": {"schema": {}},
                    "output": {"schema": {
                        "type": "object",
                        "properties": {"message": {"type": "string"}},
                        "required": ["message"]
                    }}
                }
            }
        })));

        let ping = definition.actions.get("ping").unwrap();
        assert!(ping.input.is_empty_object());
        let message = ping.output.field("message").unwrap();
        assert_eq!(message.kind, SchemaKind::String);
        assert!(!message.optional);
    }

    #[test]
    fn nested_channel_defaults_are_uniform() {
        let definition = normalize(&parse(json!({
            "name": "demo",
            "version": "1.0.0",
            "channels": {
                "chat": {"messages": {"text": {}}},
                "mail": {"conversation": {"tags": {"thread": {"title": "Thread"}}}}
            }
        })));

        let chat = definition.channels.get("chat").unwrap();
        assert!(chat.message.tags.is_empty());
        assert!(chat.conversation.tags.is_empty());
        assert_eq!(chat.conversation.creation, CreationRule::default());
        assert!(chat.messages.get("text").unwrap().is_empty_object());

        let mail = definition.channels.get("mail").unwrap();
        assert!(mail.messages.is_empty());
        assert!(mail.conversation.tags.contains("thread"));
        assert_eq!(mail.conversation.creation, CreationRule::default());
    }

    #[test]
    fn tags_accept_lists_and_maps() {
        let definition = normalize(&parse(json!({
            "name": "demo",
            "version": "1.0.0",
            "user": {
                "tags": ["id", "email"],
                "creation": {"enabled": true, "requiredTags": ["id"]}
            }
        })));

        assert_eq!(
            definition.user.tags.iter().map(String::as_str).collect::<Vec<_>>(),
            ["email", "id"]
        );
        assert!(definition.user.creation.enabled);
        assert!(definition.user.creation.required_tags.contains("id"));
    }

    #[test]
    fn normalization_is_idempotent() {
        let raw = parse(json!({
            "name": "demo",
            "version": "1.0.0",
            "title": "Demo",
            "configuration": {"schema": {
                "type": "object",
                "properties": {"token": {"type": "string", "description": "API token"}},
                "required": ["token"]
            }},
            "actions": {
                "ping": {"input": {"schema": {}}, "output": {}},
                "search": {
                    "description": "Search things",
                    "input": {"schema": {"type": "object", "properties": {
                        "query": {"type": "string"},
                        "limit": {"type": "integer", "default": 10}
                    }, "required": ["query"]}}
                }
            },
            "channels": {
                "chat": {
                    "messages": {"text": {"schema": {"type": "object", "properties": {"text": {"type": "string"}}}}},
                    "message": {"tags": ["id"]},
                    "conversation": {"tags": {"thread": {}}, "creation": {"enabled": true, "requiredTags": ["thread"]}}
                }
            },
            "events": {"created": {"schema": {"type": "object", "properties": {"id": {"type": "string"}}}}},
            "states": {"session": {"type": "conversation", "schema": {"type": "object", "properties": {"step": {"type": "number", "nullable": true}}}}}
        }));

        let once = normalize(&raw);
        let twice = normalize(&RawDefinition::from(&once));
        assert_eq!(once, twice);

        let empty = normalize(&parse(json!({"name": "x", "version": "0.0.1"})));
        assert_eq!(normalize(&RawDefinition::from(&empty)), empty);
    }

    #[test]
    fn state_kind_defaults_to_integration() {
        let definition = normalize(&parse(json!({
            "name": "demo",
            "version": "1.0.0",
            "states": {"cursor": {"schema": {"type": "object", "properties": {}}}}
        })));
        assert_eq!(
            definition.states.get("cursor").unwrap().kind,
            crate::definition::StateKind::Integration
        );
    }
}
