//! Channel module generation.
//!
//! ```text
//! channels/index.ts                     Channels
//! channels/<channel>/index.ts           <Channel> = { messages; message; conversation }
//! channels/<channel>/messages/index.ts  Messages
//! channels/<channel>/messages/<msg>.ts  <Msg>
//! ```
//!
//! Message types live in their channel's directory, so two channels may both
//! declare a `text` message without their modules or aliases colliding.

use super::sources::{
    creation_schema, doc_text, tags_schema, ReExportSource, TypeAliasSource, INDEX_FILE, INDEX_STEM,
};
use super::ts_types::{to_pascal_case, FileStems};
use crate::definition::{ChannelDefinition, Entries};
use crate::diagnostic::Result;
use crate::module::{ModuleDef, ModuleGraphBuilder, ModuleTree};
use crate::schema::SchemaNode;

/// Import name of the channels module.
pub const SECTION: &str = "channels";

/// Generates the channels tree, one sub-directory per channel.
pub async fn create(channels: &Entries<ChannelDefinition>) -> Result<ModuleTree> {
    let mut builder = ModuleGraphBuilder::new();
    let root = builder.add(ModuleDef::new(INDEX_FILE, SECTION, "Channels", ReExportSource::new()));
    let mut dirs = FileStems::new();

    for (name, channel) in channels.iter() {
        let tree = create_channel(name, channel).await?;
        let id = builder.graft(tree);
        builder.unshift(id, dirs.claim(name))?;
        builder.push_dep(root, id)?;
    }

    Ok(ModuleTree::new(builder, root))
}

async fn create_channel(name: &str, channel: &ChannelDefinition) -> Result<ModuleTree> {
    let message = SchemaNode::object([("tags", tags_schema(&channel.message.tags))]);
    let conversation = SchemaNode::object([
        ("tags", tags_schema(&channel.conversation.tags)),
        ("creation", creation_schema(&channel.conversation.creation)),
    ]);

    let mut builder = ModuleGraphBuilder::new();
    let doc = doc_text(channel.title.as_deref(), channel.description.as_deref());
    let root = builder.add(ModuleDef::new(
        INDEX_FILE,
        name,
        to_pascal_case(name),
        ReExportSource::new()
            .with_doc(doc)
            .with_field("message", message)
            .with_field("conversation", conversation),
    ));

    let messages = builder.graft(create_messages(&channel.messages).await?);
    builder.unshift(messages, "messages")?;
    builder.push_dep(root, messages)?;

    Ok(ModuleTree::new(builder, root))
}

async fn create_messages(messages: &Entries<SchemaNode>) -> Result<ModuleTree> {
    let mut builder = ModuleGraphBuilder::new();
    let root = builder.add(ModuleDef::new(INDEX_FILE, "messages", "Messages", ReExportSource::new()));
    let mut files = FileStems::reserving(&[INDEX_STEM]);

    for (name, schema) in messages.iter() {
        let id = builder.add(ModuleDef::new(
            format!("{}.ts", files.claim(name)),
            name,
            to_pascal_case(name),
            TypeAliasSource::new(schema.clone()),
        ));
        builder.push_dep(root, id)?;
    }

    Ok(ModuleTree::new(builder, root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::{ConversationDefinition, CreationRule, MessageDefinition};
    use crate::schema::SchemaKind;

    fn text_channel() -> ChannelDefinition {
        ChannelDefinition {
            messages: [(
                "text",
                SchemaNode::object([("text", SchemaNode::new(SchemaKind::String))]),
            )]
            .into_iter()
            .collect(),
            ..ChannelDefinition::default()
        }
    }

    #[tokio::test]
    async fn lays_out_messages_per_channel() {
        let channels: Entries<ChannelDefinition> =
            [("chat", text_channel()), ("mail", text_channel())].into_iter().collect();
        let graph = create(&channels).await.unwrap().freeze().unwrap();

        for path in [
            "index.ts",
            "chat/index.ts",
            "chat/messages/index.ts",
            "chat/messages/text.ts",
            "mail/index.ts",
            "mail/messages/index.ts",
            "mail/messages/text.ts",
        ] {
            assert!(graph.find(path).is_some(), "missing {path}");
        }

        let messages = graph.content(graph.find("chat/messages/index.ts").unwrap());
        assert!(messages.contains("export type Messages = {\n  text: text.Text;\n};"));

        let text = graph.content(graph.find("mail/messages/text.ts").unwrap());
        assert!(text.contains("export type Text = {\n  text: string;\n};"));
    }

    #[tokio::test]
    async fn channel_type_carries_tags_and_creation() {
        let mut channel = text_channel();
        channel.message = MessageDefinition {
            tags: ["id".to_string()].into_iter().collect(),
        };
        channel.conversation = ConversationDefinition {
            tags: ["thread".to_string()].into_iter().collect(),
            creation: CreationRule {
                enabled: true,
                required_tags: ["thread".to_string()].into_iter().collect(),
            },
        };
        let channels: Entries<ChannelDefinition> = [("chat", channel)].into_iter().collect();
        let graph = create(&channels).await.unwrap().freeze().unwrap();

        let content = graph.content(graph.find("chat/index.ts").unwrap());
        assert!(content.contains("import * as messages from './messages/index';"));
        assert!(content.contains(
            "export type Chat = {\n  messages: messages.Messages;\n  message: {\n    tags: {\n      id: string;\n    };\n  };\n"
        ));
        assert!(content.contains(
            "  conversation: {\n    tags: {\n      thread: string;\n    };\n    creation: {\n      enabled: true;\n      requiredTags: \"thread\"[];\n    };\n  };\n};"
        ));
    }

    #[tokio::test]
    async fn channel_without_messages_still_has_messages_module() {
        let channels: Entries<ChannelDefinition> =
            [("events", ChannelDefinition::default())].into_iter().collect();
        let graph = create(&channels).await.unwrap().freeze().unwrap();

        let messages = graph.content(graph.find("events/messages/index.ts").unwrap());
        assert!(messages.contains("export type Messages = Record<string, never>;"));
    }
}
