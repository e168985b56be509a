// Content items: the typed form of Notion blocks.
//
// Every item serializes to the block object Notion expects:
// `{"object": "block", "type": <kind>, <kind>: { ... }}`. Only the kinds the
// dashboard uses are modeled.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// One block of document content. Position in the surrounding sequence is
/// its identity until Notion assigns an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentItem {
    Paragraph { text: String },
    /// Levels below 1 render as `heading_1`, above 3 as `heading_3`.
    Heading { level: u8, text: String },
    ToDo { text: String, checked: bool },
    Toggle { text: String, children: Vec<ContentItem> },
    BulletedListItem { text: String },
    NumberedListItem { text: String },
    Divider,
}

impl ContentItem {
    /// Notion block type name, also used as the payload key.
    pub fn kind(&self) -> &'static str {
        match self {
            ContentItem::Paragraph { .. } => "paragraph",
            ContentItem::Heading { level: 0 | 1, .. } => "heading_1",
            ContentItem::Heading { level: 2, .. } => "heading_2",
            ContentItem::Heading { .. } => "heading_3",
            ContentItem::ToDo { .. } => "to_do",
            ContentItem::Toggle { .. } => "toggle",
            ContentItem::BulletedListItem { .. } => "bulleted_list_item",
            ContentItem::NumberedListItem { .. } => "numbered_list_item",
            ContentItem::Divider => "divider",
        }
    }

    /// Plain text of the item, if it carries any.
    pub fn text(&self) -> Option<&str> {
        match self {
            ContentItem::Paragraph { text }
            | ContentItem::Heading { text, .. }
            | ContentItem::ToDo { text, .. }
            | ContentItem::Toggle { text, .. }
            | ContentItem::BulletedListItem { text }
            | ContentItem::NumberedListItem { text } => Some(text),
            ContentItem::Divider => None,
        }
    }

    /// Nested items; empty for everything but toggles.
    pub fn children(&self) -> &[ContentItem] {
        match self {
            ContentItem::Toggle { children, .. } => children,
            _ => &[],
        }
    }
}

pub fn paragraph(text: impl Into<String>) -> ContentItem {
    ContentItem::Paragraph { text: text.into() }
}

/// Heading of level 1, 2 or 3. Other levels are clamped into that range.
pub fn heading(level: u8, text: impl Into<String>) -> ContentItem {
    ContentItem::Heading {
        level: level.clamp(1, 3),
        text: text.into(),
    }
}

/// Unchecked to-do entry.
pub fn todo(text: impl Into<String>) -> ContentItem {
    ContentItem::ToDo {
        text: text.into(),
        checked: false,
    }
}

pub fn toggle(text: impl Into<String>, children: Vec<ContentItem>) -> ContentItem {
    ContentItem::Toggle {
        text: text.into(),
        children,
    }
}

/// One bulleted item per entry, in order.
pub fn bulleted_list<S: AsRef<str>>(entries: &[S]) -> Vec<ContentItem> {
    entries
        .iter()
        .map(|e| ContentItem::BulletedListItem {
            text: e.as_ref().to_string(),
        })
        .collect()
}

/// One numbered item per entry, in order.
pub fn numbered_list<S: AsRef<str>>(entries: &[S]) -> Vec<ContentItem> {
    entries
        .iter()
        .map(|e| ContentItem::NumberedListItem {
            text: e.as_ref().to_string(),
        })
        .collect()
}

pub fn divider() -> ContentItem {
    ContentItem::Divider
}

// --- Wire shapes -----------------------------------------------------------

#[derive(Serialize)]
struct TextContent<'a> {
    content: &'a str,
}

#[derive(Serialize)]
struct RichText<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    text: TextContent<'a>,
}

fn rich_text(content: &str) -> [RichText<'_>; 1] {
    [RichText {
        kind: "text",
        text: TextContent { content },
    }]
}

#[derive(Serialize)]
struct TextBody<'a> {
    rich_text: [RichText<'a>; 1],
}

#[derive(Serialize)]
struct ToDoBody<'a> {
    rich_text: [RichText<'a>; 1],
    checked: bool,
}

#[derive(Serialize)]
struct ToggleBody<'a> {
    rich_text: [RichText<'a>; 1],
    #[serde(skip_serializing_if = "no_children")]
    children: &'a [ContentItem],
}

fn no_children(children: &&[ContentItem]) -> bool {
    children.is_empty()
}

#[derive(Serialize)]
struct EmptyBody {}

impl Serialize for ContentItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let kind = self.kind();
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("object", "block")?;
        map.serialize_entry("type", kind)?;
        match self {
            ContentItem::Paragraph { text }
            | ContentItem::Heading { text, .. }
            | ContentItem::BulletedListItem { text }
            | ContentItem::NumberedListItem { text } => {
                map.serialize_entry(kind, &TextBody { rich_text: rich_text(text) })?;
            }
            ContentItem::ToDo { text, checked } => {
                map.serialize_entry(
                    kind,
                    &ToDoBody {
                        rich_text: rich_text(text),
                        checked: *checked,
                    },
                )?;
            }
            ContentItem::Toggle { text, children } => {
                map.serialize_entry(
                    kind,
                    &ToggleBody {
                        rich_text: rich_text(text),
                        children,
                    },
                )?;
            }
            ContentItem::Divider => {
                map.serialize_entry(kind, &EmptyBody {})?;
            }
        }
        map.end()
    }
}
