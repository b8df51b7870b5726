//! User-facing text.
//!
//! Handlers never build strings directly. They return a [`Response`]: a
//! message key plus positional arguments. [`Messages`] turns that into text
//! using a template table, so wording can be replaced without touching the
//! handlers.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Every message Stacks can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKey {
    NotAuthorized,
    Current,
    StackSet,
    NotExist,
    HelpText1,
    HelpText2,
    ItemList,
    CatStack,
    Invalid,
    Found,
    Imported,
    Exported,
    ImportFail,
    None,
    InvalidC,
    TooLarge,
}

impl MessageKey {
    pub const ALL: [MessageKey; 16] = [
        MessageKey::NotAuthorized,
        MessageKey::Current,
        MessageKey::StackSet,
        MessageKey::NotExist,
        MessageKey::HelpText1,
        MessageKey::HelpText2,
        MessageKey::ItemList,
        MessageKey::CatStack,
        MessageKey::Invalid,
        MessageKey::Found,
        MessageKey::Imported,
        MessageKey::Exported,
        MessageKey::ImportFail,
        MessageKey::None,
        MessageKey::InvalidC,
        MessageKey::TooLarge,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            MessageKey::NotAuthorized => "notauthorized",
            MessageKey::Current => "current",
            MessageKey::StackSet => "stackset",
            MessageKey::NotExist => "notexist",
            MessageKey::HelpText1 => "helptext1",
            MessageKey::HelpText2 => "helptext2",
            MessageKey::ItemList => "itemlist",
            MessageKey::CatStack => "catstack",
            MessageKey::Invalid => "invalid",
            MessageKey::Found => "found",
            MessageKey::Imported => "imported",
            MessageKey::Exported => "exported",
            MessageKey::ImportFail => "importfail",
            MessageKey::None => "none",
            MessageKey::InvalidC => "invalidc",
            MessageKey::TooLarge => "toolarge",
        }
    }

    /// Number of positional arguments the template expects.
    pub const fn arity(self) -> usize {
        match self {
            MessageKey::NotAuthorized
            | MessageKey::HelpText1
            | MessageKey::ImportFail
            | MessageKey::None => 0,
            MessageKey::NotExist
            | MessageKey::HelpText2
            | MessageKey::Invalid
            | MessageKey::Imported
            | MessageKey::Exported
            | MessageKey::InvalidC => 1,
            MessageKey::Current
            | MessageKey::StackSet
            | MessageKey::ItemList
            | MessageKey::CatStack
            | MessageKey::Found
            | MessageKey::TooLarge => 2,
        }
    }

    /// Built-in English template.
    pub const fn default_template(self) -> &'static str {
        match self {
            MessageKey::NotAuthorized => "You don't have permission to use this command.",
            MessageKey::Current => "Current stack size for {0} is {1}",
            MessageKey::StackSet => "Stack size for {0} is now {1}",
            MessageKey::NotExist => "Item {0} does not exist.",
            MessageKey::HelpText1 => "Type /stack itemname OR hold an entity and type /stack.",
            MessageKey::HelpText2 => {
                "Categories:\n{0}Type /stcat CATEGORY to list items in that category."
            }
            MessageKey::ItemList => {
                "Items in {0}:\n{1}\n  To set the stack size for all items in this category, add the value to the end of this command, e.g. /stcat traps 10\n  THIS IS NOT REVERSIBLE!"
            }
            MessageKey::CatStack => "The stack size for each item in category {0} was set to {1}.",
            MessageKey::Invalid => "Invalid item {0} selected.",
            MessageKey::Found => "Found {0} matching item(s)\n{1}",
            MessageKey::Imported => "Imported {0} item(s)",
            MessageKey::Exported => "Exported {0} item(s)",
            MessageKey::ImportFail => "Import failed :(",
            MessageKey::None => "None",
            MessageKey::InvalidC => "Invalid category: {0}.",
            MessageKey::TooLarge => "Stack size {0} is above the maximum of {1}.",
        }
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MessageKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// A keyed response with positional arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub key: MessageKey,
    pub args: Vec<String>,
}

impl Response {
    pub fn new(key: MessageKey) -> Self {
        Self {
            key,
            args: Vec::new(),
        }
    }

    /// Append a positional argument.
    pub fn arg(mut self, value: impl fmt::Display) -> Self {
        self.args.push(value.to_string());
        self
    }
}

/// Template table keyed by [`MessageKey`].
#[derive(Debug, Clone)]
pub struct Messages {
    templates: BTreeMap<MessageKey, String>,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            templates: MessageKey::ALL
                .into_iter()
                .map(|key| (key, key.default_template().to_string()))
                .collect(),
        }
    }
}

impl Messages {
    /// Built-in English templates overlaid with a JSON language file
    /// (`{ "<key>": "<template>" }`). Unknown keys are ignored.
    pub fn with_overrides_json(json: &str) -> Result<Self, serde_json::Error> {
        let overrides: BTreeMap<String, String> = serde_json::from_str(json)?;
        let mut messages = Self::default();
        for (name, template) in overrides {
            match name.parse::<MessageKey>() {
                Ok(key) => {
                    messages.templates.insert(key, template);
                }
                Err(_) => tracing::warn!(key = %name, "ignoring unknown message key"),
            }
        }
        Ok(messages)
    }

    pub fn template(&self, key: MessageKey) -> &str {
        self.templates
            .get(&key)
            .map(String::as_str)
            .unwrap_or_else(|| key.default_template())
    }

    /// Render a response.
    pub fn render(&self, response: &Response) -> String {
        format_template(self.template(response.key), &response.args)
    }
}

/// Substitute `{0}`, `{1}`, … with positional arguments.
///
/// Placeholders past the end of `args` render as empty. Anything else in
/// braces is copied through.
pub fn format_template(template: &str, args: &[String]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let placeholder = after
            .find('}')
            .map(|close| (&after[..close], close))
            .filter(|(digits, _)| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()));

        match placeholder {
            Some((digits, close)) => {
                if let Some(value) = digits.parse::<usize>().ok().and_then(|i| args.get(i)) {
                    out.push_str(value);
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
