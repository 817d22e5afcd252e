//! Event-driven state machine that builds a [`ResourceDocument`].
//!
//! The state is fed one parse event at a time and knows nothing about where the
//! events come from, so it can be driven by the XML reader or directly by tests.

use crate::{
    error::Error,
    formats::{
        ITEM_ELEMENT, NAME_ATTRIBUTE, PLURALS_ELEMENT, QUANTITY_ATTRIBUTE, RESOURCES_ELEMENT,
        STRING_ARRAY_ELEMENT, STRING_ELEMENT, TRANSLATABLE_ATTRIBUTE,
    },
    types::{
        ArrayItem, PluralItem, PluralsElement, Quantity, Resource, ResourceDocument,
        StringArrayElement, StringElement,
    },
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Context {
    #[default]
    None,
    String,
    Plurals,
    StringArray,
}

/// Accumulator threaded through the parse events of one document.
#[derive(Debug, Default)]
pub struct ParserState {
    resources: Vec<Resource>,
    context: Context,
    name: Option<String>,
    translatable: bool,
    value: Option<String>,
    in_item: bool,
    plural_items: Vec<PluralItem>,
    array_items: Vec<ArrayItem>,
    comments: Vec<String>,
}

impl ParserState {
    pub fn new() -> Self {
        Self {
            translatable: true,
            ..Default::default()
        }
    }

    pub fn start_element(&mut self, tag: &str, attributes: &[(String, String)]) -> Result<(), Error> {
        match tag {
            STRING_ELEMENT => {
                self.context = Context::String;
                self.name = Some(required_name(tag, attributes)?);
                self.translatable = translatable(attributes);
                self.value = Some(String::new());
            }
            PLURALS_ELEMENT => {
                self.context = Context::Plurals;
                self.name = Some(required_name(tag, attributes)?);
                self.plural_items = Vec::new();
            }
            STRING_ARRAY_ELEMENT => {
                self.context = Context::StringArray;
                self.name = Some(required_name(tag, attributes)?);
                self.array_items = Vec::new();
            }
            ITEM_ELEMENT if self.context == Context::Plurals => {
                let quantity = attribute(attributes, QUANTITY_ATTRIBUTE).ok_or_else(|| {
                    Error::InvalidResource("plurals item missing 'quantity'".to_string())
                })?;
                let quantity: Quantity = quantity.parse()?;
                self.plural_items.push(PluralItem::new(quantity, ""));
                self.translatable = translatable(attributes);
                self.value = Some(String::new());
                self.in_item = true;
            }
            ITEM_ELEMENT if self.context == Context::StringArray => {
                self.translatable = translatable(attributes);
                self.value = Some(String::new());
                self.in_item = true;
            }
            RESOURCES_ELEMENT if self.context == Context::None => {}
            _ => self.append_markup(&open_tag(tag, attributes, false)),
        }
        Ok(())
    }

    pub fn end_element(&mut self, tag: &str) -> Result<(), Error> {
        match tag {
            STRING_ELEMENT if self.context == Context::String => {
                let element = StringElement {
                    name: self.take_name(tag)?,
                    value: self.value.take().unwrap_or_default(),
                    comments: std::mem::take(&mut self.comments),
                    translatable: self.translatable,
                };
                self.resources.push(element.into());
                self.reset();
            }
            PLURALS_ELEMENT if self.context == Context::Plurals => {
                let element = PluralsElement {
                    name: self.take_name(tag)?,
                    items: std::mem::take(&mut self.plural_items),
                    comments: std::mem::take(&mut self.comments),
                };
                self.resources.push(element.into());
                self.reset();
            }
            STRING_ARRAY_ELEMENT if self.context == Context::StringArray => {
                let element = StringArrayElement {
                    name: self.take_name(tag)?,
                    items: std::mem::take(&mut self.array_items),
                    comments: std::mem::take(&mut self.comments),
                };
                self.resources.push(element.into());
                self.reset();
            }
            ITEM_ELEMENT if self.in_item => {
                let value = self.value.take().unwrap_or_default();
                match self.context {
                    Context::Plurals => {
                        if let Some(last) = self.plural_items.last_mut() {
                            last.value = value;
                            last.translatable = self.translatable;
                        }
                    }
                    Context::StringArray => self.array_items.push(ArrayItem {
                        value,
                        translatable: self.translatable,
                    }),
                    Context::None | Context::String => {}
                }
                self.in_item = false;
                self.translatable = true;
            }
            RESOURCES_ELEMENT if self.context == Context::None => {}
            _ => self.append_markup(&format!("</{}>", tag)),
        }
        Ok(())
    }

    /// A self-closing element. Known elements open and close at once; anything
    /// else is kept as literal `<tag .../>` markup.
    pub fn empty_element(&mut self, tag: &str, attributes: &[(String, String)]) -> Result<(), Error> {
        match tag {
            STRING_ELEMENT | PLURALS_ELEMENT | STRING_ARRAY_ELEMENT | ITEM_ELEMENT | RESOURCES_ELEMENT
                if self.value.is_none() =>
            {
                self.start_element(tag, attributes)?;
                self.end_element(tag)
            }
            _ => {
                self.append_markup(&open_tag(tag, attributes, true));
                Ok(())
            }
        }
    }

    pub fn text(&mut self, text: &str) {
        if let Some(value) = self.value.as_mut() {
            value.push_str(text);
        }
    }

    /// CDATA keeps its wrapper so the value renders back the same way.
    pub fn cdata(&mut self, content: &str) {
        if let Some(value) = self.value.as_mut() {
            value.push_str("<![CDATA[");
            value.push_str(content);
            value.push_str("]]>");
        }
    }

    /// Queues a comment for the next resource that gets closed.
    pub fn comment(&mut self, text: &str) {
        self.comments.push(text.trim().to_string());
    }

    /// Returns the parsed document. Comments after the last resource are dropped.
    pub fn finish(self) -> ResourceDocument {
        ResourceDocument::new(self.resources)
    }

    fn append_markup(&mut self, markup: &str) {
        if let Some(value) = self.value.as_mut() {
            value.push_str(markup);
        }
    }

    fn take_name(&mut self, tag: &str) -> Result<String, Error> {
        self.name
            .take()
            .ok_or_else(|| Error::InvalidResource(format!("{} tag missing 'name'", tag)))
    }

    fn reset(&mut self) {
        self.context = Context::None;
        self.name = None;
        self.translatable = true;
        self.value = None;
        self.in_item = false;
    }
}

fn attribute<'a>(attributes: &'a [(String, String)], key: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

fn required_name(tag: &str, attributes: &[(String, String)]) -> Result<String, Error> {
    attribute(attributes, NAME_ATTRIBUTE)
        .map(str::to_string)
        .ok_or_else(|| Error::InvalidResource(format!("{} tag missing 'name'", tag)))
}

fn translatable(attributes: &[(String, String)]) -> bool {
    attribute(attributes, TRANSLATABLE_ATTRIBUTE).is_none_or(|v| v.eq_ignore_ascii_case("true"))
}

fn open_tag(tag: &str, attributes: &[(String, String)], self_closing: bool) -> String {
    let mut markup = format!("<{}", tag);
    for (key, value) in attributes {
        markup.push_str(&format!(" {}=\"{}\"", key, value));
    }
    markup.push_str(if self_closing { "/>" } else { ">" });
    markup
}
