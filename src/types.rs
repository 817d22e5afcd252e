//! Core types for strings-import.
//! The parser decodes into these; the serializer renders these.

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{error::Error, pattern::NamePattern};

/// One exported `strings.xml` file held in memory.
///
/// Resources are kept in source order; every operation returns a new document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResourceDocument {
    #[serde(default)]
    pub resources: Vec<Resource>,
}

impl ResourceDocument {
    pub fn new(resources: Vec<Resource>) -> Self {
        Self { resources }
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.name() == name)
    }

    /// All `<string>` resources, in document order.
    pub fn strings(&self) -> Vec<&StringElement> {
        self.resources
            .iter()
            .filter_map(|r| match r {
                Resource::String(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    /// All `<plurals>` resources, in document order.
    pub fn plurals(&self) -> Vec<&PluralsElement> {
        self.resources
            .iter()
            .filter_map(|r| match r {
                Resource::Plurals(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    /// All `<string-array>` resources, in document order.
    pub fn string_arrays(&self) -> Vec<&StringArrayElement> {
        self.resources
            .iter()
            .filter_map(|r| match r {
                Resource::StringArray(a) => Some(a),
                _ => None,
            })
            .collect()
    }

    /// Keeps the resources whose name fully matches `pattern`.
    pub fn filter(&self, pattern: &NamePattern) -> Self {
        Self::new(
            self.resources
                .iter()
                .filter(|r| pattern.matches(r.name()))
                .cloned()
                .collect(),
        )
    }

    /// Drops the resources whose name fully matches `pattern`.
    pub fn filter_not(&self, pattern: &NamePattern) -> Self {
        Self::new(
            self.resources
                .iter()
                .filter(|r| !pattern.matches(r.name()))
                .cloned()
                .collect(),
        )
    }

    pub fn map<F>(&self, f: F) -> Self
    where
        F: FnMut(&Resource) -> Resource,
    {
        Self::new(self.resources.iter().map(f).collect())
    }

    /// Like [`ResourceDocument::map`], dropping the resources mapped to `None`.
    pub fn filter_map<F>(&self, f: F) -> Self
    where
        F: FnMut(&Resource) -> Option<Resource>,
    {
        Self::new(self.resources.iter().filter_map(f).collect())
    }
}

impl FromIterator<Resource> for ResourceDocument {
    fn from_iter<I: IntoIterator<Item = Resource>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A single named translatable unit of a document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Resource {
    String(StringElement),
    Plurals(PluralsElement),
    StringArray(StringArrayElement),
}

impl Resource {
    pub fn name(&self) -> &str {
        match self {
            Resource::String(s) => &s.name,
            Resource::Plurals(p) => &p.name,
            Resource::StringArray(a) => &a.name,
        }
    }

    /// Comments rendered right before the element.
    pub fn comments(&self) -> &[String] {
        match self {
            Resource::String(s) => &s.comments,
            Resource::Plurals(p) => &p.comments,
            Resource::StringArray(a) => &a.comments,
        }
    }

    /// Returns a copy with the name replaced.
    pub fn update_name(&self, name: impl Into<String>) -> Self {
        let name = name.into();
        match self {
            Resource::String(s) => Resource::String(StringElement {
                name,
                ..s.clone()
            }),
            Resource::Plurals(p) => Resource::Plurals(PluralsElement {
                name,
                ..p.clone()
            }),
            Resource::StringArray(a) => Resource::StringArray(StringArrayElement {
                name,
                ..a.clone()
            }),
        }
    }

    /// Returns a copy with the translatable flag set on the string, or on every
    /// item of a plurals/string-array resource.
    pub fn update_translatable(&self, translatable: bool) -> Self {
        match self {
            Resource::String(s) => Resource::String(StringElement {
                translatable,
                ..s.clone()
            }),
            Resource::Plurals(p) => Resource::Plurals(PluralsElement {
                items: p
                    .items
                    .iter()
                    .map(|item| PluralItem {
                        translatable,
                        ..item.clone()
                    })
                    .collect(),
                ..p.clone()
            }),
            Resource::StringArray(a) => Resource::StringArray(StringArrayElement {
                items: a
                    .items
                    .iter()
                    .map(|item| ArrayItem {
                        translatable,
                        ..item.clone()
                    })
                    .collect(),
                ..a.clone()
            }),
        }
    }

    /// Returns a copy with `f` applied to the value, or to every item value.
    pub fn update_values<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&str) -> String,
    {
        match self {
            Resource::String(s) => Resource::String(StringElement {
                value: f(&s.value),
                ..s.clone()
            }),
            Resource::Plurals(p) => Resource::Plurals(PluralsElement {
                items: p
                    .items
                    .iter()
                    .map(|item| PluralItem {
                        value: f(&item.value),
                        ..item.clone()
                    })
                    .collect(),
                ..p.clone()
            }),
            Resource::StringArray(a) => Resource::StringArray(StringArrayElement {
                items: a
                    .items
                    .iter()
                    .map(|item| ArrayItem {
                        value: f(&item.value),
                        ..item.clone()
                    })
                    .collect(),
                ..a.clone()
            }),
        }
    }

    /// Returns a copy with the comment list replaced.
    pub fn update_comments(&self, comments: Vec<String>) -> Self {
        match self {
            Resource::String(s) => Resource::String(StringElement {
                comments,
                ..s.clone()
            }),
            Resource::Plurals(p) => Resource::Plurals(PluralsElement {
                comments,
                ..p.clone()
            }),
            Resource::StringArray(a) => Resource::StringArray(StringArrayElement {
                comments,
                ..a.clone()
            }),
        }
    }

    /// Returns a copy without comments.
    pub fn remove_comments(&self) -> Self {
        self.update_comments(Vec::new())
    }
}

impl From<StringElement> for Resource {
    fn from(value: StringElement) -> Self {
        Resource::String(value)
    }
}

impl From<PluralsElement> for Resource {
    fn from(value: PluralsElement) -> Self {
        Resource::Plurals(value)
    }
}

impl From<StringArrayElement> for Resource {
    fn from(value: StringArrayElement) -> Self {
        Resource::StringArray(value)
    }
}

/// `<string name="...">value</string>`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StringElement {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<String>,
    #[serde(default = "default_translatable")]
    pub translatable: bool,
}

impl StringElement {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            comments: Vec::new(),
            translatable: true,
        }
    }
}

/// `<plurals name="...">` with one `<item quantity="...">` per plural category.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PluralsElement {
    pub name: String,
    #[serde(default)]
    pub items: Vec<PluralItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<String>,
}

impl PluralsElement {
    pub fn new(name: impl Into<String>, items: Vec<PluralItem>) -> Self {
        Self {
            name: name.into(),
            items,
            comments: Vec::new(),
        }
    }

    pub fn item(&self, quantity: Quantity) -> Option<&PluralItem> {
        self.items.iter().find(|item| item.quantity == quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PluralItem {
    pub quantity: Quantity,
    pub value: String,
    #[serde(default = "default_translatable")]
    pub translatable: bool,
}

impl PluralItem {
    pub fn new(quantity: Quantity, value: impl Into<String>) -> Self {
        Self {
            quantity,
            value: value.into(),
            translatable: true,
        }
    }
}

/// `<string-array name="...">` holding plain `<item>` children.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StringArrayElement {
    pub name: String,
    #[serde(default)]
    pub items: Vec<ArrayItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<String>,
}

impl StringArrayElement {
    pub fn new(name: impl Into<String>, items: Vec<ArrayItem>) -> Self {
        Self {
            name: name.into(),
            items,
            comments: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArrayItem {
    pub value: String,
    #[serde(default = "default_translatable")]
    pub translatable: bool,
}

impl ArrayItem {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            translatable: true,
        }
    }
}

fn default_translatable() -> bool {
    true
}

/// Android plural quantities.
///
/// See <https://developer.android.com/guide/topics/resources/string-resource#Plurals>.
#[derive(Ord, PartialOrd, Eq, PartialEq, Debug, Clone, Copy, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl Quantity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Quantity::Zero => "zero",
            Quantity::One => "one",
            Quantity::Two => "two",
            Quantity::Few => "few",
            Quantity::Many => "many",
            Quantity::Other => "other",
        }
    }
}

impl FromStr for Quantity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "zero" => Ok(Quantity::Zero),
            "one" => Ok(Quantity::One),
            "two" => Ok(Quantity::Two),
            "few" => Ok(Quantity::Few),
            "many" => Ok(Quantity::Many),
            "other" => Ok(Quantity::Other),
            _ => Err(Error::InvalidQuantity(s.to_string())),
        }
    }
}

impl Display for Quantity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
