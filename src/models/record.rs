// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Destination record model: typed page properties and query filters.

use std::collections::BTreeMap;

/// A single property value on a destination record.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Title(String),
    RichText(String),
    Select(Option<String>),
    Number(Option<f64>),
    Checkbox(bool),
    Date(Option<String>),
}

/// Property map of a destination record.
///
/// Reads go through one accessor per property kind. Each returns `None` when
/// the property is absent, holds a different kind, or is empty, so callers
/// never probe the structure themselves.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordProperties(BTreeMap<String, PropertyValue>);

impl RecordProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: PropertyValue) {
        self.0.insert(name.into(), value);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: PropertyValue) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Overwrite properties present in `patch`, keeping the rest.
    pub fn merge(&mut self, patch: RecordProperties) {
        self.0.extend(patch.0);
    }

    pub fn title(&self, name: &str) -> Option<&str> {
        match self.get(name) {
            Some(PropertyValue::Title(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn rich_text(&self, name: &str) -> Option<&str> {
        match self.get(name) {
            Some(PropertyValue::RichText(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Selected option name; an empty name counts as no selection.
    pub fn select(&self, name: &str) -> Option<&str> {
        match self.get(name) {
            Some(PropertyValue::Select(Some(s))) if !s.is_empty() => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        match self.get(name) {
            Some(PropertyValue::Number(n)) => *n,
            _ => None,
        }
    }

    pub fn checkbox(&self, name: &str) -> Option<bool> {
        match self.get(name) {
            Some(PropertyValue::Checkbox(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn date(&self, name: &str) -> Option<&str> {
        match self.get(name) {
            Some(PropertyValue::Date(Some(s))) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl FromIterator<(String, PropertyValue)> for RecordProperties {
    fn from_iter<I: IntoIterator<Item = (String, PropertyValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A page in the destination database.
#[derive(Debug, Clone, PartialEq)]
pub struct DestinationRecord {
    /// Store-assigned page ID
    pub id: String,
    pub properties: RecordProperties,
    /// External icon URL
    pub icon: Option<String>,
}

/// Equality filter over record properties.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordFilter {
    RichTextEquals { property: String, value: String },
    TitleEquals { property: String, value: String },
    SelectEquals { property: String, value: String },
    DateEquals { property: String, value: String },
    And(Vec<RecordFilter>),
}
