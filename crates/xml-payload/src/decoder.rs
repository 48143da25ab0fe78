//! Decoder — converts a payload document back into a hierarchical value.
//!
//! Decoding runs in two passes: the text is parsed into an [`Element`] tree,
//! then the tree is walked depth-first from the root's content. No type hints
//! exist in the document, so the walk is purely structural:
//!
//! - an element with children is a map of its children's names;
//! - an element without children is a leaf, its text a base64 token;
//! - a name repeated among siblings becomes a list of the decoded values, in
//!   document order. A name seen once is always a bare value.
//!
//! # Key design decisions
//!
//! - **One traversal, several containers**: the walk is generic over a
//!   [`Flavor`], which only decides how scalars, lists and maps are built.
//!   [`Plain`] produces [`Value`]; [`Properties`] produces `serde_json::Value`,
//!   which can be indexed by key, queried with `pointer()` paths or
//!   deserialized into typed structs.
//! - **Literal names**: element names are never un-prefixed, so a list encoded
//!   as `string-0`, `string-1` decodes to a map with those two keys.
//! - **Whole-document failure**: an invalid leaf token fails the entire decode.

use crate::element::Element;
use crate::error::{CodecError, Result};
use crate::leaf;
use crate::value::{Map, Value};
use crate::DEFAULT_MAX_DEPTH;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// Output container strategy for a decode.
pub trait Flavor {
    type Output;

    fn scalar(text: String) -> Self::Output;
    fn list(items: Vec<Self::Output>) -> Self::Output;
    fn map(entries: Vec<(String, Self::Output)>) -> Self::Output;
}

/// Decode into [`Value`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Plain;

impl Flavor for Plain {
    type Output = Value;

    fn scalar(text: String) -> Value {
        Value::String(text)
    }

    fn list(items: Vec<Value>) -> Value {
        Value::List(items)
    }

    fn map(entries: Vec<(String, Value)>) -> Value {
        // sibling names were already merged by `rebuild`
        Value::Map(Map::from_unique_entries(entries))
    }
}

/// Decode into property-accessible `serde_json::Value` objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct Properties;

impl Flavor for Properties {
    type Output = serde_json::Value;

    fn scalar(text: String) -> serde_json::Value {
        serde_json::Value::String(text)
    }

    fn list(items: Vec<serde_json::Value>) -> serde_json::Value {
        serde_json::Value::Array(items)
    }

    fn map(entries: Vec<(String, serde_json::Value)>) -> serde_json::Value {
        serde_json::Value::Object(entries.into_iter().collect())
    }
}

/// Decoder configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Deepest element nesting accepted, root included.
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl DecodeOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Decodes payload documents. Holds only configuration; every call parses
/// into its own tree.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    options: DecodeOptions,
}

impl Decoder {
    pub fn new(options: DecodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Decode a document into a [`Value`].
    pub fn decode(&self, xml: &str) -> Result<Value> {
        self.decode_as::<Plain>(xml)
    }

    /// Decode a document into a `serde_json::Value`.
    pub fn decode_properties(&self, xml: &str) -> Result<serde_json::Value> {
        self.decode_as::<Properties>(xml)
    }

    /// Decode a document with the given output flavor.
    ///
    /// The root element is unwrapped: the result is its content, not a map
    /// keyed by the root's name.
    pub fn decode_as<F: Flavor>(&self, xml: &str) -> Result<F::Output> {
        let root = Element::parse_with_limit(xml, self.options.max_depth)?;
        tracing::debug!(
            root = %root.name,
            flavor = std::any::type_name::<F>(),
            "decoding payload document"
        );
        self.rebuild::<F>(&root)
    }

    /// Rebuild a value from an already parsed element.
    pub fn rebuild<F: Flavor>(&self, element: &Element) -> Result<F::Output> {
        rebuild::<F>(element, 1, self.options.max_depth)
    }
}

/// Repetition state of one sibling name.
enum Slot<T> {
    Single(T),
    Repeated(Vec<T>),
}

impl<T> Slot<T> {
    fn push(&mut self, value: T) {
        match self {
            Slot::Repeated(items) => items.push(value),
            Slot::Single(_) => {
                if let Slot::Single(first) = std::mem::replace(self, Slot::Repeated(Vec::new())) {
                    *self = Slot::Repeated(vec![first, value]);
                }
            }
        }
    }

    fn finish<F: Flavor<Output = T>>(self) -> T {
        match self {
            Slot::Single(value) => value,
            Slot::Repeated(items) => F::list(items),
        }
    }
}

fn rebuild<F: Flavor>(element: &Element, depth: usize, max_depth: usize) -> Result<F::Output> {
    if depth > max_depth {
        return Err(CodecError::DepthExceeded { limit: max_depth });
    }
    if element.is_leaf() {
        let text = leaf::decode_named(&element.text, &element.name)?;
        return Ok(F::scalar(text));
    }

    let mut slots: Vec<(&str, Slot<F::Output>)> = Vec::with_capacity(element.children.len());
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for child in &element.children {
        let value = rebuild::<F>(child, depth + 1, max_depth)?;
        match seen.get(child.name.as_str()) {
            Some(&at) => slots[at].1.push(value),
            None => {
                seen.insert(child.name.as_str(), slots.len());
                slots.push((child.name.as_str(), Slot::Single(value)));
            }
        }
    }

    Ok(F::map(
        slots
            .into_iter()
            .map(|(name, slot)| (name.to_string(), slot.finish::<F>()))
            .collect(),
    ))
}

/// Decode a document into a [`Value`] with default options.
pub fn decode(xml: &str) -> Result<Value> {
    Decoder::default().decode(xml)
}

/// Decode a document into a `serde_json::Value` with default options.
pub fn decode_properties(xml: &str) -> Result<serde_json::Value> {
    Decoder::default().decode_properties(xml)
}

/// Decode a document into compact JSON text.
pub fn decode_to_json(xml: &str) -> Result<String> {
    let value = decode_properties(xml)?;
    Ok(serde_json::to_string(&value)?)
}

/// Decode a document straight into a typed structure.
///
/// Leaves are strings, so fields should be `String` (or deserialize from
/// strings); booleans arrive as `"1"` / `"0"`.
pub fn from_document<T: DeserializeOwned>(xml: &str) -> Result<T> {
    let value = decode_properties(xml)?;
    serde_json::from_value(value).map_err(CodecError::from)
}
