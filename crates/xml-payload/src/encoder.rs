//! Encoder — converts a hierarchical value into a payload document.
//!
//! The value is written depth-first as the single child entry of a synthetic
//! root element:
//!
//! - **Maps**: one element per entry, named after the key, children inside
//! - **Lists**: one element per item, named after the item's index
//! - **Scalars**: a leaf element whose text is the base64 token of the scalar
//!   (booleans normalized to `1` / `0`)
//! - **Numeric keys**: prefixed with the value's kind (`string-0`, `object-3`)
//!   so every name is a legal XML name
//!
//! # Example
//! ```
//! use xml_payload::{encode, Map, Value};
//! let record: Map = [("flag", Value::from(true))].into_iter().collect();
//! let encoded = encode(&Value::Map(record)).unwrap();
//! assert!(encoded.xml.contains("<flag>MQ==</flag>"));
//! ```

use crate::error::{CodecError, Result};
use crate::key;
use crate::leaf;
use crate::value::{Value, ValueKind};
use crate::{DEFAULT_MAX_DEPTH, ROOT_ELEMENT};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::fmt;

/// Encoder configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Name of the synthetic root element.
    pub root: String,
    /// Spaces per nesting level; 0 writes everything on one line.
    pub indent: usize,
    /// Fail on illegal element names instead of recording a [`NameFault`].
    pub strict_names: bool,
    /// Deepest value nesting accepted, root entry included.
    pub max_depth: usize,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            root: ROOT_ELEMENT.to_string(),
            indent: 2,
            strict_names: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl EncodeOptions {
    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = root.into();
        self
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_strict_names(mut self, strict_names: bool) -> Self {
        self.strict_names = strict_names;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// An element name that is not a legal XML name but was written anyway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameFault {
    pub name: String,
    pub kind: ValueKind,
}

impl fmt::Display for NameFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid element name {:?} for {} value", self.name, self.kind)
    }
}

/// Result of a successful encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    pub xml: String,
    pub faults: Vec<NameFault>,
    /// Elements written, root included.
    pub elements: usize,
}

impl Encoded {
    /// First name fault, if any element name was rejected.
    pub fn fault(&self) -> Option<&NameFault> {
        self.faults.first()
    }

    pub fn is_clean(&self) -> bool {
        self.faults.is_empty()
    }

    pub fn into_string(self) -> String {
        self.xml
    }
}

/// Encodes values into payload documents. Holds only configuration; every
/// call builds and drops its own writer.
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    options: EncodeOptions,
}

impl Encoder {
    pub fn new(options: EncodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EncodeOptions {
        &self.options
    }

    /// Encode `value` under the root element.
    ///
    /// Illegal element names do not stop the encode unless `strict_names` is
    /// set; check [`Encoded::faults`] afterwards.
    pub fn encode(&self, value: &Value) -> Result<Encoded> {
        let writer = if self.options.indent == 0 {
            Writer::new(Vec::new())
        } else {
            Writer::new_with_indent(Vec::new(), b' ', self.options.indent)
        };
        let mut pass = Pass {
            writer,
            options: &self.options,
            faults: Vec::new(),
            elements: 0,
        };

        pass.write(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        pass.entry(&self.options.root, value, 1)?;

        let Pass {
            writer,
            faults,
            elements,
            ..
        } = pass;
        let xml = String::from_utf8(writer.into_inner())
            .map_err(|e| CodecError::Write(e.to_string()))?;
        tracing::debug!(
            bytes = xml.len(),
            elements,
            faults = faults.len(),
            "encoded payload document"
        );
        Ok(Encoded {
            xml,
            faults,
            elements,
        })
    }
}

/// State of a single encode call.
struct Pass<'o> {
    writer: Writer<Vec<u8>>,
    options: &'o EncodeOptions,
    faults: Vec<NameFault>,
    elements: usize,
}

impl Pass<'_> {
    fn entry(&mut self, key: &str, value: &Value, depth: usize) -> Result<()> {
        if depth > self.options.max_depth {
            return Err(CodecError::DepthExceeded {
                limit: self.options.max_depth,
            });
        }

        let kind = value.kind();
        let name = key::encode_key(key, kind);
        self.check_name(&name, kind)?;
        self.elements += 1;

        match value {
            Value::Map(map) => {
                self.write(Event::Start(BytesStart::new(&*name)))?;
                for (child_key, child) in map.iter() {
                    self.entry(child_key, child, depth + 1)?;
                }
                self.write(Event::End(BytesEnd::new(&*name)))
            }
            Value::List(items) => {
                self.write(Event::Start(BytesStart::new(&*name)))?;
                for (index, child) in items.iter().enumerate() {
                    self.entry(&index.to_string(), child, depth + 1)?;
                }
                self.write(Event::End(BytesEnd::new(&*name)))
            }
            scalar => {
                let token = leaf::encode_leaf(&scalar.scalar_text().unwrap_or_default());
                self.write(Event::Start(BytesStart::new(&*name)))?;
                self.write(Event::Text(BytesText::new(&token)))?;
                self.write(Event::End(BytesEnd::new(&*name)))
            }
        }
    }

    fn check_name(&mut self, name: &str, kind: ValueKind) -> Result<()> {
        if key::is_valid_name(name) {
            return Ok(());
        }
        if self.options.strict_names {
            return Err(CodecError::InvalidName {
                name: name.to_string(),
            });
        }
        tracing::warn!(name, %kind, "writing invalid element name");
        self.faults.push(NameFault {
            name: name.to_string(),
            kind,
        });
        Ok(())
    }

    fn write(&mut self, event: Event<'_>) -> Result<()> {
        self.writer
            .write_event(event)
            .map_err(|e| CodecError::Write(e.to_string()))
    }
}

/// Encode a value with default options.
pub fn encode(value: &Value) -> Result<Encoded> {
    Encoder::default().encode(value)
}

/// Parse JSON text and encode it with default options.
pub fn encode_json(json: &str) -> Result<Encoded> {
    let parsed: serde_json::Value = serde_json::from_str(json)?;
    encode(&Value::from(parsed))
}
