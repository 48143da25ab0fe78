//! # xml-payload
//!
//! Schema-less codec between hierarchical values and XML element-tree documents.
//!
//! A [`Value`] (strings, numbers, booleans, ordered lists and ordered maps, nested
//! to any depth) is written as a tree of named elements under a single synthetic
//! root. Every leaf carries its scalar as a base64 token, so any text survives the
//! trip regardless of markup-significant or control characters. Decoding needs no
//! schema: containers are recognised by having children, lists by repeated
//! sibling names.
//!
//! ## Quick start
//!
//! ```rust
//! use xml_payload::{decode, encode, Map, Value};
//!
//! let mut record = Map::new();
//! record.insert("name", "Alice");
//! record.insert("active", true);
//!
//! let encoded = encode(&Value::Map(record)).unwrap();
//! assert!(encoded.is_clean());
//! assert!(encoded.xml.contains("<name>QWxpY2U=</name>"));
//!
//! let back = decode(&encoded.xml).unwrap();
//! assert_eq!(back["name"].as_str(), Some("Alice"));
//! assert_eq!(back["active"].as_bool(), Some(true));
//! ```
//!
//! ## Modules
//!
//! - [`encoder`] — `Value` → XML document
//! - [`decoder`] — XML document → `Value` or `serde_json::Value`
//! - [`element`] — intermediate element tree and the XML parser that builds it
//! - [`key`] — element naming for map/list keys
//! - [`leaf`] — base64 leaf tokens
//! - [`value`] — the `Value` payload model
//! - [`error`] — error types for parse/encode failures

pub mod decoder;
pub mod element;
pub mod encoder;
pub mod error;
pub mod key;
pub mod leaf;
pub mod value;

pub use decoder::{
    decode, decode_properties, decode_to_json, from_document, DecodeOptions, Decoder, Flavor,
    Plain, Properties,
};
pub use element::Element;
pub use encoder::{encode, encode_json, EncodeOptions, Encoded, Encoder, NameFault};
pub use error::{CodecError, Result};
pub use value::{Map, Value, ValueKind};

/// Default name of the synthetic root element wrapping every payload.
pub const ROOT_ELEMENT: &str = "SPLASH";

/// Default nesting limit applied by both encoder and decoder.
pub const DEFAULT_MAX_DEPTH: usize = 256;
