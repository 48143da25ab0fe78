//! Intermediate element tree built from a document before values are rebuilt.
//!
//! Parsing is done eagerly with `quick-xml` into owned [`Element`] nodes. Only
//! element names, nesting and text survive: attributes, namespaces, comments,
//! processing instructions and the declaration are dropped. Entity and
//! character references inside text are resolved.

use crate::error::{CodecError, Result};
use crate::DEFAULT_MAX_DEPTH;
use quick_xml::events::Event;
use quick_xml::Reader;

/// A named node of the document.
///
/// `text` is meaningful only when `children` is empty; containers may carry
/// formatting whitespace there, which decoding ignores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub children: Vec<Element>,
    pub text: String,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
            text: String::new(),
        }
    }

    pub fn leaf(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::new(name)
        }
    }

    pub fn with_children(name: impl Into<String>, children: Vec<Element>) -> Self {
        Self {
            children,
            ..Self::new(name)
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// First child with the given name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Parse a document into its root element, with the default depth limit.
    pub fn parse(xml: &str) -> Result<Element> {
        Self::parse_with_limit(xml, DEFAULT_MAX_DEPTH)
    }

    /// Parse a document into its root element.
    ///
    /// Fails on syntax errors, on anything but exactly one root element, on
    /// non-whitespace text outside the root, and when elements nest deeper than
    /// `max_depth`.
    pub fn parse_with_limit(xml: &str, max_depth: usize) -> Result<Element> {
        let mut reader = Reader::from_str(xml);
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let event = match reader.read_event() {
                Ok(event) => event,
                Err(e) => {
                    return Err(CodecError::Xml {
                        position: reader.error_position() as u64,
                        message: e.to_string(),
                    })
                }
            };

            match event {
                Event::Start(start) => {
                    let element = open(start.name().as_ref(), &stack, &root, max_depth)?;
                    stack.push(element);
                }
                Event::Empty(start) => {
                    let element = open(start.name().as_ref(), &stack, &root, max_depth)?;
                    close(element, &mut stack, &mut root);
                }
                Event::End(_) => {
                    // quick-xml has already matched the end name against the start
                    let element = stack.pop().ok_or_else(|| {
                        CodecError::Malformed("closing tag without an open element".into())
                    })?;
                    close(element, &mut stack, &mut root);
                }
                Event::Text(text) => {
                    let raw: &[u8] = &text;
                    append_text(&mut stack, utf8(raw)?)?;
                }
                Event::CData(cdata) => {
                    let raw: &[u8] = &cdata;
                    append_text(&mut stack, utf8(raw)?)?;
                }
                Event::GeneralRef(reference) => {
                    let name: &[u8] = &reference;
                    let resolved = resolve_reference(name).ok_or_else(|| {
                        CodecError::Malformed(format!(
                            "unknown entity reference &{};",
                            String::from_utf8_lossy(name)
                        ))
                    })?;
                    append_text(&mut stack, resolved.encode_utf8(&mut [0; 4]))?;
                }
                Event::Decl(_) | Event::PI(_) | Event::Comment(_) | Event::DocType(_) => {}
                Event::Eof => break,
            }
        }

        if let Some(unclosed) = stack.last() {
            return Err(CodecError::Malformed(format!(
                "unclosed element <{}>",
                unclosed.name
            )));
        }
        root.ok_or_else(|| CodecError::Malformed("document has no root element".into()))
    }
}

fn open(
    raw_name: &[u8],
    stack: &[Element],
    root: &Option<Element>,
    max_depth: usize,
) -> Result<Element> {
    if stack.is_empty() && root.is_some() {
        return Err(CodecError::Malformed(
            "more than one root element".into(),
        ));
    }
    if stack.len() >= max_depth {
        return Err(CodecError::DepthExceeded { limit: max_depth });
    }
    Ok(Element::new(utf8(raw_name)?))
}

fn close(element: Element, stack: &mut [Element], root: &mut Option<Element>) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => *root = Some(element),
    }
}

fn append_text(stack: &mut [Element], text: &str) -> Result<()> {
    match stack.last_mut() {
        Some(element) => {
            element.text.push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(CodecError::Malformed(
            "text outside the root element".into(),
        )),
    }
}

fn utf8(raw: &[u8]) -> Result<&str> {
    std::str::from_utf8(raw)
        .map_err(|e| CodecError::Malformed(format!("invalid UTF-8 in document: {e}")))
}

fn resolve_reference(name: &[u8]) -> Option<char> {
    match name {
        b"amp" => Some('&'),
        b"lt" => Some('<'),
        b"gt" => Some('>'),
        b"quot" => Some('"'),
        b"apos" => Some('\''),
        [b'#', b'x', hex @ ..] => {
            let code = u32::from_str_radix(std::str::from_utf8(hex).ok()?, 16).ok()?;
            char::from_u32(code)
        }
        [b'#', decimal @ ..] => {
            let code: u32 = std::str::from_utf8(decimal).ok()?.parse().ok()?;
            char::from_u32(code)
        }
        _ => None,
    }
}
