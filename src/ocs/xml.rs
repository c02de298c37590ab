//! XML document tree and mapping normalization
//!
//! OCS endpoints answer with a small XML envelope. This module parses a
//! response body into an [`Element`] tree and converts subtrees into nested
//! [`XmlValue`] mappings for callers that want plain key/value access
//! instead of walking the tree themselves.

use indexmap::IndexMap;
use indexmap::map::Entry;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum XmlError {
    #[error("{0}")]
    Syntax(String),

    #[error("no root element found")]
    MissingRoot,
}

/// A single parsed XML element.
///
/// Children keep document order. Text is the concatenation of the element's
/// non-whitespace character data.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    name: String,
    attributes: IndexMap<String, String>,
    children: Vec<Element>,
    text: String,
}

impl Element {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    #[must_use]
    pub fn attributes(&self) -> &IndexMap<String, String> {
        &self.attributes
    }

    /// First child with the given tag name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Walk one path of nested tag names, e.g. `["meta", "status"]`.
    #[must_use]
    pub fn descendant(&self, path: &[&str]) -> Option<&Element> {
        let mut current = self;
        for name in path {
            current = current.child(name)?;
        }
        Some(current)
    }

    /// An element with no children and no text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.text.is_empty()
    }
}

/// One normalized value: leaf text, a mapping of child tag names, or an
/// ordered sequence of repeated siblings.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlValue {
    Text(String),
    Map(IndexMap<String, XmlValue>),
    List(Vec<XmlValue>),
}

impl XmlValue {
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_map(&self) -> Option<&IndexMap<String, XmlValue>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[XmlValue]> {
        match self {
            Self::List(values) => Some(values),
            _ => None,
        }
    }

    /// Mapping lookup; `None` on non-map values.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&XmlValue> {
        self.as_map().and_then(|map| map.get(key))
    }
}

/// Parse a whole XML document into its root element.
pub fn parse(input: &str) -> Result<Element, XmlError> {
    let mut reader = Reader::from_str(input);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|err| XmlError::Syntax(err.to_string()))?;

        match event {
            Event::Start(start) => {
                stack.push(element_from_start(&start)?);
            }
            Event::Empty(start) => {
                let element = element_from_start(&start)?;
                close_element(element, &mut stack, &mut root);
            }
            Event::End(_) => {
                // The reader rejects unbalanced tags, so the popped element
                // always matches the closing name.
                if let Some(element) = stack.pop() {
                    close_element(element, &mut stack, &mut root);
                }
            }
            Event::Text(text) => {
                let value = text
                    .unescape()
                    .map_err(|err| XmlError::Syntax(err.to_string()))?;
                append_text(&mut stack, &value);
            }
            Event::CData(data) => {
                append_text(&mut stack, &String::from_utf8_lossy(&data));
            }
            Event::Eof => break,
            // Declarations, comments and processing instructions carry no data.
            _ => {}
        }
    }

    root.ok_or(XmlError::MissingRoot)
}

/// Convert an element subtree into nested mappings.
///
/// Children are visited in document order. A tag occurring once maps to its
/// own normalized value; repeated sibling tags with the same name collapse
/// into an ordered [`XmlValue::List`] under that name, so no occurrence is
/// lost. Leaf elements normalize to their text content; no numeric or
/// boolean coercion happens here.
#[must_use]
pub fn normalize(element: &Element) -> XmlValue {
    if element.children.is_empty() {
        return XmlValue::Text(element.text.clone());
    }

    let mut map: IndexMap<String, XmlValue> = IndexMap::new();
    for child in &element.children {
        let value = normalize(child);
        match map.entry(child.name().to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(value);
            }
            Entry::Occupied(mut slot) => match slot.get_mut() {
                XmlValue::List(values) => values.push(value),
                existing => {
                    let first = std::mem::replace(existing, XmlValue::List(Vec::new()));
                    if let XmlValue::List(values) = existing {
                        values.push(first);
                        values.push(value);
                    }
                }
            },
        }
    }
    XmlValue::Map(map)
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Element, XmlError> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attributes = IndexMap::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|err| XmlError::Syntax(err.to_string()))?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute
            .unescape_value()
            .map_err(|err| XmlError::Syntax(err.to_string()))?
            .into_owned();
        attributes.insert(key, value);
    }
    Ok(Element {
        name,
        attributes,
        children: Vec::new(),
        text: String::new(),
    })
}

fn close_element(element: Element, stack: &mut Vec<Element>, root: &mut Option<Element>) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => {
            if root.is_none() {
                *root = Some(element);
            }
        }
    }
}

fn append_text(stack: &mut Vec<Element>, value: &str) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return;
    }
    if let Some(current) = stack.last_mut() {
        current.text.push_str(trimmed);
    }
}
