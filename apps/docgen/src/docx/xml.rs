//! Lossless XML event tree.
//!
//! Every element keeps the raw start tag it was parsed from, and text keeps its
//! escaped bytes, so a subtree nobody touched serialises to exactly the bytes it
//! was read from. Only the parts of the tree we mutate are re-encoded.

use std::borrow::Cow;

use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::name::QName;
use quick_xml::{Reader, Writer};

use super::DocxError;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// A node of the tree. Anything that is not an element or text (declarations,
/// comments, processing instructions, CDATA) is carried through verbatim.
#[derive(Debug, Clone)]
pub enum XmlNode {
    Element(XmlElement),
    Text(BytesText<'static>),
    Other(Event<'static>),
}

#[derive(Debug, Clone)]
pub struct XmlElement {
    start: BytesStart<'static>,
    pub children: Vec<XmlNode>,
    /// Parsed as `<x/>`. Kept so an untouched empty element is not rewritten as `<x></x>`.
    self_closing: bool,
}

impl XmlElement {
    pub fn new(name: &str) -> Self {
        Self {
            start: BytesStart::new(name.to_string()),
            children: Vec::new(),
            self_closing: true,
        }
    }

    /// Qualified name as written in the source (`w:p`, `pic:cNvPr`, ...).
    pub fn name(&self) -> &[u8] {
        self.start.name().into_inner()
    }

    pub fn is(&self, qname: &str) -> bool {
        self.name() == qname.as_bytes()
    }

    /// Unescaped attribute value. Malformed attributes read as absent.
    pub fn attr(&self, key: &str) -> Option<String> {
        let attr = self.start.try_get_attribute(key).ok()??;
        match attr.unescape_value() {
            Ok(value) => Some(value.into_owned()),
            Err(_) => Some(String::from_utf8_lossy(&attr.value).into_owned()),
        }
    }

    /// Sets (or replaces) one attribute, keeping every other attribute's raw bytes
    /// and relative order.
    pub fn set_attr(&mut self, key: &str, value: &str) {
        let retained: Vec<(Vec<u8>, Vec<u8>)> = self
            .start
            .attributes()
            .with_checks(false)
            .filter_map(Result::ok)
            .filter(|a| a.key.as_ref() != key.as_bytes())
            .map(|a| (a.key.as_ref().to_vec(), a.value.into_owned()))
            .collect();

        self.start.clear_attributes();
        for (k, v) in &retained {
            self.start.push_attribute(Attribute {
                key: QName(k),
                value: Cow::Borrowed(v.as_slice()),
            });
        }
        self.start.push_attribute((key, value));
    }

    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.set_attr(key, value);
        self
    }

    pub fn push(&mut self, node: XmlNode) {
        self.children.push(node);
    }

    /// Child elements, skipping text and other nodes.
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|n| match n {
            XmlNode::Element(e) => Some(e),
            _ => None,
        })
    }

    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut XmlElement> {
        self.children.iter_mut().filter_map(|n| match n {
            XmlNode::Element(e) => Some(e),
            _ => None,
        })
    }

    pub fn child(&self, qname: &str) -> Option<&XmlElement> {
        self.elements().find(|e| e.is(qname))
    }

    /// First descendant (depth-first, document order) with the given name.
    pub fn find(&self, qname: &str) -> Option<&XmlElement> {
        for child in self.elements() {
            if child.is(qname) {
                return Some(child);
            }
            if let Some(found) = child.find(qname) {
                return Some(found);
            }
        }
        None
    }

    pub fn find_mut(&mut self, qname: &str) -> Option<&mut XmlElement> {
        for node in self.children.iter_mut() {
            if let XmlNode::Element(child) = node {
                if child.is(qname) {
                    return Some(child);
                }
                if let Some(found) = child.find_mut(qname) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// All descendants with the given name, in document order.
    pub fn find_all<'a>(&'a self, qname: &str, out: &mut Vec<&'a XmlElement>) {
        for child in self.elements() {
            if child.is(qname) {
                out.push(child);
            }
            child.find_all(qname, out);
        }
    }

    /// Concatenated, unescaped text of the direct text children.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for node in &self.children {
            if let XmlNode::Text(t) = node {
                match t.unescape() {
                    Ok(s) => out.push_str(&s),
                    Err(_) => out.push_str(&String::from_utf8_lossy(t)),
                }
            }
        }
        out
    }

    /// Replaces all children with a single text node. Characters XML 1.0 cannot
    /// represent are dropped.
    pub fn set_text(&mut self, text: &str) {
        self.children.clear();
        let text: Cow<'_, str> = if text.chars().all(is_xml_char) {
            Cow::Borrowed(text)
        } else {
            Cow::Owned(text.chars().filter(|&c| is_xml_char(c)).collect())
        };
        if !text.is_empty() {
            self.children
                .push(XmlNode::Text(BytesText::new(&text).into_owned()));
        }
    }
}

/// The XML 1.0 `Char` production. Surrogates cannot occur in a `char`.
pub fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r') || (c >= ' ' && c != '\u{FFFE}' && c != '\u{FFFF}')
}

/// A parsed XML part: prolog/epilog nodes plus exactly one root element.
#[derive(Debug, Clone)]
pub struct XmlTree {
    pub nodes: Vec<XmlNode>,
    bom: bool,
}

impl XmlTree {
    pub fn parse(bytes: &[u8]) -> Result<Self, DocxError> {
        let (bom, body) = match bytes.strip_prefix(UTF8_BOM) {
            Some(rest) => (true, rest),
            None => (false, bytes),
        };
        let nodes = parse_nodes(body)?;
        let tree = Self { nodes, bom };
        if tree.root().is_none() {
            return Err(DocxError::Malformed("XML part has no root element".into()));
        }
        Ok(tree)
    }

    pub fn root(&self) -> Option<&XmlElement> {
        self.nodes.iter().find_map(|n| match n {
            XmlNode::Element(e) => Some(e),
            _ => None,
        })
    }

    pub fn root_mut(&mut self) -> Option<&mut XmlElement> {
        self.nodes.iter_mut().find_map(|n| match n {
            XmlNode::Element(e) => Some(e),
            _ => None,
        })
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, DocxError> {
        let mut out = Vec::new();
        if self.bom {
            out.extend_from_slice(UTF8_BOM);
        }
        out.extend(write_nodes(&self.nodes)?);
        Ok(out)
    }
}

/// Parses a standalone fragment (no prolog) into nodes. Used to build new markup
/// from a string template.
pub fn parse_fragment(xml: &str) -> Result<Vec<XmlNode>, DocxError> {
    parse_nodes(xml.as_bytes())
}

/// Serialises one element and its subtree.
pub fn element_to_bytes(element: &XmlElement) -> Result<Vec<u8>, DocxError> {
    let mut writer = Writer::new(Vec::new());
    write_element(&mut writer, element)?;
    Ok(writer.into_inner())
}

fn parse_nodes(bytes: &[u8]) -> Result<Vec<XmlNode>, DocxError> {
    let mut reader = Reader::from_reader(bytes);
    let mut open: Vec<XmlElement> = Vec::new();
    let mut roots: Vec<XmlNode> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => open.push(XmlElement {
                start: e.into_owned(),
                children: Vec::new(),
                self_closing: false,
            }),
            Event::Empty(e) => attach(
                &mut open,
                &mut roots,
                XmlNode::Element(XmlElement {
                    start: e.into_owned(),
                    children: Vec::new(),
                    self_closing: true,
                }),
            ),
            Event::End(_) => {
                let element = open.pop().ok_or_else(|| {
                    DocxError::Malformed(format!(
                        "unbalanced end tag at byte {}",
                        reader.buffer_position()
                    ))
                })?;
                attach(&mut open, &mut roots, XmlNode::Element(element));
            }
            Event::Text(t) => attach(&mut open, &mut roots, XmlNode::Text(t.into_owned())),
            Event::Eof => break,
            other => attach(&mut open, &mut roots, XmlNode::Other(other.into_owned())),
        }
    }

    if let Some(unclosed) = open.last() {
        return Err(DocxError::Malformed(format!(
            "element <{}> is never closed",
            String::from_utf8_lossy(unclosed.name())
        )));
    }
    Ok(roots)
}

fn attach(open: &mut [XmlElement], roots: &mut Vec<XmlNode>, node: XmlNode) {
    match open.last_mut() {
        Some(parent) => parent.children.push(node),
        None => roots.push(node),
    }
}

fn write_nodes(nodes: &[XmlNode]) -> Result<Vec<u8>, DocxError> {
    let mut writer = Writer::new(Vec::new());
    for node in nodes {
        write_node(&mut writer, node)?;
    }
    Ok(writer.into_inner())
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &XmlNode) -> Result<(), DocxError> {
    match node {
        XmlNode::Element(e) => write_element(writer, e)?,
        XmlNode::Text(t) => writer.write_event(Event::Text(t.clone()))?,
        XmlNode::Other(event) => writer.write_event(event)?,
    }
    Ok(())
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &XmlElement) -> Result<(), DocxError> {
    if element.self_closing && element.children.is_empty() {
        writer.write_event(Event::Empty(element.start.borrow()))?;
        return Ok(());
    }
    writer.write_event(Event::Start(element.start.borrow()))?;
    for child in &element.children {
        write_node(writer, child)?;
    }
    writer.write_event(Event::End(element.start.to_end()))?;
    Ok(())
}
