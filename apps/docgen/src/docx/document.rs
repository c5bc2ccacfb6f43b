//! The in-memory WordprocessingML document: main part, its relationships, the
//! content types table and every other package entry as opaque bytes.

use chrono::{DateTime, SecondsFormat, Utc};

use super::drawing::{GraphicObject, W_DRAWING};
use super::package::{rels_part_for, resolve_target, Package};
use super::relationships::{ContentTypes, Relationships, REL_IMAGE, REL_OFFICE_DOCUMENT};
use super::xml::{XmlElement, XmlNode, XmlTree};
use super::DocxError;

pub const W_BODY: &str = "w:body";
pub const W_P: &str = "w:p";
pub const W_R: &str = "w:r";
pub const W_T: &str = "w:t";
pub const W_BR: &str = "w:br";

const DEFAULT_MAIN_PART: &str = "word/document.xml";
const DEFAULT_CORE_PART: &str = "docProps/core.xml";
const REL_CORE_PROPERTIES: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";

pub struct Document {
    package: Package,
    main_part: String,
    main: XmlTree,
    rels: Relationships,
    rels_dirty: bool,
    content_types: Option<ContentTypes>,
    content_types_dirty: bool,
}

impl Document {
    /// Opens a copy of `bytes`; the caller's buffer is never written to.
    pub fn open(bytes: &[u8]) -> Result<Self, DocxError> {
        let package = Package::from_bytes(bytes)?;

        let main_part = match package.part(&rels_part_for("")) {
            Some(root_rels) => Relationships::parse(root_rels)?
                .first_of_type(REL_OFFICE_DOCUMENT)
                .map(|r| resolve_target("", &r.target))
                .unwrap_or_else(|| DEFAULT_MAIN_PART.to_string()),
            None => DEFAULT_MAIN_PART.to_string(),
        };

        let main_bytes = package
            .part(&main_part)
            .ok_or_else(|| DocxError::MissingPart(main_part.clone()))?;
        let main = XmlTree::parse(main_bytes)?;
        if main.root().and_then(|root| root.child(W_BODY)).is_none() {
            return Err(DocxError::Malformed(format!(
                "{main_part} has no {W_BODY} element"
            )));
        }

        let rels = match package.part(&rels_part_for(&main_part)) {
            Some(bytes) => Relationships::parse(bytes)?,
            None => Relationships::empty()?,
        };
        let content_types = package
            .part(ContentTypes::PART)
            .map(ContentTypes::parse)
            .transpose()?;

        Ok(Self {
            package,
            main_part,
            main,
            rels,
            rels_dirty: false,
            content_types,
            content_types_dirty: false,
        })
    }

    pub fn main_part(&self) -> &str {
        &self.main_part
    }

    pub fn root(&self) -> Option<&XmlElement> {
        self.main.root()
    }

    pub fn body(&self) -> Option<&XmlElement> {
        self.main.root()?.child(W_BODY)
    }

    /// Every text fragment of the main part, concatenated with no separator.
    pub fn text(&self) -> String {
        let mut fragments = Vec::new();
        if let Some(root) = self.main.root() {
            root.find_all(W_T, &mut fragments);
        }
        fragments.iter().map(|t| t.text()).collect()
    }

    /// Concatenated text of each body paragraph, in document order.
    pub fn paragraph_texts(&self) -> Vec<String> {
        let mut paragraphs = Vec::new();
        if let Some(body) = self.body() {
            body.find_all(W_P, &mut paragraphs);
        }
        paragraphs.iter().map(|p| paragraph_text(p)).collect()
    }

    /// Visits every body paragraph, nested ones (text boxes, table cells) included.
    pub fn for_each_paragraph_mut(&mut self, mut visit: impl FnMut(&mut Paragraph<'_>)) {
        if let Some(body) = self.body_mut() {
            visit_paragraphs(body, &mut visit);
        }
    }

    /// First body paragraph whose concatenated text contains `needle`, ignoring ASCII case.
    pub fn find_paragraph_mut(&mut self, needle: &str) -> Option<Paragraph<'_>> {
        let needle = needle.to_ascii_lowercase();
        let body = self.body_mut()?;
        find_paragraph(body, &needle).map(|element| Paragraph { element })
    }

    /// Picture-bearing drawings of the main part, in document order.
    pub fn graphic_objects(&self) -> Vec<GraphicObject> {
        let mut drawings = Vec::new();
        if let Some(root) = self.main.root() {
            root.find_all(W_DRAWING, &mut drawings);
        }
        drawings
            .into_iter()
            .filter_map(GraphicObject::from_element)
            .collect()
    }

    /// Package part behind an internal relationship of the main part, if it exists.
    pub fn binary_part_for(&self, rel_id: &str) -> Option<String> {
        let rel = self.rels.get(rel_id)?;
        if rel.external {
            return None;
        }
        let part = resolve_target(&self.main_part, &rel.target);
        self.package.contains(&part).then_some(part)
    }

    pub fn part(&self, name: &str) -> Option<&[u8]> {
        self.package.part(name)
    }

    /// Overwrites a binary part's bytes. Every relationship pointing at it keeps working.
    pub fn replace_part(&mut self, name: &str, data: Vec<u8>) {
        self.package.set_part(name, data);
    }

    /// Stores a PNG as a new media part related from the main part.
    /// Returns `(part name, relationship id)`.
    pub fn add_png_part(&mut self, png: Vec<u8>) -> Result<(String, String), DocxError> {
        let dir = self
            .main_part
            .rsplit_once('/')
            .map(|(dir, _)| format!("{dir}/"))
            .unwrap_or_default();

        let mut n = 1;
        while self.package.contains(&format!("{dir}media/photo{n}.png")) {
            n += 1;
        }
        let target = format!("media/photo{n}.png");
        let part = format!("{dir}{target}");

        self.package.set_part(&part, png);
        let rel_id = self.rels.add(REL_IMAGE, &target)?;
        self.rels_dirty = true;

        if let Some(types) = self.content_types.as_mut() {
            if !types.has_default("png") {
                types.ensure_default("png", "image/png")?;
                self.content_types_dirty = true;
            }
        }

        Ok((part, rel_id))
    }

    /// One past the largest `wp:docPr` id in use.
    pub fn next_doc_pr_id(&self) -> u32 {
        let mut props = Vec::new();
        if let Some(root) = self.main.root() {
            root.find_all("wp:docPr", &mut props);
        }
        props
            .iter()
            .filter_map(|p| p.attr("id")?.parse::<u32>().ok())
            .max()
            .unwrap_or(0)
            + 1
    }

    /// Declares `xmlns:<prefix>` on the root element unless it is already declared.
    pub fn ensure_root_namespace(&mut self, prefix: &str, uri: &str) -> Result<(), DocxError> {
        let key = format!("xmlns:{prefix}");
        let root = self
            .main
            .root_mut()
            .ok_or_else(|| DocxError::Malformed("main part has no root".into()))?;
        if root.attr(&key).is_none() {
            root.set_attr(&key, uri);
        }
        Ok(())
    }

    /// Stamps `dcterms:modified` in the core properties part, when the package has one.
    pub fn set_modified(&mut self, at: DateTime<Utc>) -> Result<bool, DocxError> {
        let core_part = self
            .package
            .part(&rels_part_for(""))
            .and_then(|bytes| Relationships::parse(bytes).ok())
            .and_then(|rels| rels.first_of_type(REL_CORE_PROPERTIES))
            .map(|r| resolve_target("", &r.target))
            .unwrap_or_else(|| DEFAULT_CORE_PART.to_string());

        let Some(bytes) = self.package.part(&core_part) else {
            return Ok(false);
        };
        let mut tree = XmlTree::parse(bytes)?;
        let Some(modified) = tree
            .root_mut()
            .and_then(|root| root.find_mut("dcterms:modified"))
        else {
            return Ok(false);
        };
        modified.set_text(&at.to_rfc3339_opts(SecondsFormat::Secs, true));
        self.package.set_part(&core_part, tree.to_bytes()?);
        Ok(true)
    }

    /// Serialises the document into a new package.
    pub fn to_bytes(&self) -> Result<Vec<u8>, DocxError> {
        let mut package = self.package.clone();
        package.set_part(&self.main_part, self.main.to_bytes()?);
        if self.rels_dirty {
            package.set_part(&rels_part_for(&self.main_part), self.rels.to_bytes()?);
        }
        if let (true, Some(types)) = (self.content_types_dirty, &self.content_types) {
            package.set_part(ContentTypes::PART, types.to_bytes()?);
        }
        package.to_bytes()
    }

    fn body_mut(&mut self) -> Option<&mut XmlElement> {
        self.main.root_mut()?.elements_mut().find(|e| e.is(W_BODY))
    }
}

/// A mutable handle on one `w:p`.
pub struct Paragraph<'a> {
    element: &'a mut XmlElement,
}

impl Paragraph<'_> {
    pub fn element(&self) -> &XmlElement {
        self.element
    }

    pub fn text(&self) -> String {
        paragraph_text(self.element)
    }

    /// The paragraph's `w:t` fragments in order, excluding those of nested paragraphs.
    pub fn fragments(&mut self) -> Vec<&mut XmlElement> {
        let mut out = Vec::new();
        collect_fragments_mut(&mut self.element.children, &mut out);
        out
    }

    /// Removes every run of the paragraph, including runs wrapped in hyperlinks,
    /// content controls and tracked insertions. Wrappers left holding only their
    /// properties go too; paragraph properties, bookmarks and the paragraph
    /// itself stay. Nested paragraphs are not entered.
    pub fn remove_runs(&mut self) -> usize {
        strip_runs(&mut self.element.children)
    }

    pub fn append(&mut self, nodes: Vec<XmlNode>) {
        self.element.children.extend(nodes);
    }

    /// Puts `text` into the first fragment and empties every other one. The
    /// fragments themselves stay, along with whatever markup sits between them.
    ///
    /// With `line_breaks`, each `\n` becomes a `w:br` followed by a new `w:t`
    /// inside the first fragment's run, so every line carries that run's style.
    /// Vertical tabs and form feeds count as `\n`; other characters XML cannot
    /// hold are dropped. Returns `false` when the paragraph has no fragment to write into.
    pub fn rewrite_fragments(&mut self, text: &str, line_breaks: bool) -> bool {
        let Some(path) = first_fragment_path(&self.element.children) else {
            return false;
        };
        for fragment in self.fragments().into_iter().skip(1) {
            fragment.set_text("");
        }

        let Some((&at, parents)) = path.split_last() else {
            return false;
        };
        let mut siblings = &mut self.element.children;
        for &i in parents {
            siblings = match siblings.get_mut(i) {
                Some(XmlNode::Element(el)) => &mut el.children,
                _ => return false,
            };
        }

        // Vertical tab and form feed are Word's manual line and page breaks.
        let text = text.replace(['\u{0B}', '\u{0C}'], "\n");
        let mut lines: Vec<&str> = if line_breaks {
            text.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l)).collect()
        } else {
            vec![text.as_str()]
        };
        let first = lines.remove(0);

        match siblings.get_mut(at) {
            Some(XmlNode::Element(fragment)) => write_preserved(fragment, first),
            _ => return false,
        }
        for (offset, line) in lines.into_iter().enumerate() {
            let mut t = XmlElement::new(W_T);
            write_preserved(&mut t, line);
            let insert_at = at + 1 + offset * 2;
            siblings.insert(insert_at, XmlNode::Element(XmlElement::new(W_BR)));
            siblings.insert(insert_at + 1, XmlNode::Element(t));
        }
        true
    }
}

fn write_preserved(fragment: &mut XmlElement, text: &str) {
    fragment.set_text(text);
    if fragment.attr("xml:space").as_deref() != Some("preserve") {
        fragment.set_attr("xml:space", "preserve");
    }
}

fn strip_runs(children: &mut Vec<XmlNode>) -> usize {
    let mut removed = 0;
    children.retain_mut(|node| {
        let XmlNode::Element(el) = node else {
            return true;
        };
        if el.is(W_R) {
            removed += 1;
            return false;
        }
        if el.is(W_P) {
            return true;
        }
        let inner = strip_runs(&mut el.children);
        removed += inner;
        inner == 0 || el.elements().any(|child| !is_properties(child))
    });
    removed
}

/// `w:pPr`, `w:rPr`, `w:sdtPr`, `w:sdtEndPr`, ...
fn is_properties(element: &XmlElement) -> bool {
    element.name().ends_with(b"Pr")
}

/// Child indices leading from a paragraph to its first `w:t`.
fn first_fragment_path(children: &[XmlNode]) -> Option<Vec<usize>> {
    for (i, node) in children.iter().enumerate() {
        if let XmlNode::Element(el) = node {
            if el.is(W_T) {
                return Some(vec![i]);
            }
            if !el.is(W_P) {
                if let Some(mut rest) = first_fragment_path(&el.children) {
                    rest.insert(0, i);
                    return Some(rest);
                }
            }
        }
    }
    None
}

fn paragraph_text(paragraph: &XmlElement) -> String {
    let mut out = Vec::new();
    collect_fragments(&paragraph.children, &mut out);
    out.iter().map(|t| t.text()).collect()
}

fn collect_fragments<'a>(children: &'a [XmlNode], out: &mut Vec<&'a XmlElement>) {
    for node in children {
        if let XmlNode::Element(el) = node {
            if el.is(W_T) {
                out.push(el);
            } else if !el.is(W_P) {
                collect_fragments(&el.children, out);
            }
        }
    }
}

fn collect_fragments_mut<'a>(children: &'a mut [XmlNode], out: &mut Vec<&'a mut XmlElement>) {
    for node in children {
        if let XmlNode::Element(el) = node {
            if el.is(W_T) {
                out.push(el);
            } else if !el.is(W_P) {
                collect_fragments_mut(&mut el.children, out);
            }
        }
    }
}

fn visit_paragraphs(element: &mut XmlElement, visit: &mut impl FnMut(&mut Paragraph<'_>)) {
    for node in element.children.iter_mut() {
        if let XmlNode::Element(child) = node {
            if child.is(W_P) {
                visit(&mut Paragraph { element: &mut *child });
            }
            visit_paragraphs(child, visit);
        }
    }
}

fn find_paragraph<'a>(element: &'a mut XmlElement, needle: &str) -> Option<&'a mut XmlElement> {
    for node in element.children.iter_mut() {
        if let XmlNode::Element(child) = node {
            if child.is(W_P) && paragraph_text(child).to_ascii_lowercase().contains(needle) {
                return Some(child);
            }
            if let Some(found) = find_paragraph(child, needle) {
                return Some(found);
            }
        }
    }
    None
}

/// Plain text of a Word document, one line per body paragraph.
pub fn extract_text(bytes: &[u8]) -> Result<String, DocxError> {
    let document = Document::open(bytes)?;
    Ok(document.paragraph_texts().join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::fixtures;
    use crate::docx::xml::element_to_bytes;

    #[test]
    fn test_open_requires_body() {
        let bytes = fixtures::package_with_main(
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"/>"#,
        );
        assert!(matches!(Document::open(&bytes), Err(DocxError::Malformed(_))));
    }

    #[test]
    fn test_open_requires_main_part() {
        let bytes = fixtures::zip(&[("[Content_Types].xml", b"<Types/>".to_vec())]);
        assert!(matches!(Document::open(&bytes), Err(DocxError::MissingPart(_))));
    }

    #[test]
    fn test_paragraph_text_spans_runs_and_skips_nested_paragraphs() {
        let body = concat!(
            r#"<w:p><w:r><w:t>|na</w:t></w:r><w:r><w:rPr><w:i/></w:rPr><w:t>me|</w:t></w:r></w:p>"#,
            r#"<w:p><w:r><w:t>outer</w:t><w:drawing><w:txbxContent><w:p><w:r><w:t>inner</w:t></w:r></w:p></w:txbxContent></w:drawing></w:r></w:p>"#,
        );
        let document = Document::open(&fixtures::docx(body)).unwrap();
        assert_eq!(document.paragraph_texts(), vec!["|name|", "outer", "inner"]);
        assert_eq!(document.text(), "|name|outerinner");
    }

    #[test]
    fn test_for_each_paragraph_visits_table_cells() {
        let body = r#"<w:tbl><w:tr><w:tc><w:p><w:r><w:t>cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl>"#;
        let mut document = Document::open(&fixtures::docx(body)).unwrap();
        let mut seen = Vec::new();
        document.for_each_paragraph_mut(|p| seen.push(p.text()));
        assert_eq!(seen, vec!["cell"]);
    }

    #[test]
    fn test_find_paragraph_and_remove_runs_keeps_properties() {
        let body = r#"<w:p><w:pPr><w:jc w:val="center"/></w:pPr><w:r><w:t>|PHO</w:t></w:r><w:r><w:t>TO|</w:t></w:r></w:p>"#;
        let mut document = Document::open(&fixtures::docx(body)).unwrap();
        let mut paragraph = document.find_paragraph_mut("|photo|").unwrap();
        assert_eq!(paragraph.remove_runs(), 2);
        let xml = String::from_utf8(element_to_bytes(paragraph.element()).unwrap()).unwrap();
        assert_eq!(xml, r#"<w:p><w:pPr><w:jc w:val="center"/></w:pPr></w:p>"#);
    }

    fn runs_removed(body: &str) -> (usize, String) {
        let mut document = Document::open(&fixtures::docx(body)).unwrap();
        let mut paragraph = document.find_paragraph_mut("|photo|").unwrap();
        let removed = paragraph.remove_runs();
        let xml = String::from_utf8(element_to_bytes(paragraph.element()).unwrap()).unwrap();
        (removed, xml)
    }

    #[test]
    fn test_remove_runs_reaches_into_hyperlink() {
        let body = r#"<w:p><w:pPr><w:jc w:val="center"/></w:pPr><w:hyperlink r:id="rId3"><w:r><w:t>|photo|</w:t></w:r></w:hyperlink></w:p>"#;
        assert_eq!(
            runs_removed(body),
            (1, r#"<w:p><w:pPr><w:jc w:val="center"/></w:pPr></w:p>"#.to_string())
        );
    }

    #[test]
    fn test_remove_runs_reaches_into_content_control() {
        let body = r#"<w:p><w:sdt><w:sdtPr><w:alias w:val="Photo"/></w:sdtPr><w:sdtContent><w:r><w:t>|pho</w:t></w:r><w:r><w:t>to|</w:t></w:r></w:sdtContent></w:sdt><w:bookmarkStart w:id="1"/></w:p>"#;
        assert_eq!(
            runs_removed(body),
            (2, r#"<w:p><w:bookmarkStart w:id="1"/></w:p>"#.to_string())
        );
    }

    #[test]
    fn test_remove_runs_reaches_into_tracked_insertion() {
        let body = r#"<w:p><w:r><w:t>Photo: </w:t></w:r><w:ins w:id="4" w:author="A"><w:r><w:t>|photo|</w:t></w:r></w:ins></w:p>"#;
        let mut document = Document::open(&fixtures::docx(body)).unwrap();
        let mut paragraph = document.find_paragraph_mut("|photo|").unwrap();
        assert_eq!(paragraph.remove_runs(), 2);
        assert_eq!(paragraph.text(), "");
        assert_eq!(
            String::from_utf8(element_to_bytes(paragraph.element()).unwrap()).unwrap(),
            "<w:p></w:p>"
        );
    }

    #[test]
    fn test_remove_runs_leaves_nested_paragraphs_alone() {
        let body = r#"<w:p><w:customXml><w:p><w:r><w:t>inner</w:t></w:r></w:p></w:customXml><w:r><w:t>|photo|</w:t></w:r></w:p>"#;
        let (removed, xml) = runs_removed(body);
        assert_eq!(removed, 1);
        assert!(xml.contains("<w:t>inner</w:t>"));
    }

    #[test]
    fn test_rewrite_fragments_turns_page_and_line_breaks_into_lines() {
        let body = r#"<w:p><w:r><w:t>x</w:t></w:r></w:p>"#;
        assert_eq!(
            rewritten(body, "Page one\u{0C}Page two\u{0B}tab\u{01}", true),
            concat!(
                r#"<w:p><w:r><w:t xml:space="preserve">Page one</w:t><w:br/>"#,
                r#"<w:t xml:space="preserve">Page two</w:t><w:br/>"#,
                r#"<w:t xml:space="preserve">tab</w:t></w:r></w:p>"#
            )
        );
        assert_eq!(
            rewritten(body, "a\u{0C}b", false),
            "<w:p><w:r><w:t xml:space=\"preserve\">a\nb</w:t></w:r></w:p>"
        );
    }

    fn rewritten(body: &str, text: &str, line_breaks: bool) -> String {
        let mut document = Document::open(&fixtures::docx(body)).unwrap();
        let mut xml = String::new();
        document.for_each_paragraph_mut(|p| {
            assert!(p.rewrite_fragments(text, line_breaks));
            xml = String::from_utf8(element_to_bytes(p.element()).unwrap()).unwrap();
        });
        xml
    }

    #[test]
    fn test_rewrite_fragments_empties_but_keeps_later_fragments() {
        let body = r#"<w:p><w:r><w:rPr><w:b/></w:rPr><w:t>|na</w:t></w:r><w:bookmarkStart w:id="0"/><w:r><w:t>me|</w:t></w:r></w:p>"#;
        assert_eq!(
            rewritten(body, "Jane  Doe ", false),
            r#"<w:p><w:r><w:rPr><w:b/></w:rPr><w:t xml:space="preserve">Jane  Doe </w:t></w:r><w:bookmarkStart w:id="0"/><w:r><w:t></w:t></w:r></w:p>"#
        );
    }

    #[test]
    fn test_rewrite_fragments_renders_line_breaks_in_first_run() {
        let body = r#"<w:p><w:r><w:rPr><w:i/></w:rPr><w:t xml:space="preserve">x</w:t><w:tab/></w:r></w:p>"#;
        assert_eq!(
            rewritten(body, "• a\r\n  b", true),
            r#"<w:p><w:r><w:rPr><w:i/></w:rPr><w:t xml:space="preserve">• a</w:t><w:br/><w:t xml:space="preserve">  b</w:t><w:tab/></w:r></w:p>"#
        );
    }

    #[test]
    fn test_rewrite_fragments_without_line_breaks_keeps_newlines_verbatim() {
        let body = r#"<w:p><w:r><w:t>x</w:t></w:r></w:p>"#;
        assert_eq!(
            rewritten(body, "a\nb", false),
            "<w:p><w:r><w:t xml:space=\"preserve\">a\nb</w:t></w:r></w:p>"
        );
    }

    #[test]
    fn test_add_png_part_registers_relationship_and_content_type() {
        let mut document = Document::open(&fixtures::docx("<w:p/>")).unwrap();
        let (part, rel_id) = document.add_png_part(vec![1, 2, 3]).unwrap();
        assert_eq!(part, "word/media/photo1.png");
        assert_eq!(document.binary_part_for(&rel_id).as_deref(), Some("word/media/photo1.png"));

        let saved = Document::open(&document.to_bytes().unwrap()).unwrap();
        assert_eq!(saved.part("word/media/photo1.png"), Some(&[1u8, 2, 3][..]));
        assert_eq!(saved.binary_part_for(&rel_id).as_deref(), Some("word/media/photo1.png"));
        let types = String::from_utf8(saved.part("[Content_Types].xml").unwrap().to_vec()).unwrap();
        assert!(types.contains(r#"Extension="png""#));
    }

    #[test]
    fn test_add_png_part_skips_taken_names() {
        let bytes = fixtures::docx_with_media(
            "<w:p/>",
            &[("rId5", "media/photo1.png", vec![0])],
        );
        let mut document = Document::open(&bytes).unwrap();
        let (part, rel_id) = document.add_png_part(vec![1]).unwrap();
        assert_eq!(part, "word/media/photo2.png");
        assert_eq!(rel_id, "rId6");
    }

    #[test]
    fn test_binary_part_for_unknown_or_external() {
        let document = Document::open(&fixtures::docx("<w:p/>")).unwrap();
        assert!(document.binary_part_for("rId404").is_none());
    }

    #[test]
    fn test_next_doc_pr_id() {
        let body = format!(
            "<w:p><w:r>{}</w:r><w:r>{}</w:r></w:p>",
            fixtures::picture("rId1", 3, "a", ""),
            fixtures::picture("rId1", 11, "b", ""),
        );
        let document = Document::open(&fixtures::docx(&body)).unwrap();
        assert_eq!(document.next_doc_pr_id(), 12);
    }

    #[test]
    fn test_untouched_document_saves_identical_main_part() {
        let body = r#"<w:p w14:paraId="1A2B"><w:r><w:t xml:space="preserve"> spaced  out </w:t></w:r></w:p>"#;
        let bytes = fixtures::docx(body);
        let original = Document::open(&bytes).unwrap();
        let before = original.part("word/document.xml").unwrap().to_vec();

        let saved = Document::open(&original.to_bytes().unwrap()).unwrap();
        assert_eq!(saved.part("word/document.xml").unwrap(), before.as_slice());
    }

    #[test]
    fn test_set_modified_updates_core_properties() {
        let mut document = Document::open(&fixtures::docx("<w:p/>")).unwrap();
        let at = DateTime::parse_from_rfc3339("2026-03-01T08:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert!(document.set_modified(at).unwrap());
        let core = String::from_utf8(document.part("docProps/core.xml").unwrap().to_vec()).unwrap();
        assert!(core.contains("<dcterms:modified xsi:type=\"dcterms:W3CDTF\">2026-03-01T08:30:00Z</dcterms:modified>"));
    }

    #[test]
    fn test_extract_text_one_line_per_paragraph() {
        let body = r#"<w:p><w:r><w:t>Jane </w:t></w:r><w:r><w:t>Doe</w:t></w:r></w:p><w:p/><w:p><w:r><w:t>Rust</w:t></w:r></w:p>"#;
        assert_eq!(extract_text(&fixtures::docx(body)).unwrap(), "Jane Doe\n\nRust");
    }
}
