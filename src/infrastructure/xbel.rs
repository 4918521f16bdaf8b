//! Minimal XBEL document model.
//!
//! The document is held as a generic element tree so that entries owned by
//! other programs survive a rewrite with every attribute and nested element
//! intact. Only `bookmark` children of the root are interpreted.

use std::borrow::Cow;

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::domain::{AppError, Place, Result};

/// Header expected by KDE and GTK consumers, reproduced byte-for-byte.
pub const XBEL_HEADER: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
    "<!DOCTYPE xbel PUBLIC \"+//IDN python.org//DTD XML Bookmark Exchange Language 1.0//EN//XML\" ",
    "\"http://www.python.org/topics/xml/dtds/xbel-1.0.dtd\">\n",
);

/// Owner recorded on entries this tool writes.
pub const KDE_OWNER: &str = "http://www.kde.org";

const ROOT: &str = "xbel";
const BOOKMARK: &str = "bookmark";
const SYSTEM_ITEM_MARKER: &str = "isSystemItem";

/// A node in the element tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
}

/// An XML element with its attributes in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Self> {
        let mut element = Self::new(String::from_utf8_lossy(start.name().as_ref()));
        for attr in start.attributes() {
            let attr = attr.map_err(AppError::xml)?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value().map_err(AppError::xml)?.into_owned();
            element.attributes.push((key, value));
        }
        Ok(element)
    }

    fn with_attribute(mut self, key: &str, value: &str) -> Self {
        self.attributes.push((key.to_string(), value.to_string()));
        self
    }

    fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Element name without any namespace prefix.
    #[must_use]
    pub fn local_name(&self) -> &str {
        self.name.rsplit(':').next().unwrap_or(&self.name)
    }

    /// Value of the named attribute.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Direct child elements.
    pub fn elements(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            Node::Text(_) | Node::Comment(_) => None,
        })
    }

    /// Concatenated direct text content.
    #[must_use]
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(t) => Some(t.as_str()),
                Node::Element(_) | Node::Comment(_) => None,
            })
            .collect()
    }

    fn is_bookmark(&self) -> bool {
        self.name == BOOKMARK
    }

    /// Whether a bookmark carries the system-item marker in any of its
    /// `info/metadata` annotations.
    #[must_use]
    pub fn is_system_item(&self) -> bool {
        self.elements()
            .filter(|e| e.local_name() == "info")
            .flat_map(Self::elements)
            .filter(|e| e.local_name() == "metadata")
            .flat_map(Self::elements)
            .any(|e| e.local_name() == SYSTEM_ITEM_MARKER)
    }

    fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let mut start = BytesStart::new(self.name.as_str());
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        if self.children.is_empty() {
            return writer
                .write_event(Event::Empty(start))
                .map_err(AppError::xml);
        }

        writer.write_event(Event::Start(start)).map_err(AppError::xml)?;
        for child in &self.children {
            match child {
                Node::Element(e) => e.write_to(writer)?,
                Node::Text(t) => writer
                    .write_event(Event::Text(BytesText::new(t)))
                    .map_err(AppError::xml)?,
                Node::Comment(c) => writer
                    .write_event(Event::Comment(BytesText::from_escaped(c.as_str())))
                    .map_err(AppError::xml)?,
            }
        }
        writer
            .write_event(Event::End(BytesEnd::new(self.name.as_str())))
            .map_err(AppError::xml)
    }
}

/// A parsed `user-places.xbel` document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XbelDocument {
    root: Element,
}

impl Default for XbelDocument {
    fn default() -> Self {
        Self {
            root: Element::new(ROOT),
        }
    }
}

impl XbelDocument {
    /// Parse a document.
    ///
    /// # Errors
    /// Returns error if the XML is malformed or the root is not `xbel`.
    pub fn parse(content: &str) -> Result<Self> {
        let mut reader = Reader::from_str(content);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event().map_err(AppError::xml)? {
                Event::Start(start) => stack.push(Element::from_start(&start)?),
                Event::Empty(start) => {
                    attach(&mut stack, &mut root, Element::from_start(&start)?)?;
                }
                Event::End(_) => {
                    let element = stack.pop().ok_or_else(|| AppError::Xml {
                        message: "Unbalanced closing tag".into(),
                    })?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::Text(text) => {
                    let text = text.unescape().map_err(AppError::xml)?;
                    push_text(&mut stack, text);
                }
                Event::CData(data) => {
                    let bytes = data.into_inner();
                    push_text(&mut stack, String::from_utf8_lossy(&bytes));
                }
                Event::Comment(comment) => {
                    if let Some(parent) = stack.last_mut() {
                        let comment = String::from_utf8_lossy(&comment).into_owned();
                        parent.children.push(Node::Comment(comment));
                    }
                }
                Event::Eof => break,
                // Declarations, doctype and processing instructions are
                // regenerated or dropped on write.
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(AppError::Xml {
                message: "Unexpected end of document".into(),
            });
        }

        let root = root.ok_or_else(|| AppError::Xml {
            message: "Document has no root element".into(),
        })?;

        if root.local_name() != ROOT {
            return Err(AppError::Xml {
                message: format!("Expected <{ROOT}> root element, found <{}>", root.name),
            });
        }

        Ok(Self { root })
    }

    /// Root element.
    #[cfg(test)]
    #[must_use]
    pub const fn root(&self) -> &Element {
        &self.root
    }

    /// Top-level bookmark entries, system items included.
    pub fn bookmarks(&self) -> impl Iterator<Item = &Element> {
        self.root.elements().filter(|e| e.is_bookmark())
    }

    /// User-owned places, in document order.
    ///
    /// System items and bookmarks without an `href` are left out.
    #[must_use]
    pub fn user_places(&self) -> Vec<Place> {
        self.bookmarks()
            .filter(|b| !b.is_system_item())
            .filter_map(|b| {
                let Some(href) = b.attribute("href").filter(|h| !h.is_empty()) else {
                    tracing::debug!("Skipping bookmark without href");
                    return None;
                };
                let title = b
                    .elements()
                    .find(|e| e.local_name() == "title")
                    .map(Element::text)
                    .unwrap_or_default();
                Some(Place::new(title, href))
            })
            .collect()
    }

    /// Build the document that results from replacing the user-owned
    /// entries with `places`.
    ///
    /// Foreign root children (system bookmarks, folders, separators, root
    /// metadata) keep their relative order and come first; the new user
    /// bookmarks follow in the given order.
    #[must_use]
    pub fn with_user_places(&self, places: &[Place]) -> Self {
        let (foreign, user): (Vec<&Node>, Vec<&Node>) =
            self.root.children.iter().partition(|node| match node {
                Node::Element(e) => !e.is_bookmark() || e.is_system_item(),
                Node::Comment(_) => true,
                Node::Text(_) => false,
            });

        tracing::debug!(
            kept = foreign.len(),
            dropped = user.len(),
            added = places.len(),
            "Merging XBEL entries"
        );

        let mut root = Element {
            name: self.root.name.clone(),
            attributes: self.root.attributes.clone(),
            children: foreign.into_iter().cloned().collect(),
        };
        root.children
            .extend(places.iter().map(|p| Node::Element(user_bookmark(p))));

        Self { root }
    }

    /// Serialize with the fixed header and two-space indentation.
    ///
    /// # Errors
    /// Returns error if the XML writer fails.
    pub fn to_xml(&self) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        self.root.write_to(&mut writer)?;

        let body = String::from_utf8(writer.into_inner()).map_err(AppError::xml)?;
        Ok(format!("{XBEL_HEADER}{body}\n"))
    }
}

fn user_bookmark(place: &Place) -> Element {
    let metadata = Element::new("metadata").with_attribute("owner", KDE_OWNER);
    let info = Element::new("info").with_child(Node::Element(metadata));
    let title = Element::new("title").with_child(Node::Text(place.label.clone()));

    Element::new(BOOKMARK)
        .with_attribute("href", &place.target)
        .with_child(Node::Element(title))
        .with_child(Node::Element(info))
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(Node::Element(element));
        return Ok(());
    }
    if root.is_some() {
        return Err(AppError::Xml {
            message: "Document has more than one root element".into(),
        });
    }
    *root = Some(element);
    Ok(())
}

/// Whitespace-only runs are layout and get regenerated by the indenting
/// writer; any other text is kept exactly, surrounding spaces included.
fn push_text(stack: &mut [Element], text: Cow<'_, str>) {
    if text.trim().is_empty() {
        return;
    }
    if let Some(parent) = stack.last_mut() {
        parent.children.push(Node::Text(text.into_owned()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KDE_SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE xbel>
<xbel xmlns:bookmark="http://www.freedesktop.org/standards/desktop-bookmarks" xmlns:kdepriv="http://www.kde.org/kdepriv">
 <info>
  <metadata owner="http://www.kde.org">
   <kde_places_version>4</kde_places_version>
  </metadata>
 </info>
 <bookmark href="file:///home/user">
  <title>Home</title>
  <info>
   <metadata owner="http://freedesktop.org">
    <bookmark:icon name="user-home"/>
   </metadata>
   <metadata owner="http://www.kde.org">
    <ID>1500000000/0</ID>
    <isSystemItem>true</isSystemItem>
   </metadata>
  </info>
 </bookmark>
 <bookmark href="file:///home/user/src">
  <title>Source &amp; Stuff</title>
  <info>
   <metadata owner="http://www.kde.org"/>
  </info>
 </bookmark>
 <bookmark href="trash:/">
  <title>Trash</title>
  <info>
   <metadata owner="http://www.kde.org">
    <isSystemItem>true</isSystemItem>
   </metadata>
  </info>
 </bookmark>
</xbel>
"#;

    #[test]
    fn test_user_places_skip_system_items() {
        let doc = XbelDocument::parse(KDE_SAMPLE).unwrap();

        assert_eq!(doc.bookmarks().count(), 3);
        assert_eq!(
            doc.user_places(),
            vec![Place::new("Source & Stuff", "file:///home/user/src")]
        );
    }

    #[test]
    fn test_merge_keeps_system_items_verbatim() {
        let doc = XbelDocument::parse(KDE_SAMPLE).unwrap();
        let merged = doc.with_user_places(&[Place::new("Docs", "file:///home/user/Documents")]);

        let names: Vec<_> = merged.root().elements().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["info", "bookmark", "bookmark", "bookmark"]);

        let system: Vec<_> = doc.bookmarks().filter(|b| b.is_system_item()).collect();
        let kept: Vec<_> = merged.bookmarks().filter(|b| b.is_system_item()).collect();
        assert_eq!(system, kept);

        assert_eq!(
            merged.user_places(),
            vec![Place::new("Docs", "file:///home/user/Documents")]
        );
        assert_eq!(merged.root().attributes, doc.root().attributes);
    }

    #[test]
    fn test_serialized_output_reparses() {
        let doc = XbelDocument::parse(KDE_SAMPLE).unwrap();
        let merged = doc.with_user_places(&[Place::new("A <b>", "file:///a?x=1&y=2")]);

        let xml = merged.to_xml().unwrap();
        let reparsed = XbelDocument::parse(&xml).unwrap();

        assert_eq!(reparsed, merged);
        assert!(xml.contains("<bookmark:icon name=\"user-home\"/>"));
        assert!(xml.contains("<ID>1500000000/0</ID>"));
    }

    #[test]
    fn test_new_document_layout() {
        let doc = XbelDocument::default().with_user_places(&[Place::new("Tmp", "file:///tmp")]);

        let xml = doc.to_xml().unwrap();

        let expected = format!(
            "{XBEL_HEADER}<xbel>\n  <bookmark href=\"file:///tmp\">\n    <title>Tmp</title>\n    <info>\n      <metadata owner=\"http://www.kde.org\"/>\n    </info>\n  </bookmark>\n</xbel>\n"
        );
        assert_eq!(xml, expected);
    }

    #[test]
    fn test_header_is_exact() {
        let xml = XbelDocument::default().to_xml().unwrap();
        assert!(xml.starts_with(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!DOCTYPE xbel PUBLIC \"+//IDN python.org//DTD XML Bookmark Exchange Language 1.0//EN//XML\" \"http://www.python.org/topics/xml/dtds/xbel-1.0.dtd\">\n<xbel"
        ));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(XbelDocument::parse("").is_err());
        assert!(XbelDocument::parse("<xbel><bookmark></xbel>").is_err());
        assert!(XbelDocument::parse("<html/>").is_err());
    }

    #[test]
    fn test_title_whitespace_is_kept() {
        let doc = XbelDocument::parse(
            "<xbel>\n  <bookmark href=\"file:///a\">\n    <title>  Spaced  </title>\n  </bookmark>\n</xbel>",
        )
        .unwrap();

        assert_eq!(doc.user_places(), vec![Place::new("  Spaced  ", "file:///a")]);
    }

    #[test]
    fn test_comments_in_foreign_entries_survive_merge() {
        let source = r#"<xbel>
  <!-- managed by the session -->
  <bookmark href="trash:/">
    <title>Trash</title>
    <!-- do not edit -->
    <info>
      <metadata owner="http://www.kde.org">
        <isSystemItem>true</isSystemItem>
      </metadata>
    </info>
  </bookmark>
  <bookmark href="file:///old">
    <title>Old</title>
  </bookmark>
</xbel>"#;
        let doc = XbelDocument::parse(source).unwrap();
        let merged = doc.with_user_places(&[Place::new("New", "file:///new")]);

        let xml = merged.to_xml().unwrap();
        assert!(xml.contains("  <!-- managed by the session -->\n"));
        assert!(xml.contains("    <!-- do not edit -->\n"));
        assert!(!xml.contains("file:///old"));

        let reparsed = XbelDocument::parse(&xml).unwrap();
        assert_eq!(reparsed, merged);
        let trash = reparsed.bookmarks().next().unwrap();
        assert!(trash
            .children
            .contains(&Node::Comment(" do not edit ".to_string())));
        assert_eq!(
            reparsed.user_places(),
            vec![Place::new("New", "file:///new")]
        );
    }

    #[test]
    fn test_bookmark_without_href_is_not_a_place() {
        let doc = XbelDocument::parse("<xbel><bookmark><title>x</title></bookmark></xbel>").unwrap();
        assert!(doc.user_places().is_empty());
    }
}
