//! Schema document generator
//!
//! Walks the NXDL Schema tree and emits the "NXDL Elements and Data
//! Types" chapter of the NeXus manual as reStructuredText. The curated
//! primary elements and data types are documented first, in alphabetical
//! order, then a catch-all pass walks every remaining schema construct
//! under the root so nothing added to the schema is silently dropped
//! from the manual.

use crate::docs::{doc_from_node, doc_or_default};
use crate::documents::{Document, Element};
use crate::error::{Error, Result};
use crate::output::Output;
use crate::xpath::select;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use std::path::Path;

/// The primary NXDL elements, always documented first
pub const ELEMENT_LIST: [&str; 9] = [
    "attribute",
    "definition",
    "dimensions",
    "doc",
    "enumeration",
    "field",
    "group",
    "link",
    "symbols",
];

/// The internal NXDL data types and the queries locating their definitions
pub static DATATYPE_TABLE: Lazy<IndexMap<&'static str, &'static str>> = Lazy::new(|| {
    IndexMap::from([
        (
            "basicComponent",
            "/xs:schema//xs:complexType[@name='basicComponent']",
        ),
        (
            "validItemName",
            "/xs:schema//xs:simpleType[@name='validItemName']",
        ),
        (
            "validNXClassName",
            "/xs:schema//xs:simpleType[@name='validNXClassName']",
        ),
        (
            "validTargetName",
            "/xs:schema//xs:simpleType[@name='validTargetName']",
        ),
        (
            "nonNegativeUnbounded",
            "/xs:schema//xs:simpleType[@name='nonNegativeUnbounded']",
        ),
    ])
});

const ELEMENT_PREAMBLE: &str = r#"
===============================
NXDL Elements and Data Types
===============================

The documentation in this section has been obtained directly
from the NXDL Schema file:  *nxdl.xsd*.
First, the basic elements are defined in alphabetical order.
Attributes to an element are indicated immediately following the element
and are preceded with an "@" symbol, such as
**@attribute**.
Then, the common data types used within the NXDL specification are defined.
Pay particular attention to the rules for *validItemName*
and  *validNXClassName*.

..
    2010-11-29,PRJ:
    This contains a lot of special case code to lay out the NXDL chapter.
    It could be cleaner but that would also involve some cooperation on
    anyone who edits nxdl.xsd which is sure to break.  The special case ensures
    the parts come out in the chosen order.  BUT, it is possible that new
    items in nxdl.xsd will not automatically go in the manual.
    Can this be streamlined with some common methods?
    Also, there is probably too much documentation in nxdl.xsd.  Obscures the function.

.. _NXDL.elements:

NXDL Elements
=================

    "#;

const DATATYPE_PREAMBLE: &str = r#"

.. _NXDL.data.types:

NXDL Data Types (internal)
============================

Data types that define the NXDL language are described here.
These data types are defined in the XSD Schema (``nxdl.xsd``)
and are used in various parts of the Schema to define common structures
or to simplify a complicated entry.  While the data types are not intended for
use in NXDL specifications, they define structures that may be used in NXDL specifications.

"#;

const DATATYPE_POSTAMBLE: &str = r#"
**The** ``xs:string`` **data type**
    The ``xs:string`` data type can contain characters,
    line feeds, carriage returns, and tab characters.
    See http://www.w3schools.com/Schema/schema_dtypes_string.asp
    for more details.

**The** ``xs:token`` **data type**
    The ``xs:string`` data type is derived from the
    ``xs:string`` data type.

    The ``xs:token`` data type also contains characters,
    but the XML processor will remove line feeds, carriage returns, tabs,
    leading and trailing spaces, and multiple spaces.
    See http://www.w3schools.com/Schema/schema_dtypes_string.asp
    for more details.
"#;

const CATCH_ALL_SEPARATOR: &str =
    "\n\n..  ++++++++++++++++ start to write these like the XSLT did +++++++++++++++\n\n";

/// The closed set of schema-construct kinds the general visitor handles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstructKind {
    /// `complexType` definition
    ComplexType,
    /// `simpleType` definition
    SimpleType,
    /// `group` definition
    Group,
    /// `element` declaration
    Element,
    /// `attribute` declaration
    Attribute,
}

impl ConstructKind {
    /// Map a tag to a construct kind; any other tag is not a construct
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "complexType" => Some(Self::ComplexType),
            "simpleType" => Some(Self::SimpleType),
            "group" => Some(Self::Group),
            "element" => Some(Self::Element),
            "attribute" => Some(Self::Attribute),
            _ => None,
        }
    }
}

/// Generate the schema chapter from a schema file
pub fn generate(path: impl AsRef<Path>) -> Result<String> {
    let document = Document::from_file(path)?;
    DocGenerator::new(&document).generate()
}

/// The schema document generator
///
/// Holds the parsed tree and the output sink for one run; the tree is
/// traversed exactly once and never mutated.
pub struct DocGenerator<'a> {
    root: &'a Element,
    out: Output,
}

impl<'a> DocGenerator<'a> {
    /// Create a generator over a parsed schema document
    pub fn new(document: &'a Document) -> Self {
        Self {
            root: &document.root,
            out: Output::new(),
        }
    }

    /// Run the full generation pipeline, returning the chapter text
    pub fn generate(mut self) -> Result<String> {
        let root = self.root;

        self.out.line(".. auto-generated by a script");
        self.out.line(ELEMENT_PREAMBLE);

        let mut element_names = ELEMENT_LIST.to_vec();
        element_names.sort_unstable();
        for name in element_names {
            let docpath = format!("/xs:schema//xs:complexType[@name='{}Type']", name);
            let node = select(root, &docpath)
                .into_iter()
                .next()
                .ok_or_else(|| Error::Lookup(format!("no match in schema for {}", docpath)))?;
            self.describe_element(node, name)?;
        }

        self.out.line(DATATYPE_PREAMBLE);

        let mut datatype_names: Vec<&str> = DATATYPE_TABLE.keys().copied().collect();
        datatype_names.sort_unstable();
        for name in datatype_names {
            let docpath = DATATYPE_TABLE[name];
            let node = select(root, docpath)
                .into_iter()
                .next()
                .ok_or_else(|| Error::Lookup(format!("no match in schema for {}", docpath)))?;
            self.describe_datatype(node, name);
        }

        self.out.line(DATATYPE_POSTAMBLE);

        self.out.line(CATCH_ALL_SEPARATOR);

        // Catch-all pass over constructs the curated lists missed
        for child in &root.children {
            self.visit_construct(child, ".. ")?;
        }

        Ok(self.out.into_string())
    }

    /// Emit the full section for one primary element
    fn describe_element(&mut self, node: &Element, name: &str) -> Result<()> {
        self.out.blank();
        self.out.line(format!(".. _NXDL.element.{}:", name));
        self.out.blank();
        self.out.line(name);
        self.out.line("-".repeat(name.len()));
        self.out.blank();
        self.out.line(format!(".. index:: NXDL element; {}", name));
        self.out.blank();

        self.print_docs(node, "")?;

        // The figure is a manually maintained asset; the reference is
        // emitted whether or not the image exists yet.
        self.out.line(figure_reference(name));

        let attributes = select(node, "xs:attribute");
        if !attributes.is_empty() {
            self.out
                .line(format!(".. rubric:: List of Attributes of ``{}`` element", name));
            self.out.blank();

            let mut db = BTreeMap::new();
            for item in attributes {
                let item_name = match item.name() {
                    Some(n) => n.to_string(),
                    None => continue,
                };
                let prefix = match item.attribute("use") {
                    Some(usage) => format!("({}) ", usage),
                    None => String::new(),
                };
                db.insert(item_name, format!("{}{}", prefix, doc_or_default(item)?));
            }
            // required attributes appear first
            for (k, v) in &db {
                if v.starts_with("(required) ") {
                    self.definition_entry(k, v);
                }
            }
            for (k, v) in &db {
                if !v.starts_with("(required) ") {
                    self.definition_entry(k, v);
                }
            }
        }

        let variables = select(node, "xs:sequence//xs:element");
        if !variables.is_empty() {
            self.out
                .line(format!(".. rubric:: List of Variables in ``{}`` element", name));
            self.out.blank();

            let mut db = BTreeMap::new();
            for item in variables {
                let item_name = match item.name() {
                    Some(n) => n.to_string(),
                    None => continue,
                };
                db.insert(item_name, doc_or_default(item)?);
            }
            for (k, v) in &db {
                self.definition_entry(k, v);
            }
        }

        Ok(())
    }

    /// Named extension point for the internal data types
    ///
    /// Intentionally emits nothing; the postamble covers the built-in
    /// string types and the catch-all pass documents the rest.
    fn describe_datatype(&mut self, _node: &Element, _name: &str) {}

    /// Emit one `:key:` definition-list entry with an indented description
    fn definition_entry(&mut self, key: &str, description: &str) {
        self.out.line(format!(":{}:", key));
        self.out.indented_lines("    ", description);
        self.out.blank();
    }

    /// Generic visitor for a schema construct in the catch-all pass
    ///
    /// Silently ignores non-construct tags and anonymous constructs, so
    /// it can be applied blindly over arbitrary children.
    fn visit_construct(&mut self, node: &Element, indent: &str) -> Result<()> {
        let kind = match ConstructKind::from_tag(&node.tag) {
            Some(kind) => kind,
            None => return Ok(()),
        };
        let name = match node.name() {
            Some(name) => name,
            None => return Ok(()),
        };
        let subindent = format!("{}    ", indent);

        let heading = match kind {
            ConstructKind::Attribute => format!("@{}", name),
            _ => name.to_string(),
        };
        self.out.line(format!("{}**{}**", indent, heading));
        self.print_docs(node, indent)?;

        for child in select(node, "xs:attribute") {
            self.visit_construct(child, &subindent)?;
        }
        for child in select(node, "xs:restriction") {
            self.visit_restriction(child, &subindent)?;
        }
        if !select(node, "xs:simpleType/xs:restriction//xs:enumeration").is_empty() {
            // Accepted quirk: a nested restriction that carries
            // enumerations is visited through this path as well.
            for child in select(node, "xs:simpleType/xs:restriction") {
                self.visit_restriction(child, &subindent)?;
            }
        }
        for child in select(node, "xs:sequence//xs:element") {
            self.visit_construct(child, &subindent)?;
        }
        for child in select(node, "xs:simpleType") {
            self.visit_construct(child, &subindent)?;
        }
        for child in select(node, "xs:complexType") {
            self.visit_construct(child, &subindent)?;
        }
        for child in select(node, "xs:complexType//xs:attribute") {
            self.visit_construct(child, &subindent)?;
        }

        Ok(())
    }

    /// Visitor for a `restriction` node: pattern, enumeration, or a
    /// plain reference to the base type
    fn visit_restriction(&mut self, node: &Element, indent: &str) -> Result<()> {
        if node.tag != "restriction" {
            return Ok(());
        }
        let base = node.attribute("base").unwrap_or("");

        let patterns = select(node, "xs:pattern");
        let enumerations = select(node, "xs:enumeration");

        if !patterns.is_empty() {
            self.out.line(format!(
                "{}The value may be any ``{}`` that *also* matches the regular expression::",
                indent, base
            ));
            self.out.line(format!(
                "{}    {}",
                indent,
                patterns[0].attribute("value").unwrap_or("")
            ));
        } else if !enumerations.is_empty() {
            self.out.line(format!("{}one from this list only:", indent));
            for item in enumerations {
                self.visit_enumeration(item, indent)?;
            }
            self.out.line(indent);
        } else {
            self.out.line(format!("{}@{}", indent, base));
        }

        self.print_docs(node, indent)?;
        Ok(())
    }

    /// Visitor for an `enumeration` node: a bulleted literal value
    fn visit_enumeration(&mut self, node: &Element, indent: &str) -> Result<()> {
        if node.tag != "enumeration" {
            return Ok(());
        }
        self.out.line(format!(
            "{}* ``{}``",
            indent,
            node.attribute("value").unwrap_or("")
        ));
        // documentation nests one marker level under the bullet
        self.print_docs(node, &format!("{}  ", indent))?;
        Ok(())
    }

    /// Emit a node's documentation block, blank-line separated, each
    /// line prefixed with `indent`; silent for undocumented nodes
    fn print_docs(&mut self, node: &Element, indent: &str) -> Result<()> {
        if let Some(docs) = doc_from_node(node)? {
            self.out.line(indent);
            self.out.indented_lines(indent, &docs);
            self.out.line(indent);
        }
        Ok(())
    }
}

/// The templated figure-reference block for a primary element
fn figure_reference(name: &str) -> String {
    format!(
        r#"
.. compound::

    .. _fig.nxdl_{name}:

    .. figure:: img/nxdl/nxdl_{name}.jpg
        :alt: fig.nxdl/nxdl_{name}
        :width: {width}

        Graphical representation of the NXDL ``{name}`` element

    .. Images of NXDL structure are generated from nxdl.xsd source
        using the oXygen XML Editor.  Open the nxdl.xsd file and choose the
        "Design" tab.  Identify the structure to be documented and expand
        as needed to show the detail.  Right click and select "Save as Image ..."
        Set the name: "nxdl_{name}.jpg" and move the file into the correct location using
        your operating system's commands.  Commit the revision to version control.
"#,
        name = name,
        width = "80%"
    )
}
