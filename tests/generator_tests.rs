//! End-to-end tests for the schema document generator
//!
//! These run the full pipeline against a minimal but complete schema
//! covering every primary element and internal data type.

use nxdl_doctools::documents::Document;
use nxdl_doctools::generator::{self, DocGenerator};
use nxdl_doctools::Error;

/// A minimal schema defining all curated primary elements and data types
const SCHEMA: &str = r#"<?xml version="1.0"?>
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
    <xs:complexType name="fieldType">
        <xs:annotation>
            <xs:documentation>
                A data field holds the values.
            </xs:documentation>
        </xs:annotation>
        <xs:sequence>
            <xs:element name="enumeration">
                <xs:annotation>
                    <xs:documentation>the allowed values</xs:documentation>
                </xs:annotation>
            </xs:element>
        </xs:sequence>
        <xs:attribute name="units">
            <xs:annotation>
                <xs:documentation>the units</xs:documentation>
            </xs:annotation>
        </xs:attribute>
        <xs:attribute name="axis"/>
        <xs:attribute name="name" use="required">
            <xs:annotation>
                <xs:documentation>the name</xs:documentation>
            </xs:annotation>
        </xs:attribute>
        <xs:attribute name="type" use="required"/>
    </xs:complexType>
    <xs:complexType name="attributeType"/>
    <xs:complexType name="definitionType"/>
    <xs:complexType name="dimensionsType">
        <xs:attribute name="rank">
            <xs:simpleType>
                <xs:restriction base="xs:string">
                    <xs:enumeration value="scalar"/>
                    <xs:enumeration value="vector"/>
                </xs:restriction>
            </xs:simpleType>
        </xs:attribute>
    </xs:complexType>
    <xs:complexType name="docType"/>
    <xs:complexType name="enumerationType"/>
    <xs:complexType name="groupType"/>
    <xs:complexType name="linkType"/>
    <xs:complexType name="symbolsType"/>
    <xs:complexType name="basicComponent"/>
    <xs:simpleType name="validItemName">
        <xs:restriction base="xs:token">
            <xs:pattern value="[A-Za-z_][A-Za-z0-9_]*"/>
        </xs:restriction>
    </xs:simpleType>
    <xs:simpleType name="validNXClassName">
        <xs:restriction base="xs:token">
            <xs:pattern value="NX.+"/>
        </xs:restriction>
    </xs:simpleType>
    <xs:simpleType name="validTargetName">
        <xs:restriction base="xs:token"/>
    </xs:simpleType>
    <xs:simpleType name="nonNegativeUnbounded">
        <xs:restriction base="xs:string">
            <xs:enumeration value="unbounded">
                <xs:annotation>
                    <xs:documentation>no upper limit</xs:documentation>
                </xs:annotation>
            </xs:enumeration>
        </xs:restriction>
    </xs:simpleType>
</xs:schema>
"#;

fn generate_chapter() -> String {
    let document = Document::from_string(SCHEMA).unwrap();
    DocGenerator::new(&document).generate().unwrap()
}

#[test]
fn test_chapter_has_preamble_and_postamble() {
    let chapter = generate_chapter();

    assert!(chapter.starts_with(".. auto-generated by a script\n"));
    assert!(chapter.contains("NXDL Elements and Data Types"));
    assert!(chapter.contains(".. _NXDL.elements:"));
    assert!(chapter.contains(".. _NXDL.data.types:"));
    assert!(chapter.contains("**The** ``xs:string`` **data type**"));
    assert!(chapter.contains("**The** ``xs:token`` **data type**"));
}

#[test]
fn test_primary_elements_in_alphabetical_order() {
    let chapter = generate_chapter();

    let positions: Vec<usize> = [
        "attribute",
        "definition",
        "dimensions",
        "doc",
        "enumeration",
        "field",
        "group",
        "link",
        "symbols",
    ]
    .iter()
    .map(|name| {
        chapter
            .find(&format!(".. _NXDL.element.{}:", name))
            .unwrap_or_else(|| panic!("missing section for {}", name))
    })
    .collect();

    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted);
}

#[test]
fn test_field_section_layout() {
    let chapter = generate_chapter();

    assert!(chapter.contains("field\n-----\n"));
    assert!(chapter.contains(".. index:: NXDL element; field"));
    assert!(chapter.contains("A data field holds the values."));
    assert!(chapter.contains(".. _fig.nxdl_field:"));
    assert!(chapter.contains("img/nxdl/nxdl_field.jpg"));
    assert!(chapter.contains(".. rubric:: List of Attributes of ``field`` element"));
    assert!(chapter.contains(".. rubric:: List of Variables in ``field`` element"));
}

#[test]
fn test_required_attributes_first_then_alphabetical() {
    let chapter = generate_chapter();

    let name = chapter.find(":name:").expect("missing :name: entry");
    let type_ = chapter.find(":type:").expect("missing :type: entry");
    let axis = chapter.find(":axis:").expect("missing :axis: entry");
    let units = chapter.find(":units:").expect("missing :units: entry");

    // required (name, type) before optional (axis, units), each group sorted
    assert!(name < type_);
    assert!(type_ < axis);
    assert!(axis < units);
}

#[test]
fn test_required_marker_prefixes_documentation() {
    let chapter = generate_chapter();

    assert!(chapter.contains(":name:\n    (required) the name\n"));
    assert!(chapter.contains(":units:\n    the units\n"));
}

#[test]
fn test_undocumented_attribute_gets_default_text() {
    let chapter = generate_chapter();

    assert!(chapter.contains(":axis:\n    no documentation\n"));
    assert!(chapter.contains(":type:\n    (required) no documentation\n"));
}

#[test]
fn test_variables_listed_with_documentation() {
    let chapter = generate_chapter();

    assert!(chapter.contains(":enumeration:\n    the allowed values\n"));
}

#[test]
fn test_catch_all_pass_covers_root_constructs() {
    let chapter = generate_chapter();

    assert!(chapter.contains(".. **fieldType**"));
    assert!(chapter.contains(".. **basicComponent**"));
    assert!(chapter.contains(".. **validItemName**"));
}

#[test]
fn test_static_scaffolding_reproduced_verbatim() {
    let chapter = generate_chapter();

    assert!(chapter.contains("..\n    2010-11-29,PRJ:"));
    assert!(chapter.contains(
        "..  ++++++++++++++++ start to write these like the XSLT did +++++++++++++++"
    ));
}

#[test]
fn test_attribute_with_nested_restriction_lists_its_values() {
    let chapter = generate_chapter();

    assert!(chapter.contains("**@rank**"));
    assert!(chapter.contains("* ``scalar``"));
    assert!(chapter.contains("* ``vector``"));
}

#[test]
fn test_catch_all_emits_pattern_restrictions() {
    let chapter = generate_chapter();

    assert!(chapter.contains("regular expression"));
    assert!(chapter.contains("[A-Za-z_][A-Za-z0-9_]*"));
    assert!(chapter.contains("NX.+"));
}

#[test]
fn test_catch_all_emits_enumeration_values() {
    let chapter = generate_chapter();

    assert!(chapter.contains("one from this list only:"));
    assert!(chapter.contains("* ``unbounded``"));
    assert!(chapter.contains("no upper limit"));
}

#[test]
fn test_missing_primary_element_is_lookup_error() {
    let incomplete = SCHEMA.replace("fieldType", "renamedType");
    let document = Document::from_string(&incomplete).unwrap();

    let err = DocGenerator::new(&document).generate().unwrap_err();
    match err {
        Error::Lookup(msg) => assert!(msg.contains("fieldType"), "message was: {}", msg),
        other => panic!("expected lookup error, got {:?}", other),
    }
}

#[test]
fn test_missing_datatype_is_lookup_error() {
    let incomplete = SCHEMA.replace("validItemName", "otherName");
    let document = Document::from_string(&incomplete).unwrap();

    let err = DocGenerator::new(&document).generate().unwrap_err();
    match err {
        Error::Lookup(msg) => assert!(msg.contains("validItemName"), "message was: {}", msg),
        other => panic!("expected lookup error, got {:?}", other),
    }
}

#[test]
fn test_generate_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nxdl.xsd");
    std::fs::write(&path, SCHEMA).unwrap();

    let chapter = generator::generate(&path).unwrap();
    assert_eq!(chapter, generate_chapter());
}

#[test]
fn test_generate_missing_file_is_parse_error() {
    let err = generator::generate("/no/such/nxdl.xsd").unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
}

#[test]
fn test_malformed_documentation_aborts_generation() {
    let bad = SCHEMA.replace(
        "A data field holds the values.",
        "A data field holds the values.\n        under-indented line",
    );
    let document = Document::from_string(&bad).unwrap();

    // the replacement produces a line indented less than its anchor
    let result = DocGenerator::new(&document).generate();
    assert!(matches!(result, Err(Error::Format(_))));
}
