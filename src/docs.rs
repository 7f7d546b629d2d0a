//! Documentation extraction
//!
//! Schema constructs carry free-text documentation in
//! `annotation/documentation` children. The text is hand-written inside
//! an indented XML file, so each block carries its own internal
//! indentation that must be normalized before it can be reused: the
//! first content line anchors the indent, and every continuation line
//! must be indented at least that much.

use crate::documents::Element;
use crate::error::{FormatError, Result};
use crate::xpath::select;

/// Fallback text for undocumented attributes and variables
pub const NO_DOCUMENTATION: &str = "no documentation";

/// Extract the documentation block attached to a schema node
///
/// Returns `Ok(None)` unless the node has exactly one
/// `annotation/documentation` descendant. Undocumented nodes are common
/// and intentional, so zero or multiple matches are not an error.
/// Inconsistent indentation inside the block is an error, because
/// silently guessing the author's intent would corrupt the output.
pub fn doc_from_node(node: &Element) -> Result<Option<String>> {
    let docnodes = select(node, "xs:annotation//xs:documentation");
    if docnodes.len() != 1 {
        return Ok(None);
    }

    let text = match &docnodes[0].text {
        Some(text) => text.trim_start_matches('\n'),
        None => return Ok(Some(String::new())),
    };

    Ok(Some(normalize_indent(text)?))
}

/// Extract documentation, defaulting to [`NO_DOCUMENTATION`]
pub fn doc_or_default(node: &Element) -> Result<String> {
    Ok(doc_from_node(node)?.unwrap_or_else(|| NO_DOCUMENTATION.to_string()))
}

/// Normalize the internal indentation of a documentation block
///
/// The first line's indentation anchors the block. When the first line
/// has no indentation at all (text starting on the open-tag line), the
/// anchor is inferred from the second and third lines instead and the
/// first line passes through unchanged.
fn normalize_indent(text: &str) -> Result<String> {
    let lines: Vec<&str> = text.lines().collect();

    if lines.len() < 2 {
        return Ok(text.trim_start().to_string());
    }

    let indent0 = indent_width(lines[0]);
    let indent1 = indent_width(lines[1]);
    let indent2 = if lines.len() > 2 {
        indent_width(lines[2])
    } else {
        0
    };

    let (indent, mut out) = if indent0 == 0 {
        (indent1.max(indent2), lines[0].to_string())
    } else {
        (indent0, strip_indent(lines[0], indent0))
    };

    for line in &lines[1..] {
        if !region_is_blank(line, indent) {
            return Err(FormatError::new("Something wrong with indentation on this line")
                .with_line(*line)
                .into());
        }
        out.push('\n');
        out.push_str(&strip_indent(line, indent));
    }

    // leading whitespace only; trailing blank lines are the author's
    Ok(out.trim_start().to_string())
}

/// Number of leading whitespace characters on a line
fn indent_width(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// Check that the first `indent` characters of a line are all whitespace
fn region_is_blank(line: &str, indent: usize) -> bool {
    line.chars().take(indent).all(|c| c.is_whitespace())
}

/// Drop the first `indent` characters of a line
fn strip_indent(line: &str, indent: usize) -> String {
    line.chars().skip(indent).collect()
}
