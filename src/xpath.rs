//! Path queries over the schema tree
//!
//! The curated data-type table and the traversal match rules are
//! XPath-style strings such as `/xs:schema//xs:complexType[@name='docType']`
//! or `xs:sequence//xs:element`. This module parses that small dialect
//! (child steps, `//` descendant steps, attribute-equality predicates)
//! and evaluates it against an [`Element`] tree.
//!
//! Prefixes (`xs:`) are parsed but ignored; elements are matched by
//! local name.

use crate::documents::Element;

/// A single step in a path expression
#[derive(Debug, Clone, PartialEq)]
pub struct PathStep {
    /// The kind of step
    pub kind: PathStepKind,
    /// The local name to match (`*` matches any element)
    pub name: String,
    /// Optional namespace prefix, not used for matching
    pub prefix: Option<String>,
    /// Optional `[@attr='value']` predicate
    pub predicate: Option<Predicate>,
}

/// Kind of path step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStepKind {
    /// Child axis (default)
    Child,
    /// Descendant-or-self axis (`//`)
    DescendantOrSelf,
}

/// An attribute-equality predicate, `[@attr='value']`
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    /// Attribute local name
    pub attr: String,
    /// Required attribute value
    pub value: String,
}

impl PathStep {
    /// Parse a step from a string
    pub fn parse(step: &str) -> Self {
        let step = step.trim();

        if step == "//" {
            return Self {
                kind: PathStepKind::DescendantOrSelf,
                name: String::new(),
                prefix: None,
                predicate: None,
            };
        }

        // Extract predicate if present
        let (name_part, predicate) = if let Some(bracket_pos) = step.find('[') {
            let name = &step[..bracket_pos];
            let pred_end = step.rfind(']').unwrap_or(step.len());
            let pred = Predicate::parse(&step[bracket_pos + 1..pred_end]);
            (name, pred)
        } else {
            (step, None)
        };

        // Split off the namespace prefix
        let (prefix, name) = if let Some(colon_pos) = name_part.find(':') {
            (
                Some(name_part[..colon_pos].to_string()),
                name_part[colon_pos + 1..].to_string(),
            )
        } else {
            (None, name_part.to_string())
        };

        Self {
            kind: PathStepKind::Child,
            name,
            prefix,
            predicate,
        }
    }

    /// Check if this step matches an element
    pub fn matches(&self, element: &Element) -> bool {
        if self.name != "*" && self.name != element.tag {
            return false;
        }
        match &self.predicate {
            Some(pred) => element.attribute(&pred.attr) == Some(pred.value.as_str()),
            None => true,
        }
    }
}

impl Predicate {
    /// Parse a predicate body of the form `@attr='value'` or `@attr="value"`
    fn parse(body: &str) -> Option<Self> {
        let body = body.trim().strip_prefix('@')?;
        let (attr, value) = body.split_once('=')?;
        let value = value.trim();
        let value = value
            .strip_prefix('\'')
            .and_then(|v| v.strip_suffix('\''))
            .or_else(|| value.strip_prefix('"').and_then(|v| v.strip_suffix('"')))?;
        Some(Self {
            attr: attr.trim().to_string(),
            value: value.to_string(),
        })
    }
}

/// A parsed path query
#[derive(Debug, Clone)]
pub struct PathQuery {
    /// The raw path expression
    pub path: String,
    /// Whether the path is anchored at the context element
    pub absolute: bool,
    /// Parsed steps
    pub steps: Vec<PathStep>,
}

impl PathQuery {
    /// Parse a path expression
    pub fn parse(path: impl Into<String>) -> Self {
        let path = path.into();
        let trimmed = path.trim();
        let absolute = trimmed.starts_with('/') && !trimmed.starts_with("//");

        let steps = split_path(trimmed).into_iter().map(PathStep::parse).collect();

        Self {
            path,
            absolute,
            steps,
        }
    }

    /// Evaluate the query against a context element
    ///
    /// Absolute paths match their first step against the context element
    /// itself; relative paths start from its children.
    pub fn select<'a>(&self, context: &'a Element) -> Vec<&'a Element> {
        let mut current = vec![context];
        let mut first_named = true;

        for step in &self.steps {
            match step.kind {
                PathStepKind::DescendantOrSelf => {
                    current = expand_descendants(&current);
                    first_named = false;
                }
                PathStepKind::Child => {
                    if first_named && self.absolute {
                        current.retain(|e| step.matches(e));
                    } else {
                        current = current
                            .iter()
                            .flat_map(|e| e.children.iter())
                            .filter(|e| step.matches(e))
                            .collect();
                    }
                    first_named = false;
                }
            }
        }

        current
    }
}

/// Select all elements matching a path expression, relative to `context`
pub fn select<'a>(context: &'a Element, path: &str) -> Vec<&'a Element> {
    PathQuery::parse(path).select(context)
}

/// Expand a node set to self plus all descendants, deduplicated
fn expand_descendants<'a>(nodes: &[&'a Element]) -> Vec<&'a Element> {
    let mut out: Vec<&'a Element> = Vec::new();
    for node in nodes {
        push_unique(&mut out, node);
        for desc in node.descendants() {
            push_unique(&mut out, desc);
        }
    }
    out
}

fn push_unique<'a>(out: &mut Vec<&'a Element>, node: &'a Element) {
    if !out.iter().any(|e| std::ptr::eq(*e, node)) {
        out.push(node);
    }
}

/// Split a path expression into step strings, with `//` as its own step
fn split_path(path: &str) -> Vec<&str> {
    let path = path.trim();
    if path.is_empty() {
        return Vec::new();
    }

    let mut steps = Vec::new();
    let mut current_start = 0;

    if path.starts_with("//") {
        steps.push("//");
        current_start = 2;
    } else if path.starts_with('/') {
        current_start = 1;
    }

    let mut in_predicate = 0;
    let bytes = path.as_bytes();
    let len = bytes.len();
    let mut i = current_start;

    while i < len {
        match bytes[i] {
            b'[' => {
                in_predicate += 1;
                i += 1;
            }
            b']' => {
                in_predicate -= 1;
                i += 1;
            }
            b'/' if in_predicate == 0 => {
                let is_double = i + 1 < len && bytes[i + 1] == b'/';

                if i > current_start {
                    steps.push(&path[current_start..i]);
                }

                if is_double {
                    steps.push("//");
                    current_start = i + 2;
                    i += 2;
                } else {
                    current_start = i + 1;
                    i += 1;
                }
            }
            _ => {
                i += 1;
            }
        }
    }

    if current_start < path.len() {
        steps.push(&path[current_start..]);
    }

    steps
}
