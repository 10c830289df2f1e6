//! Namespace-aware path evaluation over roxmltree DOM trees.
//!
//! ISO 19115/19119 documents qualify every element with one of three
//! namespaces (gmd, gco, srv). Field extraction addresses elements with a
//! small XPath-like subset: `/` child steps, `//` descendant steps, and
//! `prefix:name` element tests. Example:
//! `.//gmd:extent//gmd:description/gco:CharacterString`.

use roxmltree::Node;

use crate::config::{GCO_NS, GMD_NS, SRV_NS};

/// Axis of a single location step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Child,
    Descendant,
}

/// A parsed location step: axis plus namespace-qualified element test.
#[derive(Debug, Clone, Copy)]
struct Step<'p> {
    axis: Axis,
    prefix: &'p str,
    name: &'p str,
}

/// Resolve a namespace prefix to its bound URI.
///
/// Unknown prefixes (including the empty prefix) resolve to `None` and
/// match elements without a namespace.
fn namespace_uri(prefix: &str) -> Option<&'static str> {
    match prefix {
        "gmd" => Some(GMD_NS),
        "gco" => Some(GCO_NS),
        "srv" => Some(SRV_NS),
        _ => None,
    }
}

/// Parse a path expression into location steps.
///
/// A leading `.` refers to the context node, an empty segment (from `//`)
/// switches the following step to the descendant axis.
fn parse_steps(path: &str) -> Vec<Step<'_>> {
    let mut steps = Vec::new();
    let mut descendant = false;

    for segment in path.split('/') {
        if segment.is_empty() {
            descendant = true;
            continue;
        }
        if segment == "." {
            continue;
        }
        let (prefix, name) = segment.split_once(':').unwrap_or(("", segment));
        steps.push(Step {
            axis: if descendant {
                Axis::Descendant
            } else {
                Axis::Child
            },
            prefix,
            name,
        });
        descendant = false;
    }

    steps
}

/// Check whether a node matches a step's element test.
fn matches(node: Node<'_, '_>, step: Step<'_>) -> bool {
    node.is_element()
        && node.tag_name().name() == step.name
        && node.tag_name().namespace() == namespace_uri(step.prefix)
}

/// Evaluate steps from a context node, preserving document order.
fn eval_steps<'a, 'input>(from: Node<'a, 'input>, steps: &[Step<'_>]) -> Vec<Node<'a, 'input>> {
    let mut current = vec![from];

    for step in steps {
        let mut next: Vec<Node<'a, 'input>> = Vec::new();
        for node in &current {
            match step.axis {
                Axis::Child => {
                    next.extend(node.children().filter(|c| matches(*c, *step)));
                }
                Axis::Descendant => {
                    // descendants() yields the node itself first; `//` selects
                    // strict descendants only.
                    next.extend(node.descendants().skip(1).filter(|d| matches(*d, *step)));
                }
            }
        }
        // Overlapping descendant branches can select the same node twice.
        next.sort_by_key(|n| n.id().get());
        next.dedup_by_key(|n| n.id().get());
        current = next;
        if current.is_empty() {
            break;
        }
    }

    current
}

/// Find the first element matching a path, in document order.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use fairmeta_assessor::xml::find_first;
///
/// let xml = r#"<root><a><b>hit</b></a><b>late</b></root>"#;
/// let doc = Document::parse(xml).unwrap();
///
/// let b = find_first(doc.root_element(), ".//b").unwrap();
/// assert_eq!(b.text(), Some("hit"));
/// ```
pub fn find_first<'a, 'input>(from: Node<'a, 'input>, path: &str) -> Option<Node<'a, 'input>> {
    eval_steps(from, &parse_steps(path)).into_iter().next()
}

/// Find all elements matching a path, in document order.
pub fn find_all<'a, 'input>(from: Node<'a, 'input>, path: &str) -> Vec<Node<'a, 'input>> {
    eval_steps(from, &parse_steps(path))
}

/// Get the trimmed text content of a node.
///
/// Whitespace-only content counts as absent.
pub fn node_text(node: Node<'_, '_>) -> Option<String> {
    node.text()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Find the first element matching a path and return its trimmed text.
///
/// Returns `None` when no element matches or the first match has no text;
/// later matches are not consulted.
pub fn find_text(from: Node<'_, '_>, path: &str) -> Option<String> {
    find_first(from, path).and_then(node_text)
}
