//! Assertion helpers for headless scenario checks.
//!
//! Each check inspects the first element matching its selector, except
//! `assert_count`, which counts every match.

use switchboard_dom::{Document, NodeId, Selector};

/// Assertion result with structured failure details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssertionResult {
    Passed,
    Failed { code: String, message: String },
}

impl AssertionResult {
    fn failed(code: &str, message: String) -> Self {
        AssertionResult::Failed {
            code: code.to_string(),
            message,
        }
    }
}

fn first_match(doc: &Document, selector: &Selector) -> Result<NodeId, AssertionResult> {
    doc.select(selector).into_iter().next().ok_or_else(|| {
        AssertionResult::failed(
            "missing_element",
            format!("{selector}: element not found"),
        )
    })
}

fn describe(value: Option<&str>) -> String {
    match value {
        Some(value) => format!("'{value}'"),
        None => "nothing".to_string(),
    }
}

pub fn evaluate_assert_class(
    doc: &Document,
    selector: &Selector,
    class: &str,
    present: bool,
) -> AssertionResult {
    let node = match first_match(doc, selector) {
        Ok(node) => node,
        Err(failed) => return failed,
    };
    match (doc.has_class(node, class), present) {
        (true, true) | (false, false) => AssertionResult::Passed,
        (false, true) => AssertionResult::failed(
            "class_missing",
            format!("{selector}: expected class '{class}'"),
        ),
        (true, false) => AssertionResult::failed(
            "class_present",
            format!("{selector}: unexpected class '{class}'"),
        ),
    }
}

pub fn evaluate_assert_count(doc: &Document, selector: &Selector, expected: usize) -> AssertionResult {
    let count = doc.select(selector).len();
    if count == expected {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "count_mismatch",
            format!("{selector}: expected {expected} matches, got {count}"),
        )
    }
}

pub fn evaluate_assert_attr(
    doc: &Document,
    selector: &Selector,
    name: &str,
    expected: Option<&str>,
) -> AssertionResult {
    let node = match first_match(doc, selector) {
        Ok(node) => node,
        Err(failed) => return failed,
    };
    let actual = doc.attr(node, name);
    if actual == expected {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "attr_mismatch",
            format!(
                "{selector}: expected {name}={}, got {}",
                describe(expected),
                describe(actual)
            ),
        )
    }
}

pub fn evaluate_assert_style(
    doc: &Document,
    selector: &Selector,
    property: &str,
    expected: Option<&str>,
) -> AssertionResult {
    let node = match first_match(doc, selector) {
        Ok(node) => node,
        Err(failed) => return failed,
    };
    let actual = doc.style(node, property);
    if actual == expected {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "style_mismatch",
            format!(
                "{selector}: expected {property}: {}, got {}",
                describe(expected),
                describe(actual)
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use switchboard_dom::NodeSpec;

    fn doc() -> Document {
        Document::from_specs(&[
            NodeSpec::new("div")
                .id("m")
                .class("modal show")
                .attr("aria-modal", "true")
                .style("display", "block"),
            NodeSpec::new("div").class("modal"),
        ])
    }

    fn sel(source: &str) -> Selector {
        Selector::parse(source).unwrap()
    }

    fn code(result: AssertionResult) -> Option<String> {
        match result {
            AssertionResult::Passed => None,
            AssertionResult::Failed { code, .. } => Some(code),
        }
    }

    #[test]
    fn test_class() {
        let doc = doc();
        assert_eq!(evaluate_assert_class(&doc, &sel("#m"), "show", true), AssertionResult::Passed);
        assert_eq!(evaluate_assert_class(&doc, &sel("#m"), "fade", false), AssertionResult::Passed);
        assert_eq!(
            code(evaluate_assert_class(&doc, &sel("#m"), "show", false)).as_deref(),
            Some("class_present")
        );
        assert_eq!(
            code(evaluate_assert_class(&doc, &sel("#gone"), "show", true)).as_deref(),
            Some("missing_element")
        );
    }

    #[test]
    fn test_count() {
        let doc = doc();
        assert_eq!(evaluate_assert_count(&doc, &sel(".modal"), 2), AssertionResult::Passed);
        assert_eq!(evaluate_assert_count(&doc, &sel(".backdrop"), 0), AssertionResult::Passed);
        assert_eq!(
            evaluate_assert_count(&doc, &sel(".modal.show"), 2),
            AssertionResult::Failed {
                code: "count_mismatch".to_string(),
                message: ".modal.show: expected 2 matches, got 1".to_string(),
            }
        );
    }

    #[test]
    fn test_attr_and_style() {
        let doc = doc();
        assert_eq!(
            evaluate_assert_attr(&doc, &sel("#m"), "aria-modal", Some("true")),
            AssertionResult::Passed
        );
        assert_eq!(
            evaluate_assert_attr(&doc, &sel("#m"), "aria-hidden", None),
            AssertionResult::Passed
        );
        assert_eq!(
            evaluate_assert_style(&doc, &sel("#m"), "display", Some("none")),
            AssertionResult::Failed {
                code: "style_mismatch".to_string(),
                message: "#m: expected display: 'none', got 'block'".to_string(),
            }
        );
    }
}
