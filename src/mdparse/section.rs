//! The three body shapes a `##` section can take.
//!
//! - [`ContentSection`]: free Markdown, kept verbatim.
//! - [`SingleListSection`]: a flat `- <Key>: <Value>` list.
//! - [`NestedListSection`]: `- <Item>` entries, each followed by indented
//!   `- <Key>: <Value>` lines.
//!
//! List parsing is line-oriented and recoverable: a malformed line or a
//! duplicate key is reported with the file, section, line number and raw
//! line, and parsing continues. Duplicate keys keep their first value.

use std::path::Path;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::report::{ErrorKind, Reporter};

static RE_KEY_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-\s+(\w+):\s+(.+?)\s*$").unwrap());
static RE_TOP_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-\s+([\w/]+)\s*$").unwrap());
static RE_NESTED_KEY_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[ ]{2,4}|\t)-\s+(\w+):\s+(.+?)\s*$").unwrap());

/// A section whose body is free content.
#[derive(Debug, Clone)]
pub struct ContentSection {
    pub content: String,
}

impl ContentSection {
    pub fn parse(body: &str) -> Self {
        Self {
            content: body.trim_end().to_owned(),
        }
    }
}

/// A section whose body is a flat key/value list.
#[derive(Debug, Clone)]
pub struct SingleListSection {
    pub kv: IndexMap<String, String>,
}

impl SingleListSection {
    pub fn parse(body: &str, file: &Path, section: &str, rep: &mut Reporter) -> Self {
        let mut kv = IndexMap::new();
        for (idx, line) in body.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let line_no = idx as u32 + 1;
            let Some(caps) = RE_KEY_VALUE.captures(line) else {
                rep.error_at(
                    ErrorKind::Lexical,
                    file,
                    line_no,
                    format!("single-list parsing error in {section}: `{line}`"),
                );
                continue;
            };
            let key = caps[1].to_owned();
            let value = caps[2].to_owned();
            if kv.contains_key(&key) {
                rep.error_at(
                    ErrorKind::Schema,
                    file,
                    line_no,
                    format!("duplicate key `{key}` in {section}"),
                );
                continue;
            }
            kv.insert(key, value);
        }
        Self { kv }
    }
}

/// A section whose body is a two-level nested list.
#[derive(Debug, Clone)]
pub struct NestedListSection {
    /// Item → inner key/value map, both in file order.
    pub ikv: IndexMap<String, IndexMap<String, String>>,
}

impl NestedListSection {
    pub fn parse(body: &str, file: &Path, section: &str, rep: &mut Reporter) -> Self {
        let mut ikv: IndexMap<String, IndexMap<String, String>> = IndexMap::new();
        // Name of the item the following indented lines attach to.
        let mut current: Option<String> = None;

        for (idx, line) in body.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let line_no = idx as u32 + 1;

            if line.starts_with('-') {
                let Some(caps) = RE_TOP_ITEM.captures(line) else {
                    rep.error_at(
                        ErrorKind::Lexical,
                        file,
                        line_no,
                        format!("top-level nested-list parsing error in {section}: `{line}`"),
                    );
                    current = None;
                    continue;
                };
                let item = caps[1].to_owned();
                if ikv.contains_key(&item) {
                    rep.error_at(
                        ErrorKind::Schema,
                        file,
                        line_no,
                        format!("duplicate item `{item}` in {section}"),
                    );
                } else {
                    ikv.insert(item.clone(), IndexMap::new());
                }
                current = Some(item);
                continue;
            }

            let Some(caps) = RE_NESTED_KEY_VALUE.captures(line) else {
                rep.error_at(
                    ErrorKind::Lexical,
                    file,
                    line_no,
                    format!("nested-list parsing error in {section}: `{line}`"),
                );
                continue;
            };
            let Some(item) = current.as_ref() else {
                rep.error_at(
                    ErrorKind::Lexical,
                    file,
                    line_no,
                    format!("indented line without a list item in {section}: `{line}`"),
                );
                continue;
            };
            let key = caps[1].to_owned();
            let value = caps[2].to_owned();
            let inner = ikv.get_mut(item).expect("current item is registered");
            if inner.contains_key(&key) {
                rep.error_at(
                    ErrorKind::Schema,
                    file,
                    line_no,
                    format!("duplicate key `{key}` under item `{item}` in {section}"),
                );
                continue;
            }
            inner.insert(key, value);
        }
        Self { ikv }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn file() -> PathBuf {
        PathBuf::from("Core/Classes/Element.md")
    }

    #[test]
    fn content_keeps_body_verbatim() {
        let s = ContentSection::parse("line one\n\nline two  \n");
        assert_eq!(s.content, "line one\n\nline two");
    }

    #[test]
    fn single_list_parses_keys_in_order() {
        let mut rep = Reporter::new();
        let s = SingleListSection::parse(
            "- name: Element\n- Instantiability: Abstract",
            &file(),
            "Metadata",
            &mut rep,
        );
        assert!(!rep.has_errors());
        assert_eq!(
            s.kv.iter().collect::<Vec<_>>(),
            [
                (&"name".to_owned(), &"Element".to_owned()),
                (&"Instantiability".to_owned(), &"Abstract".to_owned()),
            ]
        );
    }

    #[test]
    fn single_list_reports_malformed_line() {
        let mut rep = Reporter::new();
        let s = SingleListSection::parse("- name Element", &file(), "Metadata", &mut rep);
        assert!(s.kv.is_empty());
        assert_eq!(rep.error_count(), 1);
        let msg = rep.diagnostics()[0].to_string();
        assert!(msg.contains("Metadata"), "{msg}");
        assert!(msg.contains("Element.md:1"), "{msg}");
    }

    #[test]
    fn single_list_duplicate_keeps_first() {
        let mut rep = Reporter::new();
        let s = SingleListSection::parse(
            "- name: First\n- name: Second",
            &file(),
            "Metadata",
            &mut rep,
        );
        assert_eq!(s.kv["name"], "First");
        assert_eq!(rep.error_count(), 1);
    }

    #[test]
    fn nested_list_parses_items_and_inner_keys() {
        let mut rep = Reporter::new();
        let body = "\
- comment
  - type: xsd:string
  - maxCount: 1
- extension
  - type: /Extension/Extension";
        let s = NestedListSection::parse(body, &file(), "Properties", &mut rep);
        assert!(!rep.has_errors());
        assert_eq!(s.ikv.len(), 2);
        assert_eq!(s.ikv["comment"]["type"], "xsd:string");
        assert_eq!(s.ikv["comment"]["maxCount"], "1");
        assert_eq!(s.ikv["extension"]["type"], "/Extension/Extension");
    }

    #[test]
    fn nested_list_accepts_tab_and_wide_indent() {
        let mut rep = Reporter::new();
        let body = "- a\n\t- type: xsd:string\n- b\n    - minCount: 1";
        let s = NestedListSection::parse(body, &file(), "Properties", &mut rep);
        assert!(!rep.has_errors());
        assert_eq!(s.ikv["a"]["type"], "xsd:string");
        assert_eq!(s.ikv["b"]["minCount"], "1");
    }

    #[test]
    fn nested_list_item_may_be_fully_qualified() {
        let mut rep = Reporter::new();
        let body = "- /Core/creationInfo\n  - minCount: 1";
        let s = NestedListSection::parse(body, &file(), "Properties", &mut rep);
        assert!(!rep.has_errors());
        assert_eq!(s.ikv["/Core/creationInfo"]["minCount"], "1");
    }

    #[test]
    fn nested_list_reports_orphan_indented_line() {
        let mut rep = Reporter::new();
        let body = "  - type: xsd:string";
        let s = NestedListSection::parse(body, &file(), "Properties", &mut rep);
        assert!(s.ikv.is_empty());
        assert_eq!(rep.error_count(), 1);
    }

    #[test]
    fn nested_list_reports_malformed_lines_with_location() {
        let mut rep = Reporter::new();
        let body = "- ok\n  - type xsd:string";
        let _ = NestedListSection::parse(body, &file(), "Properties", &mut rep);
        assert_eq!(rep.error_count(), 1);
        assert!(rep.diagnostics()[0].to_string().contains(":2"));
    }
}
