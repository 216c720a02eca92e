//! Shared helpers for the integration tests: build a model tree on disk
//! and run the pipeline over it.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use spec_parser::{Model, Reporter};

pub const LICENSE: &str = "Community-Spec-1.0";
pub const CORE_IRI: &str = "https://spdx.org/rdf/v3/terms/Core";

/// Writes one file under `root`, creating directories as needed.
pub fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// A spec file with the given `##` sections, in order.
pub fn spec_md(name: &str, sections: &[(&str, &str)]) -> String {
    let mut text = format!("SPDX-License-Identifier: {LICENSE}\n\n# {name}\n");
    for (title, body) in sections {
        text.push_str(&format!("\n## {title}\n\n{body}\n"));
    }
    text
}

pub fn namespace_md(name: &str, iri: &str) -> String {
    spec_md(
        name,
        &[
            ("Summary", "A namespace."),
            ("Description", "Namespace description."),
            ("Metadata", &format!("- name: {name}\n- id: {iri}")),
        ],
    )
}

/// A class file; `metadata` must include `- name: <name>`.
pub fn class_md(name: &str, metadata: &str) -> String {
    spec_md(
        name,
        &[
            ("Summary", "A class."),
            ("Description", "Class description."),
            ("Metadata", metadata),
        ],
    )
}

/// A class file with extra sections (`Properties`, `External properties
/// restrictions`).
pub fn class_md_with(name: &str, metadata: &str, extra: &[(&str, &str)]) -> String {
    let mut sections: Vec<(&str, &str)> = vec![
        ("Summary", "A class."),
        ("Description", "Class description."),
        ("Metadata", metadata),
    ];
    sections.extend_from_slice(extra);
    spec_md(name, &sections)
}

pub fn property_md(name: &str, nature: &str, range: &str) -> String {
    spec_md(
        name,
        &[
            ("Summary", "A property."),
            ("Description", "Property description."),
            (
                "Metadata",
                &format!("- name: {name}\n- Nature: {nature}\n- Range: {range}"),
            ),
        ],
    )
}

pub fn vocabulary_md(name: &str, entries: &str) -> String {
    spec_md(
        name,
        &[
            ("Summary", "A vocabulary."),
            ("Description", "Vocabulary description."),
            ("Metadata", &format!("- name: {name}")),
            ("Entries", entries),
        ],
    )
}

pub fn individual_md(name: &str, type_name: &str, values: &str) -> String {
    spec_md(
        name,
        &[
            ("Summary", "An individual."),
            ("Description", "Individual description."),
            ("Metadata", &format!("- name: {name}\n- type: {type_name}")),
            ("Property Values", values),
        ],
    )
}

pub fn datatype_md(name: &str, xsd_base: &str, format: &str) -> String {
    spec_md(
        name,
        &[
            ("Summary", "A datatype."),
            ("Description", "Datatype description."),
            ("Metadata", &format!("- name: {name}\n- SubclassOf: {xsd_base}")),
            ("Format", format),
        ],
    )
}

/// Writes the `Core/Core.md` namespace file.
pub fn core_namespace(root: &Path) {
    write(root, "Core/Core.md", &namespace_md("Core", CORE_IRI));
}

/// Loads and analyzes the tree under `root`.
pub fn load(root: &Path) -> (Model, Reporter) {
    let mut rep = Reporter::new();
    let model = Model::load(root, &mut rep);
    (model, rep)
}

/// A configuration with a fixed timestamp, rooted at `root` and `out`.
pub fn test_config(root: &Path, out: &Path) -> spec_parser::Config {
    use chrono::TimeZone;
    let now = chrono::Utc.with_ymd_and_hms(2024, 5, 2, 12, 0, 0).unwrap();
    spec_parser::Config::new(root, out, now)
}

/// Asserts no errors were reported, printing them otherwise.
pub fn assert_clean(rep: &Reporter) {
    assert!(
        !rep.has_errors(),
        "unexpected errors:\n{}",
        rep.diagnostics()
            .iter()
            .map(|d| format!("  {d}"))
            .collect::<Vec<_>>()
            .join("\n")
    );
}
