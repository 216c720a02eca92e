//! The ontology graph built from on-disk trees: SHACL shapes, node
//! kinds, cardinalities, vocabulary enumerations.

#![allow(clippy::unwrap_used)]

mod helpers;

use helpers::*;
use spec_parser::rdf::vocab::{owl, rdf, rdfs, sh, xsd};
use spec_parser::rdf::{build_graph, Term};
use tempfile::TempDir;

fn iri(tail: &str) -> Term {
    Term::iri(format!("{CORE_IRI}/{tail}"))
}

#[test]
fn abstract_class_gets_type_guard_shape() {
    // S4: Instantiability Abstract produces the sh:not/sh:hasValue
    // guard with a message.
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    core_namespace(root);
    write(
        root,
        "Core/Classes/E.md",
        &class_md("E", "- name: E\n- Instantiability: Abstract"),
    );

    let (model, rep) = load(root);
    assert_clean(&rep);
    let graph = build_graph(&model, &test_config(root, root));

    let class_node = iri("E");
    let shape = graph
        .objects(&class_node, sh::PROPERTY)
        .next()
        .expect("abstract class has a guard shape")
        .clone();
    assert!(shape.is_blank());
    assert_eq!(graph.object(&shape, sh::PATH), Some(&Term::iri(rdf::TYPE)));

    let not = graph.object(&shape, sh::NOT).unwrap().clone();
    assert_eq!(graph.object(&not, sh::HAS_VALUE), Some(&class_node));

    let message = graph.object(&shape, sh::MESSAGE).unwrap();
    assert!(!message.as_literal().unwrap().value.is_empty());
}

#[test]
fn vocabulary_ranged_property_enumerates_entries() {
    // S5: a property typed by a vocabulary gets sh:class, sh:nodeKind
    // sh:IRI and the sh:in enumeration.
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    core_namespace(root);
    write(
        root,
        "Core/Classes/C.md",
        &class_md_with(
            "C",
            "- name: C",
            &[("Properties", "- algo\n  - type: HashAlgorithm")],
        ),
    );
    write(
        root,
        "Core/Properties/algo.md",
        &property_md("algo", "ObjectProperty", "HashAlgorithm"),
    );
    write(
        root,
        "Core/Vocabularies/HashAlgorithm.md",
        &vocabulary_md("HashAlgorithm", "- sha1: Old.\n- sha256: Current."),
    );

    let (model, rep) = load(root);
    assert_clean(&rep);
    let graph = build_graph(&model, &test_config(root, root));

    let shape = graph
        .objects(&iri("C"), sh::PROPERTY)
        .next()
        .unwrap()
        .clone();
    assert_eq!(graph.object(&shape, sh::PATH), Some(&iri("algo")));
    assert_eq!(graph.object(&shape, sh::CLASS), Some(&iri("HashAlgorithm")));
    assert_eq!(graph.object(&shape, sh::NODE_KIND), Some(&Term::iri(sh::IRI)));

    let list_head = graph.object(&shape, sh::IN).unwrap();
    let entries = graph.collect_list(list_head).unwrap();
    assert_eq!(
        entries,
        vec![iri("HashAlgorithm/sha1"), iri("HashAlgorithm/sha256")]
    );

    // Entries are named individuals typed by the vocabulary.
    let sha1 = iri("HashAlgorithm/sha1");
    assert!(graph.has(&sha1, rdf::TYPE, &Term::iri(owl::NAMED_INDIVIDUAL)));
    assert!(graph.has(&sha1, rdf::TYPE, &iri("HashAlgorithm")));
    assert!(graph.has(&sha1, rdfs::LABEL, &Term::plain("sha1")));
}

#[test]
fn node_kind_follows_spdx_id() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    core_namespace(root);
    write(
        root,
        "Core/Classes/Element.md",
        &class_md_with(
            "Element",
            "- name: Element",
            &[("Properties", "- spdxId\n  - type: xsd:anyURI")],
        ),
    );
    write(root, "Core/Classes/Anon.md", &class_md("Anon", "- name: Anon"));
    write(
        root,
        "Core/Properties/spdxId.md",
        &property_md("spdxId", "DataProperty", "xsd:anyURI"),
    );

    let (model, rep) = load(root);
    assert_clean(&rep);
    let graph = build_graph(&model, &test_config(root, root));

    assert!(graph.has(&iri("Element"), sh::NODE_KIND, &Term::iri(sh::IRI)));
    assert!(graph.has(
        &iri("Anon"),
        sh::NODE_KIND,
        &Term::iri(sh::BLANK_NODE_OR_IRI)
    ));
}

#[test]
fn reserved_spdx_id_is_not_emitted() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    core_namespace(root);
    write(
        root,
        "Core/Classes/Element.md",
        &class_md_with(
            "Element",
            "- name: Element",
            &[(
                "Properties",
                "- spdxId\n  - type: xsd:anyURI\n- comment\n  - type: xsd:string",
            )],
        ),
    );
    write(
        root,
        "Core/Properties/spdxId.md",
        &property_md("spdxId", "DataProperty", "xsd:anyURI"),
    );
    write(
        root,
        "Core/Properties/comment.md",
        &property_md("comment", "DataProperty", "xsd:string"),
    );

    let (model, rep) = load(root);
    assert_clean(&rep);
    let graph = build_graph(&model, &test_config(root, root));

    // Only the comment row became a property shape.
    let shapes: Vec<_> = graph.objects(&iri("Element"), sh::PROPERTY).collect();
    assert_eq!(shapes.len(), 1);
    assert_eq!(
        graph.object(shapes[0], sh::PATH),
        Some(&iri("comment"))
    );

    // And the spdxId property itself has no declarations.
    assert!(graph.objects(&iri("spdxId"), rdf::TYPE).next().is_none());
}

#[test]
fn cardinality_only_when_not_default() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    core_namespace(root);
    write(
        root,
        "Core/Classes/C.md",
        &class_md_with(
            "C",
            "- name: C",
            &[(
                "Properties",
                "- one\n  - type: xsd:string\n  - minCount: 1\n  - maxCount: 1\n- many\n  - type: xsd:string",
            )],
        ),
    );
    for name in ["one", "many"] {
        write(
            root,
            &format!("Core/Properties/{name}.md"),
            &property_md(name, "DataProperty", "xsd:string"),
        );
    }

    let (model, rep) = load(root);
    assert_clean(&rep);
    let graph = build_graph(&model, &test_config(root, root));

    let shapes: Vec<_> = graph.objects(&iri("C"), sh::PROPERTY).collect();
    assert_eq!(shapes.len(), 2);

    let one = shapes
        .iter()
        .find(|s| graph.object(s, sh::PATH) == Some(&iri("one")))
        .unwrap();
    assert_eq!(graph.object(one, sh::MIN_COUNT), Some(&Term::integer(1)));
    assert_eq!(graph.object(one, sh::MAX_COUNT), Some(&Term::integer(1)));
    assert!(graph.has(one, sh::DATATYPE, &Term::iri(xsd::STRING)));
    assert!(graph.has(one, sh::NODE_KIND, &Term::iri(sh::LITERAL)));

    let many = shapes
        .iter()
        .find(|s| graph.object(s, sh::PATH) == Some(&iri("many")))
        .unwrap();
    assert!(graph.object(many, sh::MIN_COUNT).is_none());
    assert!(graph.object(many, sh::MAX_COUNT).is_none());
}

#[test]
fn datatype_row_gets_pattern_and_base() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    core_namespace(root);
    write(
        root,
        "Core/Classes/C.md",
        &class_md_with(
            "C",
            "- name: C",
            &[("Properties", "- when\n  - type: DateTime")],
        ),
    );
    write(
        root,
        "Core/Properties/when.md",
        &property_md("when", "DataProperty", "DateTime"),
    );
    write(
        root,
        "Core/Datatypes/DateTime.md",
        &datatype_md("DateTime", "xsd:dateTime", "- pattern: ^\\d{4}$"),
    );

    let (model, rep) = load(root);
    assert_clean(&rep);
    let graph = build_graph(&model, &test_config(root, root));

    let shape = graph.objects(&iri("C"), sh::PROPERTY).next().unwrap().clone();
    assert!(graph.has(&shape, sh::PATTERN, &Term::plain("^\\d{4}$")));
    assert!(graph.has(
        &shape,
        sh::DATATYPE,
        &Term::iri("http://www.w3.org/2001/XMLSchema#dateTime")
    ));
    assert!(graph.has(&shape, sh::NODE_KIND, &Term::iri(sh::LITERAL)));

    // The property's declared range resolves to the datatype's xsd base.
    assert!(graph.has(
        &iri("when"),
        rdfs::RANGE,
        &Term::iri("http://www.w3.org/2001/XMLSchema#dateTime")
    ));
}

#[test]
fn class_parent_and_comment_are_asserted() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    core_namespace(root);
    write(root, "Core/Classes/Animal.md", &class_md("Animal", "- name: Animal"));
    write(
        root,
        "Core/Classes/Dog.md",
        &class_md("Dog", "- name: Dog\n- SubclassOf: Animal"),
    );

    let (model, rep) = load(root);
    assert_clean(&rep);
    let graph = build_graph(&model, &test_config(root, root));

    assert!(graph.has(&iri("Dog"), rdf::TYPE, &Term::iri(owl::CLASS)));
    assert!(graph.has(&iri("Dog"), rdfs::SUB_CLASS_OF, &iri("Animal")));
    assert!(graph.has(&iri("Dog"), rdfs::COMMENT, &Term::lang("A class.", "en")));
}

#[test]
fn individual_carries_creation_info_and_same_as() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    core_namespace(root);
    write(root, "Core/Classes/Agent.md", &class_md("Agent", "- name: Agent"));
    write(
        root,
        "Core/Individuals/SpdxOrg.md",
        &spec_md(
            "SpdxOrg",
            &[
                ("Summary", "The SPDX organization."),
                ("Description", "Text."),
                (
                    "Metadata",
                    "- name: SpdxOrg\n- type: Agent\n- IRI: https://spdx.dev/org",
                ),
                ("Property Values", "- comment: fixed"),
            ],
        ),
    );

    let (model, rep) = load(root);
    assert_clean(&rep);
    let cfg = test_config(root, root);
    let graph = build_graph(&model, &cfg);

    let node = iri("SpdxOrg");
    assert!(graph.has(&node, rdf::TYPE, &Term::iri(owl::NAMED_INDIVIDUAL)));
    assert!(graph.has(&node, rdf::TYPE, &iri("Agent")));
    assert!(graph.has(&node, owl::SAME_AS, &Term::iri("https://spdx.dev/org")));

    let creation_info = format!("{}Core/creationInfo", cfg.base_iri());
    let info = graph.object(&node, &creation_info).unwrap().clone();
    assert!(info.is_blank());
    let created = format!("{}Core/created", cfg.base_iri());
    assert_eq!(
        graph.object(&info, &created),
        Some(&Term::typed("2024-05-02T00:00:00Z", xsd::DATE_TIME))
    );
}

#[test]
fn extension_escape_excludes_foreign_concrete_classes() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    core_namespace(root);
    write(
        root,
        "Extension/Extension.md",
        &namespace_md("Extension", "https://spdx.org/rdf/v3/terms/Extension"),
    );
    write(
        root,
        "Extension/Classes/Extension.md",
        &class_md("Extension", "- name: Extension\n- Instantiability: Abstract"),
    );
    write(
        root,
        "Extension/Classes/CdxExtension.md",
        &class_md(
            "CdxExtension",
            "- name: CdxExtension\n- SubclassOf: Extension",
        ),
    );
    write(root, "Core/Classes/Agent.md", &class_md("Agent", "- name: Agent"));
    write(
        root,
        "Core/Classes/Element.md",
        &class_md_with(
            "Element",
            "- name: Element",
            &[("Properties", "- extension\n  - type: /Extension/Extension")],
        ),
    );
    write(
        root,
        "Core/Properties/extension.md",
        &property_md("extension", "ObjectProperty", "/Extension/Extension"),
    );

    let (model, rep) = load(root);
    assert_clean(&rep);
    let graph = build_graph(&model, &test_config(root, root));

    let shape = graph
        .objects(&iri("Element"), sh::PROPERTY)
        .next()
        .unwrap()
        .clone();
    let not = graph.object(&shape, sh::NOT).unwrap().clone();
    let or_list = graph.object(&not, sh::OR).unwrap();
    let alternatives = graph.collect_list(or_list).unwrap();

    let mut excluded = Vec::new();
    for alternative in &alternatives {
        let class = graph.object(alternative, sh::CLASS).unwrap();
        excluded.push(class.as_iri().unwrap().to_owned());
    }
    // Concrete classes outside the extension hierarchy are disallowed;
    // CdxExtension (derives from Extension) and the abstract Extension
    // itself are not listed.
    assert!(excluded.iter().any(|iri| iri.ends_with("Core/Agent")));
    assert!(excluded.iter().any(|iri| iri.ends_with("Core/Element")));
    assert!(!excluded.iter().any(|iri| iri.contains("Extension")));
}

#[test]
fn ontology_header_is_asserted_once() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    core_namespace(root);

    let (model, rep) = load(root);
    assert_clean(&rep);
    let cfg = test_config(root, root);
    let graph = build_graph(&model, &cfg);

    let ontology = Term::iri(cfg.base_iri());
    assert!(graph.has(&ontology, rdf::TYPE, &Term::iri(owl::ONTOLOGY)));
    assert!(graph
        .object(&ontology, "http://purl.org/dc/terms/created")
        .is_some());
    assert!(graph.has(&ontology, owl::VERSION_IRI, &ontology));
}
