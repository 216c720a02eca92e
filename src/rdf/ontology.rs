//! The model → graph walk: OWL declarations plus the SHACL constraint
//! layer.
//!
//! Walk order is the registration order of the model arenas, so the graph
//! and everything serialized from it is stable across runs.

use crate::config::Config;
use crate::model::{Class, MaxCount, Model, Nature, TypeRef};
use crate::rdf::graph::Graph;
use crate::rdf::term::Term;
use crate::rdf::vocab::{dcterms, owl, rdf, rdfs, sh, vs, xsd};

/// The reserved identity property: never emitted as a shape or as an
/// ontology property.
const RESERVED_SPDX_ID: &str = "/Core/spdxId";
/// The extension escape type: rows of this type constrain what the value
/// must NOT be.
const EXTENSION_CLASS: &str = "/Extension/Extension";

/// Builds the ontology graph for an analyzed model.
pub fn build_graph(model: &Model, cfg: &Config) -> Graph {
    let mut g = Graph::new();
    let base = cfg.base_iri();

    g.bind("spdx", &base);
    g.bind("xsd", xsd::NS);
    g.bind("owl", owl::NS);
    g.bind("rdf", rdf::NS);
    g.bind("rdfs", rdfs::NS);
    g.bind("sh", sh::NS);
    g.bind("dcterms", dcterms::NS);
    g.bind("vs", vs::NS);

    emit_ontology_header(&mut g, cfg, &base);

    for class in &model.classes {
        emit_class(&mut g, model, class);
    }
    for property in &model.properties {
        emit_property(&mut g, model, property);
    }
    for vocab in &model.vocabularies {
        emit_vocabulary(&mut g, vocab);
    }
    for individual in &model.individuals {
        emit_individual(&mut g, model, individual, cfg, &base);
    }

    tracing::debug!(triples = g.len(), "ontology graph built");
    g
}

fn emit_ontology_header(g: &mut Graph, cfg: &Config, base: &str) {
    let node = Term::iri(base);
    g.add(node.clone(), rdf::TYPE, Term::iri(owl::ONTOLOGY));
    g.add(node.clone(), dcterms::TITLE, Term::lang(&cfg.ontology.title, "en"));
    g.add(
        node.clone(),
        dcterms::ABSTRACT,
        Term::lang(&cfg.ontology.abstract_text, "en"),
    );
    g.add(node.clone(), dcterms::CREATOR, Term::plain(&cfg.ontology.creator));
    g.add(
        node.clone(),
        dcterms::CREATED,
        Term::typed(&cfg.ontology.created, xsd::DATE),
    );
    g.add(node.clone(), dcterms::LICENSE, Term::iri(&cfg.ontology.license));
    g.add(node, owl::VERSION_IRI, Term::iri(base));
}

// ============================================================================
// CLASSES
// ============================================================================

fn emit_class(g: &mut Graph, model: &Model, class: &Class) {
    let node = Term::iri(&class.iri);
    g.add(node.clone(), rdf::TYPE, Term::iri(owl::CLASS));
    if !class.summary.is_empty() {
        g.add(node.clone(), rdfs::COMMENT, Term::lang(&class.summary, "en"));
    }

    if let Some(parent_fqn) = &class.fqsupercname {
        if let Some(pid) = model.class_by_fqn(parent_fqn) {
            g.add(
                node.clone(),
                rdfs::SUB_CLASS_OF,
                Term::iri(&model.class(pid).iri),
            );
        }
    }

    if class.is_abstract() {
        emit_abstract_shape(g, class, &node);
    }

    let node_kind = if class.has_spdx_id() {
        sh::IRI
    } else {
        sh::BLANK_NODE_OR_IRI
    };
    g.add(node.clone(), sh::NODE_KIND, Term::iri(node_kind));

    if !class.properties.is_empty() {
        g.add(node.clone(), rdf::TYPE, Term::iri(sh::NODE_SHAPE));
        for (token, decl) in &class.properties {
            if decl.fqname == RESERVED_SPDX_ID {
                continue;
            }
            emit_property_shape(g, model, class, &node, token);
        }
    }
}

/// Forbids `rdf:type <class>` on instances: abstract classes have no
/// direct instances.
fn emit_abstract_shape(g: &mut Graph, class: &Class, node: &Term) {
    let shape = g.blank();
    let not = g.blank();
    g.add(node.clone(), sh::PROPERTY, shape.clone());
    g.add(shape.clone(), sh::PATH, Term::iri(rdf::TYPE));
    g.add(shape.clone(), sh::NOT, not.clone());
    g.add(not, sh::HAS_VALUE, node.clone());
    g.add(
        shape,
        sh::MESSAGE,
        Term::plain(format!(
            "{} is an abstract class and cannot be instantiated directly",
            class.name
        )),
    );
}

fn emit_property_shape(g: &mut Graph, model: &Model, class: &Class, node: &Term, token: &str) {
    let decl = &class.properties[token];
    let Some(pid) = model.property_by_fqn(&decl.fqname) else {
        // Dangling reference, already reported by the analysis.
        return;
    };
    let property_iri = model.property(pid).iri.clone();

    let shape = g.blank();
    g.add(node.clone(), sh::PROPERTY, shape.clone());
    g.add(shape.clone(), sh::PATH, Term::iri(&property_iri));

    match resolve_row_type(model, class, &decl.type_name) {
        RowType::Class(cid) => {
            let target = model.class(cid);
            g.add(shape.clone(), sh::CLASS, Term::iri(&target.iri));
            let kind = if target.has_spdx_id() {
                sh::IRI
            } else {
                sh::BLANK_NODE_OR_IRI
            };
            g.add(shape.clone(), sh::NODE_KIND, Term::iri(kind));
            if target.fqname == EXTENSION_CLASS {
                emit_extension_escape(g, model, &shape);
            }
        }
        RowType::Vocabulary(vid) => {
            let target = model.vocabulary(vid);
            g.add(shape.clone(), sh::CLASS, Term::iri(&target.iri));
            g.add(shape.clone(), sh::NODE_KIND, Term::iri(sh::IRI));
            let entries = target
                .entries
                .keys()
                .map(|entry| Term::iri(target.entry_iri(entry)))
                .collect();
            let list = g.list(entries);
            g.add(shape.clone(), sh::IN, list);
        }
        RowType::Datatype(did) => {
            let target = model.datatype(did);
            if let Some(pattern) = target.pattern() {
                g.add(shape.clone(), sh::PATTERN, Term::plain(pattern));
            }
            if let Some(datatype_iri) = xsd::iri_of(&target.xsd_base) {
                g.add(shape.clone(), sh::DATATYPE, Term::iri(datatype_iri));
            }
            g.add(shape.clone(), sh::NODE_KIND, Term::iri(sh::LITERAL));
        }
        RowType::Xsd(datatype_iri) => {
            g.add(shape.clone(), sh::DATATYPE, Term::iri(datatype_iri));
            g.add(shape.clone(), sh::NODE_KIND, Term::iri(sh::LITERAL));
        }
        RowType::Unknown => {}
    }

    if decl.min_count != 0 {
        g.add(shape.clone(), sh::MIN_COUNT, Term::integer(decl.min_count));
    }
    if let MaxCount::Bounded(max) = decl.max_count {
        g.add(shape, sh::MAX_COUNT, Term::integer(max));
    }
}

/// A value of the extension escape type may be anything except a concrete
/// class defined outside the extension hierarchy.
fn emit_extension_escape(g: &mut Graph, model: &Model, shape: &Term) {
    let mut alternatives = Vec::new();
    for class in &model.classes {
        if class.is_abstract() || class.fqname == EXTENSION_CLASS {
            continue;
        }
        if class
            .inheritance_stack
            .iter()
            .any(|ancestor| ancestor == EXTENSION_CLASS)
        {
            continue;
        }
        let alternative = g.blank();
        g.add(alternative.clone(), sh::CLASS, Term::iri(&class.iri));
        alternatives.push(alternative);
    }
    if alternatives.is_empty() {
        return;
    }
    let list = g.list(alternatives);
    let not = g.blank();
    g.add(shape.clone(), sh::NOT, not.clone());
    g.add(not, sh::OR, list);
}

enum RowType {
    Class(crate::base::ClassId),
    Vocabulary(crate::base::VocabularyId),
    Datatype(crate::base::DatatypeId),
    Xsd(String),
    Unknown,
}

fn resolve_row_type(model: &Model, class: &Class, token: &str) -> RowType {
    if let Some(iri) = xsd::iri_of(token) {
        return RowType::Xsd(iri);
    }
    if crate::base::is_namespaced(token) {
        return RowType::Unknown;
    }
    let fqn = crate::base::expand(token, &class.ns);
    match model.type_by_fqn(&fqn) {
        Some(TypeRef::Class(id)) => RowType::Class(id),
        Some(TypeRef::Vocabulary(id)) => RowType::Vocabulary(id),
        Some(TypeRef::Datatype(id)) => RowType::Datatype(id),
        None => RowType::Unknown,
    }
}

// ============================================================================
// PROPERTIES, VOCABULARIES, INDIVIDUALS
// ============================================================================

fn emit_property(g: &mut Graph, model: &Model, property: &crate::model::Property) {
    if property.fqname == RESERVED_SPDX_ID {
        return;
    }
    let node = Term::iri(&property.iri);
    if !property.summary.is_empty() {
        g.add(node.clone(), rdfs::COMMENT, Term::lang(&property.summary, "en"));
    }
    let nature = match property.nature {
        Nature::ObjectProperty => owl::OBJECT_PROPERTY,
        Nature::DataProperty => owl::DATATYPE_PROPERTY,
    };
    g.add(node.clone(), rdf::TYPE, Term::iri(nature));

    if let Some(range_iri) = resolve_property_range(model, property) {
        g.add(node, rdfs::RANGE, Term::iri(range_iri));
    }
}

/// The `rdfs:range` of a property: an xsd IRI, a datatype's xsd base, or
/// another entity's IRI.
fn resolve_property_range(model: &Model, property: &crate::model::Property) -> Option<String> {
    if let Some(iri) = xsd::iri_of(&property.range) {
        return Some(iri);
    }
    if crate::base::is_namespaced(&property.range) {
        return None;
    }
    let fqn = crate::base::expand(&property.range, &property.ns);
    match model.type_by_fqn(&fqn)? {
        TypeRef::Class(id) => Some(model.class(id).iri.clone()),
        TypeRef::Vocabulary(id) => Some(model.vocabulary(id).iri.clone()),
        TypeRef::Datatype(id) => xsd::iri_of(&model.datatype(id).xsd_base),
    }
}

fn emit_vocabulary(g: &mut Graph, vocab: &crate::model::Vocabulary) {
    let node = Term::iri(&vocab.iri);
    g.add(node.clone(), rdf::TYPE, Term::iri(owl::CLASS));
    if !vocab.summary.is_empty() {
        g.add(node.clone(), rdfs::COMMENT, Term::lang(&vocab.summary, "en"));
    }
    for (entry, description) in &vocab.entries {
        let entry_node = Term::iri(vocab.entry_iri(entry));
        g.add(
            entry_node.clone(),
            rdf::TYPE,
            Term::iri(owl::NAMED_INDIVIDUAL),
        );
        g.add(entry_node.clone(), rdf::TYPE, node.clone());
        g.add(entry_node.clone(), rdfs::LABEL, Term::plain(entry));
        g.add(entry_node, rdfs::COMMENT, Term::lang(description, "en"));
    }
}

fn emit_individual(
    g: &mut Graph,
    model: &Model,
    individual: &crate::model::Individual,
    cfg: &Config,
    base: &str,
) {
    let node = Term::iri(&individual.iri);

    // Every individual carries its own creation info node.
    let creation = g.blank();
    g.add(
        creation.clone(),
        rdf::TYPE,
        Term::iri(core_term(base, "CreationInfo")),
    );
    g.add(
        creation.clone(),
        &core_term(base, "created"),
        Term::typed(format!("{}T00:00:00Z", cfg.ontology.created), xsd::DATE_TIME),
    );
    g.add(
        creation.clone(),
        &core_term(base, "createdBy"),
        Term::plain(&cfg.ontology.creator),
    );
    g.add(
        creation.clone(),
        &core_term(base, "specVersion"),
        Term::plain(&cfg.model_version),
    );

    g.add(node.clone(), rdf::TYPE, Term::iri(owl::NAMED_INDIVIDUAL));
    if let Some(type_iri) = resolve_individual_type(model, individual) {
        g.add(node.clone(), rdf::TYPE, Term::iri(type_iri));
    }
    if !individual.summary.is_empty() {
        g.add(node.clone(), rdfs::COMMENT, Term::lang(&individual.summary, "en"));
    }
    g.add(node.clone(), &core_term(base, "creationInfo"), creation);
    if let Some(custom) = &individual.custom_iri {
        g.add(node, owl::SAME_AS, Term::iri(custom));
    }
}

fn resolve_individual_type(model: &Model, individual: &crate::model::Individual) -> Option<String> {
    if crate::base::is_namespaced(&individual.type_name) {
        return None;
    }
    let fqn = crate::base::expand(&individual.type_name, &individual.ns);
    match model.type_by_fqn(&fqn)? {
        TypeRef::Class(id) => Some(model.class(id).iri.clone()),
        TypeRef::Vocabulary(id) => Some(model.vocabulary(id).iri.clone()),
        TypeRef::Datatype(id) => Some(model.datatype(id).iri.clone()),
    }
}

fn core_term(base: &str, name: &str) -> String {
    format!("{base}Core/{name}")
}
