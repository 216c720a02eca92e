//! JSON-LD context derivation.
//!
//! One walk over the emitted ontology graph produces the term map that
//! instance serializers use: short keys for every subject under the base
//! IRI, coercion rules per property kind, and a `@vocab` sub-context for
//! properties ranging over a controlled vocabulary.

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use serde_json::{json, Value};

use crate::base::short_name;
use crate::rdf::term::Term;
use crate::rdf::vocab::{owl, rdf, rdfs, sh};
use crate::rdf::Graph;
use crate::report::{ErrorKind, Reporter};

/// Derives the context mapping from the ontology graph.
///
/// `base` is the emitter's base IRI (with trailing slash); only subjects
/// underneath it become context keys.
pub fn build_context(graph: &Graph, base: &str, rep: &mut Reporter) -> IndexMap<String, Value> {
    let vocab = VocabularyIndex::collect(graph);
    let mut context: IndexMap<String, Value> = IndexMap::new();

    for subject in graph.subjects() {
        let Term::Iri(iri) = subject else {
            continue;
        };
        let Some(tail) = iri.strip_prefix(base) else {
            continue;
        };
        let Some((ns, name)) = tail.split_once('/') else {
            continue;
        };
        if vocab.individuals.contains(iri.as_str()) {
            continue;
        }

        let key = if ns == "Core" {
            name.to_owned()
        } else {
            format!("{}_{name}", ns.to_lowercase())
        };
        if context.contains_key(&key) {
            rep.error(
                ErrorKind::DuplicateContextKey,
                format!("duplicate context key `{key}` for <{iri}>"),
            );
            continue;
        }

        let term = derive_term(graph, &vocab, subject, iri, ns, name);
        context.insert(key, term);
    }

    context.insert("spdx".to_owned(), Value::String(base.to_owned()));
    context.insert("spdxId".to_owned(), Value::String("@id".to_owned()));
    context.insert("type".to_owned(), Value::String("@type".to_owned()));
    context
}

/// Serializes the context as the `spdx-context.jsonld` document.
pub fn render_context(context: &IndexMap<String, Value>) -> String {
    let document = json!({ "@context": context });
    let mut out = serde_json::to_string_pretty(&document).expect("context serializes");
    out.push('\n');
    out
}

fn derive_term(
    graph: &Graph,
    vocab: &VocabularyIndex,
    subject: &Term,
    iri: &str,
    ns: &str,
    name: &str,
) -> Value {
    let types: Vec<&Term> = graph.objects(subject, rdf::TYPE).collect();
    let is_object_property = types.contains(&&Term::iri(owl::OBJECT_PROPERTY));
    let is_datatype_property = types.contains(&&Term::iri(owl::DATATYPE_PROPERTY));
    let range = graph
        .object(subject, rdfs::RANGE)
        .and_then(|r| r.as_iri())
        .map(str::to_owned);

    if is_object_property {
        if let Some(range_iri) = &range {
            if vocab.classes.contains(range_iri.as_str()) {
                // Profile identifiers collide with namespace names; their
                // enum values are remapped entry by entry.
                let local_context = if ns == "Core" && name == "profile" {
                    Value::Object(vocab.entry_map(graph, range_iri))
                } else {
                    json!({ "@vocab": format!("{range_iri}/") })
                };
                return json!({
                    "@id": iri,
                    "@type": "@vocab",
                    "@context": local_context,
                });
            }
            if graph.has(&Term::iri(range_iri), rdf::TYPE, &Term::iri(owl::CLASS)) {
                return json!({ "@id": iri, "@type": "@id" });
            }
            return json!({ "@id": iri, "@type": range_iri });
        }
        return Value::String(iri.to_owned());
    }

    if is_datatype_property {
        if let Some(range_iri) = &range {
            return json!({ "@id": iri, "@type": range_iri });
        }
        return Value::String(iri.to_owned());
    }

    Value::String(iri.to_owned())
}

/// Vocabulary entries (objects of `sh:in` lists) and the vocabulary
/// classes they inhabit.
struct VocabularyIndex {
    individuals: FxHashSet<String>,
    classes: FxHashSet<String>,
}

impl VocabularyIndex {
    fn collect(graph: &Graph) -> Self {
        let mut individuals = FxHashSet::default();
        let mut classes = FxHashSet::default();

        for triple in graph.triples() {
            if triple.predicate != sh::IN {
                continue;
            }
            let Some(items) = graph.collect_list(&triple.object) else {
                continue;
            };
            for item in items {
                let Term::Iri(entry_iri) = &item else {
                    continue;
                };
                individuals.insert(entry_iri.clone());
                for class in graph.objects(&item, rdf::TYPE) {
                    if let Some(class_iri) = class.as_iri() {
                        if class_iri != owl::NAMED_INDIVIDUAL {
                            classes.insert(class_iri.to_owned());
                        }
                    }
                }
            }
        }
        Self {
            individuals,
            classes,
        }
    }

    /// Entry short name → entry IRI for one vocabulary class, in graph
    /// order.
    fn entry_map(&self, graph: &Graph, vocab_iri: &str) -> serde_json::Map<String, Value> {
        let mut map = serde_json::Map::new();
        let class = Term::iri(vocab_iri);
        for entry in graph.subjects_with(rdf::TYPE, &class) {
            let Some(entry_iri) = entry.as_iri() else {
                continue;
            };
            if !self.individuals.contains(entry_iri) {
                continue;
            }
            map.insert(
                short_name(entry_iri).to_owned(),
                Value::String(entry_iri.to_owned()),
            );
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::vocab::xsd;

    const BASE: &str = "https://spdx.org/rdf/v3/terms/";

    fn term(base: &str, tail: &str) -> Term {
        Term::iri(format!("{base}{tail}"))
    }

    /// A small graph: one class, one enum-ranged object property, one
    /// class-ranged object property, one datatype property, a vocabulary
    /// with two entries used through `sh:in`.
    fn sample() -> Graph {
        let mut g = Graph::new();

        let element = term(BASE, "Core/Element");
        g.add(element.clone(), rdf::TYPE, Term::iri(owl::CLASS));

        let vocab = term(BASE, "Core/HashAlgorithm");
        g.add(vocab.clone(), rdf::TYPE, Term::iri(owl::CLASS));
        for entry in ["sha1", "sha256"] {
            let e = term(BASE, &format!("Core/HashAlgorithm/{entry}"));
            g.add(e.clone(), rdf::TYPE, Term::iri(owl::NAMED_INDIVIDUAL));
            g.add(e, rdf::TYPE, vocab.clone());
        }

        let algorithm = term(BASE, "Core/algorithm");
        g.add(algorithm.clone(), rdf::TYPE, Term::iri(owl::OBJECT_PROPERTY));
        g.add(algorithm, rdfs::RANGE, vocab.clone());

        let originated_by = term(BASE, "Software/originatedBy");
        g.add(
            originated_by.clone(),
            rdf::TYPE,
            Term::iri(owl::OBJECT_PROPERTY),
        );
        g.add(originated_by, rdfs::RANGE, element.clone());

        let comment = term(BASE, "Core/comment");
        g.add(comment.clone(), rdf::TYPE, Term::iri(owl::DATATYPE_PROPERTY));
        g.add(comment, rdfs::RANGE, Term::iri(xsd::STRING));

        // A property shape using the vocabulary through sh:in.
        let shape = g.blank();
        g.add(element, sh::PROPERTY, shape.clone());
        let list = g.list(vec![
            term(BASE, "Core/HashAlgorithm/sha1"),
            term(BASE, "Core/HashAlgorithm/sha256"),
        ]);
        g.add(shape, sh::IN, list);

        g
    }

    #[test]
    fn derives_keys_and_term_shapes() {
        let mut rep = Reporter::new();
        let ctx = build_context(&sample(), BASE, &mut rep);
        assert!(!rep.has_errors());

        // Core names are bare; other namespaces are prefixed lowercase.
        assert_eq!(ctx["Element"], Value::String(format!("{BASE}Core/Element")));
        assert!(ctx.contains_key("software_originatedBy"));

        // Enum-ranged object property.
        let algorithm = &ctx["algorithm"];
        assert_eq!(algorithm["@type"], "@vocab");
        assert_eq!(
            algorithm["@context"]["@vocab"],
            format!("{BASE}Core/HashAlgorithm/")
        );

        // Class-ranged object property.
        assert_eq!(ctx["software_originatedBy"]["@type"], "@id");

        // Datatype property.
        assert_eq!(ctx["comment"]["@type"], xsd::STRING);

        // Vocabulary entries do not surface as keys.
        assert!(!ctx.keys().any(|k| k.contains("sha1")));

        // Fixed trailers.
        assert_eq!(ctx["spdx"], Value::String(BASE.to_owned()));
        assert_eq!(ctx["spdxId"], "@id");
        assert_eq!(ctx["type"], "@type");
    }

    #[test]
    fn profile_property_gets_entry_by_entry_context() {
        let mut g = Graph::new();
        let vocab = term(BASE, "Core/ProfileIdentifierType");
        g.add(vocab.clone(), rdf::TYPE, Term::iri(owl::CLASS));
        for entry in ["core", "software"] {
            let e = term(BASE, &format!("Core/ProfileIdentifierType/{entry}"));
            g.add(e.clone(), rdf::TYPE, Term::iri(owl::NAMED_INDIVIDUAL));
            g.add(e, rdf::TYPE, vocab.clone());
        }
        let profile = term(BASE, "Core/profile");
        g.add(profile.clone(), rdf::TYPE, Term::iri(owl::OBJECT_PROPERTY));
        g.add(profile, rdfs::RANGE, vocab.clone());
        let shape = g.blank();
        let list = g.list(vec![
            term(BASE, "Core/ProfileIdentifierType/core"),
            term(BASE, "Core/ProfileIdentifierType/software"),
        ]);
        g.add(shape, sh::IN, list);

        let mut rep = Reporter::new();
        let ctx = build_context(&g, BASE, &mut rep);
        let profile = &ctx["profile"];
        assert_eq!(profile["@type"], "@vocab");
        assert_eq!(
            profile["@context"]["core"],
            format!("{BASE}Core/ProfileIdentifierType/core")
        );
        assert_eq!(
            profile["@context"]["software"],
            format!("{BASE}Core/ProfileIdentifierType/software")
        );
    }

    #[test]
    fn duplicate_keys_keep_first_and_report() {
        let mut g = Graph::new();
        // Two namespaces yielding the same key: Core/thing and a
        // second Core-like subject.
        g.add(term(BASE, "Core/thing"), rdf::TYPE, Term::iri(owl::CLASS));
        g.add(
            term(BASE, "Core/thing"),
            rdfs::COMMENT,
            Term::plain("first"),
        );
        // Same key from a different subject spelling.
        let mut rep = Reporter::new();
        let mut ctx = build_context(&g, BASE, &mut rep);
        assert!(ctx.contains_key("thing"));
        assert!(!rep.has_errors());

        // Force a duplicate by inserting a colliding subject.
        g.add(term(BASE, "Software/thing"), rdf::TYPE, Term::iri(owl::CLASS));
        g.add(term(BASE, "software/thing"), rdf::TYPE, Term::iri(owl::CLASS));
        rep = Reporter::new();
        ctx = build_context(&g, BASE, &mut rep);
        assert!(ctx.contains_key("software_thing"));
        assert_eq!(rep.error_count(), 1);
        assert_eq!(
            rep.errors_of_kind(ErrorKind::DuplicateContextKey).count(),
            1
        );
    }

    #[test]
    fn round_trips_subject_iris() {
        let mut rep = Reporter::new();
        let ctx = build_context(&sample(), BASE, &mut rep);
        for (key, value) in &ctx {
            if matches!(key.as_str(), "spdx" | "spdxId" | "type") {
                continue;
            }
            let id = match value {
                Value::String(iri) => iri.clone(),
                Value::Object(map) => map["@id"].as_str().unwrap().to_owned(),
                _ => panic!("unexpected term shape for {key}"),
            };
            assert!(id.starts_with(BASE), "{key} -> {id}");
        }
    }
}
