//! The RDF/XML family.
//!
//! `Plain` writes one `rdf:Description` element per subject. `Pretty`
//! uses typed node elements: the subject's first `rdf:type` becomes the
//! element name and the remaining types stay as children.
//!
//! Predicate and type IRIs are split into a namespace part and an NCName
//! local part; namespaces without a bound prefix get generated `nsN`
//! prefixes in first-use order.

use std::fmt::Write as _;

use indexmap::IndexMap;

use crate::rdf::graph::Graph;
use crate::rdf::term::Term;
use crate::rdf::vocab::rdf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Style {
    Plain,
    Pretty,
}

pub(super) fn write(graph: &Graph, style: Style) -> String {
    let mut namespaces = Namespaces::new(graph);

    // First pass: register every namespace that will appear as an
    // element name, in a deterministic order.
    for triple in graph.triples() {
        namespaces.register(&triple.predicate);
    }
    if style == Style::Pretty {
        for subject in graph.subjects() {
            if let Some(Term::Iri(type_iri)) = graph.object(subject, rdf::TYPE) {
                namespaces.register(type_iri);
            }
        }
    }

    let mut out = String::with_capacity(graph.len() * 96);
    out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    out.push_str("<rdf:RDF\n");
    for (namespace, prefix) in &namespaces.by_iri {
        let _ = writeln!(out, "   xmlns:{prefix}=\"{}\"", escape_attr(namespace));
    }
    out.push_str(">\n");

    for subject in graph.subjects() {
        write_subject(&mut out, graph, subject, style, &namespaces);
    }

    out.push_str("</rdf:RDF>\n");
    out
}

fn write_subject(
    out: &mut String,
    graph: &Graph,
    subject: &Term,
    style: Style,
    namespaces: &Namespaces,
) {
    let mut types: Vec<&Term> = graph.objects(subject, rdf::TYPE).collect();
    let element = match style {
        Style::Pretty => match types.first() {
            Some(Term::Iri(type_iri)) => {
                let name = namespaces.qname(type_iri);
                types.remove(0);
                name
            }
            _ => "rdf:Description".to_owned(),
        },
        Style::Plain => {
            types.clear();
            "rdf:Description".to_owned()
        }
    };

    let about = match subject {
        Term::Iri(iri) => format!(" rdf:about=\"{}\"", escape_attr(iri)),
        Term::Blank(n) => format!(" rdf:nodeID=\"b{n}\""),
        Term::Literal(_) => unreachable!("literals are never subjects"),
    };
    let _ = writeln!(out, "  <{element}{about}>");

    for triple in graph.triples().iter().filter(|t| t.subject == *subject) {
        // In pretty style the first type is the element name itself.
        if style == Style::Pretty
            && triple.predicate == rdf::TYPE
            && !types.iter().any(|t| **t == triple.object)
        {
            continue;
        }
        let name = namespaces.qname(&triple.predicate);
        match &triple.object {
            Term::Iri(iri) => {
                let _ = writeln!(out, "    <{name} rdf:resource=\"{}\"/>", escape_attr(iri));
            }
            Term::Blank(n) => {
                let _ = writeln!(out, "    <{name} rdf:nodeID=\"b{n}\"/>");
            }
            Term::Literal(lit) => {
                let mut attrs = String::new();
                if let Some(lang) = &lit.lang {
                    let _ = write!(attrs, " xml:lang=\"{}\"", escape_attr(lang));
                }
                if let Some(datatype) = &lit.datatype {
                    let _ = write!(attrs, " rdf:datatype=\"{}\"", escape_attr(datatype));
                }
                let _ = writeln!(out, "    <{name}{attrs}>{}</{name}>", escape_text(&lit.value));
            }
        }
    }

    let _ = writeln!(out, "  </{element}>");
}

/// Prefix management for element names.
struct Namespaces {
    /// Namespace IRI → prefix, in registration order.
    by_iri: IndexMap<String, String>,
    generated: u32,
}

impl Namespaces {
    fn new(graph: &Graph) -> Self {
        let mut by_iri = IndexMap::new();
        // rdf:RDF, rdf:about and friends always need the rdf prefix.
        by_iri.insert(rdf::NS.to_owned(), "rdf".to_owned());
        for (prefix, namespace) in graph.prefixes() {
            if !by_iri.contains_key(namespace) {
                by_iri.insert(namespace.clone(), prefix.clone());
            }
        }
        Self {
            by_iri,
            generated: 0,
        }
    }

    /// Ensures the namespace part of `iri` has a prefix.
    fn register(&mut self, iri: &str) {
        let (namespace, _) = split_iri(iri);
        if !self.by_iri.contains_key(namespace) {
            self.generated += 1;
            self.by_iri
                .insert(namespace.to_owned(), format!("ns{}", self.generated));
        }
    }

    /// `prefix:local` for a previously registered IRI.
    fn qname(&self, iri: &str) -> String {
        let (namespace, local) = split_iri(iri);
        let prefix = self
            .by_iri
            .get(namespace)
            .expect("namespace registered in the first pass");
        format!("{prefix}:{local}")
    }
}

/// Splits an IRI after the last `/` or `#` into namespace and local part.
fn split_iri(iri: &str) -> (&str, &str) {
    let pos = iri
        .rfind(['/', '#'])
        .map(|p| p + 1)
        .unwrap_or(0);
    (&iri[..pos], &iri[pos..])
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn escape_text(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::vocab::{owl, rdfs};

    fn sample() -> Graph {
        let mut g = Graph::new();
        g.bind("owl", owl::NS);
        g.bind("rdfs", rdfs::NS);
        let a = Term::iri("https://x/Core/Agent");
        g.add(a.clone(), rdf::TYPE, Term::iri(owl::CLASS));
        g.add(a.clone(), rdfs::COMMENT, Term::lang("An agent <actor>.", "en"));
        let b = g.blank();
        g.add(a, "https://x/Core/creationInfo", b.clone());
        g.add(b, rdf::TYPE, Term::iri("https://x/Core/CreationInfo"));
        g
    }

    #[test]
    fn plain_uses_descriptions_and_node_ids() {
        let xml = write(&sample(), Style::Plain);
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<rdf:RDF\n"));
        assert!(xml.contains("xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\""));
        assert!(xml.contains("<rdf:Description rdf:about=\"https://x/Core/Agent\">"));
        assert!(xml.contains("<rdf:type rdf:resource=\"http://www.w3.org/2002/07/owl#Class\"/>"));
        assert!(xml.contains("rdf:nodeID=\"b0\""));
        assert!(xml.contains("An agent &lt;actor&gt;."));
        assert!(xml.trim_end().ends_with("</rdf:RDF>"));
    }

    #[test]
    fn pretty_uses_typed_elements() {
        let xml = write(&sample(), Style::Pretty);
        assert!(xml.contains("<owl:Class rdf:about=\"https://x/Core/Agent\">"));
        assert!(xml.contains("</owl:Class>"));
        // The blank creation-info node is typed by a generated prefix.
        assert!(xml.contains("rdf:nodeID=\"b0\""));
        assert!(!xml.contains("<rdf:Description rdf:about=\"https://x/Core/Agent\">"));
    }

    #[test]
    fn unbound_namespaces_get_generated_prefixes() {
        let xml = write(&sample(), Style::Plain);
        // https://x/Core/creationInfo has no bound prefix.
        assert!(xml.contains("xmlns:ns1=\"https://x/Core/\""));
        assert!(xml.contains("<ns1:creationInfo rdf:nodeID=\"b0\"/>"));
    }
}
