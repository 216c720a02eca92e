//! Hextuples: newline-delimited JSON, one six-element array per triple.
//!
//! `[subject, predicate, value, datatype, language, graph]` where
//! `datatype` is `globalId` for IRI values, `localId` for blank nodes,
//! and the datatype IRI for literals. The graph field is always empty
//! here; the ontology is a single default graph.

use serde_json::json;

use crate::rdf::graph::Graph;
use crate::rdf::term::Term;
use crate::rdf::vocab::{rdf, xsd};

pub(super) fn write(graph: &Graph) -> String {
    let mut out = String::with_capacity(graph.len() * 128);
    for triple in graph.triples() {
        let subject = node_id(&triple.subject);
        let (value, datatype, language) = match &triple.object {
            Term::Iri(iri) => (iri.clone(), "globalId".to_owned(), String::new()),
            Term::Blank(n) => (format!("_:b{n}"), "localId".to_owned(), String::new()),
            Term::Literal(lit) => {
                let datatype = if lit.lang.is_some() {
                    rdf::LANG_STRING.to_owned()
                } else {
                    lit.datatype.clone().unwrap_or_else(|| xsd::STRING.to_owned())
                };
                (
                    lit.value.clone(),
                    datatype,
                    lit.lang.clone().unwrap_or_default(),
                )
            }
        };
        let line = json!([subject, triple.predicate, value, datatype, language, ""]);
        out.push_str(&line.to_string());
        out.push('\n');
    }
    out
}

fn node_id(term: &Term) -> String {
    match term {
        Term::Iri(iri) => iri.clone(),
        Term::Blank(n) => format!("_:b{n}"),
        Term::Literal(_) => unreachable!("literals are never subjects"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::vocab::owl;

    #[test]
    fn one_json_array_per_line() {
        let mut g = Graph::new();
        g.add(Term::iri("https://x/a"), rdf::TYPE, Term::iri(owl::CLASS));
        g.add(Term::iri("https://x/a"), "https://x/c", Term::lang("hi", "en"));
        g.add(Term::iri("https://x/a"), "https://x/n", Term::integer(4));

        let out = write(&g);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first[3], "globalId");

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second[3], rdf::LANG_STRING);
        assert_eq!(second[4], "en");

        let third: serde_json::Value = serde_json::from_str(lines[2]).unwrap();
        assert_eq!(third[2], "4");
        assert_eq!(third[3], xsd::INTEGER);
    }
}
