//! JSON-LD in expanded form: an array of node objects.
//!
//! Collections appear as `@list` values at their use site; every other
//! subject, blank nodes included, becomes a top-level node object in
//! first-seen order.

use serde_json::{json, Map, Value};

use crate::rdf::graph::Graph;
use crate::rdf::term::Term;
use crate::rdf::vocab::rdf;

pub(super) fn write(graph: &Graph) -> String {
    let mut nodes = Vec::new();

    for subject in graph.subjects() {
        if graph.is_list_node(subject) {
            continue;
        }
        nodes.push(node_object(graph, subject));
    }

    let mut out = serde_json::to_string_pretty(&Value::Array(nodes))
        .expect("node objects serialize");
    out.push('\n');
    out
}

fn node_object(graph: &Graph, subject: &Term) -> Value {
    let mut node = Map::new();
    node.insert("@id".to_owned(), Value::String(term_id(subject)));

    let types: Vec<Value> = graph
        .objects(subject, rdf::TYPE)
        .map(|t| Value::String(term_id(t)))
        .collect();
    if !types.is_empty() {
        node.insert("@type".to_owned(), Value::Array(types));
    }

    for triple in graph.triples().iter().filter(|t| t.subject == *subject) {
        if triple.predicate == rdf::TYPE {
            continue;
        }
        let value = object_value(graph, &triple.object);
        match node.get_mut(&triple.predicate) {
            Some(Value::Array(values)) => values.push(value),
            _ => {
                node.insert(triple.predicate.clone(), Value::Array(vec![value]));
            }
        }
    }

    Value::Object(node)
}

fn object_value(graph: &Graph, object: &Term) -> Value {
    match object {
        Term::Iri(_) | Term::Blank(_) => {
            if graph.is_list_node(object) || *object == Term::iri(rdf::NIL) {
                let items = graph
                    .collect_list(object)
                    .expect("list spine nodes form a well-formed collection");
                let values: Vec<Value> =
                    items.iter().map(|item| object_value(graph, item)).collect();
                json!({ "@list": values })
            } else {
                json!({ "@id": term_id(object) })
            }
        }
        Term::Literal(lit) => {
            let mut value = Map::new();
            value.insert("@value".to_owned(), Value::String(lit.value.clone()));
            if let Some(lang) = &lit.lang {
                value.insert("@language".to_owned(), Value::String(lang.clone()));
            }
            if let Some(datatype) = &lit.datatype {
                value.insert("@type".to_owned(), Value::String(datatype.clone()));
            }
            Value::Object(value)
        }
    }
}

fn term_id(term: &Term) -> String {
    match term {
        Term::Iri(iri) => iri.clone(),
        Term::Blank(n) => format!("_:b{n}"),
        Term::Literal(_) => unreachable!("literals have no @id"),
    }
}
