//! GraphViz rendering of the ontology graph.
//!
//! Resources become ellipse nodes, literals become box nodes, and every
//! triple becomes a labeled edge. Node numbering follows first
//! appearance, so the output is stable.

use std::fmt::Write as _;

use indexmap::IndexMap;

use crate::rdf::graph::Graph;
use crate::rdf::term::Term;

/// Renders the graph as a `digraph`, with `header` as a leading comment.
pub fn to_dot(graph: &Graph, header: &str) -> String {
    let mut out = String::with_capacity(graph.len() * 96);
    let _ = writeln!(out, "// {header}");
    out.push_str("digraph {\n");
    out.push_str("    rankdir=\"LR\";\n");
    out.push_str("    charset=\"utf-8\";\n\n");

    let mut resources: IndexMap<Term, usize> = IndexMap::new();
    let mut literal_count = 0usize;
    let mut edges = String::new();

    for triple in graph.triples() {
        let subject = resource_node(&mut out, graph, &mut resources, &triple.subject);
        let label = escape(&display_name(graph, &triple.predicate));
        match &triple.object {
            Term::Literal(lit) => {
                let node = format!("lit{literal_count}");
                literal_count += 1;
                let _ = writeln!(
                    out,
                    "    {node} [label=\"{}\"; shape=\"box\"];",
                    escape(&lit.value)
                );
                let _ = writeln!(edges, "    {subject} -> {node} [label=\"{label}\"];");
            }
            object => {
                let object = resource_node(&mut out, graph, &mut resources, object);
                let _ = writeln!(edges, "    {subject} -> {object} [label=\"{label}\"];");
            }
        }
    }

    out.push('\n');
    out.push_str(&edges);
    out.push_str("}\n");
    out
}

fn resource_node(
    out: &mut String,
    graph: &Graph,
    resources: &mut IndexMap<Term, usize>,
    term: &Term,
) -> String {
    if let Some(index) = resources.get(term) {
        return format!("node{index}");
    }
    let index = resources.len();
    resources.insert(term.clone(), index);
    let label = match term {
        Term::Iri(iri) => display_name(graph, iri),
        Term::Blank(n) => format!("_:b{n}"),
        Term::Literal(_) => unreachable!("literals are handled at the call site"),
    };
    let _ = writeln!(
        out,
        "    node{index} [label=\"{}\"; shape=\"ellipse\"];",
        escape(&label)
    );
    format!("node{index}")
}

fn display_name(graph: &Graph, iri: &str) -> String {
    graph.qname(iri).unwrap_or_else(|| iri.to_owned())
}

fn escape(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
