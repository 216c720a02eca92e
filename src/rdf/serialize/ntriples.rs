//! N-Triples: one triple per line, absolute IRIs, no prefixes.

use crate::rdf::graph::Graph;
use crate::rdf::term::Term;

pub(super) fn write(graph: &Graph) -> String {
    let mut out = String::with_capacity(graph.len() * 96);
    for triple in graph.triples() {
        render_term(&mut out, &triple.subject);
        out.push(' ');
        out.push('<');
        out.push_str(&triple.predicate);
        out.push('>');
        out.push(' ');
        render_term(&mut out, &triple.object);
        out.push_str(" .\n");
    }
    out
}

fn render_term(out: &mut String, term: &Term) {
    // Term's Display is exactly the N-Triples form.
    out.push_str(&term.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::vocab::{owl, rdf};

    #[test]
    fn one_line_per_triple_ending_in_dot() {
        let mut g = Graph::new();
        g.add(Term::iri("https://x/a"), rdf::TYPE, Term::iri(owl::CLASS));
        g.add(
            Term::iri("https://x/a"),
            "https://x/label",
            Term::lang("first\nsecond", "en"),
        );
        let nt = write(&g);
        assert_eq!(nt.lines().count(), 2);
        for line in nt.lines() {
            assert!(line.ends_with(" ."), "line does not end with ' .': {line}");
        }
        assert!(nt.contains("\"first\\nsecond\"@en"));
        assert!(nt.contains(&format!("<{}>", owl::CLASS)));
    }
}
