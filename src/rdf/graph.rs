//! An insertion-ordered triple store.
//!
//! The graph keeps triples in the order they were added and blank-node
//! ordinals in allocation order, so walking or serializing it is
//! deterministic for a deterministic emitter. Nothing here depends on the
//! model; the emitter in [`ontology`](crate::rdf::ontology) does the
//! model-specific walking.

use indexmap::IndexMap;

use crate::rdf::term::Term;
use crate::rdf::vocab::rdf;

/// One statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triple {
    pub subject: Term,
    /// Predicate IRI.
    pub predicate: String,
    pub object: Term,
}

/// A graph with bound prefixes.
#[derive(Debug, Default)]
pub struct Graph {
    triples: Vec<Triple>,
    prefixes: IndexMap<String, String>,
    next_blank: u32,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `prefix` to a namespace IRI for serializations that compact
    /// names. Binding order is kept.
    pub fn bind(&mut self, prefix: &str, namespace: &str) {
        self.prefixes.insert(prefix.to_owned(), namespace.to_owned());
    }

    /// Bound prefixes, in binding order.
    pub fn prefixes(&self) -> &IndexMap<String, String> {
        &self.prefixes
    }

    /// Adds one triple.
    pub fn add(&mut self, subject: Term, predicate: &str, object: Term) {
        self.triples.push(Triple {
            subject,
            predicate: predicate.to_owned(),
            object,
        });
    }

    /// Allocates a fresh blank node.
    pub fn blank(&mut self) -> Term {
        let node = Term::Blank(self.next_blank);
        self.next_blank += 1;
        node
    }

    /// Builds an rdf collection out of `items` and returns its head
    /// (`rdf:nil` for an empty collection).
    pub fn list(&mut self, items: Vec<Term>) -> Term {
        let mut head = Term::iri(rdf::NIL);
        for item in items.into_iter().rev() {
            let node = self.blank();
            self.add(node.clone(), rdf::FIRST, item);
            self.add(node.clone(), rdf::REST, head);
            head = node;
        }
        head
    }

    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Objects of `(subject, predicate, _)`, in insertion order.
    ///
    /// The returned terms borrow from the graph, not from the query
    /// arguments.
    pub fn objects<'g, 'q>(
        &'g self,
        subject: &'q Term,
        predicate: &'q str,
    ) -> impl Iterator<Item = &'g Term> + use<'g, 'q> {
        self.triples
            .iter()
            .filter(move |t| t.subject == *subject && t.predicate == predicate)
            .map(|t| &t.object)
    }

    /// First object of `(subject, predicate, _)`, if any.
    pub fn object<'g>(&'g self, subject: &Term, predicate: &str) -> Option<&'g Term> {
        self.objects(subject, predicate).next()
    }

    /// Subjects of `(_, predicate, object)`, in insertion order.
    pub fn subjects_with<'g, 'q>(
        &'g self,
        predicate: &'q str,
        object: &'q Term,
    ) -> impl Iterator<Item = &'g Term> + use<'g, 'q> {
        self.triples
            .iter()
            .filter(move |t| t.predicate == predicate && t.object == *object)
            .map(|t| &t.subject)
    }

    /// True when the exact triple is present.
    pub fn has(&self, subject: &Term, predicate: &str, object: &Term) -> bool {
        self.triples
            .iter()
            .any(|t| t.subject == *subject && t.predicate == predicate && t.object == *object)
    }

    /// Distinct subjects in first-seen order.
    pub fn subjects(&self) -> Vec<&Term> {
        let mut seen = rustc_hash::FxHashSet::default();
        let mut subjects = Vec::new();
        for triple in &self.triples {
            if seen.insert(&triple.subject) {
                subjects.push(&triple.subject);
            }
        }
        subjects
    }

    /// Follows an rdf collection from its head. Returns `None` when
    /// `head` is not a well-formed collection.
    pub fn collect_list(&self, head: &Term) -> Option<Vec<Term>> {
        let mut items = Vec::new();
        let mut cursor = head.clone();
        loop {
            if cursor == Term::iri(rdf::NIL) {
                return Some(items);
            }
            let first = self.object(&cursor, rdf::FIRST)?.clone();
            let rest = self.object(&cursor, rdf::REST)?.clone();
            items.push(first);
            cursor = rest;
        }
    }

    /// True when `node` is a spine node of some rdf collection.
    pub fn is_list_node(&self, node: &Term) -> bool {
        node.is_blank() && self.object(node, rdf::FIRST).is_some()
    }

    /// Compacts an IRI to `prefix:local` under the bound prefixes.
    ///
    /// The local part must not itself contain `/` or `#`; otherwise the
    /// IRI is left uncompacted.
    pub fn qname(&self, iri: &str) -> Option<String> {
        for (prefix, namespace) in &self.prefixes {
            if let Some(local) = iri.strip_prefix(namespace.as_str()) {
                if !local.is_empty() && !local.contains('/') && !local.contains('#') {
                    return Some(format!("{prefix}:{local}"));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::vocab::{owl, rdf};

    #[test]
    fn keeps_insertion_order() {
        let mut g = Graph::new();
        g.add(Term::iri("https://x/a"), rdf::TYPE, Term::iri(owl::CLASS));
        g.add(Term::iri("https://x/b"), rdf::TYPE, Term::iri(owl::CLASS));
        g.add(Term::iri("https://x/a"), rdf::TYPE, Term::iri(owl::ONTOLOGY));

        let subjects = g.subjects();
        assert_eq!(subjects.len(), 2);
        assert_eq!(subjects[0].as_iri(), Some("https://x/a"));
        assert_eq!(
            g.objects(&Term::iri("https://x/a"), rdf::TYPE).count(),
            2
        );
    }

    #[test]
    fn list_round_trips() {
        let mut g = Graph::new();
        let head = g.list(vec![Term::iri("https://x/1"), Term::iri("https://x/2")]);
        let items = g.collect_list(&head).unwrap();
        assert_eq!(items, vec![Term::iri("https://x/1"), Term::iri("https://x/2")]);
        assert!(g.is_list_node(&head));
    }

    #[test]
    fn empty_list_is_nil() {
        let mut g = Graph::new();
        assert_eq!(g.list(Vec::new()), Term::iri(rdf::NIL));
    }

    #[test]
    fn qname_compacts_only_clean_locals() {
        let mut g = Graph::new();
        g.bind("owl", owl::NS);
        g.bind("spdx", "https://spdx.org/rdf/v3/terms/");
        assert_eq!(g.qname(owl::CLASS).as_deref(), Some("owl:Class"));
        // Local part would contain a slash: left as a full IRI.
        assert_eq!(g.qname("https://spdx.org/rdf/v3/terms/Core/Element"), None);
        assert_eq!(g.qname("https://elsewhere.example/x"), None);
    }

    #[test]
    fn blank_nodes_are_sequential() {
        let mut g = Graph::new();
        assert_eq!(g.blank(), Term::Blank(0));
        assert_eq!(g.blank(), Term::Blank(1));
    }
}
