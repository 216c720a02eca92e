//! The turtle family of serializations.
//!
//! `Compact` is the ordinary turtle layout: one predicate per line,
//! multiple objects comma-separated, anonymous blank nodes and
//! collections inlined. `Long` is the spaced variant: `PREFIX`
//! directives, every object on its own line, multi-line blank nodes and
//! collections, and a terminating `.` line per subject.

use std::fmt::Write as _;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;

use crate::rdf::graph::Graph;
use crate::rdf::term::{escape_literal, Term};
use crate::rdf::vocab::rdf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Style {
    Compact,
    Long,
}

pub(super) fn write(graph: &Graph, style: Style) -> String {
    Writer::new(graph, style).run()
}

struct Writer<'g> {
    g: &'g Graph,
    style: Style,
    /// How often each blank node occurs in object position.
    object_count: FxHashMap<u32, usize>,
    out: String,
}

impl<'g> Writer<'g> {
    fn new(g: &'g Graph, style: Style) -> Self {
        let mut object_count: FxHashMap<u32, usize> = FxHashMap::default();
        for triple in g.triples() {
            if let Term::Blank(n) = triple.object {
                *object_count.entry(n).or_default() += 1;
            }
        }
        Self {
            g,
            style,
            object_count,
            out: String::with_capacity(g.len() * 64),
        }
    }

    fn run(mut self) -> String {
        for (prefix, namespace) in self.g.prefixes() {
            match self.style {
                Style::Compact => {
                    let _ = writeln!(self.out, "@prefix {prefix}: <{namespace}> .");
                }
                Style::Long => {
                    let _ = writeln!(self.out, "PREFIX {prefix}: <{namespace}>");
                }
            }
        }

        let subjects: Vec<&Term> = self
            .g
            .subjects()
            .into_iter()
            .filter(|s| self.is_top_level(s))
            .collect();

        for subject in subjects {
            self.out.push('\n');
            self.subject_block(subject);
        }
        self.out
    }

    /// Blank nodes rendered at their single use site, and collection
    /// spine nodes, do not get their own block.
    fn is_top_level(&self, subject: &Term) -> bool {
        match subject {
            Term::Blank(n) => {
                !self.g.is_list_node(subject) && self.object_count.get(n).copied().unwrap_or(0) != 1
            }
            _ => true,
        }
    }

    fn subject_block(&mut self, subject: &Term) {
        let label = match subject {
            Term::Iri(iri) => self.name(iri),
            Term::Blank(n) => format!("_:b{n}"),
            Term::Literal(_) => unreachable!("literals are never subjects"),
        };
        let groups = self.groups(subject);

        match self.style {
            Style::Compact => {
                self.out.push_str(&label);
                let total = groups.len();
                for (i, (predicate, objects)) in groups.iter().enumerate() {
                    if i == 0 {
                        self.out.push(' ');
                    } else {
                        self.out.push_str("    ");
                    }
                    let predicate = self.predicate_name(predicate);
                    self.out.push_str(&predicate);
                    self.out.push(' ');
                    for (j, object) in objects.iter().enumerate() {
                        if j > 0 {
                            self.out.push_str(",\n        ");
                        }
                        let rendered = self.object(object, 8);
                        self.out.push_str(&rendered);
                    }
                    self.out
                        .push_str(if i + 1 == total { " .\n" } else { " ;\n" });
                }
            }
            Style::Long => {
                self.out.push_str(&label);
                self.out.push('\n');
                for (predicate, objects) in &groups {
                    let predicate = self.predicate_name(predicate);
                    let _ = write!(self.out, "    {predicate}");
                    for (j, object) in objects.iter().enumerate() {
                        if j > 0 {
                            self.out.push(',');
                        }
                        self.out.push('\n');
                        let rendered = self.object(object, 8);
                        let _ = write!(self.out, "        {rendered}");
                    }
                    self.out.push_str(" ;\n");
                }
                self.out.push_str(".\n");
            }
        }
    }

    /// Predicate → objects of one subject, first-seen order, `rdf:type`
    /// hoisted to the front.
    fn groups(&self, subject: &Term) -> IndexMap<&'g str, Vec<&'g Term>> {
        let mut groups: IndexMap<&str, Vec<&Term>> = IndexMap::new();
        for triple in self.g.triples() {
            if triple.subject == *subject {
                groups
                    .entry(triple.predicate.as_str())
                    .or_default()
                    .push(&triple.object);
            }
        }
        if let Some(index) = groups.get_index_of(rdf::TYPE) {
            groups.move_index(index, 0);
        }
        groups
    }

    fn predicate_name(&self, predicate: &str) -> String {
        if predicate == rdf::TYPE {
            "a".to_owned()
        } else {
            self.name(predicate)
        }
    }

    fn name(&self, iri: &str) -> String {
        self.g
            .qname(iri)
            .unwrap_or_else(|| format!("<{iri}>"))
    }

    fn object(&self, object: &Term, indent: usize) -> String {
        match object {
            Term::Iri(iri) => self.name(iri),
            Term::Literal(lit) => {
                let mut s = format!("\"{}\"", escape_literal(&lit.value));
                if let Some(lang) = &lit.lang {
                    let _ = write!(s, "@{lang}");
                }
                if let Some(datatype) = &lit.datatype {
                    let _ = write!(s, "^^{}", self.name(datatype));
                }
                s
            }
            Term::Blank(n) => {
                if self.g.is_list_node(object) || *object == Term::iri(rdf::NIL) {
                    self.collection(object, indent)
                } else if self.object_count.get(n).copied().unwrap_or(0) == 1 {
                    self.anonymous(object, indent)
                } else {
                    format!("_:b{n}")
                }
            }
        }
    }

    /// An inlined `[ ... ]` blank node.
    fn anonymous(&self, node: &Term, indent: usize) -> String {
        let groups = self.groups(node);
        match self.style {
            Style::Compact => {
                let body = groups
                    .iter()
                    .map(|(predicate, objects)| {
                        let objects = objects
                            .iter()
                            .map(|o| self.object(o, indent))
                            .collect::<Vec<_>>()
                            .join(", ");
                        format!("{} {objects}", self.predicate_name(predicate))
                    })
                    .collect::<Vec<_>>()
                    .join(" ; ");
                format!("[ {body} ]")
            }
            Style::Long => {
                let pad = " ".repeat(indent);
                let inner = " ".repeat(indent + 4);
                let mut s = String::from("[\n");
                for (predicate, objects) in &groups {
                    let objects = objects
                        .iter()
                        .map(|o| self.object(o, indent + 4))
                        .collect::<Vec<_>>()
                        .join(", ");
                    let _ = writeln!(
                        s,
                        "{inner}{} {objects} ;",
                        self.predicate_name(predicate)
                    );
                }
                let _ = write!(s, "{pad}]");
                s
            }
        }
    }

    /// A `( ... )` collection.
    fn collection(&self, head: &Term, indent: usize) -> String {
        let items = self
            .g
            .collect_list(head)
            .expect("list spine nodes form a well-formed collection");
        match self.style {
            Style::Compact => {
                let rendered = items
                    .iter()
                    .map(|item| self.object(item, indent))
                    .collect::<Vec<_>>()
                    .join(" ");
                if rendered.is_empty() {
                    "( )".to_owned()
                } else {
                    format!("( {rendered} )")
                }
            }
            Style::Long => {
                let pad = " ".repeat(indent);
                let inner = " ".repeat(indent + 4);
                let mut s = String::from("(\n");
                for item in &items {
                    let rendered = self.object(item, indent + 4);
                    let _ = writeln!(s, "{inner}{rendered}");
                }
                let _ = write!(s, "{pad})");
                s
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::vocab::{owl, rdfs, sh, xsd};

    fn sample() -> Graph {
        let mut g = Graph::new();
        g.bind("owl", owl::NS);
        g.bind("rdfs", rdfs::NS);
        g.bind("sh", sh::NS);
        g.bind("xsd", xsd::NS);

        let class = Term::iri("https://x/Core/Thing");
        g.add(class.clone(), rdf::TYPE, Term::iri(owl::CLASS));
        g.add(class.clone(), rdf::TYPE, Term::iri(sh::NODE_SHAPE));
        g.add(class.clone(), rdfs::COMMENT, Term::lang("A thing.", "en"));

        let shape = g.blank();
        g.add(class.clone(), sh::PROPERTY, shape.clone());
        g.add(shape.clone(), sh::PATH, Term::iri("https://x/Core/name"));
        g.add(shape.clone(), sh::MIN_COUNT, Term::integer(1));
        let list = g.list(vec![
            Term::iri("https://x/Core/V/a"),
            Term::iri("https://x/Core/V/b"),
        ]);
        g.add(shape, sh::IN, list);
        g
    }

    #[test]
    fn compact_inlines_shape_and_collection() {
        let ttl = write(&sample(), Style::Compact);
        assert!(ttl.starts_with("@prefix owl: <http://www.w3.org/2002/07/owl#> .\n"));
        assert!(ttl.contains("a owl:Class,\n        sh:NodeShape ;"));
        assert!(ttl.contains("rdfs:comment \"A thing.\"@en ;"));
        assert!(ttl.contains("sh:property [ sh:path <https://x/Core/name> ; sh:minCount \"1\"^^xsd:integer ; sh:in ( <https://x/Core/V/a> <https://x/Core/V/b> ) ] ."));
        // The blank node and the list spine get no block of their own.
        assert!(!ttl.contains("_:b"));
    }

    #[test]
    fn long_style_uses_prefix_keyword_and_final_dot_line() {
        let ttl = write(&sample(), Style::Long);
        assert!(ttl.starts_with("PREFIX owl: <http://www.w3.org/2002/07/owl#>\n"));
        assert!(ttl.contains("\n.\n"));
        assert!(ttl.contains("    a\n        owl:Class,\n        sh:NodeShape ;\n"));
    }

    #[test]
    fn shared_blank_nodes_get_labels() {
        let mut g = Graph::new();
        let b = g.blank();
        g.add(Term::iri("https://x/a"), "https://x/p", b.clone());
        g.add(Term::iri("https://x/b"), "https://x/p", b.clone());
        g.add(b, "https://x/q", Term::plain("v"));
        let ttl = write(&g, Style::Compact);
        assert!(ttl.contains("<https://x/p> _:b0 ."));
        assert!(ttl.contains("_:b0 <https://x/q> \"v\" ."));
    }
}
