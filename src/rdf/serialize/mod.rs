//! Graph serializers.
//!
//! Every writer takes the finished graph and produces a deterministic
//! string: triples in insertion order, subjects grouped in first-seen
//! order, blank-node labels in allocation order. The turtle family
//! (`ttl`, `longturtle`, `n3`, `trig`) shares one writer; the RDF/XML
//! family (`xml`, `pretty-xml`) shares another.

mod dot;
mod hext;
mod jsonld;
mod ntriples;
mod turtle;
mod xml;

pub use dot::to_dot;

use crate::rdf::graph::Graph;

/// The serializations produced for the ontology graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Turtle,
    JsonLd,
    LongTurtle,
    N3,
    NTriples,
    PrettyXml,
    Trig,
    Hext,
    Xml,
}

impl Format {
    /// All formats, in output order.
    pub fn all() -> [Format; 9] {
        [
            Format::Turtle,
            Format::JsonLd,
            Format::LongTurtle,
            Format::N3,
            Format::NTriples,
            Format::PrettyXml,
            Format::Trig,
            Format::Hext,
            Format::Xml,
        ]
    }

    /// The file extension of `spdx-model.<ext>`.
    pub fn extension(self) -> &'static str {
        match self {
            Format::Turtle => "ttl",
            Format::JsonLd => "json-ld",
            Format::LongTurtle => "longturtle",
            Format::N3 => "n3",
            Format::NTriples => "nt",
            Format::PrettyXml => "pretty-xml",
            Format::Trig => "trig",
            Format::Hext => "hext",
            Format::Xml => "xml",
        }
    }
}

/// Serializes the graph in the given format.
pub fn serialize(graph: &Graph, format: Format) -> String {
    match format {
        Format::Turtle => turtle::write(graph, turtle::Style::Compact),
        // A TriG document whose only graph is the default graph, and an
        // N3 document without rules, are both plain turtle.
        Format::Trig | Format::N3 => turtle::write(graph, turtle::Style::Compact),
        Format::LongTurtle => turtle::write(graph, turtle::Style::Long),
        Format::NTriples => ntriples::write(graph),
        Format::Xml => xml::write(graph, xml::Style::Plain),
        Format::PrettyXml => xml::write(graph, xml::Style::Pretty),
        Format::JsonLd => jsonld::write(graph),
        Format::Hext => hext::write(graph),
    }
}
