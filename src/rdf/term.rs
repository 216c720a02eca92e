//! RDF terms: IRIs, blank nodes and literals.

use std::fmt;

/// A literal value with optional language tag or datatype IRI.
///
/// A literal carries at most one of the two; a plain literal carries
/// neither and is implicitly an `xsd:string`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    pub value: String,
    pub lang: Option<String>,
    pub datatype: Option<String>,
}

/// One node of the graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    Iri(String),
    /// A blank node, identified by a graph-local ordinal.
    Blank(u32),
    Literal(Literal),
}

impl Term {
    pub fn iri(iri: impl Into<String>) -> Self {
        Term::Iri(iri.into())
    }

    /// A plain string literal.
    pub fn plain(value: impl Into<String>) -> Self {
        Term::Literal(Literal {
            value: value.into(),
            lang: None,
            datatype: None,
        })
    }

    /// A language-tagged literal.
    pub fn lang(value: impl Into<String>, lang: impl Into<String>) -> Self {
        Term::Literal(Literal {
            value: value.into(),
            lang: Some(lang.into()),
            datatype: None,
        })
    }

    /// A datatyped literal.
    pub fn typed(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Term::Literal(Literal {
            value: value.into(),
            lang: None,
            datatype: Some(datatype.into()),
        })
    }

    /// An `xsd:integer` literal.
    pub fn integer(value: u32) -> Self {
        Term::typed(value.to_string(), crate::rdf::vocab::xsd::INTEGER)
    }

    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Term::Blank(_))
    }
}

impl fmt::Display for Term {
    /// N-Triples-like rendering, used in debug output and tests.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "<{iri}>"),
            Term::Blank(n) => write!(f, "_:b{n}"),
            Term::Literal(lit) => {
                write!(f, "\"{}\"", escape_literal(&lit.value))?;
                if let Some(lang) = &lit.lang {
                    write!(f, "@{lang}")?;
                }
                if let Some(dt) = &lit.datatype {
                    write!(f, "^^<{dt}>")?;
                }
                Ok(())
            }
        }
    }
}

/// Escapes a literal value for N-Triples and Turtle quoting.
pub fn escape_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_terms_in_ntriples_form() {
        assert_eq!(Term::iri("https://x/y").to_string(), "<https://x/y>");
        assert_eq!(Term::Blank(3).to_string(), "_:b3");
        assert_eq!(Term::plain("hi").to_string(), "\"hi\"");
        assert_eq!(Term::lang("hi", "en").to_string(), "\"hi\"@en");
        assert_eq!(
            Term::integer(2).to_string(),
            "\"2\"^^<http://www.w3.org/2001/XMLSchema#integer>"
        );
    }

    #[test]
    fn escapes_quotes_and_newlines() {
        assert_eq!(escape_literal("a \"b\"\nc\\d"), "a \\\"b\\\"\\nc\\\\d");
    }
}
