//! Well-known IRIs used by the ontology emitter and the serializers.

/// RDF core vocabulary.
pub mod rdf {
    pub const NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    pub const FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";
    pub const REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";
    pub const NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";
    pub const LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";
}

/// RDF Schema.
pub mod rdfs {
    pub const NS: &str = "http://www.w3.org/2000/01/rdf-schema#";
    pub const CLASS: &str = "http://www.w3.org/2000/01/rdf-schema#Class";
    pub const COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";
    pub const LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
    pub const RANGE: &str = "http://www.w3.org/2000/01/rdf-schema#range";
    pub const SUB_CLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";
}

/// OWL.
pub mod owl {
    pub const NS: &str = "http://www.w3.org/2002/07/owl#";
    pub const CLASS: &str = "http://www.w3.org/2002/07/owl#Class";
    pub const DATATYPE_PROPERTY: &str = "http://www.w3.org/2002/07/owl#DatatypeProperty";
    pub const NAMED_INDIVIDUAL: &str = "http://www.w3.org/2002/07/owl#NamedIndividual";
    pub const OBJECT_PROPERTY: &str = "http://www.w3.org/2002/07/owl#ObjectProperty";
    pub const ONTOLOGY: &str = "http://www.w3.org/2002/07/owl#Ontology";
    pub const SAME_AS: &str = "http://www.w3.org/2002/07/owl#sameAs";
    pub const VERSION_IRI: &str = "http://www.w3.org/2002/07/owl#versionIRI";
}

/// SHACL.
pub mod sh {
    pub const NS: &str = "http://www.w3.org/ns/shacl#";
    pub const BLANK_NODE_OR_IRI: &str = "http://www.w3.org/ns/shacl#BlankNodeOrIRI";
    pub const CLASS: &str = "http://www.w3.org/ns/shacl#class";
    pub const DATATYPE: &str = "http://www.w3.org/ns/shacl#datatype";
    pub const HAS_VALUE: &str = "http://www.w3.org/ns/shacl#hasValue";
    pub const IN: &str = "http://www.w3.org/ns/shacl#in";
    pub const IRI: &str = "http://www.w3.org/ns/shacl#IRI";
    pub const LITERAL: &str = "http://www.w3.org/ns/shacl#Literal";
    pub const MAX_COUNT: &str = "http://www.w3.org/ns/shacl#maxCount";
    pub const MESSAGE: &str = "http://www.w3.org/ns/shacl#message";
    pub const MIN_COUNT: &str = "http://www.w3.org/ns/shacl#minCount";
    pub const NODE_KIND: &str = "http://www.w3.org/ns/shacl#nodeKind";
    pub const NODE_SHAPE: &str = "http://www.w3.org/ns/shacl#NodeShape";
    pub const NOT: &str = "http://www.w3.org/ns/shacl#not";
    pub const OR: &str = "http://www.w3.org/ns/shacl#or";
    pub const PATH: &str = "http://www.w3.org/ns/shacl#path";
    pub const PATTERN: &str = "http://www.w3.org/ns/shacl#pattern";
    pub const PROPERTY: &str = "http://www.w3.org/ns/shacl#property";
}

/// XML Schema datatypes.
pub mod xsd {
    pub const NS: &str = "http://www.w3.org/2001/XMLSchema#";
    pub const DATE: &str = "http://www.w3.org/2001/XMLSchema#date";
    pub const DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

    /// Maps an `xsd:` token (e.g. `xsd:dateTime`) to its full IRI.
    pub fn iri_of(token: &str) -> Option<String> {
        token.strip_prefix("xsd:").map(|local| format!("{NS}{local}"))
    }
}

/// Dublin Core terms, used on the ontology header.
pub mod dcterms {
    pub const NS: &str = "http://purl.org/dc/terms/";
    pub const ABSTRACT: &str = "http://purl.org/dc/terms/abstract";
    pub const CREATED: &str = "http://purl.org/dc/terms/created";
    pub const CREATOR: &str = "http://purl.org/dc/terms/creator";
    pub const LICENSE: &str = "http://purl.org/dc/terms/license";
    pub const TITLE: &str = "http://purl.org/dc/terms/title";
}

/// The term-status annotation vocabulary.
pub mod vs {
    pub const NS: &str = "http://www.w3.org/2003/06/sw-vocab-status/ns#";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xsd_token_maps_to_iri() {
        assert_eq!(
            xsd::iri_of("xsd:dateTime").as_deref(),
            Some("http://www.w3.org/2001/XMLSchema#dateTime")
        );
        assert_eq!(xsd::iri_of("dateTime"), None);
    }
}
