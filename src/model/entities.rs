//! Typed entities of the model.
//!
//! One struct per input file kind. Loaders populate the declared fields;
//! the analysis passes populate the derived fields (`inheritance_stack`,
//! `subclasses`, `all_properties`, `used_in`) exactly once. After analysis
//! the model is read-only.

use std::fmt;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::base::{ClassId, DatatypeId, IndividualId, PropertyId, VocabularyId};

// ============================================================================
// SCALAR FIELD TYPES
// ============================================================================

/// Whether a class may have direct instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Instantiability {
    Concrete,
    Abstract,
}

impl Instantiability {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Concrete" => Some(Self::Concrete),
            "Abstract" => Some(Self::Abstract),
            _ => None,
        }
    }
}

/// Whether a property relates resources or carries literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Nature {
    ObjectProperty,
    DataProperty,
}

impl Nature {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ObjectProperty" => Some(Self::ObjectProperty),
            "DataProperty" => Some(Self::DataProperty),
            _ => None,
        }
    }
}

/// Upper cardinality bound: a natural number or unbounded (`*`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxCount {
    Unbounded,
    Bounded(u32),
}

impl MaxCount {
    pub fn parse(value: &str) -> Option<Self> {
        if value == "*" {
            Some(Self::Unbounded)
        } else {
            value.parse().ok().map(Self::Bounded)
        }
    }
}

impl fmt::Display for MaxCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaxCount::Unbounded => write!(f, "*"),
            MaxCount::Bounded(n) => write!(f, "{n}"),
        }
    }
}

impl Serialize for MaxCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MaxCount::Unbounded => serializer.serialize_str("*"),
            MaxCount::Bounded(n) => serializer.serialize_u32(*n),
        }
    }
}

// ============================================================================
// PROPERTY ROWS
// ============================================================================

/// A property row as declared on a class under `## Properties`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyDecl {
    /// The type token as written (`xsd:string`, `Element`, `/Core/Agent`).
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(rename = "minCount")]
    pub min_count: u32,
    #[serde(rename = "maxCount")]
    pub max_count: MaxCount,
    /// Fully qualified name of the referenced property.
    pub fqname: String,
}

/// A partial row from `## External properties restrictions`: only the
/// overridden sub-keys are present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PropertyOverride {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(rename = "minCount", skip_serializing_if = "Option::is_none")]
    pub min_count: Option<u32>,
    #[serde(rename = "maxCount", skip_serializing_if = "Option::is_none")]
    pub max_count: Option<MaxCount>,
}

/// A finally-applied property row of a class: the declared (or inherited)
/// constraints after inheritance merging and external restrictions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectiveProperty {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(rename = "minCount")]
    pub min_count: u32,
    #[serde(rename = "maxCount")]
    pub max_count: MaxCount,
    /// Fully qualified name of the property itself.
    pub fullname: String,
    /// Fully qualified name of the type, unless the declared token was
    /// already qualified (`/...`) or namespaced (`xsd:...`).
    pub fulltype: String,
}

// ============================================================================
// ENTITIES
// ============================================================================

/// A namespace: one top-level directory of the model tree.
#[derive(Debug, Clone, Serialize)]
pub struct Namespace {
    pub name: String,
    pub license: String,
    pub summary: String,
    pub description: String,
    /// From the `id` metadata key.
    pub iri: String,
    /// Body of the optional `Profile conformance` section.
    pub conformance: Option<String>,
    #[serde(skip)]
    pub classes: Vec<ClassId>,
    #[serde(skip)]
    pub properties: Vec<PropertyId>,
    #[serde(skip)]
    pub vocabularies: Vec<VocabularyId>,
    #[serde(skip)]
    pub individuals: Vec<IndividualId>,
    #[serde(skip)]
    pub datatypes: Vec<DatatypeId>,
}

/// A class with its declared properties and restriction overrides.
#[derive(Debug, Clone, Serialize)]
pub struct Class {
    pub name: String,
    pub fqname: String,
    /// Name of the owning namespace.
    pub ns: String,
    pub license: String,
    pub summary: String,
    pub description: String,
    pub iri: String,
    pub instantiability: Instantiability,
    /// Fully qualified parent class name; `None` for `SubclassOf: none`
    /// or no `SubclassOf` metadata.
    pub fqsupercname: Option<String>,
    /// Declared property rows, keyed by the token as written.
    pub properties: IndexMap<String, PropertyDecl>,
    /// `/Ns/Class/prop` → overrides.
    pub ext_prop_restrs: IndexMap<String, PropertyOverride>,

    // Derived by analysis.
    /// Ancestors, nearest first.
    pub inheritance_stack: Vec<String>,
    /// Fully qualified names of direct subclasses, sorted.
    pub subclasses: Vec<String>,
    /// Effective properties keyed by short name.
    pub all_properties: IndexMap<String, EffectiveProperty>,
}

impl Class {
    /// True when the effective properties include `spdxId`, which makes
    /// instances IRI-addressable.
    pub fn has_spdx_id(&self) -> bool {
        self.all_properties.contains_key("spdxId")
    }

    pub fn is_abstract(&self) -> bool {
        self.instantiability == Instantiability::Abstract
    }
}

/// A standalone property definition.
#[derive(Debug, Clone, Serialize)]
pub struct Property {
    pub name: String,
    pub fqname: String,
    pub ns: String,
    pub license: String,
    pub summary: String,
    pub description: String,
    pub iri: String,
    pub nature: Nature,
    /// The declared range token (`xsd:string` or a type reference).
    pub range: String,

    // Derived by analysis.
    /// Fully qualified names of the classes declaring this property.
    pub used_in: Vec<String>,
}

/// A controlled vocabulary: a named enumeration of entries.
#[derive(Debug, Clone, Serialize)]
pub struct Vocabulary {
    pub name: String,
    pub fqname: String,
    pub ns: String,
    pub license: String,
    pub summary: String,
    pub description: String,
    pub iri: String,
    /// Entry name → description, in file order.
    pub entries: IndexMap<String, String>,
}

impl Vocabulary {
    /// IRI of one entry of this vocabulary.
    pub fn entry_iri(&self, entry: &str) -> String {
        format!("{}/{}", self.iri, entry)
    }
}

/// A named individual with fixed property values.
#[derive(Debug, Clone, Serialize)]
pub struct Individual {
    pub name: String,
    pub fqname: String,
    pub ns: String,
    pub license: String,
    pub summary: String,
    pub description: String,
    pub iri: String,
    /// The declared type token from metadata.
    #[serde(rename = "type")]
    pub type_name: String,
    /// The `IRI` metadata key, when it differs from the synthesized iri.
    pub custom_iri: Option<String>,
    /// Property → literal value.
    pub values: IndexMap<String, String>,
}

impl Individual {
    /// The IRI this individual is declared under: the `IRI` metadata key
    /// when present, the synthesized iri otherwise.
    pub fn declared_iri(&self) -> &str {
        self.custom_iri.as_deref().unwrap_or(&self.iri)
    }
}

/// A constrained literal type with an `xsd:` base.
#[derive(Debug, Clone, Serialize)]
pub struct Datatype {
    pub name: String,
    pub fqname: String,
    pub ns: String,
    pub license: String,
    pub summary: String,
    pub description: String,
    pub iri: String,
    /// The `xsd:` base token from `SubclassOf`.
    pub xsd_base: String,
    /// The `Format` section; recognized key: `pattern`.
    pub format: IndexMap<String, String>,
}

impl Datatype {
    pub fn pattern(&self) -> Option<&str> {
        self.format.get("pattern").map(String::as_str)
    }
}
