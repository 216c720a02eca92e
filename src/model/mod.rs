//! In-memory representation of the model.
//!
//! [`Model`] owns every entity in per-kind arenas; everything else refers
//! to entities through typed handles ([`ClassId`](crate::base::ClassId),
//! ...) or through fully qualified names resolved via the index maps.
//! Arena order is registration order (namespaces in directory order,
//! entities in filename order within a namespace), so iterating an arena
//! is deterministic without sorting.

mod builder;
mod entities;
mod loader;

pub use entities::{
    Class, Datatype, EffectiveProperty, Individual, Instantiability, MaxCount, Namespace, Nature,
    Property, PropertyDecl, PropertyOverride, Vocabulary,
};

use std::path::Path;

use rustc_hash::FxHashMap;

use crate::base::{ClassId, DatatypeId, IndividualId, NamespaceId, PropertyId, VocabularyId};
use crate::report::{ErrorKind, Reporter};

/// A resolved reference into the type union
/// (classes ⊕ vocabularies ⊕ datatypes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeRef {
    Class(ClassId),
    Vocabulary(VocabularyId),
    Datatype(DatatypeId),
}

/// The complete model: arenas, name indexes and the type union.
#[derive(Debug, Default)]
pub struct Model {
    pub namespaces: Vec<Namespace>,
    pub classes: Vec<Class>,
    pub properties: Vec<Property>,
    pub vocabularies: Vec<Vocabulary>,
    pub individuals: Vec<Individual>,
    pub datatypes: Vec<Datatype>,

    namespace_index: FxHashMap<String, NamespaceId>,
    class_index: FxHashMap<String, ClassId>,
    property_index: FxHashMap<String, PropertyId>,
    vocabulary_index: FxHashMap<String, VocabularyId>,
    individual_index: FxHashMap<String, IndividualId>,
    datatype_index: FxHashMap<String, DatatypeId>,

    /// Fully qualified name → type entity, for every class, vocabulary
    /// and datatype. Populated by the analysis type-union pass.
    pub(crate) types: FxHashMap<String, TypeRef>,
}

impl Model {
    /// Reads the model tree under `input` and runs the analysis passes.
    ///
    /// Always returns a model; problems are recorded in `rep` and the
    /// affected entities are skipped or left partial.
    pub fn load(input: &Path, rep: &mut Reporter) -> Model {
        let mut model = builder::load_tree(input, rep);
        crate::analysis::process(&mut model, rep);
        model
    }

    /// Reads the model tree without running analysis. Derived fields stay
    /// empty; useful for inspecting loader output.
    pub fn load_unprocessed(input: &Path, rep: &mut Reporter) -> Model {
        builder::load_tree(input, rep)
    }

    // ------------------------------------------------------------------
    // Registration (used by the builder)
    // ------------------------------------------------------------------

    pub(crate) fn add_namespace(&mut self, ns: Namespace, rep: &mut Reporter) -> Option<NamespaceId> {
        if self.namespace_index.contains_key(&ns.name) {
            rep.error(
                ErrorKind::Schema,
                format!("duplicate namespace {}", ns.name),
            );
            return None;
        }
        let id = NamespaceId::new(self.namespaces.len());
        self.namespace_index.insert(ns.name.clone(), id);
        self.namespaces.push(ns);
        Some(id)
    }

    pub(crate) fn add_class(&mut self, ns: NamespaceId, class: Class, rep: &mut Reporter) {
        if self.class_index.contains_key(&class.fqname) {
            rep.error(ErrorKind::Schema, format!("duplicate class {}", class.fqname));
            return;
        }
        let id = ClassId::new(self.classes.len());
        self.class_index.insert(class.fqname.clone(), id);
        self.classes.push(class);
        self.namespaces[ns.index()].classes.push(id);
    }

    pub(crate) fn add_property(&mut self, ns: NamespaceId, property: Property, rep: &mut Reporter) {
        if self.property_index.contains_key(&property.fqname) {
            rep.error(
                ErrorKind::Schema,
                format!("duplicate property {}", property.fqname),
            );
            return;
        }
        let id = PropertyId::new(self.properties.len());
        self.property_index.insert(property.fqname.clone(), id);
        self.properties.push(property);
        self.namespaces[ns.index()].properties.push(id);
    }

    pub(crate) fn add_vocabulary(&mut self, ns: NamespaceId, vocab: Vocabulary, rep: &mut Reporter) {
        if self.vocabulary_index.contains_key(&vocab.fqname) {
            rep.error(
                ErrorKind::Schema,
                format!("duplicate vocabulary {}", vocab.fqname),
            );
            return;
        }
        let id = VocabularyId::new(self.vocabularies.len());
        self.vocabulary_index.insert(vocab.fqname.clone(), id);
        self.vocabularies.push(vocab);
        self.namespaces[ns.index()].vocabularies.push(id);
    }

    pub(crate) fn add_individual(
        &mut self,
        ns: NamespaceId,
        individual: Individual,
        rep: &mut Reporter,
    ) {
        if self.individual_index.contains_key(&individual.fqname) {
            rep.error(
                ErrorKind::Schema,
                format!("duplicate individual {}", individual.fqname),
            );
            return;
        }
        let id = IndividualId::new(self.individuals.len());
        self.individual_index.insert(individual.fqname.clone(), id);
        self.individuals.push(individual);
        self.namespaces[ns.index()].individuals.push(id);
    }

    pub(crate) fn add_datatype(&mut self, ns: NamespaceId, datatype: Datatype, rep: &mut Reporter) {
        if self.datatype_index.contains_key(&datatype.fqname) {
            rep.error(
                ErrorKind::Schema,
                format!("duplicate datatype {}", datatype.fqname),
            );
            return;
        }
        let id = DatatypeId::new(self.datatypes.len());
        self.datatype_index.insert(datatype.fqname.clone(), id);
        self.datatypes.push(datatype);
        self.namespaces[ns.index()].datatypes.push(id);
    }

    // ------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------

    pub fn namespace(&self, id: NamespaceId) -> &Namespace {
        &self.namespaces[id.index()]
    }

    pub fn class(&self, id: ClassId) -> &Class {
        &self.classes[id.index()]
    }

    pub fn property(&self, id: PropertyId) -> &Property {
        &self.properties[id.index()]
    }

    pub fn vocabulary(&self, id: VocabularyId) -> &Vocabulary {
        &self.vocabularies[id.index()]
    }

    pub fn individual(&self, id: IndividualId) -> &Individual {
        &self.individuals[id.index()]
    }

    pub fn datatype(&self, id: DatatypeId) -> &Datatype {
        &self.datatypes[id.index()]
    }

    pub fn namespace_by_name(&self, name: &str) -> Option<NamespaceId> {
        self.namespace_index.get(name).copied()
    }

    pub fn class_by_fqn(&self, fqname: &str) -> Option<ClassId> {
        self.class_index.get(fqname).copied()
    }

    pub fn property_by_fqn(&self, fqname: &str) -> Option<PropertyId> {
        self.property_index.get(fqname).copied()
    }

    pub fn vocabulary_by_fqn(&self, fqname: &str) -> Option<VocabularyId> {
        self.vocabulary_index.get(fqname).copied()
    }

    pub fn individual_by_fqn(&self, fqname: &str) -> Option<IndividualId> {
        self.individual_index.get(fqname).copied()
    }

    pub fn datatype_by_fqn(&self, fqname: &str) -> Option<DatatypeId> {
        self.datatype_index.get(fqname).copied()
    }

    /// Resolves a fully qualified name in the type union.
    pub fn type_by_fqn(&self, fqname: &str) -> Option<TypeRef> {
        self.types.get(fqname).copied()
    }

    /// Handles of all classes, in registration order.
    pub fn class_ids(&self) -> impl Iterator<Item = ClassId> {
        (0..self.classes.len()).map(ClassId::new)
    }

    /// Handles of all namespaces, in registration order.
    pub fn namespace_ids(&self) -> impl Iterator<Item = NamespaceId> {
        (0..self.namespaces.len()).map(NamespaceId::new)
    }
}
