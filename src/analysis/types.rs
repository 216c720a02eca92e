//! The type union: every class, vocabulary and datatype under one
//! fully-qualified-name lookup.

use rustc_hash::FxHashMap;

use crate::base::{ClassId, DatatypeId, VocabularyId};
use crate::model::{Model, TypeRef};
use crate::report::{ErrorKind, Reporter};

/// Builds `model.types`. A name claimed by more than one kind is a
/// collision: the first registration wins and the others are reported.
pub(crate) fn build_type_union(model: &mut Model, rep: &mut Reporter) {
    let mut types: FxHashMap<String, TypeRef> = FxHashMap::default();

    for (i, class) in model.classes.iter().enumerate() {
        types.insert(class.fqname.clone(), TypeRef::Class(ClassId::new(i)));
    }
    for (i, vocab) in model.vocabularies.iter().enumerate() {
        if types.contains_key(&vocab.fqname) {
            rep.error(
                ErrorKind::Schema,
                format!("type name collision across kinds: {}", vocab.fqname),
            );
            continue;
        }
        types.insert(vocab.fqname.clone(), TypeRef::Vocabulary(VocabularyId::new(i)));
    }
    for (i, datatype) in model.datatypes.iter().enumerate() {
        if types.contains_key(&datatype.fqname) {
            rep.error(
                ErrorKind::Schema,
                format!("type name collision across kinds: {}", datatype.fqname),
            );
            continue;
        }
        types.insert(datatype.fqname.clone(), TypeRef::Datatype(DatatypeId::new(i)));
    }

    tracing::debug!(total = types.len(), "type union built");
    model.types = types;
}
