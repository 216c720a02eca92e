//! Foundation types for the spec compiler.
//!
//! This module provides fundamental types used throughout the pipeline:
//! - Typed entity handles ([`NamespaceId`], [`ClassId`], ...) into the model arenas
//! - Fully qualified name helpers ([`expand`], [`short_name`], [`namespace_of`])
//!
//! This module has NO dependencies on other spec_parser modules.

/// Declares a `u32`-backed handle into one of the model arenas.
macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u32);

        impl $name {
            pub fn new(index: usize) -> Self {
                Self(index as u32)
            }

            pub fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

entity_id!(
    /// Handle to a [`Namespace`](crate::model::Namespace) in the model.
    NamespaceId
);
entity_id!(
    /// Handle to a [`Class`](crate::model::Class) in the model.
    ClassId
);
entity_id!(
    /// Handle to a [`Property`](crate::model::Property) in the model.
    PropertyId
);
entity_id!(
    /// Handle to a [`Vocabulary`](crate::model::Vocabulary) in the model.
    VocabularyId
);
entity_id!(
    /// Handle to an [`Individual`](crate::model::Individual) in the model.
    IndividualId
);
entity_id!(
    /// Handle to a [`Datatype`](crate::model::Datatype) in the model.
    DatatypeId
);

/// Returns true for tokens like `xsd:string` that name a term in a foreign
/// namespace. Such tokens are never expanded to fully qualified names.
pub fn is_namespaced(token: &str) -> bool {
    token.contains(':')
}

/// Expands a type or property token to a fully qualified name `/<ns>/<name>`.
///
/// Tokens that already start with `/` are fully qualified and are returned
/// unchanged, as are namespaced literals (`xsd:string`).
pub fn expand(token: &str, ns: &str) -> String {
    if token.starts_with('/') || is_namespaced(token) {
        token.to_owned()
    } else {
        format!("/{ns}/{token}")
    }
}

/// Returns the trailing component of a fully qualified name.
///
/// For a token without `/` this is the token itself.
pub fn short_name(fqn: &str) -> &str {
    match fqn.rfind('/') {
        Some(pos) => &fqn[pos + 1..],
        None => fqn,
    }
}

/// Returns the namespace component of a fully qualified name `/<ns>/<name>`,
/// or `None` when the name has no namespace prefix.
pub fn namespace_of(fqn: &str) -> Option<&str> {
    let rest = fqn.strip_prefix('/')?;
    let end = rest.find('/')?;
    Some(&rest[..end])
}
