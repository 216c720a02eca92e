//! RDF: graph construction and serialization.
//!
//! [`ontology::build_graph`] walks the analyzed model into a [`Graph`];
//! [`serialize`] renders that graph in every supported format. The
//! JSON-LD context derivation in [`crate::context`] reads the same
//! graph.

pub mod graph;
pub mod ontology;
pub mod serialize;
pub mod term;
pub mod vocab;

pub use graph::{Graph, Triple};
pub use ontology::build_graph;
pub use serialize::{serialize, Format};
pub use term::{Literal, Term};
