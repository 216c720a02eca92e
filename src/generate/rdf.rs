//! The RDF artifact family: `spdx-model.<ext>` in every serialization,
//! the JSON-LD context, and the GraphViz rendering.
//!
//! Each file is written independently; a failed write is reported and
//! the remaining files are still produced.

use std::path::Path;

use crate::config::Config;
use crate::context;
use crate::generate::{write_file, GenerateError, Renderer};
use crate::model::Model;
use crate::rdf::{self, serialize, Format};
use crate::report::{ErrorKind, Reporter};

pub struct RdfRenderer;

impl Renderer for RdfRenderer {
    fn name(&self) -> &'static str {
        "rdf"
    }

    fn render(&self, model: &Model, cfg: &Config, rep: &mut Reporter) -> Result<(), GenerateError> {
        let out = &cfg.output_rdf_path;
        let graph = rdf::build_graph(model, cfg);

        for format in Format::all() {
            let path = out.join(format!("spdx-model.{}", format.extension()));
            write_reported(&path, &serialize::serialize(&graph, format), rep);
        }

        let ctx = context::build_context(&graph, &cfg.base_iri(), rep);
        write_reported(
            &out.join("spdx-context.jsonld"),
            &context::render_context(&ctx),
            rep,
        );

        write_reported(
            &out.join("spdx-model.dot"),
            &serialize::to_dot(&graph, &cfg.autogen_header),
            rep,
        );

        Ok(())
    }
}

fn write_reported(path: &Path, contents: &str, rep: &mut Reporter) {
    if let Err(err) = write_file(path, contents) {
        rep.error(
            ErrorKind::Io,
            format!("cannot write {}: {err}", path.display()),
        );
    }
}
