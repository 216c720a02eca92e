//! Artifact generation.
//!
//! [`Renderer`] is the seam between the validated model and anything that
//! writes files: the built-in renderers (RDF, JSON dump, PlantUML) and
//! the external documentation renderers share it. [`gen_all`] dispatches
//! over the configuration toggles; a failed renderer is reported and the
//! remaining ones still run.

mod jsondump;
mod plantuml;
mod rdf;

pub use jsondump::JsonDumpRenderer;
pub use plantuml::PlantUmlRenderer;
pub use rdf::RdfRenderer;

use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

use crate::config::Config;
use crate::model::Model;
use crate::report::{ErrorKind, Reporter};

/// Errors a renderer can surface to the dispatcher.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Produces one artifact family from the validated model.
pub trait Renderer {
    fn name(&self) -> &'static str;
    fn render(&self, model: &Model, cfg: &Config, rep: &mut Reporter) -> Result<(), GenerateError>;
}

/// Runs every enabled renderer.
pub fn gen_all(model: &Model, cfg: &Config, rep: &mut Reporter) {
    if cfg.no_output {
        tracing::info!("output generation disabled");
        return;
    }

    let renderers: [(bool, &dyn Renderer); 3] = [
        (cfg.generate_rdf, &RdfRenderer),
        (cfg.generate_jsondump, &JsonDumpRenderer),
        (cfg.generate_plantuml, &PlantUmlRenderer),
    ];
    for (enabled, renderer) in renderers {
        if !enabled {
            continue;
        }
        tracing::info!("generating {}", renderer.name());
        if let Err(err) = renderer.render(model, cfg, rep) {
            rep.error(
                ErrorKind::Io,
                format!("generating {} failed: {err}", renderer.name()),
            );
        }
    }

    // Documentation renderers (mkdocs, tex, webpages) plug in through the
    // same trait but are not part of this crate.
    for (enabled, name) in [
        (cfg.generate_mkdocs, "mkdocs"),
        (cfg.generate_tex, "tex"),
        (cfg.generate_webpages, "webpages"),
    ] {
        if enabled {
            tracing::debug!("no built-in renderer for {name}");
        }
    }
}

/// Writes `contents` to `path`, creating parent directories as needed.
pub(crate) fn write_file(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)
}
