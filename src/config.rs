//! The parameters of a run.
//!
//! [`Config`] carries everything the generation phases need: where to
//! read, where to write, which artifact families to produce, and the
//! literal metadata embedded in outputs. The CLI builds one from its
//! arguments; tests build one directly.

use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;

/// Literal values asserted on the `owl:Ontology` header and on
/// per-individual creation info.
#[derive(Debug, Clone)]
pub struct OntologyMetadata {
    pub title: String,
    pub abstract_text: String,
    pub creator: String,
    /// ISO date of the run, e.g. `2024-05-02`.
    pub created: String,
    pub license: String,
}

/// Configuration of one compiler run.
#[derive(Debug, Clone)]
pub struct Config {
    pub input_path: PathBuf,
    /// Check the input only; generate nothing.
    pub no_output: bool,

    pub output_jsondump_path: PathBuf,
    pub output_mkdocs_path: PathBuf,
    pub output_plantuml_path: PathBuf,
    pub output_rdf_path: PathBuf,
    pub output_tex_path: PathBuf,
    pub output_webpages_path: PathBuf,

    pub generate_jsondump: bool,
    pub generate_mkdocs: bool,
    pub generate_plantuml: bool,
    pub generate_rdf: bool,
    pub generate_tex: bool,
    pub generate_webpages: bool,

    /// One line embedded into generated artifacts that accept comments.
    pub autogen_header: String,
    pub parser_version: String,
    /// Version component of the base IRI, e.g. `v3`.
    pub model_version: String,
    pub ontology: OntologyMetadata,
}

impl Config {
    /// A configuration rooted at `input` and `output` with every
    /// generator enabled, stamped with `now`.
    pub fn new(input: &Path, output: &Path, now: DateTime<Utc>) -> Self {
        let parser_version = env!("CARGO_PKG_VERSION").to_owned();
        let autogen_header = format!(
            "Automatically generated by spec-parser v{parser_version} on {}",
            now.to_rfc3339_opts(SecondsFormat::Secs, true)
        );
        Self {
            input_path: input.to_owned(),
            no_output: false,
            output_jsondump_path: output.join("jsondump"),
            output_mkdocs_path: output.join("mkdocs"),
            output_plantuml_path: output.join("plantuml"),
            output_rdf_path: output.join("rdf"),
            output_tex_path: output.join("tex"),
            output_webpages_path: output.join("webpages"),
            generate_jsondump: true,
            generate_mkdocs: true,
            generate_plantuml: true,
            generate_rdf: true,
            generate_tex: true,
            generate_webpages: true,
            autogen_header,
            parser_version,
            model_version: "v3".to_owned(),
            ontology: OntologyMetadata {
                title: "SPDX 3 model".to_owned(),
                abstract_text: "RDF ontology of the System Package Data Exchange (SPDX) version 3 model.".to_owned(),
                creator: "SPDX Project".to_owned(),
                created: now.format("%Y-%m-%d").to_string(),
                license: "https://spdx.org/licenses/Community-Spec-1.0.html".to_owned(),
            },
        }
    }

    /// The base IRI every entity iri lives under.
    pub fn base_iri(&self) -> String {
        format!("https://spdx.org/rdf/{}/terms/", self.model_version)
    }

    /// A flat string-keyed view of the configuration, for templating
    /// collaborators.
    pub fn all_as_dict(&self) -> IndexMap<String, String> {
        let mut dict = IndexMap::new();
        dict.insert("input_path".into(), self.input_path.display().to_string());
        dict.insert("no_output".into(), self.no_output.to_string());
        dict.insert(
            "output_jsondump_path".into(),
            self.output_jsondump_path.display().to_string(),
        );
        dict.insert(
            "output_mkdocs_path".into(),
            self.output_mkdocs_path.display().to_string(),
        );
        dict.insert(
            "output_plantuml_path".into(),
            self.output_plantuml_path.display().to_string(),
        );
        dict.insert(
            "output_rdf_path".into(),
            self.output_rdf_path.display().to_string(),
        );
        dict.insert(
            "output_tex_path".into(),
            self.output_tex_path.display().to_string(),
        );
        dict.insert(
            "output_webpages_path".into(),
            self.output_webpages_path.display().to_string(),
        );
        dict.insert(
            "generate_jsondump".into(),
            self.generate_jsondump.to_string(),
        );
        dict.insert("generate_mkdocs".into(), self.generate_mkdocs.to_string());
        dict.insert(
            "generate_plantuml".into(),
            self.generate_plantuml.to_string(),
        );
        dict.insert("generate_rdf".into(), self.generate_rdf.to_string());
        dict.insert("generate_tex".into(), self.generate_tex.to_string());
        dict.insert(
            "generate_webpages".into(),
            self.generate_webpages.to_string(),
        );
        dict.insert("autogen_header".into(), self.autogen_header.clone());
        dict.insert("parser_version".into(), self.parser_version.clone());
        dict.insert("model_version".into(), self.model_version.clone());
        dict
    }
}
