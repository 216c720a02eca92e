//! Discovery and registration of the input tree.
//!
//! Layout contract, rooted at the input directory:
//!
//! ```text
//! <in>/<Ns>/<Ns>.md                      namespace file
//! <in>/<Ns>/Classes/<Name>.md            Name starts uppercase
//! <in>/<Ns>/Properties/<name>.md         name starts lowercase
//! <in>/<Ns>/Vocabularies/<Name>.md
//! <in>/<Ns>/Individuals/<Name>.md
//! <in>/<Ns>/Datatypes/<Name>.md
//! ```
//!
//! Only top-level directories starting with an uppercase letter are
//! namespaces. Files whose basename starts with `_` are skipped with a
//! warning. Directory listings are sorted so that registration order,
//! and with it every emitted artifact, is stable across runs.

use std::fs;
use std::path::{Path, PathBuf};

use crate::mdparse::SpecFile;
use crate::model::loader::{self, NsContext};
use crate::model::Model;
use crate::report::{ErrorKind, Reporter};

pub(crate) fn load_tree(input: &Path, rep: &mut Reporter) -> Model {
    let mut model = Model::default();

    if !input.is_dir() {
        rep.error(
            ErrorKind::Io,
            format!("{}: not a directory", input.display()),
        );
        return model;
    }
    if input.file_name().and_then(|n| n.to_str()) != Some("model") {
        rep.warning(format!("{}: input not named \"model\"", input.display()));
    }

    for dir in namespace_dirs(input, rep) {
        load_namespace_dir(&dir, &mut model, rep);
    }

    tracing::info!(
        namespaces = model.namespaces.len(),
        classes = model.classes.len(),
        properties = model.properties.len(),
        vocabularies = model.vocabularies.len(),
        individuals = model.individuals.len(),
        datatypes = model.datatypes.len(),
        "model loaded"
    );

    model
}

fn load_namespace_dir(dir: &Path, model: &mut Model, rep: &mut Reporter) {
    let dirname = dir
        .file_name()
        .and_then(|n| n.to_str())
        .expect("namespace directories have utf-8 names")
        .to_owned();

    let ns_file = dir.join(format!("{dirname}.md"));
    if !ns_file.is_file() {
        rep.error(
            ErrorKind::Structural,
            format!("missing top-level namespace file {}", ns_file.display()),
        );
        return;
    }
    let Some(sf) = read_spec_file(&ns_file, rep) else {
        return;
    };
    let Some(ns) = loader::load_namespace(&ns_file, &sf, rep) else {
        return;
    };
    let ns_name = ns.name.clone();
    let ns_iri = ns.iri.clone();
    let Some(ns_id) = model.add_namespace(ns, rep) else {
        return;
    };
    let ctx = NsContext {
        name: &ns_name,
        iri: &ns_iri,
    };

    for path in entity_files(&dir.join("Classes"), true, rep) {
        if let Some(sf) = read_spec_file(&path, rep) {
            if let Some(class) = loader::load_class(&path, &sf, &ctx, rep) {
                model.add_class(ns_id, class, rep);
            }
        }
    }
    for path in entity_files(&dir.join("Properties"), false, rep) {
        if let Some(sf) = read_spec_file(&path, rep) {
            if let Some(prop) = loader::load_property(&path, &sf, &ctx, rep) {
                model.add_property(ns_id, prop, rep);
            }
        }
    }
    for path in entity_files(&dir.join("Vocabularies"), true, rep) {
        if let Some(sf) = read_spec_file(&path, rep) {
            if let Some(vocab) = loader::load_vocabulary(&path, &sf, &ctx, rep) {
                model.add_vocabulary(ns_id, vocab, rep);
            }
        }
    }
    for path in entity_files(&dir.join("Individuals"), true, rep) {
        if let Some(sf) = read_spec_file(&path, rep) {
            if let Some(ind) = loader::load_individual(&path, &sf, &ctx, rep) {
                model.add_individual(ns_id, ind, rep);
            }
        }
    }
    for path in entity_files(&dir.join("Datatypes"), true, rep) {
        if let Some(sf) = read_spec_file(&path, rep) {
            if let Some(dt) = loader::load_datatype(&path, &sf, &ctx, rep) {
                model.add_datatype(ns_id, dt, rep);
            }
        }
    }
}

/// Top-level directories whose name starts with an uppercase letter,
/// sorted by name.
fn namespace_dirs(input: &Path, rep: &mut Reporter) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = match fs::read_dir(input) {
        Ok(entries) => entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .and_then(|n| n.chars().next())
                    .is_some_and(char::is_uppercase)
            })
            .collect(),
        Err(err) => {
            rep.error(
                ErrorKind::Io,
                format!("cannot read {}: {err}", input.display()),
            );
            Vec::new()
        }
    };
    dirs.sort();
    dirs
}

/// The `.md` files of one entity directory, sorted by name.
///
/// `uppercase` selects the required case of the basename's first
/// character (uppercase for everything but `Properties/`). A missing
/// directory is not an error: the namespace simply has no entities of
/// that kind.
fn entity_files(dir: &Path, uppercase: bool, rep: &mut Reporter) -> Vec<PathBuf> {
    if !dir.is_dir() {
        return Vec::new();
    }
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            rep.error(
                ErrorKind::Io,
                format!("cannot read {}: {err}", dir.display()),
            );
            return Vec::new();
        }
    };

    let mut files = Vec::new();
    for entry in entries.filter_map(|entry| entry.ok()) {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !name.ends_with(".md") {
            continue;
        }
        if name.starts_with('_') {
            rep.warning(format!("skipping {}", path.display()));
            continue;
        }
        let first = name.chars().next().expect("name is non-empty");
        let case_ok = if uppercase {
            first.is_uppercase()
        } else {
            first.is_lowercase()
        };
        if case_ok {
            files.push(path);
        }
    }
    files.sort();
    files
}

fn read_spec_file(path: &Path, rep: &mut Reporter) -> Option<SpecFile> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            rep.error_in(ErrorKind::Io, path, format!("cannot read file: {err}"));
            return None;
        }
    };
    SpecFile::parse(path, &text, rep)
}
