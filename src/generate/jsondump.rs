//! JSON dump of the analyzed model.
//!
//! One `model.json` mirroring the in-memory structure: the namespace list
//! with per-kind member names, and the per-kind registries keyed by fully
//! qualified name, derived fields included.

use serde_json::{json, Map, Value};

use crate::config::Config;
use crate::generate::{write_file, GenerateError, Renderer};
use crate::model::Model;
use crate::report::Reporter;

pub struct JsonDumpRenderer;

impl Renderer for JsonDumpRenderer {
    fn name(&self) -> &'static str {
        "jsondump"
    }

    fn render(&self, model: &Model, cfg: &Config, _rep: &mut Reporter) -> Result<(), GenerateError> {
        let path = cfg.output_jsondump_path.join("model.json");
        let mut out = serde_json::to_string_pretty(&to_json(model)?)?;
        out.push('\n');
        write_file(&path, &out)?;
        Ok(())
    }
}

/// The dump document for one model.
pub fn to_json(model: &Model) -> Result<Value, serde_json::Error> {
    let mut namespaces = Vec::new();
    for ns in &model.namespaces {
        let mut entry = to_map(serde_json::to_value(ns)?);
        entry.insert(
            "classes".to_owned(),
            fqname_list(ns.classes.iter().map(|id| &model.class(*id).fqname)),
        );
        entry.insert(
            "properties".to_owned(),
            fqname_list(ns.properties.iter().map(|id| &model.property(*id).fqname)),
        );
        entry.insert(
            "vocabularies".to_owned(),
            fqname_list(ns.vocabularies.iter().map(|id| &model.vocabulary(*id).fqname)),
        );
        entry.insert(
            "individuals".to_owned(),
            fqname_list(ns.individuals.iter().map(|id| &model.individual(*id).fqname)),
        );
        entry.insert(
            "datatypes".to_owned(),
            fqname_list(ns.datatypes.iter().map(|id| &model.datatype(*id).fqname)),
        );
        namespaces.push(Value::Object(entry));
    }

    let mut classes = Map::new();
    for class in &model.classes {
        classes.insert(class.fqname.clone(), serde_json::to_value(class)?);
    }
    let mut properties = Map::new();
    for property in &model.properties {
        properties.insert(property.fqname.clone(), serde_json::to_value(property)?);
    }
    let mut vocabularies = Map::new();
    for vocab in &model.vocabularies {
        vocabularies.insert(vocab.fqname.clone(), serde_json::to_value(vocab)?);
    }
    let mut individuals = Map::new();
    for individual in &model.individuals {
        individuals.insert(individual.fqname.clone(), serde_json::to_value(individual)?);
    }
    let mut datatypes = Map::new();
    for datatype in &model.datatypes {
        datatypes.insert(datatype.fqname.clone(), serde_json::to_value(datatype)?);
    }

    Ok(json!({
        "namespaces": namespaces,
        "classes": classes,
        "properties": properties,
        "vocabularies": vocabularies,
        "individuals": individuals,
        "datatypes": datatypes,
    }))
}

fn to_map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => unreachable!("entities serialize to objects"),
    }
}

fn fqname_list<'a>(names: impl Iterator<Item = &'a String>) -> Value {
    Value::Array(names.cloned().map(Value::String).collect())
}
