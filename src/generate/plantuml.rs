//! PlantUML input for a class diagram of the whole model.

use std::fmt::Write as _;

use crate::base::short_name;
use crate::config::Config;
use crate::generate::{write_file, GenerateError, Renderer};
use crate::model::Model;
use crate::report::Reporter;

pub struct PlantUmlRenderer;

impl Renderer for PlantUmlRenderer {
    fn name(&self) -> &'static str {
        "plantuml"
    }

    fn render(&self, model: &Model, cfg: &Config, _rep: &mut Reporter) -> Result<(), GenerateError> {
        let path = cfg.output_plantuml_path.join("model.plantuml");
        write_file(&path, &to_plantuml(model, cfg))?;
        Ok(())
    }
}

/// The diagram source for one model.
pub fn to_plantuml(model: &Model, cfg: &Config) -> String {
    let mut s = format!(
        "\n@startuml\n'{}\n\ntitle SPDXv3 model\nscale 4000*4000\nhide methods\nskinparam packageStyle folder\n\n",
        cfg.autogen_header
    );

    for ns in &model.namespaces {
        let _ = writeln!(s, "package {} {{\n}}", ns.name);
    }

    let mut inheritances = Vec::new();
    let mut prop_to_class = Vec::new();

    for class in &model.classes {
        if class.is_abstract() {
            s.push_str("abstract ");
        } else {
            s.push_str("class ");
        }
        let qualified = format!("{}.{}", class.ns, class.name);
        let _ = writeln!(s, "{qualified} {{");
        if let Some(parent) = &class.fqsupercname {
            inheritances.push((qualified.clone(), short_name(parent).to_owned()));
        }
        let mut tokens: Vec<&String> = class.properties.keys().collect();
        tokens.sort();
        for token in tokens {
            let decl = &class.properties[token];
            let _ = writeln!(s, "\t{token} {}:{}", decl.min_count, decl.max_count);
            if !decl.type_name.contains(':') {
                prop_to_class.push((
                    format!("{qualified}::{token}"),
                    short_name(&decl.type_name).to_owned(),
                ));
            }
        }
        s.push_str("}\n");
    }

    for vocab in &model.vocabularies {
        let _ = writeln!(s, "enum {}.{} {{\n}}", vocab.ns, vocab.name);
    }
    for datatype in &model.datatypes {
        let _ = writeln!(s, "class {}.{} {{\n}}", datatype.ns, datatype.name);
    }

    for (left, right) in inheritances {
        let _ = writeln!(s, "{left} <|-- {right}");
    }
    for (left, right) in prop_to_class {
        let _ = writeln!(s, "{left} --> {right}");
    }

    s.push_str("\n@enduml\n");
    s
}
