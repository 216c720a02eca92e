//! Effective-property computation.
//!
//! For each class, in topological order: its own declared rows (keyed by
//! short name, with computed `fullname` and `fulltype`), then the parent's
//! effective rows for short names not declared locally, then the class's
//! external property restrictions applied on top. Rows are cloned at
//! every merge step; no class shares a row with its parent.

use indexmap::IndexMap;

use crate::analysis::Inheritance;
use crate::base::{is_namespaced, short_name};
use crate::model::{EffectiveProperty, Model};
use crate::report::{ErrorKind, Reporter};

pub(crate) fn compute(model: &mut Model, inheritance: &Inheritance, rep: &mut Reporter) {
    for &id in &inheritance.order {
        let idx = id.index();

        let mut effective: IndexMap<String, EffectiveProperty> = IndexMap::new();
        {
            let class = &model.classes[idx];
            for (token, decl) in &class.properties {
                let key = short_name(token).to_owned();
                let fulltype = full_type(&decl.type_name, &class.ns);
                effective.insert(
                    key,
                    EffectiveProperty {
                        type_name: decl.type_name.clone(),
                        min_count: decl.min_count,
                        max_count: decl.max_count,
                        fullname: decl.fqname.clone(),
                        fulltype,
                    },
                );
            }
        }

        if let Some(pid) = inheritance.parents[idx] {
            // The parent precedes this class in the order, so its own
            // effective map is already final.
            let inherited = model.classes[pid.index()].all_properties.clone();
            for (key, row) in inherited {
                effective.entry(key).or_insert(row);
            }
        }

        let restrictions = model.classes[idx].ext_prop_restrs.clone();
        let class_fqname = model.classes[idx].fqname.clone();
        let class_ns = model.classes[idx].ns.clone();
        for (key, over) in restrictions {
            let Some(row) = effective.get_mut(short_name(&key)) else {
                rep.error(
                    ErrorKind::Reference,
                    format!(
                        "external property restriction {key} in class {class_fqname} does not match an inherited property"
                    ),
                );
                continue;
            };
            if let Some(type_name) = over.type_name {
                if row.type_name == type_name {
                    rep.warning(format!(
                        "redundant restriction of type in {key} of class {class_fqname}"
                    ));
                } else {
                    row.fulltype = full_type(&type_name, &class_ns);
                    row.type_name = type_name;
                }
            }
            if let Some(min_count) = over.min_count {
                if row.min_count == min_count {
                    rep.warning(format!(
                        "redundant restriction of minCount in {key} of class {class_fqname}"
                    ));
                } else {
                    row.min_count = min_count;
                }
            }
            if let Some(max_count) = over.max_count {
                if row.max_count == max_count {
                    rep.warning(format!(
                        "redundant restriction of maxCount in {key} of class {class_fqname}"
                    ));
                } else {
                    row.max_count = max_count;
                }
            }
        }

        model.classes[idx].all_properties = effective;
    }
}

/// The fully qualified type of a row: the token itself when already
/// qualified (`/...`) or namespaced (`xsd:...`), otherwise expanded in
/// the class's namespace.
fn full_type(type_name: &str, ns: &str) -> String {
    if type_name.starts_with('/') || is_namespaced(type_name) {
        type_name.to_owned()
    } else {
        format!("/{ns}/{type_name}")
    }
}
