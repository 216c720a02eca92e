//! Range agreement between class property rows and property definitions,
//! the `used_in` reverse index, and reference resolution checks.

use crate::base::{expand, is_namespaced, short_name};
use crate::model::Model;
use crate::report::{ErrorKind, Reporter};

/// For every class `C` declaring a property row `p` with type `T`: the
/// owning property's `Range` must equal `T`. A row written with a leading
/// `/` (an external property) may instead match by short name, which is
/// accepted with a warning. Every row also appends `C` to the property's
/// `used_in` list, mismatch or not.
pub(crate) fn check_property_ranges(model: &mut Model, rep: &mut Reporter) {
    // (property, using class) pairs collected first; `used_in` is
    // appended afterwards so the class iteration keeps the model borrow.
    let mut used = Vec::new();

    for class in &model.classes {
        for (token, decl) in &class.properties {
            let Some(pid) = model.property_by_fqn(&decl.fqname) else {
                rep.error(
                    ErrorKind::Reference,
                    format!(
                        "in class {}, property {token} does not resolve: {} is unknown",
                        class.fqname, decl.fqname
                    ),
                );
                continue;
            };
            used.push((pid, class.fqname.clone()));

            let range = &model.property(pid).range;
            let declared = &decl.type_name;
            if range == declared {
                continue;
            }
            if token.starts_with('/') && short_name(range) == declared.as_str() {
                rep.warning(format!(
                    "in class {}, property {token} has type {declared} matching the range of {} only by short name",
                    class.fqname, decl.fqname
                ));
                continue;
            }
            rep.error(
                ErrorKind::Reference,
                format!(
                    "in class {}, property {token} has type {declared} but the range of {} is {range}",
                    class.fqname, decl.fqname
                ),
            );
        }
    }

    for (pid, class_fqname) in used {
        model.properties[pid.index()].used_in.push(class_fqname);
    }
}

/// Remaining cross-entity references: class property-row types, property
/// ranges and individual types must resolve in the type union (namespaced
/// literals like `xsd:string` excepted).
pub(crate) fn check_references(model: &Model, rep: &mut Reporter) {
    for class in &model.classes {
        for (token, decl) in &class.properties {
            if is_namespaced(&decl.type_name) {
                continue;
            }
            // Rows naming an external property may use a short-name-only
            // type; the range check already validated it against the
            // property definition.
            if token.starts_with('/') && !decl.type_name.starts_with('/') {
                continue;
            }
            let fqtype = expand(&decl.type_name, &class.ns);
            if model.type_by_fqn(&fqtype).is_none() {
                rep.error(
                    ErrorKind::Reference,
                    format!(
                        "in class {}, property {token} has unknown type {}",
                        class.fqname, decl.type_name
                    ),
                );
            }
        }
    }

    for property in &model.properties {
        if is_namespaced(&property.range) {
            if !property.range.starts_with("xsd:") {
                rep.warning(format!(
                    "unknown namespace in range <{}> of property {}",
                    property.range, property.name
                ));
            }
            continue;
        }
        let fqrange = expand(&property.range, &property.ns);
        if model.type_by_fqn(&fqrange).is_none() {
            rep.error(
                ErrorKind::Reference,
                format!(
                    "property {} has unknown range {}",
                    property.fqname, property.range
                ),
            );
        }
    }

    for individual in &model.individuals {
        if is_namespaced(&individual.type_name) {
            continue;
        }
        let fqtype = expand(&individual.type_name, &individual.ns);
        if model.type_by_fqn(&fqtype).is_none() {
            rep.error(
                ErrorKind::Reference,
                format!(
                    "individual {} has unknown type {}",
                    individual.fqname, individual.type_name
                ),
            );
        }
    }
}
