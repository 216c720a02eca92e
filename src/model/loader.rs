//! Loaders: one parsed file → one typed entity.
//!
//! Each loader consumes a [`SpecFile`], validates the metadata key set of
//! its entity kind, checks that the `name` metadata matches the `#`
//! heading, applies defaults and synthesizes the entity iri. A loader
//! returns `None` when a required section or metadata key is missing; all
//! other problems are reported and repaired with defaults.

use std::path::Path;

use indexmap::IndexMap;

use crate::base::expand;
use crate::mdparse::{ContentSection, NestedListSection, SingleListSection, SpecFile};
use crate::model::entities::{
    Class, Datatype, Individual, Instantiability, MaxCount, Namespace, Nature, Property,
    PropertyDecl, PropertyOverride, Vocabulary,
};
use crate::report::{ErrorKind, Reporter};

const NAMESPACE_METADATA: &[&str] = &["name", "id"];
const CLASS_METADATA: &[&str] = &["name", "SubclassOf", "Instantiability"];
const CLASS_PROP_KEYS: &[&str] = &["type", "minCount", "maxCount"];
const PROPERTY_METADATA: &[&str] = &["name", "Nature", "Range"];
const VOCABULARY_METADATA: &[&str] = &["name"];
const INDIVIDUAL_METADATA: &[&str] = &["name", "type", "IRI"];
const DATATYPE_METADATA: &[&str] = &["name", "SubclassOf"];
const FORMAT_KEYS: &[&str] = &["pattern"];

/// Name and iri of the namespace an entity file belongs to.
pub(crate) struct NsContext<'a> {
    pub name: &'a str,
    pub iri: &'a str,
}

pub(crate) fn load_namespace(path: &Path, sf: &SpecFile, rep: &mut Reporter) -> Option<Namespace> {
    let summary = required_content(sf, "Summary", path, rep)?;
    let description = required_content(sf, "Description", path, rep)?;
    let metadata = required_single_list(sf, "Metadata", path, rep)?;

    check_metadata_keys(&metadata, NAMESPACE_METADATA, path, rep);
    check_name_agreement(&sf.name, &metadata, path, rep);

    let Some(iri) = metadata.kv.get("id").cloned() else {
        rep.error_in(
            ErrorKind::Schema,
            path,
            format!("namespace {} has no `id` metadata", sf.name),
        );
        return None;
    };

    let conformance = sf
        .sections
        .get("Profile conformance")
        .map(|body| ContentSection::parse(body).content);

    Some(Namespace {
        name: sf.name.clone(),
        license: sf.license.clone(),
        summary,
        description,
        iri,
        conformance,
        classes: Vec::new(),
        properties: Vec::new(),
        vocabularies: Vec::new(),
        individuals: Vec::new(),
        datatypes: Vec::new(),
    })
}

pub(crate) fn load_class(
    path: &Path,
    sf: &SpecFile,
    ns: &NsContext<'_>,
    rep: &mut Reporter,
) -> Option<Class> {
    let summary = required_content(sf, "Summary", path, rep)?;
    let description = required_content(sf, "Description", path, rep)?;
    let metadata = required_single_list(sf, "Metadata", path, rep)?;

    check_metadata_keys(&metadata, CLASS_METADATA, path, rep);
    check_name_agreement(&sf.name, &metadata, path, rep);

    let instantiability = match metadata.kv.get("Instantiability") {
        None => Instantiability::Concrete,
        Some(value) => Instantiability::parse(value).unwrap_or_else(|| {
            rep.error_in(
                ErrorKind::Schema,
                path,
                format!("invalid Instantiability `{value}`, assuming Concrete"),
            );
            Instantiability::Concrete
        }),
    };

    let fqsupercname = match metadata.kv.get("SubclassOf").map(String::as_str) {
        None | Some("none") => None,
        Some(parent) => Some(expand(parent, ns.name)),
    };

    let properties = sf
        .sections
        .get("Properties")
        .map(|body| {
            let parsed = NestedListSection::parse(body, path, "Properties", rep);
            parse_property_decls(parsed, ns, path, rep)
        })
        .unwrap_or_default();

    let ext_prop_restrs = sf
        .sections
        .get("External properties restrictions")
        .map(|body| {
            let parsed =
                NestedListSection::parse(body, path, "External properties restrictions", rep);
            parse_property_overrides(parsed, path, rep)
        })
        .unwrap_or_default();

    Some(Class {
        name: sf.name.clone(),
        fqname: format!("/{}/{}", ns.name, sf.name),
        ns: ns.name.to_owned(),
        license: sf.license.clone(),
        summary,
        description,
        iri: format!("{}/{}", ns.iri, sf.name),
        instantiability,
        fqsupercname,
        properties,
        ext_prop_restrs,
        inheritance_stack: Vec::new(),
        subclasses: Vec::new(),
        all_properties: IndexMap::new(),
    })
}

pub(crate) fn load_property(
    path: &Path,
    sf: &SpecFile,
    ns: &NsContext<'_>,
    rep: &mut Reporter,
) -> Option<Property> {
    let summary = required_content(sf, "Summary", path, rep)?;
    let description = required_content(sf, "Description", path, rep)?;
    let metadata = required_single_list(sf, "Metadata", path, rep)?;

    check_metadata_keys(&metadata, PROPERTY_METADATA, path, rep);
    check_name_agreement(&sf.name, &metadata, path, rep);

    let nature = match metadata.kv.get("Nature") {
        None => {
            rep.error_in(
                ErrorKind::Schema,
                path,
                format!("property {} has no Nature metadata", sf.name),
            );
            return None;
        }
        Some(value) => match Nature::parse(value) {
            Some(nature) => nature,
            None => {
                rep.error_in(
                    ErrorKind::Schema,
                    path,
                    format!("invalid Nature `{value}` in property {}", sf.name),
                );
                return None;
            }
        },
    };

    let Some(range) = metadata.kv.get("Range").cloned() else {
        rep.error_in(
            ErrorKind::Schema,
            path,
            format!("property {} has no Range metadata", sf.name),
        );
        return None;
    };

    Some(Property {
        name: sf.name.clone(),
        fqname: format!("/{}/{}", ns.name, sf.name),
        ns: ns.name.to_owned(),
        license: sf.license.clone(),
        summary,
        description,
        iri: format!("{}/{}", ns.iri, sf.name),
        nature,
        range,
        used_in: Vec::new(),
    })
}

pub(crate) fn load_vocabulary(
    path: &Path,
    sf: &SpecFile,
    ns: &NsContext<'_>,
    rep: &mut Reporter,
) -> Option<Vocabulary> {
    let summary = required_content(sf, "Summary", path, rep)?;
    let description = required_content(sf, "Description", path, rep)?;
    let metadata = required_single_list(sf, "Metadata", path, rep)?;
    let entries = required_single_list(sf, "Entries", path, rep)?;

    check_metadata_keys(&metadata, VOCABULARY_METADATA, path, rep);
    check_name_agreement(&sf.name, &metadata, path, rep);

    Some(Vocabulary {
        name: sf.name.clone(),
        fqname: format!("/{}/{}", ns.name, sf.name),
        ns: ns.name.to_owned(),
        license: sf.license.clone(),
        summary,
        description,
        iri: format!("{}/{}", ns.iri, sf.name),
        entries: entries.kv,
    })
}

pub(crate) fn load_individual(
    path: &Path,
    sf: &SpecFile,
    ns: &NsContext<'_>,
    rep: &mut Reporter,
) -> Option<Individual> {
    let summary = required_content(sf, "Summary", path, rep)?;
    let description = required_content(sf, "Description", path, rep)?;
    let metadata = required_single_list(sf, "Metadata", path, rep)?;
    let values = required_single_list(sf, "Property Values", path, rep)?;

    check_metadata_keys(&metadata, INDIVIDUAL_METADATA, path, rep);
    check_name_agreement(&sf.name, &metadata, path, rep);

    let Some(type_name) = metadata.kv.get("type").cloned() else {
        rep.error_in(
            ErrorKind::Schema,
            path,
            format!("individual {} has no type metadata", sf.name),
        );
        return None;
    };

    let iri = format!("{}/{}", ns.iri, sf.name);
    let custom_iri = metadata
        .kv
        .get("IRI")
        .filter(|declared| **declared != iri)
        .cloned();

    Some(Individual {
        name: sf.name.clone(),
        fqname: format!("/{}/{}", ns.name, sf.name),
        ns: ns.name.to_owned(),
        license: sf.license.clone(),
        summary,
        description,
        iri,
        type_name,
        custom_iri,
        values: values.kv,
    })
}

pub(crate) fn load_datatype(
    path: &Path,
    sf: &SpecFile,
    ns: &NsContext<'_>,
    rep: &mut Reporter,
) -> Option<Datatype> {
    let summary = required_content(sf, "Summary", path, rep)?;
    let description = required_content(sf, "Description", path, rep)?;
    let metadata = required_single_list(sf, "Metadata", path, rep)?;
    let format = required_single_list(sf, "Format", path, rep)?;

    check_metadata_keys(&metadata, DATATYPE_METADATA, path, rep);
    check_name_agreement(&sf.name, &metadata, path, rep);
    check_metadata_keys_named(&format.kv, FORMAT_KEYS, "Format", path, rep);

    let Some(xsd_base) = metadata.kv.get("SubclassOf").cloned() else {
        rep.error_in(
            ErrorKind::Schema,
            path,
            format!("datatype {} has no SubclassOf metadata", sf.name),
        );
        return None;
    };
    if !xsd_base.starts_with("xsd:") {
        rep.error_in(
            ErrorKind::Schema,
            path,
            format!("datatype {} is not derived from an xsd type: `{xsd_base}`", sf.name),
        );
    }

    Some(Datatype {
        name: sf.name.clone(),
        fqname: format!("/{}/{}", ns.name, sf.name),
        ns: ns.name.to_owned(),
        license: sf.license.clone(),
        summary,
        description,
        iri: format!("{}/{}", ns.iri, sf.name),
        xsd_base,
        format: format.kv,
    })
}

// ============================================================================
// SHARED HELPERS
// ============================================================================

fn required_content(
    sf: &SpecFile,
    title: &str,
    path: &Path,
    rep: &mut Reporter,
) -> Option<String> {
    match sf.sections.get(title) {
        Some(body) => Some(ContentSection::parse(body).content),
        None => {
            rep.error_in(
                ErrorKind::Structural,
                path,
                format!("missing required section `{title}`"),
            );
            None
        }
    }
}

fn required_single_list(
    sf: &SpecFile,
    title: &str,
    path: &Path,
    rep: &mut Reporter,
) -> Option<SingleListSection> {
    match sf.sections.get(title) {
        Some(body) => Some(SingleListSection::parse(body, path, title, rep)),
        None => {
            rep.error_in(
                ErrorKind::Structural,
                path,
                format!("missing required section `{title}`"),
            );
            None
        }
    }
}

fn check_metadata_keys(
    metadata: &SingleListSection,
    allowed: &[&str],
    path: &Path,
    rep: &mut Reporter,
) {
    check_metadata_keys_named(&metadata.kv, allowed, "Metadata", path, rep);
}

fn check_metadata_keys_named(
    kv: &IndexMap<String, String>,
    allowed: &[&str],
    section: &str,
    path: &Path,
    rep: &mut Reporter,
) {
    for key in kv.keys() {
        if !allowed.contains(&key.as_str()) {
            rep.error_in(
                ErrorKind::Schema,
                path,
                format!("unknown {section} key `{key}`"),
            );
        }
    }
}

fn check_name_agreement(
    heading: &str,
    metadata: &SingleListSection,
    path: &Path,
    rep: &mut Reporter,
) {
    match metadata.kv.get("name") {
        None => rep.error_in(ErrorKind::Schema, path, "missing `name` metadata"),
        Some(name) if name != heading => rep.error_in(
            ErrorKind::Schema,
            path,
            format!("name `{heading}` does not match metadata name `{name}`"),
        ),
        Some(_) => {}
    }
}

fn parse_property_decls(
    parsed: NestedListSection,
    ns: &NsContext<'_>,
    path: &Path,
    rep: &mut Reporter,
) -> IndexMap<String, PropertyDecl> {
    let mut decls = IndexMap::new();
    for (token, inner) in parsed.ikv {
        for key in inner.keys() {
            if !CLASS_PROP_KEYS.contains(&key.as_str()) {
                rep.error_in(
                    ErrorKind::Schema,
                    path,
                    format!("unknown key `{key}` under property `{token}`"),
                );
            }
        }
        let Some(type_name) = inner.get("type").cloned() else {
            rep.error_in(
                ErrorKind::Schema,
                path,
                format!("property `{token}` has no type"),
            );
            continue;
        };
        let min_count = parse_min_count(inner.get("minCount"), &token, path, rep);
        let max_count = parse_max_count(inner.get("maxCount"), &token, path, rep);
        let fqname = expand(&token, ns.name);
        decls.insert(
            token,
            PropertyDecl {
                type_name,
                min_count,
                max_count,
                fqname,
            },
        );
    }
    decls
}

fn parse_property_overrides(
    parsed: NestedListSection,
    path: &Path,
    rep: &mut Reporter,
) -> IndexMap<String, PropertyOverride> {
    let mut restrictions = IndexMap::new();
    for (token, inner) in parsed.ikv {
        // Keys must carry the class qualifier: /<Ns>/<Class>/<prop>.
        if !token.starts_with('/') || token.matches('/').count() != 3 {
            rep.error_in(
                ErrorKind::Schema,
                path,
                format!("external property restriction `{token}` is not of the form /Ns/Class/property"),
            );
            continue;
        }
        for key in inner.keys() {
            if !CLASS_PROP_KEYS.contains(&key.as_str()) {
                rep.error_in(
                    ErrorKind::Schema,
                    path,
                    format!("unknown key `{key}` under restriction `{token}`"),
                );
            }
        }
        let min_count = inner
            .contains_key("minCount")
            .then(|| parse_min_count(inner.get("minCount"), &token, path, rep));
        let max_count = inner
            .contains_key("maxCount")
            .then(|| parse_max_count(inner.get("maxCount"), &token, path, rep));
        let over = PropertyOverride {
            type_name: inner.get("type").cloned(),
            min_count,
            max_count,
        };
        restrictions.insert(token, over);
    }
    restrictions
}

fn parse_min_count(value: Option<&String>, token: &str, path: &Path, rep: &mut Reporter) -> u32 {
    match value {
        None => 0,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            rep.error_in(
                ErrorKind::Schema,
                path,
                format!("invalid minCount `{raw}` for `{token}`"),
            );
            0
        }),
    }
}

fn parse_max_count(
    value: Option<&String>,
    token: &str,
    path: &Path,
    rep: &mut Reporter,
) -> MaxCount {
    match value {
        None => MaxCount::Unbounded,
        Some(raw) => MaxCount::parse(raw).unwrap_or_else(|| {
            rep.error_in(
                ErrorKind::Schema,
                path,
                format!("invalid maxCount `{raw}` for `{token}`"),
            );
            MaxCount::Unbounded
        }),
    }
}
