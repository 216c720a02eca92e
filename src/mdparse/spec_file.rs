//! Splitting one spec file into license, name and titled sections.

use std::path::Path;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::report::{ErrorKind, Reporter};

static RE_LICENSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^SPDX-License-Identifier\s*:\s+(.+?)\s*$").unwrap());
static RE_NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#\s+(\w+)\s*$").unwrap());
static RE_SECTION_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^##\s+(.+?)\s*$").unwrap());

/// One spec file split into its outer parts.
///
/// The file text is partitioned at every newline that immediately precedes
/// end-of-input, a `# ` line or a `## ` line. The first part must be the
/// license declaration, the second the `# <Name>` heading; every further
/// non-blank part is a `## <Title>` heading followed by its body.
#[derive(Debug, Clone)]
pub struct SpecFile {
    pub license: String,
    pub name: String,
    /// Section title → trimmed raw body, in file order.
    pub sections: IndexMap<String, String>,
}

impl SpecFile {
    /// Parses `text` (the UTF-8 content of `path`).
    ///
    /// A file without a license line or a name heading cannot identify an
    /// entity: the problem is reported and `None` is returned so the
    /// caller skips the file. Section-level problems (empty bodies,
    /// duplicate titles) are reported but leave the rest of the file
    /// usable.
    pub fn parse(path: &Path, text: &str, rep: &mut Reporter) -> Option<SpecFile> {
        tracing::debug!("loading {}", path.display());

        let parts = split_parts(text);

        let license = match parts.first().and_then(|p| match_license(p)) {
            Some(license) => license,
            None => {
                rep.error_in(
                    ErrorKind::Structural,
                    path,
                    "file does not start with `SPDX-License-Identifier: <value>`",
                );
                return None;
            }
        };

        let name = match parts.get(1).and_then(|p| match_name(p)) {
            Some(name) => name,
            None => {
                rep.error_in(
                    ErrorKind::Structural,
                    path,
                    "file does not have a `# <Name>` heading after the license",
                );
                return None;
            }
        };

        let mut sections = IndexMap::new();
        for part in parts.iter().skip(2) {
            if part.trim().is_empty() {
                continue;
            }
            let Some((title, body)) = match_section(part) else {
                rep.error_in(
                    ErrorKind::Structural,
                    path,
                    format!("possibly empty section at `{}`", part.trim_end()),
                );
                continue;
            };
            if body.is_empty() {
                rep.error_in(
                    ErrorKind::Structural,
                    path,
                    format!("content under heading `{title}` is empty"),
                );
                continue;
            }
            if sections.contains_key(&title) {
                rep.error_in(
                    ErrorKind::Schema,
                    path,
                    format!("section `{title}` appears more than once"),
                );
                continue;
            }
            sections.insert(title, body);
        }

        Some(SpecFile {
            license,
            name,
            sections,
        })
    }
}

/// Partitions the text into parts starting at `# `/`## ` lines.
///
/// Equivalent to splitting at `\n(?=\Z|# |## )`; written as a line scan
/// because the boundary is a lookahead.
fn split_parts(text: &str) -> Vec<String> {
    let mut parts: Vec<String> = vec![String::new()];
    for line in text.split_inclusive('\n') {
        if (line.starts_with("# ") || line.starts_with("## ")) && !parts.last().unwrap().is_empty()
        {
            parts.push(String::new());
        }
        parts.last_mut().unwrap().push_str(line);
    }
    parts
}

fn match_license(part: &str) -> Option<String> {
    RE_LICENSE
        .captures(part.trim())
        .map(|c| c[1].to_owned())
}

fn match_name(part: &str) -> Option<String> {
    RE_NAME.captures(part.trim()).map(|c| c[1].to_owned())
}

/// Splits a part into its `## <Title>` first line and the trimmed body.
fn match_section(part: &str) -> Option<(String, String)> {
    let (first, rest) = part.split_once('\n')?;
    let title = RE_SECTION_TITLE.captures(first)?[1].to_owned();
    Some((title, rest.trim().to_owned()))
}
