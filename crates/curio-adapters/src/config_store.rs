//! YAML configuration document store.
//!
//! # File format
//!
//! ```yaml
//! # Free-text header, kept verbatim across saves
//!
//! version: "1.0"
//! project:
//!   output_directory: .curio
//! collections:
//!   testing: true
//! prompts:
//!   write-tests: false
//! instructions: {}
//! chatmodes: {}
//! ```
//!
//! Reading is lenient: flags may be `"true"`/`"false"` strings or any value
//! coerced by truthiness, and `chat-modes`/`chat_modes` are read as
//! `chatmodes`. Writing is canonical: real booleans, sorted keys, the known
//! top-level keys first. Keys Curio does not know are written back after
//! them, sorted, with their values intact.

use std::collections::BTreeMap;
use std::path::Path;

use curio_core::{
    application::{
        ApplicationError,
        ports::{ConfigStore, Filesystem},
    },
    domain::{
        ConfigDocument, LoadedConfig, ProjectSettings, Section,
        entities::document::{DEFAULT_OUTPUT_DIRECTORY, DEFAULT_VERSION},
    },
    error::{Context as _, CurioResult},
};
use serde::Serialize;
use serde_yaml::{Mapping, Value};
use tracing::{debug, instrument, warn};

const OUTPUT_DIRECTORY_KEY: &str = "output_directory";
const VERSION_KEY: &str = "version";
const PROJECT_KEY: &str = "project";

/// Alternate spellings accepted for a section key on read.
fn read_aliases(section: Section) -> &'static [&'static str] {
    match section {
        Section::ChatModes => &["chat-modes", "chat_modes"],
        _ => &[],
    }
}

/// Header written when a document has none.
pub fn standard_header() -> String {
    [
        "# Curio configuration",
        "# Enable collections to pull in curated sets, or flip single items.",
        "# An explicit true/false on an item always wins over its collections.",
        "#   curio toggle <section> <name> on|off",
        "#   curio apply",
    ]
    .join("\n")
}

/// [`ConfigStore`] reading and writing YAML through a [`Filesystem`].
#[derive(Debug, Clone)]
pub struct YamlConfigStore<F> {
    filesystem: F,
}

impl<F: Filesystem> YamlConfigStore<F> {
    pub fn new(filesystem: F) -> Self {
        Self { filesystem }
    }
}

impl<F: Filesystem> ConfigStore for YamlConfigStore<F> {
    fn exists(&self, path: &Path) -> bool {
        self.filesystem.exists(path)
    }

    #[instrument(skip(self), fields(path = %path.display()))]
    fn load(&self, path: &Path) -> CurioResult<LoadedConfig> {
        let raw = self.filesystem.read_to_string(path)?;
        let (header, body) = split_header_and_body(&raw);

        let document = parse_document(&body).map_err(|reason| ApplicationError::MalformedConfig {
            path: path.to_path_buf(),
            reason,
        })?;
        debug!(has_header = header.is_some(), "Configuration loaded");
        Ok(LoadedConfig::new(document, header))
    }

    #[instrument(skip(self, config), fields(path = %path.display()))]
    fn save(&self, path: &Path, config: &LoadedConfig) -> CurioResult<()> {
        let content = render(config)?;
        self.filesystem.write_file(path, content.as_bytes())
    }
}

// ============================================================================
// Reading
// ============================================================================

/// Split leading blank and `#` lines from the YAML body.
///
/// The header is `None` when those lines hold no text at all.
pub fn split_header_and_body(content: &str) -> (Option<String>, String) {
    let lines: Vec<&str> = content.split('\n').collect();
    let body_start = lines
        .iter()
        .position(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
        .unwrap_or(lines.len());

    let header = lines[..body_start].join("\n");
    let body = lines[body_start..].join("\n");

    let header = if header.trim().is_empty() {
        None
    } else {
        Some(header)
    };
    (header, body)
}

/// Parse and sanitize a YAML body into a document.
pub fn parse_document(body: &str) -> Result<ConfigDocument, String> {
    let value: Value = if body.trim().is_empty() {
        Value::Null
    } else {
        serde_yaml::from_str(body).map_err(|e| e.to_string())?
    };

    let root = match value {
        Value::Mapping(map) => map,
        Value::Null => Mapping::new(),
        other => {
            return Err(format!(
                "expected a mapping at the top level, found {}",
                kind_of(&other)
            ));
        }
    };

    let mut document = ConfigDocument::default();

    if let Some(version) = root.get(VERSION_KEY).and_then(scalar_to_string) {
        if !version.trim().is_empty() {
            document.version = version;
        }
    }

    if let Some(project) = root.get(PROJECT_KEY) {
        document.project = parse_project(project);
    }

    for section in Section::ALL {
        // Aliases first so the canonical key wins on conflicts.
        let mut flags = BTreeMap::new();
        let canonical = [section.key()];
        for key in read_aliases(section).iter().chain(canonical.iter()) {
            match root.get(*key) {
                Some(Value::Mapping(map)) => flags.extend(parse_flags(section, map)),
                Some(Value::Null) | None => {}
                Some(other) => warn!(
                    section = %section,
                    key = *key,
                    found = kind_of(other),
                    "Section is not a mapping; treating as empty"
                ),
            }
        }
        document.set_section(section, flags);
    }

    for (key, value) in root {
        let Some(key) = scalar_to_string(&key) else {
            warn!(found = kind_of(&key), "Dropping non-scalar top-level key");
            continue;
        };
        if is_known_key(&key) {
            continue;
        }
        if let Some(value) = opaque(&key, value) {
            document.extra.insert(key, value);
        }
    }

    Ok(document)
}

fn is_known_key(key: &str) -> bool {
    key == VERSION_KEY
        || key == PROJECT_KEY
        || Section::ALL
            .into_iter()
            .any(|s| s.key() == key || read_aliases(s).contains(&key))
}

/// Convert a value Curio carries without interpreting.
///
/// Values JSON cannot hold (non-string mapping keys, YAML tags) are dropped
/// with a warning.
fn opaque(key: &str, value: Value) -> Option<serde_json::Value> {
    match serde_yaml::from_value(value) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key = %key, error = %e, "Dropping value that cannot be preserved");
            None
        }
    }
}

fn parse_project(value: &Value) -> ProjectSettings {
    let mut project = ProjectSettings::default();
    let Value::Mapping(map) = value else {
        if !value.is_null() {
            warn!(found = kind_of(value), "'project' is not a mapping; using defaults");
        }
        return project;
    };

    for (key, value) in map {
        let Some(key) = scalar_to_string(key) else {
            continue;
        };
        if key == OUTPUT_DIRECTORY_KEY {
            project.output_directory = scalar_to_string(value)
                .filter(|dir| !dir.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_OUTPUT_DIRECTORY.to_string());
        } else if let Some(value) = opaque(&key, value.clone()) {
            project.extra.insert(key, value);
        }
    }
    project
}

fn parse_flags(section: Section, map: &Mapping) -> BTreeMap<String, bool> {
    let mut flags = BTreeMap::new();
    for (key, value) in map {
        match scalar_to_string(key) {
            Some(name) => {
                flags.insert(name, coerce_flag(value));
            }
            None => warn!(section = %section, "Skipping non-scalar key"),
        }
    }
    flags
}

/// Interpret a loosely typed flag value.
///
/// `"true"`/`"false"` strings are read case-insensitively; anything else
/// goes by truthiness.
pub fn coerce_flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => true,
            "false" => false,
            _ => !s.is_empty(),
        },
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::Null => false,
        Value::Sequence(_) | Value::Mapping(_) => true,
        Value::Tagged(tagged) => coerce_flag(&tagged.value),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        _ => None,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

// ============================================================================
// Writing
// ============================================================================

/// Field order here is the top-level key order on disk; `extra` follows.
#[derive(Serialize)]
struct DocumentOut<'a> {
    version: &'a str,
    project: BTreeMap<&'a str, serde_json::Value>,
    collections: &'a BTreeMap<String, bool>,
    prompts: &'a BTreeMap<String, bool>,
    instructions: &'a BTreeMap<String, bool>,
    chatmodes: &'a BTreeMap<String, bool>,
    #[serde(flatten)]
    extra: &'a BTreeMap<String, serde_json::Value>,
}

/// Full file content: header, one blank line, canonical YAML.
pub fn render(config: &LoadedConfig) -> CurioResult<String> {
    let document = &config.document;

    let mut project: BTreeMap<&str, serde_json::Value> = document
        .project
        .extra
        .iter()
        .map(|(k, v)| (k.as_str(), v.clone()))
        .collect();
    project.insert(
        OUTPUT_DIRECTORY_KEY,
        serde_json::Value::String(document.project.output_directory.clone()),
    );

    let version = if document.version.trim().is_empty() {
        DEFAULT_VERSION
    } else {
        &document.version
    };

    let out = DocumentOut {
        version,
        project,
        collections: document.section(Section::Collections),
        prompts: document.section(Section::Prompts),
        instructions: document.section(Section::Instructions),
        chatmodes: document.section(Section::ChatModes),
        extra: &document.extra,
    };
    let yaml = serde_yaml::to_string(&out).context("rendering configuration document")?;

    Ok(format!("{}{}", format_header(config.header.as_deref()), yaml))
}

/// Header text followed by exactly one blank line.
pub fn format_header(header: Option<&str>) -> String {
    let header = match header {
        Some(h) if !h.trim().is_empty() => h.trim_end().to_string(),
        _ => standard_header(),
    };
    format!("{header}\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::MemoryFilesystem;
    use curio_core::error::{CurioError, ErrorCategory};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const PATH: &str = "/work/curio.config.yml";

    fn store_with(content: &str) -> (YamlConfigStore<MemoryFilesystem>, MemoryFilesystem) {
        let fs = MemoryFilesystem::new().with_file(PATH, content);
        (YamlConfigStore::new(fs.clone()), fs)
    }

    #[test]
    fn splits_comment_header_from_body() {
        let (header, body) = split_header_and_body("# Team config\n\n# more\nversion: '1.0'\n");
        assert_eq!(header.as_deref(), Some("# Team config\n\n# more"));
        assert_eq!(body, "version: '1.0'\n");

        let (header, body) = split_header_and_body("\n\nprompts: {}\n");
        assert_eq!(header, None);
        assert_eq!(body, "prompts: {}\n");
    }

    #[test]
    fn coerces_loose_flag_values() {
        let doc = parse_document(
            r#"
prompts:
  a: "TRUE "
  b: "False"
  c: "yes"
  d: ""
  e: 0
  f: 2
  g: ~
  h: [1]
  i: {x: 1}
  j: true
"#,
        )
        .unwrap();

        let flags = doc.section(Section::Prompts);
        let expected: BTreeMap<String, bool> = [
            ("a", true),
            ("b", false),
            ("c", true),
            ("d", false),
            ("e", false),
            ("f", true),
            ("g", false),
            ("h", true),
            ("i", true),
            ("j", true),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        assert_eq!(flags, &expected);
    }

    #[test]
    fn applies_defaults_to_sparse_documents() {
        let doc = parse_document("prompts: [not, a, map]\nversion: ''\n").unwrap();
        assert_eq!(doc.version, DEFAULT_VERSION);
        assert_eq!(doc.project.output_directory, DEFAULT_OUTPUT_DIRECTORY);
        assert!(doc.section(Section::Prompts).is_empty());
        assert!(doc.section(Section::ChatModes).is_empty());
    }

    #[test]
    fn numeric_version_and_extra_project_keys_survive() {
        let doc = parse_document(
            "version: 2\nproject:\n  name: demo\n  output_directory: out\n  nested: {a: 1}\n",
        )
        .unwrap();
        assert_eq!(doc.version, "2");
        assert_eq!(doc.project.output_directory, "out");
        assert_eq!(doc.project.extra.get("name"), Some(&json!("demo")));
        assert_eq!(doc.project.extra.get("nested"), Some(&json!({ "a": 1 })));
    }

    #[test]
    fn unknown_keys_and_typed_project_values_survive_save() {
        let original = "# team\n\n\
            metadata:\n  owner: team\n\
            project:\n  tags: [b, a]\n  sync_on_save: true\n  output_directory: out\n  name: demo\n\
            prompts:\n  p: true\n";
        let (store, fs) = store_with(original);

        let loaded = store.load(Path::new(PATH)).unwrap();
        store.save(Path::new(PATH), &loaded).unwrap();

        assert_eq!(
            fs.read_file(Path::new(PATH)).unwrap(),
            "# team\n\n\
             version: '1.0'\n\
             project:\n  name: demo\n  output_directory: out\n  sync_on_save: true\n  tags:\n  - b\n  - a\n\
             collections: {}\n\
             prompts:\n  p: true\n\
             instructions: {}\n\
             chatmodes: {}\n\
             metadata:\n  owner: team\n"
        );
        assert_eq!(store.load(Path::new(PATH)).unwrap(), loaded);
    }

    #[test]
    fn chat_modes_spellings_are_read_into_chatmodes() {
        let doc = parse_document(
            "chat-modes:\n  planner: true\n  coder: true\nchatmodes:\n  coder: false\nchat_modes:\n  tutor: 'true'\n",
        )
        .unwrap();
        let flags = doc.section(Section::ChatModes);
        assert_eq!(flags.get("planner"), Some(&true));
        assert_eq!(flags.get("tutor"), Some(&true));
        assert_eq!(flags.get("coder"), Some(&false));
        assert!(doc.extra.is_empty());

        let rendered = render(&LoadedConfig::new(doc, None)).unwrap();
        assert!(rendered.contains("chatmodes:\n  coder: false\n  planner: true\n  tutor: true\n"));
        assert!(!rendered.contains("chat-modes"));
    }

    #[test]
    fn rejects_non_mapping_root() {
        assert!(parse_document("- just\n- a list\n").is_err());
        assert!(parse_document("key: [unclosed").is_err());
    }

    #[test]
    fn save_writes_canonical_sorted_document() {
        let mut doc = ConfigDocument::default();
        doc.set_flag(Section::Prompts, "zeta", true);
        doc.set_flag(Section::Prompts, "alpha", false);
        doc.set_flag(Section::Collections, "web", true);
        doc.project.extra.insert("name".into(), "demo".into());

        let rendered = render(&LoadedConfig::new(doc, Some("# mine\n\n\n".into()))).unwrap();
        assert_eq!(
            rendered,
            "# mine\n\n\
             version: '1.0'\n\
             project:\n  name: demo\n  output_directory: .curio\n\
             collections:\n  web: true\n\
             prompts:\n  alpha: false\n  zeta: true\n\
             instructions: {}\n\
             chatmodes: {}\n"
        );
    }

    #[test]
    fn missing_header_gets_standard_one() {
        let rendered = render(&LoadedConfig::default()).unwrap();
        assert!(rendered.starts_with(&format!("{}\n\n", standard_header())));
    }

    #[test]
    fn round_trip_preserves_header_and_flags() {
        let original = "# Keep me\n# twice\n\nprompts:\n  b: 'true'\n  a: false\ncollections:\n  web: yes\n";
        let (store, fs) = store_with(original);

        let loaded = store.load(Path::new(PATH)).unwrap();
        store.save(Path::new(PATH), &loaded).unwrap();

        let written = fs.read_file(Path::new(PATH)).unwrap();
        assert!(written.starts_with("# Keep me\n# twice\n\nversion:"));

        let reloaded = store.load(Path::new(PATH)).unwrap();
        assert_eq!(reloaded, loaded);
        assert_eq!(reloaded.document.flag(Section::Prompts, "b"), Some(true));
        assert_eq!(
            reloaded.document.flag(Section::Collections, "web"),
            Some(true)
        );

        store.save(Path::new(PATH), &reloaded).unwrap();
        assert_eq!(fs.read_file(Path::new(PATH)).unwrap(), written);
    }

    #[test]
    fn malformed_file_maps_to_configuration_error() {
        let (store, _) = store_with("# header\n: : :\n  - [");
        let err = store.load(Path::new(PATH)).unwrap_err();
        assert!(matches!(
            err,
            CurioError::Application(ApplicationError::MalformedConfig { .. })
        ));
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }
}
