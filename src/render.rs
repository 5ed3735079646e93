//! # Renderer
//!
//! Serializes a [`ManifestSet`] into one multi-document YAML bundle and
//! writes it to disk.
//!
//! `serde_yaml` only quotes strings that would otherwise be read back as
//! another type, so a port stored as `"3000"` in a ConfigMap and a version
//! such as `1.10` could come out plain. The emitter here walks the
//! `serde_yaml::Value` tree instead and double-quotes every string scalar:
//!
//! ```yaml
//! apiVersion: "v1"
//! kind: "ConfigMap"
//! data:
//!   PORT: "3000"
//! ```
//!
//! Mapping keys stay plain unless they could be mistaken for another scalar
//! type. Key order is the order of the serialized object, so identical inputs
//! always produce byte-identical output.

use crate::constants::{BUNDLE_FILE_NAME, DOCUMENT_SEPARATOR};
use crate::error::GeneratorError;
use crate::manifest::ManifestSet;
use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const INDENT: usize = 2;

/// Render every object of the set, joined by the document separator
pub fn render_bundle(manifests: &ManifestSet) -> Result<String, GeneratorError> {
    let documents = manifests
        .documents()?
        .iter()
        .map(render_document)
        .collect::<Vec<_>>();
    Ok(documents.join(DOCUMENT_SEPARATOR))
}

/// Render one YAML document, terminated by a newline
pub fn render_document(value: &Value) -> String {
    let mut out = String::new();
    match value {
        Value::Mapping(map) if !map.is_empty() => write_mapping(&mut out, map, 0, false),
        Value::Sequence(seq) if !seq.is_empty() => write_sequence(&mut out, seq, 0),
        other => {
            out.push_str(&scalar(other));
            out.push('\n');
        }
    }
    out
}

/// Create `dir` if needed and write the bundle into it
pub fn write_bundle(dir: &Path, contents: &str) -> Result<PathBuf, GeneratorError> {
    if !dir.is_dir() {
        std::fs::create_dir_all(dir).map_err(|source| GeneratorError::WriteFailure {
            path: dir.to_path_buf(),
            source,
        })?;
        debug!("Created directory {}", dir.display());
    }

    let path = dir.join(BUNDLE_FILE_NAME);
    std::fs::write(&path, contents).map_err(|source| GeneratorError::WriteFailure {
        path: path.clone(),
        source,
    })?;
    info!(
        bytes = contents.len(),
        "Wrote manifest bundle to {}",
        path.display()
    );

    Ok(path)
}

/// `first_inline` continues the current line, as after a `- ` marker
fn write_mapping(out: &mut String, map: &Mapping, indent: usize, first_inline: bool) {
    for (i, (key, value)) in map.iter().enumerate() {
        if i > 0 || !first_inline {
            push_indent(out, indent);
        }
        out.push_str(&key_text(key));
        out.push(':');
        write_nested(out, value, indent);
    }
}

fn write_sequence(out: &mut String, seq: &[Value], indent: usize) {
    for item in seq {
        push_indent(out, indent);
        out.push('-');
        match untagged(item) {
            Value::Mapping(map) if !map.is_empty() => {
                out.push(' ');
                write_mapping(out, map, indent + INDENT, true);
            }
            Value::Sequence(inner) if !inner.is_empty() => {
                out.push('\n');
                write_sequence(out, inner, indent + INDENT);
            }
            other => {
                out.push(' ');
                out.push_str(&scalar(other));
                out.push('\n');
            }
        }
    }
}

fn untagged(value: &Value) -> &Value {
    match value {
        Value::Tagged(tagged) => untagged(&tagged.value),
        other => other,
    }
}

/// Value that follows `key:`
fn write_nested(out: &mut String, value: &Value, indent: usize) {
    match value {
        Value::Mapping(map) if !map.is_empty() => {
            out.push('\n');
            write_mapping(out, map, indent + INDENT, false);
        }
        Value::Sequence(seq) if !seq.is_empty() => {
            out.push('\n');
            write_sequence(out, seq, indent + INDENT);
        }
        Value::Tagged(tagged) => write_nested(out, &tagged.value, indent),
        other => {
            out.push(' ');
            out.push_str(&scalar(other));
            out.push('\n');
        }
    }
}

fn push_indent(out: &mut String, indent: usize) {
    out.extend(std::iter::repeat(' ').take(indent));
}

/// Scalars and empty collections in flow form
fn scalar(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote(s),
        Value::Sequence(_) => "[]".to_string(),
        Value::Mapping(_) => "{}".to_string(),
        Value::Tagged(tagged) => scalar(&tagged.value),
    }
}

fn key_text(key: &Value) -> String {
    match key {
        Value::String(s) if is_plain_key(s) => s.clone(),
        other => scalar(other),
    }
}

/// Keys like `app.kubernetes.io/name` or `DATABASE_URL` need no quotes
fn is_plain_key(key: &str) -> bool {
    const RESERVED: [&str; 11] = [
        "true", "false", "null", "yes", "no", "on", "off", "y", "n", "~", "<<",
    ];

    let mut chars = key.chars();
    let starts_well = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    starts_well
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '/'))
        && !RESERVED.contains(&key.to_ascii_lowercase().as_str())
}

/// Double-quoted YAML scalar
fn quote(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c if c.is_control() => quoted.push_str(&format!("\\u{:04x}", u32::from(c))),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn yaml(text: &str) -> Value {
        serde_yaml::from_str(text).unwrap()
    }

    mod render_document_tests {
        use super::*;

        #[test]
        fn test_strings_are_double_quoted() {
            let doc = yaml("apiVersion: v1\nkind: ConfigMap\ndata:\n  PORT: '3000'\n");

            assert_eq!(
                render_document(&doc),
                "apiVersion: \"v1\"\nkind: \"ConfigMap\"\ndata:\n  PORT: \"3000\"\n"
            );
        }

        #[test]
        fn test_numbers_stay_plain() {
            let doc = yaml("spec:\n  replicas: 2\n  maxReplicas: 5\n");
            assert_eq!(
                render_document(&doc),
                "spec:\n  replicas: 2\n  maxReplicas: 5\n"
            );
        }

        #[test]
        fn test_sequence_of_mappings() {
            let doc = yaml("ports:\n  - port: 8080\n    targetPort: 3000\n    protocol: TCP\n");
            assert_eq!(
                render_document(&doc),
                "ports:\n  - port: 8080\n    targetPort: 3000\n    protocol: \"TCP\"\n"
            );
        }

        #[test]
        fn test_nested_mapping_in_sequence() {
            let doc = yaml("envFrom:\n  - configMapRef:\n      name: api-config\n");
            assert_eq!(
                render_document(&doc),
                "envFrom:\n  - configMapRef:\n      name: \"api-config\"\n"
            );
        }

        #[test]
        fn test_tagged_mapping_in_sequence() {
            let doc = yaml("items:\n  - !Custom\n    name: api\n    port: 80\n");
            assert_eq!(
                render_document(&doc),
                "items:\n  - name: \"api\"\n    port: 80\n"
            );
        }

        #[test]
        fn test_empty_collections() {
            let doc = yaml("labels: {}\nports: []\n");
            assert_eq!(render_document(&doc), "labels: {}\nports: []\n");
        }

        #[test]
        fn test_label_keys_stay_plain() {
            let doc = yaml("labels:\n  app.kubernetes.io/instance: ''\n");
            assert_eq!(
                render_document(&doc),
                "labels:\n  app.kubernetes.io/instance: \"\"\n"
            );
        }

        #[test]
        fn test_ambiguous_keys_are_quoted() {
            let doc = yaml("data:\n  'yes': a\n  '8080': b\n  'with space': c\n");
            assert_eq!(
                render_document(&doc),
                "data:\n  \"yes\": \"a\"\n  \"8080\": \"b\"\n  \"with space\": \"c\"\n"
            );
        }

        #[test]
        fn test_rendered_output_reads_back_unchanged() {
            let doc = yaml(
                "data:\n  MESSAGE: \"line one\\nline \\\"two\\\"\"\n  PATH_LIKE: 'C:\\tmp'\n  EMPTY: ''\n",
            );
            let rendered = render_document(&doc);
            assert_eq!(yaml(&rendered), doc);
        }
    }

    mod quote_tests {
        use super::*;

        #[test]
        fn test_quote_escapes() {
            assert_eq!(quote("a\"b"), "\"a\\\"b\"");
            assert_eq!(quote("a\\b"), "\"a\\\\b\"");
            assert_eq!(quote("a\nb\tc"), "\"a\\nb\\tc\"");
            assert_eq!(quote("\u{1b}"), "\"\\u001b\"");
        }

        #[test]
        fn test_is_plain_key() {
            assert!(is_plain_key("app.kubernetes.io/name"));
            assert!(is_plain_key("DATABASE_URL"));
            assert!(!is_plain_key(""));
            assert!(!is_plain_key("-leading"));
            assert!(!is_plain_key("No"));
            assert!(!is_plain_key("key: value"));
        }
    }

    mod write_bundle_tests {
        use super::*;

        #[test]
        fn test_write_bundle_creates_missing_directories() {
            let dir = TempDir::new().unwrap();
            let target = dir.path().join("deploy").join("k8s");

            let path = write_bundle(&target, "kind: \"Service\"\n").unwrap();

            assert_eq!(path, target.join("all-in-one.yaml"));
            assert_eq!(
                std::fs::read_to_string(&path).unwrap(),
                "kind: \"Service\"\n"
            );
        }

        #[test]
        fn test_write_bundle_overwrites() {
            let dir = TempDir::new().unwrap();
            write_bundle(dir.path(), "old contents that are longer\n").unwrap();
            let path = write_bundle(dir.path(), "new\n").unwrap();

            assert_eq!(std::fs::read_to_string(path).unwrap(), "new\n");
        }

        #[test]
        fn test_write_bundle_failure_is_reported() {
            let dir = TempDir::new().unwrap();
            let blocker = dir.path().join("not-a-dir");
            std::fs::write(&blocker, "file in the way").unwrap();

            let err = write_bundle(&blocker, "kind: \"Service\"\n").unwrap_err();
            assert!(matches!(err, GeneratorError::WriteFailure { .. }));
        }
    }
}
