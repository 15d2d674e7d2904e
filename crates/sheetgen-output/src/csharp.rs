//! C# type source generation for Unity.
//!
//! Each sheet yields two compilation units: a plain `[Serializable]` record
//! class with one public field per keyed column, and a `ScriptableObject`
//! container holding a list of those records. Both are derived from the
//! column schema alone, so a sheet without data rows still generates.

use std::path::{Path, PathBuf};

use tracing::debug;

use sheetgen_model::{ColumnSchema, ListSyntax, TypeTag};

use crate::common::{file_in_dir, write_text};
use crate::error::Result;

const INDENT: &str = "    ";

/// Options for C# generation.
#[derive(Debug, Clone)]
pub struct CodegenOptions {
    /// Wrap both types in this namespace.
    pub namespace: Option<String>,
    /// Appended to the sheet name to name the container type.
    pub container_suffix: String,
    /// Root of the `CreateAssetMenu` menu path.
    pub menu_root: String,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            namespace: None,
            container_suffix: "SO".to_string(),
            menu_root: "Data".to_string(),
        }
    }
}

/// Generated sources for one sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSources {
    pub record_type_name: String,
    pub container_type_name: String,
    pub record_type: String,
    pub container_type: String,
}

/// C# spelling of a column type.
pub fn csharp_type(type_tag: TypeTag, list_syntax: ListSyntax) -> String {
    match type_tag.element() {
        Some(element) => match list_syntax {
            ListSyntax::Generic => format!("List<{}>", scalar_type(element)),
            ListSyntax::Array => format!("{}[]", scalar_type(element)),
        },
        None => scalar_type(type_tag).to_string(),
    }
}

fn scalar_type(type_tag: TypeTag) -> &'static str {
    match type_tag {
        TypeTag::Int => "int",
        TypeTag::Float => "float",
        TypeTag::Bool => "bool",
        _ => "string",
    }
}

/// Characters that end a line in C# source.
const LINE_BREAKS: [char; 5] = ['\n', '\r', '\u{85}', '\u{2028}', '\u{2029}'];

/// Collapse a multi-line description into a single comment line.
fn comment_text(description: &str) -> String {
    description
        .split(LINE_BREAKS)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Line-oriented source buffer with brace-driven indentation.
struct CodeWriter {
    out: String,
    depth: usize,
}

impl CodeWriter {
    fn new() -> Self {
        Self {
            out: String::new(),
            depth: 0,
        }
    }

    fn line(&mut self, text: &str) {
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.out.push_str(INDENT);
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.line("");
    }

    fn open(&mut self) {
        self.line("{");
        self.depth += 1;
    }

    fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.line("}");
    }

    fn header(&mut self, sheet_name: &str, usings: &[&str]) {
        self.line("// <auto-generated>");
        self.line(&format!(
            "//     Generated by sheetgen from sheet \"{}\". Do not edit by hand.",
            comment_text(sheet_name)
        ));
        self.line("// </auto-generated>");
        for using in usings {
            self.line(&format!("using {using};"));
        }
        self.blank();
    }

    fn begin_namespace(&mut self, namespace: Option<&str>) {
        if let Some(namespace) = namespace {
            self.line(&format!("namespace {namespace}"));
            self.open();
        }
    }

    fn end_namespace(&mut self, namespace: Option<&str>) {
        if namespace.is_some() {
            self.close();
        }
    }

    fn finish(self) -> String {
        self.out
    }
}

/// Generate the record and container type sources for one sheet.
///
/// Only keyed columns become fields. A key used by several columns yields one
/// field at its first position, typed and described by its last column, the
/// same way records resolve it. Output depends on nothing but the sheet name,
/// the columns, and the options.
pub fn generate_type_sources(
    sheet_name: &str,
    columns: &[ColumnSchema],
    options: &CodegenOptions,
) -> GeneratedSources {
    let keyed = field_columns(columns);
    let record_type_name = sheet_name.to_string();
    let container_type_name = format!("{sheet_name}{}", options.container_suffix);
    let namespace = options.namespace.as_deref().filter(|ns| !ns.is_empty());

    let record_type = render_record_type(sheet_name, &record_type_name, &keyed, namespace);
    let container_type = render_container_type(
        sheet_name,
        &record_type_name,
        &container_type_name,
        lookup_column(&keyed),
        namespace,
        &options.menu_root,
    );

    GeneratedSources {
        record_type_name,
        container_type_name,
        record_type,
        container_type,
    }
}

/// Keyed columns with repeated keys collapsed.
fn field_columns(columns: &[ColumnSchema]) -> Vec<&ColumnSchema> {
    let mut fields: Vec<&ColumnSchema> = Vec::new();
    for column in columns.iter().filter(|c| c.is_keyed()) {
        match fields.iter().position(|field| field.key == column.key) {
            Some(position) => fields[position] = column,
            None => fields.push(column),
        }
    }
    fields
}

/// The first keyed column keys the container lookup when it is an `int` or
/// `string` column.
fn lookup_column<'a>(keyed: &[&'a ColumnSchema]) -> Option<&'a ColumnSchema> {
    keyed
        .first()
        .copied()
        .filter(|column| matches!(column.type_tag, TypeTag::Int | TypeTag::String))
}

fn render_record_type(
    sheet_name: &str,
    type_name: &str,
    keyed: &[&ColumnSchema],
    namespace: Option<&str>,
) -> String {
    let mut w = CodeWriter::new();
    w.header(sheet_name, &["System", "System.Collections.Generic"]);
    w.begin_namespace(namespace);
    w.line("[Serializable]");
    w.line(&format!("public class {type_name}"));
    w.open();
    for column in keyed {
        let ty = csharp_type(column.type_tag, column.list_syntax);
        let comment = comment_text(&column.description);
        if comment.is_empty() {
            w.line(&format!("public {ty} {};", column.key));
        } else {
            w.line(&format!("public {ty} {}; // {comment}", column.key));
        }
    }
    w.close();
    w.end_namespace(namespace);
    w.finish()
}

fn render_container_type(
    sheet_name: &str,
    record_type_name: &str,
    type_name: &str,
    lookup: Option<&ColumnSchema>,
    namespace: Option<&str>,
    menu_root: &str,
) -> String {
    let mut w = CodeWriter::new();
    w.header(sheet_name, &["System.Collections.Generic", "UnityEngine"]);
    w.begin_namespace(namespace);
    w.line(&format!(
        "[CreateAssetMenu(fileName = \"{type_name}\", menuName = \"{menu_root}/{type_name}\")]"
    ));
    w.line(&format!("public class {type_name} : ScriptableObject"));
    w.open();
    w.line(&format!("public List<{record_type_name}> items = new();"));

    if let Some(column) = lookup {
        let key_type = scalar_type(column.type_tag);
        let key = &column.key;
        w.blank();
        w.line(&format!(
            "private Dictionary<{key_type}, {record_type_name}> dataDict;"
        ));
        w.blank();
        w.line("public void Initialize()");
        w.open();
        w.line(&format!(
            "dataDict = new Dictionary<{key_type}, {record_type_name}>();"
        ));
        w.line("foreach (var item in items)");
        w.open();
        w.line(&format!("dataDict[item.{key}] = item;"));
        w.close();
        w.close();
        w.blank();
        w.line(&format!("public {record_type_name} Get({key_type} {key})"));
        w.open();
        w.line("if (dataDict == null || dataDict.Count == 0)");
        w.open();
        w.line("Initialize();");
        w.close();
        w.line(&format!("return dataDict.GetValueOrDefault({key});"));
        w.close();
    }

    w.close();
    w.end_namespace(namespace);
    w.finish()
}

/// Write both generated sources as `<dir>/<TypeName>.cs`.
///
/// Returns `(record_type_path, container_type_path)`.
pub fn write_type_sources(dir: &Path, sources: &GeneratedSources) -> Result<(PathBuf, PathBuf)> {
    let record_path = file_in_dir(dir, &sources.record_type_name, "cs")?;
    let container_path = file_in_dir(dir, &sources.container_type_name, "cs")?;
    write_text(&record_path, &sources.record_type)?;
    write_text(&container_path, &sources.container_type)?;
    debug!(
        record_type = %record_path.display(),
        container_type = %container_path.display(),
        "wrote type sources"
    );
    Ok((record_path, container_path))
}
