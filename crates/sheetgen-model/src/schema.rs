use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of metadata rows at the top of every worksheet
/// (description, type, key).
pub const HEADER_ROWS: usize = 3;

/// Value kind a column declares in its type row.
///
/// `List<int>` and `int[]` both resolve to [`TypeTag::IntList`]; the spelling
/// is kept separately as [`ListSyntax`] for code generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeTag {
    Int,
    Float,
    String,
    Bool,
    IntList,
    FloatList,
    StringList,
}

/// How a list column was spelled in the sheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListSyntax {
    /// `List<T>`
    #[default]
    Generic,
    /// `T[]`
    Array,
}

impl TypeTag {
    /// Resolve a type-row token. Matching is case-sensitive.
    ///
    /// Returns `None` for tokens outside the vocabulary; callers fall back to
    /// [`TypeTag::String`].
    pub fn from_token(token: &str) -> Option<(TypeTag, ListSyntax)> {
        let resolved = match token {
            "int" => (TypeTag::Int, ListSyntax::Generic),
            "float" => (TypeTag::Float, ListSyntax::Generic),
            "string" => (TypeTag::String, ListSyntax::Generic),
            "bool" => (TypeTag::Bool, ListSyntax::Generic),
            "List<int>" => (TypeTag::IntList, ListSyntax::Generic),
            "int[]" => (TypeTag::IntList, ListSyntax::Array),
            "List<float>" => (TypeTag::FloatList, ListSyntax::Generic),
            "float[]" => (TypeTag::FloatList, ListSyntax::Array),
            "List<string>" => (TypeTag::StringList, ListSyntax::Generic),
            "string[]" => (TypeTag::StringList, ListSyntax::Array),
            _ => return None,
        };
        Some(resolved)
    }

    /// Element kind for list tags, `None` for scalars.
    pub fn element(&self) -> Option<TypeTag> {
        match self {
            TypeTag::IntList => Some(TypeTag::Int),
            TypeTag::FloatList => Some(TypeTag::Float),
            TypeTag::StringList => Some(TypeTag::String),
            TypeTag::Int | TypeTag::Float | TypeTag::String | TypeTag::Bool => None,
        }
    }

    pub fn is_list(&self) -> bool {
        self.element().is_some()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TypeTag::Int => "int",
            TypeTag::Float => "float",
            TypeTag::String => "string",
            TypeTag::Bool => "bool",
            TypeTag::IntList => "List<int>",
            TypeTag::FloatList => "List<float>",
            TypeTag::StringList => "List<string>",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TypeTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TypeTag::from_token(s)
            .map(|(tag, _)| tag)
            .ok_or_else(|| format!("Unknown type token: {}", s))
    }
}

/// One column of a worksheet, assembled from the three header rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    /// Zero-based position of the column in every row of the sheet.
    pub index: usize,
    /// Field identifier. Empty means the column is ignored.
    pub key: String,
    pub type_tag: TypeTag,
    #[serde(default)]
    pub list_syntax: ListSyntax,
    /// Free text from the description row, never interpreted.
    pub description: String,
    /// The type token exactly as written in the sheet.
    pub raw_type: String,
}

impl ColumnSchema {
    pub fn is_keyed(&self) -> bool {
        !self.key.is_empty()
    }

    /// True when the declared type token was outside the vocabulary and the
    /// column fell back to `string`.
    pub fn is_fallback_type(&self) -> bool {
        TypeTag::from_token(&self.raw_type).is_none()
    }
}

/// Ordered column schema of one worksheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetSchema {
    pub columns: Vec<ColumnSchema>,
    /// Index of the first data row.
    pub data_start: usize,
}

impl SheetSchema {
    /// Columns that produce record fields and generated members, in order.
    pub fn keyed_columns(&self) -> impl Iterator<Item = &ColumnSchema> {
        self.columns.iter().filter(|column| column.is_keyed())
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }
}
