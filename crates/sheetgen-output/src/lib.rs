//! Sheet output generation.
//!
//! This crate turns the products of schema extraction and record assembly
//! into files:
//!
//! - **JSON**: one indented data file per sheet, field and record order kept
//! - **C# sources**: a `[Serializable]` record class and a `ScriptableObject`
//!   container class per sheet, derived from the column schema only

mod common;
mod csharp;
mod error;
mod json;

pub use common::{ensure_parent_dir, file_in_dir, write_text};
pub use csharp::{
    CodegenOptions, GeneratedSources, csharp_type, generate_type_sources, write_type_sources,
};
pub use error::{OutputError, Result};
pub use json::{data_file_path, records_to_json, write_records_json};
