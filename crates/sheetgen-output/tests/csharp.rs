//! Integration tests for generated C# type sources.

use sheetgen_ingest::{assemble_records, extract_schema};
use sheetgen_model::ColumnSchema;
use sheetgen_output::{CodegenOptions, OutputError, generate_type_sources, write_type_sources};

fn rows(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
}

fn item_columns() -> Vec<ColumnSchema> {
    let sheet = rows(&[
        &["Item id", "", "Unused", "Tag ids\nseparated by commas"],
        &["int", "string", "float", "int[]"],
        &["id", "name", "", "tags"],
    ]);
    extract_schema(&sheet).expect("schema").columns
}

#[test]
fn test_record_type_source() {
    let sources = generate_type_sources("Item", &item_columns(), &CodegenOptions::default());
    assert_eq!(sources.record_type_name, "Item");
    insta::assert_snapshot!(sources.record_type, @r#"
    // <auto-generated>
    //     Generated by sheetgen from sheet "Item". Do not edit by hand.
    // </auto-generated>
    using System;
    using System.Collections.Generic;

    [Serializable]
    public class Item
    {
        public int id; // Item id
        public string name;
        public int[] tags; // Tag ids separated by commas
    }
    "#);
}

#[test]
fn test_container_type_with_lookup() {
    let sources = generate_type_sources("Item", &item_columns(), &CodegenOptions::default());
    assert_eq!(sources.container_type_name, "ItemSO");
    insta::assert_snapshot!(sources.container_type, @r#"
    // <auto-generated>
    //     Generated by sheetgen from sheet "Item". Do not edit by hand.
    // </auto-generated>
    using System.Collections.Generic;
    using UnityEngine;

    [CreateAssetMenu(fileName = "ItemSO", menuName = "Data/ItemSO")]
    public class ItemSO : ScriptableObject
    {
        public List<Item> items = new();

        private Dictionary<int, Item> dataDict;

        public void Initialize()
        {
            dataDict = new Dictionary<int, Item>();
            foreach (var item in items)
            {
                dataDict[item.id] = item;
            }
        }

        public Item Get(int id)
        {
            if (dataDict == null || dataDict.Count == 0)
            {
                Initialize();
            }
            return dataDict.GetValueOrDefault(id);
        }
    }
    "#);
}

#[test]
fn test_container_without_lookup_for_float_key() {
    let sheet = rows(&[
        &["", ""],
        &["float", "List<string>"],
        &["weight", "labels"],
    ]);
    let columns = extract_schema(&sheet).expect("schema").columns;
    let sources = generate_type_sources("Loot", &columns, &CodegenOptions::default());
    assert!(sources.record_type.contains("public List<string> labels;"));
    assert!(!sources.container_type.contains("Dictionary"));
    assert!(sources.container_type.contains("public List<Loot> items = new();"));
}

#[test]
fn test_namespace_and_options() {
    let options = CodegenOptions {
        namespace: Some("Game.Data".to_string()),
        container_suffix: "Table".to_string(),
        menu_root: "Tables".to_string(),
    };
    let sheet = rows(&[&["Name"], &["string"], &["name"]]);
    let columns = extract_schema(&sheet).expect("schema").columns;
    let sources = generate_type_sources("Npc", &columns, &options);

    assert_eq!(sources.container_type_name, "NpcTable");
    insta::assert_snapshot!(sources.record_type, @r#"
    // <auto-generated>
    //     Generated by sheetgen from sheet "Npc". Do not edit by hand.
    // </auto-generated>
    using System;
    using System.Collections.Generic;

    namespace Game.Data
    {
        [Serializable]
        public class Npc
        {
            public string name; // Name
        }
    }
    "#);
    assert!(
        sources
            .container_type
            .contains("[CreateAssetMenu(fileName = \"NpcTable\", menuName = \"Tables/NpcTable\")]")
    );
    assert!(sources.container_type.contains("        public Npc Get(string name)"));
}

#[test]
fn test_unknown_type_token_generates_string_field() {
    let sheet = rows(&[&["Level"], &["Vector3"], &["spawn"]]);
    let columns = extract_schema(&sheet).expect("schema").columns;
    let sources = generate_type_sources("Spawn", &columns, &CodegenOptions::default());
    assert!(sources.record_type.contains("public string spawn; // Level"));
}

#[test]
fn test_generation_ignores_data_rows() {
    let header_only = rows(&[
        &["Item id", "Name"],
        &["int", "string"],
        &["id", "name"],
    ]);
    let with_data = rows(&[
        &["Item id", "Name"],
        &["int", "string"],
        &["id", "name"],
        &["1", "Sword"],
        &["not a number", "Shield"],
    ]);
    let options = CodegenOptions::default();
    let header_only = extract_schema(&header_only).expect("schema").columns;
    let with_data = extract_schema(&with_data).expect("schema").columns;
    let a = generate_type_sources("Item", &header_only, &options);
    let b = generate_type_sources("Item", &with_data, &options);
    assert_eq!(a, b);
}

#[test]
fn test_no_keyed_columns() {
    let sheet = rows(&[&["Notes"], &["string"], &[""]]);
    let columns = extract_schema(&sheet).expect("schema").columns;
    let sources = generate_type_sources("Empty", &columns, &CodegenOptions::default());
    assert!(sources.record_type.contains("public class Empty\n{\n}\n"));
    assert!(!sources.container_type.contains("Dictionary"));
}

#[test]
fn test_write_type_sources() {
    let dir = tempfile::tempdir().expect("tempdir");
    let code_dir = dir.path().join("Scripts").join("Generated");
    let sources = generate_type_sources("Item", &item_columns(), &CodegenOptions::default());

    let (record_path, container_path) =
        write_type_sources(&code_dir, &sources).expect("write sources");

    assert_eq!(record_path, code_dir.join("Item.cs"));
    assert_eq!(container_path, code_dir.join("ItemSO.cs"));
    assert_eq!(
        std::fs::read_to_string(&record_path).expect("read record"),
        sources.record_type
    );
    assert_eq!(
        std::fs::read_to_string(&container_path).expect("read container"),
        sources.container_type
    );
}

#[test]
fn test_repeated_key_yields_one_field() {
    let sheet = rows(&[
        &["a", "b"],
        &["int", "string"],
        &["id", "id"],
        &["7", "seven"],
    ]);
    let schema = extract_schema(&sheet).expect("schema");
    let sources = generate_type_sources("Dup", &schema.columns, &CodegenOptions::default());

    assert_eq!(sources.record_type.matches(" id;").count(), 1);
    assert!(sources.record_type.contains("public string id; // b"));
    assert!(sources.container_type.contains("private Dictionary<string, Dup> dataDict;"));
    assert!(sources.container_type.contains("public Dup Get(string id)"));

    let records = assemble_records(&sheet, &schema).expect("records");
    let keys: Vec<&str> = records[0].keys().collect();
    assert_eq!(keys, ["id"]);
    assert_eq!(
        serde_json::to_value(&records[0]).expect("value"),
        serde_json::json!({ "id": "seven" })
    );
}

#[test]
fn test_repeated_key_keeps_first_position() {
    let sheet = rows(&[
        &["", "", ""],
        &["string", "int", "float"],
        &["name", "id", "name"],
    ]);
    let columns = extract_schema(&sheet).expect("schema").columns;
    let sources = generate_type_sources("Pos", &columns, &CodegenOptions::default());
    let name = sources.record_type.find("public float name;").expect("name field");
    let id = sources.record_type.find("public int id;").expect("id field");
    assert!(name < id);
    assert!(!sources.record_type.contains("public string name;"));
    assert!(!sources.container_type.contains("Dictionary"));
}

#[test]
fn test_path_like_sheet_name_is_not_written() {
    let dir = tempfile::tempdir().expect("tempdir");
    let code_dir = dir.path().join("code");
    let sources = generate_type_sources("../Escape", &item_columns(), &CodegenOptions::default());

    let error = write_type_sources(&code_dir, &sources).expect_err("invalid name");
    assert!(matches!(error, OutputError::InvalidFileName { ref name } if name == "../Escape"));
    assert!(!dir.path().join("Escape.cs").exists());
    assert!(!code_dir.exists());
}
