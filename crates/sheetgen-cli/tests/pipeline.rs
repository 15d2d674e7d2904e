//! Integration tests for the sync pipeline.

use std::path::Path;

use sheetgen_cli::config::OutputConfig;
use sheetgen_cli::pipeline::{RunError, process_sheet, run_sync};
use sheetgen_ingest::{CsvDirectorySource, Result as SourceResult, SourceError, WorksheetSource};
use sheetgen_model::{FailureKind, Worksheet};

/// How the in-memory source fails, if at all.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Listing {
    Ok,
    Unauthorized,
    Unavailable,
}

struct MemorySource {
    sheets: Vec<Worksheet>,
    listing: Listing,
    unreadable: Vec<&'static str>,
}

impl MemorySource {
    fn new(sheets: Vec<Worksheet>) -> Self {
        Self {
            sheets,
            listing: Listing::Ok,
            unreadable: Vec::new(),
        }
    }
}

impl WorksheetSource for MemorySource {
    fn describe(&self) -> String {
        "memory".to_string()
    }

    fn sheet_names(&self) -> SourceResult<Vec<String>> {
        match self.listing {
            Listing::Ok => Ok(self.sheets.iter().map(|sheet| sheet.name.clone()).collect()),
            Listing::Unauthorized => Err(SourceError::Authentication {
                reason: "HTTP 401 Unauthorized".to_string(),
            }),
            Listing::Unavailable => Err(SourceError::Enumeration {
                reason: "HTTP 503 Service Unavailable".to_string(),
            }),
        }
    }

    fn fetch_sheet(&self, name: &str) -> SourceResult<Worksheet> {
        if self.unreadable.iter().any(|unreadable| *unreadable == name) {
            return Err(SourceError::SheetRead {
                name: name.to_string(),
                reason: "HTTP 500".to_string(),
            });
        }
        self.sheets
            .iter()
            .find(|sheet| sheet.name == name)
            .cloned()
            .ok_or_else(|| SourceError::SheetNotFound {
                name: name.to_string(),
            })
    }
}

fn sheet(name: &str, rows: &[&[&str]]) -> Worksheet {
    Worksheet::from_cells(name, rows.iter().map(|row| row.iter().copied()))
}

fn items() -> Worksheet {
    sheet(
        "Item",
        &[
            &["Item id", "Display name"],
            &["int", "string"],
            &["id", "name"],
            &["1", "Sword"],
            &[],
            &["#2", "Shield"],
            &["3", "Bow"],
        ],
    )
}

fn output_config(root: &Path) -> OutputConfig {
    OutputConfig {
        json_dir: root.join("json"),
        code_dir: root.join("code"),
        ..OutputConfig::default()
    }
}

#[test]
fn test_sync_writes_json_and_types() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = output_config(dir.path());
    let source = MemorySource::new(vec![items()]);

    let report = run_sync(&source, &config).expect("run");

    assert_eq!(report.total(), 1);
    assert_eq!(report.succeeded(), 1);
    let outcome = &report.sheets[0];
    assert_eq!(outcome.records, Some(2));
    assert_eq!(outcome.columns, Some(2));

    let json_path = dir.path().join("json").join("Item.json");
    assert_eq!(outcome.outputs.data.as_deref(), Some(json_path.as_path()));
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).expect("read json"))
            .expect("parse json");
    assert_eq!(
        json,
        serde_json::json!([{"id": 1, "name": "Sword"}, {"id": 3, "name": "Bow"}])
    );

    assert!(dir.path().join("code").join("Item.cs").is_file());
    assert!(dir.path().join("code").join("ItemSO.cs").is_file());
}

#[test]
fn test_reserved_sheets_are_excluded() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = output_config(dir.path());
    let source = MemorySource::new(vec![
        sheet("!Draft", &[]),
        items(),
        sheet("@Meta", &[]),
        sheet("#Disabled", &[]),
    ]);

    let report = run_sync(&source, &config).expect("run");

    assert_eq!(report.excluded, ["!Draft", "@Meta", "#Disabled"]);
    let processed: Vec<&str> = report.sheets.iter().map(|s| s.sheet.as_str()).collect();
    assert_eq!(processed, ["Item"]);
}

#[test]
fn test_failures_are_isolated_per_sheet() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = output_config(dir.path());
    let mut source = MemorySource::new(vec![
        sheet("Broken", &[&["only"], &["int"]]),
        sheet(
            "Prices",
            &[&["", ""], &["int", "float"], &["id", "price"], &["1", "cheap"]],
        ),
        sheet("Lost", &[]),
        items(),
    ]);
    source.unreadable.push("Lost");

    let report = run_sync(&source, &config).expect("run");

    assert_eq!(report.total(), 4);
    assert_eq!(report.succeeded(), 1);
    assert!(report.is_success());

    let broken = &report.sheets[0];
    assert!(broken.has_failure(FailureKind::MalformedSheet));
    assert_eq!(broken.outputs.record_type, None);

    // Coercion failure drops the data file but still generates types.
    let prices = &report.sheets[1];
    assert!(prices.has_failure(FailureKind::Coercion));
    assert!(prices.failures[0].message.starts_with("row 4, column 'price'"));
    assert_eq!(prices.outputs.data, None);
    assert!(!dir.path().join("json").join("Prices.json").exists());
    assert!(dir.path().join("code").join("Prices.cs").is_file());

    assert!(report.sheets[2].has_failure(FailureKind::Fetch));
    assert!(report.sheets[3].succeeded());
}

#[test]
fn test_header_only_sheet() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = output_config(dir.path());
    let worksheet = sheet("Quest", &[&["Quest id"], &["int"], &["id"]]);

    let outcome = process_sheet(&worksheet, &config);

    assert!(outcome.succeeded());
    assert_eq!(outcome.records, Some(0));
    let json = std::fs::read_to_string(dir.path().join("json").join("Quest.json")).expect("read");
    assert_eq!(json, "[]\n");
    assert!(dir.path().join("code").join("QuestSO.cs").is_file());
}

#[test]
fn test_dry_run_writes_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = OutputConfig {
        dry_run: true,
        ..output_config(dir.path())
    };

    let outcome = process_sheet(&items(), &config);

    assert!(outcome.succeeded());
    assert_eq!(outcome.records, Some(2));
    assert_eq!(outcome.outputs.data, None);
    assert_eq!(outcome.outputs.record_type, None);
    assert!(!dir.path().join("json").exists());
    assert!(!dir.path().join("code").exists());
}

#[test]
fn test_branches_can_be_disabled() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = OutputConfig {
        write_code: false,
        ..output_config(dir.path())
    };

    let outcome = process_sheet(&items(), &config);

    assert!(outcome.outputs.data.is_some());
    assert_eq!(outcome.outputs.record_type, None);
    assert!(!dir.path().join("code").exists());
}

#[test]
fn test_write_failure_skips_remaining_outputs() {
    let dir = tempfile::tempdir().expect("tempdir");
    // A file where the JSON directory should be.
    let blocked = dir.path().join("json");
    std::fs::write(&blocked, "not a directory").expect("write blocker");
    let config = output_config(dir.path());

    let outcome = process_sheet(&items(), &config);

    assert!(outcome.has_failure(FailureKind::Write));
    assert_eq!(outcome.outputs.record_type, None);
    assert!(!dir.path().join("code").exists());
}

#[test]
fn test_path_like_sheet_name_is_a_write_failure() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = output_config(&dir.path().join("out"));
    let mut escape = items();
    escape.name = "../Escape".to_string();

    let outcome = process_sheet(&escape, &config);

    assert!(outcome.has_failure(FailureKind::Write));
    assert_eq!(outcome.outputs.data, None);
    assert_eq!(outcome.outputs.record_type, None);
    assert!(!dir.path().join("out").join("Escape.json").exists());
    assert!(!dir.path().join("out").exists());

    let code_only = OutputConfig {
        write_json: false,
        ..output_config(&dir.path().join("out"))
    };
    let outcome = process_sheet(&escape, &code_only);
    assert!(outcome.has_failure(FailureKind::Write));
    assert!(!dir.path().join("out").join("Escape.cs").exists());
}

#[test]
fn test_listing_failures_are_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = output_config(dir.path());

    let mut source = MemorySource::new(vec![items()]);
    source.listing = Listing::Unauthorized;
    assert!(matches!(
        run_sync(&source, &config),
        Err(RunError::Authentication(_))
    ));

    source.listing = Listing::Unavailable;
    assert!(matches!(
        run_sync(&source, &config),
        Err(RunError::Enumeration(_))
    ));
}

#[test]
fn test_no_eligible_sheets() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = output_config(dir.path());
    let source = MemorySource::new(vec![sheet("!Notes", &[])]);

    let report = run_sync(&source, &config).expect("run");

    assert_eq!(report.total(), 0);
    assert!(!report.is_success());
}

#[test]
fn test_csv_directory_source() {
    let dir = tempfile::tempdir().expect("tempdir");
    let sheets = dir.path().join("sheets");
    std::fs::create_dir(&sheets).expect("create sheets dir");
    std::fs::write(
        sheets.join("Monster.csv"),
        "Monster id,Name,Drops\nint,string,List<int>\nid,name,drops\n1,Slime,\"1, 2\"\n",
    )
    .expect("write csv");
    std::fs::write(sheets.join("!Scratch.csv"), "a\n").expect("write csv");
    let config = output_config(dir.path());

    let report = run_sync(&CsvDirectorySource::new(&sheets), &config).expect("run");

    assert_eq!(report.succeeded(), 1);
    assert_eq!(report.excluded, ["!Scratch"]);
    let json = std::fs::read_to_string(dir.path().join("json").join("Monster.json")).expect("read");
    let value: serde_json::Value = serde_json::from_str(&json).expect("parse");
    assert_eq!(
        value,
        serde_json::json!([{"id": 1, "name": "Slime", "drops": [1, 2]}])
    );
}

#[test]
fn test_missing_csv_directory_is_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = output_config(dir.path());
    let source = CsvDirectorySource::new(dir.path().join("missing"));

    assert!(matches!(
        run_sync(&source, &config),
        Err(RunError::Enumeration(_))
    ));
}

#[test]
fn test_dry_run_report() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = OutputConfig {
        dry_run: true,
        ..output_config(dir.path())
    };
    let source = MemorySource::new(vec![
        sheet("!Draft", &[]),
        items(),
        sheet("Broken", &[&["only"], &["int"]]),
    ]);

    let report = run_sync(&source, &config).expect("run");

    insta::assert_json_snapshot!(report, @r#"
    {
      "source": "memory",
      "sheets": [
        {
          "sheet": "Item",
          "columns": 2,
          "records": 2,
          "outputs": {
            "data": null,
            "record_type": null,
            "container_type": null
          },
          "failures": []
        },
        {
          "sheet": "Broken",
          "columns": null,
          "records": null,
          "outputs": {
            "data": null,
            "record_type": null,
            "container_type": null
          },
          "failures": [
            {
              "kind": "malformed_sheet",
              "message": "malformed sheet: expected at least 3 header rows, found 2"
            }
          ]
        }
      ],
      "excluded": [
        "!Draft"
      ]
    }
    "#);
}
