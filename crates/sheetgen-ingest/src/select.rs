//! Worksheet selection by name convention.

use sheetgen_model::Worksheet;

/// Leading characters that mark a worksheet as a draft, meta, or disabled tab.
pub const RESERVED_PREFIXES: [char; 3] = ['!', '@', '#'];

/// Returns true if the worksheet name starts with a reserved marker.
pub fn is_reserved_sheet_name(name: &str) -> bool {
    name.starts_with(RESERVED_PREFIXES)
}

/// Keeps every worksheet whose name is not reserved, in input order.
pub fn select_worksheets(worksheets: Vec<Worksheet>) -> Vec<Worksheet> {
    worksheets
        .into_iter()
        .filter(|sheet| !is_reserved_sheet_name(&sheet.name))
        .collect()
}

/// Splits sheet names into `(selected, excluded)`, both in input order.
pub fn partition_sheet_names(names: Vec<String>) -> (Vec<String>, Vec<String>) {
    let (excluded, selected) = names
        .into_iter()
        .partition(|name| is_reserved_sheet_name(name));
    (selected, excluded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_names() {
        assert!(is_reserved_sheet_name("!Draft"));
        assert!(is_reserved_sheet_name("@Meta"));
        assert!(is_reserved_sheet_name("#Disabled"));
        assert!(!is_reserved_sheet_name("Items"));
        assert!(!is_reserved_sheet_name("Item!s"));
        assert!(!is_reserved_sheet_name(""));
    }

    #[test]
    fn partition_keeps_order() {
        let names = ["B", "!x", "A", "#y", "C"].map(String::from).to_vec();
        let (selected, excluded) = partition_sheet_names(names);
        assert_eq!(selected, vec!["B", "A", "C"]);
        assert_eq!(excluded, vec!["!x", "#y"]);
    }
}
