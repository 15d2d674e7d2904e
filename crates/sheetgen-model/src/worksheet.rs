/// One named tab of a spreadsheet as a grid of resolved string cells.
///
/// Rows may be ragged; missing trailing cells read as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Worksheet {
    pub name: String,
    pub rows: Vec<Vec<String>>,
}

impl Worksheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Convenience constructor from borrowed cells.
    pub fn from_cells<R, C>(name: impl Into<String>, rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = C>,
        C: Into<String>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        Self::new(name, rows)
    }
}
