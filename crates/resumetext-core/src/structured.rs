//! Paragraph and table content of a structured (word-processor) document.

/// A table: rows of cell texts, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Table {
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }
}

/// The text content of a structured document.
///
/// No positions are involved: reading order is the document order.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StructuredDocument {
    /// Body paragraphs.
    pub paragraphs: Vec<String>,
    /// Top-level tables.
    pub tables: Vec<Table>,
}

impl StructuredDocument {
    /// Render the document as plain text.
    ///
    /// Each non-blank paragraph becomes one trimmed line. Then, for every table,
    /// each row becomes one line of its non-blank trimmed cells joined by `\t`;
    /// rows without any text are skipped. All paragraphs come before all tables.
    pub fn to_text(&self) -> String {
        let paragraphs = self
            .paragraphs
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .map(str::to_string);

        let rows = self.tables.iter().flat_map(|t| &t.rows).filter_map(|row| {
            let cells: Vec<&str> = row
                .iter()
                .map(|c| c.trim())
                .filter(|c| !c.is_empty())
                .collect();
            (!cells.is_empty()).then(|| cells.join("\t"))
        });

        paragraphs
            .chain(rows)
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }
}
