use std::fmt::Display;

use itertools::Itertools;

use crate::alphabet::{Alphabet, Symbol};

/// One row of a rendered transition table.
#[derive(Clone, Debug)]
pub(crate) struct TableRow {
    pub initial: bool,
    pub accepting: bool,
    pub name: String,
    pub cells: Vec<String>,
}

impl TableRow {
    fn label(&self) -> String {
        format!(
            "{}{}{}",
            if self.initial { "-> " } else { "   " },
            if self.accepting { "* " } else { "  " },
            self.name
        )
    }
}

/// A human readable transition table. The first column names the states, where the initial state
/// is marked with `->` and accepting states with `*`. Every further column belongs to one symbol.
///
/// Tables of a subset construction additionally carry a legend which lists for every composite
/// state the states it consists of, e.g. `A = { q0, q1 }`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionTable {
    table: String,
    legend: Vec<String>,
}

impl TransitionTable {
    /// Renders the given rows, the header is taken from the positions `columns` of `alphabet`.
    pub(crate) fn build<S, R>(alphabet: &Alphabet<S>, columns: &[usize], rows: R) -> Self
    where
        S: Symbol,
        R: IntoIterator<Item = TableRow>,
    {
        let mut builder = tabled::builder::Builder::default();
        builder.push_record(
            std::iter::once("State".to_string()).chain(
                columns
                    .iter()
                    .filter_map(|&i| alphabet.get(i))
                    .map(|sym| alphabet.show_symbol(sym)),
            ),
        );
        for row in rows {
            debug_assert_eq!(row.cells.len(), columns.len());
            builder.push_record(std::iter::once(row.label()).chain(row.cells));
        }

        Self {
            table: builder
                .build()
                .with(tabled::settings::Style::rounded())
                .to_string(),
            legend: vec![],
        }
    }

    /// Attaches a legend to the table.
    pub(crate) fn with_legend<I: IntoIterator<Item = String>>(mut self, legend: I) -> Self {
        self.legend = legend.into_iter().collect();
        self
    }

    /// The rendered table without the legend.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// The lines of the legend, empty unless the table belongs to a subset construction.
    pub fn legend(&self) -> &[String] {
        &self.legend
    }
}

impl Display for TransitionTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.table)?;
        if !self.legend.is_empty() {
            write!(f, "\n\nWhere:\n{}", self.legend.iter().join("\n"))?;
        }
        Ok(())
    }
}
