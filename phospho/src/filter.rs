//! Utilities for reducing a raw table to confidently-localized,
//! single-site phosphorylation events with a set of composable rules
use crate::{Raw, Row};
use log::info;
use regex::Regex;

/// Row-level filter
#[derive(Clone, Debug, PartialEq, PartialOrd)]
pub enum RowFilter<'a> {
    /// Pass through rows whose modification annotation equals the target,
    /// case-insensitively
    Modification(&'a str),
    /// Pass through rows annotated with a single modification site (no
    /// comma in the modification field)
    SingleSite,
    /// Pass through rows whose probability-annotated sequence contains at
    /// least one parenthesized localization probability > N.
    ///
    /// Rows without any parenthesized value are dropped.
    SiteProbability(f64),
}

/// Provides filtering functionality on raw datasets
///
/// Follows the Builder pattern:
///
/// ```rust,ignore
/// # use phospho::*;
/// let filters = Filter::new()
///     .add_row_filter(RowFilter::Modification("Phospho (STY)"))
///     .add_row_filter(RowFilter::SingleSite)
///     .add_row_filter(RowFilter::SiteProbability(0.85));
/// ```
#[derive(Clone, Debug)]
pub struct Filter<'a> {
    row_filters: Vec<RowFilter<'a>>,
    probability: Regex,
}

impl<'a> Default for Filter<'a> {
    fn default() -> Self {
        Filter::new()
    }
}

impl<'a> Filter<'a> {
    pub fn new() -> Self {
        Filter {
            row_filters: Vec::new(),
            probability: Regex::new(r"\((\d+\.\d+)\)").unwrap(),
        }
    }

    pub fn add_row_filter(mut self, filter: RowFilter<'a>) -> Self {
        self.row_filters.push(filter);
        self
    }

    fn passes(&self, row: &Row) -> bool {
        self.row_filters.iter().all(|filter| match filter {
            RowFilter::Modification(target) => {
                row.modifications.eq_ignore_ascii_case(target)
            }
            RowFilter::SingleSite => !row.modifications.contains(','),
            RowFilter::SiteProbability(cutoff) => self
                .probability
                .captures_iter(&row.probabilities)
                .any(|cap| {
                    cap[1]
                        .parse::<f64>()
                        .map(|p| p > *cutoff)
                        .unwrap_or(false)
                }),
        })
    }
}

impl Raw {
    /// Return a new [`Raw`] containing only rows passing every rule in
    /// `filters`
    pub fn filter(self, filters: &Filter<'_>) -> Raw {
        let total = self.rows.len();
        let rows = self
            .rows
            .into_iter()
            .filter(|row| filters.passes(row))
            .collect::<Vec<Row>>();
        info!("{} of {} rows pass filters", rows.len(), total);

        Raw {
            rows,
            channels: self.channels,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn row(modifications: &str, probabilities: &str) -> Row {
        Row {
            modifications: modifications.into(),
            probabilities: probabilities.into(),
            ..Row::default()
        }
    }

    fn phospho_filter<'a>() -> Filter<'a> {
        Filter::new()
            .add_row_filter(RowFilter::Modification("Phospho (STY)"))
            .add_row_filter(RowFilter::SingleSite)
            .add_row_filter(RowFilter::SiteProbability(0.85))
    }

    #[test]
    fn modification_must_match_exactly() {
        let f = phospho_filter();
        assert!(f.passes(&row("Phospho (STY)", "S(0.99)K")));
        assert!(f.passes(&row("phospho (sty)", "S(0.99)K")));
        assert!(!f.passes(&row("Oxidation (M)", "S(0.99)K")));
        assert!(!f.passes(&row("2 Phospho (STY)", "S(0.99)K")));
    }

    #[test]
    fn comma_means_multiple_sites() {
        let f = phospho_filter();
        assert!(!f.passes(&row("Phospho (STY), Phospho (STY)", "S(0.99)K")));
    }

    #[test]
    fn probability_cutoff() {
        let f = phospho_filter();
        assert!(!f.passes(&row("Phospho (STY)", "AAS(0.50)LK")));
        assert!(f.passes(&row("Phospho (STY)", "AAS(0.90)LK")));
        // boundary is strict
        assert!(!f.passes(&row("Phospho (STY)", "AAS(0.85)LK")));
        // any one high-confidence site is enough
        assert!(f.passes(&row("Phospho (STY)", "AAS(0.10)LK(0.90)R")));
    }

    #[test]
    fn no_parenthesized_value_is_dropped() {
        let f = phospho_filter();
        assert!(!f.passes(&row("Phospho (STY)", "AASLK")));
    }
}
