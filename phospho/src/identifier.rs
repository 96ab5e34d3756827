//! Construct and clean `GENE_residue(position)` phosphosite identifiers
use crate::Annotated;
use log::info;
use regex::Regex;

/// One identifier-keyed record
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    pub id: String,
    pub intensities: Vec<Option<f64>>,
}

/// Rows keyed by phosphosite identifier, possibly containing duplicates
#[derive(Clone, Debug, Default)]
pub struct Identified {
    pub records: Vec<Record>,
    pub channels: Vec<String>,
}

/// Builds phosphosite identifiers of the form `GENE_R(pos)`.
///
/// Unresolved gene or position lookups are rendered as `nan` so that the
/// cleaning step rejects them, matching how a stringified missing value
/// would appear in the source data.
pub struct IdBuilder {
    decimal: Regex,
}

impl Default for IdBuilder {
    fn default() -> Self {
        IdBuilder::new()
    }
}

impl IdBuilder {
    pub fn new() -> Self {
        IdBuilder {
            decimal: Regex::new(r"\((\d+)\.0+\)").unwrap(),
        }
    }

    /// Format an identifier from its parts. The result may still be
    /// rejected by [`IdBuilder::clean`].
    pub fn build(
        &self,
        gene: Option<&str>,
        residue: char,
        position: Option<usize>,
    ) -> String {
        let gene = gene.unwrap_or("nan");
        match position {
            Some(p) => format!("{}_{}({})", gene, residue, p),
            None => format!("{}_{}(nan)", gene, residue),
        }
    }

    /// Validate and normalize an identifier.
    ///
    /// Identifiers containing `nan` (case-insensitive), `;`, or `-` signal
    /// unresolved lookups or residual ambiguity and are rejected. A
    /// `(123.0)`-style position is rewritten to `(123)`.
    pub fn clean(&self, id: &str) -> Option<String> {
        if id.to_ascii_lowercase().contains("nan")
            || id.contains(';')
            || id.contains('-')
        {
            return None;
        }
        Some(self.decimal.replace_all(id, "($1)").into_owned())
    }
}

impl Annotated {
    /// Key every row by its phosphosite identifier, dropping rows whose
    /// identifier fails cleaning
    pub fn identify(self) -> Identified {
        let builder = IdBuilder::new();
        let total = self.rows.len();

        let records = self
            .rows
            .into_iter()
            .filter_map(|annotated| {
                let id = builder.build(
                    annotated.gene.as_deref(),
                    annotated.residue,
                    annotated.position,
                );
                Some(Record {
                    id: builder.clean(&id)?,
                    intensities: annotated.row.intensities,
                })
            })
            .collect::<Vec<Record>>();

        info!("{} of {} rows have a resolvable identifier", records.len(), total);

        Identified {
            records,
            channels: self.channels,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn build() {
        let b = IdBuilder::new();
        assert_eq!(b.build(Some("TP53"), 'S', Some(14)), "TP53_S(14)");
        assert_eq!(b.build(None, 'S', Some(14)), "nan_S(14)");
        assert_eq!(b.build(Some("TP53"), 'Y', None), "TP53_Y(nan)");
    }

    #[test]
    fn unresolved_lookups_are_rejected() {
        let b = IdBuilder::new();
        assert_eq!(b.clean("nan_S(14)"), None);
        assert_eq!(b.clean("TP53_Y(nan)"), None);
        assert_eq!(b.clean("TP53_Y(NaN)"), None);
    }

    #[test]
    fn ambiguous_identifiers_are_rejected() {
        let b = IdBuilder::new();
        assert_eq!(b.clean("TP53;TP63_S(14)"), None);
        assert_eq!(b.clean("HLA-A_S(14)"), None);
    }

    #[test]
    fn decimal_positions_are_normalized() {
        let b = IdBuilder::new();
        assert_eq!(b.clean("AKT1_S(473.0)").as_deref(), Some("AKT1_S(473)"));
        assert_eq!(b.clean("AKT1_S(473)").as_deref(), Some("AKT1_S(473)"));
        // only a zero fractional part is stripped
        assert_eq!(b.clean("AKT1_S(473.5)").as_deref(), Some("AKT1_S(473.5)"));
    }
}
