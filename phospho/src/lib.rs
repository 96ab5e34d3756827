//! Cleaning pipeline for mass-spectrometry phosphoproteomics datasets.
//!
//! This library's API is based around several types that form a data
//! analysis pipeline.
//!
//! Raw search-engine output is loaded into a [`Raw`] table, which is reduced
//! to confidently-localized, single-site phosphorylation events by a
//! collection of [`RowFilter`]'s:
//!
//! ```rust,ignore
//! # use phospho::*;
//! let filters = Filter::new()
//!     .add_row_filter(RowFilter::Modification("Phospho (STY)"))
//!     .add_row_filter(RowFilter::SingleSite)
//!     .add_row_filter(RowFilter::SiteProbability(0.85));
//!
//! let raw = Raw::load("./data/HH2022.csv")?.filter(&filters);
//! ```
//!
//! Surviving rows are annotated against a reference proteome to resolve the
//! modified residue, its zero-based offset within the parent protein, and
//! the parent gene symbol. Annotated rows are keyed by a
//! `GENE_residue(position)` phosphosite identifier, log2-transformed, and
//! merged so that each identifier appears exactly once:
//!
//! ```rust,ignore
//! # use phospho::*;
//! # use uniprot::Fasta;
//! let db = Fasta::open("./data/UP000005640_9606.fasta")?;
//! raw.annotate(&db).identify().log2().aggregate().write("out.csv")?;
//! ```

mod aggregate;
mod filter;
mod identifier;
mod parser;
mod site;
mod stats;
mod writer;

pub use aggregate::Cleaned;
pub use filter::{Filter, RowFilter};
pub use identifier::{Identified, Record};
pub use parser::{Raw, Row};
pub use site::{Annotated, AnnotatedRow};

/// Errors produced while loading or writing tabular data
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column `{0}`")]
    MissingColumn(&'static str),
}

#[cfg(test)]
mod test {
    use super::*;
    use uniprot::Fasta;

    const DATASET: &str = "\
Modifications,Modified sequence,Sequence,Phospho (STY) Probabilities,Gene Names,Reporter intensity 1,Reporter intensity 2
Phospho (STY),_QAMDDLS(ph)PDDIER_,_QAMDDLSPDDIER_,QAMDDLS(0.95)PDDIER,TP53,4.0,8.0
Phospho (STY),_QAMDDLS(ph)PDDIER_,_QAMDDLSPDDIER_,QAMDDLS(0.99)PDDIER,TP53,16.0,32.0
\"Phospho (STY), Phospho (STY)\",_QAMDDLS(ph)PDDIS(ph)ER_,_QAMDDLSPDDISER_,QAMDDLS(0.95)PDDIS(0.95)ER,TP53,1.0,1.0
Phospho (STY),_QAMDDLS(ph)PDDIER_,_QAMDDLSPDDIER_,QAMDDLS(0.50)PDDIER,TP53,1.0,1.0
Phospho (STY),_GEYIKT(ph)WR_,_GEYIKTWR_,GEYIKT(0.91)WR,AKT1,0.0,2.0
Phospho (STY),_WWWWS(ph)WWWW_,_WWWWSWWWW_,WWWWS(0.93)WWWW,MYST1,5.0,5.0
";

    const FASTA: &str = "\
>sp|P04637|P53_HUMAN Cellular tumor antigen p53 OS=Homo sapiens GN=TP53 PE=1 SV=4
MEEPQSDPSVQAMDDLSPDDIERWFTEDPGP
>sp|P31749|AKT1_HUMAN RAC-alpha kinase OS=Homo sapiens GN=AKT1 PE=1 SV=2
MSDVAIVKEGWLHKRGEYIKTWRPRYFLL
";

    fn run(dataset: &str, fasta: &Fasta) -> Vec<u8> {
        let filters = Filter::new()
            .add_row_filter(RowFilter::Modification("Phospho (STY)"))
            .add_row_filter(RowFilter::SingleSite)
            .add_row_filter(RowFilter::SiteProbability(0.85));

        let cleaned = Raw::from_reader(dataset.as_bytes())
            .unwrap()
            .filter(&filters)
            .annotate(fasta)
            .identify()
            .log2()
            .aggregate();

        let mut out = Vec::new();
        cleaned.write_to(&mut out).unwrap();
        out
    }

    #[test]
    fn end_to_end() {
        let db = Fasta::from_bytes(FASTA.as_bytes()).unwrap();
        let out = String::from_utf8(run(DATASET, &db)).unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(
            lines[0],
            "phosphosite_ID,Reporter intensity 1,Reporter intensity 2"
        );
        // AKT1 row: log2(0) is -inf, blanked after aggregation; log2(2) = 1
        assert_eq!(lines[1], "AKT1_T(15),,1");
        // TP53 rows merge: mean(log2 4, log2 16) = 3, mean(log2 8, log2 32) = 4
        assert_eq!(lines[2], "TP53_S(10),3,4");
        // Comma-modification, low-probability, and unmatched-sequence rows
        // are all excluded
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn reruns_are_byte_identical() {
        let db = Fasta::from_bytes(FASTA.as_bytes()).unwrap();
        assert_eq!(run(DATASET, &db), run(DATASET, &db));
    }
}
