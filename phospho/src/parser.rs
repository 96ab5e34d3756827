//! Structs and methods for loading raw phosphoproteomics search output
//!
//! Input files are delimited tables with named columns. Five annotation
//! columns are required; every column whose header contains
//! `Reporter intensity` is treated as a quantification channel and kept in
//! header order.
use crate::Error;
use csv::StringRecord;
use log::info;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// One measurement row of the raw table
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Row {
    /// Free-text modification annotation, e.g. `Phospho (STY)`
    pub modifications: String,
    /// Peptide sequence with inline `(ph)` modification markers
    pub modified_sequence: String,
    /// Plain amino-acid sequence, possibly padded with `_`
    pub sequence: String,
    /// Localization-probability-annotated sequence, e.g. `AAS(0.98)LK`
    pub probabilities: String,
    /// Semicolon-delimited gene name field
    pub gene_names: String,
    /// One slot per reporter channel; `None` where the field is blank or
    /// not numeric
    pub intensities: Vec<Option<f64>>,
}

/// Raw search output taken directly from a delimited file
#[derive(Clone, Debug, Default)]
pub struct Raw {
    pub rows: Vec<Row>,
    /// Reporter channel column names, in header order
    pub channels: Vec<String>,
}

const REQUIRED: [&str; 5] = [
    "Modifications",
    "Modified sequence",
    "Sequence",
    "Phospho (STY) Probabilities",
    "Gene Names",
];

fn field(record: &StringRecord, idx: usize) -> String {
    record.get(idx).unwrap_or_default().to_string()
}

impl Raw {
    /// Load a raw dataset from a comma-delimited file with headers
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Raw, Error> {
        let raw = Raw::from_reader(File::open(path.as_ref())?)?;
        info!(
            "loaded {} rows, {} reporter channels from {}",
            raw.rows.len(),
            raw.channels.len(),
            path.as_ref().display()
        );
        Ok(raw)
    }

    /// Parse a raw dataset from any reader
    pub fn from_reader<R: Read>(rdr: R) -> Result<Raw, Error> {
        let mut rdr = csv::Reader::from_reader(rdr);
        let headers = rdr.headers()?.clone();

        let required = REQUIRED
            .iter()
            .map(|&name| {
                headers
                    .iter()
                    .position(|h| h == name)
                    .ok_or(Error::MissingColumn(name))
            })
            .collect::<Result<Vec<usize>, Error>>()?;
        let [modifications, modified_sequence, sequence, probabilities, gene_names] =
            [required[0], required[1], required[2], required[3], required[4]];

        let channel_cols = headers
            .iter()
            .enumerate()
            .filter(|(_, h)| h.contains("Reporter intensity"))
            .map(|(idx, h)| (idx, h.to_string()))
            .collect::<Vec<_>>();

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            rows.push(Row {
                modifications: field(&record, modifications),
                modified_sequence: field(&record, modified_sequence),
                sequence: field(&record, sequence),
                probabilities: field(&record, probabilities),
                gene_names: field(&record, gene_names),
                intensities: channel_cols
                    .iter()
                    .map(|(idx, _)| {
                        record.get(*idx).and_then(|s| s.trim().parse::<f64>().ok())
                    })
                    .collect(),
            });
        }

        Ok(Raw {
            rows,
            channels: channel_cols.into_iter().map(|(_, name)| name).collect(),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const CSV: &str = "\
id,Modifications,Modified sequence,Sequence,Phospho (STY) Probabilities,Gene Names,Reporter intensity 1,Reporter intensity corrected 2,Score
0,Phospho (STY),_AAS(ph)LK_,_AASLK_,AAS(0.98)LK,TP53,1200.5,,90
1,Phospho (STY),_GT(ph)MR_,_GTMR_,GT(0.91)MR,AKT1;AKT2,abc,3.5e2,80
";

    #[test]
    fn channels_from_header() {
        let raw = Raw::from_reader(CSV.as_bytes()).unwrap();
        assert_eq!(
            raw.channels,
            vec!["Reporter intensity 1", "Reporter intensity corrected 2"]
        );
    }

    #[test]
    fn rows_and_coercion() {
        let raw = Raw::from_reader(CSV.as_bytes()).unwrap();
        assert_eq!(raw.rows.len(), 2);
        assert_eq!(raw.rows[0].modifications, "Phospho (STY)");
        assert_eq!(raw.rows[0].gene_names, "TP53");
        // blank and non-numeric fields coerce to missing
        assert_eq!(raw.rows[0].intensities, vec![Some(1200.5), None]);
        assert_eq!(raw.rows[1].intensities, vec![None, Some(350.0)]);
    }

    #[test]
    fn missing_column_is_fatal() {
        let err = Raw::from_reader("Sequence,Gene Names\nAASLK,TP53\n".as_bytes());
        match err {
            Err(Error::MissingColumn(name)) => assert_eq!(name, "Modifications"),
            _ => panic!("expected missing column error"),
        }
    }
}
