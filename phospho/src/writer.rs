//! Emit the cleaned, deduplicated table
use crate::{Cleaned, Error};
use log::info;
use std::fs::File;
use std::io::Write;
use std::path::Path;

impl Cleaned {
    /// Write the table to `path` as CSV, identifier column first
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        self.write_to(File::create(path.as_ref())?)?;
        info!(
            "wrote {} phosphosites to {}",
            self.records.len(),
            path.as_ref().display()
        );
        Ok(())
    }

    /// Write the table to any writer as CSV. Missing values are blank
    /// fields.
    pub fn write_to<W: Write>(&self, wtr: W) -> Result<(), Error> {
        let mut wtr = csv::Writer::from_writer(wtr);

        wtr.write_record(
            std::iter::once("phosphosite_ID").chain(self.channels.iter().map(String::as_str)),
        )?;

        for record in &self.records {
            wtr.write_record(std::iter::once(record.id.clone()).chain(
                record.intensities.iter().map(|v| match v {
                    Some(v) => v.to_string(),
                    None => String::new(),
                }),
            ))?;
        }
        wtr.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::{Cleaned, Record};

    #[test]
    fn identifier_column_first_and_blanks_for_missing() {
        let cleaned = Cleaned {
            channels: vec!["Reporter intensity 1".into(), "Reporter intensity 2".into()],
            records: vec![
                Record {
                    id: "AKT1_S(473)".into(),
                    intensities: vec![Some(3.5), None],
                },
                Record {
                    id: "TP53_S(14)".into(),
                    intensities: vec![Some(2.0), Some(-1.25)],
                },
            ],
        };

        let mut out = Vec::new();
        cleaned.write_to(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "phosphosite_ID,Reporter intensity 1,Reporter intensity 2\n\
             AKT1_S(473),3.5,\n\
             TP53_S(14),2,-1.25\n"
        );
    }
}
