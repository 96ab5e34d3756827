//! Log2 transformation and merging of duplicate phosphosite measurements
use crate::{stats, Identified, Record};
use log::info;
use std::collections::BTreeMap;

/// The final deduplicated table: one record per phosphosite identifier,
/// sorted by identifier, all values finite or missing
#[derive(Clone, Debug, Default)]
pub struct Cleaned {
    pub records: Vec<Record>,
    pub channels: Vec<String>,
}

impl Identified {
    /// Log2-transform every intensity.
    ///
    /// `log2(0)` is `-inf` and `log2` of a negative value is NaN; both
    /// propagate through aggregation and are blanked afterwards.
    pub fn log2(mut self) -> Identified {
        for record in &mut self.records {
            for v in &mut record.intensities {
                *v = v.map(f64::log2);
            }
        }
        self
    }

    /// Merge records sharing an identifier by averaging each channel over
    /// the group, skipping missing values. Channels where the whole group
    /// is missing stay missing. Non-finite averages are replaced by
    /// missing markers.
    pub fn aggregate(self) -> Cleaned {
        let distinct = self.records.len();
        let mut groups: BTreeMap<String, Vec<Vec<Option<f64>>>> = BTreeMap::new();
        for record in self.records {
            groups
                .entry(record.id)
                .or_default()
                .push(record.intensities);
        }
        info!(
            "{} distinct phosphosites from {} identified rows",
            groups.len(),
            distinct
        );

        let channels = self.channels;
        let records = groups
            .into_iter()
            .map(|(id, members)| Record {
                id,
                intensities: (0..channels.len())
                    .map(|chan| {
                        stats::mean(members.iter().map(|m| m.get(chan).copied().flatten()))
                            .filter(|v| v.is_finite())
                    })
                    .collect(),
            })
            .collect::<Vec<Record>>();

        Cleaned { records, channels }
    }
}
