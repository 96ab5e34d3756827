//! Heatmap rendering
use crate::correlate::Pruned;
use crate::Error;
use log::info;
use plotters::prelude::*;
use std::path::Path;

/// Blue-white-red colormap over [-1, 1]
fn bwr(v: f64) -> RGBColor {
    let t = v.clamp(-1.0, 1.0);
    if t < 0.0 {
        // blue at -1, white at 0
        let f = 1.0 + t;
        RGBColor((255.0 * f) as u8, (255.0 * f) as u8, 255)
    } else {
        // white at 0, red at +1
        let f = 1.0 - t;
        RGBColor(255, (255.0 * f) as u8, (255.0 * f) as u8)
    }
}

impl Pruned {
    /// Render the matrix as a square heatmap PNG, one colored cell per
    /// entry, without axis labels
    pub fn render<P: AsRef<Path>>(&self, path: P, size: u32) -> Result<(), Error> {
        let n = self.values.len();
        if n == 0 {
            return Err(Error::Plot("empty correlation matrix".into()));
        }

        let root = BitMapBackend::new(path.as_ref(), (size, size)).into_drawing_area();
        root.fill(&WHITE).map_err(|e| Error::Plot(e.to_string()))?;

        let cell = f64::from(size) / n as f64;
        for (i, row) in self.values.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                let x0 = (j as f64 * cell) as i32;
                let y0 = (i as f64 * cell) as i32;
                let x1 = ((j + 1) as f64 * cell).ceil() as i32;
                let y1 = ((i + 1) as f64 * cell).ceil() as i32;
                root.draw(&Rectangle::new([(x0, y0), (x1, y1)], bwr(v).filled()))
                    .map_err(|e| Error::Plot(e.to_string()))?;
            }
        }

        root.present().map_err(|e| Error::Plot(e.to_string()))?;
        info!(
            "rendered {n} x {n} heatmap to {}",
            path.as_ref().display()
        );
        Ok(())
    }
}
