//! Snapshot chart of the whole series: one panel per metric, arranged 2×2.

use std::path::Path;

use image::{ColorType, ImageEncoder, codecs::png::PngEncoder};
use ordered_float::OrderedFloat;
use plotters::{coord::Shift, prelude::*, style::register_font};

use crate::{
    core::{Observation, Series},
    file::write_atomically,
    prelude::*,
};

/// 12×6 inches at 100 DPI.
const SIZE: (u32, u32) = (1200, 600);

const FONT: &str = "sans-serif";

static FONT_BYTES: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");

struct Panel {
    title: &'static str,
    unit: &'static str,
    color: RGBColor,
    value: fn(&Observation) -> f64,
}

const PANELS: [Panel; 4] = [
    Panel {
        title: "State of Charge (SOC)",
        unit: "SOC (%)",
        color: RGBColor(31, 119, 180),
        value: |observation| observation.state_of_charge.0,
    },
    Panel {
        title: "Remaining Time",
        unit: "Time (minutes)",
        color: RGBColor(255, 165, 0),
        value: |observation| observation.remaining_time.0,
    },
    Panel {
        title: "Watts Out",
        unit: "Power (W)",
        color: RGBColor(0, 128, 0),
        value: |observation| observation.power_out.0,
    },
    Panel {
        title: "Watts In",
        unit: "Power (W)",
        color: RGBColor(255, 0, 0),
        value: |observation| observation.power_in.0,
    },
];

/// Render the series and replace whatever was at `path`.
///
/// An empty series is fine and produces empty axes.
#[instrument(skip_all, fields(path = %path.display(), n_observations = series.len()))]
pub fn render(series: &Series, path: &Path) -> Result {
    register_font(FONT, FontStyle::Normal, FONT_BYTES)
        .map_err(|_| Error::msg("the bundled font is invalid"))?;

    let (width, height) = SIZE;
    let mut pixels = vec![0_u8; width as usize * height as usize * 3];
    draw(series, BitMapBackend::with_buffer(&mut pixels, SIZE).into_drawing_area())
        .context("failed to draw the chart")?;

    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(&pixels, width, height, ColorType::Rgb8)
        .context("failed to encode the chart")?;
    write_atomically(path, &png)?;
    info!(n_bytes = png.len(), "rendered");
    Ok(())
}

fn draw(series: &Series, root: DrawingArea<BitMapBackend<'_>, Shift>) -> Result {
    root.fill(&WHITE)?;
    let hour_ticks = series.hour_ticks();
    for (area, panel) in root.split_evenly((2, 2)).iter().zip(&PANELS) {
        panel.draw(area, series, &hour_ticks)?;
    }
    root.present()?;
    Ok(())
}

impl Panel {
    fn draw(
        &self,
        area: &DrawingArea<BitMapBackend<'_>, Shift>,
        series: &Series,
        hour_ticks: &[usize],
    ) -> Result {
        let points: Vec<(usize, f64)> = series.iter().map(self.value).enumerate().collect();

        // X is the observation index: panels share the domain and repeated labels stay distinct.
        let mut chart = ChartBuilder::on(area)
            .caption(self.title, (FONT, 16))
            .margin(10)
            .x_label_area_size(70)
            .y_label_area_size(60)
            .build_cartesian_2d(
                (0..series.len().max(1)).with_key_points(hour_ticks.to_vec()),
                0.0..upper_bound(points.iter().map(|(_, value)| *value)),
            )?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(hour_ticks.len().max(1))
            .x_label_formatter(&|index: &usize| x_label(series, *index))
            .x_label_style((FONT, 10).into_font().transform(FontTransform::Rotate90))
            .x_desc("Time")
            .y_desc(self.unit)
            .draw()?;

        chart.draw_series(LineSeries::new(points.iter().copied(), &self.color))?;
        chart.draw_series(points.iter().map(|&point| Circle::new(point, 3, self.color.filled())))?;
        Ok(())
    }
}

fn x_label(series: &Series, index: usize) -> String {
    series.get(index).map(Observation::time_label).unwrap_or_default()
}

/// Y axis upper bound with some headroom; the lower bound is always zero.
fn upper_bound(values: impl Iterator<Item = f64>) -> f64 {
    values
        .map(OrderedFloat)
        .max()
        .map_or(1.0, |OrderedFloat(max)| if max > 0.0 { max * 1.1 } else { 1.0 })
}
