//! PNG rendering of Pareto-Lorenz curves.

use crate::data::CurveSet;
use crate::error::{PlError, Result};
use log::{info, warn};
use plotters::prelude::*;
use std::path::Path;

pub const X_LABEL: &str = "Cumulative Prop Bins";
pub const Y_LABEL: &str = "Cumulative Relative Abundance";

/// Output image settings.
#[derive(Debug, Clone)]
pub struct PlotOptions {
    pub width: u32,
    pub height: u32,
    pub caption: Option<String>,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            caption: None,
        }
    }
}

/// A labelled line: sample id and its (x, y) points.
pub type Series = (String, Vec<(f64, f64)>);

/// Line series for every non-empty curve, in sample order.
pub fn curve_series(curves: &CurveSet) -> Vec<Series> {
    curves
        .iter()
        .filter_map(|curve| {
            if curve.is_empty() {
                warn!("skipping empty curve for sample '{}'", curve.sample_id);
                None
            } else {
                Some((curve.sample_id.clone(), curve.xy()))
            }
        })
        .collect()
}

fn plot_error<E: std::fmt::Display>(err: E) -> PlError {
    PlError::Plot(err.to_string())
}

/// Draw all curves on one chart and save it as a PNG.
///
/// x is the cumulative rank proportion, y the cumulative relative
/// abundance, both on [0, 1]. Each sample gets its own colour and a legend
/// entry; the grid is always drawn.
pub fn plot_curves<P: AsRef<Path>>(
    curves: &CurveSet,
    path: P,
    options: &PlotOptions,
) -> Result<()> {
    if options.width == 0 || options.height == 0 {
        return Err(PlError::InvalidParameter(
            "plot dimensions must be non-zero".to_string(),
        ));
    }
    let series = curve_series(curves);

    let root = BitMapBackend::new(path.as_ref(), (options.width, options.height))
        .into_drawing_area();
    root.fill(&WHITE).map_err(plot_error)?;

    let mut builder = ChartBuilder::on(&root);
    builder
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60);
    if let Some(caption) = &options.caption {
        builder.caption(caption, ("sans-serif", 22));
    }
    let mut chart = builder
        .build_cartesian_2d(0.0f64..1.0f64, 0.0f64..1.0f64)
        .map_err(plot_error)?;

    chart
        .configure_mesh()
        .x_desc(X_LABEL)
        .y_desc(Y_LABEL)
        .x_labels(11)
        .y_labels(11)
        .draw()
        .map_err(plot_error)?;

    for (i, (label, points)) in series.into_iter().enumerate() {
        let color = Palette99::pick(i).mix(0.9);
        chart
            .draw_series(LineSeries::new(points, color.stroke_width(2)))
            .map_err(plot_error)?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(plot_error)?;

    root.present().map_err(plot_error)?;
    info!("wrote plot to {}", path.as_ref().display());
    Ok(())
}
