//! Plotting of Pareto-Lorenz curves.

mod lorenz;

pub use lorenz::{curve_series, plot_curves, PlotOptions, Series, X_LABEL, Y_LABEL};
