use anyhow::{Result, bail};
use deuteron::core::models::table::DistributionTable;
use plotters::prelude::*;
use std::path::Path;

const IMAGE_SIZE: (u32, u32) = (1200, 800);
const X_LABEL: &str = "p [fm^-1]";
const Y_LABEL: &str = "rho(p) [fm]";

/// Plot window `(x_max, y_max)` covering every table, with headroom above the peak.
fn plot_window<'a>(tables: impl IntoIterator<Item = &'a DistributionTable>) -> Option<(f64, f64)> {
    let mut window: Option<(f64, f64)> = None;
    for table in tables {
        let (Some(x), Some(peak)) = (table.max_momentum(), table.peak()) else {
            continue;
        };
        let (x_max, y_max) = window.get_or_insert((0.0, 0.0));
        *x_max = x_max.max(x);
        *y_max = y_max.max(peak.density);
    }
    window
        .filter(|&(x, y)| x > 0.0 && y > 0.0)
        .map(|(x, y)| (x, y * 1.1))
}

/// Draws one model's distribution as a line plot.
pub fn single_plot(name: &str, table: &DistributionTable, output: &Path) -> Result<()> {
    let Some((x_max, y_max)) = plot_window([table]) else {
        bail!("table for model '{}' has no positive density to plot", name);
    };

    let root = BitMapBackend::new(output, IMAGE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Momentum distribution: {}", name),
            ("sans-serif", 24),
        )
        .margin(12)
        .x_label_area_size(42)
        .y_label_area_size(64)
        .build_cartesian_2d(0.0..x_max, 0.0..y_max)?;

    chart
        .configure_mesh()
        .x_desc(X_LABEL)
        .y_desc(Y_LABEL)
        .draw()?;

    chart.draw_series(LineSeries::new(
        table.iter().map(|point| (point.momentum, point.density)),
        &BLUE,
    ))?;

    root.present()?;
    Ok(())
}

/// Overlays several models on one set of axes, with a legend.
pub fn combined_plot(tables: &[(String, DistributionTable)], output: &Path) -> Result<()> {
    let Some((x_max, y_max)) = plot_window(tables.iter().map(|(_, table)| table)) else {
        bail!("no tables with positive density to plot");
    };

    let root = BitMapBackend::new(output, IMAGE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Deuteron momentum distributions", ("sans-serif", 24))
        .margin(12)
        .x_label_area_size(42)
        .y_label_area_size(64)
        .build_cartesian_2d(0.0..x_max, 0.0..y_max)?;

    chart
        .configure_mesh()
        .x_desc(X_LABEL)
        .y_desc(Y_LABEL)
        .draw()?;

    for (index, (name, table)) in tables.iter().enumerate() {
        let color = Palette99::pick(index).to_rgba();
        chart
            .draw_series(LineSeries::new(
                table.iter().map(|point| (point.momentum, point.density)),
                &color,
            ))?
            .label(name.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK.mix(0.25))
        .draw()?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use deuteron::core::io::text::TextTable;
    use deuteron::core::io::traits::TableFormat;

    fn table(rows: &str) -> DistributionTable {
        TextTable::read_from(&mut rows.as_bytes()).unwrap()
    }

    #[test]
    fn window_covers_all_tables_with_headroom() {
        let a = table("0.5\t1.0\n1.0\t2.0\n");
        let b = table("0.5\t0.5\n3.0\t1.0\n");
        let (x_max, y_max) = plot_window([&a, &b]).unwrap();
        assert_eq!(x_max, 3.0);
        assert!((y_max - 2.2).abs() < 1e-12);
    }

    #[test]
    fn window_is_none_without_positive_density() {
        let flat = table("0.5\t0.0\n1.0\t0.0\n");
        assert!(plot_window([&flat]).is_none());
        assert!(plot_window(std::iter::empty()).is_none());
    }

    #[test]
    fn empty_table_is_rejected_before_drawing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("empty.png");
        let result = single_plot("empty", &DistributionTable::default(), &output);
        assert!(result.is_err());
        assert!(!output.exists());
    }
}
