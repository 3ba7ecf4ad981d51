use plotters::prelude::*;

/// Plot `f`, the pdf and the per-sample weight `f / pdf` on `[0, 1]` to an SVG file.
/// A weight curve that blows up shows where the pdf does not follow `f`.
pub fn plot_densities(
    f: &dyn Fn(f64) -> f64,
    pdf: &dyn Fn(f64) -> f64,
    filename: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let eval = |g: &dyn Fn(f64) -> f64| -> Vec<(f32, f32)> {
        (0..101)
            .map(|i| (i as f32 / 100., g(i as f64 / 100.) as f32))
            .collect()
    };

    let f_evals = eval(f);
    let pdf_evals = eval(pdf);
    let weight_evals: Vec<(f32, f32)> = f_evals
        .iter()
        .zip(&pdf_evals)
        .map(|(&(x, fx), &(_, px))| (x, fx / px))
        .filter(|(_, w)| w.is_finite())
        .collect();

    let (y_min, y_max) = f_evals
        .iter()
        .chain(&pdf_evals)
        .chain(&weight_evals)
        .filter(|(_, y)| y.is_finite())
        .fold((0f32, 1f32), |(lo, hi), &(_, y)| (lo.min(y), hi.max(y)));

    let root = SVGBackend::new(filename, (640, 640)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.margin(10, 10, 10, 10);
    let mut chart = ChartBuilder::on(&root)
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_ranged(0f32..1f32, y_min..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(10)
        .y_labels(10)
        .draw()?;

    chart.draw_series(LineSeries::new(f_evals.into_iter(), &RED))?;
    chart.draw_series(LineSeries::new(pdf_evals.into_iter(), &BLUE))?;
    chart.draw_series(LineSeries::new(weight_evals.into_iter(), &BLACK))?;

    Ok(())
}
