//! PNG charts for the visualisation stage.

use std::error::Error;
use std::path::Path;

use clausewise_ai::{PrCurve, RocCurve};
use clausewise_core::Tone;
use plotters::prelude::*;

pub type PlotResult = Result<(), Box<dyn Error>>;

/// Seaborn-style "coolwarm" end points and midpoint.
const COOL: (f32, f32, f32) = (59.0, 76.0, 192.0);
const MID: (f32, f32, f32) = (221.0, 221.0, 221.0);
const WARM: (f32, f32, f32) = (180.0, 4.0, 38.0);

pub fn tone_color(tone: Tone) -> RGBColor {
    match tone {
        Tone::Neutral => RGBColor(31, 119, 180),
        Tone::CustomerFriendly => RGBColor(44, 160, 44),
        Tone::SupplierFriendly => RGBColor(214, 39, 40),
    }
}

/// Map `t` in `[0, 1]` onto the coolwarm ramp.
pub fn coolwarm(t: f32) -> RGBColor {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.5 };
    let (from, to, u) = if t < 0.5 {
        (COOL, MID, t * 2.0)
    } else {
        (MID, WARM, (t - 0.5) * 2.0)
    };
    let lerp = |a: f32, b: f32| (a + (b - a) * u).round() as u8;
    RGBColor(lerp(from.0, to.0), lerp(from.1, to.1), lerp(from.2, to.2))
}

/// Square similarity heatmap, row 0 at the top, coloured between the matrix
/// minimum and maximum.
pub fn render_heatmap(path: &Path, title: &str, matrix: &[Vec<f32>]) -> PlotResult {
    let n = matrix.len() as i32;
    let (lo, hi) = matrix
        .iter()
        .flatten()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let span = if hi > lo { hi - lo } else { 1.0 };

    let root = BitMapBackend::new(path, (1000, 800)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(format!("{title} (min {lo:.3}, max {hi:.3})"), ("sans-serif", 22))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(0..n, 0..n)?;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("clause")
        .y_desc("clause")
        .draw()?;

    chart.draw_series(matrix.iter().enumerate().flat_map(|(i, row)| {
        let y = n - 1 - i as i32;
        row.iter().enumerate().map(move |(j, &v)| {
            let x = j as i32;
            Rectangle::new([(x, y), (x + 1, y + 1)], coolwarm((v - lo) / span).filled())
        })
    }))?;

    root.present()?;
    Ok(())
}

/// PCA scatter, one colour per tone.
pub fn render_scatter(path: &Path, points: &[[f32; 2]], tones: &[Tone]) -> PlotResult {
    let (x_range, y_range) = padded_bounds(points);

    let root = BitMapBackend::new(path, (1000, 800)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Clause Embeddings (PCA)", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_range, y_range)?;
    chart
        .configure_mesh()
        .x_desc("principal component 1")
        .y_desc("principal component 2")
        .draw()?;

    for tone in Tone::ALL {
        let color = tone_color(tone);
        let group: Vec<(f32, f32)> = points
            .iter()
            .zip(tones)
            .filter(|&(_, t)| *t == tone)
            .map(|(p, _)| (p[0], p[1]))
            .collect();
        if group.is_empty() {
            continue;
        }
        chart
            .draw_series(group.into_iter().map(|p| Circle::new(p, 4, color.mix(0.7).filled())))?
            .label(tone.as_str())
            .legend(move |(x, y)| Circle::new((x + 10, y), 4, color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

pub fn render_roc(path: &Path, tone: Tone, curve: &RocCurve) -> PlotResult {
    let points: Vec<(f32, f32)> = curve.fpr.iter().copied().zip(curve.tpr.iter().copied()).collect();
    render_curve(
        path,
        &format!("ROC Curve ({tone})"),
        ("false positive rate", "true positive rate"),
        &points,
        &format!("AUC = {:.3}", curve.auc()),
        true,
    )
}

pub fn render_precision_recall(path: &Path, tone: Tone, curve: &PrCurve) -> PlotResult {
    let points: Vec<(f32, f32)> = curve
        .recall
        .iter()
        .copied()
        .zip(curve.precision.iter().copied())
        .collect();
    render_curve(
        path,
        &format!("Precision-Recall Curve ({tone})"),
        ("recall", "precision"),
        &points,
        &format!("AP = {:.3}", curve.average_precision()),
        false,
    )
}

fn render_curve(
    path: &Path,
    title: &str,
    (x_desc, y_desc): (&str, &str),
    points: &[(f32, f32)],
    label: &str,
    diagonal: bool,
) -> PlotResult {
    let root = BitMapBackend::new(path, (900, 700)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 22))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0f32..1.0f32, 0.0f32..1.05f32)?;
    chart.configure_mesh().x_desc(x_desc).y_desc(y_desc).draw()?;

    if diagonal {
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(0.0, 0.0), (1.0, 1.0)],
            BLACK.mix(0.3),
        )))?;
    }

    chart
        .draw_series(LineSeries::new(points.iter().copied(), &BLUE))?
        .label(label)
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

fn padded_bounds(points: &[[f32; 2]]) -> (std::ops::Range<f32>, std::ops::Range<f32>) {
    let mut lo = [f32::INFINITY; 2];
    let mut hi = [f32::NEG_INFINITY; 2];
    for p in points {
        for axis in 0..2 {
            lo[axis] = lo[axis].min(p[axis]);
            hi[axis] = hi[axis].max(p[axis]);
        }
    }
    let range = |axis: usize| {
        if !lo[axis].is_finite() || !hi[axis].is_finite() {
            return -1.0..1.0;
        }
        let pad = ((hi[axis] - lo[axis]) * 0.1).max(1e-3);
        (lo[axis] - pad)..(hi[axis] + pad)
    };
    (range(0), range(1))
}
