//! Chart rendering for reports.
//!
//! Draws the price/cyclone overlay and the resilience scatter as Typst
//! drawing markup, scaled into a fixed plot box.

use crate::domain::chart::{OverlaySeries, ResiliencePoint};
use crate::domain::observation::month_floor;

const WIDTH: f64 = 500.0;
const HEIGHT: f64 = 200.0;
const PADDING: f64 = 40.0;

/// National-average price polyline with dashed vertical rules at each
/// cyclone's PAR entry.
pub fn format_overlay_chart(overlay: &OverlaySeries) -> String {
    if overlay.points.is_empty() {
        return format!("No price data available for {}.", overlay.commodity);
    }

    let plot_width = WIDTH - 2.0 * PADDING;
    let plot_height = HEIGHT - 2.0 * PADDING;

    let min_price = overlay
        .points
        .iter()
        .map(|p| p.price)
        .fold(f64::INFINITY, f64::min);
    let max_price = overlay
        .points
        .iter()
        .map(|p| p.price)
        .fold(f64::NEG_INFINITY, f64::max);

    let range = max_price - min_price;
    let scale_y = if range > 0.0 { plot_height / range } else { 1.0 };
    let scale_x = if overlay.points.len() > 1 {
        plot_width / (overlay.points.len() - 1) as f64
    } else {
        0.0
    };

    let points: Vec<String> = overlay
        .points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let x = PADDING + i as f64 * scale_x;
            let y = HEIGHT - PADDING - (point.price - min_price) * scale_y;
            format!("({:.1}pt, {:.1}pt)", x, y)
        })
        .collect();

    let mut rules = String::new();
    for marker in &overlay.markers {
        // Anchor the rule at the first series month covering the cyclone.
        let month = month_floor(marker.date);
        let Some(i) = overlay.points.iter().position(|p| p.month >= month) else {
            continue;
        };
        let x = PADDING + i as f64 * scale_x;
        rules.push_str(&format!(
            "      move(dx: {:.1}pt, dy: {:.1}pt, line(length: {:.1}pt, angle: 90deg, stroke: (paint: red, thickness: 1pt, dash: \"dashed\")))\n",
            x, PADDING, plot_height
        ));
    }

    format!(
        r#"#figure(
  box(
    width: {:.0}pt,
    height: {:.0}pt,
    fill: white,
    {{
      move(dx: {:.0}pt, dy: {:.0}pt, line(length: {:.0}pt, angle: 90deg))
      move(dx: {:.0}pt, dy: {:.0}pt, line(length: {:.0}pt))
{}      move(dx: 0pt, dy: 0pt, path(
        fill: none,
        stroke: green + 1pt,
        {}
      ))
    }}
  ),
  caption: [{}: national average price with cyclone entries]
)
"#,
        WIDTH,
        HEIGHT,
        PADDING,
        PADDING,
        plot_height,
        PADDING,
        HEIGHT - PADDING,
        plot_width,
        rules,
        points.join(",\n        "),
        overlay.commodity
    )
}

/// Mean-lag vs volatility scatter; bubble radius tracks spike frequency.
pub fn format_resilience_chart(points: &[ResiliencePoint]) -> String {
    if points.is_empty() {
        return "No commodity had a cyclone-matched spike to plot.".to_string();
    }

    let plot_width = WIDTH - 2.0 * PADDING;
    let plot_height = HEIGHT - 2.0 * PADDING;

    let max_lag = points
        .iter()
        .map(|p| p.mean_lag_months)
        .fold(f64::NEG_INFINITY, f64::max)
        .max(1.0);
    let max_vol = points
        .iter()
        .map(|p| p.volatility)
        .fold(f64::NEG_INFINITY, f64::max)
        .max(1e-9);

    let mut circles = String::new();
    for p in points {
        let x = PADDING + p.mean_lag_months / max_lag * plot_width;
        let y = HEIGHT - PADDING - p.volatility / max_vol * plot_height;
        // 2pt floor so zero-frequency commodities stay visible.
        let radius = 2.0 + p.spike_frequency_pct / 100.0 * 8.0;
        circles.push_str(&format!(
            "      move(dx: {:.1}pt, dy: {:.1}pt, circle(radius: {:.1}pt, fill: green, stroke: black + 0.5pt))\n",
            x - radius,
            y - radius,
            radius
        ));
    }

    format!(
        r#"#figure(
  box(
    width: {:.0}pt,
    height: {:.0}pt,
    fill: white,
    {{
      move(dx: {:.0}pt, dy: {:.0}pt, line(length: {:.0}pt, angle: 90deg))
      move(dx: {:.0}pt, dy: {:.0}pt, line(length: {:.0}pt))
{}    }}
  ),
  caption: [Resilience: mean lag (x) against volatility (y), bubble size by spike frequency]
)
"#,
        WIDTH,
        HEIGHT,
        PADDING,
        PADDING,
        plot_height,
        PADDING,
        HEIGHT - PADDING,
        plot_width,
        circles
    )
}
