//! Built-in report template.

/// The default Typst template, used when the config sets no
/// `template_path`.
pub fn template() -> &'static str {
    r#"#set page(
  paper: "a4",
  margin: (x: 2cm, y: 2.5cm),
)
#set text(font: "New Computer Modern", size: 10pt)
#set heading(numbering: "1.")

= Typhoon Impact Report

{{OVERVIEW}}

== Commodities by Spike Frequency

Months whose national average price exceeds the commodity's
median + IQR threshold.

{{SPIKE_LEADERBOARD}}

== Commodities by Price Volatility

Sample standard deviation of each commodity's monthly national
average price.

{{VOLATILITY_LEADERBOARD}}

== High-Risk Regions

Price observations above their commodity's spike threshold, by region.

{{REGION_LEADERBOARD}}

== Cyclone-to-Spike Lag

Mean months from PAR entry to the first subsequent price spike.
Cyclones with no spike inside the window are excluded.

{{LAG_TABLE}}

== Price Trends with Cyclone Overlay

{{OVERLAY_CHARTS}}

== Resilience Scatter

{{RESILIENCE_CHART}}

{{EXCLUDED_NOTES}}
"#
}
