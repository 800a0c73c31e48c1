//! Chart description and SVG rendering
//!
//! [`ChartSpec`] is a plain description of what to draw (curves, markers, shaded
//! regions, control line) in market coordinates, with quantity on the x axis and
//! price on the y axis. A [`Renderer`] turns it into output. Styling such as font
//! family, minus-sign glyph and label language travels in a [`ChartStyle`] passed at
//! render time.

use crate::equilibrium::shifted_supply_quantity;
use crate::shortage::ShortageKind;
use crate::{ControlKind, Result, SimulationResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 60.0;
/// Fraction of the data range added on each side of the axes
const AXIS_PADDING: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LabelLanguage {
    English,
    Korean,
}

/// Every piece of text that appears on the chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartLabels {
    pub title: String,
    pub quantity_axis: String,
    pub price_axis: String,
    pub demand: String,
    pub supply: String,
    pub shifted_supply: String,
    pub baseline_equilibrium: String,
    pub post_equilibrium: String,
    pub consumer_surplus: String,
    pub producer_surplus: String,
    pub price_ceiling: String,
    pub price_floor: String,
    pub excess_demand: String,
    pub excess_supply: String,
    pub balanced: String,
}

impl ChartLabels {
    pub fn english() -> Self {
        ChartLabels {
            title: "Market for Good A".to_string(),
            quantity_axis: "Quantity (Q)".to_string(),
            price_axis: "Price (P)".to_string(),
            demand: "Demand".to_string(),
            supply: "Supply".to_string(),
            shifted_supply: "Supply after intervention".to_string(),
            baseline_equilibrium: "Original equilibrium".to_string(),
            post_equilibrium: "Equilibrium after intervention".to_string(),
            consumer_surplus: "Consumer surplus".to_string(),
            producer_surplus: "Producer surplus".to_string(),
            price_ceiling: "Price ceiling".to_string(),
            price_floor: "Price floor".to_string(),
            excess_demand: "Excess demand".to_string(),
            excess_supply: "Excess supply".to_string(),
            balanced: "Balanced".to_string(),
        }
    }

    pub fn korean() -> Self {
        ChartLabels {
            title: "갑국 상품 A 시장 시뮬레이션".to_string(),
            quantity_axis: "수량 (Q)".to_string(),
            price_axis: "가격 (P)".to_string(),
            demand: "수요곡선".to_string(),
            supply: "공급곡선".to_string(),
            shifted_supply: "정부개입 후 공급곡선".to_string(),
            baseline_equilibrium: "원래 균형".to_string(),
            post_equilibrium: "개입 후 균형".to_string(),
            consumer_surplus: "소비자 잉여".to_string(),
            producer_surplus: "생산자 잉여".to_string(),
            price_ceiling: "최고가격제".to_string(),
            price_floor: "최저가격제".to_string(),
            excess_demand: "초과 수요".to_string(),
            excess_supply: "초과 공급".to_string(),
            balanced: "균형".to_string(),
        }
    }

    pub fn shortage(&self, kind: ShortageKind) -> &str {
        match kind {
            ShortageKind::ExcessDemand => self.excess_demand.as_str(),
            ShortageKind::ExcessSupply => self.excess_supply.as_str(),
            ShortageKind::Balanced => self.balanced.as_str(),
        }
    }

    pub fn control(&self, kind: ControlKind) -> Option<&str> {
        match kind {
            ControlKind::Ceiling => Some(self.price_ceiling.as_str()),
            ControlKind::Floor => Some(self.price_floor.as_str()),
            ControlKind::None => None,
        }
    }
}

/// Rendering configuration, passed explicitly to each render call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    pub font_family: String,
    pub font_size: f64,
    /// Render negative numbers with U+2212 instead of an ASCII hyphen
    pub unicode_minus: bool,
    pub labels: ChartLabels,
    /// Price axis runs to the highest interesting price plus this much
    pub price_headroom: f64,
    /// Points sampled along each curve
    pub samples: usize,
}

impl ChartStyle {
    pub fn english() -> Self {
        ChartStyle {
            width: 1000,
            height: 600,
            font_family: "DejaVu Sans".to_string(),
            font_size: 12.0,
            unicode_minus: true,
            labels: ChartLabels::english(),
            price_headroom: 20.0,
            samples: 500,
        }
    }

    /// Hangul labels with a font that carries the glyphs; ASCII minus because
    /// that font lacks U+2212.
    pub fn korean() -> Self {
        ChartStyle {
            font_family: "Malgun Gothic".to_string(),
            unicode_minus: false,
            labels: ChartLabels::korean(),
            ..Self::english()
        }
    }

    pub fn for_language(language: LabelLanguage) -> Self {
        match language {
            LabelLanguage::English => Self::english(),
            LabelLanguage::Korean => Self::korean(),
        }
    }

    pub fn format_number(&self, value: f64, decimals: usize) -> String {
        let text = format!("{:.*}", decimals, value);
        if self.unicode_minus {
            text.replace('-', "\u{2212}")
        } else {
            text
        }
    }
}

impl Default for ChartStyle {
    fn default() -> Self {
        ChartStyle::english()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
}

impl LineStyle {
    fn dash_array(&self) -> Option<&'static str> {
        match self {
            LineStyle::Solid => None,
            LineStyle::Dashed => Some("8,5"),
            LineStyle::Dotted => Some("2,4"),
        }
    }
}

/// A curve as `(quantity, price)` points
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub color: &'static str,
    pub style: LineStyle,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub label: String,
    pub color: &'static str,
    pub quantity: f64,
    pub price: f64,
}

/// Filled polygon, vertices as `(quantity, price)`
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub label: String,
    pub color: &'static str,
    pub opacity: f64,
    pub vertices: Vec<(f64, f64)>,
}

/// Horizontal line at a controlled price, annotated with the quantity gap
#[derive(Debug, Clone, PartialEq)]
pub struct ControlLine {
    pub price: f64,
    pub label: String,
    pub annotation: String,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
    pub markers: Vec<Marker>,
    pub regions: Vec<Region>,
    pub control: Option<ControlLine>,
}

impl ChartSpec {
    pub fn from_result(result: &SimulationResult, style: &ChartStyle) -> Self {
        let labels = &style.labels;
        let demand = result.params.demand;
        let supply = result.params.supply;
        let prices = price_grid(result, style);

        let mut series = vec![
            Series {
                label: labels.demand.clone(),
                color: "blue",
                style: LineStyle::Solid,
                points: prices
                    .iter()
                    .map(|&p| (demand.demand_quantity(p), p))
                    .collect(),
            },
            Series {
                label: labels.supply.clone(),
                color: "green",
                style: LineStyle::Solid,
                points: prices
                    .iter()
                    .map(|&p| (supply.supply_quantity(p), p))
                    .collect(),
            },
        ];

        let baseline = result.baseline;
        let mut markers = vec![Marker {
            label: format!(
                "{} ({}, {})",
                labels.baseline_equilibrium,
                style.format_number(baseline.quantity, 1),
                style.format_number(baseline.price, 1)
            ),
            color: "purple",
            quantity: baseline.quantity,
            price: baseline.price,
        }];

        if let Some(post) = result.post_intervention {
            let net = result.params.net_intervention();
            series.push(Series {
                label: labels.shifted_supply.clone(),
                color: "red",
                style: LineStyle::Dashed,
                points: prices
                    .iter()
                    .map(|&p| (shifted_supply_quantity(&supply, p, net), p))
                    .collect(),
            });
            markers.push(Marker {
                label: format!(
                    "{} ({}, {})",
                    labels.post_equilibrium,
                    style.format_number(post.quantity, 1),
                    style.format_number(post.price, 1)
                ),
                color: "orange",
                quantity: post.quantity,
                price: post.price,
            });
        }

        let regions = vec![
            Region {
                label: format!(
                    "{}: {}",
                    labels.consumer_surplus,
                    style.format_number(result.surplus.consumer_surplus, 1)
                ),
                color: "skyblue",
                opacity: 0.3,
                vertices: vec![
                    (0.0, demand.choke_price()),
                    (baseline.quantity, baseline.price),
                    (0.0, baseline.price),
                ],
            },
            Region {
                label: format!(
                    "{}: {}",
                    labels.producer_surplus,
                    style.format_number(result.surplus.producer_surplus, 1)
                ),
                color: "lightgreen",
                opacity: 0.3,
                vertices: vec![
                    (0.0, supply.reservation_price()),
                    (baseline.quantity, baseline.price),
                    (0.0, baseline.price),
                ],
            },
        ];

        let control = match (
            labels.control(result.price_control.kind()),
            result.price_control.price(),
            &result.shortage,
        ) {
            (Some(name), Some(price), Some(gap)) => Some(ControlLine {
                price,
                label: format!("{}: {}", name, style.format_number(price, 1)),
                annotation: format!(
                    "{}: {}",
                    labels.shortage(gap.kind),
                    style.format_number(gap.magnitude, 1)
                ),
                color: "darkred",
            }),
            _ => None,
        };

        ChartSpec {
            title: labels.title.clone(),
            x_label: labels.quantity_axis.clone(),
            y_label: labels.price_axis.clone(),
            series,
            markers,
            regions,
            control,
        }
    }

    /// Smallest box containing everything drawn, as `(q_min, q_max, p_min, p_max)`
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        let points = self
            .series
            .iter()
            .flat_map(|s| s.points.iter().copied())
            .chain(self.regions.iter().flat_map(|r| r.vertices.iter().copied()))
            .chain(self.markers.iter().map(|m| (m.quantity, m.price)))
            .filter(|(q, p)| q.is_finite() && p.is_finite());

        let mut bounds = (
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::INFINITY,
            f64::NEG_INFINITY,
        );
        for (q, p) in points {
            bounds.0 = bounds.0.min(q);
            bounds.1 = bounds.1.max(q);
            bounds.2 = bounds.2.min(p);
            bounds.3 = bounds.3.max(p);
        }
        if let Some(control) = &self.control {
            bounds.2 = bounds.2.min(control.price);
            bounds.3 = bounds.3.max(control.price);
        }
        if !bounds.0.is_finite() {
            return (0.0, 1.0, 0.0, 1.0);
        }
        bounds
    }
}

/// Price samples from zero to the highest of the equilibrium prices and the
/// control price, plus headroom.
pub fn price_grid(result: &SimulationResult, style: &ChartStyle) -> Vec<f64> {
    let post_price = result.effective_equilibrium().price;
    let control_price = result.price_control.price().unwrap_or(0.0);
    let upper = result.baseline.price.max(post_price).max(control_price) + style.price_headroom;
    linspace(0.0, upper, style.samples)
}

/// `n` evenly spaced values from `start` to `end` inclusive
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Consumer of a finished chart
pub trait Renderer {
    fn render(&mut self, chart: &ChartSpec, style: &ChartStyle) -> Result<()>;
}

/// Writes the chart to an SVG file
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    path: PathBuf,
}

impl SvgRenderer {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        SvgRenderer {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, chart: &ChartSpec, style: &ChartStyle) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, render_svg(chart, style))?;
        info!(path = %self.path.display(), "chart written");
        Ok(())
    }
}

/// Maps market coordinates onto the plot area
struct Frame {
    q_min: f64,
    q_max: f64,
    p_min: f64,
    p_max: f64,
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

impl Frame {
    fn new(chart: &ChartSpec, style: &ChartStyle) -> Self {
        let (q_min, q_max, p_min, p_max) = chart.bounds();
        let (q_min, q_max) = pad_range(q_min, q_max);
        let (p_min, p_max) = pad_range(p_min, p_max);
        Frame {
            q_min,
            q_max,
            p_min,
            p_max,
            left: MARGIN_LEFT,
            top: MARGIN_TOP,
            width: (style.width as f64 - MARGIN_LEFT - MARGIN_RIGHT).max(1.0),
            height: (style.height as f64 - MARGIN_TOP - MARGIN_BOTTOM).max(1.0),
        }
    }

    fn x(&self, quantity: f64) -> f64 {
        self.left + (quantity - self.q_min) / (self.q_max - self.q_min) * self.width
    }

    fn y(&self, price: f64) -> f64 {
        self.top + self.height - (price - self.p_min) / (self.p_max - self.p_min) * self.height
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }

    fn right(&self) -> f64 {
        self.left + self.width
    }
}

fn pad_range(min: f64, max: f64) -> (f64, f64) {
    let span = max - min;
    if span <= 0.0 {
        return (min - 1.0, max + 1.0);
    }
    (min - span * AXIS_PADDING, max + span * AXIS_PADDING)
}

/// Round tick positions covering `[min, max]`, roughly `target` of them
fn nice_ticks(min: f64, max: f64, target: usize) -> Vec<f64> {
    let raw_step = (max - min) / target.max(1) as f64;
    if raw_step <= 0.0 || !raw_step.is_finite() {
        return vec![min];
    }
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let residual = raw_step / magnitude;
    let step = if residual <= 1.0 {
        1.0
    } else if residual <= 2.0 {
        2.0
    } else if residual <= 5.0 {
        5.0
    } else {
        10.0
    } * magnitude;

    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}

fn tick_decimals(ticks: &[f64]) -> usize {
    match ticks {
        [a, b, ..] if (b - a).abs() < 1.0 => 1,
        _ => 0,
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn points_attr(frame: &Frame, points: &[(f64, f64)]) -> String {
    points
        .iter()
        .filter(|(q, p)| q.is_finite() && p.is_finite())
        .map(|&(q, p)| format!("{:.2},{:.2}", frame.x(q), frame.y(p)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Draw `chart` as a standalone SVG document
pub fn render_svg(chart: &ChartSpec, style: &ChartStyle) -> String {
    let frame = Frame::new(chart, style);
    let font = escape_xml(&style.font_family);
    let mut svg = String::new();

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" font-family=\"{font}, sans-serif\" font-size=\"{size}\">\n",
        w = style.width,
        h = style.height,
        font = font,
        size = style.font_size
    ));
    svg.push_str("<rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n");
    svg.push_str(&format!(
        "<defs><clipPath id=\"plot-area\"><rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\"/></clipPath></defs>\n",
        frame.left, frame.top, frame.width, frame.height
    ));

    // Grid and tick labels
    let q_ticks = nice_ticks(frame.q_min, frame.q_max, 10);
    let q_decimals = tick_decimals(&q_ticks);
    for &q in &q_ticks {
        let x = frame.x(q);
        svg.push_str(&format!(
            "<line x1=\"{x:.2}\" y1=\"{:.2}\" x2=\"{x:.2}\" y2=\"{:.2}\" stroke=\"#dddddd\"/>\n",
            frame.top,
            frame.bottom(),
            x = x
        ));
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\">{}</text>\n",
            x,
            frame.bottom() + 18.0,
            style.format_number(q, q_decimals)
        ));
    }
    let p_ticks = nice_ticks(frame.p_min, frame.p_max, 8);
    let p_decimals = tick_decimals(&p_ticks);
    for &p in &p_ticks {
        let y = frame.y(p);
        svg.push_str(&format!(
            "<line x1=\"{:.2}\" y1=\"{y:.2}\" x2=\"{:.2}\" y2=\"{y:.2}\" stroke=\"#dddddd\"/>\n",
            frame.left,
            frame.right(),
            y = y
        ));
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"end\">{}</text>\n",
            frame.left - 8.0,
            y + 4.0,
            style.format_number(p, p_decimals)
        ));
    }

    svg.push_str("<g clip-path=\"url(#plot-area)\">\n");
    for region in &chart.regions {
        svg.push_str(&format!(
            "<polygon points=\"{}\" fill=\"{}\" fill-opacity=\"{}\"/>\n",
            points_attr(&frame, &region.vertices),
            region.color,
            region.opacity
        ));
    }
    for series in &chart.series {
        let dash = series
            .style
            .dash_array()
            .map(|d| format!(" stroke-dasharray=\"{}\"", d))
            .unwrap_or_default();
        svg.push_str(&format!(
            "<polyline points=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"1.5\"{}/>\n",
            points_attr(&frame, &series.points),
            series.color,
            dash
        ));
    }
    if let Some(control) = &chart.control {
        let y = frame.y(control.price);
        let dash = LineStyle::Dotted.dash_array().unwrap_or_default();
        svg.push_str(&format!(
            "<line x1=\"{:.2}\" y1=\"{y:.2}\" x2=\"{:.2}\" y2=\"{y:.2}\" stroke=\"{}\" stroke-width=\"2\" stroke-dasharray=\"{}\"/>\n",
            frame.left,
            frame.right(),
            control.color,
            dash,
            y = y
        ));
        // Halfway across, one price unit above the line
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" fill=\"{}\" font-size=\"{}\">{}</text>\n",
            frame.left + frame.width * 0.5,
            frame.y(control.price + 1.0),
            control.color,
            style.font_size * 10.0 / 12.0,
            escape_xml(&control.annotation)
        ));
    }
    for marker in &chart.markers {
        svg.push_str(&format!(
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"5\" fill=\"{}\"/>\n",
            frame.x(marker.quantity),
            frame.y(marker.price),
            marker.color
        ));
    }
    svg.push_str("</g>\n");

    svg.push_str(&format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"none\" stroke=\"black\"/>\n",
        frame.left, frame.top, frame.width, frame.height
    ));
    svg.push_str(&format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-size=\"{}\">{}</text>\n",
        frame.left + frame.width / 2.0,
        frame.top - 18.0,
        style.font_size * 1.4,
        escape_xml(&chart.title)
    ));
    svg.push_str(&format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\">{}</text>\n",
        frame.left + frame.width / 2.0,
        frame.bottom() + 44.0,
        escape_xml(&chart.x_label)
    ));
    let y_label_y = frame.top + frame.height / 2.0;
    svg.push_str(&format!(
        "<text x=\"24\" y=\"{y:.2}\" text-anchor=\"middle\" transform=\"rotate(-90 24 {y:.2})\">{}</text>\n",
        escape_xml(&chart.y_label),
        y = y_label_y
    ));

    render_legend(&mut svg, chart, &frame, style);
    svg.push_str("</svg>\n");
    svg
}

fn render_legend(svg: &mut String, chart: &ChartSpec, frame: &Frame, style: &ChartStyle) {
    enum Swatch {
        Line(&'static str, Option<&'static str>),
        Dot(&'static str),
        Fill(&'static str, f64),
    }

    let mut entries: Vec<(Swatch, &str)> = Vec::new();
    for s in &chart.series {
        entries.push((Swatch::Line(s.color, s.style.dash_array()), s.label.as_str()));
    }
    for m in &chart.markers {
        entries.push((Swatch::Dot(m.color), m.label.as_str()));
    }
    for r in &chart.regions {
        entries.push((Swatch::Fill(r.color, r.opacity), r.label.as_str()));
    }
    if let Some(c) = &chart.control {
        entries.push((
            Swatch::Line(c.color, LineStyle::Dotted.dash_array()),
            c.label.as_str(),
        ));
    }

    let row_height = style.font_size + 8.0;
    let longest = entries
        .iter()
        .map(|(_, label)| label.chars().count())
        .max()
        .unwrap_or(0);
    let box_width = 40.0 + longest as f64 * style.font_size * 0.62;
    let box_height = row_height * entries.len() as f64 + 8.0;
    let x0 = frame.right() - box_width - 10.0;
    let y0 = frame.top + 10.0;

    svg.push_str(&format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"white\" fill-opacity=\"0.85\" stroke=\"#bbbbbb\"/>\n",
        x0, y0, box_width, box_height
    ));

    for (i, (swatch, label)) in entries.iter().enumerate() {
        let cy = y0 + 4.0 + row_height * (i as f64 + 0.5);
        match swatch {
            Swatch::Line(color, dash) => {
                let dash = dash
                    .map(|d| format!(" stroke-dasharray=\"{}\"", d))
                    .unwrap_or_default();
                svg.push_str(&format!(
                    "<line x1=\"{:.2}\" y1=\"{cy:.2}\" x2=\"{:.2}\" y2=\"{cy:.2}\" stroke=\"{}\" stroke-width=\"2\"{}/>\n",
                    x0 + 8.0,
                    x0 + 30.0,
                    color,
                    dash,
                    cy = cy
                ));
            }
            Swatch::Dot(color) => {
                svg.push_str(&format!(
                    "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"5\" fill=\"{}\"/>\n",
                    x0 + 19.0,
                    cy,
                    color
                ));
            }
            Swatch::Fill(color, opacity) => {
                svg.push_str(&format!(
                    "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"22\" height=\"10\" fill=\"{}\" fill-opacity=\"{}\"/>\n",
                    x0 + 8.0,
                    cy - 5.0,
                    color,
                    opacity
                ));
            }
        }
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\">{}</text>\n",
            x0 + 36.0,
            cy + style.font_size * 0.35,
            escape_xml(label)
        ));
    }
}
