//! SVG timeline generation.
//!
//! Lays the finalized model out as parallel horizontal lanes over a linear
//! time axis, clipped to the effective window. Rendering is a pure function
//! of (model, window, config): identical inputs produce byte-identical
//! output, so the document carries no timestamps or other ambient state.

use crate::timeline::{Lane, TimelineModel, Window};
use crate::utils::config::{
    AXIS_HEIGHT, AXIS_TICKS, DEFAULT_CHART_WIDTH, DEFAULT_LANE_HEIGHT, LABEL_COLUMN_WIDTH,
    LEGEND_HEIGHT, RIGHT_MARGIN, STATE_PALETTE, TOP_MARGIN,
};
use crate::utils::error::RenderError;
use log::info;

/// Timeline rendering configuration
#[derive(Debug, Clone)]
pub struct TimelineConfig {
    pub title: String,
    pub width: usize,
    pub lane_height: usize,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            title: "Timeline".to_string(),
            width: DEFAULT_CHART_WIDTH,
            lane_height: DEFAULT_LANE_HEIGHT,
        }
    }
}

impl TimelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }
}

/// Linear time-to-pixel mapping over the effective window
struct Scale {
    from: u64,
    span_ms: f64,
    left: f64,
    plot_width: f64,
}

impl Scale {
    fn new(from: u64, to: u64, chart_width: usize) -> Self {
        let plot_width = chart_width
            .saturating_sub(LABEL_COLUMN_WIDTH + RIGHT_MARGIN)
            .max(1) as f64;
        Self {
            from,
            // Guard the zero-width window (all events on one timestamp)
            span_ms: (to - from).max(1) as f64,
            left: LABEL_COLUMN_WIDTH as f64,
            plot_width,
        }
    }

    fn x(&self, ts: u64) -> f64 {
        self.left + (ts - self.from) as f64 / self.span_ms * self.plot_width
    }

    fn right(&self) -> f64 {
        self.left + self.plot_width
    }
}

/// Generate the SVG document for a finalized timeline
///
/// **Public** - main entry point for rendering
///
/// # Errors
/// * `RenderError::NotFinalized` - the model is still being built
/// * `RenderError::EmptyTimeline` - no events and no explicit window
/// * `RenderError::InvalidWindow` - window bounds are inverted
pub fn render_timeline(
    model: &TimelineModel,
    window: Window,
    config: Option<&TimelineConfig>,
) -> Result<String, RenderError> {
    if !model.is_finalized() {
        return Err(RenderError::NotFinalized);
    }

    let config = config.cloned().unwrap_or_default();
    let (from, to) = window.resolve(model)?;
    info!(
        "Rendering {} lanes over window [{}, {}] ms",
        model.lanes().len(),
        from,
        to
    );

    let scale = Scale::new(from, to, config.width);
    let palette = assign_state_colors(model);

    let rows_height = model.lanes().len() * config.lane_height;
    let axis_y = TOP_MARGIN + rows_height + 8;
    let legend_y = TOP_MARGIN + rows_height + AXIS_HEIGHT + 16;
    let total_height = TOP_MARGIN + rows_height + AXIS_HEIGHT + LEGEND_HEIGHT;

    let mut svg = String::new();

    // Header
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        config.width, total_height, config.width, total_height
    ));

    // Styles
    svg.push_str(
        r#"<style>text { font: 12px sans-serif; } .bar:hover, .mark:hover { stroke: black; stroke-width: 1; cursor: pointer; opacity: 0.9; }</style>"#,
    );

    // Title
    svg.push_str(&format!(
        r#"<text x="{}" y="20" font-size="16" text-anchor="middle" font-weight="bold">{}</text>"#,
        config.width / 2,
        xml_escape(&config.title)
    ));

    // Lane rows, registration order top to bottom
    for (row, lane) in model.lanes().iter().enumerate() {
        let row_y = TOP_MARGIN + row * config.lane_height;
        render_lane(
            &mut svg,
            lane,
            row,
            row_y,
            config.lane_height,
            &scale,
            (from, to),
            &palette,
        );
    }

    render_axis(&mut svg, &scale, from, to, axis_y);
    render_legend(&mut svg, &palette, legend_y);

    svg.push_str("</svg>");

    info!("Timeline rendered ({} bytes)", svg.len());
    Ok(svg)
}

#[allow(clippy::too_many_arguments)]
fn render_lane(
    out: &mut String,
    lane: &Lane,
    row: usize,
    row_y: usize,
    lane_height: usize,
    scale: &Scale,
    window: (u64, u64),
    palette: &[(String, &'static str)],
) {
    let (from, to) = window;

    // Alternating row stripe for readability
    if row % 2 == 1 {
        out.push_str(&format!(
            r#"<rect x="{:.2}" y="{}" width="{:.2}" height="{}" fill="rgb(245, 245, 245)"/>"#,
            scale.left,
            row_y,
            scale.plot_width,
            lane_height
        ));
    }

    out.push_str(&format!(
        r#"<text x="8" y="{}">{}</text>"#,
        row_y + lane_height / 2 + 4,
        xml_escape(lane.key())
    ));

    let bar_y = row_y + 4;
    let bar_height = lane_height.saturating_sub(8);
    for interval in lane.intervals() {
        let clipped_start = interval.start.max(from);
        let clipped_end = interval.end.min(to);
        if clipped_start >= clipped_end {
            continue;
        }
        let x = scale.x(clipped_start);
        let width = scale.x(clipped_end) - x;
        out.push_str(&format!(
            r#"<rect x="{:.2}" y="{}" width="{:.2}" height="{}" fill="{}" class="bar"><title>{} [{}, {}] ms</title></rect>"#,
            x,
            bar_y,
            width,
            bar_height,
            color_for(palette, &interval.state),
            xml_escape(&interval.state),
            interval.start,
            interval.end
        ));
    }

    let center_y = row_y + lane_height / 2;
    for marker in lane.markers() {
        // Point events survive on the window edges
        if marker.ts < from || marker.ts > to {
            continue;
        }
        out.push_str(&format!(
            r#"<circle cx="{:.2}" cy="{}" r="3.5" fill="{}" class="mark"><title>{} @ {} ms</title></circle>"#,
            scale.x(marker.ts),
            center_y,
            color_for(palette, &marker.state),
            xml_escape(&marker.state),
            marker.ts
        ));
    }
}

fn render_axis(out: &mut String, scale: &Scale, from: u64, to: u64, axis_y: usize) {
    out.push_str(&format!(
        r#"<line x1="{:.2}" y1="{}" x2="{:.2}" y2="{}" stroke="black"/>"#,
        scale.left,
        axis_y,
        scale.right(),
        axis_y
    ));

    for i in 0..=AXIS_TICKS {
        let t = from + (to - from) * i / AXIS_TICKS;
        let x = scale.x(t);
        out.push_str(&format!(
            r#"<line x1="{:.2}" y1="{}" x2="{:.2}" y2="{}" stroke="black"/>"#,
            x,
            axis_y,
            x,
            axis_y + 4
        ));
        out.push_str(&format!(
            r#"<text x="{:.2}" y="{}" text-anchor="middle">{}</text>"#,
            x,
            axis_y + 18,
            t
        ));
    }

    out.push_str(&format!(
        r#"<text x="{:.2}" y="{}" text-anchor="middle" font-style="italic">time (ms)</text>"#,
        scale.left + scale.plot_width / 2.0,
        axis_y + 34
    ));
}

fn render_legend(out: &mut String, palette: &[(String, &'static str)], legend_y: usize) {
    if palette.is_empty() {
        return;
    }

    out.push_str(&format!(
        r#"<text x="10" y="{}" font-weight="bold">Legend:</text>"#,
        legend_y + 12
    ));

    for (i, (state, color)) in palette.iter().enumerate() {
        let x = 80 + i * 140;
        out.push_str(&format!(
            r#"<rect x="{}" y="{}" width="14" height="14" fill="{}" rx="2"/>"#,
            x, legend_y, color
        ));
        out.push_str(&format!(
            r#"<text x="{}" y="{}">{}</text>"#,
            x + 20,
            legend_y + 12,
            xml_escape(state)
        ));
    }
}

/// Assign palette colors to state labels in first-seen order, cycling.
/// Model traversal order is fixed, so the assignment is deterministic.
fn assign_state_colors(model: &TimelineModel) -> Vec<(String, &'static str)> {
    let mut palette: Vec<(String, &'static str)> = Vec::new();
    let mut assign = |state: &str| {
        if !palette.iter().any(|(s, _)| s == state) {
            let color = STATE_PALETTE[palette.len() % STATE_PALETTE.len()];
            palette.push((state.to_string(), color));
        }
    };
    for lane in model.lanes() {
        for interval in lane.intervals() {
            assign(&interval.state);
        }
        for marker in lane.markers() {
            assign(&marker.state);
        }
    }
    palette
}

fn color_for<'a>(palette: &'a [(String, &'static str)], state: &str) -> &'a str {
    palette
        .iter()
        .find(|(s, _)| s == state)
        .map(|(_, c)| *c)
        .unwrap_or("rgb(169, 169, 169)")
}

fn xml_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
