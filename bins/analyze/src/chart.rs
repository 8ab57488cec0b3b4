//! Минимальный SVG-рендер двух типов графиков: столбцы и линии по
//! категориям. Ось Y всегда от нуля до «круглого» максимума.

use std::fmt::Display;

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 480.0;
const LEFT: f64 = 90.0;
const RIGHT: f64 = 30.0;
const TOP: f64 = 50.0;
const BOTTOM: f64 = 60.0;
const TICKS: usize = 5;

const PALETTE: [&str; 3] = ["#1f77b4", "#ff7f0e", "#2ca02c"];

pub struct Series<'a> {
    pub name: &'a str,
    pub values: &'a [f64],
}

/// Подписи осей и заголовок.
pub struct Axes<'a> {
    pub title: &'a str,
    pub x_label: &'a str,
    pub y_label: &'a str,
    pub categories: &'a [&'a str],
}

pub fn bar_chart(axes: &Axes<'_>, values: &[f64]) -> String {
    let top = nice_ceiling(max_of(values));
    let mut svg = frame(axes, top);

    let slot = plot_width() / axes.categories.len().max(1) as f64;
    let bar = slot * 0.6;
    for (i, value) in values.iter().enumerate() {
        let x = LEFT + slot * i as f64 + (slot - bar) / 2.0;
        let y = y_of(*value, top);
        line(&mut svg, format_args!(
            r#"<rect class="bar" x="{x:.1}" y="{y:.1}" width="{bar:.1}" height="{:.1}" fill="{}"/>"#,
            baseline() - y,
            PALETTE[0],
        ));
        line(&mut svg, format_args!(
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="12">{}</text>"#,
            x + bar / 2.0,
            y - 6.0,
            format_value(*value),
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

pub fn line_chart(axes: &Axes<'_>, series: &[Series<'_>]) -> String {
    let top = nice_ceiling(series.iter().map(|s| max_of(s.values)).fold(0.0, f64::max));
    let mut svg = frame(axes, top);

    for (n, s) in series.iter().enumerate() {
        let color = PALETTE[n % PALETTE.len()];
        let points: Vec<(f64, f64)> = s
            .values
            .iter()
            .enumerate()
            .map(|(i, v)| (x_of(i, axes.categories.len()), y_of(*v, top)))
            .collect();

        let path = points
            .iter()
            .map(|(x, y)| format!("{x:.1},{y:.1}"))
            .collect::<Vec<_>>()
            .join(" ");
        line(&mut svg, format_args!(
            r#"<polyline class="series" points="{path}" fill="none" stroke="{color}" stroke-width="2"/>"#
        ));
        for (x, y) in &points {
            line(&mut svg, format_args!(r#"<circle cx="{x:.1}" cy="{y:.1}" r="4" fill="{color}"/>"#));
        }

        // legend, top-right
        let ly = TOP + 10.0 + 20.0 * n as f64;
        let lx = WIDTH - RIGHT - 150.0;
        line(&mut svg, format_args!(
            r#"<line x1="{lx:.1}" y1="{ly:.1}" x2="{:.1}" y2="{ly:.1}" stroke="{color}" stroke-width="2"/>"#,
            lx + 24.0
        ));
        line(&mut svg, format_args!(
            r#"<text x="{:.1}" y="{:.1}" font-size="13">{}</text>"#,
            lx + 30.0,
            ly + 4.0,
            escape(s.name)
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

// ════════════════════════════════════════════════════════════════
//  Layout
// ════════════════════════════════════════════════════════════════

/// Открывающий тег, заголовок, оси, сетка и подписи категорий.
fn frame(axes: &Axes<'_>, top: f64) -> String {
    let mut svg = String::new();
    line(&mut svg, format_args!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}" font-family="sans-serif">"#
    ));
    line(&mut svg, format_args!(r#"<rect width="100%" height="100%" fill="white"/>"#));
    line(&mut svg, format_args!(
        r#"<text x="{:.1}" y="30" text-anchor="middle" font-size="18">{}</text>"#,
        WIDTH / 2.0,
        escape(axes.title)
    ));

    for t in 0..=TICKS {
        let value = top * t as f64 / TICKS as f64;
        let y = y_of(value, top);
        line(&mut svg, format_args!(
            r##"<line x1="{LEFT}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="#ddd"/>"##,
            WIDTH - RIGHT
        ));
        line(&mut svg, format_args!(
            r#"<text x="{:.1}" y="{:.1}" text-anchor="end" font-size="11">{}</text>"#,
            LEFT - 8.0,
            y + 4.0,
            format_value(value)
        ));
    }

    line(&mut svg, format_args!(
        r#"<line x1="{LEFT}" y1="{TOP}" x2="{LEFT}" y2="{:.1}" stroke="black"/>"#,
        baseline()
    ));
    line(&mut svg, format_args!(
        r#"<line x1="{LEFT}" y1="{0:.1}" x2="{1:.1}" y2="{0:.1}" stroke="black"/>"#,
        baseline(),
        WIDTH - RIGHT
    ));

    for (i, category) in axes.categories.iter().enumerate() {
        line(&mut svg, format_args!(
            r#"<text class="category" x="{:.1}" y="{:.1}" text-anchor="middle" font-size="13">{}</text>"#,
            x_of(i, axes.categories.len()),
            baseline() + 20.0,
            escape(category)
        ));
    }

    line(&mut svg, format_args!(
        r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="13">{}</text>"#,
        LEFT + plot_width() / 2.0,
        HEIGHT - 15.0,
        escape(axes.x_label)
    ));
    line(&mut svg, format_args!(
        r#"<text transform="translate(20 {:.1}) rotate(-90)" text-anchor="middle" font-size="13">{}</text>"#,
        TOP + plot_height() / 2.0,
        escape(axes.y_label)
    ));
    svg
}

fn line(svg: &mut String, element: impl Display) {
    svg.push_str(&element.to_string());
    svg.push('\n');
}

fn plot_width() -> f64 {
    WIDTH - LEFT - RIGHT
}

fn plot_height() -> f64 {
    HEIGHT - TOP - BOTTOM
}

fn baseline() -> f64 {
    HEIGHT - BOTTOM
}

/// Центр i-й категории.
fn x_of(i: usize, count: usize) -> f64 {
    let slot = plot_width() / count.max(1) as f64;
    LEFT + slot * (i as f64 + 0.5)
}

fn y_of(value: f64, top: f64) -> f64 {
    baseline() - plot_height() * (value / top).clamp(0.0, 1.0)
}

fn max_of(values: &[f64]) -> f64 {
    values.iter().copied().filter(|v| v.is_finite()).fold(0.0, f64::max)
}

/// Наименьшее из 1·10ⁿ, 2·10ⁿ, 5·10ⁿ, не меньшее `v`.
fn nice_ceiling(v: f64) -> f64 {
    if v <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(v.log10().floor());
    let step = [1.0, 2.0, 5.0, 10.0]
        .into_iter()
        .find(|m| m * magnitude >= v)
        .unwrap_or(10.0);
    step * magnitude
}

fn format_value(v: f64) -> String {
    if v == 0.0 {
        "0".to_string()
    } else if v.abs() >= 1e6 || v.abs() < 1e-2 {
        format!("{v:.2e}")
    } else if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.3}")
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORMATS: [&str; 3] = ["JSON", "Protobuf", "FlatBuffers"];

    fn axes<'a>(title: &'a str) -> Axes<'a> {
        Axes { title, x_label: "Format", y_label: "Size (bytes)", categories: &FORMATS }
    }

    #[test]
    fn bar_chart_has_one_bar_per_category() {
        let svg = bar_chart(&axes("File Size Comparison"), &[1200.0, 480.0, 760.0]);
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches(r#"class="bar""#).count(), 3);
        assert_eq!(svg.matches(r#"class="category""#).count(), 3);
        assert!(svg.contains("File Size Comparison"));
        assert!(svg.contains(">1200<"));
    }

    #[test]
    fn line_chart_draws_each_series() {
        let ser = [0.004, 0.001, 0.002];
        let de = [0.006, 0.002, 0.00001];
        let svg = line_chart(
            &axes("Performance Comparison"),
            &[Series { name: "Serialization", values: &ser }, Series { name: "Deserialization", values: &de }],
        );
        assert_eq!(svg.matches(r#"class="series""#).count(), 2);
        assert_eq!(svg.matches("<circle").count(), 6);
        assert!(svg.contains("Deserialization"));
    }

    #[test]
    fn tallest_bar_fits_plot() {
        let svg = bar_chart(&axes("t"), &[100.0, 0.0, 50.0]);
        // nice ceiling of 100 is 100: the tallest bar spans the whole plot height
        assert!(svg.contains(&format!(r#"y="{TOP:.1}""#)));
    }

    #[test]
    fn nice_ceiling_rounds_up() {
        assert_eq!(nice_ceiling(0.0), 1.0);
        assert_eq!(nice_ceiling(7.0), 10.0);
        assert_eq!(nice_ceiling(120.0), 200.0);
        assert_eq!(nice_ceiling(4500.0), 5000.0);
        assert!((nice_ceiling(0.0032) - 0.005).abs() < 1e-12);
    }

    #[test]
    fn one_element_per_line() {
        let svg = bar_chart(&axes("Sizes"), &[3.0, 2.0, 1.0]);
        for row in svg.lines() {
            assert!(row.starts_with('<') && row.ends_with('>'), "{row:?}");
        }
        // frame: svg, background, title, 6 ticks x (grid + label), 2 axes, 3 categories, 2 labels
        assert_eq!(svg.lines().count(), 3 + 12 + 2 + 3 + 2 + 3 * 2 + 1);
    }

    #[test]
    fn text_is_escaped() {
        let svg = bar_chart(&axes("a < b & c"), &[1.0, 2.0, 3.0]);
        assert!(svg.contains("a &lt; b &amp; c"));
    }
}
