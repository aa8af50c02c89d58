//! Printable summaries of compiled templates.

use artist_core::DrawingTemplate;
use artist_outline::{GeometryElement, Rect, ShapeKind};
use serde::Serialize;
use std::fmt;

/// One line of `inspect` output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementSummary {
    pub index: usize,
    pub kind: ShapeKind,
    pub ops: usize,
    pub bounds: Option<Rect>,
    pub stroke_width: f32,
}

impl fmt::Display for ElementSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>3}  {:<8} ops={:<3} stroke={:<5}",
            self.index, self.kind, self.ops, self.stroke_width
        )?;
        match self.bounds {
            Some(b) => write!(
                f,
                " bounds=({:.1}, {:.1}) {:.1}x{:.1}",
                b.x, b.y, b.width, b.height
            ),
            None => f.write_str(" bounds=none"),
        }
    }
}

pub fn summarize(elements: &[GeometryElement]) -> Vec<ElementSummary> {
    elements
        .iter()
        .enumerate()
        .map(|(index, e)| ElementSummary {
            index,
            kind: e.kind,
            ops: e.path.len(),
            bounds: e.path.bounds(),
            stroke_width: e.stroke_width,
        })
        .collect()
}

/// One line of `catalog` output.
pub fn template_line(t: &DrawingTemplate) -> String {
    let icon = t.category_kind().map(|c| c.icon()).unwrap_or(" ");
    format!(
        "{icon} {:<20} {:<10} ages {:>2}-{:<2} {} elements",
        t.name,
        t.category,
        t.age_min,
        t.age_max,
        t.geometry().len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use artist_outline::scan;

    #[test]
    fn test_summarize() {
        let summary = summarize(&scan(
            r#"<rect x="10" y="20" width="30" height="40"/><line x1="0" y1="0" x2="5" y2="0"/>"#,
        ));
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].kind, ShapeKind::Rect);
        assert_eq!(summary[0].bounds, Some(Rect::new(10.0, 20.0, 30.0, 40.0)));
        assert_eq!(summary[1].ops, 2);
        assert!(summary[0].to_string().contains("bounds=(10.0, 20.0) 30.0x40.0"));
    }

    #[test]
    fn test_template_line() {
        let t = DrawingTemplate {
            id: "sun".into(),
            name: "Sun".into(),
            svg_path: r#"<circle cx="200" cy="200" r="80"/>"#.into(),
            age_min: 3,
            age_max: 8,
            category: "nature".into(),
        };
        let line = template_line(&t);
        assert!(line.starts_with("🌸 Sun"));
        assert!(line.ends_with("1 elements"));
    }
}
