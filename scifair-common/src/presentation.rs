//! Presentation slides for a project
//!
//! Slides are plain data so any front end can draw them. The printable HTML
//! rendering lays out one landscape page per slide; printing it (or feeding
//! it to an HTML-to-PDF renderer) yields the multi-page PDF handout.

use crate::models::Project;
use serde::Serialize;
use std::fmt::Write;

/// One slide of the presentation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slide {
    pub id: &'static str,
    pub title: String,
    pub body: SlideBody,
}

/// Slide content
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlideBody {
    Cover { subtitle: String },
    Text { heading: String, text: String },
    List { heading: String, items: Vec<String> },
    Measurements { heading: String, rows: Vec<(String, f64)> },
    Progress { heading: String, percent: f64, status_label: String },
}

/// Build the slide deck for `project`
pub fn slides(project: &Project) -> Vec<Slide> {
    vec![
        Slide {
            id: "title",
            title: project.title.clone(),
            body: SlideBody::Cover {
                subtitle: project.description.clone(),
            },
        },
        Slide {
            id: "hypothesis",
            title: "Hypothesis".to_string(),
            body: SlideBody::Text {
                heading: "Research Hypothesis".to_string(),
                text: project.hypothesis.clone().unwrap_or_default(),
            },
        },
        Slide {
            id: "materials",
            title: "Materials".to_string(),
            body: SlideBody::List {
                heading: "Required Materials".to_string(),
                items: project.materials.clone(),
            },
        },
        Slide {
            id: "observations",
            title: "Observations".to_string(),
            body: SlideBody::List {
                heading: "Lab Notes".to_string(),
                items: project.observation_notes.clone(),
            },
        },
        Slide {
            id: "results",
            title: "Results".to_string(),
            body: SlideBody::Measurements {
                heading: "Experiment Results".to_string(),
                rows: project
                    .experiment_results
                    .iter()
                    .map(|(name, value)| (name.clone(), *value))
                    .collect(),
            },
        },
        Slide {
            id: "progress",
            title: "Project Progress".to_string(),
            body: SlideBody::Progress {
                heading: "Current Progress".to_string(),
                percent: project.status.progress(),
                status_label: project.status.label().to_string(),
            },
        },
    ]
}

const PRINT_CSS: &str = r#"
@page { size: landscape; margin: 1.5cm; }
body { font-family: sans-serif; margin: 0; }
section.slide { page-break-after: always; break-after: page; min-height: 90vh; padding: 2rem; box-sizing: border-box; }
section.slide:last-child { page-break-after: auto; break-after: auto; }
section.cover { display: flex; flex-direction: column; justify-content: center; text-align: center; }
h1 { font-size: 2.5rem; }
h2 { font-size: 1.75rem; }
.box { background: #f1f5f9; border-radius: 0.5rem; padding: 1.5rem; font-size: 1.25rem; }
.bar { background: #e2e8f0; border-radius: 0.5rem; height: 1.5rem; overflow: hidden; }
.bar > div { background: #2563eb; height: 100%; }
table { border-collapse: collapse; font-size: 1.25rem; }
td, th { border: 1px solid #cbd5e1; padding: 0.5rem 1rem; text-align: left; }
"#;

/// Render a printable HTML document, one landscape page per slide
pub fn render_printable_html(project: &Project, slides: &[Slide]) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{}</title>", escape_html(&project.title));
    let _ = writeln!(html, "<style>{}</style>", PRINT_CSS);
    html.push_str("</head>\n<body>\n");

    for slide in slides {
        render_slide(&mut html, slide);
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn render_slide(html: &mut String, slide: &Slide) {
    match &slide.body {
        SlideBody::Cover { subtitle } => {
            let _ = writeln!(
                html,
                "<section class=\"slide cover\" id=\"{}\"><h1>{}</h1><p>{}</p></section>",
                slide.id,
                escape_html(&slide.title),
                escape_html(subtitle)
            );
        }
        SlideBody::Text { heading, text } => {
            let _ = writeln!(
                html,
                "<section class=\"slide\" id=\"{}\"><h2>{}</h2><div class=\"box\">{}</div></section>",
                slide.id,
                escape_html(heading),
                escape_html(text)
            );
        }
        SlideBody::List { heading, items } => {
            let _ = write!(
                html,
                "<section class=\"slide\" id=\"{}\"><h2>{}</h2><ul>",
                slide.id,
                escape_html(heading)
            );
            for item in items {
                let _ = write!(html, "<li>{}</li>", escape_html(item));
            }
            html.push_str("</ul></section>\n");
        }
        SlideBody::Measurements { heading, rows } => {
            let _ = write!(
                html,
                "<section class=\"slide\" id=\"{}\"><h2>{}</h2><table><tr><th>Measurement</th><th>Value</th></tr>",
                slide.id,
                escape_html(heading)
            );
            for (name, value) in rows {
                let _ = write!(html, "<tr><td>{}</td><td>{}</td></tr>", escape_html(name), value);
            }
            html.push_str("</table></section>\n");
        }
        SlideBody::Progress { heading, percent, status_label } => {
            let _ = writeln!(
                html,
                "<section class=\"slide\" id=\"{}\"><h2>{}</h2><div class=\"bar\"><div style=\"width: {:.1}%\"></div></div><p>Project Status: {}</p></section>",
                slide.id,
                escape_html(heading),
                percent,
                escape_html(status_label)
            );
        }
    }
}

/// Minimal HTML text escaping
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
