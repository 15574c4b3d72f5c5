//! Fixed-appearance PDF layout: A4, half-inch margins, built-in Helvetica.
//! Section order and per-section typography mirror the single accepted
//! resume format — name 18pt bold, uppercase 12pt section headers, 10pt
//! body, experience capped at 2 bullets and projects at 3.
//!
//! Invisible skills are real text in the content stream (so ATS parsers see
//! them) rendered at sub-1pt in near-white.

use std::io::BufWriter;

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    Rgb,
};
use tracing::debug;

use super::{
    clean_bullet_text, contact_info_line, education_line, flatten, RenderError,
    MAX_EXPERIENCE_BULLETS, MAX_PROJECT_BULLETS,
};
use crate::models::resume::ResumeObject;

const PAGE_WIDTH: Mm = Mm(210.0);
const PAGE_HEIGHT: Mm = Mm(297.0);
/// 0.5 inch.
const MARGIN: Mm = Mm(12.7);

const NAME_SIZE: f32 = 18.0;
const HEADER_SIZE: f32 = 12.0;
const BODY_SIZE: f32 = 10.0;
const INVISIBLE_SIZE: f32 = 0.5;

/// Characters per wrapped body line at 10pt Helvetica across the usable width.
const BODY_WRAP: usize = 100;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    oblique: IndirectFontRef,
}

/// Cursor-based page writer. Text flows top to bottom; crossing the bottom
/// margin starts a new page.
struct PageWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    fonts: Fonts,
    y: Mm,
}

impl PageWriter {
    fn new(title: &str) -> Result<Self, RenderError> {
        let (doc, page, layer) = PdfDocument::new(title, PAGE_WIDTH, PAGE_HEIGHT, "Layer 1");
        let fonts = Fonts {
            regular: doc.add_builtin_font(BuiltinFont::Helvetica)?,
            bold: doc.add_builtin_font(BuiltinFont::HelveticaBold)?,
            oblique: doc.add_builtin_font(BuiltinFont::HelveticaOblique)?,
        };
        let layer = doc.get_page(page).get_layer(layer);
        Ok(Self {
            doc,
            layer,
            fonts,
            y: PAGE_HEIGHT - MARGIN,
        })
    }

    fn advance(&mut self, by: Mm) {
        self.y = self.y - by;
        if self.y < MARGIN {
            let (page, layer) = self.doc.add_page(PAGE_WIDTH, PAGE_HEIGHT, "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT - MARGIN;
        }
    }

    fn line(&mut self, text: &str, size: f32, font: Font) {
        // Leading proportional to the font size, in mm.
        self.advance(Mm(size * 0.42));
        let font_ref = match font {
            Font::Regular => &self.fonts.regular,
            Font::Bold => &self.fonts.bold,
            Font::Oblique => &self.fonts.oblique,
        };
        self.layer.use_text(text, size, MARGIN, self.y, font_ref);
    }

    fn wrapped(&mut self, text: &str, size: f32, font: Font) {
        for line in wrap_text(text, BODY_WRAP) {
            self.line(&line, size, font);
        }
    }

    fn section_header(&mut self, title: &str) {
        self.advance(Mm(2.0));
        self.line(&title.to_uppercase(), HEADER_SIZE, Font::Regular);
        self.advance(Mm(1.0));
    }

    fn finish(self) -> Result<Vec<u8>, RenderError> {
        let mut writer = BufWriter::new(Vec::new());
        self.doc.save(&mut writer)?;
        writer
            .into_inner()
            .map_err(|e| RenderError::Buffer(e.to_string()))
    }
}

#[derive(Clone, Copy)]
enum Font {
    Regular,
    Bold,
    Oblique,
}

/// Renders the resume to PDF bytes.
pub fn render_resume_pdf(resume: &ResumeObject) -> Result<Vec<u8>, RenderError> {
    let mut page = PageWriter::new("Resume")?;

    // Contact block.
    page.line(&flatten(&resume.contact_info.name), NAME_SIZE, Font::Bold);
    page.advance(Mm(1.5));
    page.wrapped(
        &contact_info_line(&resume.contact_info),
        BODY_SIZE,
        Font::Regular,
    );
    page.advance(Mm(3.5));

    // Summary.
    page.section_header("Professional Summary");
    if !resume.professional_summary.is_empty() {
        page.wrapped(&flatten(&resume.professional_summary), BODY_SIZE, Font::Regular);
    }
    page.advance(Mm(1.8));

    // Experience.
    page.section_header("Experience");
    for exp in &resume.experience {
        page.line(&flatten(&exp.title), BODY_SIZE, Font::Bold);
        page.line(
            &format!("{}    {}", flatten(&exp.company_location), flatten(&exp.dates)),
            BODY_SIZE,
            Font::Regular,
        );
        for bullet in exp.bullets.iter().take(MAX_EXPERIENCE_BULLETS) {
            page.wrapped(
                &format!("- {}", clean_bullet_text(bullet)),
                BODY_SIZE,
                Font::Regular,
            );
        }
        page.advance(Mm(0.7));
    }
    page.advance(Mm(1.8));

    // Projects.
    page.section_header("Projects");
    for proj in &resume.projects {
        page.line(
            &format!("{}    {}", flatten(&proj.title_and_tech), flatten(&proj.dates)),
            BODY_SIZE,
            Font::Bold,
        );
        for bullet in proj.bullets.iter().take(MAX_PROJECT_BULLETS) {
            page.wrapped(
                &format!("- {}", clean_bullet_text(bullet)),
                BODY_SIZE,
                Font::Regular,
            );
        }
        page.advance(Mm(0.7));
    }
    page.advance(Mm(1.8));

    // Skills: visible in body style, invisible in sub-1pt near-white.
    page.section_header("Skills");
    if !resume.skills_visible.is_empty() {
        page.wrapped(&flatten(&resume.skills_visible), BODY_SIZE, Font::Regular);
    }
    if !resume.skills_invisible.is_empty() {
        page.layer
            .set_fill_color(Color::Rgb(Rgb::new(0.99, 0.99, 0.99, None)));
        page.wrapped(&flatten(&resume.skills_invisible), INVISIBLE_SIZE, Font::Regular);
        page.layer
            .set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
    }
    page.advance(Mm(1.8));

    // Education.
    page.section_header("Education");
    for edu in &resume.education {
        page.line(&education_line(edu), BODY_SIZE, Font::Regular);
        if !edu.dates.is_empty() {
            page.line(&flatten(&edu.dates), BODY_SIZE, Font::Oblique);
        }
        for bullet in edu.bullets.iter().take(MAX_PROJECT_BULLETS) {
            page.wrapped(
                &format!("- {}", clean_bullet_text(bullet)),
                BODY_SIZE,
                Font::Regular,
            );
        }
        page.advance(Mm(0.7));
    }

    let bytes = page.finish()?;
    debug!(size = bytes.len(), "PDF rendered");
    Ok(bytes)
}

/// Greedy word wrap to a character budget per line.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + word.len() + 1 > max_chars {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
