//! Editable DOCX layout — the visual twin of the PDF renderer. Same A4 page,
//! half-inch margins, Helvetica, section order, and bullet caps; Word owns
//! line wrapping, so there is no wrap pass here.
//!
//! Invisible skills are a real text run (so ATS parsers index them) at 1pt in
//! near-white.

use std::io::Cursor;

use docx_rs::{Docx, PageMargin, Paragraph, Run, RunFonts};
use tracing::debug;

use super::{
    clean_bullet_text, contact_info_line, education_line, flatten, RenderError,
    MAX_EXPERIENCE_BULLETS, MAX_PROJECT_BULLETS,
};
use crate::models::resume::ResumeObject;

// Run sizes are half-points.
const NAME_SIZE: usize = 36;
const HEADER_SIZE: usize = 24;
const BODY_SIZE: usize = 20;
const INVISIBLE_SIZE: usize = 2;

const INVISIBLE_COLOR: &str = "FCFCFC";

/// A4 in twentieths of a point.
const PAGE_WIDTH: u32 = 11906;
const PAGE_HEIGHT: u32 = 16838;
/// 0.5 inch.
const MARGIN: i32 = 720;

const FONT: &str = "Helvetica";

fn run(text: &str, size: usize) -> Run {
    Run::new()
        .add_text(flatten(text))
        .size(size)
        .fonts(RunFonts::new().ascii(FONT))
}

fn body(text: &str) -> Paragraph {
    Paragraph::new().add_run(run(text, BODY_SIZE))
}

fn bullet(text: &str) -> Paragraph {
    body(&format!("- {}", clean_bullet_text(text)))
}

fn section_header(title: &str) -> Paragraph {
    Paragraph::new().add_run(run(&title.to_uppercase(), HEADER_SIZE))
}

/// Renders the resume to DOCX bytes.
pub fn render_resume_docx(resume: &ResumeObject) -> Result<Vec<u8>, RenderError> {
    let mut doc = Docx::new().page_size(PAGE_WIDTH, PAGE_HEIGHT).page_margin(
        PageMargin::new()
            .top(MARGIN)
            .bottom(MARGIN)
            .left(MARGIN)
            .right(MARGIN),
    );

    // Contact block.
    doc = doc.add_paragraph(
        Paragraph::new().add_run(run(&resume.contact_info.name, NAME_SIZE).bold()),
    );
    doc = doc.add_paragraph(body(&contact_info_line(&resume.contact_info)));

    doc = doc.add_paragraph(section_header("Professional Summary"));
    if !resume.professional_summary.is_empty() {
        doc = doc.add_paragraph(body(&resume.professional_summary));
    }

    doc = doc.add_paragraph(section_header("Experience"));
    for exp in &resume.experience {
        doc = doc.add_paragraph(Paragraph::new().add_run(run(&exp.title, BODY_SIZE).bold()));
        doc = doc.add_paragraph(
            Paragraph::new()
                .add_run(run(&exp.company_location, BODY_SIZE))
                .add_run(run(" | ", BODY_SIZE))
                .add_run(run(&exp.dates, BODY_SIZE).italic()),
        );
        for text in exp.bullets.iter().take(MAX_EXPERIENCE_BULLETS) {
            doc = doc.add_paragraph(bullet(text));
        }
    }

    doc = doc.add_paragraph(section_header("Projects"));
    for proj in &resume.projects {
        doc = doc.add_paragraph(
            Paragraph::new()
                .add_run(run(&proj.title_and_tech, BODY_SIZE).bold())
                .add_run(run(" | ", BODY_SIZE))
                .add_run(run(&proj.dates, BODY_SIZE).italic()),
        );
        for text in proj.bullets.iter().take(MAX_PROJECT_BULLETS) {
            doc = doc.add_paragraph(bullet(text));
        }
    }

    // Skills: visible in body style, invisible at 1pt near-white.
    doc = doc.add_paragraph(section_header("Skills"));
    if !resume.skills_visible.is_empty() {
        doc = doc.add_paragraph(body(&resume.skills_visible));
    }
    if !resume.skills_invisible.is_empty() {
        doc = doc.add_paragraph(
            Paragraph::new()
                .add_run(run(&resume.skills_invisible, INVISIBLE_SIZE).color(INVISIBLE_COLOR)),
        );
    }

    doc = doc.add_paragraph(section_header("Education"));
    for edu in &resume.education {
        doc = doc.add_paragraph(body(&education_line(edu)));
        if !edu.dates.is_empty() {
            doc = doc.add_paragraph(Paragraph::new().add_run(run(&edu.dates, BODY_SIZE).italic()));
        }
        for text in edu.bullets.iter().take(MAX_PROJECT_BULLETS) {
            doc = doc.add_paragraph(bullet(text));
        }
    }

    let mut cursor = Cursor::new(Vec::new());
    doc.build()
        .pack(&mut cursor)
        .map_err(|e| RenderError::Buffer(e.to_string()))?;
    let bytes = cursor.into_inner();
    debug!(size = bytes.len(), "DOCX rendered");
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{ContactInfo, EducationEntry, ExperienceEntry};

    fn sample_resume() -> ResumeObject {
        ResumeObject {
            contact_info: ContactInfo {
                name: "Ada Lovelace".to_string(),
                contact_line: "ada@example.com | https://github.com/ada".to_string(),
                location: "Address: London, UK".to_string(),
            },
            professional_summary: "Entry-Level analyst targeting Acme.".to_string(),
            experience: vec![ExperienceEntry {
                title: "Analyst".to_string(),
                company_location: "Acme, London".to_string(),
                dates: "Jan 2024 - Present".to_string(),
                bullets: vec!["- Did a thing, improving X by 10%".to_string()],
            }],
            skills_visible: "SQL, Python".to_string(),
            skills_invisible: "Firebase, Mixpanel".to_string(),
            education: vec![EducationEntry {
                degree: "BSc Mathematics".to_string(),
                institution_and_dates: "UCL, London Sep 2020 - Jun 2023".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_render_produces_a_docx_package() {
        let bytes = render_resume_docx(&sample_resume()).unwrap();
        // OOXML is a zip container.
        assert!(bytes.starts_with(b"PK\x03\x04"));
        assert!(bytes.len() > 500);
    }

    #[test]
    fn test_render_empty_resume_does_not_fail() {
        let bytes = render_resume_docx(&ResumeObject::default()).unwrap();
        assert!(bytes.starts_with(b"PK\x03\x04"));
    }
}
