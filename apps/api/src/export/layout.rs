//! Positions the text of an `ImprovedCv` on a single A4 page.
//!
//! Coordinates are in points, measured from the top-left corner of the page;
//! `baseline` is the distance from the top edge to a run's baseline. The PDF
//! writer flips the axis. Content may run past the bottom edge; the writer
//! scales the whole page down to fit.

use crate::export::font_metrics::{get_metrics, FontStyle};
use crate::models::improved_cv::{non_blank, ImprovedCv};

const MM_TO_PT: f32 = 72.0 / 25.4;

const NAME_SIZE_PT: f32 = 24.0;
const CONTACT_SIZE_PT: f32 = 9.0;
const SECTION_TITLE_SIZE_PT: f32 = 14.0;
const BODY_SIZE_PT: f32 = 10.0;
const LINE_HEIGHT: f32 = 1.4;

const SECTION_GAP_PT: f32 = 9.0;
const ENTRY_GAP_PT: f32 = 6.0;
const BULLET_INDENT_PT: f32 = 13.5;
const BULLET_GLYPH: &str = "•";

const TEXT_GRAY: f32 = 0.2;
const MUTED_GRAY: f32 = 0.33;
const TITLE_GRAY: f32 = 0.0;

/// Page size and inner padding used for export.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width_pt: f32,
    pub height_pt: f32,
    pub padding_pt: f32,
}

impl PageGeometry {
    /// A4 portrait with 12mm padding.
    pub fn a4() -> Self {
        Self {
            width_pt: 210.0 * MM_TO_PT,
            height_pt: 297.0 * MM_TO_PT,
            padding_pt: 12.0 * MM_TO_PT,
        }
    }

    pub fn content_width(&self) -> f32 {
        self.width_pt - 2.0 * self.padding_pt
    }
}

/// A single line of text at a fixed position.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub x: f32,
    pub baseline: f32,
    pub style: FontStyle,
    pub size_pt: f32,
    pub gray: f32,
}

/// A horizontal rule under the header or a section title.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule {
    pub y: f32,
    pub x_start: f32,
    pub x_end: f32,
    pub thickness: f32,
    pub gray: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutPage {
    pub geometry: PageGeometry,
    pub runs: Vec<TextRun>,
    pub rules: Vec<Rule>,
    /// Height of the laid-out content including bottom padding.
    pub content_height: f32,
}

impl LaidOutPage {
    /// Uniform factor that fits the content on one page. Never enlarges.
    pub fn scale_to_fit(&self) -> f32 {
        if self.content_height <= self.geometry.height_pt {
            1.0
        } else {
            self.geometry.height_pt / self.content_height
        }
    }
}

/// Lays out every non-empty section of `cv` in display order.
pub fn layout_cv(cv: &ImprovedCv, geometry: PageGeometry) -> LaidOutPage {
    let mut page = PageBuilder::new(geometry);

    page.header(cv);

    if !cv.summary.trim().is_empty() {
        page.section_title("Summary");
        page.paragraph(cv.summary.trim(), FontStyle::Regular, TEXT_GRAY);
        page.gap(SECTION_GAP_PT);
    }

    let skills: Vec<&str> = cv
        .skills
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if !skills.is_empty() {
        page.section_title("Skills");
        page.paragraph(&skills.join(", "), FontStyle::Regular, TEXT_GRAY);
        page.gap(SECTION_GAP_PT);
    }

    if !cv.experience.is_empty() {
        page.section_title("Experience");
        for job in &cv.experience {
            page.entry_heading(
                &job.title,
                &date_range(non_blank(&job.start_date), non_blank(&job.end_date)),
            );
            let subtitle = join_non_blank(&[Some(job.company.trim()), non_blank(&job.location)], ", ");
            page.subtitle(&subtitle);
            page.bullets(&job.bullets);
            page.gap(ENTRY_GAP_PT);
        }
        page.gap(SECTION_GAP_PT - ENTRY_GAP_PT);
    }

    if !cv.projects.is_empty() {
        page.section_title("Projects");
        for project in &cv.projects {
            let title = join_non_blank(&[Some(project.name.trim()), non_blank(&project.role)], " - ");
            page.entry_heading(&title, "");
            if let Some(technologies) = &project.technologies {
                let listed = join_non_blank(
                    &technologies.iter().map(|t| Some(t.trim())).collect::<Vec<_>>(),
                    ", ",
                );
                page.subtitle(&listed);
            }
            page.bullets(&project.bullets);
            page.gap(ENTRY_GAP_PT);
        }
        page.gap(SECTION_GAP_PT - ENTRY_GAP_PT);
    }

    if !cv.education.is_empty() {
        page.section_title("Education");
        for school in &cv.education {
            page.entry_heading(
                &school.degree,
                &date_range(non_blank(&school.start_date), non_blank(&school.end_date)),
            );
            let place = join_non_blank(
                &[Some(school.institution.trim()), non_blank(&school.location)],
                ", ",
            );
            let gpa = non_blank(&school.gpa).map(|g| format!("GPA: {g}"));
            page.subtitle(&join_non_blank(&[Some(place.as_str()), gpa.as_deref()], " - "));
            if let Some(bullets) = &school.bullets {
                page.bullets(bullets);
            }
            page.gap(ENTRY_GAP_PT);
        }
        page.gap(SECTION_GAP_PT - ENTRY_GAP_PT);
    }

    if let Some(activities) = cv.extracurriculars.as_ref().filter(|a| !a.is_empty()) {
        page.section_title("Extracurricular Activities");
        for activity in activities {
            let title = join_non_blank(&[Some(activity.name.trim()), non_blank(&activity.role)], " - ");
            page.entry_heading(&title, "");
            if let Some(bullets) = &activity.bullets {
                page.bullets(bullets);
            }
            page.gap(ENTRY_GAP_PT);
        }
    }

    page.finish()
}

fn date_range(start: Option<&str>, end: Option<&str>) -> String {
    match (start, end) {
        (Some(start), Some(end)) => format!("{start} - {end}"),
        (Some(only), None) | (None, Some(only)) => only.to_string(),
        (None, None) => String::new(),
    }
}

fn join_non_blank(parts: &[Option<&str>], separator: &str) -> String {
    parts
        .iter()
        .flatten()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

struct PageBuilder {
    geometry: PageGeometry,
    /// Top of the next line box.
    cursor: f32,
    runs: Vec<TextRun>,
    rules: Vec<Rule>,
}

impl PageBuilder {
    fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            cursor: geometry.padding_pt,
            runs: Vec::new(),
            rules: Vec::new(),
        }
    }

    fn left(&self) -> f32 {
        self.geometry.padding_pt
    }

    fn right(&self) -> f32 {
        self.geometry.width_pt - self.geometry.padding_pt
    }

    fn gap(&mut self, pt: f32) {
        self.cursor += pt;
    }

    /// Reserves one line box and returns its baseline.
    fn next_baseline(&mut self, size_pt: f32) -> f32 {
        let line_height = size_pt * LINE_HEIGHT;
        let baseline = self.cursor + (line_height + size_pt * 0.7) / 2.0;
        self.cursor += line_height;
        baseline
    }

    fn push_run(&mut self, text: String, x: f32, baseline: f32, style: FontStyle, size_pt: f32, gray: f32) {
        self.runs.push(TextRun {
            text,
            x,
            baseline,
            style,
            size_pt,
            gray,
        });
    }

    fn rule(&mut self, thickness: f32, gray: f32) {
        self.rules.push(Rule {
            y: self.cursor,
            x_start: self.left(),
            x_end: self.right(),
            thickness,
            gray,
        });
    }

    fn centered_lines(&mut self, text: &str, style: FontStyle, size_pt: f32, gray: f32) {
        let metrics = get_metrics(style);
        let width = self.geometry.content_width();
        for line in metrics.wrap(text, size_pt, width) {
            let x = self.left() + (width - metrics.measure_str(&line, size_pt)) / 2.0;
            let baseline = self.next_baseline(size_pt);
            self.push_run(line, x, baseline, style, size_pt, gray);
        }
    }

    fn header(&mut self, cv: &ImprovedCv) {
        self.centered_lines(cv.header.full_name.trim(), FontStyle::Bold, NAME_SIZE_PT, TITLE_GRAY);
        self.gap(4.0);
        let contact = cv.header.contact_parts().join(" | ");
        self.centered_lines(&contact, FontStyle::Regular, CONTACT_SIZE_PT, MUTED_GRAY);
        self.gap(7.5);
        self.rule(1.5, 0.8);
        self.gap(15.0);
    }

    fn section_title(&mut self, title: &str) {
        let baseline = self.next_baseline(SECTION_TITLE_SIZE_PT);
        let x = self.left();
        self.push_run(title.to_string(), x, baseline, FontStyle::Bold, SECTION_TITLE_SIZE_PT, TITLE_GRAY);
        self.gap(3.0);
        self.rule(0.75, 0.87);
        self.gap(6.0);
    }

    fn paragraph(&mut self, text: &str, style: FontStyle, gray: f32) {
        self.wrapped(text, style, gray, self.left(), self.geometry.content_width());
    }

    fn wrapped(&mut self, text: &str, style: FontStyle, gray: f32, x: f32, width: f32) {
        for line in get_metrics(style).wrap(text, BODY_SIZE_PT, width) {
            let baseline = self.next_baseline(BODY_SIZE_PT);
            self.push_run(line, x, baseline, style, BODY_SIZE_PT, gray);
        }
    }

    /// Bold title on the left, dates right-aligned on the first line.
    fn entry_heading(&mut self, title: &str, dates: &str) {
        let metrics = get_metrics(FontStyle::Bold);
        let dates_width = metrics.measure_str(dates, BODY_SIZE_PT);
        let title_width = if dates.is_empty() {
            self.geometry.content_width()
        } else {
            self.geometry.content_width() - dates_width - BODY_SIZE_PT
        };

        let lines = metrics.wrap(title, BODY_SIZE_PT, title_width.max(BODY_SIZE_PT));
        if lines.is_empty() && dates.is_empty() {
            return;
        }
        let first_baseline = self.cursor + (BODY_SIZE_PT * LINE_HEIGHT + BODY_SIZE_PT * 0.7) / 2.0;
        for line in lines {
            let baseline = self.next_baseline(BODY_SIZE_PT);
            let x = self.left();
            self.push_run(line, x, baseline, FontStyle::Bold, BODY_SIZE_PT, TEXT_GRAY);
        }
        if !dates.is_empty() {
            if self.cursor < first_baseline {
                self.next_baseline(BODY_SIZE_PT);
            }
            let x = self.right() - dates_width;
            self.push_run(dates.to_string(), x, first_baseline, FontStyle::Bold, BODY_SIZE_PT, MUTED_GRAY);
        }
    }

    fn subtitle(&mut self, text: &str) {
        if !text.is_empty() {
            self.paragraph(text, FontStyle::Oblique, MUTED_GRAY);
        }
    }

    fn bullets(&mut self, bullets: &[String]) {
        let text_x = self.left() + BULLET_INDENT_PT;
        let width = self.geometry.content_width() - BULLET_INDENT_PT;
        for bullet in bullets.iter().map(|b| b.trim()).filter(|b| !b.is_empty()) {
            let first_run = self.runs.len();
            self.wrapped(bullet, FontStyle::Regular, TEXT_GRAY, text_x, width);
            if let Some(first_baseline) = self.runs.get(first_run).map(|r| r.baseline) {
                let glyph_x = self.left() + BULLET_INDENT_PT / 3.0;
                self.push_run(
                    BULLET_GLYPH.to_string(),
                    glyph_x,
                    first_baseline,
                    FontStyle::Regular,
                    BODY_SIZE_PT,
                    TEXT_GRAY,
                );
            }
        }
    }

    fn finish(self) -> LaidOutPage {
        LaidOutPage {
            geometry: self.geometry,
            content_height: self.cursor + self.geometry.padding_pt,
            runs: self.runs,
            rules: self.rules,
        }
    }
}
