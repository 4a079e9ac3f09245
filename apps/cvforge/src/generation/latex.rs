//! altacv LaTeX renderer.
//!
//! Two columns: profile and experience on the left, strengths, skills,
//! education and certifications in the sidebar. Every truncation reads from
//! `LayoutLimits`, the same table the completeness checker uses.

use tracing::{debug, warn};

use crate::errors::AppError;
use crate::generation::escape::escape_latex;
use crate::generation::templates::{preamble, DOCUMENT_END};
use crate::generation::variant::{
    SkillHeading, Variant, VariantProfile, EXPERTISE_SKILLS, ML_SKILLS, PROGRAMMING_SKILLS,
};
use crate::layout::LayoutLimits;
use crate::records::{Job, Personal, RecordSet};

/// Renders a complete LaTeX document for one variant.
pub fn render_latex(
    records: &RecordSet,
    variant: Variant,
    limits: &LayoutLimits,
) -> Result<String, AppError> {
    let profile = variant.profile();
    let mut doc = preamble(profile);

    doc.push_str(&header(&records.personal, variant)?);
    doc.push_str("\\makecvheader\n\n");
    doc.push_str("\\columnratio{0.6}\n\n");
    doc.push_str("\\begin{paracol}{2}\n\n");

    profile_section(&mut doc, records, profile);
    experience_sections(&mut doc, records, profile, limits);

    doc.push_str("\\switchcolumn\n\n");

    strengths_section(&mut doc, records, profile, limits);
    skills_sections(&mut doc, records, profile);
    education_section(&mut doc, records, profile);
    certifications_section(&mut doc, records, limits);

    doc.push_str(DOCUMENT_END);

    validate_document(&doc)?;
    Ok(doc)
}

/// Rejects output that could not possibly compile.
fn validate_document(doc: &str) -> Result<(), AppError> {
    if doc.trim().is_empty() {
        return Err(AppError::Render("generated LaTeX output is empty".into()));
    }
    if !doc.contains("\\begin{document}") || !doc.contains("\\end{document}") {
        return Err(AppError::Render(
            "generated LaTeX is missing document markers".into(),
        ));
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Header
// ────────────────────────────────────────────────────────────────────────────

fn header(personal: &Personal, variant: Variant) -> Result<String, AppError> {
    let tagline = personal.tagline(variant.key()).ok_or_else(|| {
        AppError::Validation(format!(
            "Missing tagline for variant '{variant}' in personal.yaml"
        ))
    })?;

    let mut out = String::new();
    out.push_str(&format!(
        "\\name{{{} {}}}\n",
        escape_latex(&personal.first_name),
        escape_latex(&personal.last_name)
    ));
    out.push_str(&format!("\\tagline{{{}}}\n\n", escape_latex(tagline)));

    out.push_str("\\personalinfo{%\n");
    out.push_str(&format!("  \\email{{{}}}\n", escape_latex(&personal.email)));
    out.push_str(&format!("  \\phone{{{}}}\n", escape_latex(&personal.phone)));
    out.push_str(&format!("  \\location{{{}}}\n", escape_latex(&personal.location)));
    out.push_str(&format!(
        "  \\homepage{{{}}}\n",
        escape_latex(&homepage(&personal.website))
    ));
    out.push_str(&format!(
        "  \\linkedin{{{}}}\n",
        escape_latex(&linkedin_id(&personal.linkedin))
    ));
    out.push_str(&format!(
        "  \\github{{{}}}\n",
        escape_latex(&github_user(&personal.github))
    ));
    out.push_str("}\n\n");
    Ok(out)
}

fn homepage(url: &str) -> String {
    url.replace("https://", "").replace("http://", "")
}

fn linkedin_id(url: &str) -> String {
    url.replace("https://www.linkedin.com/in/", "")
        .replace("https://linkedin.com/in/", "")
        .replace('/', "")
}

fn github_user(url: &str) -> String {
    url.replace("https://github.com/", "").replace('/', "")
}

// ────────────────────────────────────────────────────────────────────────────
// Main column
// ────────────────────────────────────────────────────────────────────────────

fn profile_section(doc: &mut String, records: &RecordSet, profile: &VariantProfile) {
    let Some(first) = records.strengths.first() else {
        warn!("No strengths recorded, skipping profile section");
        return;
    };

    doc.push_str(&format!("\\cvsection{{{}}}\n\n", profile.profile_title));
    if profile.profile_shows_title {
        doc.push_str(&format!("\\textbf{{{}}}\n\n", escape_latex(&first.title)));
    }
    doc.push_str(&format!("{}\n\n", escape_latex(&first.description)));
    doc.push_str("\\medskip\n\n");
}

/// Jobs placed in the primary and leadership experience sections.
#[derive(Debug, Default)]
pub struct ExperienceLayout<'a> {
    pub primary: Vec<&'a Job>,
    pub leadership: Vec<&'a Job>,
}

/// Splits experience records between the two sections, in record order.
///
/// The leading `limits.experience` records are always shown: each goes to the
/// leadership section when it carries only leadership tags, otherwise to the
/// primary section. Remaining slots are filled from later tag-matched records.
pub fn experience_layout<'a>(
    records: &'a RecordSet,
    profile: &VariantProfile,
    limits: &LayoutLimits,
) -> ExperienceLayout<'a> {
    let is_primary = |job: &Job| {
        job.has_any_tag(profile.primary_tags) && !job.has_any_tag(profile.primary_excluded_tags)
    };
    let is_leadership = |job: &Job| job.has_any_tag(profile.leadership_tags) && !is_primary(job);

    let mut layout = ExperienceLayout::default();
    for (idx, job) in records.experience.iter().enumerate() {
        if idx < limits.experience {
            if is_leadership(job) {
                layout.leadership.push(job);
            } else {
                layout.primary.push(job);
            }
        } else if is_primary(job) {
            if layout.primary.len() < limits.experience {
                layout.primary.push(job);
            }
        } else if is_leadership(job) && layout.leadership.len() < limits.leadership_entries {
            layout.leadership.push(job);
        }
    }
    layout
}

fn experience_sections(
    doc: &mut String,
    records: &RecordSet,
    profile: &VariantProfile,
    limits: &LayoutLimits,
) {
    let ExperienceLayout {
        primary,
        leadership,
    } = experience_layout(records, profile, limits);

    doc.push_str(&format!("\\cvsection{{{}}}\n\n", profile.primary_title));
    for job in &primary {
        push_event(doc, job, limits.achievements_per_job.max(1));
        doc.push_str("\\divider\n\n");
    }

    doc.push_str(&format!("\\cvsection{{{}}}\n\n", profile.leadership_title));
    for (idx, job) in leadership.iter().enumerate() {
        push_event(doc, job, limits.leadership_achievements.max(1));
        if idx + 1 < leadership.len() {
            doc.push_str("\\divider\n\n");
        }
    }

    debug!(
        primary = primary.len(),
        leadership = leadership.len(),
        "Experience sections rendered"
    );
}

fn push_event(doc: &mut String, job: &Job, achievements: usize) {
    doc.push_str(&format!(
        "\\cvevent{{{}}}{{{}}}{{{}}}{{{}}}\n",
        escape_latex(&job.title),
        escape_latex(&job.company),
        date_range(&job.start_date, &job.end_date),
        escape_latex(&job.location)
    ));
    doc.push_str("\\begin{itemize}\n");
    for achievement in job.achievements.iter().take(achievements) {
        doc.push_str(&format!("\\item {}\n", escape_latex(achievement)));
    }
    doc.push_str("\\end{itemize}\n\n");
}

fn date_range(start: &str, end: &str) -> String {
    format!("{}--{}", escape_latex(start), escape_latex(end))
}

// ────────────────────────────────────────────────────────────────────────────
// Sidebar
// ────────────────────────────────────────────────────────────────────────────

fn strengths_section(
    doc: &mut String,
    records: &RecordSet,
    profile: &VariantProfile,
    limits: &LayoutLimits,
) {
    doc.push_str(&format!("\\cvsection{{{}}}\n\n", profile.strengths_title));
    let shown: Vec<_> = records.strengths.iter().take(limits.strengths).collect();
    for (idx, strength) in shown.iter().enumerate() {
        doc.push_str(&format!(
            "\\cvachievement{{{}}}{{{}}}{{{}}}\n\n",
            profile.strength_icon,
            escape_latex(&strength.title),
            escape_latex(&strength.description)
        ));
        if idx + 1 < shown.len() {
            doc.push_str("\\divider\n\n");
        }
    }
}

fn push_tags(doc: &mut String, records: &RecordSet, category: &str) {
    match records.skills.get(category) {
        Some(items) => {
            for item in items {
                doc.push_str(&format!("\\cvtag{{{}}}\n", escape_latex(item)));
            }
        }
        None => warn!(category, "Skill category not found, skipping"),
    }
}

fn skills_sections(doc: &mut String, records: &RecordSet, profile: &VariantProfile) {
    doc.push_str(&format!("\\cvsection{{{}}}\n\n", profile.expertise_title));
    push_tags(doc, records, EXPERTISE_SKILLS);

    match profile.computation_heading {
        SkillHeading::Section(title) => {
            doc.push_str("\n\\divider\\medskip\n\n");
            doc.push_str(&format!("\\cvsection{{{title}}}\n\n"));
        }
        SkillHeading::Inline(title) => {
            doc.push_str("\n\\divider\\smallskip\n\n");
            doc.push_str(&format!("\\textbf{{{title}}}\n\n"));
        }
    }
    push_tags(doc, records, ML_SKILLS);
    doc.push_str("\n\\divider\\smallskip\n\n");
    push_tags(doc, records, PROGRAMMING_SKILLS);
}

fn education_section(doc: &mut String, records: &RecordSet, profile: &VariantProfile) {
    doc.push_str("\n\\cvsection{Education}\n\n");
    for edu in &records.education {
        let mut degree = escape_latex(&edu.degree);
        if profile.education_specialization {
            if let Some(specialization) = edu.specialization.as_deref().filter(|s| !s.is_empty()) {
                degree.push_str(&format!(" ({})", escape_latex(specialization)));
            }
        }
        doc.push_str(&format!(
            "\\cvevent{{{}}}{{{}}}{{{}}}{{{}}}\n\n",
            degree,
            escape_latex(&edu.institution),
            date_range(&edu.start_date, &edu.end_date),
            escape_latex(&edu.location)
        ));
        if let Some(notes) = edu.notes.as_deref().filter(|n| !n.is_empty()) {
            doc.push_str(&format!("{}\n\n", escape_latex(notes)));
        }
    }
}

fn certifications_section(doc: &mut String, records: &RecordSet, limits: &LayoutLimits) {
    doc.push_str("\\cvsection{Certifications}\n\n");
    for cert in records.certifications.iter().take(limits.certifications) {
        doc.push_str(&format!("\\cvtag{{{}}}\n", escape_latex(&cert.name)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::fixtures::sample_records;
    use crate::verify::check_text;

    fn render(variant: Variant) -> String {
        render_latex(&sample_records(), variant, &LayoutLimits::default()).unwrap()
    }

    #[test]
    fn test_document_has_markers_and_header() {
        let doc = render(Variant::IndustrialScientist);
        assert!(doc.starts_with("\\documentclass[10pt,a4paper,withhyper]{altacv}"));
        assert!(doc.contains("\\begin{document}"));
        assert!(doc.trim_end().ends_with("\\end{document}"));
        assert!(doc.contains("\\name{Ada Lovelace}"));
        assert!(doc.contains("\\tagline{Nanoscience Innovation for Industrial Materials}"));
        assert!(doc.contains("\\homepage{ada.example.org}"));
        assert!(doc.contains("\\linkedin{ada-lovelace}"));
        assert!(doc.contains("\\github{ada-l}"));
    }

    #[test]
    fn test_special_characters_are_escaped() {
        let doc = render(Variant::AcademicResearcher);
        assert!(doc.contains("\\tagline{Scattering Physicist \\& Research Software Engineer}"));
        assert!(doc.contains("\\cvevent{Senior Research Scientist}{Analytical Engines R\\&D Ltd}"));
        assert!(doc.contains("setup time by 40\\%"));
        assert!(doc.contains("\\cvtag{C++}"));
    }

    #[test]
    fn test_variant_profiles_differ() {
        let industrial = render(Variant::IndustrialScientist);
        let academic = render(Variant::AcademicResearcher);

        assert!(industrial.contains("\\colorlet{name}{EnergeticOrange}"));
        assert!(industrial.contains("\\cvsection{Scientific Profile}"));
        assert!(industrial.contains("\\textbf{Cross-Functional Leadership}"));
        assert!(industrial.contains("\\cvachievement{\\faTrophy}"));
        assert!(industrial.contains("PhD in Physics (Soft Matter)"));
        assert!(industrial.contains("\\cvsection{Computation \\& ML}"));

        assert!(academic.contains("\\colorlet{name}{SlateGrey}"));
        assert!(academic.contains("\\renewcommand{\\personalinfofont}{\\footnotesize\\ttfamily}"));
        assert!(academic.contains("\\cvsection{Technical Profile}"));
        assert!(!academic.contains("\\textbf{Cross-Functional Leadership}"));
        assert!(academic.contains("\\cvachievement{\\faCogs}"));
        assert!(!academic.contains("(Soft Matter)"));
        assert!(academic.contains("\\textbf{Computational \\& ML Stack}"));
    }

    #[test]
    fn test_truncation_follows_limits() {
        let doc = render(Variant::IndustrialScientist);
        // 3 primary + 2 leadership entries, 2 education entries.
        assert_eq!(doc.matches("\\cvevent{").count(), 7);
        assert_eq!(doc.matches("\\cvachievement{").count(), 3);
        assert!(!doc.contains("Grant Writing"));
        // 4 of 5 certifications.
        assert!(doc.contains("\\cvtag{Prince2 Foundation}"));
        assert!(!doc.contains("Laser Safety Officer"));
        // Leadership bullets capped at 2, primary at 4.
        assert!(doc.contains("\\item Mentored 4 graduate researchers"));
    }

    #[test]
    fn test_dividers_only_between_strengths() {
        let doc = render(Variant::AcademicResearcher);
        let start = doc.find("\\cvsection{Core Competencies}").unwrap();
        let end = doc.find("\\cvsection{Scattering Expertise}").unwrap();
        assert_eq!(doc[start..end].matches("\\divider").count(), 2);
    }

    #[test]
    fn test_missing_tagline_is_validation_error() {
        let mut records = sample_records();
        records.personal.taglines.remove("academic-researcher");
        let err = render_latex(&records, Variant::AcademicResearcher, &LayoutLimits::default())
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.to_string().contains("academic-researcher"));
    }

    #[test]
    fn test_missing_skill_category_is_skipped() {
        let mut records = sample_records();
        records.skills = crate::records::SkillCatalog::default();
        let doc = render_latex(&records, Variant::IndustrialScientist, &LayoutLimits::default())
            .unwrap();
        assert!(!doc.contains("\\cvtag{Python}"));
        assert!(doc.contains("\\end{document}"));
    }

    #[test]
    fn test_experience_layout_respects_tag_filters() {
        let records = sample_records();
        let limits = LayoutLimits::default();
        let industrial = experience_layout(&records, Variant::IndustrialScientist.profile(), &limits);
        assert_eq!(industrial.primary.len(), 3);
        assert!(industrial.primary.iter().all(|j| !j.has_tag("leadership")));

        let academic = experience_layout(&records, Variant::AcademicResearcher.profile(), &limits);
        let titles: Vec<_> = academic.leadership.iter().map(|j| j.title.as_str()).collect();
        assert_eq!(titles, ["Outreach Chair", "Trustee"]);
    }

    #[test]
    fn test_untagged_lead_job_is_still_rendered() {
        let mut records = sample_records();
        records.experience[0].tags = vec!["consulting".into()];
        let doc = render_latex(&records, Variant::IndustrialScientist, &LayoutLimits::default())
            .unwrap();
        assert!(doc.contains("\\cvevent{Senior Research Scientist}{Analytical Engines R\\&D Ltd}"));
        assert!(doc.contains("\\item Designed"));
    }

    #[test]
    fn test_leadership_only_lead_job_moves_to_leadership_section() {
        let mut records = sample_records();
        records.experience[0].tags = vec!["trust".into()];
        let limits = LayoutLimits::default();
        let layout = experience_layout(&records, Variant::IndustrialScientist.profile(), &limits);
        let primary: Vec<_> = layout.primary.iter().map(|j| j.title.as_str()).collect();
        let leadership: Vec<_> = layout.leadership.iter().map(|j| j.title.as_str()).collect();
        assert_eq!(primary, ["Postdoctoral Researcher", "Beamline Scientist"]);
        assert_eq!(leadership, ["Senior Research Scientist", "Outreach Chair"]);
    }

    /// Undoes the single-character escapes so record text reads as written.
    fn plain_text(doc: &str) -> String {
        ["&", "%", "$", "#", "_", "{", "}"]
            .into_iter()
            .fold(doc.to_string(), |text, ch| text.replace(&format!("\\{ch}"), ch))
    }

    #[test]
    fn test_rendered_latex_passes_completeness_check() {
        let limits = LayoutLimits::default();
        let mut untagged_lead = sample_records();
        untagged_lead.experience[0].tags.clear();
        let mut leadership_lead = sample_records();
        leadership_lead.experience[0].tags = vec!["leadership".into()];

        for records in [sample_records(), untagged_lead, leadership_lead] {
            for variant in Variant::ALL {
                let doc = render_latex(&records, variant, &limits).unwrap();
                let verdict = check_text(&records, variant.key(), &plain_text(&doc), &limits);
                assert!(
                    verdict.passed,
                    "{variant}: {:?}",
                    verdict.issues().collect::<Vec<_>>()
                );
            }
        }
    }

    #[test]
    fn test_url_helpers() {
        assert_eq!(homepage("http://example.org"), "example.org");
        assert_eq!(linkedin_id("https://linkedin.com/in/someone/"), "someone");
        assert_eq!(github_user("https://github.com/someone"), "someone");
    }
}
