//! Plain-text renderer for applicant tracking systems.
//!
//! One fact per line, upper-case section headings, no markup. Entries are
//! selected by the variant's role tags, but the leading entries the
//! completeness checker expects are always kept.

use crate::errors::AppError;
use crate::generation::variant::Variant;
use crate::layout::LayoutLimits;
use crate::records::{Certification, Job, Personal, RecordSet, Strength};

const RULE_WIDTH: usize = 50;

fn rule() -> String {
    "-".repeat(RULE_WIDTH)
}

fn heading(lines: &mut Vec<String>, title: &str) {
    lines.push(title.to_string());
    lines.push(rule());
}

/// Renders the ATS text for one variant.
pub fn render_ats(
    records: &RecordSet,
    variant: Variant,
    limits: &LayoutLimits,
) -> Result<String, AppError> {
    let role_tags = variant.profile().ats_role_tags;
    let mut sections = vec![
        header(&records.personal, variant)?,
        summary(&records.strengths, role_tags),
        skills(records),
        strengths(&records.strengths, limits),
        experience(&records.experience, role_tags, limits),
        education(records),
    ];

    if !records.certifications.is_empty() {
        sections.push(certifications(&records.certifications, role_tags, limits));
    }

    sections.push(String::new());
    sections.push(rule());
    sections.push("This is an ATS-optimized version of my CV.".to_string());
    sections.push(
        "For a formatted PDF version, please visit my website or LinkedIn profile.".to_string(),
    );
    sections.push(String::new());

    Ok(sections.join("\n"))
}

fn header(personal: &Personal, variant: Variant) -> Result<String, AppError> {
    let tagline = personal.tagline(variant.key()).ok_or_else(|| {
        AppError::Validation(format!(
            "Missing tagline for variant '{variant}' in personal.yaml"
        ))
    })?;

    let mut lines = vec![
        personal.full_name().to_uppercase(),
        tagline.to_string(),
        String::new(),
    ];
    heading(&mut lines, "CONTACT INFORMATION");
    lines.push(format!("Email: {}", personal.email));
    lines.push(format!("Phone: {}", personal.phone));
    lines.push(format!("Location: {}", personal.location));
    lines.push(format!("LinkedIn: {}", personal.linkedin));
    lines.push(format!("GitHub: {}", personal.github));
    lines.push(format!("Website: {}", personal.website));
    lines.push(String::new());
    Ok(lines.join("\n"))
}

fn has_any(tags: &[String], wanted: &[&str]) -> bool {
    tags.iter().any(|t| wanted.contains(&t.as_str()))
}

/// First strength carrying a role tag, else the first strength.
fn summary(strengths: &[Strength], role_tags: &[&str]) -> String {
    let mut lines = Vec::new();
    heading(&mut lines, "PROFESSIONAL SUMMARY");
    let chosen = strengths
        .iter()
        .find(|s| has_any(&s.tags, role_tags))
        .or_else(|| strengths.first());
    if let Some(strength) = chosen {
        lines.push(strength.description.clone());
    }
    lines.push(String::new());
    lines.join("\n")
}

fn skills(records: &RecordSet) -> String {
    let mut lines = Vec::new();
    heading(&mut lines, "TECHNICAL SKILLS");
    for group in records.skills.groups() {
        lines.push(format!("\n{}:", group.category));
        lines.push(group.items.join(", "));
    }
    lines.push(String::new());
    lines.join("\n")
}

fn strengths(strengths: &[Strength], limits: &LayoutLimits) -> String {
    let mut lines = Vec::new();
    heading(&mut lines, "KEY STRENGTHS");
    for strength in strengths.iter().take(limits.strengths) {
        lines.push(format!("• {}", strength.title));
        lines.push(format!("  {}", strength.description));
    }
    lines.push(String::new());
    lines.join("\n")
}

/// Leading `keep` entries plus every tag-relevant entry, in record order.
/// With no relevant entry at all, `fallback` entries are shown.
fn select<'a, T>(
    items: &'a [T],
    keep: usize,
    fallback: usize,
    relevant: impl Fn(&T) -> bool,
) -> Vec<&'a T> {
    if !items.iter().any(&relevant) {
        return items.iter().take(fallback).collect();
    }
    items
        .iter()
        .enumerate()
        .filter(|(idx, item)| *idx < keep || relevant(*item))
        .map(|(_, item)| item)
        .collect()
}

fn experience(jobs: &[Job], role_tags: &[&str], limits: &LayoutLimits) -> String {
    let mut lines = Vec::new();
    heading(&mut lines, "PROFESSIONAL EXPERIENCE");

    let shown = select(jobs, limits.experience, jobs.len(), |job| {
        job.has_any_tag(role_tags)
    });
    for job in shown {
        lines.push(String::new());
        lines.push(job.title.clone());
        lines.push(format!("{} | {}", job.company, job.location));
        lines.push(format!("{} - {}", job.start_date, job.end_date));
        lines.push(String::new());
        for achievement in &job.achievements {
            lines.push(format!("• {achievement}"));
        }
    }
    lines.push(String::new());
    lines.join("\n")
}

fn education(records: &RecordSet) -> String {
    let mut lines = Vec::new();
    heading(&mut lines, "EDUCATION");
    for edu in &records.education {
        lines.push(String::new());
        lines.push(edu.degree.clone());
        if let Some(specialization) = edu.specialization.as_deref().filter(|s| !s.is_empty()) {
            lines.push(format!("Specialization: {specialization}"));
        }
        lines.push(format!("{} | {}", edu.institution, edu.location));
        lines.push(format!("{} - {}", edu.start_date, edu.end_date));
    }
    lines.push(String::new());
    lines.join("\n")
}

fn certifications(certs: &[Certification], role_tags: &[&str], limits: &LayoutLimits) -> String {
    let mut lines = Vec::new();
    heading(&mut lines, "CERTIFICATIONS");

    let fallback = limits.ats_certifications.max(limits.certifications);
    let shown = select(certs, limits.certifications, fallback, |cert| {
        has_any(&cert.tags, role_tags)
    });
    for cert in shown {
        lines.push(format!("• {}", cert.name));
        if let Some(issuer) = cert.issuer.as_deref().filter(|s| !s.is_empty()) {
            lines.push(format!("  Issued by: {issuer}"));
        }
        if let Some(date) = cert.date.as_deref().filter(|s| !s.is_empty()) {
            lines.push(format!("  Date: {date}"));
        }
    }
    lines.push(String::new());
    lines.join("\n")
}
