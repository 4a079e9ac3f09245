//! CV variants and their per-variant presentation profile.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// The known CV variants. The kebab-case key doubles as the tagline key in
/// `personal.yaml` and as the output file stem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    IndustrialScientist,
    AcademicResearcher,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::IndustrialScientist, Variant::AcademicResearcher];

    pub fn key(&self) -> &'static str {
        match self {
            Variant::IndustrialScientist => "industrial-scientist",
            Variant::AcademicResearcher => "academic-researcher",
        }
    }

    pub fn all_keys() -> Vec<String> {
        Self::ALL.iter().map(|v| v.key().to_string()).collect()
    }

    pub fn profile(&self) -> &'static VariantProfile {
        match self {
            Variant::IndustrialScientist => &INDUSTRIAL_SCIENTIST,
            Variant::AcademicResearcher => &ACADEMIC_RESEARCHER,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Variant {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variant::ALL
            .into_iter()
            .find(|v| v.key() == s)
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "Unknown variant '{s}'. Known variants: {}",
                    Variant::all_keys().join(", ")
                ))
            })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Profiles
// ────────────────────────────────────────────────────────────────────────────

/// How the computation/ML skill block is introduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillHeading {
    /// A full `\cvsection`.
    Section(&'static str),
    /// A bold run-in heading inside the expertise section.
    Inline(&'static str),
}

/// Presentation choices for one variant. Section titles are raw LaTeX.
#[derive(Debug)]
pub struct VariantProfile {
    /// Font commands for XeLaTeX/LuaLaTeX (`\iftutex` branch).
    pub tutex_fonts: &'static str,
    /// Font packages for pdfLaTeX.
    pub fallback_fonts: &'static str,
    /// `\definecolor` / `\colorlet` block.
    pub palette: &'static str,
    pub personal_info_font: &'static str,
    pub section_font: &'static str,
    pub subsection_font: &'static str,

    pub profile_title: &'static str,
    /// Print the first strength's title above its description.
    pub profile_shows_title: bool,

    pub primary_title: &'static str,
    /// A job is primary if it carries any of these tags…
    pub primary_tags: &'static [&'static str],
    /// …and none of these.
    pub primary_excluded_tags: &'static [&'static str],

    pub leadership_title: &'static str,
    pub leadership_tags: &'static [&'static str],

    pub strengths_title: &'static str,
    pub strength_icon: &'static str,

    pub expertise_title: &'static str,
    pub computation_heading: SkillHeading,
    pub education_specialization: bool,

    /// Tags that make an entry relevant in the ATS text.
    pub ats_role_tags: &'static [&'static str],
}

pub const EXPERTISE_SKILLS: &str = "Scientific Expertise";
pub const ML_SKILLS: &str = "Machine Learning & Statistics";
pub const PROGRAMMING_SKILLS: &str = "Programming & Computation";

static INDUSTRIAL_SCIENTIST: VariantProfile = VariantProfile {
    tutex_fonts: "  \\setmainfont{Roboto Slab}\n  \\setsansfont{Lato}",
    fallback_fonts: "  \\usepackage[rm]{roboto}\n  \\usepackage[defaultsans]{lato}",
    palette: r"% Industrial scientist: innovation and creativity
\definecolor{SlateGrey}{HTML}{2E2E2E}
\definecolor{LightGrey}{HTML}{666666}
\definecolor{EnergeticOrange}{HTML}{ff6b35}
\definecolor{FriendlyTeal}{HTML}{00d9ff}
\definecolor{CommunityPurple}{HTML}{7c3aed}
\colorlet{name}{EnergeticOrange}
\colorlet{tagline}{CommunityPurple}
\colorlet{heading}{EnergeticOrange}
\colorlet{headingrule}{FriendlyTeal}
\colorlet{subheading}{CommunityPurple}
\colorlet{accent}{FriendlyTeal}
\colorlet{emphasis}{SlateGrey}
\colorlet{body}{LightGrey}",
    personal_info_font: r"\small",
    section_font: r"\Large\sffamily\bfseries",
    subsection_font: r"\large\sffamily",
    profile_title: "Scientific Profile",
    profile_shows_title: true,
    primary_title: r"Research \& Projects",
    primary_tags: &["academic-researcher", "industrial-scientist"],
    primary_excluded_tags: &["leadership", "trust"],
    leadership_title: r"Leadership \& Impact",
    leadership_tags: &["leadership", "volunteer", "trust"],
    strengths_title: "Core Strengths",
    strength_icon: r"\faTrophy",
    expertise_title: "Scientific Expertise",
    computation_heading: SkillHeading::Section(r"Computation \& ML"),
    education_specialization: true,
    ats_role_tags: &["industrial-scientist", "nanoscience", "leadership"],
};

static ACADEMIC_RESEARCHER: VariantProfile = VariantProfile {
    tutex_fonts: "  \\setmainfont{Roboto}\n  \\setsansfont{Roboto}\n  \\setmonofont{Roboto Mono}",
    fallback_fonts: "  \\usepackage{roboto}\n  \\usepackage[T1]{fontenc}",
    palette: r"% Academic researcher: stability and precision
\definecolor{SlateGrey}{HTML}{2E2E2E}
\definecolor{LightGrey}{HTML}{666666}
\definecolor{SteelBlue}{HTML}{4682b4}
\definecolor{IndustrialGrey}{HTML}{6c757d}
\definecolor{SystemGreen}{HTML}{059669}
\colorlet{name}{SlateGrey}
\colorlet{tagline}{SteelBlue}
\colorlet{heading}{SteelBlue}
\colorlet{headingrule}{IndustrialGrey}
\colorlet{subheading}{SteelBlue}
\colorlet{accent}{SystemGreen}
\colorlet{emphasis}{SlateGrey}
\colorlet{body}{LightGrey}",
    personal_info_font: r"\footnotesize\ttfamily",
    section_font: r"\LARGE\sffamily\bfseries",
    subsection_font: r"\large\sffamily\bfseries",
    profile_title: "Technical Profile",
    profile_shows_title: false,
    primary_title: r"Research \& Infrastructure",
    primary_tags: &["academic-researcher"],
    primary_excluded_tags: &["trust"],
    leadership_title: r"Leadership \& Trust",
    leadership_tags: &["trust", "leadership"],
    strengths_title: "Core Competencies",
    strength_icon: r"\faCogs",
    expertise_title: "Scattering Expertise",
    computation_heading: SkillHeading::Inline(r"Computational \& ML Stack"),
    education_specialization: false,
    ats_role_tags: &["academic-researcher", "scattering-physics", "trust"],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_round_trip_through_from_str() {
        for variant in Variant::ALL {
            assert_eq!(variant.key().parse::<Variant>().unwrap(), variant);
        }
    }

    #[test]
    fn test_unknown_variant_lists_known_keys() {
        let err = "software-developer".parse::<Variant>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: Unknown variant 'software-developer'. \
             Known variants: industrial-scientist, academic-researcher"
        );
    }

    #[test]
    fn test_serializes_as_kebab_key() {
        let json = serde_json::to_string(&Variant::AcademicResearcher).unwrap();
        assert_eq!(json, "\"academic-researcher\"");
    }
}
