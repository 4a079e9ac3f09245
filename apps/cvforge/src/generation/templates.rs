// Fixed LaTeX fragments for the altacv renderer.
// Placeholders are `{name}` tokens replaced before use.

/// Document preamble up to and including `\begin{document}`.
/// Replace `{tutex_fonts}`, `{fallback_fonts}`, `{palette}`,
/// `{personal_info_font}`, `{section_font}` and `{subsection_font}`.
pub const PREAMBLE_TEMPLATE: &str = r"\documentclass[10pt,a4paper,withhyper]{altacv}

\geometry{left=1cm,right=1cm,top=1.5cm,bottom=1.5cm,columnsep=1.5cm}

\usepackage{paracol}

\iftutex
{tutex_fonts}
  \renewcommand{\familydefault}{\sfdefault}
\else
{fallback_fonts}
  \renewcommand{\familydefault}{\sfdefault}
\fi

{palette}

\renewcommand{\namefont}{\Huge\sffamily\bfseries}
\renewcommand{\personalinfofont}{{personal_info_font}}
\renewcommand{\cvsectionfont}{{section_font}}
\renewcommand{\cvsubsectionfont}{{subsection_font}}

\renewcommand{\cvItemMarker}{{\small\textbullet}}
\renewcommand{\cvRatingMarker}{\faCircle}

% LinkedIn entry shows a label and links to the profile
\renewcommand{\linkedin}[1]{%
  \printinfo{\faLinkedin}{LinkedIn}[https://linkedin.com/in/#1]%
}

\begin{document}
";

/// Closes the two-column body and the document.
pub const DOCUMENT_END: &str = "\n\\end{paracol}\n\n\\end{document}\n";

/// Fills the preamble for one variant profile.
pub fn preamble(profile: &super::variant::VariantProfile) -> String {
    PREAMBLE_TEMPLATE
        .replace("{tutex_fonts}", profile.tutex_fonts)
        .replace("{fallback_fonts}", profile.fallback_fonts)
        .replace("{palette}", profile.palette)
        .replace("{personal_info_font}", profile.personal_info_font)
        .replace("{section_font}", profile.section_font)
        .replace("{subsection_font}", profile.subsection_font)
}
