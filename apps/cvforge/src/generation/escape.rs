/// Escapes LaTeX special characters in record text.
///
/// Mapping: `& % $ # _ { }` are backslash-escaped; `~`, `^` and `\` become
/// `\textasciitilde{}`, `\^{}` and `\textbackslash{}`. Everything else passes through.
pub fn escape_latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str(r"\&"),
            '%' => out.push_str(r"\%"),
            '$' => out.push_str(r"\$"),
            '#' => out.push_str(r"\#"),
            '_' => out.push_str(r"\_"),
            '{' => out.push_str(r"\{"),
            '}' => out.push_str(r"\}"),
            '~' => out.push_str(r"\textasciitilde{}"),
            '^' => out.push_str(r"\^{}"),
            '\\' => out.push_str(r"\textbackslash{}"),
            other => out.push(other),
        }
    }
    out
}
