//! HTML fragments used in provenance headers.

/// Login whose avatar stands in for authors unknown to the target.
pub(crate) const FALLBACK_AVATAR_LOGIN: &str = "github";

/// Renders a single-row table with one cell per entry.
pub(crate) fn table(cells: &[&str]) -> String {
    let mut out = String::from("<table>\n  <tr>\n");
    for cell in cells {
        out.push_str("    <td>\n");
        out.push_str("      ");
        out.push_str(cell);
        out.push('\n');
        out.push_str("    </td>\n");
    }
    out.push_str("  </tr>\n</table>\n");
    out
}

/// Renders an avatar image for `login` hosted under `web_base`.
pub(crate) fn avatar(web_base: &str, login: &str) -> String {
    format!(r#"<img src="{web_base}/{login}.png" width="35">"#)
}

/// Renders an anchor tag.
pub(crate) fn link(href: &str, text: &str) -> String {
    format!(r#"<a href="{href}">{text}</a>"#)
}
