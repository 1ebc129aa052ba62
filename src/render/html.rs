use base64::{Engine as _, engine::general_purpose::STANDARD};

use super::style::CellStyle;
use crate::store::Table;

/// Minimal HTML escaping for text flowing into element bodies and
/// attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Dataframe-style HTML view of a query result, style hints applied as
/// inline background colors. `styles` is row-major like the table;
/// anything it does not cover renders unstyled.
pub fn render_table(table: &Table, styles: &[Vec<Option<CellStyle>>]) -> String {
    let mut html =
        String::from("<table border=\"1\" class=\"styled-table\">\n  <thead>\n    <tr>\n");
    for column in &table.columns {
        html.push_str(&format!("      <th>{}</th>\n", escape(column)));
    }
    html.push_str("    </tr>\n  </thead>\n  <tbody>\n");
    for (r, row) in table.rows.iter().enumerate() {
        html.push_str("    <tr>\n");
        for (c, value) in row.iter().enumerate() {
            let style = styles.get(r).and_then(|s| s.get(c)).copied().flatten();
            match style {
                Some(style) => html.push_str(&format!(
                    "      <td style=\"background-color: {};\">{}</td>\n",
                    style.css_color(),
                    escape(&value.to_string())
                )),
                None => {
                    html.push_str(&format!("      <td>{}</td>\n", escape(&value.to_string())))
                }
            }
        }
        html.push_str("    </tr>\n");
    }
    html.push_str("  </tbody>\n</table>");
    html
}

/// Wraps PNG bytes as an inline img tag with a base64 data URI.
pub fn chart_img_tag(png: &[u8]) -> String {
    format!(
        "<img src=\"data:image/png;base64,{}\">",
        STANDARD.encode(png)
    )
}
