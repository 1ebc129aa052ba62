mod chart;
mod html;
mod series;
mod style;

pub use chart::{CHART_HEIGHT, CHART_WIDTH, render_png};
pub use html::{chart_img_tag, escape, render_table};
pub use series::Series;
pub use style::{CellStyle, style_for, style_table};
