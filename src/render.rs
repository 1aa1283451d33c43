//! HTML page rendering.
//!
//! Pages are built with [maud](https://maud.lambda.xyz/): templates are Rust
//! code and every interpolated value is escaped, so file names containing
//! quotes or angle brackets cannot break the markup. Two things are embedded
//! verbatim on purpose: the stylesheet and the rendered body copy, which are
//! already CSS and HTML respectively.
//!
//! ## Gallery layout
//!
//! ```text
//! <style> … </style>
//! <div class="copy"> body copy </div>
//! <div class="lfbtable">
//!   <div class="cell"><a href="{link}"><img src="{thumbnail}"></a></div>
//!   …
//! </div>
//! ```

use crate::config::StyleConfig;
use crate::types::ImageRecord;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File name of the generated page inside the output directory.
pub const INDEX_FILE: &str = "index.html";

/// Renders the base HTML document structure.
fn base_document(style: &StyleConfig, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (style.title) }
                style type="text/css" { (PreEscaped(&style.css)) }
            }
            body {
                (content)
            }
        }
    }
}

/// Renders the body copy block.
fn copy_block(copy_html: &str) -> Markup {
    html! {
        div.copy {
            (PreEscaped(copy_html))
        }
    }
}

/// Renders one thumbnail cell linking to the full-resolution image.
fn gallery_cell(record: &ImageRecord) -> Markup {
    html! {
        div.cell {
            a href=(record.link_path) {
                img src=(record.thumbnail_path) loading="lazy";
            }
        }
    }
}

/// Renders the gallery page: body copy followed by one cell per record, in
/// the order given.
pub fn render_gallery_page(records: &[ImageRecord], copy_html: &str, style: &StyleConfig) -> Markup {
    let content = html! {
        (copy_block(copy_html))
        div.lfbtable {
            @for record in records {
                (gallery_cell(record))
            }
        }
    };

    base_document(style, content)
}

/// Renders a comparison page: a header row of column labels, then one row
/// per photo with a size-labelled cell per column.
pub fn render_compare_page(
    columns: &[String],
    rows: &[Vec<ImageRecord>],
    copy_html: &str,
    style: &StyleConfig,
) -> Markup {
    let content = html! {
        (copy_block(copy_html))
        div.lfbtable {
            div.row {
                @for column in columns {
                    div.cell { h1 { (column) } }
                }
            }
            @for row in rows {
                div.row {
                    @for record in row {
                        div.cell {
                            p { (record.display_name) }
                            a href=(record.link_path) {
                                img src=(record.thumbnail_path) loading="lazy";
                            }
                        }
                    }
                }
            }
        }
    };

    base_document(style, content)
}

/// Write `html` to `<output_dir>/index.html`, replacing any existing file.
pub fn write_index(output_dir: &Path, html: &str) -> io::Result<PathBuf> {
    let path = output_dir.join(INDEX_FILE);
    fs::write(&path, html)?;
    Ok(path)
}
