//! HTML page generation.
//!
//! Two pages are produced per list:
//!
//! - **Player page** (`<list>/<folder>/index.html`): a click-to-play overlay
//!   in front of a hidden YouTube player. The embed URL is only assigned to
//!   the iframe on click, so nothing plays before the user asks for it.
//! - **List index** (`<list>/index.html`): one link per item, in sheet order.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Titles and artists are escaped. The video reference is trusted input and
//! is embedded verbatim into the player URL.

use crate::naming;
use crate::types::Row;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HtmlError {
    #[error("IO error writing {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

const PLAYER_CSS: &str = include_str!("../static/player.css");
const PLAYER_JS: &str = include_str!("../static/player.js");

/// Embed URL for a video reference. The reference is not escaped.
pub fn player_url(video: &str) -> String {
    format!(
        "https://www.youtube-nocookie.com/embed/{}?autoplay=1&controls=0&rel=0&modestbranding=1",
        video
    )
}

/// Renders the click-to-play player page for one item.
pub fn render_player_page(video: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang="es" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Play and Guess" }
                style { (PreEscaped(PLAYER_CSS)) }
            }
            body {
                h1 { "🎧 Play and Guess" }
                div #video-container {
                    div #overlay { "Haz clic para reproducir" }
                    iframe #player src="" data-src=(PreEscaped(player_url(video))) allow="autoplay" allowfullscreen {}
                }
                div.msg { "Escucha la canción. ¿Puedes adivinar el año?" }
                script { (PreEscaped(PLAYER_JS)) }
            }
        }
    }
}

/// Renders the list index: one link per row, in the given order.
pub fn render_list_index(list_name: &str, rows: &[Row], folder_prefix: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang="es" {
            head {
                meta charset="UTF-8";
                title { "Lista de Canciones" }
            }
            body {
                h1 { "Lista: " (list_name) }
                ul {
                    @for row in rows {
                        @let folder = naming::folder_name(folder_prefix, row.id);
                        li {
                            a href=(naming::index_link(&folder)) target="_blank" {
                                (row.title) " – " (row.artist)
                            }
                        }
                    }
                }
            }
        }
    }
}

fn write_markup(path: &Path, markup: Markup) -> Result<(), HtmlError> {
    fs::write(path, markup.into_string()).map_err(|source| HtmlError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Write the player page for `video` to `path`.
pub fn write_player_page(path: &Path, video: &str) -> Result<(), HtmlError> {
    write_markup(path, render_player_page(video))
}

/// Write the list index to `path`.
pub fn write_list_index(
    path: &Path,
    list_name: &str,
    rows: &[Row],
    folder_prefix: &str,
) -> Result<(), HtmlError> {
    write_markup(path, render_list_index(list_name, rows, folder_prefix))
}
