//! Home page with the paste-a-URL converter.
//!
//! The form submits back to `/` with `?url=`, so the conversion works without
//! any client-side script.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use ghaccel_core::{PastedUrl, from_pasted_url};
use maud::{Markup, html};
use serde::Deserialize;

use crate::error::INVALID_GITHUB_URL;
use crate::render::components::{html_response, page_shell};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct HomeQuery {
    url: Option<String>,
}

/// Render the home page.
pub async fn home_page(State(state): State<AppState>, Query(query): Query<HomeQuery>) -> Response {
    let input = query.url.unwrap_or_default();
    let input = input.trim();

    let result = (!input.is_empty()).then(|| match from_pasted_url(input) {
        PastedUrl::Recognized(request) => Ok(request.accelerated_url(&state.config.base_url)),
        PastedUrl::Unrecognized | PastedUrl::Malformed(_) => Err(INVALID_GITHUB_URL),
    });

    let base_url = &state.config.base_url;
    let content = html! {
        h1 { "Accelerate GitHub Content Delivery" }
        p class="file-kind" {
            "Fast access to GitHub releases, archives, and project files through edge caching."
        }

        form class="converter" method="get" action="/" {
            input type="url" name="url" placeholder="Paste GitHub file URL" value=(input);
            button type="submit" { "Convert" }
        }

        @if let Some(result) = result {
            div class="converted" {
                @match result {
                    Ok(url) => {
                        p { "Accelerated URL:" }
                        a href=(url) { code { (url) } }
                    }
                    Err(message) => {
                        p class="preview-error" { (message) }
                    }
                }
            }
        }

        (usage(base_url))
    };

    html_response(
        StatusCode::OK,
        page_shell("Home", &state.config.site_name, content),
    )
}

fn usage(base_url: &str) -> Markup {
    html! {
        section {
            h2 { "API" }
            ul {
                li { code { (base_url) "/api/release/{owner}/{repo}/{tag}/{filename}" } }
                li { code { (base_url) "/api/archive/{owner}/{repo}/{ref}/{zip|tar.gz}" } }
                li { code { (base_url) "/api/raw/{owner}/{repo}/{ref}/{path}" } }
            }
            p {
                "Add " code { "?preview=false" } " to force a download, or "
                code { "?refresh=true" } " to bypass cached copies."
            }
        }
    }
}
