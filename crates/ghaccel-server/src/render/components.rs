//! Shared HTML components used across all pages.

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use maud::{DOCTYPE, Markup, PreEscaped, html};

/// Inline CSS for all pages.
pub const PAGE_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
:root{--bg:#f6f8fa;--fg:#1f2328;--fg2:#59636e;--fg3:#8c959f;--accent:#0969da;--accent-hover:#0550ae;--surface:#fff;--border:#d1d9e0;--mono:"SF Mono",SFMono-Regular,ui-monospace,Menlo,monospace}
body{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;line-height:1.6;color:var(--fg);background:var(--bg);min-height:100vh;display:flex;flex-direction:column;align-items:center;padding:1.5rem 1rem}
main{max-width:900px;width:100%;flex:1}
a{color:var(--accent);text-decoration:none}
a:hover{text-decoration:underline}

.file-header{display:flex;flex-wrap:wrap;justify-content:space-between;align-items:center;gap:1rem;margin-bottom:1.25rem}
.file-name{font-size:1.5rem;font-weight:700;word-break:break-all}
.file-kind{color:var(--fg2);font-size:.95rem}
.file-actions{display:flex;gap:.5rem}
.button{display:inline-flex;align-items:center;padding:.45rem 1rem;border:1px solid var(--border);border-radius:6px;background:var(--surface);color:var(--fg);font-size:.9rem;font-weight:500}
.button:hover{border-color:var(--accent);text-decoration:none}
.button.primary{background:var(--accent);border-color:var(--accent);color:#fff}
.button.primary:hover{background:var(--accent-hover)}

.preview{border:1px solid var(--border);border-radius:8px;background:var(--surface);overflow:hidden}
.preview pre{font-family:var(--mono);font-size:.85rem;padding:1rem;white-space:pre-wrap;word-break:break-word;max-height:70vh;overflow:auto}
.preview img{display:block;margin:1rem auto;max-width:100%;max-height:70vh;object-fit:contain}
.preview iframe{width:100%;height:70vh;border:0}
.preview-note{padding:.5rem 1rem;font-size:.8rem;color:var(--fg3);border-top:1px solid var(--border)}
.preview-empty{display:flex;flex-direction:column;align-items:center;gap:1rem;padding:3rem 1rem;text-align:center;color:var(--fg2)}
.preview-error{padding:1rem;color:#cf222e}

.converter{display:flex;gap:.5rem;margin-top:1.5rem}
.converter input{flex:1;padding:.5rem .75rem;border:1px solid var(--border);border-radius:6px;font-size:.95rem}
.converter button{padding:.5rem 1rem;border:0;border-radius:6px;background:var(--accent);color:#fff;font-size:.95rem;cursor:pointer}
.converted{margin-top:1rem;padding:1rem;border-radius:6px;background:var(--surface);border:1px solid var(--border)}
.converted code{font-family:var(--mono);font-size:.85rem;word-break:break-all}

.footer{text-align:center;margin-top:1rem;padding-top:.75rem;font-size:.8rem;color:var(--fg3);width:100%;max-width:900px}

@media(prefers-color-scheme:dark){
:root{--bg:#0d1117;--fg:#e6edf3;--fg2:#9198a1;--fg3:#656c76;--accent:#4493f8;--accent-hover:#6cb6ff;--surface:#151b23;--border:#3d444d}
}
"#;

/// Inline CSS for error pages.
pub const ERROR_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
body{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;display:flex;justify-content:center;align-items:center;min-height:100vh;background:#f6f8fa;color:#1f2328;padding:1rem}
.error-page{text-align:center;max-width:400px}
.error-page h1{font-size:1.5rem;margin-bottom:.75rem}
.error-page p{color:#59636e;margin-bottom:1rem;line-height:1.5}
.error-page a{color:#0969da}
"#;

/// Content-Security-Policy for HTML pages.
///
/// No scripts. Images and PDFs are embedded from this origin only.
pub const CSP_HEADER: &str = "default-src 'none'; style-src 'unsafe-inline'; img-src 'self' data:; frame-src 'self'; form-action 'self'; frame-ancestors 'none'";

/// Render the full HTML page shell.
pub fn page_shell(title: &str, site_name: &str, body_content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " - " (site_name) }
                meta name="robots" content="noindex";
                style { (PreEscaped(PAGE_CSS)) }
            }
            body {
                main { (body_content) }
                footer class="footer" {
                    a href="/" { (site_name) }
                    " · "
                    "Accelerate GitHub releases, archives, and project files"
                }
            }
        }
    }
}

/// Wrap markup in an HTML response with security headers.
pub fn html_response(status: StatusCode, markup: Markup) -> Response {
    let mut response = (status, markup).into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static(CSP_HEADER),
    );
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    response
}

/// Render a standalone error page.
pub fn error_page(status: StatusCode, title: &str, message: &str) -> Response {
    let markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                meta name="robots" content="noindex";
                style { (PreEscaped(ERROR_CSS)) }
            }
            body {
                main class="error-page" {
                    h1 { (title) }
                    p { (message) }
                    a href="/" { "Back to the accelerator" }
                }
            }
        }
    };

    html_response(status, markup)
}
