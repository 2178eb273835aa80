use axum::{extract::Path, response::Html};

#[utoipa::path(
    get,
    path = "/view/{clip_id}",
    tag = "clips",
    params(
        ("clip_id" = String, Path, description = "Clip ID")
    ),
    responses(
        (status = 200, description = "Page redirecting to the web viewer", content_type = "text/html")
    )
)]
pub async fn view_clip(Path(clip_id): Path<String>) -> Html<String> {
    Html(render_view_page(&clip_id))
}

/// Minimal page that sends the browser to the front end with the clip preselected.
/// Existence of the clip is not checked here; the viewer handles unknown ids.
fn render_view_page(clip_id: &str) -> String {
    let target = format!("/?clip={}", urlencoding::encode(clip_id));
    let target = escape_html(&target);
    let title = escape_html(clip_id);

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta http-equiv="refresh" content="0; url={target}">
    <title>Clip {title}</title>
</head>
<body>
    <p>Redirecting to <a href="{target}">clip {title}</a>...</p>
</body>
</html>
"#
    )
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
