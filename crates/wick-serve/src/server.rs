//! Static file server with an optional live-reload endpoint.
//!
//! Serves the bundled output root over HTTP. In watch mode the router also
//! exposes `/__reload`, a Server-Sent-Events stream fed by the
//! [`ReloadHub`](crate::hub::ReloadHub), and every served `index.html` gets
//! a small script injected that subscribes to it and reloads the page.

use crate::hub::ReloadHub;
use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode, Uri},
    response::{
        sse::{Event, KeepAlive},
        IntoResponse, Response, Sse,
    },
    routing::get,
    Router,
};
use percent_encoding::percent_decode_str;
use std::convert::Infallible;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

/// Script block injected before `</body>` of served `index.html` files in
/// watch mode. Any message on the stream triggers a full page reload.
const RELOAD_SCRIPT: &str = "<script>new EventSource(\"/__reload\").onmessage = () => location.reload();</script>";

/// Shared state behind every request handler.
pub struct ServerState {
    /// Output root files are served from
    pub root: PathBuf,
    /// Whether watch mode (and with it the reload endpoint) is enabled
    pub watch: bool,
    /// Reload subscriber hub
    pub hub: Arc<ReloadHub>,
}

/// Shared state handle for passing around the server.
pub type SharedState = Arc<ServerState>;

/// Build the axum router.
///
/// The reload endpoint only exists in watch mode; without it, a request for
/// `/__reload` falls through to static-file handling and 404s. CORS is wide
/// open, which is standard for a local dev server.
pub fn build_router(state: SharedState) -> Router {
    let mut router = Router::new();

    if state.watch {
        router = router.route("/__reload", get(handle_reload));
    }

    router
        .fallback(handle_request)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Handle SSE subscriptions on `/__reload`.
async fn handle_reload(State(state): State<SharedState>) -> Response {
    let Some((client, mut rx)) = state.hub.register() else {
        // Hub already closed: the session is shutting down.
        return not_found();
    };

    tracing::debug!(client = client.id(), "reload client connected");

    // The registration guard lives inside the stream, so dropping the
    // response (client disconnect or hub close) unregisters synchronously.
    let stream = async_stream::stream! {
        let _client = client;
        while let Some(data) = rx.recv().await {
            yield Ok::<Event, Infallible>(Event::default().data(data));
        }
    };

    Sse::new(stream)
        .keep_alive(
            KeepAlive::new()
                .interval(Duration::from_secs(15))
                .text("ping"),
        )
        .into_response()
}

/// Handle all other requests by serving from the output root.
async fn handle_request(State(state): State<SharedState>, uri: Uri) -> Response {
    let Some(file_path) = resolve_path(&state.root, uri.path()) else {
        return not_found();
    };

    let content = match tokio::fs::read(&file_path).await {
        Ok(content) => content,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %file_path.display(), error = %e, "failed to read file");
            }
            return not_found();
        }
    };

    let body = if state.watch && is_index_html(&file_path) {
        inject_reload_script(&content)
    } else {
        content
    };

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type_for(&file_path))
        .header(header::CACHE_CONTROL, "no-cache")
        .body(Body::from(body))
        .unwrap()
}

/// Map a request path to a file under the served root.
///
/// `/` becomes `/index.html`; other paths are percent-decoded and joined
/// onto the root. The joined path is canonicalized and must stay inside the
/// root, so traversal sequences and symlinks pointing elsewhere resolve to
/// `None` and get the same 404 as a missing file.
fn resolve_path(root: &Path, request_path: &str) -> Option<PathBuf> {
    let request_path = if request_path == "/" {
        "/index.html"
    } else {
        request_path
    };

    let decoded = percent_decode_str(request_path).decode_utf8().ok()?;
    let joined = root.join(decoded.trim_start_matches('/'));

    let resolved = joined.canonicalize().ok()?;
    let root = root.canonicalize().ok()?;
    resolved.starts_with(&root).then_some(resolved)
}

fn is_index_html(path: &Path) -> bool {
    path.file_name().is_some_and(|name| name == "index.html")
}

/// Insert the reload script immediately before the closing `</body>` tag,
/// appending at the end when the document has none.
fn inject_reload_script(content: &[u8]) -> Vec<u8> {
    let html = String::from_utf8_lossy(content);

    if let Some(pos) = html.rfind("</body>") {
        let mut result = String::with_capacity(html.len() + RELOAD_SCRIPT.len() + 1);
        result.push_str(&html[..pos]);
        result.push_str(RELOAD_SCRIPT);
        result.push_str(&html[pos..]);
        return result.into_bytes();
    }

    let mut result = html.into_owned();
    result.push('\n');
    result.push_str(RELOAD_SCRIPT);
    result.into_bytes()
}

/// Determine content type from file extension.
fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");

    match extension {
        "html" => "text/html; charset=utf-8",
        "js" | "mjs" => "application/javascript",
        "css" => "text/css",
        "json" | "map" => "application/json",
        "wasm" => "application/wasm",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "ico" => "image/x-icon",
        "txt" => "text/plain; charset=utf-8",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        _ => "application/octet-stream",
    }
}

fn not_found() -> Response {
    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("Not found"))
        .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn state(root: &Path, watch: bool) -> SharedState {
        Arc::new(ServerState {
            root: root.to_path_buf(),
            watch,
            hub: Arc::new(ReloadHub::new()),
        })
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    #[test]
    fn inject_reload_script_before_body_close() {
        let html = b"<html><body><h1>Test</h1></body></html>";
        let result = String::from_utf8(inject_reload_script(html)).unwrap();

        assert!(result.contains("EventSource(\"/__reload\")"));
        let script_pos = result.find("<script>").unwrap();
        let body_pos = result.find("</body>").unwrap();
        assert!(script_pos < body_pos);
    }

    #[test]
    fn inject_reload_script_appends_without_body() {
        let html = b"<html><h1>Test</h1></html>";
        let result = String::from_utf8(inject_reload_script(html)).unwrap();
        assert!(result.ends_with(RELOAD_SCRIPT));
    }

    #[test]
    fn content_type_by_extension() {
        assert_eq!(
            content_type_for(Path::new("bundle.js")),
            "application/javascript"
        );
        assert_eq!(
            content_type_for(Path::new("index.html")),
            "text/html; charset=utf-8"
        );
        assert_eq!(content_type_for(Path::new("main.css")), "text/css");
        assert_eq!(
            content_type_for(Path::new("bundle.js.map")),
            "application/json"
        );
        assert_eq!(
            content_type_for(Path::new("data.unknown")),
            "application/octet-stream"
        );
        assert_eq!(
            content_type_for(Path::new("no_extension")),
            "application/octet-stream"
        );
    }

    #[test]
    fn resolve_path_maps_root_to_index() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("index.html"), "<html></html>").unwrap();

        let resolved = resolve_path(temp.path(), "/").unwrap();
        assert!(resolved.ends_with("index.html"));
    }

    #[test]
    fn resolve_path_decodes_percent_escapes() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("with space.txt"), "x").unwrap();

        let resolved = resolve_path(temp.path(), "/with%20space.txt").unwrap();
        assert!(resolved.ends_with("with space.txt"));
    }

    #[test]
    fn resolve_path_rejects_traversal() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("dist");
        std::fs::create_dir(&root).unwrap();
        std::fs::write(temp.path().join("secret.txt"), "secret").unwrap();

        assert!(resolve_path(&root, "/../secret.txt").is_none());
        assert!(resolve_path(&root, "/%2e%2e/secret.txt").is_none());
    }

    #[test]
    fn resolve_path_missing_file_is_none() {
        let temp = TempDir::new().unwrap();
        assert!(resolve_path(temp.path(), "/nope.js").is_none());
    }

    #[tokio::test]
    async fn serves_file_bytes_exactly() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("bundle.js"), b"console.log(1);").unwrap();

        let response = handle_request(
            State(state(temp.path(), false)),
            "/bundle.js".parse().unwrap(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/javascript"
        );
        assert_eq!(body_bytes(response).await, b"console.log(1);");
    }

    #[tokio::test]
    async fn missing_file_is_404_not_found() {
        let temp = TempDir::new().unwrap();

        let response = handle_request(
            State(state(temp.path(), false)),
            "/missing.js".parse().unwrap(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_bytes(response).await, b"Not found");
    }

    #[tokio::test]
    async fn index_html_injected_in_watch_mode() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("index.html"), "<body></body>").unwrap();

        let response =
            handle_request(State(state(temp.path(), true)), "/".parse().unwrap()).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = String::from_utf8(body_bytes(response).await).unwrap();
        let script_pos = body.find("<script>").unwrap();
        let close_pos = body.find("</body>").unwrap();
        assert!(script_pos < close_pos);
    }

    #[tokio::test]
    async fn index_html_untouched_without_watch_mode() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("index.html"), "<body></body>").unwrap();

        let response =
            handle_request(State(state(temp.path(), false)), "/".parse().unwrap()).await;

        assert_eq!(body_bytes(response).await, b"<body></body>");
    }

    #[tokio::test]
    async fn non_index_html_not_injected() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("about.html"), "<body></body>").unwrap();

        let response = handle_request(
            State(state(temp.path(), true)),
            "/about.html".parse().unwrap(),
        )
        .await;

        assert_eq!(body_bytes(response).await, b"<body></body>");
    }
}
