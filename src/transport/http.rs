//! HTTP transport
//!
//! Pages and form endpoints for the board:
//! - `GET /` board page, polled from `/board` and nudged by live updates
//! - `GET /messages` message creation form
//! - `POST|PUT|DELETE /message` submission, edit and deletion boundaries
//! - `GET /board`, `GET /api/messages` snapshot boundaries for polling clients
//! - `GET /api/stats` hub counters
//!
//! Validation happens here; the board only ever sees valid input.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Form, Json, Router};
use serde::Deserialize;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

use crate::board::Board;
use crate::board::message::{Message, MessageId, Submission, parse_id};
use crate::config::Settings;
use crate::hub::HubStats;
use crate::render::HtmlRenderer;
use crate::utils::error::BoardError;

#[derive(Clone)]
pub struct HttpState {
    pub board: Board,
    pub settings: Settings,
}

#[derive(Debug, Deserialize)]
pub struct MessageForm {
    #[serde(default)]
    pub message: String,
    pub author: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

impl IntoResponse for BoardError {
    fn into_response(self) -> Response {
        let status = if self.is_validation() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, self.to_string()).into_response()
    }
}

pub fn build_router(state: HttpState) -> Router {
    Router::new()
        .route("/", get(board_page))
        .route("/messages", get(creation_page))
        .route(
            "/message",
            axum::routing::post(submit_message)
                .put(update_message)
                .delete(delete_message),
        )
        .route("/board", get(board_fragment))
        .route("/api/messages", get(list_messages))
        .route("/api/stats", get(stats))
        .with_state(state)
}

pub async fn start_http_server(
    addr: String,
    board: Board,
    settings: Settings,
) -> Result<(), BoardError> {
    let listener = TcpListener::bind(&addr).await?;
    info!("HTTP server listening on http://{addr}");
    serve_http(listener, HttpState { board, settings }).await
}

pub async fn serve_http(listener: TcpListener, state: HttpState) -> Result<(), BoardError> {
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}

fn id_from(query: IdQuery) -> Result<MessageId, BoardError> {
    match query.id {
        Some(raw) => parse_id(&raw),
        None => Err(BoardError::InvalidId(String::new())),
    }
}

async fn submit_message(
    State(state): State<HttpState>,
    Form(form): Form<MessageForm>,
) -> Result<Redirect, BoardError> {
    let submission = Submission::parse(&form.message, form.author.as_deref()).inspect_err(|e| {
        debug!("Rejected submission: {e}");
    })?;
    state.board.submit(submission);
    Ok(Redirect::to("/messages"))
}

async fn update_message(
    State(state): State<HttpState>,
    Query(query): Query<IdQuery>,
    Form(form): Form<MessageForm>,
) -> Result<StatusCode, BoardError> {
    let id = id_from(query)?;
    let submission = Submission::parse(&form.message, form.author.as_deref())?;
    state.board.edit(id, submission);
    Ok(StatusCode::OK)
}

async fn delete_message(
    State(state): State<HttpState>,
    Query(query): Query<IdQuery>,
) -> Result<StatusCode, BoardError> {
    let id = id_from(query).inspect_err(|e| debug!("Rejected delete: {e}"))?;
    state.board.remove(id);
    Ok(StatusCode::OK)
}

async fn board_fragment(State(state): State<HttpState>) -> Html<String> {
    Html(state.board.render_with(&HtmlRenderer).as_str().to_owned())
}

async fn list_messages(State(state): State<HttpState>) -> Json<Vec<Message>> {
    Json(state.board.messages())
}

async fn stats(State(state): State<HttpState>) -> Result<Json<HubStats>, BoardError> {
    let stats = state.board.stats().await.inspect_err(|e| {
        error!("Stats unavailable: {e}");
    })?;
    Ok(Json(stats))
}

async fn board_page(State(state): State<HttpState>) -> Html<String> {
    let table = state.board.render_with(&HtmlRenderer);
    Html(format!(
        r##"<!DOCTYPE html>
<html class="fullPage">
<head>
    <title>Display Board</title>
    <script src="https://unpkg.com/htmx.org@2.0.4"></script>
    {style}
</head>
<body>
    <h1>Display Board</h1>
    <div id="board" hx-get="/board" hx-trigger="every {refresh}s">
{table}
    </div>
    <script>
        (function () {{
            var ws = new WebSocket("ws://" + window.location.hostname + ":{ws_port}/");
            ws.onmessage = function (event) {{
                var frame = JSON.parse(event.data);
                if (frame.type === "snapshot") {{
                    htmx.ajax("GET", "/board", "#board");
                }}
            }};
        }})();
    </script>
</body>
</html>"##,
        style = STYLE,
        refresh = state.settings.board.refresh_secs,
        ws_port = state.settings.server.ws_port,
        table = table.as_str(),
    ))
}

async fn creation_page(State(state): State<HttpState>) -> Html<String> {
    let count = state.board.messages().len();
    Html(format!(
        r#"<!DOCTYPE html>
<html class="fullPage">
<head>
    <title>Display Board - Create Message</title>
    <script src="https://unpkg.com/htmx.org@2.0.4"></script>
    {style}
</head>
<body>
    <h1>Create New Message</h1>
    <p>{count} message(s) on the board</p>
    <form hx-post="/message" hx-swap="none" hx-on::after-request="this.reset()">
        <div>
            <label for="author">Name:</label><br>
            <input id="author" name="author" type="text"><br>
            <label for="message">Message:</label><br>
            <textarea id="message" name="message" required></textarea><br>
        </div>
        <input type="submit" value="Submit" class="button-terminal">
    </form>
</body>
</html>"#,
        style = STYLE,
    ))
}

const STYLE: &str = r#"<style>
        .fullPage {
            background-color: #000;
            color: #00B1B7;
            font-size: 40px;
            font-family: monospace;
        }
        .button-terminal {
            background-color: black;
            color: #00B1B7;
            font-size: 40px;
            border: 5px solid #00B1B7;
            padding: 10px 20px;
            text-transform: uppercase;
            cursor: pointer;
        }
        textarea, input[type=text] {
            background-color: #000;
            color: #00B1B7;
            border: 5px solid #00B1B7;
            font-size: 30px;
            padding: 10px;
            width: 80%;
        }
        textarea { height: 150px; }
    </style>"#;
