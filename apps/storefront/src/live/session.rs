//! # Live Carousel Session
//!
//! One WebSocket per open home page. The socket's lifetime is the
//! carousel's lifetime.
//!
//! The page passes the number of slides it rendered (`?len=6`) and the
//! controller runs over exactly that many. Without `len` the session
//! fetches the featured products itself.
//!
//! ## Message Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Browser                                  Server                        │
//! │  ───────                                  ──────                        │
//! │  GET /live/carousel?len=6 (upgrade) ────► CarouselController::start     │
//! │                                           over the 6 rendered slides    │
//! │  ◄── {"index":0,"phase":"auto_playing","len":6}                         │
//! │  ◄── {"index":1,...}                      every tick / phase change     │
//! │  {"cmd":"next"} ────────────────────────► controller.next()             │
//! │  {"cmd":"go_to","index":4} ─────────────► controller.go_to(4)           │
//! │  {"cmd":"go_to","index":99} ────────────► rejected, logged, no frame    │
//! │  close ─────────────────────────────────► controller.dispose()          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use crumbs_core::carousel::CarouselState;
use crumbs_core::FEATURED_LIMIT;
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::live::carousel::CarouselController;
use crate::state::AppState;

/// Client commands are tiny; anything larger is not a command.
const MAX_MESSAGE_SIZE: usize = 1024;

// =============================================================================
// Client Commands
// =============================================================================

/// Commands a browser may send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum ClientCommand {
    Next,
    Previous,
    GoTo { index: usize },
}

impl ClientCommand {
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

// =============================================================================
// WebSocket Handler
// =============================================================================

/// `/live/carousel` query string.
#[derive(Debug, Default, Deserialize)]
pub struct LiveQuery {
    /// Slide count of the page that opened the socket.
    pub len: Option<usize>,
}

/// WebSocket upgrade handler for `/live/carousel`.
pub async fn carousel_socket(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Query(query): Query<LiveQuery>,
) -> impl IntoResponse {
    ws.max_message_size(MAX_MESSAGE_SIZE)
        .on_upgrade(move |socket| run_session(socket, state, query.len))
}

/// Slides the controller cycles over. A page-supplied count wins so the
/// controller never disagrees with what the browser shows.
async fn session_slides(state: &AppState, rendered: Option<usize>) -> Vec<()> {
    let len = match rendered {
        Some(len) => len,
        None => state.fetcher().featured_products().await.len(),
    };
    vec![(); len.min(FEATURED_LIMIT)]
}

/// Drives one session until the socket closes.
async fn run_session(socket: WebSocket, state: AppState, rendered: Option<usize>) {
    let session_id = Uuid::new_v4();

    let slides = session_slides(&state, rendered).await;
    let mut controller = CarouselController::start(slides, state.carousel_timings());
    let mut updates = controller.subscribe();
    info!(session = %session_id, len = controller.state().len, "Carousel session opened");

    let (mut sender, mut receiver) = socket.split();

    let initial = *updates.borrow_and_update();
    if send_state(&mut sender, &initial).await.is_ok() {
        loop {
            tokio::select! {
                changed = updates.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let frame = *updates.borrow_and_update();
                    if send_state(&mut sender, &frame).await.is_err() {
                        debug!(session = %session_id, "Client gone while sending");
                        break;
                    }
                }
                incoming = receiver.next() => match incoming {
                    Some(Ok(Message::Text(text))) => {
                        handle_command(&controller, session_id, text.as_str()).await;
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        debug!(session = %session_id, error = %e, "WebSocket receive error");
                        break;
                    }
                },
            }
        }
    }

    controller.dispose().await;
    info!(session = %session_id, "Carousel session closed");
}

async fn handle_command(controller: &CarouselController, session_id: Uuid, text: &str) {
    let command = match ClientCommand::parse(text) {
        Ok(command) => command,
        Err(e) => {
            warn!(session = %session_id, error = %e, "Ignoring malformed carousel command");
            return;
        }
    };

    debug!(session = %session_id, ?command, "Carousel command");
    let result = match command {
        ClientCommand::Next => controller.next().await,
        ClientCommand::Previous => controller.previous().await,
        ClientCommand::GoTo { index } => controller.go_to(index).await,
    };

    if let Err(e) = result {
        warn!(session = %session_id, ?command, error = %e, "Carousel command rejected");
    }
}

async fn send_state(
    sender: &mut SplitSink<WebSocket, Message>,
    state: &CarouselState,
) -> Result<(), axum::Error> {
    let json = match serde_json::to_string(state) {
        Ok(json) => json,
        Err(e) => {
            warn!(error = %e, "Failed to serialize carousel state");
            return Ok(());
        }
    };
    sender.send(Message::Text(json.into())).await
}
