//! Axum JSON server over one session per structure kind.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use arbor_layout::Value;
use arbor_scene::Scene;
use arbor_structures::{Operation, StructureKind};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tokio::time::Instant;
use tower_http::cors::CorsLayer;

use crate::config::VisConfig;
use crate::error::{Error, Result};
use crate::playback::{PlaybackSpeed, PlaybackState, PlaybackStatus};
use crate::session::Session;

/// How often the playback driver wakes up.
const TICK_RESOLUTION: Duration = Duration::from_millis(25);

/// Shared application state.
pub struct AppState {
    config: VisConfig,
    sessions: BTreeMap<StructureKind, RwLock<Session>>,
    populate_round: AtomicU64,
}

impl AppState {
    pub fn new(config: VisConfig) -> Self {
        let sessions = StructureKind::ALL
            .into_iter()
            .map(|kind| (kind, RwLock::new(Session::new(kind, &config))))
            .collect();
        Self {
            config,
            sessions,
            populate_round: AtomicU64::new(0),
        }
    }

    fn session(&self, kind: &str) -> Result<&RwLock<Session>> {
        let kind: StructureKind = kind.parse()?;
        // Every kind gets a session in `new`.
        Ok(&self.sessions[&kind])
    }

    /// Seed for the next random population: the configured seed, then
    /// successive values so repeated requests differ.
    fn next_seed(&self) -> u64 {
        let round = self.populate_round.fetch_add(1, Ordering::Relaxed);
        self.config.seed.wrapping_add(round)
    }
}

/// Visualization server.
pub struct VisServer {
    state: Arc<AppState>,
}

impl VisServer {
    pub fn new(config: VisConfig) -> Self {
        Self {
            state: Arc::new(AppState::new(config)),
        }
    }

    pub fn state(&self) -> Arc<AppState> {
        self.state.clone()
    }

    /// Build the router for the server.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/api/structures", get(structures_handler))
            .route("/api/{kind}/scene", get(scene_handler))
            .route("/api/{kind}/status", get(status_handler))
            .route("/api/{kind}/op", post(op_handler))
            .route("/api/{kind}/clear", post(clear_handler))
            .route("/api/{kind}/populate", post(populate_handler))
            .route("/api/{kind}/playback", get(playback_status_handler))
            .route("/api/{kind}/playback/play", post(play_handler))
            .route("/api/{kind}/playback/pause", post(pause_handler))
            .route("/api/{kind}/playback/toggle", post(toggle_handler))
            .route("/api/{kind}/playback/rewind", post(rewind_handler))
            .route("/api/{kind}/playback/fast_forward", post(fast_forward_handler))
            .route("/api/{kind}/playback/tick", post(tick_handler))
            .route("/api/{kind}/playback/seek", post(seek_handler))
            .route("/api/{kind}/playback/speed", post(speed_handler))
            .route("/api/{kind}/playback/step", post(step_handler))
            .layer(CorsLayer::permissive())
            .with_state(self.state.clone())
    }

    /// Run the server on the configured address until it fails.
    pub async fn serve(self) -> Result<()> {
        let addr = self.state.config.addr;
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Visualization server running on http://{}", addr);

        tokio::spawn(drive_playback(self.state.clone()));
        axum::serve(listener, self.router()).await?;
        Ok(())
    }
}

/// Advance every playing session once its step interval has elapsed.
async fn drive_playback(state: Arc<AppState>) {
    let mut interval = tokio::time::interval(TICK_RESOLUTION);
    let mut last_step: HashMap<StructureKind, Instant> = HashMap::new();
    loop {
        interval.tick().await;
        for (kind, session) in &state.sessions {
            let mut session = session.write().await;
            let playback = session.playback_mut();
            if playback.state() != PlaybackState::Playing {
                last_step.remove(kind);
                continue;
            }
            let due = Duration::from_millis(playback.ms_per_step());
            let last = last_step.entry(*kind).or_insert_with(Instant::now);
            if last.elapsed() >= due {
                playback.tick();
                *last = Instant::now();
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::AnimationInProgress => StatusCode::CONFLICT,
            Error::UnknownStructure(_) => StatusCode::NOT_FOUND,
            Error::InvalidConfig { .. } | Error::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(self.toast())).into_response()
    }
}

async fn structures_handler() -> Json<Vec<StructureKind>> {
    Json(StructureKind::ALL.to_vec())
}

async fn scene_handler(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
) -> Result<Json<Scene>> {
    let session = state.session(&kind)?.read().await;
    Ok(Json(session.current_scene().clone()))
}

/// Session status response.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionStatus {
    pub kind: StructureKind,
    pub values: Vec<Value>,
    pub len: usize,
    pub playback: PlaybackStatus,
}

impl From<&Session> for SessionStatus {
    fn from(session: &Session) -> Self {
        Self {
            kind: session.kind(),
            values: session.structure().values(),
            len: session.structure().len(),
            playback: session.playback().status(),
        }
    }
}

async fn status_handler(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
) -> Result<Json<SessionStatus>> {
    let session = state.session(&kind)?.read().await;
    Ok(Json(SessionStatus::from(&*session)))
}

/// A recorded storyboard and the playback state it was loaded into.
#[derive(Debug, Serialize, Deserialize)]
pub struct OpResponse {
    pub scenes: Vec<Scene>,
    pub playback: PlaybackStatus,
}

async fn op_handler(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
    Json(op): Json<Operation>,
) -> Result<Json<OpResponse>> {
    let mut session = state.session(&kind)?.write().await;
    let scenes = session.run(op)?.to_vec();
    Ok(Json(OpResponse {
        scenes,
        playback: session.playback().status(),
    }))
}

async fn clear_handler(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
) -> Result<Json<SessionStatus>> {
    let mut session = state.session(&kind)?.write().await;
    session.clear()?;
    Ok(Json(SessionStatus::from(&*session)))
}

#[derive(Debug, Default, Deserialize)]
struct PopulateRequest {
    count: Option<usize>,
    seed: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
struct PopulateResponse {
    drawn: Vec<Value>,
    status: SessionStatus,
}

async fn populate_handler(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
    body: Option<Json<PopulateRequest>>,
) -> Result<Json<PopulateResponse>> {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let session = state.session(&kind)?;
    let seed = req.seed.unwrap_or_else(|| state.next_seed());
    let mut session = session.write().await;
    let drawn = session.populate(req.count, seed)?;
    Ok(Json(PopulateResponse {
        drawn,
        status: SessionStatus::from(&*session),
    }))
}

async fn playback_status_handler(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
) -> Result<Json<PlaybackStatus>> {
    let session = state.session(&kind)?.read().await;
    Ok(Json(session.playback().status()))
}

async fn play_handler(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
) -> Result<Json<PlaybackStatus>> {
    let mut session = state.session(&kind)?.write().await;
    session.playback_mut().play();
    Ok(Json(session.playback().status()))
}

async fn pause_handler(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
) -> Result<Json<PlaybackStatus>> {
    let mut session = state.session(&kind)?.write().await;
    session.playback_mut().pause();
    Ok(Json(session.playback().status()))
}

async fn toggle_handler(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
) -> Result<Json<PlaybackStatus>> {
    let mut session = state.session(&kind)?.write().await;
    session.playback_mut().toggle();
    Ok(Json(session.playback().status()))
}

async fn rewind_handler(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
) -> Result<Json<PlaybackStatus>> {
    let mut session = state.session(&kind)?.write().await;
    session.playback_mut().rewind();
    Ok(Json(session.playback().status()))
}

async fn fast_forward_handler(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
) -> Result<Json<PlaybackStatus>> {
    let mut session = state.session(&kind)?.write().await;
    session.playback_mut().fast_forward();
    Ok(Json(session.playback().status()))
}

async fn tick_handler(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
) -> Result<Json<PlaybackStatus>> {
    let mut session = state.session(&kind)?.write().await;
    session.playback_mut().tick();
    Ok(Json(session.playback().status()))
}

#[derive(Deserialize)]
struct SeekRequest {
    step: usize,
}

async fn seek_handler(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
    Json(req): Json<SeekRequest>,
) -> Result<Json<PlaybackStatus>> {
    let mut session = state.session(&kind)?.write().await;
    session.playback_mut().seek(req.step);
    Ok(Json(session.playback().status()))
}

#[derive(Deserialize)]
struct SpeedRequest {
    speed: PlaybackSpeed,
}

async fn speed_handler(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
    Json(req): Json<SpeedRequest>,
) -> Result<Json<PlaybackStatus>> {
    let mut session = state.session(&kind)?.write().await;
    session.playback_mut().set_speed(req.speed);
    Ok(Json(session.playback().status()))
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
enum StepDirection {
    Forward,
    Backward,
}

#[derive(Deserialize)]
struct StepRequest {
    direction: StepDirection,
}

async fn step_handler(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
    Json(req): Json<StepRequest>,
) -> Result<Json<PlaybackStatus>> {
    let mut session = state.session(&kind)?.write().await;
    match req.direction {
        StepDirection::Forward => session.playback_mut().step_forward(),
        StepDirection::Backward => session.playback_mut().step_backward(),
    };
    Ok(Json(session.playback().status()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_scene::SceneAction;

    fn state() -> Arc<AppState> {
        Arc::new(AppState::new(VisConfig::default()))
    }

    fn path(kind: &str) -> Path<String> {
        Path(kind.to_string())
    }

    #[test]
    fn scene_starts_with_initial_values() {
        let state = state();
        let Json(scene) = tokio_test::block_on(scene_handler(State(state), path("heap"))).unwrap();
        assert_eq!(scene.values()[0], 5);
        assert_eq!(scene.nodes.len(), 7);
    }

    #[test]
    fn unknown_kind_is_not_found() {
        let state = state();
        let err = tokio_test::block_on(scene_handler(State(state), path("avl"))).unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn op_returns_storyboard_and_second_op_conflicts() {
        let state = state();
        let Json(first) = tokio_test::block_on(op_handler(
            State(state.clone()),
            path("bst"),
            Json(Operation::Search { value: 37 }),
        ))
        .unwrap();
        assert_eq!(first.scenes.last().unwrap().action, Some(SceneAction::End));
        assert!(first.playback.is_animating);
        assert_eq!(first.playback.state, PlaybackState::Playing);

        let err = tokio_test::block_on(op_handler(
            State(state.clone()),
            path("bst"),
            Json(Operation::Insert { value: 1 }),
        ))
        .unwrap_err();
        assert_eq!(err.toast().title, "Animation in progress");
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);

        // Other kinds have their own gate.
        let other = tokio_test::block_on(op_handler(
            State(state),
            path("splay"),
            Json(Operation::Search { value: 35 }),
        ));
        assert!(other.is_ok());
    }

    #[test]
    fn fast_forward_reopens_the_gate() {
        let state = state();
        let Json(extracted) = tokio_test::block_on(op_handler(
            State(state.clone()),
            path("heap"),
            Json(Operation::ExtractMin),
        ))
        .unwrap();
        assert!(extracted.playback.is_animating);

        let Json(status) =
            tokio_test::block_on(fast_forward_handler(State(state.clone()), path("heap"))).unwrap();
        assert!(!status.is_animating);
        assert_eq!(status.state, PlaybackState::Finished);

        let Json(status) =
            tokio_test::block_on(status_handler(State(state), path("heap"))).unwrap();
        assert_eq!(status.len, 6);
        assert_eq!(status.values[0], 10);
    }

    #[test]
    fn step_and_seek_move_the_cursor() {
        let state = state();
        let Json(searched) = tokio_test::block_on(op_handler(
            State(state.clone()),
            path("bst"),
            Json(Operation::Search { value: 12 }),
        ))
        .unwrap();
        assert_eq!(searched.playback.current_step, 0);

        let Json(status) = tokio_test::block_on(step_handler(
            State(state.clone()),
            path("bst"),
            Json(StepRequest {
                direction: StepDirection::Forward,
            }),
        ))
        .unwrap();
        assert_eq!(status.current_step, 1);
        assert_eq!(status.state, PlaybackState::Paused);

        let Json(status) = tokio_test::block_on(seek_handler(
            State(state.clone()),
            path("bst"),
            Json(SeekRequest { step: 0 }),
        ))
        .unwrap();
        assert_eq!(status.current_step, 0);

        let Json(status) = tokio_test::block_on(speed_handler(
            State(state),
            path("bst"),
            Json(SpeedRequest {
                speed: PlaybackSpeed::Fastest,
            }),
        ))
        .unwrap();
        assert_eq!(status.ms_per_step, 375);
    }

    #[test]
    fn populate_and_clear() {
        let state = state();
        let Json(populated) = tokio_test::block_on(populate_handler(
            State(state.clone()),
            path("heap"),
            Some(Json(PopulateRequest {
                count: Some(5),
                seed: Some(1),
            })),
        ))
        .unwrap();
        assert_eq!(populated.drawn.len(), 5);
        assert_eq!(populated.status.len, 12);

        let Json(cleared) =
            tokio_test::block_on(clear_handler(State(state), path("heap"))).unwrap();
        assert_eq!(cleared.len, 0);
        assert!(cleared.values.is_empty());
    }

    #[test]
    fn populate_without_body_uses_rolling_seed() {
        let state = state();
        let Json(first) =
            tokio_test::block_on(populate_handler(State(state.clone()), path("heap"), None))
                .unwrap();
        assert_eq!(first.drawn.len(), 10);
        assert_eq!(state.next_seed(), state.config.seed + 1);
    }

    #[test]
    fn populate_for_unknown_kind_keeps_the_seed() {
        let state = state();
        let err = tokio_test::block_on(populate_handler(State(state.clone()), path("avl"), None))
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(state.next_seed(), state.config.seed);
    }

    #[test]
    fn io_failure_is_a_server_error() {
        let err = Error::Io(std::io::Error::other("address in use"));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
