//! Arbor Visualizer
//!
//! Runs structure operations into storyboards and plays them back.
//!
//! # Architecture
//!
//! - **Session**: one structure, its scene producer and its playback; gates
//!   new operations while a storyboard is still playing
//! - **Playback**: step through a storyboard at one of five speeds
//! - **REST API**: run operations, control playback, fetch the current scene
//!
//! # Usage
//!
//! ```ignore
//! let config = VisConfig::from_env()?;
//! let mut session = Session::new(StructureKind::Bst, &config);
//! let scenes = session.run(Operation::Insert { value: 42 })?;
//!
//! VisServer::new(config).serve().await?;
//! ```

mod config;
mod error;
mod playback;
mod server;
mod session;

pub use config::VisConfig;
pub use error::{Error, Result};
pub use playback::{Playback, PlaybackSpeed, PlaybackState, PlaybackStatus};
pub use server::{AppState, OpResponse, SessionStatus, VisServer};
pub use session::{Session, DEFAULT_POPULATE_COUNT, MAX_POPULATE_COUNT, POPULATE_VALUE_LIMIT};
