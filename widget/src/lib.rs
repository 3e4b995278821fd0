//! Embeddable chat widget for the aulabot course assistant.
//!
//! The pieces compose in layers: [`transition`] is the pure
//! conversation logic, [`controller`] owns the transcript and the
//! typing/cancellation lifecycle, and [`runtime`] drives both against
//! a [`ChatApi`] backend and a [`RenderSink`] host surface.

pub mod api;
pub mod content;
pub mod controller;
pub mod directive;
pub mod fallback;
pub mod message;
pub mod runtime;
pub mod state;
pub mod transition;

pub use api::{ChatApi, IssuedCredentials, ProxyClient, ProxyError, RuntimeConfig};
pub use controller::{PendingTurn, TurnController, TypingToken};
pub use directive::{ChatStatus, RenderDirective, RenderSink};
pub use message::{Menu, MenuChoice, MenuItem, Message, Reply, Role};
pub use runtime::ChatRuntime;
pub use state::{ChatPhase, ChatState, PanelKind};
pub use transition::{transition, ChatEvent, Outcome, Transition};
