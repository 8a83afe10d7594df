//! Semantic Navigator
//!
//! Graph exploration and persona-journey simulation core for the Graph
//! Navigator view. A `Navigator` owns one dataset and one session: topic
//! filtering, journey playback, node selection and the draw-list a renderer
//! paints each frame.
//!
//! ```text
//! GraphDataset ──► LayoutEngine (once)
//!                       │
//!        ┌──────────────┴──────────────┐
//!        ▼                             ▼
//!  TopicSelection                JourneyPlayer ◄── JourneyTimer ◄── Clock
//!        │                             │
//!        └──────────┬──────────────────┘
//!                   ▼
//!     NodeDetail · GraphStats · DrawList
//! ```

pub mod clock;
pub mod config;
pub mod dataset;
pub mod detail;
pub mod error;
pub mod filter;
pub mod journey;
pub mod layout;
pub mod navigator;
pub mod render;
pub mod stats;

pub use clock::{Clock, JourneyTimer, ManualClock, SystemClock};
pub use config::NavigatorConfig;
pub use dataset::{GraphDataset, ValidationReport};
pub use detail::{resolve_detail, EdgeDirection, NodeDetail, RelatedNode};
pub use error::{ConfigError, DatasetError, NavigatorError, Result};
pub use filter::{TopicSelection, VisibleGraph};
pub use journey::{JourneyPlayer, JourneyStatus, TransitionError, TransitionResult};
pub use layout::{Bounds, Layout, LayoutEngine, Position};
pub use navigator::{Navigator, NavigatorAction, SessionState, ViewMode};
pub use render::{DrawEdge, DrawList, DrawNode, FillState, RenderOptions, StrokeState};
pub use stats::{
    GraphStats, JourneyCoverage, TopicCooccurrence, TopicDistribution, TopicDiversity, TopicPages,
};

pub use navigator_types as types;
