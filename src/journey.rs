//! Persona journey player - playback state machine
//!
//! ```text
//!            start                tick (last step)
//!   Idle ───────────► Playing ─────────────────► Complete
//!    ▲                 │  ▲                          │
//!    │           pause │  │ start                    │ start (from step 0)
//!    │                 ▼  │                          │
//!    │               Paused                          │
//!    └──────────── reset (from any state) ◄──────────┘
//! ```
//!
//! Steps advance one at a time and never skip. Reaching the last journey
//! index moves the player to `Complete`; the last step stays on screen.
//!
//! Journey steps are plain node ids. A step whose id is not in the dataset
//! (or is filtered out) still counts as a step; it simply highlights nothing.

use navigator_types::Edge;
use thiserror::Error;

/// Playback status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum JourneyStatus {
    #[default]
    Idle,
    Playing,
    Paused,
    Complete,
}

impl JourneyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JourneyStatus::Idle => "idle",
            JourneyStatus::Playing => "playing",
            JourneyStatus::Paused => "paused",
            JourneyStatus::Complete => "complete",
        }
    }
}

/// Error types for invalid playback transitions
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("No persona selected")]
    NoPersonaSelected,

    #[error("Persona {0} has an empty journey")]
    EmptyJourney(String),

    #[error("Journey is already playing")]
    AlreadyPlaying,

    #[error("Journey is not playing (status: {})", .0.as_str())]
    NotPlaying(JourneyStatus),
}

/// Result type for playback transitions
pub type TransitionResult<T> = Result<T, TransitionError>;

/// Playback state for the selected persona's journey
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JourneyPlayer {
    persona_id: Option<String>,
    journey: Vec<String>,
    status: JourneyStatus,
    step: usize,
}

impl JourneyPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // TRANSITIONS
    // =========================================================================

    /// Select a persona and load its journey. Playback returns to `Idle` at
    /// step 0 regardless of the previous state.
    pub fn select_persona(&mut self, persona_id: impl Into<String>, journey: Vec<String>) {
        self.persona_id = Some(persona_id.into());
        self.journey = journey;
        self.status = JourneyStatus::Idle;
        self.step = 0;
    }

    /// Drop the persona selection entirely
    pub fn clear_persona(&mut self) {
        *self = Self::default();
    }

    /// Begin or resume playback
    ///
    /// From `Complete` playback restarts at step 0. A single-step journey is
    /// complete as soon as it starts.
    pub fn start(&mut self) -> TransitionResult<JourneyStatus> {
        let persona_id = self
            .persona_id
            .as_ref()
            .ok_or(TransitionError::NoPersonaSelected)?;
        if self.journey.is_empty() {
            return Err(TransitionError::EmptyJourney(persona_id.clone()));
        }

        match self.status {
            JourneyStatus::Playing => return Err(TransitionError::AlreadyPlaying),
            JourneyStatus::Complete => self.step = 0,
            JourneyStatus::Idle | JourneyStatus::Paused => {}
        }

        self.status = if self.step >= self.last_step() {
            JourneyStatus::Complete
        } else {
            JourneyStatus::Playing
        };
        Ok(self.status)
    }

    /// Freeze playback on the current step
    pub fn pause(&mut self) -> TransitionResult<()> {
        if self.status != JourneyStatus::Playing {
            return Err(TransitionError::NotPlaying(self.status));
        }
        self.status = JourneyStatus::Paused;
        Ok(())
    }

    /// Back to step 0, `Idle`. Valid from every state.
    pub fn reset(&mut self) {
        self.status = JourneyStatus::Idle;
        self.step = 0;
    }

    /// Advance exactly one step. Returns the new step index.
    pub fn tick(&mut self) -> TransitionResult<usize> {
        if self.status != JourneyStatus::Playing {
            return Err(TransitionError::NotPlaying(self.status));
        }

        self.step = (self.step + 1).min(self.last_step());
        if self.step == self.last_step() {
            self.status = JourneyStatus::Complete;
        }
        Ok(self.step)
    }

    // =========================================================================
    // STATE
    // =========================================================================

    pub fn status(&self) -> JourneyStatus {
        self.status
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn persona_id(&self) -> Option<&str> {
        self.persona_id.as_deref()
    }

    pub fn journey(&self) -> &[String] {
        &self.journey
    }

    pub fn is_playing(&self) -> bool {
        self.status == JourneyStatus::Playing
    }

    /// Node id at the current step
    pub fn current_node(&self) -> Option<&str> {
        self.journey.get(self.step).map(String::as_str)
    }

    /// Fraction of the journey covered, 0.0 to 1.0
    pub fn progress(&self) -> f32 {
        match self.journey.len() {
            0 => 0.0,
            1 => {
                if self.status == JourneyStatus::Complete {
                    1.0
                } else {
                    0.0
                }
            }
            len => self.step as f32 / (len - 1) as f32,
        }
    }

    fn last_step(&self) -> usize {
        self.journey.len().saturating_sub(1)
    }

    // =========================================================================
    // HIGHLIGHTING
    // =========================================================================

    /// The node at the current step, while playing
    pub fn is_node_active(&self, node_id: &str) -> bool {
        self.status == JourneyStatus::Playing && self.current_node() == Some(node_id)
    }

    /// Whether the node appears anywhere on the journey
    pub fn is_node_in_journey(&self, node_id: &str) -> bool {
        self.journey.iter().any(|id| id == node_id)
    }

    /// The edge just traversed: previous step -> current step
    pub fn is_edge_on_journey(&self, edge: &Edge) -> bool {
        if !matches!(
            self.status,
            JourneyStatus::Playing | JourneyStatus::Complete
        ) || self.step == 0
        {
            return false;
        }
        match (self.journey.get(self.step - 1), self.journey.get(self.step)) {
            (Some(prev), Some(current)) => *prev == edge.from && *current == edge.to,
            _ => false,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
