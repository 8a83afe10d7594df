//! Navigator - owns one exploration session over one dataset
//!
//! # Architecture
//!
//! ```text
//! GraphDataset (owned, immutable)
//!        │
//!        ▼
//! LayoutEngine ──► radial Layout + tiered Layout (computed once)
//!        │
//!        ▼
//! SessionState (view mode, topic selection, selected node, JourneyPlayer)
//!        │                                   ▲
//!        │                                   │ tick
//!        ├──► VisibleGraph ──► GraphStats    JourneyTimer ◄── Clock
//!        ├──► NodeDetail
//!        └──► DrawList
//! ```
//!
//! All session mutation goes through `Navigator` methods. Invalid journey
//! transitions are logged at debug level and otherwise ignored.
//!
//! # Usage
//!
//! ```ignore
//! let mut nav = Navigator::new(dataset, NavigatorConfig::default());
//! nav.toggle_topic("topic_finance");
//! nav.select_persona("working_executive");
//! nav.start();
//!
//! // Each frame:
//! nav.update();
//! let draw_list = nav.draw_list();
//! ```

use std::time::Duration;

use navigator_types::{Edge, Node};

use crate::clock::{Clock, JourneyTimer, SystemClock};
use crate::config::NavigatorConfig;
use crate::dataset::GraphDataset;
use crate::detail::{resolve_detail, NodeDetail};
use crate::filter::{TopicSelection, VisibleGraph};
use crate::journey::{JourneyPlayer, JourneyStatus};
use crate::layout::{Layout, LayoutEngine};
use crate::render::{DrawList, DrawListBuilder, RenderOptions};
use crate::stats::{journey_coverage, GraphStats, JourneyCoverage};

/// Which placement the draw-list uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Radial layout grouped by semantic rings
    #[default]
    Semantic,
    /// Tiered layout, one row per node type
    Traditional,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Semantic => "semantic",
            ViewMode::Traditional => "traditional",
        }
    }

    /// Get display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            ViewMode::Semantic => "Semantic",
            ViewMode::Traditional => "Traditional",
        }
    }

    pub fn all() -> &'static [ViewMode] {
        &[ViewMode::Semantic, ViewMode::Traditional]
    }
}

/// Signals for the host, drained with `take_actions`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigatorAction {
    /// User asked to open the page behind this node
    Navigate { node_id: String },
}

/// Mutable session state
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub view_mode: ViewMode,
    pub selected_topics: TopicSelection,
    pub selected_node: Option<String>,
    pub journey: JourneyPlayer,
}

pub struct Navigator {
    config: NavigatorConfig,
    dataset: GraphDataset,
    radial: Layout,
    tiered: Layout,
    session: SessionState,
    timer: JourneyTimer,
    clock: Box<dyn Clock>,
    actions: Vec<NavigatorAction>,
}

impl std::fmt::Debug for Navigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigator")
            .field("nodes", &self.dataset.nodes().len())
            .field("session", &self.session)
            .field("timer", &self.timer)
            .finish_non_exhaustive()
    }
}

impl Navigator {
    /// Build a session over `dataset`. Both layouts are computed here and
    /// never recomputed. Validation findings are logged, not rejected; an
    /// invalid config section falls back to its defaults.
    pub fn new(dataset: GraphDataset, config: NavigatorConfig) -> Self {
        let config = config.or_defaults();
        let report = dataset.validate();
        if !report.is_clean() {
            report.log();
        }

        let mut engine = LayoutEngine::new(&config.layout);
        let radial = engine.compute_layout(dataset.nodes());
        let tiered = engine.compute_tiered(dataset.nodes());

        tracing::info!(
            nodes = dataset.nodes().len(),
            edges = dataset.edges().len(),
            topics = dataset.topics().len(),
            personas = dataset.personas().len(),
            issues = report.issue_count(),
            "navigator ready"
        );

        Self {
            timer: JourneyTimer::new(config.journey.tick_interval()),
            config,
            dataset,
            radial,
            tiered,
            session: SessionState::default(),
            clock: Box::new(SystemClock::new()),
            actions: Vec::new(),
        }
    }

    /// Replace the time source. Any pending tick is dropped.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self.timer.cancel();
        if self.session.journey.is_playing() {
            self.timer.schedule(self.clock.now());
        }
        self
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    pub fn dataset(&self) -> &GraphDataset {
        &self.dataset
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Layout for the current view mode
    pub fn layout(&self) -> &Layout {
        match self.session.view_mode {
            ViewMode::Semantic => &self.radial,
            ViewMode::Traditional => &self.tiered,
        }
    }

    pub fn radial_layout(&self) -> &Layout {
        &self.radial
    }

    pub fn tiered_layout(&self) -> &Layout {
        &self.tiered
    }

    // =========================================================================
    // VIEW + FILTER
    // =========================================================================

    pub fn view_mode(&self) -> ViewMode {
        self.session.view_mode
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        if self.session.view_mode != mode {
            tracing::debug!(mode = mode.as_str(), "view mode changed");
            self.session.view_mode = mode;
        }
    }

    /// Toggle one topic in the filter. Returns true when it is now selected.
    pub fn toggle_topic(&mut self, topic_id: &str) -> bool {
        let selected = self.session.selected_topics.toggle(topic_id);
        tracing::debug!(topic_id, selected, "topic filter toggled");
        selected
    }

    pub fn clear_filters(&mut self) {
        self.session.selected_topics.clear();
    }

    pub fn selected_topics(&self) -> &TopicSelection {
        &self.session.selected_topics
    }

    pub fn visible_graph(&self) -> VisibleGraph<'_> {
        VisibleGraph::compute(
            self.dataset.nodes(),
            self.dataset.edges(),
            &self.session.selected_topics,
        )
    }

    pub fn visible_nodes(&self) -> Vec<&Node> {
        self.visible_graph().nodes
    }

    pub fn visible_edges(&self) -> Vec<&Edge> {
        self.visible_graph().edges
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats::compute(&self.dataset, &self.visible_graph())
    }

    /// Coverage of the selected persona's journey under the current filter
    pub fn journey_coverage(&self) -> Option<JourneyCoverage> {
        let persona_id = self.session.journey.persona_id()?;
        let visible = self.visible_graph();
        journey_coverage(&self.dataset, persona_id, &visible.node_ids())
    }

    // =========================================================================
    // JOURNEY
    // =========================================================================

    /// Select a persona and load its journey; playback returns to `Idle`.
    ///
    /// An id with no persona record is still selected, with an empty journey.
    pub fn select_persona(&mut self, persona_id: &str) {
        let journey = match self.dataset.persona(persona_id) {
            Some(persona) => persona.journey.clone(),
            None => {
                tracing::debug!(persona_id, "unknown persona selected, journey is empty");
                Vec::new()
            }
        };
        self.timer.cancel();
        self.session.journey.select_persona(persona_id, journey);
        tracing::debug!(persona_id, "persona selected");
    }

    pub fn clear_persona(&mut self) {
        self.timer.cancel();
        self.session.journey.clear_persona();
    }

    pub fn selected_persona(&self) -> Option<&str> {
        self.session.journey.persona_id()
    }

    pub fn start(&mut self) {
        match self.session.journey.start() {
            Ok(JourneyStatus::Playing) => {
                self.timer.schedule(self.clock.now());
                tracing::debug!(step = self.session.journey.step(), "journey playing");
            }
            Ok(status) => {
                self.timer.cancel();
                tracing::debug!(status = status.as_str(), "journey started");
            }
            Err(e) => tracing::debug!(error = %e, "start ignored"),
        }
    }

    pub fn pause(&mut self) {
        match self.session.journey.pause() {
            Ok(()) => {
                self.timer.cancel();
                tracing::debug!(step = self.session.journey.step(), "journey paused");
            }
            Err(e) => tracing::debug!(error = %e, "pause ignored"),
        }
    }

    pub fn reset(&mut self) {
        self.timer.cancel();
        self.session.journey.reset();
        tracing::debug!("journey reset");
    }

    /// Advance one step by hand. Returns true when the step moved.
    ///
    /// The timer restarts from now, so the next automatic tick comes a full
    /// interval after this one.
    pub fn tick(&mut self) -> bool {
        let moved = self.advance();
        if moved && self.session.journey.is_playing() {
            self.timer.schedule(self.clock.now());
        }
        moved
    }

    fn advance(&mut self) -> bool {
        match self.session.journey.tick() {
            Ok(step) => {
                if self.session.journey.status() == JourneyStatus::Complete {
                    self.timer.cancel();
                    tracing::debug!(step, "journey complete");
                } else {
                    tracing::debug!(step, "journey advanced");
                }
                true
            }
            Err(e) => {
                tracing::debug!(error = %e, "tick ignored");
                false
            }
        }
    }

    /// Fire every tick that is due by the injected clock. Returns the number
    /// of steps taken.
    pub fn update(&mut self) -> usize {
        let now = self.clock.now();
        self.update_at(now)
    }

    /// Fire every tick due at `now`
    pub fn update_at(&mut self, now: Duration) -> usize {
        let mut fired = 0;
        while self.timer.fire_if_due(now) {
            if !self.advance() {
                self.timer.cancel();
                break;
            }
            fired += 1;
        }
        fired
    }

    /// Time until the next scheduled tick, `None` when nothing is pending
    pub fn next_tick_in(&self) -> Option<Duration> {
        self.timer.remaining(self.clock.now())
    }

    pub fn journey(&self) -> &JourneyPlayer {
        &self.session.journey
    }

    pub fn journey_status(&self) -> JourneyStatus {
        self.session.journey.status()
    }

    pub fn journey_step(&self) -> usize {
        self.session.journey.step()
    }

    pub fn progress(&self) -> f32 {
        self.session.journey.progress()
    }

    pub fn current_journey_node(&self) -> Option<&str> {
        self.session.journey.current_node()
    }

    pub fn is_node_active(&self, node_id: &str) -> bool {
        self.session.journey.is_node_active(node_id)
    }

    pub fn is_node_in_journey(&self, node_id: &str) -> bool {
        self.session.journey.is_node_in_journey(node_id)
    }

    pub fn is_edge_on_journey(&self, edge: &Edge) -> bool {
        self.session.journey.is_edge_on_journey(edge)
    }

    // =========================================================================
    // SELECTION
    // =========================================================================

    /// Select a node (no visibility check) and return its detail
    pub fn select_node(&mut self, node_id: &str) -> Option<NodeDetail> {
        self.session.selected_node = Some(node_id.to_string());
        let detail = self.resolve_detail(node_id);
        if detail.is_none() {
            tracing::debug!(node_id, "selected node is not in the dataset");
        }
        detail
    }

    pub fn clear_selection(&mut self) {
        self.session.selected_node = None;
    }

    pub fn selected_node(&self) -> Option<&str> {
        self.session.selected_node.as_deref()
    }

    pub fn selected_node_detail(&self) -> Option<NodeDetail> {
        self.selected_node().and_then(|id| self.resolve_detail(id))
    }

    pub fn resolve_detail(&self, node_id: &str) -> Option<NodeDetail> {
        resolve_detail(&self.dataset, node_id, self.config.detail.related_node_limit)
    }

    /// Queue a navigate action for the selected node. Returns false when
    /// nothing is selected.
    pub fn navigate(&mut self) -> bool {
        let Some(node_id) = self.session.selected_node.clone() else {
            return false;
        };
        tracing::debug!(node_id = %node_id, "navigate requested");
        self.actions.push(NavigatorAction::Navigate { node_id });
        true
    }

    pub fn take_actions(&mut self) -> Vec<NavigatorAction> {
        std::mem::take(&mut self.actions)
    }

    // =========================================================================
    // RENDER
    // =========================================================================

    pub fn draw_list(&self) -> DrawList {
        self.draw_list_with(&RenderOptions {
            selected_node: self.selected_node(),
            ..RenderOptions::default()
        })
    }

    pub fn draw_list_with(&self, opts: &RenderOptions<'_>) -> DrawList {
        let visible = self.visible_graph();
        DrawListBuilder::new(&self.dataset, self.layout(), &self.config.render).build(
            &visible,
            &self.session.journey,
            opts,
        )
    }

    /// End the session, handing back its final state and any actions the
    /// host has not drained yet
    pub fn dispose(self) -> (SessionState, Vec<NavigatorAction>) {
        tracing::debug!(
            pending_tick = self.timer.is_pending(),
            actions = self.actions.len(),
            "navigator disposed"
        );
        (self.session, self.actions)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::clock::ManualClock;
    use navigator_types::{GraphData, NodeType, Persona, Topic};
    use proptest::prelude::*;

    const TOPICS: [&str; 3] = ["t_finance", "t_leadership", "t_unknown"];
    const PERSONAS: [&str; 3] = ["exec", "student", "nobody"];

    #[derive(Debug, Clone)]
    enum Op {
        ToggleTopic(usize),
        ClearFilters,
        SelectPersona(usize),
        Start,
        Pause,
        Reset,
        Tick,
        UpdateAt(u64),
        SelectNode(String),
    }

    fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => (0..TOPICS.len()).prop_map(Op::ToggleTopic),
            1 => Just(Op::ClearFilters),
            2 => (0..PERSONAS.len()).prop_map(Op::SelectPersona),
            2 => Just(Op::Start),
            1 => Just(Op::Pause),
            1 => Just(Op::Reset),
            2 => Just(Op::Tick),
            2 => (0u64..10_000).prop_map(Op::UpdateAt),
            2 => ".*".prop_map(Op::SelectNode),
        ]
    }

    fn dataset() -> GraphDataset {
        GraphDataset::new(GraphData {
            nodes: vec![
                Node::new("home", NodeType::Page, "Home"),
                Node::new("mba", NodeType::Page, "MBA").with_topics(["t_finance", "t_leadership"]),
                Node::new("fees", NodeType::Section, "Fees").with_topics(["t_finance"]),
                Node::new("t_finance", NodeType::Topic, "Finance"),
                Node::new("t_leadership", NodeType::Topic, "Leadership"),
                Node::new("mba", NodeType::Page, "MBA again"),
            ],
            edges: vec![
                Edge::new("home", "mba", "links_to"),
                Edge::new("mba", "fees", "contains"),
                Edge::new("fees", "t_finance", "has_topic"),
                Edge::new("mba", "t_leadership", "has_topic"),
                Edge::new("home", "ghost", "links_to"),
            ],
            topics: vec![
                Topic::new("t_finance", "Finance", 5, 0.9),
                Topic::new("t_leadership", "Leadership", 3, 0.6),
            ],
            personas: vec![
                Persona::new("exec", "Executive").with_journey(["home", "mba", "ghost", "fees"]),
                Persona::new("student", "Student").with_journey(["mba"]),
            ],
        })
    }

    proptest! {
        #[test]
        fn stats_match_visible_sets_after_every_operation(
            ops in prop::collection::vec(arb_op(), 0..40),
        ) {
            let clock = ManualClock::new();
            let mut nav = Navigator::new(dataset(), NavigatorConfig::default())
                .with_clock(clock.clone());
            let mut now = Duration::ZERO;

            for op in ops {
                match op {
                    Op::ToggleTopic(i) => { nav.toggle_topic(TOPICS[i]); }
                    Op::ClearFilters => nav.clear_filters(),
                    Op::SelectPersona(i) => nav.select_persona(PERSONAS[i]),
                    Op::Start => nav.start(),
                    Op::Pause => nav.pause(),
                    Op::Reset => nav.reset(),
                    Op::Tick => { nav.tick(); }
                    Op::UpdateAt(ms) => {
                        now += Duration::from_millis(ms);
                        clock.set(now);
                        nav.update_at(now);
                    }
                    Op::SelectNode(id) => {
                        nav.select_node(&id);
                        prop_assert_eq!(nav.selected_node(), Some(id.as_str()));
                    }
                }

                let stats = nav.stats();
                prop_assert_eq!(stats.visible_node_count, nav.visible_nodes().len());
                prop_assert_eq!(stats.visible_edge_count, nav.visible_edges().len());
                prop_assert_eq!(stats.total_nodes, 6);
                prop_assert_eq!(stats.total_edges, 5);
            }
        }

        #[test]
        fn select_node_accepts_any_string(id in ".*") {
            let mut nav = Navigator::new(dataset(), NavigatorConfig::default());
            let detail = nav.select_node(&id);
            prop_assert_eq!(nav.selected_node(), Some(id.as_str()));
            prop_assert_eq!(detail.is_some(), nav.dataset().contains_node(&id));
        }
    }
}
