//! End-to-end navigator sessions over the sample graph fixture

use std::path::PathBuf;

use pretty_assertions::assert_eq;
use semantic_navigator::{
    EdgeDirection, FillState, GraphDataset, JourneyStatus, ManualClock, Navigator,
    NavigatorAction, NavigatorConfig, StrokeState, ViewMode,
};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/sample_graph.json")
}

fn session() -> (Navigator, ManualClock) {
    let dataset = GraphDataset::from_json_file(fixture_path()).expect("fixture loads");
    let clock = ManualClock::new();
    let nav = Navigator::new(dataset, NavigatorConfig::default()).with_clock(clock.clone());
    (nav, clock)
}

fn visible_ids(nav: &Navigator) -> Vec<String> {
    nav.visible_nodes().iter().map(|n| n.id.clone()).collect()
}

#[test]
fn fixture_is_clean() {
    let (nav, _) = session();
    let report = nav.dataset().validate();
    assert!(report.is_clean(), "{:?}", report);
    assert_eq!(nav.dataset().nodes().len(), 8);
    assert_eq!(nav.dataset().personas()[0].color_tag, "#f59e0b");
}

#[test]
fn finance_filter_keeps_tagged_nodes_and_topic() {
    let (mut nav, _) = session();
    assert!(nav.toggle_topic("topic_finance"));

    let ids = visible_ids(&nav);
    assert_eq!(ids, vec!["page_mba", "section_fees", "topic_finance"]);
    assert!(!ids.contains(&"page_alumni".to_string()));

    let edges: Vec<(String, String)> = nav
        .visible_edges()
        .iter()
        .map(|e| (e.from.clone(), e.to.clone()))
        .collect();
    assert_eq!(
        edges,
        vec![
            ("page_mba".to_string(), "topic_finance".to_string()),
            ("section_fees".to_string(), "topic_finance".to_string()),
        ]
    );

    // Toggling again drops the filter
    assert!(!nav.toggle_topic("topic_finance"));
    assert_eq!(visible_ids(&nav).len(), 8);
}

#[test]
fn stats_follow_the_filter() {
    let (mut nav, _) = session();
    let stats = nav.stats();
    assert_eq!((stats.visible_node_count, stats.total_nodes), (8, 8));
    assert_eq!((stats.visible_edge_count, stats.total_edges), (8, 8));

    nav.toggle_topic("topic_finance");
    let stats = nav.stats();
    assert_eq!(stats.visible_node_count, 3);
    assert_eq!(stats.visible_edge_count, 2);
    assert_eq!(stats.to_string(), "3/8 nodes | 2/8 edges");

    nav.clear_filters();
    assert_eq!(nav.stats().visible_node_count, 8);
}

#[test]
fn five_step_journey_completes_on_last_tick() {
    let (mut nav, _) = session();
    nav.select_persona("working_executive");
    nav.start();
    assert_eq!(nav.journey_status(), JourneyStatus::Playing);
    assert_eq!(nav.current_journey_node(), Some("page_home"));

    for _ in 0..3 {
        assert!(nav.tick());
    }
    assert_eq!(nav.journey_step(), 3);
    assert_eq!(nav.journey_status(), JourneyStatus::Playing);

    assert!(nav.tick());
    assert_eq!(nav.journey_step(), 4);
    assert_eq!(nav.journey_status(), JourneyStatus::Complete);
    assert_eq!(nav.progress(), 1.0);

    // Complete is terminal for ticks
    assert!(!nav.tick());
    assert_eq!(nav.journey_step(), 4);
}

#[test]
fn clock_driven_playback() {
    let (mut nav, clock) = session();
    let interval = nav.config().journey.tick_interval();

    nav.select_persona("working_executive");
    nav.start();
    assert_eq!(nav.next_tick_in(), Some(interval));

    clock.advance(interval / 2);
    assert_eq!(nav.update(), 0);
    assert_eq!(nav.journey_step(), 0);

    clock.advance(interval / 2);
    assert_eq!(nav.update(), 1);
    assert_eq!(nav.journey_step(), 1);

    // A long stall catches up, then stops at the end
    clock.advance(interval * 10);
    assert_eq!(nav.update(), 3);
    assert_eq!(nav.journey_status(), JourneyStatus::Complete);
    assert_eq!(nav.next_tick_in(), None);
}

#[test]
fn pause_then_start_resumes_from_same_step() {
    let (mut nav, clock) = session();
    let interval = nav.config().journey.tick_interval();

    nav.select_persona("working_executive");
    nav.start();
    nav.tick();
    nav.tick();
    nav.pause();
    assert_eq!(nav.journey_status(), JourneyStatus::Paused);
    assert_eq!(nav.next_tick_in(), None);

    clock.advance(interval * 5);
    assert_eq!(nav.update(), 0);
    assert_eq!(nav.journey_step(), 2);

    nav.start();
    assert_eq!(nav.journey_status(), JourneyStatus::Playing);
    assert_eq!(nav.journey_step(), 2);
}

#[test]
fn reset_mid_playback_cancels_pending_tick() {
    let (mut nav, clock) = session();
    let interval = nav.config().journey.tick_interval();

    nav.select_persona("working_executive");
    nav.start();
    nav.tick();
    nav.reset();
    assert_eq!(nav.journey_step(), 0);
    assert_eq!(nav.journey_status(), JourneyStatus::Idle);
    assert_eq!(nav.next_tick_in(), None);

    clock.advance(interval * 3);
    assert_eq!(nav.update(), 0);
    assert!(!nav.tick());
    assert_eq!(nav.journey_step(), 0);

    nav.start();
    assert_eq!(nav.journey_status(), JourneyStatus::Playing);
}

#[test]
fn unknown_node_has_no_detail() {
    let (mut nav, _) = session();
    assert_eq!(nav.select_node("does_not_exist"), None);
    assert_eq!(nav.selected_node(), Some("does_not_exist"));
    assert_eq!(nav.selected_node_detail(), None);
    assert_eq!(nav.resolve_detail(""), None);
}

#[test]
fn detail_lists_topics_neighbours_and_personas() {
    let (mut nav, _) = session();
    let detail = nav.select_node("page_mba").expect("page_mba resolves");

    assert_eq!(detail.title, "MBA Programme");
    let topics: Vec<&str> = detail.topics.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(topics, vec!["topic_finance", "topic_leadership"]);

    let related: Vec<(&str, &str, EdgeDirection)> = detail
        .related_nodes
        .iter()
        .map(|r| (r.node.id.as_str(), r.edge_type.as_str(), r.direction))
        .collect();
    assert_eq!(
        related,
        vec![
            ("page_home", "links_to", EdgeDirection::Incoming),
            ("topic_finance", "has_topic", EdgeDirection::Outgoing),
            ("topic_leadership", "has_topic", EdgeDirection::Outgoing),
        ]
    );

    let personas: Vec<&str> = detail.relevant_personas.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(personas, vec!["working_executive", "prospective_student"]);
}

#[test]
fn navigate_hands_selection_to_host() {
    let (mut nav, _) = session();
    assert!(!nav.navigate());

    nav.select_node("page_apply");
    assert!(nav.navigate());
    assert_eq!(
        nav.take_actions(),
        vec![NavigatorAction::Navigate {
            node_id: "page_apply".to_string()
        }]
    );
    assert!(nav.take_actions().is_empty());
}

#[test]
fn draw_list_highlights_journey() {
    let (mut nav, _) = session();
    nav.select_persona("working_executive");
    nav.start();
    nav.tick();

    let list = nav.draw_list();
    assert_eq!(list.nodes.len(), 8);
    assert_eq!(list.accent_color.as_deref(), Some("#f59e0b"));

    let fill = |id: &str| list.node(id).map(|n| n.fill);
    assert_eq!(fill("page_emba"), Some(FillState::Active));
    assert_eq!(fill("page_home"), Some(FillState::OnPath));
    assert_eq!(fill("page_alumni"), Some(FillState::Default));

    let journey_edges: Vec<(&str, &str)> = list
        .edges
        .iter()
        .filter(|e| e.stroke == StrokeState::Journey)
        .map(|e| (e.from.as_str(), e.to.as_str()))
        .collect();
    assert_eq!(journey_edges, vec![("page_home", "page_emba")]);
}

#[test]
fn journey_through_filtered_nodes_keeps_playing() {
    let (mut nav, _) = session();
    nav.toggle_topic("topic_finance");
    nav.select_persona("working_executive");

    let coverage = nav.journey_coverage().expect("persona selected");
    assert_eq!(coverage.steps, 5);
    assert_eq!(coverage.resolved_steps, 5);
    assert_eq!(coverage.visible_steps, 2);
    assert!(!coverage.is_complete());

    // page_home is hidden but still the active step
    nav.start();
    assert_eq!(nav.current_journey_node(), Some("page_home"));
    assert!(nav.draw_list().node("page_home").is_none());
}

#[test]
fn view_mode_keeps_session_state() {
    let (mut nav, _) = session();
    nav.toggle_topic("topic_leadership");
    nav.select_node("page_emba");
    let semantic = nav.layout().get("page_emba");

    nav.set_view_mode(ViewMode::Traditional);
    assert_eq!(nav.view_mode(), ViewMode::Traditional);
    assert!(nav.selected_topics().contains("topic_leadership"));
    assert_eq!(nav.selected_node(), Some("page_emba"));
    assert!(nav.layout().get("page_emba").is_some());
    assert_ne!(nav.layout().get("page_emba"), semantic);
}

#[test]
fn independent_sessions_do_not_share_state() {
    let (mut a, _) = session();
    let (b, _) = session();
    a.toggle_topic("topic_finance");
    a.select_persona("prospective_student");

    assert_eq!(b.visible_nodes().len(), 8);
    assert_eq!(b.selected_persona(), None);
    // Same seed, same layout
    for node in b.dataset().nodes() {
        assert_eq!(a.radial_layout().get(&node.id), b.radial_layout().get(&node.id));
    }
}
