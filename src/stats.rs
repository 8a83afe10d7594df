//! Derived statistics
//!
//! Everything here is a pure function of the dataset and the current
//! selection. Nothing is cached; callers recompute after each mutation.

use std::cmp::Ordering;
use std::collections::HashSet;

use navigator_types::{Node, NodeType, Topic};
use serde::Serialize;

use crate::dataset::GraphDataset;
use crate::filter::VisibleGraph;

// =============================================================================
// GRAPH COUNTS
// =============================================================================

/// Total and visible node/edge counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub visible_node_count: usize,
    pub visible_edge_count: usize,
}

impl GraphStats {
    pub fn compute(dataset: &GraphDataset, visible: &VisibleGraph<'_>) -> Self {
        Self {
            total_nodes: dataset.nodes().len(),
            total_edges: dataset.edges().len(),
            visible_node_count: visible.nodes.len(),
            visible_edge_count: visible.edges.len(),
        }
    }

    pub fn is_filtered(&self) -> bool {
        self.visible_node_count != self.total_nodes || self.visible_edge_count != self.total_edges
    }
}

impl std::fmt::Display for GraphStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{} nodes | {}/{} edges",
            self.visible_node_count, self.total_nodes, self.visible_edge_count, self.total_edges
        )
    }
}

// =============================================================================
// TOPIC ANALYTICS
// =============================================================================

/// Summary of topic frequencies
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicDistribution {
    pub topic_count: usize,
    pub total_frequency: u64,
    pub mean_frequency: f64,
    pub median_frequency: f64,
    pub std_frequency: f64,
    pub min_frequency: u32,
    pub max_frequency: u32,
}

/// Frequency distribution, `None` when there are no topics
pub fn topic_distribution(topics: &[Topic]) -> Option<TopicDistribution> {
    if topics.is_empty() {
        return None;
    }

    let mut frequencies: Vec<u32> = topics.iter().map(|t| t.frequency).collect();
    frequencies.sort_unstable();

    let count = frequencies.len();
    let total: u64 = frequencies.iter().map(|&f| u64::from(f)).sum();
    let mean = total as f64 / count as f64;
    let median = if count % 2 == 0 {
        (f64::from(frequencies[count / 2 - 1]) + f64::from(frequencies[count / 2])) / 2.0
    } else {
        f64::from(frequencies[count / 2])
    };
    let variance = frequencies
        .iter()
        .map(|&f| (f64::from(f) - mean).powi(2))
        .sum::<f64>()
        / count as f64;

    Some(TopicDistribution {
        topic_count: count,
        total_frequency: total,
        mean_frequency: mean,
        median_frequency: median,
        std_frequency: variance.sqrt(),
        min_frequency: frequencies[0],
        max_frequency: frequencies[count - 1],
    })
}

/// Ranking score for trending topics
pub fn trending_score(topic: &Topic) -> f64 {
    f64::from(topic.frequency) * (1.0 + f64::from(topic.importance))
}

/// Topics with `frequency >= threshold`, highest score first, ties by id
pub fn trending_topics(topics: &[Topic], threshold: u32, limit: usize) -> Vec<&Topic> {
    let mut trending: Vec<&Topic> = topics.iter().filter(|t| t.frequency >= threshold).collect();
    trending.sort_by(|a, b| {
        trending_score(b)
            .total_cmp(&trending_score(a))
            .then_with(|| a.id.cmp(&b.id))
    });
    trending.truncate(limit);
    trending
}

/// Topics with `frequency <= max_frequency`, most important first, ties by id
pub fn niche_topics(topics: &[Topic], max_frequency: u32) -> Vec<&Topic> {
    let mut niche: Vec<&Topic> = topics
        .iter()
        .filter(|t| t.frequency <= max_frequency)
        .collect();
    niche.sort_by(|a, b| match b.importance.total_cmp(&a.importance) {
        Ordering::Equal => a.id.cmp(&b.id),
        other => other,
    });
    niche
}

// =============================================================================
// TOPIC SPREAD OVER PAGES
// =============================================================================

/// Topic ids on each Page node, restricted to topics the dataset declares
fn page_topic_sets<'a>(dataset: &'a GraphDataset) -> Vec<(&'a Node, Vec<&'a str>)> {
    dataset
        .nodes()
        .iter()
        .filter(|n| n.node_type == NodeType::Page)
        .map(|page| {
            let topics = page
                .topics
                .iter()
                .filter(|id| dataset.topic(id).is_some())
                .map(String::as_str)
                .collect();
            (page, topics)
        })
        .collect()
}

/// How evenly topics are spread over pages
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicDiversity {
    pub total_pages: usize,
    pub total_topics: usize,
    /// Fraction of pages tagged with at least one topic
    pub topic_coverage: f64,
    pub avg_topics_per_page: f64,
    pub median_topics_per_page: f64,
    pub max_topics_per_page: usize,
    /// Shannon entropy (bits) of the pages-per-topic distribution
    pub topic_entropy: f64,
    /// `topic_entropy / log2(total_topics)`, 0.0 with a single topic
    pub normalized_entropy: f64,
}

/// Diversity over Page nodes, `None` without pages or topics
pub fn diversity_metrics(dataset: &GraphDataset) -> Option<TopicDiversity> {
    let pages = page_topic_sets(dataset);
    let topics = dataset.topics();
    if pages.is_empty() || topics.is_empty() {
        return None;
    }

    let mut per_page: Vec<usize> = pages.iter().map(|(_, t)| t.len()).collect();
    per_page.sort_unstable();
    let count = per_page.len();
    let tagged = per_page.iter().filter(|&&n| n > 0).count();
    let median = if count % 2 == 0 {
        (per_page[count / 2 - 1] + per_page[count / 2]) as f64 / 2.0
    } else {
        per_page[count / 2] as f64
    };

    let pages_per_topic: Vec<usize> = topics
        .iter()
        .map(|topic| {
            pages
                .iter()
                .filter(|(_, t)| t.contains(&topic.id.as_str()))
                .count()
        })
        .collect();
    let total: usize = pages_per_topic.iter().sum();
    let entropy = if total == 0 {
        0.0
    } else {
        pages_per_topic
            .iter()
            .filter(|&&n| n > 0)
            .map(|&n| {
                let p = n as f64 / total as f64;
                -p * p.log2()
            })
            .sum()
    };
    let max_entropy = (topics.len() as f64).log2();
    let normalized = if max_entropy > 0.0 { entropy / max_entropy } else { 0.0 };

    let metrics = TopicDiversity {
        total_pages: count,
        total_topics: topics.len(),
        topic_coverage: tagged as f64 / count as f64,
        avg_topics_per_page: per_page.iter().sum::<usize>() as f64 / count as f64,
        median_topics_per_page: median,
        max_topics_per_page: per_page[count - 1],
        topic_entropy: entropy,
        normalized_entropy: normalized,
    };
    tracing::debug!(
        coverage = metrics.topic_coverage,
        avg = metrics.avg_topics_per_page,
        entropy = metrics.normalized_entropy,
        "topic diversity"
    );
    Some(metrics)
}

/// Symmetric count of pages carrying both topics; the diagonal counts pages
/// carrying the topic at all
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicCooccurrence {
    /// Row/column order, as declared in the dataset
    pub topic_ids: Vec<String>,
    pub counts: Vec<Vec<u32>>,
}

impl TopicCooccurrence {
    pub fn get(&self, a: &str, b: &str) -> Option<u32> {
        let i = self.topic_ids.iter().position(|id| id == a)?;
        let j = self.topic_ids.iter().position(|id| id == b)?;
        Some(self.counts[i][j])
    }

    /// Distinct topic pairs seen together, most frequent first, ties by ids
    pub fn top_pairs(&self, limit: usize) -> Vec<(&str, &str, u32)> {
        let mut pairs = Vec::new();
        for (i, row) in self.counts.iter().enumerate() {
            for (j, &count) in row.iter().enumerate().skip(i + 1) {
                if count > 0 {
                    pairs.push((self.topic_ids[i].as_str(), self.topic_ids[j].as_str(), count));
                }
            }
        }
        pairs.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| (a.0, a.1).cmp(&(b.0, b.1))));
        pairs.truncate(limit);
        pairs
    }
}

pub fn topic_cooccurrence(dataset: &GraphDataset) -> TopicCooccurrence {
    let topic_ids: Vec<String> = dataset.topics().iter().map(|t| t.id.clone()).collect();
    let n = topic_ids.len();
    let mut counts = vec![vec![0u32; n]; n];

    for (_, topics) in page_topic_sets(dataset) {
        let idx: Vec<usize> = topics
            .iter()
            .filter_map(|id| topic_ids.iter().position(|t| t == id))
            .collect();
        for (k, &i) in idx.iter().enumerate() {
            for &j in &idx[k..] {
                counts[i][j] += 1;
                if i != j {
                    counts[j][i] += 1;
                }
            }
        }
    }

    TopicCooccurrence { topic_ids, counts }
}

/// Pages tagged with one topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicPages {
    pub topic_id: String,
    pub page_ids: Vec<String>,
}

/// Topic -> pages, in dataset topic order; pages in node order
pub fn topic_pages(dataset: &GraphDataset) -> Vec<TopicPages> {
    let pages = page_topic_sets(dataset);
    dataset
        .topics()
        .iter()
        .map(|topic| TopicPages {
            topic_id: topic.id.clone(),
            page_ids: pages
                .iter()
                .filter(|(_, t)| t.contains(&topic.id.as_str()))
                .map(|(page, _)| page.id.clone())
                .collect(),
        })
        .collect()
}

/// Page -> declared topics, in node order
pub fn page_topics(dataset: &GraphDataset) -> Vec<(String, Vec<String>)> {
    page_topic_sets(dataset)
        .into_iter()
        .map(|(page, topics)| {
            (
                page.id.clone(),
                topics.into_iter().map(str::to_string).collect(),
            )
        })
        .collect()
}

// =============================================================================
// JOURNEY COVERAGE
// =============================================================================

/// How much of a persona's journey the current view can show
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JourneyCoverage {
    pub persona_id: String,
    /// Journey length
    pub steps: usize,
    /// Steps whose node exists in the dataset
    pub resolved_steps: usize,
    /// Steps whose node passes the current topic filter
    pub visible_steps: usize,
}

impl JourneyCoverage {
    pub fn is_complete(&self) -> bool {
        self.visible_steps == self.steps
    }
}

/// Coverage for `persona_id`, `None` when the persona is unknown
pub fn journey_coverage(
    dataset: &GraphDataset,
    persona_id: &str,
    visible_ids: &HashSet<&str>,
) -> Option<JourneyCoverage> {
    let persona = dataset.persona(persona_id)?;
    let journey = &persona.journey;

    Some(JourneyCoverage {
        persona_id: persona.id.clone(),
        steps: journey.len(),
        resolved_steps: journey.iter().filter(|id| dataset.contains_node(id)).count(),
        visible_steps: journey
            .iter()
            .filter(|id| visible_ids.contains(id.as_str()))
            .count(),
    })
}
