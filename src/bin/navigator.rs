//! Navigator Command Line Interface
//!
//! Runs the navigator core headless over a dataset file.
//!
//! # Usage
//!
//! ```bash
//! # Counts, optionally under a topic filter
//! navigator stats --data graph.json --topic topic_finance
//!
//! # Node detail panel
//! navigator detail --data graph.json page_mba
//!
//! # Simulate a persona journey, one line per tick
//! navigator journey --data graph.json working_executive
//!
//! # Dump the draw-list as JSON
//! navigator draw --data graph.json --view traditional
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use semantic_navigator::stats::{
    diversity_metrics, niche_topics, topic_cooccurrence, topic_distribution, topic_pages,
    trending_topics,
};
use semantic_navigator::{
    GraphDataset, JourneyStatus, ManualClock, Navigator, NavigatorConfig, ViewMode,
};

#[derive(Parser)]
#[command(name = "navigator")]
#[command(version)]
#[command(about = "Explore a semantic graph dataset and simulate persona journeys")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Dataset file (JSON, or YAML by extension)
    #[arg(long, short = 'd', global = true, env = "NAVIGATOR_DATA")]
    data: Option<PathBuf>,

    /// Navigator settings (YAML)
    #[arg(long, short = 'c', global = true, env = "NAVIGATOR_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'o', global = true, default_value = "pretty", value_enum)]
    format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ViewArg {
    Semantic,
    Traditional,
}

impl From<ViewArg> for ViewMode {
    fn from(view: ViewArg) -> Self {
        match view {
            ViewArg::Semantic => ViewMode::Semantic,
            ViewArg::Traditional => ViewMode::Traditional,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Node/edge counts and topic analytics
    Stats {
        /// Topic ids to filter by (repeatable)
        #[arg(short, long)]
        topic: Vec<String>,

        /// Minimum frequency for trending topics
        #[arg(long, default_value_t = 5)]
        trending_threshold: u32,

        /// Maximum frequency for niche topics
        #[arg(long, default_value_t = 2)]
        niche_max: u32,
    },

    /// Resolve the detail panel for one node
    Detail {
        node_id: String,
    },

    /// Play a persona journey to completion on a simulated clock
    Journey {
        persona_id: String,

        /// Topic ids to filter by (repeatable)
        #[arg(short, long)]
        topic: Vec<String>,
    },

    /// Print the draw-list as JSON
    Draw {
        /// Topic ids to filter by (repeatable)
        #[arg(short, long)]
        topic: Vec<String>,

        #[arg(long, default_value = "semantic", value_enum)]
        view: ViewArg,

        /// Persona whose journey is highlighted
        #[arg(long)]
        persona: Option<String>,

        /// Journey steps to advance before drawing
        #[arg(long, default_value_t = 0)]
        steps: usize,

        /// Node drawn as selected
        #[arg(long)]
        select: Option<String>,
    },
}

// =============================================================================
// MAIN
// =============================================================================

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.format == OutputFormat::Json {
                println!("{}", serde_json::json!({ "error": format!("{:#}", e) }));
            } else {
                eprintln!("{}: {:#}", "error".red().bold(), e);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => NavigatorConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => NavigatorConfig::default(),
    };
    let Some(data) = &cli.data else {
        bail!("no dataset given, pass --data or set NAVIGATOR_DATA");
    };
    let dataset = load_dataset(data)?;

    match &cli.command {
        Commands::Stats {
            topic,
            trending_threshold,
            niche_max,
        } => cmd_stats(dataset, config, topic, *trending_threshold, *niche_max, cli.format),
        Commands::Detail { node_id } => cmd_detail(dataset, config, node_id, cli.format),
        Commands::Journey { persona_id, topic } => {
            cmd_journey(dataset, config, persona_id, topic, cli.format)
        }
        Commands::Draw {
            topic,
            view,
            persona,
            steps,
            select,
        } => {
            let mut nav = Navigator::new(dataset, config);
            apply_topics(&mut nav, topic);
            nav.set_view_mode((*view).into());
            if let Some(persona_id) = persona {
                nav.select_persona(persona_id);
                nav.start();
                for _ in 0..*steps {
                    nav.tick();
                }
            }
            if let Some(node_id) = select {
                nav.select_node(node_id);
            }
            println!("{}", serde_json::to_string_pretty(&nav.draw_list())?);
            Ok(())
        }
    }
}

fn load_dataset(path: &Path) -> anyhow::Result<GraphDataset> {
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    );
    let dataset = if is_yaml {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading dataset {}", path.display()))?;
        GraphDataset::from_yaml_str(&text)?
    } else {
        GraphDataset::from_json_file(path)?
    };
    Ok(dataset)
}

fn apply_topics(nav: &mut Navigator, topics: &[String]) {
    for topic in topics {
        if !nav.selected_topics().contains(topic) {
            nav.toggle_topic(topic);
        }
    }
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

fn cmd_stats(
    dataset: GraphDataset,
    config: NavigatorConfig,
    topics: &[String],
    trending_threshold: u32,
    niche_max: u32,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let mut nav = Navigator::new(dataset, config);
    apply_topics(&mut nav, topics);

    let stats = nav.stats();
    let all_topics = nav.dataset().topics();
    let distribution = topic_distribution(all_topics);
    let trending = trending_topics(all_topics, trending_threshold, 10);
    let niche = niche_topics(all_topics, niche_max);
    let diversity = diversity_metrics(nav.dataset());
    let cooccurrence = topic_cooccurrence(nav.dataset());
    let pages = topic_pages(nav.dataset());

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "stats": stats,
                "distribution": distribution,
                "trending": trending,
                "niche": niche,
                "diversity": diversity,
                "cooccurrence": cooccurrence,
                "topic_pages": pages,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Pretty => {
            println!("{} {}", "Graph".bold(), stats);
            if let Some(dist) = distribution {
                println!(
                    "{} {} topics, frequency mean {:.2} median {:.1} min {} max {}",
                    "Topics".bold(),
                    dist.topic_count,
                    dist.mean_frequency,
                    dist.median_frequency,
                    dist.min_frequency,
                    dist.max_frequency
                );
            }
            if !trending.is_empty() {
                println!("{}", "Trending".bold());
                for (i, topic) in trending.iter().enumerate() {
                    println!(
                        "  {}. {} (freq={}, importance={:.2})",
                        i + 1,
                        topic.name,
                        topic.frequency,
                        topic.importance
                    );
                }
            }
            if !niche.is_empty() {
                println!("{}", "Niche".bold());
                for topic in &niche {
                    println!(
                        "  - {} (freq={}, importance={:.2})",
                        topic.name, topic.frequency, topic.importance
                    );
                }
            }
            if let Some(div) = diversity {
                println!(
                    "{} {:.1}% of {} pages tagged, {:.2} topics/page (median {:.1}, max {}), entropy {:.3}",
                    "Diversity".bold(),
                    div.topic_coverage * 100.0,
                    div.total_pages,
                    div.avg_topics_per_page,
                    div.median_topics_per_page,
                    div.max_topics_per_page,
                    div.normalized_entropy
                );
            }
            let pairs = cooccurrence.top_pairs(5);
            if !pairs.is_empty() {
                println!("{}", "Co-occurring".bold());
                for (a, b, count) in pairs {
                    println!("  - {} + {} ({} pages)", a, b, count);
                }
            }
            for entry in pages.iter().filter(|e| !e.page_ids.is_empty()) {
                println!("  {} {}: {}", "pages".dimmed(), entry.topic_id, entry.page_ids.join(", "));
            }
        }
    }
    Ok(())
}

fn cmd_detail(
    dataset: GraphDataset,
    config: NavigatorConfig,
    node_id: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let mut nav = Navigator::new(dataset, config);
    let detail = nav.select_node(node_id);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&detail)?),
        OutputFormat::Pretty => {
            let Some(detail) = detail else {
                println!("{} no node with id {}", "-".dimmed(), node_id);
                return Ok(());
            };
            println!("{} [{}]", detail.title.bold(), detail.node_type);
            if !detail.topics.is_empty() {
                let names: Vec<_> = detail.topics.iter().map(|t| t.name.as_str()).collect();
                println!("  topics:   {}", names.join(", "));
            }
            for related in &detail.related_nodes {
                println!(
                    "  related:  {} ({}, {:?})",
                    related.node.title, related.edge_type, related.direction
                );
            }
            for persona in &detail.relevant_personas {
                println!("  persona:  {}", persona.name.cyan());
            }
        }
    }
    Ok(())
}

fn cmd_journey(
    dataset: GraphDataset,
    config: NavigatorConfig,
    persona_id: &str,
    topics: &[String],
    format: OutputFormat,
) -> anyhow::Result<()> {
    if dataset.persona(persona_id).is_none() {
        bail!("unknown persona {}", persona_id);
    }

    let clock = ManualClock::new();
    let interval = Duration::from_millis(config.journey.tick_interval_ms);
    let mut nav = Navigator::new(dataset, config).with_clock(clock.clone());
    apply_topics(&mut nav, topics);

    nav.select_persona(persona_id);
    nav.start();

    let mut frames = Vec::new();
    loop {
        let node_id = nav.current_journey_node().unwrap_or_default().to_string();
        let visible = nav.visible_graph().node_ids().contains(node_id.as_str());
        let title = nav
            .dataset()
            .node(&node_id)
            .map(|n| n.title.clone())
            .unwrap_or_else(|| "(unknown node)".to_string());

        match format {
            OutputFormat::Json => frames.push(serde_json::json!({
                "step": nav.journey_step(),
                "status": nav.journey_status().as_str(),
                "node_id": node_id,
                "visible": visible,
                "progress": nav.progress(),
            })),
            OutputFormat::Pretty => {
                let marker = if visible { "●".green() } else { "○".dimmed() };
                println!(
                    "{} step {:>2} {:>9}  {} {}",
                    marker,
                    nav.journey_step(),
                    nav.journey_status().as_str(),
                    title,
                    format!("({})", node_id).dimmed()
                );
            }
        }

        if nav.journey_status() != JourneyStatus::Playing {
            break;
        }
        clock.advance(interval);
        nav.update();
    }

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&frames)?);
    }
    Ok(())
}
