use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dataset::parse_countries;
use flow::{GateView, PageOrchestrator};
use runtime::Frame;

/// Scripted run of the globe country picker: mount, select, confirm, and
/// print the resulting event choreography.
#[derive(Parser)]
#[command(name = "picker_cli")]
struct Args {
    /// GeoJSON FeatureCollection of country boundaries.
    dataset: PathBuf,
    /// Search query; the first suggestion is picked. Without it, a random
    /// country is chosen.
    #[arg(long)]
    query: Option<String>,
    /// Seconds of page time to simulate after the selection.
    #[arg(long, default_value_t = 3.0)]
    run_s: f64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let args = Args::parse();

    let bytes = fs::read(&args.dataset)
        .with_context(|| format!("reading {}", args.dataset.display()))?;
    let mut page = PageOrchestrator::mount(parse_countries(&bytes));
    info!(
        countries = page.controller().features().len(),
        "globe mounted"
    );

    match &args.query {
        Some(query) => {
            let picks: Vec<String> = page
                .suggestions(query)
                .iter()
                .map(|f| f.iso.clone())
                .collect();
            match picks.first() {
                Some(iso) => {
                    info!(matches = picks.len(), pick = %iso, "search results");
                    page.pick_from_search(iso);
                }
                None => {
                    info!(query = %query, "no matching country");
                    return Ok(());
                }
            }
        }
        None => page.surprise_me(&mut rand::thread_rng()),
    }

    if let GateView::Visible(candidate) = page.gate() {
        info!(country = %candidate.name, iso = %candidate.iso, "confirming selection");
        page.confirm()?;
    }

    let mut frame = Frame::new(0, 1.0 / 60.0);
    while frame.time.0 <= args.run_s {
        page.tick(frame);
        frame = frame.next();
    }

    for stamped in page.drain_events() {
        println!("[frame {:>3}] {:?}", stamped.frame_index, stamped.event);
    }
    if let Some(handoff) = page.take_handoff() {
        println!(
            "handoff: {} ({}) selected at {}",
            handoff.name, handoff.iso_code, handoff.selected_at
        );
    }

    Ok(())
}
