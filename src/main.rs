mod config;
mod filter;
mod front_panel;
mod legend;
mod markup;
mod meta;
mod palette;
mod render;
mod table;
mod tooltip;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use dialoguer::Input;
use std::io::Write;
use std::path::PathBuf;

use legend::LegendOrder;
use render::{RenderOptions, RenderedViews};
use tooltip::BootstrapTooltips;

const DEFAULT_CONFIG: &str = "data/patchbay.json";
const QUIT: &str = ":q";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    // Parse CLI arguments
    let matches = Command::new("patchbay-view")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Renders a patch-bay document into legend, front-panel and channel table views")
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Patchbay document (JSON); defaults to $PATCHBAY_CONFIG or data/patchbay.json"),
        )
        .arg(
            Arg::new("out")
                .long("out")
                .value_name("PATH")
                .help("Write the output to a file instead of stdout"),
        )
        .arg(
            Arg::new("filter")
                .long("filter")
                .value_name("QUERY")
                .help("Apply a channel filter before output"),
        )
        .arg(
            Arg::new("text")
                .long("text")
                .action(ArgAction::SetTrue)
                .help("Print the visible channels as text instead of HTML"),
        )
        .arg(
            Arg::new("sort-legend")
                .long("sort-legend")
                .action(ArgAction::SetTrue)
                .help("Sort legend rows by key instead of document order"),
        )
        .arg(
            Arg::new("interactive")
                .long("interactive")
                .action(ArgAction::SetTrue)
                .help("Prompt for filter queries and print matching channels"),
        )
        .get_matches();

    let config_path = matches
        .get_one::<String>("config")
        .cloned()
        .or_else(|| std::env::var("PATCHBAY_CONFIG").ok())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));

    let document = config::load_document(&config_path)?;

    let options = RenderOptions {
        legend_order: if matches.get_flag("sort-legend") {
            LegendOrder::Sorted
        } else {
            LegendOrder::Document
        },
    };
    let mut tooltips = BootstrapTooltips::default();
    let mut views = render::render_all(&document, options, &mut tooltips);

    if let Some(query) = matches.get_one::<String>("filter") {
        views.set_query(query);
    }

    if matches.get_flag("interactive") {
        return run_interactive(&mut views);
    }

    let output = if matches.get_flag("text") {
        views.to_text()
    } else {
        views.to_page()
    };

    match matches.get_one::<String>("out") {
        Some(path) => std::fs::write(path, output)
            .with_context(|| format!("Failed to write output to {}", path))?,
        None => std::io::stdout()
            .write_all(output.as_bytes())
            .context("Failed to write output to stdout")?,
    }

    Ok(())
}

/// Prompts for queries until `:q`, printing the visible channels after each.
fn run_interactive(views: &mut RenderedViews) -> Result<()> {
    println!("{}", views.summary);
    println!("Type a filter query (empty clears, {} quits).", QUIT);

    loop {
        let query = Input::<String>::new()
            .with_prompt("filter")
            .with_initial_text(views.query())
            .allow_empty(true)
            .interact_text()
            .context("Failed to read filter query")?;

        if query.trim() == QUIT {
            return Ok(());
        }

        views.set_query(&query);
        let mut shown = 0;
        for row in views.visible_rows() {
            println!("{}", row.to_text());
            shown += 1;
        }
        println!("{}/{} channels", shown, views.rows.len());
    }
}
