mod errors;
mod handlers;
mod state;
mod ui;

use anyhow::Result;
use clap::Parser;
use facet_core::{parse_facet_filters, Query, SidebarAction};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use errors::{map_action_error, map_file_load_error, map_file_save_error};
use handlers::{dispatch_action, handle_initial_filters, handle_open_all};
use state::{AppState, Platform, UiState};
use ui::{print_events, print_json, print_query, print_sidebar, set_status, show_error, StatusLevel};

/// Issue facet sidebar - render facets and replay filter clicks
///
/// Examples:
///   # Render the sidebar for a snapshot
///   facetbar issues.json
///
///   # Plain click: select only Java (or clear it if it is the sole selection)
///   facetbar issues.json -a click:languages=java
///
///   # Modifier click: add or remove Python alongside the current selection
///   facetbar issues.json -a multi:languages=py
///
///   # Pick a value from "show more", clear a facet, expand a panel
///   facetbar issues.json -a add:tags=security -a clear:types -a toggle:rules
///
///   # Start from explicit filters and write the result back
///   facetbar issues.json --facet severities=MAJOR --write next.json
#[derive(Parser, Debug)]
#[command(name = "facetbar")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Selection Rules:\n  \
    - click: the clicked value becomes the only selection\n  \
    - click on the only selected value clears the facet\n  \
    - multi: adds or removes the value; the selection stays sorted\n  \
    - add: appends the value unless it is already selected\n\n\
Actions are applied in the order given.")]
struct Cli {
    /// Path to the sidebar snapshot JSON file
    #[arg(value_name = "SNAPSHOT")]
    file: PathBuf,

    /// Sidebar layout in TOML (defaults to the issues layout)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Action to apply (can be specified multiple times)
    #[arg(short, long = "action", value_name = "VERB:ARGS")]
    actions: Vec<SidebarAction>,

    /// Set a facet selection before applying actions (format: field=value)
    #[arg(short, long = "facet", value_name = "FIELD=VALUE")]
    facets: Vec<String>,

    /// Set facet selections from a query string (field=v1,v2&other=v3)
    #[arg(short, long, value_name = "QUERY")]
    query: Option<String>,

    /// Expand every panel
    #[arg(long)]
    open_all: bool,

    /// Name the Cmd key in multi-select hints
    #[arg(long)]
    mac: bool,

    /// Print the rendered sidebar as JSON
    #[arg(long)]
    json: bool,

    /// Write the updated snapshot to this file
    #[arg(short, long, value_name = "FILE")]
    write: Option<PathBuf>,

    /// Only validate the snapshot against the layout
    #[arg(long)]
    check: bool,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(code) = run(&cli) {
        process::exit(code);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> std::result::Result<(), i32> {
    let mut app_state = AppState::new();
    let platform = if cli.mac { Platform::Mac } else { Platform::current() };
    let mut ui_state = UiState::new(platform);

    if let Some(config) = &cli.config {
        if let Err(err) = app_state.load_config(config.clone()) {
            report(map_file_load_error(&err, config));
            return Err(1);
        }
    }

    if let Err(err) = app_state.load_from_file(cli.file.clone()) {
        report(map_file_load_error(&err, &cli.file));
        return Err(1);
    }

    if cli.check {
        set_status(
            format!("{} is valid for this sidebar", cli.file.display()),
            StatusLevel::Success,
        );
        return Ok(());
    }

    for facet_str in &cli.facets {
        if !facet_str.contains('=') {
            set_status(
                format!("Warning: Invalid facet format '{}'. Expected 'field=value'", facet_str),
                StatusLevel::Warning,
            );
        }
    }
    handle_initial_filters(&mut app_state, &initial_query(cli));

    if cli.open_all {
        handle_open_all(&mut app_state);
    }

    for action in &cli.actions {
        if let Err(err) = dispatch_action(&mut app_state, &mut ui_state, action) {
            let fields: Vec<String> = app_state
                .sidebar
                .all_panels()
                .iter()
                .map(|p| p.field.clone())
                .collect();
            report(map_action_error(&err, &fields));
            return Err(2);
        }
    }

    if let Err(err) = render(&app_state, &mut ui_state, cli.json) {
        set_status(format!("Error rendering sidebar: {:#}", err), StatusLevel::Error);
        return Err(1);
    }

    if let Some(path) = &cli.write {
        match app_state.save_as(path) {
            Ok(()) => set_status(
                format!("Snapshot written to {}", path.display()),
                StatusLevel::Success,
            ),
            Err(err) => {
                report(map_file_save_error(&err, path));
                return Err(1);
            }
        }
    }

    Ok(())
}

fn initial_query(cli: &Cli) -> Query {
    let mut query = cli
        .query
        .as_deref()
        .map(Query::parse_query_string)
        .unwrap_or_default();

    let from_facets = Query::from_filters(&parse_facet_filters(&cli.facets));
    for (field, selected) in from_facets.fields() {
        query.set(field, selected.clone());
    }

    query
}

fn render(app_state: &AppState, ui_state: &mut UiState, json: bool) -> Result<()> {
    let rendered = app_state.sidebar.render(&app_state.snapshot);
    let events = ui_state.take_events();

    if json {
        print_json(&rendered, &events, &app_state.snapshot.query)
    } else {
        print_sidebar(app_state, ui_state, &rendered);
        print_events(&events);
        print_query(app_state);
        Ok(())
    }
}

fn report((title, message, details): (String, String, String)) {
    show_error(&title, &message, &details);
}
