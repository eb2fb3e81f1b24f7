use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use tracing::{info, info_span};

use roster_cli::render::{DashboardSnapshot, TerminalRenderer};
use roster_cli::session::Session;
use roster_cli::settings::{Settings, save_settings, settings_path};
use roster_core::{Dashboard, Dataset};
use roster_ingest::{auto_load, load_file};
use roster_model::FilterState;

use crate::cli::{
    ChoicesArgs, ConfigArgs, DashboardArgs, FilterArgs, InteractiveArgs, OutputFormatArg,
    SourceArgs,
};

const NO_DATA_HINT: &str = "No data loaded: pass a CSV or XLSX FILE, or set data.default_source in the settings file.";

pub fn run_dashboard(args: &DashboardArgs, settings: &Settings) -> Result<()> {
    let mut dashboard = open_dashboard(&args.source, settings)?;
    dashboard.set_filters(filter_state(&args.filters));
    dashboard.set_page(args.page);

    let mut stdout = io::stdout().lock();
    match args.format {
        OutputFormatArg::Table => dashboard.renderer().write_dashboard(&mut stdout)?,
        OutputFormatArg::Json => {
            serde_json::to_writer_pretty(&mut stdout, &DashboardSnapshot::capture(&dashboard))
                .context("serialize dashboard")?;
            writeln!(stdout)?;
        }
    }
    dashboard.dispose_charts();
    Ok(())
}

pub fn run_choices(args: &ChoicesArgs, settings: &Settings) -> Result<()> {
    let dashboard = open_dashboard(&args.source, settings)?;
    let mut stdout = io::stdout().lock();
    match args.format {
        OutputFormatArg::Table => dashboard.renderer().write_choices(&mut stdout)?,
        OutputFormatArg::Json => {
            serde_json::to_writer_pretty(&mut stdout, dashboard.choices())
                .context("serialize choices")?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}

pub fn run_interactive(args: &InteractiveArgs, settings: &Settings) -> Result<()> {
    let dashboard = open_dashboard(&args.source, settings)?;
    let mut session = Session::new(dashboard, io::stdout());
    session.run(io::stdin().lock())
}

pub fn run_config(args: &ConfigArgs, explicit: Option<&Path>, settings: &Settings) -> Result<()> {
    let path = explicit
        .map(Path::to_path_buf)
        .or_else(settings_path)
        .ok_or_else(|| anyhow!("could not determine settings path"))?;
    if args.init {
        save_settings(settings, &path)?;
        println!("Wrote {}", path.display());
    } else {
        println!("# {}", path.display());
        print!("{}", toml::to_string_pretty(settings).context("serialize settings")?);
    }
    Ok(())
}

/// Builds a dashboard over the given file, or the configured source.
///
/// A given file must load. The configured source is best effort: when it
/// is unavailable the dashboard starts empty and a hint is printed.
fn open_dashboard(source: &SourceArgs, settings: &Settings) -> Result<Dashboard<TerminalRenderer>> {
    let span = info_span!("open_dashboard");
    let _guard = span.enter();

    let mut dashboard = Dashboard::new(TerminalRenderer::new(), settings.dashboard_options());
    let ticket = dashboard.begin_load();
    let loaded = match &source.file {
        Some(path) => {
            Some(load_file(path).with_context(|| format!("load {}", path.display()))?)
        }
        None => auto_load(&settings.default_source(), &settings.fetch_options()),
    };

    match loaded {
        Some(loaded) => {
            let dataset = Dataset::from_raw(&loaded.records, loaded.source);
            dashboard.complete_load(ticket, dataset);
        }
        None => {
            info!("starting with an empty dashboard");
            eprintln!("{NO_DATA_HINT}");
            dashboard.apply_filters();
        }
    }
    Ok(dashboard)
}

fn filter_state(args: &FilterArgs) -> FilterState {
    FilterState {
        state: args.state.clone(),
        board: args.board.clone(),
        gender: args.gender.clone(),
        category: args.category.clone(),
        query: args.query.clone(),
    }
}
