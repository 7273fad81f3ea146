use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use pokedex_browser::app::{App, ProgressSink, ProgressSinkKind, SearchSettings};
use pokedex_browser::config::{ConfigLoader, ResolvedConfig};
use pokedex_browser::domain::{Category, CategoryFilter, Region, RegionFilter};
use pokedex_browser::error::DexError;
use pokedex_browser::output::{JsonOutput, OutputMode};
use pokedex_browser::pipeline::FailurePolicy;
use pokedex_browser::pokeapi::{CatalogClient, PokeApiHttpClient};
use pokedex_browser::tui::{Tui, TuiCommand, parse_command};

#[derive(Parser)]
#[command(name = "pokedex")]
#[command(about = "Browse PokeAPI: search, filter by type and region, page through results")]
#[command(version)]
struct Cli {
    #[arg(long, global = true)]
    non_interactive: bool,

    #[arg(long, global = true)]
    config: Option<String>,

    #[arg(long, global = true, value_enum)]
    on_error: Option<FailurePolicy>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Look up one entry by name or number")]
    Search(SearchArgs),
    #[command(about = "Scan entries filtered by type and region")]
    Filter(FilterArgs),
    #[command(about = "Unfiltered default listing")]
    Browse(PageArgs),
    #[command(about = "List the type filters")]
    Categories,
    #[command(about = "List the region filters")]
    Regions,
}

#[derive(Args)]
struct SearchArgs {
    term: String,
}

#[derive(Args)]
struct FilterArgs {
    #[arg(long, default_value = "any")]
    category: CategoryFilter,

    #[arg(long, default_value = "any")]
    region: RegionFilter,

    #[command(flatten)]
    page: PageArgs,
}

#[derive(Args)]
struct PageArgs {
    /// Render every page instead of the first batch
    #[arg(long)]
    all: bool,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(error) = report.downcast_ref::<DexError>() {
            return ExitCode::from(map_exit_code(error));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &DexError) -> u8 {
    match error {
        DexError::NotFound { .. } | DexError::RegionNotFound { .. } => 2,
        DexError::MissingConfig(_) => 2,
        DexError::Http(_) | DexError::Decode(_) => 3,
        _ => 1,
    }
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output_mode = if cli.non_interactive {
        OutputMode::NonInteractive
    } else {
        OutputMode::Interactive
    };

    let config = ConfigLoader::resolve(cli.config.as_deref())?;
    let mut settings = SearchSettings::from(&config);
    if let Some(policy) = cli.on_error {
        settings.failure_policy = policy;
    }

    match cli.command {
        Some(Commands::Categories) => print_categories(output_mode),
        Some(Commands::Regions) => print_regions(output_mode),
        Some(Commands::Search(args)) => {
            let app = build_app(&config, settings)?;
            dispatch(app, TuiCommand::Search(args.term), false, output_mode)
        }
        Some(Commands::Filter(args)) => {
            let app = build_app(&config, settings)?;
            let command = TuiCommand::Filter(args.category, args.region);
            dispatch(app, command, args.page.all, output_mode)
        }
        Some(Commands::Browse(args)) => {
            let app = build_app(&config, settings)?;
            dispatch(app, TuiCommand::Reset, args.all, output_mode)
        }
        None => match output_mode {
            OutputMode::Interactive => {
                let app = build_app(&config, settings)?;
                run_session(app, TuiCommand::Reset)
            }
            OutputMode::NonInteractive => Err(miette::Report::msg(
                "command required (try `pokedex --help`)",
            )),
        },
    }
}

fn build_app(
    config: &ResolvedConfig,
    settings: SearchSettings,
) -> miette::Result<App<PokeApiHttpClient>> {
    let client = PokeApiHttpClient::with_settings(&config.base_url, config.timeout())?;
    Ok(App::new(client, settings))
}

fn dispatch(
    app: App<PokeApiHttpClient>,
    command: TuiCommand,
    all: bool,
    output_mode: OutputMode,
) -> miette::Result<()> {
    match output_mode {
        OutputMode::Interactive => run_session(app, command),
        OutputMode::NonInteractive => {
            let (mut app, failure) = execute(app, command, &JsonOutput);
            if let Some(err) = failure {
                return Err(err.into());
            }
            if all {
                while app.pager().has_more() {
                    app.load_more();
                }
            }
            JsonOutput::print_page(&app.page()).into_diagnostic()?;
            Ok(())
        }
    }
}

fn run_session(mut app: App<PokeApiHttpClient>, first: TuiCommand) -> miette::Result<()> {
    let mut tui = Tui::new(kind_for(&first));
    let mut next = Some(first);
    loop {
        match next.take() {
            Some(TuiCommand::Quit) => break,
            Some(TuiCommand::More) => {
                app.load_more();
                tui.show_page(app.page());
            }
            Some(command) => {
                tui.set_kind(kind_for(&command));
                let (returned, failure) =
                    tui.run(move |sink| Ok(execute(app, command, sink)))?;
                app = returned;
                tui.show_page(app.page());
                if let Some(err) = failure {
                    tui.show_error(&err.to_string());
                }
            }
            None => {}
        }

        let Some(line) = tui.idle_command()? else {
            break;
        };
        match parse_command(&line) {
            Ok(command) => next = Some(command),
            Err(err) => tui.show_error(&err.to_string()),
        }
    }
    Ok(())
}

fn execute<C: CatalogClient>(
    mut app: App<C>,
    command: TuiCommand,
    sink: &dyn ProgressSink,
) -> (App<C>, Option<DexError>) {
    let outcome = match command {
        TuiCommand::Search(term) => {
            app.search(&term, sink);
            Ok(())
        }
        TuiCommand::Filter(category, region) => app.filtered_search(category, region, sink),
        TuiCommand::Reset => app.reset(sink),
        TuiCommand::More => {
            app.load_more();
            Ok(())
        }
        TuiCommand::Quit => Ok(()),
    };
    (app, outcome.err())
}

fn kind_for(command: &TuiCommand) -> ProgressSinkKind {
    match command {
        TuiCommand::Search(_) => ProgressSinkKind::Search,
        TuiCommand::Filter(..) => ProgressSinkKind::Filter,
        _ => ProgressSinkKind::Browse,
    }
}

fn print_categories(output_mode: OutputMode) -> miette::Result<()> {
    match output_mode {
        OutputMode::NonInteractive => JsonOutput::print_categories().into_diagnostic(),
        OutputMode::Interactive => {
            println!("Any");
            for category in Category::ALL {
                println!("{category}");
            }
            Ok(())
        }
    }
}

fn print_regions(output_mode: OutputMode) -> miette::Result<()> {
    match output_mode {
        OutputMode::NonInteractive => JsonOutput::print_regions().into_diagnostic(),
        OutputMode::Interactive => {
            println!("Any");
            for region in Region::ALL {
                println!("{region:<8} pokedex/{}", region.pokedex_key());
            }
            Ok(())
        }
    }
}
