use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, bail, Context};
use clap::{Arg, ArgAction, ArgMatches, Command};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::{
    core::{client::BASE_URL_ENV, session::STATE_DIR_ENV},
    Language, PlannerApi, PlannerClient, PlannerRequest, PlannerView, SessionStore, Viewer,
};

pub mod progress;
pub mod render;

/// CLI entry point for the trip-viewer tool
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = command().get_matches();

    match dispatch(&matches).await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("trip-viewer failed: {:#}", e);
            Err(e.into())
        }
    }
}

fn command() -> Command {
    Command::new("trip-viewer")
        .version("0.1.0")
        .about("Plan trips with a remote itinerary engine and browse the result")
        .subcommand_required(true)
        .arg(
            Arg::new("base-url")
                .short('u')
                .long("base-url")
                .value_name("URL")
                .global(true)
                .help("Planner service base address (or set TRAVEL_API_BASE_URL)"),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .value_name("SECONDS")
                .global(true)
                .help("Request timeout in seconds")
                .default_value("180"),
        )
        .arg(
            Arg::new("state-dir")
                .long("state-dir")
                .value_name("DIR")
                .global(true)
                .help("Where the session snapshot is kept (or set TRAVEL_STATE_DIR)"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Print normalized JSON instead of text"),
        )
        .subcommand(
            Command::new("plan")
                .about("Generate a new itinerary")
                .arg(Arg::new("from").long("from").value_name("CITY").required(true))
                .arg(Arg::new("to").long("to").value_name("CITY").required(true))
                .arg(
                    Arg::new("days")
                        .short('d')
                        .long("days")
                        .value_name("COUNT")
                        .default_value("3"),
                )
                .arg(
                    Arg::new("budget")
                        .short('b')
                        .long("budget")
                        .value_name("AMOUNT")
                        .default_value("25000"),
                )
                .arg(
                    Arg::new("interests")
                        .short('i')
                        .long("interests")
                        .value_name("LIST")
                        .help("Comma-separated interests, e.g. \"history, architecture\"")
                        .default_value(""),
                ),
        )
        .subcommand(
            Command::new("show")
                .about("Show the saved itinerary")
                .arg(Arg::new("day").long("day").value_name("N")),
        )
        .subcommand(
            Command::new("day")
                .about("Select a day (1-based) and show it")
                .arg(Arg::new("number").required(true).index(1)),
        )
        .subcommand(
            Command::new("detail")
                .about("Fetch narration for a place on a day's timeline")
                .arg(Arg::new("day").required(true).index(1).help("Day position, 1-based"))
                .arg(
                    Arg::new("entry")
                        .required(true)
                        .index(2)
                        .help("Timeline entry, 1-based"),
                )
                .arg(
                    Arg::new("language")
                        .short('l')
                        .long("language")
                        .value_name("LANG")
                        .default_value("english")
                        .help("english, hindi or local"),
                )
                .arg(
                    Arg::new("play")
                        .long("play")
                        .action(ArgAction::SetTrue)
                        .help("Start the audio clip for the selected language"),
                ),
        )
        .subcommand(Command::new("gallery").about("List every place with its image"))
        .subcommand(Command::new("input").about("Switch back to the input view"))
        .subcommand(Command::new("reset").about("Forget the saved session"))
}

async fn dispatch(matches: &ArgMatches) -> anyhow::Result<()> {
    // The base address is required up front, even for offline commands.
    let base_url = matches
        .get_one::<String>("base-url")
        .cloned()
        .or_else(|| std::env::var(BASE_URL_ENV).ok())
        .ok_or_else(|| {
            anyhow!("Planner base address is required. Set {BASE_URL_ENV} or use --base-url")
        })?;
    let timeout_seconds: u64 = matches
        .get_one::<String>("timeout")
        .map(String::as_str)
        .unwrap_or("180")
        .parse()
        .context("--timeout must be a whole number of seconds")?;
    let client = PlannerClient::with_timeout(&base_url, Duration::from_secs(timeout_seconds))?;

    let store = match matches.get_one::<String>("state-dir") {
        Some(dir) => SessionStore::new(PathBuf::from(dir)),
        None => SessionStore::from_env()
            .with_context(|| format!("could not resolve {STATE_DIR_ENV}"))?,
    };
    let json = matches.get_flag("json");

    info!("Base URL: {}", client.base_url());
    info!("Session file: {}", store.path().display());

    match matches.subcommand() {
        Some(("plan", sub)) => plan(&client, store, sub, json).await,
        Some(("show", sub)) => {
            let mut viewer = Viewer::resume(store);
            if let Some(day) = sub.get_one::<String>("day") {
                viewer.select_day(parse_position(day, "day")?)?;
            }
            show(&viewer, json)
        }
        Some(("day", sub)) => {
            let mut viewer = Viewer::resume(store);
            let number = sub
                .get_one::<String>("number")
                .ok_or_else(|| anyhow!("day number is required"))?;
            viewer.select_day(parse_position(number, "day")?)?;
            viewer.show_itinerary()?;
            show(&viewer, json)
        }
        Some(("detail", sub)) => detail(&client, store, sub, json).await,
        Some(("gallery", _)) => {
            let viewer = Viewer::resume(store);
            let places = viewer
                .itinerary()
                .map(|data| data.itinerary.place_gallery())
                .unwrap_or_default();
            if json {
                println!("{}", serde_json::to_string_pretty(&places)?);
            } else {
                print!("{}", render::render_gallery(&places));
            }
            Ok(())
        }
        Some(("input", _)) => {
            let mut viewer = Viewer::resume(store);
            viewer.show_input()?;
            show(&viewer, json)
        }
        Some(("reset", _)) => {
            store.clear()?;
            println!("Session cleared.");
            Ok(())
        }
        _ => bail!("unknown command"),
    }
}

async fn plan(
    client: &PlannerClient,
    store: SessionStore,
    matches: &ArgMatches,
    json: bool,
) -> anyhow::Result<()> {
    let text = |name: &str| -> String {
        matches
            .get_one::<String>(name)
            .cloned()
            .unwrap_or_default()
    };
    let num_days: u32 = text("days")
        .parse()
        .context("--days must be a whole number")?;
    let budget: f64 = text("budget").parse().context("--budget must be a number")?;
    let request = PlannerRequest::new(text("from"), text("to"), num_days, budget)
        .with_interests(PlannerRequest::parse_interests(&text("interests")));

    info!(
        "Planning {} day(s) in {} (about {} per day)",
        request.num_days,
        request.destination_city,
        render::format_amount(request.per_day_budget())
    );

    let mut viewer = Viewer::resume(store);
    let outcome = progress::with_status_rotation(viewer.submit(client, request)).await;
    if let Err(err) = outcome {
        print!("{}", render::render_input_prompt(viewer.last_error()));
        return Err(err.into());
    }
    show(&viewer, json)
}

async fn detail(
    client: &PlannerClient,
    store: SessionStore,
    matches: &ArgMatches,
    json: bool,
) -> anyhow::Result<()> {
    let day = parse_position(
        matches.get_one::<String>("day").map(String::as_str).unwrap_or(""),
        "day",
    )?;
    let entry = parse_position(
        matches.get_one::<String>("entry").map(String::as_str).unwrap_or(""),
        "entry",
    )?;
    let language: Language = matches
        .get_one::<String>("language")
        .map(String::as_str)
        .unwrap_or("english")
        .parse()
        .map_err(|err: String| anyhow!(err))?;

    let mut viewer = Viewer::resume(store);
    if !viewer.show_itinerary()? {
        print!("{}", render::render_input_prompt(None));
        return Ok(());
    }
    viewer.select_day(day)?;

    let ticket = viewer
        .select_place(day, entry)
        .ok_or_else(|| anyhow!("day {} entry {} is not a place", day + 1, entry + 1))?;
    eprintln!("Loading place details...");
    let outcome = client.fetch_place_detail(&ticket.request).await;
    viewer.apply_detail(&ticket, outcome);

    let overlay = viewer
        .detail_mut()
        .ok_or_else(|| anyhow!("place detail overlay closed unexpectedly"))?;
    overlay.select_language(language);

    if json {
        match (&overlay.result, &overlay.error) {
            (Some(result), _) => println!("{}", serde_json::to_string_pretty(result)?),
            (None, Some(error)) => println!(
                "{}",
                serde_json::json!({"error": {"message": error}})
            ),
            (None, None) => {}
        }
    } else {
        print!("{}", render::render_detail_header(overlay));
        if overlay.result.is_some() {
            if overlay.active_text().is_empty() {
                println!("No {language} narration available.");
            } else {
                println!();
                progress::reveal(&mut overlay.typewriter).await?;
            }
        }
    }

    if matches.get_flag("play") {
        match overlay.play(language) {
            Some(url) => println!("Playing {language} audio: {url}"),
            None => println!("No {language} audio available."),
        }
    }

    viewer.close_detail();
    Ok(())
}

fn show(viewer: &Viewer, json: bool) -> anyhow::Result<()> {
    match (viewer.active_view(), viewer.itinerary()) {
        (PlannerView::Itinerary, Some(data)) => {
            if json {
                println!("{}", serde_json::to_string_pretty(data)?);
            } else {
                print!(
                    "{}",
                    render::render_itinerary(data, viewer.selected_day_index())
                );
            }
        }
        _ => {
            if json {
                println!("{}", serde_json::to_string_pretty(viewer.snapshot())?);
            } else {
                print!("{}", render::render_input_prompt(viewer.last_error()));
            }
        }
    }
    Ok(())
}

/// 1-based position from the command line to a 0-based index.
fn parse_position(raw: &str, what: &str) -> anyhow::Result<usize> {
    let position: usize = raw
        .trim()
        .parse()
        .with_context(|| format!("{what} must be a positive number, got `{raw}`"))?;
    if position == 0 {
        bail!("{what} numbers start at 1");
    }
    Ok(position - 1)
}
