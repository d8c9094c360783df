use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use crate::config::{self, Overrides};
use crate::itinerary::client::{self, ItineraryClient};
use crate::itinerary::types::ItineraryRequest;

pub const DEFAULT_LOCATION: &str = "Paris, France";
pub const DEFAULT_START_DATE: &str = "2025-12-20";
pub const DEFAULT_END_DATE: &str = "2025-12-22";

#[derive(Debug, Args, Clone)]
pub struct GenerateArgs {
    /// Destination, e.g. "Paris, France"
    pub location: Option<String>,
    /// First day of the trip (YYYY-MM-DD)
    pub start_date: Option<String>,
    /// Last day of the trip (YYYY-MM-DD)
    pub end_date: Option<String>,

    /// Completion endpoint URL (overrides TRIPGEN_ENDPOINT)
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,
    /// Model identifier (overrides TRIPGEN_MODEL)
    #[arg(long)]
    pub model: Option<String>,
    /// Request timeout in seconds, 0 disables it (overrides TRIPGEN_TIMEOUT)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
    /// Profile from the config file
    #[arg(long)]
    pub profile: Option<String>,

    /// Indent the JSON output
    #[arg(long)]
    pub pretty: bool,
    /// Also write the JSON output to this file
    #[arg(long, value_name = "PATH")]
    pub save: Option<PathBuf>,
    /// Print the request that would be sent and exit
    #[arg(long)]
    pub dry_run: bool,
    /// Log request details to stderr
    #[arg(short, long)]
    pub verbose: bool,
    /// Only report fatal errors on stderr
    #[arg(short, long)]
    pub quiet: bool,
}

impl GenerateArgs {
    /// Request from the positionals; all three or the default trip.
    pub fn request(&self) -> ItineraryRequest {
        match (&self.location, &self.start_date, &self.end_date) {
            (Some(location), Some(start_date), Some(end_date)) => {
                ItineraryRequest::new(location, start_date, end_date)
            }
            (None, None, None) => default_request(),
            _ => {
                warn!("LOCATION, START_DATE and END_DATE must be given together; using defaults");
                default_request()
            }
        }
    }

    fn overrides(&self) -> Overrides {
        Overrides {
            profile: self.profile.clone(),
            endpoint: self.endpoint.clone(),
            model: self.model.clone(),
            timeout_secs: self.timeout,
        }
    }
}

fn default_request() -> ItineraryRequest {
    ItineraryRequest::new(DEFAULT_LOCATION, DEFAULT_START_DATE, DEFAULT_END_DATE)
}

pub fn run(args: GenerateArgs) -> Result<(), String> {
    let settings = config::resolve(&args.overrides()).map_err(|err| err.to_string())?;
    let request = args.request();

    debug!(
        endpoint = %settings.endpoint,
        model = %settings.model,
        timeout_secs = ?settings.timeout_secs,
        api_key_present = settings.api_key.is_some(),
        "resolved configuration"
    );

    if args.dry_run {
        let body = client::request_body(&settings.model, &request);
        let report = json!({
            "dry_run": true,
            "endpoint": settings.endpoint,
            "model": settings.model,
            "timeout_secs": settings.timeout_secs,
            "request": body,
        });
        return emit(&report, args.pretty, args.save.as_deref());
    }

    info!(
        "Generating itinerary for {} from {} to {}...",
        request.location, request.start_date, request.end_date
    );

    let itinerary = ItineraryClient::new(settings)
        .and_then(|client| client.generate_request(&request))
        .map_err(|err| err.to_string())?;

    if let Some(events) = itinerary.get("events").and_then(Value::as_array) {
        debug!(events = events.len(), "itinerary received");
    }

    emit(&itinerary, args.pretty, args.save.as_deref())
}

fn emit(value: &Value, pretty: bool, save: Option<&Path>) -> Result<(), String> {
    let rendered = if pretty {
        format!("{value:#}")
    } else {
        value.to_string()
    };

    if let Some(path) = save {
        write_output(path, &rendered)?;
        info!("Saved itinerary to {}", path.display());
    }

    println!("{rendered}");
    Ok(())
}

fn write_output(path: &Path, contents: &str) -> Result<(), String> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| {
            format!(
                "Failed to create output directory '{}': {err}",
                parent.display()
            )
        })?;
    }

    fs::write(path, format!("{contents}\n"))
        .map_err(|err| format!("Failed to write output file '{}': {err}", path.display()))
}
