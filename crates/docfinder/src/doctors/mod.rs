use crate::prelude::{println, *};
use docfinder_core::doctor::{normalize_doctors, DoctorRecord};
use log::{debug, error};

pub mod list;
pub mod specialties;
pub mod suggest;

pub const DEFAULT_API_URL: &str = "https://srijandubey.github.io/campus-api-mock/SRM-C1-25.json";

/// Shown when the directory could not be loaded
pub const LOAD_ERROR_MESSAGE: &str = "Error loading doctors data. Please try again later.";

#[derive(Debug, clap::Parser)]
#[command(name = "doctors")]
#[command(about = "Doctor directory operations")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List doctors matching the given filters
    #[clap(name = "list")]
    List(list::ListOptions),

    /// Suggest doctor names for a partial query
    #[clap(name = "suggest")]
    Suggest(suggest::SuggestOptions),

    /// List every specialty in the directory
    #[clap(name = "specialties")]
    Specialties(specialties::SpecialtiesOptions),
}

/// Where the doctor directory is loaded from
#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct SourceOptions {
    /// Doctor directory endpoint (JSON array of doctors)
    #[arg(long, env = "DOCFINDER_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        Commands::List(options) => {
            verbose_source(&global, &options.source);
            list::run(options, global).await
        }
        Commands::Suggest(options) => {
            verbose_source(&global, &options.source);
            suggest::run(options, global).await
        }
        Commands::Specialties(options) => {
            verbose_source(&global, &options.source);
            specialties::run(options, global).await
        }
    }
}

fn verbose_source(global: &crate::Global, source: &SourceOptions) {
    if global.verbose {
        println!("Doctor directory: {}", source.api_url);
        println!();
    }
}

/// Fetch the doctor directory and normalize every record
///
/// Single GET, no retry. Failures are logged and returned unchanged.
pub async fn fetch_doctors(
    client: &reqwest::Client,
    url: &str,
) -> std::result::Result<Vec<DoctorRecord>, FetchError> {
    debug!("Fetching doctors from {url}");

    let result = fetch_and_normalize(client, url).await;
    match &result {
        Ok(doctors) => debug!("Loaded {} doctors", doctors.len()),
        Err(err) => error!("Error fetching doctors: {err}"),
    }

    result
}

async fn fetch_and_normalize(
    client: &reqwest::Client,
    url: &str,
) -> std::result::Result<Vec<DoctorRecord>, FetchError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }

    let body = response
        .text()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))?;

    let payload: serde_json::Value =
        serde_json::from_str(&body).map_err(|e| FetchError::Parse(e.to_string()))?;

    normalize_doctors(&payload).map_err(|e| FetchError::Parse(e.to_string()))
}

/// Load the directory for a command, attaching the user-facing error message
pub async fn load_doctors(source: &SourceOptions) -> Result<Vec<DoctorRecord>> {
    let client = reqwest::Client::new();
    fetch_doctors(&client, &source.api_url)
        .await
        .context(LOAD_ERROR_MESSAGE)
}
