use crate::prelude::{eprintln, print, println, *};
use colored::Colorize;
use docfinder_core::filter::{ConsultationMode, FilterState, SortKey};
use docfinder_core::listing::{build_listing, collect_specialties, DoctorCard, ListingOutput};
use docfinder_core::query::decode_query;
use log::warn;

use super::{load_doctors, SourceOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, serde::Serialize, serde::Deserialize)]
pub enum ModeArg {
    /// Video consultation
    Video,
    /// In-clinic visit
    Clinic,
}

impl From<ModeArg> for ConsultationMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Video => ConsultationMode::Video,
            ModeArg::Clinic => ConsultationMode::Clinic,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, serde::Serialize, serde::Deserialize)]
pub enum SortArg {
    /// Fees, low to high
    Fees,
    /// Experience, high to low
    Experience,
}

impl From<SortArg> for SortKey {
    fn from(sort: SortArg) -> Self {
        match sort {
            SortArg::Fees => SortKey::Fees,
            SortArg::Experience => SortKey::Experience,
        }
    }
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ListOptions {
    /// Doctor name to search for (case-insensitive)
    #[arg(short, long)]
    pub search: Option<String>,

    /// Consultation mode
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Specialty to include; repeat to select several
    #[arg(long = "specialty", value_name = "SPECIALTY")]
    pub specialties: Vec<String>,

    /// Sort order
    #[arg(long, value_enum)]
    pub sort: Option<SortArg>,

    /// Shared query string to start from (e.g. "?search=anil&sort=fees"); flags override it
    #[arg(short, long, env = "DOCFINDER_QUERY")]
    pub query: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    #[clap(flatten)]
    pub source: SourceOptions,
}

pub async fn run(options: ListOptions, global: crate::Global) -> Result<()> {
    let filters = build_filters(&options);

    if global.verbose {
        println!("Filters: {:?}", filters);
    }

    let listing = list_doctors_data(filters, &options.source).await?;

    if options.json {
        output_json(&listing)?;
    } else {
        output_formatted(&listing)?;
    }

    Ok(())
}

/// Merge the shared query string with explicit flags; flags win
pub fn build_filters(options: &ListOptions) -> FilterState {
    let mut filters = options
        .query
        .as_deref()
        .map(decode_query)
        .unwrap_or_default();

    if let Some(search) = &options.search {
        filters.set_search_query(search.as_str());
    }
    if let Some(mode) = options.mode {
        filters.consultation_mode = Some(mode.into());
    }
    if !options.specialties.is_empty() {
        filters.specialties.clear();
        for specialty in &options.specialties {
            if !filters.specialties.contains(specialty) {
                filters.specialties.push(specialty.clone());
            }
        }
    }
    if let Some(sort) = options.sort {
        filters.sort_by = Some(sort.into());
    }

    filters
}

/// Fetches the directory and runs the listing pipeline
///
/// Selected specialties that no loaded doctor has are dropped with a warning.
pub async fn list_doctors_data(
    mut filters: FilterState,
    source: &SourceOptions,
) -> Result<ListingOutput> {
    let doctors = load_doctors(source).await?;

    let known = collect_specialties(&doctors);
    let dropped = filters.retain_known_specialties(&known);
    if !dropped.is_empty() {
        warn!("Ignoring unknown specialties: {}", dropped.join(", "));
        eprintln!(
            "{} unknown specialties ignored: {}",
            "warning:".yellow().bold(),
            dropped.join(", ")
        );
    }

    Ok(build_listing(&doctors, &filters))
}

/// Convert listing output to JSON string
fn format_listing_json(output: &ListingOutput) -> Result<String> {
    serde_json::to_string_pretty(output).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

fn format_card(result: &mut String, position: usize, card: &DoctorCard) {
    result.push_str(&format!(
        "\n{} {}\n",
        format!("[{position}]").yellow().bold(),
        card.name.white().bold()
    ));

    if let Some(specialty) = &card.primary_specialty {
        result.push_str(&format!("    {}\n", specialty.bright_white()));
    }

    result.push_str(&format!(
        "    {}: {}\n",
        "Experience".green(),
        format!("{} yrs exp.", card.experience_years).bright_yellow()
    ));

    if let Some(clinic) = &card.clinic_name {
        result.push_str(&format!("    {}: {}\n", "Clinic".green(), clinic));
    }

    if let Some(locality) = &card.locality {
        result.push_str(&format!("    {}: {}\n", "Locality".green(), locality));
    }

    if !card.fees.is_empty() {
        result.push_str(&format!(
            "    {}: {}\n",
            "Fees".green(),
            card.fees.bright_magenta()
        ));
    }

    if !card.badges.is_empty() {
        let badges: Vec<String> = card
            .badges
            .iter()
            .map(|badge| format!("[{badge}]").cyan().to_string())
            .collect();
        result.push_str(&format!("    {}\n", badges.join(" ")));
    }

    if !card.languages.is_empty() {
        result.push_str(&format!(
            "    {}: {}\n",
            "Languages".green(),
            card.languages.join(", ").bright_black()
        ));
    }
}

/// Convert listing output to formatted text with colors
fn format_listing_text(output: &ListingOutput) -> String {
    let mut result = String::new();

    // Header
    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&format!(
        "{}\n",
        output.heading.to_uppercase().bright_cyan().bold()
    ));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_cyan()));

    if output.doctors.is_empty() {
        result.push_str(&format!(
            "\n{}\n",
            "No doctors found matching your criteria.".yellow()
        ));
    } else {
        for (idx, card) in output.doctors.iter().enumerate() {
            format_card(&mut result, idx + 1, card);
        }
    }

    if !output.query.is_empty() {
        result.push_str(&format!("\n{}:\n", "To share this view".bright_white().bold()));
        result.push_str(&format!(
            "  {}\n",
            format!("docfinder doctors list --query '?{}'", output.query).cyan()
        ));
    }

    result.push('\n');
    result
}

fn output_json(output: &ListingOutput) -> Result<()> {
    let json = format_listing_json(output)?;
    println!("{}", json);
    Ok(())
}

fn output_formatted(output: &ListingOutput) -> Result<()> {
    let formatted = format_listing_text(output);
    print!("{}", formatted);
    Ok(())
}
