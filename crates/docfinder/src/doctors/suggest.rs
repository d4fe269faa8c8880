use crate::prelude::{print, println, *};
use colored::Colorize;
use docfinder_core::suggest::{suggest, SearchSuggestion};

use super::{load_doctors, SourceOptions};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct SuggestOptions {
    /// Partial doctor name
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    #[clap(flatten)]
    pub source: SourceOptions,
}

pub async fn run(options: SuggestOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Suggesting names for {:?}...", options.query);
    }

    let suggestions = suggest_data(&options.query, &options.source).await?;

    if options.json {
        let json = serde_json::to_string_pretty(&suggestions)
            .map_err(|e| eyre!("JSON serialization failed: {}", e))?;
        println!("{}", json);
    } else {
        print!("{}", format_suggestions_text(&options.query, &suggestions));
    }

    Ok(())
}

/// Fetches the directory and returns autocomplete suggestions for `query`
pub async fn suggest_data(query: &str, source: &SourceOptions) -> Result<Vec<SearchSuggestion>> {
    // Blank queries never show suggestions, skip the round trip
    if query.trim().is_empty() {
        return Ok(Vec::new());
    }

    let doctors = load_doctors(source).await?;
    Ok(suggest(query, &doctors))
}

fn format_suggestions_text(query: &str, suggestions: &[SearchSuggestion]) -> String {
    let mut result = String::new();

    if suggestions.is_empty() {
        result.push_str(&format!(
            "{}\n",
            format!("No doctors match \"{query}\".").yellow()
        ));
        return result;
    }

    for suggestion in suggestions {
        result.push_str(&format!(
            "  {} {}\n",
            suggestion.name.white().bold(),
            format!("(id {})", suggestion.id).bright_black()
        ));
    }

    result.push_str(&format!(
        "\n{}: {}\n",
        "To search".bright_white().bold(),
        format!("docfinder doctors list --search \"{}\"", suggestions[0].name).cyan()
    ));

    result
}
