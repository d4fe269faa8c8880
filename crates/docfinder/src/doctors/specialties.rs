use crate::prelude::{print, println, *};
use docfinder_core::listing::{specialty_counts, SpecialtyCount};

use super::{load_doctors, SourceOptions};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct SpecialtiesOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    #[clap(flatten)]
    pub source: SourceOptions,
}

pub async fn run(options: SpecialtiesOptions, _global: crate::Global) -> Result<()> {
    let counts = specialties_data(&options.source).await?;

    if options.json {
        let json = serde_json::to_string_pretty(&counts)
            .map_err(|e| eyre!("JSON serialization failed: {}", e))?;
        println!("{}", json);
    } else if counts.is_empty() {
        println!("No specialties found.");
    } else {
        print!("{}", specialties_table(&counts));
    }

    Ok(())
}

/// Fetches the directory and returns its specialty catalog, sorted by name
pub async fn specialties_data(source: &SourceOptions) -> Result<Vec<SpecialtyCount>> {
    let doctors = load_doctors(source).await?;
    Ok(specialty_counts(&doctors))
}

fn specialties_table(counts: &[SpecialtyCount]) -> prettytable::Table {
    let mut table = crate::prelude::new_table();
    table.add_row(prettytable::row!["Specialty", "Doctors"]);
    for count in counts {
        table.add_row(prettytable::row![count.name, count.doctors]);
    }
    table
}
