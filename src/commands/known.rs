//! Managing the list of ingredients with a known ABV.

use abvcalc_core::coerce::{clamp_abv, parse_optional};
use abvcalc_core::{Directory, KeyValueStore, KnownField, KnownIngredient};
use clap::{Args, Subcommand};

use super::{row_error, row_index, OutputFormat};

#[derive(Args)]
pub struct KnownCommand {
    #[command(subcommand)]
    pub command: KnownSubcommand,
}

#[derive(Subcommand)]
pub enum KnownSubcommand {
    /// List known ingredients
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Add a known ingredient
    Add {
        /// Ingredient name
        name: String,

        /// ABV in percent (may be left blank and set later)
        abv: Option<String>,
    },

    /// Change the name or ABV of a known ingredient
    Set {
        /// Row number as shown by `list`
        row: usize,

        /// Field to change: name or abv
        field: KnownField,

        /// New value
        value: String,
    },

    /// Remove a known ingredient
    Remove {
        /// Row number as shown by `list`
        row: usize,
    },

    /// Show the ABV a name would fill in
    Lookup {
        /// Ingredient name (case-insensitive)
        name: String,
    },
}

impl KnownCommand {
    pub fn run<S: KeyValueStore>(
        &self,
        directory: &mut Directory<S>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            KnownSubcommand::List { format } => {
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(directory.items())?);
                    }
                    OutputFormat::Text => {
                        if directory.is_empty() {
                            println!("No known ingredients");
                            return Ok(());
                        }
                        print!("{}", render_list(directory.items()));
                    }
                }
                Ok(())
            }

            KnownSubcommand::Add { name, abv } => {
                if name.trim().is_empty() {
                    return Err("Ingredient name cannot be empty".into());
                }

                let index = directory.insert(KnownIngredient {
                    name: name.trim().to_string(),
                    abv: abv.as_deref().and_then(parse_optional).map(clamp_abv),
                });

                if let Some(item) = directory.items().get(index) {
                    println!("Added known ingredient {}: {}", index + 1, item);
                }
                Ok(())
            }

            KnownSubcommand::Set { row, field, value } => {
                let index = row_index(*row)?;
                directory
                    .update(index, *field, value)
                    .map_err(row_error)?;

                if let Some(item) = directory.items().get(index) {
                    println!("Updated known ingredient {}: {}", row, item);
                }
                Ok(())
            }

            KnownSubcommand::Remove { row } => {
                let removed = directory.remove(row_index(*row)?).map_err(row_error)?;
                println!("Removed known ingredient: {}", removed);
                Ok(())
            }

            KnownSubcommand::Lookup { name } => {
                match directory.lookup(name) {
                    Some(abv) => println!("{}: {}%", name, abv),
                    None => println!("{}: not found", name),
                }
                Ok(())
            }
        }
    }
}

fn render_list(items: &[KnownIngredient]) -> String {
    let mut out = format!("{:<4}  {:<30}  ABV\n", "#", "NAME");
    out.push_str(&"-".repeat(44));
    out.push('\n');
    for (i, item) in items.iter().enumerate() {
        let name = if item.name.chars().count() > 30 {
            format!("{}...", item.name.chars().take(27).collect::<String>())
        } else {
            item.name.clone()
        };
        let abv = item
            .abv
            .map(|a| format!("{}%", a))
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!("{:<4}  {:<30}  {}\n", i + 1, name, abv));
    }
    out.push_str(&format!("\nTotal: {} ingredient(s)\n", items.len()));
    out
}
