use abvcalc_core::{AbvLookup, CalcError, EntryField, Ledger, VolumeUnit};
use clap::Args;
use std::fmt::Write as _;

use super::OutputFormat;
use crate::config::Config;

#[derive(Args)]
pub struct CalcCommand {
    /// Ingredient as NAME[:VOLUME[:ABV]] (can be repeated)
    #[arg(long = "ingredient", short, value_name = "NAME[:VOL[:ABV]]", required = true)]
    pub ingredients: Vec<String>,

    /// Unit volumes are given in (defaults to the configured unit)
    #[arg(long, short)]
    pub unit: Option<VolumeUnit>,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl CalcCommand {
    pub fn run(
        &self,
        known: &impl AbvLookup,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let unit = self.unit.unwrap_or(config.unit.value);
        let ledger = build_ledger(unit, &self.ingredients, known)?;

        match self.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "unit": ledger.unit(),
                    "entries": ledger.entries(),
                    "totals": ledger.aggregate(),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                print!("{}", render(&ledger));
            }
        }
        Ok(())
    }
}

/// Builds a ledger from `NAME[:VOLUME[:ABV]]` specs.
///
/// Fields go through the same edit path as interactive input, so a known
/// name fills in its ABV and an explicit ABV afterwards wins. A missing
/// volume keeps the default pour.
pub fn build_ledger(
    unit: VolumeUnit,
    specs: &[String],
    known: &impl AbvLookup,
) -> Result<Ledger, CalcError> {
    let mut ledger = Ledger::new(unit);
    for item in specs {
        let mut parts = item.splitn(3, ':');
        let index = ledger.add_entry();

        if let Some(name) = parts.next() {
            ledger.update_field(index, EntryField::Name, name.trim(), known)?;
        }
        if let Some(volume) = parts.next() {
            ledger.update_field(index, EntryField::Volume, volume, known)?;
        }
        if let Some(abv) = parts.next() {
            ledger.update_field(index, EntryField::Abv, abv, known)?;
        }
    }
    Ok(ledger)
}

/// Entries followed by totals, as shown to a person.
pub fn render(ledger: &Ledger) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Ingredients ({}):", ledger.unit());
    if ledger.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for (i, entry) in ledger.entries().iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, entry);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", ledger.aggregate().display_in(ledger.unit()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use abvcalc_core::{Directory, KnownIngredient, MemoryStore};

    fn directory() -> Directory<MemoryStore> {
        let mut dir = Directory::load(MemoryStore::new());
        dir.insert(KnownIngredient::new("Vodka", 40.0));
        dir.insert(KnownIngredient::new("Kahlua", 20.0));
        dir
    }

    fn specs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_build_ledger_fills_known_abv() {
        let ledger = build_ledger(
            VolumeUnit::Ml,
            &specs(&["vodka:50", "kahlua:25", "Cream:25"]),
            &directory(),
        )
        .unwrap();

        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger.entries()[0].abv, 40.0);
        assert_eq!(ledger.entries()[1].abv, 20.0);
        assert_eq!(ledger.entries()[2].abv, 0.0);
        assert_eq!(ledger.aggregate().total_abv, 25.0);
    }

    #[test]
    fn test_explicit_abv_overrides_known() {
        let ledger =
            build_ledger(VolumeUnit::Ml, &specs(&["Vodka:50:37.5"]), &directory()).unwrap();
        assert_eq!(ledger.entries()[0].abv, 37.5);
    }

    #[test]
    fn test_missing_volume_keeps_default_pour() {
        let ledger = build_ledger(VolumeUnit::Oz, &specs(&["Vodka"]), &directory()).unwrap();
        assert_eq!(ledger.entries()[0].volume, 1.5);
        assert_eq!(ledger.entries()[0].abv, 40.0);
    }

    #[test]
    fn test_bad_numbers_are_zero() {
        let ledger =
            build_ledger(VolumeUnit::Ml, &specs(&["Mystery:lots:hot"]), &directory()).unwrap();
        assert_eq!(ledger.entries()[0].volume, 0.0);
        assert_eq!(ledger.entries()[0].abv, 0.0);
        assert_eq!(ledger.aggregate().total_abv, 0.0);
    }

    #[test]
    fn test_render() {
        let ledger = build_ledger(
            VolumeUnit::Ml,
            &specs(&["Gin:60:40", "Tonic:60:0"]),
            &directory(),
        )
        .unwrap();

        let output = render(&ledger);
        assert!(output.contains("Ingredients (ml):"));
        assert!(output.contains("  1. Gin @ 40%: 60"));
        assert!(output.contains("  2. Tonic @ 0%: 60"));
        assert!(output.contains("Total Volume: 120.00 ml"));
        assert!(output.contains("Total Alcohol: 24.00 ml"));
        assert!(output.contains("Total ABV: 20.00 %"));
    }

    #[test]
    fn test_render_empty() {
        let output = render(&Ledger::new(VolumeUnit::Oz));
        assert!(output.contains("(none)"));
        assert!(output.contains("Total ABV: 0.00 %"));
    }
}
