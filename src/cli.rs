// src/cli.rs

//! Command-line arguments for the `inventory-optimizer` binary.

use std::path::PathBuf;

pub const USAGE: &str = "\
Usage:
  inventory-optimizer profiles <profiles.csv> [options]
  inventory-optimizer history <sales.csv> <purchases.csv> <invoices.csv> <inventory.csv> [options]

Options:
  --config <FILE>          TOML file with policy constants
  --out <DIR>              Directory for CSV reports (default: reports)
  --policy <fixed|service> Reorder-point policy (default: fixed, days-of-demand
                           buffer; service sizes the buffer for a target
                           service level)";

/// Where the product aggregates come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// A pre-aggregated profile CSV.
    Profiles(PathBuf),
    /// Raw sales / purchase / invoice / ending-inventory CSVs.
    History {
        sales: PathBuf,
        purchases: PathBuf,
        invoices: PathBuf,
        inventory: PathBuf,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub input: Input,
    pub config_path: Option<PathBuf>,
    pub out_dir: PathBuf,
    pub policy: String,
}

impl Args {
    /// Parses arguments, skipping the program name.
    ///
    /// Accepts any iterator so it can be tested without `std::env::args()`.
    pub fn parse_from<I, S>(args: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut positional = Vec::new();
        let mut config_path = None;
        let mut out_dir = PathBuf::from("reports");
        let mut policy = "fixed".to_string();

        let mut iter = args.into_iter().map(Into::into).skip(1);
        while let Some(arg) = iter.next() {
            if !arg.starts_with("--") {
                positional.push(arg);
                continue;
            }
            match arg.as_str() {
                "--config" => config_path = Some(PathBuf::from(value_for(&arg, iter.next())?)),
                "--out" => out_dir = PathBuf::from(value_for(&arg, iter.next())?),
                "--policy" => policy = value_for(&arg, iter.next())?,
                flag => return Err(format!("unknown option '{flag}'")),
            }
        }

        let mut positional = positional.into_iter();
        let input = match positional.next().as_deref() {
            Some("profiles") => match (positional.next(), positional.next()) {
                (Some(path), None) => Input::Profiles(PathBuf::from(path)),
                _ => return Err("'profiles' takes exactly one CSV path".to_string()),
            },
            Some("history") => {
                let paths: Vec<PathBuf> = positional.map(PathBuf::from).collect();
                match <[PathBuf; 4]>::try_from(paths) {
                    Ok([sales, purchases, invoices, inventory]) => Input::History {
                        sales,
                        purchases,
                        invoices,
                        inventory,
                    },
                    Err(_) => return Err("'history' takes exactly four CSV paths".to_string()),
                }
            }
            Some(other) => return Err(format!("unknown command '{other}'")),
            None => return Err("missing command".to_string()),
        };

        Ok(Self {
            input,
            config_path,
            out_dir,
            policy,
        })
    }
}

fn value_for(flag: &str, value: Option<String>) -> Result<String, String> {
    value.ok_or_else(|| format!("option '{flag}' needs a value"))
}
