//! Command-line host for adminmask.
//!
//! Supplies what the browser supplied to the dashboard: a place to save
//! exports (a directory), a place to persist mask mode (a state directory)
//! and a log sink.

use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

use adminmask::{
    ArrayHandling, DirectorySink, ExportOutcome, FileSink, FileStore, JsonMasker, KeyValueStore,
    MaskMode, MaskRules, export_to_csv, export_to_json, records_from, stamped_filename,
};
use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use tracing::{debug, info};

/// adminmask command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "adminmask",
    author,
    version,
    about = "Mask PII in JSON, export records to CSV/JSON, and manage mask mode"
)]
struct Args {
    /// Directory holding persisted state (mask mode).
    #[arg(long, env = "ADMINMASK_STATE_DIR", default_value = ".adminmask", global = true)]
    state_dir: PathBuf,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, env = "ADMINMASK_LOG", default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Mask sensitive fields in a JSON document and print the result.
    Mask {
        /// JSON file to read (stdin when omitted).
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// JSON file with masking rules (defaults apply to missing fields).
        #[arg(short, long)]
        rules: Option<PathBuf>,

        /// Turn arrays into index-keyed objects, as the legacy dashboard did.
        #[arg(long)]
        legacy_arrays: bool,
    },

    /// Export a JSON array of records to a date-stamped file.
    Export {
        #[arg(short, long, value_enum)]
        format: Format,

        /// Filename prefix; the date and extension are appended.
        #[arg(short, long)]
        name: String,

        /// Directory to write into.
        #[arg(short, long, default_value = ".")]
        out: PathBuf,

        /// JSON file to read (stdin when omitted).
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Export raw values even when mask mode is on.
        #[arg(long)]
        raw: bool,
    },

    /// Show or change mask mode.
    Mode {
        #[arg(value_enum, default_value_t = ModeAction::Show)]
        action: ModeAction,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Csv,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ModeAction {
    Show,
    On,
    Off,
    Toggle,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mode = MaskMode::load(FileStore::new(&args.state_dir));
    debug!(state_dir = ?args.state_dir, masked = mode.is_masked(), "mask mode loaded");

    match args.command {
        Command::Mask {
            input,
            rules,
            legacy_arrays,
        } => {
            let rules = load_rules(rules.as_deref(), legacy_arrays)?;
            let masked = mask_document(rules, &read_json(input.as_deref())?);
            println!("{}", serde_json::to_string_pretty(&masked)?);
        }
        Command::Export {
            format,
            name,
            out,
            input,
            raw,
        } => {
            let sink = DirectorySink::new(&out);
            let request = ExportRequest {
                format,
                base_name: stamped_filename(&name),
                raw,
            };
            let outcome = export_document(&mode, &sink, read_json(input.as_deref())?, &request)
                .with_context(|| format!("Failed to export to {}", out.display()))?;
            match outcome {
                ExportOutcome::Saved { filename } => println!("{}", out.join(filename).display()),
                ExportOutcome::Skipped => eprintln!("No data to export"),
            }
        }
        Command::Mode { action } => {
            let masked = apply_mode(&mode, action)?;
            println!("{}", if masked { "masked" } else { "unmasked" });
        }
    }

    Ok(())
}

/// What `export` was asked to write.
#[derive(Debug)]
struct ExportRequest {
    format: Format,
    base_name: String,
    raw: bool,
}

fn mask_document(rules: MaskRules, document: &Value) -> Value {
    JsonMasker::new(rules).mask(document)
}

/// Exports a JSON array of records, masked while mask mode is on unless the
/// request asks for raw values.
fn export_document<S, F>(
    mode: &MaskMode<S>,
    sink: &F,
    document: Value,
    request: &ExportRequest,
) -> Result<ExportOutcome>
where
    S: KeyValueStore,
    F: FileSink + ?Sized,
{
    let Value::Array(rows) = document else {
        bail!("export input must be a JSON array of records");
    };
    let mut records = records_from(&rows).context("Failed to read export records")?;
    let masked = mode.is_masked() && !request.raw;
    if masked {
        records = JsonMasker::default().mask_records(&records);
    }

    let outcome = match request.format {
        Format::Csv => export_to_csv(sink, &records, &request.base_name),
        Format::Json => export_to_json(sink, &records, &request.base_name),
    }?;
    if let ExportOutcome::Saved { filename } = &outcome {
        info!(filename = %filename, masked, "exported");
    }
    Ok(outcome)
}

/// Applies a `mode` subcommand and returns the resulting value.
fn apply_mode<S: KeyValueStore>(mode: &MaskMode<S>, action: ModeAction) -> Result<bool> {
    match action {
        ModeAction::Show => {}
        ModeAction::On => mode.set_masked(true)?,
        ModeAction::Off => mode.set_masked(false)?,
        ModeAction::Toggle => {
            mode.toggle()?;
        }
    }
    Ok(mode.is_masked())
}

fn load_rules(path: Option<&Path>, legacy_arrays: bool) -> Result<MaskRules> {
    let rules = match path {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read rules file: {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse rules file: {}", path.display()))?
        }
        None => MaskRules::default(),
    };
    Ok(if legacy_arrays {
        rules.with_array_handling(ArrayHandling::IndexedObject)
    } else {
        rules
    })
}

fn read_json(path: Option<&Path>) -> Result<Value> {
    let content = match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            buffer
        }
    };
    serde_json::from_str(&content).context("Input is not valid JSON")
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use adminmask::{MemorySink, MemoryStore};
    use serde_json::json;

    use super::*;

    fn rows() -> Value {
        json!([{"email": "jane@example.com", "user_id": "5f0c2a9e-77b1-4c1d", "amount": 5}])
    }

    fn csv_request(raw: bool) -> ExportRequest {
        ExportRequest {
            format: Format::Csv,
            base_name: "users-2026-10-18".to_string(),
            raw,
        }
    }

    #[test]
    fn export_masks_while_mode_is_on() {
        let mode = MaskMode::in_memory();
        let sink = MemorySink::new();

        let outcome = export_document(&mode, &sink, rows(), &csv_request(false)).unwrap();

        assert_eq!(
            outcome,
            ExportOutcome::Saved {
                filename: "users-2026-10-18.csv".to_string()
            }
        );
        assert_eq!(
            sink.files()[0].text(),
            "email,user_id,amount\nj***e@e***.com,5f0c...4c1d,5"
        );
    }

    #[test]
    fn raw_export_skips_masking() {
        let mode = MaskMode::in_memory();
        let sink = MemorySink::new();

        export_document(&mode, &sink, rows(), &csv_request(true)).unwrap();

        assert_eq!(
            sink.files()[0].text(),
            "email,user_id,amount\njane@example.com,5f0c2a9e-77b1-4c1d,5"
        );
    }

    #[test]
    fn unmasked_mode_exports_raw_values() {
        let mode = MaskMode::in_memory();
        mode.set_masked(false).unwrap();
        let sink = MemorySink::new();
        let request = ExportRequest {
            format: Format::Json,
            base_name: "users".to_string(),
            raw: false,
        };

        export_document(&mode, &sink, rows(), &request).unwrap();

        let files = sink.files();
        assert_eq!(files[0].filename, "users.json");
        assert!(files[0].text().contains("\"jane@example.com\""));
    }

    #[test]
    fn export_rejects_non_array_input() {
        let mode = MaskMode::in_memory();
        let sink = MemorySink::new();
        let err = export_document(&mode, &sink, json!({"a": 1}), &csv_request(false)).unwrap_err();
        assert!(err.to_string().contains("JSON array"));
        assert!(sink.files().is_empty());
    }

    #[test]
    fn mode_changes_are_persisted() {
        let store = Arc::new(MemoryStore::new());
        let mode = MaskMode::load(Arc::clone(&store));

        assert!(apply_mode(&mode, ModeAction::Show).unwrap());
        assert!(!apply_mode(&mode, ModeAction::Off).unwrap());
        assert!(!MaskMode::load(Arc::clone(&store)).is_masked());

        assert!(apply_mode(&mode, ModeAction::Toggle).unwrap());
        assert!(MaskMode::load(Arc::clone(&store)).is_masked());

        assert!(!apply_mode(&mode, ModeAction::Toggle).unwrap());
        assert!(apply_mode(&mode, ModeAction::On).unwrap());
        assert!(MaskMode::load(store).is_masked());
    }

    #[test]
    fn legacy_arrays_flag_selects_indexed_objects() {
        let rules = load_rules(None, true).unwrap();
        assert_eq!(
            mask_document(rules, &json!([{"email": "a@b.com"}])),
            json!({"0": {"email": "a***@b.com"}})
        );
    }
}
