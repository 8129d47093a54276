use bulk_inference_spec::config::{self, Format};
use bulk_inference_spec::text::render_text;
use bulk_inference_spec::{DataSpec, ModelSpec, Result, SignatureSelection, SpecMessage};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bulk-inference-spec", version)]
#[command(about = "Convert and inspect bulk-inference ModelSpec/DataSpec files", long_about = None)]
struct Cli {
    /// Log filter, used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "warn")]
    log: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Model,
    Data,
}

#[derive(Subcommand)]
enum Commands {
    /// Re-encode a message file in another format.
    Convert {
        #[arg(long, value_enum)]
        kind: Kind,

        #[arg(short = 'i', long)]
        input: PathBuf,

        #[arg(short = 'o', long)]
        output: PathBuf,

        /// Input format (inferred from the extension if omitted)
        #[arg(long, value_enum)]
        from: Option<Format>,

        /// Output format (inferred from the extension if omitted)
        #[arg(long, value_enum)]
        to: Option<Format>,
    },
    /// Print a message in text form with a summary of what it selects.
    Show {
        #[arg(long, value_enum)]
        kind: Kind,

        #[arg(short = 'i', long)]
        input: PathBuf,

        #[arg(long, value_enum)]
        from: Option<Format>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Commands::Convert {
            kind,
            input,
            output,
            from,
            to,
        } => {
            match kind {
                Kind::Model => convert::<ModelSpec>(&input, from, &output, to)?,
                Kind::Data => convert::<DataSpec>(&input, from, &output, to)?,
            }
            println!("Wrote {}", output.display());
        }
        Commands::Show { kind, input, from } => {
            let report = match kind {
                Kind::Model => {
                    let spec: ModelSpec = config::read_message(&input, from)?;
                    show(&spec, describe_model(&spec))
                }
                Kind::Data => {
                    let spec: DataSpec = config::read_message(&input, from)?;
                    show(&spec, describe_data(&spec))
                }
            };
            print!("{}", report);
        }
    }

    Ok(())
}

fn convert<M: SpecMessage>(
    input: &Path,
    from: Option<Format>,
    output: &Path,
    to: Option<Format>,
) -> Result<()> {
    let message: M = config::read_message(input, from)?;
    config::write_message(&message, output, to)
}

fn show<M: SpecMessage>(message: &M, summary: String) -> String {
    let body = render_text(message);
    let body = if body.is_empty() {
        "# (all fields empty)\n".to_string()
    } else {
        body
    };
    format!("{}---\n{}\n", body, summary)
}

fn describe_model(spec: &ModelSpec) -> String {
    let heads = match spec.signature_selection() {
        SignatureSelection::Default => format!(
            "single-head (default signature {:?})",
            spec.effective_signature_names()[0]
        ),
        SignatureSelection::Single(name) => format!("single-head ({:?})", name),
        SignatureSelection::Multi(names) => format!("multi-head {:?}", names),
    };
    format!("heads: {}\ntags: {:?}", heads, spec.effective_tags())
}

fn describe_data(spec: &DataSpec) -> String {
    if spec.processes_all_splits() {
        "splits: all".to_string()
    } else {
        format!("splits: {:?}", spec.example_splits())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn default_head_summary() {
        assert_eq!(
            describe_model(&ModelSpec::default()),
            "heads: single-head (default signature \"serving_default\")\ntags: [\"serve\"]"
        );
    }

    #[test]
    fn single_head_summary() {
        let spec = ModelSpec::new(["predict"], ["gpu"]);
        assert_eq!(
            describe_model(&spec),
            "heads: single-head (\"predict\")\ntags: [\"gpu\"]"
        );
    }

    #[test]
    fn multi_head_summary() {
        let spec = ModelSpec::new(["serving_default", "classify"], Vec::<String>::new());
        assert_eq!(
            describe_model(&spec),
            "heads: multi-head [\"classify\", \"serving_default\"]\ntags: [\"serve\"]"
        );
    }

    #[test]
    fn split_summaries() {
        assert_eq!(describe_data(&DataSpec::default()), "splits: all");
        assert_eq!(
            describe_data(&DataSpec::new(["eval", "holdout"])),
            "splits: [\"eval\", \"holdout\"]"
        );
    }

    #[test]
    fn show_marks_empty_message() {
        let spec = DataSpec::default();
        assert_eq!(
            show(&spec, describe_data(&spec)),
            "# (all fields empty)\n---\nsplits: all\n"
        );
    }

    #[test]
    fn show_prints_text_then_summary() {
        let spec = DataSpec::new(["eval"]);
        assert_eq!(
            show(&spec, describe_data(&spec)),
            "example_splits: \"eval\"\n---\nsplits: [\"eval\"]\n"
        );
    }

    #[test]
    fn convert_json_to_binary() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("data.json");
        let output = dir.path().join("data.pb");
        std::fs::write(&input, r#"{"example_splits": ["eval"]}"#).unwrap();

        convert::<DataSpec>(&input, None, &output, None).unwrap();
        assert_eq!(
            std::fs::read(&output).unwrap(),
            vec![0x12, 0x04, b'e', b'v', b'a', b'l']
        );
    }
}
