use clap::{Parser, Subcommand};
use genui_tree::{analyze, apply_text, generate_project_with, QuoteStyle, SerializeOptions, TreeError, TreeResult, UiTree};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

/// Build a UI tree from a JSONL patch stream and export or inspect it
#[derive(Parser)]
#[command(name = "genui-export", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a Next.js project generated from the tree
    Export {
        /// JSONL patch stream ("-" for stdin)
        input: String,
        /// Output directory
        #[arg(short, long, default_value = "generated-app")]
        out: PathBuf,
        /// Quote string props with single quotes
        #[arg(long)]
        single_quotes: bool,
        /// Spaces per nesting level in the generated page
        #[arg(long, default_value_t = 2)]
        indent: usize,
    },
    /// Print used components, data paths and actions as JSON
    Analyze {
        /// JSONL patch stream ("-" for stdin)
        input: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("genui_tree=info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Export {
            input,
            out,
            single_quotes,
            indent,
        } => {
            let options = SerializeOptions {
                quotes: if single_quotes {
                    QuoteStyle::Single
                } else {
                    QuoteStyle::Double
                },
                indent,
            };
            export(&input, &out, &options)
        }
        Command::Analyze { input } => analyze_stream(&input),
    };

    if let Err(e) = result {
        eprintln!("✗ {}", e);
        process::exit(1);
    }
}

fn load_tree(input: &str) -> TreeResult<UiTree> {
    let text = if input == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(input)?
    };

    let mut tree = UiTree::new();
    let stats = apply_text(&mut tree, &text);
    tracing::info!(
        "Applied {} operation(s), skipped {} line(s) from {}",
        stats.applied,
        stats.skipped,
        input
    );
    Ok(tree)
}

fn export(input: &str, out: &Path, options: &SerializeOptions) -> TreeResult<()> {
    let tree = load_tree(input)?;
    if tree.root_element().is_none() {
        return Err(TreeError::MissingRoot);
    }

    let files = generate_project_with(&tree, options);
    for file in &files {
        let target = out.join(&file.path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, &file.content)?;
        tracing::debug!("Wrote {}", target.display());
    }

    println!("✓ {} file(s) written to {}", files.len(), out.display());
    Ok(())
}

fn analyze_stream(input: &str) -> TreeResult<()> {
    let tree = load_tree(input)?;
    let analysis = analyze(&tree);
    println!("{}", serde_json::to_string_pretty(&analysis)?);
    Ok(())
}
