use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::{Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use tokio::runtime::Runtime;

use crate::{
    cmd::tui::ViewerApp,
    search::{count_matches, match_start_lines, segment, Query},
    store::DocumentStore,
    types::{Document, Segment},
    utils::parse_filetype,
};

#[derive(Parser)]
#[command(name = "DocViewer")]
#[command(about = "A terminal document viewer with in-document search and match navigation")]
#[command(version)]
#[command(propagate_version = true)]
pub struct ViewerCli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Document to open (path relative to the documents directory)
    #[arg(short, long)]
    document: Option<String>,

    /// Initial search term applied when the viewer opens
    #[arg(short, long)]
    term: Option<String>,

    /// Documents directory
    #[arg(long, global = true, default_value = ".")]
    directory: PathBuf,

    /// Enable interactive mode
    #[arg(short, long)]
    interactive: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a document in the full-screen viewer
    Open {
        /// Document to open
        document: String,

        /// Initial search term
        #[arg(short, long)]
        term: Option<String>,
    },

    /// Search a document and print every occurrence
    Search {
        /// Document to search
        document: String,

        /// Search term (matched literally, case-insensitive)
        term: String,

        /// Output format (text, json, csv)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// List documents in the documents directory
    List {
        /// File pattern (e.g., "*.pdf")
        #[arg(short, long, default_value = "*")]
        pattern: String,

        /// Recursive listing
        #[arg(short, long)]
        recursive: bool,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show document information
    Info {
        /// Document to inspect
        document: String,
    },

    /// Pick a document interactively and open it
    Interactive,
}

pub struct CliApp {
    cli: ViewerCli,
}

impl CliApp {
    pub fn new() -> Self {
        Self {
            cli: ViewerCli::parse(),
        }
    }

    pub fn run() -> Result<()> {
        let app = Self::new();
        let runtime = Runtime::new()?;
        let store = DocumentStore::new(&app.cli.directory);

        match app.cli.command.as_ref() {
            Some(Commands::Open { document, term }) => {
                Self::run_open(&runtime, &store, document, term.as_deref())
            }
            Some(Commands::Search { document, term, format }) => {
                Self::run_search(&runtime, &store, document, term, format)
            }
            Some(Commands::List { pattern, recursive, format }) => {
                Self::run_list(&store, pattern, *recursive, format)
            }
            Some(Commands::Info { document }) => Self::run_info(&store, document),
            Some(Commands::Interactive) => Self::run_interactive(&runtime, &store),
            None => {
                if app.cli.interactive {
                    Self::run_interactive(&runtime, &store)
                } else if let Some(document) = &app.cli.document {
                    Self::run_open(&runtime, &store, document, app.cli.term.as_deref())
                } else {
                    Self::show_help();
                    Ok(())
                }
            }
        }
    }

    fn run_open(
        runtime: &Runtime,
        store: &DocumentStore,
        id: &str,
        term: Option<&str>,
    ) -> Result<()> {
        let document = Self::fetch_document(runtime, store, id)?;
        let mut viewer = ViewerApp::open(document, term);
        viewer.run()
    }

    fn run_search(
        runtime: &Runtime,
        store: &DocumentStore,
        id: &str,
        term: &str,
        format: &str,
    ) -> Result<()> {
        let document = Self::fetch_document(runtime, store, id)?;

        let query = Query::new(term);
        let segments = segment(&query, &document.content);
        let total = count_matches(&query, &document.content);

        match format {
            "json" => Self::display_json_results(&document, term, &segments, total),
            "csv" => Self::display_csv_results(&document, term, &segments, total),
            _ => {
                Self::display_text_results(&document, term, &segments, total);
                Ok(())
            }
        }
    }

    fn run_list(store: &DocumentStore, pattern: &str, recursive: bool, format: &str) -> Result<()> {
        let ids = store.list(pattern, recursive)?;

        if format == "json" {
            println!("{}", serde_json::to_string_pretty(&ids)?);
            return Ok(());
        }

        if ids.is_empty() {
            println!("{}", "No documents found".yellow());
            return Ok(());
        }
        for id in &ids {
            let label = parse_filetype(id).map(|t| t.label()).unwrap_or("[?]");
            println!("{} {}", label.blue(), id);
        }
        println!("{}", format!("{} documents", ids.len()).green());
        Ok(())
    }

    fn run_info(store: &DocumentStore, id: &str) -> Result<()> {
        let path = store.root().join(id);
        if !path.exists() {
            return Err(anyhow::anyhow!("Document not found: {}", path.display()));
        }

        let file_type = parse_filetype(&path.to_string_lossy())?;
        println!("File: {}", path.display());
        println!("Type: {}", file_type.label().blue());
        println!("Size: {} bytes", path.metadata()?.len());
        Ok(())
    }

    fn run_interactive(runtime: &Runtime, store: &DocumentStore) -> Result<()> {
        let ids = store.list("*", true)?;
        if ids.is_empty() {
            println!("{}", "No documents found".yellow());
            return Ok(());
        }

        let choice = Select::new()
            .with_prompt("Select a document to open")
            .default(0)
            .items(&ids)
            .interact()?;

        let term: String = Input::new()
            .with_prompt("Initial search term (leave empty for none)")
            .allow_empty(true)
            .interact_text()?;
        let term = if term.trim().is_empty() { None } else { Some(term.as_str()) };

        Self::run_open(runtime, store, &ids[choice], term)
    }

    fn fetch_document(runtime: &Runtime, store: &DocumentStore, id: &str) -> Result<Document> {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        spinner.set_message(format!("Loading {}", id));
        spinner.enable_steady_tick(Duration::from_millis(80));

        let result = runtime.block_on(store.fetch(id));
        spinner.finish_and_clear();

        result
    }

    fn display_text_results(document: &Document, term: &str, segments: &[Segment], total: usize) {
        println!(
            "{}",
            format!("Found {} matches for \"{}\" in {}", total, term, document.filename).green()
        );
        if total == 0 {
            println!("{}", "No matches found".yellow());
            return;
        }

        for (line_no, line) in highlighted_lines(segments)
            .into_iter()
            .enumerate()
            .filter(|(_, (_, has_match))| *has_match)
            .map(|(i, (line, _))| (i + 1, line))
        {
            println!("  {:>5}: {}", line_no.to_string().cyan(), line);
        }
    }

    fn display_json_results(
        document: &Document,
        term: &str,
        segments: &[Segment],
        total: usize,
    ) -> Result<()> {
        let matches: Vec<serde_json::Value> = match_start_lines(segments)
            .iter()
            .enumerate()
            .map(|(index, line)| {
                serde_json::json!({
                    "match_index": index,
                    "line": line + 1,
                })
            })
            .collect();

        let output = serde_json::json!({
            "document": document.id,
            "term": term,
            "total_matches": total,
            "matches": matches,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    fn display_csv_results(
        document: &Document,
        term: &str,
        segments: &[Segment],
        _total: usize,
    ) -> Result<()> {
        println!("document,term,match_index,line");
        for (index, line) in match_start_lines(segments).iter().enumerate() {
            println!("{},{},{},{}", document.id, term, index, line + 1);
        }
        Ok(())
    }

    fn show_help() {
        println!("{}", "DocViewer".bold().blue());
        println!("{}", "=========".blue());
        println!();
        println!("Open a document in the viewer:");
        println!("  docviewer open report.pdf --term revenue");
        println!();
        println!("Search without opening the viewer:");
        println!("  docviewer search report.pdf revenue");
        println!();
        println!("Other commands: list, info, interactive.");
        println!("Run with --help for the full reference.");
    }
}

/// Rebuild the document's display lines with matches highlighted for the
/// terminal, flagging lines that contain at least one match.
fn highlighted_lines(segments: &[Segment]) -> Vec<(String, bool)> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut has_match = false;

    for seg in segments {
        for (i, piece) in seg.text.split('\n').enumerate() {
            if i > 0 {
                lines.push((std::mem::take(&mut current), has_match));
                has_match = false;
            }
            if piece.is_empty() {
                continue;
            }
            if seg.is_match {
                current.push_str(&piece.black().on_yellow().to_string());
                has_match = true;
            } else {
                current.push_str(piece);
            }
        }
    }
    lines.push((current, has_match));

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{segment, Query};

    #[test]
    fn test_highlighted_lines_flags_match_lines() {
        colored::control::set_override(false);

        let content = "first line\na fox here\nlast line";
        let segments = segment(&Query::new("fox"), content);
        let lines = highlighted_lines(&segments);

        assert_eq!(lines.len(), 3);
        assert!(!lines[0].1);
        assert!(lines[1].1);
        assert!(!lines[2].1);
        assert_eq!(lines[1].0, "a fox here");
    }

    #[test]
    fn test_highlighted_lines_without_matches() {
        colored::control::set_override(false);

        let segments = segment(&Query::new(""), "just\ntext");
        let lines = highlighted_lines(&segments);
        assert_eq!(lines, vec![("just".to_string(), false), ("text".to_string(), false)]);
    }
}
