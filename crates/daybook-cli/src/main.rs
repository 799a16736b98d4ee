//! daybook CLI — date-organized Markdown journal.
//!
//! The editing engine is a library invoked in-process; this binary is a
//! thin presentation shell over it: initialize a home directory, create
//! documents, print the archive tree, and re-file or rename existing
//! documents through an editing session.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use chrono::{Local, NaiveDate};
use clap::Parser;

use daybook_archive::{create_document, FolderIndex, FolderNode, Home};
use daybook_core::{Category, Settings};
use daybook_session::EditSession;

#[derive(Parser)]
#[command(name = "daybook")]
#[command(version)]
#[command(about = "Date-organized Markdown journal")]
struct Cli {
    /// Home directory (defaults to the current directory)
    #[arg(long, global = true)]
    home: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Initialize a daybook home directory
    Init {
        /// Directory to initialize
        path: PathBuf,
    },
    /// Create a new document
    New {
        /// Document category
        #[arg(long)]
        category: Category,
        /// Document title, sanitized into the file name
        #[arg(long)]
        title: String,
        /// Authored date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Print the archive tree
    Tree,
    /// Move a document to a different authored date
    Redate {
        /// Document path
        path: PathBuf,
        /// New authored date (YYYY-MM-DD)
        date: NaiveDate,
    },
    /// Rename a document
    Rename {
        /// Document path
        path: PathBuf,
        /// New title, sanitized into the file name
        title: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let home = Home::open(cli.home.unwrap_or_else(|| PathBuf::from(".")));

    match cli.command {
        Commands::Init { path } => init(&path),
        Commands::New {
            category,
            title,
            date,
        } => new_document(&home, category, &title, date),
        Commands::Tree => tree(&home),
        Commands::Redate { path, date } => redate(&home, &path, date),
        Commands::Rename { path, title } => rename(&home, &path, &title),
    }
}

fn init(path: &Path) -> anyhow::Result<()> {
    let home = Home::open(path);
    let settings = Settings {
        home_directory: path.display().to_string(),
        ..Settings::default()
    };
    home.save_settings(&settings)
        .with_context(|| format!("initializing {}", path.display()))?;
    println!("Initialized daybook home at {}", path.display());
    Ok(())
}

fn new_document(
    home: &Home,
    category: Category,
    title: &str,
    date: Option<NaiveDate>,
) -> anyhow::Result<()> {
    let settings = home.load_settings();
    if !settings.category_enabled(category) {
        bail!("{category} documents are disabled in settings");
    }
    let date = date.unwrap_or_else(|| Local::now().date_naive());
    let path = create_document(home, category, title, date)?;
    println!("{}", path.display());
    Ok(())
}

fn tree(home: &Home) -> anyhow::Result<()> {
    let index = FolderIndex::build(home);
    if index.roots.is_empty() {
        bail!("no archive found under {}", home.root().display());
    }
    for (category, root) in &index.roots {
        println!("{category}");
        print_node(root, 1);
    }
    Ok(())
}

fn print_node(node: &FolderNode, depth: usize) {
    let indent = "  ".repeat(depth);
    for child in &node.children {
        println!("{indent}{}/", child.name());
        print_node(child, depth + 1);
    }
    for doc in &node.documents {
        if let Some(name) = doc.file_name().and_then(|n| n.to_str()) {
            println!("{indent}{name}");
        }
    }
}

fn redate(home: &Home, path: &Path, date: NaiveDate) -> anyhow::Result<()> {
    with_session(home, path, |session| session.edit_date(date))
}

fn rename(home: &Home, path: &Path, title: &str) -> anyhow::Result<()> {
    with_session(home, path, |session| session.edit_name(title))
}

/// One-shot editing session: open, apply the edit, save, close.
fn with_session(
    home: &Home,
    path: &Path,
    edit: impl FnOnce(&mut EditSession) -> daybook_core::Result<()>,
) -> anyhow::Result<()> {
    let mut session = EditSession::new();
    session
        .open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    edit(&mut session)?;
    let saved = session.save(home)?;
    session.close();
    println!("{}", saved.display());
    Ok(())
}
