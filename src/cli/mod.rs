use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::{
    models::SelectedFile,
    render::ResultsView,
    workflow::{Notice, Snapshot, SubmitOutcome, WorkflowSession},
};

pub mod session;

pub use session::{run_session, SessionCommand};

/// Command-line arguments for gift-recommender
#[derive(Parser, Debug)]
#[command(name = "gift-recommender")]
#[command(about = "Gift recommendations from a chat history", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Analysis service base URL (overrides ANALYSIS_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze one chat file and print the recommendations
    Analyze {
        /// Your name
        #[arg(short, long)]
        user: Option<String>,

        /// Your friend's name
        #[arg(short, long)]
        friend: Option<String>,

        /// Chat history file (.txt, .json, .csv); only the first is used
        files: Vec<PathBuf>,

        /// Print the result as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Interactive session: set names, pick files and submit repeatedly
    Session,
}

/// Reads the first path into memory; any further paths are never opened
pub async fn read_selection(paths: &[PathBuf]) -> anyhow::Result<Vec<SelectedFile>> {
    let Some((first, rest)) = paths.split_first() else {
        return Ok(Vec::new());
    };
    if !rest.is_empty() {
        tracing::debug!(ignored = rest.len(), "Only the first file is used");
    }

    let file = SelectedFile::from_path(first)
        .await
        .with_context(|| format!("Failed to read {}", first.display()))?;
    Ok(vec![file])
}

pub fn write_notices<W: Write>(out: &mut W, notices: &[Notice]) -> std::io::Result<()> {
    for notice in notices {
        writeln!(out, "{}", notice)?;
    }
    Ok(())
}

/// Writes the results section of a snapshot, if there is one
pub fn write_results<W: Write>(out: &mut W, snapshot: &Snapshot) -> std::io::Result<()> {
    if let Some(result) = snapshot.state.result() {
        write!(
            out,
            "{}",
            ResultsView::new(&snapshot.identity.friend_name, result)
        )?;
    }
    Ok(())
}

/// One-shot analysis: fill the form, submit once, print the outcome
pub async fn run_analyze<W: Write>(
    session: &WorkflowSession,
    user: Option<String>,
    friend: Option<String>,
    files: &[PathBuf],
    json: bool,
    out: &mut W,
) -> anyhow::Result<ExitCode> {
    session.set_user_name(user.unwrap_or_default()).await;
    session.set_friend_name(friend.unwrap_or_default()).await;
    session.on_pick(read_selection(files).await?).await;

    let submission = session.submit().await;
    write_notices(&mut std::io::stderr(), &submission.notices)?;

    if submission.outcome != SubmitOutcome::Succeeded {
        return Ok(ExitCode::FAILURE);
    }

    let snapshot = session.snapshot().await;
    if json {
        if let Some(result) = snapshot.state.result() {
            writeln!(out, "{}", serde_json::to_string_pretty(result)?)?;
        }
    } else {
        write_results(out, &snapshot)?;
    }

    Ok(ExitCode::SUCCESS)
}
