use std::io::Write;
use std::path::PathBuf;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::workflow::{Snapshot, SubmitOutcome, WorkflowSession};

use super::{read_selection, write_notices, write_results};

const HELP: &str = "\
Commands:
  user <name>        set your name
  friend <name>      set your friend's name
  drop <path>...     drop files on the upload area (first one is kept)
  pick <path>...     pick files with the browser (first one is kept)
  submit             analyze the chat and get recommendations
  show               show the current form and results
  help               show this help
  quit               leave the session";

/// One line of input in an interactive session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    User(String),
    Friend(String),
    Drop(Vec<PathBuf>),
    Pick(Vec<PathBuf>),
    Submit,
    Show,
    Help,
    Quit,
}

impl SessionCommand {
    /// Parses a line; blank lines yield `None`
    ///
    /// Names keep their surrounding text as typed. Paths are split on
    /// whitespace, so paths containing spaces are not supported.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim_start();
        if line.trim().is_empty() {
            return Ok(None);
        }

        let (keyword, rest) = line
            .split_once(char::is_whitespace)
            .unwrap_or((line, ""));
        let rest = rest.trim_end_matches(['\r', '\n']);
        let paths = || -> Vec<PathBuf> { rest.split_whitespace().map(PathBuf::from).collect() };

        let command = match keyword.to_ascii_lowercase().as_str() {
            "user" => SessionCommand::User(rest.to_string()),
            "friend" => SessionCommand::Friend(rest.to_string()),
            "drop" => SessionCommand::Drop(paths()),
            "pick" => SessionCommand::Pick(paths()),
            "submit" => SessionCommand::Submit,
            "show" => SessionCommand::Show,
            "help" | "?" => SessionCommand::Help,
            "quit" | "exit" => SessionCommand::Quit,
            other => return Err(format!("Unknown command: {}. Type `help`.", other)),
        };

        Ok(Some(command))
    }
}

fn write_snapshot<W: Write>(out: &mut W, snapshot: &Snapshot) -> std::io::Result<()> {
    match &snapshot.file_name {
        Some(name) => writeln!(out, "File selected: {}", name)?,
        None => writeln!(out, "No file selected")?,
    }
    writeln!(out, "Your name: {}", snapshot.identity.user_name)?;
    writeln!(out, "Friend's name: {}", snapshot.identity.friend_name)?;
    writeln!(out, "State: {}", snapshot.state.label())?;
    writeln!(
        out,
        "Submit: {}",
        if snapshot.can_submit() { "enabled" } else { "disabled" }
    )?;

    if let Some(message) = snapshot.state.error() {
        writeln!(out, "Error: {}", message)?;
    }
    if let Some(result) = snapshot.state.result() {
        writeln!(
            out,
            "Received at {}",
            result.received_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(out)?;
        write_results(out, snapshot)?;
    }
    Ok(())
}

/// Runs an interactive session until `quit` or end of input
pub async fn run_session<R, W>(
    session: &WorkflowSession,
    input: R,
    out: &mut W,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    writeln!(out, "Gift Recommender From Chat")?;
    writeln!(out, "{}", HELP)?;

    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match SessionCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                writeln!(out, "{}", message)?;
                continue;
            }
        };

        match command {
            SessionCommand::User(name) => session.set_user_name(name).await,
            SessionCommand::Friend(name) => session.set_friend_name(name).await,
            SessionCommand::Drop(paths) | SessionCommand::Pick(paths) if paths.is_empty() => {
                writeln!(out, "No file given")?;
            }
            SessionCommand::Drop(paths) => match read_selection(&paths).await {
                Ok(files) => {
                    session.on_drag_over().await;
                    session.on_drop(files).await;
                    write_selection(out, session).await?;
                }
                Err(e) => writeln!(out, "[error] {:#}", e)?,
            },
            SessionCommand::Pick(paths) => match read_selection(&paths).await {
                Ok(files) => {
                    session.on_pick(files).await;
                    write_selection(out, session).await?;
                }
                Err(e) => writeln!(out, "[error] {:#}", e)?,
            },
            SessionCommand::Submit => {
                writeln!(out, "Analyzing chat and generating recommendations...")?;
                let submission = session.submit().await;
                write_notices(out, &submission.notices)?;
                if submission.outcome == SubmitOutcome::Succeeded {
                    write_results(out, &session.snapshot().await)?;
                }
            }
            SessionCommand::Show => write_snapshot(out, &session.snapshot().await)?,
            SessionCommand::Help => writeln!(out, "{}", HELP)?,
            SessionCommand::Quit => break,
        }
    }

    Ok(())
}

async fn write_selection<W: Write>(out: &mut W, session: &WorkflowSession) -> std::io::Result<()> {
    if let Some(name) = session.snapshot().await.file_name {
        writeln!(out, "File selected: {}", name)?;
    }
    Ok(())
}
