//! Interactive line-driven dashboard session.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result, anyhow, bail};
use tracing::{debug, warn};

use roster_core::{Dashboard, Dataset, LoadOutcome};
use roster_ingest::load_file;
use roster_model::FilterField;

use crate::logging::redact_value;
use crate::render::TerminalRenderer;

pub const HELP: &str = "\
Commands:
  state <value>      filter by state (no value clears)
  board <value>      filter by board
  gender <value>     filter by gender
  category <value>   filter by category
  query <text>       search name, city, district, and state
  clear              reset all filters
  page <n>           show table page n
  load <path>        load a CSV or XLSX file
  show               redraw the dashboard
  choices            list filter options
  help               show this help
  quit               leave";

pub const PROMPT: &str = "roster> ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Sets a discrete filter; `None` clears it.
    Filter(FilterField, Option<String>),
    Query(String),
    Clear,
    Page(usize),
    Load(PathBuf),
    Show,
    Choices,
    Help,
    Quit,
}

impl FromStr for SessionCommand {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        let (keyword, rest) = match line.trim_start().split_once(' ') {
            Some((keyword, rest)) => (keyword, rest),
            None => (line.trim(), ""),
        };
        let value = rest.trim();

        if let Ok(field) = keyword.parse::<FilterField>() {
            let value = (!value.is_empty()).then(|| value.to_string());
            return Ok(Self::Filter(field, value));
        }
        let command = match keyword.to_lowercase().as_str() {
            // The query is kept as typed apart from the separating space.
            "query" | "q" => Self::Query(rest.to_string()),
            "clear" => Self::Clear,
            "page" | "p" => Self::Page(
                value
                    .parse()
                    .with_context(|| format!("invalid page number `{value}`"))?,
            ),
            "load" => {
                if value.is_empty() {
                    bail!("load needs a file path");
                }
                Self::Load(PathBuf::from(value))
            }
            "show" | "" => Self::Show,
            "choices" => Self::Choices,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(anyhow!("unknown command `{other}`; type `help`")),
        };
        Ok(command)
    }
}

/// Whether the session keeps reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session<W: Write> {
    dashboard: Dashboard<TerminalRenderer>,
    out: W,
}

impl<W: Write> Session<W> {
    pub fn new(dashboard: Dashboard<TerminalRenderer>, out: W) -> Self {
        Self { dashboard, out }
    }

    pub fn dashboard(&self) -> &Dashboard<TerminalRenderer> {
        &self.dashboard
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Reads commands until `quit` or end of input.
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<()> {
        self.dashboard.renderer().write_dashboard(&mut self.out)?;
        writeln!(self.out, "Type `help` for commands.")?;
        self.prompt()?;
        for line in input.lines() {
            let line = line.context("read command")?;
            let flow = match line.parse::<SessionCommand>() {
                Ok(command) => self.execute(command)?,
                Err(error) => {
                    writeln!(self.out, "error: {error:#}")?;
                    Flow::Continue
                }
            };
            if flow == Flow::Quit {
                break;
            }
            self.prompt()?;
        }
        self.dashboard.dispose_charts();
        Ok(())
    }

    pub fn execute(&mut self, command: SessionCommand) -> Result<Flow> {
        match command {
            SessionCommand::Filter(field, value) => {
                debug!(
                    field = %field,
                    value = redact_value(value.as_deref().unwrap_or_default()),
                    "filter changed"
                );
                self.dashboard.set_filter(field, value);
                self.show()?;
            }
            SessionCommand::Query(text) => {
                debug!(query = redact_value(&text), "query changed");
                self.dashboard.set_query(text);
                self.show()?;
            }
            SessionCommand::Clear => {
                self.dashboard.clear_filters();
                self.show()?;
            }
            SessionCommand::Page(page) => {
                self.dashboard.set_page(page);
                self.dashboard.renderer().write_table(&mut self.out)?;
            }
            SessionCommand::Load(path) => self.load(&path)?,
            SessionCommand::Show => self.show()?,
            SessionCommand::Choices => self.dashboard.renderer().write_choices(&mut self.out)?,
            SessionCommand::Help => writeln!(self.out, "{HELP}")?,
            SessionCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Loads a file; failures are reported and the current data is kept.
    fn load(&mut self, path: &Path) -> Result<()> {
        let ticket = self.dashboard.begin_load();
        match load_file(path) {
            Ok(loaded) => {
                let dataset = Dataset::from_raw(&loaded.records, loaded.source);
                if self.dashboard.complete_load(ticket, dataset) == LoadOutcome::Applied {
                    writeln!(
                        self.out,
                        "Loaded {} students from {}",
                        self.dashboard.dataset().len(),
                        path.display()
                    )?;
                    self.show()?;
                }
            }
            Err(error) => {
                warn!(path = %path.display(), error = %error, "load failed");
                writeln!(self.out, "error: {error}")?;
            }
        }
        Ok(())
    }

    fn prompt(&mut self) -> Result<()> {
        write!(self.out, "{PROMPT}")?;
        self.out.flush()?;
        Ok(())
    }

    fn show(&mut self) -> Result<()> {
        self.dashboard.renderer().write_dashboard(&mut self.out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filters() {
        assert_eq!(
            "state Tamil Nadu".parse::<SessionCommand>().unwrap(),
            SessionCommand::Filter(FilterField::State, Some("Tamil Nadu".to_string()))
        );
        assert_eq!(
            "cat  OBC ".parse::<SessionCommand>().unwrap(),
            SessionCommand::Filter(FilterField::Category, Some("OBC".to_string()))
        );
        assert_eq!(
            "gender".parse::<SessionCommand>().unwrap(),
            SessionCommand::Filter(FilterField::Gender, None)
        );
    }

    #[test]
    fn test_parse_query_verbatim() {
        assert_eq!(
            "query  asha ".parse::<SessionCommand>().unwrap(),
            SessionCommand::Query(" asha ".to_string())
        );
        assert_eq!(
            "query".parse::<SessionCommand>().unwrap(),
            SessionCommand::Query(String::new())
        );
    }

    #[test]
    fn test_parse_other_commands() {
        assert_eq!("page 3".parse::<SessionCommand>().unwrap(), SessionCommand::Page(3));
        assert_eq!(
            "load data/students.csv\n".parse::<SessionCommand>().unwrap(),
            SessionCommand::Load(PathBuf::from("data/students.csv"))
        );
        assert_eq!("".parse::<SessionCommand>().unwrap(), SessionCommand::Show);
        assert_eq!("QUIT".parse::<SessionCommand>().unwrap(), SessionCommand::Quit);
    }

    #[test]
    fn test_parse_errors() {
        assert!("page two".parse::<SessionCommand>().is_err());
        assert!("load".parse::<SessionCommand>().is_err());
        let error = "frobnicate".parse::<SessionCommand>().unwrap_err();
        assert!(error.to_string().contains("unknown command"));
    }
}
