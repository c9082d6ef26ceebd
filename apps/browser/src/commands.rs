//! Typed commands parsed from one line of terminal input.

use anyhow::{anyhow, bail, Context, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Page(u32),
    Next,
    Previous,
    First,
    Last,
    /// One-based row positions on the current page.
    Select(Vec<usize>),
    Unselect(Vec<usize>),
    SelectAll,
    Size(String),
    Apply,
    Retry,
    Selection,
    Show,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  page N            go to page N
  next | prev       step one page
  first | last      jump to the first or last page
  select I [I...]   select rows by position on this page
  unselect I [I...] unselect rows by position on this page
  select-all        select every row on this page
  size VALUE        edit the page-size draft
  apply             confirm the page-size draft
  retry             re-run the last failed fetch
  selection         list every selected title
  show              redraw the current page
  help | quit";

pub fn parse_command(line: &str) -> Result<Command> {
    let mut parts = line.split_whitespace();
    let verb = parts.next().ok_or_else(|| anyhow!("empty command"))?;
    let rest: Vec<&str> = parts.collect();

    let command = match verb.to_ascii_lowercase().as_str() {
        "page" | "p" => {
            let [raw] = rest.as_slice() else {
                bail!("usage: page N");
            };
            Command::Page(
                raw.parse()
                    .with_context(|| format!("'{raw}' is not a page number"))?,
            )
        }
        "next" | "n" => Command::Next,
        "prev" | "previous" => Command::Previous,
        "first" => Command::First,
        "last" => Command::Last,
        "select" | "s" => Command::Select(parse_rows(&rest, "select")?),
        "unselect" | "u" => Command::Unselect(parse_rows(&rest, "unselect")?),
        "select-all" | "all" => Command::SelectAll,
        // The draft is kept verbatim, so it may be anything (including nothing).
        "size" => Command::Size(rest.join(" ")),
        "apply" => Command::Apply,
        "retry" => Command::Retry,
        "selection" | "selected" => Command::Selection,
        "show" | "ls" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => bail!("unknown command '{other}'; type 'help'"),
    };
    Ok(command)
}

fn parse_rows(raw: &[&str], verb: &str) -> Result<Vec<usize>> {
    if raw.is_empty() {
        bail!("usage: {verb} I [I...]");
    }
    raw.iter()
        .map(|value| match value.parse::<usize>() {
            Ok(row) if row >= 1 => Ok(row),
            _ => Err(anyhow!("'{value}' is not a row number")),
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/commands_tests.rs"]
mod tests;
