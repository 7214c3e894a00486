use std::fmt::{self, Display, Formatter};
use std::io::Write;
use std::str::FromStr;

use knockout_core::options::TournamentOptions;
use knockout_core::{Bracket, EliminationType, MatchId, MatchRecord};
use serde::{Deserialize, Serialize};

use crate::Error;

/// The output format of a bracket.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Table,
    Json,
}

impl Display for Format {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table => f.write_str("table"),
            Self::Json => f.write_str("json"),
        }
    }
}

impl FromStr for Format {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            _ => Err(ParseFormatError(s.to_owned())),
        }
    }
}

#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid format {0:?}, expected \"table\" or \"json\"")]
pub struct ParseFormatError(String);

#[derive(Serialize)]
struct Document {
    kind: EliminationType,
    bracket_size: usize,
    bye_count: usize,
    winners_rounds: usize,
    losers_rounds: usize,
    matches: Vec<MatchRecord>,
}

pub fn write<W>(mut writer: W, bracket: &Bracket, format: Format) -> Result<(), Error>
where
    W: Write,
{
    match format {
        Format::Table => writer.write_all(table(bracket).as_bytes())?,
        Format::Json => {
            let document = Document {
                kind: bracket.kind(),
                bracket_size: bracket.bracket_size(),
                bye_count: bracket.bye_count(),
                winners_rounds: bracket.winners_rounds(),
                losers_rounds: bracket.losers_rounds(),
                matches: bracket.records(),
            };

            serde_json::to_writer_pretty(&mut writer, &document)?;
            writer.write_all(b"\n")?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// Writes the options accepted by a bracket together with their default values.
pub fn write_options<W>(
    mut writer: W,
    options: &TournamentOptions,
    format: Format,
) -> Result<(), Error>
where
    W: Write,
{
    match format {
        Format::Table => {
            let header = ["Key", "Default", "Name"];
            let rows: Vec<[String; 3]> = options
                .iter()
                .map(|(key, option)| [key.clone(), option.value.to_string(), option.name.clone()])
                .collect();

            let mut widths = header.map(str::len);
            for row in &rows {
                for (width, cell) in widths.iter_mut().zip(row) {
                    *width = (*width).max(cell.chars().count());
                }
            }

            let mut out = String::new();
            push_row(&mut out, &widths, &header);
            for row in &rows {
                push_row(&mut out, &widths, row);
            }

            writer.write_all(out.as_bytes())?;
        }
        Format::Json => {
            serde_json::to_writer_pretty(&mut writer, options)?;
            writer.write_all(b"\n")?;
        }
    }

    writer.flush()?;
    Ok(())
}

fn table(bracket: &Bracket) -> String {
    let number = |id: Option<MatchId>| match id {
        Some(id) => format!("#{}", bracket.matches()[id].number()),
        None => String::from("-"),
    };

    let header = ["#", "Stage", "Round", "Slot 1", "Slot 2", "Winner", "Loser"];
    let rows: Vec<[String; 7]> = bracket
        .records()
        .into_iter()
        .map(|record| {
            let stage = if record.is_bye {
                format!("{} (bye)", record.stage)
            } else {
                record.stage.to_string()
            };

            [
                record.number.to_string(),
                stage,
                record.round.to_string(),
                record.slot1,
                record.slot2,
                number(record.winner_target),
                number(record.loser_target),
            ]
        })
        .collect();

    let mut widths = header.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let separator: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();

    let mut out = String::new();
    push_row(&mut out, &widths, &header);
    push_row(&mut out, &widths, &separator);
    for row in &rows {
        push_row(&mut out, &widths, row);
    }

    out
}

fn push_row<S>(out: &mut String, widths: &[usize], cells: &[S])
where
    S: AsRef<str>,
{
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell.as_ref(), width = width))
        .collect();

    out.push_str(line.join(" | ").trim_end());
    out.push('\n');
}
