//! Recent-form parser — decodes the fixed newline-delimited "Recent Form"
//! stats block from scouting input into a summary and per-match records.
//!
//! Expected shape (positionally significant):
//!
//! ```text
//! <header line, ignored>
//! Total: <int> goals from <int> shots (<int> on target, <float> xG)
//! <blank or ignored line>
//! - vs <Opponent> (H|A): <int> goals from <int> shots (<int> on target, <float> xG)
//! ```
//!
//! Each line type has its own grammar. A line that announces itself as a
//! summary (`Total:`) or match (`- vs`) line but fails its grammar is a
//! named parse error — never a silent misparse.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static SUMMARY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^Total: (\d+) goals from (\d+) shots \((\d+) on target, (\d+(?:\.\d+)?) xG\)$")
        .expect("summary line regex is valid")
});

static MATCH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^- vs (.+) \((H|A)\): (\d+) goals from (\d+) shots \((\d+) on target, (\d+(?:\.\d+)?) xG\)$",
    )
    .expect("match line regex is valid")
});

#[derive(Debug, Error, PartialEq)]
pub enum FormParseError {
    #[error("malformed summary on line {line}: {text:?}")]
    MalformedSummary { line: usize, text: String },

    #[error("malformed match entry on line {line}: {text:?}")]
    MalformedMatch { line: usize, text: String },
}

/// Aggregate totals from the summary line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentFormSummary {
    pub goals: u32,
    pub shots: u32,
    pub on_target: u32,
    pub xg: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Venue {
    Home,
    Away,
}

/// One parsed `- vs ...` line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentMatchRecord {
    pub opponent: String,
    pub venue: Venue,
    pub goals: u32,
    pub shots: u32,
    pub on_target: u32,
    pub xg: f64,
}

/// Parses a recent-form block. The summary is read from the second line
/// only when it starts with `Total:` — otherwise there is no summary, which
/// is not an error. Match lines are read from the fourth line onward.
pub fn parse_recent_form(
    text: &str,
) -> Result<(Option<RecentFormSummary>, Vec<RecentMatchRecord>), FormParseError> {
    let lines: Vec<&str> = text.split('\n').map(str::trim_end).collect();

    let summary = match lines.get(1) {
        Some(line) if line.starts_with("Total:") => Some(parse_summary_line(line, 2)?),
        _ => None,
    };

    let mut matches = Vec::new();
    for (idx, line) in lines.iter().enumerate().skip(3) {
        if line.starts_with("- vs") {
            matches.push(parse_match_line(line, idx + 1)?);
        }
    }

    Ok((summary, matches))
}

fn parse_summary_line(line: &str, line_no: usize) -> Result<RecentFormSummary, FormParseError> {
    let malformed = || FormParseError::MalformedSummary {
        line: line_no,
        text: line.to_string(),
    };
    let caps = SUMMARY_RE.captures(line).ok_or_else(malformed)?;

    Ok(RecentFormSummary {
        goals: caps[1].parse().map_err(|_| malformed())?,
        shots: caps[2].parse().map_err(|_| malformed())?,
        on_target: caps[3].parse().map_err(|_| malformed())?,
        xg: caps[4].parse().map_err(|_| malformed())?,
    })
}

fn parse_match_line(line: &str, line_no: usize) -> Result<RecentMatchRecord, FormParseError> {
    let malformed = || FormParseError::MalformedMatch {
        line: line_no,
        text: line.to_string(),
    };
    let caps = MATCH_RE.captures(line).ok_or_else(malformed)?;

    Ok(RecentMatchRecord {
        opponent: caps[1].to_string(),
        venue: if &caps[2] == "H" {
            Venue::Home
        } else {
            Venue::Away
        },
        goals: caps[3].parse().map_err(|_| malformed())?,
        shots: caps[4].parse().map_err(|_| malformed())?,
        on_target: caps[5].parse().map_err(|_| malformed())?,
        xg: caps[6].parse().map_err(|_| malformed())?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = "Header\n\
Total: 3 goals from 10 shots (8 on target, 1.11 xG)\n\
\n\
- vs Nottm Forest (H): 0 goals from 1 shots (1 on target, 0.03 xG)\n\
- vs Arsenal (A): 1 goals from 3 shots (2 on target, 0.40 xG)";

    #[test]
    fn test_parses_summary_and_matches() {
        let (summary, matches) = parse_recent_form(FIXTURE).unwrap();

        let summary = summary.expect("summary line present");
        assert_eq!(summary.goals, 3);
        assert_eq!(summary.shots, 10);
        assert_eq!(summary.on_target, 8);
        assert!((summary.xg - 1.11).abs() < f64::EPSILON);

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].opponent, "Nottm Forest");
        assert_eq!(matches[0].venue, Venue::Home);
        assert_eq!(matches[0].goals, 0);
        assert_eq!(matches[0].shots, 1);
        assert_eq!(matches[0].on_target, 1);
        assert!((matches[0].xg - 0.03).abs() < f64::EPSILON);

        assert_eq!(matches[1].opponent, "Arsenal");
        assert_eq!(matches[1].venue, Venue::Away);
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        let (summary, matches) = parse_recent_form("").unwrap();
        assert!(summary.is_none());
        assert!(matches.is_empty());
    }

    #[test]
    fn test_second_line_without_total_token_means_no_summary() {
        let text = "Header\nSome other line\n\n- vs Spurs (A): 2 goals from 5 shots (3 on target, 0.90 xG)";
        let (summary, matches) = parse_recent_form(text).unwrap();
        assert!(summary.is_none());
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].opponent, "Spurs");
    }

    #[test]
    fn test_malformed_summary_line_fails_loudly() {
        let text = "Header\nTotal: three goals from ten shots";
        let err = parse_recent_form(text).unwrap_err();
        assert!(matches!(err, FormParseError::MalformedSummary { line: 2, .. }));
    }

    #[test]
    fn test_malformed_match_line_fails_loudly() {
        let text = "Header\n\
Total: 1 goals from 2 shots (1 on target, 0.50 xG)\n\
\n\
- vs Brentford home 1 goal";
        let err = parse_recent_form(text).unwrap_err();
        assert!(matches!(err, FormParseError::MalformedMatch { line: 4, .. }));
    }

    #[test]
    fn test_match_lines_before_fourth_line_are_ignored() {
        // Positional format: the match list starts on line four.
        let text = "- vs Everton (H): 1 goals from 2 shots (1 on target, 0.20 xG)\n\
Total: 1 goals from 2 shots (1 on target, 0.20 xG)\n\
- vs Everton (H): 1 goals from 2 shots (1 on target, 0.20 xG)";
        let (summary, matches) = parse_recent_form(text).unwrap();
        assert!(summary.is_some());
        assert!(matches.is_empty());
    }

    #[test]
    fn test_venue_serializes_as_plain_word() {
        assert_eq!(serde_json::to_string(&Venue::Home).unwrap(), "\"Home\"");
        assert_eq!(serde_json::to_string(&Venue::Away).unwrap(), "\"Away\"");
    }

    #[test]
    fn test_opponent_names_with_parens_in_middle_still_parse() {
        let text = "Header\n\
Total: 0 goals from 0 shots (0 on target, 0.00 xG)\n\
\n\
- vs Real Sociedad (A): 0 goals from 4 shots (2 on target, 0.35 xG)";
        let (_, matches) = parse_recent_form(text).unwrap();
        assert_eq!(matches[0].opponent, "Real Sociedad");
        assert_eq!(matches[0].venue, Venue::Away);
    }
}
