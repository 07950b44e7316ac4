//! Request deck templating
//!
//! The deck is line-oriented `KEY = value` text. For each grid point only the
//! right-hand side of the `MACH`, `ALPHA` and `XCG` lines and the values of
//! the `DELTA2 = ...$` line change; every other byte is copied through.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::TemplateError;
use crate::grid::GridPoint;

static DELTA2_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<prefix>\s*DELTA2\s*=\s*)[-0-9.,]+\$").expect("DELTA2 pattern")
});

/// Request deck as read once at the start of a sweep
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTemplate {
    /// Lines including their terminators
    lines: Vec<String>,
}

impl RequestTemplate {
    pub fn parse(text: &str) -> Self {
        Self {
            lines: text.split_inclusive('\n').map(str::to_owned).collect(),
        }
    }

    pub fn load(path: &Path) -> Result<Self, TemplateError> {
        let text = fs::read_to_string(path).map_err(|source| TemplateError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&text))
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Deck text for one grid point
    pub fn render(&self, point: &GridPoint) -> Result<String, TemplateError> {
        let mut out = String::with_capacity(self.lines.iter().map(String::len).sum());
        for (number, line) in self.lines.iter().enumerate() {
            match rewrite_line(line, point).map_err(|keyword| {
                TemplateError::MissingSeparator {
                    line: number + 1,
                    keyword,
                }
            })? {
                Some(rewritten) => out.push_str(&rewritten),
                None => out.push_str(line),
            }
        }
        Ok(out)
    }
}

/// Rewritten line, or None to copy the line unchanged. Err carries the
/// keyword of an assignment line that has no `=`.
fn rewrite_line(line: &str, point: &GridPoint) -> Result<Option<String>, &'static str> {
    let (body, ending) = split_line_ending(line);
    let trimmed = body.trim();

    let scalar = if trimmed.starts_with("MACH") {
        Some(("MACH", point.mach))
    } else if trimmed.starts_with("ALPHA") {
        Some(("ALPHA", point.alpha))
    } else {
        point
            .xcg
            .filter(|_| trimmed.starts_with("XCG"))
            .map(|xcg| ("XCG", xcg))
    };

    if let Some((keyword, value)) = scalar {
        let (lhs, _) = body.split_once('=').ok_or(keyword)?;
        return Ok(Some(format!("{lhs}= {value:.2},{ending}")));
    }

    if let Some(delta) = point.delta
        && let Some(found) = DELTA2_LINE.captures(body)
    {
        let matched = found.get(0).map_or(0, |m| m.end());
        let prefix = &found["prefix"];
        let rest = &body[matched..];
        return Ok(Some(format!(
            "{prefix}{}${rest}{ending}",
            delta_values(delta)
        )));
    }

    Ok(None)
}

/// Four DELTA2 entries for one symmetric deflection: the two surfaces move
/// in opposite directions
fn delta_values(delta: f64) -> String {
    format!("0.0,{:.2},0.0,{:.2}", -delta, delta)
}

fn split_line_ending(line: &str) -> (&str, &str) {
    let body = line.trim_end_matches(['\n', '\r']);
    (body, &line[body.len()..])
}
