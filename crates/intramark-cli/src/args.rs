use std::path::PathBuf;

use clap::Parser;
use clap::error::ErrorKind;
use intramark_engine::{HeadingMarkupStrip, HeadingShift, OperationSet};
use thiserror::Error;

/// Analyze and modify Markdown-formatted text on the level of Markdown
/// elements to make widespread changes to the text.
///
/// By default, the relative hierarchical differences between headings are
/// preserved.
#[derive(Debug, Parser)]
#[command(name = "intramark", version)]
pub struct Cli {
    /// File to read, or `-` to read the file name from standard input
    pub filename: String,

    /// Print diagnostic information about the input instead of its contents
    #[arg(short, long)]
    pub diagnostic: bool,

    /// Overwrite the input file
    #[arg(short, long)]
    pub write_in_place: bool,

    /// Replace markup with explanatory text; `H` affects headings
    #[arg(short = 'A', long, value_name = "H")]
    pub annotate: Option<String>,

    /// Increase overall heading level by 1-5 or `max` (also `+H`)
    #[arg(long, value_name = "1-5|max")]
    pub heading_increase: Option<String>,

    /// Decrease overall heading level by 1-5 or `max`
    #[arg(short = 'H', long, value_name = "1-5|max")]
    pub heading_decrease: Option<String>,

    /// Equalize closing number sign count with heading level (also `=H`)
    #[arg(long)]
    pub heading_equalize: bool,

    /// Increase overall heading level by the maximum allowable amount
    #[arg(long)]
    pub heading_increase_max: bool,

    /// Decrease overall heading level by the maximum allowable amount
    #[arg(long)]
    pub heading_decrease_max: bool,

    /// Modify links; `i` makes all links inline, `ip` also keeps the
    /// reference definitions
    #[arg(short = 'k', long, value_name = "i|ip")]
    pub link: Option<String>,

    /// Strip markup; any of `b` (line breaks), `H` (all heading markup) and
    /// `H-end` (closing number signs)
    #[arg(short, long, value_name = "b,H,H-end")]
    pub strip: Option<String>,

    /// Log pass summaries to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Config file to use instead of the default
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("only one heading level change may be requested at a time")]
    ConflictingHeadingShift,
    #[error("acceptable values for {option} are max or 1-5, got '{value}'")]
    InvalidShift { option: &'static str, value: String },
    #[error("the only acceptable value for -A/--annotate is H, got '{0}'")]
    InvalidAnnotate(String),
    #[error("acceptable values for -k/--link are i and ip, got '{0}'")]
    InvalidLink(String),
    #[error("acceptable values for -s/--strip are b, H and H-end, got '{0}'")]
    InvalidStrip(String),
    #[error("H and H-end are mutually exclusive values for -s/--strip")]
    ConflictingStrip,
    #[error("at least one modification is required in order to overwrite the input file")]
    NothingToWrite,
}

impl UsageError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ConflictingHeadingShift | Self::ConflictingStrip => ErrorKind::ArgumentConflict,
            Self::NothingToWrite => ErrorKind::MissingRequiredArgument,
            _ => ErrorKind::InvalidValue,
        }
    }
}

/// Rewrites the `+H` and `=H` spellings to their long options so clap can
/// parse them. Arguments after `--` are left alone.
pub fn normalize_args<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut literal = false;
    args.into_iter()
        .map(|arg| {
            if literal {
                return arg;
            }
            match arg.as_str() {
                "--" => {
                    literal = true;
                    arg
                }
                "+H" => "--heading-increase".to_string(),
                "=H" => "--heading-equalize".to_string(),
                _ => arg,
            }
        })
        .collect()
}

impl Cli {
    /// Validates the modification options and turns them into an
    /// [`OperationSet`].
    pub fn operations(&self) -> Result<OperationSet, UsageError> {
        let ops = OperationSet {
            heading_shift: self.heading_shift()?,
            equalize_trailing_hashes: self.heading_equalize,
            strip_heading_markup: None,
            annotate_headings: match self.annotate.as_deref() {
                None => false,
                Some("H") => true,
                Some(other) => return Err(UsageError::InvalidAnnotate(other.to_string())),
            },
            strip_line_breaks: false,
            make_links_inline: false,
            preserve_reference_definitions: false,
        };
        let ops = match &self.strip {
            Some(value) => apply_strip(ops, value)?,
            None => ops,
        };
        let ops = match &self.link {
            Some(value) => apply_link(ops, value)?,
            None => ops,
        };

        if self.write_in_place && !ops.has_modification() {
            return Err(UsageError::NothingToWrite);
        }
        Ok(ops)
    }

    fn heading_shift(&self) -> Result<Option<HeadingShift>, UsageError> {
        let mut requested = Vec::new();
        if let Some(value) = &self.heading_increase {
            requested.push(parse_shift(
                "+H",
                value,
                HeadingShift::IncreaseMax,
                HeadingShift::IncreaseBy,
            )?);
        }
        if let Some(value) = &self.heading_decrease {
            requested.push(parse_shift(
                "-H",
                value,
                HeadingShift::DecreaseMax,
                HeadingShift::DecreaseBy,
            )?);
        }
        if self.heading_increase_max {
            requested.push(HeadingShift::IncreaseMax);
        }
        if self.heading_decrease_max {
            requested.push(HeadingShift::DecreaseMax);
        }

        match requested.as_slice() {
            [] => Ok(None),
            [shift] => Ok(Some(*shift)),
            _ => Err(UsageError::ConflictingHeadingShift),
        }
    }
}

fn parse_shift(
    option: &'static str,
    value: &str,
    max: HeadingShift,
    by: fn(usize) -> HeadingShift,
) -> Result<HeadingShift, UsageError> {
    if value == "max" {
        return Ok(max);
    }
    match value.parse::<usize>() {
        Ok(n @ 1..=5) => Ok(by(n)),
        _ => Err(UsageError::InvalidShift {
            option,
            value: value.to_string(),
        }),
    }
}

/// Reads a `-s` value made of the tokens `b`, `H` and `H-end`, optionally
/// separated by commas or spaces.
fn apply_strip(mut ops: OperationSet, value: &str) -> Result<OperationSet, UsageError> {
    let invalid = || UsageError::InvalidStrip(value.to_string());
    let mut rest = value;
    let mut all = false;
    let mut trailing = false;

    if rest.trim().is_empty() {
        return Err(invalid());
    }
    while let Some(c) = rest.chars().next() {
        if let Some(after) = rest.strip_prefix("H-end") {
            trailing = true;
            rest = after;
            continue;
        }
        match c {
            'H' => all = true,
            'b' => ops.strip_line_breaks = true,
            ',' | ' ' => {}
            _ => return Err(invalid()),
        }
        rest = &rest[c.len_utf8()..];
    }

    ops.strip_heading_markup = match (all, trailing) {
        (true, true) => return Err(UsageError::ConflictingStrip),
        (true, false) => Some(HeadingMarkupStrip::All),
        (false, true) => Some(HeadingMarkupStrip::TrailingHashes),
        (false, false) => None,
    };
    Ok(ops)
}

/// Reads a `-k` value: `i`, optionally with `p`.
fn apply_link(mut ops: OperationSet, value: &str) -> Result<OperationSet, UsageError> {
    let mut inline = false;
    let mut preserve = false;
    for c in value.chars() {
        match c {
            'i' => inline = true,
            'p' => preserve = true,
            _ => return Err(UsageError::InvalidLink(value.to_string())),
        }
    }
    if !inline {
        return Err(UsageError::InvalidLink(value.to_string()));
    }
    ops.make_links_inline = true;
    ops.preserve_reference_definitions = preserve;
    Ok(ops)
}
