use std::fs;
use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// Default configuration location when no path is given.
pub const DEFAULT_TASKRC: &str = "~/.taskrc";

/// Error type for taskrc resolution and reading
#[derive(Debug, thiserror::Error)]
pub enum TaskrcError {
    #[error("taskrc not found: {path}")]
    NotFound { path: PathBuf },
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The subset of taskwarrior configuration the panel cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Taskrc {
    /// Resolved location of the rc file itself.
    pub path: PathBuf,
    /// `data.location`: where taskwarrior keeps its database.
    pub data_location: String,
}

type Setter = fn(&mut Taskrc, &str);

/// Recognized keys and where their values land. One entry per key; everything
/// else in the file is dropped.
const RECOGNIZED_KEYS: &[(&str, Setter)] = &[("data.location", |rc, value| {
    rc.data_location = value.to_string();
})];

static ENTRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([A-Za-z0-9._]+)\s*=\s*(.*?)\s*$").unwrap());
static INCLUDE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*include\b\s*(.*?)\s*$").unwrap());

/// Expand a leading `~/` to the current user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

/// Resolve the taskrc location and parse the recognized entries out of it.
///
/// An empty or absent hint means taskwarrior's default location; a default
/// file that doesn't exist is fine (the record carries only the resolved
/// path). An explicit path that doesn't exist is an error.
pub fn resolve_and_parse(hint: Option<&str>) -> Result<Taskrc, TaskrcError> {
    match hint {
        Some(h) if !h.is_empty() => load(expand_tilde(h), false),
        _ => load(expand_tilde(DEFAULT_TASKRC), true),
    }
}

fn load(path: PathBuf, is_default: bool) -> Result<Taskrc, TaskrcError> {
    if !path.exists() {
        if is_default {
            return Ok(Taskrc {
                path,
                ..Taskrc::default()
            });
        }
        return Err(TaskrcError::NotFound { path });
    }

    let text = fs::read_to_string(&path).map_err(|e| TaskrcError::ReadError {
        path: path.clone(),
        source: e,
    })?;

    let mut rc = Taskrc {
        path,
        ..Taskrc::default()
    };
    apply_entries(&mut rc, &text);
    Ok(rc)
}

/// Walk the file line by line and copy recognized `key = value` assignments
/// into the record. Malformed lines never abort the parse.
fn apply_entries(rc: &mut Taskrc, text: &str) {
    for line in text.lines() {
        let line = strip_comment(line);
        if line.trim().is_empty() {
            continue;
        }

        if let Some(caps) = INCLUDE_RE.captures(line) {
            // TODO: follow includes once a nested-taskrc setup actually needs it
            debug!(file = &caps[1], "ignoring taskrc include directive");
            continue;
        }

        if let Some(caps) = ENTRY_RE.captures(line) {
            let (key, value) = (&caps[1], &caps[2]);
            for (name, set) in RECOGNIZED_KEYS {
                if *name == key {
                    set(rc, value);
                }
            }
        }
    }
}

/// Everything from the first `#` onward is comment.
fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(idx) => &line[..idx],
        None => line,
    }
}

impl Taskrc {
    /// The taskwarrior data directory, if the rc file named one.
    pub fn data_dir(&self) -> Option<PathBuf> {
        if self.data_location.is_empty() {
            None
        } else {
            Some(expand_tilde(&self.data_location))
        }
    }
}
