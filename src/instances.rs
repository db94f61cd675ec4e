use anyhow::Result;
use log::{info, warn};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Where the list of Splunk management URLs comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstanceSource {
    Single(String),
    File(PathBuf),
}

/// Returns the answer with only the line terminator removed.
fn read_answer<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str) -> Result<String> {
    write!(out, "{}", prompt)?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Asks the operator to pick between one instance and a file of instances.
/// Returns `None` on an invalid choice.
pub fn prompt_source<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> Result<Option<InstanceSource>> {
    let choice = read_answer(
        input,
        out,
        "Do you want to provide (1) a single Splunk instance or (2) a list of instances from a file? Enter 1 or 2: ",
    )?;

    match choice.trim() {
        "1" => {
            let host = read_answer(
                input,
                out,
                "Enter the Splunk instance URL (e.g., https://splunk-instance:8089): ",
            )?;
            Ok(Some(InstanceSource::Single(host)))
        }
        "2" => {
            let path = read_answer(
                input,
                out,
                "Enter the path to the file with Splunk instance URLs: ",
            )?;
            Ok(Some(InstanceSource::File(PathBuf::from(path.trim()))))
        }
        _ => {
            writeln!(out, "Invalid choice, please enter 1 or 2.")?;
            Ok(None)
        }
    }
}

/// Turns a source into the ordered list of instances to audit. A missing or
/// unreadable file is reported and yields no instances.
pub fn resolve<W: Write>(source: &InstanceSource, out: &mut W) -> Result<Vec<String>> {
    match source {
        InstanceSource::Single(host) if host.trim().is_empty() => {
            warn!("Empty instance URL given");
            Ok(Vec::new())
        }
        InstanceSource::Single(host) => Ok(vec![host.clone()]),
        InstanceSource::File(path) => match std::fs::read_to_string(path) {
            Ok(content) => {
                let instances = parse_instance_list(&content);
                info!("Loaded {} instance(s) from {:?}", instances.len(), path);
                Ok(instances)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                writeln!(out, "File '{}' not found.", path.display())?;
                Ok(Vec::new())
            }
            Err(e) => {
                warn!("Failed to read {:?}: {}", path, e);
                writeln!(out, "Could not read file '{}': {}", path.display(), e)?;
                Ok(Vec::new())
            }
        },
    }
}

/// One URL per line. Blank lines are skipped and surrounding whitespace
/// trimmed; order is preserved.
pub fn parse_instance_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
