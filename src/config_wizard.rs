use crate::config::{Config, FileConfig, APP_NAME};
use anyhow::Result;
use std::io::{self, BufRead, Write};

pub fn run() -> Result<()> {
    let Some(config_path) = Config::global_path() else {
        anyhow::bail!("Could not determine configuration directory.");
    };

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    println!("Welcome to {} configuration wizard!", APP_NAME);
    println!("Passwords are never stored; you will be asked for one on every run.");
    println!();

    // Read existing config so a blank username or timeout keeps the current value
    let existing = FileConfig::read_or_default(&config_path)?;
    let file_config = ask(&mut input, &mut out, existing)?;

    println!();
    println!("Saving configuration...");
    file_config.write(&config_path)?;
    println!("Configuration saved to: {}", config_path.display());
    println!("Setup complete!");
    Ok(())
}

fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, label: &str) -> Result<String> {
    write!(out, "{}", label)?;
    out.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer.trim().to_string())
}

fn ask<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    mut file_config: FileConfig,
) -> Result<FileConfig> {
    // 1. Default username
    let username = prompt(input, out, "Default Splunk username (blank to keep): ")?;
    if !username.is_empty() {
        file_config.username = Some(username);
    }

    // 2. TLS verification
    let verify = prompt(input, out, "Verify TLS certificates? [y/N]: ")?;
    file_config.verify_tls = Some(matches!(
        verify.to_lowercase().as_str(),
        "y" | "yes" | "true"
    ));

    // 3. Request timeout
    let timeout = prompt(
        input,
        out,
        "Request timeout in seconds ('none' to clear, blank to keep): ",
    )?;
    match timeout.to_lowercase().as_str() {
        "" => {}
        "none" => file_config.timeout_secs = None,
        secs => match secs.parse() {
            Ok(secs) => file_config.timeout_secs = Some(secs),
            Err(_) => writeln!(out, "Not a number, keeping current timeout.")?,
        },
    }

    Ok(file_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_ask_fills_fields() {
        let mut input = Cursor::new("auditor\ny\n20\n");
        let mut out = Vec::new();

        let config = ask(&mut input, &mut out, FileConfig::default()).unwrap();
        assert_eq!(config.username.as_deref(), Some("auditor"));
        assert_eq!(config.verify_tls, Some(true));
        assert_eq!(config.timeout_secs, Some(20));
    }

    #[test]
    fn test_ask_blank_keeps_username_and_timeout() {
        let existing = FileConfig {
            username: Some("admin".to_string()),
            verify_tls: Some(true),
            timeout_secs: Some(5),
        };
        let mut input = Cursor::new("\n\n\n");
        let mut out = Vec::new();

        let config = ask(&mut input, &mut out, existing).unwrap();
        assert_eq!(config.username.as_deref(), Some("admin"));
        assert_eq!(config.verify_tls, Some(false));
        assert_eq!(config.timeout_secs, Some(5));
    }

    #[test]
    fn test_ask_timeout_clear_and_invalid() {
        let existing = FileConfig {
            timeout_secs: Some(5),
            ..FileConfig::default()
        };
        let mut input = Cursor::new("\n\nforever\n");
        let mut out = Vec::new();

        let config = ask(&mut input, &mut out, existing).unwrap();
        assert_eq!(config.timeout_secs, Some(5));
        assert!(String::from_utf8(out)
            .unwrap()
            .contains("Not a number, keeping current timeout."));

        let mut input = Cursor::new("\n\nNone\n");
        let mut out = Vec::new();
        let config = ask(&mut input, &mut out, config).unwrap();
        assert_eq!(config.timeout_secs, None);
    }
}
