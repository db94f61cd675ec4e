use anyhow::Result;
use secrecy::SecretString;
use std::io::{BufRead, Write};

/// Username and password shared by every instance in a run.
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    #[cfg(test)]
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: SecretString::from(password.to_string()),
        }
    }

    /// Prompts for whatever was not supplied up front. The username is read
    /// as plain input; the password is read from the terminal without echo.
    pub fn collect<R: BufRead, W: Write>(
        input: &mut R,
        out: &mut W,
        username: Option<String>,
        password: Option<SecretString>,
    ) -> Result<Self> {
        let username = match username {
            Some(username) => username,
            None => {
                write!(out, "Enter your Splunk username: ")?;
                out.flush()?;
                let mut line = String::new();
                input.read_line(&mut line)?;
                line.trim_end_matches(['\r', '\n']).to_string()
            }
        };

        let password = match password {
            Some(password) => password,
            None => {
                write!(out, "Enter your Splunk password: ")?;
                out.flush()?;
                SecretString::from(rpassword::read_password()?)
            }
        };

        Ok(Self { username, password })
    }
}
