use anyhow::{Result, bail};
use std::io::{self, BufRead, IsTerminal};
use zeroize::Zeroizing;

pub const PASSWORD_ENV: &str = "TEXTLOCK_PASSWORD";

/// Where the password may come from, in order of preference.
///
/// `stdin_free` is false when stdin carries the text to encrypt or decrypt, in
/// which case a piped stdin is never read for the password.
pub fn read_password(stdin_free: bool, confirm: bool) -> Result<Zeroizing<String>> {
    //  Environment Variable
    //  TEXTLOCK_PASSWORD="supersecret" textlock decrypt --input note.tl
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        if !pw.is_empty() {
            tracing::debug!("password taken from environment");
            return Ok(Zeroizing::new(pw));
        }
    }

    //  stdin (Pipeline)
    //  echo "supersecret" | textlock encrypt --text "hello"
    if stdin_free && !io::stdin().is_terminal() {
        let mut buf = Zeroizing::new(String::new());
        io::stdin().lock().read_line(&mut buf)?;
        trim_newline(&mut buf);

        if !buf.is_empty() {
            tracing::debug!("password taken from stdin");
            return Ok(buf);
        }
    }

    //  Interactive (TTY)
    if io::stdin().is_terminal() || !stdin_free {
        return prompt(confirm);
    }

    bail!("No password provided")
}

fn prompt(confirm: bool) -> Result<Zeroizing<String>> {
    let pw1 = Zeroizing::new(rpassword::prompt_password("Password: ")?);
    if pw1.is_empty() {
        bail!("password cannot be empty");
    }

    if confirm {
        let pw2 = Zeroizing::new(rpassword::prompt_password("Confirm password: ")?);
        if pw1 != pw2 {
            bail!("passwords do not match");
        }
    }

    Ok(pw1)
}

fn trim_newline(s: &mut String) {
    while s.ends_with('\n') || s.ends_with('\r') {
        s.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trim_newline_strips_line_endings_only() {
        let mut s = String::from("pw \r\n");
        trim_newline(&mut s);
        assert_eq!(s, "pw ");

        let mut s = String::from("pw");
        trim_newline(&mut s);
        assert_eq!(s, "pw");
    }
}
