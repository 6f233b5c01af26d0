use anyhow::{anyhow, Context, Result};
use regex::Regex;
use std::io::Write;
use std::process::{Command, Stdio};
use std::thread;
use std::{collections::HashMap, env};

pub struct CmdOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

pub(crate) fn expand_cmdline_env(cmdline: &str) -> Result<String> {
    // ${APP_BIN} -> UPMO_APP_BIN (quoted if it contains whitespace) or "upmo-app"
    let re = Regex::new(r"\$\{([A-Z0-9_]+)\}")?;
    let env_map: HashMap<String, String> = env::vars().collect();
    let out = re.replace_all(cmdline, |caps: &regex::Captures| {
        let key = &caps[1];
        if key == "APP_BIN" {
            if let Some(v) = env_map.get("UPMO_APP_BIN") {
                if v.chars().any(|c| c.is_whitespace()) {
                    let escaped = v.replace('"', "\\\"");
                    return format!("\"{escaped}\"");
                }
                return v.to_string();
            }
            return "upmo-app".to_string();
        }
        env_map.get(key).cloned().unwrap_or_default()
    });
    Ok(out.to_string())
}

/// Run `cmdline` with `input` on stdin and collect both output streams.
pub fn run_cmdline_with_input(cmdline: &str, input: &str) -> Result<CmdOutput> {
    let expanded = expand_cmdline_env(cmdline)?;
    let parts = shlex::split(&expanded).ok_or_else(|| anyhow!("Failed to parse command line"))?;
    if parts.is_empty() {
        return Err(anyhow!("Empty command line"));
    }
    let program = &parts[0];
    let args = &parts[1..];
    let mut child = Command::new(program)
        .args(args)
        .env("UPMO_GRID_JSON", "1")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("spawning {expanded}"))?;
    // Feed stdin from its own thread so a child that writes a full pipe of
    // output before reading all of its input cannot deadlock us.
    let writer = child.stdin.take().map(|mut stdin| {
        let input = input.to_string();
        thread::spawn(move || match stdin.write_all(input.as_bytes()) {
            // A command that ignores its input may close stdin early.
            Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => Ok(()),
            other => other,
        })
    });
    let output = child
        .wait_with_output()
        .with_context(|| format!("waiting for {expanded}"))?;
    if let Some(writer) = writer {
        writer
            .join()
            .map_err(|_| anyhow!("stdin writer for {expanded} panicked"))?
            .with_context(|| format!("writing request to {expanded}"))?;
    }
    Ok(CmdOutput {
        success: output.status.success(),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_app_bin_default_and_unknown_vars() {
        std::env::remove_var("UPMO_APP_BIN");
        let s = expand_cmdline_env("${APP_BIN} tabs list --x=${UPMO_SURELY_UNSET_VAR}").unwrap();
        assert_eq!(s, "upmo-app tabs list --x=");
    }

    #[cfg(unix)]
    #[test]
    fn pipes_input_through_command() {
        let out = run_cmdline_with_input("cat", "{\"ok\":true}").unwrap();
        assert!(out.success);
        assert_eq!(out.stdout, "{\"ok\":true}");
    }

    #[cfg(unix)]
    #[test]
    fn large_request_does_not_block_on_full_pipes() {
        // Well past a pipe buffer in both directions.
        let input = "x".repeat(256 * 1024);
        let out = run_cmdline_with_input("cat", &input).unwrap();
        assert!(out.success);
        assert_eq!(out.stdout.len(), input.len());

        let out = run_cmdline_with_input("sh -c 'cat >&2'", &input).unwrap();
        assert!(out.success);
        assert_eq!(out.stderr.len(), input.len());
    }

    #[test]
    fn rejects_empty_command() {
        assert!(run_cmdline_with_input("   ", "").is_err());
    }
}
