//! Output helpers shared by the commands.

use std::io::{self, Write};

/// Log info message (respects quiet flag)
pub fn log_info(msg: &str, quiet: bool) {
    if !quiet {
        eprintln!("{msg}");
    }
}

/// Write output to file or stdout
pub fn write_output(content: &str, path: Option<&str>) -> Result<(), String> {
    if let Some(path) = path {
        std::fs::write(path, content).map_err(|e| format!("Failed to write to {path}: {e}"))?;
    } else {
        print!("{content}");
        io::stdout()
            .flush()
            .map_err(|e| format!("Failed to flush stdout: {e}"))?;
    }
    Ok(())
}
