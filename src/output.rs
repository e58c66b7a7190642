use std::io::{self, Write};

/// Writes `message` to stdout and, when present, to `writer` as well.
/// The extra writer lets the acceptance tests capture what the user saw.
pub fn println(message: &str, writer: &mut Option<&mut dyn Write>) -> io::Result<()> {
    if let Err(e) = writeln!(io::stdout(), "{message}") {
        eprintln!("Failed to write to stdout: {e}");
    }

    if let Some(w) = writer {
        writeln!(w, "{message}")?;
    }

    Ok(())
}
