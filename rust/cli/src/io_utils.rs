//! File and terminal input helpers shared by the commands.
//!
//! Game history files may be plain JSONL or Zstandard-compressed (`.zst`);
//! [`read_text_auto`] picks the decoder from the extension.

use crate::error::CliError;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufWriter};
use std::path::Path;

/// Reads one line of player input, trimmed.
///
/// Returns `None` at end of input or on a read error, which the interactive
/// loop treats as the player leaving.
///
/// ```rust
/// use std::io::Cursor;
/// use fifty_cli::io_utils::read_stdin_line;
///
/// let mut input = Cursor::new("  play 2 \n");
/// assert_eq!(read_stdin_line(&mut input).as_deref(), Some("play 2"));
/// assert_eq!(read_stdin_line(&mut input), None);
/// ```
pub fn read_stdin_line(stdin: &mut dyn BufRead) -> Option<String> {
    let mut line = String::new();
    match stdin.read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line.trim().to_string()),
        Err(_) => None,
    }
}

/// Reads a whole text file, decompressing `.zst` files on the fly.
pub fn read_text_auto(path: &Path) -> Result<String, CliError> {
    let mut content = if path.extension().is_some_and(|ext| ext == "zst") {
        let file = File::open(path)?;
        let bytes = zstd::stream::decode_all(file)?;
        String::from_utf8(bytes).map_err(|e| {
            CliError::InvalidInput(format!("{} is not valid UTF-8: {}", path.display(), e))
        })?
    } else {
        std::fs::read_to_string(path)?
    };
    strip_utf8_bom(&mut content);
    Ok(content)
}

/// Creates the parent directory of `path` if it is missing.
pub fn ensure_parent_dir(path: &Path) -> Result<(), CliError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Opens `path` for appending, creating it and its directory when needed.
pub fn open_append(path: &Path) -> Result<BufWriter<File>, CliError> {
    ensure_parent_dir(path)?;
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(BufWriter::new(file))
}

fn strip_utf8_bom(s: &mut String) {
    const UTF8_BOM: &str = "\u{feff}";
    if s.starts_with(UTF8_BOM) {
        s.drain(..UTF8_BOM.len());
    }
}
