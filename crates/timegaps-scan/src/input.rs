//! Reading item lists from a stream (usually stdin).

use std::io::Read;

use timegaps_core::ScanError;

/// Item separator for streamed input and output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Separator {
    /// One item per line.
    #[default]
    Newline,
    /// NUL-terminated items, for names that may contain newlines.
    Nul,
}

impl Separator {
    /// The separator byte.
    pub fn byte(self) -> u8 {
        match self {
            Separator::Newline => b'\n',
            Separator::Nul => b'\0',
        }
    }

    /// The separator as a string, for writing output.
    pub fn as_str(self) -> &'static str {
        match self {
            Separator::Newline => "\n",
            Separator::Nul => "\0",
        }
    }
}

/// Split raw input into items. Empty items are skipped.
pub fn split_items(input: &[u8], separator: Separator) -> Result<Vec<String>, ScanError> {
    let mut items = Vec::new();
    for (index, chunk) in input.split(|&b| b == separator.byte()).enumerate() {
        let chunk = match separator {
            Separator::Newline => chunk.strip_suffix(b"\r").unwrap_or(chunk),
            Separator::Nul => chunk,
        };
        if chunk.is_empty() {
            continue;
        }
        let item = std::str::from_utf8(chunk).map_err(|_| ScanError::NotUtf8 {
            position: index + 1,
        })?;
        items.push(item.to_string());
    }
    Ok(items)
}

/// Read everything from `reader` and split it into items.
pub fn read_items<R: Read>(mut reader: R, separator: Separator) -> Result<Vec<String>, ScanError> {
    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer).map_err(ScanError::Read)?;
    let items = split_items(&buffer, separator)?;
    tracing::debug!(count = items.len(), "read items from input");
    Ok(items)
}
