//! System clipboard access

use arboard::Clipboard;

use bugbuddy_core::prelude::*;

/// Write text to the system clipboard.
///
/// Blocking; call from `spawn_blocking`.
pub fn copy_text(text: &str) -> Result<()> {
    if text.is_empty() {
        return Err(Error::clipboard("nothing to copy"));
    }

    let mut clipboard = Clipboard::new().map_err(|e| Error::clipboard(e.to_string()))?;
    clipboard
        .set_text(text.to_string())
        .map_err(|e| Error::clipboard(e.to_string()))?;

    debug!("Copied {} bytes to clipboard", text.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_is_not_copied() {
        let err = copy_text("").unwrap_err();
        assert!(matches!(err, Error::Clipboard { .. }));
    }
}
