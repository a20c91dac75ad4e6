//! Incremental painting of HTML that arrives in arbitrary chunks.
//!
//! Partial markup is only shown up to the end of the last closing tag seen so
//! far, so a tag cut mid-name never reaches the surface. Repaints are
//! coalesced: chunks that arrive while a repaint is pending only grow the
//! buffer. When the stream ends the complete text is painted as-is.

/// Display boundary for incremental HTML
pub trait PaintSurface {
    fn paint(&mut self, html: &str);
}

impl PaintSurface for Vec<String> {
    fn paint(&mut self, html: &str) {
        self.push(html.to_string());
    }
}

/// Longest prefix of `buffer` that ends right after a closing tag.
///
/// Finds the last `</`, then the first `>` at or after it. Empty when either
/// is missing.
pub fn safe_paint_prefix(buffer: &str) -> &str {
    let Some(open) = buffer.rfind("</") else {
        return "";
    };
    match buffer[open..].find('>') {
        Some(offset) => &buffer[..open + offset + 1],
        None => "",
    }
}

#[derive(Debug, Default)]
pub struct HtmlPatcher {
    buffer: String,
    last_painted: String,
    repaint_pending: bool,
}

impl HtmlPatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk. Returns true when the caller must schedule a repaint;
    /// false when one is already pending.
    pub fn push_chunk(&mut self, chunk: &str) -> bool {
        self.buffer.push_str(chunk);
        if self.repaint_pending {
            return false;
        }
        self.repaint_pending = true;
        true
    }

    /// Run the scheduled repaint. Returns true when the surface was painted.
    pub fn flush_frame<S: PaintSurface + ?Sized>(&mut self, surface: &mut S) -> bool {
        self.repaint_pending = false;
        let prefix = safe_paint_prefix(&self.buffer);
        if prefix.is_empty() || prefix == self.last_painted {
            return false;
        }
        surface.paint(prefix);
        self.last_painted = prefix.to_string();
        true
    }

    /// Paint the complete buffer verbatim and reset. Returns the final text.
    pub fn finish<S: PaintSurface + ?Sized>(&mut self, surface: &mut S) -> String {
        self.repaint_pending = false;
        let text = std::mem::take(&mut self.buffer);
        surface.paint(&text);
        self.last_painted.clear();
        text
    }

    /// Drop the pending repaint and both buffers
    pub fn cancel(&mut self) {
        self.repaint_pending = false;
        self.buffer.clear();
        self.last_painted.clear();
    }

    pub fn repaint_pending(&self) -> bool {
        self.repaint_pending
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn last_painted(&self) -> &str {
        &self.last_painted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_ends_after_last_closing_tag() {
        assert_eq!(safe_paint_prefix("<div><span>hi</span><p>par"), "<div><span>hi</span>");
        assert_eq!(safe_paint_prefix("<div><p>a</p></di"), "");
        assert_eq!(safe_paint_prefix("<div>no closing"), "");
        assert_eq!(safe_paint_prefix(""), "");
    }

    #[test]
    fn split_tags_are_never_painted() {
        let mut patcher = HtmlPatcher::new();
        let mut surface: Vec<String> = Vec::new();

        assert!(patcher.push_chunk("<div><sp"));
        assert!(!patcher.flush_frame(&mut surface));

        assert!(patcher.push_chunk("an>hi</span"));
        assert!(!patcher.flush_frame(&mut surface));

        assert!(patcher.push_chunk("></div>"));
        assert!(patcher.flush_frame(&mut surface));

        assert_eq!(surface, vec!["<div><span>hi</span></div>"]);
    }

    #[test]
    fn chunks_within_a_frame_coalesce() {
        let mut patcher = HtmlPatcher::new();
        let mut surface: Vec<String> = Vec::new();

        assert!(patcher.push_chunk("<b>a</b>"));
        assert!(!patcher.push_chunk("<b>b</b>"));
        assert!(!patcher.push_chunk("<b>c</b>"));
        assert!(patcher.flush_frame(&mut surface));
        assert_eq!(surface, vec!["<b>a</b><b>b</b><b>c</b>"]);
        assert!(!patcher.repaint_pending());
    }

    #[test]
    fn unchanged_prefix_is_not_repainted() {
        let mut patcher = HtmlPatcher::new();
        let mut surface: Vec<String> = Vec::new();

        patcher.push_chunk("<i>x</i>");
        patcher.flush_frame(&mut surface);
        patcher.push_chunk("<i>tail");
        assert!(!patcher.flush_frame(&mut surface));
        assert_eq!(surface.len(), 1);
    }

    #[test]
    fn finish_paints_verbatim() {
        let mut patcher = HtmlPatcher::new();
        let mut surface: Vec<String> = Vec::new();

        patcher.push_chunk("<p>done</p> trailing <b");
        let text = patcher.finish(&mut surface);
        assert_eq!(text, "<p>done</p> trailing <b");
        assert_eq!(surface, vec!["<p>done</p> trailing <b"]);
        assert!(patcher.buffer().is_empty());
        assert!(!patcher.repaint_pending());
    }

    #[test]
    fn cancel_discards_everything() {
        let mut patcher = HtmlPatcher::new();
        let mut surface: Vec<String> = Vec::new();

        patcher.push_chunk("<p>a</p>");
        patcher.flush_frame(&mut surface);
        patcher.push_chunk("<p>b</p>");
        patcher.cancel();

        assert!(!patcher.repaint_pending());
        assert!(patcher.buffer().is_empty());
        assert!(patcher.last_painted().is_empty());
        assert!(!patcher.flush_frame(&mut surface));
        assert_eq!(surface.len(), 1);
    }
}
