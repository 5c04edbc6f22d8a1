//! Line framing for streaming response bodies
//!
//! Both wire framings this crate consumes (SSE `data:` lines and
//! newline-delimited JSON) are line-oriented, but network reads split lines
//! arbitrarily. The framer accumulates raw bytes and yields only complete
//! lines, retaining the unterminated remainder across reads. Splitting on
//! `\n` before UTF-8 decoding keeps multi-byte characters that straddle a
//! read boundary intact.

/// Accumulates bytes and yields complete newline-terminated lines
#[derive(Debug, Default)]
pub struct LineFramer {
    buffer: Vec<u8>,
}

impl LineFramer {
    /// Create an empty framer
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a read of raw bytes, returning the complete lines it unlocked
    ///
    /// Returned lines have their trailing `\n` (and `\r`, for CRLF input)
    /// stripped. Bytes after the last newline stay buffered.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);

        let mut lines = Vec::new();
        while let Some(newline) = self.buffer.iter().position(|&b| b == b'\n') {
            let mut line: Vec<u8> = self.buffer.drain(..=newline).collect();
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            lines.push(String::from_utf8_lossy(&line).into_owned());
        }
        lines
    }

    /// Whether an unterminated partial line is buffered
    pub fn has_partial(&self) -> bool {
        !self.buffer.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_lines_in_one_read() {
        let mut framer = LineFramer::new();
        assert_eq!(framer.push(b"one\ntwo\n"), vec!["one", "two"]);
        assert!(!framer.has_partial());
    }

    #[test]
    fn partial_line_is_retained_across_reads() {
        let mut framer = LineFramer::new();
        assert_eq!(framer.push(b"data: {\"cho"), Vec::<String>::new());
        assert!(framer.has_partial());
        assert_eq!(framer.push(b"ices\":[]}\n"), vec!["data: {\"choices\":[]}"]);
        assert!(!framer.has_partial());
    }

    #[test]
    fn crlf_is_stripped() {
        let mut framer = LineFramer::new();
        assert_eq!(framer.push(b"data: [DONE]\r\n"), vec!["data: [DONE]"]);
    }

    #[test]
    fn multibyte_character_split_across_reads() {
        let mut framer = LineFramer::new();
        let bytes = "héllo\n".as_bytes();
        // Split inside the two-byte 'é'
        assert_eq!(framer.push(&bytes[..2]), Vec::<String>::new());
        assert_eq!(framer.push(&bytes[2..]), vec!["héllo"]);
    }

    #[test]
    fn empty_lines_are_yielded() {
        let mut framer = LineFramer::new();
        assert_eq!(framer.push(b"a\n\nb\n"), vec!["a", "", "b"]);
    }
}
