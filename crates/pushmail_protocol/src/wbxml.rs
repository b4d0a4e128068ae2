//! WBXML 1.3 writer.
//!
//! The protocol encodes request bodies as WBXML: a tokenized binary XML
//! where each element is a single byte scoped to a codepage. This writer
//! covers exactly what requests need - nested elements with inline text -
//! and produces deterministic bytes for a given document.

use thiserror::Error;

/// Result type for WBXML operations.
pub type WbxmlResult<T> = Result<T, WbxmlError>;

/// Errors from misusing the writer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WbxmlError {
    /// `text` or `end` was called with no element open.
    #[error("no open element")]
    NoOpenElement,

    /// `done` was called while elements were still open.
    #[error("document finished with {0} unclosed element(s)")]
    UnclosedElements(usize),
}

/// A WBXML tag: a token scoped to a codepage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag {
    /// Codepage the token belongs to.
    pub page: u8,
    /// Token value within the page (without the content bit).
    pub token: u8,
}

// Control tokens (global to all codepages).
const SWITCH_PAGE: u8 = 0x00;
const END: u8 = 0x01;
const STR_I: u8 = 0x03;

// Set on a tag token when the element has content.
const WITH_CONTENT: u8 = 0x40;

/// A streaming WBXML document writer.
///
/// Elements are opened with [`start`](Serializer::start), filled with
/// [`text`](Serializer::text), and closed with [`end`](Serializer::end).
/// The document header (version 1.3, unknown public ID, UTF-8, empty
/// string table) is written up front.
///
/// ```
/// use pushmail_protocol::{Serializer, Tag};
///
/// const ROOT: Tag = Tag { page: 0x07, token: 0x16 };
/// const LEAF: Tag = Tag { page: 0x07, token: 0x12 };
///
/// let mut s = Serializer::new();
/// s.start(ROOT).start(LEAF).text("0").unwrap().end().unwrap().end().unwrap();
/// let bytes = s.done().unwrap();
/// assert_eq!(&bytes[..4], &[0x03, 0x01, 0x6A, 0x00]);
/// ```
#[derive(Debug)]
pub struct Serializer {
    buffer: Vec<u8>,
    depth: usize,
    page: u8,
}

impl Serializer {
    /// Creates a writer with the document header already emitted.
    pub fn new() -> Self {
        Self {
            // version 1.3, public ID 1 (unknown), charset UTF-8, string table len 0
            buffer: vec![0x03, 0x01, 0x6A, 0x00],
            depth: 0,
            page: 0,
        }
    }

    /// Opens an element, switching codepages if needed.
    pub fn start(&mut self, tag: Tag) -> &mut Self {
        if tag.page != self.page {
            self.buffer.push(SWITCH_PAGE);
            self.buffer.push(tag.page);
            self.page = tag.page;
        }
        self.buffer.push(tag.token | WITH_CONTENT);
        self.depth += 1;
        self
    }

    /// Writes inline text content into the current element.
    pub fn text(&mut self, text: &str) -> WbxmlResult<&mut Self> {
        if self.depth == 0 {
            return Err(WbxmlError::NoOpenElement);
        }
        self.buffer.push(STR_I);
        self.buffer.extend_from_slice(text.as_bytes());
        self.buffer.push(0x00);
        Ok(self)
    }

    /// Closes the innermost open element.
    pub fn end(&mut self) -> WbxmlResult<&mut Self> {
        if self.depth == 0 {
            return Err(WbxmlError::NoOpenElement);
        }
        self.buffer.push(END);
        self.depth -= 1;
        Ok(self)
    }

    /// Finishes the document and returns its bytes.
    pub fn done(self) -> WbxmlResult<Vec<u8>> {
        if self.depth != 0 {
            return Err(WbxmlError::UnclosedElements(self.depth));
        }
        Ok(self.buffer)
    }
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OUTER: Tag = Tag {
        page: 0x07,
        token: 0x16,
    };
    const INNER: Tag = Tag {
        page: 0x07,
        token: 0x12,
    };
    const OTHER_PAGE: Tag = Tag {
        page: 0x0E,
        token: 0x05,
    };

    #[test]
    fn header_bytes() {
        let s = Serializer::new();
        assert_eq!(s.done().unwrap(), vec![0x03, 0x01, 0x6A, 0x00]);
    }

    #[test]
    fn nested_elements_with_text() {
        let mut s = Serializer::new();
        s.start(OUTER)
            .start(INNER)
            .text("0")
            .unwrap()
            .end()
            .unwrap()
            .end()
            .unwrap();
        let bytes = s.done().unwrap();

        assert_eq!(
            bytes,
            vec![
                0x03, 0x01, 0x6A, 0x00, // header
                0x00, 0x07, // switch to page 7
                0x56, // FolderSync with content
                0x52, // SyncKey with content
                0x03, b'0', 0x00, // STR_I "0"
                0x01, 0x01, // two ENDs
            ]
        );
    }

    #[test]
    fn page_switch_only_when_needed() {
        let mut s = Serializer::new();
        s.start(OUTER).start(INNER).end().unwrap().end().unwrap();
        let bytes = s.done().unwrap();
        // Exactly one SWITCH_PAGE for two same-page elements.
        let zeros = bytes.iter().filter(|&&b| b == 0x00).count();
        // header string-table length byte + one SWITCH_PAGE token
        assert_eq!(zeros, 2);
    }

    #[test]
    fn page_switch_between_pages() {
        let mut s = Serializer::new();
        s.start(OUTER).end().unwrap();
        s.start(OTHER_PAGE).end().unwrap();
        let bytes = s.done().unwrap();
        assert!(bytes.windows(2).any(|w| w == [0x00, 0x07]));
        assert!(bytes.windows(2).any(|w| w == [0x00, 0x0E]));
    }

    #[test]
    fn text_outside_element_is_an_error() {
        let mut s = Serializer::new();
        assert_eq!(s.text("x").unwrap_err(), WbxmlError::NoOpenElement);
    }

    #[test]
    fn end_outside_element_is_an_error() {
        let mut s = Serializer::new();
        assert_eq!(s.end().unwrap_err(), WbxmlError::NoOpenElement);
    }

    #[test]
    fn done_with_open_element_is_an_error() {
        let mut s = Serializer::new();
        s.start(OUTER);
        assert_eq!(s.done().unwrap_err(), WbxmlError::UnclosedElements(1));
    }
}
