//! Sectioned output.

use std::fmt;
use std::sync::OnceLock;

/// One section of rendered output, linked to the next.
///
/// A run without `#N` markers yields a single segment with index 0.
pub struct StringSegment {
    index: u8,
    content: String,
    next: Option<Box<StringSegment>>,
    rendered: OnceLock<String>,
}

impl StringSegment {
    pub fn new(index: u8, content: String) -> Self {
        StringSegment {
            index,
            content,
            next: None,
            rendered: OnceLock::new(),
        }
    }

    /// Link `(index, content)` pairs in order. `None` when `parts` is empty.
    pub fn from_parts(parts: Vec<(u8, String)>) -> Option<Self> {
        let mut head: Option<Box<StringSegment>> = None;
        for (index, content) in parts.into_iter().rev() {
            let mut segment = StringSegment::new(index, content);
            segment.next = head;
            head = Some(Box::new(segment));
        }
        head.map(|segment| *segment)
    }

    pub fn index(&self) -> u8 {
        self.index
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn next(&self) -> Option<&StringSegment> {
        self.next.as_deref()
    }

    pub fn iter(&self) -> Segments<'_> {
        Segments {
            current: Some(self),
        }
    }

    /// Number of segments in the chain.
    pub fn segment_count(&self) -> usize {
        self.iter().count()
    }

    /// Content of the first segment tagged `index`.
    pub fn content_of(&self, index: u8) -> Option<&str> {
        self.iter()
            .find(|segment| segment.index == index)
            .map(StringSegment::content)
    }

    /// All segment contents concatenated. Computed once.
    pub fn as_str(&self) -> &str {
        self.rendered
            .get_or_init(|| self.iter().map(StringSegment::content).collect())
    }
}

// Unlink iteratively; the derived drop recurses once per segment.
impl Drop for StringSegment {
    fn drop(&mut self) {
        let mut next = self.next.take();
        while let Some(mut segment) = next {
            next = segment.next.take();
        }
    }
}

impl fmt::Display for StringSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for StringSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.iter().map(|segment| (segment.index, &segment.content)))
            .finish()
    }
}

impl<'a> IntoIterator for &'a StringSegment {
    type Item = &'a StringSegment;
    type IntoIter = Segments<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a segment chain.
pub struct Segments<'a> {
    current: Option<&'a StringSegment>,
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a StringSegment;

    fn next(&mut self) -> Option<Self::Item> {
        let segment = self.current?;
        self.current = segment.next();
        Some(segment)
    }
}
