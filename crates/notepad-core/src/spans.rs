//! Rich-text tagging: attribute spans over buffer content.
//!
//! A [`StyleSpan`] marks a half-open character range as bold, italic, or underlined.
//! [`SpanSet`] owns all spans of a document and keeps them consistent across content
//! edits via the offset-update operations. Spans never outlive their buffer; the owning
//! document drops the set together with the buffer.

/// A rich-text attribute that can be applied to a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextAttribute {
    /// Bold weight.
    Bold,
    /// Italic slant.
    Italic,
    /// Underline.
    Underline,
}

/// Document-level paragraph justification.
///
/// A pure presentation hint: it affects neither content nor undo history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Justification {
    /// Left-aligned (default).
    #[default]
    Left,
    /// Centered.
    Center,
    /// Right-aligned.
    Right,
}

/// An attribute applied to a half-open character range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSpan {
    /// The applied attribute.
    pub attribute: TextAttribute,
    /// Inclusive start character offset.
    pub start: usize,
    /// Exclusive end character offset.
    pub end: usize,
}

impl StyleSpan {
    /// Create a span for `attribute` over `start..end`.
    pub fn new(attribute: TextAttribute, start: usize, end: usize) -> Self {
        Self {
            attribute,
            start,
            end,
        }
    }

    /// Whether the span covers the given character offset.
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Whether the span overlaps the half-open range `start..end`.
    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        self.start < end && start < self.end
    }
}

/// All attribute spans of one document, kept sorted by `(start, end)`.
#[derive(Debug, Default)]
pub struct SpanSet {
    spans: Vec<StyleSpan>,
}

impl SpanSet {
    /// Create an empty span set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of spans.
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Whether the set holds no spans.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// All spans, sorted by `(start, end)`.
    pub fn spans(&self) -> &[StyleSpan] {
        &self.spans
    }

    /// Drop all spans.
    pub fn clear(&mut self) {
        self.spans.clear();
    }

    /// Whether `attribute` is applied at the given character offset.
    pub fn attribute_at(&self, offset: usize, attribute: TextAttribute) -> bool {
        self.spans
            .iter()
            .any(|span| span.attribute == attribute && span.contains(offset))
    }

    /// All spans overlapping the half-open range `start..end`.
    pub fn spans_in_range(&self, start: usize, end: usize) -> Vec<&StyleSpan> {
        self.spans
            .iter()
            .filter(|span| span.overlaps(start, end))
            .collect()
    }

    /// Apply `attribute` uniformly over `start..end`.
    ///
    /// Idempotent: overlapping and adjacent spans of the same attribute are absorbed into
    /// a single covering span, so repeated application never accumulates duplicates.
    pub fn add(&mut self, attribute: TextAttribute, start: usize, end: usize) {
        if start >= end {
            return;
        }

        let mut merged_start = start;
        let mut merged_end = end;
        self.spans.retain(|span| {
            // `<=` also absorbs spans that merely touch the new range.
            if span.attribute == attribute && span.start <= end && start <= span.end {
                merged_start = merged_start.min(span.start);
                merged_end = merged_end.max(span.end);
                false
            } else {
                true
            }
        });

        self.insert_sorted(StyleSpan::new(attribute, merged_start, merged_end));
    }

    /// Remove all coverage of `attribute` within `start..end`.
    ///
    /// Spans partially overlapping the boundary are split; the parts outside the range
    /// survive.
    pub fn remove(&mut self, attribute: TextAttribute, start: usize, end: usize) {
        if start >= end {
            return;
        }

        let mut result = Vec::with_capacity(self.spans.len());
        for span in self.spans.drain(..) {
            if span.attribute != attribute || !span.overlaps(start, end) {
                result.push(span);
                continue;
            }
            if span.start < start {
                result.push(StyleSpan::new(attribute, span.start, start));
            }
            if span.end > end {
                result.push(StyleSpan::new(attribute, end, span.end));
            }
        }

        result.sort_by_key(|span| (span.start, span.end));
        self.spans = result;
    }

    /// Toggle `attribute` over `start..end`, returning whether it is applied afterwards.
    ///
    /// An empty selection is a silent no-op. Otherwise the decision inspects only the
    /// start boundary: if the character at `start` already carries the attribute, it is
    /// removed from the whole range; otherwise it is added uniformly.
    pub fn toggle(&mut self, attribute: TextAttribute, start: usize, end: usize) -> bool {
        if start >= end {
            return self.attribute_at(start, attribute);
        }

        if self.attribute_at(start, attribute) {
            self.remove(attribute, start, end);
            false
        } else {
            self.add(attribute, start, end);
            true
        }
    }

    /// Shift spans to account for `len` characters inserted at `offset`.
    ///
    /// Spans starting at or after the insertion point move right; spans straddling it
    /// grow.
    pub fn update_for_insertion(&mut self, offset: usize, len: usize) {
        if len == 0 {
            return;
        }

        for span in &mut self.spans {
            if span.start >= offset {
                span.start += len;
                span.end += len;
            } else if span.end > offset {
                span.end += len;
            }
        }
    }

    /// Shift spans to account for the deletion of the character range `start..end`.
    ///
    /// Spans entirely inside the range disappear; spans overlapping a boundary shrink to
    /// the surviving side.
    pub fn update_for_deletion(&mut self, start: usize, end: usize) {
        if start >= end {
            return;
        }

        let removed = end - start;
        for span in &mut self.spans {
            if span.end <= start {
                // Entirely before the deletion.
            } else if span.start >= end {
                span.start -= removed;
                span.end -= removed;
            } else if span.start < start && span.end > end {
                span.end -= removed;
            } else if span.start < start {
                span.end = start;
            } else if span.end > end {
                span.start = start;
                span.end -= removed;
            } else {
                // Entirely inside the deletion; collapse so it is dropped below.
                span.start = start;
                span.end = start;
            }
        }

        self.spans.retain(|span| span.start < span.end);
    }

    fn insert_sorted(&mut self, span: StyleSpan) {
        let pos = self
            .spans
            .partition_point(|existing| (existing.start, existing.end) <= (span.start, span.end));
        self.spans.insert(pos, span);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use TextAttribute::{Bold, Italic};

    #[test]
    fn test_span_contains_and_overlaps() {
        let span = StyleSpan::new(Bold, 10, 20);
        assert!(span.contains(10));
        assert!(span.contains(19));
        assert!(!span.contains(20));
        assert!(span.overlaps(15, 25));
        assert!(!span.overlaps(20, 25));
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut set = SpanSet::new();
        set.add(Bold, 0, 5);
        set.add(Bold, 0, 5);
        assert_eq!(set.len(), 1);
        assert_eq!(set.spans()[0], StyleSpan::new(Bold, 0, 5));
    }

    #[test]
    fn test_add_coalesces_overlapping_and_adjacent() {
        let mut set = SpanSet::new();
        set.add(Bold, 0, 3);
        set.add(Bold, 5, 8);
        set.add(Bold, 3, 5); // bridges the gap (adjacent on both sides)
        assert_eq!(set.len(), 1);
        assert_eq!(set.spans()[0], StyleSpan::new(Bold, 0, 8));
    }

    #[test]
    fn test_attributes_are_independent() {
        let mut set = SpanSet::new();
        set.add(Bold, 0, 5);
        set.add(Italic, 3, 8);
        assert_eq!(set.len(), 2);
        assert!(set.attribute_at(4, Bold));
        assert!(set.attribute_at(4, Italic));
        assert!(!set.attribute_at(6, Bold));
    }

    #[test]
    fn test_remove_splits_partial_overlap() {
        let mut set = SpanSet::new();
        set.add(Bold, 0, 10);
        set.remove(Bold, 3, 6);
        assert_eq!(
            set.spans(),
            &[StyleSpan::new(Bold, 0, 3), StyleSpan::new(Bold, 6, 10)]
        );
    }

    #[test]
    fn test_toggle_twice_returns_to_unstyled() {
        let mut set = SpanSet::new();
        assert!(set.toggle(Bold, 0, 5));
        assert!(!set.toggle(Bold, 0, 5));
        assert!(set.is_empty());
    }

    #[test]
    fn test_toggle_decides_by_start_boundary() {
        let mut set = SpanSet::new();
        set.add(Bold, 0, 5);

        // Start carries bold: the whole range is cleared, including the styled prefix.
        assert!(!set.toggle(Bold, 0, 10));
        assert!(set.is_empty());

        // Start does not carry bold: applied uniformly, absorbing the partial span.
        set.add(Bold, 5, 10);
        assert!(set.toggle(Bold, 0, 10));
        assert_eq!(set.spans(), &[StyleSpan::new(Bold, 0, 10)]);
    }

    #[test]
    fn test_toggle_empty_selection_is_noop() {
        let mut set = SpanSet::new();
        set.add(Bold, 0, 5);
        set.toggle(Bold, 3, 3);
        assert_eq!(set.spans(), &[StyleSpan::new(Bold, 0, 5)]);
    }

    #[test]
    fn test_update_for_insertion() {
        let mut set = SpanSet::new();
        set.add(Bold, 10, 20);
        set.add(Italic, 30, 40);

        set.update_for_insertion(15, 5);
        assert_eq!(set.spans()[0], StyleSpan::new(Bold, 10, 25)); // straddles: grows
        assert_eq!(set.spans()[1], StyleSpan::new(Italic, 35, 45)); // after: shifts
    }

    #[test]
    fn test_update_for_deletion() {
        let mut set = SpanSet::new();
        set.add(Bold, 10, 20);
        set.add(Italic, 30, 40);
        set.add(TextAttribute::Underline, 50, 60);

        set.update_for_deletion(25, 35);
        assert_eq!(set.spans()[0], StyleSpan::new(Bold, 10, 20)); // before: unaffected
        assert_eq!(set.spans()[1], StyleSpan::new(Italic, 25, 30)); // boundary: shrinks
        assert_eq!(set.spans()[2], StyleSpan::new(TextAttribute::Underline, 40, 50)); // after
    }

    #[test]
    fn test_update_for_deletion_drops_inner_spans() {
        let mut set = SpanSet::new();
        set.add(Bold, 5, 8);
        set.update_for_deletion(0, 10);
        assert!(set.is_empty());
    }

    #[test]
    fn test_spans_in_range() {
        let mut set = SpanSet::new();
        set.add(Bold, 0, 5);
        set.add(Italic, 10, 15);
        assert_eq!(set.spans_in_range(4, 11).len(), 2);
        assert_eq!(set.spans_in_range(5, 10).len(), 0);
    }

    #[test]
    fn test_justification_default_is_left() {
        assert_eq!(Justification::default(), Justification::Left);
    }
}
