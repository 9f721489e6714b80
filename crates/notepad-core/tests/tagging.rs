//! Rich-text tagging through the document facade: toggling, span anchoring, layout.

use notepad_core::{DocumentError, Justification, StyleSpan, TextAttribute, Workspace};

fn single_doc() -> Workspace {
    let mut workspace = Workspace::new();
    workspace.add_unsaved();
    workspace
        .active_mut()
        .unwrap()
        .insert(0, "hello world")
        .unwrap();
    workspace
}

#[test]
fn test_toggle_applies_and_removes() {
    let mut workspace = single_doc();
    let doc = workspace.active_mut().unwrap();

    assert!(doc.toggle_attribute(TextAttribute::Bold, 0, 5).unwrap());
    assert!(doc.spans().attribute_at(0, TextAttribute::Bold));
    assert!(!doc.spans().attribute_at(5, TextAttribute::Bold));

    assert!(!doc.toggle_attribute(TextAttribute::Bold, 0, 5).unwrap());
    assert!(doc.spans().is_empty());
}

#[test]
fn test_attributes_layer_independently() {
    let mut workspace = single_doc();
    let doc = workspace.active_mut().unwrap();

    doc.toggle_attribute(TextAttribute::Bold, 0, 8).unwrap();
    doc.toggle_attribute(TextAttribute::Italic, 4, 11).unwrap();
    doc.toggle_attribute(TextAttribute::Underline, 0, 11).unwrap();

    assert!(doc.spans().attribute_at(5, TextAttribute::Bold));
    assert!(doc.spans().attribute_at(5, TextAttribute::Italic));
    assert!(doc.spans().attribute_at(5, TextAttribute::Underline));
    assert!(!doc.spans().attribute_at(9, TextAttribute::Bold));
}

#[test]
fn test_partial_untoggle_splits_span() {
    let mut workspace = single_doc();
    let doc = workspace.active_mut().unwrap();

    doc.toggle_attribute(TextAttribute::Bold, 0, 11).unwrap();
    // Start carries bold, so the middle of the range is cleared.
    assert!(!doc.toggle_attribute(TextAttribute::Bold, 3, 8).unwrap());

    assert_eq!(
        doc.spans().spans(),
        &[
            StyleSpan::new(TextAttribute::Bold, 0, 3),
            StyleSpan::new(TextAttribute::Bold, 8, 11),
        ]
    );
}

#[test]
fn test_spans_follow_insertions_and_deletions() {
    let mut workspace = single_doc();
    let doc = workspace.active_mut().unwrap();

    doc.toggle_attribute(TextAttribute::Bold, 6, 11).unwrap();

    doc.insert(0, ">> ").unwrap();
    assert_eq!(
        doc.spans().spans(),
        &[StyleSpan::new(TextAttribute::Bold, 9, 14)]
    );

    doc.delete(0, 3).unwrap();
    assert_eq!(
        doc.spans().spans(),
        &[StyleSpan::new(TextAttribute::Bold, 6, 11)]
    );
}

#[test]
fn test_deletion_inside_span_shrinks_it() {
    let mut workspace = single_doc();
    let doc = workspace.active_mut().unwrap();

    doc.toggle_attribute(TextAttribute::Italic, 0, 11).unwrap();
    doc.delete(5, 11).unwrap();
    assert_eq!(
        doc.spans().spans(),
        &[StyleSpan::new(TextAttribute::Italic, 0, 5)]
    );
}

#[test]
fn test_toggle_out_of_bounds_is_rejected() {
    let mut workspace = single_doc();
    let doc = workspace.active_mut().unwrap();

    let err = doc
        .toggle_attribute(TextAttribute::Bold, 0, 100)
        .unwrap_err();
    assert!(matches!(err, DocumentError::Buffer(_)));
    assert!(doc.spans().is_empty());
}

#[test]
fn test_toggle_empty_selection_reports_state() {
    let mut workspace = single_doc();
    let doc = workspace.active_mut().unwrap();

    doc.toggle_attribute(TextAttribute::Bold, 0, 5).unwrap();
    assert!(doc.toggle_attribute(TextAttribute::Bold, 2, 2).unwrap());
    assert!(!doc.toggle_attribute(TextAttribute::Bold, 7, 7).unwrap());
    // No spans were changed by the empty-selection queries.
    assert_eq!(doc.spans().len(), 1);
}

#[test]
fn test_tagging_does_not_touch_undo_history() {
    let mut workspace = single_doc();
    let doc = workspace.active_mut().unwrap();
    let depth_before = doc.buffer().can_undo();

    doc.toggle_attribute(TextAttribute::Bold, 0, 5).unwrap();
    assert_eq!(doc.buffer().can_undo(), depth_before);

    // Undo targets the text insertion, not the toggle.
    assert!(doc.undo());
    assert_eq!(doc.buffer().text(), "");
}

#[test]
fn test_justification_per_document() {
    let mut workspace = Workspace::new();
    let first = workspace.add_unsaved();
    let second = workspace.add_unsaved();

    workspace
        .get_mut(first)
        .unwrap()
        .set_justification(Justification::Right);

    assert_eq!(
        workspace.get(first).unwrap().justification(),
        Justification::Right
    );
    assert_eq!(
        workspace.get(second).unwrap().justification(),
        Justification::Left
    );
}
