use git_next_tag::boundary::BoundaryWarning;
use git_next_tag::ui;

#[test]
fn test_dirty_tree_display() {
    assert_eq!(
        BoundaryWarning::DirtyWorkingTree.to_string(),
        "Git tree is not clean"
    );
}

#[test]
fn test_unparsable_tag_display() {
    let warning = BoundaryWarning::UnparsableTag {
        tag: "release-123".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("release-123"),
        "Message should name the tag, got: {}",
        display_msg
    );
    assert!(display_msg.contains("not a version"));
}

#[test]
fn test_no_version_tags_display() {
    let warning = BoundaryWarning::NoVersionTags {
        initial_tag: "v0.1.0".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(display_msg.contains("No version tags"));
    assert!(display_msg.contains("v0.1.0"));
}

#[test]
fn test_display_boundary_warning_does_not_panic() {
    ui::display_boundary_warning(&BoundaryWarning::DirtyWorkingTree);
    ui::display_boundary_warning(&BoundaryWarning::UnparsableTag {
        tag: "nightly".to_string(),
    });
}
