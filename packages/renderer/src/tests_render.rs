use crate::render::{hit_test, render, Control, Hit, RenderState, EMPTY_STATE_TITLE};
use crate::vdom::VNode;
use pagekit_document::{Document, Metadata, Section, SectionKind, Theme};

fn doc_abc() -> Document {
    Document::new("d", Metadata::default())
        .with_section(Section::new("a", SectionKind::Hero))
        .with_section(Section::new("b", SectionKind::Features))
        .with_section(Section::new("c", SectionKind::Footer))
}

fn control<'a>(region: &'a VNode, action: &str) -> &'a VNode {
    region
        .find(&|n| n.attr("data-action") == Some(action))
        .unwrap_or_else(|| panic!("missing control {}", action))
}

#[test]
fn test_regions_follow_section_order() {
    let vdom = render(&doc_abc(), &RenderState::default());
    let ids: Vec<_> = vdom
        .regions()
        .iter()
        .filter_map(|r| r.attr("data-section-id"))
        .collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
}

#[test]
fn test_move_controls_disabled_at_edges() {
    let vdom = render(&doc_abc(), &RenderState::default());
    let regions = vdom.regions();

    assert!(control(regions[0], "move-up").attr("disabled").is_some());
    assert!(control(regions[0], "move-down").attr("disabled").is_none());
    assert!(control(regions[1], "move-up").attr("disabled").is_none());
    assert!(control(regions[1], "move-down").attr("disabled").is_none());
    assert!(control(regions[2], "move-down").attr("disabled").is_some());

    for region in regions {
        assert!(control(region, "duplicate").attr("disabled").is_none());
        assert!(control(region, "delete").attr("data-confirm").is_some());
    }
}

#[test]
fn test_single_section_has_both_moves_disabled() {
    let doc = Document::new("d", Metadata::default()).with_section(Section::new("only", SectionKind::Cta));
    let vdom = render(&doc, &RenderState::default());
    let region = vdom.region("only").unwrap();
    assert!(control(region, "move-up").attr("disabled").is_some());
    assert!(control(region, "move-down").attr("disabled").is_some());
}

#[test]
fn test_selected_region_is_marked() {
    let vdom = render(&doc_abc(), &RenderState::selecting("b"));
    assert!(vdom.region("b").unwrap().has_class("pk-region--selected"));
    assert!(!vdom.region("a").unwrap().has_class("pk-region--selected"));
}

#[test]
fn test_empty_document_renders_empty_state() {
    let vdom = render(&Document::new("d", Metadata::default()), &RenderState::default());
    let canvas = &vdom.nodes[0];
    let empty = canvas.find(&|n| n.has_class("pk-empty-state")).expect("empty state");
    assert!(empty.text_content().contains(EMPTY_STATE_TITLE));
    assert!(vdom.regions().is_empty());
}

#[test]
fn test_canvas_carries_theme_and_safe_accent() {
    let mut doc = doc_abc();
    doc.metadata.theme = Theme::Light;
    doc.metadata.accent_color = Some("#0EA5E9".to_string());
    let vdom = render(&doc, &RenderState::default());
    match &vdom.nodes[0] {
        VNode::Element { attributes, styles, .. } => {
            assert_eq!(attributes.get("data-theme").map(String::as_str), Some("light"));
            assert_eq!(styles.get("--pk-accent").map(String::as_str), Some("#0ea5e9"));
        }
        other => panic!("Expected canvas element, got {:?}", other),
    }

    doc.metadata.accent_color = Some("red;}".to_string());
    let vdom = render(&doc, &RenderState::default());
    match &vdom.nodes[0] {
        VNode::Element { styles, .. } => assert!(styles.is_empty()),
        other => panic!("Expected canvas element, got {:?}", other),
    }
}

#[test]
fn test_hit_test_resolves_nearest_region() {
    let vdom = render(&doc_abc(), &RenderState::default());

    // canvas → region 1 → section body → container → header → h2
    assert_eq!(hit_test(&vdom, &[0, 1, 1, 0, 0, 0]), Hit::Region("b".to_string()));
    assert_eq!(hit_test(&vdom, &[0, 2]), Hit::Region("c".to_string()));
    assert_eq!(hit_test(&vdom, &[0]), Hit::Background);
    assert_eq!(hit_test(&vdom, &[]), Hit::Background);
    assert_eq!(hit_test(&vdom, &[3]), Hit::Background);
}

#[test]
fn test_control_actions_round_trip() {
    for control in Control::all() {
        assert_eq!(Control::from_action(control.action()), Some(control));
    }
    assert_eq!(Control::from_action("explode"), None);
}
