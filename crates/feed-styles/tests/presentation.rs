//! Cascaded presentation of `<feed-post>` for combinations of variant
//! attributes.

use std::sync::Arc;

use feed_styles::assets::bundle_manifest;
use feed_styles::post::{self, axis};
use stylecomp::theme::{Theme, paint, paint_style};
use stylecomp::{CompositeStylesheet, ElementMeta};

fn sheet() -> Arc<CompositeStylesheet> {
    post::definition()
        .stylesheet(&bundle_manifest("/static"))
        .unwrap()
}

/// A post's shadow tree for one host and `.post` element.
struct Tree {
    host: ElementMeta,
    post: ElementMeta,
}

impl Tree {
    fn new() -> Self {
        Self {
            host: ElementMeta::host("feed-post"),
            post: ElementMeta::new("div").with_class("post"),
        }
    }

    fn host_attr(mut self, name: &str, value: &str) -> Self {
        self.host = self.host.with_attr(name, value);
        self
    }

    fn host_class(mut self, class: &str) -> Self {
        self.host = self.host.with_class(class);
        self
    }

    fn post_class(mut self, class: &str) -> Self {
        self.post = self.post.with_class(class);
        self
    }

    /// Ancestors of an element placed directly inside `.post`.
    fn in_post(&self) -> Vec<ElementMeta> {
        vec![self.post.clone(), self.host.clone()]
    }

    /// Ancestors of an element placed inside `.body`.
    fn in_body(&self) -> Vec<ElementMeta> {
        vec![
            ElementMeta::new("div").with_class("body"),
            self.post.clone(),
            self.host.clone(),
        ]
    }

    /// Every element of the tree with its ancestors.
    fn elements(&self) -> Vec<(ElementMeta, Vec<ElementMeta>)> {
        let mut out = vec![
            (self.host.clone(), vec![]),
            (self.post.clone(), vec![self.host.clone()]),
            (ElementMeta::new("img").with_class("thumb"), self.in_post()),
            (ElementMeta::new("div").with_class("arrow"), self.in_post()),
            (ElementMeta::new("div").with_class("body"), self.in_post()),
        ];
        for class in ["community", "notification", "content", "controls", "composer", "spinner"] {
            out.push((ElementMeta::new("div").with_class(class), self.in_body()));
        }
        out
    }
}

fn div(class: &str) -> ElementMeta {
    ElementMeta::new("div").with_class(class)
}

#[test]
fn bare_instance_matches_no_variant_rule() {
    let sheet = sheet();
    let tree = Tree::new().post_class("card");
    for (element, ancestors) in tree.elements() {
        assert!(
            sheet.matching_axes(&element, &ancestors).is_empty(),
            "{:?} matched a variant",
            element.classes
        );
    }

    let post = sheet.compute(&tree.post, &[tree.host.clone()]);
    assert_eq!(post.get("grid-template-columns"), Some("45px 1fr"));
    assert_eq!(post.get("margin"), Some("0 0 var(--post-gap)"));
    let community = sheet.compute(&div("community"), &tree.in_body());
    assert_eq!(community.get("display"), Some("none"));
}

#[test]
fn unknown_render_mode_falls_back_to_base() {
    let sheet = sheet();
    let tree = Tree::new().host_attr("render-mode", "gallery");
    for (element, ancestors) in tree.elements() {
        assert!(sheet.matching_axes(&element, &ancestors).is_empty());
    }
    let notification = sheet.compute(&div("notification"), &tree.in_body());
    assert_eq!(notification.get("padding"), Some("8px 12px 5px"));
}

#[test]
fn unread_reply_has_reply_padding_and_no_halo() {
    let sheet = sheet();
    let tree = Tree::new()
        .host_attr("render-mode", "reply")
        .post_class("unread");

    let notification = sheet.compute(&div("notification"), &tree.in_body());
    assert_eq!(notification.get("padding"), Some("0 12px 5px"));

    let post = sheet.compute(&tree.post, &[tree.host.clone()]);
    assert_eq!(post.get("background"), Some("var(--bg-color--unread)"));
    assert_eq!(post.get("box-shadow"), None);
    assert_eq!(post.get("margin"), Some("0 0 var(--post-gap)"));
    assert_eq!(
        sheet.matching_axes(&tree.post, &[tree.host.clone()]),
        vec![axis::READ_STATE]
    );

    let painted = paint_style(&post, &Theme::light());
    assert_eq!(painted["background"], "#fff8e1");
}

#[test]
fn unread_card_gets_halo_and_tight_margin() {
    let sheet = sheet();
    let tree = Tree::new().post_class("card").post_class("unread");

    let post = sheet.compute(&tree.post, &[tree.host.clone()]);
    assert_eq!(
        post.get("box-shadow"),
        Some("0 0 0 3px var(--halo-color--unread)")
    );
    assert_eq!(post.get("margin"), Some("0 0 var(--post-gap--tight)"));

    let arrow = sheet.compute(&div("arrow"), &tree.in_post());
    assert_eq!(
        arrow.get("border-right-color"),
        Some("var(--border-color--unread)")
    );
    assert_eq!(
        paint(arrow.get("border-right-color").unwrap(), &Theme::dark()),
        "#b8862e"
    );
}

#[test]
fn noborders_and_nothumb_both_hide_the_arrow() {
    let sheet = sheet();
    let tree = Tree::new()
        .host_attr("noborders", "")
        .host_attr("nothumb", "");
    let arrow = div("arrow");

    assert_eq!(
        sheet.compute(&arrow, &tree.in_post()).get("display"),
        Some("none")
    );
    assert_eq!(
        sheet.matching_axes(&arrow, &tree.in_post()),
        vec![axis::CHROME_DENSITY, axis::THUMBNAIL_PRESENCE]
    );

    let post = sheet.compute(&tree.post, &[tree.host.clone()]);
    assert_eq!(post.get("display"), Some("block"));
    assert_eq!(post.get("grid-template-columns"), Some("34px 1fr"));
    assert_eq!(post.get("border"), Some("none"));
    assert_eq!(post.get("border-top"), Some("none"));
    let thumb = ElementMeta::new("img").with_class("thumb");
    assert_eq!(
        sheet.compute(&thumb, &tree.in_post()).get("display"),
        Some("none")
    );
}

#[test]
fn noborders_outranks_community_nesting() {
    let sheet = sheet();
    let tree = Tree::new()
        .host_attr("in-community", "")
        .host_attr("noborders", "");
    let thumb = ElementMeta::new("img").with_class("thumb");

    let style = sheet.compute(&thumb, &tree.in_post());
    assert_eq!(style.get("top"), Some("4px"));
    assert_eq!(style.get("width"), Some("34px"));
    assert_eq!(
        sheet.compute(&div("community"), &tree.in_body()).get("display"),
        Some("none")
    );
}

#[test]
fn noborders_pulls_the_composer_under_the_thumb_column() {
    let sheet = sheet();
    let composer = div("composer");

    let tree = Tree::new().host_attr("noborders", "");
    let style = sheet.compute(&composer, &tree.in_body());
    assert_eq!(style.get("margin-left"), Some("-34px"));
    assert_eq!(style.get("margin"), Some("0 12px 8px"));
    assert_eq!(style.get("margin-right"), Some("12px"));
    assert_eq!(
        sheet.matching_axes(&composer, &tree.in_body()),
        vec![axis::CHROME_DENSITY]
    );

    let bare = Tree::new();
    let style = sheet.compute(&composer, &bare.in_body());
    assert_eq!(style.get("margin-left"), Some("12px"));
    assert!(sheet.matching_axes(&composer, &bare.in_body()).is_empty());
}

#[test]
fn community_nesting_shifts_thumb_and_arrow() {
    let sheet = sheet();
    let tree = Tree::new().host_attr("in-community", "");

    let thumb = ElementMeta::new("img").with_class("thumb");
    assert_eq!(sheet.compute(&thumb, &tree.in_post()).get("top"), Some("26px"));
    assert_eq!(
        sheet.compute(&div("arrow"), &tree.in_post()).get("top"),
        Some("36px")
    );
    assert_eq!(
        sheet.compute(&div("community"), &tree.in_body()).get("display"),
        Some("block")
    );
}

#[test]
fn thread_position_fuses_parent_and_child() {
    let sheet = sheet();

    let parent = Tree::new().host_class("parent-post");
    let post = sheet.compute(&parent.post, &[parent.host.clone()]);
    assert_eq!(post.get("border-bottom"), Some("none"));
    assert_eq!(post.get("border-bottom-left-radius"), Some("0"));
    assert_eq!(
        sheet.compute(&div("controls"), &parent.in_body()).get("padding-bottom"),
        Some("0")
    );

    let child = Tree::new()
        .host_class("child-post")
        .host_attr("in-community", "");
    let post = sheet.compute(&child.post, &[child.host.clone()]);
    assert_eq!(post.get("border-top"), Some("none"));
    assert_eq!(
        sheet.compute(&div("community"), &child.in_body()).get("display"),
        Some("none")
    );
}

#[test]
fn theme_switch_repaints_without_recomposing() {
    let sheet = sheet();
    let tree = Tree::new();
    let post = sheet.compute(&tree.post, &[tree.host.clone()]);

    let light = paint_style(&post, &Theme::light());
    let dark = paint_style(&post, &Theme::dark());
    assert_eq!(light["background"], "#ffffff");
    assert_eq!(dark["background"], "#1b1b1b");
    assert!(Arc::ptr_eq(&sheet, &self::sheet()));
}
