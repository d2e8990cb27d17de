//! The `<feed-post>` component stylesheet.
//!
//! One composite serves every presentation of a post: a feed card, a reply
//! under a notification, a post nested in a community feed, a thread parent
//! or child. The presentation is selected by the attributes and classes
//! below, each belonging to one independent axis:
//!
//! | Axis                 | Set on        | Value                         |
//! |----------------------|---------------|-------------------------------|
//! | `render-context`     | host          | `render-mode="reply"`         |
//! | `read-state`         | `.post`       | class `unread`                |
//! | `nesting`            | host          | `in-community`                |
//! | `chrome-density`     | host          | `noborders`                   |
//! | `thumbnail-presence` | host          | `nothumb`                     |
//! | `thread-position`    | host          | class `parent-post` or `child-post` |
//!
//! In card presentation the `.post` element also carries `card`. Anything
//! not listed falls back to the base presentation.
//!
//! The shadow tree the rules are written against:
//!
//! ```text
//! <feed-post>
//!   .post
//!     img.thumb
//!     .arrow
//!     .body
//!       .community
//!       .notification
//!       .content
//!       .controls
//!       .composer
//!       .spinner
//! ```

use stylecomp::asset::{AssetPipeline, ModuleLocation};
use stylecomp::template::Template;
use stylecomp::variant::{VariantAxis, VariantDriver, VariantRule, VariantTable};
use stylecomp::{CompositeBuilder, CompositeStylesheet, ComponentDefinition};

use crate::partials;
use crate::tokens;

pub const ID: &str = "feed-post";

/// Where this module sits in the source tree. Asset paths are relative to it.
pub const MODULE: &str = "feed-styles/src/post.rs";

pub mod axis {
    pub const RENDER_CONTEXT: &str = "render-context";
    pub const READ_STATE: &str = "read-state";
    pub const NESTING: &str = "nesting";
    pub const CHROME_DENSITY: &str = "chrome-density";
    pub const THUMBNAIL_PRESENCE: &str = "thumbnail-presence";
    pub const THREAD_POSITION: &str = "thread-position";
}

const BASE: &str = r#"
:host {
  display: block;
  color: var(--text-color--default);
}

.post {
  position: relative;
  display: grid;
  grid-template-columns: 45px 1fr;
  margin: 0 0 var(--post-gap);
  border: 1px solid var(--border-color--default);
  border-radius: 4px;
  background: var(--bg-color--default);
}

.thumb {
  position: relative;
  top: 10px;
  left: 8px;
  width: 30px;
  height: 30px;
  border-radius: 50%;
}

/* speech-bubble tip between avatar and body */
.arrow {
  position: absolute;
  top: 14px;
  left: 33px;
  width: 0;
  height: 0;
  border: 6px solid transparent;
  border-right-color: var(--border-color--default);
}

.body {
  min-width: 0;
}

.community {
  display: none;
  padding: 4px 12px 0;
  color: var(--text-color--pale);
  font-size: 12px;
}

.notification {
  padding: 8px 12px 5px;
  color: var(--text-color--pale);
}

.content {
  padding: 0 12px;
  overflow-wrap: anywhere;
}

.controls {
  display: flex;
  gap: 4px;
  padding: 4px 8px 8px;
}

.composer {
  margin: 0 12px 8px;
}
"#;

/// The declared axes. Selectors are relative to each case's driver.
pub fn variants() -> VariantTable {
    VariantTable::new()
        .axis(VariantAxis::new(axis::RENDER_CONTEXT).case(
            VariantDriver::host_attribute_value("render-mode", "reply"),
            vec![VariantRule::new(".notification").set("padding", "0 12px 5px")],
        ))
        .axis(VariantAxis::new(axis::READ_STATE).case(
            VariantDriver::element_class("post", "unread"),
            vec![
                VariantRule::new("&").set("background", tokens::BG_UNREAD),
                VariantRule::new("&.card")
                    .set("box-shadow", format!("0 0 0 3px {}", tokens::HALO_UNREAD))
                    .set("margin", format!("0 0 {}", tokens::POST_GAP_TIGHT)),
                VariantRule::new(".arrow").set("border-right-color", tokens::BORDER_UNREAD),
            ],
        ))
        .axis(VariantAxis::new(axis::NESTING).case(
            VariantDriver::host_attribute("in-community"),
            vec![
                VariantRule::new(".thumb").set("top", "26px"),
                VariantRule::new(".arrow").set("top", "36px"),
                VariantRule::new(".community").set("display", "block"),
            ],
        ))
        // The thumb and banner rules go through `.post` so they outrank the
        // nesting axis when both are active.
        .axis(VariantAxis::new(axis::CHROME_DENSITY).case(
            VariantDriver::host_attribute("noborders"),
            vec![
                VariantRule::new(".post")
                    .set("grid-template-columns", "34px 1fr")
                    .set("border", "none"),
                VariantRule::new(".post .thumb")
                    .set("top", "4px")
                    .set("left", "0")
                    .set("width", "34px")
                    .set("height", "34px"),
                VariantRule::new(".arrow").set("display", "none"),
                VariantRule::new(".post .community").set("display", "none"),
                VariantRule::new(".composer").set("margin-left", "-34px"),
            ],
        ))
        .axis(VariantAxis::new(axis::THUMBNAIL_PRESENCE).case(
            VariantDriver::host_attribute("nothumb"),
            vec![
                VariantRule::new(".post").set("display", "block"),
                VariantRule::new(".thumb, .arrow").set("display", "none"),
            ],
        ))
        .axis(
            VariantAxis::new(axis::THREAD_POSITION)
                .case(
                    VariantDriver::host_class("parent-post"),
                    vec![
                        VariantRule::new(".post")
                            .set("border-bottom-left-radius", "0")
                            .set("border-bottom-right-radius", "0")
                            .set("border-bottom", "none"),
                        VariantRule::new(".controls").set("padding-bottom", "0"),
                    ],
                )
                .case(
                    VariantDriver::host_class("child-post"),
                    vec![
                        VariantRule::new(".post")
                            .set("border-top-left-radius", "0")
                            .set("border-top-right-radius", "0")
                            .set("border-top", "none"),
                        VariantRule::new(".post .community").set("display", "none"),
                    ],
                ),
        )
}

/// Composes a fresh stylesheet. Components share the cached one from
/// [`definition`].
pub fn compose(assets: &dyn AssetPipeline) -> stylecomp::Result<CompositeStylesheet> {
    let local = Template::new()
        .text(BASE)
        .text("\n.spinner {\n  background-image: ")
        .asset("../assets/spinner.svg")
        .text(";\n}\n");

    CompositeBuilder::new(ID, ModuleLocation::new(MODULE))
        .partial(partials::buttons()?)
        .partial(partials::inputs()?)
        .partial(partials::tooltips()?)
        .partial(partials::spinner()?)
        .local(local)
        .variants(variants())
        .build(assets)
}

static DEFINITION: ComponentDefinition = ComponentDefinition::new(ID, compose);

/// The post component definition. Its stylesheet is composed on first use
/// and shared by every instance.
pub fn definition() -> &'static ComponentDefinition {
    &DEFINITION
}

/// Attributes and classes callers set to pick a presentation, by axis.
pub fn vocabulary() -> Vec<(&'static str, VariantDriver)> {
    variants().vocabulary()
}
