//! Token handles used by the variant tables.

use stylecomp::StyleToken;

pub const BG_UNREAD: StyleToken = StyleToken::new("bg-color--unread");
pub const BORDER_UNREAD: StyleToken = StyleToken::new("border-color--unread");
pub const HALO_UNREAD: StyleToken = StyleToken::new("halo-color--unread");
pub const POST_GAP_TIGHT: StyleToken = StyleToken::new("post-gap--tight");
