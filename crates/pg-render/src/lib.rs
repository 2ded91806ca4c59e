pub mod chrome;
pub mod guides;
pub mod hit;
pub mod overlay;

pub use chrome::{ChromeNode, ToolbarBox, chrome_nodes};
pub use guides::{Guide, GuideKind, alignment_guides};
pub use hit::{hit_target, hit_test};
pub use overlay::{
    Overlay, OverlayKind, OverlayStyle, ResizeHandle, hit_test_handle, render_overlay,
    render_overlay_with,
};
