//! Coordinate conversion between registry rects and wry rects.

use multiview_common::Rect;

/// Convert a registry `Rect` (f64 logical coords) to a wry `Rect`.
pub fn to_wry_rect(rect: Rect) -> wry::Rect {
    wry::Rect {
        position: wry::dpi::Position::Logical(wry::dpi::LogicalPosition::new(rect.x, rect.y)),
        size: wry::dpi::Size::Logical(wry::dpi::LogicalSize::new(rect.width, rect.height)),
    }
}
