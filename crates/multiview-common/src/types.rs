use serde::{Deserialize, Serialize};

/// Frame of a webview within the host screen, in logical coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_roundtrips_through_json() {
        let rect = Rect {
            x: 10.0,
            y: 20.0,
            width: 320.0,
            height: 240.0,
        };
        let json = serde_json::to_string(&rect).unwrap();
        let back: Rect = serde_json::from_str(&json).unwrap();
        assert_eq!(rect, back);
    }

    #[test]
    fn rect_deserializes_from_wire_shape() {
        let rect: Rect =
            serde_json::from_str(r#"{"x":0,"y":0,"width":375,"height":812}"#).unwrap();
        assert!((rect.width - 375.0).abs() < f64::EPSILON);
        assert!((rect.height - 812.0).abs() < f64::EPSILON);
    }
}
