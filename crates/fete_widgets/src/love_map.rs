//! Map of meaningful places.
//!
//! Pins sit at percentage positions over a backdrop image. Pressing a pin
//! opens its detail card; pressing another swaps the card.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// One pinned place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Stable identifier.
    pub id: u32,
    /// Card headline.
    pub name: String,
    /// Card body.
    pub description: String,
    /// Card image URL or path.
    #[serde(default)]
    pub image: Option<String>,
    /// Horizontal pin position, percent of the map width.
    pub x_pct: f32,
    /// Vertical pin position, percent of the map height.
    pub y_pct: f32,
}

/// Pin set plus the open card.
#[derive(Debug, Clone, Default)]
pub struct LoveMap {
    locations: Vec<Location>,
    selected: Option<usize>,
}

impl LoveMap {
    /// Creates a map with no card open. Pin positions are clamped to the map.
    #[must_use]
    pub fn new(mut locations: Vec<Location>) -> Self {
        for location in &mut locations {
            location.x_pct = location.x_pct.clamp(0.0, 100.0);
            location.y_pct = location.y_pct.clamp(0.0, 100.0);
        }
        Self {
            locations,
            selected: None,
        }
    }

    /// Opens the card for the pin with `id`. Unknown ids are ignored and
    /// return `false`.
    pub fn select(&mut self, id: u32) -> bool {
        let Some(index) = self.locations.iter().position(|l| l.id == id) else {
            return false;
        };
        self.selected = Some(index);
        debug!("Love map pin {} selected", id);
        true
    }

    /// Closes the detail card.
    pub fn close(&mut self) {
        self.selected = None;
    }

    /// Every pin in display order.
    #[must_use]
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// The place whose card is open.
    #[must_use]
    pub fn selected(&self) -> Option<&Location> {
        self.selected.and_then(|i| self.locations.get(i))
    }

    /// True if the pin with `id` is drawn filled.
    #[must_use]
    pub fn is_selected(&self, id: u32) -> bool {
        self.selected().is_some_and(|l| l.id == id)
    }

    /// Pin position in pixels on a `width` × `height` map.
    #[must_use]
    pub fn pin_position(location: &Location, width: f32, height: f32) -> (f32, f32) {
        (
            location.x_pct / 100.0 * width,
            location.y_pct / 100.0 * height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(id: u32, x_pct: f32, y_pct: f32) -> Location {
        Location {
            id,
            name: format!("Place {id}"),
            description: String::from("Somewhere we went."),
            image: None,
            x_pct,
            y_pct,
        }
    }

    fn map() -> LoveMap {
        LoveMap::new(vec![place(1, 20.0, 30.0), place(2, 50.0, 40.0), place(4, 35.0, 70.0)])
    }

    #[test]
    fn test_select_swaps_card() {
        let mut m = map();
        assert!(m.selected().is_none());

        assert!(m.select(2));
        assert_eq!(m.selected().map(|l| l.id), Some(2));
        assert!(m.is_selected(2));
        assert!(!m.is_selected(1));

        assert!(m.select(4));
        assert_eq!(m.selected().map(|l| l.name.as_str()), Some("Place 4"));
        assert!(!m.is_selected(2));
    }

    #[test]
    fn test_unknown_pin_keeps_card() {
        let mut m = map();
        m.select(1);
        assert!(!m.select(3));
        assert!(m.is_selected(1));

        m.close();
        assert!(m.selected().is_none());
        assert!(!m.is_selected(1));
    }

    #[test]
    fn test_pins_clamped_and_projected() {
        let m = LoveMap::new(vec![place(1, -10.0, 150.0), place(2, 75.0, 60.0)]);
        assert_eq!(m.locations()[0].x_pct, 0.0);
        assert_eq!(m.locations()[0].y_pct, 100.0);

        let (x, y) = LoveMap::pin_position(&m.locations()[1], 1600.0, 900.0);
        assert!((x - 1200.0).abs() < 1e-3);
        assert!((y - 540.0).abs() < 1e-3);
    }

    #[test]
    fn test_empty_map_ignores_select() {
        let mut m = LoveMap::default();
        assert!(!m.select(1));
        assert!(m.locations().is_empty());
    }
}
