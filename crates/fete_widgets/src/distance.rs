//! Distance between two people on a map.
//!
//! Every distance on the page comes from [`haversine_km`]; the map widget only
//! adds projection and drag handling around it.

use serde::{Deserialize, Serialize};

use crate::notice::Notice;

/// Mean Earth radius used by [`haversine_km`].
pub const EARTH_RADIUS_KM: f64 = 6_371.0;

/// Kilometres per mile, as shown to the user.
pub const KM_PER_MILE: f64 = 1.609;

/// Cruising speed of an airliner.
pub const FLIGHT_SPEED_KMH: f64 = 800.0;

/// Speed of light.
pub const LIGHT_SPEED_KMS: f64 = 299_792.458;

/// A point on the globe in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude, degrees north.
    pub lat: f64,
    /// Longitude, degrees east.
    pub lng: f64,
}

impl LatLng {
    /// Creates a point.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Great-circle distance between two points in kilometres.
///
/// ```rust
/// use fete_widgets::distance::{haversine_km, LatLng};
///
/// let mumbai = LatLng::new(19.076, 72.8777);
/// let delhi = LatLng::new(28.6139, 77.209);
/// assert_eq!(haversine_km(mumbai, delhi).round(), 1148.0);
/// ```
#[must_use]
pub fn haversine_km(a: LatLng, b: LatLng) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Whole kilometres, as displayed.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn rounded_km(a: LatLng, b: LatLng) -> u32 {
    haversine_km(a, b).round() as u32
}

/// Fun facts derived from a displayed distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceFacts {
    /// Distance in whole kilometres.
    pub km: u32,
    /// Distance in whole miles.
    pub miles: u32,
    /// Hours by plane, rounded.
    pub flight_hours: u32,
    /// Seconds light needs to cross it.
    pub light_seconds: f64,
}

impl DistanceFacts {
    /// Derives the facts from a rounded kilometre distance.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_km(km: u32) -> Self {
        let distance = f64::from(km);
        Self {
            km,
            miles: (distance / KM_PER_MILE).round() as u32,
            flight_hours: (distance / FLIGHT_SPEED_KMH).round() as u32,
            light_seconds: distance / LIGHT_SPEED_KMS,
        }
    }

    /// Light time with six decimals, as displayed.
    #[must_use]
    pub fn light_seconds_label(&self) -> String {
        format!("{:.6}", self.light_seconds)
    }
}

/// Geographic rectangle shown by the map, projected linearly onto pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapBounds {
    /// Northern edge latitude.
    pub north: f64,
    /// Southern edge latitude.
    pub south: f64,
    /// Western edge longitude.
    pub west: f64,
    /// Eastern edge longitude.
    pub east: f64,
    /// Map width in pixels.
    pub width: f64,
    /// Map height in pixels.
    pub height: f64,
}

impl MapBounds {
    /// India on an 800x480 map.
    pub const INDIA: Self = Self {
        north: 37.0902,
        south: 8.0678,
        west: 68.0369,
        east: 97.4025,
        width: 800.0,
        height: 480.0,
    };

    /// Pixel position of `point`. Points outside the bounds land off-map.
    #[must_use]
    pub fn project(&self, point: LatLng) -> (f64, f64) {
        let x = (point.lng - self.west) / (self.east - self.west) * self.width;
        let y = (self.north - point.lat) / (self.north - self.south) * self.height;
        (x, y)
    }

    /// Point under a pointer at fractional map position `(fx, fy)`, both 0-1
    /// from the top-left. Fractions are clamped to the map.
    #[must_use]
    pub fn unproject(&self, fx: f64, fy: f64) -> LatLng {
        let fx = if fx.is_finite() { fx.clamp(0.0, 1.0) } else { 0.5 };
        let fy = if fy.is_finite() { fy.clamp(0.0, 1.0) } else { 0.5 };
        LatLng::new(
            self.north - fy * (self.north - self.south),
            self.west + fx * (self.east - self.west),
        )
    }
}

/// Which marker a gesture refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// The viewer.
    You,
    /// Their partner.
    Partner,
}

/// Draggable two-marker map.
#[derive(Debug, Clone)]
pub struct DistanceMap {
    bounds: MapBounds,
    you: LatLng,
    partner: LatLng,
    dragging: Option<Marker>,
}

impl Default for DistanceMap {
    fn default() -> Self {
        Self::new(
            MapBounds::INDIA,
            LatLng::new(19.076, 72.8777),
            LatLng::new(28.6139, 77.209),
        )
    }
}

impl DistanceMap {
    /// Creates a map with both markers placed.
    #[must_use]
    pub fn new(bounds: MapBounds, you: LatLng, partner: LatLng) -> Self {
        Self {
            bounds,
            you,
            partner,
            dragging: None,
        }
    }

    /// Position of a marker.
    #[must_use]
    pub fn position(&self, marker: Marker) -> LatLng {
        match marker {
            Marker::You => self.you,
            Marker::Partner => self.partner,
        }
    }

    /// Pixel position of a marker.
    #[must_use]
    pub fn pixel(&self, marker: Marker) -> (f64, f64) {
        self.bounds.project(self.position(marker))
    }

    /// The displayed distance in whole kilometres.
    #[must_use]
    pub fn distance_km(&self) -> u32 {
        rounded_km(self.you, self.partner)
    }

    /// Facts for the displayed distance.
    #[must_use]
    pub fn facts(&self) -> DistanceFacts {
        DistanceFacts::from_km(self.distance_km())
    }

    /// Pointer went down on a marker.
    pub fn begin_drag(&mut self, marker: Marker) {
        self.dragging = Some(marker);
    }

    /// Pointer moved to fractional map position `(fx, fy)`. Ignored unless a
    /// marker is being dragged.
    pub fn drag_to(&mut self, fx: f64, fy: f64) {
        let Some(marker) = self.dragging else {
            return;
        };
        let point = self.bounds.unproject(fx, fy);
        match marker {
            Marker::You => self.you = point,
            Marker::Partner => self.partner = point,
        }
    }

    /// Pointer released. Returns the notice to toast if a drag was in
    /// progress.
    pub fn end_drag(&mut self) -> Option<Notice> {
        let marker = self.dragging.take()?;
        Some(Notice::new(
            "Location Updated",
            match marker {
                Marker::You => "Your location has been updated",
                Marker::Partner => "Partner's location has been updated",
            },
        ))
    }

    /// Marker being dragged, if any.
    #[must_use]
    pub fn dragging(&self) -> Option<Marker> {
        self.dragging
    }
}
