//! # FETE Widgets
//!
//! State for every interactive element of the greeting page, kept separate
//! from any UI toolkit. A host forwards gestures and the current time, then
//! draws whatever the widgets report.
//!
//! | Widget | Driven by | Reports |
//! |---|---|---|
//! | [`Cake`] | `blow`, `tick` | [`CakeEvent`], confetti |
//! | [`Gift`] | dialog, `unwrap`, `tick` | [`GiftEvent`], confetti |
//! | [`Carousel`] | arrows, hover, `tick` | active slide |
//! | [`Timeline`] | `select`, `close` | layout sides, open detail |
//! | [`DistanceMap`] | marker drags | distance facts, [`Notice`] |
//! | [`Countdown`] | `tick` | [`TimeLeft`] |
//! | [`MusicPlayer`] | transport buttons | [`PlayerEvent`] |
//! | [`LoveMap`] | pin presses | open detail card |
//! | [`Page`] | `tick`, cake and player events | [`PageEvent`] |
//!
//! Time is a `Duration` since the page loaded, except for the countdown,
//! which needs calendar dates.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod cake;
pub mod carousel;
pub mod confetti;
pub mod countdown;
pub mod distance;
pub mod gift;
pub mod love_map;
pub mod notice;
pub mod page;
pub mod player;
pub mod timeline;
pub mod tween;

pub use cake::{Cake, CakeEvent, CakePhase};
pub use carousel::{Carousel, Photo};
pub use confetti::{ConfettiBurst, ConfettiPiece, ConfettiStyle, PieceShape};
pub use countdown::{Countdown, TimeLeft};
pub use distance::{haversine_km, DistanceFacts, DistanceMap, LatLng, MapBounds, Marker};
pub use gift::{Gift, GiftEvent, GiftPhase};
pub use love_map::{Location, LoveMap};
pub use notice::Notice;
pub use page::{Page, PageEvent};
pub use player::{format_time, MusicPlayer, PlayerEvent, Track};
pub use timeline::{Side, Timeline, TimelineEvent};
pub use tween::{Easing, Tween};
