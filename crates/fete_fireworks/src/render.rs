//! Drawing a simulation state.

use fete_core::Rgba;

use crate::state::SimulationState;
use crate::surface::DrawSurface;

/// Draws one frame of `state` onto `surface`.
///
/// The previous frame is not erased: a translucent black overlay is painted
/// first so earlier positions fade into trails. Emitters are drawn before
/// particles. A surface with no area is left untouched.
pub fn render<S: DrawSurface + ?Sized>(state: &SimulationState, surface: &mut S) {
    if surface.is_empty_area() {
        return;
    }
    let config = state.config();

    surface.fill(Rgba::BLACK.with_alpha(config.trail_alpha));

    for emitter in state.live_emitters() {
        surface.fill_circle(emitter.position, config.emitter_radius, emitter.color().to_rgba());
    }
    for particle in state.live_particles() {
        surface.fill_circle(particle.position, config.particle_radius, particle.color().to_rgba());
    }
}
