#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Carves the reserved ghost compartment into the centre of a full level.

use ghost_maze_core::{Cell, GhostCompartment, Grid};

/// Overwrites the padded compartment region of the grid.
///
/// The padding ring becomes empty floor regardless of what occupied it, the
/// interior becomes [`Cell::GhostBox`], and the two door cells on the
/// interior's top row become [`Cell::GhostDoor`]. This is the last mutation a
/// candidate level receives before validation.
pub fn carve_ghost_box(grid: &mut Grid, compartment: &GhostCompartment) {
    for coord in compartment.padded_coords() {
        let cell = if compartment.is_door(coord) {
            Cell::GhostDoor
        } else if compartment.contains(coord) {
            Cell::GhostBox
        } else {
            Cell::Empty
        };
        grid.set(coord, cell);
    }
}
