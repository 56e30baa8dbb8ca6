use ghost_maze_core::{Cell, CellCoord, GhostCompartment, Grid, TileVariant};
use ghost_maze_system_classification::classify;
use ghost_maze_system_ghost_box::carve_ghost_box;

fn walled_level_with_box() -> (Grid, GhostCompartment) {
    let mut grid = Grid::filled(12, 12, Cell::Wall);
    let compartment = GhostCompartment::centered(12, 12, 6, 4);
    carve_ghost_box(&mut grid, &compartment);
    (grid, compartment)
}

#[test]
fn padding_ring_has_no_variants() {
    let (grid, compartment) = walled_level_with_box();
    let tiles = classify(&grid, &compartment);

    for coord in compartment.padded_coords() {
        if compartment.contains(coord) {
            assert!(tiles.get(coord).is_some(), "{coord:?} should be classified");
        } else {
            assert_eq!(tiles.get(coord), None, "{coord:?} is padding");
        }
    }
}

#[test]
fn door_cells_render_as_other() {
    let (grid, compartment) = walled_level_with_box();
    let tiles = classify(&grid, &compartment);

    for column in compartment.door_columns() {
        let door = CellCoord::new(compartment.door_row(), column);
        assert_eq!(grid.cell(door), Some(Cell::GhostDoor));
        assert_eq!(tiles.get(door), Some(TileVariant::Other));
    }
}

#[test]
fn compartment_corners_are_fixed() {
    let (grid, compartment) = walled_level_with_box();
    let tiles = classify(&grid, &compartment);

    assert_eq!(
        tiles.variant_at(compartment.top(), compartment.left()),
        Some(TileVariant::TopLeft)
    );
    assert_eq!(
        tiles.variant_at(compartment.top(), compartment.right()),
        Some(TileVariant::TopRight)
    );
    assert_eq!(
        tiles.variant_at(compartment.bottom(), compartment.left()),
        Some(TileVariant::BottomLeft)
    );
    assert_eq!(
        tiles.variant_at(compartment.bottom(), compartment.right()),
        Some(TileVariant::BottomRight)
    );
}

#[test]
fn walls_facing_the_padding_take_edge_variants() {
    let (grid, compartment) = walled_level_with_box();
    let tiles = classify(&grid, &compartment);

    assert_eq!(tiles.variant_at(2, 5), Some(TileVariant::Bottom));
    assert_eq!(tiles.variant_at(9, 5), Some(TileVariant::Top));
    assert_eq!(tiles.variant_at(5, 1), Some(TileVariant::Right));
    assert_eq!(tiles.variant_at(5, 10), Some(TileVariant::Left));
    assert_eq!(tiles.variant_at(0, 0), Some(TileVariant::Other));
}

#[test]
fn classification_is_a_pure_function_of_the_grid() {
    let (grid, compartment) = walled_level_with_box();
    assert_eq!(classify(&grid, &compartment), classify(&grid, &compartment));
}
