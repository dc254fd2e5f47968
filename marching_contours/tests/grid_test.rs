mod common;

use common::{config, solid, BLACK, WHITE};
use image::{ImageBuffer, Rgb};
use marching_contours::build_grid;
use marching_contours::grid::{intensity, occupancy, OccupancyGrid, DARK, LIGHT};

#[test]
fn intensity_is_integer_mean() {
    assert_eq!(intensity(WHITE), 255);
    assert_eq!(intensity(Rgb([200, 201, 202])), 201);
    assert_eq!(intensity(Rgb([0, 0, 5])), 1);
}

#[test]
fn threshold_is_inclusive_for_dark() {
    assert_eq!(occupancy(Rgb([200, 200, 200]), 200), DARK);
    assert_eq!(occupancy(Rgb([201, 201, 201]), 200), LIGHT);
    assert_eq!(occupancy(BLACK, 0), DARK);
    assert_eq!(occupancy(WHITE, 254), LIGHT);
}

#[test]
fn dimensions_follow_canvas_over_step() {
    let grid = OccupancyGrid::for_canvas(20, 12, 8);
    assert_eq!(grid.interior_rows(), 1);
    assert_eq!(grid.interior_cols(), 2);
    assert_eq!(grid.to_vec(), vec![vec![0; 3]; 2]);
}

#[test]
fn all_white_gives_all_light() {
    let grid = build_grid(&solid(16, 16, WHITE), &config(8, 1)).expect("grid");
    assert_eq!(grid.to_vec(), vec![vec![0; 3]; 3]);
}

#[test]
fn dark_top_left_block_sets_only_the_first_cell() {
    let img = ImageBuffer::from_fn(16, 16, |x, y| if x < 8 && y < 8 { BLACK } else { WHITE });
    let grid = build_grid(&img, &config(8, 1)).expect("grid");
    assert_eq!(grid.to_vec(), vec![vec![1, 0, 0], vec![0, 0, 0], vec![0, 0, 0]]);
}

#[test]
fn boundary_cells_sample_last_row_and_column() {
    // 20x12, step 8: P = 1, Q = 2. Last pixel column and row are dark.
    let img = ImageBuffer::from_fn(20, 12, |x, y| if x == 19 || y == 11 { BLACK } else { WHITE });
    let grid = build_grid(&img, &config(8, 1)).expect("grid");
    // Column Q samples x = 19; row P samples y = 11; the corner stays light.
    assert_eq!(grid.to_vec(), vec![vec![0, 0, 1], vec![1, 1, 0]]);
}

#[test]
fn corner_is_light_even_on_a_black_image() {
    let grid = build_grid(&solid(24, 16, BLACK), &config(8, 1)).expect("grid");
    assert_eq!(grid.get(2, 3), LIGHT);
    assert_eq!(grid.get(0, 0), DARK);
    assert_eq!(grid.get(2, 0), DARK);
    assert_eq!(grid.get(0, 3), DARK);
    let dark = grid.to_vec().iter().flatten().filter(|&&c| c == DARK).count();
    assert_eq!(dark, 3 * 4 - 1);
}

#[test]
fn canvas_smaller_than_a_step_has_no_interior() {
    let grid = build_grid(&solid(5, 3, BLACK), &config(8, 1)).expect("grid");
    assert_eq!(grid.interior_rows(), 0);
    assert_eq!(grid.interior_cols(), 0);
    assert_eq!(grid.to_vec(), vec![vec![0]]);

    // One row of cells wide but less than a step tall: only row P is sampled.
    let grid = build_grid(&solid(20, 5, BLACK), &config(8, 1)).expect("grid");
    assert_eq!(grid.to_vec(), vec![vec![1, 1, 0]]);
}

#[test]
fn every_value_is_binary() {
    let grid = build_grid(&common::pattern(61, 47), &config(4, 1)).expect("grid");
    assert!(grid.to_vec().iter().flatten().all(|&c| c == LIGHT || c == DARK));
}
