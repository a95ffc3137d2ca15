//! Deterministic spiral of hex cells around the origin.
//!
//! The index of each cell in the sequence is the instance index of the tile
//! it becomes in the merged grid mesh, so the order below is load-bearing.

use bevy::prelude::*;
use hexx::Hex;

use crate::board::CoordinateTransform;
use crate::math;

/// Axial cells of the origin plus rings `1..=rings`, ring by ring.
///
/// Each ring `i` is walked along its six straight edges so that corner cells
/// are covered exactly once, giving `6 * i` cells per ring.
pub fn ring_hexes(rings: u32) -> Vec<Hex> {
    let mut cells = Vec::with_capacity(math::ring_cell_count(rings));
    cells.push(Hex::ZERO);

    for i in 1..=rings as i32 {
        // u = +i
        for v in -i..=0 {
            cells.push(Hex::new(i, v));
        }
        // u = -i
        for v in 0..=i {
            cells.push(Hex::new(-i, v));
        }
        // v = +i
        for u in (-i + 1)..=0 {
            cells.push(Hex::new(u, i));
        }
        // v = -i
        for u in 0..i {
            cells.push(Hex::new(u, -i));
        }
        // u + v = -i
        for k in 1..i {
            cells.push(Hex::new(-i + k, -k));
        }
        // u + v = +i
        for k in 1..i {
            cells.push(Hex::new(i - k, k));
        }
    }

    cells
}

/// Pixel positions of [`ring_hexes`], computed once and indexed by instance.
#[derive(Clone, Debug, PartialEq)]
pub struct RingLayout {
    positions: Vec<Vec2>,
}

impl RingLayout {
    /// Projects the ring spiral through `transform`.
    pub fn generate(transform: &impl CoordinateTransform, rings: u32) -> Self {
        let positions = ring_hexes(rings)
            .into_iter()
            .map(|hex| transform.to_pixel(hex))
            .collect();
        Self { positions }
    }

    /// Positions in instance order.
    pub fn positions(&self) -> &[Vec2] {
        &self.positions
    }

    /// Number of tiles in the window.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Always `false`; the origin is always present.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::platform::collections::HashSet;
    use hexx::{HexLayout, shapes};

    #[test]
    fn length_matches_hex_numbers() {
        let layout = HexLayout::default();
        for r in [0, 1, 2, 5, 30] {
            assert_eq!(
                RingLayout::generate(&layout, r).len(),
                math::ring_cell_count(r),
                "wrong count for radius {r}"
            );
        }
    }

    #[test]
    fn default_window_has_2791_tiles() {
        assert_eq!(ring_hexes(30).len(), 2791);
    }

    #[test]
    fn first_entry_is_origin() {
        let layout = HexLayout {
            scale: Vec2::splat(3.0),
            ..default()
        };
        for r in [0, 1, 7] {
            let ring = RingLayout::generate(&layout, r);
            assert_eq!(ring.positions()[0], layout.to_pixel(Hex::ZERO));
        }
    }

    #[test]
    fn no_duplicate_cells() {
        let cells = ring_hexes(30);
        let unique: HashSet<Hex> = cells.iter().copied().collect();
        assert_eq!(unique.len(), cells.len());
    }

    #[test]
    fn no_duplicate_positions() {
        let ring = RingLayout::generate(&HexLayout::default(), 10);
        let keys: HashSet<(u32, u32)> = ring
            .positions()
            .iter()
            .map(|p| (p.x.to_bits(), p.y.to_bits()))
            .collect();
        assert_eq!(keys.len(), ring.len());
    }

    #[test]
    fn covers_the_same_cells_as_a_hexagon_shape() {
        let cells: HashSet<Hex> = ring_hexes(12).into_iter().collect();
        let expected: HashSet<Hex> = shapes::hexagon(Hex::ZERO, 12).collect();
        assert_eq!(cells, expected);
    }

    #[test]
    fn rings_are_emitted_in_order_of_distance() {
        let cells = ring_hexes(6);
        let mut offset = 1;
        for i in 1..=6u32 {
            let ring = &cells[offset..offset + 6 * i as usize];
            for hex in ring {
                assert_eq!(hex.ulength(), i, "{hex:?} is not on ring {i}");
            }
            offset += 6 * i as usize;
        }
        assert_eq!(offset, cells.len());
    }

    #[test]
    fn first_ring_order_is_stable() {
        let ring: Vec<(i32, i32)> = ring_hexes(1)[1..].iter().map(|h| (h.x, h.y)).collect();
        assert_eq!(ring, vec![(1, -1), (1, 0), (-1, 0), (-1, 1), (0, 1), (0, -1)]);
    }

    #[test]
    fn generation_is_reproducible() {
        let layout = HexLayout::default();
        assert_eq!(
            RingLayout::generate(&layout, 9),
            RingLayout::generate(&layout, 9)
        );
    }
}
