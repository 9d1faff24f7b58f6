// src/export/triangulation.rs
//! Fixed face tables turning a box (8 corners plus optional face centers) into
//! triangles. Winding is part of the output format and must not change.

use crate::space::{FaceId, Obstacle};

/// A vertex reference inside a face fan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Corner(usize),
    Center,
}

use Slot::{Center as C, Corner as K};

/// Triangulation of one face: a flat split and a four-triangle fan.
#[derive(Debug, Clone, Copy)]
pub struct FaceLayout {
    pub face: FaceId,
    pub corners: [usize; 4],
    pub split: [[usize; 3]; 2],
    pub fan: [[Slot; 3]; 4],
}

pub const FACE_LAYOUTS: [FaceLayout; 6] = [
    FaceLayout {
        face: FaceId::Bottom,
        corners: [0, 1, 2, 3],
        split: [[0, 3, 2], [0, 2, 1]],
        fan: [[K(0), K(3), C], [K(0), C, K(1)], [K(1), C, K(2)], [K(2), C, K(3)]],
    },
    FaceLayout {
        face: FaceId::Front,
        corners: [0, 1, 5, 6],
        split: [[6, 5, 0], [6, 0, 1]],
        fan: [[K(6), K(5), C], [K(6), C, K(1)], [K(1), C, K(0)], [K(0), C, K(5)]],
    },
    FaceLayout {
        face: FaceId::Right,
        corners: [1, 2, 6, 7],
        split: [[1, 2, 7], [1, 7, 6]],
        fan: [[K(1), K(2), C], [K(1), C, K(6)], [K(6), C, K(7)], [K(7), C, K(2)]],
    },
    FaceLayout {
        face: FaceId::Back,
        corners: [2, 3, 4, 7],
        split: [[2, 3, 4], [2, 4, 7]],
        fan: [[K(2), K(3), C], [K(2), C, K(7)], [K(7), C, K(4)], [K(4), C, K(3)]],
    },
    FaceLayout {
        face: FaceId::Left,
        corners: [0, 3, 4, 5],
        split: [[5, 4, 3], [5, 3, 0]],
        fan: [[K(5), K(4), C], [K(5), C, K(0)], [K(0), C, K(3)], [K(3), C, K(4)]],
    },
    FaceLayout {
        face: FaceId::Top,
        corners: [4, 5, 6, 7],
        split: [[4, 5, 6], [4, 6, 7]],
        fan: [[K(4), K(5), C], [K(4), C, K(7)], [K(7), C, K(6)], [K(6), C, K(5)]],
    },
];

/// The outer boundary's 12 triangles. The container's normals point inward.
pub const BORDER_TRIANGLES: [[usize; 3]; 12] = [
    [0, 1, 2],
    [2, 3, 0],
    [3, 4, 5],
    [5, 0, 3],
    [0, 5, 6],
    [6, 1, 0],
    [1, 6, 7],
    [7, 2, 1],
    [2, 7, 4],
    [4, 3, 2],
    [4, 7, 6],
    [6, 5, 4],
];

impl FaceLayout {
    /// Triangles for this face. `center` is the face center's index in the
    /// vertex list, or `None` for a flat face.
    pub fn triangles(&self, center: Option<usize>) -> Vec<[usize; 3]> {
        match center {
            None => self.split.to_vec(),
            Some(c) => self
                .fan
                .iter()
                .map(|tri| {
                    tri.map(|slot| match slot {
                        Slot::Corner(i) => i,
                        Slot::Center => c,
                    })
                })
                .collect(),
        }
    }
}

/// Index triples into `obstacle.all_points()`, faces in ascending order.
pub fn triangulate(obstacle: &Obstacle) -> Vec<[usize; 3]> {
    FACE_LAYOUTS
        .iter()
        .flat_map(|layout| layout.triangles(obstacle.vertex_index(layout.face)))
        .collect()
}
