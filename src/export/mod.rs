// src/export/mod.rs
pub mod record;
pub mod stl;
pub mod triangulation;

pub use record::{to_structured_record, CSpaceRecord, FacetRecord, ObstacleRecord};
pub use stl::{facet_normal, to_solid_mesh};
pub use triangulation::{triangulate, FaceLayout, Slot, BORDER_TRIANGLES, FACE_LAYOUTS};
