// src/export/record.rs
//! Structured (JSON) record of a generated c-space, as read by the visualizer.

use serde::{Deserialize, Serialize};

use crate::export::triangulation::triangulate;
use crate::space::{CSpace, Obstacle, SpaceResult};
use crate::utils::Point3D;

/// A triangle as three indexes into its obstacle's vertex list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FacetRecord {
    pub first: usize,
    pub second: usize,
    pub third: usize,
}

impl From<[usize; 3]> for FacetRecord {
    fn from([first, second, third]: [usize; 3]) -> Self {
        FacetRecord {
            first,
            second,
            third,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ObstacleRecord {
    pub vertex: Vec<Point3D>,
    pub facet: Vec<FacetRecord>,
}

impl From<&Obstacle> for ObstacleRecord {
    fn from(obstacle: &Obstacle) -> Self {
        ObstacleRecord {
            vertex: obstacle.all_points(),
            facet: triangulate(obstacle).into_iter().map(FacetRecord::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CSpaceRecord {
    pub description: String,
    pub border: Vec<Point3D>,
    pub start: Point3D,
    pub finish: Point3D,
    pub obstacle: Vec<ObstacleRecord>,
}

impl From<&CSpace> for CSpaceRecord {
    fn from(space: &CSpace) -> Self {
        CSpaceRecord {
            description: space.description().to_string(),
            border: space.border().to_vec(),
            start: space.start(),
            finish: space.finish(),
            obstacle: space.obstacles().iter().map(ObstacleRecord::from).collect(),
        }
    }
}

impl CSpaceRecord {
    pub fn to_json(&self) -> SpaceResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(text: &str) -> SpaceResult<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Serializes a c-space to its structured JSON record.
pub fn to_structured_record(space: &CSpace) -> SpaceResult<String> {
    CSpaceRecord::from(space).to_json()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::{generate, FaceId};

    #[test]
    fn test_empty_space_record() {
        let space = generate(10.0, 10.0, 10.0, 0, 99).unwrap();
        let json = to_structured_record(&space).unwrap();
        assert_eq!(
            json,
            concat!(
                r#"{"Description":"c-space 10.00 x 10.00 x 10.00, empty, seed 99","#,
                r#""Border":[{"X":0.0,"Y":0.0,"Z":0.0},{"X":10.0,"Y":0.0,"Z":0.0},"#,
                r#"{"X":10.0,"Y":10.0,"Z":0.0},{"X":0.0,"Y":10.0,"Z":0.0},"#,
                r#"{"X":0.0,"Y":10.0,"Z":10.0},{"X":0.0,"Y":0.0,"Z":10.0},"#,
                r#"{"X":10.0,"Y":0.0,"Z":10.0},{"X":10.0,"Y":10.0,"Z":10.0}],"#,
                r#""Start":{"X":0.0,"Y":0.0,"Z":0.0},"Finish":{"X":10.0,"Y":10.0,"Z":10.0},"#,
                r#""Obstacle":[]}"#
            )
        );
    }

    #[test]
    fn test_obstacle_record_counts() {
        let mut o = Obstacle::new(Point3D::ORIGIN, Point3D::splat(2.0));
        o.face_center[FaceId::Bottom.index()] = Some(FaceId::Bottom.canonical_center());
        let record = ObstacleRecord::from(&o);
        assert_eq!(record.vertex.len(), 9);
        assert_eq!(record.facet.len(), 4 + 5 * 2);
        assert_eq!(record.facet[0], FacetRecord::from([0, 3, 8]));
    }

    #[test]
    fn test_record_round_trip_structure() {
        let space = generate(10.0, 10.0, 10.0, 5, 3).unwrap();
        let json = to_structured_record(&space).unwrap();
        let record = CSpaceRecord::from_json(&json).unwrap();

        assert_eq!(record.description, space.description());
        assert_eq!(record.border.len(), 8);
        assert_eq!(record.obstacle.len(), space.obstacles().len());
        for (r, o) in record.obstacle.iter().zip(space.obstacles()) {
            let bulges = o.bulge_count();
            assert_eq!(r.vertex.len(), 8 + bulges);
            assert_eq!(r.facet.len(), 2 * (6 - bulges) + 4 * bulges);
            for f in &r.facet {
                assert!(f.first < r.vertex.len());
                assert!(f.second < r.vertex.len());
                assert!(f.third < r.vertex.len());
            }
        }
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            CSpaceRecord::from_json("{\"Description\": 3}"),
            Err(crate::space::SpaceError::SerializationFailure(_))
        ));
    }
}
