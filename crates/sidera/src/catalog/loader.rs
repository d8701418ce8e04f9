use crate::catalog::types::CatalogPoint;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Largest orb accepted for a catalog point
pub const MAX_POINT_ORB: f64 = 10.0;

/// Errors that can occur when loading catalogs
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {message}")]
    Io { path: String, message: String },
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),
    #[error("Invalid point at index {index}: {message}")]
    InvalidPoint { index: usize, message: String },
    #[error("Duplicate point id: {0}")]
    DuplicateId(String),
}

/// Parse and validate a JSON array of catalog points
pub fn load_points_from_json(json: &str) -> Result<Vec<CatalogPoint>, CatalogError> {
    let points: Vec<CatalogPoint> =
        serde_json::from_str(json).map_err(|e| CatalogError::InvalidJson(e.to_string()))?;

    for (index, point) in points.iter().enumerate() {
        validate_point(point, index)?;
        if points[..index].iter().any(|p| p.id == point.id) {
            return Err(CatalogError::DuplicateId(point.id.clone()));
        }
    }

    Ok(points)
}

/// Read a catalog file from disk
pub fn load_points_from_file(path: &Path) -> Result<Vec<CatalogPoint>, CatalogError> {
    let json = fs::read_to_string(path).map_err(|e| CatalogError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    load_points_from_json(&json)
}

fn validate_point(point: &CatalogPoint, index: usize) -> Result<(), CatalogError> {
    let invalid = |message: String| CatalogError::InvalidPoint { index, message };

    if point.id.trim().is_empty() {
        return Err(invalid("id must be a non-empty string".to_string()));
    }
    if point.name.trim().is_empty() {
        return Err(invalid(format!("name of {} must be a non-empty string", point.id)));
    }
    if !point.longitude.is_finite() {
        return Err(invalid(format!("longitude of {} must be a finite number", point.id)));
    }
    if !(point.orb > 0.0 && point.orb <= MAX_POINT_ORB) {
        return Err(invalid(format!(
            "orb of {} must be in (0, {}], got {}",
            point.id, MAX_POINT_ORB, point.orb
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::types::PointKind;

    #[test]
    fn test_load_valid_points() {
        let json = r#"[
            {"id": "regulus", "name": "Regulus", "kind": "fixed-star", "longitude": 150.0, "orb": 2.0, "royal": true},
            {"id": "gc", "name": "Galactic Center", "kind": "galactic-point", "longitude": 267.15, "orb": 2.0}
        ]"#;
        let points = load_points_from_json(json).unwrap();
        assert_eq!(points.len(), 2);
        assert!(points[0].royal);
        assert_eq!(points[1].kind, PointKind::GalacticPoint);
        assert!(!points[1].behenian);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(load_points_from_json("{"), Err(CatalogError::InvalidJson(_))));
    }

    #[test]
    fn test_rejects_bad_orb() {
        let json = r#"[{"id": "x", "name": "X", "kind": "fixed-star", "longitude": 1.0, "orb": 0.0}]"#;
        assert!(matches!(
            load_points_from_json(json),
            Err(CatalogError::InvalidPoint { index: 0, .. })
        ));
    }

    #[test]
    fn test_rejects_empty_id() {
        let json = r#"[{"id": " ", "name": "X", "kind": "fixed-star", "longitude": 1.0, "orb": 1.0}]"#;
        assert!(load_points_from_json(json).is_err());
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let json = r#"[
            {"id": "x", "name": "X", "kind": "fixed-star", "longitude": 1.0, "orb": 1.0},
            {"id": "x", "name": "X2", "kind": "fixed-star", "longitude": 2.0, "orb": 1.0}
        ]"#;
        assert!(matches!(load_points_from_json(json), Err(CatalogError::DuplicateId(id)) if id == "x"));
    }

    #[test]
    fn test_missing_file() {
        let err = load_points_from_file(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
