use serde::{Deserialize, Serialize};

use crate::models::{EntityId, null_as_default};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(default)]
    pub id: EntityId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Join row linking a course to a semester, owned by the HoD who created it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterCourse {
    #[serde(default)]
    pub id: EntityId,
    #[serde(default)]
    pub semester_id: EntityId,
    #[serde(default)]
    pub course_id: EntityId,
    #[serde(rename = "createdByHODAccountCode", default, deserialize_with = "null_as_default")]
    pub created_by_hod_account_code: String,
}

/// Gradable component of a course. `weight` is the fraction stored by the
/// backend (0.0 - 1.0).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseElement {
    #[serde(default)]
    pub id: EntityId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub weight: f64,
    #[serde(default)]
    pub semester_course_id: Option<EntityId>,
}

impl CourseElement {
    pub fn weight_percent(&self) -> f64 {
        weight_to_percent(self.weight)
    }
}

/// A course as shown in the plan's course section: the course itself, its
/// elements, and the semester link that owns them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseItem {
    pub semester_course_id: Option<EntityId>,
    pub course: Course,
    pub elements: Vec<CourseElement>,
}

impl CourseItem {
    pub fn total_weight_percent(&self) -> f64 {
        round_weight(self.elements.iter().map(|e| e.weight_percent()).sum())
    }
}

pub fn weight_to_percent(fraction: f64) -> f64 {
    round_weight(fraction * 100.0)
}

pub fn percent_to_weight(percent: f64) -> f64 {
    round_weight(percent / 100.0)
}

// Drops float noise such as 0.28999999999999998 so conversions round-trip.
fn round_weight(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_round_trip() {
        let stored = percent_to_weight(25.0);
        assert_eq!(stored, 0.25);
        assert_eq!(weight_to_percent(stored), 25.0);

        // 0.29 * 100 is 28.999999999999996 without rounding
        assert_eq!(weight_to_percent(0.29), 29.0);
    }

    #[test]
    fn test_total_weight_percent() {
        let element = |w: f64| CourseElement {
            id: EntityId::from(1),
            name: "Lab".to_string(),
            description: None,
            weight: w,
            semester_course_id: None,
        };
        let item = CourseItem {
            semester_course_id: Some(EntityId::from(10)),
            course: Course {
                id: EntityId::from(3),
                name: "Programming".to_string(),
                code: "PRF192".to_string(),
                description: None,
            },
            elements: vec![element(0.1), element(0.2), element(0.7)],
        };
        assert_eq!(item.total_weight_percent(), 100.0);
    }

    #[test]
    fn test_semester_course_wire_names() {
        let sc: SemesterCourse = serde_json::from_value(serde_json::json!({
            "id": 10,
            "semesterId": "1",
            "courseId": 3,
            "createdByHODAccountCode": "HOD007"
        }))
        .unwrap();
        assert_eq!(sc.id, EntityId::from(10));
        assert_eq!(sc.semester_id, EntityId::from(1));
        assert_eq!(sc.created_by_hod_account_code, "HOD007");
    }
}
