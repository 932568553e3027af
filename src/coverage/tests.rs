use super::*;
use crate::scoring::ScoreBreakdown;
use crate::testing::requirement;

fn scored(requirement_id: &str, service_id: &str, final_score: f32) -> Match {
    Match::from_breakdown(
        requirement_id,
        service_id,
        ScoreBreakdown {
            raw_score: final_score,
            category_bonus_applied: false,
            final_score,
        },
    )
}

fn requirements() -> Vec<Requirement> {
    vec![
        requirement("r1", "AWS", Category::Technical),
        requirement("r2", "Kubernetes", Category::Technical),
        requirement("r3", "SOC 2", Category::Compliance),
        requirement("r4", "Go-live by March", Category::Timeline),
    ]
}

#[test]
fn test_average_per_category() {
    let matches = vec![
        scored("r1", "svc-a", 0.9),
        scored("r1", "svc-b", 0.5),
        scored("r2", "svc-a", 0.7),
        scored("r3", "svc-c", 0.4),
    ];
    let report = aggregate(&matches, &requirements());

    let technical = report.get(Category::Technical).unwrap();
    assert_eq!(technical.requirement_count, 2);
    assert_eq!(technical.match_count, 3);
    assert!((technical.average_score.unwrap() - 0.7).abs() < 1e-6);

    assert!((report.average(Category::Compliance).unwrap() - 0.4).abs() < 1e-6);
}

#[test]
fn test_category_without_matches_is_no_data() {
    let matches = vec![scored("r1", "svc-a", 0.9)];
    let report = aggregate(&matches, &requirements());

    let timeline = report.get(Category::Timeline).unwrap();
    assert_eq!(timeline.average_score, None);
    assert!(!timeline.has_data());
    assert_eq!(timeline.requirement_count, 1);
    assert_eq!(timeline.match_count, 0);
}

#[test]
fn test_repeated_requirement_id_keeps_first_category() {
    let reqs = vec![
        requirement("r1", "AWS", Category::Technical),
        requirement("r1", "Catering", Category::Budget),
    ];
    let report = aggregate(&[scored("r1", "svc-a", 0.8)], &reqs);

    assert_eq!(report.categories.len(), 1);
    let technical = report.get(Category::Technical).unwrap();
    assert_eq!(technical.requirement_count, 1);
    assert_eq!(technical.match_count, 1);
    assert!(report.get(Category::Budget).is_none());
}

#[test]
fn test_zero_scores_are_data_not_no_data() {
    let matches = vec![scored("r4", "svc-a", 0.0)];
    let report = aggregate(&matches, &requirements());
    assert_eq!(report.average(Category::Timeline), Some(0.0));
}

#[test]
fn test_categories_without_requirements_are_absent() {
    let report = aggregate(&[], &requirements());
    assert!(report.get(Category::Budget).is_none());
    assert!(report.get(Category::Functional).is_none());
    assert_eq!(report.categories.len(), 3);
}

#[test]
fn test_categories_in_declaration_order() {
    let report = aggregate(&[], &requirements());
    let order: Vec<_> = report.categories.iter().map(|c| c.category).collect();
    assert_eq!(
        order,
        vec![Category::Technical, Category::Timeline, Category::Compliance]
    );
}

#[test]
fn test_unknown_requirement_matches_ignored() {
    let matches = vec![scored("r1", "svc-a", 0.8), scored("ghost", "svc-a", 0.1)];
    let report = aggregate(&matches, &requirements());
    assert!((report.average(Category::Technical).unwrap() - 0.8).abs() < 1e-6);
    let total: usize = report.categories.iter().map(|c| c.match_count).sum();
    assert_eq!(total, 1);
}

#[test]
fn test_empty_inputs() {
    assert!(aggregate(&[], &[]).is_empty());
}

#[test]
fn test_gaps() {
    let matches = vec![
        scored("r1", "svc-a", 0.9),
        scored("r3", "svc-c", 0.2),
    ];
    let report = aggregate(&matches, &requirements());
    assert_eq!(
        report.gaps(0.5),
        vec![Category::Timeline, Category::Compliance]
    );
    assert_eq!(report.gaps(0.0), vec![Category::Timeline]);
}

#[test]
fn test_no_data_serializes_as_null() {
    let report = aggregate(&[], &requirements());
    let json = serde_json::to_value(&report).unwrap();
    let first = &json["categories"][0];
    assert_eq!(first["category"], "Technical");
    assert!(first["averageScore"].is_null());
    assert_eq!(first["requirementCount"], 2);
}
