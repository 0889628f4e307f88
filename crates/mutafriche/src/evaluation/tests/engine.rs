use std::collections::BTreeSet;

use super::common::*;
use crate::evaluation::domain::{
    Criterion, ManualAnswers, OwnershipType, ParcelRecord, SiteData, Usage,
};
use crate::evaluation::engine::{EvaluationError, MutabilityEngine};

fn small_site_record() -> ParcelRecord {
    ParcelRecord::new(parcel_id(), site_with_area(9_000.0), ManualAnswers::default())
}

#[test]
fn site_area_alone_ranks_with_declaration_order_tie_break() {
    let outcome = MutabilityEngine::new()
        .evaluate(&small_site_record())
        .expect("site area alone is enough");

    let ranked: Vec<(Usage, f64, u8)> = outcome
        .results
        .iter()
        .map(|result| (result.usage, result.index, result.rank))
        .collect();

    assert_eq!(
        ranked,
        vec![
            (Usage::Renaturation, 100.0, 7),
            (Usage::Tertiary, 100.0, 6),
            (Usage::CultureTourism, 100.0, 5),
            (Usage::PublicFacilities, 100.0, 4),
            (Usage::Residential, 100.0, 3),
            (Usage::GroundSolar, 0.0, 2),
            (Usage::Industry, 0.0, 1),
        ]
    );
    assert_eq!(outcome.missing_criteria.len(), 21);
    assert!(!outcome.missing_criteria.contains(&Criterion::SiteArea));
}

#[test]
fn breakdown_applies_criterion_weight() {
    let outcome = MutabilityEngine::new()
        .evaluate(&small_site_record())
        .expect("evaluates");

    let residential = outcome
        .breakdown
        .iter()
        .find(|entry| entry.usage == Usage::Residential)
        .expect("residential breakdown");
    assert_eq!(residential.advantages, 2.0);
    assert_eq!(residential.constraints, 0.0);

    let industry = outcome
        .breakdown
        .iter()
        .find(|entry| entry.usage == Usage::Industry)
        .expect("industry breakdown");
    assert_eq!(industry.advantages, 0.0);
    assert_eq!(industry.constraints, 4.0);
}

#[test]
fn ranks_form_a_permutation_of_one_to_seven() {
    let outcome = MutabilityEngine::new()
        .evaluate(&full_record())
        .expect("complete record evaluates");

    let ranks: BTreeSet<u8> = outcome.results.iter().map(|result| result.rank).collect();
    assert_eq!(ranks, (1..=7).collect::<BTreeSet<u8>>());
    assert_eq!(
        outcome
            .results
            .iter()
            .map(|result| u32::from(result.rank))
            .sum::<u32>(),
        28
    );

    let usages: BTreeSet<Usage> = outcome.results.iter().map(|result| result.usage).collect();
    assert_eq!(usages.len(), 7);
}

#[test]
fn results_are_ordered_most_favourable_first() {
    let outcome = MutabilityEngine::new()
        .evaluate(&full_record())
        .expect("evaluates");

    for pair in outcome.results.windows(2) {
        assert!(pair[0].rank > pair[1].rank);
        assert!(pair[0].index >= pair[1].index);
    }
}

#[test]
fn indices_are_percentages_with_one_decimal() {
    let outcome = MutabilityEngine::new()
        .evaluate(&full_record())
        .expect("evaluates");

    for result in &outcome.results {
        assert!((0.0..=100.0).contains(&result.index), "{result:?}");
        let scaled = result.index * 10.0;
        assert!((scaled - scaled.round()).abs() < 1e-9, "{result:?}");
    }
}

#[test]
fn evaluation_is_deterministic() {
    let engine = MutabilityEngine::new();
    let first = engine.evaluate(&full_record()).expect("evaluates");
    let second = engine.evaluate(&full_record()).expect("evaluates again");
    assert_eq!(first, second);
}

#[test]
fn dont_know_answers_are_reported_missing() {
    let mut record = full_record();
    record.answers.ownership = Some(OwnershipType::Unknown);

    let outcome = MutabilityEngine::new().evaluate(&record).expect("evaluates");
    assert_eq!(outcome.missing_criteria, vec![Criterion::Ownership]);
}

#[test]
fn missing_site_area_is_rejected() {
    let record = ParcelRecord::new(parcel_id(), SiteData::default(), complete_answers());
    assert_eq!(
        MutabilityEngine::new().evaluate(&record),
        Err(EvaluationError::MissingMandatoryCriterion(Criterion::SiteArea))
    );
}

#[test]
fn non_positive_or_non_finite_site_area_is_rejected() {
    for area in [0.0, -10.0, f64::NAN, f64::INFINITY] {
        let record = ParcelRecord::new(parcel_id(), site_with_area(area), complete_answers());
        assert!(
            matches!(
                MutabilityEngine::new().evaluate(&record),
                Err(EvaluationError::InvalidMeasure {
                    criterion: Criterion::SiteArea,
                    ..
                })
            ),
            "area {area} should be rejected"
        );
    }
}

#[test]
fn negative_distances_are_rejected() {
    let mut record = full_record();
    record.site.transit_distance_m = Some(-1.0);
    assert_eq!(
        MutabilityEngine::new().evaluate(&record),
        Err(EvaluationError::InvalidMeasure {
            criterion: Criterion::TransitDistance,
            value: -1.0,
        })
    );
}
