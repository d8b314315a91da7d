use std::collections::BTreeSet;

use super::common::*;
use crate::board::error::{BoardError, ValidationError};
use crate::board::postings::filter::{self, SearchCriteria, SearchParams};
use crate::board::postings::{EmploymentType, ExperienceLevel, JobPosting, SalaryRange, WorkMode};
use crate::board::skills::SkillId;

fn no_skills(_: &[String]) -> Result<BTreeSet<SkillId>, BoardError> {
    panic!("skills were not requested")
}

fn catalogue() -> Vec<JobPosting> {
    let mut remote_senior = posting(1);
    remote_senior.title = "Senior Rust Engineer".to_string();
    remote_senior.work_location = WorkMode::Remote;
    remote_senior.experience_level = ExperienceLevel::Senior;
    remote_senior.salary = SalaryRange {
        min: Some(120_000),
        max: Some(160_000),
    };
    remote_senior.visa_sponsorship = true;
    remote_senior.required_skills = skill_set(&[1, 2]);

    let mut contract = posting(2);
    contract.title = "Data Analyst".to_string();
    contract.location = "Austin, TX".to_string();
    contract.job_type = EmploymentType::Contract;
    contract.salary = SalaryRange {
        min: Some(100_000),
        max: None,
    };
    contract.required_skills = skill_set(&[2, 3]);

    let mut intern = posting(3);
    intern.title = "Platform Intern".to_string();
    intern.job_type = EmploymentType::Internship;
    intern.experience_level = ExperienceLevel::Entry;
    intern.salary = SalaryRange {
        min: None,
        max: Some(40_000),
    };

    let mut hybrid = posting(4);
    hybrid.work_location = WorkMode::Hybrid;
    hybrid.visa_sponsorship = true;
    hybrid.required_skills = skill_set(&[4]);

    vec![remote_senior, contract, intern, hybrid]
}

/// Each single predicate paired with the catalogue ids it admits, worked out by hand.
fn single_predicates() -> Vec<(SearchCriteria, Vec<u64>)> {
    vec![
        (
            SearchCriteria {
                title: Some("engineer".to_string()),
                ..SearchCriteria::default()
            },
            vec![1, 4],
        ),
        (
            SearchCriteria {
                location: Some("berlin".to_string()),
                ..SearchCriteria::default()
            },
            vec![1, 3, 4],
        ),
        (
            SearchCriteria {
                job_type: Some(EmploymentType::FullTime),
                ..SearchCriteria::default()
            },
            vec![1, 4],
        ),
        (
            SearchCriteria {
                experience_level: Some(ExperienceLevel::Senior),
                ..SearchCriteria::default()
            },
            vec![1],
        ),
        (
            SearchCriteria {
                work_location: Some(WorkMode::Remote),
                ..SearchCriteria::default()
            },
            vec![1],
        ),
        (
            SearchCriteria {
                salary_min: Some(110_000),
                ..SearchCriteria::default()
            },
            vec![1, 2, 4],
        ),
        (
            SearchCriteria {
                salary_max: Some(50_000),
                ..SearchCriteria::default()
            },
            vec![3, 4],
        ),
        (
            SearchCriteria {
                visa_sponsorship: true,
                ..SearchCriteria::default()
            },
            vec![1, 4],
        ),
        (
            SearchCriteria {
                skills: Some(skill_set(&[2])),
                ..SearchCriteria::default()
            },
            vec![1, 2],
        ),
    ]
}

fn combine(parts: &[&SearchCriteria]) -> SearchCriteria {
    let mut combined = SearchCriteria::default();
    for part in parts {
        combined.title = combined.title.or_else(|| part.title.clone());
        combined.location = combined.location.or_else(|| part.location.clone());
        combined.job_type = combined.job_type.or(part.job_type);
        combined.experience_level = combined.experience_level.or(part.experience_level);
        combined.work_location = combined.work_location.or(part.work_location);
        combined.salary_min = combined.salary_min.or(part.salary_min);
        combined.salary_max = combined.salary_max.or(part.salary_max);
        combined.visa_sponsorship |= part.visa_sponsorship;
        combined.skills = combined.skills.or_else(|| part.skills.clone());
    }
    combined
}

fn returned_ids(criteria: &SearchCriteria) -> Vec<u64> {
    filter::apply(criteria, catalogue())
        .into_iter()
        .map(|posting| posting.id.0)
        .collect()
}

#[test]
fn each_single_predicate_admits_the_expected_postings() {
    for (criteria, admitted) in single_predicates() {
        let mut ids = returned_ids(&criteria);
        ids.sort_unstable();
        assert_eq!(ids, admitted, "criteria {criteria:?}");
    }
}

#[test]
fn combined_filters_return_exactly_the_postings_matching_every_predicate() {
    let predicates = single_predicates();

    for mask in 0u32..(1 << predicates.len()) {
        let chosen: Vec<&(SearchCriteria, Vec<u64>)> = predicates
            .iter()
            .enumerate()
            .filter(|(index, _)| mask & (1 << index) != 0)
            .map(|(_, entry)| entry)
            .collect();
        let criteria: Vec<&SearchCriteria> = chosen.iter().map(|(criteria, _)| criteria).collect();
        let returned = returned_ids(&combine(&criteria));

        let expected: Vec<u64> = (1..=4)
            .rev()
            .filter(|id| chosen.iter().all(|(_, admitted)| admitted.contains(id)))
            .collect();
        assert_eq!(returned, expected, "mask {mask:#b}");
    }
}

#[test]
fn selected_filter_combinations_return_known_postings() {
    let predicates = single_predicates();
    let pick = |indexes: &[usize]| -> SearchCriteria {
        let parts: Vec<&SearchCriteria> =
            indexes.iter().map(|index| &predicates[*index].0).collect();
        combine(&parts)
    };

    // title + visa
    assert_eq!(returned_ids(&pick(&[0, 7])), vec![4, 1]);
    // location + salary ceiling
    assert_eq!(returned_ids(&pick(&[1, 6])), vec![4, 3]);
    // skills + salary floor
    assert_eq!(returned_ids(&pick(&[8, 5])), vec![2, 1]);
    // full time + senior + remote
    assert_eq!(returned_ids(&pick(&[2, 3, 4])), vec![1]);
    // salary floor + ceiling leaves only the posting without a band
    assert_eq!(returned_ids(&pick(&[5, 6])), vec![4]);
    // senior + salary ceiling
    assert!(returned_ids(&pick(&[3, 6])).is_empty());
}

#[test]
fn identity_filter_returns_every_posting_newest_first() {
    let criteria = SearchCriteria::default();
    assert!(criteria.is_identity());

    let ids: Vec<u64> = filter::apply(&criteria, catalogue())
        .into_iter()
        .map(|posting| posting.id.0)
        .collect();
    assert_eq!(ids, vec![4, 3, 2, 1]);
}

#[test]
fn apply_drops_duplicate_postings() {
    let mut postings = catalogue();
    postings.push(posting(2));

    let results = filter::apply(&SearchCriteria::default(), postings);
    assert_eq!(results.len(), 4);
}

#[test]
fn open_posting_maximum_satisfies_any_salary_floor() {
    let mut open_top = posting(10);
    open_top.salary = SalaryRange {
        min: Some(100_000),
        max: None,
    };

    let floor = SearchCriteria {
        salary_min: Some(150_000),
        ..SearchCriteria::default()
    };
    assert!(floor.matches(&open_top));

    let ceiling = SearchCriteria {
        salary_max: Some(90_000),
        ..SearchCriteria::default()
    };
    assert!(!ceiling.matches(&open_top));
}

#[test]
fn fractional_salary_bounds_never_widen_the_range() {
    let mut capped = posting(15);
    capped.salary = SalaryRange {
        min: Some(100_000),
        max: Some(150_000),
    };

    let above_cap = SearchParams {
        salary_min: Some("150000.50".to_string()),
        ..SearchParams::default()
    };
    let criteria = SearchCriteria::from_params(&above_cap, no_skills).expect("criteria parse");
    assert_eq!(criteria.salary_min, Some(150_001));
    assert!(!criteria.matches(&capped));

    let below_floor = SearchParams {
        salary_max: Some("99999.90".to_string()),
        ..SearchParams::default()
    };
    let criteria = SearchCriteria::from_params(&below_floor, no_skills).expect("criteria parse");
    assert_eq!(criteria.salary_max, Some(99_999));
    assert!(!criteria.matches(&capped));

    let inside = SearchParams {
        salary_min: Some("149999.10".to_string()),
        salary_max: Some("100000.90".to_string()),
        ..SearchParams::default()
    };
    let criteria = SearchCriteria::from_params(&inside, no_skills).expect("criteria parse");
    assert_eq!(criteria.salary_min, Some(150_000));
    assert_eq!(criteria.salary_max, Some(100_000));
    assert!(criteria.matches(&capped));
}

#[test]
fn posting_without_salary_is_never_excluded_by_salary_filters() {
    let unpaid_band = posting(11);
    let criteria = SearchCriteria {
        salary_min: Some(500_000),
        salary_max: Some(10),
        ..SearchCriteria::default()
    };
    assert!(criteria.matches(&unpaid_band));
}

#[test]
fn skills_filter_matches_any_requested_skill() {
    let mut python_sql = posting(12);
    python_sql.required_skills = skill_set(&[1, 2]);

    let sql_or_java = SearchCriteria {
        skills: Some(skill_set(&[2, 7])),
        ..SearchCriteria::default()
    };
    assert!(sql_or_java.matches(&python_sql));

    let unknown_only = SearchCriteria {
        skills: Some(skill_set(&[])),
        ..SearchCriteria::default()
    };
    assert!(!unknown_only.matches(&python_sql));
}

#[test]
fn unset_sponsorship_flag_keeps_sponsoring_postings() {
    let mut sponsor = posting(13);
    sponsor.visa_sponsorship = true;

    let params = SearchParams {
        visa_sponsorship: Some("false".to_string()),
        ..SearchParams::default()
    };
    let criteria = SearchCriteria::from_params(&params, no_skills).expect("criteria parse");
    assert!(!criteria.visa_sponsorship);
    assert!(criteria.matches(&sponsor));
}

#[test]
fn text_criteria_are_case_insensitive_substrings() {
    let params = SearchParams {
        title: Some("  BACKEND ".to_string()),
        location: Some("germany".to_string()),
        ..SearchParams::default()
    };
    let criteria = SearchCriteria::from_params(&params, no_skills).expect("criteria parse");
    assert_eq!(criteria.title.as_deref(), Some("BACKEND"));
    assert!(criteria.matches(&posting(14)));
}

#[test]
fn from_params_normalizes_choice_keys_and_flags() {
    let params = SearchParams {
        job_type: Some("Full-Time".to_string()),
        experience_level: Some("SENIOR".to_string()),
        work_location: Some("on-site".to_string()),
        salary_min: Some("150000.00".to_string()),
        visa_sponsorship: Some("on".to_string()),
        ..SearchParams::default()
    };
    let criteria = SearchCriteria::from_params(&params, no_skills).expect("criteria parse");

    assert_eq!(criteria.job_type, Some(EmploymentType::FullTime));
    assert_eq!(criteria.experience_level, Some(ExperienceLevel::Senior));
    assert_eq!(criteria.work_location, Some(WorkMode::OnSite));
    assert_eq!(criteria.salary_min, Some(150_000));
    assert!(criteria.visa_sponsorship);
}

#[test]
fn blank_parameters_leave_criteria_unconstrained() {
    let params = SearchParams {
        title: Some("   ".to_string()),
        job_type: Some(String::new()),
        salary_max: Some(" ".to_string()),
        skills: Some(" , ,".to_string()),
        ..SearchParams::default()
    };
    let criteria = SearchCriteria::from_params(&params, no_skills).expect("criteria parse");
    assert!(criteria.is_identity());
}

#[test]
fn from_params_rejects_unknown_choice_values() {
    let params = SearchParams {
        job_type: Some("weekly".to_string()),
        ..SearchParams::default()
    };

    match SearchCriteria::from_params(&params, no_skills) {
        Err(BoardError::Validation(ValidationError::InvalidFilter { field, value })) => {
            assert_eq!(field, "job_type");
            assert_eq!(value, "weekly");
        }
        other => panic!("expected invalid filter, got {other:?}"),
    }
}

#[test]
fn from_params_rejects_non_numeric_salary() {
    let params = SearchParams {
        salary_min: Some("lots".to_string()),
        ..SearchParams::default()
    };

    match SearchCriteria::from_params(&params, no_skills) {
        Err(BoardError::Validation(ValidationError::InvalidFilter { field, .. })) => {
            assert_eq!(field, "salary_min");
        }
        other => panic!("expected invalid filter, got {other:?}"),
    }
}

#[test]
fn from_params_passes_split_skill_names_to_resolver() {
    let params = SearchParams {
        skills: Some("SQL, Java ,".to_string()),
        ..SearchParams::default()
    };

    let criteria = SearchCriteria::from_params(&params, |names| {
        assert_eq!(names, ["SQL".to_string(), "Java".to_string()]);
        Ok(skill_set(&[2]))
    })
    .expect("criteria parse");
    assert_eq!(criteria.skills, Some(skill_set(&[2])));
}
