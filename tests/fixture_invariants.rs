//! Fixture Loader Invariant Tests
//!
//! - Problem ids are unique within a set
//! - Query text is non-empty for every shipped problem
//! - Loading is deterministic (same file, same ordered sequence)
//! - Malformed input is an error, never a silent skip

use queryfix::config::Config;
use queryfix::fixture::{BackendKind, FixtureError, FixtureLoader, ProblemSet};

use std::collections::HashSet;
use std::fs;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

/// Loads every shipped problem set from the repo's fixtures directory
fn load_shipped_corpus() -> Vec<ProblemSet> {
    let config = Config::default();
    let loader = FixtureLoader::new("fixtures");
    config
        .sets
        .iter()
        .map(|s| {
            loader
                .load_set(&s.id, &s.file, s.backend)
                .unwrap_or_else(|e| panic!("failed to load {}: {}", s.id, e))
        })
        .collect()
}

// =============================================================================
// Shipped Corpus Shape
// =============================================================================

#[test]
fn test_all_shipped_sets_load() {
    let sets = load_shipped_corpus();
    assert_eq!(sets.len(), 4);
    assert_eq!(sets[0].id(), "ps1");
    assert_eq!(sets[0].backend, BackendKind::Relational);
    assert_eq!(sets[1].backend, BackendKind::Xml);
    assert_eq!(sets[2].backend, BackendKind::Xml);
    assert_eq!(sets[3].backend, BackendKind::Document);
}

#[test]
fn test_shipped_problem_counts() {
    let sets = load_shipped_corpus();
    assert_eq!(sets[0].len(), 12); // problem4 .. problem15
    assert_eq!(sets[1].len(), 5); // ps3 query1 .. query5
    assert_eq!(sets[2].len(), 4); // ps4 query1 .. query4
    assert_eq!(sets[3].len(), 10); // ps5 query1 .. query10
}

#[test]
fn test_problem_ids_unique_within_each_set() {
    for set in load_shipped_corpus() {
        let mut seen = HashSet::new();
        for problem in &set.problems {
            assert!(
                seen.insert(problem.id.clone()),
                "duplicate id {} in {}",
                problem.id,
                set.id()
            );
        }
    }
}

#[test]
fn test_all_query_text_non_empty() {
    for set in load_shipped_corpus() {
        for problem in &set.problems {
            assert!(
                !problem.query().trim().is_empty(),
                "{}/{} has empty query",
                set.id(),
                problem.id()
            );
        }
    }
}

#[test]
fn test_ps1_problem7_sample_is_541() {
    let sets = load_shipped_corpus();
    let problem = sets[0].problem("problem7").expect("problem7 missing");
    let expected = problem.expected.as_ref().expect("problem7 has a sample");
    assert_eq!(expected.lines, vec!["541"]);
    assert!(!expected.truncated);
}

#[test]
fn test_ps1_problem11_sample_is_truncated() {
    let sets = load_shipped_corpus();
    let problem = sets[0].problem("problem11").expect("problem11 missing");
    let expected = problem.expected.as_ref().expect("problem11 has a sample");
    assert!(expected.truncated);
}

#[test]
fn test_ps1_problem15_has_no_sample() {
    let sets = load_shipped_corpus();
    let problem = sets[0].problem("problem15").expect("problem15 missing");
    assert!(problem.expected.is_none());
}

#[test]
fn test_ps5_query6_is_an_aggregation() {
    let sets = load_shipped_corpus();
    let problem = sets[3].problem("query6").expect("query6 missing");
    assert!(problem.query().starts_with("db.movies.aggregate"));
}

// =============================================================================
// Determinism
// =============================================================================

#[test]
fn test_loading_twice_yields_identical_sequences() {
    let first = load_shipped_corpus();
    let second = load_shipped_corpus();
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.id(), b.id());
        assert_eq!(a.len(), b.len());
        for (pa, pb) in a.problems.iter().zip(b.problems.iter()) {
            assert_eq!(pa.id, pb.id);
            assert_eq!(pa.query, pb.query);
            assert_eq!(pa.expected, pb.expected);
        }
    }
}

// =============================================================================
// Malformed Fixtures
// =============================================================================

#[test]
fn test_empty_query_body_is_an_error_not_a_skip() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("bad.py"),
        "problem1 = \"\"\"\nSELECT 1;\n\"\"\"\nproblem2 = \"\"\"\n\n\"\"\"\n",
    )
    .unwrap();

    let loader = FixtureLoader::new(tmp.path());
    let err = loader
        .load_set("bad", "bad.py", BackendKind::Relational)
        .unwrap_err();
    assert!(matches!(
        err,
        FixtureError::EmptyQuery { ref problem, .. } if problem == "problem2"
    ));
    assert!(err.is_malformed());
}

#[test]
fn test_mixed_quoting_conventions_tolerated() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("mixed.py"),
        concat!(
            "q1 = \"\"\"\nSELECT 1;\n\"\"\"\n",
            "'''\nOutput:\n1\n'''\n",
            "q2 = '''\nSELECT 2;\n'''\n",
            "\"\"\"\nOutput:\n2\n\"\"\"\n",
        ),
    )
    .unwrap();

    let loader = FixtureLoader::new(tmp.path());
    let set = loader
        .load_set("mixed", "mixed.py", BackendKind::Relational)
        .unwrap();
    assert_eq!(set.len(), 2);
    assert_eq!(set.problems[0].expected.as_ref().unwrap().lines, vec!["1"]);
    assert_eq!(set.problems[1].expected.as_ref().unwrap().lines, vec!["2"]);
}

#[test]
fn test_missing_expected_output_is_tolerated() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("nosample.py"),
        "q1 = \"\"\"\nSELECT 1;\n\"\"\"\n# a trailing comment\n",
    )
    .unwrap();

    let loader = FixtureLoader::new(tmp.path());
    let set = loader
        .load_set("nosample", "nosample.py", BackendKind::Relational)
        .unwrap();
    assert!(set.problems[0].expected.is_none());
}
