// tests/integration_tests.rs
mod common;

use apl_grader::config::ProblemConfig;
use apl_grader::database::{connect, get_points, get_user_totals, record_score};
use apl_grader::grader::Grader;
use apl_grader::harness::Harness;
use apl_grader::models::{GradingStatus, Submission, UserTotal};
use common::{memory_pool, reported, ScriptedExecutor, FAILED, PASSED_ALL, PASSED_BASIC};
use serde_json::json;
use std::sync::Arc;

fn total(id_user: &str, points: i64) -> UserTotal {
    UserTotal { id_user: id_user.to_string(), points }
}

#[tokio::test]
async fn test_record_score_keeps_maximum() {
    let pool = memory_pool().await;

    for (first, second) in [(1, 0), (0, 2), (2, 1), (1, 1)] {
        let problem = format!("p{}{}", first, second);
        record_score(&pool, "u1", &problem, first).await.unwrap();
        record_score(&pool, "u1", &problem, second).await.unwrap();

        let stored = get_points(&pool, "u1", &problem).await.unwrap().unwrap();
        assert_eq!(stored.points, first.max(second), "after {} then {}", first, second);
    }
}

#[tokio::test]
async fn test_record_score_is_idempotent() {
    let pool = memory_pool().await;

    assert!(record_score(&pool, "u1", "p1", 1).await.unwrap());
    let once = get_points(&pool, "u1", "p1").await.unwrap().unwrap();

    assert!(!record_score(&pool, "u1", "p1", 1).await.unwrap());
    let twice = get_points(&pool, "u1", "p1").await.unwrap().unwrap();

    assert_eq!(once, twice);
    assert_eq!(get_user_totals(&pool).await.unwrap(), vec![total("u1", 1)]);
}

#[tokio::test]
async fn test_zero_score_creates_a_record() {
    let pool = memory_pool().await;

    record_score(&pool, "u1", "p1", 0).await.unwrap();

    let stored = get_points(&pool, "u1", "p1").await.unwrap().unwrap();
    assert_eq!(stored.points, 0);
    assert_eq!(get_user_totals(&pool).await.unwrap(), vec![total("u1", 0)]);
}

#[tokio::test]
async fn test_user_totals_sorted_and_summed() {
    let pool = memory_pool().await;

    for (user, problem, points) in [
        ("3", "ch0_p0_example3", 2),
        ("1", "ch0_p0_example2", 2),
        ("2", "ch0_p0_example1", 1),
        ("1", "ch0_p0_example1", 2),
        ("2", "ch0_p0_example3", 2),
        ("1", "ch0_p0_example3", 2),
        ("2", "ch0_p0_example1", 2),
    ] {
        record_score(&pool, user, problem, points).await.unwrap();
    }

    assert_eq!(
        get_user_totals(&pool).await.unwrap(),
        vec![total("1", 6), total("2", 4), total("3", 2)]
    );
}

#[tokio::test]
async fn test_user_totals_empty_ledger() {
    let pool = memory_pool().await;
    assert!(get_user_totals(&pool).await.unwrap().is_empty());
    assert!(get_points(&pool, "nobody", "p1").await.unwrap().is_none());
}

#[tokio::test]
async fn test_concurrent_submissions_never_lower_score() {
    let path = std::env::temp_dir().join(format!("apl-grader-{}.db", uuid::Uuid::new_v4()));
    let pool = connect(&format!("sqlite:{}", path.display()), 5).await.unwrap();

    // Best score arrives early, worse ones race it.
    let scores = [1, 2, 0, 1, 0, 2, 1, 0, 0, 1, 0, 1, 2, 0, 1];
    let writes = scores.iter().map(|&points| {
        let pool = pool.clone();
        tokio::spawn(async move { record_score(&pool, "u1", "p1", points).await })
    });
    for write in futures::future::join_all(writes).await {
        write.unwrap().unwrap();
    }

    let stored = get_points(&pool, "u1", "p1").await.unwrap().unwrap();
    assert_eq!(stored.points, 2);
    assert_eq!(get_user_totals(&pool).await.unwrap(), vec![total("u1", 2)]);

    pool.close().await;
    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn test_resubmissions_never_drop_points() {
    let pool = memory_pool().await;
    let executor = Arc::new(ScriptedExecutor::new(vec![
        reported(PASSED_BASIC),
        reported(FAILED),
        reported(PASSED_ALL),
    ]));
    let grader = Grader::new(Harness::bundled(), executor.clone());
    let options = ProblemConfig::new(json!({"basic": [], "extra": []}));

    let expected = [
        (GradingStatus::PassedBasic, 1),
        (GradingStatus::Failed, 1),
        (GradingStatus::PassedAll, 2),
    ];
    for (status, stored_after) in expected {
        let submission = Submission::new("ch0_p0_example1", "1", "{⍺⍴⍵}");
        let verdict = grader.submit(&pool, &submission, &options).await.unwrap();
        assert_eq!(verdict.status, status);

        let stored = get_points(&pool, "1", "ch0_p0_example1").await.unwrap().unwrap();
        assert_eq!(stored.points, stored_after);
    }

    assert_eq!(executor.payloads().len(), 3);
}

#[tokio::test]
async fn test_unreachable_service_records_zero() {
    let pool = memory_pool().await;
    let grader = Grader::new(Harness::bundled(), Arc::new(ScriptedExecutor::new(vec![])));

    let submission = Submission::new("p1", "u1", "⍴");
    let verdict = grader
        .submit(&pool, &submission, &ProblemConfig::new(json!({})))
        .await
        .unwrap();

    assert_eq!(verdict.status, GradingStatus::Error);
    assert_eq!(get_points(&pool, "u1", "p1").await.unwrap().unwrap().points, 0);
}
