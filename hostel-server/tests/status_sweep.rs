//! Auto-acceptance of pending leave requests and complaints

mod common;

use std::time::Duration;

use common::{memory_pool, seed_account};
use hostel_server::db::repository::{complaint, leave};
use hostel_server::services::{StatusSweeper, SweepReport};
use shared::models::{ComplaintCreate, ComplaintStatus, LeaveCreate, LeaveStatus};
use tokio_util::sync::CancellationToken;

const MINUTE_MS: i64 = 60_000;
const T: i64 = 1_741_910_400_000; // 2025-03-14T00:00:00Z

fn sweeper(pool: &sqlx::SqlitePool) -> StatusSweeper {
    StatusSweeper::new(
        pool.clone(),
        Duration::from_secs(60),
        Duration::from_secs(600),
    )
}

fn leave_request() -> LeaveCreate {
    LeaveCreate {
        from_date: "2025-03-20".to_string(),
        from_time: "09:00".to_string(),
        to_date: "2025-03-22".to_string(),
        to_time: "18:00".to_string(),
        no_of_days: "3".to_string(),
        reason: "Family function".to_string(),
    }
}

fn plumbing() -> ComplaintCreate {
    ComplaintCreate {
        complaint_type: "Plumbing".to_string(),
        description: "Tap leaking in room 204".to_string(),
    }
}

#[tokio::test]
async fn test_complaint_waits_for_dwell_time() {
    let pool = memory_pool().await;
    let account = seed_account(&pool, "asha@example.com", 0.0).await;
    let filed = complaint::create(&pool, account.id, plumbing(), T).await.unwrap();
    let sweeper = sweeper(&pool);

    let report = sweeper.sweep_once(T + 10 * MINUTE_MS - 1).await;
    assert_eq!(report.complaints_accepted, 0);
    let current = complaint::find_by_id(&pool, filed.id).await.unwrap().unwrap();
    assert_eq!(current.status, ComplaintStatus::Pending);

    let report = sweeper.sweep_once(T + 10 * MINUTE_MS).await;
    assert_eq!(report.complaints_accepted, 1);
    let current = complaint::find_by_id(&pool, filed.id).await.unwrap().unwrap();
    assert_eq!(current.status, ComplaintStatus::Accepted);
}

#[tokio::test]
async fn test_leave_is_accepted_regardless_of_age() {
    let pool = memory_pool().await;
    let account = seed_account(&pool, "asha@example.com", 0.0).await;
    let filed = leave::create(&pool, account.id, leave_request(), T).await.unwrap();

    let report = sweeper(&pool).sweep_once(T).await;
    assert_eq!(
        report,
        SweepReport {
            leaves_accepted: 1,
            complaints_accepted: 0
        }
    );
    let current = leave::find_by_id(&pool, filed.id).await.unwrap().unwrap();
    assert_eq!(current.status, LeaveStatus::Accepted);
}

#[tokio::test]
async fn test_sweep_is_idempotent_and_leaves_decided_records_alone() {
    let pool = memory_pool().await;
    let account = seed_account(&pool, "asha@example.com", 0.0).await;
    let rejected = leave::create(&pool, account.id, leave_request(), T).await.unwrap();
    leave::update_status(&pool, rejected.id, LeaveStatus::Rejected)
        .await
        .unwrap();
    let resolved = complaint::create(&pool, account.id, plumbing(), T).await.unwrap();
    complaint::update_status(&pool, resolved.id, ComplaintStatus::Resolved)
        .await
        .unwrap();
    leave::create(&pool, account.id, leave_request(), T).await.unwrap();

    let sweeper = sweeper(&pool);
    let now = T + 60 * MINUTE_MS;
    assert_eq!(sweeper.sweep_once(now).await.leaves_accepted, 1);
    assert_eq!(sweeper.sweep_once(now).await, SweepReport::default());

    let current = leave::find_by_id(&pool, rejected.id).await.unwrap().unwrap();
    assert_eq!(current.status, LeaveStatus::Rejected);
    let current = complaint::find_by_id(&pool, resolved.id).await.unwrap().unwrap();
    assert_eq!(current.status, ComplaintStatus::Resolved);
}

#[tokio::test]
async fn test_background_sweeper_runs_until_cancelled() {
    let pool = memory_pool().await;
    let account = seed_account(&pool, "asha@example.com", 0.0).await;
    let filed = leave::create(&pool, account.id, leave_request(), T).await.unwrap();

    let shutdown = CancellationToken::new();
    let sweeper = StatusSweeper::new(pool.clone(), Duration::from_millis(20), Duration::ZERO);
    let handle = tokio::spawn(sweeper.run(shutdown.clone()));

    let mut accepted = false;
    for _ in 0..100 {
        let current = leave::find_by_id(&pool, filed.id).await.unwrap().unwrap();
        if current.status == LeaveStatus::Accepted {
            accepted = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(accepted, "sweeper never accepted the pending leave");

    shutdown.cancel();
    tokio::time::timeout(Duration::from_secs(1), handle)
        .await
        .expect("sweeper stops on cancellation")
        .unwrap();
}
