//! Room Repository
//!
//! Membership lives in `room_member` (one row per account). Occupancy is
//! never stored; it is counted whenever a room is read.

use super::{RepoError, RepoResult};
use shared::models::{DEFAULT_HOSTEL_NAME, Room, RoomAllocation, RoomAssign};
use sqlx::SqlitePool;

const ROOM_COLUMNS: &str = "r.id, r.hostel_name, r.block, r.floor, r.room_no, r.room_type, (SELECT COUNT(*) FROM room_member m WHERE m.room_id = r.id) AS occupancy, r.max_occupancy, r.created_at, r.updated_at";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Room>> {
    let sql = format!("SELECT {ROOM_COLUMNS} FROM room r WHERE r.id = ?");
    let row = sqlx::query_as::<_, Room>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Room>> {
    let sql = format!("SELECT {ROOM_COLUMNS} FROM room r ORDER BY r.block, r.room_no");
    let rows = sqlx::query_as::<_, Room>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

/// The room `account_id` is allocated to, if any
pub async fn find_by_account(
    pool: &SqlitePool,
    account_id: i64,
) -> RepoResult<Option<RoomAllocation>> {
    let sql = format!(
        "SELECT {ROOM_COLUMNS}, rm.joining_date FROM room r JOIN room_member rm ON rm.room_id = r.id WHERE rm.account_id = ?"
    );
    let row = sqlx::query_as::<_, RoomAllocation>(&sql)
        .bind(account_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Put `account_id` into the room `data` names, creating the room if needed
/// and leaving any previous room.
///
/// Returns `false`, with nothing written, when the room has no free bed.
/// Re-assigning to the current room only refreshes the details.
pub async fn assign(
    pool: &SqlitePool,
    account_id: i64,
    data: &RoomAssign,
    now: i64,
) -> RepoResult<bool> {
    let mut tx = pool.begin().await?;

    // Upsert first so the transaction holds the write lock from the start
    let room_id: i64 = sqlx::query_scalar(
        "INSERT INTO room (id, hostel_name, block, floor, room_no, room_type, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7) \
         ON CONFLICT (block, room_no) DO UPDATE SET floor = excluded.floor, room_type = excluded.room_type, updated_at = excluded.updated_at \
         RETURNING id",
    )
    .bind(shared::util::snowflake_id())
    .bind(DEFAULT_HOSTEL_NAME)
    .bind(data.block.trim())
    .bind(data.floor.trim())
    .bind(data.room_no.trim())
    .bind(data.room_type.trim())
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    let stayed = sqlx::query(
        "UPDATE room_member SET joining_date = ?1 WHERE account_id = ?2 AND room_id = ?3",
    )
    .bind(&data.joining_date)
    .bind(account_id)
    .bind(room_id)
    .execute(&mut *tx)
    .await?;

    if stayed.rows_affected() == 0 {
        sqlx::query("DELETE FROM room_member WHERE account_id = ?")
            .bind(account_id)
            .execute(&mut *tx)
            .await?;

        let joined = sqlx::query(
            "INSERT INTO room_member (account_id, room_id, joining_date, created_at) \
             SELECT ?1, ?2, ?3, ?4 \
             WHERE (SELECT COUNT(*) FROM room_member WHERE room_id = ?2) < (SELECT max_occupancy FROM room WHERE id = ?2)",
        )
        .bind(account_id)
        .bind(room_id)
        .bind(&data.joining_date)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        if joined.rows_affected() == 0 {
            // Dropping the transaction rolls back the upsert and the move-out
            return Ok(false);
        }
    }

    tx.commit().await?;
    Ok(true)
}

/// Change the number of beds.
///
/// Returns `false` when `max_occupancy` is below the current occupancy.
pub async fn set_max_occupancy(pool: &SqlitePool, id: i64, max_occupancy: i64) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE room SET max_occupancy = ?1, updated_at = ?2 WHERE id = ?3 AND (SELECT COUNT(*) FROM room_member WHERE room_id = ?3) <= ?1",
    )
    .bind(max_occupancy)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() > 0 {
        return Ok(true);
    }
    match find_by_id(pool, id).await? {
        Some(_) => Ok(false),
        None => Err(RepoError::NotFound(format!("Room {id} not found"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::repository::account;
    use shared::models::{AccountCreate, AccountRole};

    async fn student(pool: &SqlitePool, email: &str) -> i64 {
        let data = AccountCreate {
            first_name: "Asha".to_string(),
            last_name: "Menon".to_string(),
            email: email.to_string(),
            phone: String::new(),
            student_id: String::new(),
            department: String::new(),
            year: String::new(),
            password: String::new(),
        };
        account::create(pool, &data, "hash", AccountRole::Student, 0.0)
            .await
            .unwrap()
            .id
    }

    fn room_a101(joining_date: &str) -> RoomAssign {
        RoomAssign {
            block: "A".to_string(),
            floor: "1".to_string(),
            room_no: "101".to_string(),
            room_type: "New 3 In 1 Room".to_string(),
            joining_date: joining_date.to_string(),
        }
    }

    #[tokio::test]
    async fn test_assign_fills_room_up_to_capacity() {
        let pool = DbService::in_memory().await.unwrap().pool;
        let mut members = Vec::new();
        for i in 0..4 {
            members.push(student(&pool, &format!("s{i}@example.com")).await);
        }

        for id in &members[..3] {
            assert!(assign(&pool, *id, &room_a101("2025-07-01"), 1).await.unwrap());
        }
        assert!(!assign(&pool, members[3], &room_a101("2025-07-01"), 2).await.unwrap());
        assert!(find_by_account(&pool, members[3]).await.unwrap().is_none());

        let allocation = find_by_account(&pool, members[0]).await.unwrap().unwrap();
        assert_eq!(allocation.room.occupancy, 3);
        assert_eq!(allocation.room.max_occupancy, 3);
        assert_eq!(find_all(&pool).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_reassign_same_room_keeps_one_seat() {
        let pool = DbService::in_memory().await.unwrap().pool;
        let id = student(&pool, "asha@example.com").await;

        assert!(assign(&pool, id, &room_a101("2025-07-01"), 1).await.unwrap());
        assert!(assign(&pool, id, &room_a101("2025-07-15"), 2).await.unwrap());

        let allocation = find_by_account(&pool, id).await.unwrap().unwrap();
        assert_eq!(allocation.room.occupancy, 1);
        assert_eq!(allocation.joining_date, "2025-07-15");
    }

    #[tokio::test]
    async fn test_moving_frees_the_old_bed() {
        let pool = DbService::in_memory().await.unwrap().pool;
        let id = student(&pool, "asha@example.com").await;
        assert!(assign(&pool, id, &room_a101("2025-07-01"), 1).await.unwrap());
        let old_room = find_by_account(&pool, id).await.unwrap().unwrap().room.id;

        let b202 = RoomAssign {
            block: "B".to_string(),
            room_no: "202".to_string(),
            ..room_a101("2025-08-01")
        };
        assert!(assign(&pool, id, &b202, 2).await.unwrap());

        assert_eq!(find_by_id(&pool, old_room).await.unwrap().unwrap().occupancy, 0);
        assert_eq!(find_by_account(&pool, id).await.unwrap().unwrap().room.block, "B");
    }

    #[tokio::test]
    async fn test_full_room_does_not_evict_from_current_room() {
        let pool = DbService::in_memory().await.unwrap().pool;
        let mover = student(&pool, "mover@example.com").await;
        assert!(assign(&pool, mover, &room_a101("2025-07-01"), 1).await.unwrap());

        let b202 = RoomAssign {
            block: "B".to_string(),
            room_no: "202".to_string(),
            ..room_a101("2025-07-01")
        };
        let occupant = student(&pool, "occupant@example.com").await;
        assert!(assign(&pool, occupant, &b202, 1).await.unwrap());
        let b202_id = find_by_account(&pool, occupant).await.unwrap().unwrap().room.id;
        assert!(set_max_occupancy(&pool, b202_id, 1).await.unwrap());

        assert!(!assign(&pool, mover, &b202, 2).await.unwrap());
        assert_eq!(find_by_account(&pool, mover).await.unwrap().unwrap().room.block, "A");
    }

    #[tokio::test]
    async fn test_capacity_cannot_drop_below_occupancy() {
        let pool = DbService::in_memory().await.unwrap().pool;
        let a = student(&pool, "a@example.com").await;
        let b = student(&pool, "b@example.com").await;
        assign(&pool, a, &room_a101("2025-07-01"), 1).await.unwrap();
        assign(&pool, b, &room_a101("2025-07-01"), 1).await.unwrap();
        let room_id = find_by_account(&pool, a).await.unwrap().unwrap().room.id;

        assert!(!set_max_occupancy(&pool, room_id, 1).await.unwrap());
        assert!(set_max_occupancy(&pool, room_id, 2).await.unwrap());
        assert!(matches!(
            set_max_occupancy(&pool, 42, 4).await,
            Err(RepoError::NotFound(_))
        ));
    }
}
