//! Built-in user fixture and JSON seed loading.

use chrono::{DateTime, TimeZone, Utc};
use std::{fs, path::Path};
use tracing::instrument;

use super::{
    credentials::{Role, UserRecord, UserStatus},
    error::SeedError,
    utils::hash_password,
};

fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

fn permissions(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

/// The fixed user set used when no seed file is configured.
#[must_use]
pub fn default_users() -> Vec<UserRecord> {
    vec![
        UserRecord {
            id: 1,
            username: "admin".to_string(),
            email: "admin@example.com".to_string(),
            password_hash: hash_password("admin123"),
            role: Role::Admin,
            permissions: permissions(&["read", "write", "delete", "manage_users"]),
            status: UserStatus::Active,
            created_at: date(2025, 1, 1),
        },
        UserRecord {
            id: 2,
            username: "user1".to_string(),
            email: "user1@example.com".to_string(),
            password_hash: hash_password("password1"),
            role: Role::User,
            permissions: permissions(&["read", "write"]),
            status: UserStatus::Active,
            created_at: date(2025, 6, 15),
        },
        UserRecord {
            id: 3,
            username: "user2".to_string(),
            email: "user2@example.com".to_string(),
            password_hash: hash_password("password2"),
            role: Role::User,
            permissions: permissions(&["read"]),
            status: UserStatus::Inactive,
            created_at: date(2025, 7, 20),
        },
    ]
}

/// Load user records from a JSON array.
///
/// # Errors
/// Returns `SeedError` if the file cannot be read or parsed.
#[instrument]
pub fn load(path: &Path) -> Result<Vec<UserRecord>, SeedError> {
    let contents = fs::read_to_string(path)?;
    let records: Vec<UserRecord> = serde_json::from_str(&contents)?;
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::io::Write;

    #[test]
    fn default_users_match_fixture() {
        let users = default_users();
        let names: Vec<&str> = users.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["admin", "user1", "user2"]);
        assert_eq!(users[0].role, Role::Admin);
        assert_eq!(users[2].status, UserStatus::Inactive);
        assert_eq!(users[1].created_at, date(2025, 6, 15));
    }

    #[test]
    fn load_reads_camel_case_records() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(
            file,
            r#"[{{
                "id": 10,
                "username": "dave",
                "email": "dave@example.com",
                "passwordHash": "{}",
                "role": "admin",
                "permissions": ["read"],
                "status": "active",
                "createdAt": "2025-03-01T00:00:00Z"
            }}]"#,
            hash_password("hunter2")
        )?;

        let users = load(file.path())?;
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].username, "dave");
        assert_eq!(users[0].role, Role::Admin);
        assert_eq!(users[0].created_at, date(2025, 3, 1));
        Ok(())
    }

    #[test]
    fn load_rejects_unknown_role() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(
            file,
            r#"[{{"id": 1, "username": "x", "email": "x@example.com", "passwordHash": "", "role": "root", "permissions": [], "status": "active", "createdAt": "2025-03-01T00:00:00Z"}}]"#
        )?;
        assert!(matches!(load(file.path()), Err(SeedError::Parse(_))));
        Ok(())
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let result = load(Path::new("/nonexistent/warden/users.json"));
        assert!(matches!(result, Err(SeedError::Io(_))));
    }
}
