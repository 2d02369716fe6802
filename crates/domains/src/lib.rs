//! gamehub/crates/domains/src/lib.rs
//!
//! The central domain types and interface definitions for GameHub.

pub mod errors;
pub mod models;
pub mod ports;
pub mod store;

// Re-exporting for easier access in other crates
pub use errors::*;
pub use models::*;
pub use ports::*;
pub use store::Collection;

#[cfg(test)]
mod tests {
    use super::models::*;
    use chrono::TimeZone;

    #[test]
    fn test_post_reads_legacy_timestamp_field() {
        let raw = r#"{
            "id": 1700000000000,
            "userId": 7,
            "gameId": 1,
            "title": "Hi",
            "content": "Hello world",
            "tags": ["chat"],
            "timestamp": "2024-01-02T03:04:05Z"
        }"#;
        let post: Post = serde_json::from_str(raw).unwrap();
        assert_eq!(post.game_id, 1);
        assert_eq!(
            post.created_at,
            chrono::Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
        );

        let written = serde_json::to_value(&post).unwrap();
        assert!(written.get("createdAt").is_some());
        assert!(written.get("userId").is_some());
    }

    #[test]
    fn test_seed_defaults_omitted_collections() {
        let seed: Seed = serde_json::from_str(r#"{"tags": ["rpg"]}"#).unwrap();
        assert!(seed.games.is_none());
        assert!(seed.users.is_empty());
        assert_eq!(seed.tags, vec!["rpg".to_string()]);
    }

    #[test]
    fn test_unknown_user_placeholder() {
        let user = User::unknown();
        assert!(user.is_unknown());
        assert_eq!(user.username, UNKNOWN_USERNAME);
    }

    #[test]
    fn test_dedup_tags_keeps_first_occurrence() {
        let tags = vec!["a".into(), "b".into(), "a".into(), "c".into(), "b".into()];
        assert_eq!(dedup_tags(tags), vec!["a", "b", "c"]);
    }
}
