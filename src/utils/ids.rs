use uuid::Uuid;

/// New random item id: lowercase hyphenated v4 UUID (36 characters)
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Whether `id` is a hyphenated UUID string
pub fn is_valid_id(id: &str) -> bool {
    id.len() == 36 && Uuid::try_parse(id).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_format() {
        let id = generate_id();
        assert_eq!(id.len(), 36);

        let groups: Vec<_> = id.split('-').map(str::len).collect();
        assert_eq!(groups, vec![8, 4, 4, 4, 12]);
        assert!(id.chars().all(|c| c == '-' || c.is_ascii_digit() || c.is_ascii_lowercase()));
        assert_eq!(&id[14..15], "4");
    }

    #[test]
    fn test_generate_id_unique() {
        let ids: std::collections::HashSet<_> = (0..1000).map(|_| generate_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_is_valid_id() {
        assert!(is_valid_id("550e8400-e29b-41d4-a716-446655440000"));
        assert!(!is_valid_id("550e8400e29b41d4a716446655440000"));
        assert!(!is_valid_id("test-123"));
        assert!(!is_valid_id(""));
    }
}
