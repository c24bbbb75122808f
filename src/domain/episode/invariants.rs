use super::entity::Episode;
use crate::domain::{DomainError, DomainResult};

/// Validates all Episode invariants
pub fn validate_episode(episode: &Episode) -> DomainResult<()> {
    validate_parent(episode)?;
    validate_link(episode)?;
    Ok(())
}

fn validate_parent(episode: &Episode) -> DomainResult<()> {
    if episode.title_id().trim().is_empty() {
        return Err(DomainError::InvariantViolation(format!(
            "Episode {} has no owning title",
            episode.id
        )));
    }
    Ok(())
}

/// An episode is only worth storing with something to play
fn validate_link(episode: &Episode) -> DomainResult<()> {
    if episode.link.trim().is_empty() {
        return Err(DomainError::InvariantViolation(format!(
            "Episode {} has no link",
            episode.id
        )));
    }
    Ok(())
}

/// Critical Episode Invariants:
///
/// 1. Episode MUST belong to exactly one Title
/// 2. Episode always carries exactly one non-empty link
/// 3. Identity is (title_id, number) and never changes
/// 4. Watched only ever flips from false to true

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::episode::EpisodeKey;

    #[test]
    fn test_valid_episode() {
        let episode = Episode::new(EpisodeKey::new("a1", 1), "https://example.org/1");
        assert!(validate_episode(&episode).is_ok());
        assert!(!episode.watched);
    }

    #[test]
    fn test_blank_link_fails() {
        let episode = Episode::new(EpisodeKey::new("a1", 1), "  ");
        assert!(validate_episode(&episode).is_err());
    }

    #[test]
    fn test_key_round_trips_through_display() {
        let key = EpisodeKey::new("a1", 12);
        assert_eq!(key.to_string(), "a1 12");
        assert_eq!("a1 12".parse::<EpisodeKey>().unwrap(), key);
    }

    #[test]
    fn test_key_with_spaces_in_title_id() {
        let key: EpisodeKey = "one piece 1071".parse().unwrap();
        assert_eq!(key.title_id, "one piece");
        assert_eq!(key.number, 1071);
    }

    #[test]
    fn test_malformed_keys_fail() {
        assert!("a1".parse::<EpisodeKey>().is_err());
        assert!("a1 two".parse::<EpisodeKey>().is_err());
        assert!(" 3".parse::<EpisodeKey>().is_err());
    }
}
