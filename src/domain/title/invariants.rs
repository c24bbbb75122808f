use super::entity::Title;
use crate::domain::{DomainError, DomainResult};

/// Validates all Title invariants
pub fn validate_title(title: &Title) -> DomainResult<()> {
    validate_id(&title.id)?;
    validate_name(&title.name)?;
    Ok(())
}

/// Catalog ids are opaque but never blank
fn validate_id(id: &str) -> DomainResult<()> {
    if id.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Title id cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Title name cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Invariants that must hold true for the Title domain:
///
/// 1. Title can exist without episodes (import may find no links)
/// 2. Identity is assigned by the catalog and never changes
/// 3. Names are not unique; the first title seen under an id is canonical
/// 4. Rating stays within 0..=5

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::title::Rating;

    #[test]
    fn test_valid_title() {
        let title = Title::new("naruto", "Naruto");
        assert!(validate_title(&title).is_ok());
        assert_eq!(title.rating, Rating::UNRATED);
    }

    #[test]
    fn test_empty_name_fails() {
        let title = Title::new("naruto", "   ");
        assert!(validate_title(&title).is_err());
    }

    #[test]
    fn test_empty_id_fails() {
        let title = Title::new("", "Naruto");
        assert!(validate_title(&title).is_err());
    }

    #[test]
    fn test_rating_bounds() {
        assert_eq!(Rating::new(0).unwrap().stars(), 0);
        assert_eq!(Rating::new(5).unwrap().stars(), 5);
        assert_eq!(Rating::new(6), Err(DomainError::RatingOutOfRange(6)));
        assert_eq!(Rating::new(-1), Err(DomainError::RatingOutOfRange(-1)));
    }

    #[test]
    fn test_rating_deserialization_rejects_out_of_range() {
        let ok: Rating = serde_json::from_str("3").unwrap();
        assert_eq!(ok.stars(), 3);
        assert!(ok.is_rated());
        assert!(serde_json::from_str::<Rating>("9").is_err());
    }
}
