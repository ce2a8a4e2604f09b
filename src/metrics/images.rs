//! Alt-text coverage over the page's images.

use crate::document::RawImage;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAudit {
    pub total: usize,
    pub with_alt: usize,
    /// Rounded percent; 100 when the page has no images.
    pub alt_coverage: u32,
    pub suggestion: Option<String>,
}

/// Audit alt coverage. An image counts as covered only when its alt
/// attribute is present and non-blank after trimming.
pub fn audit_images(images: &[RawImage]) -> ImageAudit {
    let total = images.len();
    let with_alt = images
        .iter()
        .filter(|img| img.alt.as_deref().is_some_and(|alt| !alt.trim().is_empty()))
        .count();
    let alt_coverage = if total > 0 {
        (with_alt as f64 / total as f64 * 100.0).round() as u32
    } else {
        100
    };
    let suggestion = (total > 0 && alt_coverage < 80)
        .then(|| "Add alt text to missing images".to_string());

    ImageAudit {
        total,
        with_alt,
        alt_coverage,
        suggestion,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn img(src: &str, alt: Option<&str>) -> RawImage {
        RawImage {
            src: src.to_string(),
            alt: alt.map(|a| a.to_string()),
        }
    }

    #[test]
    fn no_images_means_full_coverage() {
        let audit = audit_images(&[]);
        assert_eq!(audit.total, 0);
        assert_eq!(audit.alt_coverage, 100);
        assert_eq!(audit.suggestion, None);
    }

    #[test]
    fn blank_alt_does_not_count() {
        let images = [
            img("a.png", Some("a photo")),
            img("b.png", Some("   ")),
            img("c.png", None),
        ];
        let audit = audit_images(&images);
        assert_eq!(audit.with_alt, 1);
        assert_eq!(audit.alt_coverage, 33);
        assert!(audit.suggestion.is_some());
    }

    #[test]
    fn coverage_is_rounded_percent() {
        let images = [
            img("a.png", Some("a")),
            img("b.png", Some("b")),
            img("c.png", None),
        ];
        // 2/3 -> 66.67 -> 67
        assert_eq!(audit_images(&images).alt_coverage, 67);
    }

    #[test]
    fn no_suggestion_at_or_above_eighty_percent() {
        let images = [
            img("a.png", Some("a")),
            img("b.png", Some("b")),
            img("c.png", Some("c")),
            img("d.png", Some("d")),
            img("e.png", None),
        ];
        // 4/5 = 80, boundary holds
        let audit = audit_images(&images);
        assert_eq!(audit.alt_coverage, 80);
        assert_eq!(audit.suggestion, None);
    }
}
