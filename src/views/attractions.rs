//! Attraction page renderer

use super::{escape, page};
use crate::attractions::AttractionPick;

/// Glyph row for a 0-100 rating: `floor(rating / 20)` filled stars, the rest
/// empty. Ratings past the nominal scale saturate at five stars.
#[must_use]
pub fn star_row(rating: u8) -> String {
    let filled = usize::from(rating / 20).min(5);
    "★".repeat(filled) + &"☆".repeat(5 - filled)
}

/// Render the attractions page. `pick` is `None` before the first button
/// press.
#[must_use]
pub fn attractions_page(pick: Option<&AttractionPick>) -> String {
    let mut body = String::from(
        "<h2 class=\"page-title\">Attractions</h2>\n\
         <p class=\"page-subtitle\">Click the button and see where you go today!</p>\n\
         <a class=\"action-button\" href=\"/attractions?pick=1\">Attraction Button</a>\n",
    );

    if let Some(pick) = pick {
        body.push_str(&format!(
            "<div class=\"attraction-result\">\n\
             <p>🎡 Your attraction: {name}</p>\n\
             <p class=\"attraction-stars\">{stars}</p>\n",
            name = escape(&pick.name),
            stars = star_row(pick.rating),
        ));
        match pick.image {
            Some(image) => body.push_str(&format!(
                "<img class=\"attraction-image\" src=\"/assets/{image}\" alt=\"{name}\">\n",
                name = escape(&pick.name),
            )),
            None => body.push_str(
                "<div class=\"attraction-image placeholder\">Image not available</div>\n",
            ),
        }
        body.push_str("</div>\n");
    }

    page("Attractions", "/attractions", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, "☆☆☆☆☆")]
    #[case(19, "☆☆☆☆☆")]
    #[case(20, "★☆☆☆☆")]
    #[case(59, "★★☆☆☆")]
    #[case(89, "★★★★☆")]
    #[case(99, "★★★★☆")]
    #[case(100, "★★★★★")]
    #[case(101, "★★★★★")]
    #[case(255, "★★★★★")]
    fn test_star_row(#[case] rating: u8, #[case] expected: &str) {
        assert_eq!(star_row(rating), expected);
    }

    #[test]
    fn test_star_row_always_five_glyphs() {
        for rating in 0..=u8::MAX {
            assert_eq!(star_row(rating).chars().count(), 5);
        }
    }

    #[test]
    fn test_idle_page_has_button_but_no_result() {
        let html = attractions_page(None);
        assert!(html.contains("Attraction Button"));
        assert!(html.contains("href=\"/attractions?pick=1\""));
        assert!(!html.contains("Your attraction"));
    }

    #[test]
    fn test_loaded_page_shows_pick_with_image() {
        let pick = AttractionPick {
            name: "Kimball Theatre".to_string(),
            rating: 92,
            image: Some("kimball.jpg"),
        };
        let html = attractions_page(Some(&pick));
        assert!(html.contains("Your attraction: Kimball Theatre"));
        assert!(html.contains("★★★★☆"));
        assert!(html.contains("src=\"/assets/kimball.jpg\""));
    }

    #[test]
    fn test_loaded_page_without_image_shows_placeholder() {
        let pick = AttractionPick {
            name: "Scraped & Unknown".to_string(),
            rating: 0,
            image: None,
        };
        let html = attractions_page(Some(&pick));
        assert!(html.contains("Image not available"));
        // Upstream text is escaped
        assert!(html.contains("Scraped &amp; Unknown"));
    }
}
