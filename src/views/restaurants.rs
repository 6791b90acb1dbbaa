//! Restaurant page renderer
//!
//! The star rating and review count on each card are presentational filler
//! drawn fresh from the RNG on every render. They are not derived from any
//! real signal.

use rand::RngExt;

use super::{escape, page};
use crate::restaurants::{Cuisine, Restaurant};

/// Uniform-random review filler: 3.5-5.0 stars (one decimal), 15-150 reviews
fn synthetic_review(rng: &mut impl RngExt) -> (f64, u32) {
    let rating = (rng.random_range(3.5..=5.0f64) * 10.0).round() / 10.0;
    let count = rng.random_range(15..=150u32);
    (rating, count)
}

fn review_stars(rating: f64) -> String {
    let filled = rating as usize;
    "★".repeat(filled) + &"☆".repeat(5 - filled)
}

fn card(rng: &mut impl RngExt, restaurant: &Restaurant) -> String {
    let (rating, review_count) = synthetic_review(rng);
    format!(
        "<div class=\"restaurant-card\">\n\
         <h4 class=\"restaurant-name\">{name}</h4>\n\
         <div class=\"restaurant-rating\">\n\
         <span class=\"rating-stars\">{stars}</span>\n\
         <span class=\"rating-number\">{rating:.1}/5</span>\n\
         <span class=\"review-count\">({review_count} reviews)</span>\n\
         </div>\n\
         <p class=\"restaurant-phone\">📞 {phone}</p>\n\
         <a class=\"website-button\" href=\"{website}\" target=\"_blank\">Visit Website</a>\n\
         </div>",
        name = escape(&restaurant.name),
        stars = review_stars(rating),
        phone = escape(&restaurant.phone),
        website = escape(&restaurant.website),
    )
}

/// Render the restaurants page for one search
#[must_use]
pub fn restaurants_page(
    rng: &mut impl RngExt,
    cuisine: Cuisine,
    restaurants: &[Restaurant],
) -> String {
    let mut body = String::from(
        "<h1 class=\"hero-title\">Restaurants in Williamsburg</h1>\n\
         <p class=\"hero-subtitle\">Discover the best dining experiences in Williamsburg</p>\n",
    );

    body.push_str(&format!(
        "<img class=\"cuisine-image\" src=\"/assets/{image}\" alt=\"{label}\">\n",
        image = cuisine.image(),
        label = cuisine.label(),
    ));

    // Dropdown change and button press both resubmit the same form
    body.push_str(
        "<form class=\"search-controls\" method=\"get\" action=\"/restaurants\">\n\
         <label for=\"cuisine\">Select Food Style:</label>\n\
         <select id=\"cuisine\" name=\"cuisine\">\n",
    );
    for option in Cuisine::ALL {
        let selected = if option == cuisine { " selected" } else { "" };
        body.push_str(&format!(
            "<option value=\"{value}\"{selected}>{label}</option>\n",
            value = option.slug(),
            label = option.label(),
        ));
    }
    body.push_str(
        "</select>\n\
         <button type=\"submit\" class=\"search-button\">Search Restaurants</button>\n\
         </form>\n",
    );

    if restaurants.is_empty() {
        body.push_str("<div class=\"no-results\">No restaurants found.</div>\n");
    } else {
        body.push_str("<div class=\"restaurant-list\">\n");
        for restaurant in restaurants {
            body.push_str(&card(rng, restaurant));
            body.push('\n');
        }
        body.push_str("</div>\n");
    }

    page("Restaurants", "/restaurants", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::restaurants::{PHONE_PLACEHOLDER, WEBSITE_PLACEHOLDER};

    fn sample() -> Restaurant {
        Restaurant {
            name: "Fat Canary".to_string(),
            phone: "+1 757 229 3333".to_string(),
            website: "https://fatcanarywilliamsburg.com".to_string(),
        }
    }

    #[test]
    fn test_synthetic_review_stays_in_bounds() {
        let mut rng = rand::rng();
        for _ in 0..200 {
            let (rating, count) = synthetic_review(&mut rng);
            assert!((3.5..=5.0).contains(&rating), "rating {rating} out of range");
            assert!((15..=150).contains(&count), "count {count} out of range");
            // already rounded to one decimal place
            assert_eq!(rating, (rating * 10.0).round() / 10.0);
        }
    }

    #[test]
    fn test_review_stars_floor_the_rating() {
        assert_eq!(review_stars(3.5), "★★★☆☆");
        assert_eq!(review_stars(4.9), "★★★★☆");
        assert_eq!(review_stars(5.0), "★★★★★");
    }

    #[test]
    fn test_card_shows_contact_details() {
        let mut rng = rand::rng();
        let html = card(&mut rng, &sample());
        assert!(html.contains("Fat Canary"));
        assert!(html.contains("+1 757 229 3333"));
        assert!(html.contains("href=\"https://fatcanarywilliamsburg.com\""));
        assert!(html.contains("reviews)"));
    }

    #[test]
    fn test_empty_results_message() {
        let mut rng = rand::rng();
        let html = restaurants_page(&mut rng, Cuisine::Seafood, &[]);
        assert!(html.contains("No restaurants found."));
        assert!(!html.contains("restaurant-card"));
    }

    #[test]
    fn test_page_keeps_selected_cuisine_and_image() {
        let mut rng = rand::rng();
        let html = restaurants_page(&mut rng, Cuisine::ItalianPizza, &[sample()]);
        assert!(html.contains("<option value=\"italian-pizza\" selected>Italian/Pizza</option>"));
        assert!(html.contains("src=\"/assets/italian.jpg\""));
        assert!(html.contains("restaurant-card"));
    }

    #[test]
    fn test_placeholders_render_verbatim() {
        let mut rng = rand::rng();
        let restaurant = Restaurant {
            name: "Unnamed".to_string(),
            phone: PHONE_PLACEHOLDER.to_string(),
            website: WEBSITE_PLACEHOLDER.to_string(),
        };
        let html = restaurants_page(&mut rng, Cuisine::Other, &[restaurant]);
        assert!(html.contains(PHONE_PLACEHOLDER));
        assert!(html.contains(WEBSITE_PLACEHOLDER));
    }
}
