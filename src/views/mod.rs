//! View renderers
//!
//! Pure functions from normalized records to HTML. Nothing in this module
//! performs I/O; every page is a deterministic function of its inputs (the
//! restaurant renderer additionally takes the RNG that drives its synthetic
//! review filler).

pub mod attractions;
pub mod restaurants;
pub mod weather;

use html_escape::encode_text;

/// Navigation entries, in display order
const NAV: [(&str, &str); 4] = [
    ("/", "Home"),
    ("/attractions", "Attractions"),
    ("/restaurants", "Restaurants"),
    ("/weather", "Weather"),
];

/// Escape untrusted text for element content
#[must_use]
pub fn escape(text: &str) -> String {
    encode_text(text).into_owned()
}

/// Wrap page body markup in the shared shell: document head, stylesheet,
/// nav bar
#[must_use]
pub fn page(title: &str, active_path: &str, body: &str) -> String {
    let mut nav = String::from("<nav class=\"nav-bar\">");
    for (path, label) in NAV {
        let class = if path == active_path {
            "nav-link active"
        } else {
            "nav-link"
        };
        nav.push_str(&format!("<a class=\"{class}\" href=\"{path}\">{label}</a>"));
    }
    nav.push_str("</nav>");

    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title} - Colonial Williamsburg Travel Guide</title>\n\
         <link rel=\"stylesheet\" href=\"/assets/style.css\">\n\
         </head>\n\
         <body>\n{nav}\n<main>\n{body}\n</main>\n\
         </body>\n\
         </html>",
        title = escape(title),
    )
}

/// The static home page
#[must_use]
pub fn home_page() -> String {
    let body = "<h2>Let's take a trip to Colonial Williamsburg!</h2>\n\
                <p>Please click any option that you would like to explore!</p>\n\
                <img class=\"hero-image\" src=\"/assets/williamsburgpic.jpg\" \
                 alt=\"Colonial Williamsburg\">";
    page("Home", "/", body)
}
