use handlebars::Handlebars;
use std::sync::Arc;

use crate::error::AppError;

pub type Hbs = Arc<Handlebars<'static>>;

const TEMPLATES: &[(&str, &str)] = &[
    // Layout + pages
    ("layouts/base", "templates/layouts/base.hbs"),
    ("pages/home", "templates/pages/home.hbs"),
    ("pages/not_found", "templates/pages/not_found.hbs"),
    // Partial endpoints
    ("partials/coin_cards", "templates/partials/coin_cards.hbs"),
    ("partials/search_results", "templates/partials/search_results.hbs"),
    ("partials/alert_form", "templates/partials/alert_form.hbs"),
    ("partials/alerts_list", "templates/partials/alerts_list.hbs"),
    ("partials/banners", "templates/partials/banners.hbs"),
    ("partials/overview", "templates/partials/overview.hbs"),
];

pub fn build_handlebars() -> Result<Hbs, AppError> {
    let mut hb = Handlebars::new();

    for (name, path) in TEMPLATES {
        hb.register_template_file(name, path)?;
    }

    Ok(Arc::new(hb))
}
