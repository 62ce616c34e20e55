use crate::config::CatalogConfig;
use crate::core::slug::slugify;
use crate::domain::model::{Advice, ModulePick};

pub const PROGRAMME_FILTER: &str = "programma-s";
pub const MODULE_FILTER: &str = "losse-modules";

/// Builds the deep link into the course catalog for the given selections.
///
/// Track codes are deduplicated in input order; codes that do not exist in
/// the catalog are skipped. With nothing selected the bare catalog URL is
/// returned, so the caller always has somewhere to point the user.
pub fn build_filter_url(
    config: &CatalogConfig,
    track_codes: &[String],
    modules: &[ModulePick],
) -> String {
    let mut seen: Vec<&String> = Vec::new();
    let mut programme_slugs: Vec<String> = Vec::new();
    for code in track_codes {
        if seen.contains(&code) {
            continue;
        }
        seen.push(code);
        match config.track_label(code) {
            Some(label) => {
                let slug = slugify(label);
                if !slug.is_empty() {
                    programme_slugs.push(slug);
                }
            }
            None => tracing::debug!("ignoring unknown track code {:?}", code),
        }
    }

    // Labels that are nothing but a parenthetical slugify to "", which
    // would leave an empty entry in the filter value.
    let module_slugs: Vec<String> = modules
        .iter()
        .map(|pick| slugify(pick.label()))
        .filter(|slug| !slug.is_empty())
        .collect();

    if programme_slugs.is_empty() && module_slugs.is_empty() {
        return config.base_url().to_string();
    }

    let mut parts = Vec::new();
    if !programme_slugs.is_empty() {
        parts.push(format!("{}:{}", PROGRAMME_FILTER, programme_slugs.join(",")));
    }
    if !module_slugs.is_empty() {
        parts.push(format!("{}:{}", MODULE_FILTER, module_slugs.join(",")));
    }

    // Slugs only contain [a-z0-9-], so the query string needs no escaping.
    format!("{}?filter={}", config.personal_advice_url(), parts.join(";"))
}

/// Deep link for a finalized advice record: its chosen tracks plus the
/// recommended modules resolved against the catalog.
pub fn advice_url(config: &CatalogConfig, advice: &Advice) -> String {
    let picks: Vec<ModulePick> = advice
        .recommended
        .iter()
        .filter_map(|key| config.module(key).cloned().map(ModulePick::Module))
        .collect();

    build_filter_url(config, &advice.selection.interests, &picks)
}
