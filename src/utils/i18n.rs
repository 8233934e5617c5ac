use tracing::warn;

/// Locales shipped under `locales/`
pub const AVAILABLE_LOCALES: &[&str] = &["en", "fi"];

/// Switch the display-text locale, falling back to English for unknown ones
pub fn set_locale(locale: &str) {
    if AVAILABLE_LOCALES.contains(&locale) {
        rust_i18n::set_locale(locale);
    } else {
        warn!("Unknown locale {}, using en", locale);
        rust_i18n::set_locale("en");
    }
}
