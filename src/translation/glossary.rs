/*!
 * Fixed bilingual term overrides.
 *
 * Machine providers are unreliable on short game terms ("Fighter" becomes
 * a soldier, "Ranger" a park warden), so class names and ability scores
 * carry pinned translations. An override wins over provider output on an
 * exact trimmed match, and still applies when the provider call fails.
 */

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Pinned English → Spanish game terms
static SPANISH_TERMS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        // Classes
        ("Barbarian", "Bárbaro"),
        ("Bard", "Bardo"),
        ("Cleric", "Clérigo"),
        ("Druid", "Druida"),
        ("Fighter", "Guerrero"),
        ("Monk", "Monje"),
        ("Paladin", "Paladín"),
        ("Ranger", "Explorador"),
        ("Rogue", "Pícaro"),
        ("Sorcerer", "Hechicero"),
        ("Warlock", "Brujo"),
        ("Wizard", "Mago"),
        // Ability scores
        ("Strength", "Fuerza"),
        ("Dexterity", "Destreza"),
        ("Constitution", "Constitución"),
        ("Intelligence", "Inteligencia"),
        ("Wisdom", "Sabiduría"),
        ("Charisma", "Carisma"),
    ])
});

/// Pinned translation for `text` into `target_locale`, if one exists.
///
/// The input is trimmed before lookup; anything else must match exactly.
pub fn override_for(text: &str, target_locale: &str) -> Option<String> {
    let trimmed = text.trim();
    match target_locale {
        "es" => SPANISH_TERMS.get(trimmed).map(|s| (*s).to_string()),
        _ => None,
    }
}
