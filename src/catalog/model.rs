/*!
 * Canonical entities produced by the normalizer.
 *
 * These are the locale-agnostic English baseline shapes; translated
 * overlays are structurally identical JSON trees derived from them.
 * Entities are constructed once per pipeline run and never mutated
 * across runs.
 */

use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

/// Lightweight pointer to another entity, carried for display before or
/// without full resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiRef {
    /// Stable key of the referenced entity
    pub index: String,
    /// Display name of the referenced entity
    pub name: String,
    /// API path of the referenced entity
    pub url: String,
}

/// Entities addressable by a stable index
pub trait Indexed {
    /// Stable key of this entity
    fn index(&self) -> &str;
}

/// Canonical spell entity
#[derive(Debug, Clone, Serialize)]
pub struct SpellRecord {
    /// Stable key
    pub index: String,
    /// Spell name
    pub name: String,
    /// API path of this spell
    pub url: String,
    /// Spell level, 0 (cantrip) through 9
    pub level: i64,
    /// Magic school reference
    pub school: Option<ApiRef>,
    /// Range, free text
    pub range: String,
    /// Casting time, free text
    pub casting_time: String,
    /// Duration, free text
    pub duration: String,
    /// Material component, free text
    pub material: Option<String>,
    /// Component flags (V, S, M)
    pub components: Vec<String>,
    /// Whether the spell can be cast as a ritual
    pub ritual: bool,
    /// Whether the spell requires concentration
    pub concentration: bool,
    /// Structured damage table, passed through opaquely
    pub damage: Option<Value>,
    /// Structured save-DC fields, passed through opaquely
    pub dc: Option<Value>,
    /// Classes able to learn the spell
    pub classes: Vec<ApiRef>,
    /// Subclasses able to learn the spell
    pub subclasses: Vec<ApiRef>,
    /// Description paragraphs
    pub desc: Vec<String>,
    /// Additional paragraphs for casting at higher levels
    pub higher_level: Vec<String>,
    /// First description paragraph
    #[serde(rename = "shortDesc")]
    pub short_desc: String,
    /// All paragraphs joined, with the higher-levels block appended
    #[serde(rename = "fullDesc")]
    pub full_desc: String,
}

impl Indexed for SpellRecord {
    fn index(&self) -> &str {
        &self.index
    }
}

/// Canonical class/subclass feature entity
#[derive(Debug, Clone, Serialize)]
pub struct FeatureRecord {
    /// Stable key
    pub index: String,
    /// Feature name
    pub name: String,
    /// API path of this feature
    pub url: String,
    /// Level the feature is gained at, when level-bound
    pub level: Option<i64>,
    /// Owning class reference
    pub class: Option<ApiRef>,
    /// Owning subclass reference
    pub subclass: Option<ApiRef>,
    /// Parent feature reference, for feature choice groups
    pub parent: Option<ApiRef>,
    /// Prerequisites, passed through opaquely
    pub prerequisites: Vec<Value>,
    /// Description paragraphs
    pub desc: Vec<String>,
}

impl Indexed for FeatureRecord {
    fn index(&self) -> &str {
        &self.index
    }
}

/// One row of a class or subclass level progression
#[derive(Debug, Clone, Serialize)]
pub struct ClassLevelEntry {
    /// Level number
    pub level: i64,
    /// Ability score improvements available by this level
    pub ability_score_bonuses: i64,
    /// Proficiency bonus at this level
    pub prof_bonus: i64,
    /// Unresolved feature references; survives translation as a cheap
    /// localizable name carrier
    #[serde(rename = "featureRefs")]
    pub feature_refs: Vec<ApiRef>,
    /// Feature records resolved against the feature index
    pub features: Vec<FeatureRecord>,
    /// Spellcasting table fragment, passed through opaquely
    pub spellcasting: Option<Value>,
    /// Spells learnable at this level
    pub spells: Vec<ApiRef>,
}

/// Canonical subclass entity with its own level progression
#[derive(Debug, Clone, Serialize)]
pub struct SubclassRecord {
    /// Stable key
    pub index: String,
    /// Subclass name
    pub name: String,
    /// API path of this subclass
    pub url: String,
    /// Owning class reference
    pub class: Option<ApiRef>,
    /// Flavor label ("Domain", "Oath", ...)
    pub subclass_flavor: Option<String>,
    /// Description paragraphs
    pub desc: Vec<String>,
    /// Resolved level progression
    pub levels: Vec<ClassLevelEntry>,
}

impl Indexed for SubclassRecord {
    fn index(&self) -> &str {
        &self.index
    }
}

/// Canonical class entity: summary fields plus resolved progressions
#[derive(Debug, Clone, Serialize)]
pub struct ClassRecord {
    /// Stable key
    pub index: String,
    /// Class name
    pub name: String,
    /// API path of this class
    pub url: String,
    /// Hit die size
    pub hit_die: i64,
    /// Proficiency choices, passed through opaquely
    pub proficiency_choices: Option<Value>,
    /// Granted proficiencies
    pub proficiencies: Vec<ApiRef>,
    /// Saving throw proficiencies
    pub saving_throws: Vec<ApiRef>,
    /// Starting equipment choices, passed through opaquely
    pub starting_equipment: Option<Value>,
    /// Subclass references
    pub subclasses: Vec<ApiRef>,
    /// Spellcasting metadata, passed through opaquely
    pub spellcasting: Option<Value>,
    /// Resolved level progression
    pub levels: Vec<ClassLevelEntry>,
    /// Fully resolved subclasses
    #[serde(rename = "subclassRecords")]
    pub subclass_records: Vec<SubclassRecord>,
}

impl Indexed for ClassRecord {
    fn index(&self) -> &str {
        &self.index
    }
}

/// Spells learnable by one class at one level
#[derive(Debug, Clone, Serialize)]
pub struct LearnableLevel {
    /// Level number
    pub level: i64,
    /// Spells learnable at this level
    pub spells: Vec<ApiRef>,
}

/// Per-class learnable-spell progression
#[derive(Debug, Clone, Serialize)]
pub struct ClassLearning {
    /// Class this progression belongs to
    pub class: ApiRef,
    /// Per-level learnable spells, ascending
    pub levels: Vec<LearnableLevel>,
}

/// Uniform container for a normalized result list.
///
/// `by_index` is always exactly the index of `results`; it is rebuilt
/// whenever the container is constructed and never diverges.
#[derive(Debug, Clone, Serialize)]
pub struct ReferenceDataset<T> {
    /// Number of entities in `results`
    pub total: usize,
    /// Normalized entities
    pub results: Vec<T>,
    /// Map view of `results` keyed by stable index
    #[serde(skip)]
    pub by_index: HashMap<String, T>,
}

impl<T: Indexed + Clone> ReferenceDataset<T> {
    /// Build a dataset from normalized results, deriving the index view
    pub fn from_results(results: Vec<T>) -> Self {
        let by_index = results
            .iter()
            .map(|r| (r.index().to_string(), r.clone()))
            .collect();

        Self {
            total: results.len(),
            results,
            by_index,
        }
    }

    /// Look up an entity by its stable index
    pub fn get(&self, index: &str) -> Option<&T> {
        self.by_index.get(index)
    }
}

impl<T> Default for ReferenceDataset<T> {
    fn default() -> Self {
        Self {
            total: 0,
            results: Vec::new(),
            by_index: HashMap::new(),
        }
    }
}

/// Snapshot of one upstream category, pass-through shape
#[derive(Debug, Clone, Serialize)]
pub struct CategorySnapshot {
    /// List endpoint the category was fetched from
    pub endpoint: String,
    /// Number of items in `results`
    pub count: usize,
    /// Raw item payloads, sorted by name (or index when unnamed)
    pub results: Vec<Value>,
}

/// Category-keyed snapshot of the entire upstream catalog, used as a
/// superset fallback for categories without a bespoke normalizer
#[derive(Debug, Clone, Default, Serialize)]
pub struct FullApiDataset {
    /// Deterministic category emission order
    #[serde(rename = "categoryOrder")]
    pub category_order: Vec<String>,
    /// Snapshots keyed by category
    pub categories: HashMap<String, CategorySnapshot>,
}

/// The four logical datasets of one locale
#[derive(Debug, Clone, Serialize)]
pub struct RulesetBundle {
    /// Normalized spells, sorted by (level, name)
    pub spells: ReferenceDataset<SpellRecord>,
    /// Normalized features, sorted by index
    pub features: ReferenceDataset<FeatureRecord>,
    /// Normalized classes with resolved progressions
    pub classes: ReferenceDataset<ClassRecord>,
    /// Per-class learnable-spell progressions
    #[serde(rename = "classLearning")]
    pub class_learning: Vec<ClassLearning>,
}
