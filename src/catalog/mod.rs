/*!
 * Canonical catalog entities and the passes that produce them.
 *
 * - `model`: entity structs and the dataset containers
 * - `normalize`: raw upstream payload -> canonical entity, defensively
 *   defaulted
 * - `resolve`: cross-reference stitching of features and spells into
 *   class/subclass level progressions
 */

pub use self::model::{
    ApiRef, CategorySnapshot, ClassLearning, ClassLevelEntry, ClassRecord, FeatureRecord,
    FullApiDataset, Indexed, LearnableLevel, ReferenceDataset, RulesetBundle, SpellRecord,
    SubclassRecord,
};

pub mod model;
pub mod normalize;
pub mod resolve;
