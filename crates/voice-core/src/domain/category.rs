use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::PostType;
use crate::error::DomainError;

/// Topic assigned to a post by automatic classification.
///
/// Each [`PostType`] has its own set of eight categories; `Other` belongs to both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    // good_thing
    School,
    Friends,
    Family,
    Hobby,
    Achievement,
    Nature,
    Food,

    // ideal_world
    Environment,
    Peace,
    Education,
    HumanRights,
    Technology,
    Health,
    Community,

    Other,
}

const GOOD_THING: [Category; 8] = [
    Category::School,
    Category::Friends,
    Category::Family,
    Category::Hobby,
    Category::Achievement,
    Category::Nature,
    Category::Food,
    Category::Other,
];

const IDEAL_WORLD: [Category; 8] = [
    Category::Environment,
    Category::Peace,
    Category::Education,
    Category::HumanRights,
    Category::Technology,
    Category::Health,
    Category::Community,
    Category::Other,
];

impl Category {
    /// The closed category list valid for a post type.
    pub fn for_type(post_type: PostType) -> &'static [Category] {
        match post_type {
            PostType::GoodThing => &GOOD_THING,
            PostType::IdealWorld => &IDEAL_WORLD,
        }
    }

    /// Resolve a free-form label against the set for `post_type`.
    ///
    /// Anything that is not a member of that set becomes `Other`.
    pub fn resolve(label: &str, post_type: PostType) -> Category {
        let label = label.trim().to_lowercase();
        Self::for_type(post_type)
            .iter()
            .copied()
            .find(|c| c.as_str() == label)
            .unwrap_or(Category::Other)
    }

    pub fn belongs_to(&self, post_type: PostType) -> bool {
        Self::for_type(post_type).contains(self)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::School => "school",
            Category::Friends => "friends",
            Category::Family => "family",
            Category::Hobby => "hobby",
            Category::Achievement => "achievement",
            Category::Nature => "nature",
            Category::Food => "food",
            Category::Environment => "environment",
            Category::Peace => "peace",
            Category::Education => "education",
            Category::HumanRights => "human_rights",
            Category::Technology => "technology",
            Category::Health => "health",
            Category::Community => "community",
            Category::Other => "other",
        }
    }

    /// Description shown to the classification model.
    pub fn description(&self) -> &'static str {
        match self {
            Category::School => "学校・勉強に関する内容",
            Category::Friends => "友人・人間関係に関する内容",
            Category::Family => "家族に関する内容",
            Category::Hobby => "趣味・娯楽に関する内容",
            Category::Achievement => "達成・成長に関する内容",
            Category::Nature => "自然・癒しに関する内容",
            Category::Food => "食事・グルメに関する内容",
            Category::Environment => "環境・自然に関する内容",
            Category::Peace => "平和・安全に関する内容",
            Category::Education => "教育に関する内容",
            Category::HumanRights => "人権・平等に関する内容",
            Category::Technology => "テクノロジーに関する内容",
            Category::Health => "健康・医療に関する内容",
            Category::Community => "コミュニティに関する内容",
            Category::Other => "その他",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GOOD_THING
            .iter()
            .chain(IDEAL_WORLD.iter())
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| DomainError::Validation(format!("Unknown category: {}", s)))
    }
}
