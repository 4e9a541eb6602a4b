//! Business-category and audience presets.
//!
//! Both tables are total functions over closed enums. `Other` maps to an
//! empty override set so that an unlisted business still gets manual and
//! advisory adjustments, while a typo in a label is a parse error.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::adjust::params::FactorOverrides;
use crate::error::UnknownLabel;

/// Kind of food business the photo is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Izakaya,
    BarPub,
    Cafe,
    Restaurant,
    RamenShop,
    SushiShop,
    Yakiniku,
    Italian,
    French,
    Chinese,
    Other,
}

impl Category {
    /// Human-readable label for menus and reports.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Izakaya => "Izakaya",
            Self::BarPub => "Bar / Pub",
            Self::Cafe => "Café",
            Self::Restaurant => "Restaurant",
            Self::RamenShop => "Ramen shop",
            Self::SushiShop => "Sushi shop",
            Self::Yakiniku => "Yakiniku",
            Self::Italian => "Italian",
            Self::French => "French",
            Self::Chinese => "Chinese",
            Self::Other => "Other",
        }
    }

    /// Stable machine name, as accepted by `FromStr`.
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::Izakaya => "izakaya",
            Self::BarPub => "bar-pub",
            Self::Cafe => "cafe",
            Self::Restaurant => "restaurant",
            Self::RamenShop => "ramen-shop",
            Self::SushiShop => "sushi-shop",
            Self::Yakiniku => "yakiniku",
            Self::Italian => "italian",
            Self::French => "french",
            Self::Chinese => "chinese",
            Self::Other => "other",
        }
    }

    /// Japanese storefront label used by the upstream web form.
    pub const fn native_label(&self) -> &'static str {
        match self {
            Self::Izakaya => "居酒屋",
            Self::BarPub => "バー・パブ",
            Self::Cafe => "カフェ",
            Self::Restaurant => "レストラン",
            Self::RamenShop => "ラーメン店",
            Self::SushiShop => "寿司店",
            Self::Yakiniku => "焼肉店",
            Self::Italian => "イタリアン",
            Self::French => "フレンチ",
            Self::Chinese => "中華料理",
            Self::Other => "その他",
        }
    }

    pub fn all() -> &'static [Self] {
        const ALL: [Category; 11] = [
            Category::Izakaya,
            Category::BarPub,
            Category::Cafe,
            Category::Restaurant,
            Category::RamenShop,
            Category::SushiShop,
            Category::Yakiniku,
            Category::Italian,
            Category::French,
            Category::Chinese,
            Category::Other,
        ];
        &ALL
    }

    /// Factor overrides for this business type.
    pub const fn preset(&self) -> FactorOverrides {
        let none = FactorOverrides::NONE;
        match self {
            Self::Izakaya => FactorOverrides {
                warmth: Some(1.08),
                saturation: Some(1.05),
                brightness: Some(1.02),
                ..none
            },
            Self::BarPub => FactorOverrides {
                contrast: Some(1.08),
                shadows: Some(-0.1),
                warmth: Some(0.98),
                ..none
            },
            Self::Cafe => FactorOverrides {
                brightness: Some(1.05),
                highlights: Some(0.05),
                saturation: Some(1.03),
                ..none
            },
            Self::Restaurant => FactorOverrides {
                contrast: Some(1.03),
                sharpness: Some(1.02),
                warmth: Some(1.02),
                ..none
            },
            Self::RamenShop => FactorOverrides {
                warmth: Some(1.1),
                saturation: Some(1.06),
                brightness: Some(1.03),
                ..none
            },
            Self::SushiShop => FactorOverrides {
                contrast: Some(1.04),
                sharpness: Some(1.03),
                brightness: Some(1.02),
                ..none
            },
            Self::Yakiniku => FactorOverrides {
                warmth: Some(1.12),
                saturation: Some(1.08),
                contrast: Some(1.05),
                ..none
            },
            Self::Italian => FactorOverrides {
                warmth: Some(1.06),
                saturation: Some(1.04),
                brightness: Some(1.02),
                ..none
            },
            Self::French => FactorOverrides {
                contrast: Some(1.04),
                sharpness: Some(1.02),
                highlights: Some(0.03),
                ..none
            },
            Self::Chinese => FactorOverrides {
                saturation: Some(1.07),
                warmth: Some(1.05),
                brightness: Some(1.02),
                ..none
            },
            Self::Other => none,
        }
    }

    /// One-line description of the look this preset aims for.
    pub const fn style_note(&self) -> &'static str {
        match self {
            Self::Izakaya => "warm amber tones and a relaxed, familiar mood",
            Self::BarPub => "moody low-key light with richer, deeper tones",
            Self::Cafe => "bright, clean and fresh light",
            Self::Restaurant => "refined, balanced palette with professional crispness",
            Self::RamenShop => "warm golden tones that read as comfort food",
            Self::SushiShop => "crisp, clean colour that emphasises freshness",
            Self::Yakiniku => "rich warm browns and reds",
            Self::Italian => "warm Mediterranean golds with balanced saturation",
            Self::French => "elegant contrast with lifted highlights",
            Self::Chinese => "vivid reds and golds",
            Self::Other => "general appetizing colour correction",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label(s, Self::all(), "category", |c| {
            [c.slug(), c.label(), c.native_label()]
        })
    }
}

/// Who the photo is meant to appeal to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Audience {
    OfficeWomen,
    OfficeMen,
    Students,
    Seniors,
    Couples,
    Families,
    FriendGroups,
    Other,
}

impl Audience {
    /// Human-readable label for menus and reports.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::OfficeWomen => "Office women",
            Self::OfficeMen => "Office men",
            Self::Students => "Students",
            Self::Seniors => "Seniors",
            Self::Couples => "Couples",
            Self::Families => "Families",
            Self::FriendGroups => "Friend groups",
            Self::Other => "Other",
        }
    }

    /// Stable machine name, as accepted by `FromStr`.
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::OfficeWomen => "office-women",
            Self::OfficeMen => "office-men",
            Self::Students => "students",
            Self::Seniors => "seniors",
            Self::Couples => "couples",
            Self::Families => "families",
            Self::FriendGroups => "friend-groups",
            Self::Other => "other",
        }
    }

    pub const fn native_label(&self) -> &'static str {
        match self {
            Self::OfficeWomen => "OL・女性会社員",
            Self::OfficeMen => "男性会社員",
            Self::Students => "学生",
            Self::Seniors => "シニア",
            Self::Couples => "カップル",
            Self::Families => "家族",
            Self::FriendGroups => "友人グループ",
            Self::Other => "その他",
        }
    }

    pub fn all() -> &'static [Self] {
        const ALL: [Audience; 8] = [
            Audience::OfficeWomen,
            Audience::OfficeMen,
            Audience::Students,
            Audience::Seniors,
            Audience::Couples,
            Audience::Families,
            Audience::FriendGroups,
            Audience::Other,
        ];
        &ALL
    }

    /// Factor overrides for this audience. Applied after the category.
    pub const fn preset(&self) -> FactorOverrides {
        let none = FactorOverrides::NONE;
        match self {
            Self::OfficeWomen => FactorOverrides {
                brightness: Some(1.03),
                saturation: Some(1.04),
                highlights: Some(0.05),
                ..none
            },
            Self::OfficeMen => FactorOverrides {
                contrast: Some(1.02),
                sharpness: Some(1.01),
                ..none
            },
            Self::Students => FactorOverrides {
                saturation: Some(1.05),
                brightness: Some(1.03),
                warmth: Some(1.02),
                ..none
            },
            Self::Seniors => FactorOverrides {
                contrast: Some(1.03),
                brightness: Some(1.02),
                sharpness: Some(1.01),
                ..none
            },
            Self::Couples => FactorOverrides {
                warmth: Some(1.05),
                brightness: Some(1.02),
                saturation: Some(1.02),
                ..none
            },
            Self::Families => FactorOverrides {
                brightness: Some(1.03),
                warmth: Some(1.03),
                saturation: Some(1.02),
                ..none
            },
            Self::FriendGroups => FactorOverrides {
                saturation: Some(1.04),
                brightness: Some(1.02),
                warmth: Some(1.02),
                ..none
            },
            Self::Other => none,
        }
    }

    /// One-line description of the tuning for this audience.
    pub const fn style_note(&self) -> &'static str {
        match self {
            Self::OfficeWomen => "trendy, bright tones suited to social feeds",
            Self::OfficeMen => "clean, businesslike finish",
            Self::Students => "lively, energetic colour",
            Self::Seniors => "clear, easy-to-read contrast",
            Self::Couples => "soft, romantic warmth",
            Self::Families => "friendly, welcoming warmth",
            Self::FriendGroups => "cheerful, social colour",
            Self::Other => "broad appeal",
        }
    }
}

impl fmt::Display for Audience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Audience {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label(s, Self::all(), "audience", |a| {
            [a.slug(), a.label(), a.native_label()]
        })
    }
}

/// Match trimmed input against slug, label and native label of each
/// variant. ASCII comparison ignores case, `_` and spaces stand for `-`.
fn parse_label<T: Copy>(
    input: &str,
    variants: &[T],
    kind: &'static str,
    names: impl Fn(&T) -> [&'static str; 3],
) -> Result<T, UnknownLabel> {
    let wanted = normalize(input);
    variants
        .iter()
        .find(|v| names(v).iter().any(|name| normalize(name) == wanted))
        .copied()
        .ok_or_else(|| UnknownLabel {
            kind,
            label: input.to_string(),
        })
}

fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c {
            '_' | ' ' => '-',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_round_trips_through_from_str() {
        for category in Category::all() {
            assert_eq!(category.slug().parse::<Category>().unwrap(), *category);
        }
        for audience in Audience::all() {
            assert_eq!(audience.slug().parse::<Audience>().unwrap(), *audience);
        }
    }

    #[test]
    fn test_native_and_display_labels_parse() {
        assert_eq!("ラーメン店".parse::<Category>().unwrap(), Category::RamenShop);
        assert_eq!("Bar / Pub".parse::<Category>().unwrap(), Category::BarPub);
        assert_eq!("家族".parse::<Audience>().unwrap(), Audience::Families);
        assert_eq!("Friend_Groups".parse::<Audience>().unwrap(), Audience::FriendGroups);
    }

    #[test]
    fn test_unknown_label_is_an_error() {
        let err = "sushi-shopp".parse::<Category>().unwrap_err();
        assert_eq!(err.kind, "category");
        assert_eq!(err.label, "sushi-shopp");
        assert!("teenagers".parse::<Audience>().is_err());
    }

    #[test]
    fn test_other_has_no_overrides() {
        assert!(Category::Other.preset().is_empty());
        assert!(Audience::Other.preset().is_empty());
    }

    #[test]
    fn test_every_listed_preset_sets_something() {
        for category in Category::all().iter().filter(|c| **c != Category::Other) {
            assert!(!category.preset().is_empty(), "{category} has no preset");
        }
        for audience in Audience::all().iter().filter(|a| **a != Audience::Other) {
            assert!(!audience.preset().is_empty(), "{audience} has no preset");
        }
    }

    #[test]
    fn test_preset_multiplicative_values_stay_positive() {
        let presets = Category::all()
            .iter()
            .map(Category::preset)
            .chain(Audience::all().iter().map(Audience::preset));
        for p in presets {
            for v in [p.brightness, p.contrast, p.saturation, p.sharpness, p.warmth]
                .into_iter()
                .flatten()
            {
                assert!(v > 0.0);
            }
        }
    }
}
