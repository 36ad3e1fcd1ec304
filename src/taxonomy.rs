//! Tag taxonomy
//!
//! Flat entity tags are grouped into a fixed two-level hierarchy of
//! categories. Searching a category matches every child tag listed under it.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::Serialize;

/// A top-level tag category and the tags it groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TagCategory {
    pub id: &'static str,
    pub label: &'static str,
    pub children: &'static [&'static str],
}

impl TagCategory {
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.children.contains(&tag)
    }
}

/// Registration order matters: a tag listed under several categories
/// resolves to the last one.
pub static TAG_TAXONOMY: &[TagCategory] = &[
    TagCategory {
        id: "type",
        label: "Type",
        children: &[
            "movie", "film", "book", "novel", "short-story", "television", "tv-show",
        ],
    },
    TagCategory {
        id: "characters",
        label: "Characters",
        children: &[
            "alfred-pennyworth", "bruce-wayne", "batman", "joker", "catwoman",
            "commissioner-gordon", "bane", "doc-brown", "marty-mcfly", "biff-tannen",
            "michael-corleone", "vito-corleone", "don-corleone", "frodo", "gandalf",
            "aragorn", "sauron", "gollum", "sherlock-holmes", "john-watson", "moriarty",
            "james-bond", "hari-seldon",
        ],
    },
    TagCategory {
        id: "genre",
        label: "Genre",
        children: &[
            "action", "adventure", "comedy", "crime", "drama", "fantasy", "horror",
            "mystery", "romance", "sci-fi", "science-fiction", "thriller", "western",
            "noir", "espionage", "spy-fiction", "cyberpunk", "heist", "satire", "musical",
            "animation", "documentary", "war", "biographical",
        ],
    },
    TagCategory {
        id: "theme",
        label: "Theme",
        children: &[
            "loyalty", "betrayal", "redemption", "revenge", "justice", "corruption",
            "power", "ambition", "family", "identity", "sacrifice", "survival", "freedom",
            "isolation", "obsession", "paranoia", "morality", "deception", "trust",
            "honor", "duty", "legacy", "fate", "destiny", "love", "loss", "grief", "hope",
            "fear", "greed", "transformation", "coming-of-age",
        ],
    },
    TagCategory {
        id: "era",
        label: "Era",
        children: &[
            "ancient", "medieval", "renaissance", "victorian", "edwardian", "1920s",
            "1930s", "1940s", "1950s", "1960s", "1970s", "1980s", "1990s", "2000s",
            "2010s", "2020s", "cold-war", "post-war", "futuristic", "near-future",
            "far-future", "timeless", "19th-century", "20th-century", "21st-century",
        ],
    },
    TagCategory {
        id: "tone",
        label: "Tone",
        children: &[
            "dark", "light", "gritty", "whimsical", "cerebral", "atmospheric",
            "suspenseful", "tense", "dramatic", "comedic", "tragic", "epic", "intimate",
            "surreal", "dreamlike", "nostalgic", "melancholic", "hopeful", "bleak",
            "campy", "satirical", "heartfelt",
        ],
    },
    TagCategory {
        id: "setting",
        label: "Setting",
        children: &[
            "urban", "rural", "suburban", "industrial", "gothic", "dystopian", "utopian",
            "post-apocalyptic", "underwater", "underground", "space", "desert", "jungle",
            "forest", "mountain", "coastal", "island", "metropolitan", "small-town",
            "wilderness",
        ],
    },
    TagCategory {
        id: "franchise",
        label: "Franchise",
        children: &[
            "batman", "dc-universe", "dark-knight", "gotham", "james-bond", "007", "mi6",
            "back-to-the-future", "hill-valley", "the-godfather", "corleone",
            "middle-earth", "lord-of-the-rings", "the-hobbit", "foundation",
            "foundation-series", "discworld", "sherlock-holmes", "neuromancer", "sprawl",
            "inception", "tenet", "interstellar", "the-prestige", "oppenheimer",
            "christopher-nolan",
        ],
    },
    TagCategory {
        id: "skill",
        label: "Skill",
        children: &[
            "combat", "martial-arts", "stealth", "tactical", "strategic", "marksman",
            "hacking", "engineering", "scientific", "medical", "legal", "political",
            "diplomatic", "linguistic", "artistic", "musical", "athletic", "acrobatic",
            "driving", "piloting", "leadership", "investigation", "deduction",
        ],
    },
    TagCategory {
        id: "trait",
        label: "Trait",
        children: &[
            "loyal", "brave", "cunning", "wise", "cruel", "ruthless", "ambitious",
            "charismatic", "intelligent", "resourceful", "determined", "manipulative",
            "mysterious", "enigmatic", "charming", "witty", "arrogant", "stoic",
            "eccentric", "calculating", "patient", "fierce", "cold", "clever", "cynical",
            "idealistic", "pragmatic", "honorable", "fearless", "compassionate",
            "vengeful",
        ],
    },
    TagCategory {
        id: "style",
        label: "Style",
        children: &[
            "gothic", "art-deco", "noir", "neon", "retro", "vintage", "classic", "modern",
            "futuristic", "sleek", "ornate", "minimalist", "baroque", "industrial",
            "brutalist", "elegant", "cinematic", "iconic",
        ],
    },
    TagCategory {
        id: "place",
        label: "Place",
        children: &[
            "california", "new-york", "london", "paris", "los-angeles", "chicago", "tokyo",
            "las-vegas", "italy", "england", "france", "germany", "japan", "hollywood",
            "manhattan", "san-francisco", "washington-dc", "moscow", "berlin",
        ],
    },
    TagCategory {
        id: "narrative",
        label: "Narrative",
        children: &[
            "twist", "plot-twist", "flashback", "nonlinear", "unreliable-narrator",
            "mcguffin", "cliffhanger", "foreshadowing", "origin-story", "sequel",
            "prequel", "trilogy", "ensemble", "character-driven", "action-driven",
            "dialogue-heavy", "visual-storytelling",
        ],
    },
    TagCategory {
        id: "recognition",
        label: "Recognition",
        children: &[
            "academy-award", "academy-award-winner", "academy-award-nominee",
            "oscar-winner", "golden-globe", "bafta", "acclaimed", "award-winning",
            "critically-acclaimed", "cult-classic", "blockbuster", "box-office-hit",
            "classic", "legendary", "influential",
        ],
    },
    TagCategory {
        id: "role",
        label: "Role",
        children: &[
            "actor", "actress", "director", "writer", "producer", "composer",
            "cinematographer", "scientist", "spy", "detective", "mobster", "businessman",
            "soldier", "agent", "assassin", "thief", "lawyer", "doctor", "politician",
            "journalist", "engineer", "pilot", "captain", "butler", "mentor", "villain",
            "hero", "antihero",
        ],
    },
];

struct TaxonomyIndex {
    by_id: HashMap<&'static str, &'static TagCategory>,
    parent_of: HashMap<&'static str, &'static str>,
}

static INDEX: LazyLock<TaxonomyIndex> = LazyLock::new(|| {
    let mut by_id = HashMap::with_capacity(TAG_TAXONOMY.len());
    let mut parent_of = HashMap::new();
    for category in TAG_TAXONOMY {
        by_id.insert(category.id, category);
        for child in category.children {
            parent_of.insert(*child, category.id);
        }
    }
    TaxonomyIndex { by_id, parent_of }
});

/// All tags that should match when searching for `tag`.
///
/// A category id expands to itself followed by its children; any other tag
/// expands to just itself.
#[must_use]
pub fn expand_tag(tag: &str) -> Vec<String> {
    match category(tag) {
        Some(category) => std::iter::once(category.id)
            .chain(category.children.iter().copied())
            .map(str::to_string)
            .collect(),
        None => vec![tag.to_string()],
    }
}

/// The category a child tag belongs to, if any.
#[must_use]
pub fn tag_parent(tag: &str) -> Option<&'static str> {
    INDEX.parent_of.get(tag).copied()
}

#[must_use]
pub fn is_category(tag: &str) -> bool {
    INDEX.by_id.contains_key(tag)
}

#[must_use]
pub fn category(id: &str) -> Option<&'static TagCategory> {
    INDEX.by_id.get(id).copied()
}

#[must_use]
pub fn category_ids() -> Vec<&'static str> {
    TAG_TAXONOMY.iter().map(|category| category.id).collect()
}

/// `"sci-fi"` becomes `"Sci Fi"`.
#[must_use]
pub fn tag_to_label(tag: &str) -> String {
    tag.split('-')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `"Sci Fi"` becomes `"sci-fi"`.
#[must_use]
pub fn label_to_tag(label: &str) -> String {
    label
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}
