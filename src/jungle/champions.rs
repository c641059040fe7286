use serde::Serialize;

const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChampionJungleStats {
    pub clear_speed: &'static str,
    pub gank_potential: &'static str,
    pub scaling: &'static str,
    pub difficulty: &'static str,
    pub recommended_build: &'static [&'static str],
    pub optimal_runes: &'static str,
}

impl ChampionJungleStats {
    pub const UNKNOWN: Self = Self {
        clear_speed: UNKNOWN,
        gank_potential: UNKNOWN,
        scaling: UNKNOWN,
        difficulty: UNKNOWN,
        recommended_build: &[],
        optimal_runes: UNKNOWN,
    };

    pub fn is_known(&self) -> bool {
        self != &Self::UNKNOWN
    }
}

// Keys are already normalized, see `champion_key`.
const JUNGLE_STATS: &[(&str, ChampionJungleStats)] = &[
    (
        "graves",
        ChampionJungleStats {
            clear_speed: "A+",
            gank_potential: "B",
            scaling: "A",
            difficulty: "Medium",
            recommended_build: &["Warrior", "Berserker's Greaves", "The Collector"],
            optimal_runes: "Fleet Footwork",
        },
    ),
    (
        "kindred",
        ChampionJungleStats {
            clear_speed: "B+",
            gank_potential: "A",
            scaling: "S",
            difficulty: "Hard",
            recommended_build: &["Kraken Slayer", "Berserker's Greaves", "Runaan's Hurricane"],
            optimal_runes: "Press the Attack",
        },
    ),
    (
        "khazix",
        ChampionJungleStats {
            clear_speed: "B",
            gank_potential: "A+",
            scaling: "A",
            difficulty: "Medium",
            recommended_build: &["Duskblade", "Ionian Boots", "Youmuu's Ghostblade"],
            optimal_runes: "Dark Harvest",
        },
    ),
];

/// Lowercase with apostrophes and spaces removed: `"Kha'Zix"` -> `"khazix"`.
pub fn champion_key(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '\'' && *c != ' ')
        .flat_map(char::to_lowercase)
        .collect()
}

pub fn jungle_stats_for(champion: &str) -> &'static ChampionJungleStats {
    let key = champion_key(champion);
    JUNGLE_STATS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, stats)| stats)
        .unwrap_or(&ChampionJungleStats::UNKNOWN)
}
