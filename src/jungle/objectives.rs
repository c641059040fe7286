use serde::Serialize;

pub const SEASON: &str = "14";
pub const PATCH: &str = "14.24";

#[derive(Debug, Clone, Serialize)]
pub struct DragonTimers {
    pub first_spawn: u32,
    pub respawn_time: u32,
    pub types: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct BaronTimers {
    pub first_spawn: u32,
    pub respawn_time: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeraldTimers {
    pub first_spawn: u32,
    /// Leaves the pit when Baron spawns.
    pub despawn_time: u32,
    pub respawn_time: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CampRespawn {
    pub respawn: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct JungleCamps {
    pub krugs: CampRespawn,
    pub gromp: CampRespawn,
    pub wolves: CampRespawn,
    pub raptors: CampRespawn,
    pub red_buff: CampRespawn,
    pub blue_buff: CampRespawn,
    pub scuttle: CampRespawn,
}

/// Standard spawn and respawn times, all in seconds.
#[derive(Debug, Clone, Serialize)]
pub struct ObjectiveTimers {
    pub dragons: DragonTimers,
    pub baron: BaronTimers,
    pub herald: HeraldTimers,
    pub jungle_camps: JungleCamps,
}

pub const STANDARD_TIMERS: ObjectiveTimers = ObjectiveTimers {
    dragons: DragonTimers {
        first_spawn: 300,
        respawn_time: 300,
        types: &["Ocean", "Mountain", "Cloud", "Infernal", "Hextech", "Chemtech"],
    },
    baron: BaronTimers {
        first_spawn: 1200,
        respawn_time: 360,
    },
    herald: HeraldTimers {
        first_spawn: 480,
        despawn_time: 1140,
        respawn_time: 360,
    },
    jungle_camps: JungleCamps {
        krugs: CampRespawn { respawn: 135 },
        gromp: CampRespawn { respawn: 135 },
        wolves: CampRespawn { respawn: 135 },
        raptors: CampRespawn { respawn: 135 },
        red_buff: CampRespawn { respawn: 300 },
        blue_buff: CampRespawn { respawn: 300 },
        scuttle: CampRespawn { respawn: 150 },
    },
};
