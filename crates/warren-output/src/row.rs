//! Plain data row types written by output backends.

use warren_agent::{CensusRecord, Food, PopulationBest, Rabbit};

/// One census sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CensusRow {
    pub time:            f64,
    pub rabbit_count:    u64,
    pub food_count:      u64,
    pub removed_rabbits: u64,
    pub eaten_food:      u64,
    pub decayed_food:    u64,
}

impl From<&CensusRecord> for CensusRow {
    fn from(r: &CensusRecord) -> Self {
        Self {
            time:            r.time.as_f64(),
            rabbit_count:    r.rabbit_count,
            food_count:      r.food_count,
            removed_rabbits: r.removed_rabbits,
            eaten_food:      r.eaten_food,
            decayed_food:    r.decayed_food,
        }
    }
}

/// The position of one live agent at a snapshot time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapshotRow {
    pub time:     f64,
    /// `"rabbit"` or `"food"`.
    pub kind:     &'static str,
    pub agent_id: u64,
    pub x:        i32,
    pub y:        i32,
    /// Food past its half-life; always `false` for rabbits.
    pub decayed:  bool,
}

impl SnapshotRow {
    pub fn rabbit(time: f64, r: &Rabbit) -> Self {
        Self { time, kind: "rabbit", agent_id: r.id.0, x: r.pos.x, y: r.pos.y, decayed: false }
    }

    pub fn food(time: f64, f: &Food) -> Self {
        Self {
            time,
            kind:     "food",
            agent_id: f.id.0,
            x:        f.pos.x,
            y:        f.pos.y,
            decayed:  f.is_decayed(),
        }
    }
}

/// One entry of the best-of-population record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestRow {
    pub metric:   &'static str,
    pub value:    f64,
    pub agent_id: u64,
}

impl BestRow {
    /// Rows for every metric that has a holder; empty metrics are skipped.
    pub fn from_best(best: &PopulationBest) -> Vec<BestRow> {
        let mut rows = Vec::with_capacity(3);
        if let Some((value, id)) = best.lowest_hunger {
            rows.push(BestRow { metric: "lowest_hunger", value, agent_id: id.0 });
        }
        if let Some((value, id)) = best.longest_age {
            rows.push(BestRow { metric: "longest_age", value, agent_id: id.0 });
        }
        if let Some((count, id)) = best.max_breeding {
            rows.push(BestRow { metric: "max_breeding", value: f64::from(count), agent_id: id.0 });
        }
        rows
    }
}
