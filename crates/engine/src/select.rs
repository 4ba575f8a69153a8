use crate::angle;
use crate::config::{Mode, PatrolPolicy, Selection};
use crate::sources::Clock;
use crate::world::{Entity, WorldFrame};
use std::cmp::Ordering;

/// The collection a deployment mode considers for this frame.
pub fn candidates(frame: &WorldFrame, mode: Mode) -> &[Entity] {
    match mode {
        Mode::Rocks => &frame.rocks,
        Mode::Ships => &frame.ships,
        Mode::Hunter if !frame.ships.is_empty() => &frame.ships,
        Mode::Hunter => &frame.rocks,
    }
}

/// Candidates ordered best-first. The sort is stable, so equal keys keep
/// their order of arrival and the first occurrence wins.
pub fn rank(candidates: &[Entity], selection: Selection) -> Vec<&Entity> {
    let mut ranked: Vec<&Entity> = candidates.iter().collect();
    let uses_radius = selection == Selection::Largest && ranked.iter().all(|e| e.radius.is_some());
    if uses_radius {
        ranked.sort_by(|a, b| by_radius_desc(a, b));
    } else {
        ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    }
    ranked
}

fn by_radius_desc(a: &Entity, b: &Entity) -> Ordering {
    let ra = a.radius.unwrap_or(0.0);
    let rb = b.radius.unwrap_or(0.0);
    rb.total_cmp(&ra)
}

pub fn select(candidates: &[Entity], selection: Selection) -> Option<&Entity> {
    rank(candidates, selection).into_iter().next()
}

/// Bearing to hold while nothing is in sight, already normalized.
pub fn patrol(policy: PatrolPolicy, own_bearing: f64, clock: &impl Clock) -> f64 {
    let theta = match policy {
        PatrolPolicy::Hold => own_bearing,
        PatrolPolicy::Advance { step } => own_bearing + step,
        PatrolPolicy::ClockHand => {
            let second_hand = (360 - clock.unix_seconds().rem_euclid(360)) % 360;
            angle::degrees_to_radians(second_hand as f64)
        }
    };
    angle::normalize(theta)
}
