//! Text rendering for console, center-screen and chat output

pub mod hitgroup;

pub use hitgroup::Hitgroup;

use std::fmt;

use crate::damage::DamageStat;

/// Running totals above this switch the center text to the deadly variant.
///
/// The host garbles the armor/hit group tail of the normal variant once the
/// number gets this large.
pub const DEADLY_THRESHOLD: u32 = 110;

/// Name used when an opponent can no longer be resolved
pub const UNKNOWN_PLAYER: &str = "Unknown";

const DEAD: &str = "DEAD";

/// Center-screen notification for the attacker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CenterMessage {
    Normal {
        total_damage: u32,
        armor_damage: u32,
        hitgroup: Hitgroup,
    },
    Deadly {
        total_damage: u32,
        hitgroup: Hitgroup,
    },
}

impl CenterMessage {
    pub fn new(total_damage: u32, armor_damage: u32, hitgroup: Hitgroup) -> Self {
        if total_damage > DEADLY_THRESHOLD {
            Self::Deadly {
                total_damage,
                hitgroup,
            }
        } else {
            Self::Normal {
                total_damage,
                armor_damage,
                hitgroup,
            }
        }
    }

    pub fn is_deadly(&self) -> bool {
        matches!(self, Self::Deadly { .. })
    }
}

impl fmt::Display for CenterMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal {
                total_damage,
                armor_damage,
                hitgroup,
            } => write!(
                f,
                "Damage: {} - Armor: {} - HitGroup: {}",
                total_damage, armor_damage, hitgroup
            ),
            Self::Deadly {
                total_damage,
                hitgroup,
            } => write!(f, "Deadly hit! Damage: {} - HitGroup: {}", total_damage, hitgroup),
        }
    }
}

/// Console line for the attacker
pub fn console_given(victim_name: &str, health_damage: u32, armor_damage: u32, hitgroup: Hitgroup) -> String {
    format!(
        "[DamageInfo] You hit {} for {} damage ({} armor) in the {}",
        victim_name, health_damage, armor_damage, hitgroup
    )
}

/// Console line for the victim
pub fn console_taken(attacker_name: &str, health_damage: u32, armor_damage: u32, hitgroup: Hitgroup) -> String {
    format!(
        "[DamageInfo] {} hit you for {} damage ({} armor) in the {}",
        attacker_name, health_damage, armor_damage, hitgroup
    )
}

pub fn summary_start_line() -> &'static str {
    "----------- Damage Summary -----------"
}

pub fn summary_end_line() -> &'static str {
    "--------------------------------------"
}

/// `"{hp}HP"` for a living opponent, `DEAD` otherwise
pub fn health_status(health: Option<i32>) -> String {
    match health {
        Some(hp) if hp > 0 => format!("{}HP", hp),
        _ => DEAD.to_string(),
    }
}

pub fn summary_data_line(name: &str, health_status: &str, taken: &DamageStat, given: &DamageStat) -> String {
    format!(
        "{} ({}) | Taken: {} in {} hits | Given: {} in {} hits",
        name, health_status, taken.total_damage, taken.hits, given.total_damage, given.hits
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_selects_variant() {
        let normal = CenterMessage::new(110, 12, Hitgroup::Chest);
        let deadly = CenterMessage::new(111, 12, Hitgroup::Head);

        assert!(!normal.is_deadly());
        assert!(deadly.is_deadly());
        assert_eq!(normal.to_string(), "Damage: 110 - Armor: 12 - HitGroup: Chest");
        assert_eq!(deadly.to_string(), "Deadly hit! Damage: 111 - HitGroup: Head");
    }

    #[test]
    fn health_status_reports_dead_for_non_positive() {
        assert_eq!(health_status(Some(57)), "57HP");
        assert_eq!(health_status(Some(0)), "DEAD");
        assert_eq!(health_status(None), "DEAD");
    }

    #[test]
    fn data_line_shows_both_directions() {
        let line = summary_data_line("bob", "DEAD", &DamageStat::new(64, 2), &DamageStat::new(100, 1));
        assert_eq!(line, "bob (DEAD) | Taken: 64 in 2 hits | Given: 100 in 1 hits");
    }
}
