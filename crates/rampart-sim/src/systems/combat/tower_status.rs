//! Tower status checks: stun and disable gate firing.

use rampart_core::components::TowerStatus;

/// Whether the tower may act this tick. Refreshes the display flags; expired
/// timers simply read as inactive.
pub fn can_act(status: &mut TowerStatus, now: f64) -> bool {
    status.shows_stunned = now < status.stunned_until;
    status.shows_disabled = now < status.disabled_until;
    !(status.shows_stunned || status.shows_disabled)
}

/// Whether the fire-rate cooldown has elapsed.
pub fn is_reloaded(status: &TowerStatus, fire_interval_secs: f64, now: f64) -> bool {
    status
        .last_fire_at
        .is_none_or(|last| now - last >= fire_interval_secs)
}
