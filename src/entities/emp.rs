use super::{Bomb, Enemy};

/// Electromagnetic pulse over everything currently in play: enemies stop
/// dropping bombs for good and every bomb is slowed and defused.
///
/// Paying for the pulse and drawing its flash are the caller's job.
pub fn trigger_emp(enemies: &mut [Enemy], bombs: &mut [Bomb]) {
    for enemy in enemies.iter_mut() {
        enemy.disable();
    }
    for bomb in bombs.iter_mut() {
        bomb.neutralize();
    }
    tracing::info!(
        enemies = enemies.len(),
        bombs = bombs.len(),
        "EMP discharged"
    );
}
