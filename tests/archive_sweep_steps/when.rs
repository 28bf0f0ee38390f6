//! When steps for archiving sweep BDD scenarios.

use super::world::ArchiveSweepWorld;
use chrono::TimeDelta;
use rstest_bdd_macros::when;

#[when("{days:i64} days and {seconds:i64} seconds pass")]
fn time_passes(world: &mut ArchiveSweepWorld, days: i64, seconds: i64) {
    world
        .clock
        .advance(TimeDelta::days(days) + TimeDelta::seconds(seconds));
}

#[when("the archiving sweep runs")]
fn sweep_runs(world: &mut ArchiveSweepWorld) {
    let result = world.service.archive_sweep(&mut world.registry);
    world.last_sweep = Some(result);
}
