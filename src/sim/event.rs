/// Events emitted during a simulation step.
/// The presentation layer consumes these for messages/effects.

#[derive(Clone, Debug)]
#[allow(dead_code)]
pub enum GameEvent {
    EnemyMoved { row: usize, col: usize },
    ReachedExit,
    PlayerCaught,
}
