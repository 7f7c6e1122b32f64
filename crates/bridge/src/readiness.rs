use std::fmt::Display;

/// What the host is doing, as far as calls into the native library are concerned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HostState {
    /// Gameplay is running, native calls are meaningful.
    Ready,
    Paused,
    /// Main menu, loading screens and anything else before a game session.
    PreGame,
    /// The host could not answer the query.
    Unavailable,
}

impl Display for HostState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            HostState::Ready => "ready",
            HostState::Paused => "paused",
            HostState::PreGame => "pre-game",
            HostState::Unavailable => "unavailable",
        })
    }
}

/// Queried before every operation, a state other than [`HostState::Ready`] short-circuits the
/// operation without touching the native library.
pub trait Readiness: Send {
    fn state(&self) -> HostState;

    fn is_ready(&self) -> bool {
        self.state() == HostState::Ready
    }
}

impl<F> Readiness for F
where
    F: Fn() -> HostState + Send,
{
    fn state(&self) -> HostState {
        (self)()
    }
}

/// For hosts without a notion of game state.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysReady;

impl Readiness for AlwaysReady {
    fn state(&self) -> HostState {
        HostState::Ready
    }
}
