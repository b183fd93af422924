/// Screen views
///
/// Pure view functions, one per screen, plus the shared dog-card grid.
/// All state lives on the app struct; these only read it.

pub mod favorites;
pub mod login;
pub mod matching;
pub mod results;
pub mod search;
