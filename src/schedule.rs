pub mod demand;
pub mod engine;
#[allow(clippy::module_inception)]
pub mod schedule;

pub use engine::{AssignConfig, Selection};
pub use schedule::Schedule;

#[cfg(test)]
mod tests {
    mod assign;
    mod capacity;
    mod proptests;
    mod scenario;
    mod utils;
}
