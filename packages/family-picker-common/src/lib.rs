pub mod month;
pub mod selection;
pub mod types;

pub use month::MonthKey;
pub use selection::{derive_seed, select_index};
pub use types::{normalize_name, DrawRecord, Participant, PickOutcome};
