pub mod codec;
pub mod filter_url;
pub mod slug;
pub mod wizard;

pub use crate::domain::model::{Advice, ModulePick, Selection};
pub use crate::domain::ports::{Slot, StateStore};
pub use crate::utils::error::Result;
