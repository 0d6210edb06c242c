mod map_modal;
mod notice;

pub use self::{map_modal::*, notice::*};
