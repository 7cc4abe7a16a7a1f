mod lesson;
mod order;

pub use self::{lesson::*, order::*};
